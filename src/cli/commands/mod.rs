mod check;
mod enquiries;

pub use check::cmd_check;
pub use enquiries::cmd_enquiries;
