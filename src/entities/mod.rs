pub mod prelude;

pub mod enquiry;
