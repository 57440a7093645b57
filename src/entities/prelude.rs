pub use super::enquiry::Entity as Enquiry;
