pub mod content;
pub mod enquiry;

pub use content::{ACCREDITATIONS, Accreditation, CASE_STUDIES, CaseStudy};
pub use enquiry::{Enquiry, EnquiryPayload, FieldViolation, NewEnquiry, ValidationError};
