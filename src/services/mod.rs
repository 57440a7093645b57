pub mod enquiry_service;
pub use enquiry_service::{EnquiryError, EnquiryService, Receipt};

pub mod enquiry_service_impl;
pub use enquiry_service_impl::SeaOrmEnquiryService;

pub mod notification;
pub use notification::{EmailNotifier, EnquiryNotifier, NotifyOutcome};
