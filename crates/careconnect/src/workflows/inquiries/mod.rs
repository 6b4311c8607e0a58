//! Public contact forms forwarded to the admin inbox.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{
    CaregiverInquiry, FamilyInsuranceClaimRequest, GeneralInquiry, InquirySubmission,
    InquiryValidationError, InsuranceClaimRequest, SupportApplication,
};
pub use router::inquiry_router;
pub use service::{InquiryError, InquiryService};
