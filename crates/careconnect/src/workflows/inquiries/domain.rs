use serde::{Deserialize, Serialize};

use crate::workflows::caregivers::Gender;
use crate::workflows::notifications::Notification;

const NOT_PROVIDED: &str = "not provided";
const NO_DETAILS: &str = "no details";
const MIN_CONTACT_DIGITS: usize = 10;

/// Contact form submitted from the public site, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InquirySubmission {
    General(GeneralInquiry),
    Caregiver(CaregiverInquiry),
    InsuranceClaim(InsuranceClaimRequest),
    FamilyInsuranceClaim(FamilyInsuranceClaimRequest),
    SupportApplication(SupportApplication),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralInquiry {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Follow-up on one caregiver picked from a recommendation shortlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaregiverInquiry {
    pub user_name: String,
    pub user_phone: String,
    pub caregiver_name: String,
    pub caregiver_age: u32,
    pub caregiver_gender: String,
    pub caregiver_phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceClaimRequest {
    pub patient_name: String,
    pub phone: String,
    #[serde(default)]
    pub guardian: Option<String>,
    #[serde(default)]
    pub hospital: Option<String>,
    #[serde(default)]
    pub caregiver_name: Option<String>,
    #[serde(default)]
    pub service_period: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyInsuranceClaimRequest {
    pub patient_name: String,
    pub phone: String,
    #[serde(default)]
    pub family_caregiver: Option<String>,
    #[serde(default)]
    pub hospital: Option<String>,
    #[serde(default)]
    pub care_period: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Application from someone who wants to join the caregiver roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportApplication {
    pub name: String,
    /// Digits only.
    pub contact: String,
    #[serde(default)]
    pub regions: Vec<String>,
    pub birth_date: String,
    pub gender: Gender,
    pub experience: String,
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub self_introduction: Option<String>,
    #[serde(default)]
    pub photo_attached: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InquiryValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("contact must be at least 10 digits without separators")]
    InvalidContact,
    #[error("at least one region must be selected")]
    NoRegion,
}

impl InquirySubmission {
    pub fn kind(&self) -> &'static str {
        match self {
            InquirySubmission::General(_) => "general",
            InquirySubmission::Caregiver(_) => "caregiver",
            InquirySubmission::InsuranceClaim(_) => "insurance_claim",
            InquirySubmission::FamilyInsuranceClaim(_) => "family_insurance_claim",
            InquirySubmission::SupportApplication(_) => "support_application",
        }
    }

    pub fn validate(&self) -> Result<(), InquiryValidationError> {
        match self {
            InquirySubmission::General(inquiry) => {
                require("name", &inquiry.name)?;
                require("phone", &inquiry.phone)
            }
            InquirySubmission::Caregiver(inquiry) => {
                require("userName", &inquiry.user_name)?;
                require("userPhone", &inquiry.user_phone)?;
                require("caregiverName", &inquiry.caregiver_name)?;
                require("caregiverPhone", &inquiry.caregiver_phone)
            }
            InquirySubmission::InsuranceClaim(request) => {
                require("patientName", &request.patient_name)?;
                require("phone", &request.phone)
            }
            InquirySubmission::FamilyInsuranceClaim(request) => {
                require("patientName", &request.patient_name)?;
                require("phone", &request.phone)
            }
            InquirySubmission::SupportApplication(application) => application.validate(),
        }
    }

    /// Message shown to the submitter once the admins have been notified.
    pub fn receipt(&self) -> &'static str {
        match self {
            InquirySubmission::General(_) | InquirySubmission::Caregiver(_) => {
                "Your inquiry has been received. We will contact you shortly."
            }
            InquirySubmission::InsuranceClaim(_) => {
                "Your insurance document request has been received."
            }
            InquirySubmission::FamilyInsuranceClaim(_) => {
                "Your family caregiver insurance document request has been received."
            }
            InquirySubmission::SupportApplication(_) => {
                "Your application has been received. We will review it and contact you."
            }
        }
    }

    pub fn to_notification(&self) -> Notification {
        match self {
            InquirySubmission::General(inquiry) => Notification::new(
                "general_inquiry",
                format!("General inquiry ({})", inquiry.name.trim()),
            )
            .reply_to(email(&inquiry.email))
            .field("Name", inquiry.name.trim())
            .field("Phone", inquiry.phone.trim())
            .field("Email", or_placeholder(&inquiry.email, NOT_PROVIDED))
            .field("Message", or_placeholder(&inquiry.message, NO_DETAILS)),
            InquirySubmission::Caregiver(inquiry) => Notification::new(
                "caregiver_inquiry",
                format!("Caregiver inquiry ({})", inquiry.user_name.trim()),
            )
            .field("Requester name", inquiry.user_name.trim())
            .field("Requester phone", inquiry.user_phone.trim())
            .field("Caregiver name", inquiry.caregiver_name.trim())
            .field("Caregiver age", inquiry.caregiver_age.to_string())
            .field("Caregiver gender", inquiry.caregiver_gender.trim())
            .field("Caregiver phone", inquiry.caregiver_phone.trim()),
            InquirySubmission::InsuranceClaim(request) => Notification::new(
                "insurance_claim_requested",
                format!("Insurance document request ({})", request.patient_name.trim()),
            )
            .reply_to(email(&request.email))
            .field("Patient name", request.patient_name.trim())
            .field("Phone", request.phone.trim())
            .field("Guardian", or_placeholder(&request.guardian, NOT_PROVIDED))
            .field("Hospital", or_placeholder(&request.hospital, NOT_PROVIDED))
            .field(
                "Caregiver name",
                or_placeholder(&request.caregiver_name, NOT_PROVIDED),
            )
            .field(
                "Service period",
                or_placeholder(&request.service_period, NOT_PROVIDED),
            )
            .field("Email", or_placeholder(&request.email, NOT_PROVIDED))
            .field("Details", or_placeholder(&request.details, NO_DETAILS)),
            InquirySubmission::FamilyInsuranceClaim(request) => Notification::new(
                "family_insurance_claim_requested",
                format!(
                    "Family caregiver insurance document request ({})",
                    request.patient_name.trim()
                ),
            )
            .reply_to(email(&request.email))
            .field("Patient name", request.patient_name.trim())
            .field("Phone", request.phone.trim())
            .field(
                "Family caregiver",
                or_placeholder(&request.family_caregiver, NOT_PROVIDED),
            )
            .field("Hospital", or_placeholder(&request.hospital, NOT_PROVIDED))
            .field("Care period", or_placeholder(&request.care_period, NOT_PROVIDED))
            .field("Email", or_placeholder(&request.email, NOT_PROVIDED))
            .field("Details", or_placeholder(&request.details, NO_DETAILS)),
            InquirySubmission::SupportApplication(application) => application.to_notification(),
        }
    }
}

impl SupportApplication {
    fn validate(&self) -> Result<(), InquiryValidationError> {
        require("name", &self.name)?;
        let contact = self.contact.trim();
        if contact.len() < MIN_CONTACT_DIGITS || !contact.chars().all(|c| c.is_ascii_digit()) {
            return Err(InquiryValidationError::InvalidContact);
        }
        if !self.regions.iter().any(|region| !region.trim().is_empty()) {
            return Err(InquiryValidationError::NoRegion);
        }
        require("birthDate", &self.birth_date)?;
        require("experience", &self.experience)
    }

    fn to_notification(&self) -> Notification {
        let regions = self
            .regions
            .iter()
            .map(|region| region.trim())
            .filter(|region| !region.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        Notification::new(
            "support_application_received",
            format!("New caregiver application ({})", self.name.trim()),
        )
        .field("Name", self.name.trim())
        .field("Contact", self.contact.trim())
        .field("Regions", regions)
        .field("Birth date", self.birth_date.trim())
        .field("Gender", self.gender.label())
        .field("Experience", self.experience.trim())
        .field(
            "Certifications",
            or_placeholder(&self.certifications, NOT_PROVIDED),
        )
        .field(
            "Self introduction",
            or_placeholder(&self.self_introduction, NO_DETAILS),
        )
        .field(
            "Photo",
            if self.photo_attached {
                "attached"
            } else {
                "not attached"
            },
        )
    }
}

fn require(field: &'static str, value: &str) -> Result<(), InquiryValidationError> {
    if value.trim().is_empty() {
        Err(InquiryValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

fn filled(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn or_placeholder(value: &Option<String>, placeholder: &str) -> String {
    filled(value).unwrap_or(placeholder).to_string()
}

fn email(value: &Option<String>) -> Option<String> {
    filled(value).map(str::to_string)
}
