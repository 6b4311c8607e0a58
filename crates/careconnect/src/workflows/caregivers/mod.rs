//! Caregiver roster: records, storage seam, admin operations, and CSV seeding.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;

pub use domain::{
    CaregiverId, CaregiverRecord, CaregiverStatus, CaregiverUpdate, Gender, NewCaregiver,
};
pub use import::{RosterImportError, RosterImporter};
pub use repository::{
    CaregiverRepository, CaregiverRoster, MemoryCaregiverRepository, RepositoryError,
};
pub use router::caregiver_router;
pub use service::{CaregiverAdminService, RosterServiceError};
