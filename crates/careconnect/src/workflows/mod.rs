pub mod caregivers;
pub mod inquiries;
pub mod notifications;
pub mod recommendation;
