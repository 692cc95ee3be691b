//! Franchise application intake and moderation.
//!
//! An application is born `pending` and takes exactly one transition, to
//! `approved` or `rejected`. The transition is enforced by the store with a
//! conditional update, so two racing moderators cannot both win.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationView, ModerationDecision,
    ModerationRequest, NewApplication, SubmissionRequest,
};
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::{ApplicationError, ApplicationService};
