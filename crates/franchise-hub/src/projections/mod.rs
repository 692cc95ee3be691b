//! Financial return projections for catalog listings.
//!
//! The engine itself is a pure fixed-formula computation; the surrounding
//! service resolves the franchise, simulates the heavy computation with a
//! non-blocking delay, and appends the input/result pair to the
//! calculation history.

pub mod domain;
pub mod engine;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CalculationId, CalculationRecord, CalculationRequest, NewCalculation, PaybackPeriod,
    Projection, ProjectionInput,
};
pub use engine::{ProjectionAssumptions, ProjectionEngine};
pub use repository::ProjectionRepository;
pub use router::projection_router;
pub use service::{CalculationOutcome, ProjectionError, ProjectionService};
