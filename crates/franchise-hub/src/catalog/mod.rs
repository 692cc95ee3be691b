//! The browsable franchise catalog.
//!
//! Listings are immutable once created: there is no update or delete
//! surface. Rows enter through the seed tooling, either from a CSV export
//! or the built-in samples.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;

pub use domain::{Franchise, FranchiseId, NewFranchise};
pub use import::{parse_listings, ImportError};
pub use repository::FranchiseRepository;
pub use router::catalog_router;
