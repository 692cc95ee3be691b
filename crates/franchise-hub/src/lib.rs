//! Backend services for the franchise listing platform.
//!
//! The crate is organized by business area: [`accounts`] covers registration
//! and login, [`catalog`] exposes the franchise listings, [`projections`]
//! computes and records financial return projections, [`applications`]
//! tracks submitted applications through moderation, and [`favorites`]
//! bookmarks listings per user. [`store`] provides the SQLite-backed
//! repositories the services run against.

pub mod accounts;
pub mod applications;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod projections;
pub mod store;
pub mod telemetry;
