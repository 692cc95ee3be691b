//! Account registration and login against the user collection.
//!
//! Passwords are stored as salted argon2 hashes; the raw credential never
//! reaches the repository or the logs. Email uniqueness is enforced by the
//! store itself, so a duplicate registration loses the race cleanly instead
//! of slipping through a check-then-insert window.

pub mod domain;
pub(crate) mod password;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{LoginRequest, NewUser, RegistrationRequest, Role, StoredCredentials, User, UserId};
pub use password::CredentialError;
pub use repository::UserRepository;
pub use router::account_router;
pub use service::{AccountError, AccountService};
