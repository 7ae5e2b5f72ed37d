//! Core domain concepts shared across all subdomains.
//!
//! - [`organization::Organization`] — a named endorsing party
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod organization;
