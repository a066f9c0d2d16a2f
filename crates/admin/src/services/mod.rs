//! Business logic services for the dashboard.
//!
//! # Services
//!
//! - `access` - Role-based access decisions for guarded views
//! - `auth` - Credential authentication
//! - `links` - Affiliate link generation

pub mod access;
pub mod auth;
pub mod links;

pub use access::{AccessDecision, AccessGuard};
pub use auth::{AuthError, Authenticator, CredentialRecord};
pub use links::AffiliateLinkService;
