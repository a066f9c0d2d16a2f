//! Core types for the Affiliate CRM.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod identity;
pub mod platform;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use identity::{Identity, IdentityError, initials};
pub use platform::Platform;
pub use role::{Role, RoleParseError};
pub use status::*;
