//! Affiliate CRM Core - Shared domain types.
//!
//! This crate provides the types used across the Affiliate CRM components:
//! - `admin` - The role-gated dashboard server (admin and agent views)
//! - `integration-tests` - End-to-end tests driving the dashboard over HTTP
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no sessions, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Identities, roles, type-safe IDs, emails, statuses and platforms

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
