//! Session-related types.
//!
//! Keys under which per-client state is kept in the session.

/// Session keys for authentication and notice data.
pub mod keys {
    /// Key for the serialized identity of the signed-in user.
    pub const CURRENT_USER: &str = "crm_user";

    /// Key for the one-shot notices shown on the next rendered page.
    pub const NOTICE: &str = "crm_notice";
}
