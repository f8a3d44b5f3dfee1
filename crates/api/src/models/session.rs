//! Session-related types.
//!
//! Types stored in the session for authentication state. Logging in (and
//! therefore writing these values) is handled by the authentication
//! service; this crate only reads them.

use serde::{Deserialize, Serialize};

use foodgram_core::UserId;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's public username.
    pub username: String,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
