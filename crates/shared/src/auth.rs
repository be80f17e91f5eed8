//! Authentication types for JWT tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
///
/// Every pharmacy-scoped route reads `pharmacy` from here; a user who has not
/// yet joined a pharmacy carries `None` and can only hit the pharmacy
/// management endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Pharmacy the user is attached to, if any.
    pub pharmacy: Option<Uuid>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, pharmacy_id: Option<Uuid>, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            pharmacy: pharmacy_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the pharmacy ID from claims, if the user belongs to one.
    #[must_use]
    pub const fn pharmacy_id(&self) -> Option<Uuid> {
        self.pharmacy
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Registration request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Desired username (unique).
    pub username: String,
    /// Contact email (unique).
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Token returned after successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer access token.
    pub access_token: String,
    /// Access token expiration in seconds.
    pub expires_in: i64,
}

impl TokenResponse {
    /// Creates a new token response.
    #[must_use]
    pub const fn new(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            expires_in,
        }
    }
}
