use serde::{Deserialize, Serialize};

/// Caller role carried in the token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Vendor,
    Admin,
}

/// JWT claims structure for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// Caller role
    #[serde(default)]
    pub role: Role,

    /// User email - optional
    #[serde(default)]
    pub email: Option<String>,
}
