pub mod password;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Re-export necessary items
pub use password::{hash_password, verify_password, Credential};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username of the account.
    #[validate(length(min = 1))]
    pub username: String,
    /// User's password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username for the new account. Must be unique.
    #[validate(length(min = 1))]
    pub username: String,
    /// Password for the new account.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response structure after successful registration or login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The unique identifier of the user.
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    /// The account username.
    pub username: String,
    /// Current wallet balance.
    pub wallet: i64,
}
