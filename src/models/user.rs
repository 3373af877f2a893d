use crate::auth::{self, Credential};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user as stored in the database.
///
/// The wallet balance only ever changes when a claimed task is completed.
/// The password credential (salt + derived hash) is kept in two columns and
/// never serialized into responses.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub wallet: i64,
    pub password_salt: String,
    pub password_hash: String,
}

impl User {
    /// Creates a new user with an empty wallet and a freshly derived
    /// password credential.
    pub fn new(username: &str, password: &str) -> Self {
        let credential = auth::hash_password(password);
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            wallet: 0,
            password_salt: credential.salt,
            password_hash: credential.hash,
        }
    }

    /// Checks a login attempt against the stored credential.
    pub fn validate_password(&self, password: &str) -> bool {
        let credential = Credential {
            salt: self.password_salt.clone(),
            hash: self.password_hash.clone(),
        };
        auth::verify_password(password, &credential)
    }
}
