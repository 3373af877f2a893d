use crate::{
    auth::{AuthResponse, LoginRequest, RegisterRequest},
    error::AppError,
    models::User,
    repo::UserRepo,
};
use validator::Validate;

/// Registration and login on top of the user repository.
#[derive(Clone)]
pub struct AccountService {
    users: UserRepo,
}

impl AccountService {
    pub fn new(users: UserRepo) -> Self {
        Self { users }
    }

    /// Creates a new account with an empty wallet.
    ///
    /// The username must not be in use yet. The password is stored only as
    /// a salted derived hash.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        if self.users.find_by_username(&request.username).await?.is_some() {
            return Err(AppError::UsernameTaken);
        }

        let user = User::new(&request.username, &request.password);
        self.users.insert(&user).await?;

        Ok(AuthResponse {
            user_id: user.id,
            username: user.username,
            wallet: user.wallet,
        })
    }

    /// Verifies a username/password pair.
    ///
    /// An unknown username and a wrong password produce the same error, so
    /// the response does not reveal which usernames exist.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        match self.users.find_by_username(&request.username).await? {
            Some(user) if user.validate_password(&request.password) => Ok(AuthResponse {
                user_id: user.id,
                username: user.username,
                wallet: user.wallet,
            }),
            _ => Err(AppError::InvalidCredentials),
        }
    }
}
