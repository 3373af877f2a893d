use crate::{
    auth::{LoginRequest, RegisterRequest},
    error::AppError,
    services::AccountService,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates a new account with an empty wallet and returns its profile.
#[post("/register")]
pub async fn register(
    accounts: web::Data<AccountService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let profile = accounts.register(register_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Login user
///
/// Verifies the credentials and returns the account profile.
#[post("/login")]
pub async fn login(
    accounts: web::Data<AccountService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let profile = accounts.login(login_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}
