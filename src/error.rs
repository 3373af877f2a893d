//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It is a closed enumeration of everything that can go wrong while serving a request:
//! malformed input, a user or task failing the predicate an operation requires, or a
//! persistence failure.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return
//! `Result<_, AppError>` and have the error converted into a JSON response of the form
//! `{"message": "<code>"}` with the matching HTTP status. The wire codes are stable
//! strings consumed by API clients; they are derived from the variant here, at the
//! boundary, rather than scattered through the handlers.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// The task-lifecycle operations that require the acting user to exist.
///
/// Carried by [`AppError::UnknownUser`] so the response code can say which
/// operation rejected the user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Create,
    Edit,
    ListAvailable,
    ListRelated,
    Claim,
    Complete,
    Delete,
}

/// The id-scoped task transitions guarded by a lifecycle predicate.
///
/// Carried by [`AppError::IneligibleTask`] when the conditional query found
/// no task matching the predicate (wrong id, wrong owner/claimer, or a state
/// in which the transition is not allowed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTransition {
    Edit,
    Claim,
    Complete,
    Delete,
}

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request fields (HTTP 400).
    InvalidRequest,
    /// Registration attempted with a username that is already taken (HTTP 401).
    UsernameTaken,
    /// Login with an unknown username or a wrong password (HTTP 401).
    /// Deliberately a single variant so the response does not reveal which.
    InvalidCredentials,
    /// The acting user referenced by the request does not exist (HTTP 401).
    UnknownUser(TaskAction),
    /// No task satisfied the lifecycle predicate for this transition (HTTP 401).
    IneligibleTask(TaskTransition),
    /// An error originating from database operations (HTTP 500).
    /// The underlying error is logged, never sent to the client.
    Database(sqlx::Error),
}

impl AppError {
    /// The stable wire code for this error, sent as the `message` field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest => "ERR_REQUEST_INVALID",
            AppError::UsernameTaken => "ERR_REGISTER_USERNAME_TAKEN",
            AppError::InvalidCredentials => "ERR_LOGIN_INVALID",
            AppError::UnknownUser(action) => match action {
                TaskAction::Create => "ERR_ADD_TASK_INVALID_USER_ID",
                TaskAction::Edit => "ERR_EDIT_TASK_INVALID_OWNER_ID",
                TaskAction::ListAvailable => "ERR_GET_AVAILABLE_TASKS_INVALID_USER_ID",
                TaskAction::ListRelated => "ERR_GET_USER_TASKS_INVALID_USER_ID",
                TaskAction::Claim => "ERR_CLAIM_TASK_INVALID_CLAIMER_ID",
                TaskAction::Complete => "ERR_COMPLETE_TASK_INVALID_USER_ID",
                TaskAction::Delete => "ERR_DELETE_TASK_INVALID_USER_ID",
            },
            AppError::IneligibleTask(transition) => match transition {
                TaskTransition::Edit => "ERR_EDIT_TASK_INVALID_TASK_ID",
                TaskTransition::Claim => "ERR_CLAIM_TASK_INVALID_TASK_ID",
                TaskTransition::Complete => "ERR_COMPLETE_TASK_INVALID_TASK_ID",
                TaskTransition::Delete => "ERR_DELETE_TASK_INVALID_TASK_ID",
            },
            AppError::Database(_) => "ERR_INTERNAL_SERVER_ERROR",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Database(err) => write!(f, "{}: {}", self.code(), err),
            _ => write!(f, "{}", self.code()),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Validation failures map to 400, failed operation predicates to 401, and
/// persistence failures to 500 with the details kept server-side.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({ "message": self.code() });
        match self {
            AppError::InvalidRequest => HttpResponse::BadRequest().json(body),
            AppError::UsernameTaken
            | AppError::InvalidCredentials
            | AppError::UnknownUser(_)
            | AppError::IneligibleTask(_) => HttpResponse::Unauthorized().json(body),
            AppError::Database(err) => {
                log::error!("database error: {}", err);
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::Database(error)
    }
}

/// Converts `validator::ValidationErrors` into `AppError::InvalidRequest`.
///
/// Clients only ever see the generic request-invalid code; the field-level
/// details stay internal.
impl From<ValidationErrors> for AppError {
    fn from(_: ValidationErrors) -> AppError {
        AppError::InvalidRequest
    }
}
