pub mod albums;
pub mod health;
pub mod tasks;
pub mod users;

use crate::error::AppError;
use actix_web::error::{InternalError, ResponseError};
use actix_web::web;

/// Maps JSON body deserialization failures (missing or malformed fields) to
/// the same 400 response the validators produce.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        InternalError::from_response(err, AppError::InvalidRequest.error_response()).into()
    })
}

/// Same mapping for query-string extraction failures.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        InternalError::from_response(err, AppError::InvalidRequest.error_response()).into()
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(health::ping)
        .service(
            web::scope("/api")
                .service(
                    web::scope("/users")
                        .service(users::register)
                        .service(users::login),
                )
                .service(
                    web::scope("/tasks")
                        .service(tasks::new_task)
                        .service(tasks::edit_task)
                        .service(tasks::available_tasks)
                        .service(tasks::user_tasks)
                        .service(tasks::claim_task)
                        .service(tasks::complete_task)
                        .service(tasks::delete_task),
                )
                .service(albums::list_albums),
        );
}
