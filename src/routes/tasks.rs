use crate::{
    error::AppError,
    models::{DeleteTaskQuery, EditTaskRequest, NewTaskRequest, TaskActionRequest, TaskListQuery},
    services::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

/// Post a new task.
///
/// The acting user becomes the owner; their display name is captured in the
/// task as a snapshot.
#[post("/new")]
pub async fn new_task(
    service: web::Data<TaskService>,
    task_data: web::Json<NewTaskRequest>,
) -> Result<impl Responder, AppError> {
    service.create(task_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "SUCCESS_TASK_NEW" })))
}

/// Edit an open task's name, description, priority, or payout.
#[put("/edit")]
pub async fn edit_task(
    service: web::Data<TaskService>,
    task_data: web::Json<EditTaskRequest>,
) -> Result<impl Responder, AppError> {
    service.edit(task_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "SUCCESS_TASK_EDIT" })))
}

/// List tasks the given user could claim: unclaimed and owned by someone else.
#[get("/available")]
pub async fn available_tasks(
    service: web::Data<TaskService>,
    query: web::Query<TaskListQuery>,
) -> Result<impl Responder, AppError> {
    let tasks = service.list_available(query.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "tasks": tasks })))
}

/// List tasks related to the given user: owned or claimed by them.
#[get("/user")]
pub async fn user_tasks(
    service: web::Data<TaskService>,
    query: web::Query<TaskListQuery>,
) -> Result<impl Responder, AppError> {
    let tasks = service.list_related(query.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "tasks": tasks })))
}

/// Claim an open task for the given user.
#[put("/claim")]
pub async fn claim_task(
    service: web::Data<TaskService>,
    request: web::Json<TaskActionRequest>,
) -> Result<impl Responder, AppError> {
    service.claim(request.user_id, request.task_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "SUCCESS_TASK_CLAIM" })))
}

/// Complete a claimed task and credit the payout to the claimer's wallet.
/// Responds with the claimer's new balance.
#[put("/complete")]
pub async fn complete_task(
    service: web::Data<TaskService>,
    request: web::Json<TaskActionRequest>,
) -> Result<impl Responder, AppError> {
    let balance = service.complete(request.user_id, request.task_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "balance": balance })))
}

/// Delete a task that is unclaimed, or claimed and completed.
#[delete("/delete")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    query: web::Query<DeleteTaskQuery>,
) -> Result<impl Responder, AppError> {
    service.delete(query.user_id, query.task_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "SUCCESS_TASK_DELETE" })))
}
