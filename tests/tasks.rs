use actix_web::{rt, test, web, App};
use dotenv::dotenv;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use std::net::TcpListener;
use taskbounty::auth::AuthResponse;
use taskbounty::models::TaskView;
use taskbounty::repo::{AlbumRepo, TaskRepo, UserRepo};
use taskbounty::routes;
use taskbounty::routes::health;
use taskbounty::services::{AccountService, TaskService};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct TasksBody {
    tasks: Vec<TaskView>,
}

/// Connects to the test database, or returns `None` (skipping the test)
/// when no `DATABASE_URL` is configured.
async fn try_pool() -> Option<PgPool> {
    dotenv().ok();
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set; skipping integration test");
            return None;
        }
    };
    Some(
        PgPool::connect(&url)
            .await
            .expect("Failed to connect to test DB"),
    )
}

macro_rules! test_app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AccountService::new(UserRepo::new(
                    $pool.clone(),
                ))))
                .app_data(web::Data::new(TaskService::new(
                    UserRepo::new($pool.clone()),
                    TaskRepo::new($pool.clone()),
                )))
                .app_data(web::Data::new(AlbumRepo::new($pool.clone())))
                .configure(routes::config),
        )
        .await
    };
}

async fn register_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
) -> AuthResponse {
    let req = test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(json!({ "username": username, "password": "password123" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "failed to register {}", username);
    test::read_body_json(resp).await
}

async fn list_tasks(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    path: &str,
    user_id: Uuid,
) -> Vec<TaskView> {
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}?id={}", path, user_id))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success());
    let body: TasksBody = test::read_body_json(resp).await;
    body.tasks
}

async fn cleanup_user(pool: &PgPool, username: &str) {
    let _ = sqlx::query("DELETE FROM tasks WHERE owner_name = $1")
        .bind(username)
        .execute(pool)
        .await;
    let _ = sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await;
}

fn unique_username(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

#[test_log::test(actix_rt::test)]
async fn test_full_task_lifecycle() {
    let Some(pool) = try_pool().await else { return };
    let app = test_app!(pool);

    let name_a = unique_username("owner");
    let name_b = unique_username("claimer");
    let name_c = unique_username("bystander");
    let user_a = register_user(&app, &name_a).await;
    let user_b = register_user(&app, &name_b).await;
    let user_c = register_user(&app, &name_c).await;

    let task_name = format!("paint-fence-{}", Uuid::new_v4());
    let req = test::TestRequest::post()
        .uri("/api/tasks/new")
        .set_json(json!({
            "name": task_name,
            "description": "White, two coats",
            "priority": 2,
            "payout": 50,
            "ownerId": user_a.user_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "SUCCESS_TASK_NEW");

    // The task shows up as available for B, but not for its owner.
    let available_b = list_tasks(&app, "available", user_b.user_id).await;
    let task = available_b
        .iter()
        .find(|t| t.name == task_name)
        .expect("new task should be available to another user");
    assert_eq!(task.owner_id, user_a.user_id);
    assert_eq!(task.owner_name, name_a);
    assert!(!task.completed);
    assert!(task.claimer_id.is_none());
    let task_id = task.id;

    let available_a = list_tasks(&app, "available", user_a.user_id).await;
    assert!(
        available_a.iter().all(|t| t.id != task_id),
        "owner must not see their own task as available"
    );

    // The owner cannot claim their own task.
    let req = test::TestRequest::put()
        .uri("/api/tasks/claim")
        .set_json(json!({ "userId": user_a.user_id, "taskId": task_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "ERR_CLAIM_TASK_INVALID_TASK_ID");

    // B claims it.
    let req = test::TestRequest::put()
        .uri("/api/tasks/claim")
        .set_json(json!({ "userId": user_b.user_id, "taskId": task_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "SUCCESS_TASK_CLAIM");

    // A second claim, by anyone, is rejected.
    let req = test::TestRequest::put()
        .uri("/api/tasks/claim")
        .set_json(json!({ "userId": user_c.user_id, "taskId": task_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "ERR_CLAIM_TASK_INVALID_TASK_ID");

    // The claimed task is no longer available, but related to both parties.
    let available_c = list_tasks(&app, "available", user_c.user_id).await;
    assert!(available_c.iter().all(|t| t.id != task_id));

    let related_b = list_tasks(&app, "user", user_b.user_id).await;
    let claimed = related_b
        .iter()
        .find(|t| t.id == task_id)
        .expect("claimed task should be related to the claimer");
    assert_eq!(claimed.claimer_id, Some(user_b.user_id));
    assert_eq!(claimed.claimer_name.as_deref(), Some(name_b.as_str()));

    // Claimed but not completed: the owner cannot delete it yet.
    let req = test::TestRequest::delete()
        .uri(&format!(
            "/api/tasks/delete?userId={}&taskId={}",
            user_a.user_id, task_id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "ERR_DELETE_TASK_INVALID_TASK_ID");

    // Only the claimer can complete.
    let req = test::TestRequest::put()
        .uri("/api/tasks/complete")
        .set_json(json!({ "userId": user_a.user_id, "taskId": task_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "ERR_COMPLETE_TASK_INVALID_TASK_ID");

    // B completes and is credited exactly the payout.
    let req = test::TestRequest::put()
        .uri("/api/tasks/complete")
        .set_json(json!({ "userId": user_b.user_id, "taskId": task_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["balance"], 50);

    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(json!({ "username": name_b, "password": "password123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let profile: AuthResponse = test::read_body_json(resp).await;
    assert_eq!(profile.wallet, 50);

    // Completion happens exactly once.
    let req = test::TestRequest::put()
        .uri("/api/tasks/complete")
        .set_json(json!({ "userId": user_b.user_id, "taskId": task_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "ERR_COMPLETE_TASK_INVALID_TASK_ID");

    // A completed task can no longer be edited.
    let req = test::TestRequest::put()
        .uri("/api/tasks/edit")
        .set_json(json!({
            "taskId": task_id,
            "ownerId": user_a.user_id,
            "name": "too late",
            "description": "should not apply",
            "priority": 1,
            "payout": 10
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "ERR_EDIT_TASK_INVALID_TASK_ID");

    // Claimed and completed: now the owner may delete.
    let req = test::TestRequest::delete()
        .uri(&format!(
            "/api/tasks/delete?userId={}&taskId={}",
            user_a.user_id, task_id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "SUCCESS_TASK_DELETE");

    cleanup_user(&pool, &name_a).await;
    cleanup_user(&pool, &name_b).await;
    cleanup_user(&pool, &name_c).await;
}

#[actix_rt::test]
async fn test_edit_and_delete_open_task() {
    let Some(pool) = try_pool().await else { return };
    let app = test_app!(pool);

    let name_a = unique_username("owner");
    let name_b = unique_username("other");
    let user_a = register_user(&app, &name_a).await;
    let user_b = register_user(&app, &name_b).await;

    let task_name = format!("rake-leaves-{}", Uuid::new_v4());
    let req = test::TestRequest::post()
        .uri("/api/tasks/new")
        .set_json(json!({
            "name": task_name,
            "description": "Backyard only",
            "priority": 1,
            "payout": 10,
            "ownerId": user_a.user_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let related = list_tasks(&app, "user", user_a.user_id).await;
    let task_id = related
        .iter()
        .find(|t| t.name == task_name)
        .expect("owner should see their new task")
        .id;

    // Someone who is not the owner cannot edit it.
    let req = test::TestRequest::put()
        .uri("/api/tasks/edit")
        .set_json(json!({
            "taskId": task_id,
            "ownerId": user_b.user_id,
            "name": "hijacked",
            "description": "nope",
            "priority": 0,
            "payout": 1
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "ERR_EDIT_TASK_INVALID_TASK_ID");

    // The owner edits the mutable fields of the open task.
    let new_name = format!("rake-all-leaves-{}", Uuid::new_v4());
    let req = test::TestRequest::put()
        .uri("/api/tasks/edit")
        .set_json(json!({
            "taskId": task_id,
            "ownerId": user_a.user_id,
            "name": new_name,
            "description": "Front and backyard",
            "priority": 3,
            "payout": 25
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "SUCCESS_TASK_EDIT");

    let related = list_tasks(&app, "user", user_a.user_id).await;
    let edited = related.iter().find(|t| t.id == task_id).unwrap();
    assert_eq!(edited.name, new_name);
    assert_eq!(edited.priority, 3);
    assert_eq!(edited.payout, 25);
    assert!(!edited.completed, "editing must not touch lifecycle fields");
    assert!(edited.claimer_id.is_none());

    // Unclaimed, so the owner may delete it outright.
    let req = test::TestRequest::delete()
        .uri(&format!(
            "/api/tasks/delete?userId={}&taskId={}",
            user_a.user_id, task_id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    cleanup_user(&pool, &name_a).await;
    cleanup_user(&pool, &name_b).await;
}

#[actix_rt::test]
async fn test_task_request_validation() {
    let Some(pool) = try_pool().await else { return };
    let app = test_app!(pool);

    let name_a = unique_username("owner");
    let user_a = register_user(&app, &name_a).await;

    // Priority out of range.
    let req = test::TestRequest::post()
        .uri("/api/tasks/new")
        .set_json(json!({
            "name": "task",
            "description": "desc",
            "priority": 4,
            "payout": 10,
            "ownerId": user_a.user_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "ERR_REQUEST_INVALID");

    // Payout must be positive.
    let req = test::TestRequest::post()
        .uri("/api/tasks/new")
        .set_json(json!({
            "name": "task",
            "description": "desc",
            "priority": 1,
            "payout": 0,
            "ownerId": user_a.user_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // Missing fields are a bad request, not a server error.
    let req = test::TestRequest::post()
        .uri("/api/tasks/new")
        .set_json(json!({ "name": "task" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // A well-formed request from a nonexistent user is denied by name.
    let req = test::TestRequest::post()
        .uri("/api/tasks/new")
        .set_json(json!({
            "name": "task",
            "description": "desc",
            "priority": 1,
            "payout": 10,
            "ownerId": Uuid::new_v4()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "ERR_ADD_TASK_INVALID_USER_ID");

    // Listing endpoints also require an existing user.
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/available?id={}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "ERR_GET_AVAILABLE_TASKS_INVALID_USER_ID");

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/user?id={}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "ERR_GET_USER_TASKS_INVALID_USER_ID");

    // Missing query parameters on delete.
    let req = test::TestRequest::delete()
        .uri("/api/tasks/delete?userId=abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "ERR_REQUEST_INVALID");

    cleanup_user(&pool, &name_a).await;
}

// Runs the liveness endpoint on a real socket, the way a deployment health
// probe would hit it. Needs no database.
#[actix_rt::test]
async fn test_ping_over_http() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = actix_web::HttpServer::new(|| App::new().service(health::ping))
        .listen(listener)
        .unwrap()
        .run();
    let handle = server.handle();
    rt::spawn(server);

    let body = reqwest::get(format!("http://127.0.0.1:{}/ping", port))
        .await
        .expect("ping request failed")
        .text()
        .await
        .unwrap();
    assert_eq!(body, "Server is now running.");

    handle.stop(true).await;
}
