use actix_web::{get, HttpResponse, Responder};

/// Liveness check endpoint.
#[get("/ping")]
pub async fn ping() -> impl Responder {
    HttpResponse::Ok().body("Server is now running.")
}
