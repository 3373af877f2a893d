use crate::{error::AppError, repo::AlbumRepo};
use actix_web::{get, web, HttpResponse, Responder};

/// Plain listing of the read-only album catalogue.
#[get("/albums")]
pub async fn list_albums(albums: web::Data<AlbumRepo>) -> Result<impl Responder, AppError> {
    let albums = albums.list_all().await?;
    Ok(HttpResponse::Ok().json(albums))
}
