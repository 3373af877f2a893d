use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A record in the read-only album catalogue.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Album {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub thumb: String,
    pub description: String,
    pub genre: String,
    pub released_in: String,
    pub tracklist: String,
    pub musicians: Option<String>,
    pub images: Vec<String>,
}
