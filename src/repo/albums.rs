use crate::models::Album;
use sqlx::PgPool;

/// Read-only handle for the album catalogue.
#[derive(Clone)]
pub struct AlbumRepo {
    pool: PgPool,
}

impl AlbumRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> sqlx::Result<Vec<Album>> {
        sqlx::query_as::<_, Album>(
            "SELECT id, title, artist, thumb, description, genre, released_in, \
                    tracklist, musicians, images \
             FROM albums",
        )
        .fetch_all(&self.pool)
        .await
    }
}
