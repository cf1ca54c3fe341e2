use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Wallpaper record in the database. The entitlement core only ever reads
/// `image_url` and bumps `downloads`; everything else belongs to the catalog.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Wallpaper {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub resolution: String,
    pub tags: Vec<String>,
    pub is_live: bool,
    pub author: Option<String>,
    pub downloads: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Wallpaper {
    /// Thumbnail with fallback to the full image.
    pub fn thumbnail(&self) -> &str {
        self.thumbnail_url.as_deref().unwrap_or(&self.image_url)
    }
}
