use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entitlement::{apply_content_policy, ContentPolicy};
use crate::wallpapers::repo_types::Wallpaper;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
fn default_limit() -> i64 {
    50
}

/// One wallpaper as the client sees it, with the content policy applied.
#[derive(Debug, Serialize)]
pub struct WallpaperListItem {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub resolution: String,
    pub thumbnail_url: String,
    pub is_live: bool,
    pub author: Option<String>,
    pub downloads: i64,
    pub image_url: String,
    pub watermarked: bool,
}

impl WallpaperListItem {
    pub fn from_wallpaper(w: Wallpaper, entitled: bool) -> Self {
        let thumbnail_url = w.thumbnail().to_string();
        let ContentPolicy {
            display_url,
            watermarked,
        } = apply_content_policy(&w.image_url, entitled);
        Self {
            id: w.id,
            title: w.title,
            category: w.category,
            resolution: w.resolution,
            thumbnail_url,
            is_live: w.is_live,
            author: w.author,
            downloads: w.downloads,
            image_url: display_url,
            watermarked,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WallpaperListResponse {
    pub items: Vec<WallpaperListItem>,
    pub subscribed: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateWallpaperRequest {
    pub title: String,
    pub category: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    #[serde(default = "default_resolution")]
    pub resolution: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_live: bool,
    pub author: Option<String>,
}
fn default_resolution() -> String {
    "3840x2160".into()
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn wallpaper() -> Wallpaper {
        let now = OffsetDateTime::now_utc();
        Wallpaper {
            id: Uuid::new_v4(),
            title: "City Night Drive".into(),
            category: "scenery".into(),
            image_url: "https://img.example.com/city.jpg".into(),
            thumbnail_url: None,
            resolution: "3840x2160".into(),
            tags: vec!["city".into(), "night".into()],
            is_live: false,
            author: None,
            downloads: 7,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn list_item_watermarks_for_non_subscribers() {
        let item = WallpaperListItem::from_wallpaper(wallpaper(), false);
        assert_eq!(item.image_url, "https://img.example.com/city.jpg?wm=1");
        assert!(item.watermarked);
        // Thumbnail fell back to the origin image.
        assert_eq!(item.thumbnail_url, "https://img.example.com/city.jpg");
    }

    #[test]
    fn list_item_serves_original_to_subscribers() {
        let item = WallpaperListItem::from_wallpaper(wallpaper(), true);
        assert_eq!(item.image_url, "https://img.example.com/city.jpg");
        assert!(!item.watermarked);
    }

    #[test]
    fn create_request_fills_defaults() {
        let req: CreateWallpaperRequest = serde_json::from_str(
            r#"{"title":"T","category":"anime","image_url":"https://img.example.com/t.jpg"}"#,
        )
        .unwrap();
        assert_eq!(req.resolution, "3840x2160");
        assert!(req.tags.is_empty());
        assert!(!req.is_live);
        assert!(req.author.is_none());
    }
}
