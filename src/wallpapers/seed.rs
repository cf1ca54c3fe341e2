use sqlx::PgPool;
use tracing::info;

use super::dto::CreateWallpaperRequest;
use super::repo_types::Wallpaper;

fn sample_wallpapers() -> Vec<CreateWallpaperRequest> {
    let samples = [
        (
            "Galactic Neon Wave",
            "scenery",
            "https://images.unsplash.com/photo-1500530855697-b586d89ba3ee",
            vec!["neon", "galaxy"],
        ),
        (
            "Mystic Forest",
            "nature",
            "https://images.unsplash.com/photo-1501785888041-af3ef285b470",
            vec!["forest", "fog"],
        ),
        (
            "City Night Drive",
            "scenery",
            "https://images.unsplash.com/photo-1508057198894-247b23fe5ade",
            vec!["city", "night"],
        ),
        (
            "Anime Neon Alley",
            "anime",
            "https://images.unsplash.com/photo-1542396601-dca920ea2807",
            vec!["anime", "neon"],
        ),
    ];

    samples
        .into_iter()
        .map(|(title, category, image_url, tags)| CreateWallpaperRequest {
            title: title.into(),
            category: category.into(),
            image_url: image_url.into(),
            thumbnail_url: Some(format!("{image_url}?w=1200")),
            resolution: "3840x2160".into(),
            tags: tags.into_iter().map(String::from).collect(),
            is_live: false,
            author: None,
        })
        .collect()
}

/// Seed the sample catalog. Idempotent by title: rerunning inserts nothing.
pub async fn seed_samples(db: &PgPool) -> anyhow::Result<usize> {
    let mut inserted = 0;
    for sample in sample_wallpapers() {
        if Wallpaper::insert_if_title_absent(db, &sample).await? {
            inserted += 1;
        }
    }
    info!(inserted, "sample wallpapers seeded");
    Ok(inserted)
}
