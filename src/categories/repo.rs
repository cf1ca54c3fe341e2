use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Static reference data; seeded once when the table is empty.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
}

const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("anime", "Anime", "Stylized and cinematic anime art"),
    ("nature", "Nature", "Forests, oceans, and beyond"),
    ("scenery", "Scenery", "Landscapes and cityscapes"),
    ("live", "Live Wallpapers", "Dynamic video wallpapers"),
];

impl Category {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, slug, title, description
            FROM categories
            ORDER BY slug
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(db)
            .await?;
        Ok(count)
    }

    /// Upsert the default set; a concurrent seed is harmless.
    pub async fn seed_defaults(db: &PgPool) -> anyhow::Result<()> {
        for &(slug, title, description) in DEFAULT_CATEGORIES {
            sqlx::query(
                r#"
                INSERT INTO categories (slug, title, description)
                VALUES ($1, $2, $3)
                ON CONFLICT (slug) DO NOTHING
                "#,
            )
            .bind(slug)
            .bind(title)
            .bind(description)
            .execute(db)
            .await?;
        }
        Ok(())
    }
}
