use sqlx::PgPool;
use uuid::Uuid;

use super::dto::CreateWallpaperRequest;
use super::repo_types::Wallpaper;

impl Wallpaper {
    /// Newest first, optionally filtered by category slug.
    pub async fn list(
        db: &PgPool,
        category: Option<&str>,
        limit: i64,
    ) -> anyhow::Result<Vec<Wallpaper>> {
        let rows = match category {
            Some(category) => {
                sqlx::query_as::<_, Wallpaper>(
                    r#"
                    SELECT id, title, category, image_url, thumbnail_url, resolution,
                           tags, is_live, author, downloads, created_at, updated_at
                    FROM wallpapers
                    WHERE category = $1
                    ORDER BY created_at DESC
                    LIMIT $2
                    "#,
                )
                .bind(category)
                .bind(limit)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Wallpaper>(
                    r#"
                    SELECT id, title, category, image_url, thumbnail_url, resolution,
                           tags, is_live, author, downloads, created_at, updated_at
                    FROM wallpapers
                    ORDER BY created_at DESC
                    LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(db)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Wallpaper>> {
        let row = sqlx::query_as::<_, Wallpaper>(
            r#"
            SELECT id, title, category, image_url, thumbnail_url, resolution,
                   tags, is_live, author, downloads, created_at, updated_at
            FROM wallpapers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn create(db: &PgPool, req: &CreateWallpaperRequest) -> anyhow::Result<Wallpaper> {
        let row = sqlx::query_as::<_, Wallpaper>(
            r#"
            INSERT INTO wallpapers (title, category, image_url, thumbnail_url,
                                    resolution, tags, is_live, author)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, category, image_url, thumbnail_url, resolution,
                      tags, is_live, author, downloads, created_at, updated_at
            "#,
        )
        .bind(&req.title)
        .bind(&req.category)
        .bind(&req.image_url)
        .bind(&req.thumbnail_url)
        .bind(&req.resolution)
        .bind(&req.tags)
        .bind(req.is_live)
        .bind(&req.author)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// One atomic increment per authorized download; concurrent calls never
    /// lose updates. Returns the unmodified origin URL, or `None` when the
    /// wallpaper vanished between lookup and increment.
    pub async fn record_download(db: &PgPool, id: Uuid) -> anyhow::Result<Option<String>> {
        let url: Option<(String,)> = sqlx::query_as(
            r#"
            UPDATE wallpapers
            SET downloads = downloads + 1, updated_at = now()
            WHERE id = $1
            RETURNING image_url
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(url.map(|(u,)| u))
    }

    /// Insert unless a wallpaper with the same title already exists. Keeps the
    /// sample seed idempotent without a unique constraint on titles.
    pub async fn insert_if_title_absent(
        db: &PgPool,
        req: &CreateWallpaperRequest,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO wallpapers (title, category, image_url, thumbnail_url,
                                    resolution, tags, is_live, author)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8
            WHERE NOT EXISTS (SELECT 1 FROM wallpapers WHERE title = $1)
            "#,
        )
        .bind(&req.title)
        .bind(&req.category)
        .bind(&req.image_url)
        .bind(&req.thumbnail_url)
        .bind(&req.resolution)
        .bind(&req.tags)
        .bind(req.is_live)
        .bind(&req.author)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
