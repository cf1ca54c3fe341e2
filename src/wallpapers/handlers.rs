use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{
    CreateWallpaperRequest, DownloadResponse, ListQuery, SeedResponse, WallpaperListItem,
    WallpaperListResponse,
};
use super::repo_types::Wallpaper;
use super::seed::seed_samples;
use crate::{
    auth::{
        extractors::{AuthUser, Identity},
        repo_types::User,
    },
    entitlement::{authorize_admin, authorize_download, is_entitled},
    error::ApiError,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/wallpapers", get(list_wallpapers))
        .route("/wallpapers/:id/download", get(download_wallpaper))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/wallpapers", post(admin_create_wallpaper))
        .route("/admin/seed", post(admin_seed))
}

async fn current_user(state: &AppState, user_id: Uuid) -> Result<User, ApiError> {
    User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("User not found"))
}

/// Listing is open to everyone; entitlement only decides whether items come
/// back watermarked. A bad token degrades to anonymous, never to a 401.
#[instrument(skip(state, identity))]
pub async fn list_wallpapers(
    State(state): State<AppState>,
    identity: Identity,
    Query(q): Query<ListQuery>,
) -> Result<Json<WallpaperListResponse>, ApiError> {
    let entitled = is_entitled(identity.user(), OffsetDateTime::now_utc());

    let wallpapers = Wallpaper::list(&state.db, q.category.as_deref(), q.limit).await?;
    let items = wallpapers
        .into_iter()
        .map(|w| WallpaperListItem::from_wallpaper(w, entitled))
        .collect();

    Ok(Json(WallpaperListResponse {
        items,
        subscribed: entitled,
    }))
}

#[instrument(skip(state))]
pub async fn download_wallpaper(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let user = current_user(&state, user_id).await?;

    if Wallpaper::find_by_id(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound("Wallpaper"));
    }

    authorize_download(Some(&user), OffsetDateTime::now_utc())?;

    // Authorized: exactly one atomic increment, then the unmodified origin URL.
    let url = Wallpaper::record_download(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Wallpaper"))?;

    info!(user_id = %user.id, wallpaper_id = %id, "full-resolution download");
    Ok(Json(DownloadResponse { url }))
}

#[instrument(skip(state, payload))]
pub async fn admin_create_wallpaper(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateWallpaperRequest>,
) -> Result<Json<Wallpaper>, ApiError> {
    let user = current_user(&state, user_id).await?;
    authorize_admin(&user)?;

    let wallpaper = Wallpaper::create(&state.db, &payload).await?;
    info!(user_id = %user.id, wallpaper_id = %wallpaper.id, title = %wallpaper.title, "wallpaper created");
    Ok(Json(wallpaper))
}

#[instrument(skip(state))]
pub async fn admin_seed(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<SeedResponse>, ApiError> {
    let user = current_user(&state, user_id).await?;
    authorize_admin(&user)?;

    seed_samples(&state.db).await?;
    Ok(Json(SeedResponse { status: "ok" }))
}
