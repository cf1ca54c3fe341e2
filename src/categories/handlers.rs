use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use super::repo::Category;
use crate::{error::ApiError, state::AppState};

pub fn category_routes() -> Router<AppState> {
    Router::new().route("/categories", get(get_categories))
}

#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    if Category::count(&state.db).await? == 0 {
        info!("category table empty, seeding defaults");
        Category::seed_defaults(&state.db).await?;
    }
    let categories = Category::list(&state.db).await?;
    Ok(Json(categories))
}
