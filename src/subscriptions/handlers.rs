use axum::{extract::State, routing::post, Json, Router};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use super::dto::{SubscribeRequest, SubscribeResponse};
use crate::{
    auth::{extractors::AuthUser, repo_types::User},
    entitlement::{change_plan, Plan},
    error::ApiError,
    state::AppState,
};

pub fn subscribe_routes() -> Router<AppState> {
    Router::new().route("/subscribe", post(subscribe))
}

#[instrument(skip(state, payload))]
pub async fn subscribe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>, ApiError> {
    let requested = Plan::parse(&payload.plan).map_err(|e| {
        warn!(user_id = %user_id, plan = %payload.plan, "invalid plan requested");
        e
    })?;

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("User not found"))?;

    let subscription = change_plan(requested, OffsetDateTime::now_utc());
    User::set_subscription(&state.db, user.id, &subscription).await?;

    info!(
        user_id = %user.id,
        plan = requested.as_str(),
        subscribed = subscription.subscribed,
        "plan changed"
    );
    Ok(Json(SubscribeResponse {
        status: "ok",
        plan: subscription.plan,
        subscribed: subscription.subscribed,
        plan_ends_at: subscription.plan_ends_at,
    }))
}
