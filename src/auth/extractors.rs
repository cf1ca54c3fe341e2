use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::JwtKeys;
use crate::auth::repo_types::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Extracts and validates the bearer token, returning the subject user ID.
/// Rejects with 401 on any missing/invalid credential.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let token = bearer_token(parts)?;
        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::unauthenticated("Invalid token")
        })?;
        Ok(AuthUser(claims.sub))
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthenticated("Not authenticated"))?;

    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .ok_or_else(|| ApiError::unauthenticated("Invalid auth header"))
}

/// Who is making the request, for routes where authentication is optional.
///
/// A bad or expired token degrades to `Invalid` instead of rejecting, so
/// anonymous browsing keeps working; the entitlement engine treats both
/// `Anonymous` and `Invalid` as not entitled.
pub enum Identity {
    Authenticated(User),
    Anonymous,
    Invalid,
}

impl Identity {
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Authenticated(user) => Some(user),
            Identity::Anonymous | Identity::Invalid => None,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(axum::http::header::AUTHORIZATION) {
            return Ok(Identity::Anonymous);
        }

        let keys = JwtKeys::from_ref(state);
        let Ok(token) = bearer_token(parts) else {
            return Ok(Identity::Invalid);
        };
        let Ok(claims) = keys.verify(token) else {
            warn!("optional auth: invalid or expired token, treating as anonymous");
            return Ok(Identity::Invalid);
        };
        match User::find_by_id(&state.db, claims.sub).await {
            Ok(Some(user)) => Ok(Identity::Authenticated(user)),
            Ok(None) => Ok(Identity::Invalid),
            Err(e) => {
                warn!(error = %e, "optional auth: user lookup failed");
                Ok(Identity::Invalid)
            }
        }
    }
}
