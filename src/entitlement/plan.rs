use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::error::ApiError;

/// Days a paid plan stays active after a subscribe call.
pub const PLAN_TERM_DAYS: i64 = 30;

/// Subscription tier. Anything outside these three values is rejected at the
/// boundary with `ApiError::InvalidPlan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "plan", rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
    Elite,
}

impl Plan {
    pub fn parse(s: &str) -> Result<Plan, ApiError> {
        match s {
            "free" => Ok(Plan::Free),
            "pro" => Ok(Plan::Pro),
            "elite" => Ok(Plan::Elite),
            _ => Err(ApiError::InvalidPlan),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
            Plan::Elite => "elite",
        }
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, Plan::Free)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Result of a plan change; the only shape subscription state is ever written
/// in. Invariant: `subscribed == (plan != Free)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubscriptionState {
    pub plan: Plan,
    pub subscribed: bool,
    pub plan_ends_at: Option<OffsetDateTime>,
}

/// The single path that mutates subscription state. Idempotent modulo the
/// `plan_ends_at` timestamp: reapplying the same plan yields the same
/// `plan`/`subscribed` pair.
pub fn change_plan(requested: Plan, now: OffsetDateTime) -> SubscriptionState {
    let subscribed = requested.is_paid();
    let plan_ends_at = subscribed.then(|| now + Duration::days(PLAN_TERM_DAYS));
    SubscriptionState {
        plan: requested,
        subscribed,
        plan_ends_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribed_tracks_paid_plans() {
        let now = OffsetDateTime::now_utc();
        for (plan, expect) in [(Plan::Free, false), (Plan::Pro, true), (Plan::Elite, true)] {
            let state = change_plan(plan, now);
            assert_eq!(state.plan, plan);
            assert_eq!(state.subscribed, expect);
        }
    }

    #[test]
    fn paid_plan_runs_thirty_days() {
        let now = OffsetDateTime::now_utc();
        let state = change_plan(Plan::Elite, now);
        assert_eq!(state.plan_ends_at, Some(now + Duration::days(30)));
    }

    #[test]
    fn reverting_to_free_clears_expiry() {
        let now = OffsetDateTime::now_utc();
        let state = change_plan(Plan::Free, now);
        assert!(!state.subscribed);
        assert_eq!(state.plan_ends_at, None);
    }

    #[test]
    fn change_plan_is_idempotent() {
        let now = OffsetDateTime::now_utc();
        let first = change_plan(Plan::Pro, now);
        let second = change_plan(Plan::Pro, now);
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_plan_is_rejected() {
        assert!(matches!(Plan::parse("gold"), Err(ApiError::InvalidPlan)));
        assert!(matches!(Plan::parse("PRO"), Err(ApiError::InvalidPlan)));
        assert!(matches!(Plan::parse(""), Err(ApiError::InvalidPlan)));
    }

    #[test]
    fn known_plans_parse() {
        assert_eq!(Plan::parse("free").unwrap(), Plan::Free);
        assert_eq!(Plan::parse("pro").unwrap(), Plan::Pro);
        assert_eq!(Plan::parse("elite").unwrap(), Plan::Elite);
    }

    #[test]
    fn plan_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Plan::Elite).unwrap(), "\"elite\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }
}
