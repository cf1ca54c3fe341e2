use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::entitlement::Plan;

/// Request body for a plan change. The plan arrives as a raw string so that
/// unknown values produce the domain's `Invalid plan` error rather than a
/// deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub plan: String,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub status: &'static str,
    pub plan: Plan,
    pub subscribed: bool,
    pub plan_ends_at: Option<OffsetDateTime>,
}
