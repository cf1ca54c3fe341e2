//! Entitlement engine: the single source of truth for what an actor may see
//! or do, derived from subscription state. Everything here is a pure function
//! of its inputs; the two mutations it authorizes (subscription update,
//! downloads increment) are carried out by the repos as single atomic
//! statements.

mod plan;
mod policy;

pub use plan::{change_plan, Plan, Role, SubscriptionState, PLAN_TERM_DAYS};
pub use policy::{
    apply_content_policy, authorize_admin, authorize_download, is_entitled, ContentPolicy,
};
