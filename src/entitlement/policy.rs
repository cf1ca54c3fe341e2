use time::OffsetDateTime;
use tracing::debug;

use crate::auth::repo_types::User;
use crate::error::ApiError;

use super::Role;

/// Query marker appended to `image_url` when the delivery layer must overlay a
/// watermark. This core only decides the policy; rendering happens downstream.
const WATERMARK_MARKER: &str = "?wm=1";

/// What the client is allowed to receive for one wallpaper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPolicy {
    pub display_url: String,
    pub watermarked: bool,
}

/// Whether the actor gets full-resolution, unwatermarked content.
///
/// Anonymous callers (including invalid tokens on optional-auth paths) are
/// never entitled. A `plan_ends_at` in the past reverts the user to
/// unsubscribed even if the stored `subscribed` flag still says otherwise.
pub fn is_entitled(user: Option<&User>, now: OffsetDateTime) -> bool {
    let Some(user) = user else {
        return false;
    };
    if !user.subscribed {
        return false;
    }
    match user.plan_ends_at {
        Some(ends_at) if ends_at <= now => {
            debug!(user_id = %user.id, %ends_at, "plan lapsed, treating as unsubscribed");
            false
        }
        _ => true,
    }
}

pub fn apply_content_policy(image_url: &str, entitled: bool) -> ContentPolicy {
    if entitled {
        ContentPolicy {
            display_url: image_url.to_string(),
            watermarked: false,
        }
    } else {
        ContentPolicy {
            display_url: format!("{image_url}{WATERMARK_MARKER}"),
            watermarked: true,
        }
    }
}

/// Gate for the full-resolution download path. On `Ok` the caller must perform
/// exactly one atomic increment of the downloads counter and hand back the
/// unmodified `image_url`; on `Err` nothing may change.
pub fn authorize_download(user: Option<&User>, now: OffsetDateTime) -> Result<(), ApiError> {
    let Some(user) = user else {
        return Err(ApiError::unauthenticated("Not authenticated"));
    };
    if !is_entitled(Some(user), now) {
        return Err(ApiError::SubscriptionRequired);
    }
    Ok(())
}

/// Gate for catalog mutations (create wallpaper, seed samples).
pub fn authorize_admin(user: &User) -> Result<(), ApiError> {
    match user.role {
        Role::Admin => Ok(()),
        Role::User => Err(ApiError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entitlement::Plan;
    use time::Duration;
    use uuid::Uuid;

    fn user(plan: Plan, subscribed: bool, plan_ends_at: Option<OffsetDateTime>) -> User {
        let now = OffsetDateTime::now_utc();
        User {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: "x".into(),
            role: Role::User,
            subscribed,
            plan,
            plan_ends_at,
            created_at: now,
            updated_at: now,
        }
    }

    fn subscriber() -> User {
        let now = OffsetDateTime::now_utc();
        user(Plan::Pro, true, Some(now + Duration::days(30)))
    }

    #[test]
    fn anonymous_is_never_entitled() {
        assert!(!is_entitled(None, OffsetDateTime::now_utc()));
    }

    #[test]
    fn free_user_is_not_entitled() {
        let u = user(Plan::Free, false, None);
        assert!(!is_entitled(Some(&u), OffsetDateTime::now_utc()));
    }

    #[test]
    fn active_subscriber_is_entitled() {
        let u = subscriber();
        assert!(is_entitled(Some(&u), OffsetDateTime::now_utc()));
    }

    #[test]
    fn lapsed_plan_reverts_to_unsubscribed() {
        let now = OffsetDateTime::now_utc();
        let u = user(Plan::Pro, true, Some(now - Duration::days(1)));
        assert!(!is_entitled(Some(&u), now));
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let now = OffsetDateTime::now_utc();
        let u = user(Plan::Pro, true, Some(now));
        assert!(!is_entitled(Some(&u), now));
    }

    #[test]
    fn watermark_marker_appended_only_when_not_entitled() {
        let url = "https://img.example.com/wall.jpg";
        let degraded = apply_content_policy(url, false);
        assert_eq!(degraded.display_url, format!("{url}?wm=1"));
        assert!(degraded.watermarked);

        let full = apply_content_policy(url, true);
        assert_eq!(full.display_url, url);
        assert!(!full.watermarked);
    }

    #[test]
    fn download_requires_authentication() {
        let err = authorize_download(None, OffsetDateTime::now_utc()).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }

    #[test]
    fn download_requires_subscription() {
        let u = user(Plan::Free, false, None);
        let err = authorize_download(Some(&u), OffsetDateTime::now_utc()).unwrap_err();
        assert!(matches!(err, ApiError::SubscriptionRequired));
    }

    #[test]
    fn download_denied_after_plan_lapse() {
        let now = OffsetDateTime::now_utc();
        let u = user(Plan::Elite, true, Some(now - Duration::hours(1)));
        let err = authorize_download(Some(&u), now).unwrap_err();
        assert!(matches!(err, ApiError::SubscriptionRequired));
    }

    #[test]
    fn download_allowed_for_active_subscriber() {
        let u = subscriber();
        assert!(authorize_download(Some(&u), OffsetDateTime::now_utc()).is_ok());
    }

    #[test]
    fn admin_gate_is_exhaustive_on_role() {
        let mut u = subscriber();
        assert!(matches!(authorize_admin(&u), Err(ApiError::Forbidden)));
        u.role = Role::Admin;
        assert!(authorize_admin(&u).is_ok());
    }
}
