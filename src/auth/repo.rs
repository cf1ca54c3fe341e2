use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::User;
use crate::entitlement::SubscriptionState;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, subscribed, plan,
                   plan_ends_at, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, subscribed, plan,
                   plan_ends_at, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password, on the free plan.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, role, subscribed, plan,
                      plan_ends_at, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Persist a subscription change in one statement. The state comes from
    /// `entitlement::change_plan`; nothing else writes these columns.
    pub async fn set_subscription(
        db: &PgPool,
        id: Uuid,
        state: &SubscriptionState,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET plan = $2, subscribed = $3, plan_ends_at = $4, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(state.plan)
        .bind(state.subscribed)
        .bind(state.plan_ends_at)
        .execute(db)
        .await?;
        Ok(())
    }
}
