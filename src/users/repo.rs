use anyhow::Context;
use sqlx::PgPool;

use crate::users::repo_types::User;

impl User {
    /// Look a user up by id.
    pub async fn find(db: &PgPool, user_id: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT userid AS user_id, created_at
            FROM "Users"
            WHERE userid = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("find user")?;
        Ok(user)
    }

    /// Insert a new user; `created_at` is assigned by the database.
    pub async fn create(db: &PgPool, user_id: &str) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "Users" (userid)
            VALUES ($1)
            RETURNING userid AS user_id, created_at
            "#,
        )
        .bind(user_id)
        .fetch_one(db)
        .await
        .context("create user")?;
        Ok(user)
    }
}
