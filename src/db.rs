use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")
}

pub async fn migrate(db: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")
}

/// Cheap round trip against the user table.
pub async fn ping(db: &PgPool) -> anyhow::Result<()> {
    sqlx::query(r#"SELECT 1 FROM "Users" LIMIT 1"#)
        .execute(db)
        .await
        .context("ping database")?;
    Ok(())
}
