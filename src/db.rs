use anyhow::{Context, Result};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

// create the database if it's missing, open a pool on it and bring the schema up to date
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<Pool<Sqlite>> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        tracing::info!(%database_url, "database not found, creating");
        Sqlite::create_database(database_url)
            .await
            .with_context(|| format!("Unable to create database at {}", database_url))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .with_context(|| format!("Failed to create pool on {}", database_url))?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(%database_url, max_connections, "database ready");
    Ok(pool)
}
