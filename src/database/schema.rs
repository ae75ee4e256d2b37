//! Table definitions for the candidate store.
//!
//! Every statement is `CREATE TABLE IF NOT EXISTS`, so `init_schema` runs on
//! each startup without touching existing data.

use crate::error::Result;
use sqlx::SqlitePool;
use tracing::info;

pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    create_candidates_table(pool).await?;
    create_files_table(pool).await?;
    create_comments_table(pool).await?;
    info!("Candidate schema ready");
    Ok(())
}

async fn create_candidates_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS candidates (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            phone TEXT NOT NULL,
            email TEXT,
            position TEXT,
            experience TEXT,
            education TEXT,
            status TEXT,
            tags TEXT,
            created_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_files_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS files (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            candidate_id INTEGER,
            file_name TEXT NOT NULL,
            file_data BLOB,
            upload_time TEXT,
            FOREIGN KEY (candidate_id) REFERENCES candidates (id)
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_comments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            candidate_id INTEGER,
            comment_text TEXT NOT NULL,
            comment_time TEXT,
            FOREIGN KEY (candidate_id) REFERENCES candidates (id)
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::pool::create_in_memory_pool;

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let pool = create_in_memory_pool().await.unwrap();
        init_schema(&pool).await.unwrap();
        sqlx::query("INSERT INTO candidates (name, phone) VALUES ('a', '1')")
            .execute(&pool)
            .await
            .unwrap();

        init_schema(&pool).await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM candidates")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }
}
