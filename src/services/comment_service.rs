use crate::error::Result;
use crate::models::comment::Comment;
use crate::utils::time::now_timestamp;
use sqlx::SqlitePool;
use tracing::info;

#[derive(Clone)]
pub struct CommentService {
    pool: SqlitePool,
}

impl CommentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn add_comment(&self, candidate_id: i64, text: &str) -> Result<Comment> {
        let time = now_timestamp();
        let result = sqlx::query(
            r#"
            INSERT INTO comments (candidate_id, comment_text, comment_time)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(candidate_id)
        .bind(text)
        .bind(&time)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(candidate_id, comment_id = id, "Comment added");

        Ok(Comment {
            id,
            candidate_id,
            text: text.to_string(),
            time: Some(time),
        })
    }

    pub async fn list_comments(&self, candidate_id: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, candidate_id, comment_text AS text, comment_time AS time
            FROM comments
            WHERE candidate_id = ?
            ORDER BY comment_time DESC, id DESC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{pool::create_in_memory_pool, schema::init_schema};
    use crate::services::candidate_service::CandidateService;

    async fn setup() -> (CommentService, i64) {
        let pool = create_in_memory_pool().await.unwrap();
        init_schema(&pool).await.unwrap();
        CandidateService::new(pool.clone())
            .seed_sample_data()
            .await
            .unwrap();
        (CommentService::new(pool), 1)
    }

    #[tokio::test]
    async fn latest_comment_comes_first() {
        let (svc, id) = setup().await;
        svc.add_comment(id, "一面通过").await.unwrap();
        let latest = svc.add_comment(id, "二面待安排").await.unwrap();

        let comments = svc.list_comments(id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0], latest);
        assert_eq!(comments[1].text, "一面通过");
    }

    #[tokio::test]
    async fn comments_do_not_leak_between_candidates() {
        let (svc, id) = setup().await;
        svc.add_comment(id, "note").await.unwrap();
        assert!(svc.list_comments(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn long_text_is_stored_verbatim() {
        let (svc, id) = setup().await;
        let text = "面试反馈\n".repeat(2_000);
        svc.add_comment(id, &text).await.unwrap();
        assert_eq!(svc.list_comments(id).await.unwrap()[0].text, text);
    }
}
