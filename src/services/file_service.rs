//! Resume attachments, stored as blobs next to the candidate rows.

use crate::error::Result;
use crate::models::file::{FileMeta, StoredFile};
use crate::utils::time::now_timestamp;
use sqlx::SqlitePool;
use tracing::info;

#[derive(Clone)]
pub struct FileService {
    pool: SqlitePool,
}

impl FileService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Appends a new attachment. Names are not deduplicated.
    pub async fn save_file(
        &self,
        candidate_id: i64,
        file_name: &str,
        data: &[u8],
    ) -> Result<FileMeta> {
        let upload_time = now_timestamp();
        let result = sqlx::query(
            r#"
            INSERT INTO files (candidate_id, file_name, file_data, upload_time)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(candidate_id)
        .bind(file_name)
        .bind(data)
        .bind(&upload_time)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(
            candidate_id,
            file_id = id,
            file_name,
            size_bytes = data.len(),
            "Attachment stored"
        );

        Ok(FileMeta {
            id,
            name: file_name.to_string(),
            upload_time: Some(upload_time),
        })
    }

    /// Newest first. Uploads within the same second fall back to insertion order.
    pub async fn list_files(&self, candidate_id: i64) -> Result<Vec<FileMeta>> {
        let files = sqlx::query_as::<_, FileMeta>(
            r#"
            SELECT id, file_name AS name, upload_time
            FROM files
            WHERE candidate_id = ?
            ORDER BY upload_time DESC, id DESC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(files)
    }

    pub async fn get_file(&self, candidate_id: i64, file_id: i64) -> Result<Option<StoredFile>> {
        let file = sqlx::query_as::<_, StoredFile>(
            r#"
            SELECT id, candidate_id, file_name, file_data, upload_time
            FROM files
            WHERE id = ? AND candidate_id = ?
            "#,
        )
        .bind(file_id)
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{pool::create_in_memory_pool, schema::init_schema};
    use crate::models::candidate::NewCandidate;
    use crate::services::candidate_service::CandidateService;

    async fn setup() -> (FileService, i64) {
        let pool = create_in_memory_pool().await.unwrap();
        init_schema(&pool).await.unwrap();
        let candidate = CandidateService::new(pool.clone())
            .add_candidate(NewCandidate {
                name: "张三".into(),
                phone: "13800138000".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        (FileService::new(pool), candidate.id)
    }

    #[tokio::test]
    async fn saved_file_is_listed_without_content() {
        let (svc, id) = setup().await;
        let meta = svc.save_file(id, "r.pdf", b"%PDF-1.4 body").await.unwrap();

        let files = svc.list_files(id).await.unwrap();
        assert_eq!(files, vec![meta]);
        assert_eq!(files[0].name, "r.pdf");
    }

    #[tokio::test]
    async fn duplicate_names_are_kept_newest_first() {
        let (svc, id) = setup().await;
        let first = svc.save_file(id, "r.pdf", b"v1").await.unwrap();
        let second = svc.save_file(id, "r.pdf", b"v2").await.unwrap();

        let ids: Vec<i64> = svc.list_files(id).await.unwrap().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn stored_bytes_come_back_intact() {
        let (svc, id) = setup().await;
        let payload: Vec<u8> = (0u8..=255).collect();
        let meta = svc.save_file(id, "photo.png", &payload).await.unwrap();

        let stored = svc.get_file(id, meta.id).await.unwrap().unwrap();
        assert_eq!(stored.file_data, payload);
        assert_eq!(stored.file_name, "photo.png");
        assert_eq!(stored.candidate_id, id);

        assert!(svc.get_file(id + 1, meta.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn files_are_scoped_to_their_candidate() {
        let (svc, id) = setup().await;
        svc.save_file(id, "cv.doc", b"doc").await.unwrap();
        assert!(svc.list_files(id + 100).await.unwrap().is_empty());
    }
}
