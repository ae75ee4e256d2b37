use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Listing entry for an attachment; the blob itself is not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FileMeta {
    pub id: i64,
    pub name: String,
    pub upload_time: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct StoredFile {
    pub id: i64,
    pub candidate_id: i64,
    pub file_name: String,
    pub file_data: Vec<u8>,
    pub upload_time: Option<String>,
}
