use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::utils::tags::split_tags;

pub const EXPERIENCE_OPTIONS: [&str; 5] = ["1年以内", "1-3年", "3-5年", "5-10年", "10年以上"];
pub const EDUCATION_OPTIONS: [&str; 5] = ["高中", "专科", "本科", "硕士", "博士"];
pub const STATUS_OPTIONS: [&str; 5] = ["待沟通", "沟通中", "面试中", "已入职", "不合适"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub position: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub status: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Option<String>,
}

/// Row shape of the `candidates` table; `tags` is still comma-joined here.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub position: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub status: Option<String>,
    pub tags: Option<String>,
    pub created_at: Option<String>,
}

impl From<CandidateRow> for Candidate {
    fn from(row: CandidateRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            position: row.position,
            experience: row.experience,
            education: row.education,
            status: row.status,
            tags: row.tags.as_deref().map(split_tags).unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

/// Fields accepted by `CandidateService::add_candidate`. Storage performs no
/// validation; callers must have checked required fields already.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCandidate {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub position: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub status: Option<String>,
    pub tags: Vec<String>,
}
