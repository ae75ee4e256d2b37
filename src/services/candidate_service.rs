//! Candidate persistence.
//!
//! Storage trusts its caller: required fields are checked at the form and
//! API boundary, never here.

use crate::error::Result;
use crate::models::candidate::{Candidate, CandidateRow, NewCandidate};
use crate::utils::{tags::join_tags, time::now_timestamp};
use sqlx::SqlitePool;
use tracing::info;

const CANDIDATE_COLUMNS: &str =
    "id, name, phone, email, position, experience, education, status, tags, created_at";

/// (name, phone, email, position, experience, education, status, tags)
const SAMPLE_CANDIDATES: [[&str; 8]; 3] = [
    [
        "张三",
        "13800138000",
        "zhangsan@example.com",
        "Java工程师",
        "5年",
        "本科",
        "待沟通",
        "Java,SpringBoot,MySQL",
    ],
    [
        "李四",
        "13900139000",
        "lisi@example.com",
        "前端工程师",
        "3年",
        "本科",
        "面试中",
        "React,Vue,JavaScript",
    ],
    [
        "王五",
        "13700137000",
        "wangwu@example.com",
        "产品经理",
        "4年",
        "硕士",
        "已入职",
        "产品设计,数据分析",
    ],
];

#[derive(Clone)]
pub struct CandidateService {
    pool: SqlitePool,
}

impl CandidateService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        let rows = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Candidate::from).collect())
    }

    pub async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>> {
        let row = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Candidate::from))
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT id FROM candidates WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM candidates")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    pub async fn add_candidate(&self, new: NewCandidate) -> Result<Candidate> {
        let tags = join_tags(&new.tags);
        let created_at = now_timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO candidates
                (name, phone, email, position, experience, education, status, tags, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.name)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(&new.position)
        .bind(&new.experience)
        .bind(&new.education)
        .bind(&new.status)
        .bind(&tags)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(candidate_id = id, name = %new.name, "Candidate created");

        Ok(Candidate {
            id,
            name: new.name,
            phone: new.phone,
            email: new.email,
            position: new.position,
            experience: new.experience,
            education: new.education,
            status: new.status,
            tags: new.tags,
            created_at: Some(created_at),
        })
    }

    /// Substring match on name or position, whole-tag match on the stored
    /// tag column ("Java" does not hit "JavaScript"). Matching follows
    /// SQLite `LIKE`, so ASCII letters compare case-insensitively. An empty
    /// keyword returns the whole roster.
    pub async fn search_candidates(&self, keyword: &str) -> Result<Vec<Candidate>> {
        if keyword.is_empty() {
            return self.list_candidates().await;
        }

        let escaped = escape_like(keyword);
        let field_pattern = format!("%{}%", escaped);
        let tag_pattern = format!("%,{},%", escaped);
        let rows = sqlx::query_as::<_, CandidateRow>(&format!(
            r#"
            SELECT {CANDIDATE_COLUMNS} FROM candidates
            WHERE name LIKE ?1 ESCAPE '\'
               OR position LIKE ?1 ESCAPE '\'
               OR (',' || tags || ',') LIKE ?2 ESCAPE '\'
            ORDER BY id DESC
            "#
        ))
        .bind(&field_pattern)
        .bind(&tag_pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Candidate::from).collect())
    }

    /// Inserts the sample roster when the table is empty. Returns whether
    /// anything was written.
    pub async fn seed_sample_data(&self) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM candidates")
            .fetch_one(&mut *tx)
            .await?;
        if count.0 > 0 {
            return Ok(false);
        }

        let created_at = now_timestamp();
        for [name, phone, email, position, experience, education, status, tags] in
            SAMPLE_CANDIDATES
        {
            sqlx::query(
                r#"
                INSERT INTO candidates
                    (name, phone, email, position, experience, education, status, tags, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(name)
            .bind(phone)
            .bind(email)
            .bind(position)
            .bind(experience)
            .bind(education)
            .bind(status)
            .bind(tags)
            .bind(&created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(count = SAMPLE_CANDIDATES.len(), "Sample candidates inserted");
        Ok(true)
    }
}

/// Makes `%`, `_` and `\` literal inside a `LIKE ... ESCAPE '\'` pattern.
fn escape_like(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
