pub mod pool;
pub mod schema;

use sqlx::SqlitePool;

use crate::error::Result;
use crate::services::candidate_service::CandidateService;

/// Startup step: create tables, then insert the sample roster if requested
/// and the table is still empty.
pub async fn prepare_database(pool: &SqlitePool, seed_sample_data: bool) -> Result<()> {
    schema::init_schema(pool).await?;
    if seed_sample_data {
        CandidateService::new(pool.clone()).seed_sample_data().await?;
    }
    Ok(())
}
