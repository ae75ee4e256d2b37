use candidate_tracker::{
    config::{get_config, init_config},
    create_router,
    database::{pool::create_pool, prepare_database},
    logging::init_tracing,
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();
    init_tracing(config.log_json);

    let pool = create_pool(&config.database_url).await?;
    prepare_database(&pool, config.seed_sample_data).await?;

    let app = create_router(AppState::new(pool), config.max_upload_bytes);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
