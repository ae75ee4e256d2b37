use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` drives filtering (default
/// `info`); `json` switches to one JSON object per line.
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
