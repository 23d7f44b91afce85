use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global fmt subscriber. `RUST_LOG` wins when set; otherwise the
/// crate and tower-http log at `default_level`.
pub fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={default_level},tower_http={default_level}",
                env!("CARGO_PKG_NAME")
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
