//! Logging to stderr using `tracing`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber.
///
/// The filter is read from `RUST_LOG`. Without it, only warnings are shown, plus the executed
/// queries if `trace_queries` is set.
pub fn init(trace_queries: bool) -> anyhow::Result<()> {
    let default = if trace_queries {
        "warn,sparql_slurper=info"
    } else {
        "warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()?;
    Ok(())
}
