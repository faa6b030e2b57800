//! Logging setup
//!
//! Console diagnostics go to stderr so they never interleave with the
//! answer on stdout. JSON file logging is opt-in.

use crate::config::TelemetryConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the log writer alive; drop it last.
pub struct Telemetry {
    _file_guard: Option<WorkerGuard>,
}

impl Telemetry {
    pub fn init(config: &TelemetryConfig, log_name: &str) -> anyhow::Result<Self> {
        let verbose = config.verbose;
        let make_env_filter = || {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                if verbose {
                    EnvFilter::new("debug,hyper=info,reqwest=info,h2=info,rustls=info")
                } else {
                    EnvFilter::new("warn,hyper=warn,reqwest=warn,h2=warn,rustls=warn")
                }
            })
        };

        let console = fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact();

        let file_guard = if let Some(log_dir) = &config.log_dir {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = tracing_appender::rolling::daily(log_dir, log_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(make_env_filter())
                .with(console)
                .with(fmt::layer().json().with_writer(non_blocking))
                .try_init()
                .ok();
            Some(guard)
        } else {
            tracing_subscriber::registry()
                .with(make_env_filter())
                .with(console)
                .try_init()
                .ok();
            None
        };

        tracing::debug!(
            verbose,
            log_dir = ?config.log_dir,
            "Telemetry initialized"
        );

        Ok(Self {
            _file_guard: file_guard,
        })
    }
}
