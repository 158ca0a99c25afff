//! Logging setup and stage timing.

use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs when a pipeline stage starts and, on drop, how long it took.
pub struct StageTimer {
    name: String,
    start: Instant,
}

impl StageTimer {
    pub fn start(name: impl Into<String>) -> Self {
        let name = name.into();
        info!("> {}", name);
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        info!("< {} ({:.2}s)", self.name, self.start.elapsed().as_secs_f64());
    }
}
