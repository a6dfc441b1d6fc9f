use std::time::{Duration, Instant};
use tracing::{debug, info};

/// A simple timer for measuring execution time of code blocks
#[derive(Debug)]
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    /// Create a new timer with a label
    pub fn new(label: &str) -> Self {
        debug!("Starting timer: {}", label);
        Self { label: label.to_string(), start: Instant::now() }
    }

    /// Stop the timer and log the elapsed time
    pub fn stop(self) -> Duration {
        let elapsed = self.start.elapsed();
        debug!("Timer '{}' completed in {:?}", self.label, elapsed);
        elapsed
    }
}

/// Durations of the load, merge and persist phases of one run
#[derive(Debug, Clone, Default)]
pub struct PipelineMetrics {
    pub load: Duration,
    pub merge: Duration,
    pub persist: Duration,
    pub target_keys: usize,
    pub source_keys: usize,
}

impl PipelineMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> Duration {
        self.load.saturating_add(self.merge).saturating_add(self.persist)
    }

    pub fn log_summary(&self) {
        info!("=== Merge Performance Summary ===");
        info!("Top-level keys: target {}, source {}", self.target_keys, self.source_keys);
        info!("Load: {:?}", self.load);
        info!("Merge: {:?}", self.merge);
        info!("Persist: {:?}", self.persist);
        info!("Total time: {:?}", self.total());
    }
}
