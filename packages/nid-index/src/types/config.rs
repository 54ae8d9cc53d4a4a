//! Configuration types.

use std::time::Duration;

/// Tuning for interactive search behavior.
///
/// The lookup itself is a synchronous scan; the latency floor exists for
/// perceived responsiveness in interactive surfaces. Non-interactive
/// callers use [`SearchOptions::immediate`] - the suspension point stays
/// either way.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Minimum time a query appears to take
    pub latency: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(400),
        }
    }
}

impl SearchOptions {
    /// No artificial latency.
    pub fn immediate() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }

    /// Set the latency floor.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}
