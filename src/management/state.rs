use std::time::Duration;

use tokio::time::Instant;

/// Guards the initialization pipeline against overlapping and bursty runs.
#[derive(Debug, Default)]
pub struct PipelineState {
    is_initializing: bool,
    last_init: Option<Instant>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the pipeline for a new run.
    ///
    /// Refused while a run is active or within `debounce` of the last accepted
    /// run. Refusals do not move the debounce window.
    pub fn try_begin(&mut self, now: Instant, debounce: Duration) -> bool {
        if self.is_initializing {
            return false;
        }
        if let Some(last) = self.last_init {
            if now.saturating_duration_since(last) < debounce {
                return false;
            }
        }

        self.is_initializing = true;
        self.last_init = Some(now);
        true
    }

    pub fn finish(&mut self) {
        self.is_initializing = false;
    }

    pub fn is_initializing(&self) -> bool {
        self.is_initializing
    }

    /// Forgets everything, as a fresh page context would.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
