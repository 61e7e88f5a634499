use std::time::Duration;

use crate::EncoderOptions;

/// The options which determine how long the search runs and what models are built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    /// The wall-clock budget of a whole search; no probe is started once it has been used up.
    pub time_budget: Duration,
    /// The limit on a single backend invocation; a probe never runs past the overall budget.
    pub probe_timeout: Duration,
    pub encoder: EncoderOptions,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            time_budget: Duration::from_secs(300),
            probe_timeout: Duration::from_secs(300),
            encoder: EncoderOptions::default(),
        }
    }
}

impl SearchOptions {
    pub fn with_time_budget(mut self, time_budget: Duration) -> SearchOptions {
        self.time_budget = time_budget;
        self
    }

    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> SearchOptions {
        self.probe_timeout = probe_timeout;
        self
    }

    pub fn with_encoder_options(mut self, encoder: EncoderOptions) -> SearchOptions {
        self.encoder = encoder;
        self
    }
}
