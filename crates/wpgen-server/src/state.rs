//! Shared handler state.

use std::sync::Arc;

use wpgen_core::OutputNamer;

use crate::config::Config;

pub struct AppState {
    config: Config,
    namer: Arc<dyn OutputNamer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let namer = config.output_namer();
        Self::with_namer(config, namer)
    }

    pub fn with_namer(config: Config, namer: Arc<dyn OutputNamer>) -> Self {
        Self { config, namer }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn namer(&self) -> Arc<dyn OutputNamer> {
        self.namer.clone()
    }
}
