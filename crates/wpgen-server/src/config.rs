//! Server configuration from environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use wpgen_core::{OutputNamer, RunCounterNamer, TempFileNamer};

/// How generated files are named and where they land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Sequential `output_N.csv` files under the output directory
    Counter,
    /// Unique files in the system temp directory
    Temp,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "counter" => Ok(OutputMode::Counter),
            "temp" | "tmp" => Ok(OutputMode::Temp),
            other => Err(format!("unknown output mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub output_dir: PathBuf,
    pub output_mode: OutputMode,
}

impl Config {
    pub fn from_env() -> Self {
        let output_mode = env::var("WPGEN_OUTPUT_MODE")
            .ok()
            .and_then(|s| match s.parse() {
                Ok(mode) => Some(mode),
                Err(err) => {
                    tracing::warn!("Ignoring WPGEN_OUTPUT_MODE: {}", err);
                    None
                }
            })
            .unwrap_or_else(|| {
                // Serverless hosts have no durable working directory.
                if env::var_os("VERCEL").is_some() || env::var_os("CI").is_some() {
                    OutputMode::Temp
                } else {
                    OutputMode::Counter
                }
            });

        Self {
            server_port: env::var("WPGEN_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            output_dir: env::var("WPGEN_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            output_mode,
        }
    }

    /// Build the naming strategy handed to request handlers.
    pub fn output_namer(&self) -> Arc<dyn OutputNamer> {
        match self.output_mode {
            OutputMode::Counter => Arc::new(RunCounterNamer::new(&self.output_dir)),
            OutputMode::Temp => Arc::new(TempFileNamer::new(env::temp_dir())),
        }
    }
}
