//! Waypoint CLI - generate Litchi mission CSVs from a JSON flight description.
//!
//! The binary `wpgen` wraps these helpers; they are split out so the
//! read/generate steps can be tested without touching the terminal.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use wpgen_core::{export, parse_generate_request, project, Error, GenerateRequest, LitchiRow};

/// Read and parse a request from `input`, or stdin when `None` or `-`.
pub fn read_request(input: Option<&Path>) -> Result<GenerateRequest> {
    let text = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            text
        }
    };
    parse_request_text(&text)
}

/// Parse request JSON text.
pub fn parse_request_text(text: &str) -> Result<GenerateRequest> {
    let payload: serde_json::Value = serde_json::from_str(text).context("parsing request JSON")?;
    let request = parse_generate_request(&payload)?;
    if !request.skipped.is_empty() {
        tracing::warn!(
            "Skipped {} unrecognized waypoint entries at {:?}",
            request.skipped.len(),
            request.skipped
        );
    }
    Ok(request)
}

/// Project the request and encode it as mission rows.
///
/// Failures from either step carry a [`wpgen_core::Error`].
pub fn generate_rows(request: &GenerateRequest) -> Result<Vec<LitchiRow>> {
    let waypoints = project(&request.initial, &request.waypoints)?;
    let rows = export(&request.initial, &waypoints, &request.config).map_err(Error::from)?;
    Ok(rows)
}
