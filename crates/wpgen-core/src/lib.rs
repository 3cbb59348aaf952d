//! Core logic for turning relative flight offsets into absolute waypoints
//! and encoding them as Litchi mission CSV rows.
//!
//! `projector` and `export` are pure functions over their arguments. The
//! `ingest` and `output` modules are the I/O-facing collaborators used by
//! the server and CLI; the pure half never calls into them.

pub mod error;
pub mod export;
pub mod geodesy;
pub mod ingest;
pub mod models;
pub mod output;
pub mod projector;
pub mod rules;

pub use error::{Error, GeodesicError, OutputError, ValidationError, ValidationReason};
pub use export::{export, to_csv_string, write_csv, LitchiRow, LITCHI_HEADERS};
pub use ingest::{parse_generate_request, GenerateRequest};
pub use models::{AbsoluteWaypoint, ExportConfig, InitialPose, RelativeWaypoint};
pub use output::{write_csv_file, OutputNamer, OutputTarget, RunCounterNamer, TempFileNamer};
pub use projector::{project, project_with_rules};
pub use rules::FlightRules;
