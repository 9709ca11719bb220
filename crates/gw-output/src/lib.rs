//! `gw-output` — trace exporters for greenwave simulation runs.
//!
//! Takes the [`TraceLog`](gw_traffic::TraceLog) a run produces and writes it
//! out for offline analysis (and for training learned signal policies).
//!
//! | File                | Contents                                  |
//! |---------------------|-------------------------------------------|
//! | `snapshots.csv`     | periodic queue depths and phase           |
//! | `signal_events.csv` | every controller decision                 |
//! | `releases.csv`      | every vehicle release                     |
//! | `completions.csv`   | finished vehicles with total wait         |
//!
//! # Usage
//!
//! ```rust,ignore
//! use gw_output::CsvExporter;
//!
//! let output = Simulation::build(&config)?.run()?;
//! CsvExporter::export(Path::new("./runs"), &output.trace)?;
//! ```

pub mod csv;
pub mod error;

#[cfg(test)]
mod tests;

pub use csv::CsvExporter;
pub use error::{OutputError, OutputResult};
