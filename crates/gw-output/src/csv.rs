//! CSV export backend.
//!
//! Creates four files in the configured output directory:
//! - `snapshots.csv`
//! - `signal_events.csv`
//! - `releases.csv`
//! - `completions.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use gw_traffic::{CompletionRecord, ReleaseRecord, SignalRecord, SnapshotRecord, TraceLog};

use crate::error::OutputResult;

/// Writes run traces to four CSV files.
pub struct CsvExporter {
    snapshots:   Writer<File>,
    signals:     Writer<File>,
    releases:    Writer<File>,
    completions: Writer<File>,
    finished:    bool,
}

impl CsvExporter {
    /// Open (or create) the four CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("snapshots.csv"))?;
        snapshots.write_record(["t", "intersection", "q_ns", "q_ew", "phase"])?;

        let mut signals = Writer::from_path(dir.join("signal_events.csv"))?;
        signals.write_record(["t", "intersection", "phase", "q_ns", "q_ew", "action"])?;

        let mut releases = Writer::from_path(dir.join("releases.csv"))?;
        releases.write_record(["t", "intersection", "vehicle", "phase"])?;

        let mut completions = Writer::from_path(dir.join("completions.csv"))?;
        completions.write_record(["vehicle", "finish_t", "total_wait_s"])?;

        Ok(Self {
            snapshots,
            signals,
            releases,
            completions,
            finished: false,
        })
    }

    /// Write an entire trace and flush.
    pub fn export(dir: &Path, trace: &TraceLog) -> OutputResult<()> {
        let mut exporter = CsvExporter::new(dir)?;
        exporter.write_snapshots(&trace.snapshots)?;
        exporter.write_signals(&trace.signals)?;
        exporter.write_releases(&trace.releases)?;
        exporter.write_completions(&trace.completions)?;
        exporter.finish()
    }

    pub fn write_snapshots(&mut self, rows: &[SnapshotRecord]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.time.to_string(),
                row.intersection.clone(),
                row.queue_ns.to_string(),
                row.queue_ew.to_string(),
                row.phase.to_string(),
            ])?;
        }
        Ok(())
    }

    pub fn write_signals(&mut self, rows: &[SignalRecord]) -> OutputResult<()> {
        for row in rows {
            self.signals.write_record(&[
                row.time.to_string(),
                row.intersection.clone(),
                row.phase.to_string(),
                row.queue_ns.to_string(),
                row.queue_ew.to_string(),
                row.action.to_string(),
            ])?;
        }
        Ok(())
    }

    pub fn write_releases(&mut self, rows: &[ReleaseRecord]) -> OutputResult<()> {
        for row in rows {
            self.releases.write_record(&[
                row.time.to_string(),
                row.intersection.clone(),
                row.vehicle.clone(),
                row.phase.to_string(),
            ])?;
        }
        Ok(())
    }

    pub fn write_completions(&mut self, rows: &[CompletionRecord]) -> OutputResult<()> {
        for row in rows {
            self.completions.write_record(&[
                row.vehicle.clone(),
                row.finish_time.to_string(),
                row.total_wait.to_string(),
            ])?;
        }
        Ok(())
    }

    /// Flush all underlying file handles.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.signals.flush()?;
        self.releases.flush()?;
        self.completions.flush()?;
        Ok(())
    }
}
