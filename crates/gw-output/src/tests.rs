//! Integration tests for gw-output.

mod csv_tests {
    use gw_traffic::{
        Action, Approach, CompletionRecord, ReleaseRecord, SignalRecord, SnapshotRecord,
        TraceLog,
    };
    use tempfile::TempDir;

    use crate::csv::CsvExporter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn sample_trace() -> TraceLog {
        TraceLog {
            signals: vec![
                SignalRecord {
                    time:         0.0,
                    intersection: "A".to_string(),
                    phase:        Approach::Ns,
                    queue_ns:     0,
                    queue_ew:     0,
                    action:       Action::Hold,
                },
                SignalRecord {
                    time:         20.0,
                    intersection: "A".to_string(),
                    phase:        Approach::Ew,
                    queue_ns:     1,
                    queue_ew:     3,
                    action:       Action::Switch,
                },
            ],
            releases: vec![ReleaseRecord {
                time:         22.0,
                intersection: "A".to_string(),
                vehicle:      "W2E_T-1".to_string(),
                phase:        Approach::Ew,
            }],
            completions: vec![CompletionRecord {
                vehicle:     "W2E_T-1".to_string(),
                finish_time: 22.0,
                total_wait:  17.0,
            }],
            snapshots: vec![SnapshotRecord {
                time:         1.0,
                intersection: "A".to_string(),
                queue_ns:     2,
                queue_ew:     0,
                phase:        Approach::Ns,
            }],
        }
    }

    fn read_rows(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers = reader.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_owned).collect())
            .collect();
        (headers, rows)
    }

    #[test]
    fn all_four_files_are_created() {
        let dir = tmp();
        CsvExporter::new(dir.path()).unwrap();
        for name in ["snapshots.csv", "signal_events.csv", "releases.csv", "completions.csv"] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }
    }

    #[test]
    fn export_writes_headers_and_rows() {
        let dir = tmp();
        CsvExporter::export(dir.path(), &sample_trace()).unwrap();

        let (headers, rows) = read_rows(&dir.path().join("signal_events.csv"));
        assert_eq!(headers, ["t", "intersection", "phase", "q_ns", "q_ew", "action"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], ["20", "A", "EW", "1", "3", "SWITCH"]);

        let (headers, rows) = read_rows(&dir.path().join("releases.csv"));
        assert_eq!(headers, ["t", "intersection", "vehicle", "phase"]);
        assert_eq!(rows, vec![vec!["22", "A", "W2E_T-1", "EW"]]);

        let (headers, rows) = read_rows(&dir.path().join("completions.csv"));
        assert_eq!(headers, ["vehicle", "finish_t", "total_wait_s"]);
        assert_eq!(rows, vec![vec!["W2E_T-1", "22", "17"]]);

        let (headers, rows) = read_rows(&dir.path().join("snapshots.csv"));
        assert_eq!(headers, ["t", "intersection", "q_ns", "q_ew", "phase"]);
        assert_eq!(rows, vec![vec!["1", "A", "2", "0", "NS"]]);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut exporter = CsvExporter::new(dir.path()).unwrap();
        exporter.finish().unwrap();
        exporter.finish().unwrap();
    }

    #[test]
    fn empty_trace_leaves_headers_only() {
        let dir = tmp();
        CsvExporter::export(dir.path(), &TraceLog::default()).unwrap();
        let (_, rows) = read_rows(&dir.path().join("signal_events.csv"));
        assert!(rows.is_empty());
    }
}
