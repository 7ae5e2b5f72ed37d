//! JSONL file writer for confirmation events.
//!
//! Each [`ConfirmationEvent`] becomes one JSON line carrying `type`,
//! `timestamp`, the run number and the event's position in that run. A run
//! starts at `run_started`; several runs may share one file.
//!
//! Lines are buffered until the run reaches a terminal event (`run_finished`
//! or `run_failed`), so a transcript on disk always ends at a run boundary
//! unless the process dies mid-run.

use confirm_application::ports::confirmation_logger::{ConfirmationEvent, ConfirmationLogger};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

struct TranscriptWriter {
    writer: BufWriter<File>,
    /// 1-based run number; 0 until the first `run_started`
    run: u32,
    /// Events written in the current run
    seq: u32,
}

impl TranscriptWriter {
    fn advance(&mut self, event: &ConfirmationEvent) -> (u32, u32) {
        if event.is_run_start() {
            self.run += 1;
            self.seq = 0;
        }
        self.seq += 1;
        (self.run, self.seq)
    }
}

/// JSONL confirmation logger that writes one JSON object per line.
///
/// Thread-safe via a `Mutex`. Flushes at the end of every run and on `Drop`.
pub struct JsonlConfirmationLogger {
    transcript: Mutex<TranscriptWriter>,
    path: PathBuf,
}

impl JsonlConfirmationLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            transcript: Mutex::new(TranscriptWriter {
                writer: BufWriter::new(file),
                run: 0,
                seq: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: ConfirmationEvent, run: u32, seq: u32) -> Value {
        let mut record = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };

        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        record.insert("type".to_string(), Value::from(event.event_type));
        record.insert("timestamp".to_string(), Value::from(timestamp));
        record.insert("run".to_string(), Value::from(run));
        record.insert("seq".to_string(), Value::from(seq));
        Value::Object(record)
    }
}

impl ConfirmationLogger for JsonlConfirmationLogger {
    fn log(&self, event: ConfirmationEvent) {
        let Ok(mut transcript) = self.transcript.lock() else {
            return;
        };

        let (run, seq) = transcript.advance(&event);
        let terminal = event.is_terminal();
        let Ok(line) = serde_json::to_string(&Self::record(event, run, seq)) else {
            return;
        };

        if let Err(e) = writeln!(transcript.writer, "{}", line) {
            warn!("Could not write to event log {}: {}", self.path.display(), e);
            return;
        }
        if terminal && let Err(e) = transcript.writer.flush() {
            warn!("Could not flush event log {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlConfirmationLogger {
    fn drop(&mut self) {
        if let Ok(transcript) = self.transcript.get_mut() {
            let _ = transcript.writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confirm_application::{RUN_FAILED, RUN_FINISHED, RUN_STARTED};
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.events.jsonl");
        let logger = JsonlConfirmationLogger::new(&path).unwrap();

        logger.log(ConfirmationEvent::new(RUN_STARTED, json!({ "model_id": 1 })));
        logger.log(ConfirmationEvent::new(
            "proposal_sent",
            json!({ "organization": "Org1MSP", "sequence": 1 }),
        ));
        logger.log(ConfirmationEvent::new(
            "step_completed",
            json!({ "vector": [0, -1], "decision": "restart" }),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 3);
        for record in &records {
            assert!(record.get("timestamp").is_some());
            assert_eq!(record["run"], 1);
        }

        assert_eq!(records[1]["type"], "proposal_sent");
        assert_eq!(records[1]["organization"], "Org1MSP");
        assert_eq!(records[1]["seq"], 2);
        assert_eq!(records[2]["decision"], "restart");
        assert_eq!(records[2]["vector"], json!([0, -1]));
    }

    #[test]
    fn test_jsonl_logger_flushes_at_run_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");
        let logger = JsonlConfirmationLogger::new(&path).unwrap();

        logger.log(ConfirmationEvent::new(RUN_STARTED, json!({})));
        logger.log(ConfirmationEvent::new("step_completed", json!({})));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

        logger.log(ConfirmationEvent::new(RUN_FINISHED, json!({ "agreement_reached": true })));
        let records = read_lines(&path);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2]["type"], "run_finished");
        assert_eq!(records[2]["seq"], 3);
    }

    #[test]
    fn test_jsonl_logger_numbers_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");
        let logger = JsonlConfirmationLogger::new(&path).unwrap();

        logger.log(ConfirmationEvent::new(RUN_STARTED, json!({})));
        logger.log(ConfirmationEvent::new(RUN_FAILED, json!({ "error": "boom" })));
        logger.log(ConfirmationEvent::new(RUN_STARTED, json!({})));
        logger.log(ConfirmationEvent::new(RUN_FINISHED, json!({})));

        let records = read_lines(&path);
        let positions: Vec<(u64, u64)> = records
            .iter()
            .map(|r| (r["run"].as_u64().unwrap(), r["seq"].as_u64().unwrap()))
            .collect();
        assert_eq!(positions, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_jsonl_logger_wraps_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/run.jsonl");
        let logger = JsonlConfirmationLogger::new(&path).unwrap();
        assert_eq!(logger.path(), path.as_path());

        logger.log(ConfirmationEvent::new("note", json!("restarting")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "note");
        assert_eq!(records[0]["data"], "restarting");
        assert_eq!(records[0]["run"], 0);
    }
}
