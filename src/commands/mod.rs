pub mod clear;
pub mod identify;
pub mod insights;
pub mod journal;
pub mod record;
pub mod show;
pub mod stats;
pub mod status;

use crate::wildwatch::config::WildwatchConfig;
use crate::wildwatch::journal::JournalStore;
use crate::wildwatch::paths::WildwatchPaths;
use crate::wildwatch::storage::FileStorage;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            issues: Vec::new(),
            payload: None,
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }

    /// Attach a machine-readable body for `--json` output.
    pub fn attach(&mut self, payload: impl Serialize) {
        match serde_json::to_value(payload) {
            Ok(value) => self.payload = Some(value),
            Err(err) => log::warn!("report payload for `{}` dropped: {err}", self.command),
        }
    }
}

pub fn open_journal(paths: &WildwatchPaths, cfg: &WildwatchConfig) -> JournalStore<FileStorage> {
    JournalStore::new(
        FileStorage::new(paths.storage_dir.clone()),
        cfg.journal.storage_key.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_marks_report_failed() {
        let mut report = CommandReport::new("identify");
        report.detail("first ok");
        report.issue("second failed");

        assert!(!report.ok);
        assert_eq!(report.details, vec!["first ok"]);
        assert_eq!(report.issues, vec!["second failed"]);
    }

    #[test]
    fn payload_is_omitted_when_absent() {
        let report = CommandReport::new("stats");
        let value = serde_json::to_value(&report).expect("serialize");
        assert!(value.get("payload").is_none());
    }
}
