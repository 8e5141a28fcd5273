use crate::wildwatch::paths::WildwatchPaths;
use crate::wildwatch::util::now_epoch_secs;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;

#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub at_epoch_secs: u64,
    pub phase: String,
    pub status: String,
    pub message: String,
}

pub fn append_event(paths: &WildwatchPaths, phase: &str, status: &str, message: &str) -> Result<()> {
    fs::create_dir_all(&paths.logs_dir)
        .with_context(|| format!("failed to create {}", paths.logs_dir.display()))?;
    let event = AuditEvent {
        at_epoch_secs: now_epoch_secs()?,
        phase: phase.to_string(),
        status: status.to_string(),
        message: message.to_string(),
    };

    let line = format!("{}\n", serde_json::to_string(&event)?);
    let path = paths.audit_log();
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

/// Record an audit event; the journal never fails because auditing did.
pub fn record(paths: &WildwatchPaths, phase: &str, status: &str, message: &str) {
    if let Err(err) = append_event(paths, phase, status, message) {
        log::warn!("audit event `{phase}` not recorded: {err:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn append_event_writes_jsonl_lines() {
        let tmp = tempdir().expect("tempdir");
        let paths = WildwatchPaths {
            wildwatch_home: tmp.path().to_path_buf(),
            storage_dir: tmp.path().join("journal"),
            logs_dir: tmp.path().join("logs"),
        };

        append_event(&paths, "append", "ok", "entry 1").expect("first");
        append_event(&paths, "clear", "ok", "journal cleared").expect("second");

        let raw = fs::read_to_string(paths.audit_log()).expect("read audit");
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).expect("json");
        assert_eq!(first["phase"], "append");
        assert_eq!(first["message"], "entry 1");
    }
}
