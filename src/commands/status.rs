use anyhow::Result;
use serde_json::json;
use std::env;

use crate::commands::{CommandReport, open_journal};
use crate::wildwatch::config::load_config;
use crate::wildwatch::paths::resolve_paths;

include!(concat!(env!("OUT_DIR"), "/wildwatch_env_allowlist.rs"));

const BUILD_ID: &str = env!("WILDWATCH_BUILD_ID");

/// Names of recognised `WILDWATCH_*` variables currently set.
fn active_overrides(lookup: impl Fn(&str) -> Option<String>) -> Vec<&'static str> {
    GENERATED_WILDWATCH_ENV_ALLOWLIST
        .iter()
        .copied()
        .filter(|&key| lookup(key).is_some_and(|v| !v.trim().is_empty()))
        .collect()
}

pub fn run() -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let mut report = CommandReport::new("status");

    report.detail(format!("build_id={BUILD_ID}"));
    report.detail(format!("wildwatch_home={}", paths.wildwatch_home.display()));
    report.detail(format!("logs_dir={}", paths.logs_dir.display()));
    report.detail(format!("audit_log={}", paths.audit_log().display()));

    let journal = open_journal(&paths, &cfg);
    let storage = journal.storage();
    report.detail(format!("storage_dir={}", storage.dir().display()));
    report.detail(format!("storage_key={}", journal.key()));
    report.detail(format!(
        "journal_file={} present={}",
        storage.key_path(journal.key()).display(),
        storage.key_path(journal.key()).is_file()
    ));
    let entry_count = journal.load().len();
    report.detail(format!("entries={entry_count}"));

    report.detail(format!("classifier_url={}", cfg.classifier.base_url));
    report.detail(format!(
        "classifier_timeout_secs={}",
        cfg.classifier.timeout_secs
    ));
    report.detail(format!(
        "recent_window_days={}",
        cfg.journal.recent_window_days
    ));
    report.detail(format!("display_timezone={}", cfg.journal.display_timezone));
    report.detail(format!("insights_top={}", cfg.journal.insights_top));

    let overrides = active_overrides(|key| env::var(key).ok());
    if overrides.is_empty() {
        report.detail("env_overrides=none");
    } else {
        report.detail(format!("env_overrides={}", overrides.join(",")));
    }

    report.attach(json!({
        "buildId": BUILD_ID,
        "paths": {
            "home": paths.wildwatch_home,
            "storageDir": paths.storage_dir,
            "logsDir": paths.logs_dir,
        },
        "entries": entry_count,
        "config": cfg,
        "envOverrides": overrides,
    }));
    Ok(report)
}
