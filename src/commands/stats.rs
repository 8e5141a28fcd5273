use anyhow::Result;
use chrono::Utc;

use crate::commands::{CommandReport, open_journal};
use crate::wildwatch::config::load_config;
use crate::wildwatch::paths::resolve_paths;
use crate::wildwatch::stats::{JournalStats, compute};

pub fn describe(report: &mut CommandReport, stats: &JournalStats) {
    report.detail(format!("total_identifications={}", stats.total_identifications));
    report.detail(format!("unique_species={}", stats.unique_species));
    report.detail(format!("most_spotted_species={}", stats.most_spotted_species));
    report.detail(format!("recent_activity={}", stats.recent_activity));
    report.detail(format!("favorite_habitat={}", stats.favorite_habitat));
    report.detail(format!("conservation_impact={}", stats.conservation_impact));
}

pub fn run() -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let mut report = CommandReport::new("stats");

    let entries = open_journal(&paths, &cfg).load();
    let stats = compute(&entries, Utc::now(), cfg.journal.recent_window_days);
    report.detail(format!(
        "recent_window_days={}",
        cfg.journal.recent_window_days
    ));
    describe(&mut report, &stats);
    report.attach(&stats);
    Ok(report)
}
