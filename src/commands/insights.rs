use anyhow::{Result, bail};

use crate::commands::{CommandReport, open_journal};
use crate::wildwatch::config::load_config;
use crate::wildwatch::paths::resolve_paths;
use crate::wildwatch::stats::{RankedCount, insights};

fn ranked_details(report: &mut CommandReport, heading: &str, counts: &[RankedCount]) {
    if counts.is_empty() {
        report.detail(format!("{heading}: none"));
        return;
    }
    for (rank, item) in counts.iter().enumerate() {
        report.detail(format!("{heading} #{} {}={}", rank + 1, item.label, item.count));
    }
}

pub fn run(top: Option<usize>) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let top = top.unwrap_or(cfg.journal.insights_top);
    if top == 0 {
        bail!("--top must be >= 1");
    }
    let mut report = CommandReport::new("insights");

    let entries = open_journal(&paths, &cfg).load();
    let got = insights(&entries, top);
    ranked_details(&mut report, "species", &got.species_distribution);
    ranked_details(&mut report, "habitat", &got.habitat_exploration);
    report.detail(format!("conservation_impact={}", got.conservation_impact));
    report.attach(&got);
    Ok(report)
}
