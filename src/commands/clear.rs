use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::commands::{CommandReport, open_journal};
use crate::wildwatch::audit;
use crate::wildwatch::config::load_config;
use crate::wildwatch::paths::resolve_paths;

const CONFIRM_PROMPT: &str =
    "Are you sure you want to clear all your wildlife data? This cannot be undone. [y/N] ";

fn confirmed(input: &mut impl BufRead, prompt: &mut impl Write) -> Result<bool> {
    prompt.write_all(CONFIRM_PROMPT.as_bytes())?;
    prompt.flush()?;
    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

pub fn run(yes: bool) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let mut report = CommandReport::new("clear");

    if !yes && !confirmed(&mut io::stdin().lock(), &mut io::stderr())? {
        report.detail("clear cancelled; journal unchanged");
        return Ok(report);
    }

    let journal = open_journal(&paths, &cfg);
    let removed = journal.load().len();
    match journal.clear() {
        Ok(()) => {
            audit::record(&paths, "clear", "ok", &format!("removed {removed} entries"));
            report.detail(format!("journal cleared; removed {removed} entries"));
        }
        Err(err) => {
            audit::record(&paths, "clear", "failed", &err.to_string());
            report.issue(format!("{}: {err}", err.code().as_str()));
        }
    }
    Ok(report)
}
