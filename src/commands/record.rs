use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::Path;

use crate::classifier::MediaFile;
use crate::commands::{CommandReport, open_journal};
use crate::error::IngestError;
use crate::wildwatch::audit;
use crate::wildwatch::config::load_config;
use crate::wildwatch::entry::{JournalEntry, MediaType};
use crate::wildwatch::journal::JournalStore;
use crate::wildwatch::paths::{WildwatchPaths, resolve_paths};
use crate::wildwatch::record::SpeciesRecord;
use crate::wildwatch::storage::Storage;

/// Append `entry` and audit the outcome. Returns whether it was stored.
pub fn save_entry<S: Storage>(
    report: &mut CommandReport,
    journal: &JournalStore<S>,
    paths: &WildwatchPaths,
    entry: JournalEntry,
) -> bool {
    let id = entry.id.clone();
    let label = format!("{} ({})", entry.common_name, entry.media_type);
    match journal.append(entry) {
        Ok(()) => {
            audit::record(paths, "append", "ok", &format!("{id} {label}"));
            report.detail(format!("saved entry id={id} key={}", journal.key()));
            true
        }
        Err(err) => {
            audit::record(paths, "append", "failed", &format!("{id}: {err}"));
            report.issue(format!("{}: {err}", err.code().as_str()));
            false
        }
    }
}

fn media_for(path: &Path, media_type: Option<MediaType>) -> Result<MediaFile, IngestError> {
    match media_type {
        Some(media_type) => Ok(MediaFile {
            path: path.to_path_buf(),
            media_type,
        }),
        None => MediaFile::from_path(path),
    }
}

pub fn run(response: &Path, media: &Path, media_type: Option<MediaType>) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let mut report = CommandReport::new("record");

    let media = match media_for(media, media_type) {
        Ok(media) => media,
        Err(err) => {
            report.issue(format!("{}: {err}", err.code().as_str()));
            return Ok(report);
        }
    };

    let raw = fs::read_to_string(response)
        .with_context(|| format!("failed to read {}", response.display()))?;
    let record = match SpeciesRecord::from_json_str(&raw) {
        Ok(record) => record,
        Err(err) => {
            report.issue(format!("{}: {err}", err.code().as_str()));
            return Ok(report);
        }
    };

    let entry = JournalEntry::from_record(&record, &media.media_url(), media.media_type, Utc::now());
    report.attach(&entry);
    let journal = open_journal(&paths, &cfg);
    save_entry(&mut report, &journal, &paths, entry);
    Ok(report)
}
