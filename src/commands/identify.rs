use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;

use crate::classifier::http::HttpClassifier;
use crate::classifier::{Classifier, MediaFile};
use crate::commands::record::save_entry;
use crate::commands::show::describe_record;
use crate::commands::{CommandReport, open_journal};
use crate::wildwatch::config::load_config;
use crate::wildwatch::entry::JournalEntry;
use crate::wildwatch::journal::JournalStore;
use crate::wildwatch::paths::{WildwatchPaths, resolve_paths};
use crate::wildwatch::storage::Storage;

pub struct IdentifyOptions {
    pub files: Vec<PathBuf>,
    pub save: bool,
}

/// Submit each file in turn. Unsupported or unreadable files are skipped;
/// the first classifier failure stops the run.
pub fn identify_with<C: Classifier, S: Storage>(
    classifier: &C,
    journal: &JournalStore<S>,
    paths: &WildwatchPaths,
    opts: &IdentifyOptions,
) -> CommandReport {
    let mut report = CommandReport::new("identify");
    let mut views = Vec::new();

    for path in &opts.files {
        let media = match MediaFile::from_path(path) {
            Ok(media) => media,
            Err(err) => {
                report.issue(format!("{}: {err}; skipped", err.code().as_str()));
                continue;
            }
        };

        if let Err(err) = media.ensure_readable() {
            report.issue(format!("{}: {err}; skipped", err.code().as_str()));
            continue;
        }

        let record = match classifier.submit(&media) {
            Ok(record) => record,
            Err(err) => {
                report.issue(format!(
                    "{}: {} failed: {err}",
                    err.code().as_str(),
                    media.path.display()
                ));
                break;
            }
        };

        report.detail(format!(
            "identified {} ({})",
            media.path.display(),
            media.media_type.upload_label()
        ));
        views.push(describe_record(&mut report, &record));

        if opts.save {
            let entry =
                JournalEntry::from_record(&record, &media.media_url(), media.media_type, Utc::now());
            save_entry(&mut report, journal, paths, entry);
        }
    }

    report.attach(views);
    report
}

pub fn run(opts: &IdentifyOptions) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let classifier = HttpClassifier::new(&cfg.classifier)?;
    let journal = open_journal(&paths, &cfg);
    Ok(identify_with(&classifier, &journal, &paths, opts))
}
