use anyhow::Result;
use chrono_tz::Tz;

use crate::commands::{CommandReport, open_journal};
use crate::wildwatch::config::load_config;
use crate::wildwatch::conservation::Badge;
use crate::wildwatch::entry::JournalEntry;
use crate::wildwatch::paths::resolve_paths;
use crate::wildwatch::util::truncate_with_ellipsis;

const HABITAT_PREVIEW_CHARS: usize = 60;

pub fn entry_line(entry: &JournalEntry, tz: Tz) -> String {
    format!(
        "{} | {} ({}) | {} | {} | habitat: {} | id={}",
        entry.timestamp.with_timezone(&tz).format("%Y-%m-%d %H:%M %Z"),
        entry.common_name,
        entry.species_name,
        Badge::classify(&entry.conservation_status),
        entry.media_type.upload_label(),
        truncate_with_ellipsis(&entry.habitat, HABITAT_PREVIEW_CHARS),
        entry.id,
    )
}

pub fn run() -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let tz = cfg.journal.timezone()?;
    let mut report = CommandReport::new("journal");

    let entries = open_journal(&paths, &cfg).newest_first();
    if entries.is_empty() {
        report.detail("no identifications yet");
    }
    for entry in &entries {
        report.detail(entry_line(entry, tz));
    }
    report.attach(&entries);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wildwatch::entry::MediaType;
    use chrono::{TimeZone, Utc};

    #[test]
    fn entry_line_uses_display_timezone_and_badge() {
        let entry = JournalEntry {
            id: "1760000000000abcdefghi".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 23, 30, 0).unwrap(),
            species_name: "Panthera leo".to_string(),
            common_name: "Lion".to_string(),
            media_url: "/tmp/lion.jpg".to_string(),
            media_type: MediaType::Image,
            habitat: "Open savanna\nand grassland".to_string(),
            conservation_status: "Vulnerable (IUCN)".to_string(),
        };
        let tz: Tz = "Europe/Berlin".parse().expect("tz");
        let line = entry_line(&entry, tz);
        assert!(line.starts_with("2026-03-02 00:30 CET | Lion (Panthera leo) | Vulnerable"));
        assert!(line.contains("Image Upload"));
        assert!(line.contains("habitat: Open savanna and grassland"));
    }
}
