use crate::wildwatch::conservation::Badge;
use crate::wildwatch::entry::JournalEntry;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const NO_SPECIES_YET: &str = "None yet";
pub const VARIOUS_HABITATS: &str = "Various habitats";
pub const DEFAULT_RECENT_WINDOW_DAYS: u64 = 7;
const MAX_RECENT_WINDOW_DAYS: i64 = 365_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    pub total_identifications: usize,
    pub unique_species: usize,
    pub most_spotted_species: String,
    pub recent_activity: usize,
    pub favorite_habitat: String,
    pub conservation_impact: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalInsights {
    pub species_distribution: Vec<RankedCount>,
    pub habitat_exploration: Vec<RankedCount>,
    pub conservation_impact: usize,
}

/// Occurrence counts in first-encountered order.
fn tally<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<RankedCount> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<RankedCount> = Vec::new();
    for label in labels {
        match index.get(label) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(label, counts.len());
                counts.push(RankedCount {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts
}

/// Highest count; on a tie the label seen first wins.
fn most_frequent<'a>(labels: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut best: Option<RankedCount> = None;
    for candidate in tally(labels) {
        match &best {
            Some(current) if candidate.count <= current.count => {}
            _ => best = Some(candidate),
        }
    }
    best.map(|b| b.label)
}

/// Counts sorted descending; the sort is stable so ties keep first-seen order.
fn ranked<'a>(labels: impl Iterator<Item = &'a str>, top: usize) -> Vec<RankedCount> {
    let mut counts = tally(labels);
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top);
    counts
}

fn conservation_impact(entries: &[JournalEntry]) -> usize {
    entries
        .iter()
        .filter(|e| Badge::classify(&e.conservation_status).is_at_risk())
        .count()
}

/// Aggregates over the journal; `recent_activity` counts entries strictly
/// newer than `now - recent_window_days`.
pub fn compute(
    entries: &[JournalEntry],
    now: DateTime<Utc>,
    recent_window_days: u64,
) -> JournalStats {
    let days = i64::try_from(recent_window_days)
        .unwrap_or(i64::MAX)
        .min(MAX_RECENT_WINDOW_DAYS);
    let window_start = now.checked_sub_signed(Duration::days(days));

    let unique_species = entries
        .iter()
        .map(|e| e.species_name.as_str())
        .collect::<HashSet<_>>()
        .len();

    JournalStats {
        total_identifications: entries.len(),
        unique_species,
        most_spotted_species: most_frequent(entries.iter().map(|e| e.common_name.as_str()))
            .unwrap_or_else(|| NO_SPECIES_YET.to_string()),
        recent_activity: entries
            .iter()
            .filter(|e| window_start.is_none_or(|start| e.timestamp > start))
            .count(),
        favorite_habitat: most_frequent(entries.iter().map(|e| e.habitat.as_str()))
            .unwrap_or_else(|| VARIOUS_HABITATS.to_string()),
        conservation_impact: conservation_impact(entries),
    }
}

pub fn insights(entries: &[JournalEntry], top: usize) -> JournalInsights {
    JournalInsights {
        species_distribution: ranked(entries.iter().map(|e| e.common_name.as_str()), top),
        habitat_exploration: ranked(entries.iter().map(|e| e.habitat.as_str()), top),
        conservation_impact: conservation_impact(entries),
    }
}
