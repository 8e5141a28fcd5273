use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::commands::CommandReport;
use crate::wildwatch::conservation::Badge;
use crate::wildwatch::entry::DEFAULT_CONSERVATION_STATUS;
use crate::wildwatch::food_chain::{FoodChainStage, stages_for};
use crate::wildwatch::links::{ExtractedLink, extract_links};
use crate::wildwatch::normalize::normalize;
use crate::wildwatch::record::{Hotspot, SpeciesRecord};

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub label: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    pub species_name: String,
    pub common_name: String,
    pub conservation_status: String,
    pub badge: Badge,
    pub sections: Vec<Section>,
    pub food_chain: Vec<FoodChainStage>,
    pub links: Vec<ExtractedLink>,
    pub hotspots: Vec<Hotspot>,
}

pub fn record_view(record: &SpeciesRecord) -> RecordView {
    let labelled = [
        ("Description", &record.description),
        ("Habitat", &record.habitat),
        ("Food Chain", &record.food_chain),
        ("Conservation Efforts", &record.conservation_efforts),
        ("How to Help", &record.how_to_help),
        ("Behavior Analysis", &record.behavior_analysis),
        ("Mood Analysis", &record.mood_analysis),
    ];
    let sections: Vec<Section> = labelled
        .into_iter()
        .filter_map(|(label, value)| {
            let text = normalize(value.as_ref()?).trim().to_string();
            (!text.is_empty()).then_some(Section { label, text })
        })
        .collect();

    let conservation_status = record
        .conservation_status
        .as_ref()
        .map(|v| normalize(v).trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| DEFAULT_CONSERVATION_STATUS.to_string());

    let conservation_text = sections
        .iter()
        .filter(|s| matches!(s.label, "Conservation Efforts" | "How to Help"))
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    RecordView {
        species_name: record.species_name.clone(),
        common_name: record.common_name.clone(),
        badge: Badge::classify(&conservation_status),
        conservation_status,
        sections,
        food_chain: stages_for(record.food_chain.as_ref()),
        links: extract_links(&conservation_text),
        hotspots: record.hotspots.clone(),
    }
}

/// Add the human-readable rendering of `record` to `report`.
pub fn describe_record(report: &mut CommandReport, record: &SpeciesRecord) -> RecordView {
    let view = record_view(record);

    report.detail(format!("{} ({})", view.common_name, view.species_name));
    report.detail(format!(
        "conservation_status={} badge={}",
        view.conservation_status, view.badge
    ));
    for section in &view.sections {
        report.detail(format!("{}:\n{}", section.label, section.text));
    }
    if view.food_chain.len() > 1 {
        let chain = view
            .food_chain
            .iter()
            .map(|stage| format!("{} ({})", stage.name, stage.role))
            .collect::<Vec<_>>()
            .join(" -> ");
        report.detail(format!("food_chain_roles: {chain}"));
    }
    for link in &view.links {
        report.detail(format!("link: {} <{}>", link.domain, link.url));
    }
    for spot in &view.hotspots {
        report.detail(format!(
            "hotspot: {} [{}] lat={:.4} lon={:.4} population={} status={}",
            spot.name, spot.region, spot.latitude, spot.longitude, spot.population_status,
            spot.conservation_status
        ));
        if !spot.description.is_empty() {
            report.detail(format!("  {}", spot.description));
        }
    }
    view
}

pub fn run(response: &Path) -> Result<CommandReport> {
    let mut report = CommandReport::new("show");
    let raw = fs::read_to_string(response)
        .with_context(|| format!("failed to read {}", response.display()))?;

    match SpeciesRecord::from_json_str(&raw) {
        Ok(record) => {
            let view = describe_record(&mut report, &record);
            report.attach(view);
        }
        Err(err) => report.issue(format!("{}: {err}", err.code().as_str())),
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lion() -> SpeciesRecord {
        SpeciesRecord::from_value(&json!({
            "Species Name": "Panthera leo",
            "Common Name": "Lion",
            "Description": "Large social cat.",
            "Habitat": {"Geographic Regions": ["Serengeti", "Kruger"]},
            "Food Chain": "Grass -> Zebra -> Lion -> Bacteria",
            "How to Help": [{"Action": "Donate", "Link": "https://lionrecovery.org/give", "Description": "Fund rangers"}],
            "Conservation Status": "Vulnerable",
            "Habitat Hotspots": [
                {"Name": "Serengeti", "Region": "Tanzania", "Latitude": -2.33, "Longitude": 34.83},
                {"Name": "Nowhere", "Latitude": 200, "Longitude": 0}
            ]
        }))
        .expect("record")
    }

    #[test]
    fn view_collects_sections_roles_links_and_hotspots() {
        let view = record_view(&lion());
        assert_eq!(view.badge, Badge::Vulnerable);
        assert_eq!(
            view.sections.iter().map(|s| s.label).collect::<Vec<_>>(),
            vec!["Description", "Habitat", "Food Chain", "How to Help"]
        );
        assert_eq!(view.food_chain.len(), 4);
        assert_eq!(view.food_chain[0].role, "Producer");
        assert_eq!(view.food_chain[3].role, "Decomposer");
        assert_eq!(view.links.len(), 1);
        assert_eq!(view.links[0].domain, "lionrecovery.org");
        assert_eq!(view.hotspots.len(), 1);
        assert_eq!(view.hotspots[0].name, "Serengeti");
    }

    #[test]
    fn missing_status_shows_stable() {
        let record = SpeciesRecord::from_value(&json!({"Common Name": "Pigeon"})).expect("record");
        let view = record_view(&record);
        assert_eq!(view.conservation_status, "Stable");
        assert_eq!(view.badge, Badge::Stable);
        assert!(view.sections.is_empty());
    }

    #[test]
    fn describe_writes_details() {
        let mut report = CommandReport::new("show");
        describe_record(&mut report, &lion());
        assert!(report.ok);
        assert_eq!(report.details[0], "Lion (Panthera leo)");
        assert!(
            report
                .details
                .iter()
                .any(|d| d.starts_with("food_chain_roles: Grass (Producer) -> Zebra (Primary Consumer)"))
        );
        assert!(report.details.iter().any(|d| d.starts_with("hotspot: Serengeti [Tanzania]")));
    }
}
