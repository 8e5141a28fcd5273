use crate::error::IngestError;
use crate::wildwatch::normalize::{FieldValue, normalize};
use serde::Serialize;
use serde_json::Value;

/// Texts the classification service sends in place of a missing section.
const PLACEHOLDER_TEXTS: &[&str] = &[
    "No habitat information available.",
    "No food chain information available.",
    "No conservation information available.",
    "No behavior analysis available.",
    "No mood analysis available.",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    pub name: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub population_status: String,
    pub conservation_status: String,
}

#[derive(Debug, Clone, Default)]
pub struct SpeciesRecord {
    pub species_name: String,
    pub common_name: String,
    pub description: Option<FieldValue>,
    pub habitat: Option<FieldValue>,
    pub food_chain: Option<FieldValue>,
    pub conservation_efforts: Option<FieldValue>,
    pub how_to_help: Option<FieldValue>,
    pub behavior_analysis: Option<FieldValue>,
    pub mood_analysis: Option<FieldValue>,
    pub conservation_status: Option<FieldValue>,
    pub hotspots: Vec<Hotspot>,
}

fn field<'a>(obj: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.iter()
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

fn is_placeholder(value: &FieldValue) -> bool {
    value
        .as_text()
        .map(str::trim)
        .is_some_and(|text| PLACEHOLDER_TEXTS.iter().any(|p| p.eq_ignore_ascii_case(text)))
}

fn section(obj: &serde_json::Map<String, Value>, key: &str) -> Option<FieldValue> {
    let raw = field(obj, key)?;
    let value = FieldValue::decode(raw);
    if value.is_blank() || is_placeholder(&value) {
        return None;
    }
    Some(value)
}

fn name(obj: &serde_json::Map<String, Value>, key: &str) -> String {
    section(obj, key)
        .map(|v| normalize(&v).trim().to_string())
        .unwrap_or_default()
}

fn coordinate(item: &FieldValue, key: &str) -> Option<f64> {
    item.get(key)?.as_text()?.trim().parse::<f64>().ok()
}

fn text_of(item: &FieldValue, key: &str) -> String {
    item.get(key)
        .map(|v| normalize(v).trim().to_string())
        .unwrap_or_default()
}

fn decode_hotspot(item: &FieldValue) -> Option<Hotspot> {
    let latitude = coordinate(item, "latitude")?;
    let longitude = coordinate(item, "longitude")?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }
    Some(Hotspot {
        name: text_of(item, "name"),
        region: text_of(item, "region"),
        latitude,
        longitude,
        description: text_of(item, "description"),
        population_status: text_of(item, "population status"),
        conservation_status: text_of(item, "conservation status"),
    })
}

impl SpeciesRecord {
    pub fn from_json_str(raw: &str) -> Result<Self, IngestError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|err| IngestError::MalformedResponse(format!("invalid JSON: {err}")))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, IngestError> {
        let Some(obj) = value.as_object() else {
            return Err(IngestError::MalformedResponse(
                "expected a JSON object".to_string(),
            ));
        };

        let mut species_name = name(obj, "Species Name");
        let mut common_name = name(obj, "Common Name");
        if species_name.is_empty() && common_name.is_empty() {
            return Err(IngestError::MalformedResponse(
                "record has neither `Species Name` nor `Common Name`".to_string(),
            ));
        }
        if species_name.is_empty() {
            species_name = common_name.clone();
        }
        if common_name.is_empty() {
            common_name = species_name.clone();
        }

        let hotspots = match field(obj, "Habitat Hotspots").map(FieldValue::decode) {
            Some(FieldValue::List(items)) => items.iter().filter_map(decode_hotspot).collect(),
            _ => Vec::new(),
        };

        Ok(Self {
            species_name,
            common_name,
            description: section(obj, "Description"),
            habitat: section(obj, "Habitat"),
            food_chain: section(obj, "Food Chain"),
            conservation_efforts: section(obj, "Conservation Efforts"),
            how_to_help: section(obj, "How to Help"),
            behavior_analysis: section(obj, "Behavior Analysis"),
            mood_analysis: section(obj, "Mood Analysis"),
            conservation_status: section(obj, "Conservation Status"),
            hotspots,
        })
    }
}
