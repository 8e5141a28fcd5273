use crate::wildwatch::normalize::{normalize, normalize_value};
use crate::wildwatch::record::SpeciesRecord;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

pub const UNKNOWN_HABITAT: &str = "Unknown habitat";
pub const DEFAULT_CONSERVATION_STATUS: &str = "Stable";

const ID_SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff", "heic", "heif", "avif",
];
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "m4v", "avi", "mkv", "webm", "mpg", "mpeg", "3gp", "wmv",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Classify a file by extension; anything else is not submitted.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    pub fn upload_label(self) -> &'static str {
        match self {
            Self::Image => "Image Upload",
            Self::Video => "Video Upload",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(format!("unknown media type `{other}`; use `image` or `video`")),
        }
    }
}

/// One recorded identification. Entries are never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredEntry")]
pub struct JournalEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub species_name: String,
    pub common_name: String,
    pub media_url: String,
    pub media_type: MediaType,
    pub habitat: String,
    pub conservation_status: String,
}

/// On-disk shape, including what older browser journals wrote.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    id: String,
    timestamp: DateTime<Utc>,
    // The browser app dropped a name key when the classifier left it out.
    #[serde(default)]
    species_name: String,
    #[serde(default)]
    common_name: String,
    #[serde(alias = "imageUrl", alias = "videoUrl")]
    media_url: String,
    #[serde(alias = "type")]
    media_type: MediaType,
    #[serde(
        default = "default_habitat",
        deserialize_with = "deserialize_habitat"
    )]
    habitat: String,
    #[serde(default = "default_conservation_status")]
    conservation_status: String,
}

impl From<StoredEntry> for JournalEntry {
    fn from(stored: StoredEntry) -> Self {
        let mut species_name = stored.species_name.trim().to_string();
        let mut common_name = stored.common_name.trim().to_string();
        if species_name.is_empty() {
            species_name = common_name.clone();
        }
        if common_name.is_empty() {
            common_name = species_name.clone();
        }
        Self {
            id: stored.id,
            timestamp: stored.timestamp,
            species_name,
            common_name,
            media_url: stored.media_url,
            media_type: stored.media_type,
            habitat: stored.habitat,
            conservation_status: stored.conservation_status,
        }
    }
}

fn default_habitat() -> String {
    UNKNOWN_HABITAT.to_string()
}

fn default_conservation_status() -> String {
    DEFAULT_CONSERVATION_STATUS.to_string()
}

// Older journals stored the classifier's habitat field as-is, objects included.
fn deserialize_habitat<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let text = normalize_value(&raw);
    if text.trim().is_empty() {
        Ok(default_habitat())
    } else {
        Ok(text)
    }
}

pub fn generate_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_SUFFIX_ALPHABET[rng.random_range(0..ID_SUFFIX_ALPHABET.len())] as char)
        .collect();
    format!("{}{suffix}", now.timestamp_millis())
}

impl JournalEntry {
    pub fn from_record(
        record: &SpeciesRecord,
        media_url: &str,
        media_type: MediaType,
        now: DateTime<Utc>,
    ) -> Self {
        let habitat = record
            .habitat
            .as_ref()
            .map(normalize)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(default_habitat);
        let conservation_status = record
            .conservation_status
            .as_ref()
            .map(normalize)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(default_conservation_status);

        Self {
            id: generate_id(now),
            timestamp: now,
            species_name: record.species_name.clone(),
            common_name: record.common_name.clone(),
            media_url: media_url.to_string(),
            media_type,
            habitat,
            conservation_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn generated_ids_carry_millis_prefix_and_random_suffix() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let a = generate_id(now);
        let b = generate_id(now);
        let prefix = now.timestamp_millis().to_string();
        assert!(a.starts_with(&prefix));
        assert_eq!(a.len(), prefix.len() + ID_SUFFIX_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn media_type_follows_extension() {
        assert_eq!(MediaType::from_path(Path::new("lion.JPG")), Some(MediaType::Image));
        assert_eq!(MediaType::from_path(Path::new("herd.mp4")), Some(MediaType::Video));
        assert_eq!(MediaType::from_path(Path::new("notes.txt")), None);
        assert_eq!(MediaType::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn from_record_flattens_habitat_and_defaults_status() {
        let record = SpeciesRecord::from_value(&json!({
            "Species Name": "Panthera leo",
            "Common Name": "Lion",
            "Habitat": {"Geographic Regions": "Savanna", "Biomes": "Grassland"}
        }))
        .expect("record");
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let entry = JournalEntry::from_record(&record, "/media/lion.jpg", MediaType::Image, now);

        assert_eq!(entry.habitat, "Geographic Regions: Savanna\n\nBiomes: Grassland");
        assert_eq!(entry.conservation_status, "Stable");
        assert_eq!(entry.timestamp, now);
        assert_eq!(entry.media_type, MediaType::Image);
    }

    #[test]
    fn from_record_without_habitat_uses_unknown() {
        let record =
            SpeciesRecord::from_value(&json!({"Species Name": "Vulpes vulpes"})).expect("record");
        let entry = JournalEntry::from_record(&record, "fox.mp4", MediaType::Video, Utc::now());
        assert_eq!(entry.habitat, UNKNOWN_HABITAT);
    }

    #[test]
    fn serializes_camel_case_with_iso_timestamp() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let entry = JournalEntry {
            id: "1".to_string(),
            timestamp: now,
            species_name: "Panthera leo".to_string(),
            common_name: "Lion".to_string(),
            media_url: "lion.jpg".to_string(),
            media_type: MediaType::Image,
            habitat: "Savanna".to_string(),
            conservation_status: "Vulnerable".to_string(),
        };
        let value = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(value["speciesName"], "Panthera leo");
        assert_eq!(value["mediaType"], "image");
        assert!(
            value["timestamp"]
                .as_str()
                .expect("timestamp string")
                .starts_with("2026-03-01T12:00:00")
        );
    }

    #[test]
    fn loads_browser_journal_shape() {
        let raw = json!({
            "id": "1719000000000abc123xyz",
            "timestamp": "2024-06-21T20:00:00.000Z",
            "speciesName": "Loxodonta africana",
            "commonName": "African elephant",
            "videoUrl": "blob:http://localhost/abc",
            "habitat": {"Geographic Regions": "East Africa"},
            "type": "video"
        });
        let entry: JournalEntry = serde_json::from_value(raw).expect("legacy entry");
        assert_eq!(entry.media_url, "blob:http://localhost/abc");
        assert_eq!(entry.media_type, MediaType::Video);
        assert_eq!(entry.habitat, "Geographic Regions: East Africa");
        assert_eq!(entry.conservation_status, "Stable");
    }

    #[test]
    fn browser_entry_without_one_name_borrows_the_other() {
        let raw = json!([
            {
                "id": "1719000000000abc123xyz",
                "timestamp": "2024-06-21T20:00:00.000Z",
                "speciesName": "Loxodonta africana",
                "commonName": "African elephant",
                "imageUrl": "blob:http://localhost/a",
                "type": "image"
            },
            {
                "id": "1719000000001def456uvw",
                "timestamp": "2024-06-21T21:00:00.000Z",
                "commonName": "Red fox",
                "imageUrl": "blob:http://localhost/b",
                "type": "image"
            }
        ]);
        let entries: Vec<JournalEntry> = serde_json::from_value(raw).expect("legacy journal");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].species_name, "Red fox");
        assert_eq!(entries[1].common_name, "Red fox");
        assert_eq!(entries[1].habitat, UNKNOWN_HABITAT);
    }
}
