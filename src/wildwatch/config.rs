use crate::wildwatch::stats::DEFAULT_RECENT_WINDOW_DAYS;
use anyhow::{Result, anyhow};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_STORAGE_KEY: &str = "wildwatch_entries";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub base_url: String,
    #[serde(default = "default_image_path")]
    pub image_path: String,
    #[serde(default = "default_video_path")]
    pub video_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_image_path() -> String {
    "/upload".to_string()
}

fn default_video_path() -> String {
    "/upload-video".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            image_path: default_image_path(),
            video_path: default_video_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    pub storage_key: String,
    pub recent_window_days: u64,
    pub display_timezone: String,
    pub insights_top: usize,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
            display_timezone: "UTC".to_string(),
            insights_top: 5,
        }
    }
}

impl JournalConfig {
    pub fn timezone(&self) -> Result<Tz> {
        self.display_timezone
            .trim()
            .parse::<Tz>()
            .map_err(|err| anyhow!("invalid display timezone `{}`: {err}", self.display_timezone))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WildwatchConfig {
    pub classifier: ClassifierConfig,
    pub journal: JournalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialWildwatchConfig {
    classifier: Option<ClassifierConfig>,
    journal: Option<JournalConfig>,
}

fn env_or_u64(var: &str, fallback: u64) -> u64 {
    match env::var(var) {
        Ok(v) => v.trim().parse::<u64>().ok().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

fn env_or_usize(var: &str, fallback: usize) -> usize {
    match env::var(var) {
        Ok(v) => v.trim().parse::<usize>().ok().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn validate(cfg: &WildwatchConfig) -> Result<()> {
    let key = cfg.journal.storage_key.trim();
    if key.is_empty() {
        return Err(anyhow!("invalid storage key: cannot be empty"));
    }
    if !key
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || ch == '.')
        || key.starts_with('.')
    {
        return Err(anyhow!(
            "invalid storage key `{key}`: use letters, digits, `_`, `-` or `.`"
        ));
    }
    if cfg.journal.recent_window_days == 0 {
        return Err(anyhow!("invalid recent window: must be >= 1 day"));
    }
    if cfg.journal.insights_top == 0 {
        return Err(anyhow!("invalid insights top: must be >= 1"));
    }
    cfg.journal.timezone()?;

    let url = cfg.classifier.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(anyhow!(
            "invalid classifier url `{url}`: must start with http:// or https://"
        ));
    }
    if cfg.classifier.timeout_secs == 0 {
        return Err(anyhow!("invalid classifier timeout: must be >= 1 second"));
    }
    Ok(())
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("WILDWATCH_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    if let Ok(home) = env::var("WILDWATCH_HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed).join("wildwatch.toml"));
        }
    }

    let home = dirs::home_dir()?;
    Some(home.join(".wildwatch").join("wildwatch.toml"))
}

fn merge_toml(base: &mut WildwatchConfig, raw: &str) -> Result<()> {
    let parsed: PartialWildwatchConfig = toml::from_str(raw)?;
    if let Some(classifier) = parsed.classifier {
        base.classifier = classifier;
    }
    if let Some(journal) = parsed.journal {
        base.journal = journal;
    }
    Ok(())
}

fn merge_file_config(base: &mut WildwatchConfig) -> Result<()> {
    let Some(path) = resolve_config_path() else {
        return Ok(());
    };
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(&path)?;
    merge_toml(base, &raw)
        .map_err(|err| anyhow!("failed to parse wildwatch config {}: {err}", path.display()))
}

fn apply_env_overrides(cfg: &mut WildwatchConfig) {
    cfg.classifier.base_url = env_or_string("WILDWATCH_CLASSIFIER_URL", &cfg.classifier.base_url);
    cfg.classifier.timeout_secs = env_or_u64(
        "WILDWATCH_CLASSIFIER_TIMEOUT_SECS",
        cfg.classifier.timeout_secs,
    );
    cfg.journal.storage_key = env_or_string("WILDWATCH_STORAGE_KEY", &cfg.journal.storage_key);
    cfg.journal.recent_window_days = env_or_u64(
        "WILDWATCH_RECENT_WINDOW_DAYS",
        cfg.journal.recent_window_days,
    );
    cfg.journal.display_timezone =
        env_or_string("WILDWATCH_TIMEZONE", &cfg.journal.display_timezone);
    cfg.journal.insights_top = env_or_usize("WILDWATCH_INSIGHTS_TOP", cfg.journal.insights_top);
}

pub fn load_config() -> Result<WildwatchConfig> {
    let mut cfg = WildwatchConfig::default();
    merge_file_config(&mut cfg)?;
    apply_env_overrides(&mut cfg);
    validate(&cfg)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = WildwatchConfig::default();
        validate(&cfg).expect("defaults validate");
        assert_eq!(cfg.journal.storage_key, "wildwatch_entries");
        assert_eq!(cfg.journal.recent_window_days, 7);
    }

    #[test]
    fn toml_sections_are_optional_and_partial() {
        let mut cfg = WildwatchConfig::default();
        merge_toml(
            &mut cfg,
            "[journal]\ndisplay_timezone = \"Europe/Berlin\"\ninsights_top = 3\n",
        )
        .expect("merge");
        assert_eq!(cfg.journal.display_timezone, "Europe/Berlin");
        assert_eq!(cfg.journal.insights_top, 3);
        assert_eq!(cfg.journal.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(cfg.classifier.base_url, "http://localhost:8000");
    }

    #[test]
    fn classifier_section_fills_missing_paths() {
        let mut cfg = WildwatchConfig::default();
        merge_toml(&mut cfg, "[classifier]\nbase_url = \"https://species.example\"\n")
            .expect("merge");
        assert_eq!(cfg.classifier.image_path, "/upload");
        assert_eq!(cfg.classifier.video_path, "/upload-video");
        assert_eq!(cfg.classifier.timeout_secs, 120);
    }

    #[test]
    fn validate_rejects_path_like_storage_key() {
        let mut cfg = WildwatchConfig::default();
        cfg.journal.storage_key = "../escape".to_string();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn validate_rejects_unknown_timezone() {
        let mut cfg = WildwatchConfig::default();
        cfg.journal.display_timezone = "Mars/Olympus_Mons".to_string();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn validate_rejects_non_http_classifier() {
        let mut cfg = WildwatchConfig::default();
        cfg.classifier.base_url = "ftp://species.example".to_string();
        assert!(validate(&cfg).is_err());
    }
}
