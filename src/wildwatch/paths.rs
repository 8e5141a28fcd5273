use anyhow::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct WildwatchPaths {
    pub wildwatch_home: PathBuf,
    pub storage_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl WildwatchPaths {
    pub fn audit_log(&self) -> PathBuf {
        self.logs_dir.join("audit.log")
    }
}

fn required_home_dir() -> Result<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        return Ok(home);
    }
    Err(anyhow::anyhow!("HOME directory could not be resolved"))
}

fn env_or_default_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

pub fn resolve_paths() -> Result<WildwatchPaths> {
    let wildwatch_home = match env::var("WILDWATCH_HOME") {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => required_home_dir()?.join(".wildwatch"),
    };

    let storage_dir = env_or_default_path("WILDWATCH_STORAGE_DIR", wildwatch_home.join("journal"));
    let logs_dir = env_or_default_path("WILDWATCH_LOGS_DIR", wildwatch_home.join("logs"));

    Ok(WildwatchPaths {
        wildwatch_home,
        storage_dir,
        logs_dir,
    })
}
