use std::env;
use std::path::PathBuf;

fn fallback_dotenv_path(
    wildwatch_home: Option<PathBuf>,
    home_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    let base = wildwatch_home.or_else(|| home_dir.map(|home| home.join(".wildwatch")))?;
    Some(base.join(".env"))
}

pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let fallback = fallback_dotenv_path(
        env::var_os("WILDWATCH_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from),
        dirs::home_dir(),
    );

    let Some(path) = fallback else {
        return;
    };
    if path.is_file() {
        let _ = dotenvy::from_path(&path);
    }
}
