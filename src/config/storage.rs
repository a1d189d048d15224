//! Persistence for preferences in the user config directory.

use super::Preferences;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "GLMR_CONFIG";

/// Directory name under the platform config dir.
const APP_DIR: &str = "glmr";

/// Filename for preferences.
const CONFIG_FILE: &str = "config.toml";

/// Resolve the preferences file path.
///
/// `$GLMR_CONFIG` wins; otherwise `<config dir>/glmr/config.toml`.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| Error::Config("unable to determine config directory".to_string()))
}

/// Load preferences from disk.
///
/// Returns defaults if the file doesn't exist.
pub fn load_preferences(path: &Path) -> Result<Preferences> {
    if !path.exists() {
        return Ok(Preferences::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Save preferences to disk, creating the parent directory if needed.
pub fn save_preferences(path: &Path, prefs: &Preferences) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| Error::Config(format!("failed to create {}: {e}", dir.display())))?;
        }
    }

    let content = toml::to_string_pretty(prefs)
        .map_err(|e| Error::Config(format!("failed to serialize preferences: {e}")))?;

    let content_with_header = format!(
        "# glmr preferences\n# Tokens are stored in plain text; keep this file private\n\n{content}"
    );

    fs::write(path, content_with_header)
        .map_err(|e| Error::Config(format!("failed to write {}: {e}", path.display())))?;

    Ok(())
}
