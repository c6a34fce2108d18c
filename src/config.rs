//! Configuration: built-in defaults merged with TOML files and environment

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::model::{COMMENTARY_EDITION, DEFAULT_BASE_URL, DEFAULT_RECITER_ID};

const APP_DIR: &str = "mushaf-tui";
const PROJECT_CONFIG_FILE: &str = "mushaf.toml";
const ENV_PREFIX: &str = "MUSHAF_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub commentary_edition: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            commentary_edition: COMMENTARY_EDITION.to_string(),
            timeout_secs: 15,
        }
    }
}

/// External player used for recitation audio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub player: String,
    pub args: Vec<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            player: "mpv".to_string(),
            args: vec!["--no-video".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub default_reciter: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_reciter: DEFAULT_RECITER_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub audio: AudioConfig,
    pub ui: UiConfig,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. `MUSHAF_*` environment variables (`MUSHAF_API__BASE_URL`, ...)
    /// 2. Explicit config path (if provided)
    /// 3. Project file `./mushaf.toml`
    /// 4. Global file `$XDG_CONFIG_HOME/mushaf-tui/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
        let figment = Self::file_figment(
            Self::global_config_path().as_deref(),
            Some(Path::new(PROJECT_CONFIG_FILE)),
            config_path,
        )?
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().context("invalid configuration")
    }

    /// Defaults only (for `--no-config`)
    pub fn load_defaults() -> AppConfig {
        AppConfig::default()
    }

    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    fn file_figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Merging config file");
                figment = figment.merge(Toml::file(path));
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment)
    }

    #[cfg(test)]
    fn load_files(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Result<AppConfig> {
        Self::file_figment(global, project, explicit)?
            .extract()
            .context("invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.api.base_url, "http://api.alquran.cloud");
        assert_eq!(config.api.commentary_edition, "ar.muyassar");
        assert_eq!(config.ui.default_reciter, "ar.alafasy");
        assert_eq!(config.audio.player, "mpv");
    }

    #[test]
    fn test_global_config_path_contains_app_dir() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains(APP_DIR));
        }
    }

    #[test]
    fn test_project_file_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("mushaf.toml");
        fs::write(&global, "[api]\ntimeout_secs = 30\nbase_url = \"http://global\"\n").unwrap();
        fs::write(&project, "[api]\nbase_url = \"http://project\"\n").unwrap();

        let config = ConfigLoader::load_files(Some(&global), Some(&project), None).unwrap();
        assert_eq!(config.api.base_url, "http://project");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.commentary_edition, "ar.muyassar");
    }

    #[test]
    fn test_explicit_file_has_highest_file_priority() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("mushaf.toml");
        let explicit = dir.path().join("custom.toml");
        fs::write(&project, "[audio]\nplayer = \"vlc\"\n").unwrap();
        fs::write(&explicit, "[audio]\nplayer = \"ffplay\"\nargs = [\"-nodisp\", \"-autoexit\"]\n").unwrap();

        let config = ConfigLoader::load_files(None, Some(&project), Some(&explicit)).unwrap();
        assert_eq!(config.audio.player, "ffplay");
        assert_eq!(config.audio.args, vec!["-nodisp", "-autoexit"]);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ConfigLoader::load_files(None, None, Some(&missing)).is_err());
    }

    #[test]
    fn test_missing_optional_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let config = ConfigLoader::load_files(Some(&missing), Some(&missing), None).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[api]\ntimeout_secs = \"soon\"\n").unwrap();
        assert!(ConfigLoader::load_files(None, None, Some(&bad)).is_err());
    }
}
