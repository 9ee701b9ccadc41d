// src/file/settings.rs
use super::FileHandler;
use crate::config::Settings;
use anyhow::{Result, Context};
use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_VAR: &str = "FAILWATCH_CONFIG";
const ENV_PREFIX: &str = "FAILWATCH";

/// Layers defaults, the RON settings file and `FAILWATCH_*` variables.
#[derive(Debug, Default)]
pub struct SettingsFileHandler {
    // Replaces the process environment when set
    env_override: Option<HashMap<String, String>>,
}

impl SettingsFileHandler {
    pub fn new() -> Self {
        Self { env_override: None }
    }

    #[cfg(test)]
    pub fn with_env(env: HashMap<String, String>) -> Self {
        Self { env_override: Some(env) }
    }

    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("failwatch").join("settings.ron"))
    }

    /// Never fails: a broken settings file is reported and ignored.
    pub fn load_or_default(&self, path: Option<&Path>) -> Settings {
        let Some(path) = path else {
            tracing::info!("No config directory available, using default settings");
            return Settings::default();
        };

        match self.load(path) {
            Ok(settings) => {
                tracing::info!("Loaded settings (file: {})", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("Ignoring settings at {}: {:#}", path.display(), e);
                Settings::default()
            }
        }
    }

    fn environment(&self) -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(self.env_override.clone())
    }
}

impl FileHandler<Settings> for SettingsFileHandler {
    fn load(&self, path: &Path) -> Result<Settings> {
        let defaults = Config::try_from(&Settings::default())
            .context("Failed to build default settings")?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Ron).required(false))
            .add_source(self.environment())
            .build()
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        config.try_deserialize().context("Failed to parse settings")
    }

    fn save(&self, data: &Settings, path: &Path) -> Result<()> {
        let content = ron::ser::to_string_pretty(
            data,
            ron::ser::PrettyConfig::new()
                .new_line("\n".to_string())
                .depth_limit(4)
        )?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn isolated() -> SettingsFileHandler {
        SettingsFileHandler::with_env(HashMap::new())
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = isolated().load(&dir.path().join("settings.ron")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(
            &path,
            r#"(
                server: (url: "http://analyzer.internal:8080", timeout_secs: 5),
                map: (zoom: 5),
            )"#,
        )
        .unwrap();

        let settings = isolated().load(&path).unwrap();
        assert_eq!(settings.server.url, "http://analyzer.internal:8080");
        assert_eq!(settings.server.timeout_secs, 5);
        assert_eq!(settings.server.field_name, "log_file");
        assert_eq!(settings.map.zoom, 5);
        assert_eq!(settings.map.center_lat, 47.0);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, r#"(server: (url: "http://from-file:5000"))"#).unwrap();

        let mut env = HashMap::new();
        env.insert("FAILWATCH_SERVER__URL".to_string(), "http://from-env:5000".to_string());
        env.insert("FAILWATCH_MAP__RESIZE_DELAY_MS".to_string(), "25".to_string());

        let settings = SettingsFileHandler::with_env(env).load(&path).unwrap();
        assert_eq!(settings.server.url, "http://from-env:5000");
        assert_eq!(settings.map.resize_delay_ms, 25);
    }

    #[test]
    fn test_saved_file_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.ron");

        let mut settings = Settings::default();
        settings.server.endpoint = "/v2/analyze".to_string();
        isolated().save(&settings, &path).unwrap();

        assert_eq!(isolated().load(&path).unwrap(), settings);
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, "(server: (timeout_secs: \"soon\"").unwrap();

        assert_eq!(isolated().load_or_default(Some(&path)), Settings::default());
    }
}
