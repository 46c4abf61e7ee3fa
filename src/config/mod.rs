// src/config/mod.rs
//
// Application configuration
//
// Sources, later ones win:
// - defaults
// - {CONFIG_DIR}/cinehub/config.json (optional)
// - environment: TMDB_API_KEY, CINEHUB_LANGUAGE, CINEHUB_REGION, CINEHUB_DATABASE

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_REGION: &str = "US";

pub const ENV_API_KEY: &str = "TMDB_API_KEY";
pub const ENV_LANGUAGE: &str = "CINEHUB_LANGUAGE";
pub const ENV_REGION: &str = "CINEHUB_REGION";
pub const ENV_DATABASE: &str = "CINEHUB_DATABASE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    /// BCP 47 tag sent as `language` on every request
    pub language: String,
    /// ISO 3166-1 code used for watch providers and certifications
    pub region: String,
    pub database_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            region: DEFAULT_REGION.to_string(),
            database_path: None,
        }
    }
}

impl AppConfig {
    /// Default location of the config file
    pub fn config_path() -> AppResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AppError::Config("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("cinehub").join("config.json"))
    }

    /// Load from the default file location and the process environment
    pub fn load() -> AppResult<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn load_file(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    /// Apply environment-style overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_blank(ENV_API_KEY) {
            self.api_key = key;
        }
        if let Some(language) = non_blank(ENV_LANGUAGE) {
            self.language = language;
        }
        if let Some(region) = non_blank(ENV_REGION) {
            self.region = region;
        }
        if let Some(path) = non_blank(ENV_DATABASE) {
            self.database_path = Some(PathBuf::from(path));
        }
    }

    /// The API key is not checked here; local-only commands run without one.
    pub fn validate(&self) -> AppResult<()> {
        if self.language.trim().is_empty() {
            return Err(AppError::Config("Language cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Fail early for commands that talk to TMDB.
    pub fn require_api_key(&self) -> AppResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Config(format!(
                "TMDB API key is missing; set {} or add api_key to the config file",
                ENV_API_KEY
            )));
        }
        Ok(())
    }

    /// Image URL for a poster/backdrop/profile path.
    ///
    /// Common sizes: "w92", "w185", "w342", "w500", "w780", "original"
    pub fn image_url(&self, path: &str, size: &str) -> String {
        format!("{}/{}{}", self.image_base_url.trim_end_matches('/'), size, path)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Configured database file, or the per-user default.
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => crate::db::get_database_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Locale {
    language: String,
    region: String,
}

/// The one piece of global mutable state: the language/region sent to the API.
///
/// Shared by every repository; a change applies to the next request.
#[derive(Debug)]
pub struct LocalePreference {
    inner: RwLock<Locale>,
}

impl LocalePreference {
    pub fn new(language: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Locale {
                language: language.into(),
                region: region.into(),
            }),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.language.clone(), config.region.clone())
    }

    pub fn language(&self) -> String {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .language
            .clone()
    }

    pub fn region(&self) -> String {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .region
            .clone()
    }

    pub fn set_language(&self, language: impl Into<String>) {
        let language = language.into();
        log::info!("Switching catalog language to {}", language);
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .language = language;
    }

    pub fn set_region(&self, region: impl Into<String>) {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .region = region.into();
    }
}

impl Default for LocalePreference {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE, DEFAULT_REGION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_file(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.language, "en-US");
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_key": "from-file", "language": "pt-BR"}"#).unwrap();

        let mut config = AppConfig::load_file(&path).unwrap();
        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.region, "US");

        let env: HashMap<&str, &str> = [(ENV_API_KEY, "from-env"), (ENV_REGION, "BR")].into();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.language, "pt-BR");
        assert_eq!(config.region, "BR");
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let mut config = AppConfig {
            api_key: "kept".to_string(),
            ..AppConfig::default()
        };
        config.apply_overrides(|_| Some("   ".to_string()));
        assert_eq!(config.api_key, "kept");
    }

    #[test]
    fn test_missing_api_key_only_fails_when_required() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let err = config.require_api_key().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn test_blank_language_fails_validation() {
        let config = AppConfig {
            language: " ".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_image_url() {
        let config = AppConfig {
            image_base_url: "https://images.example/t/p/".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            config.image_url("/abc.jpg", "w500"),
            "https://images.example/t/p/w500/abc.jpg"
        );
        assert_eq!(
            AppConfig::default().image_url("/abc.jpg", "w92"),
            "https://image.tmdb.org/t/p/w92/abc.jpg"
        );
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(AppConfig::load_file(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            api_key: "k".to_string(),
            language: "de-DE".to_string(),
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_file(&path).unwrap(), config);
    }

    #[test]
    fn test_locale_preference_switch() {
        let locale = LocalePreference::default();
        assert_eq!(locale.language(), "en-US");
        locale.set_language("fr-FR");
        locale.set_region("FR");
        assert_eq!(locale.language(), "fr-FR");
        assert_eq!(locale.region(), "FR");
    }
}
