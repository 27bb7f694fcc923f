use anyhow::{Context, Result, anyhow, ensure};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

pub const ENV_API_KEY: &str = "OPENWEATHER_API_KEY";
pub const ENV_ENDPOINT: &str = "OPENWEATHER_ENDPOINT";
pub const ENV_BIND: &str = "WEATHER_BIND";

/// Process-wide settings, loaded once at startup.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 10
/// bind = "0.0.0.0:8000"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// OpenWeather credential. Absence is not validated here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Current-weather endpoint of the provider.
    pub endpoint: String,

    /// Upper bound for a single provider call.
    pub timeout_secs: u64,

    /// Address the HTTP server listens on.
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Config {
    /// Load config from `path`, then apply environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let cfg = Self::read_file(path)?;
        Ok(cfg.with_env_overrides(|name| std::env::var(name).ok()))
    }

    /// Read the TOML file only, or return defaults if it doesn't exist yet.
    pub fn read_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// A zero timeout would fail every provider call.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.timeout_secs > 0, "timeout_secs must be greater than 0");
        Ok(())
    }

    /// Overlay values from the environment. `lookup` is `std::env::var` in production.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint;
        }
        if let Some(bind) = lookup(ENV_BIND).filter(|v| !v.trim().is_empty()) {
            self.bind = bind;
        }
        self
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-web")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// API key, or an empty string when none is configured.
    pub fn api_key_or_empty(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_provider_contract() {
        let cfg = Config::default();

        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.bind, "127.0.0.1:8000");
        assert!(!cfg.has_api_key());
        assert_eq!(cfg.api_key_or_empty(), "");
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let cfg: Config = toml::from_str("api_key = \"FILE_KEY\"\ntimeout_secs = 3\n").unwrap();

        assert_eq!(cfg.api_key.as_deref(), Some("FILE_KEY"));
        assert_eq!(cfg.timeout_secs, 3);
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn env_overrides_file_values() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Config::default()
        }
        .with_env_overrides(env(&[
            (ENV_API_KEY, "ENV_KEY"),
            (ENV_BIND, "0.0.0.0:9000"),
        ]));

        assert_eq!(cfg.api_key.as_deref(), Some("ENV_KEY"));
        assert_eq!(cfg.bind, "0.0.0.0:9000");
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn blank_endpoint_override_is_ignored() {
        let cfg = Config::default().with_env_overrides(env(&[(ENV_ENDPOINT, "  ")]));
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn blank_api_key_is_not_considered_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());
        assert!(!cfg.has_api_key());

        cfg.set_api_key("KEY".into());
        assert!(cfg.has_api_key());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("weather-core-does-not-exist/config.toml");
        let cfg = Config::read_file(&path).expect("missing file is not an error");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_read_file() {
        let dir = std::env::temp_dir().join(format!("weather-core-cfg-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("SAVED".into());
        cfg.save_to(&path).expect("save should succeed");

        let loaded = Config::read_file(&path).expect("read should succeed");
        assert_eq!(loaded, cfg);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let dir = std::env::temp_dir().join(format!("weather-core-zero-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "timeout_secs = 0\n").unwrap();

        let err = Config::read_file(&path).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Invalid config file"));
        assert!(msg.contains("timeout_secs must be greater than 0"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn default_timeout_passes_validation() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = std::env::temp_dir().join(format!("weather-core-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "timeout_secs = \"soon\"").unwrap();

        let err = Config::read_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));

        let _ = fs::remove_dir_all(&dir);
    }
}
