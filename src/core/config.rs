use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RatesConfig {
    pub bind: String,
    /// Freshly pushed rates. Preferred on every read.
    pub new_rates_file: PathBuf,
    /// Snapshot that updates are merged into.
    pub saved_rates_file: PathBuf,
}

impl Default for RatesConfig {
    fn default() -> Self {
        RatesConfig {
            bind: "0.0.0.0:8081".to_string(),
            new_rates_file: PathBuf::from("new_rates.json"),
            saved_rates_file: PathBuf::from("saved_rates.json"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GatewayConfig {
    pub bind: String,
    pub api_key: String,
    /// Skips the bearer check entirely. Meant for liveness probes.
    pub disable_auth: bool,
    pub rates_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            bind: "0.0.0.0:8080".to_string(),
            api_key: String::new(),
            disable_auth: false,
            rates_url: "http://rates:8081/rates".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub rates: RatesConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Reads the config file (if any) and then applies environment overrides.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present and built-in defaults otherwise.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::load_from_path(path)?,
            None => {
                let path = Self::default_config_path()?;
                if path.exists() {
                    Self::load_from_path(&path)?
                } else {
                    debug!("No config at {}, using defaults", path.display());
                    Self::default()
                }
            }
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxmicro", "fxmicro")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Replaces values with environment variables found through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(key) = var("API_KEY") {
            self.gateway.api_key = key;
        }
        if let Some(flag) = var("DISABLE_AUTH") {
            self.gateway.disable_auth =
                matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        if let Some(url) = var("RATES_SERVICE_URL") {
            self.gateway.rates_url = url;
        }
        if let Some(bind) = var("GATEWAY_BIND") {
            self.gateway.bind = bind;
        }
        if let Some(bind) = var("RATES_BIND") {
            self.rates.bind = bind;
        }
        if let Some(path) = var("NEW_RATES_FILE") {
            self.rates.new_rates_file = PathBuf::from(path);
        }
        if let Some(path) = var("SAVED_RATES_FILE") {
            self.rates.saved_rates_file = PathBuf::from(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
rates:
  bind: "127.0.0.1:9081"
  new_rates_file: "/var/lib/fx/new.json"
  saved_rates_file: "/var/lib/fx/saved.json"
gateway:
  api_key: "s3cret"
  rates_url: "http://localhost:9081/rates"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.rates.bind, "127.0.0.1:9081");
        assert_eq!(
            config.rates.new_rates_file,
            PathBuf::from("/var/lib/fx/new.json")
        );
        assert_eq!(
            config.rates.saved_rates_file,
            PathBuf::from("/var/lib/fx/saved.json")
        );
        assert_eq!(config.gateway.api_key, "s3cret");
        assert_eq!(config.gateway.rates_url, "http://localhost:9081/rates");
        // Not in the yaml, so defaults apply
        assert_eq!(config.gateway.bind, "0.0.0.0:8080");
        assert!(!config.gateway.disable_auth);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.gateway.rates_url, "http://rates:8081/rates");
        assert_eq!(
            config.rates.saved_rates_file,
            PathBuf::from("saved_rates.json")
        );
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("API_KEY", "from-env"),
            ("DISABLE_AUTH", "true"),
            ("RATES_SERVICE_URL", "http://rates.internal/rates"),
            ("SAVED_RATES_FILE", "/tmp/saved.json"),
            ("NEW_RATES_FILE", "  "),
        ]);
        let mut config = AppConfig::default();

        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.gateway.api_key, "from-env");
        assert!(config.gateway.disable_auth);
        assert_eq!(config.gateway.rates_url, "http://rates.internal/rates");
        assert_eq!(config.rates.saved_rates_file, PathBuf::from("/tmp/saved.json"));
        // Blank values are ignored
        assert_eq!(config.rates.new_rates_file, PathBuf::from("new_rates.json"));
    }

    #[test]
    fn test_disable_auth_accepts_common_spellings() {
        for (value, expected) in [("1", true), ("YES", true), ("on", true), ("false", false), ("0", false)] {
            let mut config = AppConfig::default();
            config.gateway.disable_auth = !expected;
            config.apply_overrides(|name| (name == "DISABLE_AUTH").then(|| value.to_string()));
            assert_eq!(config.gateway.disable_auth, expected, "DISABLE_AUTH={value}");
        }
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = AppConfig::load_from_path(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
