use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::backends::{BackendOptions, BackendRegistry, DEFAULT_BACKEND};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "SCENEGRAPH_CONFIG";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "scenegraph.toml";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Annotation backend selection
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Construction options handed to the backend factory
    #[serde(default)]
    pub options: BackendOptions,
}

/// Word list location
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LexiconConfig {
    /// Directory holding scene-nouns.txt, phrasal-verbs.txt and phrasal-preps.txt.
    /// The built-in lists are used when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Graph cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Number of parsed sentences kept; 0 (the default) disables caching
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            parser: ParserConfig::default(),
            lexicon: LexiconConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            options: BackendOptions::new(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}

fn default_cache_capacity() -> usize {
    0
}

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) first.
    /// Looks for config file in this order:
    /// 1. Path specified in SCENEGRAPH_CONFIG environment variable (must exist)
    /// 2. ./scenegraph.toml in current directory
    ///
    /// Falls back to defaults when neither is present.
    pub fn load() -> Result<Self> {
        // .env is optional
        let _ = dotenv::dotenv();

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load_from(&local);
        }

        log::debug!("No configuration file found, using defaults");
        let config = Config::default();
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a specific configuration file
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&config_str)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let registry = BackendRegistry::new();
        if !registry.contains(&self.parser.backend) {
            anyhow::bail!(
                "Unknown parser.backend {:?}; available: {}",
                self.parser.backend,
                registry.identifiers().collect::<Vec<_>>().join(", ")
            );
        }

        self.log_level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid log_level: {:?}", self.log_level))?;

        if let Some(dir) = &self.lexicon.data_dir {
            if !dir.is_dir() {
                anyhow::bail!(
                    "lexicon.data_dir must be an existing directory: {}",
                    dir.display()
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide cwd and env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    /// Restores cwd when dropped (e.g. on panic).
    struct CwdGuard(PathBuf);
    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.0);
        }
    }

    fn with_config_env(config_path: Option<&Path>, f: impl FnOnce()) {
        let original = std::env::var(CONFIG_ENV).ok();
        match config_path {
            Some(path) => std::env::set_var(CONFIG_ENV, path),
            None => std::env::remove_var(CONFIG_ENV),
        }
        f();
        std::env::remove_var(CONFIG_ENV);
        if let Some(val) = original {
            std::env::set_var(CONFIG_ENV, val);
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.parser.backend, "spacy");
        assert!(config.parser.options.is_empty());
        assert!(config.lexicon.data_dir.is_none());
        assert_eq!(config.cache.capacity, 0);
    }

    #[test]
    fn test_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().to_str().unwrap().replace('\\', "\\\\");
        let config = Config::from_toml(&format!(
            r#"
log_level = "debug"

[parser]
backend = "conllu"

[parser.options]
path = "treebank.conllu"

[lexicon]
data_dir = "{}"

[cache]
capacity = 32
"#,
            data_dir
        ))
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.parser.backend, "conllu");
        assert_eq!(config.parser.options.get("path"), Some("treebank.conllu"));
        assert_eq!(config.lexicon.data_dir.as_deref(), Some(temp_dir.path()));
        assert_eq!(config.cache.capacity, 32);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let err = Config::from_toml("[parser]\nbackend = \"stanza\"\n").unwrap_err();
        assert!(format!("{:#}", err).contains("stanza"));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        assert!(Config::from_toml("log_level = \"loud\"\n").is_err());
    }

    #[test]
    fn test_missing_data_dir_rejected() {
        let err = Config::from_toml("[lexicon]\ndata_dir = \"/nonexistent/lexicon\"\n").unwrap_err();
        assert!(err.to_string().contains("data_dir"));
    }

    #[test]
    fn test_config_load_from_env_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.toml");
        fs::write(&config_path, "log_level = \"warn\"\n[parser]\nbackend = \"conllu\"\n").unwrap();
        let _cwd = CwdGuard(std::env::current_dir().unwrap());
        std::env::set_current_dir(temp_dir.path()).unwrap();

        with_config_env(Some(&config_path), || {
            let config = Config::load();
            assert!(config.is_ok(), "Config::load() failed: {:?}", config.err());
            let config = config.unwrap();
            assert_eq!(config.log_level, "warn");
            assert_eq!(config.parser.backend, "conllu");
        });
    }

    #[test]
    fn test_config_load_local_file() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILE), "[cache]\ncapacity = 8\n").unwrap();
        let _cwd = CwdGuard(std::env::current_dir().unwrap());
        std::env::set_current_dir(temp_dir.path()).unwrap();

        with_config_env(None, || {
            let config = Config::load().unwrap();
            assert_eq!(config.cache.capacity, 8);
        });
    }

    #[test]
    fn test_config_load_defaults_without_file() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let _cwd = CwdGuard(std::env::current_dir().unwrap());
        std::env::set_current_dir(temp_dir.path()).unwrap();

        with_config_env(None, || {
            let config = Config::load().unwrap();
            assert_eq!(config.parser.backend, DEFAULT_BACKEND);
        });
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        with_config_env(Some(Path::new("nonexistent.toml")), || {
            assert!(Config::load().is_err());
        });
    }
}
