use crate::filesystem::store::DEFAULT_BACKUPS;
use crate::offline::CACHE_VERSION;
use crate::vault::codec::CodecKind;
use crate::vault::generator::{GenOptions, DEFAULT_LENGTH};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Shape of `config.toml`; every key is optional.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub data_dir: Option<String>,
    pub codec: Option<CodecKind>,
    pub backups: Option<usize>,
    pub assets_dir: Option<String>,
    pub cache_dir: Option<String>,
    pub cache_version: Option<String>,
    // Generator defaults (optional)
    pub generator_length: Option<usize>,
    pub generator_uppercase: Option<bool>,
    pub generator_numbers: Option<bool>,
    pub generator_symbols: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub codec: CodecKind,
    pub backups: usize,
    pub assets_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub cache_version: String,
    pub generator: GenOptions,
}

impl Config {
    /// Resolve settings: CLI flag > environment > config file > default.
    pub fn create(data_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let file_cfg = load_file_config();

        let data_dir = data_dir
            .or_else(|| env::var("PWA_VAULT_DATA_DIR").ok().map(PathBuf::from))
            .or_else(|| file_cfg.data_dir.as_ref().map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        let codec = match env::var("PWA_VAULT_CODEC") {
            Ok(raw) => raw
                .parse::<CodecKind>()
                .map_err(|reason| ConfigError::InvalidValue { key: "PWA_VAULT_CODEC", reason })?,
            Err(_) => file_cfg.codec.unwrap_or_default(),
        };

        let backups = env::var("PWA_VAULT_BACKUPS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .or(file_cfg.backups)
            .unwrap_or(DEFAULT_BACKUPS);

        let assets_dir = env::var("PWA_VAULT_ASSETS_DIR")
            .ok()
            .or(file_cfg.assets_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("web"));

        let cache_dir = env::var("PWA_VAULT_CACHE_DIR")
            .ok()
            .or(file_cfg.cache_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("offline-cache"));

        let cache_version = env::var("PWA_VAULT_CACHE_VERSION")
            .ok()
            .or(file_cfg.cache_version)
            .unwrap_or_else(|| CACHE_VERSION.to_string());
        if cache_version.is_empty() || cache_version.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                key: "cache_version",
                reason: format!("\"{cache_version}\" is not a valid cache name"),
            });
        }

        let generator = GenOptions {
            length: env::var("PWA_VAULT_GEN_LENGTH")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .or(file_cfg.generator_length)
                .unwrap_or(DEFAULT_LENGTH),
            include_uppercase: file_cfg.generator_uppercase.unwrap_or(false),
            include_numbers: file_cfg.generator_numbers.unwrap_or(false),
            include_symbols: file_cfg.generator_symbols.unwrap_or(false),
        };

        Ok(Config {
            data_dir,
            codec,
            backups,
            assets_dir,
            cache_dir,
            cache_version,
            generator,
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("pwa-vault.log")
    }
}

fn load_file_config() -> FileConfig {
    let (_, cfg) = load_file_config_with_path();
    cfg
}

pub fn config_file_path() -> PathBuf {
    // Allow tests/users to override config dir via PWA_VAULT_CONFIG_DIR; else use platform default
    let cfg_dir = if let Ok(p) = env::var("PWA_VAULT_CONFIG_DIR") {
        PathBuf::from(p)
    } else {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from("."))
    };
    cfg_dir.join("pwa-vault").join("config.toml")
}

pub fn load_file_config_with_path() -> (PathBuf, FileConfig) {
    let path = config_file_path();
    let cfg = match std::fs::read_to_string(&path) {
        Ok(s) => toml::from_str::<FileConfig>(&s).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
            FileConfig::default()
        }),
        Err(_) => FileConfig::default(),
    };
    (path, cfg)
}

fn default_data_dir() -> PathBuf {
    if let Some(mut p) = dirs::data_dir() {
        p.push("pwa-vault");
        return p;
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(&home).join(".pwa-vault")
}
