mod config_validator;
pub mod raw_config;

use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

pub use raw_config::RawConfig;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{correction::fingerprint::FingerprintPolicy, domain::text::Thresholds};

const APP_NAME: &str = "layout-fixer";
const CONFIG_NAME: &str = "config";
const CONFIG_ENV: &str = "LAYOUT_FIXER_CONFIG";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Config {
    /// Preference store flag: every entry point short-circuits while set.
    pub paused: bool,
    pub history_depth: usize,
    pub cooldown_ms: u64,
    pub fingerprint_ttl_ms: u64,
    pub recent_window_ms: u64,
    pub similarity_threshold: f64,
    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paused: false,
            history_depth: 10,
            cooldown_ms: 2_000,
            fingerprint_ttl_ms: 30_000,
            recent_window_ms: 5_000,
            similarity_threshold: 0.8,
            thresholds: Thresholds::default(),
        }
    }
}

impl Config {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn fingerprint_policy(&self) -> FingerprintPolicy {
        FingerprintPolicy {
            ttl: Duration::from_millis(self.fingerprint_ttl_ms),
            recent_window: Duration::from_millis(self.recent_window_ms),
            similarity_threshold: self.similarity_threshold,
        }
    }
}

pub fn config_path() -> io::Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(confy_err)
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    std::fs::create_dir_all(dir)
}

fn confy_err(e: confy::ConfyError) -> io::Error {
    io::Error::other(e)
}

pub fn load() -> io::Result<Config> {
    load_from(&config_path()?)
}

/// Reads the config at `path`, writing the defaults there first if it is missing.
pub fn load_from(path: &Path) -> io::Result<Config> {
    ensure_parent_dir(path)?;
    confy::load_path(path).map_err(|e| match e {
        confy::ConfyError::BadTomlData(_) => io::Error::new(io::ErrorKind::InvalidData, e),
        other => confy_err(other),
    })
}

pub fn save(cfg: &Config) -> io::Result<()> {
    save_to(&config_path()?, cfg)
}

pub fn save_to(path: &Path, cfg: &Config) -> io::Result<()> {
    cfg.validate()
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    ensure_parent_dir(path)?;
    confy::store_path(path, cfg).map_err(confy_err)
}

impl TryFrom<RawConfig> for Config {
    type Error = String;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let cfg = Self {
            paused: raw.paused,
            history_depth: raw.history_depth,
            cooldown_ms: raw.cooldown_ms,
            fingerprint_ttl_ms: raw.fingerprint_ttl_ms,
            recent_window_ms: raw.recent_window_ms,
            similarity_threshold: raw.similarity_threshold,
            thresholds: raw.thresholds,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawConfig::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}
