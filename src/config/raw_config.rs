use serde::Deserialize;

use super::Config;
use crate::domain::text::Thresholds;

/// On-disk shape of [`Config`]. Missing keys fall back to the defaults; the
/// result is validated when converted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub paused: bool,
    pub history_depth: usize,
    pub cooldown_ms: u64,
    pub fingerprint_ttl_ms: u64,
    pub recent_window_ms: u64,
    pub similarity_threshold: f64,
    pub thresholds: Thresholds,
}

impl Default for RawConfig {
    fn default() -> Self {
        let cfg = Config::default();
        Self {
            paused: cfg.paused,
            history_depth: cfg.history_depth,
            cooldown_ms: cfg.cooldown_ms,
            fingerprint_ttl_ms: cfg.fingerprint_ttl_ms,
            recent_window_ms: cfg.recent_window_ms,
            similarity_threshold: cfg.similarity_threshold,
            thresholds: cfg.thresholds,
        }
    }
}
