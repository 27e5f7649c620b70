use std::fmt::Write as _;

use crate::config::Config;

const MAX_HISTORY_DEPTH: usize = 100;
const MAX_COOLDOWN_MS: u64 = 60_000;

fn is_ratio(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

pub fn find_invalid_settings(config: &Config) -> Option<String> {
    let t = &config.thresholds;
    let ratios = [
        ("similarity_threshold", config.similarity_threshold),
        ("thresholds.wrong_ratio", t.wrong_ratio),
        ("thresholds.max_mixed_ratio", t.max_mixed_ratio),
        ("thresholds.max_valid_ratio", t.max_valid_ratio),
        ("thresholds.mostly_valid_ratio", t.mostly_valid_ratio),
        ("thresholds.selective_wrong_ratio", t.selective_wrong_ratio),
        ("thresholds.selective_scale", t.selective_scale),
    ];

    let mut problems: Vec<String> = ratios
        .iter()
        .filter(|(_, v)| !is_ratio(*v))
        .map(|(name, v)| format!("'{name}' must be within 0..=1 (got {v})"))
        .collect();

    if config.history_depth == 0 || config.history_depth > MAX_HISTORY_DEPTH {
        problems.push(format!(
            "'history_depth' must be within 1..={MAX_HISTORY_DEPTH} (got {})",
            config.history_depth
        ));
    }
    if config.cooldown_ms > MAX_COOLDOWN_MS {
        problems.push(format!(
            "'cooldown_ms' must not exceed {MAX_COOLDOWN_MS} (got {})",
            config.cooldown_ms
        ));
    }
    if config.recent_window_ms > config.fingerprint_ttl_ms {
        problems.push("'recent_window_ms' must not exceed 'fingerprint_ttl_ms'".to_owned());
    }
    if t.min_words == 0 {
        problems.push("'thresholds.min_words' must be at least 1".to_owned());
    }
    if t.selective_limit == 0 {
        problems.push("'thresholds.selective_limit' must be at least 1".to_owned());
    }
    if t.selective_wrong_ratio > t.wrong_ratio {
        problems.push(
            "'thresholds.selective_wrong_ratio' must not exceed 'thresholds.wrong_ratio'".to_owned(),
        );
    }

    if problems.is_empty() {
        return None;
    }
    let mut error = String::from("Invalid settings found:\n\n");
    for problem in &problems {
        // `String` implements `fmt::Write` infallibly.
        let _ = writeln!(error, "• {problem}");
    }
    Some(error)
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        match find_invalid_settings(self) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
