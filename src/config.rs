//! Runtime configuration for the terminal binary.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::TICK_MS;

/// Settings read from `BLOCKFALL_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Piece source seed
    pub seed: u64,
    /// Frame tick in milliseconds
    pub tick_ms: u32,
    pub mouse: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: time_seed(),
            tick_ms: TICK_MS,
            mouse: true,
        }
    }
}

impl AppConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Malformed values keep the default and print
    /// a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("BLOCKFALL_SEED") {
            match raw.trim().parse::<u64>() {
                Ok(seed) => config.seed = seed,
                Err(_) => eprintln!("[Config] ignoring BLOCKFALL_SEED={:?}: not a u64", raw),
            }
        }

        if let Some(raw) = lookup("BLOCKFALL_TICK_MS") {
            match raw.trim().parse::<u32>() {
                Ok(ms) => config.tick_ms = ms.clamp(1, 1000),
                Err(_) => eprintln!("[Config] ignoring BLOCKFALL_TICK_MS={:?}: not a number", raw),
            }
        }

        if let Some(raw) = lookup("BLOCKFALL_NO_MOUSE") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.mouse = false,
                "" | "0" | "false" | "no" => {}
                _ => eprintln!("[Config] ignoring BLOCKFALL_NO_MOUSE={:?}", raw),
            }
        }

        config
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        let config = config_from(&[]);
        assert_eq!(config.tick_ms, TICK_MS);
        assert!(config.mouse);
    }

    #[test]
    fn test_reads_all_keys() {
        let config = config_from(&[
            ("BLOCKFALL_SEED", "42"),
            ("BLOCKFALL_TICK_MS", "33"),
            ("BLOCKFALL_NO_MOUSE", "1"),
        ]);
        assert_eq!(config.seed, 42);
        assert_eq!(config.tick_ms, 33);
        assert!(!config.mouse);
    }

    #[test]
    fn test_tick_is_clamped() {
        assert_eq!(config_from(&[("BLOCKFALL_TICK_MS", "0")]).tick_ms, 1);
        assert_eq!(config_from(&[("BLOCKFALL_TICK_MS", "60000")]).tick_ms, 1000);
    }

    #[test]
    fn test_malformed_values_keep_defaults() {
        let config = config_from(&[
            ("BLOCKFALL_TICK_MS", "fast"),
            ("BLOCKFALL_NO_MOUSE", "maybe"),
        ]);
        assert_eq!(config.tick_ms, TICK_MS);
        assert!(config.mouse);
    }

    #[test]
    fn test_seed_is_trimmed() {
        assert_eq!(config_from(&[("BLOCKFALL_SEED", " 7 ")]).seed, 7);
    }
}
