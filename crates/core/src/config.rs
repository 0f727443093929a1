//! Session configuration.

use crate::types::{DEFAULT_WORD_SET, GRAVITY_MS, INITIAL_TIME_SECS};

/// Tunables fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Countdown length in seconds
    pub time_limit_secs: u32,
    /// Gravity period while a piece falls
    pub gravity_ms: u32,
    /// RNG seed for piece and word draws
    pub seed: u32,
    /// Word set selected at startup
    pub word_set: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: INITIAL_TIME_SECS,
            gravity_ms: GRAVITY_MS,
            seed: 1,
            word_set: DEFAULT_WORD_SET.to_string(),
        }
    }
}

impl SessionConfig {
    /// Read `TYPEFALL_TIME_LIMIT`, `TYPEFALL_GRAVITY_MS`, `TYPEFALL_SEED` and
    /// `TYPEFALL_WORD_SET`, keeping defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let time_limit_secs = env::var("TYPEFALL_TIME_LIMIT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&secs: &u32| secs > 0)
            .unwrap_or(defaults.time_limit_secs);

        let gravity_ms = env::var("TYPEFALL_GRAVITY_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(defaults.gravity_ms);

        let seed = env::var("TYPEFALL_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let word_set = env::var("TYPEFALL_WORD_SET")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) })
            .unwrap_or(defaults.word_set);

        Self {
            time_limit_secs,
            gravity_ms,
            seed,
            word_set,
        }
    }

    /// Same config with a different seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_word_set(mut self, name: impl Into<String>) -> Self {
        self.word_set = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.time_limit_secs, 100);
        assert_eq!(config.gravity_ms, 500);
        assert_eq!(config.word_set, "numbers");
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = SessionConfig::from_env();
    }

    #[test]
    fn test_builders() {
        let config = SessionConfig::default().with_seed(9).with_word_set("fruit");
        assert_eq!(config.seed, 9);
        assert_eq!(config.word_set, "fruit");
    }
}
