//! Game configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Every setting has a default, so an
//! empty environment yields the standard game.

use crate::domain::draw_pool::DEFAULT_MIN_PARTICIPANTS;
use crate::domain::validator::{DEFAULT_MAX_LEN, DEFAULT_MIN_LEN};
use crate::domain::{ExhaustionPolicy, PoolConfig, ValidatorConfig};
use crate::error::ConfigError;

/// `EnvFilter` directive used when `RUST_LOG` is unset.
///
/// The binary shares the terminal with the console, so per-operation
/// `info!` lines stay hidden unless asked for.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Top-level game configuration.
///
/// Loaded once at startup via [`GameConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Minimum name length, in characters.
    pub min_name_len: usize,

    /// Maximum name length, in characters.
    pub max_name_len: usize,

    /// Minimum roster size for a draw.
    pub min_participants: usize,

    /// Behavior when every participant has been drawn.
    pub exhaustion_policy: ExhaustionPolicy,

    /// Seed for reproducible draws.
    pub seed: Option<u64>,

    /// Terms blocked in addition to the built-in list.
    pub extra_blocklist: Vec<String>,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_name_len: DEFAULT_MIN_LEN,
            max_name_len: DEFAULT_MAX_LEN,
            min_participants: DEFAULT_MIN_PARTICIPANTS,
            exhaustion_policy: ExhaustionPolicy::Halt,
            seed: None,
            extra_blocklist: Vec::new(),
            event_bus_capacity: 256,
        }
    }
}

impl GameConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    /// Missing values use defaults; unparseable numbers fall back to the
    /// default with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `SECRET_FRIEND_EXHAUSTION_POLICY` is not
    /// `halt` or `restart`, if the name length bounds are inverted or zero,
    /// or if `SECRET_FRIEND_MIN_PARTICIPANTS` is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`GameConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let min_name_len = parse_or(&lookup, "SECRET_FRIEND_MIN_NAME_LEN", defaults.min_name_len);
        let max_name_len = parse_or(&lookup, "SECRET_FRIEND_MAX_NAME_LEN", defaults.max_name_len);
        if min_name_len == 0 || min_name_len > max_name_len {
            return Err(ConfigError::InvalidLengthRange {
                min: min_name_len,
                max: max_name_len,
            });
        }

        let min_participants = parse_or(
            &lookup,
            "SECRET_FRIEND_MIN_PARTICIPANTS",
            defaults.min_participants,
        );
        if min_participants == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SECRET_FRIEND_MIN_PARTICIPANTS".to_string(),
                value: "0".to_string(),
            });
        }

        let exhaustion_policy = match lookup("SECRET_FRIEND_EXHAUSTION_POLICY") {
            None => defaults.exhaustion_policy,
            Some(value) => parse_policy(&value).ok_or_else(|| ConfigError::InvalidValue {
                key: "SECRET_FRIEND_EXHAUSTION_POLICY".to_string(),
                value,
            })?,
        };

        let seed = lookup("SECRET_FRIEND_SEED").and_then(|v| match v.trim().parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                tracing::warn!(value = %v, "ignoring unparseable SECRET_FRIEND_SEED");
                None
            }
        });

        let extra_blocklist = lookup("SECRET_FRIEND_EXTRA_BLOCKLIST")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let event_bus_capacity =
            parse_or(&lookup, "EVENT_BUS_CAPACITY", defaults.event_bus_capacity);

        Ok(Self {
            min_name_len,
            max_name_len,
            min_participants,
            exhaustion_policy,
            seed,
            extra_blocklist,
            event_bus_capacity,
        })
    }

    /// Builds the validator rules described by this configuration.
    #[must_use]
    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig::default()
            .with_length_range(self.min_name_len, self.max_name_len)
            .with_blocked_terms(&self.extra_blocklist)
    }

    /// Builds the pool parameters described by this configuration.
    #[must_use]
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            validator: self.validator_config(),
            min_participants: Some(self.min_participants),
            exhaustion_policy: self.exhaustion_policy,
            seed: self.seed,
        }
    }
}

/// Parses `key` as `T`, returning `default` on missing or invalid values.
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return default;
    };
    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            tracing::warn!(key, value = %value, %default, "ignoring unparseable value");
            default
        }
    }
}

/// Accepts `halt` / `restart` (case-insensitive).
fn parse_policy(value: &str) -> Option<ExhaustionPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "halt" => Some(ExhaustionPolicy::Halt),
        "restart" => Some(ExhaustionPolicy::Restart),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<GameConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        GameConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let Ok(config) = load(&[]) else {
            panic!("defaults should load");
        };
        assert_eq!(config.min_name_len, 3);
        assert_eq!(config.max_name_len, 30);
        assert_eq!(config.min_participants, 2);
        assert_eq!(config.exhaustion_policy, ExhaustionPolicy::Halt);
        assert_eq!(config.seed, None);
        assert!(config.extra_blocklist.is_empty());
    }

    #[test]
    fn reads_overrides() {
        let Ok(config) = load(&[
            ("SECRET_FRIEND_MIN_NAME_LEN", "2"),
            ("SECRET_FRIEND_MAX_NAME_LEN", "20"),
            ("SECRET_FRIEND_MIN_PARTICIPANTS", "3"),
            ("SECRET_FRIEND_EXHAUSTION_POLICY", "Restart"),
            ("SECRET_FRIEND_SEED", "42"),
            ("SECRET_FRIEND_EXTRA_BLOCKLIST", "grinch, , scrooge"),
        ]) else {
            panic!("overrides should load");
        };
        assert_eq!(config.min_name_len, 2);
        assert_eq!(config.max_name_len, 20);
        assert_eq!(config.min_participants, 3);
        assert_eq!(config.exhaustion_policy, ExhaustionPolicy::Restart);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.extra_blocklist, vec!["grinch", "scrooge"]);

        let pool = config.pool_config();
        assert_eq!(pool.min_participants, Some(3));
        assert!(pool.validator.blocklist.contains(&"grinch".to_string()));
        assert_eq!(pool.validator.min_len, 2);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let Ok(config) = load(&[
            ("SECRET_FRIEND_MIN_PARTICIPANTS", "many"),
            ("SECRET_FRIEND_SEED", "abc"),
        ]) else {
            panic!("should fall back");
        };
        assert_eq!(config.min_participants, 2);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn zero_min_participants_is_an_error() {
        let result = load(&[("SECRET_FRIEND_MIN_PARTICIPANTS", "0")]);
        assert_eq!(
            result.err(),
            Some(ConfigError::InvalidValue {
                key: "SECRET_FRIEND_MIN_PARTICIPANTS".to_string(),
                value: "0".to_string(),
            })
        );
    }

    #[test]
    fn default_log_filter_parses() {
        assert!(
            tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok(),
            "default filter must be a valid directive"
        );
    }

    #[test]
    fn unknown_policy_is_an_error() {
        let result = load(&[("SECRET_FRIEND_EXHAUSTION_POLICY", "sometimes")]);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn inverted_length_range_is_an_error() {
        let result = load(&[
            ("SECRET_FRIEND_MIN_NAME_LEN", "10"),
            ("SECRET_FRIEND_MAX_NAME_LEN", "5"),
        ]);
        assert_eq!(
            result.err(),
            Some(ConfigError::InvalidLengthRange { min: 10, max: 5 })
        );
    }
}
