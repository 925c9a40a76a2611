//! Environment configuration, read once at startup.

use coldstore_inventory::LotSequence;
use coldstore_observability::LogFormat;

use crate::error::AppError;

pub const FIRST_LOT_VAR: &str = "COLDSTORE_FIRST_LOT";
pub const LOG_FORMAT_VAR: &str = "COLDSTORE_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Sequence number given to the first stock entry of the session.
    pub first_lot: u64,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            first_lot: LotSequence::FIRST,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(FIRST_LOT_VAR) {
            config.first_lot = match raw.trim().parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(AppError::Config(format!(
                        "{FIRST_LOT_VAR} must be a positive integer (got {raw:?})"
                    )));
                }
            };
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = raw
                .parse()
                .map_err(|e| AppError::Config(format!("{LOG_FORMAT_VAR}: {e}")))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.first_lot, 1);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn reads_both_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            (FIRST_LOT_VAR, " 250 "),
            (LOG_FORMAT_VAR, "pretty"),
        ]))
        .unwrap();
        assert_eq!(config.first_lot, 250);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_zero_and_garbage_first_lot() {
        for bad in ["0", "-3", "ten"] {
            let err = AppConfig::from_lookup(lookup(&[(FIRST_LOT_VAR, bad)])).unwrap_err();
            assert_eq!(err.code(), "config_error");
        }
    }

    #[test]
    fn rejects_unknown_log_format() {
        let err = AppConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
