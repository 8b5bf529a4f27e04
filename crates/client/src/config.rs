//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

use quiz_runtime::SessionSettings;

/// Terminal client configuration.
///
/// Gameplay preferences end up in [`SessionSettings`]; the rest configures
/// where the client writes logs and results.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub results_file: Option<PathBuf>,
    pub settings: SessionSettings,
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `NEWQUIZ_HARD_MODE` - `true`/`1` enables hard mode
    /// - `NEWQUIZ_ROW_LIMIT` - rows per word-guess game (default: 6)
    /// - `NEWQUIZ_WORD_COUNTDOWN_SECS` - per-row countdown, disabled when unset
    /// - `NEWQUIZ_SESSION_ID` - log directory name (default: timestamp)
    /// - `NEWQUIZ_LOG_DIR` - log root (default: platform cache dir)
    /// - `NEWQUIZ_RESULTS_FILE` - JSON-lines result log (default: in memory)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(hard_mode) = read_flag(&lookup, "NEWQUIZ_HARD_MODE") {
            config.settings.hard_mode = hard_mode;
        }
        config.settings.row_limit = read_env::<usize>(&lookup, "NEWQUIZ_ROW_LIMIT");
        config.settings.word_countdown_ms = read_env::<u64>(&lookup, "NEWQUIZ_WORD_COUNTDOWN_SECS")
            .filter(|secs| *secs > 0)
            .map(|secs| secs.saturating_mul(1000));

        config.session_id = lookup("NEWQUIZ_SESSION_ID").filter(|id| !id.is_empty());
        config.log_dir = lookup("NEWQUIZ_LOG_DIR").map(PathBuf::from);
        config.results_file = lookup("NEWQUIZ_RESULTS_FILE").map(PathBuf::from);

        config
    }
}

fn read_env<T>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

fn read_flag(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    match lookup(key)?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let config = config(&[]);
        assert!(!config.settings.hard_mode);
        assert_eq!(config.settings.row_limit, None);
        assert_eq!(config.settings.word_countdown_ms, None);
        assert!(config.results_file.is_none());
    }

    #[test]
    fn reads_gameplay_settings() {
        let config = config(&[
            ("NEWQUIZ_HARD_MODE", "yes"),
            ("NEWQUIZ_ROW_LIMIT", "4"),
            ("NEWQUIZ_WORD_COUNTDOWN_SECS", "45"),
            ("NEWQUIZ_RESULTS_FILE", "/tmp/results.jsonl"),
        ]);
        assert!(config.settings.hard_mode);
        assert_eq!(config.settings.row_limit, Some(4));
        assert_eq!(config.settings.word_countdown_ms, Some(45_000));
        assert_eq!(
            config.results_file,
            Some(PathBuf::from("/tmp/results.jsonl"))
        );
    }

    #[test]
    fn ignores_unparsable_values() {
        let config = config(&[
            ("NEWQUIZ_HARD_MODE", "maybe"),
            ("NEWQUIZ_ROW_LIMIT", "lots"),
            ("NEWQUIZ_WORD_COUNTDOWN_SECS", "0"),
        ]);
        assert!(!config.settings.hard_mode);
        assert_eq!(config.settings.row_limit, None);
        assert_eq!(config.settings.word_countdown_ms, None);
    }
}
