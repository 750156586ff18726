/// Logger configuration derived from command-line flags
///
/// Recognized flags:
/// - `--verbose`            show every level for every tag
/// - `--quiet`              only errors
/// - `--debug-<tag>`        debug output for one tag (e.g. `--debug-telegram`)
/// - `--debug-all`          debug output for every tag
/// - `--verbose-<tag>`      verbose output for one tag
/// - `--no-file-log`        console only
///
/// Unknown tag names are ignored.
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Maximum level that is displayed
    pub min_level: LogLevel,
    /// Tags with debug output enabled
    pub debug_tags: HashSet<String>,
    /// Tags with verbose output enabled
    pub verbose_tags: HashSet<String>,
    /// When non-empty, only these tags are displayed (errors always are)
    pub enabled_tags: HashSet<String>,
    /// Mirror console output into the daily log file
    pub file_logging: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Debug,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
            file_logging: true,
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Get a copy of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_default()
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut guard) = LOGGER_CONFIG.write() {
        *guard = config;
    }
}

/// Build the configuration from the global command-line arguments
pub fn init_from_args() {
    let args = crate::arguments::get_cmd_args();
    set_logger_config(config_from_args(&args));
}

/// Build a logger configuration from an argument list
pub fn config_from_args(args: &[String]) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    for arg in args {
        match arg.as_str() {
            "--verbose" => config.min_level = LogLevel::Verbose,
            "--quiet" => config.min_level = LogLevel::Error,
            "--no-file-log" => config.file_logging = false,
            "--debug-all" => {
                for tag in LogTag::ALL {
                    config.debug_tags.insert(tag.to_debug_key());
                }
            }
            other => {
                if let Some(tag) = other.strip_prefix("--debug-").and_then(LogTag::from_debug_key) {
                    config.debug_tags.insert(tag.to_debug_key());
                } else if let Some(tag) =
                    other.strip_prefix("--verbose-").and_then(LogTag::from_debug_key)
                {
                    config.verbose_tags.insert(tag.to_debug_key());
                } else if let Some(list) = other.strip_prefix("--log-tags=") {
                    for tag in list.split(',').filter_map(|k| LogTag::from_debug_key(k.trim())) {
                        config.enabled_tags.insert(tag.to_debug_key());
                    }
                }
            }
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_debug_flags() {
        let config = config_from_args(&args(&["ziptos", "--debug-telegram", "--debug-RPC"]));
        assert!(config.debug_tags.contains("telegram"));
        assert!(config.debug_tags.contains("rpc"));
        assert_eq!(config.min_level, LogLevel::Debug);
    }

    #[test]
    fn test_unknown_tags_ignored() {
        let config = config_from_args(&args(&["--debug-trader", "--log-tags=wallet,nope"]));
        assert!(config.debug_tags.is_empty());
        assert_eq!(config.enabled_tags.len(), 1);
    }

    #[test]
    fn test_quiet_and_verbose() {
        assert_eq!(
            config_from_args(&args(&["--quiet"])).min_level,
            LogLevel::Error
        );
        assert_eq!(
            config_from_args(&args(&["--verbose"])).min_level,
            LogLevel::Verbose
        );
    }

    #[test]
    fn test_log_tags_filter() {
        let config = config_from_args(&args(&["--log-tags=wallet,token", "--no-file-log"]));
        assert_eq!(config.enabled_tags.len(), 2);
        assert!(!config.file_logging);
    }
}
