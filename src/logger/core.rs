/// Core logging implementation with automatic filtering
///
/// This module contains the central logging logic that:
/// - Checks if a log should be displayed based on level and tag
/// - Delegates to the format module for formatting/writing
use super::config::{get_logger_config, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed under the active configuration
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    should_log_with(&get_logger_config(), tag, level)
}

/// Filtering rules:
/// 1. Errors are always shown
/// 2. Check against minimum log level threshold
/// 3. Debug level requires --debug-<module> flag for that tag
/// 4. Verbose level requires --verbose flag OR --verbose-<module> flag for that tag
/// 5. If enabled_tags is non-empty, tag must be in the set
pub fn should_log_with(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    let key = tag.to_debug_key();

    if level == LogLevel::Verbose {
        return config.min_level == LogLevel::Verbose || config.verbose_tags.contains(&key);
    }

    if level > config.min_level {
        return false;
    }

    if level == LogLevel::Debug
        && config.min_level != LogLevel::Verbose
        && !config.debug_tags.contains(&key)
        && !config.verbose_tags.contains(&key)
    {
        return false;
    }

    if !config.enabled_tags.is_empty() && !config.enabled_tags.contains(&key) {
        return false;
    }

    true
}

/// Internal logging function with automatic filtering
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(tag, level, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_always_logged() {
        let config = LoggerConfig {
            min_level: LogLevel::Error,
            ..Default::default()
        };
        assert!(should_log_with(&config, &LogTag::Rpc, LogLevel::Error));
        assert!(!should_log_with(&config, &LogTag::Rpc, LogLevel::Info));
    }

    #[test]
    fn test_debug_requires_tag_flag() {
        let mut config = LoggerConfig::default();
        assert!(should_log_with(&config, &LogTag::Wallet, LogLevel::Info));
        assert!(!should_log_with(&config, &LogTag::Wallet, LogLevel::Debug));

        config.debug_tags.insert("wallet".to_string());
        assert!(should_log_with(&config, &LogTag::Wallet, LogLevel::Debug));
        assert!(!should_log_with(&config, &LogTag::Token, LogLevel::Debug));
    }

    #[test]
    fn test_verbose_gating() {
        let mut config = LoggerConfig::default();
        assert!(!should_log_with(&config, &LogTag::Database, LogLevel::Verbose));

        config.verbose_tags.insert("database".to_string());
        assert!(should_log_with(&config, &LogTag::Database, LogLevel::Verbose));

        config.min_level = LogLevel::Verbose;
        assert!(should_log_with(&config, &LogTag::Upload, LogLevel::Verbose));
        assert!(should_log_with(&config, &LogTag::Upload, LogLevel::Debug));
    }

    #[test]
    fn test_enabled_tags_filter() {
        let mut config = LoggerConfig::default();
        config.enabled_tags.insert("token".to_string());
        assert!(should_log_with(&config, &LogTag::Token, LogLevel::Info));
        assert!(!should_log_with(&config, &LogTag::Telegram, LogLevel::Warning));
        assert!(should_log_with(&config, &LogTag::Telegram, LogLevel::Error));
    }
}
