/// Log tags identify the subsystem a message comes from
///
/// The debug key of a tag is the suffix of its `--debug-<key>` flag.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Telegram,
    Wallet,
    Token,
    Liquidity,
    Database,
    Rpc,
    Upload,
}

impl LogTag {
    pub const ALL: [LogTag; 9] = [
        LogTag::System,
        LogTag::Config,
        LogTag::Telegram,
        LogTag::Wallet,
        LogTag::Token,
        LogTag::Liquidity,
        LogTag::Database,
        LogTag::Rpc,
        LogTag::Upload,
    ];

    /// Key used by --debug-<key> / --verbose-<key> flags
    pub fn to_debug_key(&self) -> String {
        self.to_plain_string().to_lowercase()
    }

    /// Uncolored uppercase name, used in log files
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Telegram => "TELEGRAM",
            LogTag::Wallet => "WALLET",
            LogTag::Token => "TOKEN",
            LogTag::Liquidity => "LIQUIDITY",
            LogTag::Database => "DATABASE",
            LogTag::Rpc => "RPC",
            LogTag::Upload => "UPLOAD",
        }
        .to_string()
    }

    pub fn from_debug_key(key: &str) -> Option<LogTag> {
        LogTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.to_debug_key() == key.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_debug_key() {
        assert_eq!(LogTag::from_debug_key("Liquidity"), Some(LogTag::Liquidity));
        assert_eq!(LogTag::Rpc.to_debug_key(), "rpc");
        assert_eq!(LogTag::from_debug_key("trader"), None);
    }
}
