/// Centralized argument handling for Ziptos
///
/// Features:
/// - Centralized CMD_ARGS storage with thread-safe access
/// - Flag lookup helpers shared by the logger and startup code
/// - Help output for the main binary
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    arg_value_in(&get_cmd_args(), flag)
}

fn arg_value_in(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .filter(|value| !value.starts_with("--"))
        .cloned()
}

pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Config file path given with `--config <path>`
pub fn config_path_override() -> Option<PathBuf> {
    get_arg_value("--config").map(PathBuf::from)
}

pub fn print_help() {
    println!("Ziptos - Telegram bot for Solana token launches");
    println!();
    println!("USAGE:");
    println!("    ziptos [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --config <path>      Use a specific config.toml");
    println!("    --write-config       Write the effective configuration to the config file and exit");
    println!("    --verbose            Show every log level for every tag");
    println!("    --quiet              Only show errors");
    println!("    --no-file-log        Do not write the daily log file");
    println!("    --debug-<tag>        Debug output for one tag (e.g. --debug-telegram)");
    println!("    --debug-all          Debug output for every tag");
    println!("    --verbose-<tag>      Verbose output for one tag");
    println!("    --log-tags=<a,b>     Only show these tags (errors always shown)");
    println!("    -h, --help           Print this help");
    println!();
    println!("TAGS:");
    println!("    system, config, telegram, wallet, token, liquidity, database, rpc, upload");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_arg_value() {
        let list = args(&["ziptos", "--config", "/tmp/z.toml", "--verbose"]);
        assert_eq!(
            arg_value_in(&list, "--config"),
            Some("/tmp/z.toml".to_string())
        );
        assert_eq!(arg_value_in(&list, "--verbose"), None);
        assert_eq!(arg_value_in(&list, "--missing"), None);
    }

    #[test]
    fn test_flag_followed_by_flag_has_no_value() {
        let list = args(&["ziptos", "--config", "--quiet"]);
        assert_eq!(arg_value_in(&list, "--config"), None);
    }
}
