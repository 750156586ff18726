use ziptos::{
    arguments::{is_help_requested, print_help},
    logger::{self, LogTag},
};

/// Main entry point for Ziptos
#[tokio::main]
async fn main() {
    // Ensure all directories exist BEFORE logger initialization
    // (Logger needs logs directory to create log files)
    if let Err(e) = ziptos::paths::ensure_all_directories() {
        eprintln!("❌ Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    logger::init();

    if is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    let result = ziptos::run::run_bot().await;
    if let Err(e) = &result {
        logger::error(LogTag::System, &format!("❌ Ziptos failed: {:#}", e));
    }
    logger::flush();

    if result.is_err() {
        std::process::exit(1);
    }
}
