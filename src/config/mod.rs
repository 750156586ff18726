//! Configuration system for Ziptos
//!
//! - `macros`: the `config_struct!` macro (struct + defaults in one place)
//! - `schemas`: every configuration section
//! - `utils`: loading, environment overrides and global access

pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::*;
pub use utils::{load_config_from_path, with_config, write_config_template};
