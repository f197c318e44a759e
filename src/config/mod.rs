//! Requirements file loading and parsing.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//!
//! # Example
//!
//! ```
//! use phpreqs::config::load_merged_config;
//! use phpreqs::probe::StaticProbe;
//! use phpreqs::requirements::{Checker, OsFamily};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("phpreqs.yml"), "os: unix\nfunctions: [sprintf]").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! let probe = StaticProbe::new()
//!     .with_os(OsFamily::Unix)
//!     .with_functions(["sprintf"]);
//! let mut checker = Checker::new(probe);
//! config.register(&mut checker).unwrap();
//! assert!(checker.check().is_satisfied());
//! ```

pub mod loader;
pub mod merger;
pub mod schema;

pub use loader::{
    load_config, load_config_file, load_config_value, load_merged_config, parse_config,
    ConfigPaths, CONFIG_FILE, LOCAL_CONFIG_FILE,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{PhpSettings, RequirementsConfig};
