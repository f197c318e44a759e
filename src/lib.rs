//! phpreqs - Declarative PHP environment requirements.
//!
//! A project states what it needs from PHP (runtime version, OS family,
//! functions, classes, ini settings) and phpreqs reports which of those the
//! current environment satisfies.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Requirements file loading and parsing
//! - [`error`] - Error types and result aliases
//! - [`probe`] - Queries against the PHP environment
//! - [`report`] - Human and JSON rendering of results
//! - [`requirements`] - Requirement declaration, comparison and evaluation
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use phpreqs::probe::StaticProbe;
//! use phpreqs::requirements::{Checker, OsFamily};
//!
//! let probe = StaticProbe::new()
//!     .with_version("7.4.33")
//!     .with_os(OsFamily::Unix)
//!     .with_ini("memory_limit", "128M");
//!
//! let mut checker = Checker::new(probe);
//! checker
//!     .require_php_version(">=8.1")
//!     .require_ini_values([("memory_limit", ">=64M")])
//!     .unwrap()
//!     .check();
//!
//! assert!(!checker.is_satisfied());
//! let failed = checker.unsatisfied();
//! assert_eq!(failed.len(), 1);
//! assert!(failed[0].reason.contains("7.4.33"));
//! ```
//!
//! To check against a real interpreter, use `Checker::default()`, which
//! probes `php` on PATH.

pub mod cli;
pub mod config;
pub mod error;
pub mod probe;
pub mod report;
pub mod requirements;
pub mod ui;

pub use error::{PhpReqsError, Result};
