//! Live probe backed by a PHP interpreter.
//!
//! Each query runs `<binary> -r '<snippet>'` and reads stdout. The
//! interpreter is started per query, so answers always reflect the
//! environment at the moment the evaluator asks.
//!
//! Anything that goes wrong (binary missing, non-zero exit, output that
//! does not parse) is logged at `warn` and answered as absent. Use
//! [`PhpProbe::verify`] when a hard error is wanted instead.
//!
//! # Example
//!
//! ```no_run
//! use phpreqs::probe::{PhpProbe, PlatformProbe};
//!
//! let probe = PhpProbe::new("/usr/bin/php8.2");
//! if let Some(version) = probe.current_version() {
//!     println!("PHP {}", version);
//! }
//! ```

use super::{IniValue, PlatformProbe};
use crate::error::{PhpReqsError, Result};
use crate::requirements::OsFamily;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Interpreter looked up on PATH when none is configured.
pub const DEFAULT_BINARY: &str = "php";

/// Probe that queries a PHP interpreter.
#[derive(Debug, Clone)]
pub struct PhpProbe {
    binary: PathBuf,
}

impl Default for PhpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY)
    }
}

/// Quote a string as a single-quoted PHP literal.
pub fn php_string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

impl PhpProbe {
    /// Create a probe for the given interpreter path or command name.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// The interpreter this probe runs.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Confirm the interpreter runs, returning its version.
    pub fn verify(&self) -> Result<String> {
        let version = self.run_snippet("echo PHP_VERSION;")?;
        let version = version.trim();
        if version.is_empty() {
            return Err(PhpReqsError::ProbeFailed {
                query: "PHP_VERSION".to_string(),
                message: "interpreter printed no version".to_string(),
            });
        }
        Ok(version.to_string())
    }

    /// Run a snippet and capture stdout.
    fn run_snippet(&self, code: &str) -> Result<String> {
        tracing::debug!("{} -r {}", self.binary.display(), code);

        let output = Command::new(&self.binary)
            .arg("-r")
            .arg(code)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| PhpReqsError::ProbeFailed {
                query: code.to_string(),
                message: format!("could not run {}: {}", self.binary.display(), e),
            })?;

        if !output.status.success() {
            return Err(PhpReqsError::ProbeFailed {
                query: code.to_string(),
                message: format!("{} exited with {}", self.binary.display(), output.status),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a snippet that prints `1` or `0`.
    fn query_flag(&self, code: &str) -> bool {
        match self.run_snippet(code) {
            Ok(out) => out.trim() == "1",
            Err(e) => {
                tracing::warn!("{}", e);
                false
            }
        }
    }

    fn symbol_exists(&self, function: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.query_flag(&format!(
            "echo {}({}) ? '1' : '0';",
            function,
            php_string_literal(name)
        ))
    }
}

/// Decode the JSON-encoded result of `ini_get`. `false` means the directive
/// does not exist.
fn parse_ini_output(output: &str) -> Option<IniValue> {
    match serde_json::from_str::<serde_json::Value>(output.trim()) {
        Ok(serde_json::Value::String(s)) => Some(IniValue::Text(s)),
        Ok(serde_json::Value::Bool(false)) => None,
        Ok(serde_json::Value::Bool(true)) => Some(IniValue::Flag(true)),
        Ok(other) => {
            tracing::warn!("unexpected ini_get result: {}", other);
            None
        }
        Err(e) => {
            tracing::warn!("could not decode ini_get output {:?}: {}", output, e);
            None
        }
    }
}

impl PlatformProbe for PhpProbe {
    fn function_exists(&self, name: &str) -> bool {
        self.symbol_exists("function_exists", name)
    }

    fn class_exists(&self, name: &str) -> bool {
        self.symbol_exists("class_exists", name)
    }

    fn ini_value(&self, directive: &str) -> Option<IniValue> {
        let code = format!(
            "echo json_encode(ini_get({}));",
            php_string_literal(directive)
        );
        match self.run_snippet(&code) {
            Ok(out) => parse_ini_output(&out),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }

    fn current_version(&self) -> Option<String> {
        match self.verify() {
            Ok(version) => Some(version),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }

    /// The interpreter runs on this host, so its family is the host's.
    fn current_os_family(&self) -> Option<OsFamily> {
        Some(OsFamily::host())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(unix)]
    use std::fs;
    #[cfg(unix)]
    use tempfile::TempDir;

    /// Write a shell script standing in for the interpreter.
    #[cfg(unix)]
    fn fake_php(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("php");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn literal_escapes_quotes_and_backslashes() {
        assert_eq!(php_string_literal("sprintf"), "'sprintf'");
        assert_eq!(php_string_literal("it's"), "'it\\'s'");
        assert_eq!(
            php_string_literal("App\\Models\\User"),
            "'App\\\\Models\\\\User'"
        );
    }

    #[test]
    fn default_binary_is_php() {
        assert_eq!(PhpProbe::default().binary(), Path::new("php"));
    }

    #[test]
    fn parse_ini_output_variants() {
        assert_eq!(parse_ini_output("\"128M\"\n"), Some(IniValue::from("128M")));
        assert_eq!(parse_ini_output("\"\""), Some(IniValue::from("")));
        assert_eq!(parse_ini_output("false"), None);
        assert_eq!(parse_ini_output("garbage"), None);
        assert_eq!(parse_ini_output("42"), None);
    }

    #[test]
    fn missing_binary_degrades_to_absent() {
        let probe = PhpProbe::new("/nonexistent/path/to/php");
        assert!(!probe.function_exists("strlen"));
        assert!(!probe.class_exists("Exception"));
        assert!(probe.ini_value("memory_limit").is_none());
        assert!(probe.current_version().is_none());
    }

    #[test]
    fn missing_binary_fails_verify() {
        let probe = PhpProbe::new("/nonexistent/path/to/php");
        let err = probe.verify().unwrap_err();
        assert!(matches!(err, PhpReqsError::ProbeFailed { .. }));
    }

    #[test]
    fn os_family_is_host() {
        let probe = PhpProbe::new("/nonexistent/path/to/php");
        assert_eq!(probe.current_os_family(), Some(OsFamily::host()));
    }

    #[test]
    fn blank_names_skip_the_interpreter() {
        let probe = PhpProbe::new("/nonexistent/path/to/php");
        assert!(!probe.function_exists("  "));
    }

    #[cfg(unix)]
    #[test]
    fn reads_version_from_interpreter() {
        let temp = TempDir::new().unwrap();
        let probe = PhpProbe::new(fake_php(temp.path(), "echo 8.2.12"));
        assert_eq!(probe.current_version().as_deref(), Some("8.2.12"));
        assert_eq!(probe.verify().unwrap(), "8.2.12");
    }

    #[cfg(unix)]
    #[test]
    fn reads_symbol_existence_from_interpreter() {
        let temp = TempDir::new().unwrap();
        let script = r#"case "$2" in
  *"'sprintf'"*) printf 1 ;;
  *) printf 0 ;;
esac"#;
        let probe = PhpProbe::new(fake_php(temp.path(), script));
        assert!(probe.function_exists("sprintf"));
        assert!(!probe.function_exists("nope"));
    }

    #[cfg(unix)]
    #[test]
    fn reads_ini_values_from_interpreter() {
        let temp = TempDir::new().unwrap();
        let script = r#"case "$2" in
  *memory_limit*) echo '"-1"' ;;
  *) echo false ;;
esac"#;
        let probe = PhpProbe::new(fake_php(temp.path(), script));
        assert_eq!(probe.ini_value("memory_limit"), Some(IniValue::from("-1")));
        assert!(probe.ini_value("no_such_directive").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_a_probe_failure() {
        let temp = TempDir::new().unwrap();
        let probe = PhpProbe::new(fake_php(temp.path(), "exit 255"));
        assert!(matches!(
            probe.verify(),
            Err(PhpReqsError::ProbeFailed { .. })
        ));
        assert!(probe.current_version().is_none());
    }
}
