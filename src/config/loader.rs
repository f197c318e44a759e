//! Requirements file discovery and loading.
//!
//! A project declares its requirements in `phpreqs.yml` at its root.
//! An optional `phpreqs.local.yml` next to it is merged over the project
//! file, which lets a developer relax or tighten checks locally.

use crate::config::merger::merge_configs;
use crate::config::schema::RequirementsConfig;
use crate::error::{PhpReqsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Project requirements file name.
pub const CONFIG_FILE: &str = "phpreqs.yml";

/// Local override file name.
pub const LOCAL_CONFIG_FILE: &str = "phpreqs.local.yml";

/// Paths to requirements files in merge order (later overrides earlier).
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project file: phpreqs.yml
    pub project: Option<PathBuf>,

    /// Local overrides: phpreqs.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover requirements files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_FILE)),
            project_local: existing(project_root.join(LOCAL_CONFIG_FILE)),
        }
    }

    /// All existing paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project
            .iter()
            .chain(self.project_local.iter())
            .collect()
    }

    /// Whether the project file exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PhpReqsError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PhpReqsError::Io(e)
        }
    })
}

/// Load and parse a single requirements file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<RequirementsConfig> {
    let content = read(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into a [`RequirementsConfig`].
///
/// An empty document is an empty config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<RequirementsConfig> {
    let value = parse_value(content, source_path)?;
    serde_yaml::from_value(value).map_err(|e| PhpReqsError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse YAML into a raw value. A document with no content (empty, or
/// comments only) becomes an empty mapping.
fn parse_value(content: &str, source_path: &Path) -> Result<serde_yaml::Value> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| PhpReqsError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;
    if value.is_null() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }
    Ok(value)
}

/// Load a file as a raw YAML value, for merging.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read(path)?;
    parse_value(&content, path)
}

/// Load `phpreqs.yml` from `project_root` with `phpreqs.local.yml` merged
/// over it.
///
/// # Errors
///
/// Returns `ConfigNotFound` if `phpreqs.yml` does not exist.
/// Returns `ConfigParseError` if either file is invalid.
pub fn load_merged_config(project_root: &Path) -> Result<RequirementsConfig> {
    let paths = ConfigPaths::discover(project_root);
    let project_path = project_root.join(CONFIG_FILE);

    if !paths.has_project_config() {
        return Err(PhpReqsError::ConfigNotFound { path: project_path });
    }

    let layers = paths
        .all_existing()
        .into_iter()
        .map(|path| load_config_value(path))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Loaded {} requirements file(s)", layers.len());

    serde_yaml::from_value(merge_configs(&layers)).map_err(|e| PhpReqsError::ConfigParseError {
        path: project_path,
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load requirements with an optional file override.
///
/// With an override, only that file is read and nothing is merged.
pub fn load_config(
    project_root: &Path,
    config_override: Option<&Path>,
) -> Result<RequirementsConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(project_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn discover_finds_project_and_local() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "os: unix").unwrap();
        fs::write(temp.path().join(LOCAL_CONFIG_FILE), "").unwrap();

        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.has_project_config());
        assert!(paths.project_local.is_some());

        let all = paths.all_existing();
        assert_eq!(all.len(), 2);
        assert!(all[0].ends_with(CONFIG_FILE));
        assert!(all[1].ends_with(LOCAL_CONFIG_FILE));
    }

    #[test]
    fn discover_returns_none_for_missing_files() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(!paths.has_project_config());
        assert!(paths.project_local.is_none());
        assert!(paths.all_existing().is_empty());
    }

    #[test]
    fn load_config_file_parses_valid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "php_version: '>=8.1'\nfunctions: [sprintf]").unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.php_version, vec![">=8.1"]);
        assert_eq!(config.functions, vec!["sprintf"]);
    }

    #[test]
    fn load_config_file_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_config_file(&temp.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, PhpReqsError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_config_file_reports_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "functions: [unterminated").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, PhpReqsError::ConfigParseError { .. }));
    }

    #[test]
    fn empty_file_loads_as_empty_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "\n# nothing yet\n").unwrap();

        assert!(load_config_file(&path).unwrap().is_empty());
        assert!(load_merged_config(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn merged_config_requires_project_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(LOCAL_CONFIG_FILE), "os: unix").unwrap();

        let err = load_merged_config(temp.path()).unwrap_err();
        match err {
            PhpReqsError::ConfigNotFound { path } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn local_file_overrides_project_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "php_version: '>=7.4'\nini:\n  memory_limit: '>=64M'\n  file_uploads: true",
        )
        .unwrap();
        fs::write(
            temp.path().join(LOCAL_CONFIG_FILE),
            "ini:\n  memory_limit: '>=32M'\n  file_uploads: null",
        )
        .unwrap();

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.php_version, vec![">=7.4"]);
        assert_eq!(config.ini.len(), 1);
        assert_eq!(
            config.ini.get("memory_limit").and_then(|v| v.as_str()),
            Some(">=32M")
        );
    }

    #[test]
    fn override_path_skips_discovery() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "os: unix").unwrap();
        let custom = temp.path().join("ci.yml");
        fs::write(&custom, "os: dos").unwrap();

        let config = load_config(temp.path(), Some(&custom)).unwrap();
        assert_eq!(config.os, vec!["dos"]);

        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.os, vec!["unix"]);
    }
}
