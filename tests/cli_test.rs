//! Integration tests for the phpreqs binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("phpreqs.yml"), config).unwrap();
    temp
}

fn phpreqs() -> Command {
    let mut cmd = Command::new(cargo_bin("phpreqs"));
    cmd.env_remove("PHPREQS_PHP").env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    phpreqs()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PHP environment"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    phpreqs()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn missing_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    phpreqs()
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No requirements file found"));
    Ok(())
}

#[test]
fn empty_requirements_pass() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("# nothing required\n");
    phpreqs()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("All 0 requirements satisfied"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn host_os_requirement_passes() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("os: unix\n");
    phpreqs()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("OS family unix"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn foreign_os_requirement_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("os: dos\n");
    phpreqs()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("host OS family is unix, dos required"));
    Ok(())
}

#[test]
fn unknown_os_tag_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("os: beos\n");
    phpreqs()
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported OS family"));
    Ok(())
}

#[test]
fn project_flag_selects_directory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("{}\n");
    phpreqs()
        .args(["--project", temp.path().to_str().unwrap(), "check"])
        .assert()
        .success();
    Ok(())
}

#[cfg(unix)]
#[test]
fn json_output_is_parseable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("os: [unix, dos]\n");
    let output = phpreqs()
        .current_dir(temp.path())
        .args(["check", "--json"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["satisfied"], false);
    assert_eq!(report["results"][0]["satisfied"], true);
    assert_eq!(report["results"][1]["satisfied"], false);
    Ok(())
}

#[cfg(unix)]
#[test]
fn verbose_json_output_stays_parseable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("os: unix\n");
    let output = phpreqs()
        .current_dir(temp.path())
        .args(["--verbose", "check", "--json"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["satisfied"], true);
    Ok(())
}

#[test]
fn init_then_refuses_second_init() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    phpreqs()
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    assert!(temp.path().join("phpreqs.yml").exists());

    phpreqs()
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    phpreqs()
        .current_dir(temp.path())
        .args(["init", "--force"])
        .assert()
        .success();
    Ok(())
}

#[cfg(unix)]
mod with_fake_php {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// A stand-in interpreter that answers the version, function and
    /// ini queries phpreqs sends.
    fn fake_php(dir: &Path) -> PathBuf {
        let script = dir.join("fake-php");
        fs::write(
            &script,
            r#"#!/bin/sh
case "$2" in
  *PHP_VERSION*) printf '8.2.12' ;;
  *function_exists*sprintf*) printf '1' ;;
  *function_exists*) printf '0' ;;
  *ini_get*memory_limit*) printf '"128M"' ;;
  *ini_get*) printf 'false' ;;
  *) exit 1 ;;
esac
"#,
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    #[test]
    fn satisfied_requirements_pass_with_fake_php() -> Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let php = fake_php(temp.path());
        fs::write(
            temp.path().join("phpreqs.yml"),
            "php_version: '>=7.4'\nfunctions: [sprintf]\nini:\n  memory_limit: '>=64M'\n",
        )?;

        phpreqs()
            .current_dir(temp.path())
            .env("PHPREQS_PHP", &php)
            .assert()
            .success()
            .stdout(predicate::str::contains("PHP 8.2.12 satisfies >=7.4"));
        Ok(())
    }

    #[test]
    fn failures_are_listed() -> Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let php = fake_php(temp.path());
        fs::write(
            temp.path().join("phpreqs.yml"),
            "php_version: '>=8.3'\nfunctions: [mb_strlen]\nini:\n  memory_limit: '>=256M'\n  opcache.enable: true\n",
        )?;

        phpreqs()
            .current_dir(temp.path())
            .args(["--php", php.to_str().unwrap(), "check"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("does not satisfy >=8.3"))
            .stdout(predicate::str::contains("missing function: mb_strlen"))
            .stdout(predicate::str::contains("opcache.enable is not set"));
        Ok(())
    }

    #[test]
    fn php_binary_from_config() -> Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let php = fake_php(temp.path());
        fs::write(
            temp.path().join("phpreqs.yml"),
            format!("php:\n  binary: {}\nphp_version: '>=8.2'\n", php.display()),
        )?;

        phpreqs()
            .current_dir(temp.path())
            .assert()
            .success();
        Ok(())
    }

    #[test]
    fn info_reports_interpreter() -> Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let php = fake_php(temp.path());

        phpreqs()
            .current_dir(temp.path())
            .env("PHPREQS_PHP", &php)
            .arg("info")
            .assert()
            .success()
            .stdout(predicate::str::contains("PHP version: 8.2.12"))
            .stdout(predicate::str::contains("OS family: unix"));
        Ok(())
    }
}

#[test]
fn info_with_missing_interpreter_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    phpreqs()
        .current_dir(temp.path())
        .args(["info", "--php", "/nonexistent/php-binary"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("PHP_VERSION"));
    Ok(())
}

#[test]
fn completions_generate_script() -> Result<(), Box<dyn std::error::Error>> {
    phpreqs()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("phpreqs"));
    Ok(())
}
