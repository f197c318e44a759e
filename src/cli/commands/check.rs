//! Check command implementation.
//!
//! The `phpreqs check` command loads the requirements file, probes the PHP
//! interpreter and reports every requirement.

use crate::cli::args::CheckArgs;
use crate::config::{load_config, RequirementsConfig};
use crate::error::{PhpReqsError, Result};
use crate::probe::{PhpProbe, PlatformProbe};
use crate::report::{render_results, summary_line, Report};
use crate::requirements::Checker;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, GlobalOptions};

/// Exit code when the requirements file is missing.
pub const EXIT_NO_CONFIG: i32 = 2;

/// The check command implementation.
pub struct CheckCommand {
    options: GlobalOptions,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(options: GlobalOptions, args: CheckArgs) -> Self {
        Self { options, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Register `config` on a checker over `probe`, check, and report.
    pub fn run_with_probe<P: PlatformProbe>(
        &self,
        ui: &mut dyn UserInterface,
        config: &RequirementsConfig,
        probe: P,
    ) -> Result<CommandResult> {
        let mut checker = Checker::new(probe);
        config.register(&mut checker)?;

        if config.is_empty() {
            ui.warning("No requirements declared");
        }

        checker.check();

        if self.args.json {
            ui.data(&Report::from_checker(&checker).to_json()?);
        } else {
            render_results(ui, checker.results());
            let summary = summary_line(checker.results());
            if checker.is_satisfied() {
                ui.success(&summary);
            } else {
                ui.failure(&summary);
            }
        }

        if checker.is_satisfied() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match load_config(&self.options.project_root, self.options.config.as_deref())
        {
            Ok(config) => config,
            Err(PhpReqsError::ConfigNotFound { path }) => {
                ui.error(&format!("No requirements file found at {}", path.display()));
                ui.show_hint("Run `phpreqs init` to create one");
                return Ok(CommandResult::failure(EXIT_NO_CONFIG));
            }
            Err(e) => return Err(e),
        };

        let binary = config.php_binary(self.options.php.as_deref());
        if !self.args.json {
            ui.show_header(&format!("Checking requirements with {}", binary.display()));
        }
        tracing::debug!("Probing PHP interpreter {}", binary.display());

        self.run_with_probe(ui, &config, PhpProbe::new(binary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::probe::StaticProbe;
    use crate::requirements::OsFamily;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn config(yaml: &str) -> RequirementsConfig {
        parse_config(yaml, Path::new("phpreqs.yml")).unwrap()
    }

    fn probe() -> StaticProbe {
        StaticProbe::new()
            .with_version("8.2.12")
            .with_os(OsFamily::Unix)
            .with_functions(["sprintf", "json_encode"])
            .with_ini("memory_limit", "128M")
    }

    fn command(json: bool) -> CheckCommand {
        CheckCommand::new(GlobalOptions::new("/app"), CheckArgs { json })
    }

    #[test]
    fn satisfied_config_exits_zero() {
        let mut ui = MockUI::new();
        let config = config("php_version: '>=8.1'\nos: unix\nfunctions: [sprintf]");

        let result = command(false).run_with_probe(&mut ui, &config, probe()).unwrap();

        assert!(result.success);
        assert_eq!(ui.successes().len(), 4);
        assert!(ui.has_success("All 3 requirements satisfied"));
        assert!(ui.failures().is_empty());
    }

    #[test]
    fn unsatisfied_config_exits_one_and_lists_failures() {
        let mut ui = MockUI::new();
        let config = config("functions: [sprintf, mb_strlen]\nini:\n  memory_limit: '>=256M'");

        let result = command(false).run_with_probe(&mut ui, &config, probe()).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_failure("missing function: mb_strlen"));
        assert!(ui.has_failure("memory_limit is \"128M\", expected >=256M"));
        assert!(ui.has_failure("2 of 2 requirements not satisfied"));
    }

    #[test]
    fn json_output_goes_to_data_channel() {
        let mut ui = MockUI::new();
        let config = config("os: dos");

        let result = command(true).run_with_probe(&mut ui, &config, probe()).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.successes().is_empty());
        assert!(ui.failures().is_empty());
        let value: serde_json::Value = serde_json::from_str(&ui.data_output()[0]).unwrap();
        assert_eq!(value["satisfied"], false);
        assert_eq!(value["results"][0]["descriptor"]["expected"], "dos");
    }

    #[test]
    fn empty_config_warns_and_passes() {
        let mut ui = MockUI::new();
        let result = command(false)
            .run_with_probe(&mut ui, &config(""), probe())
            .unwrap();

        assert!(result.success);
        assert!(ui.has_warning("No requirements declared"));
    }

    #[test]
    fn invalid_os_tag_is_an_error() {
        let mut ui = MockUI::new();
        let err = command(false)
            .run_with_probe(&mut ui, &config("os: beos"), probe())
            .unwrap_err();
        assert!(matches!(err, PhpReqsError::InvalidArgument { .. }));
    }

    #[test]
    fn missing_config_exits_two() {
        let temp = TempDir::new().unwrap();
        let cmd = CheckCommand::new(GlobalOptions::new(temp.path()), CheckArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, EXIT_NO_CONFIG);
        assert!(ui.has_error("phpreqs.yml"));
        assert!(ui.has_hint("phpreqs init"));
    }

    #[test]
    fn unparseable_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("phpreqs.yml"), "functions: [oops").unwrap();
        let cmd = CheckCommand::new(GlobalOptions::new(temp.path()), CheckArgs::default());

        let err = cmd.execute(&mut MockUI::new()).unwrap_err();
        assert!(matches!(err, PhpReqsError::ConfigParseError { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn execute_checks_host_os_without_php() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("phpreqs.yml"), "os: unix").unwrap();
        let cmd = CheckCommand::new(GlobalOptions::new(temp.path()), CheckArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_success("OS family unix"));
        assert_eq!(ui.headers().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn json_execute_draws_no_header() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("phpreqs.yml"), "os: unix").unwrap();
        let cmd = CheckCommand::new(GlobalOptions::new(temp.path()), CheckArgs { json: true });
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.headers().is_empty());
        let value: serde_json::Value = serde_json::from_str(&ui.data_output()[0]).unwrap();
        assert_eq!(value["satisfied"], true);
    }
}
