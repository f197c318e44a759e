//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Global flags shared by the commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Directory holding phpreqs.yml.
    pub project_root: PathBuf,
    /// Explicit requirements file.
    pub config: Option<PathBuf>,
    /// Explicit PHP interpreter.
    pub php: Option<PathBuf>,
}

impl GlobalOptions {
    /// Options for a project root with no overrides.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Default::default()
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    options: GlobalOptions,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    /// Create a dispatcher from parsed arguments.
    pub fn from_cli(cli: &Cli, project_root: PathBuf) -> Self {
        Self::new(GlobalOptions {
            project_root,
            config: cli.config.clone(),
            php: cli.php.clone(),
        })
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.options.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// With no subcommand, runs `check` with default arguments.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(self.options.clone(), args.clone()).execute(ui)
            }
            Some(Commands::Info) => super::info::InfoCommand::new(self.options.clone()).execute(ui),
            Some(Commands::Init(args)) => {
                super::init::InitCommand::new(&self.options.project_root, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::check::CheckCommand::new(self.options.clone(), CheckArgs::default())
                .execute(ui),
        }
    }
}
