//! Init command implementation.
//!
//! The `phpreqs init` command writes a starter `phpreqs.yml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::cli::args::InitArgs;
use crate::config::CONFIG_FILE;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The init command implementation.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Where the file is written.
    pub fn config_path(&self) -> PathBuf {
        self.project_root.join(CONFIG_FILE)
    }

    /// Contents of the starter file.
    pub fn starter_config(&self) -> String {
        let project_name = self
            .project_root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("this project");

        format!(
            "# PHP requirements for {project_name}\n\
             # Check them with `phpreqs check`.\n\
             \n\
             # Interpreter to probe (default: php on PATH)\n\
             # php:\n\
             #   binary: /usr/bin/php\n\
             \n\
             php_version: \">=7.4\"\n\
             \n\
             # Operating system family: unix or dos\n\
             # os: unix\n\
             \n\
             # One entry per function; a|b accepts either\n\
             functions:\n\
             \x20 - json_encode\n\
             \n\
             # classes:\n\
             #   - PDO\n\
             \n\
             # Directive to expected value: true/false, a number, a string,\n\
             # or a comparison such as \">=128M\"\n\
             # ini:\n\
             #   memory_limit: \">=128M\"\n\
             #   file_uploads: true\n"
        )
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = self.config_path();

        if path.exists() && !self.args.force {
            ui.error(&format!("{} already exists", path.display()));
            ui.show_hint("Use --force to overwrite it");
            return Ok(CommandResult::failure(1));
        }

        fs::write(&path, self.starter_config())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        ui.success(&format!("Created {}", path.display()));
        Ok(CommandResult::success())
    }
}
