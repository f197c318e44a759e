//! Info command implementation.
//!
//! The `phpreqs info` command shows which interpreter would be probed and
//! what it reports about itself.

use crate::config::load_config;
use crate::error::{PhpReqsError, Result};
use crate::probe::PhpProbe;
use crate::requirements::OsFamily;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, GlobalOptions};

/// The info command implementation.
pub struct InfoCommand {
    options: GlobalOptions,
}

impl InfoCommand {
    /// Create a new info command.
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    /// Interpreter chosen by the flags and, when present, the requirements
    /// file. A missing file is fine here; an unreadable one is reported.
    fn probe(&self, ui: &mut dyn UserInterface) -> PhpProbe {
        let config = match load_config(&self.options.project_root, self.options.config.as_deref())
        {
            Ok(config) => config,
            Err(PhpReqsError::ConfigNotFound { .. }) => Default::default(),
            Err(e) => {
                ui.warning(&format!("Ignoring requirements file: {}", e));
                Default::default()
            }
        };
        PhpProbe::new(config.php_binary(self.options.php.as_deref()))
    }
}

impl Command for InfoCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let probe = self.probe(ui);
        ui.key_value("PHP binary", &probe.binary().display().to_string());

        match probe.verify() {
            Ok(version) => {
                ui.key_value("PHP version", &version);
                ui.key_value("OS family", OsFamily::host().as_str());
                Ok(CommandResult::success())
            }
            Err(e) => {
                ui.error(&e.to_string());
                ui.show_hint("Point --php or PHPREQS_PHP at a working interpreter");
                Ok(CommandResult::failure(1))
            }
        }
    }
}
