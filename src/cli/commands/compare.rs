//! Compare command implementation.
//!
//! `version-checker compare <ACTUAL> <MINIMUM>` exits 0 when ACTUAL is at
//! least MINIMUM.

use crate::cli::args::CompareArgs;
use crate::error::{Result, VersionCheckError};
use crate::ui::UserInterface;
use crate::version::check_minimum_version;

use super::dispatcher::{Command, CommandResult};

/// The compare command implementation.
pub struct CompareCommand {
    args: CompareArgs,
}

impl CompareCommand {
    /// Create a new compare command.
    pub fn new(args: CompareArgs) -> Self {
        Self { args }
    }
}

impl Command for CompareCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match check_minimum_version(&self.args.actual, &self.args.minimum) {
            Ok(()) => {
                ui.success(&format!(
                    "{} satisfies minimum {}",
                    self.args.actual, self.args.minimum
                ));
                Ok(CommandResult::success())
            }
            Err(e @ VersionCheckError::VersionTooLow { .. })
            | Err(e @ VersionCheckError::InvalidFormat { .. }) => {
                ui.error(&e.to_string());
                Ok(CommandResult::failure(e.exit_code()))
            }
            Err(e) => Err(e),
        }
    }
}
