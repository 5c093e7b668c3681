//! Extract command implementation.
//!
//! `version-checker extract [TEXT]` prints the first dotted version in TEXT,
//! or in stdin when TEXT is omitted.

use anyhow::Context;

use crate::cli::args::ExtractArgs;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::version::extract_version;

use super::dispatcher::{Command, CommandResult};

/// The extract command implementation.
pub struct ExtractCommand {
    args: ExtractArgs,
}

impl ExtractCommand {
    /// Create a new extract command.
    pub fn new(args: ExtractArgs) -> Self {
        Self { args }
    }

    fn input(&self) -> Result<String> {
        match &self.args.text {
            Some(text) => Ok(text.clone()),
            None => {
                let text = std::io::read_to_string(std::io::stdin())
                    .context("Failed to read version text from stdin")?;
                Ok(text)
            }
        }
    }
}

impl Command for ExtractCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let text = self.input()?;
        match extract_version(&text) {
            Ok(version) => {
                ui.output(version);
                Ok(CommandResult::success())
            }
            Err(e) => {
                ui.error(&e.to_string());
                Ok(CommandResult::failure(e.exit_code()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    fn run(text: &str) -> (CommandResult, MockUI) {
        let mut ui = MockUI::new();
        let cmd = ExtractCommand::new(ExtractArgs {
            text: Some(text.into()),
        });
        let result = cmd.execute(&mut ui).unwrap();
        (result, ui)
    }

    #[test]
    fn prints_extracted_version() {
        let (result, ui) = run("Docker version 24.0.7, build afdd53b");
        assert!(result.success);
        assert_eq!(ui.outputs(), ["24.0.7"]);
    }

    #[test]
    fn reports_missing_version() {
        let (result, ui) = run("version is vabc");
        assert_eq!(result, CommandResult::failure(1));
        assert_eq!(ui.errors(), ["failed to find version using regex matcher"]);
    }
}
