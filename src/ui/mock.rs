//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! output for later assertion.

use super::{OutputMode, UserInterface};

/// Captures UI output instead of printing it.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    outputs: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Results written.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Success messages shown.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Warnings shown.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Errors shown.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn output(&mut self, msg: &str) {
        self.outputs.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }
}
