//! Reporting failed checks to the enclosing test.

use std::sync::Mutex;

/// Marks the enclosing test as failed.
pub trait FailureReporter {
    /// Fail the test with `message` and stop it.
    fn fail_now(&self, message: &str);
}

/// Fails the test by panicking, which is how `#[test]` functions fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicReporter;

impl FailureReporter for PanicReporter {
    fn fail_now(&self, message: &str) {
        panic!("{}", message);
    }
}

/// Collects failures instead of aborting.
///
/// Useful when a test wants to assert on what would have been reported.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    failures: Mutex<Vec<String>>,
}

impl RecordingReporter {
    /// Messages reported so far.
    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

impl FailureReporter for RecordingReporter {
    fn fail_now(&self, message: &str) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(message.to_string());
        }
    }
}
