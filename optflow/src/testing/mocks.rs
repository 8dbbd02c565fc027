//! Mock activities that record calls and return configurable results.

use crate::activity::{Activity, ActivityOptions, ActivityResult};
use crate::target::Target;
use async_trait::async_trait;
use parking_lot::Mutex;

/// A mock activity that records invocations and returns a configurable
/// result.
#[derive(Debug)]
pub struct MockActivity {
    name: String,
    result: Mutex<ActivityResult>,
    call_count: Mutex<usize>,
    options: Mutex<Vec<ActivityOptions>>,
}

impl MockActivity {
    /// Creates a mock that succeeds with an empty summary.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            result: Mutex::new(ActivityResult::success_empty()),
            call_count: Mutex::new(0),
            options: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock that returns the given result on every call.
    #[must_use]
    pub fn returning(name: impl Into<String>, result: ActivityResult) -> Self {
        Self {
            name: name.into(),
            result: Mutex::new(result),
            call_count: Mutex::new(0),
            options: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the result returned by subsequent calls.
    pub fn set_result(&self, result: ActivityResult) {
        *self.result.lock() = result;
    }

    /// Returns the number of times the activity was dispatched.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.call_count.lock()
    }

    /// Returns the options each dispatch received.
    #[must_use]
    pub fn recorded_options(&self) -> Vec<ActivityOptions> {
        self.options.lock().clone()
    }

    /// Resets call tracking.
    pub fn reset(&self) {
        *self.call_count.lock() = 0;
        self.options.lock().clear();
    }
}

#[async_trait]
impl Activity for MockActivity {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(
        &self,
        _target: &Target,
        options: &ActivityOptions,
    ) -> anyhow::Result<ActivityResult> {
        *self.call_count.lock() += 1;
        self.options.lock().push(options.clone());
        Ok(self.result.lock().clone())
    }
}

/// An activity whose handle always errors, exercising the runner's
/// catch-and-convert path.
#[derive(Debug)]
pub struct FailingActivity {
    name: String,
    message: String,
}

impl FailingActivity {
    /// Creates a failing activity with the given error message.
    #[must_use]
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl Activity for FailingActivity {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(
        &self,
        _target: &Target,
        _options: &ActivityOptions,
    ) -> anyhow::Result<ActivityResult> {
        Err(anyhow::anyhow!("{}", self.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let mock = MockActivity::new("probe");
        assert_eq!(mock.call_count(), 0);

        mock.execute(&Target::path("/tmp"), &ActivityOptions::new())
            .await
            .unwrap();
        assert_eq!(mock.call_count(), 1);

        mock.reset();
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failing_activity_errors() {
        let failing = FailingActivity::new("broken", "kaput");
        let err = failing
            .execute(&Target::path("/tmp"), &ActivityOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "kaput");
    }
}
