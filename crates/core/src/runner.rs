//! Test command execution
//!
//! Renders `<tool> test --features '<v0-1 v0-2 ...>'` and runs it through the
//! platform shell. Only the exit status is consumed unless output capture is
//! requested. Execution goes through the [`CommandExecutor`] trait so callers
//! can substitute [`mock::MockExecutor`] in tests.

use crate::errors::{InvocationError, Result};
use crate::version::FeatureVersion;
use serde::Serialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Build tool invoked when none is configured
pub const DEFAULT_TOOL: &str = "cargo";

/// Exit code reported when the process was terminated by a signal
pub const SIGNAL_EXIT_CODE: i32 = -1;

/// A test invocation for a set of features
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCommand {
    tool: String,
    features: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl TestCommand {
    pub fn new<I, S>(tool: impl Into<String>, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tool: tool.into(),
            features: features
                .into_iter()
                .map(|f| f.as_ref().to_string())
                .collect(),
            working_dir: None,
        }
    }

    /// Build a command from resolved feature versions
    pub fn for_versions(tool: impl Into<String>, versions: &[FeatureVersion]) -> Self {
        Self::new(tool, versions.iter().map(FeatureVersion::as_str))
    }

    /// Run the command from `dir` instead of the current directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Features joined by single spaces
    pub fn features_arg(&self) -> String {
        self.features.join(" ")
    }

    /// Full shell command line
    pub fn render(&self) -> String {
        format!(
            "{} test --features {}",
            self.tool,
            single_quote(&self.features_arg())
        )
    }

    /// Command line for `cmd /C`, which does not understand single quotes
    pub fn render_cmd(&self) -> String {
        format!(
            "{} test --features \"{}\"",
            self.tool,
            self.features_arg().replace('"', "\\\"")
        )
    }
}

/// Quote `value` as one single-quoted shell word
fn single_quote(value: &str) -> String {
    match shell_words::quote(value) {
        Cow::Borrowed(plain) => format!("'{}'", plain),
        Cow::Owned(quoted) => quoted,
    }
}

/// Whether the child's output streams are inherited or collected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Child writes straight to our stdout/stderr
    #[default]
    Inherit,
    /// Child output is collected into [`InvocationResult::output`]
    Capture,
}

/// Outcome of one test invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationResult {
    /// Process exit code, [`SIGNAL_EXIT_CODE`] if killed by a signal
    pub code: i32,
    /// `code == 0`
    pub success: bool,
    /// Combined stdout and stderr, only in [`OutputMode::Capture`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl InvocationResult {
    pub fn from_code(code: i32, output: Option<String>) -> Self {
        Self {
            code,
            success: code == 0,
            output,
        }
    }

    /// Convert a non-zero status into [`InvocationError::Failed`]
    pub fn into_result(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(InvocationError::Failed { code: self.code }.into())
        }
    }
}

/// Something that can run a [`TestCommand`]
pub trait CommandExecutor {
    fn execute(&self, command: &TestCommand, mode: OutputMode) -> Result<InvocationResult>;
}

/// Runs commands through `sh -c` (`cmd /C` on Windows)
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExecutor;

impl ShellExecutor {
    fn shell_command(command: &TestCommand) -> (String, Command) {
        if cfg!(target_os = "windows") {
            let line = command.render_cmd();
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", line.as_str()]);
            (line, cmd)
        } else {
            let line = command.render();
            let mut cmd = Command::new("sh");
            cmd.args(["-c", line.as_str()]);
            (line, cmd)
        }
    }
}

impl CommandExecutor for ShellExecutor {
    #[instrument(skip(self, command), fields(tool = %command.tool()))]
    fn execute(&self, command: &TestCommand, mode: OutputMode) -> Result<InvocationResult> {
        let (line, mut process) = Self::shell_command(command);
        if let Some(dir) = command.working_dir() {
            process.current_dir(dir);
        }

        let spawn_error = |source: std::io::Error| InvocationError::Spawn {
            command: line.clone(),
            source,
        };

        let start_time = Instant::now();
        let result = match mode {
            OutputMode::Inherit => {
                let status = process
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(spawn_error)?;
                InvocationResult::from_code(status.code().unwrap_or(SIGNAL_EXIT_CODE), None)
            }
            OutputMode::Capture => {
                let output = process.output().map_err(spawn_error)?;
                let combined = combine_output(&output);
                InvocationResult::from_code(
                    output.status.code().unwrap_or(SIGNAL_EXIT_CODE),
                    Some(combined),
                )
            }
        };

        debug!(
            "Command completed with exit code: {} in {:?}",
            result.code,
            start_time.elapsed()
        );
        Ok(result)
    }
}

fn combine_output(output: &Output) -> String {
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined
}

/// Run `command` with `executor` and report the outcome
///
/// A non-zero exit is not an error here; check [`InvocationResult::success`]
/// or call [`InvocationResult::into_result`].
pub fn run_tests<E: CommandExecutor + ?Sized>(
    executor: &E,
    command: &TestCommand,
    mode: OutputMode,
) -> Result<InvocationResult> {
    info!("Running: {}", command.render());
    let result = executor.execute(command, mode)?;
    if result.success {
        info!("Tests passed");
    } else {
        info!(code = result.code, "Tests failed");
    }
    Ok(result)
}

pub mod mock {
    //! Scripted executor for tests
    //!
    //! Records every rendered command line and answers with queued responses.
    //! Once the queue is empty, the default response is returned.

    use super::{CommandExecutor, InvocationResult, OutputMode, TestCommand};
    use crate::errors::Result;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use tracing::debug;

    /// Canned response for one invocation
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct MockResponse {
        pub exit_code: i32,
        /// Returned as captured output when the caller asked for capture
        pub output: Option<String>,
    }

    impl Default for MockResponse {
        fn default() -> Self {
            Self {
                exit_code: 0,
                output: None,
            }
        }
    }

    impl MockResponse {
        pub fn exit(exit_code: i32) -> Self {
            Self {
                exit_code,
                ..Default::default()
            }
        }

        pub fn with_output(mut self, output: impl Into<String>) -> Self {
            self.output = Some(output.into());
            self
        }
    }

    /// Executor that never spawns a process
    #[derive(Debug, Clone, Default)]
    pub struct MockExecutor {
        responses: Arc<Mutex<VecDeque<MockResponse>>>,
        default_response: MockResponse,
        history: Arc<Mutex<Vec<String>>>,
    }

    impl MockExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        /// Executor whose every invocation exits with `exit_code`
        pub fn with_exit_code(exit_code: i32) -> Self {
            Self {
                default_response: MockResponse::exit(exit_code),
                ..Default::default()
            }
        }

        /// Queue a response for the next unanswered invocation
        pub fn push_response(&self, response: MockResponse) {
            self.responses
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push_back(response);
        }

        /// Rendered command lines in invocation order
        pub fn history(&self) -> Vec<String> {
            self.history
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()
        }
    }

    impl CommandExecutor for MockExecutor {
        fn execute(&self, command: &TestCommand, mode: OutputMode) -> Result<InvocationResult> {
            let line = command.render();
            debug!("Mock executing: {}", line);
            self.history
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(line);

            let response = self
                .responses
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .pop_front()
                .unwrap_or_else(|| self.default_response.clone());

            let output = match mode {
                OutputMode::Inherit => None,
                OutputMode::Capture => Some(response.output.unwrap_or_default()),
            };
            Ok(InvocationResult::from_code(response.exit_code, output))
        }
    }
}
