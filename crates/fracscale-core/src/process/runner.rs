use std::process::Command;

use tracing::{debug, warn};

use super::errors::ProcessError;

/// Options controlling how command output is captured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Strip one trailing `\n` or `\r\n` from stdout and stderr.
    pub trim_ending_newline: bool,
}

impl RunOptions {
    pub fn trimmed() -> Self {
        Self {
            trim_ending_newline: true,
        }
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Combined stderr and stdout, skipping empty streams.
    pub fn failure_message(&self) -> Option<String> {
        let message = [self.stderr.as_str(), self.stdout.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if message.is_empty() {
            None
        } else {
            Some(message)
        }
    }
}

/// Executes external commands.
///
/// Implemented by [`SystemRunner`] for real processes; tests substitute a
/// scripted runner.
pub trait CommandRunner {
    /// Run `program` with `args` and capture its output, whatever the exit code.
    fn run(
        &self,
        program: &str,
        args: &[&str],
        options: RunOptions,
    ) -> Result<CommandOutput, ProcessError>;

    /// Run and fail with [`ProcessError::NonZeroExit`] unless the command succeeds.
    fn run_or_fail(
        &self,
        program: &str,
        args: &[&str],
        options: RunOptions,
    ) -> Result<CommandOutput, ProcessError> {
        let output = self.run(program, args, options)?;
        if output.success() {
            return Ok(output);
        }

        let status = match output.exit_code {
            Some(code) => format!("exit status: {}", code),
            None => "signal".to_string(),
        };
        warn!(
            event = "core.process.run_failed",
            program = program,
            status = %status,
        );
        Err(ProcessError::NonZeroExit {
            program: program.to_string(),
            status,
            message: output.failure_message(),
        })
    }
}

/// Runs commands with `std::process::Command`, blocking until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        options: RunOptions,
    ) -> Result<CommandOutput, ProcessError> {
        debug!(
            event = "core.process.run_started",
            program = program,
            args = ?args,
        );

        let output = Command::new(program).args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProcessError::NotFound {
                    program: program.to_string(),
                }
            } else {
                ProcessError::SpawnFailed {
                    program: program.to_string(),
                    source: e,
                }
            }
        })?;

        let mut stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let mut stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if options.trim_ending_newline {
            trim_ending_newline(&mut stdout);
            trim_ending_newline(&mut stderr);
        }

        let exit_code = output.status.code();
        debug!(
            event = "core.process.run_completed",
            program = program,
            exit_code = ?exit_code,
        );

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code,
        })
    }
}

/// Remove a single trailing `\n` or `\r\n`.
pub fn trim_ending_newline(text: &mut String) {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_ending_newline() {
        let mut text = "['a']\n".to_string();
        trim_ending_newline(&mut text);
        assert_eq!(text, "['a']");

        let mut text = "value\r\n".to_string();
        trim_ending_newline(&mut text);
        assert_eq!(text, "value");

        // Only one newline is removed
        let mut text = "value\n\n".to_string();
        trim_ending_newline(&mut text);
        assert_eq!(text, "value\n");

        let mut text = String::new();
        trim_ending_newline(&mut text);
        assert_eq!(text, "");
    }

    #[test]
    fn test_failure_message_joins_streams() {
        let output = CommandOutput {
            stdout: "out".to_string(),
            stderr: "err".to_string(),
            exit_code: Some(1),
        };
        assert_eq!(output.failure_message().as_deref(), Some("err\nout"));

        let output = CommandOutput {
            stdout: String::new(),
            stderr: "err".to_string(),
            exit_code: Some(1),
        };
        assert_eq!(output.failure_message().as_deref(), Some("err"));

        let output = CommandOutput {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: Some(1),
        };
        assert!(output.failure_message().is_none());
    }

    #[test]
    fn test_system_runner_captures_stdout() {
        let output = SystemRunner
            .run("sh", &["-c", "printf 'hello\\n'"], RunOptions::trimmed())
            .unwrap();
        assert_eq!(output.stdout, "hello");
        assert!(output.success());
    }

    #[test]
    fn test_system_runner_keeps_newline_without_trim() {
        let output = SystemRunner
            .run("sh", &["-c", "printf 'hello\\n'"], RunOptions::default())
            .unwrap();
        assert_eq!(output.stdout, "hello\n");
    }

    #[test]
    fn test_run_or_fail_reports_stderr_and_stdout() {
        let result = SystemRunner.run_or_fail(
            "sh",
            &["-c", "echo partial; echo broken >&2; exit 3"],
            RunOptions::trimmed(),
        );
        match result {
            Err(ProcessError::NonZeroExit {
                program,
                status,
                message,
            }) => {
                assert_eq!(program, "sh");
                assert_eq!(status, "exit status: 3");
                assert_eq!(message.as_deref(), Some("broken\npartial"));
            }
            other => panic!("expected NonZeroExit, got: {:?}", other),
        }
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let result = SystemRunner.run(
            "fracscale-definitely-not-a-real-binary",
            &[],
            RunOptions::default(),
        );
        assert!(matches!(result, Err(ProcessError::NotFound { .. })));
    }
}
