use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::{debug, trace};

use crate::tfvc::{ArgumentBuilder, ExecutionResult};

/// A builder for running a TF executable and capturing its output
pub struct Cmd<'a> {
    program: &'a Path,
    args: Option<&'a ArgumentBuilder>,
    workdir: Option<&'a Path>,
}

impl<'a> Cmd<'a> {
    /// Create a new command builder
    pub fn new(program: &'a Path) -> Self {
        Self {
            program,
            args: None,
            workdir: None,
        }
    }

    /// Set the TF subcommand and its arguments
    pub fn args(mut self, args: &'a ArgumentBuilder) -> Self {
        self.args = Some(args);
        self
    }

    /// Set the working directory for the command
    pub fn workdir(mut self, path: &'a Path) -> Self {
        self.workdir = Some(path);
        self
    }

    /// Execute the command and capture exit code, stdout and stderr.
    ///
    /// A non-zero exit code is not an error here; interpreting the output is
    /// left to the command's parser. Only a failure to spawn is reported.
    pub fn execute(self) -> Result<ExecutionResult> {
        let Cmd {
            program,
            args,
            workdir,
        } = self;
        let program_display = program.display().to_string();
        let args_display = args.map(ArgumentBuilder::display).unwrap_or_default();
        let workdir_display = workdir.map(|p| p.display().to_string());

        trace!(
            program = %program_display,
            args = %args_display,
            workdir = ?workdir_display,
            "cmd:execute start"
        );

        let mut cmd = Command::new(program);
        if let Some(dir) = workdir {
            cmd.current_dir(dir);
        }
        if let Some(args) = args {
            cmd.args(args.args());
        }
        let output = cmd.output().with_context(|| {
            format!("Failed to execute command: {} {}", program_display, args_display)
        })?;

        let exit_code = output.status.code().unwrap_or(-1);
        let result = ExecutionResult {
            exit_code,
            stdout: captured(&output.stdout),
            stderr: captured(&output.stderr),
        };

        if exit_code != 0 {
            debug!(
                program = %program_display,
                args = %args_display,
                exit_code,
                stderr = result.stderr.as_deref().unwrap_or_default(),
                "cmd:execute non-zero exit"
            );
        } else {
            trace!(program = %program_display, "cmd:execute success");
        }
        Ok(result)
    }
}

fn captured(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    if text.trim().is_empty() {
        None
    } else {
        Some(text.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_treats_blank_output_as_absent() {
        assert_eq!(captured(b""), None);
        assert_eq!(captured(b"  \r\n"), None);
        assert_eq!(captured(b"Workspace: x\n"), Some("Workspace: x\n".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn execute_captures_exit_code_and_streams() {
        let args = ArgumentBuilder::new("-c").add("echo out; echo err >&2; exit 3");
        let result = Cmd::new(Path::new("sh")).args(&args).execute().unwrap();
        assert_eq!(result.exit_code, 3);
        assert_eq!(result.stdout.as_deref(), Some("out\n"));
        assert_eq!(result.stderr.as_deref(), Some("err\n"));
    }

    #[test]
    fn execute_reports_spawn_failure_with_masked_args() {
        let args = ArgumentBuilder::new("workfold").add_secret("/secret/place");
        let err = Cmd::new(Path::new("/nonexistent/tfwork-test-binary"))
            .args(&args)
            .execute()
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("workfold ********"));
        assert!(!message.contains("/secret/place"));
    }
}
