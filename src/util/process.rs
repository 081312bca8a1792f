use std::ffi::OsString;
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StreamMode {
    Inherit,
    Capture,
}

pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub stdout: StreamMode,
    pub stderr: StreamMode,
}

impl CommandSpec {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdout: StreamMode::Inherit,
            stderr: StreamMode::Inherit,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn capture(mut self) -> Self {
        self.stdout = StreamMode::Capture;
        self.stderr = StreamMode::Capture;
        self
    }
}

pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Option<Vec<u8>>,
    pub stderr: Option<Vec<u8>>,
}

pub fn run(spec: CommandSpec) -> Result<CommandOutput> {
    let mut command = Command::new(&spec.program);
    command.args(&spec.args);
    tracing::debug!(
        program = %spec.program.to_string_lossy(),
        args = ?spec.args,
        "spawning"
    );

    match (spec.stdout, spec.stderr) {
        (StreamMode::Inherit, StreamMode::Inherit) => {
            command.stdout(Stdio::inherit());
            command.stderr(Stdio::inherit());
            let status = command
                .status()
                .with_context(|| format!("failed to spawn `{}`", spec.program.to_string_lossy()))?;
            Ok(CommandOutput {
                status,
                stdout: None,
                stderr: None,
            })
        }
        (StreamMode::Capture, StreamMode::Capture) => {
            command.stdout(Stdio::piped());
            command.stderr(Stdio::piped());
            let output = command
                .output()
                .with_context(|| format!("failed to spawn `{}`", spec.program.to_string_lossy()))?;
            Ok(CommandOutput {
                status: output.status,
                stdout: Some(output.stdout),
                stderr: Some(output.stderr),
            })
        }
        _ => anyhow::bail!("mixed capture/inherit mode is not supported yet"),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_and_status() {
        let spec = CommandSpec::new("sh")
            .args(["-c", "echo hello; exit 3"])
            .capture();
        let output = run(spec).unwrap();
        assert_eq!(output.status.code(), Some(3));
        assert_eq!(output.stdout.as_deref(), Some(&b"hello\n"[..]));
    }

    #[test]
    fn rejects_mixed_stream_modes() {
        let mut spec = CommandSpec::new("sh");
        spec.stdout = StreamMode::Capture;
        assert!(run(spec).is_err());
    }

    #[test]
    fn reports_missing_program() {
        let err = run(CommandSpec::new("definitely-not-a-real-adt-binary"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("failed to spawn"));
    }
}
