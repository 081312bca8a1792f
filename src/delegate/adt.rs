use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use anyhow::{Context, Result, anyhow, bail};
use which::which;

use crate::adt::AdtInvocation;
use crate::config::AdtConfig;
use crate::util::process::{self, CommandOutput, CommandSpec};

pub const TOOL_NAME: &str = "adt";
pub const ADT_PATH_ENV: &str = "ADT_BUILD_ADT_PATH";
const VERSION_FLAG: &str = "-version";
const SDK_HOME_ENVS: [&str; 2] = ["AIR_SDK_HOME", "FLEX_HOME"];

#[cfg(windows)]
const SDK_BINARY: &str = "adt.bat";
#[cfg(not(windows))]
const SDK_BINARY: &str = "adt";

pub struct AdtDelegate {
    program: OsString,
}

impl AdtDelegate {
    pub fn from_config(config: &AdtConfig) -> Result<Self> {
        let program = resolve_program(config, |key| std::env::var_os(key))?;
        tracing::debug!(program = %program.display(), "resolved adt");
        Ok(Self {
            program: program.into_os_string(),
        })
    }

    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The full command line, program included, as a shell would receive it.
    pub fn command_line(&self, invocation: &AdtInvocation) -> String {
        command_line(&self.program.to_string_lossy(), invocation)
    }

    /// Runs the invocation and checks that its artifact, if any, was written.
    pub fn execute(&self, invocation: &AdtInvocation) -> Result<()> {
        let mode = invocation.mode();
        tracing::info!(command = %self.command_line(invocation), "running adt {mode}");
        let spec = CommandSpec::new(self.program.clone()).args(invocation.to_args());
        let output = process::run(spec)?;
        self.ensure_success(mode.as_str(), &output)?;
        ensure_artifact(invocation)
    }

    /// Asks the tool for its version string (`adt -version`).
    pub fn version(&self) -> Result<String> {
        let spec = CommandSpec::new(self.program.clone())
            .args([VERSION_FLAG])
            .capture();
        let output = process::run(spec)?;
        self.ensure_success(VERSION_FLAG, &output)?;
        let stdout = output
            .stdout
            .as_deref()
            .context("missing stdout from adt -version")?;
        Ok(String::from_utf8_lossy(stdout).trim().to_string())
    }

    fn ensure_success(&self, label: &str, output: &CommandOutput) -> Result<()> {
        if output.status.success() {
            return Ok(());
        }

        if let Some(stderr) = output.stderr.as_ref()
            && !stderr.is_empty()
        {
            eprintln!("{}", String::from_utf8_lossy(stderr));
        }
        bail!(
            "`{}` {label} {}",
            self.program.to_string_lossy(),
            describe_failure(&output.status)
        );
    }
}

fn describe_failure(status: &ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("failed with exit code {code}");
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("terminated by signal {signal}");
        }
    }
    "terminated without an exit code".to_string()
}

/// What `--dry-run version` prints in place of running the tool.
pub fn version_command_line(program: &str) -> String {
    format!("{} {VERSION_FLAG}", shell_words::quote(program))
}

pub fn command_line(program: &str, invocation: &AdtInvocation) -> String {
    format!("{} {}", shell_words::quote(program), invocation.to_shell())
}

pub fn ensure_artifact(invocation: &AdtInvocation) -> Result<()> {
    let Some(path) = invocation.artifact() else {
        return Ok(());
    };
    if !path.exists() {
        bail!(
            "adt {} finished but `{}` was not created",
            invocation.mode(),
            path.display()
        );
    }
    tracing::info!(artifact = %path.display(), "created");
    Ok(())
}

fn resolve_program<F>(config: &AdtConfig, env: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    if let Some(env_override) = env(ADT_PATH_ENV) {
        let path = PathBuf::from(env_override);
        if !path.exists() {
            bail!(
                "{ADT_PATH_ENV} points to `{}` but it does not exist",
                path.display()
            );
        }
        return Ok(path);
    }

    if let Some(custom) = config.tools.adt.path.as_ref() {
        if !custom.exists() {
            bail!("configured adt path `{}` does not exist", custom.display());
        }
        return Ok(custom.clone());
    }

    let sdk_home = config.tools.adt.sdk_home.clone().or_else(|| {
        SDK_HOME_ENVS
            .iter()
            .find_map(|key| env(key).map(PathBuf::from))
    });
    if let Some(home) = sdk_home {
        let candidate = sdk_binary(&home);
        if candidate.exists() {
            return Ok(candidate);
        }
        tracing::debug!(candidate = %candidate.display(), "no adt under SDK home");
    }

    which(TOOL_NAME).map_err(|error| {
        anyhow!(
            "adt (Adobe AIR Developer Tool) is required but was not found ({error}). Put `adt` \
             on your PATH, set {ADT_PATH_ENV}, point AIR_SDK_HOME or FLEX_HOME at an AIR SDK, \
             or set [tools.adt].path in config."
        )
    })
}

fn sdk_binary(home: &Path) -> PathBuf {
    home.join("bin").join(SDK_BINARY)
}
