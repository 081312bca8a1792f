#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Stand-in `adt` that records its argv one token per line.
///
/// `ADT_STUB_CREATE` names a file to create, `ADT_STUB_EXIT` sets the exit
/// code, and `-version` prints a fixed version string.
const STUB_SCRIPT: &str = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
  echo "51.1.3.1"
  exit 0
fi
printf '%s\n' "$@" > "$ADT_STUB_LOG"
if [ -n "$ADT_STUB_CREATE" ]; then
  : > "$ADT_STUB_CREATE"
fi
exit "${ADT_STUB_EXIT:-0}"
"#;

pub struct StubAdt {
    dir: TempDir,
    pub program: PathBuf,
    pub log: PathBuf,
}

impl StubAdt {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let program = dir.path().join("adt");
        fs::write(&program, STUB_SCRIPT).unwrap();
        set_executable(&program);
        let log = dir.path().join("argv.log");
        Self { dir, program, log }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// `adt-build` wired to this stub and an empty config file.
    pub fn command(&self) -> Command {
        let mut cmd = isolated_command(self.root());
        cmd.env("ADT_BUILD_ADT_PATH", &self.program)
            .env("ADT_STUB_LOG", &self.log);
        cmd
    }

    pub fn recorded_args(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// `adt-build` that never sees the developer's own config or SDK.
pub fn isolated_command(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("adt-build");
    cmd.env("ADT_BUILD_CONFIG", dir.join("config.toml"))
        .env_remove("ADT_BUILD_ADT_PATH")
        .env_remove("AIR_SDK_HOME")
        .env_remove("FLEX_HOME")
        .env_remove("RUST_LOG");
    cmd
}

#[cfg(unix)]
fn set_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) {}
