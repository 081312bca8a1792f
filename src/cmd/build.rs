use anyhow::{Context, Result};

use crate::adt::{AdtInvocation, AdtTask};
use crate::cli::{AppArgs, CertificateArgs, Command, InstallArgs, PackageArgs};
use crate::config::{AdtConfig, DefaultsSection};
use crate::delegate::adt::{self as adt_tool, AdtDelegate};

/// Fills an [`AdtTask`] from a mode subcommand, using config defaults for
/// anything left off the command line. Returns `None` for non-mode commands.
pub fn task_for(command: &Command, defaults: &DefaultsSection) -> Option<AdtTask> {
    let task = match command {
        Command::Package(args) => package_task(args, defaults),
        Command::Install(args) => install_task(args, defaults),
        Command::Uninstall(args) => AdtTask {
            uninstall_app: true,
            ..app_task(args, defaults)
        },
        Command::Launch(args) => AdtTask {
            launch_app: true,
            ..app_task(args, defaults)
        },
        Command::Certificate(args) => certificate_task(args),
        Command::Version | Command::Config(_) => return None,
    };
    Some(task)
}

pub fn run(task: &AdtTask, config: &AdtConfig, dry_run: bool) -> Result<()> {
    let invocation: AdtInvocation = task
        .to_invocation()
        .context("invalid adt invocation")?;

    if dry_run {
        println!("{}", adt_tool::command_line(adt_tool::TOOL_NAME, &invocation));
        return Ok(());
    }

    let delegate = AdtDelegate::from_config(config)?;
    delegate.execute(&invocation)
}

fn package_task(args: &PackageArgs, defaults: &DefaultsSection) -> AdtTask {
    AdtTask {
        package: true,
        target: args.target.clone().or_else(|| defaults.target.clone()),
        package_output: Some(args.output.clone()),
        package_input: Some(args.input.clone()),
        storetype: args.storetype.clone().or_else(|| defaults.storetype.clone()),
        keystore: args.keystore.clone().or_else(|| defaults.keystore.clone()),
        storepass: args.storepass.clone(),
        provisioning_profile: args.provisioning_profile.clone(),
        included_files: args.files.clone(),
        file_options: args.file_options.clone(),
        ..AdtTask::default()
    }
}

fn install_task(args: &InstallArgs, defaults: &DefaultsSection) -> AdtTask {
    AdtTask {
        install_app: true,
        platform: args.platform.clone().or_else(|| defaults.platform.clone()),
        package_input: Some(args.package.clone()),
        ..AdtTask::default()
    }
}

fn app_task(args: &AppArgs, defaults: &DefaultsSection) -> AdtTask {
    AdtTask {
        platform: args.platform.clone().or_else(|| defaults.platform.clone()),
        appid: Some(args.appid.clone()),
        ..AdtTask::default()
    }
}

fn certificate_task(args: &CertificateArgs) -> AdtTask {
    AdtTask {
        certificate: true,
        cn: Some(args.cn.clone()),
        key_type: Some(args.key_type.clone()),
        pfx_file: Some(args.pfx.clone()),
        password: Some(args.password.clone()),
        ..AdtTask::default()
    }
}
