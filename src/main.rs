use adt_build::cli::{Cli, Command};
use adt_build::cmd;
use adt_build::config;
use adt_build::delegate::adt::{self as adt_tool, AdtDelegate};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::Config(config_cmd) = &cli.command {
        return cmd::config::run(config_cmd);
    }

    let config = config::load()?;
    match cmd::build::task_for(&cli.command, &config.defaults) {
        Some(task) => cmd::build::run(&task, &config, cli.dry_run),
        None if cli.dry_run => {
            println!("{}", adt_tool::version_command_line(adt_tool::TOOL_NAME));
            Ok(())
        }
        None => {
            let delegate = AdtDelegate::from_config(&config)?;
            println!("{}", delegate.version()?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
