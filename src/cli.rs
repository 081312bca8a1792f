use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "adt-build")]
#[command(version)]
#[command(about = "Package, sign, install, and launch Adobe AIR applications via adt")]
pub struct Cli {
    /// Print the adt command line instead of running it
    #[arg(long = "dry-run", global = true)]
    pub dry_run: bool,
    /// Debug logging (overrides RUST_LOG)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Package an application (adt -package)
    Package(PackageArgs),
    /// Install a package on a device (adt -installApp)
    Install(InstallArgs),
    /// Remove an application from a device (adt -uninstallApp)
    Uninstall(AppArgs),
    /// Launch an installed application (adt -launchApp)
    Launch(AppArgs),
    /// Create a self-signed certificate (adt -certificate)
    Certificate(CertificateArgs),
    /// Print the version reported by the resolved adt
    Version,
    /// Manage adt-build configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Package target (air, apk, apk-debug, ipa-test, ...); falls back to defaults.target
    #[arg(long = "target")]
    pub target: Option<String>,
    /// Package file to write
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Application descriptor (application.xml)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Keystore type, e.g. PKCS12; falls back to defaults.storetype
    #[arg(long = "storetype")]
    pub storetype: Option<String>,
    /// Keystore file; falls back to defaults.keystore
    #[arg(long = "keystore")]
    pub keystore: Option<PathBuf>,
    /// Keystore password
    #[arg(long = "storepass")]
    pub storepass: Option<String>,
    /// iOS provisioning profile
    #[arg(long = "provisioning-profile")]
    pub provisioning_profile: Option<PathBuf>,
    /// Extra `<dir> <path>` pair passed as `-C dir path` (repeatable)
    #[arg(long = "file-option", value_name = "DIR PATH")]
    pub file_options: Vec<String>,
    /// Files to include in the package, in order
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Device platform (android, ios); falls back to defaults.platform
    #[arg(long = "platform")]
    pub platform: Option<String>,
    /// Package to install
    #[arg(long = "package")]
    pub package: PathBuf,
}

#[derive(Args, Debug)]
pub struct AppArgs {
    /// Device platform (android, ios); falls back to defaults.platform
    #[arg(long = "platform")]
    pub platform: Option<String>,
    /// Application id from the descriptor
    #[arg(long = "appid")]
    pub appid: String,
}

#[derive(Args, Debug)]
pub struct CertificateArgs {
    /// Certificate common name
    #[arg(long = "cn")]
    pub cn: String,
    /// Key type
    #[arg(long = "key-type", default_value = "2048-RSA")]
    pub key_type: String,
    /// Certificate file to write
    #[arg(long = "pfx")]
    pub pfx: PathBuf,
    /// Certificate password
    #[arg(long = "password")]
    pub password: String,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a key in the adt-build config (e.g. defaults.platform)
    Set(ConfigSetArgs),
}

#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Config key path (e.g. tools.adt.sdk_home)
    pub key: String,
    /// Value to assign to the key (stored as a string)
    pub value: String,
    /// Override config file path (default: ~/.adt-build/config.toml)
    #[arg(long = "file")]
    pub file: Option<PathBuf>,
}
