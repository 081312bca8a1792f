//! Typed `adt` invocations and their command-line form.
//!
//! Each [`AdtInvocation`] variant carries only the fields its mode needs, so
//! the token order below is the whole contract with the external tool.

mod error;
mod task;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use error::AdtError;
pub use task::AdtTask;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdtMode {
    Package,
    InstallApp,
    UninstallApp,
    LaunchApp,
    Certificate,
}

impl AdtMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdtMode::Package => "package",
            AdtMode::InstallApp => "installApp",
            AdtMode::UninstallApp => "uninstallApp",
            AdtMode::LaunchApp => "launchApp",
            AdtMode::Certificate => "certificate",
        }
    }

    fn as_flag(&self) -> &'static str {
        match self {
            AdtMode::Package => "-package",
            AdtMode::InstallApp => "-installApp",
            AdtMode::UninstallApp => "-uninstallApp",
            AdtMode::LaunchApp => "-launchApp",
            AdtMode::Certificate => "-certificate",
        }
    }
}

impl fmt::Display for AdtMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signing credentials passed ahead of `-target` in package mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SigningOptions {
    pub storetype: Option<String>,
    pub keystore: Option<PathBuf>,
    pub storepass: Option<String>,
    pub provisioning_profile: Option<PathBuf>,
}

impl SigningOptions {
    fn push_args(&self, args: &mut Vec<String>) {
        if let Some(storetype) = non_empty(self.storetype.as_deref()) {
            args.push("-storetype".into());
            args.push(storetype.to_string());
        }
        if let Some(keystore) = self.keystore.as_deref().filter(|p| !is_empty_path(p)) {
            args.push("-keystore".into());
            args.push(path_arg(keystore));
        }
        if let Some(storepass) = non_empty(self.storepass.as_deref()) {
            args.push("-storepass".into());
            args.push(storepass.to_string());
        }
        if let Some(profile) = self
            .provisioning_profile
            .as_deref()
            .filter(|p| !is_empty_path(p))
        {
            args.push("-provisioning-profile".into());
            args.push(path_arg(profile));
        }
    }
}

/// An extra `-C <dir> <path>` pair appended after the included files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOption {
    pub dir: PathBuf,
    pub path: PathBuf,
}

impl FileOption {
    pub fn new(dir: impl Into<PathBuf>, path: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            path: path.into(),
        }
    }
}

impl FromStr for FileOption {
    type Err = AdtError;

    /// Parses the `"<dir> <path>"` form; either word may be shell-quoted.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| AdtError::InvalidFileOption {
            value: value.to_string(),
            reason,
        };
        let words = shell_words::split(value).map_err(|err| invalid(err.to_string()))?;
        match words.as_slice() {
            [dir, path] => Ok(FileOption::new(dir, path)),
            other => Err(invalid(format!(
                "expected `<dir> <path>`, found {} word(s)",
                other.len()
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageArgs {
    pub signing: SigningOptions,
    pub target: String,
    pub output: PathBuf,
    pub input: PathBuf,
    pub included_files: Vec<PathBuf>,
    pub file_options: Vec<FileOption>,
}

impl PackageArgs {
    pub fn new(
        target: impl Into<String>,
        output: impl Into<PathBuf>,
        input: impl Into<PathBuf>,
    ) -> Self {
        Self {
            signing: SigningOptions::default(),
            target: target.into(),
            output: output.into(),
            input: input.into(),
            included_files: Vec::new(),
            file_options: Vec::new(),
        }
    }

    pub fn with_signing(mut self, signing: SigningOptions) -> Self {
        self.signing = signing;
        self
    }

    pub fn with_included_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.included_files.push(file.into());
        self
    }

    pub fn with_file_option(mut self, option: FileOption) -> Self {
        self.file_options.push(option);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateArgs {
    pub cn: String,
    pub key_type: String,
    pub pfx_file: PathBuf,
    pub password: String,
}

/// One `adt` command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdtInvocation {
    Package(PackageArgs),
    InstallApp { platform: String, package: PathBuf },
    UninstallApp { platform: String, appid: String },
    LaunchApp { platform: String, appid: String },
    Certificate(CertificateArgs),
}

impl AdtInvocation {
    pub fn mode(&self) -> AdtMode {
        match self {
            AdtInvocation::Package(_) => AdtMode::Package,
            AdtInvocation::InstallApp { .. } => AdtMode::InstallApp,
            AdtInvocation::UninstallApp { .. } => AdtMode::UninstallApp,
            AdtInvocation::LaunchApp { .. } => AdtMode::LaunchApp,
            AdtInvocation::Certificate(_) => AdtMode::Certificate,
        }
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![self.mode().as_flag().to_string()];
        match self {
            AdtInvocation::Package(package) => {
                package.signing.push_args(&mut args);
                args.push("-target".into());
                args.push(package.target.clone());
                args.push(path_arg(&package.output));
                args.push(path_arg(&package.input));
                args.extend(
                    package
                        .included_files
                        .iter()
                        .filter(|file| !is_empty_path(file))
                        .map(|file| path_arg(file)),
                );
                for option in &package.file_options {
                    args.push("-C".into());
                    args.push(path_arg(&option.dir));
                    args.push(path_arg(&option.path));
                }
            }
            AdtInvocation::InstallApp { platform, package } => {
                args.push("-platform".into());
                args.push(platform.clone());
                args.push("-package".into());
                args.push(path_arg(package));
            }
            AdtInvocation::UninstallApp { platform, appid }
            | AdtInvocation::LaunchApp { platform, appid } => {
                args.push("-platform".into());
                args.push(platform.clone());
                args.push("-appid".into());
                args.push(appid.clone());
            }
            AdtInvocation::Certificate(cert) => {
                args.push("-cn".into());
                args.push(cert.cn.clone());
                args.push(cert.key_type.clone());
                args.push(path_arg(&cert.pfx_file));
                args.push(cert.password.clone());
            }
        }
        args
    }

    /// Space-joined tokens, quoted only where a POSIX shell needs it.
    pub fn to_shell(&self) -> String {
        shell_words::join(self.to_args())
    }

    /// File the tool is expected to write when the invocation succeeds.
    pub fn artifact(&self) -> Option<&Path> {
        match self {
            AdtInvocation::Package(package) => Some(&package.output),
            AdtInvocation::Certificate(cert) => Some(&cert.pfx_file),
            _ => None,
        }
    }
}

impl fmt::Display for AdtInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn is_empty_path(path: &Path) -> bool {
    path.as_os_str().is_empty()
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "test/fixtures/air/simple";

    fn fixture(name: &str) -> PathBuf {
        Path::new(FIXTURE).join(name)
    }

    fn pkcs12(keystore: &str) -> SigningOptions {
        SigningOptions {
            storetype: Some("PKCS12".into()),
            keystore: Some(fixture(keystore)),
            storepass: Some("samplePassword".into()),
            provisioning_profile: None,
        }
    }

    fn air_package() -> PackageArgs {
        PackageArgs::new(
            "apk-debug",
            fixture("SomeProject.air"),
            fixture("SomeProject.xml"),
        )
        .with_signing(pkcs12("SomeProject.pfx"))
        .with_included_file(fixture("SomeProject.swf"))
    }

    #[test]
    fn package_emits_signing_before_target_and_positionals() {
        let invocation = AdtInvocation::Package(air_package());
        assert_eq!(
            invocation.to_shell(),
            "-package -storetype PKCS12 -keystore test/fixtures/air/simple/SomeProject.pfx \
             -storepass samplePassword -target apk-debug \
             test/fixtures/air/simple/SomeProject.air \
             test/fixtures/air/simple/SomeProject.xml \
             test/fixtures/air/simple/SomeProject.swf"
        );
    }

    #[test]
    fn file_options_are_appended_last() {
        let option: FileOption = "bin path/to/asset.xml".parse().unwrap();
        let invocation = AdtInvocation::Package(air_package().with_file_option(option));
        let shell = invocation.to_shell();
        assert!(
            shell.ends_with("test/fixtures/air/simple/SomeProject.swf -C bin path/to/asset.xml"),
            "unexpected command line: {shell}"
        );
    }

    #[test]
    fn provisioning_profile_sits_between_storepass_and_target() {
        let mut signing = pkcs12("SomeProject.p12");
        signing.provisioning_profile = Some(fixture("Profile.mobileprovision"));
        let package = PackageArgs::new(
            "ipa-test",
            fixture("SomeProject.ipa"),
            fixture("SomeProject.xml"),
        )
        .with_signing(signing)
        .with_included_file(fixture("SomeProject.swf"));

        assert_eq!(
            AdtInvocation::Package(package).to_shell(),
            "-package -storetype PKCS12 -keystore test/fixtures/air/simple/SomeProject.p12 \
             -storepass samplePassword -provisioning-profile \
             test/fixtures/air/simple/Profile.mobileprovision -target ipa-test \
             test/fixtures/air/simple/SomeProject.ipa \
             test/fixtures/air/simple/SomeProject.xml \
             test/fixtures/air/simple/SomeProject.swf"
        );
    }

    #[test]
    fn unsigned_package_skips_signing_flags() {
        let package = PackageArgs::new("air", "out.air", "app.xml").with_signing(SigningOptions {
            storetype: Some(String::new()),
            ..SigningOptions::default()
        });
        assert_eq!(
            AdtInvocation::Package(package).to_args(),
            ["-package", "-target", "air", "out.air", "app.xml"]
        );
    }

    #[test]
    fn empty_included_files_are_skipped() {
        let package = PackageArgs::new("air", "out.air", "app.xml")
            .with_included_file("")
            .with_included_file("App.swf");
        let invocation = AdtInvocation::Package(package);
        assert_eq!(
            invocation.to_args(),
            ["-package", "-target", "air", "out.air", "app.xml", "App.swf"]
        );
        assert!(!invocation.to_shell().contains("''"));
    }

    #[test]
    fn device_modes_have_fixed_shape() {
        let install = AdtInvocation::InstallApp {
            platform: "android".into(),
            package: fixture("SomeProject.apk"),
        };
        assert_eq!(
            install.to_shell(),
            "-installApp -platform android -package test/fixtures/air/simple/SomeProject.apk"
        );

        let uninstall = AdtInvocation::UninstallApp {
            platform: "android".into(),
            appid: "com.foo.bar.SomeProject".into(),
        };
        assert_eq!(
            uninstall.to_shell(),
            "-uninstallApp -platform android -appid com.foo.bar.SomeProject"
        );

        let launch = AdtInvocation::LaunchApp {
            platform: "android".into(),
            appid: "com.foo.bar.SomeProject".into(),
        };
        assert_eq!(
            launch.to_shell(),
            "-launchApp -platform android -appid com.foo.bar.SomeProject"
        );
        assert_eq!(launch.artifact(), None);
    }

    #[test]
    fn certificate_lists_positionals_after_cn() {
        let invocation = AdtInvocation::Certificate(CertificateArgs {
            cn: "SelfCertificate".into(),
            key_type: "2048-RSA".into(),
            pfx_file: fixture("SomeProject.pfx"),
            password: "samplePassword".into(),
        });
        assert_eq!(
            invocation.to_shell(),
            "-certificate -cn SelfCertificate 2048-RSA test/fixtures/air/simple/SomeProject.pfx samplePassword"
        );
        assert_eq!(invocation.artifact(), Some(fixture("SomeProject.pfx").as_path()));
    }

    #[test]
    fn conversion_is_repeatable() {
        let invocation = AdtInvocation::Package(air_package());
        assert_eq!(invocation.to_shell(), invocation.to_shell());
        assert_eq!(invocation.to_string(), invocation.to_shell());
    }

    #[test]
    fn shell_form_quotes_whitespace() {
        let invocation = AdtInvocation::Certificate(CertificateArgs {
            cn: "My Company".into(),
            key_type: "2048-RSA".into(),
            pfx_file: PathBuf::from("cert.p12"),
            password: "it's secret".into(),
        });
        assert_eq!(invocation.to_args()[2], "My Company");
        assert_eq!(
            invocation.to_shell(),
            "-certificate -cn 'My Company' 2048-RSA cert.p12 'it'\\''s secret'"
        );
    }

    #[test]
    fn file_option_accepts_quoted_directory() {
        let option: FileOption = "'assets dir' icons/icon.png".parse().unwrap();
        assert_eq!(option, FileOption::new("assets dir", "icons/icon.png"));
    }

    #[test]
    fn file_option_rejects_wrong_arity() {
        let err = "bin".parse::<FileOption>().unwrap_err();
        assert!(matches!(err, AdtError::InvalidFileOption { .. }));
        assert!("bin a b".parse::<FileOption>().is_err());
        assert!("'unterminated path".parse::<FileOption>().is_err());
    }
}
