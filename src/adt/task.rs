use std::path::{Path, PathBuf};

use super::{
    AdtError, AdtInvocation, AdtMode, CertificateArgs, FileOption, PackageArgs, SigningOptions,
};

/// Flat build-step record: mode flags plus every field any mode may use.
///
/// Populate the fields, then call [`AdtTask::to_invocation`] (or
/// [`AdtTask::to_shell`]) once. Setting `package` together with
/// `install_app` is accepted and selects install mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdtTask {
    pub package: bool,
    pub install_app: bool,
    pub uninstall_app: bool,
    pub launch_app: bool,
    pub certificate: bool,

    pub storetype: Option<String>,
    pub keystore: Option<PathBuf>,
    pub storepass: Option<String>,
    pub provisioning_profile: Option<PathBuf>,

    pub target: Option<String>,
    pub package_input: Option<PathBuf>,
    pub package_output: Option<PathBuf>,
    pub included_files: Vec<PathBuf>,
    pub file_options: Vec<String>,

    pub platform: Option<String>,
    pub appid: Option<String>,

    pub cn: Option<String>,
    pub key_type: Option<String>,
    pub pfx_file: Option<PathBuf>,
    pub password: Option<String>,
}

impl AdtTask {
    pub fn mode(&self) -> Result<AdtMode, AdtError> {
        let exclusive = [
            (self.install_app, AdtMode::InstallApp),
            (self.uninstall_app, AdtMode::UninstallApp),
            (self.launch_app, AdtMode::LaunchApp),
            (self.certificate, AdtMode::Certificate),
        ];
        let selected = exclusive
            .iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, mode)| *mode)
            .collect::<Vec<_>>();

        match selected.as_slice() {
            [] if self.package => Ok(AdtMode::Package),
            [] => Err(AdtError::NoMode),
            // installApp reuses the package flag for its `-package` input.
            [AdtMode::InstallApp] => Ok(AdtMode::InstallApp),
            [mode] if !self.package => Ok(*mode),
            many => {
                let mut names = Vec::with_capacity(many.len() + 1);
                if self.package {
                    names.push(AdtMode::Package.as_str());
                }
                names.extend(many.iter().map(AdtMode::as_str));
                Err(AdtError::ConflictingModes(names))
            }
        }
    }

    pub fn to_invocation(&self) -> Result<AdtInvocation, AdtError> {
        let mode = self.mode()?;
        let mode_name = mode.as_str();
        let invocation = match mode {
            AdtMode::Package => {
                let file_options = self
                    .file_options
                    .iter()
                    .map(|raw| raw.parse::<FileOption>())
                    .collect::<Result<Vec<_>, _>>()?;
                AdtInvocation::Package(PackageArgs {
                    signing: SigningOptions {
                        storetype: self.storetype.clone(),
                        keystore: self.keystore.clone(),
                        storepass: self.storepass.clone(),
                        provisioning_profile: self.provisioning_profile.clone(),
                    },
                    target: required(&self.target, mode_name, "target")?.to_string(),
                    output: required_path(&self.package_output, mode_name, "package_output")?
                        .to_path_buf(),
                    input: required_path(&self.package_input, mode_name, "package_input")?
                        .to_path_buf(),
                    included_files: self.included_files.clone(),
                    file_options,
                })
            }
            AdtMode::InstallApp => AdtInvocation::InstallApp {
                platform: required(&self.platform, mode_name, "platform")?.to_string(),
                package: required_path(&self.package_input, mode_name, "package_input")?
                    .to_path_buf(),
            },
            AdtMode::UninstallApp => AdtInvocation::UninstallApp {
                platform: required(&self.platform, mode_name, "platform")?.to_string(),
                appid: required(&self.appid, mode_name, "appid")?.to_string(),
            },
            AdtMode::LaunchApp => AdtInvocation::LaunchApp {
                platform: required(&self.platform, mode_name, "platform")?.to_string(),
                appid: required(&self.appid, mode_name, "appid")?.to_string(),
            },
            AdtMode::Certificate => AdtInvocation::Certificate(CertificateArgs {
                cn: required(&self.cn, mode_name, "cn")?.to_string(),
                key_type: required(&self.key_type, mode_name, "key_type")?.to_string(),
                pfx_file: required_path(&self.pfx_file, mode_name, "pfx_file")?.to_path_buf(),
                password: required(&self.password, mode_name, "password")?.to_string(),
            }),
        };
        Ok(invocation)
    }

    pub fn to_args(&self) -> Result<Vec<String>, AdtError> {
        Ok(self.to_invocation()?.to_args())
    }

    pub fn to_shell(&self) -> Result<String, AdtError> {
        Ok(self.to_invocation()?.to_shell())
    }
}

impl TryFrom<AdtTask> for AdtInvocation {
    type Error = AdtError;

    fn try_from(task: AdtTask) -> Result<Self, Self::Error> {
        task.to_invocation()
    }
}

fn required<'a>(
    value: &'a Option<String>,
    mode: &'static str,
    field: &'static str,
) -> Result<&'a str, AdtError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(AdtError::MissingField { mode, field })
}

fn required_path<'a>(
    value: &'a Option<PathBuf>,
    mode: &'static str,
    field: &'static str,
) -> Result<&'a Path, AdtError> {
    value
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(AdtError::MissingField { mode, field })
}
