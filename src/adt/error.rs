use thiserror::Error;

/// Reasons an [`AdtTask`](super::AdtTask) cannot be turned into an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdtError {
    #[error("no adt mode selected; set one of package, installApp, uninstallApp, launchApp, certificate")]
    NoMode,
    #[error("adt modes {0:?} cannot be combined in a single invocation")]
    ConflictingModes(Vec<&'static str>),
    #[error("{mode} mode requires `{field}`")]
    MissingField {
        mode: &'static str,
        field: &'static str,
    },
    #[error("invalid file option `{value}`: {reason}")]
    InvalidFileOption { value: String, reason: String },
}
