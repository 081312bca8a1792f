use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CONFIG_ENV: &str = "ADT_BUILD_CONFIG";

#[derive(Debug, Default, Deserialize)]
pub struct AdtConfig {
    #[serde(default)]
    pub tools: ToolsSection,
    #[serde(default)]
    pub defaults: DefaultsSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolsSection {
    #[serde(default)]
    pub adt: ToolEntry,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolEntry {
    /// Explicit path to the adt executable.
    pub path: Option<PathBuf>,
    /// AIR SDK root; adt is looked up under `bin/`.
    pub sdk_home: Option<PathBuf>,
}

/// Values used when the command line leaves them out.
#[derive(Debug, Default, Deserialize)]
pub struct DefaultsSection {
    pub storetype: Option<String>,
    pub keystore: Option<PathBuf>,
    pub platform: Option<String>,
    pub target: Option<String>,
}

pub fn load() -> Result<AdtConfig> {
    let path_override = std::env::var(CONFIG_ENV).ok();
    load_from(path_override.as_deref())
}

/// The file `load` reads and `config set` writes: `ADT_BUILD_CONFIG` if set,
/// otherwise [`config_path`].
pub fn resolved_path() -> Option<PathBuf> {
    let path_override = std::env::var(CONFIG_ENV).ok();
    config_path_override(path_override.as_deref())
}

pub fn load_from(path_override: Option<&str>) -> Result<AdtConfig> {
    let Some(path) = config_path_override(path_override) else {
        return Ok(AdtConfig::default());
    };

    if !path.exists() {
        return Ok(AdtConfig::default());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    let config: AdtConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config at {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn config_path_override(path_override: Option<&str>) -> Option<PathBuf> {
    if let Some(raw) = path_override {
        return Some(PathBuf::from(raw));
    }
    config_path()
}

pub fn config_path() -> Option<PathBuf> {
    // Prefer XDG-style config path, but fall back to ~/.adt-build/config.toml.
    if let Some(mut dir) = dirs::config_dir() {
        dir.push("adt-build");
        dir.push("config.toml");
        if dir.exists() {
            return Some(dir);
        }
    }
    dirs::home_dir().map(|mut home| {
        home.push(".adt-build");
        home.push("config.toml");
        home
    })
}
