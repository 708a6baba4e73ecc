//! Connection settings from the project's `force.json`

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::defaults;
use crate::error::{CodegenError, Result};

/// Validated connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct ForceConfig {
    /// Login endpoint (e.g. https://login.salesforce.com)
    pub url: String,
    pub username: String,
    pub password: String,
    /// API version written into generated metadata (e.g. "58.0")
    pub api_version: String,
}

/// `force.json` as written on disk; every field may be missing
#[derive(Debug, Default, Deserialize)]
struct RawForceConfig {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    #[serde(rename = "apiVersion", alias = "apiversion", alias = "api_version")]
    api_version: Option<String>,
}

impl fmt::Debug for ForceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForceConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"********")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl ForceConfig {
    /// Locate and load `force.json`.
    ///
    /// An explicit path wins; otherwise the project directory is searched.
    pub fn load(explicit: Option<&Path>, project_dir: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => {
                return Err(CodegenError::ConfigError(format!(
                    "Can't find \"{}\"",
                    path.display()
                )))
            }
            None => find_force_config(project_dir).ok_or_else(|| {
                CodegenError::ConfigError(format!(
                    "Can't find a \"{}\" file in the root of your project.",
                    defaults::FORCE_CONFIG_FILE
                ))
            })?,
        };
        Self::from_file(&path)
    }

    /// Load using config-rs (JSON file + FORCE_* environment overrides)
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading connection config from {}", path.display());
        let raw: RawForceConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Json))
            .add_source(Environment::with_prefix("FORCE"))
            .build()?
            .try_deserialize()?;
        Self::validate(raw)
    }

    /// Parse a `force.json` document without environment overrides
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawForceConfig = serde_json::from_str(json).map_err(|e| {
            CodegenError::ConfigError(format!(
                "Failed to parse {}: {}",
                defaults::FORCE_CONFIG_FILE,
                e
            ))
        })?;
        Self::validate(raw)
    }

    fn validate(raw: RawForceConfig) -> Result<Self> {
        Ok(Self {
            username: required(raw.username, "username")?,
            password: required(raw.password, "password")?,
            url: required(raw.url, "url")?,
            api_version: required(raw.api_version, "apiVersion")?,
        })
    }
}

fn required(value: Option<String>, key: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CodegenError::ValidationError(format!(
            "No value for \"{}\" is set in \"{}\".",
            key,
            defaults::FORCE_CONFIG_FILE
        ))),
    }
}

/// Find `force.json`, preferring the project root, then the first match
/// (by sorted path) in a non-hidden subdirectory
pub fn find_force_config(project_dir: &Path) -> Option<PathBuf> {
    let root_candidate = project_dir.join(defaults::FORCE_CONFIG_FILE);
    if root_candidate.is_file() {
        return Some(root_candidate);
    }

    WalkDir::new(project_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e))
        .filter_map(|e| e.ok())
        .find(|e| e.file_type().is_file() && e.file_name() == defaults::FORCE_CONFIG_FILE)
        .map(|e| e.into_path())
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || defaults::SKIPPED_DIRS.contains(&name.as_ref())
}
