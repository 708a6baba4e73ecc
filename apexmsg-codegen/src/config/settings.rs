//! Configuration settings for apexmsg-codegen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::error::{CodegenError, Result};

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Project root; classes are written to `<project_dir>/src/classes`
    #[serde(default = "default_project_dir")]
    pub project_dir: PathBuf,

    /// Explicit path to `force.json` (searched for under the project if unset)
    #[serde(default)]
    pub force_config: Option<PathBuf>,

    /// Directory of saved describe documents, relative to the project
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,

    /// Read describe documents from `snapshot_dir` instead of logging in
    #[serde(default = "default_offline")]
    pub offline: bool,

    /// Object type to generate without prompting
    #[serde(default)]
    pub object: Option<String>,

    /// Open the generated class in `$VISUAL` / `$EDITOR`
    #[serde(default = "default_open_in_editor")]
    pub open_in_editor: bool,

    /// Dry run mode - preview without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_project_dir() -> PathBuf {
    PathBuf::from(defaults::PROJECT_DIR)
}
fn default_snapshot_dir() -> PathBuf {
    PathBuf::from(defaults::SNAPSHOT_DIR)
}
fn default_offline() -> bool {
    defaults::OFFLINE
}
fn default_open_in_editor() -> bool {
    defaults::OPEN_IN_EDITOR
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            project_dir: default_project_dir(),
            force_config: None,
            snapshot_dir: default_snapshot_dir(),
            offline: default_offline(),
            object: None,
            open_in_editor: default_open_in_editor(),
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl CodegenConfig {
    /// Create a default config rooted at the given project directory
    pub fn default_with_project(project_dir: PathBuf) -> Self {
        Self {
            project_dir,
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CodegenConfig = toml::from_str(&content).map_err(|e| {
            CodegenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            // Try default locations
            builder = builder.add_source(File::with_name("apexmsg").required(false));
        }

        // Override with environment variables (APEXMSG_*)
        builder = builder.add_source(
            Environment::with_prefix("APEXMSG")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: CodegenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Snapshot directory resolved against the project directory
    pub fn resolved_snapshot_dir(&self) -> PathBuf {
        self.project_dir.join(&self.snapshot_dir)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.project_dir.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "project_dir is required".into(),
            ));
        }

        if !self.project_dir.is_dir() {
            return Err(CodegenError::ValidationError(format!(
                "Project directory not found: {}",
                self.project_dir.display()
            )));
        }

        if let Some(object) = &self.object {
            if object.trim().is_empty() {
                return Err(CodegenError::ValidationError(
                    "object must not be blank when set".into(),
                ));
            }
        }

        Ok(())
    }
}
