//! apexmsg-codegen: Generate Apex Msg classes from sObject describe metadata
//!
//! This crate provides both a CLI tool and a library for generating Apex
//! data-transfer ("Msg") classes. Given an object type it produces:
//!
//! - `src/classes/<Object>Msg.cls` with one camelCase property per updateable
//!   field, constructors, `constructObject` and `toRecord` conversions
//! - the companion `<Object>Msg.cls-meta.xml` carrying the configured API version
//!
//! Schema metadata comes from the org itself (SOAP login, then the REST
//! describe endpoints) or, offline, from describe documents saved under
//! `.sfschema/`.
//!
//! Field names are transcoded from their platform form
//! (`Acme__Invoice_Total__c`, `GUID__c`, `SLAViolation`) into idiomatic
//! property names (`invoiceTotal`, `guid`, `slaViolation`); the `Id` field is
//! always kept and mapped to `recordId`.
//!
//! # Project layout
//!
//! ```text
//! force.json          {"url", "username", "password", "apiVersion"}
//! .sfschema/          saved describe documents for offline runs (global.json, <Object>.json)
//! src/classes/        generated classes land here
//! ```
//!
//! # Library Usage
//!
//! ```rust,ignore
//! let outcome = apexmsg_codegen::CodegenBuilder::new("path/to/project")
//!     .object("Account")
//!     .open_in_editor(false)
//!     .generate()?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! apexmsg-codegen --project . generate
//! apexmsg-codegen --project . --object Account --no-open
//! apexmsg-codegen --offline inspect Account
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod provider;

use std::path::{Path, PathBuf};

use tracing::info;

pub use config::{CodegenConfig, ForceConfig};
pub use error::{CodegenError, Result};
pub use pipeline::{run_pipeline, GeneratedArtifacts, Outcome, Stage};

use provider::{ConfiguredProvider, FixedPicker, FsSink, Picker};

/// Main entry point for code generation
pub fn generate(config: &CodegenConfig) -> Result<Outcome> {
    config.validate()?;
    info!("Generating Msg class in {:?}", config.project_dir);

    let provider = ConfiguredProvider::from_config(config)?;
    let sink = FsSink::new(config.open_in_editor, config.dry_run);
    let picker = default_picker(config)?;

    run_pipeline(config, &provider, picker.as_ref(), &sink)
}

/// A fixed picker when the object is preselected, otherwise the terminal prompt
fn default_picker(config: &CodegenConfig) -> Result<Box<dyn Picker>> {
    if let Some(object) = &config.object {
        return Ok(Box::new(FixedPicker::new(object.clone())));
    }

    #[cfg(feature = "cli")]
    {
        Ok(Box::new(provider::InteractivePicker))
    }
    #[cfg(not(feature = "cli"))]
    {
        Err(CodegenError::ConfigError(
            "no object type given and interactive selection is unavailable".into(),
        ))
    }
}

/// Builder pattern for programmatic configuration
pub struct CodegenBuilder {
    config: CodegenConfig,
}

impl CodegenBuilder {
    /// Create a new builder rooted at the given project directory
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            config: CodegenConfig::default_with_project(project_dir.as_ref().to_path_buf()),
        }
    }

    /// Set the directory of saved describe documents (relative to the project)
    pub fn snapshot_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.snapshot_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Use an explicit `force.json` instead of searching the project
    pub fn force_config(mut self, path: impl AsRef<Path>) -> Self {
        self.config.force_config = Some(PathBuf::from(path.as_ref()));
        self
    }

    /// Read saved describe documents instead of logging in
    pub fn offline(mut self) -> Self {
        self.config.offline = true;
        self
    }

    /// Generate for this object type without prompting
    pub fn object(mut self, name: &str) -> Self {
        self.config.object = Some(name.to_string());
        self
    }

    /// Open the generated class in the user's editor
    pub fn open_in_editor(mut self, open: bool) -> Self {
        self.config.open_in_editor = open;
        self
    }

    /// Enable dry run mode (preview without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// The configuration built so far
    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Generate the class
    pub fn generate(self) -> Result<Outcome> {
        generate(&self.config)
    }
}
