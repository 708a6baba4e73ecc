//! Schema provider backed by saved describe documents
//!
//! Layout:
//!
//! ```text
//! <dir>/global.json        describe-global response
//! <dir>/<Object>.json      one describe response per object type
//! ```
//!
//! Both the raw REST responses and `sf ... --json` output are accepted.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{check_object_name, SchemaProvider, SchemaSession};
use crate::config::ForceConfig;
use crate::error::{CodegenError, Result};
use crate::parser::{
    parse_global_describe, parse_object_describe, ObjectDescribe, ObjectTypeSummary,
};

/// File name of the describe-global document
pub const GLOBAL_DESCRIBE_FILE: &str = "global.json";

/// Reads describe documents from a directory
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    dir: PathBuf,
}

/// An open snapshot
#[derive(Debug, Clone)]
pub struct SnapshotSession {
    dir: PathBuf,
    org: String,
}

impl SnapshotProvider {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SchemaProvider for SnapshotProvider {
    type Session = SnapshotSession;

    fn connect(&self, config: &ForceConfig) -> Result<SnapshotSession> {
        if !self.dir.is_dir() {
            return Err(CodegenError::ConnectionError(format!(
                "schema snapshot directory not found: {}",
                self.dir.display()
            )));
        }
        if !self.dir.join(GLOBAL_DESCRIBE_FILE).is_file() {
            return Err(CodegenError::ConnectionError(format!(
                "no {} in {}",
                GLOBAL_DESCRIBE_FILE,
                self.dir.display()
            )));
        }

        info!(
            "Using schema snapshot {} for {} at {}",
            self.dir.display(),
            config.username,
            config.url
        );
        Ok(SnapshotSession {
            dir: self.dir.clone(),
            org: config.url.clone(),
        })
    }
}

impl SnapshotSession {
    fn read(&self, file_name: &str) -> Result<String> {
        let path = self.dir.join(file_name);
        debug!("Reading {}", path.display());
        std::fs::read_to_string(&path).map_err(|e| {
            CodegenError::ConnectionError(format!("{} ({}): {}", path.display(), self.org, e))
        })
    }
}

impl SchemaSession for SnapshotSession {
    fn list_object_types(&self) -> Result<Vec<ObjectTypeSummary>> {
        parse_global_describe(&self.read(GLOBAL_DESCRIBE_FILE)?)
    }

    fn describe(&self, object_type: &str) -> Result<ObjectDescribe> {
        check_object_name(object_type)?;

        let describe = parse_object_describe(&self.read(&format!("{}.json", object_type))?)?;
        if describe.name != object_type {
            return Err(CodegenError::ParseError(format!(
                "{}.json describes {}",
                object_type, describe.name
            )));
        }
        Ok(describe)
    }
}
