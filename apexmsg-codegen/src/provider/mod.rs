//! External capabilities the generation pipeline is written against
//!
//! The pipeline never talks to the platform, the terminal or the file system
//! directly; it goes through these traits so each stage can be driven by a
//! fake in tests.

mod picker;
#[cfg(feature = "remote")]
mod remote;
mod sink;
mod snapshot;

use std::path::Path;

use tracing::debug;

pub use picker::*;
#[cfg(feature = "remote")]
pub use remote::*;
pub use sink::*;
pub use snapshot::*;

use crate::config::{CodegenConfig, ForceConfig};
use crate::error::{CodegenError, Result};
use crate::parser::{ObjectDescribe, ObjectTypeSummary};

/// Source of schema metadata
pub trait SchemaProvider {
    type Session: SchemaSession;

    /// Authenticate and open a session
    fn connect(&self, config: &ForceConfig) -> Result<Self::Session>;
}

/// An authenticated connection to the platform
pub trait SchemaSession {
    /// Describe-global: every object type with its mutability flags
    fn list_object_types(&self) -> Result<Vec<ObjectTypeSummary>>;

    /// Describe one object type
    fn describe(&self, object_type: &str) -> Result<ObjectDescribe>;
}

impl<S: SchemaSession + ?Sized> SchemaSession for Box<S> {
    fn list_object_types(&self) -> Result<Vec<ObjectTypeSummary>> {
        (**self).list_object_types()
    }

    fn describe(&self, object_type: &str) -> Result<ObjectDescribe> {
        (**self).describe(object_type)
    }
}

/// Interactive selection of one object type
pub trait Picker {
    /// Pick one of the (already sorted) candidates; `None` means the user cancelled
    fn pick_one(&self, candidates: &[String]) -> Result<Option<String>>;
}

/// Persistence and presentation of generated artifacts
pub trait ArtifactSink {
    fn write_text(&self, path: &Path, content: &str) -> Result<()>;

    fn open_for_display(&self, path: &Path) -> Result<()>;
}

/// The provider selected by configuration: the live org, or saved
/// describe documents when running offline
#[derive(Debug, Clone)]
pub enum ConfiguredProvider {
    Snapshot(SnapshotProvider),
    #[cfg(feature = "remote")]
    Remote(RemoteProvider),
}

impl ConfiguredProvider {
    pub fn from_config(config: &CodegenConfig) -> Result<Self> {
        if config.offline {
            let provider = SnapshotProvider::new(config.resolved_snapshot_dir());
            debug!(
                "Offline: reading describe documents from {}",
                provider.dir().display()
            );
            return Ok(Self::Snapshot(provider));
        }

        #[cfg(feature = "remote")]
        {
            Ok(Self::Remote(RemoteProvider::new()))
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(CodegenError::ConfigError(
                "built without the `remote` feature; run offline against a schema snapshot"
                    .into(),
            ))
        }
    }
}

impl SchemaProvider for ConfiguredProvider {
    type Session = Box<dyn SchemaSession>;

    fn connect(&self, config: &ForceConfig) -> Result<Self::Session> {
        match self {
            Self::Snapshot(provider) => Ok(Box::new(provider.connect(config)?)),
            #[cfg(feature = "remote")]
            Self::Remote(provider) => Ok(Box::new(provider.connect(config)?)),
        }
    }
}

/// Reject names that cannot be an object type API name
pub(crate) fn check_object_name(object_type: &str) -> Result<()> {
    let valid = !object_type.is_empty()
        && object_type
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(CodegenError::UnknownObjectType(object_type.to_string()))
    }
}
