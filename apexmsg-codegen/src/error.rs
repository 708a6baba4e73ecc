//! Error types for apexmsg-codegen

use thiserror::Error;

use crate::pipeline::Stage;

/// Result type alias for apexmsg-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Failed to parse describe document: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unknown object type: {0}")]
    UnknownObjectType(String),

    #[error("Selection failed: {0}")]
    PickerError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<CodegenError>,
    },
}

impl CodegenError {
    /// Tag an error with the pipeline stage it came from
    pub fn at(self, stage: Stage) -> Self {
        match self {
            already @ CodegenError::Stage { .. } => already,
            other => CodegenError::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with any stage wrapping removed
    pub fn root(&self) -> &CodegenError {
        match self {
            CodegenError::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for CodegenError {
    fn from(err: serde_json::Error) -> Self {
        CodegenError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}

#[cfg(feature = "cli")]
impl From<dialoguer::Error> for CodegenError {
    fn from(err: dialoguer::Error) -> Self {
        CodegenError::PickerError(err.to_string())
    }
}

#[cfg(feature = "remote")]
impl From<reqwest::Error> for CodegenError {
    fn from(err: reqwest::Error) -> Self {
        CodegenError::ConnectionError(err.to_string())
    }
}
