//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

/// The errors that can be thrown when parsing a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {}:{line}:{column}: {message}", .file_path.display())]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("{}: did not find the expected \"version\" tag", .file_path.display())]
    DidNotFindExpectedVersionTag { file_path: PathBuf },
    #[error("{}: unsupported configuration version {version}", .file_path.display())]
    UnsupportedVersion { file_path: PathBuf, version: String },
    #[error("I/O error: {0}")]
    IoErrorButStringified(String),
}

/// The errors that can be thrown when writing a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The errors that can be thrown when turning a parsed configuration into a runtime one.
#[derive(Debug, thiserror::Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("entity names must not be empty")]
    EmptyEntityName,
    #[error("invalid association '{path}' of entity '{entity}': {message}")]
    InvalidAssociation {
        entity: String,
        path: String,
        message: String,
    },
}
