//! # Error Types
//!
//! Error handling for the class parameter inliner.
//! File-level variants carry the offending path so a failed run names the
//! file that stopped it.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while discovering, loading, or rewriting files.
///
/// Loading and writing fail the whole run: a partially loaded file set
/// would make the merged parameter map unsound.
#[derive(Debug)]
pub enum ServiceError {
    /// Error walking the directory tree during discovery
    WalkDir(walkdir::Error),
    /// Glob pattern compilation error
    Glob(globset::Error),
    /// I/O error reading a file during preload
    FileRead(PathBuf, std::io::Error),
    /// I/O error writing a rewritten file back
    FileWrite(PathBuf, std::io::Error),
    /// Error parsing a file as YAML
    YamlParse(PathBuf, serde_yaml::Error),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::WalkDir(err) => write!(f, "Directory traversal error: {err}"),
            ServiceError::Glob(err) => write!(f, "Glob error: {err}"),
            ServiceError::FileRead(path, err) => {
                write!(f, "Failed to read {}: {err}", path.display())
            }
            ServiceError::FileWrite(path, err) => {
                write!(f, "Failed to write {}: {err}", path.display())
            }
            ServiceError::YamlParse(path, err) => {
                write!(f, "Failed to parse {} as Yaml: {err}", path.display())
            }
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<walkdir::Error> for ServiceError {
    fn from(err: walkdir::Error) -> Self {
        ServiceError::WalkDir(err)
    }
}

impl From<globset::Error> for ServiceError {
    fn from(err: globset::Error) -> Self {
        ServiceError::Glob(err)
    }
}
