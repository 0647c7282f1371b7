//! Error types for the milestone splitter.
//!
//! A single `MilestoneError` covers configuration, XML parsing, the two
//! segmentation passes, and file I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the milestone library.
#[derive(Debug, Error)]
pub enum MilestoneError {
    /// Milestone tag is not a valid XML name.
    #[error("Invalid milestone tag name: '{0}'")]
    InvalidTagName(String),

    /// Naming attribute is not a valid XML name.
    #[error("Invalid attribute name: '{0}'")]
    InvalidAttributeName(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// XML parsing failed for a specific input file.
    #[error("XML parsing failed for {}: {source}", .path.display())]
    XmlParseFile {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// A milestone opening tag has no closing `>`.
    #[error("Unterminated <{tag}> tag at offset {offset}")]
    UnterminatedTag { tag: String, offset: usize },

    /// The raw text pass disagrees with the tree pass.
    #[error("Milestone {position} out of sync: expected {}, found {}",
        .expected.as_deref().unwrap_or("no milestone"),
        .found.as_deref().unwrap_or("no milestone"))]
    Desync {
        position: usize,
        expected: Option<String>,
        found: Option<String>,
    },

    /// A milestone lacks the configured naming attribute.
    #[error("Milestone <{tag}> #{position} has no '{attribute}' attribute")]
    MissingNameAttribute {
        tag: String,
        attribute: String,
        position: usize,
    },

    /// Two milestones derive the same name.
    #[error("Duplicate milestone name: '{name}'")]
    DuplicateName { name: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO error on a specific path.
    #[error("IO error on {}: {source}", .path.display())]
    IoPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MilestoneError {
    /// Attach a path to an I/O error.
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoPath {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for milestone operations.
pub type Result<T> = std::result::Result<T, MilestoneError>;
