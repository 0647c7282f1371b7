//! Configuration constants, options and validation for the splitter.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MilestoneError, Result};

/// Default milestone tag (TEI page break).
pub const DEFAULT_MILESTONE_TAG: &str = "pb";

/// Default output directory for split mode.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Identifying attribute used in transform mode when no naming attribute is set.
pub const DEFAULT_ID_ATTRIBUTE: &str = "id";

/// Marker attribute added to every reopened ancestor element.
pub const CONTINUED_ATTRIBUTE: &str = "continued";

/// Extension of the files written in split mode.
pub const OUTPUT_EXTENSION: &str = "xml";

/// XML `Name` production, restricted to the characters we expect in tags
/// and attribute names (an optional prefix is allowed).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static XML_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}_][\p{L}\p{N}_.\-]*(:[\p{L}_][\p{L}\p{N}_.\-]*)?$").expect("valid regex")
});

/// Validate a milestone tag name.
///
/// # Examples
/// ```
/// use milestone::config::validate_tag_name;
///
/// assert!(validate_tag_name("pb").is_ok());
/// assert!(validate_tag_name("tei:milestone").is_ok());
/// assert!(validate_tag_name("<pb").is_err());
/// ```
pub fn validate_tag_name(tag: &str) -> Result<()> {
    if XML_NAME_PATTERN.is_match(tag) {
        Ok(())
    } else {
        Err(MilestoneError::InvalidTagName(tag.to_string()))
    }
}

/// Validate a naming attribute name.
///
/// # Examples
/// ```
/// use milestone::config::validate_attribute_name;
///
/// assert!(validate_attribute_name("n").is_ok());
/// assert!(validate_attribute_name("1n").is_err());
/// ```
pub fn validate_attribute_name(name: &str) -> Result<()> {
    if XML_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(MilestoneError::InvalidAttributeName(name.to_string()))
    }
}

/// What to do with the reassembled segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Write one file per segment.
    #[default]
    Split,
    /// Wrap every segment in a milestone element and return one document.
    Transform,
}

/// Options for a splitting run, shared by every input file.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Milestone tag name (e.g. "pb").
    pub milestone_tag: String,

    /// Attribute naming each milestone; `None` numbers them 1, 2, 3...
    pub name_attribute: Option<String>,

    /// Root directory for split output.
    pub output_dir: PathBuf,

    /// Split into files or transform into one document.
    pub mode: OutputMode,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MILESTONE_TAG)
    }
}

impl SplitOptions {
    /// Create options for the given milestone tag.
    #[must_use]
    pub fn new(milestone_tag: impl Into<String>) -> Self {
        Self {
            milestone_tag: milestone_tag.into(),
            name_attribute: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            mode: OutputMode::Split,
        }
    }

    /// Name milestones after the given attribute.
    #[must_use]
    pub fn with_name_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.name_attribute = Some(attribute.into());
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the output mode.
    #[must_use]
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Attribute carrying the milestone name in transform output.
    pub fn id_attribute(&self) -> &str {
        self.name_attribute
            .as_deref()
            .unwrap_or(DEFAULT_ID_ATTRIBUTE)
    }

    /// Check tag and attribute names before touching any file.
    pub fn validate(&self) -> Result<()> {
        validate_tag_name(&self.milestone_tag)?;
        if let Some(attribute) = &self.name_attribute {
            validate_attribute_name(attribute)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tag_name() {
        assert!(validate_tag_name("pb").is_ok());
        assert!(validate_tag_name("milestone").is_ok());
        assert!(validate_tag_name("tei:pb").is_ok());
        assert!(validate_tag_name("cb.x-1").is_ok());

        assert!(validate_tag_name("").is_err());
        assert!(validate_tag_name("p b").is_err());
        assert!(validate_tag_name("pb>").is_err());
        assert!(validate_tag_name("-pb").is_err());
    }

    #[test]
    fn test_validate_attribute_name() {
        assert!(validate_attribute_name("n").is_ok());
        assert!(validate_attribute_name("xml:id").is_ok());
        assert!(validate_attribute_name("n=").is_err());
    }

    #[test]
    fn test_default_options() {
        let options = SplitOptions::default();
        assert_eq!(options.milestone_tag, "pb");
        assert_eq!(options.name_attribute, None);
        assert_eq!(options.output_dir, PathBuf::from("output"));
        assert_eq!(options.mode, OutputMode::Split);
        assert_eq!(options.id_attribute(), "id");
    }

    #[test]
    fn test_builder() {
        let options = SplitOptions::new("milestone")
            .with_name_attribute("n")
            .with_output_dir("/tmp/out")
            .with_mode(OutputMode::Transform);
        assert_eq!(options.milestone_tag, "milestone");
        assert_eq!(options.id_attribute(), "n");
        assert_eq!(options.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(options.mode, OutputMode::Transform);
    }

    #[test]
    fn test_validate_options() {
        assert!(SplitOptions::default().validate().is_ok());
        assert!(matches!(
            SplitOptions::new("bad tag").validate(),
            Err(MilestoneError::InvalidTagName(_))
        ));
        assert!(matches!(
            SplitOptions::default().with_name_attribute("").validate(),
            Err(MilestoneError::InvalidAttributeName(_))
        ));
    }
}
