//! Milestone naming: sequential numbers or an attribute value.

use roxmltree::Node;

use crate::error::{MilestoneError, Result};
use crate::xml::{get_attribute, parse_tag_attribute};

/// How milestones are named. Chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Naming<'a> {
    /// "1", "2", "3"... in document order.
    Sequential,
    /// The value of the given attribute on each milestone.
    Attribute(&'a str),
}

impl<'a> Naming<'a> {
    /// Naming scheme for an optional naming attribute.
    pub fn from_attribute(attribute: Option<&'a str>) -> Self {
        attribute.map_or(Self::Sequential, Self::Attribute)
    }

    /// Name a milestone element found in the parsed tree.
    ///
    /// `position` is the 1-based index of the milestone in document order.
    pub fn name_element(&self, node: Node<'_, '_>, tag: &str, position: usize) -> Result<String> {
        match *self {
            Self::Sequential => Ok(position.to_string()),
            Self::Attribute(attribute) => get_attribute(node, attribute)
                .map(str::to_string)
                .ok_or_else(|| missing_attribute(tag, attribute, position)),
        }
    }

    /// Name a milestone from the raw text of its tag.
    pub fn name_tag_text(&self, tag_text: &str, tag: &str, position: usize) -> Result<String> {
        match *self {
            Self::Sequential => Ok(position.to_string()),
            Self::Attribute(attribute) => parse_tag_attribute(tag_text, attribute)?
                .ok_or_else(|| missing_attribute(tag, attribute, position)),
        }
    }
}

fn missing_attribute(tag: &str, attribute: &str, position: usize) -> MilestoneError {
    MilestoneError::MissingNameAttribute {
        tag: tag.to_string(),
        attribute: attribute.to_string(),
        position,
    }
}
