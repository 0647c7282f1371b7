//! Ordered segment storage with lookup by milestone name.

use std::collections::HashMap;

use crate::error::{MilestoneError, Result};
use crate::types::Segment;

/// Segments in document order, addressable by milestone name.
///
/// Iteration order always equals the order of the milestones in the source.
#[derive(Debug, Clone, Default)]
pub struct SegmentMap {
    prologue: String,
    segments: Vec<Segment>,
    index: HashMap<String, usize>,
}

impl SegmentMap {
    /// Create an empty map with the text preceding the first milestone.
    #[must_use]
    pub fn new(prologue: impl Into<String>) -> Self {
        Self {
            prologue: prologue.into(),
            ..Self::default()
        }
    }

    /// Append a segment. Names must be unique.
    pub fn push(&mut self, segment: Segment) -> Result<()> {
        if self.index.contains_key(&segment.name) {
            return Err(MilestoneError::DuplicateName { name: segment.name });
        }
        self.index.insert(segment.name.clone(), self.segments.len());
        self.segments.push(segment);
        Ok(())
    }

    /// Text before the first milestone.
    pub fn prologue(&self) -> &str {
        &self.prologue
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Position of a segment in document order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Look up a segment by name.
    pub fn get(&self, name: &str) -> Option<&Segment> {
        self.position(name).and_then(|i| self.segments.get(i))
    }

    /// Segment at a position in document order.
    pub fn get_index(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// The segment following `name`, or `None` for the last one.
    pub fn next(&self, name: &str) -> Option<&Segment> {
        self.position(name).and_then(|i| self.segments.get(i + 1))
    }

    /// Segment names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.name.as_str())
    }

    /// Iterate over segments in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub(crate) fn segments_mut(&mut self) -> std::slice::IterMut<'_, Segment> {
        self.segments.iter_mut()
    }

    /// Rebuild the source text from prologue, milestone tags and middles.
    pub fn source_text(&self) -> String {
        let mut text = self.prologue.clone();
        for segment in &self.segments {
            text.push_str(&segment.tag_text);
            text.push_str(&segment.middle);
        }
        text
    }
}

impl<'a> IntoIterator for &'a SegmentMap {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
