//! Reassembly: synthesize the tags around each raw span.
//!
//! A segment reopens its own ancestors and is closed with the ancestors of
//! the *next* milestone, since those are the elements still open where the
//! segment's raw text stops.

use super::segmenter::RawSegmentation;
use super::segments::SegmentMap;
use crate::error::{MilestoneError, Result};
use crate::types::{RecordedMilestone, Segment};
use crate::xml::{closing_tag, opening_tag};

/// Combine the tree pass and the raw pass into a segment map.
pub fn reassemble(
    recorded: Vec<RecordedMilestone>,
    raw: RawSegmentation<'_>,
) -> Result<SegmentMap> {
    if recorded.len() != raw.spans.len() {
        let position = recorded.len().min(raw.spans.len()) + 1;
        return Err(MilestoneError::Desync {
            position,
            expected: recorded.get(position - 1).map(|m| m.name.clone()),
            found: raw.spans.get(position - 1).map(|s| s.name.clone()),
        });
    }

    let mut map = SegmentMap::new(raw.prologue);
    for (position, (milestone, span)) in recorded.into_iter().zip(raw.spans).enumerate() {
        if milestone.name != span.name {
            return Err(MilestoneError::Desync {
                position: position + 1,
                expected: Some(milestone.name),
                found: Some(span.name),
            });
        }
        map.push(Segment {
            name: milestone.name,
            ancestors: milestone.ancestors,
            tag_text: span.tag_text.to_string(),
            middle: span.middle.to_string(),
            opening: String::new(),
            closing: String::new(),
        })?;
    }

    create_all_closing_tags(&mut map);
    create_all_opening_tags(&mut map);
    Ok(map)
}

fn create_all_closing_tags(map: &mut SegmentMap) {
    for segment in map.segments_mut() {
        segment.closing = segment.ancestors.closing_tags();
    }
}

fn create_all_opening_tags(map: &mut SegmentMap) {
    for segment in map.segments_mut() {
        segment.opening = segment.ancestors.opening_tags();
    }
}

impl SegmentMap {
    /// Opening tags + middle text + closing tags borrowed from the next segment.
    pub fn combined_at(&self, index: usize) -> Option<String> {
        let segment = self.get_index(index)?;
        let closing = self
            .get_index(index + 1)
            .map_or("", |next| next.closing.as_str());
        Some(format!(
            "{}{}{}",
            segment.opening,
            Segment::output_middle(&segment.middle),
            closing
        ))
    }

    /// Combined text of the segment with the given name.
    pub fn combined(&self, name: &str) -> Option<String> {
        self.position(name).and_then(|i| self.combined_at(i))
    }

    /// Render every segment wrapped in a `tag` element carrying its name.
    ///
    /// # Examples
    /// ```
    /// use milestone::{split_text, SplitOptions};
    ///
    /// let map = split_text("<a><pb/>x<pb/>y</a>", &SplitOptions::default()).unwrap();
    /// assert_eq!(
    ///     map.transform("pb", "id"),
    ///     "<pb id=\"1\">\n<a continued=\"true\">x\n</a></pb>\n\
    ///      <pb id=\"2\">\n<a continued=\"true\">y</a>\n</pb>\n"
    /// );
    /// ```
    pub fn transform(&self, tag: &str, attribute: &str) -> String {
        let mut output = String::new();
        for (index, segment) in self.iter().enumerate() {
            output.push_str(&opening_tag(tag, [(attribute, segment.name.as_str())]));
            output.push('\n');
            output.push_str(&self.combined_at(index).unwrap_or_default());
            output.push_str(&closing_tag(tag));
            output.push('\n');
        }
        output
    }
}
