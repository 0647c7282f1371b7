//! Milestone segmentation.
//!
//! Three passes over one document, each completed before the next starts:
//!
//! 1. [`recorder`]: walk the parsed tree, name every milestone and record
//!    its ancestor chain.
//! 2. [`segmenter`]: slice the raw text at every milestone tag, checking the
//!    names against the recorded sequence.
//! 3. [`reassembler`]: synthesize opening and closing tags around each raw
//!    span.

pub mod naming;
pub mod reassembler;
pub mod recorder;
pub mod segmenter;
mod segments;

use roxmltree::{Document, ParsingOptions};

pub use naming::Naming;
pub use reassembler::reassemble;
pub use recorder::record_milestones;
pub use segmenter::{segment_raw, RawSegmentation, RawSpan};
pub use segments::SegmentMap;

use crate::config::SplitOptions;
use crate::error::Result;

/// Parse options for input documents; TEI files commonly carry a DOCTYPE.
pub fn parsing_options<'input>() -> ParsingOptions<'input> {
    ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    }
}

/// Segment an XML document held in memory.
///
/// # Examples
/// ```
/// use milestone::{split_text, SplitOptions};
///
/// let xml = r#"<A><B><pb/>text1<pb/>text2</B></A>"#;
/// let map = split_text(xml, &SplitOptions::default()).unwrap();
///
/// let names: Vec<_> = map.names().collect();
/// assert_eq!(names, vec!["1", "2"]);
/// assert_eq!(
///     map.combined("1").unwrap(),
///     "<A continued=\"true\"><B continued=\"true\">text1\n</B></A>"
/// );
/// ```
pub fn split_text(xml: &str, options: &SplitOptions) -> Result<SegmentMap> {
    let doc = Document::parse_with_options(xml, parsing_options())?;
    split_document(&doc, xml, options)
}

/// Segment an already parsed document together with its source text.
pub fn split_document(doc: &Document<'_>, xml: &str, options: &SplitOptions) -> Result<SegmentMap> {
    let tag = options.milestone_tag.as_str();
    let naming = Naming::from_attribute(options.name_attribute.as_deref());

    let recorded = record_milestones(doc, tag, naming)?;
    if recorded.is_empty() {
        tracing::warn!(tag = %tag, "No milestone elements found");
    }

    let names: Vec<String> = recorded.iter().map(|m| m.name.clone()).collect();
    let raw = segment_raw(xml, tag, &names, naming)?;

    reassemble(recorded, raw)
}
