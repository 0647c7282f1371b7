//! Raw text pass: slice the unparsed document at each milestone tag.
//!
//! The tree pass gives structure but not the source bytes; this pass keeps
//! every character between milestones exactly as written.

use memchr::memmem;

use super::naming::Naming;
use crate::error::{MilestoneError, Result};

/// One milestone occurrence in the raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSpan<'t> {
    /// Name derived from the tag text; equals the recorded name.
    pub name: String,

    /// The milestone tag itself, from `<` to `>`.
    pub tag_text: &'t str,

    /// Text between this milestone tag and the next one (or end of input).
    pub middle: &'t str,
}

/// The raw text partitioned by milestone tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegmentation<'t> {
    /// Text before the first milestone. Belongs to no segment.
    pub prologue: &'t str,

    /// One span per milestone, in source order.
    pub spans: Vec<RawSpan<'t>>,
}

/// Partition `text` at every `<tag` occurrence.
///
/// `expected` is the name sequence recorded by the tree pass. Each raw
/// occurrence is re-named with `naming` and must match the name at the same
/// position, otherwise the passes disagree and a `Desync` error is returned.
pub fn segment_raw<'t>(
    text: &'t str,
    tag: &str,
    expected: &[String],
    naming: Naming<'_>,
) -> Result<RawSegmentation<'t>> {
    let bytes = text.as_bytes();
    let needle = format!("<{tag}");
    let finder = memmem::Finder::new(needle.as_bytes());

    let mut tags: Vec<(usize, usize)> = Vec::with_capacity(expected.len());
    let mut names: Vec<String> = Vec::with_capacity(expected.len());
    let mut cursor = 0;

    while let Some(found) = finder.find(&bytes[cursor..]) {
        let start = cursor + found;
        let after_name = start + needle.len();

        // `<pbx` is a different element
        if !ends_name(bytes.get(after_name).copied()) {
            cursor = after_name;
            continue;
        }

        let end = find_tag_end(bytes, after_name).ok_or_else(|| MilestoneError::UnterminatedTag {
            tag: tag.to_string(),
            offset: start,
        })?;

        let position = names.len() + 1;
        let tag_text = &text[start..end];
        let name = naming.name_tag_text(tag_text, tag, position)?;
        let recorded = expected.get(names.len());
        if recorded != Some(&name) {
            return Err(MilestoneError::Desync {
                position,
                expected: recorded.cloned(),
                found: Some(name),
            });
        }

        tracing::debug!(name = %name, offset = start, "Matched milestone tag");
        tags.push((start, end));
        names.push(name);
        cursor = end;
    }

    if names.len() < expected.len() {
        return Err(MilestoneError::Desync {
            position: names.len() + 1,
            expected: expected.get(names.len()).cloned(),
            found: None,
        });
    }

    let prologue = &text[..tags.first().map_or(text.len(), |&(start, _)| start)];
    let spans = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let (start, end) = tags[i];
            let next_start = tags.get(i + 1).map_or(text.len(), |&(s, _)| s);
            RawSpan {
                name,
                tag_text: &text[start..end],
                middle: &text[end..next_start],
            }
        })
        .collect();

    Ok(RawSegmentation { prologue, spans })
}

/// Whether the byte after `<tag` ends the tag name.
fn ends_name(byte: Option<u8>) -> bool {
    match byte {
        None => true,
        Some(b) => b.is_ascii_whitespace() || b == b'/' || b == b'>',
    }
}

/// Find the end of a tag (one past its `>`), skipping quoted attribute values.
fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => return Some(i + 1),
                _ => {}
            },
        }
    }
    None
}
