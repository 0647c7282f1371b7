//! Tree pass: find every milestone and record its ancestor chain.

use std::collections::HashSet;

use roxmltree::Document;

use super::naming::Naming;
use crate::error::{MilestoneError, Result};
use crate::types::{AncestorChain, RecordedMilestone};
use crate::xml::find_elements;

/// Record every `tag` element of the document in document order.
///
/// The returned names are the key sequence the raw text pass must
/// reproduce, one per milestone.
pub fn record_milestones(
    doc: &Document<'_>,
    tag: &str,
    naming: Naming<'_>,
) -> Result<Vec<RecordedMilestone>> {
    let mut recorded = Vec::new();
    let mut seen = HashSet::new();

    for (index, node) in find_elements(doc, tag).enumerate() {
        let name = naming.name_element(node, tag, index + 1)?;
        if !seen.insert(name.clone()) {
            return Err(MilestoneError::DuplicateName { name });
        }

        let ancestors = AncestorChain::of_node(node);
        tracing::debug!(name = %name, depth = ancestors.len(), "Recorded milestone");
        recorded.push(RecordedMilestone { name, ancestors });
    }

    Ok(recorded)
}
