//! Core data types: ancestor chains, recorded milestones and segments.

use roxmltree::Node;

use crate::config::CONTINUED_ATTRIBUTE;
use crate::xml::{
    closing_tag, collect_attributes, declared_namespaces, element_ancestors, opening_tag,
    qualified_name,
};

/// An enclosing element of a milestone: tag name plus its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    /// Tag name as written, including any prefix.
    pub tag: String,

    /// Namespace declarations made on the element, then its attributes in
    /// source order, as (name, value) pairs.
    pub attributes: Vec<(String, String)>,
}

impl Ancestor {
    /// Create an ancestor without attributes.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Capture an element from a parsed tree.
    pub fn from_node(node: Node<'_, '_>) -> Self {
        let mut attributes = declared_namespaces(node);
        attributes.extend(collect_attributes(node));
        Self {
            tag: qualified_name(node),
            attributes,
        }
    }

    /// Opening tag text carrying the original attributes and `continued="true"`.
    pub fn reopening_tag(&self) -> String {
        let attributes = self
            .attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .chain(std::iter::once((CONTINUED_ATTRIBUTE, "true")));
        opening_tag(&self.tag, attributes)
    }
}

/// Enclosing elements of a milestone, nearest parent first, root element last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorChain(Vec<Ancestor>);

impl AncestorChain {
    /// Build a chain from ancestors ordered nearest first.
    #[must_use]
    pub fn new(ancestors: Vec<Ancestor>) -> Self {
        Self(ancestors)
    }

    /// Record the strict element ancestors of a milestone element.
    pub fn of_node(node: Node<'_, '_>) -> Self {
        Self(element_ancestors(node).map(Ancestor::from_node).collect())
    }

    /// Ancestors, nearest first.
    pub fn ancestors(&self) -> &[Ancestor] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Opening tags, outermost first, every one marked as continued.
    ///
    /// # Examples
    /// ```
    /// use milestone::types::{Ancestor, AncestorChain};
    ///
    /// let chain = AncestorChain::new(vec![
    ///     Ancestor::new("p"),
    ///     Ancestor::new("div").with_attribute("n", "1"),
    /// ]);
    /// assert_eq!(
    ///     chain.opening_tags(),
    ///     r#"<div n="1" continued="true"><p continued="true">"#
    /// );
    /// ```
    pub fn opening_tags(&self) -> String {
        self.0.iter().rev().map(Ancestor::reopening_tag).collect()
    }

    /// Closing tags, nearest first.
    ///
    /// # Examples
    /// ```
    /// use milestone::types::{Ancestor, AncestorChain};
    ///
    /// let chain = AncestorChain::new(vec![Ancestor::new("p"), Ancestor::new("div")]);
    /// assert_eq!(chain.closing_tags(), "</p></div>");
    /// ```
    pub fn closing_tags(&self) -> String {
        self.0.iter().map(|a| closing_tag(&a.tag)).collect()
    }
}

/// A milestone found by the tree walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMilestone {
    /// Derived milestone name.
    pub name: String,

    /// Enclosing elements of the milestone.
    pub ancestors: AncestorChain,
}

/// The reconstructed unit of content between two consecutive milestones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Milestone name; also the output file stem in split mode.
    pub name: String,

    /// Enclosing elements of the milestone that starts this segment.
    pub ancestors: AncestorChain,

    /// Raw text of the milestone tag itself (e.g. `<pb n="1"/>`).
    pub tag_text: String,

    /// Raw source text between this milestone and the next.
    pub middle: String,

    /// Synthesized opening tags for this segment's own ancestors.
    pub opening: String,

    /// Synthesized closing tags for this segment's own ancestors.
    ///
    /// Used by the *previous* segment, which closes whatever is still open
    /// where this segment's milestone sits.
    pub closing: String,
}

impl Segment {
    /// Middle text as it appears in output: a newline is appended to
    /// non-empty text, and a lone newline is not doubled.
    ///
    /// # Examples
    /// ```
    /// use milestone::types::Segment;
    ///
    /// assert_eq!(Segment::output_middle("text"), "text\n");
    /// assert_eq!(Segment::output_middle("\n"), "\n");
    /// assert_eq!(Segment::output_middle(""), "");
    /// ```
    pub fn output_middle(middle: &str) -> String {
        match middle {
            "" => String::new(),
            "\n" => "\n".to_string(),
            text => format!("{text}\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_chain_of_node() {
        let xml = r#"<text><div type="chapter" n="1"><p><pb/></p></div></text>"#;
        let doc = Document::parse(xml).unwrap();
        let pb = doc.descendants().find(|n| n.has_tag_name("pb")).unwrap();

        let chain = AncestorChain::of_node(pb);
        assert_eq!(
            chain.ancestors(),
            &[
                Ancestor::new("p"),
                Ancestor::new("div")
                    .with_attribute("type", "chapter")
                    .with_attribute("n", "1"),
                Ancestor::new("text"),
            ]
        );
    }

    #[test]
    fn test_chain_keeps_namespace_declarations() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><text><pb/></text></TEI>"#;
        let doc = Document::parse(xml).unwrap();
        let pb = doc.descendants().find(|n| n.has_tag_name("pb")).unwrap();

        let chain = AncestorChain::of_node(pb);
        assert_eq!(
            chain.opening_tags(),
            r#"<TEI xmlns="http://www.tei-c.org/ns/1.0" continued="true"><text continued="true">"#
        );
    }

    #[test]
    fn test_opening_tags_outermost_first() {
        let chain = AncestorChain::new(vec![
            Ancestor::new("B"),
            Ancestor::new("A").with_attribute("x", "1"),
        ]);
        assert_eq!(
            chain.opening_tags(),
            r#"<A x="1" continued="true"><B continued="true">"#
        );
    }

    #[test]
    fn test_empty_chain_has_no_tags() {
        let chain = AncestorChain::default();
        assert!(chain.is_empty());
        assert_eq!(chain.opening_tags(), "");
        assert_eq!(chain.closing_tags(), "");
    }

    #[test]
    fn test_reopening_tag_escapes_values() {
        let ancestor = Ancestor::new("hi").with_attribute("rend", "a&b");
        assert_eq!(
            ancestor.reopening_tag(),
            r#"<hi rend="a&amp;b" continued="true">"#
        );
    }

    #[test]
    fn test_output_middle_keeps_whitespace() {
        assert_eq!(Segment::output_middle("\n  text\n"), "\n  text\n\n");
        assert_eq!(Segment::output_middle("  "), "  \n");
    }
}
