//! XML utility functions for navigating parsed trees and writing tag text.

use std::borrow::Cow;

use roxmltree::{Attribute, Document, Node};

use crate::error::Result;

/// The namespace bound to the reserved `xml` prefix.
const NS_XML: &str = "http://www.w3.org/XML/1998/namespace";

/// Prefix bound to a namespace URI in scope at `node`.
fn prefix_for<'input>(node: Node<'_, 'input>, uri: &str) -> Option<&'input str> {
    if uri == NS_XML {
        return Some("xml");
    }
    node.lookup_prefix(uri).filter(|prefix| !prefix.is_empty())
}

/// Get the tag name as written in the source, including its prefix.
///
/// Elements in the default namespace (or no namespace) return the local name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use milestone::xml::qualified_name;
///
/// let xml = r#"<tei:text xmlns:tei="http://www.tei-c.org/ns/1.0"><tei:pb/></tei:text>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(qualified_name(doc.root_element()), "tei:text");
/// ```
pub fn qualified_name(node: Node<'_, '_>) -> String {
    let tag = node.tag_name();
    match tag.namespace().and_then(|ns| prefix_for(node, ns)) {
        Some(prefix) => format!("{prefix}:{}", tag.name()),
        None => tag.name().to_string(),
    }
}

/// Get an attribute name as written in the source, including its prefix.
pub fn qualified_attribute_name(node: Node<'_, '_>, attribute: &Attribute<'_, '_>) -> String {
    match attribute.namespace().and_then(|ns| prefix_for(node, ns)) {
        Some(prefix) => format!("{prefix}:{}", attribute.name()),
        None => attribute.name().to_string(),
    }
}

/// Check if a node is an element with the given (possibly prefixed) tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && qualified_name(node) == tag
}

/// Find all elements with the given tag name, in document order.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use milestone::xml::find_elements;
///
/// let xml = r#"<text><pb/><p><pb/></p><pb/></text>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(find_elements(&doc, "pb").count(), 3);
/// ```
pub fn find_elements<'a, 'input>(
    doc: &'a Document<'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    doc.descendants().filter(move |node| has_tag(*node, tag))
}

/// Iterate over the strict element ancestors of a node, nearest first.
pub fn element_ancestors<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.ancestors().skip(1).filter(|n| n.is_element())
}

/// Get an attribute value by its name as written (e.g. "n" or "xml:id").
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use milestone::xml::get_attribute;
///
/// let doc = Document::parse(r#"<pb n="iv" xml:id="p4"/>"#).unwrap();
/// let pb = doc.root_element();
/// assert_eq!(get_attribute(pb, "n"), Some("iv"));
/// assert_eq!(get_attribute(pb, "xml:id"), Some("p4"));
/// assert_eq!(get_attribute(pb, "facs"), None);
/// ```
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    if !name.contains(':') {
        return node.attribute(name);
    }
    node.attributes()
        .find(|attr| qualified_attribute_name(node, attr) == name)
        .map(|attr| attr.value())
}

/// Collect all attributes of an element as (qualified name, value) pairs.
pub fn collect_attributes(node: Node<'_, '_>) -> Vec<(String, String)> {
    node.attributes()
        .map(|attr| {
            (
                qualified_attribute_name(node, &attr),
                attr.value().to_string(),
            )
        })
        .collect()
}

/// Namespace declarations made on this element (not inherited from its parent),
/// as `xmlns` / `xmlns:prefix` attribute pairs.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use milestone::xml::declared_namespaces;
///
/// let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><text/></TEI>"#;
/// let doc = Document::parse(xml).unwrap();
/// let tei = doc.root_element();
///
/// assert_eq!(
///     declared_namespaces(tei),
///     vec![("xmlns".to_string(), "http://www.tei-c.org/ns/1.0".to_string())]
/// );
/// assert!(declared_namespaces(tei.first_element_child().unwrap()).is_empty());
/// ```
pub fn declared_namespaces(node: Node<'_, '_>) -> Vec<(String, String)> {
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|parent| parent.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    node.namespaces()
        .filter(|ns| ns.uri() != NS_XML)
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .map(|ns| {
            let name = match ns.name() {
                Some(prefix) => format!("xmlns:{prefix}"),
                None => "xmlns".to_string(),
            };
            (name, ns.uri().to_string())
        })
        .collect()
}

/// Read one attribute from a standalone tag such as `<pb n="iv"/>`.
///
/// Non-empty tags (`<pb n="iv">`) are accepted by closing them first. A
/// prefixed tag (`<tei:pb/>`) gets a placeholder declaration for its prefix,
/// since the real one lives on an ancestor.
pub fn parse_tag_attribute(tag_text: &str, attribute: &str) -> Result<Option<String>> {
    let mut fragment = if tag_text.ends_with("/>") {
        tag_text.to_string()
    } else {
        let body = tag_text.strip_suffix('>').unwrap_or(tag_text);
        format!("{body}/>")
    };

    let name_end = fragment
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .unwrap_or(fragment.len());
    if let Some((prefix, _)) = fragment.get(1..name_end).and_then(|name| name.split_once(':')) {
        if prefix != "xml" {
            let declaration = format!(" xmlns:{prefix}=\"urn:milestone:{prefix}\"");
            fragment.insert_str(name_end, &declaration);
        }
    }

    let doc = Document::parse(&fragment)?;
    Ok(get_attribute(doc.root_element(), attribute).map(str::to_string))
}

/// Escape an attribute value for a double-quoted attribute.
///
/// Newlines, carriage returns and tabs are written as character references,
/// otherwise attribute-value normalization turns them into spaces on reparse.
///
/// # Examples
/// ```
/// use milestone::xml::escape_attribute;
///
/// assert_eq!(escape_attribute("plain"), "plain");
/// assert_eq!(escape_attribute(r#"a "b" & <c>"#), "a &quot;b&quot; &amp; &lt;c>");
/// assert_eq!(escape_attribute("x\ny\tz"), "x&#10;y&#9;z");
/// ```
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '"', '\n', '\r', '\t']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Write an opening tag with the given attributes.
///
/// # Examples
/// ```
/// use milestone::xml::opening_tag;
///
/// let attrs = [("n", "1"), ("continued", "true")];
/// assert_eq!(opening_tag("div", attrs), r#"<div n="1" continued="true">"#);
/// ```
pub fn opening_tag<'a>(
    tag: &str,
    attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut out = format!("<{tag}");
    for (name, value) in attributes {
        out.push_str(&format!(" {name}=\"{}\"", escape_attribute(value)));
    }
    out.push('>');
    out
}

/// Write a closing tag.
pub fn closing_tag(tag: &str) -> String {
    format!("</{tag}>")
}
