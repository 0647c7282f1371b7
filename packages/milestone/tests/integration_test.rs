//! End-to-end tests for the splitter on fixture documents.
//!
//! `tei/book.xml` is a small TEI text with named page breaks that cut
//! through paragraphs and chapters; `tei/numbered.xml` has unnamed
//! milestones, including two adjacent ones.

use std::fs;
use std::path::{Path, PathBuf};

use milestone::{split_text, OutputMode, SegmentMap, SplitOptions, Splitter};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const TEI_NS: &str = r#"xmlns="http://www.tei-c.org/ns/1.0""#;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("tei")
        .join(name)
}

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn split_book() -> SegmentMap {
    let options = SplitOptions::default().with_name_attribute("n");
    split_text(&load_fixture("book.xml"), &options).expect("book.xml splits")
}

fn split_numbered() -> SegmentMap {
    split_text(&load_fixture("numbered.xml"), &SplitOptions::default()).expect("numbered.xml splits")
}

#[test]
fn test_segment_count_equals_milestone_count() {
    let xml = load_fixture("book.xml");
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let milestones = doc.descendants().filter(|n| n.has_tag_name("pb")).count();

    assert_eq!(split_book().len(), milestones);
    assert_eq!(split_numbered().len(), 4);
}

#[test]
fn test_named_segments_in_document_order() {
    let map = split_book();
    assert_eq!(map.names().collect::<Vec<_>>(), vec!["i", "ii", "iii"]);
}

#[test]
fn test_sequential_segments_in_document_order() {
    let map = split_numbered();
    assert_eq!(map.names().collect::<Vec<_>>(), vec!["1", "2", "3", "4"]);
}

#[test]
fn test_every_segment_is_well_formed() {
    for map in [split_book(), split_numbered()] {
        for name in map.names() {
            let text = map.combined(name).unwrap();
            if let Err(e) = roxmltree::Document::parse(&text) {
                panic!("segment {name} is not well-formed ({e}):\n{text}");
            }
        }
    }
}

#[test]
fn test_page_break_inside_paragraph() {
    let map = split_book();
    let text = map.combined("ii").unwrap();

    let opening = format!(
        r#"<TEI {TEI_NS} continued="true"><text continued="true"><body continued="true"><div type="chapter" n="1" continued="true"><p continued="true">"#
    );
    assert!(text.starts_with(&opening), "unexpected opening:\n{text}");
    assert!(text.contains("checked by a violent gust of wind.</p>\n      </div>"));
    assert!(text.contains("<head>Chapter Two</head>"));
    // closed with the ancestors of the next milestone
    assert!(text.ends_with("\n</div></body></text></TEI>"));
}

#[test]
fn test_raw_text_is_preserved() {
    let map = split_book();
    let first = map.get("i").unwrap();

    // entity spelling and indentation come from the source, not a serializer
    assert!(first.middle.contains("dark &amp; stormy night"));
    assert!(first.middle.contains("\n        torrents, except"));
}

#[test]
fn test_round_trip_reproduces_source() {
    for (name, map) in [("book.xml", split_book()), ("numbered.xml", split_numbered())] {
        assert_eq!(map.source_text(), load_fixture(name));
    }
}

#[test]
fn test_adjacent_milestones() {
    let map = split_numbered();
    let opening = r#"<book continued="true"><chapter title="First" continued="true">"#;

    assert_eq!(map.get("2").unwrap().middle, "");
    assert_eq!(
        map.combined("2").unwrap(),
        format!("{opening}</chapter></book>")
    );
    assert_eq!(
        map.combined("1").unwrap(),
        format!("{opening}\n<para>Alpha</para>\n\n</chapter></book>")
    );
}

#[test]
fn test_last_segment_has_no_borrowed_closing() {
    let map = split_numbered();
    assert_eq!(
        map.combined("4").unwrap(),
        "<book continued=\"true\"><chapter title=\"Second\" continued=\"true\"><para continued=\"true\">\
         Delta</para>\n</chapter>\n</book>\n\n"
    );
}

#[test]
fn test_split_mode_writes_files() {
    let dir = tempdir().unwrap();
    let options = SplitOptions::default()
        .with_name_attribute("n")
        .with_output_dir(dir.path());
    let splitter = Splitter::new(options).unwrap();

    let result = splitter.split_files(&[fixture_path("book.xml")]).unwrap();
    assert!(result.is_none());

    let map = split_book();
    for name in ["i", "ii", "iii"] {
        let written = fs::read_to_string(dir.path().join("book").join(format!("{name}.xml"))).unwrap();
        assert_eq!(written, map.combined(name).unwrap());
    }
}

#[test]
fn test_split_mode_is_idempotent() {
    let dir = tempdir().unwrap();
    let options = SplitOptions::default().with_output_dir(dir.path());
    let splitter = Splitter::new(options).unwrap();
    let input = [fixture_path("numbered.xml")];

    splitter.split_files(&input).unwrap();
    let first: Vec<String> = (1..=4)
        .map(|i| fs::read_to_string(dir.path().join(format!("numbered/{i}.xml"))).unwrap())
        .collect();

    splitter.split_files(&input).unwrap();
    let second: Vec<String> = (1..=4)
        .map(|i| fs::read_to_string(dir.path().join(format!("numbered/{i}.xml"))).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_transform_mode() {
    let options = SplitOptions::default()
        .with_name_attribute("n")
        .with_mode(OutputMode::Transform);
    let splitter = Splitter::new(options).unwrap();

    let output = splitter
        .split_files(&[fixture_path("book.xml")])
        .unwrap()
        .unwrap();

    let map = split_book();
    let expected = format!(
        "<pb n=\"i\">\n{}</pb>\n<pb n=\"ii\">\n{}</pb>\n<pb n=\"iii\">\n{}</pb>\n\n",
        map.combined("i").unwrap(),
        map.combined("ii").unwrap(),
        map.combined("iii").unwrap()
    );
    assert_eq!(output, expected);
}

#[test]
fn test_transform_without_wrappers_round_trips_middles() {
    let map = split_numbered();
    let transformed = map.transform("pb", "id");

    let mut rest = transformed.as_str();
    let mut middles = String::new();
    for (index, segment) in map.iter().enumerate() {
        let wrapper = format!("<pb id=\"{}\">\n", segment.name);
        rest = rest.strip_prefix(wrapper.as_str()).expect("milestone wrapper");
        rest = rest.strip_prefix(segment.opening.as_str()).expect("reopened ancestors");

        let closing = map.get_index(index + 1).map_or("", |next| next.closing.as_str());
        let end = format!("{closing}</pb>\n");
        let body_len = rest.find(end.as_str()).expect("borrowed closing tags and wrapper end");
        let body = &rest[..body_len];
        rest = &rest[body_len + end.len()..];

        let middle = match body {
            "" | "\n" => body,
            text => text.strip_suffix('\n').expect("newline after middle text"),
        };
        middles.push_str(middle);
    }

    assert_eq!(rest, "");
    let expected: String = map.iter().map(|segment| segment.middle.as_str()).collect();
    assert_eq!(middles, expected);
    assert_eq!(
        expected,
        "\n<para>Alpha</para>\n\
         \n<para>Beta</para>\n</chapter>\n<chapter title=\"Second\">\n<para>Gamma\
         Delta</para>\n</chapter>\n</book>\n"
    );
}
