//! Integration tests for the layer merge.
//!
//! Fixtures mimic OpenSCAD's SVG export: a DOCTYPE preamble, a title and a
//! single unioned path per layer.

use pretty_assertions::assert_eq;
use scad_trotec::{
    merge, merge_documents, parse_document, restyle, Element, ErrorCode, ExportError, LayerRole,
    StructureIssue, VectorDocument,
};
use std::path::Path;

/// Fixture directory for integration tests
const FIXTURE_DIR: &str = "tests/fixtures";

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join(FIXTURE_DIR)
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Minimal layer document with one path carrying the given extra attributes.
fn layer_svg(path_attrs: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><title>OpenSCAD Model</title><path d="M0,0 L1,0 L1,1 z" {}/></svg>"#,
        path_attrs
    )
}

/// The four styling attributes of a path, in a fixed order.
fn style_of(path: &Element) -> [(&'static str, Option<String>); 4] {
    ["id", "stroke", "stroke-width", "fill"].map(|name| (name, path.attr(name).map(str::to_string)))
}

fn expect_cut_style(path: &Element) {
    assert_eq!(
        style_of(path),
        [
            ("id", Some("cut_path".to_string())),
            ("stroke", Some("red".to_string())),
            ("stroke-width", Some("0.01".to_string())),
            ("fill", Some("none".to_string())),
        ]
    );
}

fn expect_engrave_style(path: &Element) {
    assert_eq!(
        style_of(path),
        [
            ("id", Some("engrave_path".to_string())),
            ("stroke", Some("none".to_string())),
            ("stroke-width", None),
            ("fill", Some("black".to_string())),
        ]
    );
}

fn merged(cut: &str, engrave: &str, name: &str) -> VectorDocument {
    let text = merge(cut, engrave, name).expect("merge should succeed");
    parse_document(&text).expect("merged output should parse")
}

// ==================== Structure ====================

#[test]
fn test_merge_fixture_has_title_and_two_paths() {
    let doc = merged(&fixture("box_cut.svg"), &fixture("box_engrave.svg"), "box");

    assert_eq!(doc.title(), Ok("box".to_string()));
    let titles = doc.root().child_elements().filter(|e| e.name == "title").count();
    assert_eq!(titles, 1);

    let paths: Vec<_> = doc.drawable_paths().collect();
    assert_eq!(paths.len(), 2);
    expect_cut_style(paths[0]);
    expect_engrave_style(paths[1]);
}

#[test]
fn test_merge_keeps_cut_root_attributes() {
    let doc = merged(&fixture("box_cut.svg"), &fixture("box_engrave.svg"), "box");
    let root = doc.root();
    assert_eq!(root.attr("width"), Some("60mm"));
    assert_eq!(root.attr("height"), Some("40mm"));
    assert_eq!(root.attr("viewBox"), Some("0 -40 60 40"));
}

#[test]
fn test_merge_preserves_geometry() {
    let engrave = parse_document(&fixture("box_engrave.svg")).unwrap();
    let engrave_d = engrave
        .single_drawable_path()
        .unwrap()
        .attr("d")
        .map(str::to_string);

    let doc = merged(&fixture("box_cut.svg"), &fixture("box_engrave.svg"), "box");
    let paths: Vec<_> = doc.drawable_paths().collect();
    assert_eq!(paths[1].attr("d").map(str::to_string), engrave_d);
    assert!(paths[0].attr("d").unwrap_or_default().contains("L 60,-0"));
}

#[test]
fn test_title_is_exact_base_name() {
    let doc = merged(&layer_svg(""), &layer_svg(""), "widget");
    assert_eq!(doc.title(), Ok("widget".to_string()));
}

// ==================== Styling contract ====================

#[test]
fn test_end_to_end_scenario() {
    let doc = merged(
        &layer_svg(r#"stroke="black" fill="red""#),
        &layer_svg(r#"stroke-width="2""#),
        "box",
    );

    assert_eq!(doc.title(), Ok("box".to_string()));
    let paths: Vec<_> = doc.drawable_paths().collect();
    assert_eq!(paths.len(), 2);
    expect_cut_style(paths[0]);
    expect_engrave_style(paths[1]);
}

#[test]
fn test_style_overrides_any_input_style() {
    let inputs = [
        r#"stroke="blue" stroke-width="4" fill="green""#,
        r#"id="shape" fill="none""#,
        r#"stroke="none""#,
        "",
    ];

    for input in inputs {
        let doc = merged(&layer_svg(input), &layer_svg(input), "part");
        let paths: Vec<_> = doc.drawable_paths().collect();
        expect_cut_style(paths[0]);
        expect_engrave_style(paths[1]);
    }
}

#[test]
fn test_restyle_twice_matches_once() {
    for layer in LayerRole::ALL {
        let doc = parse_document(&layer_svg(r#"stroke="black" stroke-width="2""#)).unwrap();
        let mut once = doc.single_drawable_path().unwrap().clone();
        restyle(&mut once, layer);
        let mut twice = once.clone();
        restyle(&mut twice, layer);
        assert_eq!(style_of(&once), style_of(&twice));
        assert!(layer.style().matches(&twice));
    }
}

// ==================== Determinism and round trip ====================

#[test]
fn test_merge_is_deterministic() {
    let a = merge(&fixture("box_cut.svg"), &fixture("box_engrave.svg"), "box").unwrap();
    let b = merge(&fixture("box_cut.svg"), &fixture("box_engrave.svg"), "box").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_round_trip_is_lossless() {
    let cut = parse_document(&fixture("box_cut.svg")).unwrap();
    let engrave = parse_document(&fixture("box_engrave.svg")).unwrap();
    let combined = merge_documents(cut, engrave, "box").unwrap();

    let text = scad_trotec::write_document(&combined);
    let reparsed = parse_document(&text).unwrap();

    assert_eq!(reparsed.title(), combined.title());
    let before: Vec<_> = combined.drawable_paths().collect();
    let after: Vec<_> = reparsed.drawable_paths().collect();
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        let mut b_attrs = b.attributes.clone();
        let mut a_attrs = a.attributes.clone();
        b_attrs.sort();
        a_attrs.sort();
        assert_eq!(b_attrs, a_attrs);
    }

    // A second cycle is a fixed point.
    assert_eq!(scad_trotec::write_document(&reparsed), text);
}

// ==================== Structure violations ====================

fn expect_violation(result: scad_trotec::Result<String>, layer: LayerRole, issue: StructureIssue) {
    match result {
        Err(ExportError::MergeStructureViolation {
            layer: got_layer,
            issue: got_issue,
        }) => {
            assert_eq!(got_layer, layer);
            assert_eq!(got_issue, issue);
        }
        other => panic!("Expected MergeStructureViolation, got {:?}", other),
    }
}

#[test]
fn test_two_paths_in_cut_layer() {
    let result = merge(&fixture("two_paths.svg"), &fixture("box_engrave.svg"), "box");
    expect_violation(result, LayerRole::Cut, StructureIssue::MultiplePaths(2));
}

#[test]
fn test_two_paths_in_engrave_layer() {
    let result = merge(&fixture("box_cut.svg"), &fixture("two_paths.svg"), "box");
    expect_violation(result, LayerRole::Engrave, StructureIssue::MultiplePaths(2));
}

#[test]
fn test_no_path() {
    let empty = r#"<svg xmlns="http://www.w3.org/2000/svg"><title>OpenSCAD Model</title></svg>"#;
    let result = merge(empty, &layer_svg(""), "box");
    expect_violation(result, LayerRole::Cut, StructureIssue::MissingPath);
}

#[test]
fn test_no_title() {
    let untitled = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0,0"/></svg>"#;
    let result = merge(&layer_svg(""), untitled, "box");
    expect_violation(result, LayerRole::Engrave, StructureIssue::MissingTitle);
}

#[test]
fn test_malformed_input() {
    let err = merge("<svg><title>", &layer_svg(""), "box").unwrap_err();
    assert_eq!(err.code(), ErrorCode::MalformedDocument);
}
