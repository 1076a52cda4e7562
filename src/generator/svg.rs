//! [`VectorDocument`] to SVG text.

use svg::node::element::Element as SvgElement;
use svg::node::Text;
use svg::Node as _;

use crate::model::{Element, Node, VectorDocument};

/// XML declaration written ahead of the root element.
const XML_DECLARATION: &str = r#"<?xml version="1.0" standalone="no"?>"#;

/// Serialize a document to SVG text.
pub fn write_document(document: &VectorDocument) -> String {
    let root = build_element(document.root());
    format!("{}\n{}\n", XML_DECLARATION, root)
}

fn build_element(element: &Element) -> SvgElement {
    let mut out = SvgElement::new(element.name.as_str());

    for (name, value) in &element.attributes {
        out.assign(name.as_str(), value.as_str());
    }

    for child in &element.children {
        match child {
            Node::Element(e) => out.append(build_element(e)),
            Node::Text(t) => out.append(Text::new(t.as_str())),
        }
    }

    out
}
