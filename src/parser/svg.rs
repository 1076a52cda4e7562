//! SVG text to [`VectorDocument`].

use roxmltree::{Document, ParsingOptions};

use crate::error::{ExportError, Result};
use crate::model::{Element, Node, VectorDocument};

/// Namespace every parser knows implicitly; never redeclared.
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse SVG text into an owned document tree.
///
/// Whitespace-only text between elements is dropped. Comments and
/// processing instructions are not kept.
pub fn parse_document(text: &str) -> Result<VectorDocument> {
    // OpenSCAD writes a <!DOCTYPE svg ...> preamble, which roxmltree rejects by default.
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };

    let doc = Document::parse_with_options(text, options).map_err(|e| {
        ExportError::MalformedDocument {
            message: e.to_string(),
        }
    })?;

    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(ExportError::MalformedDocument {
            message: format!("root element is <{}>, expected <svg>", root.tag_name().name()),
        });
    }

    Ok(VectorDocument::new(convert_element(root)))
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Element {
    let tag = node.tag_name();
    let mut element = Element::new(qualified_name(node, tag.namespace(), tag.name(), true));

    for (prefix, uri) in declared_namespaces(node) {
        let name = match prefix {
            Some(p) => format!("xmlns:{}", p),
            None => "xmlns".to_string(),
        };
        element.attributes.push((name, uri));
    }

    for attr in node.attributes() {
        let name = qualified_name(node, attr.namespace(), attr.name(), false);
        element.attributes.push((name, attr.value().to_string()));
    }

    for child in node.children() {
        if child.is_element() {
            element.push(Node::Element(convert_element(child)));
        } else if child.is_text() {
            let text = child.text().unwrap_or_default();
            if !text.trim().is_empty() {
                element.push(Node::Text(text.to_string()));
            }
        }
    }

    element
}

/// `prefix:local` for names in a prefixed namespace, `local` otherwise.
///
/// Element names in the default namespace stay unprefixed even when the
/// same URI is also bound to a prefix (Inkscape declares `xmlns:svg`).
fn qualified_name(
    node: roxmltree::Node<'_, '_>,
    namespace: Option<&str>,
    local: &str,
    allow_default: bool,
) -> String {
    let Some(uri) = namespace else {
        return local.to_string();
    };

    let is_default = node
        .namespaces()
        .any(|ns| ns.name().is_none() && ns.uri() == uri);
    if allow_default && is_default {
        return local.to_string();
    }

    match node.lookup_prefix(uri) {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
        _ => local.to_string(),
    }
}

/// Namespace bindings introduced on this element rather than inherited.
fn declared_namespaces(node: roxmltree::Node<'_, '_>) -> Vec<(Option<String>, String)> {
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    node.namespaces()
        .filter(|ns| ns.uri() != XML_NS)
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .map(|ns| (ns.name().map(str::to_string), ns.uri().to_string()))
        .collect()
}
