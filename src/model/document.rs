//! Owned SVG document tree.

use std::collections::HashSet;
use std::fmt;

/// Name of the title element directly under the root.
const TITLE: &str = "title";

/// Name of a drawable path element directly under the root.
const PATH: &str = "path";

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with ordered attributes and owned children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Qualified name (`prefix:local` for foreign namespaces).
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, overwriting in place or appending.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attributes.iter().position(|(k, _)| k == name)?;
        Some(self.attributes.remove(idx).1)
    }

    /// Child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Mutable child elements, skipping text.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    /// Append a child node.
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Visit this element and every descendant element, depth first.
    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in self.child_elements() {
            child.walk(visit);
        }
    }

    fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        visit(self);
        for child in self.child_elements_mut() {
            child.walk_mut(visit);
        }
    }
}

/// Ways a rendered layer document can miss the expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureIssue {
    /// No `<title>` directly under the root.
    MissingTitle,
    /// No `<path>` directly under the root.
    MissingPath,
    /// More than one `<path>` directly under the root.
    MultiplePaths(usize),
}

impl fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureIssue::MissingTitle => write!(f, "no <title> element under the root"),
            StructureIssue::MissingPath => write!(f, "no <path> element under the root"),
            StructureIssue::MultiplePaths(n) => {
                write!(f, "expected exactly one <path> under the root, found {}", n)
            }
        }
    }
}

/// A parsed vector document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorDocument {
    root: Element,
}

impl VectorDocument {
    /// Wrap a root element.
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// The root `<svg>` element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Mutable root element.
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// The first `<title>` directly under the root.
    pub fn title_element(&self) -> Result<&Element, StructureIssue> {
        self.root
            .child_elements()
            .find(|e| e.name == TITLE)
            .ok_or(StructureIssue::MissingTitle)
    }

    /// Mutable access to the first `<title>` directly under the root.
    pub fn title_element_mut(&mut self) -> Result<&mut Element, StructureIssue> {
        self.root
            .child_elements_mut()
            .find(|e| e.name == TITLE)
            .ok_or(StructureIssue::MissingTitle)
    }

    /// Title text.
    pub fn title(&self) -> Result<String, StructureIssue> {
        self.title_element().map(Element::text)
    }

    /// All `<path>` elements directly under the root.
    pub fn drawable_paths(&self) -> impl Iterator<Item = &Element> {
        self.root.child_elements().filter(|e| e.name == PATH)
    }

    /// The one `<path>` directly under the root.
    pub fn single_drawable_path(&self) -> Result<&Element, StructureIssue> {
        match self.path_count() {
            1 => self.drawable_paths().next().ok_or(StructureIssue::MissingPath),
            0 => Err(StructureIssue::MissingPath),
            n => Err(StructureIssue::MultiplePaths(n)),
        }
    }

    /// Mutable access to the one `<path>` directly under the root.
    pub fn single_drawable_path_mut(&mut self) -> Result<&mut Element, StructureIssue> {
        match self.path_count() {
            1 => self
                .root
                .child_elements_mut()
                .find(|e| e.name == PATH)
                .ok_or(StructureIssue::MissingPath),
            0 => Err(StructureIssue::MissingPath),
            n => Err(StructureIssue::MultiplePaths(n)),
        }
    }

    fn path_count(&self) -> usize {
        self.drawable_paths().count()
    }

    /// Every `id` value in the document.
    pub fn ids(&self) -> HashSet<String> {
        let mut ids = HashSet::new();
        self.root.walk(&mut |e| {
            if let Some(id) = e.attr("id") {
                ids.insert(id.to_string());
            }
        });
        ids
    }

    /// Deep-copy `node` into this document as the root's last child.
    ///
    /// The copy shares nothing with its source. Ids inside the copy that
    /// already exist here get a `_N` suffix so ids stay unique.
    pub fn import_node(&mut self, node: &Element) -> &mut Element {
        let mut taken = self.ids();
        let mut copy = node.clone();

        copy.walk_mut(&mut |e| {
            let Some(id) = e.attr("id") else {
                return;
            };
            if taken.insert(id.to_string()) {
                return;
            }
            let fresh = (1..)
                .map(|n| format!("{}_{}", id, n))
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or_default();
            taken.insert(fresh.clone());
            e.set_attr("id", fresh);
        });

        self.root.push(Node::Element(copy));
        match self.root.children.last_mut() {
            Some(Node::Element(e)) => e,
            _ => unreachable!("element was just appended"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn path(id: &str) -> Element {
        let mut e = Element::new("path");
        e.set_attr("id", id);
        e.set_attr("d", "M0,0 L1,1 Z");
        e
    }

    fn document(children: Vec<Element>) -> VectorDocument {
        let mut root = Element::new("svg");
        root.children = children.into_iter().map(Node::Element).collect();
        VectorDocument::new(root)
    }

    #[test]
    fn test_set_attr_overwrites_in_place() {
        let mut e = path("a");
        e.set_attr("d", "M2,2");
        e.set_attr("fill", "none");
        assert_eq!(e.attr("d"), Some("M2,2"));
        assert_eq!(e.attributes[0].0, "id");
        assert_eq!(e.attributes[2], ("fill".to_string(), "none".to_string()));
        assert_eq!(e.remove_attr("fill"), Some("none".to_string()));
        assert_eq!(e.remove_attr("fill"), None);
    }

    #[test]
    fn test_title_accessors() {
        let mut title = Element::new("title");
        title.set_text("OpenSCAD Model");
        let mut doc = document(vec![title, path("p")]);

        assert_eq!(doc.title(), Ok("OpenSCAD Model".to_string()));
        doc.title_element_mut().expect("title").set_text("widget");
        assert_eq!(doc.title(), Ok("widget".to_string()));

        let doc = document(vec![path("p")]);
        assert_eq!(doc.title(), Err(StructureIssue::MissingTitle));
    }

    #[test]
    fn test_single_drawable_path() {
        let doc = document(vec![Element::new("title"), path("p")]);
        assert_eq!(doc.single_drawable_path().map(|e| e.attr("id")), Ok(Some("p")));

        let doc = document(vec![Element::new("title")]);
        assert_eq!(doc.single_drawable_path(), Err(StructureIssue::MissingPath));

        let mut doc = document(vec![path("a"), path("b")]);
        assert_eq!(
            doc.single_drawable_path_mut().map(|_| ()),
            Err(StructureIssue::MultiplePaths(2))
        );
    }

    #[test]
    fn test_nested_paths_are_not_drawable() {
        let mut group = Element::new("g");
        group.push(Node::Element(path("inner")));
        let doc = document(vec![group, path("outer")]);
        assert_eq!(doc.drawable_paths().count(), 1);
        assert_eq!(doc.ids().len(), 2);
    }

    #[test]
    fn test_import_node_appends_detached_copy() {
        let mut dest = document(vec![Element::new("title"), path("cut_path")]);
        let mut source = path("engrave_path");

        dest.import_node(&source).set_attr("fill", "black");
        source.set_attr("d", "M9,9");

        let last = dest.root().child_elements().last().expect("imported");
        assert_eq!(last.attr("id"), Some("engrave_path"));
        assert_eq!(last.attr("d"), Some("M0,0 L1,1 Z"));
        assert_eq!(last.attr("fill"), Some("black"));
        assert_eq!(source.attr("fill"), None);
    }

    #[test]
    fn test_import_node_renames_colliding_ids() {
        let mut dest = document(vec![path("shape"), path("shape_1")]);
        let mut incoming = Element::new("g");
        incoming.set_attr("id", "shape");
        incoming.push(Node::Element(path("shape")));
        incoming.push(Node::Element(path("other")));

        let imported = dest.import_node(&incoming).clone();
        assert_eq!(imported.attr("id"), Some("shape_2"));
        let inner: Vec<_> = imported.child_elements().map(|e| e.attr("id")).collect();
        assert_eq!(inner, vec![Some("shape_3"), Some("other")]);
        assert_eq!(dest.ids().len(), 5);
    }
}
