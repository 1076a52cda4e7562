//! SVG document parser module.

mod svg;

pub use self::svg::parse_document;
