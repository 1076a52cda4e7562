//! SVG document writer module.

mod svg;

pub use self::svg::write_document;
