//! Data model types for layer documents.

mod document;
mod layer;

pub use document::{Element, Node, StructureIssue, VectorDocument};
pub use layer::{LayerRole, LayerStyle};
