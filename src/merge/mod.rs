//! Combining the cut and engrave layer documents.

mod combine;

pub use combine::{merge, merge_documents, restyle};
