//! Layer document merge.
//!
//! The cut document is reused as the combined document: its title becomes the
//! source base name, its path is restyled for cutting, and a deep copy of the
//! restyled engrave path is appended after it.

use tracing::debug;

use crate::error::{ExportError, Result};
use crate::generator::write_document;
use crate::model::{Element, LayerRole, StructureIssue, VectorDocument};
use crate::parser::parse_document;

/// Merge the rendered cut and engrave SVG texts into one combined SVG text.
pub fn merge(cut_text: &str, engrave_text: &str, source_base_name: &str) -> Result<String> {
    let cut = parse_document(cut_text)?;
    let engrave = parse_document(engrave_text)?;
    let combined = merge_documents(cut, engrave, source_base_name)?;
    Ok(write_document(&combined))
}

/// Merge two parsed layer documents. Consumes both; returns the combined tree.
pub fn merge_documents(
    mut cut: VectorDocument,
    mut engrave: VectorDocument,
    source_base_name: &str,
) -> Result<VectorDocument> {
    let violation = |layer: LayerRole| {
        move |issue: StructureIssue| ExportError::MergeStructureViolation { layer, issue }
    };

    // Check everything up front so a bad engrave layer leaves nothing half-done.
    engrave.title_element().map_err(violation(LayerRole::Engrave))?;
    engrave
        .single_drawable_path()
        .map_err(violation(LayerRole::Engrave))?;

    cut.title_element_mut()
        .map_err(violation(LayerRole::Cut))?
        .set_text(source_base_name);

    restyle(
        cut.single_drawable_path_mut()
            .map_err(violation(LayerRole::Cut))?,
        LayerRole::Cut,
    );

    let engrave_path = engrave
        .single_drawable_path_mut()
        .map_err(violation(LayerRole::Engrave))?;
    restyle(engrave_path, LayerRole::Engrave);

    cut.import_node(engrave_path);
    debug!(
        "Merged layers for '{}': {} top-level elements",
        source_base_name,
        cut.root().child_elements().count()
    );

    Ok(cut)
}

/// Assign a layer's id and fixed style to a path element.
pub fn restyle(path: &mut Element, layer: LayerRole) {
    path.set_attr("id", layer.path_id());
    layer.style().apply(path);
}
