//! Layer roles and their fixed laser styling.

use std::fmt;

use crate::config::{
    CUT_LAYER_VALUE, CUT_PATH_ID, CUT_STROKE, CUT_STROKE_WIDTH, ENGRAVE_FILL, ENGRAVE_LAYER_VALUE,
    ENGRAVE_PATH_ID, NONE,
};

use super::Element;

/// Which part of the job a rendered layer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// Vector cut through the material.
    Cut,
    /// Raster engrave into the surface.
    Engrave,
}

impl LayerRole {
    /// Both roles in render order.
    pub const ALL: [LayerRole; 2] = [LayerRole::Cut, LayerRole::Engrave];

    /// Value passed to the renderer's layer parameter.
    pub fn parameter_value(&self) -> u8 {
        match self {
            LayerRole::Cut => CUT_LAYER_VALUE,
            LayerRole::Engrave => ENGRAVE_LAYER_VALUE,
        }
    }

    /// Element id given to this layer's path.
    pub fn path_id(&self) -> &'static str {
        match self {
            LayerRole::Cut => CUT_PATH_ID,
            LayerRole::Engrave => ENGRAVE_PATH_ID,
        }
    }

    /// Presentation attributes for this layer.
    pub fn style(&self) -> LayerStyle {
        match self {
            LayerRole::Cut => LayerStyle {
                stroke: CUT_STROKE,
                stroke_width: Some(CUT_STROKE_WIDTH),
                fill: NONE,
            },
            LayerRole::Engrave => LayerStyle {
                stroke: NONE,
                stroke_width: None,
                fill: ENGRAVE_FILL,
            },
        }
    }
}

impl fmt::Display for LayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerRole::Cut => write!(f, "cut"),
            LayerRole::Engrave => write!(f, "engrave"),
        }
    }
}

/// Stroke and fill for one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerStyle {
    pub stroke: &'static str,
    /// `None` means the attribute must be absent.
    pub stroke_width: Option<&'static str>,
    pub fill: &'static str,
}

impl LayerStyle {
    /// Overwrite the element's presentation attributes with this style.
    pub fn apply(&self, element: &mut Element) {
        element.set_attr("stroke", self.stroke);
        match self.stroke_width {
            Some(width) => element.set_attr("stroke-width", width),
            None => {
                element.remove_attr("stroke-width");
            }
        }
        element.set_attr("fill", self.fill);
    }

    /// Whether the element already carries exactly this style.
    pub fn matches(&self, element: &Element) -> bool {
        element.attr("stroke") == Some(self.stroke)
            && element.attr("stroke-width") == self.stroke_width
            && element.attr("fill") == Some(self.fill)
    }
}
