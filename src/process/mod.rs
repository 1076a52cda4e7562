//! External tool plumbing: lookup, rendering and page conversion.

mod convert;
mod locate;
mod render;
mod run;

pub use convert::{convert_args, convert_to_pdf};
pub use locate::{locate_tool, Platform, Tool};
pub use render::{render_args, render_layer};
