//! Tree rendering, media classification and export formatting for records.
//!
//! This crate is I/O free so the server and the CLI can share it: the server
//! wraps its output in HTTP responses, the CLI writes it to files.
//!
//! Rendering is two passes. [`layout`] turns a payload into a [`RenderedTree`]
//! with stable ids for every collapsible branch and media preview;
//! [`render_html`] emits markup for that tree under a [`ViewState`].

pub mod assets;
pub mod classify;
pub mod escape;
pub mod export;
mod html;
pub mod page;
mod tree;
mod view_state;

pub use classify::MediaKind;
pub use escape::escape_html;
pub use export::{ExportArtifact, ExportKind};
pub use html::render_html;
pub use tree::{
    Branch, BranchKind, Label, MediaPreview, MediaRef, NodeBody, RenderedTree, Scalar, ScalarContent,
    ScalarTag, TreeNode, layout,
};
pub use view_state::{MediaToggle, ViewState};

/// Header label for the record payload.
pub const ROOT_LABEL: &str = "Experimental Data";
