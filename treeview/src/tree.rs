//! Tree layout: payload nodes to a labeled view model with stable ids.
//!
//! DESIGN
//! ======
//! Ids are assigned in document order (`node-<n>` for collapsible branches,
//! `media-<n>` for inline previews), so laying out the same payload twice
//! yields the same ids and a [`crate::ViewState`] stays valid across
//! renders. Strings are kept raw here; escaping happens at emission.

use records::{MAX_DEPTH, Node};

use crate::classify::{self, MediaKind};

/// What a tree position is labeled with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Label {
    /// Header of the whole payload. Never used for classification.
    Root(String),
    /// Mapping key.
    Key(String),
    /// 0-based sequence position.
    Index(usize),
}

impl Label {
    /// The mapping key, if this label is one.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Root(_) | Self::Index(_) => None,
        }
    }

    /// Display text (unescaped).
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Root(label) | Self::Key(label) => label.clone(),
            Self::Index(i) => format!("[{i}]"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    pub label: Label,
    pub body: NodeBody,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeBody {
    Scalar(Scalar),
    /// `[]` or `{}`: a leaf with no collapse control.
    Empty(BranchKind),
    Branch(Branch),
    /// Nesting past the render bound.
    Truncated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchKind {
    Sequence,
    Mapping,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Branch {
    /// Toggle id; `None` for the root branch.
    pub id: Option<String>,
    pub kind: BranchKind,
    pub children: Vec<TreeNode>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarTag {
    Null,
    String,
    Number,
    Boolean,
    Unknown,
}

impl ScalarTag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scalar {
    pub tag: ScalarTag,
    pub content: ScalarContent,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScalarContent {
    Text(String),
    Media(MediaRef),
}

/// A classified media string.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaRef {
    pub kind: MediaKind,
    /// The original string.
    pub src: String,
    /// Key name, else file name derived from `src`.
    pub name: String,
    /// Key name when present; used for alt text and captions.
    pub key: Option<String>,
    /// `src` is an http(s) address the viewer can load.
    pub fetchable: bool,
    /// Toggle id for inline image/video previews.
    pub preview_id: Option<String>,
}

/// An inline preview registered during layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaPreview {
    pub id: String,
    pub kind: MediaKind,
}

/// Layout result: the tree plus every toggleable id in document order.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedTree {
    pub root: TreeNode,
    pub collapsible: Vec<String>,
    pub previews: Vec<MediaPreview>,
}

/// Lay out a payload under a root header label.
#[must_use]
pub fn layout(payload: &Node, root_label: &str) -> RenderedTree {
    let mut layout = Layout::default();
    let root = layout.visit(payload, Label::Root(root_label.to_owned()), 0, true);
    RenderedTree { root, collapsible: layout.collapsible, previews: layout.previews }
}

#[derive(Default)]
struct Layout {
    collapsible: Vec<String>,
    previews: Vec<MediaPreview>,
}

impl Layout {
    fn visit(&mut self, node: &Node, label: Label, depth: usize, is_root: bool) -> TreeNode {
        if depth > MAX_DEPTH {
            return TreeNode { label, body: NodeBody::Truncated };
        }

        let body = match node {
            Node::Null => scalar(ScalarTag::Null, "null".to_owned()),
            Node::Bool(v) => scalar(ScalarTag::Boolean, v.to_string()),
            Node::Number(v) => scalar(ScalarTag::Number, v.to_string()),
            Node::Text(v) => self.text(v, label.key()),
            Node::Opaque { text, .. } => scalar(ScalarTag::Unknown, text.clone()),
            Node::Sequence(items) if items.is_empty() => NodeBody::Empty(BranchKind::Sequence),
            Node::Mapping(entries) if entries.is_empty() => NodeBody::Empty(BranchKind::Mapping),
            Node::Sequence(items) => {
                let id = self.branch_id(false);
                let children = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.visit(item, Label::Index(i), depth + 1, false))
                    .collect();
                NodeBody::Branch(Branch { id, kind: BranchKind::Sequence, children })
            }
            Node::Mapping(entries) => {
                let id = self.branch_id(is_root);
                let children = entries
                    .iter()
                    .map(|(key, value)| self.visit(value, Label::Key(key.clone()), depth + 1, false))
                    .collect();
                NodeBody::Branch(Branch { id, kind: BranchKind::Mapping, children })
            }
        };

        TreeNode { label, body }
    }

    /// The root mapping is always open; every other branch, a root
    /// sequence included, gets a toggle id.
    fn branch_id(&mut self, root_mapping: bool) -> Option<String> {
        if root_mapping {
            return None;
        }
        let id = format!("node-{}", self.collapsible.len());
        self.collapsible.push(id.clone());
        Some(id)
    }

    fn text(&mut self, value: &str, key: Option<&str>) -> NodeBody {
        let kind = classify::classify(value, key);
        if kind == MediaKind::Plain {
            return scalar(ScalarTag::String, value.to_owned());
        }

        let value = value.trim();
        let fetchable = classify::is_fetchable(value);
        let preview_id = if fetchable && matches!(kind, MediaKind::Image | MediaKind::Video) {
            let id = format!("media-{}", self.previews.len());
            self.previews.push(MediaPreview { id: id.clone(), kind });
            Some(id)
        } else {
            None
        };

        NodeBody::Scalar(Scalar {
            tag: ScalarTag::String,
            content: ScalarContent::Media(MediaRef {
                kind,
                src: value.to_owned(),
                name: classify::display_name(value, key),
                key: key.map(str::to_owned),
                fetchable,
                preview_id,
            }),
        })
    }
}

fn scalar(tag: ScalarTag, text: String) -> NodeBody {
    NodeBody::Scalar(Scalar { tag, content: ScalarContent::Text(text) })
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tests;
