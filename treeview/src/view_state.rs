//! Presentational state for a laid-out tree.
//!
//! Which branches are collapsed and which previews are shown lives here,
//! keyed by the ids [`crate::layout`] assigns. The data model is never
//! touched.

use std::collections::{BTreeMap, BTreeSet};

use crate::classify::MediaKind;
use crate::tree::RenderedTree;

/// Result of toggling a media preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MediaToggle {
    pub shown: bool,
    /// A video was hidden and its playback must stop.
    pub pause_playback: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    branches: BTreeSet<String>,
    collapsed: BTreeSet<String>,
    previews: BTreeMap<String, MediaKind>,
    shown: BTreeSet<String>,
}

impl ViewState {
    /// Initial state: every branch expanded, every preview hidden.
    #[must_use]
    pub fn for_tree(tree: &RenderedTree) -> Self {
        Self {
            branches: tree.collapsible.iter().cloned().collect(),
            collapsed: BTreeSet::new(),
            previews: tree.previews.iter().map(|p| (p.id.clone(), p.kind)).collect(),
            shown: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn is_collapsed(&self, id: &str) -> bool {
        self.collapsed.contains(id)
    }

    #[must_use]
    pub fn is_media_shown(&self, id: &str) -> bool {
        self.shown.contains(id)
    }

    /// Flip one branch. Returns the new collapsed flag, or `None` for an
    /// id the tree does not have.
    pub fn toggle_node(&mut self, id: &str) -> Option<bool> {
        if !self.branches.contains(id) {
            return None;
        }
        if self.collapsed.remove(id) {
            Some(false)
        } else {
            self.collapsed.insert(id.to_owned());
            Some(true)
        }
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    pub fn collapse_all(&mut self) {
        self.collapsed.clone_from(&self.branches);
    }

    /// Show or hide one preview. `None` for an unknown id.
    pub fn toggle_media(&mut self, id: &str) -> Option<MediaToggle> {
        let kind = *self.previews.get(id)?;
        if self.shown.remove(id) {
            Some(MediaToggle { shown: false, pause_playback: kind == MediaKind::Video })
        } else {
            self.shown.insert(id.to_owned());
            Some(MediaToggle { shown: true, pause_playback: false })
        }
    }
}

#[cfg(test)]
#[path = "view_state_test.rs"]
mod tests;
