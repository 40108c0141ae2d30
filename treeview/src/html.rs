//! Markup emission for a laid-out tree.
//!
//! Every record string passes through [`escape_html`] here, including the
//! `src`/`href` attributes of media previews. Interactive behavior is wired
//! by `data-node`, `data-media` and `data-zoom` attributes picked up by the
//! viewer script.

use crate::classify::{self, MediaKind};
use crate::escape::escape_html;
use crate::tree::{
    Branch, BranchKind, Label, MediaRef, NodeBody, RenderedTree, Scalar, ScalarContent, ScalarTag,
    TreeNode,
};
use crate::view_state::ViewState;

/// Render a laid-out tree under the given view state.
#[must_use]
pub fn render_html(tree: &RenderedTree, state: &ViewState) -> String {
    let mut out = String::new();
    out.push_str(r#"<div class="json-tree">"#);
    Emitter { out: &mut out, state }.root(&tree.root);
    out.push_str("</div>");
    out
}

struct Emitter<'a> {
    out: &'a mut String,
    state: &'a ViewState,
}

impl Emitter<'_> {
    fn root(&mut self, node: &TreeNode) {
        let label = escape_html(&node.label.text());
        match &node.body {
            NodeBody::Branch(branch) if branch.id.is_some() => {
                self.out.push_str(r#"<div class="json-root-content">"#);
                self.branch(&node.label, branch);
                self.out.push_str("</div>");
            }
            NodeBody::Branch(branch) => {
                self.out.push_str(&format!(
                    r#"<div class="json-root-label">{label} <span class="json-count">{}</span></div>"#,
                    count_text(branch)
                ));
                self.out.push_str(r#"<div class="json-root-content">"#);
                self.children(branch);
                self.out.push_str("</div>");
            }
            _ => {
                self.out.push_str(&format!(r#"<div class="json-root-label">{label}</div>"#));
                self.out.push_str(r#"<div class="json-root-content">"#);
                self.node(node);
                self.out.push_str("</div>");
            }
        }
    }

    fn children(&mut self, branch: &Branch) {
        for child in &branch.children {
            self.out.push_str(r#"<div class="json-item">"#);
            self.node(child);
            self.out.push_str("</div>");
        }
    }

    fn node(&mut self, node: &TreeNode) {
        match &node.body {
            NodeBody::Scalar(scalar) => self.scalar(&node.label, scalar),
            NodeBody::Empty(kind) => {
                let (marker, class) = match kind {
                    BranchKind::Sequence => ("[]", "array"),
                    BranchKind::Mapping => ("{}", "object"),
                };
                self.property(&node.label, class, marker);
            }
            NodeBody::Truncated => {
                self.property(&node.label, "truncated", "&hellip; (nesting too deep)");
            }
            NodeBody::Branch(branch) => self.branch(&node.label, branch),
        }
    }

    fn scalar(&mut self, label: &Label, scalar: &Scalar) {
        let value = match &scalar.content {
            ScalarContent::Text(text) if scalar.tag == ScalarTag::String => {
                format!("&quot;{}&quot;", escape_html(text))
            }
            ScalarContent::Text(text) => escape_html(text),
            ScalarContent::Media(media) => self.media(media),
        };
        self.property(label, scalar.tag.as_str(), &value);
    }

    /// `value` is already markup.
    fn property(&mut self, label: &Label, class: &str, value: &str) {
        match label {
            Label::Root(_) => {
                self.out.push_str(&format!(r#"<div class="json-value {class}">{value}</div>"#));
            }
            Label::Key(_) | Label::Index(_) => {
                let label_class = if matches!(label, Label::Index(_)) { "array-index" } else { "json-key-label" };
                let suffix = if matches!(label, Label::Key(_)) { ":" } else { "" };
                self.out.push_str(&format!(
                    r#"<div class="json-property"><span class="{label_class}">{}{suffix}</span> <span class="json-value {class}">{value}</span></div>"#,
                    escape_html(&label.text())
                ));
            }
        }
    }

    fn branch(&mut self, label: &Label, branch: &Branch) {
        let Some(id) = branch.id.as_deref() else {
            self.children(branch);
            return;
        };
        let collapsed = self.state.is_collapsed(id);
        let (chevron, expanded, content_class) = if collapsed {
            ("&#9656;", "false", "json-content collapsed")
        } else {
            ("&#9662;", "true", "json-content")
        };

        self.out.push_str(&format!(
            r#"<div class="json-key" data-node="{id}" role="button" tabindex="0" aria-expanded="{expanded}"><span class="json-chevron">{chevron}</span> <strong>{}</strong> <span class="json-count">{}</span></div>"#,
            escape_html(&label.text()),
            count_text(branch)
        ));
        self.out.push_str(&format!(r#"<div class="{content_class}" id="{id}">"#));
        self.children(branch);
        self.out.push_str("</div>");
    }

    fn media(&self, media: &MediaRef) -> String {
        if !media.fetchable {
            return unavailable(media);
        }
        match media.kind {
            MediaKind::Image | MediaKind::Video => self.preview(media),
            MediaKind::File => open_link(media),
            MediaKind::Plain => escape_html(&media.src),
        }
    }

    fn preview(&self, media: &MediaRef) -> String {
        let Some(id) = media.preview_id.as_deref() else {
            return open_link(media);
        };
        let shown = self.state.is_media_shown(id);
        let src = escape_html(&media.src);
        let name = escape_html(&media.name);

        let (container, icon, show_label, player, caption_class, default_caption, what) = match media.kind {
            MediaKind::Video => (
                "video-container",
                "&#127909;",
                "Play",
                format!(
                    r#"<video controls preload="metadata" class="experiment-video" src="{src}" data-fallback="{id}"></video>"#
                ),
                "video-caption",
                "Experiment Video",
                "Video",
            ),
            _ => (
                "image-container",
                "&#128444;",
                "View",
                format!(
                    r#"<img class="experiment-image" src="{src}" alt="{alt}" loading="lazy" data-fallback="{id}" data-zoom data-caption="{alt}">"#,
                    alt = escape_html(media.key.as_deref().unwrap_or("Experiment Image"))
                ),
                "image-caption",
                "Experiment Image",
                "Image",
            ),
        };
        let button = if shown { "Hide" } else { show_label };
        let content_class = if shown { "media-content" } else { "media-content collapsed" };
        let caption = escape_html(media.key.as_deref().unwrap_or(default_caption));

        format!(
            concat!(
                r#"<div class="media-container {container}">"#,
                r#"<div class="media-info"><span class="media-icon">{icon}</span> <span class="media-name">{name}</span> "#,
                r#"<button type="button" class="media-toggle" data-media="{id}" data-show-label="{show_label}">{button}</button></div>"#,
                r#"<div class="{content_class}" id="{id}">{player}"#,
                r#"<div class="error-media hidden">{what} could not be loaded<br><small>{src}</small></div>"#,
                r#"<div class="{caption_class}">{caption}</div></div></div>"#,
            ),
            container = container,
            icon = icon,
            name = name,
            id = id,
            show_label = show_label,
            button = button,
            content_class = content_class,
            player = player,
            what = what,
            src = src,
            caption_class = caption_class,
            caption = caption,
        )
    }
}

fn open_link(media: &MediaRef) -> String {
    format!(
        concat!(
            r#"<div class="media-container file-container">"#,
            r#"<div class="media-info"><span class="file-icon {icon}"></span> <span class="media-name">{name}</span> "#,
            r#"<a class="media-link" href="{src}" target="_blank" rel="noopener noreferrer">Open</a></div></div>"#,
        ),
        icon = classify::file_icon(&media.src),
        name = escape_html(&media.name),
        src = escape_html(&media.src),
    )
}

fn unavailable(media: &MediaRef) -> String {
    let (container, status) = match media.kind {
        MediaKind::Image => ("image-container", "Mobile image (not accessible via web)"),
        MediaKind::Video => ("video-container", "Mobile video (not accessible via web)"),
        MediaKind::File | MediaKind::Plain => ("file-container", "Local file (not accessible via web)"),
    };
    format!(
        concat!(
            r#"<div class="media-container {container} unavailable">"#,
            r#"<div class="media-info"><span class="media-name">{name}</span> <span class="media-status">{status}</span></div>"#,
            r#"<div class="media-path">{src}</div></div>"#,
        ),
        container = container,
        name = escape_html(&media.name),
        status = status,
        src = escape_html(&media.src),
    )
}

/// `{3 properties}` / `[1 item]`.
fn count_text(branch: &Branch) -> String {
    let n = branch.children.len();
    match branch.kind {
        BranchKind::Mapping => format!("{{{n} {}}}", if n == 1 { "property" } else { "properties" }),
        BranchKind::Sequence => format!("[{n} {}]", if n == 1 { "item" } else { "items" }),
    }
}

#[cfg(test)]
#[path = "html_test.rs"]
mod tests;
