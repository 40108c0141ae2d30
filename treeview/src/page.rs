//! Full HTML documents: the viewer page, the clipboard page and error panels.

use records::Record;
use url::form_urlencoded;

use crate::assets::{VIEWER_CSS, VIEWER_JS};
use crate::escape::escape_html;
use crate::export::{ExportKind, plain_text};
use crate::html::render_html;
use crate::tree::layout;
use crate::view_state::ViewState;
use crate::ROOT_LABEL;

/// How a page pulls in the viewer stylesheet and script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Assets {
    /// `<link>`/`<script src>` to the server's `/assets/` routes.
    #[default]
    Linked,
    /// Embedded, for pages saved to disk.
    Inline,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub assets: Assets,
    /// Show the export menu (only meaningful when served).
    pub exports: bool,
    /// Start with every branch collapsed.
    pub collapsed: bool,
}

/// The record viewer: metadata header, export menu and the payload tree.
#[must_use]
pub fn viewer_page(record: &Record, options: PageOptions) -> String {
    let tree = layout(&record.payload, ROOT_LABEL);
    let mut state = ViewState::for_tree(&tree);
    if options.collapsed {
        state.collapse_all();
    }

    let exports = if options.exports { export_menu(&record.id) } else { String::new() };
    let toolbar = if tree.collapsible.is_empty() {
        String::new()
    } else {
        concat!(
            r#"<div class="toolbar">"#,
            r#"<button type="button" data-expand-all>Expand all</button>"#,
            r#"<button type="button" data-collapse-all>Collapse all</button>"#,
            "</div>"
        )
        .to_owned()
    };

    let body = format!(
        r#"<div class="viewer-header"><h1>Experimental Setup Data</h1></div>
<div class="metadata">
<p><strong>File:</strong> {file}</p>
<p><strong>ID:</strong> {id}</p>
<p><strong>Date:</strong> {date}</p>
</div>
{exports}
{toolbar}
{tree}"#,
        file = escape_html(record.filename_display()),
        id = escape_html(&record.id),
        date = escape_html(&record.timestamp_display()),
        exports = exports,
        toolbar = toolbar,
        tree = render_html(&tree, &state),
    );
    document(&format!("Experiment {}", record.id), &body, options.assets)
}

/// Plain-text serialization in a read-only text area with a copy button.
/// The script copies through the Clipboard API and falls back to selecting
/// the text for a manual copy.
#[must_use]
pub fn clipboard_page(record: &Record, assets: Assets) -> String {
    let body = format!(
        r#"<div class="viewer-header"><h1>Copy Experimental Data</h1><a href="{back}">Back to record</a></div>
<div class="toolbar"><button type="button" data-copy-target="export-text">Copy to clipboard</button><span class="copy-status" aria-live="polite"></span></div>
<textarea id="export-text" class="clipboard-text" readonly>{text}</textarea>"#,
        back = escape_html(&record_href(&record.id)),
        text = escape_html(&plain_text(record)),
    );
    document(&format!("Copy {}", record.id), &body, assets)
}

/// A failure panel replacing the page body. `retry` re-issues the whole
/// load; `fallback` offers another way to get at the data.
#[must_use]
pub fn error_page(
    title: &str,
    message: &str,
    retry: Option<&str>,
    fallback: Option<(&str, &str)>,
    assets: Assets,
) -> String {
    let retry = retry.map_or_else(String::new, |href| {
        format!(r#"<a class="retry" href="{}">Retry</a>"#, escape_html(href))
    });
    let fallback = fallback.map_or_else(String::new, |(href, label)| {
        format!(
            r#" <a class="retry" href="{}">{}</a>"#,
            escape_html(href),
            escape_html(label)
        )
    });
    let body = format!(
        r#"<div class="error-panel" role="alert"><h2>{title}</h2><p class="error-detail">{message}</p>{retry}{fallback}</div>"#,
        title = escape_html(title),
        message = escape_html(message),
    );
    document(title, &body, assets)
}

/// Viewer URL for a record id.
#[must_use]
pub fn record_href(id: &str) -> String {
    format!("/?id={}", encode(id))
}

/// Export URL for a record id.
#[must_use]
pub fn export_href(kind: ExportKind, id: &str) -> String {
    format!("/export/{}?id={}", kind.as_str(), encode(id))
}

fn encode(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

fn export_menu(id: &str) -> String {
    let links: String = ExportKind::MENU
        .into_iter()
        .map(|kind| {
            format!(
                r#"<a class="export-{}" href="{}">{}</a>"#,
                kind.as_str(),
                escape_html(&export_href(kind, id)),
                kind.label()
            )
        })
        .collect();
    format!(r#"<nav class="export-menu">{links}</nav>"#)
}

fn document(title: &str, body: &str, assets: Assets) -> String {
    let (head, tail) = match assets {
        Assets::Linked => (
            r#"<link rel="stylesheet" href="/assets/viewer.css">"#.to_owned(),
            r#"<script src="/assets/viewer.js" defer></script>"#.to_owned(),
        ),
        Assets::Inline => (
            format!("<style>{VIEWER_CSS}</style>"),
            format!("<script>{VIEWER_JS}</script>"),
        ),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{head}
</head>
<body>
<div class="container">
{body}
</div>
{tail}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
