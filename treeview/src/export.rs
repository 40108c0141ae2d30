//! Export formats for a loaded record.
//!
//! DESIGN
//! ======
//! The export menu is an ordered list of independent strategies. Each one
//! is chosen explicitly by the user; a failing strategy reports its failure
//! and never hands off to the next entry. [`ExportKind::Text`] is the one
//! strategy that needs nothing beyond the record itself, so it is always
//! offered as the way out when another one fails.

use records::Record;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::assets::{PRINT_CSS, VIEWER_JS};
use crate::escape::escape_html;

/// Characters of the record id kept in download file names.
const FILENAME_ID_CHARS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Print,
    Document,
    Clipboard,
    Text,
}

impl ExportKind {
    /// Menu order.
    pub const MENU: [Self; 4] = [Self::Print, Self::Document, Self::Clipboard, Self::Text];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::Document => "document",
            Self::Clipboard => "clipboard",
            Self::Text => "text",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Print => "Print",
            Self::Document => "Download PDF",
            Self::Clipboard => "Copy Data",
            Self::Text => "Download Text",
        }
    }

    /// Extension of the downloaded file, for strategies that produce one.
    #[must_use]
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::Document => Some("pdf"),
            Self::Text => Some("txt"),
            Self::Print | Self::Clipboard => None,
        }
    }

    /// Parse a menu key such as `text`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::MENU.into_iter().find(|kind| kind.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Content produced by one export strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub kind: ExportKind,
    pub content_type: &'static str,
    /// Download name; `None` for content shown in place.
    pub filename: Option<String>,
    /// For [`ExportKind::Document`] this is the printable markup handed to
    /// the document generator; `filename` names the converted output.
    pub body: String,
}

/// Prepare the content for one export strategy. `today` dates the file name.
#[must_use]
pub fn prepare(kind: ExportKind, record: &Record, today: Date) -> ExportArtifact {
    let filename = kind.extension().map(|ext| download_filename(&record.id, today, ext));
    let (content_type, body) = match kind {
        ExportKind::Print => ("text/html; charset=utf-8", printable_html(record, true)),
        ExportKind::Document => ("text/html; charset=utf-8", printable_html(record, false)),
        ExportKind::Clipboard => ("text/plain; charset=utf-8", plain_text(record)),
        ExportKind::Text => ("text/plain; charset=utf-8", format!("{}\n", plain_text(record))),
    };
    ExportArtifact { kind, content_type, filename, body }
}

/// Plain-text serialization shared by clipboard and text download.
#[must_use]
pub fn plain_text(record: &Record) -> String {
    format!(
        "EXPERIMENTAL SETUP DATA\n\
         ============================\n\
         \n\
         File: {}\n\
         ID: {}\n\
         Date: {}\n\
         \n\
         EXPERIMENTAL DATA:\n\
         {}",
        record.filename_display(),
        record.id,
        record.timestamp_display(),
        record.payload.to_pretty_json()
    )
}

/// Standalone printable page. `controls` adds the on-screen print button,
/// hidden again by the print styles, and the inline viewer script that
/// drives it.
#[must_use]
pub fn printable_html(record: &Record, controls: bool) -> String {
    let title = format!("Experiment {}", record.id);
    let controls = if controls {
        format!(
            r#"<div class="print-controls"><button type="button" data-print>Print</button></div>
<script>{VIEWER_JS}</script>"#
        )
    } else {
        String::new()
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{css}</style>
</head>
<body class="printable">
{controls}
<div class="header"><h1>Experimental Setup Data</h1></div>
<div class="metadata">
<p><strong>File:</strong> {file}</p>
<p><strong>ID:</strong> {id}</p>
<p><strong>Date:</strong> {date}</p>
</div>
<div class="json-data">
<h3>Experimental Data:</h3>
<pre>{data}</pre>
</div>
</body>
</html>
"#,
        title = escape_html(&title),
        css = PRINT_CSS,
        controls = controls,
        file = escape_html(record.filename_display()),
        id = escape_html(&record.id),
        date = escape_html(&record.timestamp_display()),
        data = escape_html(&record.payload.to_pretty_json()),
    )
}

/// `experiment_<first 8 chars of id>_<YYYY-MM-DD>.<ext>`.
#[must_use]
pub fn download_filename(id: &str, date: Date, ext: &str) -> String {
    let prefix: String = id.chars().take(FILENAME_ID_CHARS).collect();
    format!(
        "experiment_{prefix}_{:04}-{:02}-{:02}.{ext}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
