//! Clipboard export with a manual-copy fallback.

use std::io::Write;

use crate::CliError;

/// Text sink for the clipboard export.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), CliError>;
}

/// System clipboard through `arboard`, opened on first use.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), CliError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(|e| CliError::Clipboard(e.to_string()))?,
        };
        self.inner
            .insert(clipboard)
            .set_text(text.to_owned())
            .map_err(|e| CliError::Clipboard(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// The clipboard was unavailable; the text went to `out` instead.
    Manual { reason: String },
}

/// Copy `text` to the clipboard, or write it to `out` for a manual copy.
///
/// # Errors
///
/// Returns [`CliError::Io`] only if the fallback output cannot be written.
pub fn copy_or_print(clipboard: &mut dyn Clipboard, text: &str, out: &mut impl Write) -> Result<CopyOutcome, CliError> {
    match clipboard.set_text(text) {
        Ok(()) => Ok(CopyOutcome::Copied),
        Err(e) => {
            writeln!(out, "{text}")?;
            out.flush()?;
            Ok(CopyOutcome::Manual { reason: e.to_string() })
        }
    }
}

#[cfg(test)]
#[path = "clipboard_test.rs"]
mod tests;
