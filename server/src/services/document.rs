//! Printable document generation through an external HTML-to-PDF tool.
//!
//! The converter reads HTML on stdin and writes the document to stdout
//! (`<command> --quiet - -`). A missing, failing or slow converter is
//! reported as a [`DocumentError`]; the text export stays available.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::DocumentConfig;
use crate::error::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("document generator not found: {0}")]
    ToolNotFound(String),

    #[error("document generation failed: {0}")]
    Failed(String),

    #[error("document generation timed out after {0}s")]
    TimedOut(u64),
}

impl ErrorCode for DocumentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ToolNotFound(_) => "E_DOCUMENT_TOOL_NOT_FOUND",
            Self::Failed(_) => "E_DOCUMENT_FAILED",
            Self::TimedOut(_) => "E_DOCUMENT_TIMEOUT",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::TimedOut(_))
    }
}

/// Converts printable markup into a downloadable document.
#[async_trait::async_trait]
pub trait DocumentGenerator: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`DocumentError`] when the conversion cannot complete.
    async fn generate(&self, html: &str) -> Result<Vec<u8>, DocumentError>;
}

/// Runs the configured converter command as a child process.
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
    timeout_secs: u64,
}

impl CommandGenerator {
    /// `command` may carry extra leading arguments (`"wkhtmltopdf -s A4"`);
    /// the stdin/stdout arguments are appended.
    #[must_use]
    pub fn new(config: &DocumentConfig) -> Self {
        let mut parts = config.command.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_default();
        let mut args: Vec<String> = parts.collect();
        args.extend(["--quiet", "-", "-"].map(str::to_string));
        Self { program, args, timeout_secs: config.timeout_secs }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, html: &str) -> Result<Vec<u8>, DocumentError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    DocumentError::ToolNotFound(self.program.clone())
                } else {
                    DocumentError::Failed(e.to_string())
                }
            })?;

        // stdin is fed from its own task while stdout drains.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = html.as_bytes().to_vec();
            tokio::spawn(async move {
                let _ = stdin.write_all(&input).await;
                let _ = stdin.shutdown().await;
            })
        });

        let output = child.wait_with_output().await.map_err(|e| DocumentError::Failed(e.to_string()))?;
        if let Some(writer) = writer {
            let _ = writer.await;
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.trim();
            return Err(DocumentError::Failed(if detail.is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                detail.to_string()
            }));
        }
        if output.stdout.is_empty() {
            return Err(DocumentError::Failed(format!("{} produced no output", self.program)));
        }
        Ok(output.stdout)
    }
}

#[async_trait::async_trait]
impl DocumentGenerator for CommandGenerator {
    async fn generate(&self, html: &str) -> Result<Vec<u8>, DocumentError> {
        if self.program.is_empty() {
            return Err(DocumentError::ToolNotFound(String::new()));
        }
        tokio::time::timeout(Duration::from_secs(self.timeout_secs), self.run(html))
            .await
            .map_err(|_| DocumentError::TimedOut(self.timeout_secs))?
    }
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
