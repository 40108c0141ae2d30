mod client;
mod clipboard;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use time::{Date, OffsetDateTime};
use treeview::export::{self, ExportKind};
use treeview::page::{self, Assets, PageOptions};

use crate::client::ViewerClient;
use crate::clipboard::{CopyOutcome, SystemClipboard, copy_or_print};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status} ({code}): {message}")]
    Server { status: u16, code: String, message: String, retryable: bool },
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("document export failed: {0}")]
    Document(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "expview", about = "Experiment record viewer CLI")]
struct Cli {
    #[arg(long, env = "EXPVIEW_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a record as plain text.
    Show { id: String },
    /// Write the standalone viewer page for a record.
    Render {
        id: String,
        #[arg(long, help = "Output file; stdout when omitted")]
        out: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        collapsed: bool,
    },
    /// Run one export action for a record.
    Export {
        id: String,
        #[arg(long, value_parser = parse_format, help = "print, document, clipboard or text")]
        format: ExportKind,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let client = ViewerClient::new(&cli.base_url)?;

    let result = match cli.command {
        Command::Show { id } => run_show(&client, &id).await,
        Command::Render { id, out, collapsed } => run_render(&client, &id, out.as_deref(), collapsed).await,
        Command::Export { id, format, out_dir } => run_export(&client, &id, format, &out_dir).await,
    };
    if let Err(CliError::Server { retryable: true, .. }) = &result {
        eprintln!("the server reported a temporary failure; retry shortly");
    }
    result
}

async fn run_show(client: &ViewerClient, id: &str) -> Result<(), CliError> {
    let record = client.fetch_record(id).await?;
    println!("{}", export::plain_text(&record));
    Ok(())
}

async fn run_render(client: &ViewerClient, id: &str, out: Option<&Path>, collapsed: bool) -> Result<(), CliError> {
    let record = client.fetch_record(id).await?;
    let options = PageOptions { assets: Assets::Inline, exports: false, collapsed };
    let html = page::viewer_page(&record, options);
    match out {
        Some(path) => {
            std::fs::write(path, html)?;
            eprintln!("wrote {}", path.display());
        }
        None => io::stdout().lock().write_all(html.as_bytes())?,
    }
    Ok(())
}

async fn run_export(client: &ViewerClient, id: &str, kind: ExportKind, out_dir: &Path) -> Result<(), CliError> {
    let today = OffsetDateTime::now_utc().date();
    let name = artifact_name(kind, id, today);

    match kind {
        ExportKind::Document => match client.download_document(id).await {
            Ok(bytes) => {
                let path = write_artifact(out_dir, &name, &bytes)?;
                eprintln!("wrote {}", path.display());
                Ok(())
            }
            Err(e) => {
                eprintln!("{e}");
                eprintln!("the text export is still available: expview export {id} --format text");
                Err(e)
            }
        },
        ExportKind::Clipboard => {
            let record = client.fetch_record(id).await?;
            let text = export::plain_text(&record);
            match copy_or_print(&mut SystemClipboard::default(), &text, &mut io::stdout().lock())? {
                CopyOutcome::Copied => eprintln!("copied record {id} to clipboard"),
                CopyOutcome::Manual { reason } => {
                    eprintln!("{reason}; the text was printed above for a manual copy");
                }
            }
            Ok(())
        }
        ExportKind::Print | ExportKind::Text => {
            let record = client.fetch_record(id).await?;
            let body = if kind == ExportKind::Print {
                export::printable_html(&record, true)
            } else {
                export::prepare(kind, &record, today).body
            };
            let path = write_artifact(out_dir, &name, body.as_bytes())?;
            eprintln!("wrote {}", path.display());
            Ok(())
        }
    }
}

fn parse_format(raw: &str) -> Result<ExportKind, String> {
    ExportKind::parse(raw).ok_or_else(|| format!("unknown export format `{raw}`"))
}

/// Download name for an export; the print page is saved as HTML.
fn artifact_name(kind: ExportKind, id: &str, today: Date) -> String {
    export::download_filename(id, today, kind.extension().unwrap_or("html"))
}

fn write_artifact(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, CliError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
