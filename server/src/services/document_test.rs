use super::*;

fn generator(command: &str, timeout_secs: u64) -> CommandGenerator {
    CommandGenerator::new(&DocumentConfig { command: command.into(), timeout_secs })
}

#[test]
fn command_gets_stdin_stdout_arguments() {
    let generator = generator("wkhtmltopdf -s A4", 60);
    assert_eq!(generator.program(), "wkhtmltopdf");
    assert_eq!(generator.args, ["-s", "A4", "--quiet", "-", "-"]);
}

#[tokio::test]
async fn missing_tool_is_reported() {
    let result = generator("definitely-not-an-installed-converter", 5).generate("<p>x</p>").await;
    assert_eq!(result, Err(DocumentError::ToolNotFound("definitely-not-an-installed-converter".into())));
}

#[tokio::test]
async fn blank_command_is_not_found() {
    assert!(matches!(generator("  ", 5).generate("x").await, Err(DocumentError::ToolNotFound(_))));
}

#[test]
fn error_codes() {
    assert_eq!(DocumentError::ToolNotFound("x".into()).error_code(), "E_DOCUMENT_TOOL_NOT_FOUND");
    assert_eq!(DocumentError::Failed("x".into()).error_code(), "E_DOCUMENT_FAILED");
    assert_eq!(DocumentError::TimedOut(1).error_code(), "E_DOCUMENT_TIMEOUT");
    assert!(DocumentError::TimedOut(1).retryable());
    assert!(!DocumentError::Failed("x".into()).retryable());
}

#[cfg(unix)]
mod unix {
    use super::*;

    /// `sh <script>` command line; the script ignores its arguments.
    fn script(dir: &tempfile::TempDir, body: &str) -> String {
        let path = dir.path().join("convert.sh");
        std::fs::write(&path, format!("{body}\n")).unwrap();
        format!("sh {}", path.display())
    }

    #[tokio::test]
    async fn converter_output_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let path = script(&dir, "cat");
        let out = generator(&path, 10).generate("<h1>Report</h1>").await.unwrap();
        assert_eq!(out, b"<h1>Report</h1>");
    }

    #[tokio::test]
    async fn failing_converter_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let path = script(&dir, "cat >/dev/null; echo 'bad page size' >&2; exit 3");
        let result = generator(&path, 10).generate("<p>x</p>").await;
        assert_eq!(result, Err(DocumentError::Failed("bad page size".into())));
    }

    #[tokio::test]
    async fn empty_output_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = script(&dir, "cat >/dev/null");
        let result = generator(&path, 10).generate("<p>x</p>").await;
        assert!(matches!(result, Err(DocumentError::Failed(_))));
    }

    #[tokio::test]
    async fn slow_converter_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = script(&dir, "sleep 5");
        let result = generator(&path, 1).generate("<p>x</p>").await;
        assert_eq!(result, Err(DocumentError::TimedOut(1)));
    }
}
