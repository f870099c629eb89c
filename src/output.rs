// ABOUTME: Output formatting for CLI feedback and GitHub Actions step outputs.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes plus workflow commands.

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::orchestrator::RunResult;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    in_actions: bool,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            in_actions: false,
            start_time: None,
        }
    }

    /// Emit workflow commands (`::warning::`, `::add-mask::`) for the Actions runner.
    pub fn with_workflow_commands(mut self, in_actions: bool) -> Self {
        self.in_actions = in_actions;
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Hide `secret` from the runner's log output.
    pub fn mask(&self, secret: &str) {
        if self.in_actions && !secret.is_empty() {
            println!("::add-mask::{secret}");
        }
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a non-fatal warning.
    pub fn warning(&self, message: &str) {
        if self.in_actions {
            println!("::warning::{}", escape_workflow_data(message));
            return;
        }
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Json => self.emit_event("warning", message, None),
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                // Print only the essential result
                println!("{message}");
            }
            OutputMode::Json => self.emit_event("success", message, self.duration()),
        }
    }

    /// Print the structured run result in JSON mode.
    pub fn result(&self, result: &RunResult) {
        if self.mode != OutputMode::Json {
            return;
        }
        let event = ResultEvent {
            event: "result",
            result,
            duration_secs: self.duration(),
        };
        if let Ok(json) = serde_json::to_string(&event) {
            println!("{json}");
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        if self.in_actions {
            println!("::error::{}", escape_workflow_data(message));
        }
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "error",
                    message,
                    duration_secs: self.duration(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    fn emit_event(&self, event: &str, message: &str, duration_secs: Option<f64>) {
        let event = JsonEvent {
            event,
            message,
            duration_secs,
        };
        if let Ok(json) = serde_json::to_string(&event) {
            println!("{json}");
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

#[derive(Serialize)]
struct ResultEvent<'a> {
    event: &'a str,
    result: &'a RunResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

/// Workflow command data must not contain raw `%`, CR or LF.
fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

const DELIMITER: &str = "VERCEL_DEPLOY_EOF";

/// Named step outputs, appended to the `GITHUB_OUTPUT` file when one is set.
#[derive(Debug, Clone, Default)]
pub struct ActionOutputs {
    path: Option<PathBuf>,
}

impl ActionOutputs {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write every output, or print them to stdout when there is no output file.
    pub fn write(&self, outputs: &[(&str, String)]) -> std::io::Result<()> {
        let rendered: String = outputs
            .iter()
            .map(|(name, value)| format_output(name, value))
            .collect();

        match self.path {
            Some(ref path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(rendered.as_bytes())
            }
            None => {
                print!("{rendered}");
                Ok(())
            }
        }
    }
}

/// One `name=value` entry; multi-line values use the heredoc form.
pub fn format_output(name: &str, value: &str) -> String {
    if !value.contains('\n') && !value.contains('\r') {
        return format!("{name}={value}\n");
    }

    let mut delimiter = DELIMITER.to_string();
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_output() {
        assert_eq!(format_output("PREVIEW_URL", "https://a"), "PREVIEW_URL=https://a\n");
    }

    #[test]
    fn multi_line_output_uses_delimiter() {
        assert_eq!(
            format_output("NOTES", "one\ntwo"),
            "NOTES<<VERCEL_DEPLOY_EOF\none\ntwo\nVERCEL_DEPLOY_EOF\n"
        );
    }

    #[test]
    fn delimiter_never_collides_with_value() {
        let value = "a\nVERCEL_DEPLOY_EOF\nb";
        let formatted = format_output("X", value);
        assert!(formatted.starts_with("X<<VERCEL_DEPLOY_EOF_\n"));
        assert!(formatted.ends_with("\nVERCEL_DEPLOY_EOF_\n"));
    }

    #[test]
    fn escapes_workflow_data() {
        assert_eq!(escape_workflow_data("50%\nnext"), "50%25%0Anext");
    }

    #[test]
    fn appends_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        std::fs::write(&path, "EXISTING=1\n").unwrap();

        let outputs = ActionOutputs::new(Some(path.clone()));
        outputs
            .write(&[("COMMENT_CREATED", "true".to_string())])
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "EXISTING=1\nCOMMENT_CREATED=true\n");
    }
}
