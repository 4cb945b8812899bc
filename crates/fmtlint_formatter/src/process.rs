//! Formatter running as a child process.
//!
//! One process is started per request. The [`FormatRequest`] is written to its
//! stdin as JSON and a [`FormatResult`] is read back from its stdout.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, trace};

use crate::{AsyncFormatter, FormatRequest, FormatResult, FormatterError};

/// An [`AsyncFormatter`] that delegates to an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessFormatter {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl ProcessFormatter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl AsyncFormatter for ProcessFormatter {
    async fn format(&self, request: FormatRequest) -> Result<FormatResult, FormatterError> {
        let payload = serde_json::to_vec(&request)?;
        trace!("Formatting '{}' with '{}'", request.filename, self.program);

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|source| FormatterError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| FormatterError::protocol("formatter stdin is not available"))?;

        // Feed stdin while collecting output so a chatty formatter cannot
        // fill its stdout pipe and stall.
        let write = async move {
            stdin.write_all(&payload).await?;
            stdin.shutdown().await
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());
        let output = output?;

        if !output.status.success() {
            return Err(FormatterError::Process {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if let Err(err) = written {
            debug!("Formatter '{}' did not read all input: {}", self.program, err);
        }

        serde_json::from_slice(&output.stdout).map_err(|err| {
            FormatterError::protocol(format!("expected a JSON format result: {err}"))
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::{BridgeOptions, Formatter, SyncBridge};
    use pretty_assertions::assert_eq;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    fn script(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn run(formatter: ProcessFormatter) -> Result<FormatResult, FormatterError> {
        let bridge = SyncBridge::new(formatter, BridgeOptions::default()).unwrap();
        bridge.format(FormatRequest::new("a.js", "f()", Default::default()))
    }

    #[test]
    fn reads_result_from_stdout() {
        let dir = TempDir::new().unwrap();
        let program = script(
            dir.path(),
            "ok.sh",
            r#"cat > /dev/null; printf '{"code":"f();\\n"}'"#,
        );

        let result = run(ProcessFormatter::new(program)).unwrap();

        assert_eq!(result, FormatResult::code("f();\n"));
    }

    #[test]
    fn sends_request_on_stdin() {
        let dir = TempDir::new().unwrap();
        let program = script(
            dir.path(),
            "echo.sh",
            r#"input=$(cat); case "$input" in *'"sourceText":"f()"'*) printf '{"code":"seen"}' ;; *) printf '{"code":"missing"}' ;; esac"#,
        );

        let result = run(ProcessFormatter::new(program)).unwrap();

        assert_eq!(result.code, "seen");
    }

    #[test]
    fn passes_arguments() {
        let dir = TempDir::new().unwrap();
        let program = script(
            dir.path(),
            "args.sh",
            r#"cat > /dev/null; printf '{"code":"%s"}' "$1""#,
        );

        let result = run(ProcessFormatter::new(program).with_args(["--stdin"])).unwrap();

        assert_eq!(result.code, "--stdin");
    }

    #[test]
    fn non_zero_exit_is_a_process_error() {
        let dir = TempDir::new().unwrap();
        let program = script(dir.path(), "fail.sh", "cat > /dev/null; echo broken >&2; exit 3");

        let err = run(ProcessFormatter::new(program)).unwrap_err();

        match err {
            FormatterError::Process { stderr, .. } => assert_eq!(stderr, "broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn garbage_output_is_a_protocol_error() {
        let dir = TempDir::new().unwrap();
        let program = script(dir.path(), "garbage.sh", "cat > /dev/null; echo hello");

        let err = run(ProcessFormatter::new(program)).unwrap_err();

        assert!(matches!(err, FormatterError::Protocol(_)));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = run(ProcessFormatter::new("/nonexistent/fmtlint-formatter")).unwrap_err();

        assert!(matches!(err, FormatterError::Spawn { .. }));
    }
}
