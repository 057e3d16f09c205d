use std::ffi::OsStr;
use std::path::Path;
use std::process::{Output, Stdio};

use tokio::process::Command;
use tracing::debug;

/// Number of stderr lines kept when a tool fails
const STDERR_TAIL_LINES: usize = 20;

/// Run an external tool to completion and collect its output.
///
/// The child is killed if the returned future is dropped before it finishes,
/// so an aborted run never leaves an encoder behind.
pub async fn run_tool<I, S>(program: &Path, args: I) -> std::io::Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!("Running {:?}", cmd.as_std());
    cmd.output().await
}

/// Check whether a tool can be spawned (`<tool> -version` exits successfully)
pub async fn tool_available<P: AsRef<Path>>(program: P) -> bool {
    run_tool(program.as_ref(), ["-version"])
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Last lines of a tool's stderr, for error messages
pub fn stderr_tail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
