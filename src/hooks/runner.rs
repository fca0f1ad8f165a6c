//! Subprocess execution of addon scripts.
//!
//! Scripts are discovered per addon directory, sorted by file name, and run one
//! at a time. `.py` scripts run through `python3`, `.sh` scripts through `bash`,
//! anything else is executed directly.

use super::{AddonHook, HookOutput, HookPhase};
use crate::config::Config;
use crate::context::WorkspaceContext;
use crate::error::{Result, SilveraError};
use std::ffi::OsStr;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

/// Interpreter for `.py` scripts.
pub const PYTHON_INTERPRETER: &str = "python3";

/// Interpreter for `.sh` scripts.
pub const SHELL_INTERPRETER: &str = "bash";

/// Maximum number of stderr lines quoted in a hook error.
const ERROR_EXCERPT_MAX_LINES: usize = 20;

/// Maximum number of stderr characters quoted in a hook error.
const ERROR_EXCERPT_MAX_CHARS: usize = 2048;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Runs addon scripts as child processes.
#[derive(Debug, Clone)]
pub struct ScriptHooks {
    ctx: WorkspaceContext,
}

impl ScriptHooks {
    /// Hooks for a workspace: addons live under `addons/`, scripts run from the root.
    pub fn new(ctx: &WorkspaceContext) -> Self {
        Self { ctx: ctx.clone() }
    }

    /// List the scripts of one addon that belong to `phase`, sorted by file name.
    pub fn discover_scripts(&self, addon: &str, phase: HookPhase) -> Result<Vec<PathBuf>> {
        let addon_path = self.ctx.addon_path(addon);

        let entries = fs::read_dir(&addon_path).map_err(|e| SilveraError::HookExecution {
            addon: addon.to_string(),
            message: format!(
                "cannot list addon directory '{}': {}",
                addon_path.display(),
                e
            ),
        })?;

        let mut scripts = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SilveraError::HookExecution {
                addon: addon.to_string(),
                message: format!("cannot read addon directory entry: {}", e),
            })?;

            let is_file = entry.file_type().map(|t| !t.is_dir()).unwrap_or(false);
            let matches = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(phase.prefix()));

            if is_file && matches {
                scripts.push(entry.path());
            }
        }

        scripts.sort();
        Ok(scripts)
    }

    fn run_script(
        &self,
        addon: &str,
        script: &Path,
        args: &[&OsStr],
        timeout: Option<Duration>,
    ) -> Result<HookOutput> {
        let fail = |message: String| SilveraError::HookExecution {
            addon: addon.to_string(),
            message,
        };

        let mut command = script_command(script, args);
        command
            .current_dir(&self.ctx.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(addon, script = %script.display(), "running hook script");

        let start = Instant::now();
        let mut child = command.spawn().map_err(|e| {
            fail(format!(
                "failed to execute '{}': {}\nFix: ensure the script is executable or its interpreter is installed.",
                script.display(),
                e
            ))
        })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = wait_with_timeout(&mut child, timeout)
            .map_err(|e| fail(format!("failed to wait for '{}': {}", script.display(), e)))?;

        // A killed script's own children may still hold the pipes open, so the
        // reader threads are left detached rather than joined.
        let Some(status) = status else {
            return Err(fail(format!(
                "'{}' timed out after {}s and was killed",
                script.display(),
                timeout.map(|t| t.as_secs()).unwrap_or_default()
            )));
        };

        let stdout = join_output(stdout);
        let stderr = join_output(stderr);
        let duration = start.elapsed();

        if !status.success() {
            let mut message = format!(
                "'{}' exited with {}",
                script.display(),
                describe_status(status)
            );
            let excerpt = truncate_output(&stderr, ERROR_EXCERPT_MAX_LINES, ERROR_EXCERPT_MAX_CHARS);
            if !excerpt.is_empty() {
                message.push_str("\nstderr:\n");
                message.push_str(&excerpt);
            }
            return Err(fail(message));
        }

        Ok(HookOutput {
            addon: addon.to_string(),
            script: script.to_path_buf(),
            stdout,
            duration,
        })
    }
}

impl AddonHook for ScriptHooks {
    fn run_phase(
        &self,
        config: &Config,
        phase: HookPhase,
        args: &[&OsStr],
    ) -> Result<Vec<HookOutput>> {
        let timeout = match config.hook_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let mut outputs = Vec::new();
        for addon in &config.addons {
            for script in self.discover_scripts(addon, phase)? {
                outputs.push(self.run_script(addon, &script, args, timeout)?);
            }
        }

        Ok(outputs)
    }
}

/// Build the command for a script, choosing the interpreter by extension.
pub(crate) fn script_command(script: &Path, args: &[&OsStr]) -> Command {
    let interpreter = match script.extension().and_then(|e| e.to_str()) {
        Some("py") => Some(PYTHON_INTERPRETER),
        Some("sh") => Some(SHELL_INTERPRETER),
        _ => None,
    };

    let mut command = match interpreter {
        Some(program) => {
            let mut command = Command::new(program);
            command.arg(script);
            command
        }
        None => Command::new(script),
    };
    command.args(args);
    command
}

/// Read a child pipe to the end on a background thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join_output(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Wait for a child process, killing it once `timeout` elapses.
///
/// Returns `None` if the process was killed.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Option<Duration>,
) -> std::io::Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
        return child.wait().map(Some);
    };

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= timeout {
            // SIGKILL on Unix, TerminateProcess on Windows.
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Keep the last `max_lines` lines, then the last `max_chars` characters.
fn truncate_output(output: &str, max_lines: usize, max_chars: usize) -> String {
    let lines: Vec<&str> = output.trim_end().lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    let result = lines[start..].join("\n");

    let char_count = result.chars().count();
    if char_count <= max_chars {
        return result;
    }

    let tail: String = result.chars().skip(char_count - max_chars).collect();
    format!("...(truncated)...\n{}", tail)
}
