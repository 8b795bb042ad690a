// ── Command execution ──
//
// `HostExecutor` is the one capability through which nginsight touches the
// machine. `LocalHost` is the production implementation (tokio subprocesses,
// `sudo -n` prefix when a command requests elevation); tests substitute a
// scripted fake.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::trace;

use crate::error::HostError;

// ── Command description ─────────────────────────────────────────────

/// What to do with a command's stderr stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StderrMode {
    /// Capture stderr into [`CommandOutput::stderr`].
    #[default]
    Capture,
    /// Discard stderr entirely.
    Discard,
}

/// One command invocation on the host.
///
/// `elevated` marks the command as requiring root; whether that turns into a
/// `sudo` prefix is the executor's decision. The flag exists so the privilege
/// boundary is visible at every call site.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub argv: Vec<String>,
    pub elevated: bool,
    pub stdin: Option<Vec<u8>>,
    pub stderr: StderrMode,
}

impl CommandSpec {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            elevated: false,
            stdin: None,
            stderr: StderrMode::Capture,
        }
    }

    /// Mark the command as requiring elevated privilege.
    pub fn elevated(mut self) -> Self {
        self.elevated = true;
        self
    }

    /// Feed the given bytes to the command's stdin.
    pub fn stdin(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(bytes.into());
        self
    }

    pub fn discard_stderr(mut self) -> Self {
        self.stderr = StderrMode::Discard;
        self
    }

    /// Human-readable form for error messages and logs.
    pub fn display(&self) -> String {
        self.argv.join(" ")
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

// ── Executor trait ──────────────────────────────────────────────────

/// The privileged command-execution capability.
///
/// `execute` runs a command to completion and captures its output; a
/// non-zero exit status is returned as data, not as an error, since some
/// callers (existence probes, validation) branch on it.
pub trait HostExecutor: Send + Sync {
    fn execute(
        &self,
        spec: CommandSpec,
    ) -> impl Future<Output = Result<CommandOutput, HostError>> + Send;
}

/// Run a command, mapping a non-zero exit to [`HostError::CommandFailed`]
/// with the trimmed stderr attached.
pub async fn run_checked<E: HostExecutor + ?Sized>(
    host: &E,
    spec: CommandSpec,
) -> Result<CommandOutput, HostError> {
    let command = spec.display();
    let out = host.execute(spec).await?;
    if out.success() {
        Ok(out)
    } else {
        Err(HostError::CommandFailed {
            command,
            status: out.status,
            stderr: out.stderr.trim().to_owned(),
        })
    }
}

// ── Production implementation ───────────────────────────────────────

/// Executes commands as local subprocesses.
///
/// When `elevate` is true, commands marked `elevated` are prefixed with
/// `sudo -n` (non-interactive: a missing sudo grant fails fast instead of
/// hanging on a password prompt). When false the flag is ignored, which is
/// what tests and already-root environments want.
#[derive(Debug, Clone)]
pub struct LocalHost {
    elevate: bool,
}

impl LocalHost {
    pub fn new(elevate: bool) -> Self {
        Self { elevate }
    }
}

impl HostExecutor for LocalHost {
    async fn execute(&self, spec: CommandSpec) -> Result<CommandOutput, HostError> {
        let mut argv = spec.argv;
        if spec.elevated && self.elevate {
            let mut wrapped = vec!["sudo".to_owned(), "-n".to_owned()];
            wrapped.append(&mut argv);
            argv = wrapped;
        }

        let Some((program, args)) = argv.split_first() else {
            return Err(HostError::Spawn {
                program: String::new(),
                source: std::io::Error::other("empty argv"),
            });
        };

        trace!(command = %argv.join(" "), "executing host command");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(if spec.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(match spec.stderr {
                StderrMode::Capture => Stdio::piped(),
                StderrMode::Discard => Stdio::null(),
            })
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| HostError::Spawn {
            program: program.clone(),
            source,
        })?;

        if let Some(bytes) = spec.stdin {
            if let Some(mut handle) = child.stdin.take() {
                handle
                    .write_all(&bytes)
                    .await
                    .map_err(|source| HostError::Stdin {
                        program: program.clone(),
                        source,
                    })?;
                // handle drops here, closing the pipe so the child sees EOF
            }
        }

        let out = child
            .wait_with_output()
            .await
            .map_err(|source| HostError::Spawn {
                program: program.clone(),
                source,
            })?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            status: out.status.code().unwrap_or(-1),
        })
    }
}
