//! Running an executable and capturing its output.

use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

/// How often a timed run polls the child for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// An executable invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellCommand {
    /// Executable name, resolved against PATH.
    pub command: String,

    /// Arguments passed verbatim.
    pub args: Vec<String>,

    /// Working directory for the child.
    pub working_dir: PathBuf,

    /// Environment variables (merged with the inherited environment).
    pub env: HashMap<String, String>,
}

impl ShellCommand {
    /// Create an invocation of `command` with no arguments.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the working directory.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Command line for messages and logs.
    pub fn display(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Why running a command failed.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started (not found, not executable, bad cwd).
    #[error("could not start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully.
    #[error("{command} exited with code {code:?}")]
    Failed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    /// The process did not finish in time and was killed.
    #[error("{command} timed out after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },

    /// Waiting on the process failed.
    #[error("failed waiting for {command}: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs commands and returns their combined output.
///
/// This is the seam the version checks use to reach the outside world;
/// tests substitute a scripted runner.
pub trait CommandRunner {
    /// Run `command` to completion and return stdout followed by stderr.
    fn run(&self, command: &ShellCommand) -> Result<String, CommandError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &ShellCommand) -> Result<String, CommandError> {
        (**self).run(command)
    }
}

/// Runs commands as real child processes.
///
/// With a timeout set, the deadline covers both the child's exit and the
/// collection of its output. On Unix the child leads its own process group,
/// and a timeout kills the whole group.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    /// Create a runner without a timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill children that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ShellCommand) -> Result<String, CommandError> {
        let start = Instant::now();
        let command_line = command.display();

        let mut cmd = Command::new(&command.command);
        cmd.args(&command.args);

        if !command.working_dir.as_os_str().is_empty() {
            cmd.current_dir(&command.working_dir);
        }

        for (key, value) in &command.env {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let mut child = cmd.spawn().map_err(|source| CommandError::Spawn {
            command: command_line.clone(),
            source,
        })?;

        // Drain both pipes on their own threads so a chatty child can't block on a full pipe
        let (tx, rx) = mpsc::channel();
        let mut pending = 0;
        if let Some(stdout) = child.stdout.take() {
            spawn_reader(STDOUT, stdout, tx.clone());
            pending += 1;
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_reader(STDERR, stderr, tx.clone());
            pending += 1;
        }
        drop(tx);

        let status = match self.timeout {
            None => child.wait(),
            Some(timeout) => loop {
                match child.try_wait() {
                    Ok(Some(status)) => break Ok(status),
                    Ok(None) if start.elapsed() >= timeout => {
                        return Err(time_out(&mut child, command_line, timeout));
                    }
                    Ok(None) => thread::sleep(POLL_INTERVAL),
                    Err(e) => break Err(e),
                }
            },
        }
        .map_err(|source| CommandError::Wait {
            command: command_line.clone(),
            source,
        })?;

        // Anything the child left running in the background may still hold the pipes open
        let mut streams = [String::new(), String::new()];
        for _ in 0..pending {
            let received = match self.timeout {
                None => rx.recv().ok(),
                Some(timeout) => match rx.recv_timeout(timeout.saturating_sub(start.elapsed())) {
                    Ok(received) => Some(received),
                    Err(RecvTimeoutError::Timeout) => {
                        return Err(time_out(&mut child, command_line, timeout));
                    }
                    Err(RecvTimeoutError::Disconnected) => None,
                },
            };
            let Some((stream, text)) = received else {
                break;
            };
            streams[stream] = text;
        }
        let [mut output, stderr] = streams;
        output.push_str(&stderr);

        tracing::debug!(
            "{} finished with {:?} in {:?}",
            command_line,
            status.code(),
            start.elapsed()
        );

        if status.success() {
            Ok(output)
        } else {
            Err(CommandError::Failed {
                command: command_line,
                code: status.code(),
                output,
            })
        }
    }
}

const STDOUT: usize = 0;
const STDERR: usize = 1;

fn spawn_reader<R: Read + Send + 'static>(
    stream: usize,
    mut pipe: R,
    tx: mpsc::Sender<(usize, String)>,
) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send((stream, String::from_utf8_lossy(&buf).into_owned()));
    });
}

/// Kill the child along with everything it started, and build the timeout error.
fn time_out(child: &mut Child, command_line: String, timeout: Duration) -> CommandError {
    #[cfg(unix)]
    {
        // SAFETY: kill() only sends a signal; a negative pid addresses the child's process group
        unsafe {
            libc::kill(-(child.id() as libc::pid_t), libc::SIGKILL);
        }
    }
    let _ = child.kill();
    let _ = child.wait();

    tracing::warn!("{} killed after {:?}", command_line, timeout);
    CommandError::TimedOut {
        command: command_line,
        timeout,
    }
}
