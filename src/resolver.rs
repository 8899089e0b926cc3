//! Fetching symbolically referenced documents.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::Error;

/// Environment variable naming the resolver program.
pub const RESOLVER_ENV: &str = "SURFACE_RESOLVER";

/// Default time a [`CommandResolver`] waits for one document.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Turns a symbolic reference URL into a binary surface document.
///
/// Any error aborts the generation run. Closures of the right shape
/// implement this trait:
///
/// ```
/// use protosurface::{Error, ReferenceResolver};
///
/// let offline = |url: &str| -> Result<Vec<u8>, Error> {
///     Err(Error::ResolverFailed { url: url.into(), message: "offline".into() })
/// };
/// assert!(offline.resolve("https://example.com/common.yaml").is_err());
/// ```
pub trait ReferenceResolver {
    /// Fetch the surface document for `url` (fragment already removed).
    fn resolve(&self, url: &str) -> Result<Vec<u8>, Error>;
}

impl<F> ReferenceResolver for F
where
    F: Fn(&str) -> Result<Vec<u8>, Error>,
{
    fn resolve(&self, url: &str) -> Result<Vec<u8>, Error> {
        self(url)
    }
}

/// Resolves references by running an external program as
/// `<program> <args...> <url>` and reading the document from its stdout.
#[derive(Debug, Clone)]
pub struct CommandResolver {
    program: PathBuf,
    args: Vec<OsString>,
    timeout: Option<Duration>,
}

impl CommandResolver {
    /// Run `program` with the default timeout.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Locate the resolver program.
    ///
    /// Checks the `SURFACE_RESOLVER` environment variable first, then looks
    /// up `default_program` on `PATH`.
    pub fn find(default_program: &str) -> Result<Self, Error> {
        if let Ok(path) = std::env::var(RESOLVER_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(Self::new(path));
            }
        }

        which::which(default_program)
            .map(Self::new)
            .map_err(|_| Error::ResolverNotFound(default_program.to_string()))
    }

    /// Add an argument passed ahead of the URL.
    pub fn arg(&mut self, arg: impl Into<OsString>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Limit how long one invocation may run. `None` waits indefinitely.
    pub fn timeout(&mut self, timeout: Option<Duration>) -> &mut Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl ReferenceResolver for CommandResolver {
    fn resolve(&self, url: &str) -> Result<Vec<u8>, Error> {
        tracing::debug!(program = %self.program.display(), url, "running reference resolver");

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let output = wait_with_output_timeout(child, self.timeout, url)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ResolverFailed {
                url: url.to_string(),
                message: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        Ok(output.stdout)
    }
}

struct Output {
    status: std::process::ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

/// Wait for `child`, killing it once `timeout` has elapsed.
///
/// The pipes are drained on their own threads so a child writing more than
/// the pipe buffer cannot stall. The same deadline covers the drain, since a
/// process the child left behind may keep its pipes open after it exits.
fn wait_with_output_timeout(
    mut child: Child,
    timeout: Option<Duration>,
    url: &str,
) -> Result<Output, Error> {
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let start = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }

        if let Some(timeout) = timeout {
            if start.elapsed() > timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Err(timed_out(url, timeout));
            }
        }

        thread::sleep(POLL_INTERVAL);
    };

    Ok(Output {
        status,
        stdout: collect(&stdout, start, timeout, url)?,
        stderr: collect(&stderr, start, timeout, url)?,
    })
}

type Drain = mpsc::Receiver<std::io::Result<Vec<u8>>>;

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Drain {
    let (tx, rx) = mpsc::channel();
    match pipe {
        Some(mut pipe) => {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = tx.send(pipe.read_to_end(&mut buf).map(|_| buf));
            });
        }
        None => {
            let _ = tx.send(Ok(Vec::new()));
        }
    }
    rx
}

/// Receive what a drain thread read, waiting no longer than what is left of
/// `timeout` since `start`.
fn collect(
    drain: &Drain,
    start: Instant,
    timeout: Option<Duration>,
    url: &str,
) -> Result<Vec<u8>, Error> {
    let received = match timeout {
        Some(timeout) => match drain.recv_timeout(timeout.saturating_sub(start.elapsed())) {
            Ok(received) => received,
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(url, "resolver exited but its output is still open");
                return Err(timed_out(url, timeout));
            }
            Err(RecvTimeoutError::Disconnected) => return Err(reader_panicked()),
        },
        None => drain.recv().map_err(|_| reader_panicked())?,
    };
    Ok(received?)
}

fn timed_out(url: &str, timeout: Duration) -> Error {
    Error::ResolverTimeout {
        url: url.to_string(),
        timeout,
    }
}

fn reader_panicked() -> Error {
    Error::Io(std::io::Error::other("pipe reader panicked"))
}
