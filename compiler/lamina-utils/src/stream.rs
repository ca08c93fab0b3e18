//! A stream interface for the compiler to write information to. The
//! [CompilerOutputStream] for the test runner is backed by an in-memory
//! buffer so that both `stdout` and `stderr` output can be captured and
//! compared against recorded expectations.

use std::sync::{Arc, Mutex};

/// Where the output of the compiler should be written to.
#[derive(Debug)]
pub enum CompilerOutputStream {
    /// Points to the `stdout` stream.
    Stdout(std::io::Stdout),

    /// Points to the `stderr` stream.
    Stderr(std::io::Stderr),

    /// Backed by a shared in-memory buffer.
    Owned(Arc<Mutex<Vec<u8>>>),
}

impl CompilerOutputStream {
    /// Create a new [CompilerOutputStream] which uses "stdout" as the output
    /// stream.
    pub fn stdout() -> Self {
        CompilerOutputStream::Stdout(std::io::stdout())
    }

    /// Create a new [CompilerOutputStream] which uses "stderr" as the output
    /// stream.
    pub fn stderr() -> Self {
        CompilerOutputStream::Stderr(std::io::stderr())
    }

    /// Create an owned [CompilerOutputStream].
    pub fn owned() -> Self {
        CompilerOutputStream::Owned(Arc::new(Mutex::new(Vec::new())))
    }

    /// Take everything written to an owned stream so far. Non-owned streams
    /// have nothing to collect.
    pub fn collect(&self) -> String {
        match self {
            CompilerOutputStream::Owned(buffer) => {
                let buffer = buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                String::from_utf8_lossy(&buffer).into_owned()
            }
            _ => String::new(),
        }
    }
}

impl Clone for CompilerOutputStream {
    fn clone(&self) -> Self {
        match self {
            CompilerOutputStream::Stdout(_) => CompilerOutputStream::Stdout(std::io::stdout()),
            CompilerOutputStream::Stderr(_) => CompilerOutputStream::Stderr(std::io::stderr()),
            CompilerOutputStream::Owned(stream) => CompilerOutputStream::Owned(stream.clone()),
        }
    }
}

impl std::io::Write for CompilerOutputStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            CompilerOutputStream::Stdout(stream) => stream.write(buf),
            CompilerOutputStream::Stderr(stream) => stream.write(buf),
            CompilerOutputStream::Owned(stream) => {
                let mut stream = stream.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                stream.extend_from_slice(buf);
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            CompilerOutputStream::Stdout(stream) => stream.flush(),
            CompilerOutputStream::Stderr(stream) => stream.flush(),
            CompilerOutputStream::Owned(_) => Ok(()),
        }
    }
}

/// Write a line into a [CompilerOutputStream], ignoring any IO failure
/// since there is nowhere left to report it.
#[macro_export]
macro_rules! stream_writeln {
    ($stream:expr, $($arg:tt)*) => {{
        use std::io::Write as _;
        let _ = writeln!($stream, $($arg)*);
    }};
}

/// Write a line directly to `stderr` without going through a stream. This is
/// only meant for debugging output which is never captured by tests.
#[macro_export]
macro_rules! stream_less_writeln {
    ($($arg:tt)*) => {{
        use std::io::Write as _;
        let _ = writeln!(std::io::stderr(), $($arg)*);
    }};
}
