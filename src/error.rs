use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by this crate.
///
/// Construction and scope entry fail eagerly; per-line failures surface from
/// the lazy iterators at the element that triggered them, tagged with the
/// 1-based line number where one exists.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The path given at construction does not name an existing regular file.
    #[error("no such file: {}", .path.display())]
    NotFound {
        /// The offending path, as given.
        path: PathBuf,
    },

    /// Opening the file at scope entry failed.
    #[error("failed to open file")]
    Io(#[from] io::Error),

    /// Reading or decoding a line failed. No further lines are produced
    /// after this surfaces.
    #[error("read failed at line {line}")]
    Read {
        /// 1-based number of the line being produced when the failure hit.
        line: u64,
        source: io::Error,
    },

    /// An operation that requires an open scope was invoked outside one.
    #[error("handle is not open; call open() first or use scoped()")]
    NotOpen,

    /// `open` was called on a handle that is already open.
    #[error("handle is already open")]
    AlreadyOpen,

    /// The handle was marked open but its reader was gone at release time.
    /// Indicates the handle's internal state was corrupted, not an I/O fault.
    #[error("line reader missing while handle marked open")]
    MissingReader,

    /// A caller-supplied fallible function rejected a line.
    #[error("function failed at line {line}")]
    Function {
        /// 1-based number of the line the function was applied to.
        line: u64,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// True for errors caused by calling an operation in the wrong state,
    /// as opposed to I/O faults or caller-function failures.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::NotOpen | Error::AlreadyOpen)
    }

    /// The 1-based line number a per-element error is tagged with.
    ///
    /// `None` for errors that are not tied to a specific line.
    pub fn line(&self) -> Option<u64> {
        match self {
            Error::Read { line, .. } | Error::Function { line, .. } => Some(*line),
            _ => None,
        }
    }
}
