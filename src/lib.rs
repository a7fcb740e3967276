//! BASIC File Statement Runtime
//!
//! An emulation of the classic BASIC file statements (OPEN, CLOSE, PRINT#,
//! INPUT#, EOF, LOF, KILL, NAME, MKDIR/RMDIR/CHDIR) in which programs address
//! I/O endpoints through small integer handles. A handle may be backed by a
//! disk file or by a serial port and callers never need to know which.

pub mod backend;
pub mod disk;
pub mod format;
pub mod resolver;
pub mod runtime;
pub mod serial;
pub mod table;

// Re-export core types for convenience
pub use crate::error::{FileIoError, Result};
pub use backend::Backend;
pub use resolver::OpenMode;
pub use runtime::FileRuntime;
pub use table::HandleTable;

/// Core error handling types for the file statement runtime
pub mod error {
    use std::fmt;

    /// Result type for file statement operations
    pub type Result<T> = std::result::Result<T, FileIoError>;

    /// Error conditions raised by file statement operations
    ///
    /// These never cross the BASIC-level verb boundary: the verb layer
    /// reports them on the diagnostic channel and returns a degraded
    /// default instead. End of file is not an error; it is a latched flag
    /// on the handle.
    #[derive(Debug, Clone, PartialEq)]
    pub enum FileIoError {
        /// Second OPEN on a handle number that is still open
        AlreadyOpen(i32),
        /// Operation on a handle number with nothing open
        NotOpen(i32),
        /// Unknown or unsupported open mode
        BadMode(String),
        /// COM device name whose port number does not parse
        BadPortNumber(String),
        /// Fixed-length input with a length below one
        BadLength(i32),
        /// Open/read/write/close failure from the OS or serial layer
        Transport(String),
        /// Fewer bytes delivered than requested
        ShortRead { wanted: usize, got: usize },
    }

    impl fmt::Display for FileIoError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                FileIoError::AlreadyOpen(number) => write!(f, "file #{} already open", number),
                FileIoError::NotOpen(number) => write!(f, "file #{} not open", number),
                FileIoError::BadMode(mode) => write!(f, "bad mode: {}", mode),
                FileIoError::BadPortNumber(port) => write!(f, "bad port number: {}", port),
                FileIoError::BadLength(length) => write!(f, "bad length: {}", length),
                FileIoError::Transport(message) => write!(f, "{}", message),
                FileIoError::ShortRead { wanted, got } => {
                    write!(f, "short read: found={} < request={}", got, wanted)
                }
            }
        }
    }

    impl std::error::Error for FileIoError {}
}
