//! Global error handling for codepdf
//!
//! Scan and read failures are recovered where they happen and only
//! annotated in the document; sink failures abort the build.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for codepdf operations
#[derive(Error, Debug)]
pub enum CodePdfError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A directory subtree could not be listed
    #[error("Cannot scan {}: {message}", .path.display())]
    Scan { path: PathBuf, message: String },

    /// A file could not be read under any supported encoding
    #[error("Unable to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output document could not be created, written or finalized
    #[error("Output error: {0}")]
    Sink(String),

    /// PDF serialization errors
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl CodePdfError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CodePdfError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn scan(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        CodePdfError::Scan {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error must abort the whole build.
    ///
    /// Scan and read errors only affect one subtree or one file.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CodePdfError::Scan { .. } | CodePdfError::Read { .. })
    }
}

/// Specialized Result type for codepdf operations
pub type Result<T> = std::result::Result<T, CodePdfError>;

/// Creates a CodePdfError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::CodePdfError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for turning foreign errors into output errors
pub trait ResultExt<T, E> {
    /// Wrap the error as a fatal sink error with additional context
    fn sink_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn sink_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            CodePdfError::Sink(format!("{}: {}", context, e))
        })
    }
}

impl From<CodePdfError> for io::Error {
    fn from(err: CodePdfError) -> Self {
        match err {
            CodePdfError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
