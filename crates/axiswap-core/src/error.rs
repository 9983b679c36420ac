use std::io;
use std::path::PathBuf;

/// Convenience result type used across the core crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Open,
    Read,
    Write,
    Format,
    UnsupportedColorspace,
    Range,
    Dimension,
    EmptyInput,
    WorkerPool,
    Preview,
}

/// Every failure the transform pipeline can surface.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Input or output path could not be opened.
    #[error("open error: {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Underlying stream failed while reading (clean end-of-stream is not an error).
    #[error("read error: {0}")]
    Read(#[source] io::Error),

    /// Underlying stream failed while writing.
    #[error("write error: {0}")]
    Write(#[source] io::Error),

    /// Malformed container data or a planar buffer of the wrong size.
    #[error("format error: {0}")]
    Format(String),

    /// The `C` header tag names anything other than `C420mpeg2`.
    #[error("unsupported colorspace error: {0} (only C420mpeg2 is supported)")]
    UnsupportedColorspace(String),

    /// Pixel coordinate or frame index outside its container.
    #[error("range error: {0}")]
    Range(String),

    /// Frame dimensions do not match the clip it is appended to.
    #[error("dimension error: expected {expected_width}x{expected_height}, got {width}x{height}")]
    Dimension {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    /// The input clip decoded to zero frames.
    #[error("empty-input error: clip has no frames")]
    EmptyInput,

    /// The worker pool could not be built.
    #[error("worker pool error: {0}")]
    WorkerPool(String),

    /// A preview image could not be written.
    #[error("preview error: {0}")]
    Preview(String),
}

impl Error {
    /// Build an [`Error::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build an [`Error::Range`] value.
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Open { .. } => ErrorKind::Open,
            Error::Read(_) => ErrorKind::Read,
            Error::Write(_) => ErrorKind::Write,
            Error::Format(_) => ErrorKind::Format,
            Error::UnsupportedColorspace(_) => ErrorKind::UnsupportedColorspace,
            Error::Range(_) => ErrorKind::Range,
            Error::Dimension { .. } => ErrorKind::Dimension,
            Error::EmptyInput => ErrorKind::EmptyInput,
            Error::WorkerPool(_) => ErrorKind::WorkerPool,
            Error::Preview(_) => ErrorKind::Preview,
        }
    }
}
