//! Error types for the freezermon 1-Wire library.

use std::path::PathBuf;
use thiserror::Error;

use crate::reading::ReadingError;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when discovering or reading sensors.
#[derive(Error, Debug)]
pub enum Error {
    /// The bus device directory could not be listed.
    #[error("error reading device directory {}: {source}", .path.display())]
    DeviceDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The device data file does not exist.
    #[error("device file {} does not exist", .0.display())]
    NotFound(PathBuf),

    /// The device data file exists but could not be read.
    #[error("error reading device file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The device data file does not have the expected layout.
    #[error("unexpected format in device file {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: ReadingError,
    },

    /// The temperature field could not be parsed as a number.
    #[error("error parsing temperature in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ReadingError,
    },

    /// No sensor was discovered on the bus.
    #[error("no devices found")]
    NoDevices,
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DeviceDir,
    NotFound,
    Io,
    Format,
    Parse,
    NoDevices,
}

impl Error {
    /// Attaches the file path to a parser failure, splitting layout problems
    /// from numeric ones.
    pub(crate) fn from_reading(path: PathBuf, source: ReadingError) -> Self {
        match source {
            ReadingError::InvalidTemperature { .. } => Error::Parse { path, source },
            _ => Error::Format { path, source },
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DeviceDir { .. } => ErrorKind::DeviceDir,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Io { .. } => ErrorKind::Io,
            Error::Format { .. } => ErrorKind::Format,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::NoDevices => ErrorKind::NoDevices,
        }
    }
}
