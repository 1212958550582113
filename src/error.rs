//! Error types for the driver
//!
//! ## Error Types
//!
//! - [`Error`] - Runtime errors during display operations
//! - [`TableError`] - Problems found when encoding or validating a command table
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use ili9163::table::CommandTable;
//! use ili9163::TableError;
//!
//! // Header says two records, only one is present
//! let table = CommandTable::new(&[2, 0x29, 0x00]);
//! assert!(matches!(table.validate(), Err(TableError::Truncated { record: 1 })));
//! ```

use crate::interface::DisplayInterface;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors found in a command table
///
/// Only raised by [`CommandTable::validate`](crate::table::CommandTable::validate)
/// and [`encode`](crate::table::encode). Replaying a table never checks it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableError {
    /// The encoding ends inside a record (or before the header)
    Truncated {
        /// Index of the record that runs past the end
        record: usize,
    },
    /// Bytes remain after the last declared record
    TrailingBytes {
        /// Number of unread bytes
        extra: usize,
    },
    /// More records than the one-byte header can count
    TooManyCommands {
        /// Number of records given
        count: usize,
    },
    /// A record has more arguments than the 7-bit count can hold
    TooManyArgs {
        /// Index of the offending record
        record: usize,
        /// Number of arguments given
        count: usize,
    },
    /// Output buffer is too small for the encoding
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl core::fmt::Display for TableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Truncated { record } => write!(f, "Command table truncated at record {record}"),
            Self::TrailingBytes { extra } => {
                write!(f, "Command table has {extra} trailing bytes")
            }
            Self::TooManyCommands { count } => {
                write!(f, "Too many commands: {count} (max 255)")
            }
            Self::TooManyArgs { record, count } => {
                write!(f, "Record {record} has {count} arguments (max 127)")
            }
            Self::BufferTooSmall { required, provided } => write!(
                f,
                "Buffer too small: required {required} bytes, provided {provided}"
            ),
        }
    }
}

impl core::error::Error for TableError {}
