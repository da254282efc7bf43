//! Unified error type for cinemabin.
//!
//! Most "bad input" in this domain is not an error at all: a filename with no
//! year degrades to a fallback record and a junk Files value is coerced to 1.
//! [`Error`] only covers conditions that must stop a run.

use std::path::{Path, PathBuf};

/// Unified error type covering all fatal failure modes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A Location folder is still named `untitled folder`. Grouping cannot
    /// proceed until it is renamed or removed.
    #[error("Untitled folder in movie library: {}", path.display())]
    UntitledFolder {
        /// Full path of the offending folder.
        path: PathBuf,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The record table could not be read or written.
    #[error("Table error: {0}")]
    Table(String),

    /// Configuration failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Convenience constructor for [`Error::UntitledFolder`].
    pub fn untitled_folder(path: impl AsRef<Path>) -> Self {
        Error::UntitledFolder {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Convenience constructor for [`Error::Table`].
    pub fn table(message: impl Into<String>) -> Self {
        Error::Table(message.into())
    }

    /// Whether the error means the library itself needs manual attention
    /// rather than the tool or its inputs.
    pub fn is_library_fault(&self) -> bool {
        matches!(self, Error::UntitledFolder { .. })
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untitled_folder_display() {
        let err = Error::untitled_folder("/movies/untitled folder");
        assert_eq!(
            err.to_string(),
            "Untitled folder in movie library: /movies/untitled folder"
        );
        assert!(err.is_library_fault());
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
        assert!(!err.is_library_fault());
    }

    #[test]
    fn table_display() {
        let err = Error::table("missing header row");
        assert_eq!(err.to_string(), "Table error: missing header row");
    }

    #[test]
    fn validation_display() {
        let err = Error::Validation("grouping_depth must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "Validation error: grouping_depth must be at least 1"
        );
    }

    #[test]
    fn result_alias() {
        fn ok_fn() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(ok_fn().unwrap(), 42);

        fn err_fn() -> Result<i32> {
            Err(Error::table("boom"))
        }
        assert!(err_fn().is_err());
    }
}
