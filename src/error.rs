//! Recoverable failures raised while browsing for and loading files.
//!
//! None of these are fatal: the browser turns them into error banner lines
//! and keeps the user where they were.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A file was read but cannot be shown as text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("File \"{name}\" appears empty")]
    Empty { name: String },

    #[error("File \"{name}\" not printable")]
    NotPrintable { name: String },
}

/// Failure while navigating the directory tree or opening a file.
#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("Cannot open directory {path:?}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read file {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Content(#[from] ContentError),
}

impl BrowseError {
    /// The message split into the lines shown in a menu error banner.
    pub fn banner_lines(&self) -> Vec<String> {
        match self {
            Self::ListDir { path, source } => vec![
                format!("Cannot open directory {}", path.display()),
                source.to_string(),
            ],
            Self::ReadFile { path, source } => vec![
                format!("Cannot read file {}", path.display()),
                source.to_string(),
            ],
            Self::Content(err) => vec![err.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_messages() {
        let empty = ContentError::Empty { name: "a.txt".into() };
        assert_eq!(empty.to_string(), "File \"a.txt\" appears empty");
        let binary = ContentError::NotPrintable { name: "b.bin".into() };
        assert_eq!(binary.to_string(), "File \"b.bin\" not printable");
    }

    #[test]
    fn test_list_dir_banner_is_two_lines() {
        let err = BrowseError::ListDir {
            path: PathBuf::from("/srv/secret"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
        };
        let lines = err.banner_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Cannot open directory /srv/secret");
        assert_eq!(lines[1], "Permission denied");
    }

    #[test]
    fn test_content_banner_is_single_line() {
        let err = BrowseError::from(ContentError::Empty { name: "x".into() });
        assert_eq!(err.banner_lines(), vec!["File \"x\" appears empty".to_string()]);
    }
}
