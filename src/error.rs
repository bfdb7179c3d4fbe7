use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AgetError>;

#[derive(Error, Debug)]
pub enum AgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] xmltree::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{source}: {path}")]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid playlist file: {message}")]
    InvalidPlaylist { message: String },

    #[error("Must be initialized with a track node, got <{tag}>")]
    InvalidTrack { tag: String },

    #[error("{source}: {path}")]
    DirectoryCreation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Track '{title}' has no download location")]
    MissingLocation { title: String },

    #[error("Download failed: {url}: {message}")]
    DownloadError { url: String, message: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,
}

impl AgetError {
    pub fn invalid_playlist<S: Into<String>>(message: S) -> Self {
        AgetError::InvalidPlaylist {
            message: message.into(),
        }
    }

    pub fn download_error<U: Into<String>, S: Into<String>>(url: U, message: S) -> Self {
        AgetError::DownloadError {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Process exit status for this error.
    ///
    /// Failures to open the playlist or create a directory exit with the OS
    /// error number; everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AgetError::FileAccess { source, .. } | AgetError::DirectoryCreation { source, .. } => {
                source.raw_os_error().unwrap_or(1)
            }
            _ => 1,
        }
    }
}

/// Exit status for an error that reached `main`.
pub fn exit_code_of(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<AgetError>()
        .map_or(1, AgetError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_os_errors_keep_errno() {
        let err = AgetError::DirectoryCreation {
            path: PathBuf::from("/root/forbidden"),
            source: Error::from_raw_os_error(13),
        };
        assert_eq!(err.exit_code(), 13);

        let err = AgetError::FileAccess {
            path: PathBuf::from("missing.amz"),
            source: Error::from_raw_os_error(2),
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_other_errors_exit_with_one() {
        assert_eq!(AgetError::invalid_playlist("bad root").exit_code(), 1);
        assert_eq!(AgetError::HomeDirectoryNotFound.exit_code(), 1);

        let err = AgetError::FileAccess {
            path: PathBuf::from("synthetic"),
            source: Error::new(ErrorKind::Other, "no errno"),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_survives_anyhow() {
        let err = anyhow::anyhow!(AgetError::DirectoryCreation {
            path: PathBuf::from("/music"),
            source: Error::from_raw_os_error(28),
        });
        assert_eq!(exit_code_of(&err), 28);
        assert_eq!(exit_code_of(&anyhow::anyhow!("plain message")), 1);
    }

    #[test]
    fn test_display_names_path() {
        let err = AgetError::DirectoryCreation {
            path: PathBuf::from("/music/Artist"),
            source: Error::new(ErrorKind::PermissionDenied, "Permission denied"),
        };
        assert_eq!(err.to_string(), "Permission denied: /music/Artist");
    }
}
