use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalkError {
    // Tool resolution
    #[error("`{program}` not found in search path")]
    ToolNotFound { program: String, search_path: String },

    // Invocation
    #[error("failed to run `{}`", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{}` failed on {}: {stderr}", .program.display(), .path.display())]
    CommandFailed {
        program: PathBuf,
        path: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    // Filesystem
    #[error("IO error at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Raised by a visitor
    #[error("visitor error")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl WalkError {
    /// Wrap any error returned from a visitor.
    pub fn callback(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Callback(err.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::CommandFailed { path, .. } | Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Whether the listing tool was found but running it went wrong.
    ///
    /// A missing directory, a permission error and any other non-zero exit
    /// all land here; the tool's exit status does not tell them apart.
    pub fn is_invocation_failure(&self) -> bool {
        matches!(self, Self::Spawn { .. } | Self::CommandFailed { .. })
    }

    /// Whether this is a stat or read failure for a path that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
