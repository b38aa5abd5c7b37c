use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors that can occur while supervising a local replica set.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    /// No member ports are configured.
    #[error("no member ports configured")]
    NoMembers,

    /// A member data directory could not be prepared.
    #[error("failed to prepare dbpath {path}: {source}")]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An external command could not be spawned.
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// An external command ran but reported failure.
    #[error("{command} exited with {status}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
    },

    /// `rs.status()` output was not valid JSON.
    #[error("failed to parse replica set status: {source}; output: {output}")]
    StatusParse {
        source: serde_json::Error,
        output: String,
    },
}

pub type Result<T> = std::result::Result<T, ClusterError>;
