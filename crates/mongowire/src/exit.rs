use std::fmt;
use std::io;

use mongowire_cluster::ClusterError;
use mongowire_replset::ReplsetError;
use mongowire_transport::TransportError;

// Exit code constants shared across subcommands.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const HEALTH_CHECK_FAILED: i32 = 30;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    CliError::new(io_code(&err), format!("{context}: {err}"))
}

pub fn replset_error(context: &str, err: ReplsetError) -> CliError {
    let code = match &err {
        ReplsetError::Dial { source, .. }
        | ReplsetError::Send { source, .. }
        | ReplsetError::Receive { source, .. } => transport_code(source),
        ReplsetError::NoConnections => FAILURE,
        ReplsetError::ProtocolMismatch { .. } | ReplsetError::Protocol(_) => DATA_INVALID,
        ReplsetError::Close { .. } => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn cluster_error(context: &str, err: ClusterError) -> CliError {
    let code = match &err {
        ClusterError::Spawn { source, .. } | ClusterError::DataDir { source, .. } => {
            io_code(source)
        }
        ClusterError::CommandFailed { .. } => FAILURE,
        ClusterError::StatusParse { .. } => DATA_INVALID,
        ClusterError::NoMembers => USAGE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

fn transport_code(err: &TransportError) -> i32 {
    match err {
        TransportError::Connect { source, .. }
        | TransportError::Write(source)
        | TransportError::Read(source) => io_code(source),
        TransportError::Resolve { .. } => USAGE,
        TransportError::ConnectionClosed => TRANSPORT_ERROR,
        TransportError::Protocol(_) => DATA_INVALID,
    }
}

fn io_code(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::ConnectionRefused => FAILURE,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    }
}
