use mongowire_transport::TransportError;

/// Errors that can occur in replica set operations.
#[derive(Debug, thiserror::Error)]
pub enum ReplsetError {
    /// A member was unreachable during connect. The whole call is rolled
    /// back; no partial connection state is retained.
    #[error("failed to connect to {node}: {source}")]
    Dial {
        node: String,
        source: TransportError,
    },

    /// An operation was attempted with an empty connection set.
    #[error("no connections available")]
    NoConnections,

    /// Writing a request to a member failed.
    #[error("request to {node} failed: {source}")]
    Send {
        node: String,
        source: TransportError,
    },

    /// Reading a member's response failed.
    #[error("response from {node} failed: {source}")]
    Receive {
        node: String,
        source: TransportError,
    },

    /// A response answered a different request than the one in flight.
    #[error("response from {node} answers request {got}, expected {expected}")]
    ProtocolMismatch {
        node: String,
        expected: i32,
        got: i32,
    },

    /// Closing a member connection failed during teardown. Cleanup still
    /// proceeds; only the last such error is reported.
    #[error("failed to close connection to {node}: {source}")]
    Close {
        node: String,
        source: std::io::Error,
    },

    /// A payload could not be built.
    #[error("protocol error: {0}")]
    Protocol(#[from] mongowire_protocol::ProtocolError),
}

pub type Result<T> = std::result::Result<T, ReplsetError>;
