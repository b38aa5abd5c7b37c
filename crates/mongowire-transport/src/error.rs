/// Errors that can occur in transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to connect to the specified address.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        source: std::io::Error,
    },

    /// The address resolved to no usable socket addresses.
    #[error("address {addr} resolved to nothing")]
    Resolve { addr: String },

    /// An I/O error occurred while writing a request.
    #[error("write failed: {0}")]
    Write(std::io::Error),

    /// An I/O error occurred while reading a response.
    #[error("read failed: {0}")]
    Read(std::io::Error),

    /// The peer closed the connection mid-message.
    #[error("connection closed (incomplete message)")]
    ConnectionClosed,

    /// The peer sent a malformed header or an unencodable request was built.
    #[error("protocol error: {0}")]
    Protocol(#[from] mongowire_protocol::ProtocolError),
}

pub type Result<T> = std::result::Result<T, TransportError>;
