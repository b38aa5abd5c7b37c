/// Errors that can occur while encoding or decoding wire messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The declared message length is shorter than the fixed header.
    #[error("invalid message length {length} (minimum is the 16-byte header)")]
    InvalidMessageLength { length: i32 },

    /// The payload cannot be represented in the header's int32 length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// A kind-1 section exceeds the int32 range of its size field.
    #[error("document sequence too large ({size} bytes, max {max})")]
    DocumentSequenceTooLarge { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
