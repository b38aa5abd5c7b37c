//! Synchronous framed TCP transport.
//!
//! One request, one response, blocking the calling thread. The read side
//! accumulates until the declared message length is satisfied — TCP gives no
//! message boundaries, so short reads are routine and never surface as
//! truncated messages.

pub mod dial;
pub mod error;
pub mod exchange;

pub use dial::{dial, DEFAULT_DIAL_TIMEOUT};
pub use error::{Result, TransportError};
pub use exchange::{read_response, send_request, RawMessage};
