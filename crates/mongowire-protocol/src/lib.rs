//! MongoDB wire protocol message encoding.
//!
//! This is the codec layer of mongowire. Every message starts with a fixed
//! 16-byte header of four little-endian int32 fields, followed by an
//! opcode-specific payload. The only payload actively built here is OP_MSG:
//! - A 4-byte flag field (always zero in this client)
//! - Exactly one kind-0 body section
//! - Zero or one kind-1 document-sequence section
//!
//! Documents are opaque byte strings at this layer; nothing inspects or
//! validates their contents.

pub mod error;
pub mod header;
pub mod message;
pub mod opcode;

pub use error::{ProtocolError, Result};
pub use header::{MessageHeader, HEADER_SIZE};
pub use message::{
    command_payload, encode_payload, query_payload, Section, DOCUMENT_SEQUENCE_IDENTIFIER,
    KIND_BODY, KIND_DOCUMENT_SEQUENCE,
};
pub use opcode::{op_name, OP_MSG, OP_QUERY};
