//! MongoDB wire protocol client with local replica set supervision.
//!
//! mongowire speaks the binary wire protocol directly — fixed 16-byte
//! headers, OP_MSG section payloads, synchronous framed exchanges over plain
//! TCP — and can supervise a local replica set of `mongod` processes for
//! development and testing.
//!
//! # Crate Structure
//!
//! - [`protocol`] — Header codec, opcodes, OP_MSG payload builder
//! - [`transport`] — Framed TCP request/response exchange
//! - [`replset`] — Replica set connection management
//! - [`cluster`] — Local `mongod` supervision (behind `cluster` feature)

/// Re-export protocol types.
pub mod protocol {
    pub use mongowire_protocol::*;
}

/// Re-export transport types.
pub mod transport {
    pub use mongowire_transport::*;
}

/// Re-export replica set types.
pub mod replset {
    pub use mongowire_replset::*;
}

/// Re-export cluster supervision types (requires `cluster` feature).
#[cfg(feature = "cluster")]
pub mod cluster {
    pub use mongowire_cluster::*;
}
