//! Replica set connection management.
//!
//! A [`Replset`] owns one TCP connection per configured member and routes
//! synchronous request/response exchanges through a swappable
//! [`SelectionPolicy`]. It does not discover topology, track the primary,
//! or reconnect; connect is all-or-nothing and recovery policy belongs to
//! the caller.

pub mod error;
pub mod policy;
pub mod replset;

pub use error::{ReplsetError, Result};
pub use policy::{FirstNode, RoundRobin, SelectionPolicy};
pub use replset::{Replset, ReplsetConfig};
