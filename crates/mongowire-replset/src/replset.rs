use std::collections::HashMap;
use std::io::ErrorKind;
use std::net::{Shutdown, TcpStream};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bytes::Bytes;
use mongowire_protocol::{command_payload, op_name, query_payload, OP_MSG};
use mongowire_transport::{dial, read_response, send_request, TransportError, DEFAULT_DIAL_TIMEOUT};
use tracing::{debug, info, warn};

use crate::error::{ReplsetError, Result};
use crate::policy::{FirstNode, SelectionPolicy};

/// Configuration for a [`Replset`].
#[derive(Debug, Clone)]
pub struct ReplsetConfig {
    /// Bound on each member dial during connect.
    pub dial_timeout: Duration,
    /// Socket read timeout. `None` blocks indefinitely on a stalled peer.
    pub read_timeout: Option<Duration>,
    /// Socket write timeout. `None` blocks indefinitely.
    pub write_timeout: Option<Duration>,
}

impl Default for ReplsetConfig {
    fn default() -> Self {
        Self {
            dial_timeout: DEFAULT_DIAL_TIMEOUT,
            read_timeout: None,
            write_timeout: None,
        }
    }
}

/// Connection table, request-id counter, and routing policy, owned together
/// so teardown can never race an in-flight exchange.
struct Shared {
    conns: HashMap<String, TcpStream>,
    request_id: i32,
    policy: Box<dyn SelectionPolicy>,
}

/// A set of replica set member connections.
///
/// Holds an ordered member address list (`host:port`) and at most one open
/// TCP connection per member. Requests go to one member chosen by the
/// configured [`SelectionPolicy`]; each call performs a complete
/// write-then-read exchange under an exclusive lock, so concurrent callers
/// never interleave traffic on a shared socket.
///
/// Lifecycle is all-or-nothing: [`connect`](Self::connect) either opens every
/// member connection or rolls back to the unconnected state, and there is no
/// automatic reconnect.
pub struct Replset {
    nodes: Vec<String>,
    config: ReplsetConfig,
    shared: Mutex<Shared>,
}

impl Replset {
    /// A replica set over `nodes` with default configuration and the
    /// [`FirstNode`] selection policy.
    pub fn new(nodes: Vec<String>) -> Self {
        Self::with_config(nodes, ReplsetConfig::default())
    }

    /// A replica set with explicit configuration.
    pub fn with_config(nodes: Vec<String>, config: ReplsetConfig) -> Self {
        Self {
            nodes,
            config,
            shared: Mutex::new(Shared {
                conns: HashMap::new(),
                request_id: 0,
                policy: Box::new(FirstNode),
            }),
        }
    }

    /// Replace the node selection policy.
    pub fn with_policy(mut self, policy: impl SelectionPolicy + 'static) -> Self {
        self.shared
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .policy = Box::new(policy);
        self
    }

    /// Establish a connection to every configured member.
    ///
    /// On the first failure, every connection opened during this call is
    /// closed before the error is returned; there is no partial-success
    /// mode.
    pub fn connect(&self) -> Result<()> {
        let mut shared = self.lock();

        for node in &self.nodes {
            let stream = match dial(node, self.config.dial_timeout) {
                Ok(stream) => stream,
                Err(source) => {
                    close_all(&mut shared.conns);
                    return Err(ReplsetError::Dial {
                        node: node.clone(),
                        source,
                    });
                }
            };

            if let Err(source) = apply_timeouts(&stream, &self.config) {
                close_all(&mut shared.conns);
                return Err(ReplsetError::Dial {
                    node: node.clone(),
                    source: TransportError::Connect {
                        addr: node.clone(),
                        source,
                    },
                });
            }

            shared.conns.insert(node.clone(), stream);
        }

        info!(members = self.nodes.len(), "connected to all replica set members");
        Ok(())
    }

    /// Close every open connection and clear the connection set.
    ///
    /// Cleanup proceeds unconditionally; the last close error encountered
    /// (if any) is reported after the set is cleared.
    pub fn disconnect(&self) -> Result<()> {
        let mut shared = self.lock();

        let mut last_err = None;
        for (node, conn) in shared.conns.drain() {
            match conn.shutdown(Shutdown::Both) {
                Ok(()) => {}
                // The peer may already be gone; that is not a teardown failure.
                Err(source) if source.kind() == ErrorKind::NotConnected => {}
                Err(source) => {
                    warn!(%node, %source, "failed to close member connection");
                    last_err = Some(ReplsetError::Close { node, source });
                }
            }
        }

        info!("disconnected from replica set");
        match last_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Send a framed request to one member and read its paired response.
    ///
    /// The member is chosen by the selection policy, the shared request-id
    /// counter is incremented (wrapping over the int32 range), and the
    /// response's `response_to` must answer this request. One outstanding
    /// request per call; the exchange holds the set lock exclusively.
    pub fn send_message(&self, op_code: i32, payload: &[u8]) -> Result<Bytes> {
        let mut shared = self.lock();
        let shared = &mut *shared;

        if shared.conns.is_empty() {
            return Err(ReplsetError::NoConnections);
        }

        let connected: Vec<&str> = self
            .nodes
            .iter()
            .map(String::as_str)
            .filter(|node| shared.conns.contains_key(*node))
            .collect();
        let node = connected[shared.policy.select(&connected)].to_string();

        shared.request_id = shared.request_id.wrapping_add(1);
        let request_id = shared.request_id;

        let Some(conn) = shared.conns.get_mut(&node) else {
            return Err(ReplsetError::NoConnections);
        };

        debug!(
            %node,
            op = op_name(op_code),
            request_id,
            payload_size = payload.len(),
            "sending message"
        );

        send_request(conn, op_code, request_id, payload).map_err(|source| ReplsetError::Send {
            node: node.clone(),
            source,
        })?;

        let message = read_response(conn).map_err(|source| ReplsetError::Receive {
            node: node.clone(),
            source,
        })?;

        if message.header.response_to != request_id {
            return Err(ReplsetError::ProtocolMismatch {
                node,
                expected: request_id,
                got: message.header.response_to,
            });
        }

        Ok(message.payload)
    }

    /// Send a query document as an OP_MSG body section.
    ///
    /// The document should carry the target collection and `$db`, e.g.
    /// `{"find": "users", "$db": "testdb"}`; it is opaque to this client.
    pub fn send_query(&self, query: impl Into<Bytes>) -> Result<Bytes> {
        let payload = query_payload(query)?;
        self.send_message(OP_MSG, &payload)
    }

    /// Send a command document, optionally with a bulk document sequence.
    ///
    /// An empty `documents` slice sends a body-only message.
    pub fn send_command(&self, command: impl Into<Bytes>, documents: &[Bytes]) -> Result<Bytes> {
        let payload = command_payload(command, documents)?;
        self.send_message(OP_MSG, &payload)
    }

    /// The configured member addresses, as an independent copy.
    pub fn nodes(&self) -> Vec<String> {
        self.nodes.clone()
    }

    /// True iff the connection set is non-empty.
    pub fn is_connected(&self) -> bool {
        !self.lock().conns.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn apply_timeouts(stream: &TcpStream, config: &ReplsetConfig) -> std::io::Result<()> {
    stream.set_read_timeout(config.read_timeout)?;
    stream.set_write_timeout(config.write_timeout)
}

/// Close and forget every connection. Used for connect rollback, where the
/// dial failure is the error worth reporting.
fn close_all(conns: &mut HashMap<String, TcpStream>) {
    for (node, conn) in conns.drain() {
        if let Err(source) = conn.shutdown(Shutdown::Both) {
            if source.kind() != ErrorKind::NotConnected {
                warn!(%node, %source, "failed to close member connection during rollback");
            }
        }
    }
}
