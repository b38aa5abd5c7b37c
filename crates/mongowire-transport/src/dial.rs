use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

use crate::error::{Result, TransportError};

/// Default bound on a single connection attempt.
pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Dial a TCP connection to a `host:port` address with a bounded timeout.
///
/// Every resolved socket address is attempted in order; the last connect
/// failure is reported if none succeeds.
pub fn dial(addr: &str, timeout: Duration) -> Result<TcpStream> {
    let resolved = addr.to_socket_addrs().map_err(|source| TransportError::Connect {
        addr: addr.to_string(),
        source,
    })?;

    let mut last_err = None;
    for sock_addr in resolved {
        match TcpStream::connect_timeout(&sock_addr, timeout) {
            Ok(stream) => {
                stream.set_nodelay(true).map_err(|source| TransportError::Connect {
                    addr: addr.to_string(),
                    source,
                })?;
                debug!(%addr, "connected");
                return Ok(stream);
            }
            Err(err) => last_err = Some(err),
        }
    }

    match last_err {
        Some(source) => Err(TransportError::Connect {
            addr: addr.to_string(),
            source,
        }),
        None => Err(TransportError::Resolve {
            addr: addr.to_string(),
        }),
    }
}
