use std::io::{ErrorKind, Read, Write};

use bytes::{Bytes, BytesMut};
use mongowire_protocol::{op_name, MessageHeader, HEADER_SIZE};
use tracing::trace;

use crate::error::{Result, TransportError};

/// A complete wire message read off a connection.
///
/// The header is handed back undecimated so callers can correlate
/// `response_to` against the request that produced it.
#[derive(Debug, Clone)]
pub struct RawMessage {
    pub header: MessageHeader,
    pub payload: Bytes,
}

/// Frame and write a single request: header plus payload in one buffer.
pub fn send_request<W: Write>(
    conn: &mut W,
    op_code: i32,
    request_id: i32,
    payload: &[u8],
) -> Result<()> {
    let header = MessageHeader::for_request(op_code, request_id, payload.len())?;

    let mut message = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    header.encode_into(&mut message);
    message.extend_from_slice(payload);

    write_all(conn, &message)?;
    flush(conn)?;

    trace!(
        op = op_name(op_code),
        request_id,
        payload_size = payload.len(),
        "request sent"
    );
    Ok(())
}

/// Read one framed response (blocking).
///
/// Reads exactly 16 header bytes, validates the declared length, then reads
/// exactly the declared payload. Both reads loop until complete; EOF before
/// a full message is [`TransportError::ConnectionClosed`].
pub fn read_response<R: Read>(conn: &mut R) -> Result<RawMessage> {
    let mut header_bytes = [0u8; HEADER_SIZE];
    read_full(conn, &mut header_bytes)?;

    let header = MessageHeader::decode(&header_bytes);
    let payload_len = header.payload_len()?;

    let mut payload = vec![0u8; payload_len];
    read_full(conn, &mut payload)?;

    trace!(
        op = op_name(header.op_code),
        request_id = header.request_id,
        response_to = header.response_to,
        payload_size = payload_len,
        "response read"
    );

    Ok(RawMessage {
        header,
        payload: payload.into(),
    })
}

fn write_all<W: Write>(conn: &mut W, mut buf: &[u8]) -> Result<()> {
    while !buf.is_empty() {
        match conn.write(buf) {
            Ok(0) => return Err(TransportError::ConnectionClosed),
            Ok(n) => buf = &buf[n..],
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
            Err(err) => return Err(TransportError::Write(err)),
        }
    }
    Ok(())
}

fn flush<W: Write>(conn: &mut W) -> Result<()> {
    loop {
        match conn.flush() {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
            Err(err) => return Err(TransportError::Write(err)),
        }
    }
}

/// Accumulate exactly `buf.len()` bytes. A single `read` call may return
/// less over TCP; that is not a truncated message.
fn read_full<R: Read>(conn: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut offset = 0usize;
    while offset < buf.len() {
        match conn.read(&mut buf[offset..]) {
            Ok(0) => return Err(TransportError::ConnectionClosed),
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(TransportError::Read(err)),
        }
    }
    Ok(())
}
