use bytes::{BufMut, BytesMut};

use crate::error::{ProtocolError, Result};

/// Message header: messageLength (4) + requestID (4) + responseTo (4) + opCode (4) = 16 bytes.
pub const HEADER_SIZE: usize = 16;

/// The fixed header prefixed to every wire message.
///
/// Wire format (all fields little-endian int32):
/// ```text
/// ┌───────────────┬───────────┬────────────┬──────────┐
/// │ messageLength │ requestID │ responseTo │ opCode   │
/// │ (4B LE)       │ (4B LE)   │ (4B LE)    │ (4B LE)  │
/// └───────────────┴───────────┴────────────┴──────────┘
/// ```
///
/// `message_length` counts the header itself plus the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub message_length: i32,
    pub request_id: i32,
    pub response_to: i32,
    pub op_code: i32,
}

impl MessageHeader {
    /// Header for an outgoing request carrying `payload_len` payload bytes.
    ///
    /// `response_to` is zero on requests. Fails if the total message size
    /// cannot be represented in the int32 length field.
    pub fn for_request(op_code: i32, request_id: i32, payload_len: usize) -> Result<Self> {
        let max = i32::MAX as usize - HEADER_SIZE;
        if payload_len > max {
            return Err(ProtocolError::PayloadTooLarge {
                size: payload_len,
                max,
            });
        }
        Ok(Self {
            message_length: (HEADER_SIZE + payload_len) as i32,
            request_id,
            response_to: 0,
            op_code,
        })
    }

    /// Append the 16-byte wire representation to `dst`.
    pub fn encode_into(&self, dst: &mut BytesMut) {
        dst.reserve(HEADER_SIZE);
        dst.put_i32_le(self.message_length);
        dst.put_i32_le(self.request_id);
        dst.put_i32_le(self.response_to);
        dst.put_i32_le(self.op_code);
    }

    /// The 16-byte wire representation as an owned array.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&self.message_length.to_le_bytes());
        buf[4..8].copy_from_slice(&self.request_id.to_le_bytes());
        buf[8..12].copy_from_slice(&self.response_to.to_le_bytes());
        buf[12..16].copy_from_slice(&self.op_code.to_le_bytes());
        buf
    }

    /// Decode a header from exactly 16 bytes.
    ///
    /// Framing (accumulating those 16 bytes off a stream) is the transport's
    /// responsibility; the array type makes short input unrepresentable.
    pub fn decode(src: &[u8; HEADER_SIZE]) -> Self {
        Self {
            message_length: i32::from_le_bytes(src[0..4].try_into().unwrap()),
            request_id: i32::from_le_bytes(src[4..8].try_into().unwrap()),
            response_to: i32::from_le_bytes(src[8..12].try_into().unwrap()),
            op_code: i32::from_le_bytes(src[12..16].try_into().unwrap()),
        }
    }

    /// Payload byte count declared by this header.
    ///
    /// A `message_length` shorter than the header itself indicates a corrupt
    /// or truncated peer message.
    pub fn payload_len(&self) -> Result<usize> {
        let len = i64::from(self.message_length) - HEADER_SIZE as i64;
        if len < 0 {
            return Err(ProtocolError::InvalidMessageLength {
                length: self.message_length,
            });
        }
        Ok(len as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::{OP_MSG, OP_QUERY};

    #[test]
    fn encode_decode_roundtrip() {
        let header = MessageHeader {
            message_length: 100,
            request_id: 1,
            response_to: 0,
            op_code: OP_QUERY,
        };

        let bytes = header.encode();
        assert_eq!(MessageHeader::decode(&bytes), header);
    }

    #[test]
    fn roundtrip_preserves_negative_and_wrapped_ids() {
        let cases = [
            (16, 0, 0, OP_MSG),
            (i32::MAX, i32::MAX, i32::MIN, 1),
            (48, -1, -42, 2010),
        ];

        for (message_length, request_id, response_to, op_code) in cases {
            let header = MessageHeader {
                message_length,
                request_id,
                response_to,
                op_code,
            };
            assert_eq!(MessageHeader::decode(&header.encode()), header);
        }
    }

    #[test]
    fn encode_is_little_endian_in_field_order() {
        let header = MessageHeader {
            message_length: 0x01020304,
            request_id: 0x11121314,
            response_to: 0x21222324,
            op_code: 0x31323334,
        };

        let bytes = header.encode();
        assert_eq!(&bytes[0..4], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&bytes[4..8], &[0x14, 0x13, 0x12, 0x11]);
        assert_eq!(&bytes[8..12], &[0x24, 0x23, 0x22, 0x21]);
        assert_eq!(&bytes[12..16], &[0x34, 0x33, 0x32, 0x31]);
    }

    #[test]
    fn encode_into_matches_encode() {
        let header = MessageHeader {
            message_length: 21,
            request_id: 7,
            response_to: 3,
            op_code: OP_MSG,
        };

        let mut buf = bytes::BytesMut::new();
        header.encode_into(&mut buf);
        assert_eq!(buf.as_ref(), header.encode());
    }

    #[test]
    fn for_request_counts_header_in_length() {
        let header = MessageHeader::for_request(OP_MSG, 9, 100).unwrap();
        assert_eq!(header.message_length, 116);
        assert_eq!(header.request_id, 9);
        assert_eq!(header.response_to, 0);
        assert_eq!(header.op_code, OP_MSG);
    }

    #[test]
    fn for_request_rejects_unrepresentable_payload() {
        let result = MessageHeader::for_request(OP_MSG, 1, i32::MAX as usize);
        assert!(matches!(
            result,
            Err(ProtocolError::PayloadTooLarge { .. })
        ));
    }

    #[test]
    fn payload_len_subtracts_header() {
        let header = MessageHeader {
            message_length: 25,
            request_id: 0,
            response_to: 0,
            op_code: OP_MSG,
        };
        assert_eq!(header.payload_len().unwrap(), 9);
    }

    #[test]
    fn payload_len_accepts_header_only_message() {
        let header = MessageHeader {
            message_length: 16,
            request_id: 0,
            response_to: 0,
            op_code: OP_MSG,
        };
        assert_eq!(header.payload_len().unwrap(), 0);
    }

    #[test]
    fn payload_len_rejects_short_message_length() {
        for length in [15, 0, -1, i32::MIN] {
            let header = MessageHeader {
                message_length: length,
                request_id: 0,
                response_to: 0,
                op_code: OP_MSG,
            };
            assert!(matches!(
                header.payload_len(),
                Err(ProtocolError::InvalidMessageLength { length: l }) if l == length
            ));
        }
    }
}
