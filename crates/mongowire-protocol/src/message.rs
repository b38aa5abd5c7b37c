use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{ProtocolError, Result};

/// Section tag for the mandatory body document.
pub const KIND_BODY: u8 = 0;

/// Section tag for an optional named document sequence.
pub const KIND_DOCUMENT_SEQUENCE: u8 = 1;

/// Identifier used for bulk document sequences.
pub const DOCUMENT_SEQUENCE_IDENTIFIER: &str = "documents";

/// Flag bits prefix. This client never sets any flags.
const FLAG_BITS_SIZE: usize = 4;

/// One section of an OP_MSG payload.
///
/// A well-formed payload carries exactly one [`Section::Body`] first,
/// followed by at most one [`Section::DocumentSequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Kind 0: the body document. Opaque, pre-encoded bytes; expected to
    /// carry any protocol-required fields such as `$db`.
    Body(Bytes),
    /// Kind 1: a length-prefixed identifier plus concatenated documents.
    DocumentSequence {
        identifier: String,
        documents: Vec<Bytes>,
    },
}

impl Section {
    /// A body section from pre-encoded document bytes.
    pub fn body(document: impl Into<Bytes>) -> Self {
        Self::Body(document.into())
    }

    /// A document sequence under the default `"documents"` identifier.
    pub fn document_sequence(documents: Vec<Bytes>) -> Self {
        Self::DocumentSequence {
            identifier: DOCUMENT_SEQUENCE_IDENTIFIER.to_string(),
            documents,
        }
    }

    /// The wire size of this section, tag byte included.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Body(document) => 1 + document.len(),
            Self::DocumentSequence {
                identifier,
                documents,
            } => 1 + sequence_size(identifier, documents),
        }
    }

    /// Append this section's wire representation to `dst`.
    pub fn encode_into(&self, dst: &mut BytesMut) -> Result<()> {
        match self {
            Self::Body(document) => {
                dst.reserve(1 + document.len());
                dst.put_u8(KIND_BODY);
                dst.put_slice(document);
            }
            Self::DocumentSequence {
                identifier,
                documents,
            } => {
                let size = sequence_size(identifier, documents);
                if size > i32::MAX as usize {
                    return Err(ProtocolError::DocumentSequenceTooLarge {
                        size,
                        max: i32::MAX as usize,
                    });
                }
                dst.reserve(1 + size);
                dst.put_u8(KIND_DOCUMENT_SEQUENCE);
                dst.put_i32_le(size as i32);
                dst.put_slice(identifier.as_bytes());
                dst.put_u8(0);
                for document in documents {
                    dst.put_slice(document);
                }
            }
        }
        Ok(())
    }
}

/// Section size = size field (4) + NUL-terminated identifier + documents.
fn sequence_size(identifier: &str, documents: &[Bytes]) -> usize {
    4 + identifier.len()
        + 1
        + documents.iter().map(Bytes::len).sum::<usize>()
}

/// Encode an OP_MSG payload: 4 zero flag bytes followed by `sections`.
///
/// Section contents are not validated; callers are expected to pass one body
/// section first and at most one document sequence, which is what
/// [`query_payload`] and [`command_payload`] produce.
pub fn encode_payload(sections: &[Section]) -> Result<Bytes> {
    let mut dst = BytesMut::with_capacity(
        FLAG_BITS_SIZE + sections.iter().map(Section::encoded_len).sum::<usize>(),
    );
    dst.put_u32_le(0);
    for section in sections {
        section.encode_into(&mut dst)?;
    }
    Ok(dst.freeze())
}

/// Build an OP_MSG payload carrying a single query document.
///
/// The document is opaque to this layer and should already include the
/// target collection and `$db`, e.g. `{"find": "users", "$db": "testdb"}`.
pub fn query_payload(query: impl Into<Bytes>) -> Result<Bytes> {
    encode_payload(&[Section::body(query)])
}

/// Build an OP_MSG payload carrying a command document plus an optional
/// bulk document sequence.
///
/// An empty `documents` slice suppresses the kind-1 section entirely; it is
/// never emitted as an empty section.
pub fn command_payload(command: impl Into<Bytes>, documents: &[Bytes]) -> Result<Bytes> {
    if documents.is_empty() {
        return encode_payload(&[Section::body(command)]);
    }
    encode_payload(&[
        Section::body(command),
        Section::document_sequence(documents.to_vec()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_payload_is_flags_then_body() {
        let query = br#"{"find": "users", "$db": "testdb"}"#;
        let payload = query_payload(query.as_slice()).unwrap();

        assert_eq!(&payload[0..4], &[0, 0, 0, 0]);
        assert_eq!(payload[4], KIND_BODY);
        assert_eq!(&payload[5..], query);
        assert_eq!(payload.len(), 5 + query.len());
    }

    #[test]
    fn command_payload_without_documents_has_no_sequence_section() {
        let command = br#"{"ping": 1, "$db": "testdb"}"#;
        let payload = command_payload(command.as_slice(), &[]).unwrap();

        assert_eq!(payload.len(), 5 + command.len());
        assert_eq!(payload[4], KIND_BODY);
        assert_eq!(&payload[5..], command);
    }

    #[test]
    fn command_payload_appends_document_sequence() {
        let command = br#"{"insert": "users", "$db": "testdb"}"#;
        let doc1 = Bytes::from_static(br#"{"name": "John", "age": 30}"#);
        let doc2 = Bytes::from_static(br#"{"name": "Jane", "age": 25}"#);

        let payload =
            command_payload(command.as_slice(), &[doc1.clone(), doc2.clone()]).unwrap();

        // Flags + body section.
        assert_eq!(&payload[0..4], &[0, 0, 0, 0]);
        assert_eq!(payload[4], KIND_BODY);
        let body_end = 5 + command.len();
        assert_eq!(&payload[5..body_end], command.as_slice());

        // Kind-1 tag, then the declared section size.
        assert_eq!(payload[body_end], KIND_DOCUMENT_SEQUENCE);
        let size = i32::from_le_bytes(payload[body_end + 1..body_end + 5].try_into().unwrap());
        let expected_size = 4 + DOCUMENT_SEQUENCE_IDENTIFIER.len() + 1 + doc1.len() + doc2.len();
        assert_eq!(size as usize, expected_size);

        // NUL-terminated identifier, then documents in input order.
        let ident_start = body_end + 5;
        let ident_end = ident_start + DOCUMENT_SEQUENCE_IDENTIFIER.len();
        assert_eq!(
            &payload[ident_start..ident_end],
            DOCUMENT_SEQUENCE_IDENTIFIER.as_bytes()
        );
        assert_eq!(payload[ident_end], 0);

        let docs_start = ident_end + 1;
        assert_eq!(
            &payload[docs_start..docs_start + doc1.len()],
            doc1.as_ref()
        );
        assert_eq!(&payload[docs_start + doc1.len()..], doc2.as_ref());
    }

    #[test]
    fn declared_sequence_size_spans_to_payload_end() {
        let command = b"cmd";
        let docs = [Bytes::from_static(b"aaaa"), Bytes::from_static(b"bb")];
        let payload = command_payload(command.as_slice(), &docs).unwrap();

        let tag_at = 4 + 1 + command.len();
        let size = i32::from_le_bytes(payload[tag_at + 1..tag_at + 5].try_into().unwrap());
        assert_eq!(tag_at + 1 + size as usize, payload.len());
    }

    #[test]
    fn empty_body_document_is_preserved() {
        let payload = query_payload(Bytes::new()).unwrap();
        assert_eq!(payload.as_ref(), &[0, 0, 0, 0, KIND_BODY]);
    }

    #[test]
    fn section_encoded_len_matches_encoding() {
        let sections = [
            Section::body(Bytes::from_static(b"body-doc")),
            Section::document_sequence(vec![
                Bytes::from_static(b"one"),
                Bytes::from_static(b"two"),
            ]),
        ];

        for section in &sections {
            let mut buf = BytesMut::new();
            section.encode_into(&mut buf).unwrap();
            assert_eq!(buf.len(), section.encoded_len());
        }
    }

    #[test]
    fn custom_identifier_is_written_verbatim() {
        let section = Section::DocumentSequence {
            identifier: "updates".to_string(),
            documents: vec![Bytes::from_static(b"xyz")],
        };

        let mut buf = BytesMut::new();
        section.encode_into(&mut buf).unwrap();

        assert_eq!(buf[0], KIND_DOCUMENT_SEQUENCE);
        let size = i32::from_le_bytes(buf[1..5].try_into().unwrap());
        assert_eq!(size as usize, 4 + "updates".len() + 1 + 3);
        assert_eq!(&buf[5..12], b"updates");
        assert_eq!(buf[12], 0);
        assert_eq!(&buf[13..], b"xyz");
    }
}
