//! Persisted-document codec.
//!
//! Documents persist as a versioned JSON envelope: the plain text plus the
//! styled run list, attribute-for-attribute. The envelope carries a format
//! version so attribute additions stay decodable across engine releases;
//! payloads written by a *newer* engine are refused rather than decoded
//! lossily, and the persistence layer falls back to the note's plain-text
//! field.
//!
//! Encoding borrows the document and never mutates it; a caller may discard
//! an in-flight result with no partial-state concerns.

use ropey::Rope;
use serde::{Deserialize, Serialize};

use crate::document::AttributedDocument;
use crate::error::CodecError;
use crate::runs::{RunList, StyledRun};

/// Newest persisted format version this engine reads and writes.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope {
    version: u32,
    text: String,
    runs: Vec<StyledRun>,
}

/// Serialize a document to its persisted byte encoding.
pub fn encode(document: &AttributedDocument) -> Result<Vec<u8>, CodecError> {
    let envelope = Envelope {
        version: FORMAT_VERSION,
        text: document.text(),
        runs: document.runs().to_vec(),
    };
    serde_json::to_vec(&envelope).map_err(CodecError::Encode)
}

/// Reconstruct a document from its persisted byte encoding.
///
/// Fails with [`CodecError::CorruptData`] when the payload is unparseable
/// or its run ranges do not exactly partition the embedded text, and with
/// [`CodecError::UnsupportedVersion`] when the payload was written by a
/// newer engine.
pub fn decode(bytes: &[u8]) -> Result<AttributedDocument, CodecError> {
    let envelope: Envelope = serde_json::from_slice(bytes).map_err(|err| {
        log::warn!("rich-text payload unparseable: {err}");
        CodecError::CorruptData(err.to_string())
    })?;

    if envelope.version > FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: envelope.version,
            supported: FORMAT_VERSION,
        });
    }

    let rope = Rope::from_str(&envelope.text);
    let len = rope.len_chars();
    let Some(runs) = RunList::try_from_runs(envelope.runs, len) else {
        log::warn!("rich-text payload rejected: run ranges do not partition 0..{len}");
        return Err(CodecError::CorruptData(format!(
            "run ranges do not exactly partition the text (length {len})"
        )));
    };

    Ok(AttributedDocument::from_parts(rope, runs))
}

/// The document's plain-text projection, styling-free.
///
/// Used for search indexing and previews.
pub fn plain_text(document: &AttributedDocument) -> String {
    document.text()
}

/// Build an unstyled document from a note's plain-text field.
///
/// The persistence layer's recovery path: when no styled payload exists or
/// decoding it failed, the note stays readable as plain text.
pub fn from_plain_text(text: &str) -> AttributedDocument {
    AttributedDocument::from_text(text)
}
