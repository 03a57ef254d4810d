//! Error taxonomy.
//!
//! Mutation errors are programming errors at the call boundary (bad offsets
//! or ranges) and never clamp silently; codec errors are environmental
//! (corrupt or future-versioned payloads) and the persistence layer is
//! expected to fall back to plain-text recovery on them.

use thiserror::Error;

/// Errors produced by document and engine operations.
///
/// A failed operation leaves the document in its prior valid state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("offset {offset} out of range (document length {len})")]
    /// An offset fell outside `[0, len]`.
    OffsetOutOfRange {
        /// The offending char offset.
        offset: usize,
        /// Document char length at the time of the call.
        len: usize,
    },

    #[error("range {start}..{end} out of range (document length {len})")]
    /// A range fell outside `[0, len]`.
    RangeOutOfRange {
        /// Inclusive start char offset.
        start: usize,
        /// Exclusive end char offset.
        end: usize,
        /// Document char length at the time of the call.
        len: usize,
    },

    #[error("invalid range {start}..{end}: start exceeds end")]
    /// A range's start exceeded its end.
    InvalidRange {
        /// Inclusive start char offset.
        start: usize,
        /// Exclusive end char offset.
        end: usize,
    },
}

/// Errors produced by the persisted-document codec.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("corrupt payload: {0}")]
    /// The payload is malformed: unparseable, or its run ranges do not
    /// exactly partition the embedded text.
    CorruptData(String),

    #[error("unsupported format version {found} (supported up to {supported})")]
    /// The payload was written by a newer engine.
    UnsupportedVersion {
        /// Version found in the payload.
        found: u32,
        /// Newest version this engine decodes.
        supported: u32,
    },

    #[error("serialize error: {0}")]
    /// Encoding failed. Only reachable with non-finite float attribute
    /// values, which the engine never produces.
    Encode(#[source] serde_json::Error),
}
