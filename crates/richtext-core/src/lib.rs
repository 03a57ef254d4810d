#![warn(missing_docs)]
//! Rich-Text Core - Headless Rich-Text Formatting Engine
//!
//! # Overview
//!
//! `richtext-core` is a headless rich-text engine for note editors. It owns
//! a mutable, range-addressed styled-text document and the formatting
//! operations a toolbar invokes over a selection; it renders nothing and
//! performs no I/O. The host surface supplies `(document, selection)` pairs
//! and re-renders from the document's run list; the persistence layer calls
//! the codec around its own storage.
//!
//! # Core Features
//!
//! - **Run-based attribute model**: the styled runs always exactly
//!   partition the text, with equal-attribute neighbors merged
//! - **Split-mutate-merge attribute edits**: idempotent range styling over
//!   arbitrary selections
//! - **Uniform toggle semantics**: uniformly-on turns off, off or mixed
//!   turns on, shared with the active-formats query
//! - **Paragraph-scoped operations**: lists, indentation, and alignment
//!   widen any caret or selection to whole paragraphs
//! - **Versioned persistence**: lossless round-tripping with plain-text
//!   fallback for older or corrupt payloads
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  FormattingEngine (ops over a selection)    │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  DocumentCodec (versioned persistence)      │  ← Storage Boundary
//! ├─────────────────────────────────────────────┤
//! │  ParagraphIndex (boundary lookup)           │  ← Paragraph Scope
//! ├─────────────────────────────────────────────┤
//! │  AttributedDocument (text + runs)           │  ← Document Model
//! ├─────────────────────────────────────────────┤
//! │  RunList (split-mutate-merge partition)     │  ← Attribute Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use richtext_core::{ApplyOutcome, FormatOp, FormattingEngine, Selection};
//!
//! let mut engine = FormattingEngine::empty();
//! engine.insert(0, "Hello world").unwrap();
//!
//! // Bold the first word.
//! let outcome = engine.apply(FormatOp::Bold, Selection::new(0, 5)).unwrap();
//! assert_eq!(outcome, ApplyOutcome::Applied { changed_range: 0..5 });
//! assert!(engine.document().runs()[0].attrs.bold);
//!
//! // Make the paragraph a bullet item from a caret position.
//! engine.apply(FormatOp::BulletList, Selection::caret(3)).unwrap();
//! assert_eq!(engine.document().text(), "• Hello world");
//! ```
//!
//! # Offsets
//!
//! All offsets and ranges are **char offsets** (Unicode scalar values),
//! half-open `[start, end)`. Hosts that address text in UTF-16 code units
//! convert at their own boundary.
//!
//! # Module Description
//!
//! - [`attrs`] - character and paragraph attribute model
//! - [`runs`] - styled runs and the partitioning run list
//! - [`document`] - the mutable attributed document
//! - [`paragraph`] - paragraph boundary lookup
//! - [`engine`] - formatting operations over a selection
//! - [`codec`] - versioned persisted encoding
//!
//! # Concurrency
//!
//! One editing session owns a document at a time; all operations are
//! synchronous in-memory mutations. Encoding borrows the document
//! immutably, so a host that marshals mutation and persistence onto one
//! sequential queue gets snapshot consistency for free.

pub mod attrs;
pub mod codec;
pub mod document;
pub mod engine;
pub mod error;
pub mod paragraph;
pub mod runs;

pub use attrs::{
    Alignment, AttributeSet, CharFormat, Color, INDENT_STEP, LinkAttr, ListKind, ParagraphStyle,
};
pub use document::AttributedDocument;
pub use engine::{
    ApplyOutcome, BULLET_MARKER, FormatOp, FormattingEngine, NUMBERED_MARKER, Selection,
};
pub use error::{CodecError, EngineError};
pub use paragraph::ParagraphIndex;
pub use runs::{RunList, StyledRun};
