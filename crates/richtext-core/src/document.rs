//! The attributed document: rope-backed text plus the styled run list.
//!
//! All offsets are char offsets (Unicode scalar values), the rope's native
//! addressing. Hosts that address text in UTF-16 code units convert at
//! their own boundary.
//!
//! Every mutation validates its arguments before touching any state, so a
//! failed call leaves the document exactly as it was. In debug builds each
//! mutation also re-checks the run partition invariant.

use std::ops::Range;

use ropey::Rope;

use crate::attrs::AttributeSet;
use crate::error::EngineError;
use crate::paragraph::ParagraphIndex;
use crate::runs::{RunList, StyledRun};

/// A mutable, range-addressed styled-text document.
///
/// The runs always exactly partition `[0, len_chars())`: no gaps, no
/// overlaps, no equal-attribute neighbors. An empty document has no runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributedDocument {
    rope: Rope,
    runs: RunList,
}

impl AttributedDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            runs: RunList::new(),
        }
    }

    /// Create an unstyled document from plain text.
    pub fn from_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let len = rope.len_chars();
        let runs = if len == 0 {
            RunList::new()
        } else {
            // A single plain run over the whole text always partitions.
            RunList::try_from_runs(vec![StyledRun::new(0, len, AttributeSet::default())], len)
                .unwrap_or_default()
        };
        Self { rope, runs }
    }

    /// Assemble a document from pre-validated parts. Codec use only.
    pub(crate) fn from_parts(rope: Rope, runs: RunList) -> Self {
        let doc = Self { rope, runs };
        doc.debug_check_partition();
        doc
    }

    /// Document length in chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Whether the document contains no text.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The plain-text content, styling-free.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// The text of `[start, end)`.
    pub fn slice(&self, range: Range<usize>) -> Result<String, EngineError> {
        self.validate_range(&range)?;
        Ok(self.rope.slice(range).to_string())
    }

    /// The styled runs, in order.
    pub fn runs(&self) -> &[StyledRun] {
        self.runs.runs()
    }

    /// Iterate the runs overlapping `[start, end)`.
    pub fn runs_in(&self, range: Range<usize>) -> impl Iterator<Item = &StyledRun> {
        self.runs.runs_in(range)
    }

    /// A paragraph index over the current text.
    ///
    /// The index borrows the document; obtain a fresh one after any
    /// mutation.
    pub fn paragraph_index(&self) -> ParagraphIndex<'_> {
        ParagraphIndex::new(&self.rope)
    }

    /// The attribute set in effect at `offset`.
    ///
    /// `offset` must lie inside the text; querying at `len_chars()` is out
    /// of range except on the empty document, which reports the empty
    /// attribute set.
    pub fn attributes_at(&self, offset: usize) -> Result<AttributeSet, EngineError> {
        if self.is_empty() && offset == 0 {
            return Ok(AttributeSet::default());
        }
        self.runs
            .attrs_at(offset)
            .cloned()
            .ok_or(EngineError::OffsetOutOfRange {
                offset,
                len: self.len_chars(),
            })
    }

    /// Insert `text` at `offset`.
    ///
    /// The inserted text inherits the attributes of the run covering
    /// `offset` (the run ending there when `offset` sits on a boundary);
    /// later runs shift right.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), EngineError> {
        if offset > self.len_chars() {
            return Err(EngineError::OffsetOutOfRange {
                offset,
                len: self.len_chars(),
            });
        }
        if text.is_empty() {
            return Ok(());
        }

        self.rope.insert(offset, text);
        self.runs
            .update_for_insertion(offset, text.chars().count());
        self.debug_check_partition();
        Ok(())
    }

    /// Delete the text in `[start, end)`.
    pub fn delete(&mut self, range: Range<usize>) -> Result<(), EngineError> {
        self.validate_range(&range)?;
        if range.is_empty() {
            return Ok(());
        }

        self.rope.remove(range.clone());
        self.runs.update_for_deletion(range.start, range.end);
        self.debug_check_partition();
        Ok(())
    }

    /// Replace the text in `[start, end)` with `text`.
    ///
    /// Equivalent to delete-then-insert, but validated up front so an
    /// out-of-range call mutates nothing.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), EngineError> {
        self.validate_range(&range)?;

        if !range.is_empty() {
            self.rope.remove(range.clone());
            self.runs.update_for_deletion(range.start, range.end);
        }
        if !text.is_empty() {
            self.rope.insert(range.start, text);
            self.runs
                .update_for_insertion(range.start, text.chars().count());
        }
        self.debug_check_partition();
        Ok(())
    }

    /// Apply `edit` to the attributes of every char in `[start, end)`.
    ///
    /// Runs are split at the range boundaries, mutated, and re-merged, so
    /// the same edit applied twice yields the same run layout.
    pub fn update_attributes(
        &mut self,
        range: Range<usize>,
        edit: impl FnMut(&mut AttributeSet),
    ) -> Result<(), EngineError> {
        self.validate_range(&range)?;
        self.runs.edit_attrs(range, edit);
        self.debug_check_partition();
        Ok(())
    }

    fn validate_range(&self, range: &Range<usize>) -> Result<(), EngineError> {
        if range.start > range.end {
            return Err(EngineError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > self.len_chars() {
            return Err(EngineError::RangeOutOfRange {
                start: range.start,
                end: range.end,
                len: self.len_chars(),
            });
        }
        Ok(())
    }

    fn debug_check_partition(&self) {
        debug_assert!(
            self.runs.check_partition(self.len_chars()),
            "run list no longer partitions [0, {}): {:?}",
            self.len_chars(),
            self.runs
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold_over(doc: &mut AttributedDocument, range: Range<usize>) {
        doc.update_attributes(range, |attrs| attrs.bold = true).unwrap();
    }

    #[test]
    fn test_empty_document() {
        let doc = AttributedDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.runs().len(), 0);
        assert!(doc.attributes_at(0).unwrap().is_plain());
    }

    #[test]
    fn test_from_text_single_plain_run() {
        let doc = AttributedDocument::from_text("Hello world");
        assert_eq!(doc.len_chars(), 11);
        assert_eq!(doc.runs().len(), 1);
        assert_eq!(doc.runs()[0].range(), 0..11);
        assert!(doc.runs()[0].attrs.is_plain());
    }

    #[test]
    fn test_insert_inherits_covering_run_attrs() {
        let mut doc = AttributedDocument::from_text("Hello world");
        bold_over(&mut doc, 0..5);

        doc.insert(3, "xyz").unwrap();
        assert_eq!(doc.text(), "Helxyzlo world");
        assert_eq!(doc.runs()[0].range(), 0..8);
        assert!(doc.runs()[0].attrs.bold);
    }

    #[test]
    fn test_insert_out_of_range_leaves_document_untouched() {
        let mut doc = AttributedDocument::from_text("abc");
        let before = doc.clone();

        assert!(matches!(
            doc.insert(4, "x"),
            Err(EngineError::OffsetOutOfRange { offset: 4, len: 3 })
        ));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_delete_out_of_range_leaves_document_untouched() {
        let mut doc = AttributedDocument::from_text("abc");
        let before = doc.clone();

        assert!(doc.delete(1..5).is_err());
        assert!(doc.delete(3..1).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_replace_swaps_text() {
        let mut doc = AttributedDocument::from_text("Hello world");
        doc.replace(6..11, "there").unwrap();
        assert_eq!(doc.text(), "Hello there");
        assert_eq!(doc.runs().len(), 1);
    }

    #[test]
    fn test_attributes_at_end_is_out_of_range() {
        let doc = AttributedDocument::from_text("abc");
        assert!(doc.attributes_at(2).is_ok());
        assert!(matches!(
            doc.attributes_at(3),
            Err(EngineError::OffsetOutOfRange { offset: 3, len: 3 })
        ));
    }

    #[test]
    fn test_update_attributes_rejects_bad_range() {
        let mut doc = AttributedDocument::from_text("abc");
        assert!(doc.update_attributes(0..4, |a| a.bold = true).is_err());
        assert!(doc.runs()[0].attrs.is_plain());
    }

    #[test]
    fn test_char_offsets_with_astral_plane_text() {
        // "𝄞" and "🦀" are outside the BMP; offsets count scalars, not
        // UTF-16 units.
        let mut doc = AttributedDocument::from_text("a𝄞b🦀c");
        assert_eq!(doc.len_chars(), 5);

        bold_over(&mut doc, 1..2);
        assert!(doc.attributes_at(1).unwrap().bold);
        assert!(!doc.attributes_at(2).unwrap().bold);

        doc.insert(4, "x").unwrap();
        assert_eq!(doc.text(), "a𝄞b🦀xc");
    }
}
