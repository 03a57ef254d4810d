//! Paragraph boundary lookup.
//!
//! A paragraph spans from the char after the nearest preceding line
//! terminator (or document start) through and including the next line
//! terminator (or document end). The index borrows the document's rope and
//! is a pure function of the current text; it is rebuilt on demand and no
//! cached state survives a text mutation.

use std::ops::Range;

use ropey::Rope;

/// On-demand paragraph boundary lookup over a document's text.
pub struct ParagraphIndex<'a> {
    rope: &'a Rope,
}

impl<'a> ParagraphIndex<'a> {
    /// Create an index over `rope`.
    pub fn new(rope: &'a Rope) -> Self {
        Self { rope }
    }

    /// The paragraph `[start, end)` containing `offset`.
    ///
    /// `offset` may be anywhere in `[0, len]`; a caret at document end
    /// addresses the last paragraph (which is empty when the text ends with
    /// a line terminator). The returned range includes the paragraph's
    /// trailing `\n` when one exists.
    pub fn paragraph_range(&self, offset: usize) -> Range<usize> {
        let len = self.rope.len_chars();
        let offset = offset.min(len);

        let line = self.rope.char_to_line(offset);
        let start = self.rope.line_to_char(line);
        let end = if line + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line + 1)
        } else {
            len
        };

        start..end
    }

    /// Every paragraph touched by the selection `[start, end)`, in order.
    ///
    /// A caret (`start == end`) resolves to its single enclosing paragraph.
    pub fn paragraph_ranges(&self, start: usize, end: usize) -> Vec<Range<usize>> {
        if start >= end {
            return vec![self.paragraph_range(start)];
        }

        let first_line = self.rope.char_to_line(start.min(self.rope.len_chars()));
        // end is exclusive; the last touched char is end - 1.
        let last_line = self.rope.char_to_line((end - 1).min(self.rope.len_chars()));

        (first_line..=last_line)
            .map(|line| {
                let para_start = self.rope.line_to_char(line);
                let para_end = if line + 1 < self.rope.len_lines() {
                    self.rope.line_to_char(line + 1)
                } else {
                    self.rope.len_chars()
                };
                para_start..para_end
            })
            .collect()
    }
}
