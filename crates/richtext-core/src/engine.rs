//! The formatting engine: named formatting operations over a selection.
//!
//! # Overview
//!
//! [`FormattingEngine`] owns one [`AttributedDocument`] editing session and
//! exposes every toolbar-style formatting operation as a [`FormatOp`]
//! applied to a [`Selection`]. The host surface passes the session
//! explicitly; there is no global dispatch or focused-view lookup.
//!
//! Operation scope:
//!
//! - **Character-scoped** ops (bold, italic, underline, strikethrough,
//!   highlight, text color, font size, link) require a non-empty selection
//!   and report [`ApplyOutcome::NoSelection`] for a caret.
//! - **Paragraph-scoped** ops (lists, indent, alignment) accept a caret or
//!   range and widen it to the enclosing paragraph(s) before applying.
//!
//! The binary toggles share one rule with [`FormattingEngine::active_formats`]:
//! an attribute counts as active only when it is uniformly on across the
//! whole selection. Toggling turns a uniformly-on attribute off and turns a
//! mixed or off attribute on, so the toolbar state and the next toggle's
//! effect always agree.

use std::collections::BTreeSet;
use std::ops::Range;

use crate::attrs::{
    Alignment, AttributeSet, CharFormat, Color, INDENT_STEP, LinkAttr, ListKind, ParagraphStyle,
};
use crate::document::AttributedDocument;
use crate::error::EngineError;

/// Literal bullet list marker managed at paragraph starts.
pub const BULLET_MARKER: &str = "• ";

/// Literal numbered list marker managed at paragraph starts.
///
/// Every numbered paragraph receives `"1. "`; consecutive items are not
/// resequenced. This matches the shipped editor behavior; renumbering is a
/// pending product decision, not an engine concern.
pub const NUMBERED_MARKER: &str = "1. ";

/// A selection within a document: half-open `[start, end)` char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Inclusive start char offset.
    pub start: usize,
    /// Exclusive end char offset.
    pub end: usize,
}

impl Selection {
    /// Create a selection over `[start, end)`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-width selection (cursor position).
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Whether the selection is zero-width.
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// The selection as a std range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A named formatting operation.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatOp {
    /// Toggle bold over the selection.
    Bold,
    /// Toggle italic over the selection.
    Italic,
    /// Toggle underline over the selection.
    Underline,
    /// Toggle strikethrough over the selection.
    Strikethrough,
    /// Set the highlight color over the selection.
    Highlight(Color),
    /// Set the text color over the selection.
    TextColor(Color),
    /// Set the font size over the selection.
    FontSize(f32),
    /// Link the selection, optionally replacing the selected text.
    InsertLink {
        /// Link destination.
        url: String,
        /// When present, replaces the selected text and becomes the linked
        /// anchor; when absent, the existing selected text is linked as-is.
        anchor_text: Option<String>,
    },
    /// Toggle bullet-list membership of the selected paragraph(s).
    BulletList,
    /// Toggle numbered-list membership of the selected paragraph(s).
    NumberedList,
    /// Increase paragraph indent by one step.
    IncreaseIndent,
    /// Decrease paragraph indent by one step (floored at zero).
    DecreaseIndent,
    /// Left-align the selected paragraph(s).
    AlignLeft,
    /// Center the selected paragraph(s).
    AlignCenter,
    /// Right-align the selected paragraph(s).
    AlignRight,
}

impl FormatOp {
    /// Whether the operation widens its selection to whole paragraphs.
    pub fn is_paragraph_scoped(&self) -> bool {
        matches!(
            self,
            FormatOp::BulletList
                | FormatOp::NumberedList
                | FormatOp::IncreaseIndent
                | FormatOp::DecreaseIndent
                | FormatOp::AlignLeft
                | FormatOp::AlignCenter
                | FormatOp::AlignRight
        )
    }
}

/// Result of applying a formatting operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The operation mutated the document.
    Applied {
        /// The char range affected, in post-mutation coordinates, so the
        /// host can re-render minimally.
        changed_range: Range<usize>,
    },
    /// A character-scoped operation received a caret; nothing changed.
    NoSelection,
}

/// A formatting session over one attributed document.
#[derive(Debug, Default)]
pub struct FormattingEngine {
    document: AttributedDocument,
    version: u64,
}

impl FormattingEngine {
    /// Start a session over an existing document.
    pub fn new(document: AttributedDocument) -> Self {
        Self {
            document,
            version: 0,
        }
    }

    /// Start a session over an empty document.
    pub fn empty() -> Self {
        Self::new(AttributedDocument::new())
    }

    /// The session's document.
    pub fn document(&self) -> &AttributedDocument {
        &self.document
    }

    /// End the session, returning the document.
    pub fn into_document(self) -> AttributedDocument {
        self.document
    }

    /// Monotonic mutation counter; bumped on every applied change, so hosts
    /// can cheap-check for dirty state.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Insert plain text at `offset` (typing path).
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), EngineError> {
        self.document.insert(offset, text)?;
        self.version += 1;
        Ok(())
    }

    /// Delete the selected text.
    pub fn delete(&mut self, range: Range<usize>) -> Result<(), EngineError> {
        self.document.delete(range)?;
        self.version += 1;
        Ok(())
    }

    /// Replace the selected text.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), EngineError> {
        self.document.replace(range, text)?;
        self.version += 1;
        Ok(())
    }

    /// Apply a formatting operation to the selection.
    ///
    /// Character-scoped operations over a caret are a typed no-op
    /// ([`ApplyOutcome::NoSelection`]); an out-of-bounds selection is an
    /// error and mutates nothing.
    pub fn apply(
        &mut self,
        op: FormatOp,
        selection: Selection,
    ) -> Result<ApplyOutcome, EngineError> {
        self.validate_selection(&selection)?;
        if !op.is_paragraph_scoped() && selection.is_caret() {
            return Ok(ApplyOutcome::NoSelection);
        }

        let changed_range = match op {
            FormatOp::Bold => self.toggle(selection, |a| a.bold, |a, on| a.bold = on)?,
            FormatOp::Italic => self.toggle(selection, |a| a.italic, |a, on| a.italic = on)?,
            FormatOp::Underline => {
                self.toggle(selection, |a| a.underline, |a, on| a.underline = on)?
            }
            FormatOp::Strikethrough => self.toggle(
                selection,
                |a| a.strikethrough,
                |a, on| a.strikethrough = on,
            )?,
            FormatOp::Highlight(color) => {
                self.set_over(selection, move |a| a.highlight_color = Some(color))?
            }
            FormatOp::TextColor(color) => {
                self.set_over(selection, move |a| a.text_color = Some(color))?
            }
            FormatOp::FontSize(size) => {
                self.set_over(selection, move |a| a.font_size = Some(size))?
            }
            FormatOp::InsertLink { url, anchor_text } => {
                self.insert_link(selection, url, anchor_text)?
            }
            FormatOp::BulletList => self.apply_list(selection, ListKind::Bullet)?,
            FormatOp::NumberedList => self.apply_list(selection, ListKind::Numbered)?,
            FormatOp::IncreaseIndent => self.adjust_indent(selection, INDENT_STEP)?,
            FormatOp::DecreaseIndent => self.adjust_indent(selection, -INDENT_STEP)?,
            FormatOp::AlignLeft => self.set_alignment(selection, Alignment::Left)?,
            FormatOp::AlignCenter => self.set_alignment(selection, Alignment::Center)?,
            FormatOp::AlignRight => self.set_alignment(selection, Alignment::Right)?,
        };

        self.version += 1;
        Ok(ApplyOutcome::Applied { changed_range })
    }

    /// The character-scoped formats uniformly active across the selection.
    ///
    /// Uses the same uniform-across-range rule as the toggles, so what the
    /// toolbar highlights and what toggling does next always agree. A caret
    /// yields the empty set.
    pub fn active_formats(
        &self,
        selection: Selection,
    ) -> Result<BTreeSet<CharFormat>, EngineError> {
        self.validate_selection(&selection)?;

        let mut active = BTreeSet::new();
        if selection.is_caret() {
            return Ok(active);
        }

        for fmt in CharFormat::ALL {
            if self
                .document
                .runs_in(selection.range())
                .all(|run| fmt.is_active_in(&run.attrs))
            {
                active.insert(fmt);
            }
        }
        Ok(active)
    }

    fn validate_selection(&self, selection: &Selection) -> Result<(), EngineError> {
        if selection.start > selection.end {
            return Err(EngineError::InvalidRange {
                start: selection.start,
                end: selection.end,
            });
        }
        if selection.end > self.document.len_chars() {
            return Err(EngineError::RangeOutOfRange {
                start: selection.start,
                end: selection.end,
                len: self.document.len_chars(),
            });
        }
        Ok(())
    }

    fn toggle(
        &mut self,
        selection: Selection,
        is_on: fn(&AttributeSet) -> bool,
        set: fn(&mut AttributeSet, bool),
    ) -> Result<Range<usize>, EngineError> {
        // Uniformly on across every run the selection touches => turn off;
        // off or mixed => turn on uniformly.
        let uniform_on = self
            .document
            .runs_in(selection.range())
            .all(|run| is_on(&run.attrs));
        let turn_on = !uniform_on;

        self.document
            .update_attributes(selection.range(), |attrs| set(attrs, turn_on))?;
        Ok(selection.range())
    }

    fn set_over(
        &mut self,
        selection: Selection,
        edit: impl FnMut(&mut AttributeSet),
    ) -> Result<Range<usize>, EngineError> {
        self.document.update_attributes(selection.range(), edit)?;
        Ok(selection.range())
    }

    fn insert_link(
        &mut self,
        selection: Selection,
        url: String,
        anchor_text: Option<String>,
    ) -> Result<Range<usize>, EngineError> {
        let link = LinkAttr::new(url);

        let linked = match anchor_text {
            Some(anchor) => {
                self.document.replace(selection.range(), &anchor)?;
                selection.start..selection.start + anchor.chars().count()
            }
            None => selection.range(),
        };

        self.document
            .update_attributes(linked.clone(), move |attrs| attrs.link = Some(link.clone()))?;
        Ok(linked)
    }

    fn apply_list(
        &mut self,
        selection: Selection,
        kind: ListKind,
    ) -> Result<Range<usize>, EngineError> {
        let paragraphs = self
            .document
            .paragraph_index()
            .paragraph_ranges(selection.start, selection.end);
        // paragraph_ranges always yields at least one range.
        let first_start = paragraphs[0].start;
        let orig_last_end = paragraphs[paragraphs.len() - 1].end;

        // Rear-to-front so marker edits in one paragraph don't shift the
        // pending paragraph ranges before it.
        let mut total_delta = 0isize;
        for para in paragraphs.iter().rev() {
            total_delta += self.apply_list_to_paragraph(para.clone(), kind)?;
        }

        let changed_end =
            ((orig_last_end as isize + total_delta).max(first_start as isize)) as usize;
        Ok(first_start..changed_end)
    }

    /// Apply or toggle `kind` on one paragraph; returns the net char delta
    /// from marker insertion/removal.
    fn apply_list_to_paragraph(
        &mut self,
        para: Range<usize>,
        kind: ListKind,
    ) -> Result<isize, EngineError> {
        let current_kind = if para.start < self.document.len_chars() {
            self.document
                .attributes_at(para.start)?
                .paragraph_style
                .map(|style| style.list_kind)
                .unwrap_or(ListKind::None)
        } else {
            ListKind::None
        };

        let head = self
            .document
            .slice(para.start..para.end.min(para.start + 16))?;
        let marker = detect_marker(&head);

        if current_kind == kind {
            // Second press of the same list button: clear the list style
            // and strip the marker.
            let mut delta = 0isize;
            let mut end = para.end;
            if let Some((_, marker_len)) = marker {
                self.document.delete(para.start..para.start + marker_len)?;
                delta -= marker_len as isize;
                end -= marker_len;
            }
            if end > para.start {
                self.document.update_attributes(para.start..end, |attrs| {
                    edit_paragraph_style(attrs, |style| style.list_kind = ListKind::None);
                })?;
            }
            return Ok(delta);
        }

        let mut delta = 0isize;
        let mut insert_at_start = true;
        match marker {
            Some((found, marker_len)) if found != kind => {
                // Marker of the other list kind: swap it out.
                self.document.delete(para.start..para.start + marker_len)?;
                delta -= marker_len as isize;
            }
            Some(_) => {
                // Correct marker already present (e.g. imported plain
                // text); don't duplicate it.
                insert_at_start = false;
            }
            None => {}
        }

        if insert_at_start {
            let marker_text = match kind {
                ListKind::Bullet => BULLET_MARKER,
                ListKind::Numbered => NUMBERED_MARKER,
                ListKind::None => "",
            };
            self.document.insert(para.start, marker_text)?;
            delta += marker_text.chars().count() as isize;
        }

        let styled_end = (para.end as isize + delta).max(para.start as isize) as usize;
        if styled_end > para.start {
            self.document
                .update_attributes(para.start..styled_end, |attrs| {
                    edit_paragraph_style(attrs, |style| style.list_kind = kind);
                })?;
        }
        Ok(delta)
    }

    fn adjust_indent(
        &mut self,
        selection: Selection,
        step: f32,
    ) -> Result<Range<usize>, EngineError> {
        self.edit_paragraphs(selection, |style| {
            style.head_indent = (style.head_indent + step).max(0.0);
            style.first_line_indent = (style.first_line_indent + step).max(0.0);
        })
    }

    fn set_alignment(
        &mut self,
        selection: Selection,
        alignment: Alignment,
    ) -> Result<Range<usize>, EngineError> {
        // Alignment is a plain set, never a toggle.
        self.edit_paragraphs(selection, move |style| style.alignment = alignment)
    }

    fn edit_paragraphs(
        &mut self,
        selection: Selection,
        edit: impl Fn(&mut ParagraphStyle),
    ) -> Result<Range<usize>, EngineError> {
        let paragraphs = self
            .document
            .paragraph_index()
            .paragraph_ranges(selection.start, selection.end);
        let first_start = paragraphs[0].start;
        let last_end = paragraphs[paragraphs.len() - 1].end;

        for para in &paragraphs {
            // An empty trailing paragraph has no chars to carry the style.
            if para.is_empty() {
                continue;
            }
            self.document.update_attributes(para.clone(), |attrs| {
                edit_paragraph_style(attrs, &edit);
            })?;
        }
        Ok(first_start..last_end)
    }
}

/// Mutate the paragraph style of `attrs`, dropping it entirely when every
/// field is back at its default so plain runs stay mergeable.
fn edit_paragraph_style(attrs: &mut AttributeSet, edit: impl Fn(&mut ParagraphStyle)) {
    let style = attrs.paragraph_style_mut();
    edit(style);
    if style.is_default() {
        attrs.paragraph_style = None;
    }
}

/// Detect a literal list marker at the start of a paragraph's text.
///
/// Returns the marker's list kind and its char length. Any `N. ` digit
/// prefix is recognized as a numbered marker, so a future renumber pass can
/// find markers the engine did not write itself.
fn detect_marker(text: &str) -> Option<(ListKind, usize)> {
    if text.starts_with(BULLET_MARKER) {
        return Some((ListKind::Bullet, BULLET_MARKER.chars().count()));
    }

    let digits = text.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let tail: String = text.chars().skip(digits).take(2).collect();
        if tail == ". " {
            return Some((ListKind::Numbered, digits + 2));
        }
    }
    None
}
