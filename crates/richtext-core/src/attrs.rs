//! Attribute model: character-level and paragraph-level styling data.
//!
//! Attributes are plain data; interpretation (fonts, colors, list markers)
//! belongs to the rendering host. Everything here is serde-serializable so
//! the codec can persist it verbatim.

use serde::{Deserialize, Serialize};

/// Indent step, in layout units, applied per increase/decrease-indent.
pub const INDENT_STEP: f32 = 20.0;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque yellow, the default highlighter color.
    pub const YELLOW: Self = Self::rgb(255, 235, 59);

    /// Create an opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Hyperlink attribute.
///
/// The anchor text is the document text the link attribute covers; only the
/// destination is stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttr {
    /// Link destination.
    pub url: String,
}

impl LinkAttr {
    /// Create a link attribute pointing at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Leading-edge alignment (default).
    #[default]
    Left,
    /// Centered.
    Center,
    /// Trailing-edge alignment.
    Right,
}

/// List membership of a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Not a list item (default).
    #[default]
    None,
    /// Bullet list item, rendered with a literal `"• "` marker.
    Bullet,
    /// Numbered list item, rendered with a literal `"N. "` marker.
    Numbered,
}

/// Paragraph-level style.
///
/// Applied uniformly to whole paragraphs only; the engine widens any
/// sub-paragraph selection before setting these fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Indent of wrapped lines, in layout units. Never negative.
    pub head_indent: f32,
    /// Indent of the first line, in layout units. Never negative.
    pub first_line_indent: f32,
    /// Horizontal alignment.
    pub alignment: Alignment,
    /// List membership.
    pub list_kind: ListKind,
}

impl ParagraphStyle {
    /// Whether every field holds its default value.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// The full attribute set of one styled run.
///
/// Boolean flags cover the binary toggles; optional fields are absent when
/// the attribute is unset. Run coalescing compares whole attribute sets for
/// equality, so two runs merge exactly when every field matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
    /// Bold toggle.
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    /// Italic toggle.
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    /// Underline toggle.
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    /// Strikethrough toggle.
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    /// Background highlight color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<Color>,
    /// Foreground text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,
    /// Font size override, in points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Hyperlink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkAttr>,
    /// Paragraph style. Present only on runs inside styled paragraphs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_style: Option<ParagraphStyle>,
}

impl AttributeSet {
    /// Create an empty (all-default) attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no attribute is set.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Mutable access to the paragraph style, inserting the default if absent.
    pub fn paragraph_style_mut(&mut self) -> &mut ParagraphStyle {
        self.paragraph_style.get_or_insert_with(ParagraphStyle::default)
    }
}

/// Names of the character-scoped attributes, as reported by the
/// active-formats query for toolbar highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharFormat {
    /// Bold is active.
    Bold,
    /// Italic is active.
    Italic,
    /// Underline is active.
    Underline,
    /// Strikethrough is active.
    Strikethrough,
    /// A highlight color is set.
    Highlight,
    /// A text color is set.
    TextColor,
    /// A font size override is set.
    FontSize,
    /// A link is set.
    Link,
}

impl CharFormat {
    /// All character-scoped format names, in query-report order.
    pub const ALL: [CharFormat; 8] = [
        CharFormat::Bold,
        CharFormat::Italic,
        CharFormat::Underline,
        CharFormat::Strikethrough,
        CharFormat::Highlight,
        CharFormat::TextColor,
        CharFormat::FontSize,
        CharFormat::Link,
    ];

    /// Whether this format is active in `attrs`.
    pub fn is_active_in(self, attrs: &AttributeSet) -> bool {
        match self {
            CharFormat::Bold => attrs.bold,
            CharFormat::Italic => attrs.italic,
            CharFormat::Underline => attrs.underline,
            CharFormat::Strikethrough => attrs.strikethrough,
            CharFormat::Highlight => attrs.highlight_color.is_some(),
            CharFormat::TextColor => attrs.text_color.is_some(),
            CharFormat::FontSize => attrs.font_size.is_some(),
            CharFormat::Link => attrs.link.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_attribute_set() {
        let attrs = AttributeSet::new();
        assert!(attrs.is_plain());

        let mut bold = AttributeSet::new();
        bold.bold = true;
        assert!(!bold.is_plain());
    }

    #[test]
    fn test_paragraph_style_default() {
        let style = ParagraphStyle::default();
        assert!(style.is_default());
        assert_eq!(style.alignment, Alignment::Left);
        assert_eq!(style.list_kind, ListKind::None);
        assert_eq!(style.head_indent, 0.0);
    }

    #[test]
    fn test_char_format_activity() {
        let mut attrs = AttributeSet::new();
        attrs.bold = true;
        attrs.link = Some(LinkAttr::new("https://example.com"));

        assert!(CharFormat::Bold.is_active_in(&attrs));
        assert!(CharFormat::Link.is_active_in(&attrs));
        assert!(!CharFormat::Italic.is_active_in(&attrs));
        assert!(!CharFormat::Highlight.is_active_in(&attrs));
    }

    #[test]
    fn test_compact_serialization_skips_defaults() {
        let attrs = AttributeSet::new();
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, "{}");

        let mut styled = AttributeSet::new();
        styled.bold = true;
        let json = serde_json::to_string(&styled).unwrap();
        assert_eq!(json, r#"{"bold":true}"#);
    }
}
