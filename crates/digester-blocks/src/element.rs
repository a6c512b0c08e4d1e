//! Rich text block tree.

use serde::Deserialize;
use serde_json::Value;

use crate::error::DecodeError;
use crate::style::Style;

/// Top-level rich text block of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Block type discriminant (`rich_text` for formatted message bodies).
    pub kind: String,
    /// Ordered child elements.
    pub elements: Vec<Element>,
}

/// Node of the rich text tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Styled run of text.
    Text { text: String, style: Style },
    /// Emoji shortcode.
    Emoji { name: String },
    /// User mention.
    User { user_id: String },
    /// Channel mention.
    Channel { channel_id: String },
    /// Hyperlink.
    Link { text: String, url: String },
    /// Generic grouping of inline elements.
    Section { elements: Vec<Element> },
    /// Ordered or bulleted list; each child is one item.
    List {
        elements: Vec<Element>,
        style: Style,
        indent: usize,
        border: usize,
    },
    /// Block quote.
    Quote {
        elements: Vec<Element>,
        indent: usize,
        border: usize,
    },
    /// Preformatted code block.
    Preformatted { elements: Vec<Element> },
    /// Element type this crate does not know how to render.
    Unknown { kind: String },
}

impl Element {
    /// Wire type tag of the element.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Text { .. } => "text",
            Self::Emoji { .. } => "emoji",
            Self::User { .. } => "user",
            Self::Channel { .. } => "channel",
            Self::Link { .. } => "link",
            Self::Section { .. } => "rich_text_section",
            Self::List { .. } => "rich_text_list",
            Self::Quote { .. } => "rich_text_quote",
            Self::Preformatted { .. } => "rich_text_preformatted",
            Self::Unknown { kind } => kind.as_str(),
        }
    }

    /// Child elements of a container, empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        match self {
            Self::Section { elements }
            | Self::List { elements, .. }
            | Self::Quote { elements, .. }
            | Self::Preformatted { elements } => elements,
            _ => &[],
        }
    }
}

/// Element as it appears on the wire: one flat record for every type.
#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    elements: Vec<RawElement>,
    #[serde(default)]
    text: String,
    /// An explicit `null` deserializes to `None`, the same as an absent style.
    #[serde(default)]
    style: Option<Value>,
    #[serde(default)]
    indent: usize,
    #[serde(default)]
    border: usize,
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    channel_id: String,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    elements: Vec<RawElement>,
}

/// Decode a JSON block array into a typed tree.
///
/// `max_depth` bounds element nesting; top-level elements of a block are at
/// depth 1. Deeper trees fail with [`DecodeError::NestingTooDeep`].
///
/// # Errors
///
/// Returns [`DecodeError::Json`] if the value is not an array of blocks,
/// [`DecodeError::UnrecognizedStyleShape`] if any element carries a malformed
/// style, and [`DecodeError::NestingTooDeep`] as described above.
pub fn decode_blocks(value: &Value, max_depth: usize) -> Result<Vec<Block>, DecodeError> {
    let raw = Vec::<RawBlock>::deserialize(value)?;
    raw.into_iter()
        .map(|block| {
            Ok(Block {
                kind: block.kind,
                elements: convert_all(block.elements, 1, max_depth)?,
            })
        })
        .collect()
}

fn convert_all(
    raw: Vec<RawElement>,
    depth: usize,
    max_depth: usize,
) -> Result<Vec<Element>, DecodeError> {
    raw.into_iter()
        .map(|element| convert(element, depth, max_depth))
        .collect()
}

fn convert(raw: RawElement, depth: usize, max_depth: usize) -> Result<Element, DecodeError> {
    if depth > max_depth {
        return Err(DecodeError::NestingTooDeep { limit: max_depth });
    }

    // Every element's style is decoded, even where it is not rendered, so a
    // schema mismatch anywhere in the tree is caught.
    let style = match &raw.style {
        Some(value) => Style::decode(value)?,
        None => Style::default(),
    };

    let element = match raw.kind.as_str() {
        "text" => Element::Text {
            text: raw.text,
            style,
        },
        "emoji" => Element::Emoji { name: raw.name },
        "user" => Element::User {
            user_id: raw.user_id,
        },
        "channel" => Element::Channel {
            channel_id: raw.channel_id,
        },
        "link" => Element::Link {
            text: raw.text,
            url: raw.url,
        },
        "rich_text_section" | "section" => Element::Section {
            elements: convert_all(raw.elements, depth + 1, max_depth)?,
        },
        "rich_text_list" | "list" => Element::List {
            elements: convert_all(raw.elements, depth + 1, max_depth)?,
            style,
            indent: raw.indent,
            border: raw.border,
        },
        "rich_text_quote" | "quote" => Element::Quote {
            elements: convert_all(raw.elements, depth + 1, max_depth)?,
            indent: raw.indent,
            border: raw.border,
        },
        "rich_text_preformatted" | "preformatted" => Element::Preformatted {
            elements: convert_all(raw.elements, depth + 1, max_depth)?,
        },
        _ => Element::Unknown { kind: raw.kind },
    };

    Ok(element)
}
