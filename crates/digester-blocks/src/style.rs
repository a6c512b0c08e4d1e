//! Element style decoding.
//!
//! The `style` field of a rich text element has two unrelated shapes on the
//! wire: lists carry a bare string (`"ordered"`, `"bullet"`), text leaves carry
//! an object of boolean flags. [`Style::decode`] probes the string shape first,
//! then the object shape, and records which one matched so nothing downstream
//! has to look at the raw JSON again.

use serde::Deserialize;
use serde_json::Value;

use crate::error::DecodeError;

/// Kind of a rich text list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Numbered list (`1. `, `2. `, ...).
    Ordered,
    /// Bulleted list (`- `).
    Unordered,
}

impl ListKind {
    /// Parse a list style string.
    ///
    /// Only `"ordered"` is numbered. Every other value, including Slack's
    /// `"bullet"`, renders as a bulleted list.
    fn parse(s: &str) -> Self {
        if s == "ordered" {
            Self::Ordered
        } else {
            Self::Unordered
        }
    }
}

/// Independent emphasis flags of a text leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub strike: bool,
    pub code: bool,
}

/// Resolved element style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Style of a list container.
    List(ListKind),
    /// Emphasis flags of a text leaf.
    Text(TextStyle),
}

impl Default for Style {
    fn default() -> Self {
        Self::Text(TextStyle::default())
    }
}

impl Style {
    /// Decode a raw `style` value.
    ///
    /// # Examples
    ///
    /// ```
    /// use digester_blocks::{ListKind, Style};
    /// use serde_json::json;
    ///
    /// assert_eq!(Style::decode(&json!("ordered")).unwrap(), Style::List(ListKind::Ordered));
    /// assert!(Style::decode(&json!(42)).is_err());
    /// ```
    pub fn decode(raw: &Value) -> Result<Self, DecodeError> {
        if let Value::String(s) = raw {
            return Ok(Self::List(ListKind::parse(s)));
        }

        // Objects only: serde would also accept a positional array for a struct.
        if raw.is_object()
            && let Ok(text_style) = TextStyle::deserialize(raw)
        {
            return Ok(Self::Text(text_style));
        }

        Err(DecodeError::UnrecognizedStyleShape {
            found: describe(raw).to_owned(),
        })
    }

    /// Whether this is a list style.
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object with non-boolean flags",
    }
}
