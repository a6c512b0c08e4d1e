//! Slack export message records.

use serde::Deserialize;
use serde_json::Value;

use crate::element::{Block, Element, decode_blocks};
use crate::error::DecodeError;
use crate::style::Style;

/// One message from a channel's daily export file.
///
/// `blocks` is kept as raw JSON so a schema mismatch in one message can be
/// handled by the caller instead of failing the whole file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    /// Author user ID. Absent for some bot messages.
    #[serde(default)]
    pub user: Option<String>,
    /// Message timestamp, unique within a channel.
    pub ts: String,
    /// Plain text fallback body.
    #[serde(default)]
    pub text: String,
    /// Timestamp of the thread parent, for thread messages.
    #[serde(default)]
    pub thread_ts: Option<String>,
    #[serde(default)]
    pub parent_user_id: Option<String>,
    #[serde(default)]
    pub blocks: Option<Value>,
}

impl Message {
    /// Decode the message body.
    ///
    /// A message without `blocks` falls back to its plain `text` as a single
    /// unstyled text element. A message with neither has an empty body.
    pub fn decode_blocks(&self, max_depth: usize) -> Result<Vec<Block>, DecodeError> {
        match &self.blocks {
            Some(value) if !value.is_null() => decode_blocks(value, max_depth),
            _ if self.text.is_empty() => Ok(Vec::new()),
            _ => Ok(vec![Block {
                kind: "rich_text".to_owned(),
                elements: vec![Element::Text {
                    text: self.text.clone(),
                    style: Style::default(),
                }],
            }]),
        }
    }
}
