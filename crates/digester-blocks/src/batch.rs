//! Rendering a channel's worth of messages.

use serde::Serialize;

use crate::error::DecodeError;
use crate::message::Message;
use crate::render::RichTextRenderer;

/// Default element nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// What to do with a message whose blocks cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Stop at the first failure.
    #[default]
    Abort,
    /// Log the failure, leave the message out and continue.
    Skip,
}

/// Batch rendering settings.
#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    pub policy: DecodePolicy,
    /// Element nesting limit passed to the decoder.
    pub max_depth: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            policy: DecodePolicy::Abort,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Decode failure that aborted a batch.
#[derive(Debug, thiserror::Error)]
#[error("message {index} (ts {ts}) could not be decoded: {source}")]
pub struct BatchError {
    /// Position of the message in the input.
    pub index: usize,
    /// Timestamp of the message.
    pub ts: String,
    #[source]
    pub source: DecodeError,
}

/// A rendered message, ready for storage.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedMessage {
    pub ts: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_user_id: Option<String>,
    pub markdown: String,
    pub html: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Result of a batch render.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Rendered messages in input order.
    pub rendered: Vec<RenderedMessage>,
    /// Number of messages left out under [`DecodePolicy::Skip`].
    pub skipped: usize,
}

/// Decode and render messages in order.
///
/// Render warnings never fail the batch; they are logged and attached to the
/// rendered message. Decode failures follow `config.policy`.
///
/// # Errors
///
/// Returns [`BatchError`] for the first undecodable message under
/// [`DecodePolicy::Abort`].
pub fn render_messages(
    renderer: &RichTextRenderer<'_>,
    messages: &[Message],
    config: &BatchConfig,
) -> Result<BatchOutcome, BatchError> {
    let mut outcome = BatchOutcome::default();

    for (index, message) in messages.iter().enumerate() {
        let blocks = match message.decode_blocks(config.max_depth) {
            Ok(blocks) => blocks,
            Err(source) => match config.policy {
                DecodePolicy::Abort => {
                    return Err(BatchError {
                        index,
                        ts: message.ts.clone(),
                        source,
                    });
                }
                DecodePolicy::Skip => {
                    tracing::warn!(
                        index,
                        ts = %message.ts,
                        error = %source,
                        "Skipping undecodable message"
                    );
                    outcome.skipped += 1;
                    continue;
                }
            },
        };

        let result = renderer.render(&blocks);
        for warning in &result.warnings {
            tracing::warn!(ts = %message.ts, warning = %warning, "Rendered with warning");
        }

        outcome.rendered.push(RenderedMessage {
            ts: message.ts.clone(),
            user: message.user.clone(),
            thread_ts: message.thread_ts.clone(),
            parent_user_id: message.parent_user_id.clone(),
            markdown: result.markdown,
            html: result.html,
            warnings: result.warnings.iter().map(ToString::to_string).collect(),
        });
    }

    tracing::debug!(
        rendered = outcome.rendered.len(),
        skipped = outcome.skipped,
        "Batch render completed"
    );

    Ok(outcome)
}
