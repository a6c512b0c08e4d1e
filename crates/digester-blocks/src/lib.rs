//! Slack rich text blocks to markdown and HTML.
//!
//! Messages in a Slack export carry their formatted body as an array of
//! `rich_text` blocks: a tree of sections, lists, quotes, code blocks and
//! styled text leaves. This crate decodes that tree and renders it to
//! markdown, then to HTML through [`digester_renderer`].
//!
//! # Pipeline
//!
//! 1. [`decode_blocks`] builds a typed [`Block`] tree. The ambiguous `style`
//!    field is resolved once into a [`Style`]; malformed styles and overly
//!    deep trees fail with a [`DecodeError`].
//! 2. [`RichTextRenderer`] walks the tree. Recoverable problems (an unknown
//!    element type, a list without a list style) render as empty fragments and
//!    are reported as [`RenderWarning`]s in the [`RenderResult`].
//! 3. [`render_messages`] applies the above to a batch of export messages
//!    under a [`DecodePolicy`].
//!
//! # Example
//!
//! ```
//! use digester_blocks::{RenderOptions, RichTextRenderer, UserDirectory, decode_blocks};
//! use serde_json::json;
//!
//! let blocks = decode_blocks(
//!     &json!([{
//!         "type": "rich_text",
//!         "elements": [{
//!             "type": "rich_text_section",
//!             "elements": [{"type": "text", "text": "hello", "style": {"bold": true}}]
//!         }]
//!     }]),
//!     32,
//! )
//! .unwrap();
//!
//! let users = UserDirectory::new();
//! let result = RichTextRenderer::new(&users, RenderOptions::default()).render(&blocks);
//! assert_eq!(result.markdown, "**hello**");
//! assert_eq!(result.html, "<p><strong>hello</strong></p>");
//! ```

mod batch;
mod directory;
mod element;
mod error;
mod message;
mod render;
mod style;

pub use batch::{
    BatchConfig, BatchError, BatchOutcome, DEFAULT_MAX_DEPTH, DecodePolicy, RenderedMessage,
    render_messages,
};
pub use directory::{ChannelDirectory, ChannelRecord, UserDirectory, UserRecord};
pub use element::{Block, Element, decode_blocks};
pub use error::DecodeError;
pub use message::Message;
pub use render::{
    ChannelMentions, RenderOptions, RenderResult, RenderWarning, RichTextRenderer,
    render_channel, render_text, render_user,
};
pub use style::{ListKind, Style, TextStyle};
