//! Markdown to HTML converter with pluggable backends.
//!
//! This crate provides a generic [`MarkdownRenderer`] that turns the
//! intermediate markdown produced for archived messages into HTML using the
//! [`RenderBackend`] trait.
//!
//! # Architecture
//!
//! - [`HtmlBackend`]: Produces HTML5 message bodies, optionally opening
//!   absolute links in a new browsing context
//!
//! Shared functionality (tables, lists, inline formatting) is handled by the
//! generic renderer, while format-specific elements (code blocks, blockquotes,
//! links, images) are delegated to the backend.
//!
//! # Example
//!
//! ```
//! use digester_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let html = MarkdownRenderer::<HtmlBackend>::new()
//!     .with_links_in_new_tab(true)
//!     .render_markdown("**Bold** and [a link](https://example.com)");
//! assert!(html.contains("<strong>Bold</strong>"));
//! assert!(html.contains(r#"target="_blank""#));
//! ```

mod backend;
mod html;
mod renderer;
mod state;

pub use backend::RenderBackend;
pub use html::HtmlBackend;
pub use renderer::MarkdownRenderer;
pub use state::escape_html;
