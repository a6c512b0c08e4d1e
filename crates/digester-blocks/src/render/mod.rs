//! Rich text tree to markdown and HTML.
//!
//! [`RichTextRenderer`] walks a decoded [`Block`] tree and produces the
//! intermediate markdown, then converts it with [`MarkdownRenderer`].
//!
//! Rendering never fails. Elements that cannot be rendered contribute an empty
//! string and a [`RenderWarning`]; the caller decides whether to log them.

mod container;
mod inline;
mod mention;

use std::fmt;

use digester_renderer::{HtmlBackend, MarkdownRenderer};

use crate::directory::{ChannelDirectory, UserDirectory};
use crate::element::{Block, Element};

pub use inline::render_text;
pub use mention::{render_channel, render_user};

/// How channel mentions are displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelMentions {
    /// `#C0123ABCD`, the raw channel ID.
    #[default]
    Identifier,
    /// `#general`, resolved through a [`ChannelDirectory`]. Unknown channels
    /// fall back to the ID.
    Name,
}

/// Rendering options.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Add `target="_blank"` to absolute links in the HTML output.
    pub links_in_new_tab: bool,
    /// Parse the intermediate markdown with GitHub Flavored Markdown extensions.
    pub gfm: bool,
    /// Channel mention display.
    pub channel_mentions: ChannelMentions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            links_in_new_tab: true,
            gfm: true,
            channel_mentions: ChannelMentions::Identifier,
        }
    }
}

/// Non-fatal problem found while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    /// The text renderer was handed an element that is not a text leaf.
    NotText { kind: String },
    /// A text leaf carries a list style instead of emphasis flags.
    ListStyledText,
    /// The list renderer was handed an element that is not a list.
    NotList { kind: String },
    /// A list carries emphasis flags instead of a list style.
    TextStyledList,
    /// Element type without a renderer.
    UnknownElement { kind: String },
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotText { kind } => write!(f, "element is not text: {kind}"),
            Self::ListStyledText => f.write_str("list style on a text element"),
            Self::NotList { kind } => write!(f, "element is not a list: {kind}"),
            Self::TextStyledList => f.write_str("text style on a list element"),
            Self::UnknownElement { kind } => write!(f, "unknown element type: {kind}"),
        }
    }
}

/// Result of rendering a message body.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Intermediate markdown, trimmed.
    pub markdown: String,
    /// Final HTML.
    pub html: String,
    /// Warnings for elements rendered as empty fragments.
    pub warnings: Vec<RenderWarning>,
}

/// Renders rich text blocks using read-only directories.
///
/// The renderer holds no mutable state, so one instance can be shared by
/// reference across threads rendering different messages.
#[derive(Debug, Clone, Copy)]
pub struct RichTextRenderer<'a> {
    users: &'a UserDirectory,
    channels: Option<&'a ChannelDirectory>,
    options: RenderOptions,
}

impl<'a> RichTextRenderer<'a> {
    /// Create a renderer resolving user mentions through `users`.
    #[must_use]
    pub fn new(users: &'a UserDirectory, options: RenderOptions) -> Self {
        Self {
            users,
            channels: None,
            options,
        }
    }

    /// Set the channel directory used when channel mentions display names.
    #[must_use]
    pub fn with_channels(mut self, channels: &'a ChannelDirectory) -> Self {
        self.channels = Some(channels);
        self
    }

    /// Render blocks to markdown and HTML.
    pub fn render(&self, blocks: &[Block]) -> RenderResult {
        let mut warnings = Vec::new();
        let markdown = self.render_markdown(blocks, &mut warnings);
        let html = MarkdownRenderer::<HtmlBackend>::new()
            .with_gfm(self.options.gfm)
            .with_links_in_new_tab(self.options.links_in_new_tab)
            .render_markdown(&markdown);

        RenderResult {
            markdown,
            html,
            warnings,
        }
    }

    /// Render blocks to markdown.
    ///
    /// Blocks are separated by a blank line and the result is trimmed.
    pub fn render_markdown(&self, blocks: &[Block], warnings: &mut Vec<RenderWarning>) -> String {
        let joined = blocks
            .iter()
            .map(|block| self.render_block(block, warnings))
            .collect::<Vec<_>>()
            .join("\n\n");
        joined.trim().to_owned()
    }

    /// Concatenate the rendered elements of one block.
    pub fn render_block(&self, block: &Block, warnings: &mut Vec<RenderWarning>) -> String {
        self.render_children(&block.elements, warnings)
    }

    /// Render one element, dispatching on its type.
    pub fn render_element(&self, element: &Element, warnings: &mut Vec<RenderWarning>) -> String {
        match element {
            Element::Text { .. } => render_text(element, warnings),
            Element::Emoji { name } => format!(":{name}:"),
            Element::User { user_id } => render_user(user_id, self.users),
            Element::Channel { channel_id } => render_channel(channel_id, self.channel_names()),
            Element::Link { text, url } => format!("[{text}]({url})"),
            Element::Section { elements } => self.render_children(elements, warnings),
            Element::List { .. } => self.render_list(element, warnings),
            Element::Quote { elements, .. } => self.render_quote(elements, warnings),
            Element::Preformatted { elements } => self.render_preformatted(elements, warnings),
            Element::Unknown { kind } => {
                warnings.push(RenderWarning::UnknownElement { kind: kind.clone() });
                String::new()
            }
        }
    }

    /// Concatenate rendered elements without separators.
    fn render_children(&self, elements: &[Element], warnings: &mut Vec<RenderWarning>) -> String {
        elements
            .iter()
            .map(|element| self.render_element(element, warnings))
            .collect()
    }

    /// Channel directory to resolve names with, if names are enabled.
    fn channel_names(&self) -> Option<&'a ChannelDirectory> {
        match self.options.channel_mentions {
            ChannelMentions::Identifier => None,
            ChannelMentions::Name => self.channels,
        }
    }
}
