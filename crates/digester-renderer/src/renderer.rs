//! Generic markdown renderer with pluggable backend.

use std::fmt::Write;
use std::marker::PhantomData;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::backend::RenderBackend;
use crate::state::{CodeBlockState, ImageState, TableState, escape_html};

/// Generic markdown renderer with pluggable backend.
///
/// Uses the [`RenderBackend`] trait to delegate format-specific rendering
/// while handling common elements (tables, lists, inline formatting) generically.
///
/// Raw HTML in the markdown source is passed through unchanged. Message
/// bodies rely on this for mention markers.
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    pending_image: Option<(String, String)>,
    gfm: bool,
    links_in_new_tab: bool,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer with GFM enabled and new-tab links disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(1024),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            pending_image: None,
            gfm: true,
            links_in_new_tab: false,
            _backend: PhantomData,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Open absolute links in a new browsing context (`target="_blank"`).
    #[must_use]
    pub fn with_links_in_new_tab(mut self, enabled: bool) -> Self {
        self.links_in_new_tab = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Create a configured parser for the given markdown text.
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Render markdown text directly using configured parser options.
    pub fn render_markdown(&mut self, markdown: &str) -> String {
        let parser = self.create_parser(markdown);
        self.render(parser)
    }

    /// Render markdown events and return the HTML.
    pub fn render<'a, I>(&mut self, events: I) -> String
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }
        std::mem::take(&mut self.output)
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => B::inline_code(&code, &mut self.output),
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => B::hard_break(&mut self.output),
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => B::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if !self.code.is_active() {
                    self.output.push_str("<p>");
                }
            }
            Tag::Heading { level, .. } => {
                write!(self.output, "<h{}>", heading_level_to_num(level)).unwrap();
            }
            Tag::BlockQuote(_) => B::blockquote_start(&mut self.output),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.output.push_str("<em>"),
            Tag::Strong => self.output.push_str("<strong>"),
            Tag::Strikethrough => self.output.push_str("<del>"),
            Tag::Link {
                dest_url, title, ..
            } => B::link_start(&dest_url, &title, self.links_in_new_tab, &mut self.output),
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text arrives as text events; the tag is written in end_tag
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::Superscript => self.output.push_str("<sup>"),
            Tag::Subscript => self.output.push_str("<sub>"),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if !self.code.is_active() {
                    self.output.push_str("</p>");
                }
            }
            TagEnd::Heading(level) => {
                write!(self.output, "</h{}>", heading_level_to_num(level)).unwrap();
            }
            TagEnd::BlockQuote(_) => B::blockquote_end(&mut self.output),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                B::code_block(lang.as_deref(), &content, &mut self.output);
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    B::image(&src, &alt, &title, &mut self.output);
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.output.push_str("</em>"),
            TagEnd::Strong => self.output.push_str("</strong>"),
            TagEnd::Strikethrough => self.output.push_str("</del>"),
            TagEnd::Link => B::link_end(&mut self.output),
            TagEnd::Superscript => self.output.push_str("</sup>"),
            TagEnd::Subscript => self.output.push_str("</sub>"),
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_newline();
        } else {
            self.output.push('\n');
        }
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::HtmlBackend;

    fn render_html(markdown: &str) -> String {
        MarkdownRenderer::<HtmlBackend>::new().render_markdown(markdown)
    }

    fn render_new_tab(markdown: &str) -> String {
        MarkdownRenderer::<HtmlBackend>::new()
            .with_links_in_new_tab(true)
            .render_markdown(markdown)
    }

    #[test]
    fn test_html_basic_paragraph() {
        assert_eq!(render_html("Hello, world!"), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_bold_paragraph() {
        assert_eq!(render_html("**hello**"), "<p><strong>hello</strong></p>");
    }

    #[test]
    fn test_emphasis() {
        let html = render_html("*italic* and **bold**");
        assert!(html.contains("<em>italic</em>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_nested_emphasis() {
        assert_eq!(
            render_html("*~~**core**~~*"),
            "<p><em><del><strong>core</strong></del></em></p>"
        );
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(render_html("~~deleted~~"), "<p><del>deleted</del></p>");
    }

    #[test]
    fn test_inline_code_escaped() {
        assert_eq!(render_html("`a < b`"), "<p><code>a &lt; b</code></p>");
    }

    #[test]
    fn test_heading() {
        assert_eq!(render_html("## Section"), "<h2>Section</h2>");
    }

    #[test]
    fn test_html_code_block() {
        let html = render_html("```rust\nfn main() {}\n```");
        assert_eq!(
            html,
            r#"<pre><code class="language-rust">fn main() {}
</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_keeps_markers_literal() {
        let html = render_html("```\n**not bold**\n```");
        assert_eq!(html, "<pre><code>**not bold**\n</code></pre>");
    }

    #[test]
    fn test_html_blockquote() {
        assert_eq!(
            render_html("> Note"),
            "<blockquote><p>Note</p></blockquote>"
        );
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(render_html("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_ordered_list() {
        let html = render_html("1. First\n2. Second");
        assert_eq!(html, "<ol><li>First</li><li>Second</li></ol>");
    }

    #[test]
    fn test_ordered_list_custom_start() {
        let html = render_html("3. Third");
        assert_eq!(html, r#"<ol start="3"><li>Third</li></ol>"#);
    }

    #[test]
    fn test_link_default_same_tab() {
        assert_eq!(
            render_html("[Example](https://example.com)"),
            r#"<p><a href="https://example.com">Example</a></p>"#
        );
    }

    #[test]
    fn test_link_new_tab() {
        assert_eq!(
            render_new_tab("[Example](https://example.com)"),
            r#"<p><a href="https://example.com" target="_blank">Example</a></p>"#
        );
    }

    #[test]
    fn test_fragment_link_stays_in_tab() {
        assert_eq!(
            render_new_tab("[Top](#top)"),
            r##"<p><a href="#top">Top</a></p>"##
        );
    }

    #[test]
    fn test_inline_html_passthrough() {
        let html = render_html(r#"<span class="user-mention">@alice</span> says **hi**"#);
        assert_eq!(
            html,
            r#"<p><span class="user-mention">@alice</span> says <strong>hi</strong></p>"#
        );
    }

    #[test]
    fn test_text_escaped() {
        assert_eq!(render_html("a & b"), "<p>a &amp; b</p>");
    }

    #[test]
    fn test_soft_break_preserved() {
        assert_eq!(render_html("line one\nline two"), "<p>line one\nline two</p>");
    }

    #[test]
    fn test_hard_break() {
        assert_eq!(render_html("one  \ntwo"), "<p>one<br>two</p>");
    }

    #[test]
    fn test_html_image() {
        assert_eq!(
            render_html("![Alt text](image.png)"),
            r#"<p><img src="image.png" alt="Alt text"></p>"#
        );
    }

    #[test]
    fn test_html_table() {
        let html = render_html("| A | B |\n|---|--:|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<thead>"));
        assert!(html.contains("<th>A</th>"));
        assert!(html.contains(r#"<td style="text-align: right">2</td>"#));
        assert!(html.contains("</tbody></table>"));
    }

    #[test]
    fn test_task_list_html() {
        let html = render_html("- [ ] Unchecked\n- [x] Checked");
        assert!(html.contains(r#"<input type="checkbox" disabled>"#));
        assert!(html.contains(r#"<input type="checkbox" checked disabled>"#));
    }

    #[test]
    fn test_gfm_disabled() {
        let mut renderer = MarkdownRenderer::<HtmlBackend>::new().with_gfm(false);
        let html = renderer.render_markdown("| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_parser_options_with_gfm() {
        let renderer = MarkdownRenderer::<HtmlBackend>::new();
        let options = renderer.parser_options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_STRIKETHROUGH));
        assert!(options.contains(Options::ENABLE_TASKLISTS));
        assert!(options.contains(Options::ENABLE_GFM));
    }

    #[test]
    fn test_parser_options_without_gfm() {
        let renderer = MarkdownRenderer::<HtmlBackend>::new().with_gfm(false);
        assert_eq!(renderer.parser_options(), Options::empty());
    }

    #[test]
    fn test_renderer_reusable() {
        let mut renderer = MarkdownRenderer::<HtmlBackend>::default();
        assert_eq!(renderer.render_markdown("one"), "<p>one</p>");
        assert_eq!(renderer.render_markdown("two"), "<p>two</p>");
    }

    #[test]
    fn test_create_parser() {
        let renderer = MarkdownRenderer::<HtmlBackend>::new();
        let events: Vec<_> = renderer.create_parser("# Hello").collect();
        assert!(!events.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_html(""), "");
    }
}
