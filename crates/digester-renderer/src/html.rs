//! HTML backend for markdown rendering.
//!
//! Produces HTML5 fragments suitable for storing as message bodies.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::state::escape_html;

/// HTML render backend.
///
/// Produces HTML5 with:
/// - `<pre><code>` for code blocks
/// - `<blockquote>` for blockquotes
/// - `<a>` with `target="_blank"` for absolute links when new-tab links are enabled
/// - `<img>` for images
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        if let Some(lang) = lang {
            write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(content)
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
        }
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn link_start(url: &str, title: &str, new_tab: bool, out: &mut String) {
        write!(out, r#"<a href="{}""#, escape_html(url)).unwrap();
        if !title.is_empty() {
            write!(out, r#" title="{}""#, escape_html(title)).unwrap();
        }
        if new_tab && !is_relative_link(url) {
            out.push_str(r#" target="_blank""#);
        }
        out.push('>');
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    }
}

/// Whether a link stays within the current document or site.
///
/// Fragment links (`#top`), root-relative paths (`/channels`) and explicit
/// relative paths (`./a`, `../b`) are relative. Protocol-relative URLs
/// (`//host/path`) are not.
fn is_relative_link(url: &str) -> bool {
    url.starts_with('#')
        || (url.starts_with('/') && !url.starts_with("//"))
        || url.starts_with("./")
        || url.starts_with("../")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        HtmlBackend::code_block(Some("rust"), "fn main() {}", &mut out);
        assert_eq!(
            out,
            r#"<pre><code class="language-rust">fn main() {}</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let mut out = String::new();
        HtmlBackend::code_block(None, "a < b", &mut out);
        assert_eq!(out, "<pre><code>a &lt; b</code></pre>");
    }

    #[test]
    fn test_blockquote() {
        let mut out = String::new();
        HtmlBackend::blockquote_start(&mut out);
        out.push_str("content");
        HtmlBackend::blockquote_end(&mut out);
        assert_eq!(out, "<blockquote>content</blockquote>");
    }

    #[test]
    fn test_link_new_tab() {
        let mut out = String::new();
        HtmlBackend::link_start("https://example.com", "", true, &mut out);
        assert_eq!(out, r#"<a href="https://example.com" target="_blank">"#);
    }

    #[test]
    fn test_link_same_tab() {
        let mut out = String::new();
        HtmlBackend::link_start("https://example.com", "", false, &mut out);
        assert_eq!(out, r#"<a href="https://example.com">"#);
    }

    #[test]
    fn test_link_with_title() {
        let mut out = String::new();
        HtmlBackend::link_start("https://example.com", "Home", true, &mut out);
        assert_eq!(
            out,
            r#"<a href="https://example.com" title="Home" target="_blank">"#
        );
    }

    #[test]
    fn test_relative_link_stays_in_tab() {
        let mut out = String::new();
        HtmlBackend::link_start("#section", "", true, &mut out);
        assert_eq!(out, r##"<a href="#section">"##);
    }

    #[test]
    fn test_is_relative_link() {
        assert!(is_relative_link("#top"));
        assert!(is_relative_link("/channels/general"));
        assert!(is_relative_link("./page"));
        assert!(is_relative_link("../page"));
        assert!(!is_relative_link("//cdn.example.com/a.png"));
        assert!(!is_relative_link("https://example.com"));
        assert!(!is_relative_link("mailto:someone@example.com"));
    }

    #[test]
    fn test_image() {
        let mut out = String::new();
        HtmlBackend::image("image.png", "Alt text", "", &mut out);
        assert_eq!(out, r#"<img src="image.png" alt="Alt text">"#);
    }

    #[test]
    fn test_image_with_title() {
        let mut out = String::new();
        HtmlBackend::image("image.png", "Alt text", "Image title", &mut out);
        assert_eq!(
            out,
            r#"<img src="image.png" title="Image title" alt="Alt text">"#
        );
    }
}
