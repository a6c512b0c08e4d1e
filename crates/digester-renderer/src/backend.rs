//! Backend trait for format-specific rendering.

use std::fmt::Write;

use crate::state::escape_html;

/// Format-specific rendering hooks used by [`MarkdownRenderer`](crate::MarkdownRenderer).
///
/// The generic renderer walks the pulldown-cmark event stream and emits the
/// markup every output format shares. Elements whose representation differs
/// between formats are delegated to the backend.
pub trait RenderBackend {
    /// Render a fenced or indented code block.
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Open a blockquote.
    fn blockquote_start(out: &mut String);

    /// Close a blockquote.
    fn blockquote_end(out: &mut String);

    /// Open a hyperlink.
    ///
    /// `new_tab` is set when the renderer was configured to open links in a
    /// new browsing context.
    fn link_start(url: &str, title: &str, new_tab: bool, out: &mut String);

    /// Close a hyperlink.
    fn link_end(out: &mut String) {
        out.push_str("</a>");
    }

    /// Render an image with its collected alt text.
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Render a hard line break.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a thematic break.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list checkbox.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled>"#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled>"#);
        }
    }

    /// Render inline code.
    fn inline_code(code: &str, out: &mut String) {
        write!(out, "<code>{}</code>", escape_html(code)).unwrap();
    }
}
