//! Lists, quotes and preformatted blocks.

use std::fmt::Write;

use crate::element::Element;
use crate::style::{ListKind, Style};

use super::mention::{channel_label, user_label};
use super::{RenderWarning, RichTextRenderer};

impl RichTextRenderer<'_> {
    /// Render a list, one line per child.
    ///
    /// Each line is built from the inside out: the item marker (`N. ` or
    /// `- `), then `indent` × 3 spaces, then `border` × `>` and a space. Items
    /// under a border are followed by a blank line. The output starts with a
    /// newline so the list never continues a preceding paragraph line.
    pub(super) fn render_list(
        &self,
        element: &Element,
        warnings: &mut Vec<RenderWarning>,
    ) -> String {
        let Element::List {
            elements,
            style,
            indent,
            border,
        } = element
        else {
            warnings.push(RenderWarning::NotList {
                kind: element.kind().to_owned(),
            });
            return String::new();
        };

        let Style::List(kind) = style else {
            warnings.push(RenderWarning::TextStyledList);
            return String::new();
        };

        let quote_prefix = if *border > 0 {
            format!("{} ", ">".repeat(*border))
        } else {
            String::new()
        };
        let indentation = " ".repeat(indent * 3);

        let mut out = String::from("\n");
        for (index, item) in elements.iter().enumerate() {
            out.push_str(&quote_prefix);
            out.push_str(&indentation);
            match kind {
                ListKind::Ordered => write!(out, "{}. ", index + 1).unwrap(),
                ListKind::Unordered => out.push_str("- "),
            }
            out.push_str(&self.render_element(item, warnings));
            out.push('\n');
            if *border > 0 {
                out.push('\n');
            }
        }
        out
    }

    /// Render a block quote.
    ///
    /// Every newline in the rendered children is followed by `> `, so a quote
    /// nested in a quote gains one marker per level as the tree unwinds.
    pub(super) fn render_quote(
        &self,
        elements: &[Element],
        warnings: &mut Vec<RenderWarning>,
    ) -> String {
        let content = self.render_children(elements, warnings);
        format!("> {}\n\n", content.replace('\n', "\n> "))
    }

    /// Render a fenced code block.
    ///
    /// Children are rendered verbatim: no emphasis markers, no mention spans.
    pub(super) fn render_preformatted(
        &self,
        elements: &[Element],
        warnings: &mut Vec<RenderWarning>,
    ) -> String {
        let mut content = String::new();
        for element in elements {
            self.render_verbatim(element, &mut content, warnings);
        }
        format!("```\n{content}\n```")
    }

    fn render_verbatim(
        &self,
        element: &Element,
        out: &mut String,
        warnings: &mut Vec<RenderWarning>,
    ) {
        match element {
            Element::Text { text, .. } => out.push_str(text),
            Element::Emoji { name } => write!(out, ":{name}:").unwrap(),
            Element::User { user_id } => out.push_str(&user_label(user_id, self.users)),
            Element::Channel { channel_id } => {
                out.push_str(&channel_label(channel_id, self.channel_names()));
            }
            Element::Link { text, url } => {
                out.push_str(if text.is_empty() { url } else { text });
            }
            Element::Section { elements }
            | Element::List { elements, .. }
            | Element::Quote { elements, .. }
            | Element::Preformatted { elements } => {
                for child in elements {
                    self.render_verbatim(child, out, warnings);
                }
            }
            Element::Unknown { kind } => {
                warnings.push(RenderWarning::UnknownElement { kind: kind.clone() });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::directory::UserDirectory;
    use crate::render::RenderOptions;
    use crate::style::TextStyle;

    fn text(s: &str) -> Element {
        Element::Text {
            text: s.to_owned(),
            style: Style::default(),
        }
    }

    fn bold(s: &str) -> Element {
        Element::Text {
            text: s.to_owned(),
            style: Style::Text(TextStyle {
                bold: true,
                ..TextStyle::default()
            }),
        }
    }

    fn section(elements: Vec<Element>) -> Element {
        Element::Section { elements }
    }

    fn list(kind: ListKind, indent: usize, border: usize, items: &[&str]) -> Element {
        Element::List {
            elements: items.iter().map(|item| section(vec![text(item)])).collect(),
            style: Style::List(kind),
            indent,
            border,
        }
    }

    fn render(element: &Element) -> (String, Vec<RenderWarning>) {
        let mut users = UserDirectory::new();
        users.insert("U01", "alice");
        let renderer = RichTextRenderer::new(&users, RenderOptions::default());
        let mut warnings = Vec::new();
        let out = renderer.render_element(element, &mut warnings);
        (out, warnings)
    }

    #[test]
    fn test_unordered_list() {
        let (out, warnings) = render(&list(ListKind::Unordered, 0, 0, &["a", "b"]));
        assert_eq!(out, "\n- a\n- b\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_ordered_list_numbers_from_one() {
        let (out, _) = render(&list(ListKind::Ordered, 0, 0, &["a", "b", "c"]));
        assert_eq!(out, "\n1. a\n2. b\n3. c\n");
    }

    #[test]
    fn test_list_indent() {
        let (out, _) = render(&list(ListKind::Unordered, 2, 0, &["a"]));
        assert_eq!(out, "\n      - a\n");
    }

    #[test]
    fn test_list_border() {
        let (out, _) = render(&list(ListKind::Ordered, 1, 2, &["a", "b"]));
        assert_eq!(out, "\n>>    1. a\n\n>>    2. b\n\n");
    }

    #[test]
    fn test_empty_list() {
        let (out, _) = render(&list(ListKind::Unordered, 0, 0, &[]));
        assert_eq!(out, "\n");
    }

    #[test]
    fn test_list_with_text_style_warns() {
        let element = Element::List {
            elements: vec![text("a")],
            style: Style::default(),
            indent: 0,
            border: 0,
        };
        let (out, warnings) = render(&element);
        assert_eq!(out, "");
        assert_eq!(warnings, vec![RenderWarning::TextStyledList]);
    }

    #[test]
    fn test_render_list_on_non_list_warns() {
        let users = UserDirectory::new();
        let renderer = RichTextRenderer::new(&users, RenderOptions::default());
        let mut warnings = Vec::new();
        assert_eq!(renderer.render_list(&text("x"), &mut warnings), "");
        assert_eq!(
            warnings,
            vec![RenderWarning::NotList {
                kind: "text".to_owned()
            }]
        );
    }

    #[test]
    fn test_list_items_keep_styling() {
        let element = Element::List {
            elements: vec![section(vec![bold("a")])],
            style: Style::List(ListKind::Unordered),
            indent: 0,
            border: 0,
        };
        let (out, _) = render(&element);
        assert_eq!(out, "\n- **a**\n");
    }

    #[test]
    fn test_quote_single_line() {
        let element = Element::Quote {
            elements: vec![text("hi")],
            indent: 0,
            border: 0,
        };
        let (out, _) = render(&element);
        assert_eq!(out, "> hi\n\n");
    }

    #[test]
    fn test_quote_multiline() {
        let element = Element::Quote {
            elements: vec![text("a\nb")],
            indent: 0,
            border: 0,
        };
        let (out, _) = render(&element);
        assert_eq!(out, "> a\n> b\n\n");
    }

    #[test]
    fn test_nested_quote_deepens_markers() {
        let element = Element::Quote {
            elements: vec![Element::Quote {
                elements: vec![text("deep")],
                indent: 0,
                border: 0,
            }],
            indent: 0,
            border: 0,
        };
        let (out, _) = render(&element);
        assert_eq!(out, "> > deep\n> \n> \n\n");
    }

    #[test]
    fn test_preformatted() {
        let element = Element::Preformatted {
            elements: vec![text("let x = 1;")],
        };
        let (out, _) = render(&element);
        assert_eq!(out, "```\nlet x = 1;\n```");
    }

    #[test]
    fn test_preformatted_multiline_single_fence() {
        let element = Element::Preformatted {
            elements: vec![text("a\n\nb\n")],
        };
        let (out, _) = render(&element);
        assert_eq!(out, "```\na\n\nb\n\n```");
        assert_eq!(out.matches("```").count(), 2);
    }

    #[test]
    fn test_preformatted_children_are_verbatim() {
        let element = Element::Preformatted {
            elements: vec![
                bold("*raw*"),
                text(" "),
                Element::User {
                    user_id: "U01".to_owned(),
                },
                text(" "),
                Element::Channel {
                    channel_id: "C01".to_owned(),
                },
                text(" "),
                Element::Link {
                    text: String::new(),
                    url: "https://example.com".to_owned(),
                },
                text(" "),
                Element::Emoji {
                    name: "ok".to_owned(),
                },
            ],
        };
        let (out, warnings) = render(&element);
        assert_eq!(
            out,
            "```\n*raw* @alice #C01 https://example.com :ok:\n```"
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_preformatted_unknown_child_warns() {
        let element = Element::Preformatted {
            elements: vec![
                text("a"),
                Element::Unknown {
                    kind: "date".to_owned(),
                },
            ],
        };
        let (out, warnings) = render(&element);
        assert_eq!(out, "```\na\n```");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_list_inside_quote() {
        let element = Element::Quote {
            elements: vec![text("intro"), list(ListKind::Unordered, 0, 0, &["a"])],
            indent: 0,
            border: 0,
        };
        let (out, _) = render(&element);
        assert_eq!(out, "> intro\n> - a\n> \n\n");
    }
}
