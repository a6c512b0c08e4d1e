//! Styled text leaves.

use crate::element::Element;
use crate::style::Style;

use super::RenderWarning;

/// Emphasis markers, innermost first.
const MARKERS: [&str; 4] = ["**", "*", "~~", "`"];

/// Render a text leaf with its emphasis markers.
///
/// Markers wrap the text with its edge spaces removed, and the spaces are put
/// back outside the markers: `" hi "` in bold renders as `" **hi** "`.
/// Markdown does not treat `** hi**` as emphasis. Other edge whitespace (tabs,
/// newlines) stays inside the markers. Text that is entirely whitespace is
/// returned unchanged.
///
/// Markers are applied bold, italic, strike, code, each wrapping the previous
/// result, so bold sits innermost and code outermost.
///
/// A non-text element, or a text leaf carrying a list style, renders as an
/// empty string and records a warning.
///
/// # Examples
///
/// ```
/// use digester_blocks::{Element, Style, TextStyle, render_text};
///
/// let element = Element::Text {
///     text: "  hi ".to_owned(),
///     style: Style::Text(TextStyle { bold: true, ..TextStyle::default() }),
/// };
/// let mut warnings = Vec::new();
/// assert_eq!(render_text(&element, &mut warnings), "  **hi** ");
/// ```
pub fn render_text(element: &Element, warnings: &mut Vec<RenderWarning>) -> String {
    let Element::Text { text, style } = element else {
        warnings.push(RenderWarning::NotText {
            kind: element.kind().to_owned(),
        });
        return String::new();
    };

    let Style::Text(style) = style else {
        warnings.push(RenderWarning::ListStyledText);
        return String::new();
    };

    if text.trim().is_empty() {
        return text.clone();
    }

    let core = text.trim_matches(' ');
    let start = text.len() - text.trim_start_matches(' ').len();
    let leading = &text[..start];
    let trailing = &text[start + core.len()..];

    let flags = [style.bold, style.italic, style.strike, style.code];
    let mut styled = core.to_owned();
    for (enabled, marker) in flags.into_iter().zip(MARKERS) {
        if enabled {
            styled = format!("{marker}{styled}{marker}");
        }
    }

    format!("{leading}{styled}{trailing}")
}
