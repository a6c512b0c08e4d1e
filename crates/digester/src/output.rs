//! Render and check summaries for the terminal.
//!
//! Summaries are built as [`Line`] values first and written by a [`Reporter`]
//! afterwards, so the wording can be tested without a terminal.

use std::path::Path;

use console::{Style, Term};
use digester_blocks::{BatchOutcome, DecodeError, Message};

/// One summary line and its severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line {
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
}

/// Summary of a finished batch render.
pub(crate) fn batch_lines(outcome: &BatchOutcome, destination: Option<&Path>) -> Vec<Line> {
    let warned = outcome
        .rendered
        .iter()
        .filter(|message| !message.warnings.is_empty())
        .count();

    let mut lines = vec![Line::Success(format!(
        "Rendered {} messages",
        outcome.rendered.len()
    ))];
    if warned > 0 {
        lines.push(Line::Warning(format!(
            "{warned} messages rendered with warnings"
        )));
    }
    if outcome.skipped > 0 {
        lines.push(Line::Warning(format!(
            "Skipped {} undecodable messages",
            outcome.skipped
        )));
    }
    if let Some(path) = destination {
        lines.push(Line::Info(format!("Output: {}", path.display())));
    }
    lines
}

/// Line for a message whose blocks failed to decode.
pub(crate) fn decode_failure_line(index: usize, message: &Message, err: &DecodeError) -> Line {
    Line::Error(format!("message {index} (ts {}): {err}", message.ts))
}

/// Closing line of a check run. A run with failures has none; the command
/// returns an error instead.
pub(crate) fn check_line(total: usize, failures: usize) -> Option<Line> {
    (failures == 0).then(|| Line::Success(format!("All {total} messages decoded")))
}

/// Writes summary lines to stderr, colored by severity.
///
/// Stderr keeps rendered JSON on stdout machine-readable.
pub(crate) struct Reporter {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Reporter {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Write one line.
    pub(crate) fn emit(&self, line: &Line) {
        let text = match line {
            Line::Info(msg) => msg.clone(),
            Line::Success(msg) => self.green.apply_to(msg).to_string(),
            Line::Warning(msg) => self.yellow.apply_to(msg).to_string(),
            Line::Error(msg) => self.red.apply_to(msg).to_string(),
        };
        let _ = self.term.write_line(&text);
    }

    /// Write lines in order.
    pub(crate) fn emit_all(&self, lines: &[Line]) {
        for line in lines {
            self.emit(line);
        }
    }

    /// Report the error that ended a command.
    pub(crate) fn fatal(&self, err: &impl std::fmt::Display) {
        self.emit(&Line::Error(format!("Error: {err}")));
    }
}
