//! Human-readable diagnostics for heating decisions.
//!
//! A [`Diagnostics`] sink receives one message per filtering verdict and
//! one for the aggregate outcome. It is purely observational: evaluation
//! never inspects what the sink did.

use std::io::Write;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Receiver of diagnostic messages.
pub trait Diagnostics {
    fn emit(&self, message: &str);
}

/// Greedy word wrapper with separate first-line and continuation indents.
///
/// Runs of whitespace (including newlines) collapse to a single space.
/// Words longer than a whole line are split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextWrapper {
    pub width: usize,
    pub initial_indent: String,
    pub subsequent_indent: String,
}

impl Default for TextWrapper {
    fn default() -> Self {
        Self::new(80, 4, 8)
    }
}

impl TextWrapper {
    /// Wrapper with `width` columns and space indents of the given sizes.
    pub fn new(width: usize, initial_indent: usize, subsequent_indent: usize) -> Self {
        Self {
            width,
            initial_indent: " ".repeat(initial_indent),
            subsequent_indent: " ".repeat(subsequent_indent),
        }
    }

    /// Wrap `text` into lines no wider than `width` (indent included),
    /// except where an indent alone already exceeds the width.
    pub fn wrap(&self, text: &str) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in text.split_whitespace() {
            let mut rest: Vec<char> = word.chars().collect();

            while !rest.is_empty() {
                let indent = self.indent_for(lines.len());
                let avail = self.width.saturating_sub(indent.chars().count()).max(1);
                let needed = if current_len == 0 { rest.len() } else { current_len + 1 + rest.len() };

                if needed <= avail {
                    if current_len > 0 {
                        current.push(' ');
                        current_len += 1;
                    }
                    current.extend(rest.iter());
                    current_len += rest.len();
                    rest.clear();
                } else if rest.len() > avail {
                    // Word can never fit on a line of its own: split it,
                    // filling what is left of the current line first.
                    let space_left = if current_len == 0 {
                        avail
                    } else {
                        avail.saturating_sub(current_len + 1)
                    };
                    if space_left > 0 {
                        if current_len > 0 {
                            current.push(' ');
                        }
                        current.extend(rest.drain(..space_left));
                    }
                    lines.push(format!("{indent}{current}"));
                    current.clear();
                    current_len = 0;
                } else {
                    lines.push(format!("{indent}{current}"));
                    current.clear();
                    current_len = 0;
                }
            }
        }

        if current_len > 0 {
            let indent = self.indent_for(lines.len());
            lines.push(format!("{indent}{current}"));
        }
        lines
    }

    /// [`wrap`](Self::wrap) joined with newlines.
    pub fn fill(&self, text: &str) -> String {
        self.wrap(text).join("\n")
    }

    fn indent_for(&self, line_index: usize) -> &str {
        if line_index == 0 {
            &self.initial_indent
        } else {
            &self.subsequent_indent
        }
    }
}

/// Writes every message, wrapped, as lines to `W`.
///
/// Write failures are dropped.
pub struct WrappedWriter<W: Write> {
    wrapper: TextWrapper,
    out: Mutex<W>,
}

impl<W: Write> WrappedWriter<W> {
    pub fn new(wrapper: TextWrapper, out: W) -> Self {
        Self {
            wrapper,
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl WrappedWriter<std::io::Stdout> {
    pub fn stdout(wrapper: TextWrapper) -> Self {
        Self::new(wrapper, std::io::stdout())
    }
}

impl WrappedWriter<std::io::Stderr> {
    pub fn stderr(wrapper: TextWrapper) -> Self {
        Self::new(wrapper, std::io::stderr())
    }
}

impl<W: Write> Diagnostics for WrappedWriter<W> {
    fn emit(&self, message: &str) {
        let filled = self.wrapper.fill(message);
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{filled}");
        }
    }
}

/// Keeps every message in memory, unwrapped.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn emit(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_gets_initial_indent_only() {
        let wrapper = TextWrapper::new(80, 4, 8);
        assert_eq!(wrapper.fill("Heating needed"), "    Heating needed");
    }

    #[test]
    fn newlines_collapse_to_spaces() {
        let wrapper = TextWrapper::new(80, 0, 4);
        assert_eq!(
            wrapper.fill("Found event Cold with !cold! in description:\nThis event is !cold!."),
            "Found event Cold with !cold! in description: This event is !cold!."
        );
    }

    #[test]
    fn wraps_on_word_boundaries_with_continuation_indent() {
        let wrapper = TextWrapper::new(20, 2, 4);
        let lines = wrapper.wrap("alpha beta gamma delta epsilon zeta");
        assert_eq!(lines, vec!["  alpha beta gamma", "    delta epsilon", "    zeta"]);
        assert!(lines.iter().all(|line| line.chars().count() <= 20));
    }

    #[test]
    fn splits_words_longer_than_a_line() {
        let wrapper = TextWrapper::new(10, 0, 2);
        let lines = wrapper.wrap("ab abcdefghijklmnop");
        assert_eq!(lines, vec!["ab abcdefg", "  hijklmno", "  p"]);
    }

    #[test]
    fn empty_text_produces_no_lines() {
        assert!(TextWrapper::default().wrap("   \n ").is_empty());
        assert_eq!(TextWrapper::default().fill(""), "");
    }

    #[test]
    fn wrapped_writer_emits_one_block_per_message() {
        let writer = WrappedWriter::new(TextWrapper::new(80, 0, 4), Vec::new());
        writer.emit("Found event that needs heating: Noon");
        writer.emit("Heating needed");
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "Found event that needs heating: Noon\nHeating needed\n");
    }

    #[test]
    fn collecting_diagnostics_keeps_order() {
        let sink = CollectingDiagnostics::new();
        sink.emit("first");
        sink.emit("second");
        assert_eq!(sink.messages(), vec!["first", "second"]);
    }
}
