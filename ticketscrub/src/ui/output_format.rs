//! Formatting of status messages written to the terminal.
//!
//! `print_message` takes the writer and a colour switch so callers decide where
//! output goes and tests can capture it without ANSI codes.

use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Kind of status line, which decides prefix and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Warn,
    Error,
}

pub fn print_message<W: Write>(writer: &mut W, kind: MessageKind, message: &str, enable_colors: bool) -> io::Result<()> {
    let line = match kind {
        MessageKind::Success => message.to_string(),
        MessageKind::Warn => format!("Warning: {message}"),
        MessageKind::Error => format!("Error: {message}"),
    };

    if !enable_colors {
        return writeln!(writer, "{line}");
    }
    match kind {
        MessageKind::Success => writeln!(writer, "{}", line.green()),
        MessageKind::Warn => writeln!(writer, "{}", line.yellow()),
        MessageKind::Error => writeln!(writer, "{}", line.red().bold()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(kind: MessageKind, message: &str, colors: bool) -> String {
        let mut buffer = Vec::new();
        print_message(&mut buffer, kind, message, colors).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn plain_output_has_prefixes_only() {
        assert_eq!(render(MessageKind::Success, "saved", false), "saved\n");
        assert_eq!(render(MessageKind::Warn, "odd name", false), "Warning: odd name\n");
        assert_eq!(render(MessageKind::Error, "bad file", false), "Error: bad file\n");
    }

    #[test]
    fn coloured_output_wraps_in_ansi() {
        let out = render(MessageKind::Success, "done", true);
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("done"));
    }
}
