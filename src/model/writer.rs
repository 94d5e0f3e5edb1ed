//! Declaration-source rendering.

use std::fmt::Write;

const INDENT: &str = "  ";

/// Line-oriented text writer with an indentation level.
#[derive(Debug, Default)]
pub struct CodeWriter {
    output: String,
    indent_level: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Write one line at the current indentation.
    pub fn write_line(&mut self, text: &str) {
        let _ = writeln!(self.output, "{}{}", INDENT.repeat(self.indent_level), text);
    }

    pub fn write_hide_comment(&mut self) {
        self.write_line("/* @hide */");
    }

    pub fn finish(self) -> String {
        self.output
    }
}
