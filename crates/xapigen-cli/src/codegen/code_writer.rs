//! Indentation-tracking writer used by the unit renderer.
//!
//! ```
//! use xapigen_cli::codegen::code_writer::CodeWriter;
//!
//! let mut out = String::new();
//! let mut w = CodeWriter::new(&mut out);
//! w.block("impl VM", |w| w.writeln("pub fn noop(&self) {}")).unwrap();
//! assert_eq!(out, "impl VM {\n    pub fn noop(&self) {}\n}\n");
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

const INDENT: &str = "    ";

/// A writer that prefixes every line with the current indentation.
pub struct CodeWriter<W> {
    writer: W,
    indent_level: Rc<Cell<usize>>,
    at_line_start: bool,
}

impl<W: fmt::Write> CodeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            indent_level: Rc::new(Cell::new(0)),
            at_line_start: true,
        }
    }

    /// Write text without a newline. Adds indentation if at line start.
    pub fn write(&mut self, text: &str) -> fmt::Result {
        if text.is_empty() {
            return Ok(());
        }

        if self.at_line_start {
            for _ in 0..self.indent_level.get() {
                self.writer.write_str(INDENT)?;
            }
            self.at_line_start = false;
        }

        self.writer.write_str(text)
    }

    /// Write text followed by a newline.
    pub fn writeln(&mut self, text: &str) -> fmt::Result {
        self.write(text)?;
        self.writer.write_char('\n')?;
        self.at_line_start = true;
        Ok(())
    }

    /// Write every line of a multi-line fragment at the current indentation.
    pub fn write_lines(&mut self, fragment: &str) -> fmt::Result {
        for line in fragment.lines() {
            if line.trim().is_empty() {
                self.blank_line()?;
            } else {
                self.writeln(line)?;
            }
        }
        Ok(())
    }

    pub fn blank_line(&mut self) -> fmt::Result {
        self.writer.write_char('\n')?;
        self.at_line_start = true;
        Ok(())
    }

    /// Increase indentation while the returned guard is alive.
    pub fn indent(&mut self) -> IndentGuard {
        self.indent_level.set(self.indent_level.get() + 1);
        IndentGuard {
            indent_level: Rc::clone(&self.indent_level),
        }
    }

    /// Write a doc comment block, one `prefix` line per text line.
    pub fn doc_comment(&mut self, prefix: &str, text: &str) -> fmt::Result {
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.writeln(prefix)?;
            } else {
                self.writeln(&format!("{prefix} {line}"))?;
            }
        }
        Ok(())
    }

    /// Write `header {`, the body one level deeper, then `}`.
    pub fn block<F>(&mut self, header: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.writeln(&format!("{header} {{"))?;
        {
            let _indent = self.indent();
            body(self)?;
        }
        self.writeln("}")
    }
}

/// RAII guard that restores the indentation level on drop.
pub struct IndentGuard {
    indent_level: Rc<Cell<usize>>,
}

impl Drop for IndentGuard {
    fn drop(&mut self) {
        let current = self.indent_level.get();
        self.indent_level.set(current.saturating_sub(1));
    }
}
