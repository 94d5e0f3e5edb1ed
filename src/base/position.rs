use std::fmt;
use std::sync::Arc;

/// Position tracking for model nodes
///
/// Stores the source location (line/column) of declarations for
/// diagnostics. Lines and columns are 1-indexed, as reported by the parser.
/// A span representing a range in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A position in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates
    pub fn from_coords(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: Position) -> bool {
        if position.line < self.start.line || position.line > self.end.line {
            return false;
        }
        if position.line == self.start.line && position.column < self.start.column {
            return false;
        }
        if position.line == self.end.line && position.column > self.end.column {
            return false;
        }
        true
    }
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Where a node came from: the file name plus its span.
///
/// Nodes synthesized by the toolchain itself (default backing types,
/// annotation parameter types) carry an internal location with no span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    file: Arc<str>,
    span: Option<Span>,
}

impl Location {
    pub fn new(file: impl Into<Arc<str>>, span: Span) -> Self {
        Self {
            file: file.into(),
            span: Some(span),
        }
    }

    /// A location for nodes created by the toolchain rather than parsed.
    pub fn internal(origin: &str) -> Self {
        Self {
            file: Arc::from(origin),
            span: None,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn is_known(&self) -> bool {
        self.span.is_some()
    }

    /// `file:line` form used in short messages.
    pub fn print_line(&self) -> String {
        match self.span {
            Some(span) => format!("{}:{}", self.file, span.start.line),
            None => self.file.to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file)?;
        if let Some(span) = self.span {
            write!(f, ":{}.{}-", span.start.line, span.start.column)?;
            if span.start.line != span.end.line {
                write!(f, "{}.", span.end.line)?;
            }
            write!(f, "{}", span.end.column)?;
        }
        Ok(())
    }
}
