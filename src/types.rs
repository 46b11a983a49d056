//! Positions inside catalog files.

use std::fmt;

use serde::Serialize;

/// A range in a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

/// A position in a catalog file (0-indexed, character is a byte column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

impl From<tree_sitter::Point> for SourcePosition {
    #[allow(clippy::cast_possible_truncation)]
    fn from(point: tree_sitter::Point) -> Self {
        Self { line: point.row as u32, character: point.column as u32 }
    }
}

/// Renders as the 1-indexed `line:column` pair editors expect.
impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

impl SourceRange {
    #[must_use]
    pub fn from_node(node: &tree_sitter::Node<'_>) -> Self {
        Self { start: node.start_position().into(), end: node.end_position().into() }
    }
}
