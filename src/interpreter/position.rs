use std::rc::Rc;

/// A named piece of source text.
///
/// Positions share the file through an `Rc` so that diagnostics can quote the
/// offending line long after lexing has finished.
#[derive(Debug, PartialEq, Eq)]
pub struct SourceFile {
    /// The name shown in diagnostics, usually a path or `<stdin>`.
    pub name: String,
    /// The complete source text.
    pub text: String,
}

impl SourceFile {
    /// Creates a shared source file.
    #[must_use]
    pub fn new(name: &str, text: &str) -> Rc<Self> {
        Rc::new(Self { name: name.to_string(),
                       text: text.to_string(), })
    }
}

/// A location inside a source file.
///
/// `index` is a byte offset into the text; `line` and `column` are zero-based
/// and counted in characters.
#[derive(Debug, Clone)]
pub struct Position {
    pub index:  usize,
    pub line:   usize,
    pub column: usize,
    pub file:   Rc<SourceFile>,
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.line == other.line && self.column == other.column && self.file.name == other.file.name
    }
}

impl Position {
    /// Returns the name of the file this position belongs to.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.file.name
    }
}

/// A half-open range between two positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end:   Position,
}

impl Span {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns a span reaching from the start of `self` to the end of `other`.
    #[must_use]
    pub fn to(&self, other: &Self) -> Self {
        Self { start: self.start.clone(),
               end:   other.end.clone(), }
    }
}

/// Maps byte offsets of a source file to line/column positions.
///
/// # Example
/// ```
/// use kode::interpreter::position::{LineIndex, SourceFile};
///
/// let file = SourceFile::new("demo.kode", "var a = 1\nvar b = 2");
/// let index = LineIndex::new(&file);
/// let pos = index.position(14);
/// assert_eq!((pos.line, pos.column), (1, 4));
/// ```
pub struct LineIndex {
    file:        Rc<SourceFile>,
    line_starts: Vec<usize>,
}

impl LineIndex {
    #[must_use]
    pub fn new(file: &Rc<SourceFile>) -> Self {
        let line_starts = std::iter::once(0).chain(file.text
                                                       .match_indices('\n')
                                                       .map(|(i, _)| i + 1))
                                            .collect();
        Self { file: Rc::clone(file),
               line_starts }
    }

    /// Resolves a byte offset into a full position.
    #[must_use]
    pub fn position(&self, index: usize) -> Position {
        let line = match self.line_starts.binary_search(&index) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.line_starts[line];
        let column = self.file
                         .text
                         .get(line_start..index)
                         .map_or(index - line_start, |prefix| prefix.chars().count());

        Position { index,
                   line,
                   column,
                   file: Rc::clone(&self.file) }
    }

    /// Resolves a byte range into a span.
    #[must_use]
    pub fn span(&self, range: std::ops::Range<usize>) -> Span {
        Span::new(self.position(range.start), self.position(range.end))
    }
}
