/// A position inside a template source, as reported by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Location {
    /// Name of the template the node was parsed from.
    pub template: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl Location {
    pub fn new(template: impl Into<String>, line: usize, column: usize) -> Self {
        Self { template: template.into(), line, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.template, self.line, self.column)
    }
}

/// A source range covering a whole node (for instance an embedded block
/// and all of its body lines).
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// A span that starts and ends at `loc`.
    pub fn point(loc: Location) -> Self {
        Self { start: loc.clone(), end: loc }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start.template == self.end.template {
            write!(
                f,
                "{}:{}:{}-{}:{}",
                self.start.template, self.start.line, self.start.column, self.end.line, self.end.column
            )
        } else {
            write!(f, "{} - {}", self.start, self.end)
        }
    }
}
