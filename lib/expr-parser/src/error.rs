use snafu::Snafu;

pub type Result<T, E = SyntaxError> = std::result::Result<T, E>;

/// A character that is neither whitespace, a letter, a parenthesis nor part
/// of a known operator spelling.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(display("Unrecognized character {:?} at position {}", character, position))]
pub struct LexError {
    pub position: usize,
    pub character: char,
}

/// Malformed token sequence: missing operand, unbalanced parentheses,
/// trailing tokens or empty input.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(display("Expected {} at position {}, found {}", expected, position, found))]
pub struct ParseError {
    pub position: usize,
    pub expected: String,
    pub found: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum SyntaxError {
    #[snafu(display("{}", source), context(false))]
    Lex { source: LexError },

    #[snafu(display("{}", source), context(false))]
    Parse { source: ParseError },
}

impl SyntaxError {
    pub fn position(&self) -> usize {
        match self {
            SyntaxError::Lex { source } => source.position,
            SyntaxError::Parse { source } => source.position,
        }
    }
}
