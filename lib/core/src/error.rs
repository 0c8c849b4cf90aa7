use expr_parser::{LexError, ParseError, SyntaxError};
use snafu::Snafu;

use crate::handler::Operation;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("{}", source), context(false))]
    Lex { source: LexError },

    #[snafu(display("{}", source), context(false))]
    Parse { source: ParseError },

    #[snafu(display("Resource budget exceeded during {}", operation))]
    ResourceExceeded { operation: Operation },
}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        match e {
            SyntaxError::Lex { source } => Error::Lex { source },
            SyntaxError::Parse { source } => Error::Parse { source },
        }
    }
}

impl Error {
    /// Malformed input, as opposed to an exhausted budget.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Lex { .. } | Error::Parse { .. })
    }
}
