//! Lexer and recursive-descent parser for propositional formulas.
//!
//! Accepted spellings: negation `~ ! ¬`, conjunction `& ^ ∧ &&`,
//! disjunction `| ∨ ||` and a standalone ` v `, implication `-> → =>`,
//! biconditional `<-> ↔ <=>`, constants `true false ⊤ ⊥`.
//! Every other ASCII letter is a single-letter variable.

pub mod error;
pub mod expr;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::{LexError, ParseError, SyntaxError};
pub use lexer::{tokenize, LexOptions, DEFAULT_LEX_OPTIONS};
pub use parser::{parse_expr, parse_expr_with, MAX_DEPTH};
