use std::time::Duration;

use expr_parser::LexOptions;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Options {
    // Lexing:
    pub fold_case: bool,
    // Budget:
    pub max_distributions: Option<u64>,
    pub max_clauses: Option<u64>,
    pub timeout: Option<Duration>,
}

pub const DEFAULT_OPTIONS: Options = Options {
    // Lexing:
    fold_case: false,
    // Budget:
    max_distributions: None,
    max_clauses: None,
    timeout: None,
};

impl Default for Options {
    fn default() -> Self {
        DEFAULT_OPTIONS
    }
}

impl Options {
    pub fn lex_options(&self) -> LexOptions {
        LexOptions {
            fold_case: self.fold_case,
        }
    }
}
