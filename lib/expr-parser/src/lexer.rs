use log::debug;

use crate::error::{LexError, LexSnafu};
use crate::token::{Token, TokenKind};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LexOptions {
    /// Lowercase every letter before classification, so `P` and `p` name the
    /// same atom and `TRUE` is the constant `true`.
    pub fold_case: bool,
}

pub const DEFAULT_LEX_OPTIONS: LexOptions = LexOptions { fold_case: false };

impl Default for LexOptions {
    fn default() -> Self {
        DEFAULT_LEX_OPTIONS
    }
}

/// Left-to-right scanner over the characters of a formula.
///
/// Yields tokens until (and including) a single [`TokenKind::Eof`], or the
/// first [`LexError`].
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    done: bool,
    // Whether some token was produced already.
    seen_token: bool,
    // End of the run of letters being split into variables.
    word_end: usize,
}

impl Lexer {
    pub fn new(input: &str, options: LexOptions) -> Self {
        let chars = input
            .chars()
            .map(|c| if options.fold_case { c.to_ascii_lowercase() } else { c })
            .collect();
        Lexer {
            chars,
            pos: 0,
            done: false,
            seen_token: false,
            word_end: 0,
        }
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_at(0), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn is_whitespace_at(&self, index: usize) -> bool {
        matches!(self.chars.get(index), Some(c) if c.is_whitespace())
    }

    // Consumes `width` characters and produces a token starting at `start`.
    fn emit(&mut self, kind: TokenKind, start: usize, width: usize) -> Token {
        self.pos = start + width;
        self.seen_token = true;
        Token::new(kind, start)
    }

    // Words are recognized at the start of a run of letters only; the rest of
    // a run that is not a word is split into single-letter variables.
    fn lex_word(&mut self, start: usize) -> Token {
        if start >= self.word_end {
            let end = (start..self.chars.len())
                .find(|&i| !self.chars[i].is_ascii_alphabetic())
                .unwrap_or(self.chars.len());
            self.word_end = end;
            let word: String = self.chars[start..end].iter().collect();
            match word.as_str() {
                "true" => return self.emit(TokenKind::Const(true), start, end - start),
                "false" => return self.emit(TokenKind::Const(false), start, end - start),
                // The word `v` is a disjunction only when it stands alone between
                // spaces after some other token, otherwise it is the atom `v`.
                "v" if self.seen_token && self.is_whitespace_at(start - 1) && self.is_whitespace_at(end) => {
                    return self.emit(TokenKind::Or, start, 1);
                }
                _ => {}
            }
        }
        self.emit(TokenKind::Variable(self.chars[start]), start, 1)
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let start = self.pos;
        let c = match self.peek_at(0) {
            None => return Ok(Token::new(TokenKind::Eof, start)),
            Some(c) => c,
        };
        let next = self.peek_at(1);
        let token = match c {
            '~' | '!' | '¬' => self.emit(TokenKind::Not, start, 1),
            '&' if next == Some('&') => self.emit(TokenKind::And, start, 2),
            '&' | '^' | '∧' => self.emit(TokenKind::And, start, 1),
            '|' if next == Some('|') => self.emit(TokenKind::Or, start, 2),
            '|' | '∨' => self.emit(TokenKind::Or, start, 1),
            '-' | '=' if next == Some('>') => self.emit(TokenKind::Implies, start, 2),
            '→' => self.emit(TokenKind::Implies, start, 1),
            '<' if matches!((next, self.peek_at(2)), (Some('-' | '='), Some('>'))) => {
                self.emit(TokenKind::Iff, start, 3)
            }
            '↔' => self.emit(TokenKind::Iff, start, 1),
            '⊤' => self.emit(TokenKind::Const(true), start, 1),
            '⊥' => self.emit(TokenKind::Const(false), start, 1),
            '(' => self.emit(TokenKind::LParen, start, 1),
            ')' => self.emit(TokenKind::RParen, start, 1),
            c if c.is_ascii_alphabetic() => self.lex_word(start),
            character => {
                return LexSnafu {
                    position: start,
                    character,
                }
                .fail()
            }
        };
        Ok(token)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(token) => {
                debug!("token = {:#}", token);
                self.done = token.is_eof();
            }
            Err(e) => {
                debug!("lex error: {}", e);
                self.done = true;
            }
        }
        Some(result)
    }
}

/// Splits `input` into tokens, the last of which is always [`TokenKind::Eof`].
pub fn tokenize(input: &str, options: LexOptions) -> Result<Vec<Token>, LexError> {
    Lexer::new(input, options).collect()
}
