use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Variable(char),
    Const(bool),
    Not,
    And,
    Or,
    Implies,
    Iff,
    LParen,
    RParen,
    Eof,
}

/// A classified lexeme together with the character offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl Token {
    pub const fn new(kind: TokenKind, position: usize) -> Self {
        Token { kind, position }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Variable(name) => write!(f, "variable '{}'", name),
            TokenKind::Const(b) => write!(f, "constant '{}'", b),
            TokenKind::Not => write!(f, "'~'"),
            TokenKind::And => write!(f, "'&'"),
            TokenKind::Or => write!(f, "'|'"),
            TokenKind::Implies => write!(f, "'->'"),
            TokenKind::Iff => write!(f, "'<->'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "{}@{}", self.kind, self.position)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}
