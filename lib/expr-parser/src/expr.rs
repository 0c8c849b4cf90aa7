use std::fmt::{Display, Formatter};
use std::ops;

/// Syntax tree produced by the parser.
///
/// The tree mirrors the surface syntax: every binary connective is kept
/// as written, nothing is desugared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Const(bool),
    Var(String),
    Negation { arg: Box<Expr> },
    BinOp { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinOp {
    And,
    Or,
    Imply,
    Iff,
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn negation(arg: Expr) -> Self {
        Expr::Negation { arg: Box::new(arg) }
    }

    pub fn binop(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn imply(lhs: Expr, rhs: Expr) -> Self {
        Expr::binop(BinOp::Imply, lhs, rhs)
    }

    pub fn iff(lhs: Expr, rhs: Expr) -> Self {
        Expr::binop(BinOp::Iff, lhs, rhs)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Const(b) => {
                write!(f, "{}", b)
            }
            Expr::Var(v) => {
                write!(f, "{}", v)
            }
            Expr::Negation { arg } => {
                write!(f, "~{}", arg)
            }
            Expr::BinOp { op, lhs, rhs } => {
                write!(f, "({} {} {})", lhs, op, rhs)
            }
        }
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BinOp::And => "&",
                BinOp::Or => "|",
                BinOp::Imply => "->",
                BinOp::Iff => "<->",
            }
        )
    }
}

impl ops::Not for Expr {
    type Output = Self;

    fn not(self) -> Self::Output {
        Expr::negation(self)
    }
}

impl ops::BitAnd for Expr {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Expr::binop(BinOp::And, self, rhs)
    }
}

impl ops::BitOr for Expr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Expr::binop(BinOp::Or, self, rhs)
    }
}
