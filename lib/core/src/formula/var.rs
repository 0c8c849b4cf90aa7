use std::fmt::{Display, Formatter};
use std::ops;

use crate::formula::expr::Expr;

/// A propositional atom, identified by its name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(pub String);

impl Var {
    pub fn new(name: impl Into<String>) -> Self {
        Var(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Writes the variable as an operand of a rendered formula. Between two
    /// spaces the word `v` lexes as disjunction, so the variable `v` is braced.
    pub(crate) fn fmt_operand(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0 == "v" {
            write!(f, "({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "Var({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<&str> for Var {
    fn from(name: &str) -> Self {
        Var::new(name)
    }
}

impl From<char> for Var {
    fn from(name: char) -> Self {
        Var(name.to_string())
    }
}

// !Var
impl ops::Not for Var {
    type Output = Expr;

    fn not(self) -> Self::Output {
        !Expr::from(self)
    }
}

// Var & Var
impl ops::BitAnd for Var {
    type Output = Expr;

    fn bitand(self, rhs: Var) -> Self::Output {
        Expr::from(self) & Expr::from(rhs)
    }
}
// Var & Expr
impl ops::BitAnd<Expr> for Var {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Self::Output {
        Expr::from(self) & rhs
    }
}

// Var | Var
impl ops::BitOr for Var {
    type Output = Expr;

    fn bitor(self, rhs: Var) -> Self::Output {
        Expr::from(self) | Expr::from(rhs)
    }
}
// Var | Expr
impl ops::BitOr<Expr> for Var {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Self::Output {
        Expr::from(self) | rhs
    }
}
