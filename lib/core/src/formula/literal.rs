use std::fmt::{Display, Formatter};
use std::ops::Neg;

use crate::formula::expr::Expr;
use crate::formula::var::Var;

/// A variable or its negation. Orders by variable first, positive before negative.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    pub var: Var,
    pub negated: bool,
}

impl Literal {
    pub fn pos(var: Var) -> Self {
        Literal { var, negated: false }
    }

    pub fn neg(var: Var) -> Self {
        Literal { var, negated: true }
    }

    pub fn complement(&self) -> Self {
        Literal {
            var: self.var.clone(),
            negated: !self.negated,
        }
    }

    /// `Var` or `Not(Var)`; anything else is not a literal.
    pub fn from_expr(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Var(var) => Some(Literal::pos(var.clone())),
            Expr::Not { arg } => match arg.as_ref() {
                Expr::Var(var) => Some(Literal::neg(var.clone())),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn to_expr(&self) -> Expr {
        let var = Expr::Var(self.var.clone());
        if self.negated {
            Expr::not(var)
        } else {
            var
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.negated {
            write!(f, "~{}", self.var)
        } else {
            self.var.fmt_operand(f)
        }
    }
}

// -Literal
impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Literal {
            var: self.var,
            negated: !self.negated,
        }
    }
}

impl From<Var> for Literal {
    fn from(var: Var) -> Self {
        Literal::pos(var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_order() {
        let p = Literal::pos(Var::new("p"));
        let not_p = Literal::neg(Var::new("p"));
        let q = Literal::pos(Var::new("q"));
        assert!(p < not_p);
        assert!(not_p < q);
    }

    #[test]
    fn test_literal_neg() {
        let p = Literal::pos(Var::new("p"));
        assert_eq!(-p.clone(), p.complement());
        assert_eq!(-(-p.clone()), p);
        assert_eq!((-p).to_string(), "~p");
    }

    #[test]
    fn test_literal_from_expr() {
        assert_eq!(Literal::from_expr(&Expr::var("p")), Some(Literal::pos(Var::new("p"))));
        assert_eq!(Literal::from_expr(&!Expr::var("p")), Some(Literal::neg(Var::new("p"))));
        assert_eq!(Literal::from_expr(&!!Expr::var("p")), None);
        assert_eq!(Literal::from_expr(&Expr::Const(true)), None);
    }
}
