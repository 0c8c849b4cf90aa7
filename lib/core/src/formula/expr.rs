use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::ops;

use expr_parser::lexer::LexOptions;
use log::debug;
use tap::Tap;

use crate::error::Result;
use crate::formula::var::Var;
use crate::model::Model;

/// A propositional formula.
///
/// Children are boxed and owned by their parent. Every transformation builds a new tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Const(bool),
    Var(Var),
    Not { arg: Box<Expr> },
    And { lhs: Box<Expr>, rhs: Box<Expr> },
    Or { lhs: Box<Expr>, rhs: Box<Expr> },
    Implies { lhs: Box<Expr>, rhs: Box<Expr> },
    Iff { lhs: Box<Expr>, rhs: Box<Expr> },
}

// Constructors
impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(Var::new(name))
    }

    pub fn not(arg: Self) -> Self {
        Expr::Not { arg: Box::new(arg) }
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Expr::And {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Expr::Or {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn implies(lhs: Self, rhs: Self) -> Self {
        Expr::Implies {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn iff(lhs: Self, rhs: Self) -> Self {
        Expr::Iff {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Left-nested conjunction of `args`; `true` when empty.
    pub fn and_all<I>(args: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        args.into_iter().reduce(Expr::and).unwrap_or(Expr::Const(true))
    }

    /// Left-nested disjunction of `args`; `false` when empty.
    pub fn or_all<I>(args: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        args.into_iter().reduce(Expr::or).unwrap_or(Expr::Const(false))
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Const(b)
    }
}

impl From<Var> for Expr {
    fn from(var: Var) -> Self {
        Expr::Var(var)
    }
}

impl From<expr_parser::expr::Expr> for Expr {
    fn from(parsed_expr: expr_parser::expr::Expr) -> Self {
        use expr_parser::expr::{BinOp, Expr as ParsedExpr};

        match parsed_expr {
            ParsedExpr::Const(b) => Expr::from(b),
            ParsedExpr::Var(name) => Expr::from(Var(name)),
            ParsedExpr::Negation { arg } => Expr::not(Expr::from(*arg)),
            ParsedExpr::BinOp { op, lhs, rhs } => {
                let lhs = Expr::from(*lhs);
                let rhs = Expr::from(*rhs);
                match op {
                    BinOp::And => Expr::and(lhs, rhs),
                    BinOp::Or => Expr::or(lhs, rhs),
                    BinOp::Imply => Expr::implies(lhs, rhs),
                    BinOp::Iff => Expr::iff(lhs, rhs),
                }
            }
        }
    }
}

impl Expr {
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with(input, LexOptions::default())
    }

    pub fn parse_with(input: &str, options: LexOptions) -> Result<Self> {
        let parsed_expr = expr_parser::parse_expr_with(input, options)?;
        Ok(Expr::from(parsed_expr))
    }

    /// Evaluates the formula; variables missing from `model` are false.
    pub fn eval(&self, model: &Model) -> bool {
        match self {
            Expr::Const(b) => *b,
            Expr::Var(var) => model.value(var).unwrap_or(false),
            Expr::Not { arg } => !arg.eval(model),
            Expr::And { lhs, rhs } => lhs.eval(model) && rhs.eval(model),
            Expr::Or { lhs, rhs } => lhs.eval(model) || rhs.eval(model),
            Expr::Implies { lhs, rhs } => !lhs.eval(model) || rhs.eval(model),
            Expr::Iff { lhs, rhs } => lhs.eval(model) == rhs.eval(model),
        }
    }

    pub fn vars(&self) -> BTreeSet<Var> {
        fn collect(expr: &Expr, acc: &mut BTreeSet<Var>) {
            match expr {
                Expr::Const(_) => {}
                Expr::Var(var) => {
                    acc.insert(var.clone());
                }
                Expr::Not { arg } => collect(arg, acc),
                Expr::And { lhs, rhs } | Expr::Or { lhs, rhs } | Expr::Implies { lhs, rhs } | Expr::Iff { lhs, rhs } => {
                    collect(lhs, acc);
                    collect(rhs, acc);
                }
            }
        }

        let mut acc = BTreeSet::new();
        collect(self, &mut acc);
        acc.tap(|vars| debug!("Expr::vars({self}) = {vars:?}"))
    }

    // Binding strength used by `Display`: larger binds tighter.
    fn precedence(&self) -> u8 {
        match self {
            Expr::Iff { .. } => 1,
            Expr::Implies { .. } => 2,
            Expr::Or { .. } => 3,
            Expr::And { .. } => 4,
            Expr::Const(_) | Expr::Var(_) | Expr::Not { .. } => 5,
        }
    }
}

struct Operand<'a> {
    expr: &'a Expr,
    braced: bool,
}

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.braced {
            write!(f, "({})", self.expr)
        } else {
            write!(f, "{}", self.expr)
        }
    }
}

impl Expr {
    fn write_binary(&self, f: &mut Formatter<'_>, lhs: &Expr, op: &str, rhs: &Expr) -> std::fmt::Result {
        let prec = self.precedence();
        let (lhs_braced, rhs_braced) = match self {
            // Associative: chains print flat.
            Expr::And { .. } | Expr::Or { .. } => (lhs.precedence() < prec, rhs.precedence() < prec),
            // Right-associative.
            _ => (lhs.precedence() <= prec, rhs.precedence() < prec),
        };
        let lhs = Operand {
            expr: lhs,
            braced: lhs_braced,
        };
        let rhs = Operand {
            expr: rhs,
            braced: rhs_braced,
        };
        write!(f, "{lhs} {op} {rhs}")
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            match self {
                Expr::Const(b) => {
                    write!(f, "Const({b:#})")
                }
                Expr::Var(var) => {
                    write!(f, "{var:#}")
                }
                Expr::Not { arg } => {
                    write!(f, "Not({arg:#})")
                }
                Expr::And { lhs, rhs } => {
                    write!(f, "And({lhs:#}, {rhs:#})")
                }
                Expr::Or { lhs, rhs } => {
                    write!(f, "Or({lhs:#}, {rhs:#})")
                }
                Expr::Implies { lhs, rhs } => {
                    write!(f, "Implies({lhs:#}, {rhs:#})")
                }
                Expr::Iff { lhs, rhs } => {
                    write!(f, "Iff({lhs:#}, {rhs:#})")
                }
            }
        } else {
            match self {
                Expr::Const(b) => {
                    write!(f, "{b}")
                }
                Expr::Var(var) => var.fmt_operand(f),
                Expr::Not { arg } => {
                    if let Expr::Var(var) = arg.as_ref() {
                        return write!(f, "~{var}");
                    }
                    let arg = Operand {
                        expr: arg,
                        braced: arg.precedence() < self.precedence(),
                    };
                    write!(f, "~{arg}")
                }
                Expr::And { lhs, rhs } => self.write_binary(f, lhs, "&", rhs),
                Expr::Or { lhs, rhs } => self.write_binary(f, lhs, "|", rhs),
                Expr::Implies { lhs, rhs } => self.write_binary(f, lhs, "->", rhs),
                Expr::Iff { lhs, rhs } => self.write_binary(f, lhs, "<->", rhs),
            }
        }
    }
}

impl ops::Not for Expr {
    type Output = Self;

    fn not(self) -> Self::Output {
        Expr::not(self)
    }
}

impl ops::BitAnd for Expr {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Expr::and(self, rhs)
    }
}
impl ops::BitAnd<Var> for Expr {
    type Output = Self;

    fn bitand(self, rhs: Var) -> Self::Output {
        Expr::and(self, Expr::from(rhs))
    }
}

impl ops::BitOr for Expr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Expr::or(self, rhs)
    }
}
impl ops::BitOr<Var> for Expr {
    type Output = Self;

    fn bitor(self, rhs: Var) -> Self::Output {
        Expr::or(self, Expr::from(rhs))
    }
}
