use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};

use itertools::Itertools;
use quickcheck::{Arbitrary, Gen};

use prop_nexus::{Expr, Model, Var};

/// Variables used by generated formulas.
pub const VAR_NAMES: [&str; 5] = ["p", "q", "r", "s", "v"];

/// Random formula over [`VAR_NAMES`], at most `MAX_DEPTH` connectives deep.
#[derive(Clone, PartialEq, Eq)]
pub struct ArbExpr(pub Expr);

impl ArbExpr {
    pub const MAX_DEPTH: usize = 4;

    fn generate(g: &mut Gen, depth: usize) -> Expr {
        let leaf = depth == 0 || u8::arbitrary(g) % 4 == 0;
        if leaf {
            return if u8::arbitrary(g) % 8 == 0 {
                Expr::Const(bool::arbitrary(g))
            } else {
                Expr::var(*g.choose(&VAR_NAMES).unwrap())
            };
        }
        match u8::arbitrary(g) % 5 {
            0 => Expr::not(Self::generate(g, depth - 1)),
            1 => Expr::and(Self::generate(g, depth - 1), Self::generate(g, depth - 1)),
            2 => Expr::or(Self::generate(g, depth - 1), Self::generate(g, depth - 1)),
            3 => Expr::implies(Self::generate(g, depth - 1), Self::generate(g, depth - 1)),
            _ => Expr::iff(Self::generate(g, depth - 1), Self::generate(g, depth - 1)),
        }
    }
}

impl Arbitrary for ArbExpr {
    fn arbitrary(g: &mut Gen) -> Self {
        ArbExpr(Self::generate(g, Self::MAX_DEPTH))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let children: Vec<Expr> = match &self.0 {
            Expr::Const(_) | Expr::Var(_) => vec![],
            Expr::Not { arg } => vec![arg.as_ref().clone()],
            Expr::And { lhs, rhs } | Expr::Or { lhs, rhs } | Expr::Implies { lhs, rhs } | Expr::Iff { lhs, rhs } => {
                vec![lhs.as_ref().clone(), rhs.as_ref().clone()]
            }
        };
        Box::new(children.into_iter().map(ArbExpr))
    }
}

// Shows the formula itself in quickcheck failure reports.
impl Debug for ArbExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every assignment of `vars`, `2^n` of them.
pub fn all_models(vars: &BTreeSet<Var>) -> impl Iterator<Item = Model> + '_ {
    (0..1u64 << vars.len()).map(move |bits| {
        vars.iter()
            .enumerate()
            .map(|(i, var)| (var.clone(), bits >> i & 1 == 1))
            .collect()
    })
}

/// Brute-force equivalence over the union of both variable sets.
pub fn truth_table_equivalent(lhs: &Expr, rhs: &Expr) -> bool {
    let vars: BTreeSet<Var> = lhs.vars().into_iter().chain(rhs.vars()).collect();
    let agree = all_models(&vars).all(|m| lhs.eval(&m) == rhs.eval(&m));
    agree
}

/// Brute-force satisfiability.
pub fn truth_table_satisfiable(expr: &Expr) -> bool {
    let vars = expr.vars();
    let satisfiable = all_models(&vars).any(|m| expr.eval(&m));
    satisfiable
}

/// Renders a truth table, one row per assignment, for failure messages.
pub fn truth_table(expr: &Expr) -> String {
    let vars = expr.vars();
    let header = vars.iter().join(" ");
    let rows = all_models(&vars)
        .map(|m| format!("{} | {}", m.values().map(|&b| b as u8).join(" "), expr.eval(&m) as u8))
        .join("\n");
    format!("{} | {}\n{}", header, expr, rows)
}

pub fn parse_all(inputs: &[&str]) -> color_eyre::Result<Vec<Expr>> {
    Ok(inputs.iter().map(|s| prop_nexus::parse(*s)).collect::<Result<_, _>>()?)
}
