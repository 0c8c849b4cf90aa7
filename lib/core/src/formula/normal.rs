use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use derive_more::{Deref, IntoIterator};
use itertools::Itertools;

use crate::formula::expr::Expr;
use crate::formula::literal::Literal;
use crate::formula::var::Var;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Form {
    /// Conjunction of disjunctive clauses.
    Cnf,
    /// Disjunction of conjunctive terms.
    Dnf,
}

impl Form {
    pub fn dual(self) -> Self {
        match self {
            Form::Cnf => Form::Dnf,
            Form::Dnf => Form::Cnf,
        }
    }

    /// Value of an empty clause set.
    pub const fn neutral(self) -> bool {
        matches!(self, Form::Cnf)
    }

    fn outer_op(self) -> &'static str {
        match self {
            Form::Cnf => "&",
            Form::Dnf => "|",
        }
    }

    fn inner_op(self) -> &'static str {
        self.dual().outer_op()
    }
}

impl Display for Form {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Form::Cnf => write!(f, "CNF"),
            Form::Dnf => write!(f, "DNF"),
        }
    }
}

/// A set of literals: a disjunction inside a CNF, a conjunction inside a DNF.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, IntoIterator)]
pub struct Clause(BTreeSet<Literal>);

impl Clause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lit: Literal) -> bool {
        self.0.insert(lit)
    }

    /// Whether some variable occurs with both polarities.
    pub fn is_complementary(&self) -> bool {
        self.0
            .iter()
            .tuple_windows()
            .any(|(a, b)| a.var == b.var && a.negated != b.negated)
    }

    pub fn to_expr(&self, form: Form) -> Expr {
        let lits = self.0.iter().map(Literal::to_expr);
        match form {
            Form::Cnf => Expr::or_all(lits),
            Form::Dnf => Expr::and_all(lits),
        }
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Clause(iter.into_iter().collect())
    }
}

/// Outcome of [`NormalForm::insert`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Insertion {
    Added,
    /// Dropped: contains `x` and `~x`.
    Complementary,
    /// Dropped: duplicate of, or subsumed by, a clause already present.
    Redundant,
}

/// A CNF or DNF as a set of clauses.
///
/// The set is kept simplified: no complementary clause, no clause that is a
/// superset of another one. A form containing the empty clause contains
/// nothing else and denotes the constant `!form.neutral()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalForm {
    form: Form,
    clauses: BTreeSet<Clause>,
}

impl NormalForm {
    /// The empty clause set: `true` for CNF, `false` for DNF.
    pub fn new(form: Form) -> Self {
        NormalForm {
            form,
            clauses: BTreeSet::new(),
        }
    }

    pub fn constant(form: Form, value: bool) -> Self {
        let mut nf = Self::new(form);
        if value != form.neutral() {
            nf.clauses.insert(Clause::new());
        }
        nf
    }

    pub fn form(&self) -> Form {
        self.form
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// `Some(value)` when the form is the constant `true` or `false`.
    pub fn as_constant(&self) -> Option<bool> {
        if self.clauses.is_empty() {
            Some(self.form.neutral())
        } else if self.clauses.iter().any(|c| c.is_empty()) {
            Some(!self.form.neutral())
        } else {
            None
        }
    }

    pub fn vars(&self) -> BTreeSet<Var> {
        self.clauses
            .iter()
            .flat_map(|c| c.iter().map(|lit| lit.var.clone()))
            .collect()
    }

    pub fn insert(&mut self, clause: Clause) -> Insertion {
        if clause.is_complementary() {
            return Insertion::Complementary;
        }
        if self.clauses.iter().any(|c| c.is_subset(&clause)) {
            return Insertion::Redundant;
        }
        self.clauses.retain(|c| !clause.is_subset(c));
        self.clauses.insert(clause);
        Insertion::Added
    }

    pub fn to_expr(&self) -> Expr {
        let clauses = self.clauses.iter().map(|c| c.to_expr(self.form));
        match self.form {
            Form::Cnf => Expr::and_all(clauses),
            Form::Dnf => Expr::or_all(clauses),
        }
    }
}

/// Renders as `(a | b) & c` for CNF and `(a & b) | c` for DNF.
impl Display for NormalForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(value) = self.as_constant() {
            return write!(f, "{value}");
        }
        let braced = self.clauses.len() > 1;
        let inner = format!(" {} ", self.form.inner_op());
        let outer = format!(" {} ", self.form.outer_op());
        let clauses = self.clauses.iter().map(|clause| {
            let lits = clause.iter().join(&inner);
            if braced && clause.len() > 1 {
                format!("({lits})")
            } else {
                lits
            }
        });
        write!(f, "{}", clauses.format(&outer))
    }
}
