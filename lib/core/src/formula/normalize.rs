use log::debug;
use tap::Tap;

use crate::error::{ResourceExceededSnafu, Result};
use crate::formula::expr::Expr;
use crate::formula::literal::Literal;
use crate::formula::normal::{Clause, Form, Insertion, NormalForm};
use crate::formula::trace::{Rule, Trace};
use crate::handler::{ComputationHandler, Event, Operation};

/// A normal form together with the rewrites that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub form: NormalForm,
    pub trace: Trace,
}

/// Rewrites formulas into CNF or DNF.
///
/// The pipeline is fixed:
///  1. eliminate `->` and `<->`,
///  2. push negations down to the atoms (negation normal form),
///  3. distribute the inner connective over the outer one,
///  4. collect the result into a simplified [`NormalForm`].
///
/// Every step is a pure tree-to-tree function; the input is never modified.
pub struct Normalizer<'h> {
    handler: &'h mut dyn ComputationHandler,
    trace: Trace,
}

impl<'h> Normalizer<'h> {
    pub fn new(handler: &'h mut dyn ComputationHandler) -> Self {
        Normalizer {
            handler,
            trace: Trace::new(),
        }
    }

    pub fn into_trace(self) -> Trace {
        self.trace
    }

    fn check(&mut self, event: Event) -> Result<()> {
        if self.handler.should_resume(event) {
            Ok(())
        } else {
            ResourceExceededSnafu {
                operation: Operation::Normalization,
            }
            .fail()
        }
    }

    /// Runs the whole pipeline.
    pub fn normalize(&mut self, expr: &Expr, form: Form) -> Result<NormalForm> {
        debug!("-> Normalizer::normalize({expr}, {form})");
        self.handler.started(Operation::Normalization);
        let expr = self.eliminate_implications(expr.clone());
        let expr = self.push_negations(expr);
        let expr = self.distribute(expr, form)?;
        self.collect(&expr, form)
            .tap(|nf| debug!("<- Normalizer::normalize = {:?}", nf.as_ref().map(|nf| nf.to_string())))
    }

    /// Step 1: `a -> b` becomes `~a | b`, `a <-> b` becomes `(~a | b) & (~b | a)`.
    pub fn eliminate_implications(&mut self, expr: Expr) -> Expr {
        match expr {
            Expr::Const(_) | Expr::Var(_) => expr,
            Expr::Not { arg } => Expr::not(self.eliminate_implications(*arg)),
            Expr::And { lhs, rhs } => Expr::and(self.eliminate_implications(*lhs), self.eliminate_implications(*rhs)),
            Expr::Or { lhs, rhs } => Expr::or(self.eliminate_implications(*lhs), self.eliminate_implications(*rhs)),
            Expr::Implies { lhs, rhs } => {
                self.trace.record(Rule::ImplicationElimination);
                let a = self.eliminate_implications(*lhs);
                let b = self.eliminate_implications(*rhs);
                Expr::or(Expr::not(a), b)
            }
            Expr::Iff { lhs, rhs } => {
                self.trace.record(Rule::BiconditionalElimination);
                let a = self.eliminate_implications(*lhs);
                let b = self.eliminate_implications(*rhs);
                Expr::and(Expr::or(Expr::not(a.clone()), b.clone()), Expr::or(Expr::not(b), a))
            }
        }
    }

    /// Step 2: negation normal form. Negations end up directly above variables,
    /// negated constants are folded.
    pub fn push_negations(&mut self, expr: Expr) -> Expr {
        self.nnf(expr, false)
    }

    // Rewrites `expr`, or `~expr` when `negated` is set.
    fn nnf(&mut self, expr: Expr, negated: bool) -> Expr {
        match expr {
            Expr::Const(b) => {
                if negated {
                    self.trace.record(Rule::ConstantFolding);
                }
                Expr::Const(b ^ negated)
            }
            Expr::Var(_) => {
                if negated {
                    Expr::not(expr)
                } else {
                    expr
                }
            }
            Expr::Not { arg } => {
                if negated {
                    // ~~a |- a
                    self.trace.record(Rule::DoubleNegation);
                }
                self.nnf(*arg, !negated)
            }
            Expr::And { lhs, rhs } => {
                if negated {
                    // ~(a & b) |- ~a | ~b
                    self.trace.record(Rule::DeMorgan);
                    Expr::or(self.nnf(*lhs, true), self.nnf(*rhs, true))
                } else {
                    Expr::and(self.nnf(*lhs, false), self.nnf(*rhs, false))
                }
            }
            Expr::Or { lhs, rhs } => {
                if negated {
                    // ~(a | b) |- ~a & ~b
                    self.trace.record(Rule::DeMorgan);
                    Expr::and(self.nnf(*lhs, true), self.nnf(*rhs, true))
                } else {
                    Expr::or(self.nnf(*lhs, false), self.nnf(*rhs, false))
                }
            }
            e @ (Expr::Implies { .. } | Expr::Iff { .. }) => {
                let e = self.eliminate_implications(e);
                self.nnf(e, negated)
            }
        }
    }

    /// Step 3: for CNF, `(a & b) | c` becomes `(a | c) & (b | c)` until no
    /// disjunction has a conjunction below it; the dual for DNF.
    ///
    /// Expects negation normal form.
    pub fn distribute(&mut self, expr: Expr, form: Form) -> Result<Expr> {
        match expr {
            Expr::And { lhs, rhs } => {
                let a = self.distribute(*lhs, form)?;
                let b = self.distribute(*rhs, form)?;
                match form {
                    Form::Cnf => Ok(Expr::and(a, b)),
                    Form::Dnf => self.merge(a, b, form),
                }
            }
            Expr::Or { lhs, rhs } => {
                let a = self.distribute(*lhs, form)?;
                let b = self.distribute(*rhs, form)?;
                match form {
                    Form::Cnf => self.merge(a, b, form),
                    Form::Dnf => Ok(Expr::or(a, b)),
                }
            }
            e => Ok(e),
        }
    }

    // Joins two distributed operands with the inner connective of `form`,
    // pushing it below any outer connective at the top of either operand.
    fn merge(&mut self, a: Expr, b: Expr, form: Form) -> Result<Expr> {
        match (split_outer(a, form), split_outer(b, form)) {
            (Ok((a1, a2)), Err(b)) => {
                self.distributed()?;
                let lhs = self.merge(a1, b.clone(), form)?;
                let rhs = self.merge(a2, b, form)?;
                Ok(join_outer(lhs, rhs, form))
            }
            (Ok((a1, a2)), Ok((b1, b2))) => {
                self.distributed()?;
                let b = join_outer(b1, b2, form);
                let lhs = self.merge(a1, b.clone(), form)?;
                let rhs = self.merge(a2, b, form)?;
                Ok(join_outer(lhs, rhs, form))
            }
            (Err(a), Ok((b1, b2))) => {
                self.distributed()?;
                let lhs = self.merge(a.clone(), b1, form)?;
                let rhs = self.merge(a, b2, form)?;
                Ok(join_outer(lhs, rhs, form))
            }
            (Err(a), Err(b)) => Ok(join_inner(a, b, form)),
        }
    }

    fn distributed(&mut self) -> Result<()> {
        self.trace.record(Rule::Distribution);
        self.check(Event::DistributionPerformed)
    }

    /// Step 4: flattens a distributed formula into a simplified clause set.
    pub fn collect(&mut self, expr: &Expr, form: Form) -> Result<NormalForm> {
        let mut nf = NormalForm::new(form);
        let mut outer = Vec::new();
        flatten(expr, form, true, &mut outer);
        for part in outer {
            let mut inner = Vec::new();
            flatten(part, form, false, &mut inner);
            let clause = match self.clause_of(&inner, form) {
                Some(clause) => clause,
                None => continue,
            };
            self.check(Event::ClauseCreated)?;
            match nf.insert(clause) {
                Insertion::Added => {}
                Insertion::Complementary => self.trace.record(Rule::ComplementElimination),
                Insertion::Redundant => self.trace.record(Rule::Absorption),
            }
        }
        Ok(nf)
    }

    // Literals of one clause; `None` when a constant makes the whole clause
    // neutral (`true` inside a CNF clause, `false` inside a DNF term).
    fn clause_of(&mut self, parts: &[&Expr], form: Form) -> Option<Clause> {
        let mut clause = Clause::new();
        for part in parts {
            match part {
                Expr::Const(b) => {
                    self.trace.record(Rule::ConstantFolding);
                    if *b == form.neutral() {
                        return None;
                    }
                }
                _ => match Literal::from_expr(part) {
                    Some(lit) => {
                        if !clause.insert(lit) {
                            self.trace.record(Rule::Absorption);
                        }
                    }
                    None => unreachable!("not in normal form: {part}"),
                },
            }
        }
        Some(clause)
    }
}

// Operands of the outer connective of `form` (`&` for CNF, `|` for DNF), or the expression back.
fn split_outer(expr: Expr, form: Form) -> std::result::Result<(Expr, Expr), Expr> {
    match (expr, form) {
        (Expr::And { lhs, rhs }, Form::Cnf) | (Expr::Or { lhs, rhs }, Form::Dnf) => Ok((*lhs, *rhs)),
        (e, _) => Err(e),
    }
}

fn join_outer(lhs: Expr, rhs: Expr, form: Form) -> Expr {
    match form {
        Form::Cnf => Expr::and(lhs, rhs),
        Form::Dnf => Expr::or(lhs, rhs),
    }
}

fn join_inner(lhs: Expr, rhs: Expr, form: Form) -> Expr {
    join_outer(lhs, rhs, form.dual())
}

// Collects the operands of a chain of the outer (or inner) connective of `form`.
fn flatten<'a>(expr: &'a Expr, form: Form, outer: bool, acc: &mut Vec<&'a Expr>) {
    let target = if outer { form } else { form.dual() };
    match (expr, target) {
        (Expr::And { lhs, rhs }, Form::Cnf) | (Expr::Or { lhs, rhs }, Form::Dnf) => {
            flatten(lhs, form, outer, acc);
            flatten(rhs, form, outer, acc);
        }
        _ => acc.push(expr),
    }
}

/// Negation normal form of `expr`.
pub fn to_nnf(expr: &Expr) -> Expr {
    let mut handler = crate::handler::NopHandler;
    let mut normalizer = Normalizer::new(&mut handler);
    let expr = normalizer.eliminate_implications(expr.clone());
    normalizer.push_negations(expr)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::error::Error;
    use crate::handler::{BudgetHandler, NopHandler};
    use crate::options::Options;

    use super::*;

    fn normalize(input: &str, form: Form) -> Normalized {
        let expr = Expr::parse(input).unwrap();
        let mut handler = NopHandler;
        let mut normalizer = Normalizer::new(&mut handler);
        let nf = normalizer.normalize(&expr, form).unwrap();
        Normalized {
            form: nf,
            trace: normalizer.into_trace(),
        }
    }

    fn cnf(input: &str) -> String {
        normalize(input, Form::Cnf).form.to_string()
    }

    fn dnf(input: &str) -> String {
        normalize(input, Form::Dnf).form.to_string()
    }

    #[test]
    fn test_nnf() {
        let cases = [
            ("~(p & q)", "~p | ~q"),
            ("~(p | q)", "~p & ~q"),
            ("~~p", "p"),
            ("~(p -> q)", "p & ~q"),
            ("~~~(p & ~q)", "~p | q"),
            ("~true | p", "false | p"),
        ];
        for (input, expected) in cases {
            let nnf = to_nnf(&Expr::parse(input).unwrap());
            assert_eq!(nnf.to_string(), expected, "nnf of {input:?}");
        }
    }

    #[test]
    fn test_cnf_of_implication_with_disjunctive_antecedent() {
        assert_eq!(cnf("(p | q) -> r"), "(~p | r) & (~q | r)");
    }

    #[test]
    fn test_cnf_distribution() {
        assert_eq!(cnf("p | (q & r)"), "(p | q) & (p | r)");
        assert_eq!(cnf("(p & q) | (r & s)"), "(p | r) & (p | s) & (q | r) & (q | s)");
    }

    #[test]
    fn test_dnf_distribution() {
        assert_eq!(dnf("p & (q | r)"), "(p & q) | (p & r)");
        assert_eq!(dnf("(p & q) v r"), "(p & q) | r");
    }

    #[test]
    fn test_tautology_and_contradiction() {
        assert_eq!(cnf("p | ~p"), "true");
        assert_eq!(dnf("p | ~p"), "p | ~p");
        assert_eq!(cnf("p & ~p"), "p & ~p");
        assert_eq!(dnf("p & ~p"), "false");
    }

    #[test]
    fn test_constants_are_folded() {
        assert_eq!(cnf("p & true"), "p");
        assert_eq!(cnf("p | true"), "true");
        assert_eq!(cnf("p & false"), "false");
        assert_eq!(dnf("p | false"), "p");
        assert_eq!(dnf("p & false"), "false");
        assert_eq!(dnf("true"), "true");
        assert_eq!(cnf("~true"), "false");
    }

    #[test]
    fn test_absorption() {
        assert_eq!(cnf("p & (p | q)"), "p");
        assert_eq!(dnf("p | (p & q)"), "p");
        assert_eq!(cnf("p & p & q"), "p & q");
    }

    #[test]
    fn test_biconditional() {
        assert_eq!(cnf("p <-> q"), "(p | ~q) & (~p | q)");
        assert_eq!(dnf("p <-> q"), "(p & q) | (~p & ~q)");
    }

    #[test]
    fn test_trace_records_rules() {
        let n = normalize("~(p & q) -> ~~r", Form::Cnf);
        assert!(n.trace.contains(Rule::ImplicationElimination));
        assert_eq!(n.trace.count(Rule::DoubleNegation), 2);
        assert!(!n.trace.contains(Rule::DeMorgan));

        let n = normalize("p | (q & r)", Form::Cnf);
        assert_eq!(n.trace.count(Rule::Distribution), 1);
        assert!(!n.trace.contains(Rule::ImplicationElimination));
    }

    #[test]
    fn test_distribution_budget() {
        let expr = Expr::parse("(p & q) | (r & s) | (t & u)").unwrap();
        let mut handler = BudgetHandler::new(Options {
            max_distributions: Some(1),
            ..Options::default()
        });
        let mut normalizer = Normalizer::new(&mut handler);
        let err = normalizer.normalize(&expr, Form::Cnf).unwrap_err();
        assert_eq!(
            err,
            Error::ResourceExceeded {
                operation: Operation::Normalization
            }
        );
    }

    #[test]
    fn test_clause_budget() {
        let expr = Expr::parse("(p & q) | (r & s)").unwrap();
        let mut handler = BudgetHandler::new(Options {
            max_clauses: Some(3),
            ..Options::default()
        });
        let mut normalizer = Normalizer::new(&mut handler);
        assert!(normalizer.normalize(&expr, Form::Cnf).is_err());
    }

    #[test]
    fn test_input_is_not_modified() {
        let expr = Expr::parse("~(p -> q) | r").unwrap();
        let copy = expr.clone();
        let mut handler = NopHandler;
        Normalizer::new(&mut handler).normalize(&expr, Form::Cnf).unwrap();
        assert_eq!(expr, copy);
    }
}
