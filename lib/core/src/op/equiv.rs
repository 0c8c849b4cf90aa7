use log::debug;
use tap::Tap;

use crate::error::Result;
use crate::formula::expr::Expr;
use crate::formula::normal::Form;
use crate::formula::normalize::Normalizer;
use crate::formula::trace::Trace;
use crate::handler::{ComputationHandler, Operation};
use crate::model::Model;
use crate::solver::{solve, SolveResult};

/// Outcome of an equivalence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equivalence {
    /// Assignment on which the formulas differ; `None` when they are equivalent.
    pub counterexample: Option<Model>,
    /// Rewrites that bring both formulas to conjunctive normal form.
    /// Empty unless the formulas are equivalent.
    pub trace: Trace,
}

impl Equivalence {
    pub fn is_equivalent(&self) -> bool {
        self.counterexample.is_none()
    }
}

/// An assignment on which `lhs` and `rhs` differ, if any.
///
/// The model assigns every variable of both formulas; variables occurring in
/// only one of them are quantified universally, like all the others.
pub fn counterexample(lhs: &Expr, rhs: &Expr, handler: &mut dyn ComputationHandler) -> Result<Option<Model>> {
    handler.started(Operation::Equivalence);
    if lhs == rhs {
        debug!("counterexample: structurally equal");
        return Ok(None);
    }
    let difference = !Expr::iff(lhs.clone(), rhs.clone());
    let result = match solve(&difference, handler)? {
        SolveResult::Sat(model) => Some(model.complete(&difference.vars())),
        SolveResult::Unsat => None,
    };
    Ok(result.tap(|m| debug!("counterexample({}, {}) = {:?}", lhs, rhs, m.as_ref().map(|m| m.to_string()))))
}

/// Whether `lhs` and `rhs` agree on every assignment: `~(lhs <-> rhs)` is unsatisfiable.
pub fn are_equivalent(lhs: &Expr, rhs: &Expr, handler: &mut dyn ComputationHandler) -> Result<bool> {
    Ok(counterexample(lhs, rhs, handler)?.is_none())
}

/// Decides equivalence and, for equivalent formulas, names the laws used to
/// rewrite both of them into the same normal form.
pub fn check(lhs: &Expr, rhs: &Expr, handler: &mut dyn ComputationHandler) -> Result<Equivalence> {
    let counterexample = counterexample(lhs, rhs, handler)?;
    let mut trace = Trace::new();
    if counterexample.is_none() {
        for expr in [lhs, rhs] {
            let mut normalizer = Normalizer::new(handler);
            normalizer.normalize(expr, Form::Cnf)?;
            trace.merge(&normalizer.into_trace());
        }
        debug!("check({}, {}): equivalent by {}", lhs, rhs, trace);
    }
    Ok(Equivalence { counterexample, trace })
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::formula::trace::Rule;
    use crate::handler::{BudgetHandler, NopHandler};
    use crate::options::Options;

    use super::*;

    fn equivalent(lhs: &str, rhs: &str) -> bool {
        let lhs = Expr::parse(lhs).unwrap();
        let rhs = Expr::parse(rhs).unwrap();
        are_equivalent(&lhs, &rhs, &mut NopHandler).unwrap()
    }

    #[test]
    fn test_equivalent() {
        assert!(equivalent("p -> q", "~p | q"));
        assert!(equivalent("~(p & q)", "~p | ~q"));
        assert!(equivalent("p <-> q", "(p -> q) & (q -> p)"));
        assert!(equivalent("p & (q | r)", "(p & q) | (p & r)"));
        assert!(equivalent("p", "p"));
        assert!(equivalent("p | ~p", "q -> q"));
    }

    #[test]
    fn test_not_equivalent() {
        assert!(!equivalent("p -> q", "q -> p"));
        assert!(!equivalent("p", "q"));
        assert!(!equivalent("p & q", "p"));
    }

    #[test]
    fn test_counterexample_assigns_all_variables() {
        let lhs = Expr::parse("p -> q").unwrap();
        let rhs = Expr::parse("q -> p").unwrap();
        let model = counterexample(&lhs, &rhs, &mut NopHandler).unwrap().unwrap();
        assert_eq!(model.len(), 2);
        assert_ne!(lhs.eval(&model), rhs.eval(&model));
    }

    #[test]
    fn test_variable_in_one_formula_only() {
        let lhs = Expr::parse("p & (q | ~q)").unwrap();
        let rhs = Expr::parse("p").unwrap();
        assert!(are_equivalent(&lhs, &rhs, &mut NopHandler).unwrap());

        let lhs = Expr::parse("p & q").unwrap();
        let model = counterexample(&lhs, &rhs, &mut NopHandler).unwrap().unwrap();
        assert_eq!(model.value(&"p".into()), Some(true));
        assert_eq!(model.value(&"q".into()), Some(false));
    }

    #[test]
    fn test_budget_applies_to_equivalence() {
        let lhs = Expr::parse("(p & q) | (r & s) | (t & u)").unwrap();
        let rhs = Expr::parse("(p | r | t) & (q | s | u)").unwrap();
        let mut handler = BudgetHandler::new(Options {
            max_distributions: Some(2),
            ..Options::default()
        });
        assert!(are_equivalent(&lhs, &rhs, &mut handler).is_err());
    }

    #[test]
    fn test_check_names_de_morgan() {
        let lhs = Expr::parse("~(p & q)").unwrap();
        let rhs = Expr::parse("~p | ~q").unwrap();
        let result = check(&lhs, &rhs, &mut NopHandler).unwrap();
        assert!(result.is_equivalent());
        assert!(result.trace.contains(Rule::DeMorgan));
        assert!(!result.trace.contains(Rule::ImplicationElimination));
    }

    #[test]
    fn test_check_merges_both_sides() {
        let lhs = Expr::parse("p -> q").unwrap();
        let rhs = Expr::parse("~~(~p | q)").unwrap();
        let result = check(&lhs, &rhs, &mut NopHandler).unwrap();
        assert_eq!(result.trace.count(Rule::ImplicationElimination), 1);
        assert!(result.trace.contains(Rule::DoubleNegation));
    }

    #[test]
    fn test_check_without_equivalence_has_no_trace() {
        let lhs = Expr::parse("p -> q").unwrap();
        let rhs = Expr::parse("q -> p").unwrap();
        let result = check(&lhs, &rhs, &mut NopHandler).unwrap();
        assert!(!result.is_equivalent());
        assert!(result.trace.is_empty());
    }
}
