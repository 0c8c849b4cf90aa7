use log::debug;

use crate::cnf::Cnf;
use crate::error::Result;
use crate::formula::expr::Expr;
use crate::formula::normal::{Form, NormalForm};
use crate::formula::normalize::Normalizer;
use crate::handler::{ComputationHandler, Operation};
use crate::model::Model;

pub use self::dpll::Dpll;
pub use self::types::{SolveResult, Stats};

pub mod dpll;
pub mod types;

/// Decides a normal form. Constants are answered directly, a DNF is
/// satisfiable iff it has a term (which is then the witness), a CNF goes to DPLL.
pub fn solve_normal_form(nf: &NormalForm, handler: &mut dyn ComputationHandler) -> Result<SolveResult> {
    if let Some(value) = nf.as_constant() {
        debug!("solve_normal_form: constant {}", value);
        return Ok(if value { SolveResult::Sat(Model::new()) } else { SolveResult::Unsat });
    }
    match nf.form() {
        Form::Dnf => {
            let term = nf.clauses().next();
            Ok(match term {
                Some(term) => SolveResult::Sat(term.iter().map(|lit| (lit.var.clone(), !lit.negated)).collect()),
                None => SolveResult::Unsat,
            })
        }
        Form::Cnf => {
            let (cnf, table) = Cnf::from_normal_form(nf);
            let mut dpll = Dpll::new(&cnf, handler);
            if dpll.solve()? {
                Ok(SolveResult::Sat(table.model(dpll.assignment())))
            } else {
                Ok(SolveResult::Unsat)
            }
        }
    }
}

/// Satisfiability of an arbitrary formula: CNF conversion followed by DPLL.
pub fn solve(expr: &Expr, handler: &mut dyn ComputationHandler) -> Result<SolveResult> {
    handler.started(Operation::Satisfiability);
    let nf = Normalizer::new(handler).normalize(expr, Form::Cnf)?;
    solve_normal_form(&nf, handler)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::formula::var::Var;
    use crate::handler::NopHandler;

    use super::*;

    fn check(input: &str) -> SolveResult {
        let expr = Expr::parse(input).unwrap();
        let result = solve(&expr, &mut NopHandler).unwrap();
        if let Some(model) = result.model() {
            // Don't-cares may take any value; `false` is as good as any.
            assert!(expr.eval(&model.clone().complete(&expr.vars())), "{} is not a witness of {}", model, input);
        }
        result
    }

    #[test]
    fn test_solve() {
        assert!(check("p & q").is_sat());
        assert!(check("(p | q) & ~p").is_sat());
        assert!(!check("p & ~p").is_sat());
        assert!(!check("(p -> q) & p & ~q").is_sat());
        assert!(check("p <-> ~q").is_sat());
        assert!(!check("false").is_sat());
        assert_eq!(check("true"), SolveResult::Sat(Model::new()));
    }

    #[test]
    fn test_tautology_witness_is_empty() {
        assert_eq!(check("p | ~p"), SolveResult::Sat(Model::new()));
    }

    #[test]
    fn test_witness_values() {
        let result = check("p & ~q");
        let model = result.model().unwrap();
        assert_eq!(model.value(&Var::new("p")), Some(true));
        assert_eq!(model.value(&Var::new("q")), Some(false));
    }

    #[test]
    fn test_dnf_is_solved_without_search() {
        let expr = Expr::parse("(p & ~q) | r").unwrap();
        let nf = Normalizer::new(&mut NopHandler).normalize(&expr, Form::Dnf).unwrap();
        let result = solve_normal_form(&nf, &mut NopHandler).unwrap();
        let model = result.model().unwrap();
        assert_eq!(model.len(), 2);
        assert!(expr.eval(model));
    }

    #[test]
    fn test_display() {
        assert_eq!(check("p & ~p").to_string(), "UNSAT");
        assert_eq!(format!("{:#}", check("p & ~q")), "SAT {p: 1, q: 0}");
    }
}
