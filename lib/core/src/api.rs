use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::info;

use crate::error::Result;
use crate::formula::expr::Expr;
use crate::formula::normal::{Form, NormalForm};
use crate::formula::normalize::{Normalized, Normalizer};
use crate::handler::{BudgetHandler, ComputationHandler, Operation};
use crate::model::Model;
use crate::op::equiv::{self, Equivalence};
use crate::options::Options;
use crate::solver::{self, SolveResult};

/// Anything that denotes a formula: source text or an already parsed tree.
pub trait IntoExpr {
    fn into_expr(self, options: &Options) -> Result<Expr>;
}

impl IntoExpr for &str {
    fn into_expr(self, options: &Options) -> Result<Expr> {
        Expr::parse_with(self, options.lex_options())
    }
}

impl IntoExpr for &String {
    fn into_expr(self, options: &Options) -> Result<Expr> {
        self.as_str().into_expr(options)
    }
}

impl IntoExpr for String {
    fn into_expr(self, options: &Options) -> Result<Expr> {
        self.as_str().into_expr(options)
    }
}

impl IntoExpr for Expr {
    fn into_expr(self, _options: &Options) -> Result<Expr> {
        Ok(self)
    }
}

impl IntoExpr for &Expr {
    fn into_expr(self, _options: &Options) -> Result<Expr> {
        Ok(self.clone())
    }
}

/// Entry point carrying [`Options`] and an optional cancel flag.
///
/// Every call gets a fresh [`BudgetHandler`], so budgets apply per call.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: Options,
    cancel: Option<Arc<AtomicBool>>,
}

impl Engine {
    pub fn new(options: Options) -> Self {
        Engine { options, cancel: None }
    }

    /// Raising `flag` from another thread aborts running calls with `ResourceExceeded`.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    fn handler(&self, operation: Operation) -> BudgetHandler {
        let mut handler = BudgetHandler::new(self.options);
        if let Some(flag) = &self.cancel {
            handler = handler.with_cancel_flag(Arc::clone(flag));
        }
        handler.started(operation);
        handler
    }

    pub fn parse(&self, input: impl IntoExpr) -> Result<Expr> {
        input.into_expr(&self.options)
    }

    /// Normal form of `input` together with the applied rewrites.
    pub fn normalize(&self, input: impl IntoExpr, form: Form) -> Result<Normalized> {
        let expr = self.parse(input)?;
        let mut handler = self.handler(Operation::Normalization);
        let mut normalizer = Normalizer::new(&mut handler);
        let nf = normalizer.normalize(&expr, form)?;
        let trace = normalizer.into_trace();
        info!("{} of {}: {} clauses ({})", form, expr, nf.num_clauses(), trace);
        Ok(Normalized { form: nf, trace })
    }

    pub fn normal_form(&self, input: impl IntoExpr, form: Form) -> Result<NormalForm> {
        Ok(self.normalize(input, form)?.form)
    }

    pub fn to_cnf(&self, input: impl IntoExpr) -> Result<String> {
        Ok(self.normal_form(input, Form::Cnf)?.to_string())
    }

    pub fn to_dnf(&self, input: impl IntoExpr) -> Result<String> {
        Ok(self.normal_form(input, Form::Dnf)?.to_string())
    }

    pub fn solve(&self, input: impl IntoExpr) -> Result<SolveResult> {
        let expr = self.parse(input)?;
        let mut handler = self.handler(Operation::Satisfiability);
        let result = solver::solve(&expr, &mut handler)?;
        info!("{}: {:#}", expr, result);
        Ok(result)
    }

    pub fn is_satisfiable(&self, input: impl IntoExpr) -> Result<bool> {
        Ok(self.solve(input)?.is_sat())
    }

    pub fn counterexample(&self, lhs: impl IntoExpr, rhs: impl IntoExpr) -> Result<Option<Model>> {
        let lhs = self.parse(lhs)?;
        let rhs = self.parse(rhs)?;
        let mut handler = self.handler(Operation::Equivalence);
        equiv::counterexample(&lhs, &rhs, &mut handler)
    }

    pub fn are_equivalent(&self, lhs: impl IntoExpr, rhs: impl IntoExpr) -> Result<bool> {
        Ok(self.counterexample(lhs, rhs)?.is_none())
    }

    /// Equivalence together with a counterexample or the laws that were applied.
    pub fn check_equivalence(&self, lhs: impl IntoExpr, rhs: impl IntoExpr) -> Result<Equivalence> {
        let lhs = self.parse(lhs)?;
        let rhs = self.parse(rhs)?;
        let mut handler = self.handler(Operation::Equivalence);
        let result = equiv::check(&lhs, &rhs, &mut handler)?;
        info!("{} == {}: {} ({})", lhs, rhs, result.is_equivalent(), result.trace);
        Ok(result)
    }
}

pub fn parse(input: impl IntoExpr) -> Result<Expr> {
    Engine::default().parse(input)
}

pub fn to_cnf(input: impl IntoExpr) -> Result<String> {
    Engine::default().to_cnf(input)
}

pub fn to_dnf(input: impl IntoExpr) -> Result<String> {
    Engine::default().to_dnf(input)
}

pub fn is_satisfiable(input: impl IntoExpr) -> Result<bool> {
    Engine::default().is_satisfiable(input)
}

pub fn are_equivalent(lhs: impl IntoExpr, rhs: impl IntoExpr) -> Result<bool> {
    Engine::default().are_equivalent(lhs, rhs)
}
