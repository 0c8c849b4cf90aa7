//! Propositional logic toolkit.
//!
//! The [`parser`] turns text into syntax trees, the [`core`] engine rewrites
//! them into normal forms, decides satisfiability with DPLL and checks
//! equivalence. The five entry points are re-exported here.

pub use expr_parser as parser;
pub use prop_nexus_core as core;

pub use prop_nexus_core::{
    are_equivalent, is_satisfiable, parse, to_cnf, to_dnf, Engine, Error, Expr, Form, IntoExpr, Model, NormalForm, Options,
    Result, SolveResult, Var,
};
