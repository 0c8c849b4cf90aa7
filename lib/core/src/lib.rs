//! Propositional logic engine: normal forms, satisfiability and equivalence.
//!
//! ```
//! use prop_nexus_core::{are_equivalent, is_satisfiable, to_cnf};
//!
//! assert_eq!(to_cnf("(p | q) -> r").unwrap(), "(~p | r) & (~q | r)");
//! assert!(is_satisfiable("p | ~p").unwrap());
//! assert!(are_equivalent("p -> q", "~p | q").unwrap());
//! ```

pub mod api;
pub mod cnf;
pub mod error;
pub mod formula;
pub mod handler;
pub mod lit;
pub mod model;
pub mod op;
pub mod options;
pub mod solver;

pub use api::{are_equivalent, is_satisfiable, parse, to_cnf, to_dnf, Engine, IntoExpr};
pub use error::{Error, Result};
pub use formula::expr::Expr;
pub use formula::normal::{Form, NormalForm};
pub use formula::var::Var;
pub use model::Model;
pub use options::{Options, DEFAULT_OPTIONS};
pub use solver::SolveResult;
