use std::fmt::{Display, Formatter};

use crate::model::Model;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SolveResult {
    /// Satisfiable; the witness leaves don't-care variables out.
    Sat(Model),
    Unsat,
}

impl SolveResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, SolveResult::Sat(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            SolveResult::Sat(model) => Some(model),
            SolveResult::Unsat => None,
        }
    }

    pub fn into_model(self) -> Option<Model> {
        match self {
            SolveResult::Sat(model) => Some(model),
            SolveResult::Unsat => None,
        }
    }
}

impl Display for SolveResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use SolveResult::*;
        match self {
            Sat(model) if f.alternate() => write!(f, "SAT {}", model),
            Sat(_) => write!(f, "SAT"),
            Unsat => write!(f, "UNSAT"),
        }
    }
}

/// Counters of a single DPLL run.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub decisions: usize,
    pub propagations: usize,
    pub pure_literals: usize,
    pub conflicts: usize,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "decisions={} propagations={} pure_literals={} conflicts={}",
            self.decisions, self.propagations, self.pure_literals, self.conflicts
        )
    }
}
