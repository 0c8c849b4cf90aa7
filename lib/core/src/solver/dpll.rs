use log::debug;

use crate::cnf::clause::Clause;
use crate::cnf::Cnf;
use crate::error::{ResourceExceededSnafu, Result};
use crate::handler::{ComputationHandler, Event, Operation};
use crate::lit::Lit;
use crate::solver::types::Stats;

/// Value of a clause under a partial assignment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ClauseState {
    Satisfied,
    Conflict,
    Unit(Lit),
    Unresolved,
}

/// Davis-Putnam-Logemann-Loveland search with unit propagation and
/// pure-literal elimination.
///
/// Assignments are undone chronologically through the trail; no clauses are learnt.
pub struct Dpll<'a> {
    cnf: &'a Cnf,
    handler: &'a mut dyn ComputationHandler,
    assignment: Vec<Option<bool>>,
    trail: Vec<Lit>,
    stats: Stats,
}

impl<'a> Dpll<'a> {
    pub fn new(cnf: &'a Cnf, handler: &'a mut dyn ComputationHandler) -> Self {
        Dpll {
            cnf,
            handler,
            assignment: vec![None; cnf.max_var],
            trail: Vec::new(),
            stats: Stats::default(),
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Current assignment, indexed by `var - 1`; unassigned variables are `None`.
    pub fn assignment(&self) -> &[Option<bool>] {
        &self.assignment
    }

    pub fn solve(&mut self) -> Result<bool> {
        debug!("Dpll::solve: {} vars, {} clauses", self.cnf.max_var, self.cnf.num_clauses());
        let sat = self.search()?;
        debug!("Dpll::solve: {} ({})", if sat { "SAT" } else { "UNSAT" }, self.stats);
        Ok(sat)
    }

    fn search(&mut self) -> Result<bool> {
        if !self.handler.should_resume(Event::BranchStarted) {
            return ResourceExceededSnafu {
                operation: Operation::Satisfiability,
            }
            .fail();
        }

        let mark = self.trail.len();
        if !self.propagate() {
            self.stats.conflicts += 1;
            self.backtrack(mark);
            return Ok(false);
        }
        self.eliminate_pure_literals();

        let var = match self.pick_branching_variable() {
            Some(var) => var,
            None => return Ok(true),
        };
        for value in [true, false] {
            self.stats.decisions += 1;
            let level = self.trail.len();
            self.assign(Lit::from_var(var, !value));
            if self.search()? {
                return Ok(true);
            }
            self.backtrack(level);
        }

        self.backtrack(mark);
        Ok(false)
    }

    fn value(&self, lit: Lit) -> Option<bool> {
        self.assignment[lit.index()].map(|b| lit.under(b))
    }

    fn assign(&mut self, lit: Lit) {
        debug_assert!(self.assignment[lit.index()].is_none());
        self.assignment[lit.index()] = Some(!lit.is_negated());
        self.trail.push(lit);
    }

    fn backtrack(&mut self, level: usize) {
        for lit in self.trail.drain(level..) {
            self.assignment[lit.index()] = None;
        }
    }

    fn state(&self, clause: &Clause) -> ClauseState {
        let mut unassigned = None;
        let mut count = 0;
        for &lit in clause.iter() {
            match self.value(lit) {
                Some(true) => return ClauseState::Satisfied,
                Some(false) => {}
                None => {
                    count += 1;
                    unassigned = Some(lit);
                }
            }
        }
        match (count, unassigned) {
            (0, _) => ClauseState::Conflict,
            (1, Some(lit)) => ClauseState::Unit(lit),
            _ => ClauseState::Unresolved,
        }
    }

    /// Assigns unit clauses until fixpoint. Returns `false` on a falsified clause.
    fn propagate(&mut self) -> bool {
        loop {
            let mut changed = false;
            for clause in self.cnf.iter() {
                match self.state(clause) {
                    ClauseState::Conflict => return false,
                    ClauseState::Unit(lit) => {
                        self.stats.propagations += 1;
                        self.assign(lit);
                        changed = true;
                    }
                    ClauseState::Satisfied | ClauseState::Unresolved => {}
                }
            }
            if !changed {
                return true;
            }
        }
    }

    /// Assigns every variable that occurs with a single polarity among the
    /// unsatisfied clauses.
    fn eliminate_pure_literals(&mut self) {
        loop {
            // Bit 0: seen positive, bit 1: seen negative.
            let mut polarity = vec![0u8; self.cnf.max_var];
            for clause in self.cnf.iter() {
                if self.state(clause) == ClauseState::Satisfied {
                    continue;
                }
                for &lit in clause.iter() {
                    if self.value(lit).is_none() {
                        polarity[lit.index()] |= if lit.is_negated() { 2 } else { 1 };
                    }
                }
            }
            let pure: Vec<Lit> = polarity
                .iter()
                .enumerate()
                .filter_map(|(i, &p)| match p {
                    1 => Some(Lit::from_var(i as u32 + 1, false)),
                    2 => Some(Lit::from_var(i as u32 + 1, true)),
                    _ => None,
                })
                .collect();
            if pure.is_empty() {
                return;
            }
            for lit in pure {
                self.stats.pure_literals += 1;
                self.assign(lit);
            }
        }
    }

    /// First unassigned variable of a shortest unsatisfied clause.
    fn pick_branching_variable(&self) -> Option<u32> {
        self.cnf
            .iter()
            .filter(|clause| self.state(clause) != ClauseState::Satisfied)
            .map(|clause| {
                let free: Vec<Lit> = clause.iter().copied().filter(|&lit| self.value(lit).is_none()).collect();
                (free.len(), free)
            })
            .filter(|(n, _)| *n > 0)
            .min_by_key(|(n, _)| *n)
            .map(|(_, free)| free[0].var())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::handler::{BudgetHandler, NopHandler};
    use crate::options::Options;

    use super::*;

    fn solve(clauses: Vec<Vec<i32>>) -> (bool, Vec<Option<bool>>, Stats) {
        let cnf = Cnf::from(clauses);
        let mut handler = NopHandler;
        let mut dpll = Dpll::new(&cnf, &mut handler);
        let sat = dpll.solve().unwrap();
        (sat, dpll.assignment().to_vec(), dpll.stats())
    }

    fn satisfies(clauses: &[Vec<i32>], assignment: &[Option<bool>]) -> bool {
        clauses.iter().all(|clause| {
            clause
                .iter()
                .any(|&v| assignment[v.unsigned_abs() as usize - 1] == Some(v > 0))
        })
    }

    #[test]
    fn test_unit_propagation() {
        let clauses = vec![vec![1], vec![-1, 2], vec![-2, 3]];
        let (sat, assignment, stats) = solve(clauses.clone());
        assert!(sat);
        assert!(satisfies(&clauses, &assignment));
        assert_eq!(stats.decisions, 0);
        assert!(stats.propagations >= 3);
    }

    #[test]
    fn test_pure_literal_leaves_dont_cares() {
        // 2 occurs only positively; once it is set, 1 needs no value.
        let clauses = vec![vec![1, 2], vec![-1, 2]];
        let (sat, assignment, stats) = solve(clauses);
        assert!(sat);
        assert_eq!(assignment, vec![None, Some(true)]);
        assert_eq!(stats.pure_literals, 1);
    }

    #[test]
    fn test_unsat_requires_branching() {
        let clauses = vec![vec![1, 2], vec![1, -2], vec![-1, 2], vec![-1, -2]];
        let (sat, _, stats) = solve(clauses);
        assert!(!sat);
        assert!(stats.decisions >= 2);
        assert!(stats.conflicts >= 2);
    }

    #[test]
    fn test_empty_clause_is_unsat() {
        let (sat, _, _) = solve(vec![vec![1], vec![]]);
        assert!(!sat);
    }

    #[test]
    fn test_no_clauses_is_sat() {
        let (sat, assignment, _) = solve(vec![]);
        assert!(sat);
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_pigeonhole_3_into_2() {
        // Pigeon i in hole j is variable 2*i + j + 1.
        let p = |i: i32, j: i32| 2 * i + j + 1;
        let mut clauses = vec![];
        for i in 0..3 {
            clauses.push(vec![p(i, 0), p(i, 1)]);
        }
        for j in 0..2 {
            for a in 0..3 {
                for b in (a + 1)..3 {
                    clauses.push(vec![-p(a, j), -p(b, j)]);
                }
            }
        }
        let (sat, _, _) = solve(clauses);
        assert!(!sat);
    }

    #[test]
    fn test_cancelled_search() {
        let cnf = Cnf::from(vec![vec![1, 2], vec![-1, 2]]);
        let flag = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let mut handler = BudgetHandler::new(Options::default()).with_cancel_flag(flag);
        handler.started(Operation::Satisfiability);
        let mut dpll = Dpll::new(&cnf, &mut handler);
        assert!(dpll.solve().is_err());
    }
}
