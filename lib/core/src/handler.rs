use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::debug;

use crate::options::Options;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Normalization,
    Satisfiability,
    Equivalence,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Normalization => write!(f, "normalization"),
            Operation::Satisfiability => write!(f, "satisfiability search"),
            Operation::Equivalence => write!(f, "equivalence check"),
        }
    }
}

/// Progress points at which a running computation asks its handler whether to go on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    DistributionPerformed,
    ClauseCreated,
    BranchStarted,
}

/// Controls long-running computations.
///
/// The engine calls [`should_resume`](ComputationHandler::should_resume) between
/// distribution steps and before every DPLL branch; returning `false` aborts the
/// computation with [`Error::ResourceExceeded`](crate::error::Error::ResourceExceeded).
pub trait ComputationHandler {
    fn started(&mut self, _operation: Operation) {}

    fn should_resume(&mut self, _event: Event) -> bool {
        true
    }
}

/// Never aborts.
#[derive(Debug, Default, Copy, Clone)]
pub struct NopHandler;

impl ComputationHandler for NopHandler {}

/// Aborts once a distribution/clause limit or the timeout is exceeded, or
/// when the shared cancel flag is raised.
#[derive(Debug, Clone, Default)]
pub struct BudgetHandler {
    options: Options,
    cancel: Option<Arc<AtomicBool>>,
    started_at: Option<Instant>,
    pub distributions: u64,
    pub clauses: u64,
    pub branches: u64,
}

impl BudgetHandler {
    pub fn new(options: Options) -> Self {
        BudgetHandler {
            options,
            ..Default::default()
        }
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().map_or(false, |flag| flag.load(Ordering::Relaxed))
    }

    fn is_timed_out(&self) -> bool {
        match (self.options.timeout, self.started_at) {
            (Some(timeout), Some(started_at)) => started_at.elapsed() >= timeout,
            _ => false,
        }
    }
}

impl ComputationHandler for BudgetHandler {
    fn started(&mut self, operation: Operation) {
        debug!("BudgetHandler: started {}", operation);
        // Nested operations share the clock of the outermost one.
        self.started_at.get_or_insert_with(Instant::now);
    }

    fn should_resume(&mut self, event: Event) -> bool {
        let within_limit = match event {
            Event::DistributionPerformed => {
                self.distributions += 1;
                self.options.max_distributions.map_or(true, |max| self.distributions <= max)
            }
            Event::ClauseCreated => {
                self.clauses += 1;
                self.options.max_clauses.map_or(true, |max| self.clauses <= max)
            }
            Event::BranchStarted => {
                self.branches += 1;
                true
            }
        };
        let resume = within_limit && !self.is_cancelled() && !self.is_timed_out();
        if !resume {
            debug!("BudgetHandler: aborting on {:?} after {} distributions, {} clauses, {} branches", event, self.distributions, self.clauses, self.branches);
        }
        resume
    }
}
