use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use derive_more::{Deref, IntoIterator};
use itertools::Itertools;

use crate::formula::var::Var;

/// A (possibly partial) assignment of truth values to variables.
///
/// Models returned by the solver only contain the variables the search had
/// to decide; the remaining variables are don't-cares and may take any value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, IntoIterator)]
pub struct Model(BTreeMap<Var, bool>);

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, var: Var, value: bool) {
        self.0.insert(var, value);
    }

    pub fn value(&self, var: &Var) -> Option<bool> {
        self.0.get(var).copied()
    }

    /// Assigns `false` to every variable of `vars` that is not assigned yet.
    pub fn complete<'a, I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = &'a Var>,
    {
        for var in vars {
            self.0.entry(var.clone()).or_insert(false);
        }
        self
    }
}

impl FromIterator<(Var, bool)> for Model {
    fn from_iter<T: IntoIterator<Item = (Var, bool)>>(iter: T) -> Self {
        Model(iter.into_iter().collect())
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.0
                .iter()
                .format_with(", ", |(var, value), f| f(&format_args!("{var}: {}", *value as u8)))
        )
    }
}
