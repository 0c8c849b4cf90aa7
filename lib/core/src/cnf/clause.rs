use std::fmt::{Display, Formatter};
use std::slice::Iter;

use itertools::Itertools;

use crate::lit::Lit;

/// Disjunction of integer literals.
#[derive(Debug, Clone)]
pub struct Clause {
    pub lits: Vec<Lit>,
}

impl Clause {
    pub fn new(lits: Vec<Lit>) -> Self {
        Clause { lits }
    }

    pub fn iter(&self) -> Iter<'_, Lit> {
        self.lits.iter()
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }
}

impl<I> From<I> for Clause
where
    I: IntoIterator,
    I::Item: Into<Lit>,
{
    fn from(iter: I) -> Self {
        Self::new(iter.into_iter().map_into::<Lit>().collect())
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for lit in self.lits.iter() {
            list.entry(&format_args!("{}", lit));
        }
        list.finish()
    }
}

impl PartialEq for Clause {
    fn eq(&self, other: &Self) -> bool {
        if self.lits.len() != other.lits.len() {
            return false;
        }
        let lhs = self.lits.iter().copied().sorted_unstable();
        let rhs = other.lits.iter().copied().sorted_unstable();
        itertools::equal(lhs, rhs)
    }
}

impl Eq for Clause {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_eq_ignores_order() {
        assert_eq!(Clause::from([1, -2, 3]), Clause::from([3, 1, -2]));
        assert_ne!(Clause::from([1, -2]), Clause::from([1, 2]));
    }

    #[test]
    fn test_clause_display() {
        assert_eq!(Clause::from([1, -2]).to_string(), "[1, -2]");
    }
}
