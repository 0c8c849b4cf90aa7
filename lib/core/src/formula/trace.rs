use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

/// A rewrite rule applied by the normalizer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    ImplicationElimination,
    BiconditionalElimination,
    DeMorgan,
    DoubleNegation,
    Distribution,
    ConstantFolding,
    ComplementElimination,
    Absorption,
}

impl Rule {
    /// The law behind the rule, in the rendering syntax.
    pub fn law(self) -> &'static str {
        match self {
            Rule::ImplicationElimination => "p -> q == ~p | q",
            Rule::BiconditionalElimination => "p <-> q == (~p | q) & (~q | p)",
            Rule::DeMorgan => "~(p & q) == ~p | ~q, ~(p | q) == ~p & ~q",
            Rule::DoubleNegation => "~~p == p",
            Rule::Distribution => "p | (q & r) == (p | q) & (p | r)",
            Rule::ConstantFolding => "p & true == p, p | true == true",
            Rule::ComplementElimination => "p | ~p == true, p & ~p == false",
            Rule::Absorption => "p & (p | q) == p",
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rule::ImplicationElimination => "implication elimination",
            Rule::BiconditionalElimination => "biconditional elimination",
            Rule::DeMorgan => "De Morgan",
            Rule::DoubleNegation => "double negation",
            Rule::Distribution => "distribution",
            Rule::ConstantFolding => "constant folding",
            Rule::ComplementElimination => "complement elimination",
            Rule::Absorption => "absorption",
        };
        if f.alternate() {
            write!(f, "{} ({})", name, self.law())
        } else {
            write!(f, "{}", name)
        }
    }
}

/// How many times each rule fired during a normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    counts: BTreeMap<Rule, usize>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, rule: Rule) {
        *self.counts.entry(rule).or_insert(0) += 1;
    }

    pub fn count(&self, rule: Rule) -> usize {
        self.counts.get(&rule).copied().unwrap_or(0)
    }

    pub fn contains(&self, rule: Rule) -> bool {
        self.count(rule) > 0
    }

    pub fn rules(&self) -> impl Iterator<Item = Rule> + '_ {
        self.counts.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn merge(&mut self, other: &Trace) {
        for (&rule, &n) in other.counts.iter() {
            *self.counts.entry(rule).or_insert(0) += n;
        }
    }
}

impl Display for Trace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "no rewrites");
        }
        write!(
            f,
            "{}",
            self.counts.iter().format_with(", ", |(rule, n), f| f(&format_args!("{rule} x{n}")))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_counts() {
        let mut trace = Trace::new();
        trace.record(Rule::DeMorgan);
        trace.record(Rule::ImplicationElimination);
        trace.record(Rule::DeMorgan);
        assert_eq!(trace.count(Rule::DeMorgan), 2);
        assert!(!trace.contains(Rule::Distribution));
        assert_eq!(trace.to_string(), "implication elimination x1, De Morgan x2");
    }

    #[test]
    fn test_rule_alternate_display_shows_law() {
        assert_eq!(format!("{:#}", Rule::DoubleNegation), "double negation (~~p == p)");
    }
}
