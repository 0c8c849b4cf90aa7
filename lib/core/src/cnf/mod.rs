use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Write};
use std::slice::Iter;

use clause::Clause;

use crate::formula::normal::{Form, NormalForm};
use crate::formula::var::Var;
use crate::lit::Lit;
use crate::model::Model;

pub mod clause;

/// Maps variable names to 1-based indices, in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarTable {
    names: Vec<Var>,
    index: BTreeMap<Var, u32>,
}

impl VarTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get_or_insert(&mut self, var: &Var) -> u32 {
        if let Some(&i) = self.index.get(var) {
            return i;
        }
        self.names.push(var.clone());
        let i = self.names.len() as u32;
        self.index.insert(var.clone(), i);
        i
    }

    pub fn index_of(&self, var: &Var) -> Option<u32> {
        self.index.get(var).copied()
    }

    pub fn var(&self, index: u32) -> &Var {
        &self.names[index as usize - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Var)> {
        self.names.iter().enumerate().map(|(i, v)| (i as u32 + 1, v))
    }

    /// Names the assigned variables; `None` entries are don't-cares and are left out.
    pub fn model(&self, assignment: &[Option<bool>]) -> Model {
        assignment
            .iter()
            .enumerate()
            .filter_map(|(i, value)| value.map(|b| (self.names[i].clone(), b)))
            .collect()
    }
}

/// Clause set over integer literals, the input of the DPLL search.
#[derive(Debug, Clone, Default)]
pub struct Cnf {
    pub max_var: usize,
    pub clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> Iter<'_, Clause> {
        self.clauses.iter()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn add_clause(&mut self, clause: impl Into<Clause>) {
        let clause = clause.into();
        if let Some(max) = clause.iter().map(|lit| lit.var() as usize).max() {
            self.max_var = self.max_var.max(max);
        }
        self.clauses.push(clause);
    }

    /// Numbers the variables of a CNF clause set.
    pub fn from_normal_form(nf: &NormalForm) -> (Self, VarTable) {
        debug_assert_eq!(nf.form(), Form::Cnf);
        let mut table = VarTable::new();
        let mut cnf = Cnf::new();
        for clause in nf.clauses() {
            let lits: Vec<Lit> = clause
                .iter()
                .map(|lit| Lit::from_var(table.get_or_insert(&lit.var), lit.negated))
                .collect();
            cnf.add_clause(lits);
        }
        cnf.max_var = cnf.max_var.max(table.len());
        (cnf, table)
    }

    /// DIMACS text, with a `c <index> <name>` comment line per variable.
    pub fn to_dimacs(&self, table: &VarTable) -> String {
        let mut out = String::new();
        for (i, var) in table.iter() {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "c {} {}", i, var);
        }
        let _ = writeln!(out, "p cnf {} {}", self.max_var, self.clauses.len());
        for clause in self.clauses.iter() {
            for lit in clause.iter() {
                let _ = write!(out, "{} ", lit);
            }
            out.push_str("0\n");
        }
        out
    }
}

impl<I> From<I> for Cnf
where
    I: IntoIterator,
    I::Item: Into<Clause>,
{
    fn from(iter: I) -> Self {
        let mut cnf = Self::new();
        for clause in iter.into_iter() {
            cnf.add_clause(clause)
        }
        cnf
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for clause in self.clauses.iter() {
            list.entry(&format_args!("{}", clause));
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::formula::expr::Expr;
    use crate::formula::normalize::Normalizer;
    use crate::handler::NopHandler;

    use super::*;

    fn normal_form(input: &str) -> NormalForm {
        let expr = Expr::parse(input).unwrap();
        Normalizer::new(&mut NopHandler).normalize(&expr, Form::Cnf).unwrap()
    }

    #[test]
    fn test_from_normal_form() {
        let (cnf, table) = Cnf::from_normal_form(&normal_form("(p | q) -> r"));
        assert_eq!(table.len(), 3);
        assert_eq!(cnf.max_var, 3);
        assert_eq!(table.var(1), &Var::new("p"));
        let p = table.index_of(&Var::new("p")).unwrap() as i32;
        let q = table.index_of(&Var::new("q")).unwrap() as i32;
        let r = table.index_of(&Var::new("r")).unwrap() as i32;
        assert_eq!(cnf.clauses, vec![Clause::from([-p, r]), Clause::from([-q, r])]);
    }

    #[test]
    fn test_to_dimacs() {
        let (cnf, table) = Cnf::from_normal_form(&normal_form("p & (~p | q)"));
        assert_eq!(cnf.to_dimacs(&table), "c 1 p\nc 2 q\np cnf 2 2\n1 0\n-1 2 0\n");
    }

    #[test]
    fn test_model_skips_dont_cares() {
        let mut table = VarTable::new();
        table.get_or_insert(&Var::new("p"));
        table.get_or_insert(&Var::new("q"));
        let model = table.model(&[Some(true), None]);
        assert_eq!(model.value(&Var::new("p")), Some(true));
        assert_eq!(model.value(&Var::new("q")), None);
    }
}
