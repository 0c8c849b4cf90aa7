use std::fmt::{Display, Formatter};
use std::ops::Neg;

/// Integer literal over 1-based variable indices, DIMACS style.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Lit(i32);

impl Lit {
    pub const fn new(val: i32) -> Self {
        debug_assert!(val != 0, "literal must not be zero");
        Lit(val)
    }

    pub const fn from_var(var: u32, negated: bool) -> Self {
        let val = var as i32;
        Lit::new(if negated { -val } else { val })
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    /// 1-based variable index.
    pub const fn var(self) -> u32 {
        self.get().unsigned_abs()
    }

    pub const fn is_negated(self) -> bool {
        self.get() < 0
    }

    /// Value of the literal when its variable is set to `value`.
    pub const fn under(self, value: bool) -> bool {
        value != self.is_negated()
    }

    /// Index into a dense per-variable table.
    pub fn index(self) -> usize {
        self.var() as usize - 1
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl From<i32> for Lit {
    fn from(val: i32) -> Self {
        Self::new(val)
    }
}

impl From<&i32> for Lit {
    fn from(val: &i32) -> Self {
        Self::new(*val)
    }
}

// Into<i32>
impl From<Lit> for i32 {
    fn from(lit: Lit) -> Self {
        lit.get()
    }
}

// -Lit
impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_from_var() {
        assert_eq!(Lit::from_var(3, false).get(), 3);
        assert_eq!(Lit::from_var(3, true).get(), -3);
        assert_eq!(Lit::from_var(3, true).var(), 3);
        assert_eq!(Lit::from_var(3, true).index(), 2);
    }

    #[test]
    fn test_lit_under() {
        let lit = Lit::new(-2);
        assert!(lit.is_negated());
        assert!(lit.under(false));
        assert!(!lit.under(true));
        assert!((-lit).under(true));
    }

    #[test]
    fn test_lit_conversions() {
        let lit: Lit = (&42).into();
        let value: i32 = (-lit).into();
        assert_eq!(value, -42);
        assert_eq!(format!("{}", lit), "42");
    }
}
