//! Square-free monomials over Boolean variables.
//!
//! A [`Monomial`] is a product of distinct variables, stored as a 64-bit set.
//! Because every variable satisfies `x² = x`, multiplication is set union.
//!
//! # Order
//!
//! Variable `xi` lives at bit `64 - i`, so comparing the raw words is the
//! lexicographic order with `x1 > x2 > … > x64` and `1` the smallest monomial.
//! Properties the reductions rely on:
//!
//! - `a | b` implies `a <= b`,
//! - `t < l` and `c` coprime to `l` imply `c·t < c·l`,
//! - there are finitely many monomials, so it is a well-order.
//!
//! Compatibility with multiplication only holds for coprime factors: `x2 < x1`
//! but `x2·x1 > x1·x1 = x1`. Reduction multiplies a polynomial with leading
//! monomial `l` by `l.complement(m)`, which never shares a variable with `l`,
//! so the leading term is scaled to exactly `m` and every other term stays below.
//!
//! It is the only order in the crate. Both polynomial representations pick
//! their leading monomial with it.

use std::fmt;
use std::ops::{Div, Mul};

use crate::error::{Error, Result};
use crate::types::{Var, MAX_VARS};

/// A square-free product of variables.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Monomial(u64);

impl Monomial {
    /// The identity monomial `1`.
    pub const ONE: Monomial = Monomial(0);

    /// Returns the identity monomial `1`.
    pub const fn one() -> Self {
        Self::ONE
    }

    #[inline]
    const fn bit(var: Var) -> u64 {
        1u64 << (MAX_VARS - var.id())
    }

    /// Creates the monomial consisting of a single variable.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in `1..=64`.
    pub fn var(id: u32) -> Self {
        Monomial(Self::bit(Var::new(id)))
    }

    /// Checked version of [`Monomial::var`].
    pub fn try_var(id: u32) -> Result<Self> {
        Var::checked(id)
            .map(|v| Monomial(Self::bit(v)))
            .ok_or(Error::VariableOutOfRange { var: id, max: MAX_VARS })
    }

    /// Creates the product of the given variables. Repeated variables collapse.
    ///
    /// # Panics
    ///
    /// Panics if any index is not in `1..=64`.
    pub fn from_vars(vars: impl IntoIterator<Item = u32>) -> Self {
        vars.into_iter().fold(Self::ONE, |m, id| m * Monomial::var(id))
    }

    /// Checked version of [`Monomial::from_vars`].
    pub fn try_from_vars(vars: impl IntoIterator<Item = u32>) -> Result<Self> {
        vars.into_iter().try_fold(Self::ONE, |m, id| Ok(m * Monomial::try_var(id)?))
    }

    /// Returns the raw bit pattern.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns true if this is the identity monomial.
    pub const fn is_one(self) -> bool {
        self.0 == 0
    }

    /// Number of variables in the monomial.
    pub const fn degree(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if the monomial contains `var`.
    pub fn contains(self, var: Var) -> bool {
        self.0 & Self::bit(var) != 0
    }

    /// Product of two monomials (set union).
    pub const fn mul(self, other: Monomial) -> Monomial {
        Monomial(self.0 | other.0)
    }

    /// Least common multiple. For square-free monomials this is the product.
    pub const fn lcm(self, other: Monomial) -> Monomial {
        self.mul(other)
    }

    /// Returns true if every variable of `self` also occurs in `other`.
    pub const fn divides(self, other: Monomial) -> bool {
        self.0 & !other.0 == 0
    }

    /// Returns true if the two monomials share no variable.
    pub const fn is_coprime(self, other: Monomial) -> bool {
        self.0 & other.0 == 0
    }

    /// The quotient `other / self`, i.e. `other` without the variables of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `self` does not divide `other`.
    pub fn complement(self, other: Monomial) -> Monomial {
        match self.checked_complement(other) {
            Some(m) => m,
            None => panic!("{} does not divide {}", self, other),
        }
    }

    /// The quotient `other / self`, or `None` if `self` does not divide `other`.
    pub const fn checked_complement(self, other: Monomial) -> Option<Monomial> {
        if self.divides(other) {
            Some(Monomial(other.0 & !self.0))
        } else {
            None
        }
    }

    /// Variables of the monomial in ascending index order.
    pub fn vars(self) -> Vec<Var> {
        let mut vars = Vec::with_capacity(self.degree() as usize);
        let mut bits = self.0;
        while bits != 0 {
            let lz = bits.leading_zeros();
            vars.push(Var::new(lz + 1));
            bits &= !(1u64 << (63 - lz));
        }
        vars
    }

    /// The variable with the smallest index, or `None` for `1`.
    pub fn min_var(self) -> Option<Var> {
        if self.is_one() {
            None
        } else {
            Some(Var::new(self.0.leading_zeros() + 1))
        }
    }

    /// The variable with the largest index, or `None` for `1`.
    pub fn max_var(self) -> Option<Var> {
        if self.is_one() {
            None
        } else {
            Some(Var::new(MAX_VARS - self.0.trailing_zeros()))
        }
    }

    /// Evaluates the monomial under an assignment given as the set of true variables.
    pub const fn eval(self, assignment: Monomial) -> bool {
        self.divides(assignment)
    }
}

impl From<Var> for Monomial {
    fn from(var: Var) -> Self {
        Monomial(Monomial::bit(var))
    }
}

impl Mul for Monomial {
    type Output = Monomial;

    fn mul(self, rhs: Monomial) -> Monomial {
        Monomial::mul(self, rhs)
    }
}

/// `b / a` is `a.complement(b)`.
impl Div for Monomial {
    type Output = Monomial;

    fn div(self, rhs: Monomial) -> Monomial {
        rhs.complement(self)
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        for (i, var) in self.vars().into_iter().enumerate() {
            if i > 0 {
                write!(f, "*")?;
            }
            write!(f, "{}", var)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> (Monomial, Monomial, Monomial) {
        (Monomial::var(1), Monomial::var(2), Monomial::var(3))
    }

    #[test]
    fn test_one() {
        let one = Monomial::one();
        assert!(one.is_one());
        assert_eq!(one.degree(), 0);
        assert_eq!(one.to_string(), "1");
        assert!(!Monomial::var(1).is_one());
    }

    #[test]
    fn test_mul() {
        let (a, b, _) = abc();
        assert_eq!(a * a, a);
        assert_eq!(a * b, b * a);
        assert_eq!(a * Monomial::one(), a);
        assert_eq!((a * b).to_string(), "x1*x2");
    }

    #[test]
    fn test_complement() {
        let (a, b, c) = abc();
        let ab = a * b;
        let abc = a * b * c;
        let bc = b * c;
        let one = Monomial::one();

        assert_eq!(one.complement(a), a);
        assert_eq!(b.complement(ab), a);
        assert_eq!(a.complement(ab), b);
        assert_eq!(ab.complement(abc), c);
        assert_eq!(abc / ab, c);

        assert_eq!(a.checked_complement(one), None);
        assert_eq!(b.checked_complement(a), None);
        assert_eq!(bc.checked_complement(ab), None);
    }

    #[test]
    #[should_panic(expected = "x2 does not divide x1")]
    fn test_complement_not_dividing() {
        Monomial::var(2).complement(Monomial::var(1));
    }

    #[test]
    fn test_divides() {
        let (a, b, _) = abc();
        let one = Monomial::one();
        assert!(one.divides(one));
        assert!(one.divides(a));
        assert!(!a.divides(one));
        assert!(a.divides(a * b));
        assert!(!(a * b).divides(b));
    }

    #[test]
    fn test_coprime() {
        let (a, b, c) = abc();
        assert!(a.is_coprime(b));
        assert!((a * c).is_coprime(b));
        assert!(!a.is_coprime(a));
        assert!(!(a * b).is_coprime(b));
        assert!(Monomial::one().is_coprime(a));
    }

    #[test]
    fn test_lex_order() {
        let (a, b, c) = abc();
        let one = Monomial::one();

        assert!(a > b);
        assert!(b > c);
        assert!(a > b * c);
        assert!(a * b > a);
        assert!(a * c > b * c);
        assert!(c > one);

        // Compatible with divisibility.
        assert!(c <= b * c);
        assert!(one <= a);
    }

    #[test]
    fn test_order_coprime_multiplication() {
        // t < l implies c·t < c·l whenever c is coprime to l.
        let all: Vec<Monomial> = (0..16u32)
            .map(|bits| Monomial::from_vars((1..=4).filter(|i| bits & (1 << (i - 1)) != 0)))
            .collect();
        for &l in &all {
            for &t in all.iter().filter(|&&t| t < l) {
                for &c in all.iter().filter(|&&c| c.is_coprime(l)) {
                    assert!(c * t < c * l, "{} * {} >= {} * {}", c, t, c, l);
                }
            }
        }
    }

    #[test]
    fn test_order_shared_factor() {
        // Without coprimality the order is not compatible with multiplication.
        let (a, b, _) = abc();
        assert!(b < a);
        assert!(b * a > a * a);
    }

    #[test]
    fn test_complement_is_coprime() {
        let all: Vec<Monomial> = (0..16u32)
            .map(|bits| Monomial::from_vars((1..=4).filter(|i| bits & (1 << (i - 1)) != 0)))
            .collect();
        for &l in &all {
            for &m in all.iter().filter(|&&m| l.divides(m)) {
                let c = l.complement(m);
                assert!(c.is_coprime(l));
                assert_eq!(c * l, m);
            }
        }
    }

    #[test]
    fn test_vars() {
        let m = Monomial::from_vars([3, 1, 64]);
        assert_eq!(m.vars(), vec![Var::new(1), Var::new(3), Var::new(64)]);
        assert_eq!(m.max_var(), Some(Var::new(64)));
        assert_eq!(m.min_var(), Some(Var::new(1)));
        assert_eq!(m.degree(), 3);
        assert!(m.contains(Var::new(3)));
        assert!(!m.contains(Var::new(2)));
        assert_eq!(Monomial::one().max_var(), None);
    }

    #[test]
    fn test_try_var() {
        assert!(Monomial::try_var(1).is_ok());
        assert_eq!(Monomial::try_var(0), Err(Error::VariableOutOfRange { var: 0, max: 64 }));
        assert_eq!(
            Monomial::try_from_vars([1, 70]),
            Err(Error::VariableOutOfRange { var: 70, max: 64 })
        );
    }

    #[test]
    fn test_eval() {
        let (a, b, c) = abc();
        assert!((a * b).eval(a * b * c));
        assert!(!(a * b).eval(a * c));
        assert!(Monomial::one().eval(Monomial::one()));
    }
}
