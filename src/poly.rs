//! The Boolean polynomial contract and the reductions built on it.
//!
//! [`BooleanPolynomial`] is the capability set the Buchberger engine needs.
//! It is implemented by [`ListPoly`][crate::list::ListPoly] (explicit sorted
//! monomials) and [`ZddPoly`][crate::zdd_poly::ZddPoly] (shared decision
//! diagram). Everything in this module is written once against the trait.

use std::fmt::{Debug, Display};

use crate::monomial::Monomial;

/// A polynomial over GF(2) in square-free variables.
///
/// Implementations must be canonical: two values are equal iff they denote
/// the same polynomial. The leading monomial is always the maximum under the
/// [`Monomial`] order.
pub trait BooleanPolynomial: Clone + PartialEq + Debug + Display {
    /// Returns true for the zero polynomial.
    fn is_zero(&self) -> bool;

    /// Returns true for the constant polynomial `1`.
    fn is_one(&self) -> bool;

    /// Leading monomial, or `None` for zero.
    fn lm(&self) -> Option<Monomial>;

    /// Sum (symmetric difference of the monomial sets).
    fn add(&self, other: &Self) -> Self;

    /// Product, with `x² = x`.
    fn mul(&self, other: &Self) -> Self;

    /// Product with a single monomial.
    fn mul_monomial(&self, m: Monomial) -> Self;

    /// The zero polynomial in the same ring as `self`.
    fn zero_like(&self) -> Self;

    /// The single-term polynomial `m` in the same ring as `self`.
    fn term(&self, m: Monomial) -> Self;

    /// Monomials in descending order.
    fn monomials(&self) -> Vec<Monomial>;

    /// Product of all variables occurring in the polynomial.
    fn support(&self) -> Monomial {
        self.monomials().into_iter().fold(Monomial::one(), Monomial::mul)
    }

    /// Evaluates the polynomial under an assignment given as the set of true variables.
    fn eval(&self, assignment: Monomial) -> bool {
        self.monomials().into_iter().filter(|m| m.eval(assignment)).count() % 2 == 1
    }
}

/// Normal-form reduction policy.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Reduction {
    /// Cancel leading terms only; stop at the first irreducible leading monomial.
    #[default]
    Top,
    /// Reduce every term, so no monomial of the result is divisible by a leading monomial of the basis.
    Full,
}

/// S-polynomial of `f` and `g`.
///
/// Both operands are multiplied up to `lcm(lm f, lm g)` so that their leading
/// terms cancel. Returns zero if either operand is zero.
pub fn spoly<P: BooleanPolynomial>(f: &P, g: &P) -> P {
    let (Some(lf), Some(lg)) = (f.lm(), g.lm()) else {
        return f.zero_like();
    };
    let m = lf.lcm(lg);
    f.mul_monomial(lf.complement(m)).add(&g.mul_monomial(lg.complement(m)))
}

/// First basis element whose leading monomial divides `m`, with the quotient.
fn find_reducer<P: BooleanPolynomial>(m: Monomial, basis: &[P]) -> Option<(&P, Monomial)> {
    basis
        .iter()
        .find_map(|g| g.lm().and_then(|lg| lg.checked_complement(m)).map(|c| (g, c)))
}

/// Normal form of `p` with respect to `basis`.
///
/// Every step replaces `p` by `p + c·g` where `lm(g)·c = lm(p)`, which cancels
/// the current leading term. `c` is coprime to `lm(g)`, so every other term of
/// `c·g` stays below `lm(p)` and the leading monomial strictly decreases. The
/// loop terminates because there are finitely many monomials.
pub fn normal_form<P: BooleanPolynomial>(p: &P, basis: &[P], reduction: Reduction) -> P {
    match reduction {
        Reduction::Top => top_reduce(p.clone(), basis),
        Reduction::Full => full_reduce(p.clone(), basis),
    }
}

fn top_reduce<P: BooleanPolynomial>(mut p: P, basis: &[P]) -> P {
    while let Some(lm) = p.lm() {
        match find_reducer(lm, basis) {
            Some((g, c)) => p = p.add(&g.mul_monomial(c)),
            None => break,
        }
    }
    p
}

fn full_reduce<P: BooleanPolynomial>(mut p: P, basis: &[P]) -> P {
    let mut remainder = p.zero_like();
    while let Some(lm) = p.lm() {
        match find_reducer(lm, basis) {
            Some((g, c)) => p = p.add(&g.mul_monomial(c)),
            None => {
                let t = p.term(lm);
                p = p.add(&t);
                remainder = remainder.add(&t);
            }
        }
    }
    remainder
}

/// Returns true if some element of `basis` is the constant `1`.
pub fn contains_one<P: BooleanPolynomial>(basis: &[P]) -> bool {
    basis.iter().any(|p| p.is_one())
}
