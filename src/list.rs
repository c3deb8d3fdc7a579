//! Boolean polynomials as explicit sorted monomial lists.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul};

use log::trace;

use crate::monomial::Monomial;
use crate::poly::BooleanPolynomial;

/// A Boolean polynomial stored as a strictly ascending list of monomials.
///
/// # Invariants
///
/// - monomials are sorted ascending by the [`Monomial`] order,
/// - no monomial occurs twice (pairs cancel over GF(2)).
///
/// The leading monomial is therefore the last element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListPoly {
    monomials: Vec<Monomial>,
}

/// Sorts and cancels equal monomials pairwise.
fn canonicalize(mut monomials: Vec<Monomial>) -> Vec<Monomial> {
    monomials.sort_unstable();
    let mut result: Vec<Monomial> = Vec::with_capacity(monomials.len());
    for m in monomials {
        if result.last() == Some(&m) {
            result.pop();
        } else {
            result.push(m);
        }
    }
    result
}

impl ListPoly {
    /// Creates a polynomial from monomials in any order. Duplicates cancel in pairs.
    pub fn new(monomials: impl IntoIterator<Item = Monomial>) -> Self {
        Self {
            monomials: canonicalize(monomials.into_iter().collect()),
        }
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The constant polynomial `1`.
    pub fn one() -> Self {
        Self::from_monomial(Monomial::one())
    }

    /// The polynomial `x{id}`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in `1..=64`.
    pub fn var(id: u32) -> Self {
        Self::from_monomial(Monomial::var(id))
    }

    /// The single-term polynomial `m`.
    pub fn from_monomial(m: Monomial) -> Self {
        Self { monomials: vec![m] }
    }

    pub fn is_zero(&self) -> bool {
        self.monomials.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.monomials.len() == 1 && self.monomials[0].is_one()
    }

    /// Leading (largest) monomial, or `None` for zero.
    pub fn lm(&self) -> Option<Monomial> {
        self.monomials.last().copied()
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.monomials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_zero()
    }

    /// Monomials in ascending order.
    pub fn monomials(&self) -> &[Monomial] {
        &self.monomials
    }

    /// Iterates monomials in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, Monomial> {
        self.monomials.iter()
    }

    /// Sum: merge of the two sorted lists, common monomials cancel.
    pub fn add(&self, other: &ListPoly) -> ListPoly {
        let (a, b) = (&self.monomials, &other.monomials);
        let mut result = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => {
                    result.push(a[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    result.push(b[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            }
        }
        result.extend_from_slice(&a[i..]);
        result.extend_from_slice(&b[j..]);
        ListPoly { monomials: result }
    }

    /// Product with a monomial. Distinct terms may collide and cancel.
    pub fn mul_monomial(&self, m: Monomial) -> ListPoly {
        if m.is_one() {
            return self.clone();
        }
        ListPoly::new(self.monomials.iter().map(|&t| t * m))
    }

    /// Product: every pair of terms, then cancellation.
    pub fn mul(&self, other: &ListPoly) -> ListPoly {
        trace!("list mul: {} terms x {} terms", self.len(), other.len());
        let mut products = Vec::with_capacity(self.len() * other.len());
        for &s in &self.monomials {
            for &t in &other.monomials {
                products.push(s * t);
            }
        }
        ListPoly::new(products)
    }
}

impl FromIterator<Monomial> for ListPoly {
    fn from_iter<I: IntoIterator<Item = Monomial>>(iter: I) -> Self {
        ListPoly::new(iter)
    }
}

impl From<Monomial> for ListPoly {
    fn from(m: Monomial) -> Self {
        ListPoly::from_monomial(m)
    }
}

impl<'a> IntoIterator for &'a ListPoly {
    type Item = &'a Monomial;
    type IntoIter = std::slice::Iter<'a, Monomial>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl BooleanPolynomial for ListPoly {
    fn is_zero(&self) -> bool {
        ListPoly::is_zero(self)
    }

    fn is_one(&self) -> bool {
        ListPoly::is_one(self)
    }

    fn lm(&self) -> Option<Monomial> {
        ListPoly::lm(self)
    }

    fn add(&self, other: &Self) -> Self {
        ListPoly::add(self, other)
    }

    fn mul(&self, other: &Self) -> Self {
        ListPoly::mul(self, other)
    }

    fn mul_monomial(&self, m: Monomial) -> Self {
        ListPoly::mul_monomial(self, m)
    }

    fn zero_like(&self) -> Self {
        ListPoly::zero()
    }

    fn term(&self, m: Monomial) -> Self {
        ListPoly::from_monomial(m)
    }

    fn monomials(&self) -> Vec<Monomial> {
        self.monomials.iter().rev().copied().collect()
    }
}

impl Add for ListPoly {
    type Output = ListPoly;

    fn add(self, rhs: ListPoly) -> ListPoly {
        ListPoly::add(&self, &rhs)
    }
}

impl Add<&ListPoly> for &ListPoly {
    type Output = ListPoly;

    fn add(self, rhs: &ListPoly) -> ListPoly {
        ListPoly::add(self, rhs)
    }
}

impl Mul for ListPoly {
    type Output = ListPoly;

    fn mul(self, rhs: ListPoly) -> ListPoly {
        ListPoly::mul(&self, &rhs)
    }
}

impl Mul<&ListPoly> for &ListPoly {
    type Output = ListPoly;

    fn mul(self, rhs: &ListPoly) -> ListPoly {
        ListPoly::mul(self, rhs)
    }
}

impl Mul<Monomial> for ListPoly {
    type Output = ListPoly;

    fn mul(self, rhs: Monomial) -> ListPoly {
        self.mul_monomial(rhs)
    }
}

impl Mul<Monomial> for &ListPoly {
    type Output = ListPoly;

    fn mul(self, rhs: Monomial) -> ListPoly {
        self.mul_monomial(rhs)
    }
}

/// Terms in descending order, e.g. `x1*x2 + x3 + 1`.
impl fmt::Display for ListPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (i, m) in self.monomials.iter().rev().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}
