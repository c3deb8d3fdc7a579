//! Polynomial handles into a shared [`ZddManager`].

use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Mul};

use num_bigint::BigUint;

use crate::list::ListPoly;
use crate::monomial::Monomial;
use crate::poly::BooleanPolynomial;
use crate::reference::ZddId;
use crate::zdd::ZddManager;

/// A Boolean polynomial held as a diagram root in a [`ZddManager`].
///
/// The handle is `Copy`; the manager owns the nodes. Every polynomial of one
/// computation must come from the same manager, mixing managers panics.
///
/// ```
/// use gb_rs::zdd::ZddManager;
/// use gb_rs::zdd_poly::ZddPoly;
///
/// let mgr = ZddManager::new();
/// let x1 = ZddPoly::var(&mgr, 1);
/// let x2 = ZddPoly::var(&mgr, 2);
///
/// let p = (x1 + x2) * x1;
/// assert_eq!(p.to_string(), "x1*x2 + x1");
/// ```
#[derive(Copy, Clone)]
pub struct ZddPoly<'a> {
    mgr: &'a ZddManager,
    root: ZddId,
}

impl<'a> ZddPoly<'a> {
    /// Wraps an existing diagram of `mgr`.
    pub fn new(mgr: &'a ZddManager, root: ZddId) -> Self {
        Self { mgr, root }
    }

    pub fn zero(mgr: &'a ZddManager) -> Self {
        Self::new(mgr, mgr.zero())
    }

    pub fn one(mgr: &'a ZddManager) -> Self {
        Self::new(mgr, mgr.one())
    }

    /// The polynomial `x{id}`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in `1..=64`.
    pub fn var(mgr: &'a ZddManager, id: u32) -> Self {
        Self::new(mgr, mgr.var(id))
    }

    pub fn from_monomial(mgr: &'a ZddManager, m: Monomial) -> Self {
        Self::new(mgr, mgr.monomial(m))
    }

    /// Sum of the given monomials. Duplicates cancel in pairs.
    pub fn from_monomials(mgr: &'a ZddManager, monomials: impl IntoIterator<Item = Monomial>) -> Self {
        Self::new(mgr, mgr.from_monomials(monomials))
    }

    /// Converts an explicit polynomial into a diagram of `mgr`.
    pub fn from_list(mgr: &'a ZddManager, p: &ListPoly) -> Self {
        Self::from_monomials(mgr, p.iter().copied())
    }

    pub fn root(&self) -> ZddId {
        self.root
    }

    pub fn manager(&self) -> &'a ZddManager {
        self.mgr
    }

    /// Number of terms.
    pub fn count_terms(&self) -> BigUint {
        self.mgr.count_terms(self.root)
    }

    /// Number of decision nodes of the diagram.
    pub fn node_count(&self) -> usize {
        self.mgr.node_count(self.root)
    }

    fn same_manager(&self, other: &ZddPoly<'_>) -> bool {
        std::ptr::eq(self.mgr, other.mgr)
    }

    fn check_manager(&self, other: &ZddPoly<'_>) {
        assert!(self.same_manager(other), "polynomials belong to different ZDD managers");
    }

    /// Evaluates `lo + v·hi` bottom-up, sharing results between common subdiagrams.
    fn eval_node(&self, id: ZddId, assignment: Monomial, memo: &mut HashMap<ZddId, bool>) -> bool {
        if id.is_terminal() {
            return id.is_one();
        }
        if let Some(&value) = memo.get(&id) {
            return value;
        }
        let node = self.mgr.node(id);
        let lo = self.eval_node(node.lo, assignment, memo);
        let value = if assignment.contains(node.var) {
            lo ^ self.eval_node(node.hi, assignment, memo)
        } else {
            lo
        };
        memo.insert(id, value);
        value
    }
}

impl PartialEq for ZddPoly<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.same_manager(other) && self.root == other.root
    }
}

impl Eq for ZddPoly<'_> {}

impl fmt::Debug for ZddPoly<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZddPoly({}: {})", self.root, self)
    }
}

/// Terms in descending order, the same rendering as [`ListPoly`].
impl fmt::Display for ZddPoly<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.root.is_zero() {
            return write!(f, "0");
        }
        for (i, m) in self.mgr.iter_monomials(self.root).enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}

impl BooleanPolynomial for ZddPoly<'_> {
    fn is_zero(&self) -> bool {
        self.root.is_zero()
    }

    fn is_one(&self) -> bool {
        self.root.is_one()
    }

    fn lm(&self) -> Option<Monomial> {
        self.mgr.lm(self.root)
    }

    fn add(&self, other: &Self) -> Self {
        self.check_manager(other);
        Self::new(self.mgr, self.mgr.add(self.root, other.root))
    }

    fn mul(&self, other: &Self) -> Self {
        self.check_manager(other);
        Self::new(self.mgr, self.mgr.mul(self.root, other.root))
    }

    fn mul_monomial(&self, m: Monomial) -> Self {
        Self::new(self.mgr, self.mgr.mul_monomial(self.root, m))
    }

    fn zero_like(&self) -> Self {
        Self::zero(self.mgr)
    }

    fn term(&self, m: Monomial) -> Self {
        Self::from_monomial(self.mgr, m)
    }

    fn monomials(&self) -> Vec<Monomial> {
        self.mgr.collect_monomials(self.root)
    }

    fn support(&self) -> Monomial {
        self.mgr.support(self.root)
    }

    fn eval(&self, assignment: Monomial) -> bool {
        self.eval_node(self.root, assignment, &mut HashMap::new())
    }
}

impl<'a> Add for ZddPoly<'a> {
    type Output = ZddPoly<'a>;

    fn add(self, rhs: ZddPoly<'a>) -> ZddPoly<'a> {
        BooleanPolynomial::add(&self, &rhs)
    }
}

impl<'a> Mul for ZddPoly<'a> {
    type Output = ZddPoly<'a>;

    fn mul(self, rhs: ZddPoly<'a>) -> ZddPoly<'a> {
        BooleanPolynomial::mul(&self, &rhs)
    }
}

impl<'a> Mul<Monomial> for ZddPoly<'a> {
    type Output = ZddPoly<'a>;

    fn mul(self, rhs: Monomial) -> ZddPoly<'a> {
        self.mul_monomial(rhs)
    }
}

impl ListPoly {
    /// Converts a diagram into an explicit polynomial.
    pub fn from_zdd(p: &ZddPoly<'_>) -> ListPoly {
        ListPoly::new(p.mgr.iter_monomials(p.root))
    }
}

impl From<ZddPoly<'_>> for ListPoly {
    fn from(p: ZddPoly<'_>) -> Self {
        ListPoly::from_zdd(&p)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_constants() {
        let mgr = ZddManager::new();
        let zero = ZddPoly::zero(&mgr);
        let one = ZddPoly::one(&mgr);
        assert!(zero.is_zero());
        assert!(one.is_one());
        assert_eq!(zero.lm(), None);
        assert_eq!(one.lm(), Some(Monomial::one()));
        assert_eq!(zero.to_string(), "0");
        assert_eq!(one.to_string(), "1");
    }

    #[test]
    fn test_operators() {
        let mgr = ZddManager::new();
        let x1 = ZddPoly::var(&mgr, 1);
        let x2 = ZddPoly::var(&mgr, 2);
        let one = ZddPoly::one(&mgr);

        // (x1 + 1)(x1 + x2) = x1*x2 + x2
        let p = (x1 + one) * (x1 + x2);
        assert_eq!(p.to_string(), "x1*x2 + x2");
        assert!((p + p).is_zero());
        assert_eq!(x1 * x1, x1);
        assert!(((x1 + one) * Monomial::var(1)).is_zero());
    }

    #[test]
    fn test_conversion() {
        let mgr = ZddManager::new();
        let list = ListPoly::new([Monomial::from_vars([1, 3]), Monomial::var(2), Monomial::one()]);
        let zdd = ZddPoly::from_list(&mgr, &list);

        assert_eq!(zdd.to_string(), list.to_string());
        assert_eq!(zdd.lm(), list.lm());
        assert_eq!(zdd.count_terms(), BigUint::from(3u32));
        assert_eq!(ListPoly::from_zdd(&zdd), list);
        assert_eq!(ListPoly::from(zdd), list);
    }

    #[test]
    fn test_eval_matches_terms() {
        let mgr = ZddManager::new();
        let p = ZddPoly::from_monomials(
            &mgr,
            [Monomial::from_vars([1, 2]), Monomial::var(1), Monomial::from_vars([2, 3])],
        );
        let list = ListPoly::from_zdd(&p);
        for bits in 0..8u32 {
            let assignment = Monomial::from_vars((1..=3).filter(|i| bits & (1 << (i - 1)) != 0));
            assert_eq!(p.eval(assignment), list.eval(assignment), "assignment {}", assignment);
        }
    }

    #[test]
    fn test_equality_requires_same_manager() {
        let a = ZddManager::new();
        let b = ZddManager::new();
        assert_eq!(ZddPoly::var(&a, 1), ZddPoly::var(&a, 1));
        assert_ne!(ZddPoly::var(&a, 1), ZddPoly::var(&b, 1));
    }

    #[test]
    #[should_panic(expected = "different ZDD managers")]
    fn test_mixed_managers_panic() {
        let a = ZddManager::new();
        let b = ZddManager::new();
        let _ = ZddPoly::var(&a, 1) + ZddPoly::var(&b, 2);
    }
}
