//! Enumeration of the terms of a polynomial diagram.

use crate::monomial::Monomial;
use crate::reference::ZddId;
use crate::zdd::ZddManager;

/// Iterator over the monomials of a diagram, in descending order.
///
/// Depth-first, `hi` before `lo`: at every node the terms containing the
/// decision variable are larger than those that do not.
pub struct MonomialIter<'a> {
    mgr: &'a ZddManager,
    /// Pending subdiagrams with the monomial accumulated on the way to them.
    stack: Vec<(ZddId, Monomial)>,
}

impl<'a> MonomialIter<'a> {
    pub fn new(mgr: &'a ZddManager, root: ZddId) -> Self {
        Self {
            mgr,
            stack: vec![(root, Monomial::one())],
        }
    }
}

impl Iterator for MonomialIter<'_> {
    type Item = Monomial;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, prefix)) = self.stack.pop() {
            if id.is_zero() {
                continue;
            }
            if id.is_one() {
                return Some(prefix);
            }
            let node = self.mgr.node(id);
            // Pushed last, popped first.
            self.stack.push((node.lo, prefix));
            self.stack.push((node.hi, prefix * Monomial::from(node.var)));
        }
        None
    }
}

impl ZddManager {
    /// Iterates the terms of `f` from the leading monomial down.
    ///
    /// # Example
    ///
    /// ```
    /// use gb_rs::monomial::Monomial;
    /// use gb_rs::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let p = mgr.add(mgr.var(2), mgr.var(1));
    ///
    /// let terms: Vec<_> = mgr.iter_monomials(p).collect();
    /// assert_eq!(terms, vec![Monomial::var(1), Monomial::var(2)]);
    /// ```
    pub fn iter_monomials(&self, f: ZddId) -> MonomialIter<'_> {
        MonomialIter::new(self, f)
    }

    /// Collects the terms of `f` in descending order.
    pub fn collect_monomials(&self, f: ZddId) -> Vec<Monomial> {
        self.iter_monomials(f).collect()
    }
}
