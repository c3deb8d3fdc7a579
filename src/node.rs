use crate::reference::ZddId;
use crate::types::Var;

/// A decision node of a polynomial diagram.
///
/// A node with variable `v` denotes the polynomial
///
/// ```text
/// P(node) = P(lo) + v·P(hi)
/// ```
///
/// where neither `P(lo)` nor `P(hi)` mentions `v` or any variable with a
/// smaller index.
///
/// # Invariant
///
/// **Zero-suppression**: `hi` is never `ZddId::ZERO`. Such a node would denote
/// `P(lo)` and is never created.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ZddNode {
    /// Decision variable.
    pub var: Var,
    /// Monomials without `var`.
    pub lo: ZddId,
    /// Monomials with `var`, stored with `var` removed.
    pub hi: ZddId,
    /// Next node in the unique-table collision chain.
    pub(crate) next: ZddId,
}

impl ZddNode {
    /// # Panics
    ///
    /// Debug-panics if `hi == ZddId::ZERO`.
    pub fn new(var: Var, lo: ZddId, hi: ZddId) -> Self {
        debug_assert!(!hi.is_zero(), "ZDD node cannot have hi=ZERO (zero-suppression rule)");
        Self {
            var,
            lo,
            hi,
            next: ZddId::INVALID,
        }
    }

    /// Placeholder stored in the terminal slots of the node table.
    pub(crate) fn terminal() -> Self {
        Self {
            var: Var::new(crate::types::MAX_VARS),
            lo: ZddId::INVALID,
            hi: ZddId::INVALID,
            next: ZddId::INVALID,
        }
    }
}
