//! Boolean polynomials as Zero-Suppressed Decision Diagrams.
//!
//! A Boolean polynomial is a set of square-free monomials, and a monomial is
//! a set of variables, so a polynomial is a family of sets: exactly what a
//! ZDD represents compactly. Under this reading
//!
//! - `⊥` is the zero polynomial and `⊤` is the constant `1`,
//! - a node `(v, lo, hi)` is the polynomial `lo + v·hi`,
//! - addition is symmetric difference of families,
//! - multiplication is the pairwise union of members, counted modulo 2.
//!
//! # Quick Start
//!
//! ```
//! use gb_rs::zdd::ZddManager;
//! use num_bigint::BigUint;
//!
//! let mgr = ZddManager::new();
//! let x1 = mgr.var(1);
//! let x2 = mgr.var(2);
//!
//! // (x1 + x2)·x1 = x1 + x1·x2
//! let p = mgr.mul(mgr.add(x1, x2), x1);
//! assert_eq!(mgr.count_terms(p), BigUint::from(2u32));
//!
//! // x1 + x1 = 0
//! assert!(mgr.is_zero(mgr.add(x1, x1)));
//! ```
//!
//! # Design
//!
//! - **Canonicity**: nodes are hash-consed through per-variable
//!   [`Subtable`]s, so equal polynomials share one [`ZddId`].
//! - **Zero-suppression**: nodes with `hi = ⊥` are never stored.
//! - **Memoization**: `add` and `mul` results are cached on the (unordered)
//!   pair of operand handles.
//! - **Variable order**: a smaller variable index sits closer to the root. With
//!   the lexicographic monomial order (`x1 > x2 > …`) the leading monomial is
//!   the path that always takes `hi`.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::Debug;

use log::trace;
use num_bigint::BigUint;

use crate::cache::{Cache, CacheKey, CountCache, OpType};
use crate::monomial::Monomial;
use crate::node::ZddNode;
use crate::reference::ZddId;
use crate::subtable::Subtable;
use crate::types::{Var, MAX_VARS};

/// The ZDD manager: owns all nodes and performs all operations.
///
/// Handles ([`ZddId`]) are only meaningful together with the manager that
/// created them. Nodes are immutable and live as long as the manager.
pub struct ZddManager {
    /// Node storage. Index 0 = ZERO terminal, index 1 = ONE terminal.
    nodes: RefCell<Vec<ZddNode>>,

    /// Unique tables, indexed by variable id (slot 0 unused).
    subtables: RefCell<Vec<Subtable>>,

    /// Binary operation cache.
    cache: RefCell<Cache>,

    /// Term counting cache.
    count_cache: RefCell<CountCache>,
}

impl Default for ZddManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ZddManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = self.cache.borrow();
        f.debug_struct("ZddManager")
            .field("nodes", &self.num_nodes())
            .field("cache_size", &cache.len())
            .field("cache_hits", &cache.hits())
            .field("cache_misses", &cache.misses())
            .finish()
    }
}

impl ZddManager {
    // ========================================================================
    // Construction
    // ========================================================================

    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Creates a manager with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(2));
        nodes.push(ZddNode::terminal()); // ⊥
        nodes.push(ZddNode::terminal()); // ⊤

        let subtables = (0..=MAX_VARS).map(|_| Subtable::new()).collect();

        Self {
            nodes: RefCell::new(nodes),
            subtables: RefCell::new(subtables),
            cache: RefCell::new(Cache::new()),
            count_cache: RefCell::new(CountCache::default()),
        }
    }

    // ========================================================================
    // Terminals
    // ========================================================================

    /// The zero polynomial.
    pub fn zero(&self) -> ZddId {
        ZddId::ZERO
    }

    /// The constant polynomial `1`.
    pub fn one(&self) -> ZddId {
        ZddId::ONE
    }

    #[inline(always)]
    pub fn is_zero(&self, f: ZddId) -> bool {
        f.is_zero()
    }

    #[inline(always)]
    pub fn is_one(&self, f: ZddId) -> bool {
        f.is_one()
    }

    #[inline(always)]
    pub fn is_terminal(&self, f: ZddId) -> bool {
        f.is_terminal()
    }

    // ========================================================================
    // Node Construction
    // ========================================================================

    /// Creates or retrieves the node `lo + var·hi`.
    ///
    /// Enforces zero-suppression: if `hi = ⊥` the result is `lo`.
    /// Both children must only contain variables with a larger index than `var`.
    pub fn get_node(&self, var: Var, lo: ZddId, hi: ZddId) -> ZddId {
        if hi.is_zero() {
            return lo;
        }
        debug_assert!(self.top_var(lo).map_or(true, |v| v > var), "lo child is not below {}", var);
        debug_assert!(self.top_var(hi).map_or(true, |v| v > var), "hi child is not below {}", var);

        {
            let subtables = self.subtables.borrow();
            let nodes = self.nodes.borrow();
            if let Some(id) = subtables[var.index()].find(lo, hi, &nodes) {
                return id;
            }
        }

        let mut nodes = self.nodes.borrow_mut();
        let id = next_id(nodes.len());
        nodes.push(ZddNode::new(var, lo, hi));
        self.subtables.borrow_mut()[var.index()].insert(id, &mut nodes);
        id
    }

    /// Access node data.
    pub fn node(&self, id: ZddId) -> ZddNode {
        debug_assert!(!id.is_terminal(), "terminals carry no node data");
        self.nodes.borrow()[id.index()]
    }

    /// Variable at the root, or `None` for a terminal.
    pub fn top_var(&self, f: ZddId) -> Option<Var> {
        if f.is_terminal() {
            None
        } else {
            Some(self.node(f).var)
        }
    }

    // ========================================================================
    // Primitive Constructors
    // ========================================================================

    /// The polynomial `x{id}`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in `1..=64`.
    pub fn var(&self, id: u32) -> ZddId {
        self.get_node(Var::new(id), ZddId::ZERO, ZddId::ONE)
    }

    /// The single-term polynomial `m`.
    pub fn monomial(&self, m: Monomial) -> ZddId {
        // Bottom-up: largest variable index first.
        m.vars()
            .into_iter()
            .rev()
            .fold(ZddId::ONE, |acc, v| self.get_node(v, ZddId::ZERO, acc))
    }

    /// The sum of the given monomials. Duplicates cancel in pairs.
    pub fn from_monomials(&self, monomials: impl IntoIterator<Item = Monomial>) -> ZddId {
        monomials
            .into_iter()
            .fold(ZddId::ZERO, |acc, m| self.add(acc, self.monomial(m)))
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Sum `f + g`: monomials in exactly one of the operands.
    pub fn add(&self, f: ZddId, g: ZddId) -> ZddId {
        if f.is_zero() {
            return g;
        }
        if g.is_zero() {
            return f;
        }
        if f == g {
            return ZddId::ZERO;
        }

        let key = CacheKey::new(OpType::Add, f, g);
        if let Some(res) = self.cache.borrow().get(&key) {
            return res;
        }
        trace!("add({}, {})", f, g);

        let res = if f.is_one() {
            let g_node = self.node(g);
            let lo = self.add(ZddId::ONE, g_node.lo);
            self.get_node(g_node.var, lo, g_node.hi)
        } else if g.is_one() {
            let f_node = self.node(f);
            let lo = self.add(f_node.lo, ZddId::ONE);
            self.get_node(f_node.var, lo, f_node.hi)
        } else {
            let f_node = self.node(f);
            let g_node = self.node(g);
            match f_node.var.cmp(&g_node.var) {
                Ordering::Less => {
                    let lo = self.add(f_node.lo, g);
                    self.get_node(f_node.var, lo, f_node.hi)
                }
                Ordering::Greater => {
                    let lo = self.add(f, g_node.lo);
                    self.get_node(g_node.var, lo, g_node.hi)
                }
                Ordering::Equal => {
                    let lo = self.add(f_node.lo, g_node.lo);
                    let hi = self.add(f_node.hi, g_node.hi);
                    self.get_node(f_node.var, lo, hi)
                }
            }
        };

        self.cache.borrow_mut().insert(key, res);
        res
    }

    /// Product `f·g` with `x² = x`.
    pub fn mul(&self, f: ZddId, g: ZddId) -> ZddId {
        if f.is_zero() || g.is_zero() {
            return ZddId::ZERO;
        }
        if f.is_one() {
            return g;
        }
        if g.is_one() || f == g {
            // p·p = p in a Boolean ring
            return f;
        }

        let key = CacheKey::new(OpType::Mul, f, g);
        if let Some(res) = self.cache.borrow().get(&key) {
            return res;
        }
        trace!("mul({}, {})", f, g);

        let f_node = self.node(f);
        let g_node = self.node(g);
        let res = match f_node.var.cmp(&g_node.var) {
            Ordering::Less => {
                let lo = self.mul(f_node.lo, g);
                let hi = self.mul(f_node.hi, g);
                self.get_node(f_node.var, lo, hi)
            }
            Ordering::Greater => {
                let lo = self.mul(f, g_node.lo);
                let hi = self.mul(f, g_node.hi);
                self.get_node(g_node.var, lo, hi)
            }
            Ordering::Equal => {
                // (v·f1 + f0)(v·g1 + g0) = v·(f1·g1 + f1·g0 + f0·g1) + f0·g0
                let lo = self.mul(f_node.lo, g_node.lo);
                let hi_hi = self.mul(f_node.hi, g_node.hi);
                let hi_lo = self.mul(f_node.hi, g_node.lo);
                let lo_hi = self.mul(f_node.lo, g_node.hi);
                let hi = self.add(hi_hi, self.add(hi_lo, lo_hi));
                self.get_node(f_node.var, lo, hi)
            }
        };

        self.cache.borrow_mut().insert(key, res);
        res
    }

    /// Product with a single monomial.
    pub fn mul_monomial(&self, f: ZddId, m: Monomial) -> ZddId {
        if m.is_one() {
            return f;
        }
        self.mul(f, self.monomial(m))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Leading monomial under the lexicographic order, or `None` for zero.
    ///
    /// Taking a variable always yields a larger monomial than skipping it, so
    /// the maximum is the all-`hi` path. It ends in `⊤` because `hi` is never `⊥`.
    pub fn lm(&self, f: ZddId) -> Option<Monomial> {
        if f.is_zero() {
            return None;
        }
        let mut m = Monomial::one();
        let mut current = f;
        while !current.is_terminal() {
            let node = self.node(current);
            m = m * Monomial::from(node.var);
            current = node.hi;
        }
        debug_assert!(current.is_one());
        Some(m)
    }

    /// Returns true if `m` is a term of `f`.
    pub fn contains(&self, f: ZddId, m: Monomial) -> bool {
        let mut current = f;
        let mut rest = m;
        loop {
            if current.is_zero() {
                return false;
            }
            if current.is_one() {
                return rest.is_one();
            }
            let node = self.node(current);
            if rest.contains(node.var) {
                rest = Monomial::from(node.var).complement(rest);
                current = node.hi;
            } else if rest.min_var().map_or(false, |v| v < node.var) {
                // A required variable would have to sit above this node.
                return false;
            } else {
                current = node.lo;
            }
        }
    }

    /// Product of all variables occurring in `f`.
    pub fn support(&self, f: ZddId) -> Monomial {
        let mut visited = HashSet::new();
        let mut stack = vec![f];
        let mut support = Monomial::one();
        while let Some(id) = stack.pop() {
            if id.is_terminal() || !visited.insert(id) {
                continue;
            }
            let node = self.node(id);
            support = support * Monomial::from(node.var);
            stack.push(node.lo);
            stack.push(node.hi);
        }
        support
    }

    /// Number of terms of `f`.
    ///
    /// With 64 variables a diagram can hold `2^64` terms, hence `BigUint`.
    pub fn count_terms(&self, f: ZddId) -> BigUint {
        if f.is_zero() {
            return BigUint::from(0u32);
        }
        if f.is_one() {
            return BigUint::from(1u32);
        }
        if let Some(count) = self.count_cache.borrow().get(f) {
            return count;
        }

        let node = self.node(f);
        let count = self.count_terms(node.lo) + self.count_terms(node.hi);

        self.count_cache.borrow_mut().insert(f, count.clone());
        count
    }

    /// Number of decision nodes reachable from `f`.
    pub fn node_count(&self, f: ZddId) -> usize {
        let mut visited = HashSet::new();
        let mut stack = vec![f];
        while let Some(id) = stack.pop() {
            if id.is_terminal() || !visited.insert(id) {
                continue;
            }
            let node = self.node(id);
            stack.push(node.lo);
            stack.push(node.hi);
        }
        visited.len()
    }

    /// Total number of nodes in the manager, terminals included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// Operation cache hits and misses.
    pub fn cache_stats(&self) -> (usize, usize) {
        let cache = self.cache.borrow();
        (cache.hits(), cache.misses())
    }

    /// Clears the operation caches. Nodes are kept.
    pub fn clear_caches(&self) {
        self.cache.borrow_mut().clear();
        self.count_cache.borrow_mut().clear();
    }

    // ========================================================================
    // Textual dump
    // ========================================================================

    /// Structural dump, e.g. `@4:(x1, ⊤, @3:(x2, ⊤, ⊥))` as `(var, hi, lo)`.
    ///
    /// Shared nodes are printed once; later occurrences show only their handle.
    pub fn to_bracket_string(&self, f: ZddId) -> String {
        let mut visited = HashSet::new();
        self.node_to_str(f, &mut visited)
    }

    fn node_to_str(&self, f: ZddId, visited: &mut HashSet<ZddId>) -> String {
        if f.is_terminal() {
            return f.to_string();
        }
        if !visited.insert(f) {
            return f.to_string();
        }
        let node = self.node(f);
        format!(
            "{}:({}, {}, {})",
            f,
            node.var,
            self.node_to_str(node.hi, visited),
            self.node_to_str(node.lo, visited),
        )
    }
}

/// Id of the node appended to a table of `len` nodes.
///
/// `ZddId::INVALID` terminates subtable chains and is never handed out.
fn next_id(len: usize) -> ZddId {
    match u32::try_from(len) {
        Ok(index) if index < ZddId::INVALID.raw() => ZddId::new(index),
        _ => panic!("ZDD node table is full"),
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn m(vars: &[u32]) -> Monomial {
        Monomial::from_vars(vars.iter().copied())
    }

    #[test]
    fn test_terminals() {
        let mgr = ZddManager::new();
        assert!(mgr.is_zero(mgr.zero()));
        assert!(mgr.is_one(mgr.one()));
        assert!(mgr.is_terminal(mgr.zero()));
        assert!(mgr.is_terminal(mgr.one()));
        assert_eq!(mgr.lm(mgr.zero()), None);
        assert_eq!(mgr.lm(mgr.one()), Some(Monomial::one()));
    }

    #[test]
    fn test_var_is_canonical() {
        let mgr = ZddManager::new();
        let a = mgr.var(1);
        let b = mgr.var(1);
        assert_eq!(a, b);
        assert_eq!(mgr.num_nodes(), 3);
        assert_eq!(mgr.monomial(Monomial::var(1)), a);
    }

    #[test]
    fn test_monomial() {
        let mgr = ZddManager::new();
        let abc = mgr.monomial(m(&[3, 1, 2]));
        assert_eq!(mgr.node_count(abc), 3);
        assert_eq!(mgr.count_terms(abc), BigUint::from(1u32));
        assert_eq!(mgr.lm(abc), Some(m(&[1, 2, 3])));
        assert_eq!(mgr.monomial(Monomial::one()), ZddId::ONE);

        // Built by multiplication it is the very same node.
        let product = mgr.mul(mgr.mul(mgr.var(1), mgr.var(2)), mgr.var(3));
        assert_eq!(product, abc);
    }

    #[test]
    fn test_add() {
        let mgr = ZddManager::new();
        let x1 = mgr.var(1);
        let x2 = mgr.var(2);

        let p = mgr.add(x1, x2);
        assert_eq!(mgr.count_terms(p), BigUint::from(2u32));
        assert_eq!(mgr.add(x2, x1), p);
        assert_eq!(mgr.add(p, x1), x2);
        assert!(mgr.is_zero(mgr.add(p, p)));

        let q = mgr.add(p, mgr.one());
        assert!(mgr.contains(q, Monomial::one()));
        assert_eq!(mgr.add(q, mgr.one()), p);
    }

    #[test]
    fn test_mul() {
        let mgr = ZddManager::new();
        let x1 = mgr.var(1);
        let x2 = mgr.var(2);
        let one = mgr.one();

        // x·x = x
        assert_eq!(mgr.mul(x1, x1), x1);

        // (x1 + 1)(x1 + x2) = x1*x2 + x2
        let p = mgr.add(x1, one);
        let q = mgr.add(x1, x2);
        let expected = mgr.from_monomials([m(&[1, 2]), m(&[2])]);
        assert_eq!(mgr.mul(p, q), expected);
        assert_eq!(mgr.mul(q, p), expected);

        // (x1 + 1)·x1 = 0
        assert!(mgr.is_zero(mgr.mul(p, x1)));
    }

    #[test]
    fn test_mul_monomial() {
        let mgr = ZddManager::new();
        let p = mgr.from_monomials([m(&[1, 2]), m(&[2])]);
        assert!(mgr.is_zero(mgr.mul_monomial(p, m(&[1]))));
        assert_eq!(mgr.mul_monomial(p, Monomial::one()), p);
        assert_eq!(mgr.mul_monomial(p, m(&[3])), mgr.from_monomials([m(&[1, 2, 3]), m(&[2, 3])]));
    }

    #[test]
    fn test_lm() {
        let mgr = ZddManager::new();
        let p = mgr.from_monomials([m(&[2, 3]), m(&[1]), Monomial::one(), m(&[3])]);
        assert_eq!(mgr.lm(p), Some(m(&[1])));

        let q = mgr.from_monomials([m(&[2, 3]), m(&[3, 4]), m(&[2])]);
        assert_eq!(mgr.lm(q), Some(m(&[2, 3])));
    }

    #[test]
    fn test_contains() {
        let mgr = ZddManager::new();
        let p = mgr.from_monomials([m(&[1, 3]), m(&[2]), Monomial::one()]);
        assert!(mgr.contains(p, m(&[1, 3])));
        assert!(mgr.contains(p, m(&[2])));
        assert!(mgr.contains(p, Monomial::one()));
        assert!(!mgr.contains(p, m(&[1])));
        assert!(!mgr.contains(p, m(&[3])));
        assert!(!mgr.contains(p, m(&[1, 2, 3])));
    }

    #[test]
    fn test_support() {
        let mgr = ZddManager::new();
        let p = mgr.from_monomials([m(&[1, 5]), m(&[2]), Monomial::one()]);
        assert_eq!(mgr.support(p), m(&[1, 2, 5]));
        assert_eq!(mgr.support(mgr.one()), Monomial::one());
    }

    #[test]
    fn test_count_terms_large() {
        let mgr = ZddManager::new();
        // (x1 + 1)(x2 + 1)…(x64 + 1) has 2^64 terms.
        let mut p = mgr.one();
        for i in 1..=64 {
            p = mgr.mul(p, mgr.add(mgr.var(i), mgr.one()));
        }
        assert_eq!(mgr.count_terms(p), BigUint::from(1u32) << 64);
        assert_eq!(mgr.node_count(p), 64);
    }

    #[test]
    fn test_cache_reuse() {
        let mgr = ZddManager::new();
        let p = mgr.from_monomials([m(&[1, 2]), m(&[3]), m(&[2, 4])]);
        let q = mgr.from_monomials([m(&[1]), m(&[4]), Monomial::one()]);
        let r1 = mgr.mul(p, q);
        let (hits_before, _) = mgr.cache_stats();
        let r2 = mgr.mul(q, p);
        let (hits_after, _) = mgr.cache_stats();
        assert_eq!(r1, r2);
        assert!(hits_after > hits_before);

        mgr.clear_caches();
        assert_eq!(mgr.mul(p, q), r1);
    }

    #[test]
    fn test_bracket_string() {
        let mgr = ZddManager::new();
        let p = mgr.add(mgr.var(1), mgr.one());
        let s = mgr.to_bracket_string(p);
        assert!(s.contains("x1"));
        assert!(s.contains('⊤'));
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(2), ZddId::new(2));
        assert_eq!(next_id(u32::MAX as usize - 1), ZddId::new(u32::MAX - 1));
    }

    #[test]
    #[should_panic(expected = "ZDD node table is full")]
    fn test_next_id_invalid() {
        next_id(u32::MAX as usize);
    }

    #[test]
    #[should_panic(expected = "ZDD node table is full")]
    #[cfg(target_pointer_width = "64")]
    fn test_next_id_overflow() {
        next_id(u32::MAX as usize + 1);
    }

    #[test]
    fn test_node_ids_are_sequential() {
        let mgr = ZddManager::new();
        let x1 = mgr.var(1);
        let x2 = mgr.var(2);
        assert_eq!(x1, ZddId::new(2));
        assert_eq!(x2, ZddId::new(3));
        assert_eq!(mgr.var(1), x1);
    }
}
