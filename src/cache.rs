//! Operation caches for diagram arithmetic.
//!
//! Nodes never change once created, so a cached result stays valid for the
//! lifetime of the manager.

use std::cell::Cell;
use std::collections::HashMap;

use num_bigint::BigUint;

use crate::reference::ZddId;

/// Cache key for binary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub op: OpType,
    pub f: ZddId,
    pub g: ZddId,
}

/// Operation types for caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpType {
    /// Polynomial sum (symmetric difference).
    Add,
    /// Polynomial product.
    Mul,
}

impl CacheKey {
    /// Both operations are commutative, so the operands are normalized.
    pub fn new(op: OpType, f: ZddId, g: ZddId) -> Self {
        let (f, g) = if f <= g { (f, g) } else { (g, f) };
        Self { op, f, g }
    }
}

/// Memo table for binary operations, with hit/miss counters.
#[derive(Debug, Default)]
pub struct Cache {
    map: HashMap<CacheKey, ZddId>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached result.
    pub fn get(&self, key: &CacheKey) -> Option<ZddId> {
        let res = self.map.get(key).copied();
        match res {
            Some(_) => self.hits.set(self.hits.get() + 1),
            None => self.misses.set(self.misses.get() + 1),
        }
        res
    }

    pub fn insert(&mut self, key: CacheKey, value: ZddId) {
        self.map.insert(key, value);
    }

    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    /// Drops all entries. Counters are kept.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Cache for term counts.
#[derive(Debug, Clone, Default)]
pub struct CountCache {
    map: HashMap<ZddId, BigUint>,
}

impl CountCache {
    pub fn get(&self, id: ZddId) -> Option<BigUint> {
        self.map.get(&id).cloned()
    }

    pub fn insert(&mut self, id: ZddId, count: BigUint) {
        self.map.insert(id, count);
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}
