//! Per-variable unique table with intrusive collision chains.
//!
//! Every decision node of a given variable is registered in that variable's
//! subtable, keyed by its `(lo, hi)` children. The chains are threaded through
//! [`ZddNode::next`], so the subtable itself only stores bucket heads.

use crate::node::ZddNode;
use crate::reference::ZddId;

/// Initial number of bucket bits (2^6 = 64 buckets).
const INITIAL_BUCKET_BITS: u32 = 6;

#[derive(Debug, Clone)]
pub struct Subtable {
    /// Head of each collision chain, `ZddId::INVALID` when empty.
    buckets: Vec<ZddId>,
    /// `bucket_index = hash & bitmask`.
    bitmask: u64,
    count: usize,
}

impl Default for Subtable {
    fn default() -> Self {
        Self::new()
    }
}

impl Subtable {
    pub fn new() -> Self {
        Self::with_bucket_bits(INITIAL_BUCKET_BITS)
    }

    pub fn with_bucket_bits(bits: u32) -> Self {
        let size = 1usize << bits;
        Self {
            buckets: vec![ZddId::INVALID; size],
            bitmask: (size - 1) as u64,
            count: 0,
        }
    }

    #[inline]
    fn bucket(&self, lo: ZddId, hi: ZddId) -> usize {
        (hash_children(lo, hi) & self.bitmask) as usize
    }

    /// Finds the node with the given children.
    pub fn find(&self, lo: ZddId, hi: ZddId, nodes: &[ZddNode]) -> Option<ZddId> {
        let mut current = self.buckets[self.bucket(lo, hi)];
        while current != ZddId::INVALID {
            let node = &nodes[current.index()];
            if node.lo == lo && node.hi == hi {
                return Some(current);
            }
            current = node.next;
        }
        None
    }

    /// Registers node `id`, which must not be present yet.
    ///
    /// Doubles the bucket array once the load factor exceeds 3/4.
    pub fn insert(&mut self, id: ZddId, nodes: &mut [ZddNode]) {
        if 4 * (self.count + 1) > 3 * self.buckets.len() {
            self.grow(nodes);
        }
        self.link(id, nodes);
        self.count += 1;
    }

    fn link(&mut self, id: ZddId, nodes: &mut [ZddNode]) {
        let node = &nodes[id.index()];
        let b = self.bucket(node.lo, node.hi);
        nodes[id.index()].next = self.buckets[b];
        self.buckets[b] = id;
    }

    fn grow(&mut self, nodes: &mut [ZddNode]) {
        let size = self.buckets.len() * 2;
        let old = std::mem::replace(&mut self.buckets, vec![ZddId::INVALID; size]);
        self.bitmask = (size - 1) as u64;
        for head in old {
            let mut current = head;
            while current != ZddId::INVALID {
                let next = nodes[current.index()].next;
                self.link(current, nodes);
                current = next;
            }
        }
    }

    /// Number of nodes in this subtable.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }
}

/// FNV-1a style mixing of the children handles.
#[inline]
fn hash_children(lo: ZddId, hi: ZddId) -> u64 {
    let mut h = 0xcbf2_9ce4_8422_2325u64;
    h ^= lo.raw() as u64;
    h = h.wrapping_mul(0x0100_0000_01b3);
    h ^= hi.raw() as u64;
    h = h.wrapping_mul(0x0100_0000_01b3);
    h ^ (h >> 29)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Var;

    #[test]
    fn test_find_insert() {
        let mut nodes = vec![ZddNode::terminal(), ZddNode::terminal()];
        let mut subtable = Subtable::new();

        nodes.push(ZddNode::new(Var::new(1), ZddId::ZERO, ZddId::ONE));
        subtable.insert(ZddId::new(2), &mut nodes);
        assert_eq!(subtable.len(), 1);

        assert_eq!(subtable.find(ZddId::ZERO, ZddId::ONE, &nodes), Some(ZddId::new(2)));
        assert_eq!(subtable.find(ZddId::ONE, ZddId::ONE, &nodes), None);
    }

    #[test]
    fn test_grow_keeps_entries() {
        let mut nodes = vec![ZddNode::terminal(), ZddNode::terminal()];
        let mut subtable = Subtable::with_bucket_bits(1);

        // Distinct (lo, hi) pairs over fake children handles.
        for k in 0..100u32 {
            let id = ZddId::new(nodes.len() as u32);
            nodes.push(ZddNode::new(Var::new(1), ZddId::new(1000 + k), ZddId::ONE));
            subtable.insert(id, &mut nodes);
        }

        assert_eq!(subtable.len(), 100);
        assert!(subtable.capacity() >= 128);
        for k in 0..100u32 {
            let expected = ZddId::new(2 + k);
            assert_eq!(subtable.find(ZddId::new(1000 + k), ZddId::ONE, &nodes), Some(expected));
        }
    }
}
