use std::fmt::{Display, Formatter};

/// A handle to a node of a [`ZddManager`][crate::zdd::ZddManager].
///
/// Because the node table is hash-consed, two handles of the same manager are
/// equal iff they denote the same polynomial.
///
/// # Terminal Values
///
/// - `ZddId::ZERO` (⊥): the zero polynomial (no monomials)
/// - `ZddId::ONE` (⊤): the constant `1` (only the empty monomial)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ZddId(u32);

impl ZddId {
    /// The zero polynomial.
    pub const ZERO: ZddId = ZddId(0);

    /// The constant polynomial `1`.
    pub const ONE: ZddId = ZddId(1);

    /// Sentinel for "no node", used to terminate collision chains.
    pub const INVALID: ZddId = ZddId(u32::MAX);

    pub const fn new(index: u32) -> Self {
        ZddId(index)
    }

    /// Returns the raw index value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the index for node table access.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_terminal(self) -> bool {
        self.0 <= 1
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_one(self) -> bool {
        self.0 == 1
    }
}

impl Display for ZddId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "⊥"),
            1 => write!(f, "⊤"),
            _ => write!(f, "@{}", self.0),
        }
    }
}
