//! Type-safe variable identifiers.
use std::fmt;

/// Largest supported variable index.
///
/// Monomials are stored as a single 64-bit word, one bit per variable.
pub const MAX_VARS: u32 = 64;

/// A variable identifier (1-indexed).
///
/// Variables are the Boolean unknowns `x1, x2, …` of the polynomial ring.
/// Smaller indices are "larger" in the monomial order and sit closer to the
/// root of a decision diagram.
///
/// # Invariants
///
/// - `1 <= id <= MAX_VARS` (0 is reserved)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a new variable with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id == 0` or `id > MAX_VARS`.
    pub fn new(id: u32) -> Self {
        assert_ne!(id, 0, "Variable IDs must be >= 1");
        assert!(id <= MAX_VARS, "Variable IDs must be <= {}, got {}", MAX_VARS, id);
        Var(id)
    }

    /// Creates a variable, returning `None` when `id` is out of range.
    pub fn checked(id: u32) -> Option<Self> {
        if (1..=MAX_VARS).contains(&id) {
            Some(Var(id))
        } else {
            None
        }
    }

    /// Returns the raw variable ID.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the variable ID as a `usize` for table indexing.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<u32> for Var {
    fn from(id: u32) -> Self {
        Var::new(id)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}
