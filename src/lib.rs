//! # gb-rs: Gröbner bases for Boolean polynomial systems
//!
//! **`gb-rs`** computes Gröbner bases of systems of polynomial equations over GF(2) with Boolean
//! variables (`x² = x`), the algebraic view of a SAT instance: the system has no solution iff the
//! basis contains `1`.
//!
//! ## Boolean polynomials
//!
//! A Boolean polynomial is a sum of square-free monomials with coefficients in GF(2), e.g.
//! `x1*x2 + x3 + 1`. Since `1 + 1 = 0` and `x·x = x`, a polynomial is just a *set* of monomials,
//! and a monomial is a *set* of variables.
//!
//! ## Key Features
//!
//! - **Two representations, one engine**: polynomials are either explicit sorted monomial lists
//!   ([`ListPoly`][crate::list::ListPoly]) or Zero-Suppressed Decision Diagrams
//!   ([`ZddPoly`][crate::zdd_poly::ZddPoly]) sharing nodes in a [`ZddManager`][crate::zdd::ZddManager].
//!   The Buchberger engine is generic over [`BooleanPolynomial`][crate::poly::BooleanPolynomial].
//! - **One monomial order**: lexicographic with `x1 > x2 > …`, defined by the [`Monomial`][crate::monomial::Monomial]
//!   `Ord` impl and agreed on by both representations.
//! - **Sound satisfiability check**: critical pairs with the field equations `x² + x` are processed,
//!   so [`is_satisfiable`][crate::buchberger::is_satisfiable] is exact.
//! - **1-Based Indexing**: variables are `x1 … x64`; index 0 is reserved.
//!
//! ## Basic Usage
//!
//! ```rust
//! use gb_rs::buchberger::buchberger;
//! use gb_rs::poly::contains_one;
//! use gb_rs::zdd::ZddManager;
//! use gb_rs::zdd_poly::ZddPoly;
//!
//! // 1. Initialize the manager
//! let mgr = ZddManager::new();
//!
//! // 2. Create variables (1-indexed)
//! let x1 = ZddPoly::var(&mgr, 1);
//! let x2 = ZddPoly::var(&mgr, 2);
//!
//! // 3. Build the system x1*x2 + x1 = 0, x1*x2 + x2 = 0
//! let f = vec![x1 * x2 + x1, x1 * x2 + x2];
//!
//! // 4. Compute the basis: it contains x1 + x2
//! let g = buchberger(f, 2).unwrap();
//! assert!(g.contains(&(x1 + x2)));
//!
//! // 5. x1 = x2 = 0 is a solution, so 1 is not in the basis
//! assert!(!contains_one(&g));
//! ```
//!
//! ## Core Components
//!
//! - **[`monomial`]**: square-free monomials and the monomial order.
//! - **[`poly`]**: the polynomial contract, S-polynomials and normal forms.
//! - **[`list`]** and **[`zdd_poly`]**: the two representations.
//! - **[`zdd`]**: the diagram manager with polynomial arithmetic.
//! - **[`buchberger`]**: the engine, its configuration and statistics.
//! - **[`dot`]**: Graphviz export of diagrams.

pub mod buchberger;
pub mod cache;
pub mod dot;
pub mod error;
pub mod iter;
pub mod list;
pub mod monomial;
pub mod node;
pub mod poly;
pub mod reference;
pub mod subtable;
pub mod types;
pub mod zdd;
pub mod zdd_poly;
