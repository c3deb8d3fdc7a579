//! Buchberger's algorithm over the Boolean ring.
//!
//! The engine is written once against [`BooleanPolynomial`] and runs
//! unchanged on [`ListPoly`][crate::list::ListPoly] and
//! [`ZddPoly`][crate::zdd_poly::ZddPoly].
//!
//! # Field equations
//!
//! Polynomials live in `GF(2)[x1, …, xn] / (xi² + xi)`. The field equations
//! are never stored, but their critical pairs are: for a basis element `g` and
//! a variable `x` of `lm(g)`, the S-polynomial of `g` and `x² + x` is `x·g`.
//! With these pairs the result, together with the field equations, is a
//! Gröbner basis of the ideal, so it contains `1` iff the system has no
//! solution over GF(2).
//!
//! # Example
//!
//! ```
//! use gb_rs::buchberger::buchberger;
//! use gb_rs::list::ListPoly;
//! use gb_rs::poly::contains_one;
//!
//! let x1 = ListPoly::var(1);
//! let x2 = ListPoly::var(2);
//!
//! // x1 = 1, x2 = 1, x1 + x2 = 1 has no solution.
//! let f = vec![&x1 + &ListPoly::one(), &x2 + &ListPoly::one(), &(&x1 + &x2) + &ListPoly::one()];
//! let g = buchberger(f, 2).unwrap();
//! assert!(contains_one(&g));
//! ```

use std::collections::VecDeque;
use std::marker::PhantomData;

use log::{debug, info, trace};

use crate::error::{Error, Result};
use crate::monomial::Monomial;
use crate::poly::{contains_one, normal_form, spoly, BooleanPolynomial, Reduction};
use crate::types::{Var, MAX_VARS};

/// Configuration of a Buchberger run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuchbergerConfig {
    /// Normal-form policy used for every critical pair.
    pub reduction: Reduction,
    /// Process the critical pairs with the field equations `x² + x`.
    pub field_pairs: bool,
    /// Skip S-polynomial pairs with coprime leading monomials.
    ///
    /// Only sound together with `field_pairs`, and ignored without it.
    pub product_criterion: bool,
    /// Stop after this many processed pairs.
    pub max_pairs: Option<usize>,
}

impl Default for BuchbergerConfig {
    fn default() -> Self {
        Self {
            reduction: Reduction::Top,
            field_pairs: true,
            product_criterion: true,
            max_pairs: None,
        }
    }
}

impl BuchbergerConfig {
    pub fn with_reduction(mut self, reduction: Reduction) -> Self {
        self.reduction = reduction;
        self
    }

    pub fn with_field_pairs(mut self, enabled: bool) -> Self {
        self.field_pairs = enabled;
        self
    }

    pub fn with_product_criterion(mut self, enabled: bool) -> Self {
        self.product_criterion = enabled;
        self
    }

    pub fn with_max_pairs(mut self, max_pairs: usize) -> Self {
        self.max_pairs = Some(max_pairs);
        self
    }

    fn use_product_criterion(&self) -> bool {
        self.product_criterion && self.field_pairs
    }
}

/// Counters of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuchbergerStats {
    /// Pairs whose S-polynomial was reduced.
    pub pairs_processed: usize,
    /// Pairs dropped by the product criterion.
    pub pairs_skipped: usize,
    /// Processed pairs whose normal form was zero.
    pub zero_reductions: usize,
    pub basis_size: usize,
    /// False if the run stopped on `max_pairs` with pairs left.
    pub complete: bool,
}

/// A pending critical pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Pair {
    /// Two basis elements, `i < j`.
    Spoly(usize, usize),
    /// A basis element and the field equation of a variable of its leading monomial.
    Field(usize, Var),
}

/// Buchberger engine for one polynomial representation.
#[derive(Debug, Clone)]
pub struct Buchberger<P> {
    config: BuchbergerConfig,
    _poly: PhantomData<P>,
}

impl<P: BooleanPolynomial> Default for Buchberger<P> {
    fn default() -> Self {
        Self::new(BuchbergerConfig::default())
    }
}

impl<P: BooleanPolynomial> Buchberger<P> {
    pub fn new(config: BuchbergerConfig) -> Self {
        Self {
            config,
            _poly: PhantomData,
        }
    }

    pub fn config(&self) -> &BuchbergerConfig {
        &self.config
    }

    /// Computes a Gröbner basis of the ideal generated by `generators` over `n` variables.
    ///
    /// Zero generators are dropped and duplicates kept once, in input order.
    /// The returned basis starts with these generators.
    pub fn run(&self, generators: impl IntoIterator<Item = P>, n: u32) -> Result<(Vec<P>, BuchbergerStats)> {
        let mut basis = validate(generators, n)?;
        debug!("buchberger: {} generators over {} variables", basis.len(), n);

        let mut queue = VecDeque::new();
        for j in 0..basis.len() {
            for i in 0..j {
                queue.push_back(Pair::Spoly(i, j));
            }
        }
        if self.config.field_pairs {
            for i in 0..basis.len() {
                push_field_pairs(&mut queue, i, &basis[i]);
            }
        }

        let mut stats = BuchbergerStats::default();
        while !queue.is_empty() {
            if self.config.max_pairs.is_some_and(|max| stats.pairs_processed >= max) {
                debug!("buchberger: pair budget exhausted, {} pairs left", queue.len());
                break;
            }
            let Some(pair) = queue.pop_front() else { break };

            let s = match pair {
                Pair::Spoly(i, j) => {
                    if self.config.use_product_criterion() && coprime_leads(&basis[i], &basis[j]) {
                        debug!("buchberger: skip {:?}, coprime leading monomials", pair);
                        stats.pairs_skipped += 1;
                        continue;
                    }
                    spoly(&basis[i], &basis[j])
                }
                Pair::Field(i, x) => basis[i].mul_monomial(Monomial::from(x)),
            };
            stats.pairs_processed += 1;

            let r = normal_form(&s, &basis, self.config.reduction);
            if r.is_zero() {
                debug!("buchberger: {:?} reduces to zero", pair);
                stats.zero_reductions += 1;
                continue;
            }

            let k = basis.len();
            debug!("buchberger: {:?} gives g{} with leading monomial {:?}", pair, k, r.lm());
            trace!("buchberger: g{} = {}", k, r);
            for i in 0..k {
                queue.push_back(Pair::Spoly(i, k));
            }
            if self.config.field_pairs {
                push_field_pairs(&mut queue, k, &r);
            }
            basis.push(r);
        }

        stats.basis_size = basis.len();
        stats.complete = queue.is_empty();
        info!(
            "buchberger: basis of {} polynomials, {} pairs processed, {} skipped, {} reduced to zero{}",
            stats.basis_size,
            stats.pairs_processed,
            stats.pairs_skipped,
            stats.zero_reductions,
            if stats.complete { "" } else { " (incomplete)" }
        );
        Ok((basis, stats))
    }
}

/// Drops zeros and duplicates after checking every variable against `n`.
fn validate<P: BooleanPolynomial>(generators: impl IntoIterator<Item = P>, n: u32) -> Result<Vec<P>> {
    if n > MAX_VARS {
        return Err(Error::TooManyVariables(n));
    }
    let mut basis: Vec<P> = Vec::new();
    for f in generators {
        if let Some(v) = f.support().max_var() {
            if v.id() > n {
                return Err(Error::VariableOutOfRange { var: v.id(), max: n });
            }
        }
        if f.is_zero() || basis.contains(&f) {
            continue;
        }
        basis.push(f);
    }
    Ok(basis)
}

fn push_field_pairs<P: BooleanPolynomial>(queue: &mut VecDeque<Pair>, i: usize, g: &P) {
    if let Some(lm) = g.lm() {
        queue.extend(lm.vars().into_iter().map(|x| Pair::Field(i, x)));
    }
}

fn coprime_leads<P: BooleanPolynomial>(f: &P, g: &P) -> bool {
    match (f.lm(), g.lm()) {
        (Some(a), Some(b)) => a.is_coprime(b),
        _ => false,
    }
}

/// Gröbner basis of `generators` over `n` variables with the default configuration.
pub fn buchberger<P: BooleanPolynomial>(generators: impl IntoIterator<Item = P>, n: u32) -> Result<Vec<P>> {
    Buchberger::default().run(generators, n).map(|(basis, _)| basis)
}

/// Returns true if every S-polynomial pair and every field pair of `basis` reduces to zero.
pub fn is_groebner<P: BooleanPolynomial>(basis: &[P], reduction: Reduction) -> bool {
    for (j, g) in basis.iter().enumerate() {
        for f in &basis[..j] {
            if !normal_form(&spoly(f, g), basis, reduction).is_zero() {
                return false;
            }
        }
        if let Some(lm) = g.lm() {
            for x in lm.vars() {
                if !normal_form(&g.mul_monomial(Monomial::from(x)), basis, reduction).is_zero() {
                    return false;
                }
            }
        }
    }
    true
}

/// Returns true if the system `generators = 0` has a solution over GF(2).
pub fn is_satisfiable<P: BooleanPolynomial>(generators: impl IntoIterator<Item = P>, n: u32) -> Result<bool> {
    let basis = buchberger(generators, n)?;
    Ok(!contains_one(&basis))
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::list::ListPoly;

    fn x(i: u32) -> ListPoly {
        ListPoly::var(i)
    }

    fn two_variable_system() -> Vec<ListPoly> {
        vec![&(&x(1) * &x(2)) + &x(1), &(&x(1) * &x(2)) + &x(2)]
    }

    #[test]
    fn test_config_builder() {
        let config = BuchbergerConfig::default()
            .with_reduction(Reduction::Full)
            .with_field_pairs(false)
            .with_max_pairs(10);
        assert_eq!(config.reduction, Reduction::Full);
        assert!(!config.field_pairs);
        assert!(config.product_criterion);
        assert!(!config.use_product_criterion());
        assert_eq!(config.max_pairs, Some(10));
    }

    #[test]
    fn test_two_variables() {
        let (basis, stats) = Buchberger::new(BuchbergerConfig::default())
            .run(two_variable_system(), 2)
            .unwrap();
        assert_eq!(basis.len(), 3);
        assert_eq!(basis[2], &x(1) + &x(2));
        assert!(stats.complete);
        assert_eq!(stats.basis_size, 3);
        assert!(is_groebner(&basis, Reduction::Top));
    }

    #[test]
    fn test_fixed_point() {
        let basis = buchberger(two_variable_system(), 2).unwrap();
        let again = buchberger(basis.clone(), 2).unwrap();
        assert_eq!(again, basis);
    }

    #[test]
    fn test_generators_cleaned() {
        let f = vec![ListPoly::zero(), x(1), x(1), x(2)];
        let (basis, _) = Buchberger::new(BuchbergerConfig::default()).run(f, 2).unwrap();
        assert_eq!(basis, vec![x(1), x(2)]);
    }

    #[test]
    fn test_product_criterion_skips() {
        let (_, stats) = Buchberger::new(BuchbergerConfig::default())
            .run(vec![x(1), x(2)], 2)
            .unwrap();
        assert_eq!(stats.pairs_skipped, 1);

        let config = BuchbergerConfig::default().with_product_criterion(false);
        let (_, stats) = Buchberger::new(config).run(vec![x(1), x(2)], 2).unwrap();
        assert_eq!(stats.pairs_skipped, 0);
    }

    #[test]
    fn test_unsatisfiable() {
        // x1 = 1, x2 = 1, x1*x2 + x1 = 1
        let f = vec![
            ListPoly::new([Monomial::var(1), Monomial::one()]),
            ListPoly::new([Monomial::var(2), Monomial::one()]),
            ListPoly::new([Monomial::from_vars([1, 2]), Monomial::var(1), Monomial::one()]),
        ];
        assert!(!is_satisfiable(f, 2).unwrap());
        assert!(is_satisfiable(two_variable_system(), 2).unwrap());
    }

    #[test]
    fn test_field_pairs() {
        // x1*x2 + x1 + x2 = 0 forces x1 = x2 = 0, which only the field pairs reveal.
        let f = vec![ListPoly::new([Monomial::from_vars([1, 2]), Monomial::var(1), Monomial::var(2)])];

        let config = BuchbergerConfig::default().with_field_pairs(false);
        let (basis, _) = Buchberger::new(config).run(f.clone(), 2).unwrap();
        assert_eq!(basis, f);
        assert!(!is_groebner(&basis, Reduction::Top));

        let basis = buchberger(f, 2).unwrap();
        assert!(basis.contains(&x(1)));
        assert!(basis.contains(&x(2)));
        assert!(is_groebner(&basis, Reduction::Top));
    }

    #[test]
    fn test_validation() {
        assert_eq!(buchberger(vec![x(3)], 2), Err(Error::VariableOutOfRange { var: 3, max: 2 }));
        assert_eq!(buchberger(vec![x(1)], 65), Err(Error::TooManyVariables(65)));
        assert_eq!(buchberger(Vec::<ListPoly>::new(), 0), Ok(vec![]));
    }
}
