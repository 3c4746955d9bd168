//! Named quantity functions and the registry that resolves them.
//!
//! A quantity is a pluggable computation looked up by name at sweep time.
//! Registration is explicit; there is no ambient global namespace to
//! resolve names against. Two calling conventions exist, selected by the
//! sweep's `diagonalize` flag: plain functions see the operator only,
//! spectral functions additionally see its eigendecomposition.

mod builtins;

pub use builtins::{energies, gauge_potential_norm, site_sz_expectation, DEGENERACY_CUTOFF};

use std::collections::HashMap;

use nalgebra::DMatrix;
use thiserror::Error;

use crate::basis::{OperatorError, SpinBasis};
use crate::diag::Spectrum;

/// Errors raised by a quantity function rejecting its inputs.
#[derive(Debug, Error)]
pub enum QuantityError {
    #[error(transparent)]
    Operator(#[from] OperatorError),

    /// Catch-all for user-registered functions.
    #[error("{0}")]
    Failed(String),
}

pub type QuantityResult = Result<Vec<f64>, QuantityError>;

/// Calling convention: `(system_size, basis, grid_point, operator)`.
pub type PlainFn = Box<dyn Fn(usize, &SpinBasis, &[f64], &DMatrix<f64>) -> QuantityResult>;

/// Calling convention: `(system_size, basis, grid_point, operator, spectrum)`.
pub type SpectralFn =
    Box<dyn Fn(usize, &SpinBasis, &[f64], &DMatrix<f64>, &Spectrum) -> QuantityResult>;

/// A registered quantity function, tagged by its calling convention.
pub enum QuantityFn {
    Plain(PlainFn),
    Spectral(SpectralFn),
}

impl QuantityFn {
    /// Convention name, used in mismatch diagnostics.
    pub fn convention(&self) -> &'static str {
        match self {
            QuantityFn::Plain(_) => "plain",
            QuantityFn::Spectral(_) => "spectral",
        }
    }
}

impl std::fmt::Debug for QuantityFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "QuantityFn::{}", self.convention())
    }
}

/// Name -> function mapping for quantity dispatch.
#[derive(Debug)]
pub struct QuantityRegistry {
    map: HashMap<String, QuantityFn>,
}

impl QuantityRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// A registry with the built-in quantities `E`, `S0z` and `A_norm`.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register_spectral("E", energies);
        reg.register_spectral("S0z", site_sz_expectation);
        reg.register_spectral("A_norm", gauge_potential_norm);
        reg
    }

    pub fn register(&mut self, name: impl Into<String>, func: QuantityFn) {
        self.map.insert(name.into(), func);
    }

    pub fn register_plain<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(usize, &SpinBasis, &[f64], &DMatrix<f64>) -> QuantityResult + 'static,
    {
        self.register(name, QuantityFn::Plain(Box::new(func)));
    }

    pub fn register_spectral<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(usize, &SpinBasis, &[f64], &DMatrix<f64>, &Spectrum) -> QuantityResult + 'static,
    {
        self.register(name, QuantityFn::Spectral(Box::new(func)));
    }

    pub fn get(&self, name: &str) -> Option<&QuantityFn> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Registered names, sorted for stable output.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.map.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for QuantityRegistry {
    /// The built-in registry; an out-of-the-box sweep resolves the same
    /// quantities the predecessor tooling shipped with.
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered_as_spectral() {
        let reg = QuantityRegistry::with_builtins();
        for name in ["E", "S0z", "A_norm"] {
            let f = reg.get(name).expect("builtin missing");
            assert_eq!(f.convention(), "spectral");
        }
        assert!(reg.get("nonexistent").is_none());
    }

    #[test]
    fn custom_registration_resolves() {
        let mut reg = QuantityRegistry::new();
        reg.register_plain("trace", |_l, _basis, _x, h| Ok(vec![h.trace()]));
        assert!(reg.contains("trace"));
        assert_eq!(reg.get("trace").unwrap().convention(), "plain");
        assert_eq!(reg.names(), vec!["trace"]);
    }
}
