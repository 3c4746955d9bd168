//! Operator builders: grid point in, dense symmetric Hamiltonian out.

use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};

use crate::basis::{OperatorError, SpinAxis, SpinBasis};

/// Builds the Hamiltonian for one grid point.
///
/// Implementations must be deterministic: the same `(system_size, point,
/// realization)` always yields the same matrix. The realization id is
/// there for disordered models that reseed per realization; clean models
/// ignore it.
pub trait OperatorBuilder {
    fn build(
        &self,
        system_size: usize,
        basis: &SpinBasis,
        point: &[f64],
        realization: i64,
    ) -> Result<DMatrix<f64>, OperatorError>;
}

/// Site-dependent bond couplings `gamma * linspace(-1/2, 1/2, L-1)`.
pub(crate) fn bond_profile(gamma: f64, system_size: usize) -> Vec<f64> {
    let n = system_size.saturating_sub(1);
    match n {
        0 => Vec::new(),
        1 => vec![gamma * -0.5],
        _ => (0..n)
            .map(|i| gamma * (-0.5 + i as f64 / (n - 1) as f64))
            .collect(),
    }
}

fn unpack3(point: &[f64]) -> Result<(f64, f64, f64), OperatorError> {
    match point {
        &[alpha, beta, gamma] => Ok((alpha, beta, gamma)),
        _ => Err(OperatorError::ParamCount {
            expected: 3,
            got: point.len(),
        }),
    }
}

/// XXZ spin chain with graded bond couplings and a uniform z field.
///
/// For a grid point `(alpha, beta, gamma)` and `g = gamma * linspace(-1/2,
/// 1/2, L-1)`:
///
///   H = sum_i g_i (Sx_i Sx_{i+1} + Sy_i Sy_{i+1})
///     + sum_i alpha g_i Sz_i Sz_{i+1}
///     + sum_n beta Sz_n
#[derive(Debug, Clone, Copy, Default)]
pub struct XXZChain;

impl OperatorBuilder for XXZChain {
    fn build(
        &self,
        system_size: usize,
        basis: &SpinBasis,
        point: &[f64],
        _realization: i64,
    ) -> Result<DMatrix<f64>, OperatorError> {
        let (alpha, beta, gamma) = unpack3(point)?;
        let g = bond_profile(gamma, system_size);

        let bonds: Vec<(f64, usize, usize)> =
            g.iter().enumerate().map(|(i, &gi)| (gi, i, i + 1)).collect();
        let zz_bonds: Vec<(f64, usize, usize)> = g
            .iter()
            .enumerate()
            .map(|(i, &gi)| (alpha * gi, i, i + 1))
            .collect();
        let field: Vec<(f64, usize)> = (0..system_size).map(|i| (beta, i)).collect();

        let h = basis.two_body(SpinAxis::X, &bonds)?
            + basis.two_body(SpinAxis::Y, &bonds)?
            + basis.two_body(SpinAxis::Z, &zz_bonds)?
            + basis.one_body(SpinAxis::Z, &field)?;
        Ok(h)
    }
}

/// [`XXZChain`] with the uniform field replaced by a random one: site
/// fields `beta * u_i` with `u_i` uniform on `[-1, 1]`, drawn from a
/// stream keyed on `(seed, realization)` so each realization id is an
/// independent, reproducible disorder sample.
#[derive(Debug, Clone, Copy)]
pub struct DisorderedXXZChain {
    pub seed: u64,
}

impl DisorderedXXZChain {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn field_rng(&self, realization: i64) -> StdRng {
        // Spread consecutive realization ids across the seed space.
        let stream = (realization as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        StdRng::seed_from_u64(self.seed ^ stream)
    }
}

impl OperatorBuilder for DisorderedXXZChain {
    fn build(
        &self,
        system_size: usize,
        basis: &SpinBasis,
        point: &[f64],
        realization: i64,
    ) -> Result<DMatrix<f64>, OperatorError> {
        let (alpha, beta, gamma) = unpack3(point)?;
        let g = bond_profile(gamma, system_size);

        let bonds: Vec<(f64, usize, usize)> =
            g.iter().enumerate().map(|(i, &gi)| (gi, i, i + 1)).collect();
        let zz_bonds: Vec<(f64, usize, usize)> = g
            .iter()
            .enumerate()
            .map(|(i, &gi)| (alpha * gi, i, i + 1))
            .collect();

        let mut rng = self.field_rng(realization);
        let dist = Uniform::new_inclusive(-1.0, 1.0);
        let field: Vec<(f64, usize)> = (0..system_size)
            .map(|i| (beta * dist.sample(&mut rng), i))
            .collect();

        let h = basis.two_body(SpinAxis::X, &bonds)?
            + basis.two_body(SpinAxis::Y, &bonds)?
            + basis.two_body(SpinAxis::Z, &zz_bonds)?
            + basis.one_body(SpinAxis::Z, &field)?;
        Ok(h)
    }
}
