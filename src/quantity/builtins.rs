//! Built-in quantities: eigenvalue spectrum, single-site expectation,
//! adiabatic gauge-potential norm.

use nalgebra::{DMatrix, DVector};

use crate::basis::{OperatorError, SpinAxis, SpinBasis};
use crate::diag::Spectrum;
use crate::hamiltonian::bond_profile;

use super::QuantityResult;

/// Eigenvalue gaps below this contribute nothing to the gauge-potential
/// norm; dividing through them would blow up on (near-)degenerate spectra.
pub const DEGENERACY_CUTOFF: f64 = 1e-14;

/// `E`: the eigenvalue spectrum, unchanged, ascending.
pub fn energies(
    _system_size: usize,
    _basis: &SpinBasis,
    _point: &[f64],
    _operator: &DMatrix<f64>,
    spectrum: &Spectrum,
) -> QuantityResult {
    Ok(spectrum.energies.iter().copied().collect())
}

/// `S0z`: expectation value of `Sz` on site 0 in every eigenstate, in
/// eigenvalue order.
pub fn site_sz_expectation(
    _system_size: usize,
    basis: &SpinBasis,
    _point: &[f64],
    _operator: &DMatrix<f64>,
    spectrum: &Spectrum,
) -> QuantityResult {
    let observable = basis.one_body(SpinAxis::Z, &[(1.0, 0)])?;
    Ok((0..spectrum.len())
        .map(|k| spectrum.expectation(&observable, k))
        .collect())
}

/// `A_norm`: squared Hilbert-Schmidt norm of the adiabatic gauge potential
/// for a `Sz Sz` driving operator with the chain's graded bond couplings.
///
/// The driving operator is rotated into the eigenbasis and divided
/// element-wise by the eigenvalue-difference matrix; entries whose gap is
/// below [`DEGENERACY_CUTOFF`] are excluded rather than divided through.
/// Returned as a single-element vector.
pub fn gauge_potential_norm(
    system_size: usize,
    basis: &SpinBasis,
    point: &[f64],
    _operator: &DMatrix<f64>,
    spectrum: &Spectrum,
) -> QuantityResult {
    let gamma = match point {
        &[_, _, gamma] => gamma,
        _ => {
            return Err(OperatorError::ParamCount {
                expected: 3,
                got: point.len(),
            }
            .into())
        }
    };

    let g = bond_profile(gamma, system_size);
    let bonds: Vec<(f64, usize, usize)> =
        g.iter().enumerate().map(|(i, &gi)| (gi, i, i + 1)).collect();
    let dh = basis.two_body(SpinAxis::Z, &bonds)?;

    let dh_eigen = spectrum.states.transpose() * dh * &spectrum.states;
    Ok(vec![gauge_norm(&dh_eigen, &spectrum.energies)])
}

/// Sum of squares of `dh[i][j] / (E_i - E_j)` over all non-degenerate
/// pairs. The diagonal always has zero gap and never contributes.
fn gauge_norm(dh_eigen: &DMatrix<f64>, energies: &DVector<f64>) -> f64 {
    let n = energies.len();
    let mut norm = 0.0;
    for i in 0..n {
        for j in 0..n {
            let gap = energies[i] - energies[j];
            if gap.abs() < DEGENERACY_CUTOFF {
                continue;
            }
            let element = dh_eigen[(i, j)] / gap;
            norm += element * element;
        }
    }
    norm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::diagonalize;
    use crate::hamiltonian::{OperatorBuilder, XXZChain};
    use approx::assert_relative_eq;

    #[test]
    fn energies_returns_the_spectrum_unchanged() {
        let basis = SpinBasis::new(2);
        let h = XXZChain.build(2, &basis, &[0.5, 1.0, 0.7], 0).unwrap();
        let spec = diagonalize(&h);
        let e = energies(2, &basis, &[0.5, 1.0, 0.7], &h, &spec).unwrap();
        assert_eq!(e.len(), 4);
        for (k, &ek) in e.iter().enumerate() {
            assert_relative_eq!(ek, spec.energies[k]);
        }
    }

    #[test]
    fn site_expectation_on_a_diagonal_hamiltonian() {
        // Diagonal H: eigenvectors are the standard basis vectors, so the
        // returned values are the diagonal of Sz_0 in eigenvalue order.
        let basis = SpinBasis::new(2);
        let h = basis
            .one_body(SpinAxis::Z, &[(1.0, 0), (0.3, 1)])
            .unwrap();
        let spec = diagonalize(&h);
        let values = site_sz_expectation(2, &basis, &[], &h, &spec).unwrap();
        // Energies ascending: -0.65, -0.35, 0.35, 0.65 belong to basis
        // states dd, du, ud, uu; Sz_0 is -1/2, -1/2, 1/2, 1/2 there.
        let expected = [-0.5, -0.5, 0.5, 0.5];
        for (k, &e) in expected.iter().enumerate() {
            assert_relative_eq!(values[k], e, epsilon = 1e-12);
        }
    }

    #[test]
    fn gauge_norm_zero_driving_is_exactly_zero() {
        // gamma = 0 makes the driving operator the zero matrix.
        let basis = SpinBasis::new(3);
        let h = XXZChain.build(3, &basis, &[0.5, 1.0, 0.0], 0).unwrap();
        let spec = diagonalize(&h);
        let value = gauge_potential_norm(3, &basis, &[0.5, 1.0, 0.0], &h, &spec).unwrap();
        assert_eq!(value, vec![0.0]);
    }

    #[test]
    fn gauge_norm_excludes_degenerate_pairs() {
        let dh = DMatrix::from_element(3, 3, 1.0);
        // First two levels are degenerate to below the cutoff.
        let energies = DVector::from_vec(vec![0.0, 5e-15, 1.0]);
        let norm = gauge_norm(&dh, &energies);
        // Only the four pairs against the third level survive; two have
        // gap 1.0 and two have gap 1.0 - 5e-15.
        assert_relative_eq!(norm, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn gauge_norm_needs_the_three_parameter_point() {
        let basis = SpinBasis::new(2);
        let h = XXZChain.build(2, &basis, &[0.5, 1.0, 0.7], 0).unwrap();
        let spec = diagonalize(&h);
        let err = gauge_potential_norm(2, &basis, &[0.5], &h, &spec).unwrap_err();
        assert!(matches!(
            err,
            super::super::QuantityError::Operator(OperatorError::ParamCount { expected: 3, got: 1 })
        ));
    }
}
