//! Spin-1/2 chain basis and dense operator construction.
//!
//! Operators are assembled in the z product basis as Kronecker products of
//! 2x2 site matrices, using spin (not Pauli) normalization: S = sigma / 2.

use nalgebra::{DMatrix, Matrix2};
use thiserror::Error;

/// Errors from operator construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// A coupling references a site outside the chain.
    #[error("site {site} out of range for a chain of {sites} sites")]
    SiteOutOfRange { site: usize, sites: usize },

    /// The requested operator has no real matrix representation.
    #[error("single-site {axis} operator is imaginary in the z basis")]
    ImaginaryOperator { axis: SpinAxis },

    /// A builder was handed a grid point of the wrong length.
    #[error("expected a parameter tuple of length {expected}, got {got}")]
    ParamCount { expected: usize, got: usize },
}

/// Spin component selector for couplings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinAxis {
    X,
    Y,
    Z,
}

impl SpinAxis {
    /// Real 2x2 site matrix for this component. For `Y` this is the real
    /// proxy `W` with `S^y = i W`; it is only valid inside pair terms,
    /// where the two factors of `i` combine into the real sign below.
    fn site_matrix(self) -> Matrix2<f64> {
        match self {
            SpinAxis::X => Matrix2::new(0.0, 0.5, 0.5, 0.0),
            SpinAxis::Y => Matrix2::new(0.0, 0.5, -0.5, 0.0),
            SpinAxis::Z => Matrix2::new(0.5, 0.0, 0.0, -0.5),
        }
    }

    /// Sign picked up by a same-axis pair: `S^y_i S^y_j = -(W_i W_j)`.
    fn pair_sign(self) -> f64 {
        match self {
            SpinAxis::Y => -1.0,
            _ => 1.0,
        }
    }
}

impl std::fmt::Display for SpinAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpinAxis::X => write!(f, "x"),
            SpinAxis::Y => write!(f, "y"),
            SpinAxis::Z => write!(f, "z"),
        }
    }
}

/// Hilbert space of a chain of spin-1/2 sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinBasis {
    sites: usize,
    dim: usize,
}

impl SpinBasis {
    /// Basis for a chain of `sites` spins. Dimension is `2^sites`.
    pub fn new(sites: usize) -> Self {
        Self {
            sites,
            dim: 1 << sites,
        }
    }

    /// Number of sites in the chain.
    pub fn sites(&self) -> usize {
        self.sites
    }

    /// Hilbert-space dimension.
    pub fn size(&self) -> usize {
        self.dim
    }

    /// Embed a 2x2 site matrix at `site`: `I ⊗ ... ⊗ op ⊗ ... ⊗ I`.
    fn site_operator(&self, op: &Matrix2<f64>, site: usize) -> DMatrix<f64> {
        let left = 1 << site;
        let right = 1 << (self.sites - site - 1);
        let op = DMatrix::from_fn(2, 2, |r, c| op[(r, c)]);
        DMatrix::<f64>::identity(left, left)
            .kronecker(&op)
            .kronecker(&DMatrix::<f64>::identity(right, right))
    }

    fn check_site(&self, site: usize) -> Result<(), OperatorError> {
        if site >= self.sites {
            return Err(OperatorError::SiteOutOfRange {
                site,
                sites: self.sites,
            });
        }
        Ok(())
    }

    /// Sum of single-site terms `coupling * S^a_i` over `(coupling, i)`.
    ///
    /// Only `x` and `z` are real-representable one-body operators.
    pub fn one_body(
        &self,
        axis: SpinAxis,
        terms: &[(f64, usize)],
    ) -> Result<DMatrix<f64>, OperatorError> {
        if axis == SpinAxis::Y {
            return Err(OperatorError::ImaginaryOperator { axis });
        }
        let m = axis.site_matrix();
        let mut out = DMatrix::zeros(self.dim, self.dim);
        for &(coupling, site) in terms {
            self.check_site(site)?;
            out += self.site_operator(&m, site) * coupling;
        }
        Ok(out)
    }

    /// Sum of same-axis pair terms `coupling * S^a_i S^a_j` over
    /// `(coupling, i, j)`. Real for all three axes.
    pub fn two_body(
        &self,
        axis: SpinAxis,
        terms: &[(f64, usize, usize)],
    ) -> Result<DMatrix<f64>, OperatorError> {
        let m = axis.site_matrix();
        let sign = axis.pair_sign();
        let mut out = DMatrix::zeros(self.dim, self.dim);
        for &(coupling, i, j) in terms {
            self.check_site(i)?;
            self.check_site(j)?;
            let pair = self.site_operator(&m, i) * self.site_operator(&m, j);
            out += pair * (sign * coupling);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dimension_is_two_to_the_sites() {
        assert_eq!(SpinBasis::new(1).size(), 2);
        assert_eq!(SpinBasis::new(3).size(), 8);
        assert_eq!(SpinBasis::new(10).size(), 1024);
    }

    #[test]
    fn sz_at_site_zero_of_two() {
        let basis = SpinBasis::new(2);
        let op = basis.one_body(SpinAxis::Z, &[(1.0, 0)]).unwrap();
        // Sz_0 = diag(1/2, 1/2, -1/2, -1/2) in the z product basis.
        let expected = [0.5, 0.5, -0.5, -0.5];
        for (k, &e) in expected.iter().enumerate() {
            assert_relative_eq!(op[(k, k)], e);
        }
        assert_relative_eq!(op.iter().map(|v| v.abs()).sum::<f64>(), 2.0);
    }

    #[test]
    fn xx_plus_yy_is_the_hopping_block() {
        let basis = SpinBasis::new(2);
        let xx = basis.two_body(SpinAxis::X, &[(1.0, 0, 1)]).unwrap();
        let yy = basis.two_body(SpinAxis::Y, &[(1.0, 0, 1)]).unwrap();
        let sum = xx + yy;
        // Sx_0 Sx_1 + Sy_0 Sy_1 = (S+_0 S-_1 + S-_0 S+_1)/2: couples
        // |up,dn> and |dn,up> with 1/2, annihilates the aligned states.
        let mut expected = DMatrix::zeros(4, 4);
        expected[(1, 2)] = 0.5;
        expected[(2, 1)] = 0.5;
        assert_relative_eq!((sum - expected).norm(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn yy_pair_is_real_and_symmetric() {
        let basis = SpinBasis::new(3);
        let yy = basis.two_body(SpinAxis::Y, &[(0.7, 0, 2)]).unwrap();
        assert_relative_eq!((&yy - yy.transpose()).norm(), 0.0, epsilon = 1e-15);
        // Sy_0 Sy_2 on |up,up,up> -> -1/4 |dn,up,dn>: matrix element -0.7/4.
        assert_relative_eq!(yy[(5, 0)], -0.7 / 4.0);
    }

    #[test]
    fn one_body_y_is_rejected() {
        let basis = SpinBasis::new(2);
        let err = basis.one_body(SpinAxis::Y, &[(1.0, 0)]).unwrap_err();
        assert_eq!(err, OperatorError::ImaginaryOperator { axis: SpinAxis::Y });
    }

    #[test]
    fn out_of_range_site_is_rejected() {
        let basis = SpinBasis::new(2);
        let err = basis.two_body(SpinAxis::Z, &[(1.0, 1, 2)]).unwrap_err();
        assert_eq!(err, OperatorError::SiteOutOfRange { site: 2, sites: 2 });
    }
}
