//! Dense eigendecomposition for real symmetric operators.
//!
//! Uses `SymmetricEigen`, which returns eigenpairs in no particular order;
//! everything downstream expects ascending energies, so the pairs are
//! sorted here once.

use nalgebra::{DMatrix, DVector};

/// Eigenvalues and eigenvectors of one operator, ascending by eigenvalue.
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// Eigenvalues in ascending order.
    pub energies: DVector<f64>,
    /// Matching eigenvectors as columns, one per eigenvalue.
    pub states: DMatrix<f64>,
}

impl Spectrum {
    /// Number of eigenpairs.
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Expectation value `<v_k|op|v_k>` of an operator in eigenstate `k`.
    pub fn expectation(&self, op: &DMatrix<f64>, k: usize) -> f64 {
        let v = self.states.column(k);
        v.dot(&(op * v))
    }
}

/// Diagonalize a real symmetric matrix, eigenpairs sorted ascending.
pub fn diagonalize(h: &DMatrix<f64>) -> Spectrum {
    let eig = h.clone().symmetric_eigen();
    let n = eig.eigenvalues.len();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| eig.eigenvalues[a].total_cmp(&eig.eigenvalues[b]));

    let energies = DVector::from_iterator(n, order.iter().map(|&i| eig.eigenvalues[i]));
    let states = DMatrix::from_columns(
        &order
            .iter()
            .map(|&i| eig.eigenvectors.column(i).into_owned())
            .collect::<Vec<_>>(),
    );

    Spectrum { energies, states }
}
