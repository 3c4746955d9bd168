//! Parameter grids: ordered labels with candidate values per label.
//!
//! A grid point is one tuple drawn from the Cartesian product of the value
//! lists, in lexicographic order with the leftmost label outermost. The
//! same order is re-derived at retrieval time, so it must stay stable.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from grid construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The number of value lists does not match the number of labels.
    #[error("{labels} parameter labels but {lists} value lists")]
    LengthMismatch { labels: usize, lists: usize },

    /// A grid needs at least one parameter.
    #[error("parameter grid has no labels")]
    Empty,
}

/// Ordered parameter labels and their candidate values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid", into = "RawGrid")]
pub struct ParamGrid {
    labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

/// Serde surface for [`ParamGrid`], so YAML job files can't bypass the
/// construction checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawGrid {
    labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl TryFrom<RawGrid> for ParamGrid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, GridError> {
        ParamGrid::new(raw.labels, raw.values)
    }
}

impl From<ParamGrid> for RawGrid {
    fn from(grid: ParamGrid) -> Self {
        RawGrid {
            labels: grid.labels,
            values: grid.values,
        }
    }
}

impl ParamGrid {
    /// Build a grid from labels and one value list per label.
    pub fn new<S: Into<String>>(
        labels: Vec<S>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, GridError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(GridError::Empty);
        }
        if labels.len() != values.len() {
            return Err(GridError::LengthMismatch {
                labels: labels.len(),
                lists: values.len(),
            });
        }
        Ok(Self { labels, values })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn value_lists(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Number of grid points in the product.
    pub fn len(&self) -> usize {
        self.values.iter().map(Vec::len).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all grid points in product order. Each point has one
    /// value per label, in label order.
    pub fn points(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        self.values
            .iter()
            .map(|list| list.iter().copied())
            .multi_cartesian_product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> ParamGrid {
        ParamGrid::new(
            vec!["alpha", "beta", "gamma"],
            vec![vec![0.0, 0.5, 1.0], vec![1.0], vec![0.1, 1.0]],
        )
        .unwrap()
    }

    #[test]
    fn points_have_one_value_per_label() {
        let g = grid();
        assert_eq!(g.len(), 6);
        for p in g.points() {
            assert_eq!(p.len(), g.labels().len());
        }
    }

    #[test]
    fn product_order_is_lexicographic_leftmost_outer() {
        let g = ParamGrid::new(vec!["a", "b"], vec![vec![0.0, 1.0], vec![10.0, 20.0]]).unwrap();
        let pts: Vec<Vec<f64>> = g.points().collect();
        assert_eq!(
            pts,
            vec![
                vec![0.0, 10.0],
                vec![0.0, 20.0],
                vec![1.0, 10.0],
                vec![1.0, 20.0],
            ]
        );
    }

    #[test]
    fn iteration_is_reproducible() {
        let g = grid();
        let a: Vec<Vec<f64>> = g.points().collect();
        let b: Vec<Vec<f64>> = g.points().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = ParamGrid::new(vec!["a", "b"], vec![vec![0.0]]).unwrap_err();
        assert_eq!(err, GridError::LengthMismatch { labels: 2, lists: 1 });
    }

    #[test]
    fn empty_grid_is_rejected() {
        let err = ParamGrid::new(Vec::<String>::new(), vec![]).unwrap_err();
        assert_eq!(err, GridError::Empty);
    }
}
