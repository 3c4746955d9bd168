//! Retrieve-and-assemble coordinator: re-derive the naming scheme, load
//! every persisted quantity, assemble one table row per combination.

use std::path::PathBuf;

use log::info;
use thiserror::Error;

use crate::grid::ParamGrid;
use crate::io::{load_vector, LoadError};
use crate::naming::result_file_name;
use crate::table::{ResultRow, ResultTable};

/// Everything one retrieval call needs to know. The grid, labels,
/// version and quantity names must match what the sweep was run with,
/// or the derived file names will not resolve.
#[derive(Debug, Clone)]
pub struct RetrieveParams {
    pub version: i32,
    /// System sizes to collect, one sweep each.
    pub system_sizes: Vec<usize>,
    pub realization_ids: Vec<i64>,
    pub grid: ParamGrid,
    pub quantities: Vec<String>,
    pub data_dir: PathBuf,
}

/// Errors that abort a retrieval. There is no partial-row tolerance: any
/// missing or malformed file fails the whole call.
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// No file where the naming scheme says one should be.
    #[error("missing result file for quantity {quantity:?}: {}", path.display())]
    MissingFile { quantity: String, path: PathBuf },

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Load every (grid point, system size, realization) combination into a
/// table, one row each, rows in product order.
///
/// System size and realization id iterate as *trailing* product
/// dimensions — appended after the parameter lists, exactly as the sweep's
/// separate outer loops laid the files out. The asymmetry against the
/// sweep's own loop nesting is deliberate; both sides only have to agree
/// on the name of each file, and they do.
pub fn retrieve(params: &RetrieveParams) -> Result<ResultTable, RetrieveError> {
    let labels = params.grid.labels();
    let mut rows = Vec::new();

    for point in params.grid.points() {
        for &system_size in &params.system_sizes {
            for &realization in &params.realization_ids {
                let mut cells = Vec::with_capacity(params.quantities.len());
                for quantity in &params.quantities {
                    let path = params.data_dir.join(result_file_name(
                        quantity,
                        params.version,
                        system_size,
                        realization,
                        labels,
                        &point,
                    ));
                    let values = load_vector(&path).map_err(|err| match err {
                        LoadError::Io(io_err)
                            if io_err.kind() == std::io::ErrorKind::NotFound =>
                        {
                            RetrieveError::MissingFile {
                                quantity: quantity.clone(),
                                path: path.clone(),
                            }
                        }
                        other => RetrieveError::Load(other),
                    })?;
                    cells.push(values);
                }
                rows.push(ResultRow {
                    system_size,
                    realization,
                    params: point.clone(),
                    quantities: cells,
                });
            }
        }
    }

    info!(
        "retrieve vs={}: assembled {} row(s) from {}",
        params.version,
        rows.len(),
        params.data_dir.display(),
    );
    Ok(ResultTable::from_rows(labels, &params.quantities, rows))
}
