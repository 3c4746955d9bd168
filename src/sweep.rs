//! Sweep-and-write coordinator: iterate the parameter grid, build and
//! (optionally) diagonalize the operator, dispatch quantities, persist.

use std::fs;
use std::path::PathBuf;

use log::{debug, info, warn};
use thiserror::Error;

use crate::basis::{OperatorError, SpinBasis};
use crate::diag::diagonalize;
use crate::grid::ParamGrid;
use crate::hamiltonian::OperatorBuilder;
use crate::io;
use crate::naming::result_file_name;
use crate::quantity::{QuantityError, QuantityFn, QuantityRegistry};

/// Everything one sweep invocation needs to know.
#[derive(Debug, Clone)]
pub struct SweepParams {
    /// Version tag, part of every file name.
    pub version: i32,
    /// Chain length; the Hilbert space has dimension `2^system_size`.
    pub system_size: usize,
    /// Realization ids, looped outermost.
    pub realization_ids: Vec<i64>,
    /// Parameter labels and value lists.
    pub grid: ParamGrid,
    /// Quantity names to dispatch, in order.
    pub quantities: Vec<String>,
    /// Diagonalize the operator once per grid point and use the spectral
    /// calling convention.
    pub diagonalize: bool,
    /// Write each result to its named file under `data_dir`.
    pub persist: bool,
    /// Output directory; created (with parents) on the first persisting
    /// sweep. Explicit so tests and drivers can redirect it.
    pub data_dir: PathBuf,
}

/// Errors that abort a sweep.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("operator builder failed: {0}")]
    Operator(#[from] OperatorError),

    /// A quantity function rejected its inputs.
    #[error("quantity {name:?} failed: {source}")]
    Quantity {
        name: String,
        source: QuantityError,
    },

    /// The registered calling convention disagrees with the `diagonalize`
    /// flag. Distinct from an unregistered name, which is a warning.
    #[error(
        "quantity {name:?} is registered with the {registered} convention \
         but the sweep dispatches {requested}; check the diagonalize flag"
    )]
    SignatureMismatch {
        name: String,
        registered: &'static str,
        requested: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A requested quantity with no registered function. The sweep skips it
/// and keeps going; the record of the skip is surfaced here.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepWarning {
    pub quantity: String,
    pub realization: i64,
    pub point: Vec<f64>,
}

/// One computed quantity at one grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRecord {
    pub quantity: String,
    pub realization: i64,
    pub point: Vec<f64>,
    pub values: Vec<f64>,
    /// Where the result was persisted, if it was.
    pub path: Option<PathBuf>,
}

/// Everything a sweep produced, persisted or not.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub records: Vec<SweepRecord>,
    pub warnings: Vec<SweepWarning>,
}

impl SweepReport {
    pub fn files_written(&self) -> usize {
        self.records.iter().filter(|r| r.path.is_some()).count()
    }

    /// Records for one quantity, in sweep order.
    pub fn records_for<'a>(&'a self, quantity: &'a str) -> impl Iterator<Item = &'a SweepRecord> + 'a {
        self.records.iter().filter(move |r| r.quantity == quantity)
    }
}

/// One-call form of [`Sweep::run`].
pub fn run_sweep<B: OperatorBuilder>(
    params: SweepParams,
    builder: B,
    registry: &QuantityRegistry,
) -> Result<SweepReport, SweepError> {
    Sweep::new(params, builder).run(registry)
}

/// Parameter-sweep driver for one operator builder.
#[derive(Debug)]
pub struct Sweep<B: OperatorBuilder> {
    params: SweepParams,
    builder: B,
}

impl<B: OperatorBuilder> Sweep<B> {
    pub fn new(params: SweepParams, builder: B) -> Self {
        Self { params, builder }
    }

    pub fn params(&self) -> &SweepParams {
        &self.params
    }

    /// Run the full nested iteration: realizations outermost, grid points
    /// in product order, quantities in request order. Re-running with
    /// identical inputs overwrites the same files with identical bytes.
    pub fn run(&self, registry: &QuantityRegistry) -> Result<SweepReport, SweepError> {
        let p = &self.params;
        let basis = SpinBasis::new(p.system_size);

        if p.persist {
            fs::create_dir_all(&p.data_dir)?;
        }

        info!(
            "sweep vs={} L={}: {} realization(s) x {} grid point(s), quantities {:?}",
            p.version,
            p.system_size,
            p.realization_ids.len(),
            p.grid.len(),
            p.quantities,
        );

        let requested = if p.diagonalize { "spectral" } else { "plain" };
        let mut report = SweepReport::default();

        for &realization in &p.realization_ids {
            for point in p.grid.points() {
                let operator = self
                    .builder
                    .build(p.system_size, &basis, &point, realization)?;
                let spectrum = p.diagonalize.then(|| diagonalize(&operator));

                for name in &p.quantities {
                    let func = match registry.get(name) {
                        Some(func) => func,
                        None => {
                            warn!(
                                "no quantity function registered for {:?}; skipping \
                                 (gid={}, point={:?})",
                                name, realization, point
                            );
                            report.warnings.push(SweepWarning {
                                quantity: name.clone(),
                                realization,
                                point: point.clone(),
                            });
                            continue;
                        }
                    };

                    let values = match (func, &spectrum) {
                        (QuantityFn::Spectral(f), Some(spec)) => {
                            f(p.system_size, &basis, &point, &operator, spec)
                        }
                        (QuantityFn::Plain(f), None) => {
                            f(p.system_size, &basis, &point, &operator)
                        }
                        (func, _) => {
                            return Err(SweepError::SignatureMismatch {
                                name: name.clone(),
                                registered: func.convention(),
                                requested,
                            })
                        }
                    }
                    .map_err(|source| SweepError::Quantity {
                        name: name.clone(),
                        source,
                    })?;

                    let path = if p.persist {
                        let file = p.data_dir.join(result_file_name(
                            name,
                            p.version,
                            p.system_size,
                            realization,
                            p.grid.labels(),
                            &point,
                        ));
                        io::write_vector(&file, &values)?;
                        debug!("wrote {}", file.display());
                        Some(file)
                    } else {
                        None
                    };

                    report.records.push(SweepRecord {
                        quantity: name.clone(),
                        realization,
                        point: point.clone(),
                        values,
                        path,
                    });
                }
            }
        }

        info!(
            "sweep vs={} L={} done: {} record(s), {} file(s), {} warning(s)",
            p.version,
            p.system_size,
            report.records.len(),
            report.files_written(),
            report.warnings.len(),
        );
        Ok(report)
    }
}
