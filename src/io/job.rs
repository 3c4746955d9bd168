//! YAML job files: one document describing a sweep plus its retrieval.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::ParamGrid;
use crate::retrieve::RetrieveParams;
use crate::sweep::SweepParams;

/// Errors from loading a job file.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed job file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A full job: sweep every listed system size, then retrieve the lot.
/// Every field has the predecessor tooling's default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSpec {
    pub version: i32,
    pub system_sizes: Vec<usize>,
    pub realization_ids: Vec<i64>,
    pub grid: ParamGrid,
    pub quantities: Vec<String>,
    pub diagonalize: bool,
    pub persist: bool,
    pub data_dir: PathBuf,
}

impl Default for JobSpec {
    fn default() -> Self {
        let grid = ParamGrid::new(
            vec!["alpha", "beta", "gamma"],
            vec![vec![0.0, 0.5, 1.0], vec![1.0], vec![0.1, 1.0]],
        )
        .expect("default grid is statically valid");
        Self {
            version: 0,
            system_sizes: vec![8],
            realization_ids: vec![0],
            grid,
            quantities: vec!["E".to_string(), "S0z".to_string(), "A_norm".to_string()],
            diagonalize: true,
            persist: true,
            data_dir: PathBuf::from("Sim_Data"),
        }
    }
}

impl JobSpec {
    /// Sweep parameters for one of the job's system sizes.
    pub fn sweep_params(&self, system_size: usize) -> SweepParams {
        SweepParams {
            version: self.version,
            system_size,
            realization_ids: self.realization_ids.clone(),
            grid: self.grid.clone(),
            quantities: self.quantities.clone(),
            diagonalize: self.diagonalize,
            persist: self.persist,
            data_dir: self.data_dir.clone(),
        }
    }

    /// Retrieval parameters covering every system size of the job.
    pub fn retrieve_params(&self) -> RetrieveParams {
        RetrieveParams {
            version: self.version,
            system_sizes: self.system_sizes.clone(),
            realization_ids: self.realization_ids.clone(),
            grid: self.grid.clone(),
            quantities: self.quantities.clone(),
            data_dir: self.data_dir.clone(),
        }
    }
}

/// Read a [`JobSpec`] from a YAML file.
pub fn read_job(path: &Path) -> Result<JobSpec, JobError> {
    let file = File::open(path)?;
    let spec = serde_yaml::from_reader(BufReader::new(file))?;
    Ok(spec)
}

// example of yaml file
// version: 1
// system_sizes: [7]
// realization_ids: [-1]
// grid:
//   labels: [alpha, beta, gamma]
//   values: [[0.0, 0.5, 1.0], [1.0], [0.1, 1.0]]
// quantities: [E, S0z, A_norm]
// diagonalize: true
// persist: true
// data_dir: Sim_Data

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_predecessor() {
        let spec = JobSpec::default();
        assert_eq!(spec.version, 0);
        assert_eq!(spec.system_sizes, vec![8]);
        assert_eq!(spec.realization_ids, vec![0]);
        assert_eq!(spec.grid.labels(), &["alpha", "beta", "gamma"]);
        assert_eq!(spec.quantities, vec!["E", "S0z", "A_norm"]);
        assert!(spec.diagonalize);
        assert!(spec.persist);
        assert_eq!(spec.data_dir, PathBuf::from("Sim_Data"));
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let spec: JobSpec = serde_yaml::from_str(
            "version: 1\nsystem_sizes: [7]\nrealization_ids: [-1]\n",
        )
        .unwrap();
        assert_eq!(spec.version, 1);
        assert_eq!(spec.system_sizes, vec![7]);
        assert_eq!(spec.realization_ids, vec![-1]);
        assert_eq!(spec.quantities, vec!["E", "S0z", "A_norm"]);
    }

    #[test]
    fn grid_in_yaml_is_validated() {
        let err = serde_yaml::from_str::<JobSpec>(
            "grid:\n  labels: [a, b]\n  values: [[0.0]]\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("2 parameter labels"));
    }
}
