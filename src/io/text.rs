//! Result-file content format: one value per line, `%.15e`.
//!
//! The format matches the predecessor tooling byte for byte (15 fractional
//! digits, signed two-digit exponent), which is what makes re-running a
//! sweep overwrite files with identical bytes.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from loading a persisted result vector.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A line that does not parse as a float.
    #[error("unparseable value {content:?} at {}:{line}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        content: String,
    },
}

/// `%.15e` with the C-style signed, at-least-two-digit exponent:
/// `5.000000000000000e-01`. Rust's `{:.15e}` writes the same mantissa but
/// a bare exponent (`e-1`), so the exponent is reformatted here.
pub fn fmt_scientific_15(value: f64) -> String {
    let s = format!("{:.15e}", value);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().expect("LowerExp exponent is an integer");
            format!(
                "{}e{}{:02}",
                mantissa,
                if exp < 0 { '-' } else { '+' },
                exp.abs()
            )
        }
        // inf / NaN carry no exponent.
        None => s,
    }
}

/// Write one value per line. The file is created or truncated; a partial
/// file is never left behind on success.
pub fn write_vector(path: &Path, values: &[f64]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for &v in values {
        writeln!(out, "{}", fmt_scientific_15(v))?;
    }
    out.flush()
}

/// Read a vector written by [`write_vector`] (or the predecessor tooling).
/// Blank lines are ignored; anything else must parse as a float.
pub fn load_vector(path: &Path) -> Result<Vec<f64>, LoadError> {
    let mut content = String::new();
    File::open(path)?.read_to_string(&mut content)?;

    let mut values = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let v: f64 = line.parse().map_err(|_| LoadError::Parse {
            path: path.to_path_buf(),
            line: idx + 1,
            content: line.to_string(),
        })?;
        values.push(v);
    }
    Ok(values)
}
