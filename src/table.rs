//! In-memory table of retrieved results.
//!
//! One row per (grid point, system size, realization) combination, one
//! column per identifying field plus one per quantity. Quantity cells
//! hold whole numeric vectors; they are never flattened into columns.

use std::fmt::Write as _;

/// One assembled row.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub system_size: usize,
    pub realization: i64,
    /// Parameter values, in label order.
    pub params: Vec<f64>,
    /// Loaded quantity vectors, in quantity order.
    pub quantities: Vec<Vec<f64>>,
}

/// Rows plus the column layout `L, g_id, <labels...>, <quantities...>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    columns: Vec<String>,
    labels: Vec<String>,
    quantity_names: Vec<String>,
    rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Build the table in one shot from pre-collected rows.
    pub fn from_rows(
        labels: &[String],
        quantity_names: &[String],
        rows: Vec<ResultRow>,
    ) -> Self {
        let mut columns = vec!["L".to_string(), "g_id".to_string()];
        columns.extend(labels.iter().cloned());
        columns.extend(quantity_names.iter().cloned());
        Self {
            columns,
            labels: labels.to_vec(),
            quantity_names: quantity_names.to_vec(),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parameter value of one row by label.
    pub fn param(&self, row: usize, label: &str) -> Option<f64> {
        let col = self.labels.iter().position(|l| l == label)?;
        self.rows.get(row).map(|r| r.params[col])
    }

    /// Quantity vector of one row by name.
    pub fn quantity(&self, row: usize, name: &str) -> Option<&[f64]> {
        let col = self.quantity_names.iter().position(|q| q == name)?;
        self.rows.get(row).map(|r| r.quantities[col].as_slice())
    }

    /// A `head()`-style text block of the first `n` rows.
    pub fn preview(&self, n: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.columns.join("  "));
        for row in self.rows.iter().take(n) {
            let mut cells: Vec<String> = vec![row.system_size.to_string(), row.realization.to_string()];
            cells.extend(row.params.iter().map(|v| format!("{v}")));
            cells.extend(row.quantities.iter().map(|q| preview_cell(q)));
            let _ = writeln!(out, "{}", cells.join("  "));
        }
        if self.rows.len() > n {
            let _ = writeln!(out, "... {} rows total", self.rows.len());
        }
        out
    }
}

fn preview_cell(values: &[f64]) -> String {
    match values.len() {
        0 => "[]".to_string(),
        1 => format!("{:.6}", values[0]),
        n if n <= 3 => {
            let items: Vec<String> = values.iter().map(|v| format!("{v:.4}")).collect();
            format!("[{}]", items.join(" "))
        }
        n => format!("[{:.4} {:.4} ...; {n}]", values[0], values[1]),
    }
}
