//! Result-file naming scheme.
//!
//! Names must reproduce, character for character, the form
//!
//!   `<Q>_vs=<vs>_L=<L>_gid=<gid>_<labels_tuple>=<values_tuple>.txt`
//!
//! where both tuples are rendered the way Python's `str(tuple)` renders
//! them (single-quoted labels, comma-space separators, trailing comma on
//! 1-tuples) and floats the way Python's `repr` renders them. Retrieval
//! re-derives the same string to locate a file, and data written by the
//! predecessor tooling is addressed by these exact names.

/// Python `repr` of an `f64`.
///
/// Shortest round-trip digits; fixed notation with a `.0` suffix for
/// integral values, switching to scientific with a signed two-or-more
/// digit exponent below 1e-4 and at or above 1e16.
pub fn py_float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }

    // `{:e}` already yields the shortest mantissa that round-trips; only
    // the layout differs from Python.
    let shortest = format!("{:e}", value);
    let (mantissa, exp) = shortest
        .split_once('e')
        .expect("LowerExp output always contains an exponent");
    let exp: i32 = exp.parse().expect("LowerExp exponent is an integer");
    let negative = mantissa.starts_with('-');
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();

    let body = if exp < -4 || exp >= 16 {
        let m = if digits.len() == 1 {
            digits
        } else {
            format!("{}.{}", &digits[..1], &digits[1..])
        };
        format!("{}e{}{:02}", m, if exp < 0 { '-' } else { '+' }, exp.abs())
    } else if exp < 0 {
        format!("0.{}{}", "0".repeat((-exp - 1) as usize), digits)
    } else if exp as usize >= digits.len() - 1 {
        format!("{}{}.0", digits, "0".repeat(exp as usize + 1 - digits.len()))
    } else {
        let point = exp as usize + 1;
        format!("{}.{}", &digits[..point], &digits[point..])
    };

    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

fn py_tuple(items: Vec<String>) -> String {
    match items.len() {
        1 => format!("({},)", items[0]),
        _ => format!("({})", items.join(", ")),
    }
}

/// Python `str(tuple)` of string labels: `('alpha', 'beta')`, `('theta',)`.
pub fn labels_tuple_repr(labels: &[String]) -> String {
    py_tuple(labels.iter().map(|l| format!("'{}'", l)).collect())
}

/// Python `str(tuple)` of float values: `(0.0, 1.0)`, `(0.5,)`.
pub fn values_tuple_repr(values: &[f64]) -> String {
    py_tuple(values.iter().map(|&v| py_float_repr(v)).collect())
}

/// File name for one (quantity, version, size, realization, grid point).
pub fn result_file_name(
    quantity: &str,
    version: i32,
    system_size: usize,
    realization: i64,
    labels: &[String],
    values: &[f64],
) -> String {
    format!(
        "{}_vs={}_L={}_gid={}_{}={}.txt",
        quantity,
        version,
        system_size,
        realization,
        labels_tuple_repr(labels),
        values_tuple_repr(values),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_repr_fixed_forms() {
        assert_eq!(py_float_repr(0.0), "0.0");
        assert_eq!(py_float_repr(-0.0), "-0.0");
        assert_eq!(py_float_repr(1.0), "1.0");
        assert_eq!(py_float_repr(-1.0), "-1.0");
        assert_eq!(py_float_repr(0.5), "0.5");
        assert_eq!(py_float_repr(0.1), "0.1");
        assert_eq!(py_float_repr(100.0), "100.0");
        assert_eq!(py_float_repr(1234.5), "1234.5");
        assert_eq!(py_float_repr(0.0001), "0.0001");
        assert_eq!(py_float_repr(0.30000000000000004), "0.30000000000000004");
    }

    #[test]
    fn float_repr_scientific_forms() {
        assert_eq!(py_float_repr(1e-5), "1e-05");
        assert_eq!(py_float_repr(1.5e-5), "1.5e-05");
        assert_eq!(py_float_repr(-2.5e-7), "-2.5e-07");
        assert_eq!(py_float_repr(1e16), "1e+16");
        assert_eq!(py_float_repr(1.2e20), "1.2e+20");
    }

    #[test]
    fn float_repr_non_finite() {
        assert_eq!(py_float_repr(f64::NAN), "nan");
        assert_eq!(py_float_repr(f64::INFINITY), "inf");
        assert_eq!(py_float_repr(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn tuple_reprs_match_python_str() {
        let labels: Vec<String> = ["alpha", "beta", "gamma"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(labels_tuple_repr(&labels), "('alpha', 'beta', 'gamma')");
        assert_eq!(labels_tuple_repr(&labels[..1]), "('alpha',)");
        assert_eq!(values_tuple_repr(&[0.0, 1.0, 0.1]), "(0.0, 1.0, 0.1)");
        assert_eq!(values_tuple_repr(&[0.5]), "(0.5,)");
    }

    #[test]
    fn file_name_round_trips_the_legacy_form() {
        let labels: Vec<String> = ["alpha", "beta", "gamma"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let name = result_file_name("E", 1, 7, -1, &labels, &[0.0, 1.0, 0.1]);
        assert_eq!(
            name,
            "E_vs=1_L=7_gid=-1_('alpha', 'beta', 'gamma')=(0.0, 1.0, 0.1).txt"
        );
    }

    #[test]
    fn file_name_single_label() {
        let labels = vec!["theta".to_string()];
        let name = result_file_name("E", 0, 3, 0, &labels, &[1.0]);
        assert_eq!(name, "E_vs=0_L=3_gid=0_('theta',)=(1.0,).txt");
    }
}
