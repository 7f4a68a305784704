#[cfg(feature = "plotters")]
use std::cmp::Ordering;

/// Like `partial_cmp` but treats `NAN` as equal to everything else
#[cfg(feature = "plotters")]
pub fn partial_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Formats a number in scientific notation the way C's `%e` does: six digits after the decimal
/// point and a signed exponent of at least two digits (`1.234568e-09`)
pub fn format_scientific(x: f64) -> String {
    if !x.is_finite() {
        return format!("{}", x);
    }

    let formatted = format!("{:.6e}", x);

    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent = exponent.parse::<i32>().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

/// Formats a number in scientific notation with a fixed width of `width` characters, for aligned
/// columns of printed output
pub fn format_num(x: f64, width: usize) -> String {
    format!("{:>width$}", format_scientific(x), width = width)
}

/// Applies a small offset to the value to prevent taking the log of zero
#[cfg(feature = "plotters")]
pub fn apply_offset(x: f64) -> f64 {
    let offset = 1e-20;
    if x >= 0.0 {
        x + offset
    } else {
        x - offset
    }
}
