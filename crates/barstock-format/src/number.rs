//! Fixed-precision number rendering.

/// Bias added to percentages before rounding to one decimal.
pub const PERCENT_BIAS: f64 = 0.01;

/// Rounds half away from zero at `decimals` fraction digits.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Renders `value` with `decimals` fraction digits, grouping the integer part
/// in threes with `separator` when one is given.
pub fn format_fixed(value: f64, decimals: usize, separator: Option<char>) -> String {
    let rounded = round_to(value, decimals);
    let fixed = format!("{:.*}", decimals, rounded.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    match separator {
        Some(sep) => {
            let digits = int_part.len();
            for (idx, ch) in int_part.chars().enumerate() {
                if idx > 0 && (digits - idx) % 3 == 0 {
                    out.push(sep);
                }
                out.push(ch);
            }
        }
        None => out.push_str(int_part),
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
