//! Human-readable formatting helpers shared by gallery responses.

/// Size units in 1024-base steps.
const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count for display: `0 Bytes`, `1.5 KB`, `2.34 MB`, ...
///
/// Uses 1024-base units, rounds to two decimals, and drops trailing
/// zeros (`1.00 KB` renders as `1 KB`). Sizes beyond the GB range are
/// clamped to GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(SIZE_UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;

    let mut digits = format!("{rounded:.2}");
    while digits.ends_with('0') {
        digits.pop();
    }
    if digits.ends_with('.') {
        digits.pop();
    }

    format!("{digits} {}", SIZE_UNITS[exponent])
}
