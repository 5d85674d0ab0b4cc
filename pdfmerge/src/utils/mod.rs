//! Small formatting helpers shared by the report and statistics types.

const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Format a byte count on a base-1024 scale.
///
/// Picks the largest unit whose scaled value is at least 1 and rounds to two
/// decimals, dropping trailing zeros. Zero renders as `"0 Byte"`.
///
/// ```
/// use pdfmerge::utils::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 Byte");
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// assert_eq!(format_bytes(1048576), "1 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Byte".to_string();
    }

    let exponent = (bytes.ilog2() / 10).min(UNITS.len() as u32 - 1);
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (scaled * 100.0).round() / 100.0;

    format!("{rounded} {}", UNITS[exponent as usize])
}
