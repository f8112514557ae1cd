//! Unit conversion between inches/points and DrawingML integers.

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// Inches to EMU, rounded to the nearest unit.
pub fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH as f64).round() as i64
}

/// Points to the hundredths-of-a-point used by `sz` attributes.
pub fn font_size(points: f64) -> u32 {
    (points * 100.0).round().max(0.0) as u32
}
