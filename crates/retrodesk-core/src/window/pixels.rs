//! Lenient number parsing for saved geometry.
//!
//! Saved state may come from a renderer that tracks sub-pixel positions, so
//! coordinates are read as floats and rounded to the nearest pixel instead
//! of failing the whole record.

use serde::{Deserialize, Deserializer};

use super::types::MAX_Z_INDEX;

/// A coordinate, rounded and saturated to `i32`.
pub(crate) fn signed<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.round() as i32)
}

/// A size, rounded and saturated to `u32`. Negative sizes read as zero.
pub(crate) fn unsigned<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.round() as u32)
}

/// A stacking value, rounded and clamped to `0..=MAX_Z_INDEX`.
pub(crate) fn z_index<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.round().clamp(0.0, MAX_Z_INDEX as f64) as u64)
}
