//! Index-field label decoding.
//!
//! Labels pack an RGB triple into one integer, red in the lowest byte.

use crate::grid::DenseGrid;

/// Decode a packed label into normalized `[r, g, b]` in `[0, 1]`.
///
/// Channels are `v % 256`, `(v / 256) % 256` and `(v / 256 / 256) % 256` using
/// floored division, so negative labels still map into range.
#[inline]
pub fn decode_index_color(label: i64) -> [f32; 3] {
    let r = label.rem_euclid(256);
    let g = label.div_euclid(256).rem_euclid(256);
    let b = label.div_euclid(256).div_euclid(256).rem_euclid(256);
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

/// Pack an 8-bit RGB triple into a label.
#[inline]
pub fn encode_index_color(rgb: [u8; 3]) -> i64 {
    rgb[0] as i64 + 256 * rgb[1] as i64 + 65536 * rgb[2] as i64
}

/// Decode every label of an index field.
pub fn decode_index_field(field: &DenseGrid<i32>) -> DenseGrid<[f32; 3]> {
    field.map(|v| decode_index_color(v as i64))
}
