use std::sync::OnceLock;

use crate::consts::{
    CIE_EPSILON, CIE_KAPPA, LUMA_B, LUMA_G, LUMA_R, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R,
};

/// sRGB 8-bit component to linear light, one entry per byte value.
fn linear_table() -> &'static [f64; 256] {
    static TABLE: OnceLock<[f64; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [0.0f64; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let c = i as f64 / 255.0;
            *entry = if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            };
        }
        table
    })
}

/// Linear-light value of an 8-bit sRGB component.
pub fn srgb_to_linear(component: u8) -> f64 {
    linear_table()[component as usize]
}

/// Cube root for non-negative inputs: bit-level initial guess refined by
/// three Newton steps. Accurate to ~1e-12 relative on (0, 1].
pub fn fast_cbrt(x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let mut y = f64::from_bits(x.to_bits() / 3 + 0x2A9F_7893_782D_A1CE);
    for _ in 0..3 {
        y = (2.0 * y + x / (y * y)) / 3.0;
    }
    y
}

/// CIE L* lightness of an sRGB pixel, scaled to [0.0, 1.0].
pub fn perceptual_lightness(r: u8, g: u8, b: u8) -> f64 {
    let table = linear_table();
    let y = LUMINANCE_R * table[r as usize]
        + LUMINANCE_G * table[g as usize]
        + LUMINANCE_B * table[b as usize];
    let l = if y > CIE_EPSILON {
        116.0 * fast_cbrt(y) - 16.0
    } else {
        CIE_KAPPA * y
    };
    (l / 100.0).clamp(0.0, 1.0)
}

/// BT.601 grayscale of an sRGB pixel in [0.0, 1.0].
pub fn grayscale(r: u8, g: u8, b: u8) -> f64 {
    (LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64) / 255.0
}

/// `true` for a white pixel: grayscale at or above `threshold`.
pub fn binarize(r: u8, g: u8, b: u8, threshold: f64) -> bool {
    grayscale(r, g, b) >= threshold
}
