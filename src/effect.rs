//! Simulations of physical filters and lens aberrations.
//!
//! These effects consume only the public image contract; like the blur
//! pass they treat the image as columns of contiguous pixels.

use crate::image::{Image, Sample};
use num_traits::Float;

/// Normalized gaussian weight at integer offset `offset`.
fn gaussian_weight(std_deviation: f32, offset: i64) -> f64 {
    let sigma = std_deviation as f64;
    let x = offset as f64;
    (-(x * x) / (2.0 * sigma * sigma)).exp() / ((2.0 * std::f64::consts::PI).sqrt() * sigma)
}

/// Imitates diffusion filters like the Tiffen Black Pro-Mist or the
/// Schneider Hollywood Black Magic.
///
/// Applies a separable gaussian bloom whose kernel weights are scaled
/// by the source pixel's value raised to `exponent`, so bright pixels
/// glow onto their surroundings while dim ones barely contribute. The
/// glow is scaled by `intensity` and added on top of the input.
///
/// The kernel reaches three standard deviations in each direction; a
/// non-positive deviation disables the corresponding axis. Limited to
/// floating-point samples, whose intensity range makes "relative to
/// full white" well defined.
pub fn magic_mist<T>(
    input: &Image<T>,
    std_deviation_x: f32,
    std_deviation_y: f32,
    intensity: f32,
    exponent: i32,
) -> Image<T>
where
    T: Sample + Float,
{
    let (w, h, c) = (input.width(), input.height(), input.channels());
    let mut out = input.clone();
    if w == 0 || h == 0 || c == 0 {
        return out;
    }

    let radius_x = (std_deviation_x * 3.0).ceil() as i64;
    let radius_y = (std_deviation_y * 3.0).ceil() as i64;
    let idx = |x: usize, y: usize| (x * h + y) * c;

    // Bloom vertically, weighting each contribution by the source
    // value raised to `exponent`.
    let mut vertical = vec![0.0f64; w * h * c];
    for x in 0..w {
        for y in 0..h {
            let lo = (y as i64 - radius_y).max(0) as usize;
            let hi = (y as i64 + radius_y).clamp(0, h as i64) as usize;
            for bloom_y in lo..hi {
                let weight = gaussian_weight(std_deviation_y, bloom_y as i64 - y as i64);
                for ch in 0..c {
                    let v = input.get(x, bloom_y, ch).to_f64();
                    vertical[idx(x, y) + ch] += weight * v.powi(exponent);
                }
            }
        }
    }

    // Bloom the vertical pass horizontally and scale by `intensity`.
    let mut glow = vec![0.0f64; w * h * c];
    for x in 0..w {
        for y in 0..h {
            let lo = (x as i64 - radius_x).max(0) as usize;
            let hi = (x as i64 + radius_x).clamp(0, w as i64) as usize;
            for bloom_x in lo..hi {
                let weight = gaussian_weight(std_deviation_x, bloom_x as i64 - x as i64);
                for ch in 0..c {
                    glow[idx(x, y) + ch] +=
                        weight * vertical[idx(bloom_x, y) + ch] * intensity as f64;
                }
            }
        }
    }

    for (dst, &g) in out.data_mut().iter_mut().zip(glow.iter()) {
        *dst += T::from_f64(g);
    }
    out
}
