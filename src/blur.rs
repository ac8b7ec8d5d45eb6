//! Gaussian blur approximated by iterated box blur.
//!
//! Algorithm described here:
//! <http://blog.ivank.net/fastest-gaussian-blur.html>
//!
//! A true gaussian kernel costs O(w * h * c * kernel) per pass; a box
//! blur with a sliding accumulator costs O(w * h * c) regardless of
//! radius, and a handful of box passes converges on a gaussian. The
//! vertical pass works on contiguous columns only; the horizontal
//! direction is handled by transposing, blurring vertically again and
//! transposing back.

use crate::image::{transpose, Color, ColumnView, Image, Sample};

/// Box radii approximating a gaussian of standard deviation `sigma`
/// in `n` passes.
///
/// More passes approximate a true gaussian better at the cost of
/// running time.
pub fn box_sizes(sigma: f32, n: usize) -> Vec<usize> {
    let nf = n as f32;
    let w_ideal = (12.0 * sigma * sigma / nf + 1.0).sqrt();
    let mut wl = w_ideal.floor();
    if wl as i64 % 2 == 0 {
        wl -= 1.0;
    }
    let wu = wl + 2.0;

    let m_ideal =
        (12.0 * sigma * sigma - nf * wl * wl - 4.0 * nf * wl - 3.0 * nf) / (-4.0 * wl - 4.0);
    let m = m_ideal.round();

    (0..n)
        .map(|i| if (i as f32) < m { wl as usize } else { wu as usize })
        .collect()
}

/// Read one pixel of a column view into an f64 accumulator color.
fn pixel_f64<T: Sample>(col: &ColumnView<'_, T>, y: usize) -> Color<f64> {
    let samples: Vec<f64> = col.outer(y).iter().map(|&s| s.to_f64()).collect();
    let channels = samples.len();
    Color::from_parts(samples, [channels])
}

/// One pass of vertical box blur.
///
/// The accumulator starts from the column's top pixel (repeated for
/// the off-image part of the window) and then slides down the column,
/// subtracting the sample leaving the window and adding the one
/// entering it. Reads past either end clamp to the edge pixel.
fn vertical_box_blur<T: Sample>(img: &Image<T>, radius: usize) -> Image<T> {
    let mut blurred = img.clone();
    let (w, h, c) = (img.width(), img.height(), img.channels());
    if w == 0 || h == 0 || c == 0 {
        return blurred;
    }

    // A radius of 0 would make the slider cancel itself out; it must
    // stay within 1..=h.
    let radius = radius.clamp(1, h);
    let diameter = (radius * 2 + 1) as f64;

    for x in 0..w {
        let col = img.column(x);

        let mut acc = &pixel_f64(&col, 0) * (radius as f64 / diameter);
        for offset in 0..radius {
            acc += &(&pixel_f64(&col, offset) / diameter);
        }
        for ch in 0..c {
            blurred.set(x, 0, ch, T::from_f64(acc[ch]));
        }

        for row in 1..h {
            let leaving = pixel_f64(&col, row.saturating_sub(radius));
            let entering = pixel_f64(&col, (row + radius).min(h - 1));
            acc -= &(&leaving / diameter);
            acc += &(&entering / diameter);
            for ch in 0..c {
                blurred.set(x, row, ch, T::from_f64(acc[ch]));
            }
        }
    }

    blurred
}

/// Blur a copy of `source` with an approximated gaussian.
///
/// Runs in O(w * h * c) independent of `sigma`. A higher `passes`
/// count yields a closer approximation at the cost of running time.
pub fn fast_gaussian<T: Sample>(source: &Image<T>, sigma: f32, passes: usize) -> Image<T> {
    let radii = box_sizes(sigma, passes);

    let mut blurred = source.clone();
    for &radius in &radii {
        blurred = vertical_box_blur(&blurred, radius);
    }

    // Blur the other way.
    blurred = transpose(&blurred);
    for &radius in &radii {
        blurred = vertical_box_blur(&blurred, radius);
    }

    transpose(&blurred)
}
