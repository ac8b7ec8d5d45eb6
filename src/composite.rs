//! Compositing: interpolated sampling, blending and transform-aware
//! merging.

use crate::image::{Color, Image, PixelView, Sample};
use crate::transform::Transform2d;
use crate::Result;

/// A strategy for sampling an image at fractional coordinates.
///
/// Strategies are zero-sized types dispatched statically; algorithms
/// take the strategy as a type parameter and pay no per-pixel call
/// overhead. Samples outside the image yield a minimum-intensity
/// (black) color.
pub trait Interpolation<T: Sample> {
    /// Sample `source` at the fractional position `(x, y)`.
    fn interpolate(source: &Image<T>, x: f32, y: f32) -> Color<T>;
}

/// A black pixel matching the source's channel count.
fn black<T: Sample>(source: &Image<T>) -> Color<T> {
    Color::filled([source.channels()], T::RANGE.min)
}

/// Nearest-neighbor sampling, truncating the coordinates.
pub struct NearestNeighbor;

impl<T: Sample> Interpolation<T> for NearestNeighbor {
    fn interpolate(source: &Image<T>, x: f32, y: f32) -> Color<T> {
        if x < 0.0 || y < 0.0 {
            return black(source);
        }
        let (ix, iy) = (x as usize, y as usize);
        if ix >= source.width() || iy >= source.height() {
            return black(source);
        }
        source.color_at(ix, iy)
    }
}

/// Nearest-neighbor sampling, rounding to the closest pixel center.
pub struct NearestNeighborRound;

impl<T: Sample> Interpolation<T> for NearestNeighborRound {
    fn interpolate(source: &Image<T>, x: f32, y: f32) -> Color<T> {
        let (rx, ry) = (x.round(), y.round());
        if rx < 0.0 || ry < 0.0 {
            return black(source);
        }
        let (ix, iy) = (rx as usize, ry as usize);
        if ix >= source.width() || iy >= source.height() {
            return black(source);
        }
        source.color_at(ix, iy)
    }
}

/// Bilinear sampling over the four surrounding pixels.
pub struct Bilinear;

impl<T: Sample> Interpolation<T> for Bilinear {
    fn interpolate(source: &Image<T>, x: f32, y: f32) -> Color<T> {
        let (w, h) = (source.width(), source.height());
        if w == 0 || h == 0 || x < 0.0 || y < 0.0 || x > (w - 1) as f32 || y > (h - 1) as f32 {
            return black(source);
        }

        let x0 = x.floor() as usize;
        let y0 = y.floor() as usize;
        let x1 = (x0 + 1).min(w - 1);
        let y1 = (y0 + 1).min(h - 1);
        let fx = (x - x0 as f32) as f64;
        let fy = (y - y0 as f32) as f64;

        let (p00, p10) = (source.pixel(x0, y0), source.pixel(x1, y0));
        let (p01, p11) = (source.pixel(x0, y1), source.pixel(x1, y1));

        let samples: Vec<T> = (0..source.channels())
            .map(|c| {
                let top = p00[c].to_f64() * (1.0 - fx) + p10[c].to_f64() * fx;
                let bottom = p01[c].to_f64() * (1.0 - fx) + p11[c].to_f64() * fx;
                T::from_f64(top * (1.0 - fy) + bottom * fy)
            })
            .collect();
        let channels = samples.len();
        Color::from_parts(samples, [channels])
    }
}

/// The "over" blend of a foreground onto a background.
///
/// With an alpha channel configured, each channel computes
/// `fg + bg * (1 - fg_alpha)`, treating the foreground as
/// premultiplied. Without one the foreground simply wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay {
    alpha: Option<usize>,
}

impl Overlay {
    /// An overlay without alpha: the foreground replaces the
    /// background.
    pub fn new() -> Self {
        Self { alpha: None }
    }

    /// An overlay reading coverage from the foreground's channel
    /// `channel`.
    pub fn with_alpha(channel: usize) -> Self {
        Self {
            alpha: Some(channel),
        }
    }

    /// Blend `foreground` over `background`.
    ///
    /// The pixels are walked channel by channel over the shorter of
    /// the two.
    pub fn blend<T: Sample>(
        &self,
        background: &PixelView<'_, T>,
        foreground: &PixelView<'_, T>,
    ) -> Color<T> {
        match self.alpha {
            None => foreground.to_vec(),
            Some(channel) => {
                let coverage = T::one() - foreground[channel];
                let samples: Vec<T> = foreground
                    .iter()
                    .zip(background.iter())
                    .map(|(&fg, &bg)| fg + bg * coverage)
                    .collect();
                let channels = samples.len();
                Color::from_parts(samples, [channels])
            }
        }
    }
}

/// Copy pixels from `b`, transformed by `tx`, into `a`.
///
/// Every pixel of `a` is mapped through the inverse of `tx` and, when
/// the image of that point lies within `b`, replaced by an
/// interpolated sample. Pixels mapping outside `b` are left untouched.
///
/// # Errors
/// Returns [`Error::SingularTransform`](crate::Error::SingularTransform)
/// if `tx` cannot be inverted.
pub fn merge<T, I>(a: &mut Image<T>, b: &Image<T>, tx: &Transform2d) -> Result<()>
where
    T: Sample,
    I: Interpolation<T>,
{
    let inverse = tx.inverse()?;
    let (bw, bh) = (b.width(), b.height());
    if bw == 0 || bh == 0 {
        return Ok(());
    }
    let channels = a.channels().min(b.channels());

    for x in 0..a.width() {
        for y in 0..a.height() {
            let (sx, sy) = inverse.apply(x as f32, y as f32);
            if sx < 0.0 || sy < 0.0 || sx > (bw - 1) as f32 || sy > (bh - 1) as f32 {
                continue;
            }
            let sample = I::interpolate(b, sx, sy);
            for c in 0..channels {
                a.set(x, y, c, sample[c]);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::rgb_channels;

    /// A checkerboard whose pixels alternate between white and black
    /// in storage order, starting white at (0, 0).
    fn make_checkerboard(width: usize, height: usize) -> Image<f32> {
        let mut img = Image::new_sized(width, height, rgb_channels());
        for (i, pixel) in img.data_mut().chunks_exact_mut(3).enumerate() {
            if i % 2 == 0 {
                pixel.fill(1.0);
            }
        }
        img
    }

    fn grey(v: f32) -> Color<f32> {
        Color::filled([3], v)
    }

    #[test]
    fn nearest_neighbor_truncates() {
        let img = make_checkerboard(2, 1);
        assert_eq!(NearestNeighbor::interpolate(&img, 0.9, 0.9), grey(1.0));
        assert_eq!(NearestNeighbor::interpolate(&img, 1.9, 0.9), grey(0.0));
        // Coordinates past either end sample black.
        assert_eq!(NearestNeighbor::interpolate(&img, 42.47, 47.42), grey(0.0));
        assert_eq!(
            NearestNeighbor::interpolate(&img, -42.47, -47.42),
            grey(0.0)
        );
    }

    #[test]
    fn nearest_neighbor_round_picks_closest() {
        let img = make_checkerboard(2, 1);
        assert_eq!(NearestNeighborRound::interpolate(&img, 0.42, 0.47), grey(1.0));
        assert_eq!(NearestNeighborRound::interpolate(&img, 1.3, 0.123), grey(0.0));
        assert_eq!(
            NearestNeighborRound::interpolate(&img, 42.47, 47.42),
            grey(0.0)
        );
        assert_eq!(
            NearestNeighborRound::interpolate(&img, -42.47, -47.42),
            grey(0.0)
        );
    }

    #[test]
    fn bilinear_blends_neighbors() {
        let img = make_checkerboard(3, 3);
        assert_eq!(Bilinear::interpolate(&img, 0.0, 0.0), grey(1.0));
        assert_eq!(Bilinear::interpolate(&img, 0.25, 0.0), grey(0.75));
        assert_eq!(Bilinear::interpolate(&img, 0.5, 0.5), grey(0.5));
        assert_eq!(Bilinear::interpolate(&img, 0.75, 0.0), grey(0.25));
        assert_eq!(Bilinear::interpolate(&img, 1.0, 0.0), grey(0.0));
        assert_eq!(Bilinear::interpolate(&img, 42.47, 47.42), grey(0.0));
        assert_eq!(Bilinear::interpolate(&img, -42.47, -47.42), grey(0.0));
    }

    #[test]
    fn overlay_without_alpha_replaces() {
        let fg = grey(0.47);
        let bg = grey(0.123);
        let blended = Overlay::new().blend(&bg.span(), &fg.span());
        assert_eq!(blended, grey(0.47));
    }

    #[test]
    fn overlay_with_alpha_composites() {
        let mut fg = Color::filled([4], 0.6f32);
        let mut bg = Color::filled([4], 0.1f32);
        // Fully opaque background sample in the alpha slot.
        bg[2] = 1.0;
        // Reddish foreground with 0.6 coverage at index 2.
        fg[1] = 0.2;
        fg[3] = 0.3;

        let blended = Overlay::with_alpha(2).blend(&bg.span(), &fg.span());
        assert!((blended[0] - 0.64).abs() < 1e-6);
        assert!((blended[1] - 0.24).abs() < 1e-6);
        assert!((blended[2] - 1.0).abs() < 1e-6);
        assert!((blended[3] - 0.34).abs() < 1e-6);
    }
}
