//! Noise injection.
//!
//! Every function takes a caller-supplied generator instead of seeding
//! its own, so results are reproducible under a seeded `Rng` and the
//! crate holds no hidden random state.
//!
//! None of these algorithms checks for overflow. That matters mostly
//! for integer sample types; floating-point samples simply leave their
//! nominal intensity range.

use crate::image::{Image, Sample};
use crate::{Error, Result};
use rand::distributions::uniform::SampleUniform;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;

/// Flip pixels to full white or full black with probability `density`.
///
/// An affected pixel is set to [`Sample::RANGE`]'s `max` or `min`
/// across all channels, with a fair coin deciding which.
pub fn salt_and_pepper<T, R>(source: &mut Image<T>, density: f32, rng: &mut R)
where
    T: Sample,
    R: Rng + ?Sized,
{
    for x in 0..source.width() {
        for y in 0..source.height() {
            if rng.gen::<f32>() < density {
                let value = if rng.gen::<bool>() {
                    T::RANGE.max
                } else {
                    T::RANGE.min
                };
                source.pixel_mut(x, y).fill(value);
            }
        }
    }
}

/// Add uniform noise drawn from `[min, max]` to every sample.
///
/// # Errors
/// Returns [`Error::NoiseParameter`] if `min > max`.
pub fn uniform_noise<T, R>(source: &mut Image<T>, min: T, max: T, rng: &mut R) -> Result<()>
where
    T: Sample + SampleUniform,
    R: Rng + ?Sized,
{
    if min > max {
        return Err(Error::NoiseParameter(
            "uniform bounds are inverted".to_string(),
        ));
    }
    let dist = Uniform::new_inclusive(min, max);
    for elem in source.data_mut() {
        *elem += dist.sample(rng);
    }
    Ok(())
}

/// Add gaussian noise to every sample.
///
/// The noise is drawn in `f64` and combined through the sample type's
/// lossy casts, so integer images receive rounded-toward-zero offsets.
///
/// # Errors
/// Returns [`Error::NoiseParameter`] for a non-finite or negative
/// `sigma`.
pub fn gaussian_noise<T, R>(source: &mut Image<T>, mean: f64, sigma: f64, rng: &mut R) -> Result<()>
where
    T: Sample,
    R: Rng + ?Sized,
{
    let normal = Normal::new(mean, sigma).map_err(|e| Error::NoiseParameter(e.to_string()))?;
    for elem in source.data_mut() {
        *elem = T::from_f64(elem.to_f64() + normal.sample(rng));
    }
    Ok(())
}
