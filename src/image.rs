//! Pixel data as a rank-3 array with named channels.
//!
//! An [`Image`] wraps an `NdVec<T, 3>` shaped `[width, height,
//! channels]`. The channel dimension is contiguous, so one pixel's
//! samples sit next to each other and one column of pixels is a single
//! contiguous run, which the per-column passes in the blur and
//! compositing code exploit.

use crate::span::{NdSpan, NdSpanMut};
use crate::vector::NdVec;
use crate::Result;
use num_traits::NumAssign;

/// Semantic names of an image's channels, in storage order.
pub type ChannelList = Vec<String>;

/// An owning pixel value: one sample per channel.
pub type Color<T> = NdVec<T, 1>;

/// A borrowed pixel: rank-1 view over one pixel's samples.
pub type PixelView<'a, T> = NdSpan<'a, T, 1>;

/// A mutable borrowed pixel.
pub type PixelViewMut<'a, T> = NdSpanMut<'a, T, 1>;

/// A borrowed image column: rank-2 view shaped `[height, channels]`.
pub type ColumnView<'a, T> = NdSpan<'a, T, 2>;

/// A mutable borrowed image column.
pub type ColumnViewMut<'a, T> = NdSpanMut<'a, T, 2>;

/// An inclusive value interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

/// Element types usable as image samples.
///
/// A sample type carries its nominal intensity interval as an
/// associated constant: `[0, 1]` for floating-point samples, the full
/// numeric range for integer samples. Values outside the interval are
/// representable (out-of-gamut data is not clamped anywhere); the
/// interval defines what black and white mean for noise, histograms
/// and compositing.
pub trait Sample: Copy + PartialOrd + NumAssign + Default {
    /// The nominal black-to-white interval of this sample type.
    const RANGE: ValueRange<Self>;

    /// Lossy widening to `f64` for accumulator arithmetic.
    fn to_f64(self) -> f64;

    /// Lossy narrowing from `f64`, saturating like `as` casts do.
    fn from_f64(v: f64) -> Self;
}

macro_rules! float_sample {
    ($($t:ty),*) => {$(
        impl Sample for $t {
            const RANGE: ValueRange<Self> = ValueRange { min: 0.0, max: 1.0 };

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as Self
            }
        }
    )*};
}

macro_rules! int_sample {
    ($($t:ty),*) => {$(
        impl Sample for $t {
            const RANGE: ValueRange<Self> = ValueRange {
                min: <$t>::MIN,
                max: <$t>::MAX,
            };

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as Self
            }
        }
    )*};
}

float_sample!(f32, f64);
int_sample!(u8, u16, u32);

/// The conventional three-channel list.
pub fn rgb_channels() -> ChannelList {
    ["R", "G", "B"].map(String::from).to_vec()
}

/// The conventional four-channel list with straight alpha last.
pub fn rgba_channels() -> ChannelList {
    ["R", "G", "B", "A"].map(String::from).to_vec()
}

/// A two-dimensional image with a fixed set of named channels.
///
/// The channel list's length always equals the third extent of the
/// backing array; constructors derive the extent from the list, so the
/// invariant holds by construction. Equality covers the pixel data and
/// the channel semantics.
#[derive(Debug, Clone)]
pub struct Image<T: Sample> {
    data: NdVec<T, 3>,
    channels: ChannelList,
}

impl<T: Sample> Image<T> {
    /// The nominal black-to-white interval of this image's samples.
    pub const INTENSITY_RANGE: ValueRange<T> = T::RANGE;

    /// An empty image: zero extents, no channels.
    pub fn new() -> Self {
        Self {
            data: NdVec::default(),
            channels: ChannelList::new(),
        }
    }

    /// Allocate a zero-filled image.
    pub fn new_sized(width: usize, height: usize, channels: ChannelList) -> Self {
        let data = NdVec::new([width, height, channels.len()]);
        Self { data, channels }
    }

    /// Allocate an image with every sample set to `value`.
    pub fn filled(width: usize, height: usize, channels: ChannelList, value: T) -> Self {
        let data = NdVec::filled([width, height, channels.len()], value);
        Self { data, channels }
    }

    /// Take ownership of a pre-populated sample buffer.
    ///
    /// The buffer is in layout order: x slowest, then y, channels
    /// contiguous.
    ///
    /// # Errors
    /// Returns [`Error::BufferSize`](crate::Error::BufferSize) if the
    /// buffer length does not equal `width * height * channels.len()`.
    pub fn from_vec(
        data: Vec<T>,
        width: usize,
        height: usize,
        channels: ChannelList,
    ) -> Result<Self> {
        let data = NdVec::from_vec(data, [width, height, channels.len()])?;
        Ok(Self { data, channels })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.data.dim(0)
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.data.dim(1)
    }

    /// Number of channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels.len()
    }

    /// Semantic names of the channels, in storage order.
    #[inline]
    pub fn channel_semantics(&self) -> &ChannelList {
        &self.channels
    }

    /// The samples in layout order.
    #[inline]
    pub fn data(&self) -> &[T] {
        self.data.as_slice()
    }

    /// The samples in layout order, mutable.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    /// Borrow the backing rank-3 array.
    #[inline]
    pub fn as_nd(&self) -> &NdVec<T, 3> {
        &self.data
    }

    /// View the pixel at `(x, y)`.
    ///
    /// Coordinates are not validated; see [`pixel_at`](Self::pixel_at)
    /// for checked access.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> PixelView<'_, T> {
        self.data.span().outer(x).outer(y)
    }

    /// Mutably view the pixel at `(x, y)`.
    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> PixelViewMut<'_, T> {
        self.data.outer_mut(x).into_outer(y)
    }

    /// View the pixel at `(x, y)`, checked.
    pub fn pixel_at(&self, x: usize, y: usize) -> Result<PixelView<'_, T>> {
        Ok(self.data.span().outer_at(x)?.outer_at(y)?)
    }

    /// View column `x` as a `[height, channels]` array.
    #[inline]
    pub fn column(&self, x: usize) -> ColumnView<'_, T> {
        self.data.outer(x)
    }

    /// Mutably view column `x`.
    #[inline]
    pub fn column_mut(&mut self, x: usize) -> ColumnViewMut<'_, T> {
        self.data.outer_mut(x)
    }

    /// The sample at `(x, y, channel)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, channel: usize) -> T {
        *self.data.get([x, y, channel])
    }

    /// Set the sample at `(x, y, channel)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, channel: usize, value: T) {
        *self.data.get_mut([x, y, channel]) = value;
    }

    /// The sample at `(x, y, channel)`, checked.
    pub fn at(&self, x: usize, y: usize, channel: usize) -> Result<T> {
        Ok(*self.data.at([x, y, channel])?)
    }

    /// Copy the pixel at `(x, y)` into an owning [`Color`].
    pub fn color_at(&self, x: usize, y: usize) -> Color<T> {
        self.pixel(x, y).to_vec()
    }
}

impl<T: Sample> Default for Image<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> PartialEq for Image<T> {
    fn eq(&self, other: &Self) -> bool {
        self.channels == other.channels && self.data == other.data
    }
}

/// Mirror an image along its diagonal, swapping width and height.
///
/// `out(y, x) = in(x, y)` for every channel. Always copies.
pub fn transpose<T: Sample>(img: &Image<T>) -> Image<T> {
    let (w, h, c) = (img.width(), img.height(), img.channels());
    let mut out = Image::new_sized(h, w, img.channel_semantics().clone());
    for x in 0..w {
        for y in 0..h {
            for ch in 0..c {
                out.set(y, x, ch, img.get(x, y, ch));
            }
        }
    }
    out
}
