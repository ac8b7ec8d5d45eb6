//! Contiguous N-dimensional arrays with an image-processing layer.
//!
//! The crate has two levels. The lower level is a generic N-dimensional
//! array family over a single contiguous buffer: the owning [`NdVec`]
//! and the borrowed [`NdSpan`] / [`NdSpanMut`] views, with the rank as
//! a const generic. The upper level specializes rank 3 into [`Image`]
//! (width, then height, then channels) and provides the algorithms that
//! operate on it.
//!
//! # Core Types
//!
//! - [`NdVec`]: Owning contiguous N-dimensional array
//! - [`NdSpan`] / [`NdSpanMut`]: Borrowed views over the same layout
//! - [`Image`] / [`Sample`]: Rank-3 pixel data with named channels and
//!   a type-level intensity range
//!
//! # Algorithms
//!
//! - [`fast_gaussian`]: Gaussian blur approximated by iterated box blur
//! - [`magic_mist`]: Diffusion-filter bloom for floating-point images
//! - [`salt_and_pepper`], [`uniform_noise`], [`gaussian_noise`]: Noise
//!   injection with caller-supplied generators
//! - [`histogram`]: Per-channel intensity histograms
//! - [`Transform2d`] / [`matmul`]: Affine transforms over column-major
//!   matrices
//! - [`merge`] / [`Overlay`]: Transform-aware compositing with pluggable
//!   [`Interpolation`] strategies
//!
//! # Example
//!
//! ```
//! use ndpix::NdVec;
//!
//! // A rank-3 array holding the sequence 0..20.
//! let arr = NdVec::from_vec((0..20).collect(), [2, 2, 5]).unwrap();
//!
//! // Indexing with fewer coordinates than the rank yields a view of
//! // reduced rank; a full tuple yields an element.
//! assert_eq!(arr.outer(1).outer(0), [10, 11, 12, 13, 14]);
//! assert_eq!(*arr.get([1, 0, 3]), 13);
//!
//! // Checked access reports the violating dimension instead of
//! // panicking.
//! assert!(arr.at([1, 2, 0]).is_err());
//! ```
//!
//! # Layout
//!
//! All arrays share one layout: the first dimension varies slowest and
//! the last is contiguous, so the flat offset of a coordinate tuple is
//! the sum of each coordinate times the product of the extents after
//! it. For an [`Image`], shape `[width, height, channels]` puts the
//! samples of one pixel next to each other and whole columns in
//! contiguous runs, which the blur and compositing passes rely on.

mod blur;
mod composite;
mod effect;
mod image;
mod noise;
mod ops;
mod shape;
mod span;
mod statistics;
mod transform;
mod vector;

// ============================================================================
// Array types
// ============================================================================
pub use span::{NdSpan, NdSpanMut};
pub use vector::NdVec;

// ============================================================================
// Image types
// ============================================================================
pub use image::{
    rgb_channels, rgba_channels, transpose, ChannelList, Color, ColumnView, ColumnViewMut, Image,
    PixelView, PixelViewMut, Sample, ValueRange,
};

// ============================================================================
// Algorithms
// ============================================================================
pub use blur::{box_sizes, fast_gaussian};
pub use composite::{merge, Bilinear, Interpolation, NearestNeighbor, NearestNeighborRound, Overlay};
pub use effect::magic_mist;
pub use noise::{gaussian_noise, salt_and_pepper, uniform_noise};
pub use statistics::histogram;
pub use transform::{matmul, Transform2d};

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during array and image operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A coordinate tuple failed a checked bounds test. `dim` names the
    /// first violating dimension; `index` is the full attempted tuple.
    #[error("coordinate {index:?} out of bounds in dim {dim} for shape {shape:?}")]
    OutOfBounds {
        dim: usize,
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// A buffer's length does not match the element count of a shape.
    #[error("buffer of {got} elements cannot back shape {shape:?} ({needed} needed)")]
    BufferSize {
        needed: usize,
        got: usize,
        shape: Vec<usize>,
    },

    /// Operand shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// A noise distribution was given an invalid parameter.
    #[error("invalid noise parameter: {0}")]
    NoiseParameter(String),

    /// The transform matrix has no inverse.
    #[error("transform matrix is singular")]
    SingularTransform,
}

/// Result type for array and image operations.
pub type Result<T> = std::result::Result<T, Error>;
