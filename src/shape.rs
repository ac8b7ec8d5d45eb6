//! Shape and offset arithmetic for contiguous N-dimensional buffers.
//!
//! The layout is fixed: the first dimension varies slowest, the last
//! dimension is contiguous. All functions here are pure; bounds policy
//! lives with the callers (`NdSpan::at` checks, `NdSpan::get` does not).

use crate::{Error, Result};

/// Total number of elements described by `shape`.
#[inline]
pub fn size(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Distance in elements between successive indices of dimension `dim`.
///
/// Equals the product of all extents after `dim`; the last dimension
/// always has stride 1.
#[inline]
pub fn stride(shape: &[usize], dim: usize) -> usize {
    shape[dim + 1..].iter().product()
}

/// Flat offset of a (possibly partial) coordinate tuple.
///
/// `coords` addresses the leading `coords.len()` dimensions; the
/// remaining dimensions are taken at index zero, so a partial tuple
/// yields the offset of a lower-rank sub-array.
#[inline]
pub fn flat_offset(shape: &[usize], coords: &[usize]) -> usize {
    debug_assert!(coords.len() <= shape.len());
    let mut off = 0;
    for (dim, &c) in coords.iter().enumerate() {
        off += c * stride(shape, dim);
    }
    off
}

/// Validate a coordinate tuple against `shape`, leading dimension first.
///
/// Returns [`Error::OutOfBounds`] naming the first violating dimension
/// together with the full attempted tuple.
pub fn check_coords(shape: &[usize], coords: &[usize]) -> Result<()> {
    for (dim, &c) in coords.iter().enumerate() {
        if c >= shape[dim] {
            return Err(Error::OutOfBounds {
                dim,
                index: coords.to_vec(),
                shape: shape.to_vec(),
            });
        }
    }
    Ok(())
}
