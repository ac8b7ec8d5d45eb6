//! Borrowed views over contiguous N-dimensional data.
//!
//! `NdSpan` and `NdSpanMut` are the non-owning counterparts of
//! [`NdVec`](crate::NdVec): a slice borrow plus a compile-time-ranked
//! shape. A view never allocates and never frees; aliasing rules are
//! enforced by the borrow checker, not by convention.
//!
//! Key features:
//! - Const-generic rank for type safety
//! - Rank-reducing indexing (`outer` and friends) down to rank 1
//! - Element access in unchecked (`get`) and checked (`at`) flavors
//! - Intersection-shaped bulk assignment (`assign`)

use crate::shape::{check_coords, flat_offset, size};
use crate::vector::NdVec;
use crate::{Error, Result};
use std::ops::{Index, IndexMut};

/// An immutable view over a contiguous N-dimensional buffer.
///
/// The first dimension varies slowest; the last is contiguous. The
/// backing slice holds exactly `shape.iter().product()` elements.
///
/// # Example
/// ```
/// use ndpix::NdSpan;
///
/// let data: Vec<i32> = (0..20).collect();
/// let view: NdSpan<'_, i32, 3> = NdSpan::new(&data, [2, 2, 5]).unwrap();
/// assert_eq!(*view.get([1, 0, 3]), 13);
/// assert_eq!(view.outer(1).outer(0), [10, 11, 12, 13, 14]);
/// ```
#[derive(Debug)]
pub struct NdSpan<'a, T, const N: usize> {
    data: &'a [T],
    shape: [usize; N],
}

// A shared view is a borrow and copies freely whatever T is.
impl<T, const N: usize> Clone for NdSpan<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for NdSpan<'_, T, N> {}

/// A mutable view over a contiguous N-dimensional buffer.
///
/// Same layout contract as [`NdSpan`], plus mutation.
#[derive(Debug)]
pub struct NdSpanMut<'a, T, const N: usize> {
    data: &'a mut [T],
    shape: [usize; N],
}

impl<'a, T, const N: usize> NdSpan<'a, T, N> {
    /// Create a view over `data` with the given shape.
    ///
    /// # Errors
    /// Returns [`Error::BufferSize`] if the slice length does not equal
    /// the shape's element count.
    pub fn new(data: &'a [T], shape: [usize; N]) -> Result<Self> {
        let needed = size(&shape);
        if data.len() != needed {
            return Err(Error::BufferSize {
                needed,
                got: data.len(),
                shape: shape.to_vec(),
            });
        }
        Ok(Self { data, shape })
    }

    /// Create a view without checking the buffer length.
    ///
    /// The caller must guarantee `data.len() == shape.iter().product()`;
    /// a shorter buffer turns in-shape accesses into slice panics.
    pub fn new_unchecked(data: &'a [T], shape: [usize; N]) -> Self {
        debug_assert_eq!(data.len(), size(&shape));
        Self { data, shape }
    }

    /// Returns the number of dimensions.
    #[inline]
    pub fn rank(&self) -> usize {
        N
    }

    /// Returns the extent of each dimension.
    #[inline]
    pub fn shape(&self) -> &[usize; N] {
        &self.shape
    }

    /// Returns the extent of dimension `dim`.
    #[inline]
    pub fn dim(&self, dim: usize) -> usize {
        self.shape[dim]
    }

    /// Returns the total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if any dimension has extent zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the backing slice in layout order.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Iterate over elements in layout order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.data.iter()
    }

    /// Reference the element at a full coordinate tuple.
    ///
    /// Coordinates are not validated per dimension; an out-of-shape
    /// tuple either aliases another element of the same buffer or
    /// panics at the slice boundary. Use [`at`](Self::at) for checked
    /// access.
    #[inline]
    pub fn get(&self, coords: [usize; N]) -> &'a T {
        &self.data[flat_offset(&self.shape, &coords)]
    }

    /// Reference the element at a full coordinate tuple, checked.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] naming the first violating
    /// dimension and the full attempted tuple.
    pub fn at(&self, coords: [usize; N]) -> Result<&'a T> {
        check_coords(&self.shape, &coords)?;
        Ok(self.get(coords))
    }

    /// Copy the viewed elements into an owning [`NdVec`].
    pub fn to_vec(&self) -> NdVec<T, N>
    where
        T: Clone,
    {
        NdVec::from_parts(self.data.to_vec(), self.shape)
    }
}

impl<'a, T, const N: usize> NdSpanMut<'a, T, N> {
    /// Create a mutable view over `data` with the given shape.
    ///
    /// # Errors
    /// Returns [`Error::BufferSize`] if the slice length does not equal
    /// the shape's element count.
    pub fn new(data: &'a mut [T], shape: [usize; N]) -> Result<Self> {
        let needed = size(&shape);
        if data.len() != needed {
            return Err(Error::BufferSize {
                needed,
                got: data.len(),
                shape: shape.to_vec(),
            });
        }
        Ok(Self { data, shape })
    }

    /// Create a mutable view without checking the buffer length.
    pub fn new_unchecked(data: &'a mut [T], shape: [usize; N]) -> Self {
        debug_assert_eq!(data.len(), size(&shape));
        Self { data, shape }
    }

    /// Reborrow as an immutable view.
    #[inline]
    pub fn as_span(&self) -> NdSpan<'_, T, N> {
        NdSpan {
            data: self.data,
            shape: self.shape,
        }
    }

    /// Returns the number of dimensions.
    #[inline]
    pub fn rank(&self) -> usize {
        N
    }

    /// Returns the extent of each dimension.
    #[inline]
    pub fn shape(&self) -> &[usize; N] {
        &self.shape
    }

    /// Returns the extent of dimension `dim`.
    #[inline]
    pub fn dim(&self, dim: usize) -> usize {
        self.shape[dim]
    }

    /// Returns the total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if any dimension has extent zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the backing slice in layout order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.data
    }

    /// Returns the backing slice mutably, in layout order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data
    }

    /// Reference the element at a full coordinate tuple (unchecked per
    /// dimension, see [`NdSpan::get`]).
    #[inline]
    pub fn get(&self, coords: [usize; N]) -> &T {
        &self.data[flat_offset(&self.shape, &coords)]
    }

    /// Mutably reference the element at a full coordinate tuple.
    #[inline]
    pub fn get_mut(&mut self, coords: [usize; N]) -> &mut T {
        &mut self.data[flat_offset(&self.shape, &coords)]
    }

    /// Checked shared access, see [`NdSpan::at`].
    pub fn at(&self, coords: [usize; N]) -> Result<&T> {
        check_coords(&self.shape, &coords)?;
        Ok(self.get(coords))
    }

    /// Checked mutable access.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] naming the first violating
    /// dimension and the full attempted tuple.
    pub fn at_mut(&mut self, coords: [usize; N]) -> Result<&mut T> {
        check_coords(&self.shape, &coords)?;
        Ok(self.get_mut(coords))
    }

    /// Set every element to `value`. The shape is unchanged.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    /// Copy from `src` over the intersection of the two shapes.
    ///
    /// Each dimension is walked up to the smaller of the two extents;
    /// elements of `self` outside the intersection keep their values.
    /// Neither shape changes.
    pub fn assign(&mut self, src: &NdSpan<'_, T, N>)
    where
        T: Copy,
    {
        zip_intersection(self.data, &self.shape, src.data, &src.shape, &mut |d, s| {
            *d = s;
        });
    }

    /// Copy the viewed elements into an owning [`NdVec`].
    pub fn to_vec(&self) -> NdVec<T, N>
    where
        T: Clone,
    {
        NdVec::from_parts(self.data.to_vec(), self.shape)
    }
}

/// Walk `dst` and `src` in lockstep over the intersection of their
/// shapes (per-dimension minimum), applying `f` to each element pair.
///
/// Both shape slices must have equal rank and describe their buffers
/// exactly.
pub(crate) fn zip_intersection<T: Copy>(
    dst: &mut [T],
    dst_shape: &[usize],
    src: &[T],
    src_shape: &[usize],
    f: &mut impl FnMut(&mut T, T),
) {
    debug_assert_eq!(dst_shape.len(), src_shape.len());
    if dst_shape.is_empty() {
        f(&mut dst[0], src[0]);
        return;
    }
    let n = dst_shape[0].min(src_shape[0]);
    if dst_shape.len() == 1 {
        for i in 0..n {
            f(&mut dst[i], src[i]);
        }
        return;
    }
    let dst_stride = size(&dst_shape[1..]);
    let src_stride = size(&src_shape[1..]);
    for i in 0..n {
        zip_intersection(
            &mut dst[i * dst_stride..(i + 1) * dst_stride],
            &dst_shape[1..],
            &src[i * src_stride..(i + 1) * src_stride],
            &src_shape[1..],
            f,
        );
    }
}

// ============================================================================
// Rank-reducing indexing
// ============================================================================

/// Build the tail shape left after fixing the leading dimension.
#[inline]
fn tail_shape<const N: usize, const M: usize>(shape: &[usize; N]) -> [usize; M] {
    debug_assert_eq!(M + 1, N);
    let mut tail = [0usize; M];
    tail.copy_from_slice(&shape[1..]);
    tail
}

macro_rules! impl_outer {
    ($n:literal => $m:literal) => {
        impl<'a, T> NdSpan<'a, T, $n> {
            /// View the sub-array at `index` along the first dimension.
            ///
            /// Partial coordinate tuples are expressed by chaining:
            /// `v.outer(x).outer(y)` addresses dimensions 0 and 1.
            /// The index is not validated against the extent; past-the-end
            /// indices panic at the slice boundary.
            #[inline]
            pub fn outer(&self, index: usize) -> NdSpan<'a, T, $m> {
                let tail = tail_shape(&self.shape);
                let stride = size(&tail);
                NdSpan {
                    data: &self.data[index * stride..(index + 1) * stride],
                    shape: tail,
                }
            }

            /// Checked variant of [`outer`](Self::outer).
            ///
            /// # Errors
            /// Returns [`Error::OutOfBounds`] if `index` is past the
            /// first dimension's extent.
            pub fn outer_at(&self, index: usize) -> Result<NdSpan<'a, T, $m>> {
                if index >= self.shape[0] {
                    return Err(Error::OutOfBounds {
                        dim: 0,
                        index: vec![index],
                        shape: self.shape.to_vec(),
                    });
                }
                Ok(self.outer(index))
            }
        }

        impl<'a, T> NdSpanMut<'a, T, $n> {
            /// View the sub-array at `index` along the first dimension.
            #[inline]
            pub fn outer(&self, index: usize) -> NdSpan<'_, T, $m> {
                self.as_span().outer(index)
            }

            /// Mutably view the sub-array at `index` along the first
            /// dimension.
            #[inline]
            pub fn outer_mut(&mut self, index: usize) -> NdSpanMut<'_, T, $m> {
                let tail = tail_shape(&self.shape);
                let stride = size(&tail);
                NdSpanMut {
                    data: &mut self.data[index * stride..(index + 1) * stride],
                    shape: tail,
                }
            }

            /// Consume the view, yielding the sub-view at `index`
            /// with the original lifetime. Allows chained mutable
            /// rank reduction.
            #[inline]
            pub fn into_outer(self, index: usize) -> NdSpanMut<'a, T, $m> {
                let tail = tail_shape(&self.shape);
                let stride = size(&tail);
                let Self { data, .. } = self;
                NdSpanMut {
                    data: &mut data[index * stride..(index + 1) * stride],
                    shape: tail,
                }
            }

            /// Checked variant of [`outer`](Self::outer).
            pub fn outer_at(&self, index: usize) -> Result<NdSpan<'_, T, $m>> {
                self.as_span().outer_at(index)
            }

            /// Checked variant of [`outer_mut`](Self::outer_mut).
            pub fn outer_at_mut(&mut self, index: usize) -> Result<NdSpanMut<'_, T, $m>> {
                if index >= self.shape[0] {
                    return Err(Error::OutOfBounds {
                        dim: 0,
                        index: vec![index],
                        shape: self.shape.to_vec(),
                    });
                }
                Ok(self.outer_mut(index))
            }
        }
    };
}

impl_outer!(2 => 1);
impl_outer!(3 => 2);
impl_outer!(4 => 3);

// Rank-1 views subscript like slices.
impl<T> Index<usize> for NdSpan<'_, T, 1> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> Index<usize> for NdSpanMut<'_, T, 1> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for NdSpanMut<'_, T, 1> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}
