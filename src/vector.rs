//! Owning contiguous N-dimensional arrays.

use crate::shape::{check_coords, flat_offset, size};
use crate::span::{NdSpan, NdSpanMut};
use crate::{Error, Result};
use std::ops::{Index, IndexMut};

/// An owning contiguous N-dimensional array.
///
/// The buffer is a single `Vec<T>` in the same layout as
/// [`NdSpan`](crate::NdSpan): first dimension slowest, last contiguous.
/// `Clone` deep-copies; drop frees the buffer exactly once. Views over
/// an `NdVec` borrow it and can never outlive it.
///
/// # Example
/// ```
/// use ndpix::NdVec;
///
/// let arr = NdVec::from_vec((0..20).collect(), [2, 2, 5]).unwrap();
/// assert_eq!(arr.len(), 20);
/// assert_eq!(arr.outer(1).outer(0), [10, 11, 12, 13, 14]);
/// assert_eq!(*arr.get([1, 0, 3]), 13);
/// ```
#[derive(Debug, Clone)]
pub struct NdVec<T, const N: usize> {
    data: Vec<T>,
    shape: [usize; N],
}

impl<T, const N: usize> NdVec<T, N> {
    /// Allocate an array of the given shape, default-filled.
    pub fn new(shape: [usize; N]) -> Self
    where
        T: Default + Clone,
    {
        Self {
            data: vec![T::default(); size(&shape)],
            shape,
        }
    }

    /// Allocate an array of the given shape with every element `value`.
    pub fn filled(shape: [usize; N], value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: vec![value; size(&shape)],
            shape,
        }
    }

    /// Take ownership of a pre-populated buffer.
    ///
    /// # Errors
    /// Returns [`Error::BufferSize`] if the vector length does not
    /// equal the shape's element count.
    pub fn from_vec(data: Vec<T>, shape: [usize; N]) -> Result<Self> {
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

    /// Internal constructor for already-validated parts.
    pub(crate) fn from_parts(data: Vec<T>, shape: [usize; N]) -> Self {
        debug_assert_eq!(data.len(), size(&shape));
        Self { data, shape }
    }

    /// Borrow as an immutable view.
    #[inline]
    pub fn span(&self) -> NdSpan<'_, T, N> {
        NdSpan::new_unchecked(&self.data, self.shape)
    }

    /// Borrow as a mutable view.
    #[inline]
    pub fn span_mut(&mut self) -> NdSpanMut<'_, T, N> {
        NdSpanMut::new_unchecked(&mut self.data, self.shape)
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

    /// Returns true if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the buffer in layout order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the buffer mutably, in layout order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the array, yielding the flat buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over elements in layout order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterate mutably over elements in layout order.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
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

    /// Checked access, see [`NdSpan::at`].
    pub fn at(&self, coords: [usize; N]) -> Result<&T> {
        check_coords(&self.shape, &coords)?;
        Ok(self.get(coords))
    }

    /// Checked mutable access.
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

    /// Copy element-wise from `src` over the intersection of shapes.
    ///
    /// The view-assignment contract: neither buffer is resized, and
    /// elements outside the intersection keep their values. To adopt a
    /// source's shape wholesale use [`copy_from`](Self::copy_from).
    pub fn assign(&mut self, src: &NdSpan<'_, T, N>)
    where
        T: Copy,
    {
        self.span_mut().assign(src);
    }

    /// Replace contents and shape with a full copy of `src`.
    ///
    /// The owner-assignment contract: the array resizes to the source
    /// shape, reusing its allocation where possible.
    pub fn copy_from(&mut self, src: &NdSpan<'_, T, N>)
    where
        T: Clone,
    {
        self.data.clear();
        self.data.extend_from_slice(src.as_slice());
        self.shape = *src.shape();
    }

    /// Move the contents out, leaving an empty array behind.
    ///
    /// The source keeps its binding but reports a zero shape and holds
    /// no elements afterwards.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

/// The empty array: zero extents, no buffer.
impl<T, const N: usize> Default for NdVec<T, N> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            shape: [0; N],
        }
    }
}

macro_rules! impl_outer_vec {
    ($n:literal => $m:literal) => {
        impl<T> NdVec<T, $n> {
            /// View the sub-array at `index` along the first dimension.
            ///
            /// See [`NdSpan::outer`].
            #[inline]
            pub fn outer(&self, index: usize) -> NdSpan<'_, T, $m> {
                self.span().outer(index)
            }

            /// Mutably view the sub-array at `index` along the first
            /// dimension.
            #[inline]
            pub fn outer_mut(&mut self, index: usize) -> NdSpanMut<'_, T, $m> {
                let mut tail = [0usize; $m];
                tail.copy_from_slice(&self.shape[1..]);
                let stride: usize = tail.iter().product();
                NdSpanMut::new_unchecked(
                    &mut self.data[index * stride..(index + 1) * stride],
                    tail,
                )
            }

            /// Checked variant of [`outer`](Self::outer).
            pub fn outer_at(&self, index: usize) -> Result<NdSpan<'_, T, $m>> {
                self.span().outer_at(index)
            }
        }
    };
}

impl_outer_vec!(2 => 1);
impl_outer_vec!(3 => 2);
impl_outer_vec!(4 => 3);

// Rank-1 arrays subscript like slices.
impl<T> Index<usize> for NdVec<T, 1> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for NdVec<T, 1> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_size_invariant() {
        let arr: NdVec<f32, 3> = NdVec::new([4, 5, 3]);
        assert_eq!(arr.shape(), &[4, 5, 3]);
        assert_eq!(arr.len(), 60);
        assert!(arr.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(NdVec::from_vec(vec![0u8; 12], [3, 4]).is_ok());
        assert!(NdVec::from_vec(vec![0u8; 11], [3, 4]).is_err());
    }

    #[test]
    fn clone_is_deep() {
        let mut a = NdVec::from_vec((0..6).collect::<Vec<i32>>(), [2, 3]).unwrap();
        let b = a.clone();
        *a.get_mut([0, 0]) = 99;
        assert_eq!(*b.get([0, 0]), 0);
        assert_eq!(b.as_slice(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut a = NdVec::filled([2, 2], 1u8);
        let b = a.take();
        assert_eq!(b.shape(), &[2, 2]);
        assert_eq!(b.len(), 4);
        assert_eq!(a.shape(), &[0, 0]);
        assert!(a.is_empty());
    }

    #[test]
    fn copy_from_adopts_shape() {
        let mut a = NdVec::filled([1, 1], 0i32);
        let b = NdVec::from_vec((0..6).collect(), [2, 3]).unwrap();
        a.copy_from(&b.span());
        assert_eq!(a.shape(), &[2, 3]);
        assert_eq!(a.as_slice(), b.as_slice());
    }
}
