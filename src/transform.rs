//! Column-major matrices and 2D affine transforms.
//!
//! A matrix is a rank-2 array shaped `[columns, rows]`, so a column is
//! a contiguous run and element `(row, col)` sits at flat offset
//! `col * rows + row`.

use crate::span::NdSpan;
use crate::vector::NdVec;
use crate::{Error, Result};
use num_traits::NumAssign;

/// Multiply two column-major matrices.
///
/// `a` is `[common, a_rows]`, `b` is `[b_columns, common]`; the result
/// is `[b_columns, a_rows]`.
///
/// # Errors
/// Returns [`Error::ShapeMismatch`] if `a`'s column count differs from
/// `b`'s row count.
pub fn matmul<T: Copy + NumAssign>(
    a: &NdSpan<'_, T, 2>,
    b: &NdSpan<'_, T, 2>,
) -> Result<NdVec<T, 2>> {
    let common = a.dim(0);
    let a_rows = a.dim(1);
    let b_columns = b.dim(0);
    if b.dim(1) != common {
        return Err(Error::ShapeMismatch(
            a.shape().to_vec(),
            b.shape().to_vec(),
        ));
    }

    let mut c = NdVec::filled([b_columns, a_rows], T::zero());
    for x in 0..b_columns {
        for y in 0..a_rows {
            let mut sum = T::zero();
            for idx in 0..common {
                sum += *a.get([idx, y]) * *b.get([x, idx]);
            }
            *c.get_mut([x, y]) = sum;
        }
    }
    Ok(c)
}

/// Fixed-size product of two 3x3 column-major matrices.
fn mul3(a: &[f32], b: &[f32; 9]) -> Vec<f32> {
    let mut c = vec![0.0f32; 9];
    for x in 0..3 {
        for y in 0..3 {
            for idx in 0..3 {
                c[x * 3 + y] += a[idx * 3 + y] * b[x * 3 + idx];
            }
        }
    }
    c
}

/// A 2D transformation as a 3x3 column-major matrix.
///
/// Builder methods append their operation on the right, so the order
/// of calls is the order of operations:
///
/// ```
/// use ndpix::Transform2d;
///
/// let tx = Transform2d::new().translate(2.0, 5.0).rotate(42.0).scale(2.0, 1.0);
/// assert_eq!(tx.translation(), (2.0, 5.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Transform2d {
    m: NdVec<f32, 2>,
}

impl Transform2d {
    /// The identity transform.
    pub fn new() -> Self {
        let mut m = NdVec::filled([3, 3], 0.0);
        *m.get_mut([0, 0]) = 1.0;
        *m.get_mut([1, 1]) = 1.0;
        *m.get_mut([2, 2]) = 1.0;
        Self { m }
    }

    /// Wrap an existing 3x3 column-major matrix.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] unless the matrix is 3x3.
    pub fn from_matrix(m: NdVec<f32, 2>) -> Result<Self> {
        if m.shape() != &[3, 3] {
            return Err(Error::ShapeMismatch(m.shape().to_vec(), vec![3, 3]));
        }
        Ok(Self { m })
    }

    /// The underlying matrix.
    #[inline]
    pub fn matrix(&self) -> &NdVec<f32, 2> {
        &self.m
    }

    fn append(mut self, rhs: [f32; 9]) -> Self {
        let data = mul3(self.m.as_slice(), &rhs);
        self.m = NdVec::from_parts(data, [3, 3]);
        self
    }

    /// Append a translation by the given vector.
    pub fn translate(self, x: f32, y: f32) -> Self {
        #[rustfmt::skip]
        let t = [
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            x,   y,   1.0,
        ];
        self.append(t)
    }

    /// Append a rotation by the given angle in degrees.
    pub fn rotate(self, angle: f32) -> Self {
        self.rotate_radians(angle.to_radians())
    }

    /// Append a rotation by the given angle in radians.
    pub fn rotate_radians(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        #[rustfmt::skip]
        let r = [
            cos, -sin, 0.0,
            sin,  cos, 0.0,
            0.0,  0.0, 1.0,
        ];
        self.append(r)
    }

    /// Append a scale by the given factors.
    pub fn scale(self, x: f32, y: f32) -> Self {
        #[rustfmt::skip]
        let s = [
            x,   0.0, 0.0,
            0.0, y,   0.0,
            0.0, 0.0, 1.0,
        ];
        self.append(s)
    }

    /// The currently set translation, as x and y components.
    pub fn translation(&self) -> (f32, f32) {
        (*self.m.get([2, 0]), *self.m.get([2, 1]))
    }

    /// The currently set rotation angle in degrees.
    pub fn rotation(&self) -> f32 {
        -f32::atan2(*self.m.get([0, 1]), *self.m.get([0, 0])).to_degrees()
    }

    /// The currently set scale, as x and y factors.
    pub fn scaling(&self) -> (f32, f32) {
        let m = &self.m;
        (
            f32::hypot(*m.get([0, 0]), *m.get([0, 1])),
            f32::hypot(*m.get([1, 0]), *m.get([1, 1])),
        )
    }

    /// Transform the point `(x, y)`.
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.m;
        (
            m.get([0, 0]) * x + m.get([1, 0]) * y + m.get([2, 0]),
            m.get([0, 1]) * x + m.get([1, 1]) * y + m.get([2, 1]),
        )
    }

    /// The inverse transform.
    ///
    /// # Errors
    /// Returns [`Error::SingularTransform`] if the matrix has no
    /// inverse.
    pub fn inverse(&self) -> Result<Self> {
        let m = self.m.as_slice();
        // Columns of the 3x3: (m0 m1 m2), (m3 m4 m5), (m6 m7 m8).
        let det = m[0] * (m[4] * m[8] - m[7] * m[5])
            - m[3] * (m[1] * m[8] - m[7] * m[2])
            + m[6] * (m[1] * m[5] - m[4] * m[2]);
        if det == 0.0 || !det.is_finite() {
            return Err(Error::SingularTransform);
        }

        // Adjugate over determinant, still column-major.
        let inv = vec![
            (m[4] * m[8] - m[7] * m[5]) / det,
            (m[7] * m[2] - m[1] * m[8]) / det,
            (m[1] * m[5] - m[4] * m[2]) / det,
            (m[6] * m[5] - m[3] * m[8]) / det,
            (m[0] * m[8] - m[6] * m[2]) / det,
            (m[3] * m[2] - m[0] * m[5]) / det,
            (m[3] * m[7] - m[6] * m[4]) / det,
            (m[6] * m[1] - m[0] * m[7]) / det,
            (m[0] * m[4] - m[3] * m[1]) / det,
        ];
        Ok(Self {
            m: NdVec::from_parts(inv, [3, 3]),
        })
    }
}

impl Default for Transform2d {
    fn default() -> Self {
        Self::new()
    }
}
