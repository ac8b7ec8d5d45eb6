//! Element-wise arithmetic and comparisons for the array types.
//!
//! Compound assignment (`+=` and friends) against another array walks
//! the intersection of the two shapes, exactly like
//! [`assign`](crate::NdSpanMut::assign); against a scalar it broadcasts
//! over every element. The non-mutating operators copy the left operand
//! first and always return an owning [`NdVec`], whatever the ownership
//! of the operands.

use crate::span::{zip_intersection, NdSpan, NdSpanMut};
use crate::vector::NdVec;
use num_traits::NumAssign;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

macro_rules! impl_arith {
    ($op:ident, $method:ident, $op_assign:ident, $method_assign:ident) => {
        // ---- compound assignment, array rhs (intersection walk) ----

        impl<T: Copy + NumAssign, const N: usize> $op_assign<NdSpan<'_, T, N>>
            for NdSpanMut<'_, T, N>
        {
            fn $method_assign(&mut self, rhs: NdSpan<'_, T, N>) {
                let dst_shape = *self.shape();
                let src_shape = *rhs.shape();
                zip_intersection(
                    self.as_mut_slice(),
                    &dst_shape,
                    rhs.as_slice(),
                    &src_shape,
                    &mut |d, s| d.$method_assign(s),
                );
            }
        }

        impl<T: Copy + NumAssign, const N: usize> $op_assign<&NdVec<T, N>>
            for NdSpanMut<'_, T, N>
        {
            fn $method_assign(&mut self, rhs: &NdVec<T, N>) {
                self.$method_assign(rhs.span());
            }
        }

        impl<T: Copy + NumAssign, const N: usize> $op_assign<NdSpan<'_, T, N>> for NdVec<T, N> {
            fn $method_assign(&mut self, rhs: NdSpan<'_, T, N>) {
                self.span_mut().$method_assign(rhs);
            }
        }

        impl<T: Copy + NumAssign, const N: usize> $op_assign<&NdVec<T, N>> for NdVec<T, N> {
            fn $method_assign(&mut self, rhs: &NdVec<T, N>) {
                self.span_mut().$method_assign(rhs.span());
            }
        }

        // ---- compound assignment, scalar rhs (broadcast) ----

        impl<T: Copy + NumAssign, const N: usize> $op_assign<T> for NdSpanMut<'_, T, N> {
            fn $method_assign(&mut self, rhs: T) {
                for x in self.as_mut_slice() {
                    x.$method_assign(rhs);
                }
            }
        }

        impl<T: Copy + NumAssign, const N: usize> $op_assign<T> for NdVec<T, N> {
            fn $method_assign(&mut self, rhs: T) {
                for x in self.as_mut_slice() {
                    x.$method_assign(rhs);
                }
            }
        }

        // ---- non-mutating operators, always owning output ----

        impl<T: Copy + NumAssign, const N: usize> $op<NdSpan<'_, T, N>> for NdSpan<'_, T, N> {
            type Output = NdVec<T, N>;

            fn $method(self, rhs: NdSpan<'_, T, N>) -> NdVec<T, N> {
                let mut out = self.to_vec();
                out.$method_assign(rhs);
                out
            }
        }

        impl<T: Copy + NumAssign, const N: usize> $op<&NdVec<T, N>> for NdSpan<'_, T, N> {
            type Output = NdVec<T, N>;

            fn $method(self, rhs: &NdVec<T, N>) -> NdVec<T, N> {
                self.$method(rhs.span())
            }
        }

        impl<T: Copy + NumAssign, const N: usize> $op<NdSpan<'_, T, N>> for &NdVec<T, N> {
            type Output = NdVec<T, N>;

            fn $method(self, rhs: NdSpan<'_, T, N>) -> NdVec<T, N> {
                self.span().$method(rhs)
            }
        }

        impl<T: Copy + NumAssign, const N: usize> $op<&NdVec<T, N>> for &NdVec<T, N> {
            type Output = NdVec<T, N>;

            fn $method(self, rhs: &NdVec<T, N>) -> NdVec<T, N> {
                self.span().$method(rhs.span())
            }
        }

        impl<T: Copy + NumAssign, const N: usize> $op<T> for NdSpan<'_, T, N> {
            type Output = NdVec<T, N>;

            fn $method(self, rhs: T) -> NdVec<T, N> {
                let mut out = self.to_vec();
                out.$method_assign(rhs);
                out
            }
        }

        impl<T: Copy + NumAssign, const N: usize> $op<T> for &NdVec<T, N> {
            type Output = NdVec<T, N>;

            fn $method(self, rhs: T) -> NdVec<T, N> {
                self.span().$method(rhs)
            }
        }
    };
}

impl_arith!(Add, add, AddAssign, add_assign);
impl_arith!(Sub, sub, SubAssign, sub_assign);
impl_arith!(Mul, mul, MulAssign, mul_assign);
impl_arith!(Div, div, DivAssign, div_assign);

// ============================================================================
// Reverse scalar forms
// ============================================================================

impl<T: Copy + NumAssign, const N: usize> NdSpan<'_, T, N> {
    /// Element-wise `lhs - element`.
    ///
    /// The operator form `scalar - array` cannot be written for an
    /// arbitrary scalar type, so the reversed subtraction is a method.
    pub fn rsub(&self, lhs: T) -> NdVec<T, N> {
        NdVec::from_parts(self.iter().map(|&x| lhs - x).collect(), *self.shape())
    }

    /// Element-wise `lhs / element`.
    pub fn rdiv(&self, lhs: T) -> NdVec<T, N> {
        NdVec::from_parts(self.iter().map(|&x| lhs / x).collect(), *self.shape())
    }
}

impl<T: Copy + NumAssign, const N: usize> NdVec<T, N> {
    /// Element-wise `lhs - element`, see [`NdSpan::rsub`].
    pub fn rsub(&self, lhs: T) -> NdVec<T, N> {
        self.span().rsub(lhs)
    }

    /// Element-wise `lhs / element`, see [`NdSpan::rdiv`].
    pub fn rdiv(&self, lhs: T) -> NdVec<T, N> {
        self.span().rdiv(lhs)
    }
}

// ============================================================================
// Equality
// ============================================================================
//
// Arrays compare by shape plus element values, across ownership. A
// comparison against a flat slice or array literal is positional over
// the layout-order buffer; there is no pointer-identity comparison.

impl<T: PartialEq, const N: usize> PartialEq for NdSpan<'_, T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for NdVec<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, const N: usize> PartialEq<NdVec<T, N>> for NdSpan<'_, T, N> {
    fn eq(&self, other: &NdVec<T, N>) -> bool {
        *self == other.span()
    }
}

impl<T: PartialEq, const N: usize> PartialEq<NdSpan<'_, T, N>> for NdVec<T, N> {
    fn eq(&self, other: &NdSpan<'_, T, N>) -> bool {
        self.span() == *other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T]> for NdSpan<'_, T, N> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<&[T]> for NdSpan<'_, T, N> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq, const N: usize, const L: usize> PartialEq<[T; L]> for NdSpan<'_, T, N> {
    fn eq(&self, other: &[T; L]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T]> for NdVec<T, N> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<&[T]> for NdVec<T, N> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq, const N: usize, const L: usize> PartialEq<[T; L]> for NdVec<T, N> {
    fn eq(&self, other: &[T; L]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(shape: [usize; 3]) -> NdVec<i32, 3> {
        let n: usize = shape.iter().product();
        NdVec::from_vec((0..n as i32).collect(), shape).unwrap()
    }

    #[test]
    fn add_assign_walks_intersection() {
        let mut a = NdVec::filled([2, 2, 4], 1);
        let b = seq([2, 2, 5]);
        a += &b;
        assert_eq!(a.outer(0).outer(0), [1, 2, 3, 4]);
        assert_eq!(a.outer(0).outer(1), [6, 7, 8, 9]);
        assert_eq!(a.outer(1).outer(0), [11, 12, 13, 14]);
        assert_eq!(a.outer(1).outer(1), [16, 17, 18, 19]);
        // The wider operand is untouched.
        assert_eq!(b.outer(1).outer(1), [15, 16, 17, 18, 19]);
    }

    #[test]
    fn intersection_leaves_excess_destination_alone() {
        let mut a = NdVec::filled([2, 2, 5], 1);
        let b = seq([2, 2, 4]);
        a += &b;
        // Fifth column never participates.
        assert_eq!(a.outer(0).outer(0), [1, 2, 3, 4, 1]);
        assert_eq!(a.outer(1).outer(1), [13, 14, 15, 16, 1]);
    }

    #[test]
    fn scalar_broadcast() {
        let mut a = seq([1, 2, 3]);
        a *= 2;
        assert_eq!(a, [0, 2, 4, 6, 8, 10]);
        a += 1;
        assert_eq!(a, [1, 3, 5, 7, 9, 11]);
    }

    #[test]
    fn non_mutating_returns_owning() {
        let a = seq([2, 2, 5]);
        let b = NdVec::filled([2, 2, 5], 10);
        let sum = &a + &b;
        assert_eq!(sum.shape(), &[2, 2, 5]);
        assert_eq!(*sum.get([1, 0, 3]), 23);
        // Operands unchanged.
        assert_eq!(*a.get([1, 0, 3]), 13);
        // View operands also produce an owning result.
        let from_views = a.span() + b.span();
        assert_eq!(from_views, sum);
    }

    #[test]
    fn result_takes_left_shape() {
        let a = NdVec::filled([2, 2, 4], 1);
        let b = seq([2, 2, 5]);
        let sum = &a + &b;
        assert_eq!(sum.shape(), &[2, 2, 4]);
        let sum2 = &b + &a;
        assert_eq!(sum2.shape(), &[2, 2, 5]);
        assert_eq!(sum2.outer(0).outer(0), [1, 2, 3, 4, 4]);
    }

    #[test]
    fn reverse_scalar_forms() {
        let a = NdVec::from_vec(vec![1.0_f32, 2.0, 4.0], [3]).unwrap();
        assert_eq!(a.rsub(10.0), [9.0, 8.0, 6.0]);
        assert_eq!(a.rdiv(8.0), [8.0, 4.0, 2.0]);
    }

    #[test]
    fn equality_is_value_wise() {
        let a = seq([2, 3, 1]);
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.span(), b);
        assert_eq!(a, [0, 1, 2, 3, 4, 5]);
        // Same contents, different shape.
        let c = NdVec::from_vec((0..6).collect::<Vec<i32>>(), [3, 2, 1]).unwrap();
        assert_ne!(a, c);
        assert_eq!(c, [0, 1, 2, 3, 4, 5]);
    }
}
