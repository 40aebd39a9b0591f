//! Fixed-dimension position vectors.
//!
//! The first two components are the driven plane; everything after is a
//! pass-through axis that the transforms copy verbatim.

use core::ops::{Add, AddAssign, Div, Index, IndexMut, Sub};

/// Lower link motor / cartesian X.
pub const X_AXIS: usize = 0;
/// Upper link motor / cartesian Y.
pub const Y_AXIS: usize = 1;

/// Machine position in millimeters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cartesian<const N: usize>(pub [f64; N]);

/// Joint position in degrees (pass-through axes in their own units).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Joints<const N: usize>(pub [f64; N]);

macro_rules! impl_vector {
    ($name:ident, $first:ident, $second:ident) => {
        impl<const N: usize> $name<N> {
            pub const fn new(values: [f64; N]) -> Self {
                const { assert!(N >= 2, "a SCARA position needs at least two axes") };
                Self(values)
            }

            pub fn $first(&self) -> f64 {
                self.0[X_AXIS]
            }

            pub fn $second(&self) -> f64 {
                self.0[Y_AXIS]
            }

            pub fn as_slice(&self) -> &[f64] {
                &self.0
            }
        }

        impl<const N: usize> Default for $name<N> {
            fn default() -> Self {
                Self::new([0.0; N])
            }
        }

        impl<const N: usize> From<[f64; N]> for $name<N> {
            fn from(values: [f64; N]) -> Self {
                Self::new(values)
            }
        }

        impl<const N: usize> Index<usize> for $name<N> {
            type Output = f64;

            fn index(&self, idx: usize) -> &f64 {
                &self.0[idx]
            }
        }

        impl<const N: usize> IndexMut<usize> for $name<N> {
            fn index_mut(&mut self, idx: usize) -> &mut f64 {
                &mut self.0[idx]
            }
        }
    };
}

impl_vector!(Cartesian, x, y);
impl_vector!(Joints, q1, q2);

impl<const N: usize> Cartesian<N> {
    /// Length of the projection onto the driven plane.
    pub fn planar_norm(&self) -> f64 {
        self.x().hypot(self.y())
    }
}

impl<const N: usize> Sub for Cartesian<N> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a -= b;
        }
        self
    }
}

impl<const N: usize> Add for Cartesian<N> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<const N: usize> AddAssign for Cartesian<N> {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}

impl<const N: usize> Div<f64> for Cartesian<N> {
    type Output = Self;

    fn div(mut self, rhs: f64) -> Self {
        for a in &mut self.0 {
            *a /= rhs;
        }
        self
    }
}
