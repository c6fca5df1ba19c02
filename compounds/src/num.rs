//! A thin abstraction over the different numerical types we support.

use std::{cmp::Ordering, hash::Hash};

use malachite::{
    num::arithmetic::traits::{CheckedSqrt, FloorSqrt},
    Rational,
};
use ordered_float::NotNan;

use crate::geom::{Orientation, Point};

/// A trait for abstracting over the properties we need from numerical types.
///
/// This is implemented for `NotNan<f64>`, `NotNan<f32>`, and `malachite::Rational`.
///
/// The two geometric predicates (`orientation` and `in_circle`) are exact for every
/// implementation: rationals compute them directly, and floats go through `robust`'s
/// adaptive-precision arithmetic. Everything constructed from a division or a square
/// root (intersection points, lengths, centroids) is only exact for rationals.
///
/// Float coordinates must be finite. [`Point::validate`] rejects infinities; past that
/// check, an infinity meeting a zero makes NaN, and `NotNan` panics on it.
pub trait Float:
    Sized
    + std::ops::Add<Self, Output = Self>
    + std::ops::Sub<Self, Output = Self>
    + std::ops::Mul<Self, Output = Self>
    + std::ops::Div<Self, Output = Self>
    + std::ops::Neg<Output = Self>
    + for<'a> std::ops::Add<&'a Self, Output = Self>
    + for<'a> std::ops::Sub<&'a Self, Output = Self>
    + for<'a> std::ops::Mul<&'a Self, Output = Self>
    + for<'a> std::ops::Div<&'a Self, Output = Self>
    + Clone
    + std::fmt::Debug
    + Ord
    + Eq
    + Hash
    + 'static
{
    fn from_f32(x: f32) -> Self;

    fn to_exact(&self) -> Rational;

    fn abs(self) -> Self;

    /// The square root of a non-negative value.
    ///
    /// Exact for rational perfect squares, otherwise correct to about 64 bits.
    fn sqrt(&self) -> Self;

    fn is_finite(&self) -> bool;

    /// The orientation of the turn `a -> b -> c`.
    fn orientation(a: &Point<Self>, b: &Point<Self>, c: &Point<Self>) -> Orientation {
        let (a, b, c) = (a.to_exact(), b.to_exact(), c.to_exact());
        let det = (&b.x - &a.x) * (&c.y - &a.y) - (&b.y - &a.y) * (&c.x - &a.x);
        Orientation::from_sign(det.cmp(&Rational::from(0)))
    }

    /// Returns `Greater` if `d` is strictly inside the circle through the counterclockwise
    /// triangle `a, b, c`, `Equal` if it is on the circle and `Less` if it is outside.
    fn in_circle(a: &Point<Self>, b: &Point<Self>, c: &Point<Self>, d: &Point<Self>) -> Ordering {
        let d = d.to_exact();
        let shift = |p: &Point<Self>| {
            let p = p.to_exact();
            let dx = p.x - &d.x;
            let dy = p.y - &d.y;
            let lift = &dx * &dx + &dy * &dy;
            (dx, dy, lift)
        };
        let (adx, ady, alift) = shift(a);
        let (bdx, bdy, blift) = shift(b);
        let (cdx, cdy, clift) = shift(c);
        let det = &adx * (&bdy * &clift - &cdy * &blift) - &ady * (&bdx * &clift - &cdx * &blift)
            + alift * (bdx * &cdy - cdx * &bdy);
        det.cmp(&Rational::from(0))
    }
}

impl Float for Rational {
    fn from_f32(x: f32) -> Self {
        Rational::try_from(x).unwrap()
    }

    fn to_exact(&self) -> Rational {
        self.clone()
    }

    fn abs(self) -> Self {
        <Rational as malachite::num::arithmetic::traits::Abs>::abs(self)
    }

    fn sqrt(&self) -> Self {
        let numerator = self.to_numerator();
        let denominator = self.to_denominator();
        if let (Some(n), Some(d)) = (
            numerator.clone().checked_sqrt(),
            denominator.clone().checked_sqrt(),
        ) {
            return Rational::from_naturals(n, d);
        }
        // sqrt(n / d) = sqrt(n * d) / d, computed in 64-bit fixed point.
        let scaled = (numerator * &denominator) << 128u64;
        Rational::from_naturals(scaled.floor_sqrt(), denominator << 64u64)
    }

    fn is_finite(&self) -> bool {
        true
    }
}

fn robust_coord<F: Into<f64> + Copy>(x: F, y: F) -> robust::Coord<f64> {
    robust::Coord {
        x: x.into(),
        y: y.into(),
    }
}

impl Float for NotNan<f32> {
    fn from_f32(x: f32) -> Self {
        NotNan::try_from(x).unwrap()
    }

    fn to_exact(&self) -> Rational {
        self.into_inner().try_into().unwrap()
    }

    // Neither of these can turn a non-NaN input into NaN.
    fn abs(self) -> Self {
        self.into_inner().abs().try_into().unwrap()
    }

    fn sqrt(&self) -> Self {
        self.into_inner().max(0.0).sqrt().try_into().unwrap()
    }

    fn is_finite(&self) -> bool {
        self.into_inner().is_finite()
    }

    fn orientation(a: &Point<Self>, b: &Point<Self>, c: &Point<Self>) -> Orientation {
        let det = robust::orient2d(
            robust_coord(a.x.into_inner(), a.y.into_inner()),
            robust_coord(b.x.into_inner(), b.y.into_inner()),
            robust_coord(c.x.into_inner(), c.y.into_inner()),
        );
        Orientation::from_sign(det.partial_cmp(&0.0).unwrap_or(Ordering::Equal))
    }

    fn in_circle(a: &Point<Self>, b: &Point<Self>, c: &Point<Self>, d: &Point<Self>) -> Ordering {
        robust::incircle(
            robust_coord(a.x.into_inner(), a.y.into_inner()),
            robust_coord(b.x.into_inner(), b.y.into_inner()),
            robust_coord(c.x.into_inner(), c.y.into_inner()),
            robust_coord(d.x.into_inner(), d.y.into_inner()),
        )
        .partial_cmp(&0.0)
        .unwrap_or(Ordering::Equal)
    }
}

impl Float for NotNan<f64> {
    fn from_f32(x: f32) -> Self {
        NotNan::try_from(f64::from(x)).unwrap()
    }

    fn to_exact(&self) -> Rational {
        self.into_inner().try_into().unwrap()
    }

    // Neither of these can turn a non-NaN input into NaN.
    fn abs(self) -> Self {
        self.into_inner().abs().try_into().unwrap()
    }

    fn sqrt(&self) -> Self {
        self.into_inner().max(0.0).sqrt().try_into().unwrap()
    }

    fn is_finite(&self) -> bool {
        self.into_inner().is_finite()
    }

    fn orientation(a: &Point<Self>, b: &Point<Self>, c: &Point<Self>) -> Orientation {
        let det = robust::orient2d(
            robust_coord(a.x.into_inner(), a.y.into_inner()),
            robust_coord(b.x.into_inner(), b.y.into_inner()),
            robust_coord(c.x.into_inner(), c.y.into_inner()),
        );
        Orientation::from_sign(det.partial_cmp(&0.0).unwrap_or(Ordering::Equal))
    }

    fn in_circle(a: &Point<Self>, b: &Point<Self>, c: &Point<Self>, d: &Point<Self>) -> Ordering {
        robust::incircle(
            robust_coord(a.x.into_inner(), a.y.into_inner()),
            robust_coord(b.x.into_inner(), b.y.into_inner()),
            robust_coord(c.x.into_inner(), c.y.into_inner()),
            robust_coord(d.x.into_inner(), d.y.into_inner()),
        )
        .partial_cmp(&0.0)
        .unwrap_or(Ordering::Equal)
    }
}

/// Shorthand for the small integer constants the algorithms need.
pub(crate) fn constant<F: Float>(x: i16) -> F {
    F::from_f32(f32::from(x))
}

/// The number `n` in `F`, built from its binary digits so that it is exact whenever `F`
/// can represent it.
pub(crate) fn count<F: Float>(n: usize) -> F {
    let (one, two) = (constant::<F>(1), constant::<F>(2));
    (0..usize::BITS).rev().fold(constant(0), |acc: F, bit| {
        let acc = acc * &two;
        if (n >> bit) & 1 == 1 {
            acc + &one
        } else {
            acc
        }
    })
}
