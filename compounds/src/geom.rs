use std::cmp::Ordering;

use malachite::Rational;
use ordered_float::NotNan;

use crate::{num::Float, Error};

// Points are sorted by `x` and then by `y`
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point<F> {
    pub x: F,
    pub y: F,
}

impl<F: std::fmt::Debug> std::fmt::Debug for Point<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl<F: Float> Point<F> {
    pub fn new(x: F, y: F) -> Self {
        Point { x, y }
    }

    pub fn to_exact(&self) -> Point<Rational> {
        Point {
            x: self.x.to_exact(),
            y: self.y.to_exact(),
        }
    }

    pub fn translate(&self, step_x: &F, step_y: &F) -> Self {
        Point::new(self.x.clone() + step_x, self.y.clone() + step_y)
    }

    pub fn scale(&self, factor_x: &F, factor_y: &F) -> Self {
        Point::new(self.x.clone() * factor_x, self.y.clone() * factor_y)
    }

    /// Rotates around `center`, or around the origin if there is no center.
    pub fn rotate(&self, cosine: &F, sine: &F, center: Option<&Point<F>>) -> Self {
        match center {
            None => self.rotate_around_origin(cosine, sine),
            Some(center) => {
                let (step_x, step_y) = rotation_step(center, cosine, sine);
                self.rotate_translate(cosine, sine, &step_x, &step_y)
            }
        }
    }

    pub(crate) fn rotate_around_origin(&self, cosine: &F, sine: &F) -> Self {
        Point::new(
            cosine.clone() * &self.x - sine.clone() * &self.y,
            sine.clone() * &self.x + cosine.clone() * &self.y,
        )
    }

    pub(crate) fn rotate_translate(&self, cosine: &F, sine: &F, step_x: &F, step_y: &F) -> Self {
        let rotated = self.rotate_around_origin(cosine, sine);
        rotated.translate(step_x, step_y)
    }

    pub fn squared_distance_to(&self, other: &Self) -> F {
        let dx = self.x.clone() - &other.x;
        let dy = self.y.clone() - &other.y;
        dx.clone() * dx + dy.clone() * dy
    }

    pub fn distance_to(&self, other: &Self) -> F {
        self.squared_distance_to(other).sqrt()
    }

    pub(crate) fn midpoint(&self, other: &Self) -> Self {
        let two = crate::num::constant::<F>(2);
        Point::new(
            (self.x.clone() + &other.x) / &two,
            (self.y.clone() + &other.y) / two,
        )
    }

    /// Checks that both coordinates are finite. Nothing else in the crate is defined for
    /// infinite coordinates.
    pub fn validate(&self) -> Result<(), Error> {
        if self.x.is_finite() && self.y.is_finite() {
            Ok(())
        } else {
            Err(Error::invalid("Point", "Coordinates should be finite."))
        }
    }
}

/// The translation that turns a rotation around the origin into a rotation around `center`.
pub(crate) fn rotation_step<F: Float>(center: &Point<F>, cosine: &F, sine: &F) -> (F, F) {
    let rotated = center.rotate_around_origin(cosine, sine);
    (center.x.clone() - rotated.x, center.y.clone() - rotated.y)
}

impl<F: Float> From<(F, F)> for Point<F> {
    fn from((x, y): (F, F)) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point<NotNan<f64>> {
    fn from((x, y): (f64, f64)) -> Self {
        Self {
            x: x.try_into().unwrap(),
            y: y.try_into().unwrap(),
        }
    }
}

impl From<(i64, i64)> for Point<Rational> {
    fn from((x, y): (i64, i64)) -> Self {
        Self {
            x: Rational::from(x),
            y: Rational::from(y),
        }
    }
}

impl<F: Float> std::ops::Sub for &Point<F> {
    type Output = Vector<F>;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x.clone() - &rhs.x,
            y: self.y.clone() - &rhs.y,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vector<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vector<F> {
    pub fn cross(&self, other: &Self) -> F {
        self.x.clone() * &other.y - self.y.clone() * &other.x
    }

    pub fn dot(&self, other: &Self) -> F {
        self.x.clone() * &other.x + self.y.clone() * &other.y
    }

    pub fn squared_length(&self) -> F {
        self.dot(self)
    }
}

/// The turn made by three consecutive points.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Orientation {
    Clockwise,
    Collinear,
    Counterclockwise,
}

impl Orientation {
    /// Maps the sign of a cross product to an orientation.
    pub fn from_sign(sign: Ordering) -> Self {
        match sign {
            Ordering::Less => Orientation::Clockwise,
            Ordering::Equal => Orientation::Collinear,
            Ordering::Greater => Orientation::Counterclockwise,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Orientation::Clockwise => Orientation::Counterclockwise,
            Orientation::Collinear => Orientation::Collinear,
            Orientation::Counterclockwise => Orientation::Clockwise,
        }
    }
}

/// The orientation of the turn `a -> b -> c`.
pub fn orientation<F: Float>(a: &Point<F>, b: &Point<F>, c: &Point<F>) -> Orientation {
    F::orientation(a, b, c)
}

/// The kind of the angle at `vertex` between the rays towards `first` and `second`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Kind {
    Obtuse,
    Right,
    Acute,
}

impl Kind {
    pub fn from_sign(sign: Ordering) -> Self {
        match sign {
            Ordering::Less => Kind::Obtuse,
            Ordering::Equal => Kind::Right,
            Ordering::Greater => Kind::Acute,
        }
    }
}

pub fn kind<F: Float>(vertex: &Point<F>, first: &Point<F>, second: &Point<F>) -> Kind {
    let dot = (first - vertex).dot(&(second - vertex));
    Kind::from_sign(dot.cmp(&crate::num::constant(0)))
}

/// Compares two directions by their clockwise angle from `reference`.
///
/// Angles are taken in `(0, 360]`, so a direction equal to `reference` sorts last.
pub(crate) fn clockwise_from<F: Float>(
    reference: &Vector<F>,
    a: &Vector<F>,
    b: &Vector<F>,
) -> Ordering {
    let bucket = |v: &Vector<F>| {
        let cross = reference.cross(v).cmp(&crate::num::constant(0));
        match cross {
            Ordering::Less => 0,
            Ordering::Greater => 2,
            Ordering::Equal => {
                if reference.dot(v) < crate::num::constant(0) {
                    1
                } else {
                    3
                }
            }
        }
    };
    let (bucket_a, bucket_b) = (bucket(a), bucket(b));
    if bucket_a != bucket_b {
        return bucket_a.cmp(&bucket_b);
    }
    if bucket_a == 1 || bucket_a == 3 {
        return Ordering::Equal;
    }
    // Within a half-turn, `b` comes later if it is clockwise of `a`.
    a.cross(b).cmp(&crate::num::constant(0))
}

/// Compares two directions by their counterclockwise angle from the positive x axis.
pub(crate) fn angular_cmp<F: Float>(a: &Vector<F>, b: &Vector<F>) -> Ordering {
    let zero = crate::num::constant::<F>(0);
    let half = |v: &Vector<F>| v.y < zero || (v.y == zero && v.x < zero);
    match (half(a), half(b)) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        _ => b.cross(a).cmp(&zero),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::num::tests::Reasonable;
    use proptest::prelude::*;

    impl<F: Reasonable + Float> Reasonable for Point<F>
    where
        F::Strategy: 'static,
    {
        type Strategy = BoxedStrategy<Point<F>>;

        fn reasonable() -> Self::Strategy {
            (F::reasonable(), F::reasonable())
                .prop_map(|(x, y)| Point::new(x, y))
                .boxed()
        }
    }

    fn p(x: i64, y: i64) -> Point<Rational> {
        Point::from((x, y))
    }

    fn v(x: i64, y: i64) -> Vector<Rational> {
        &p(x, y) - &p(0, 0)
    }

    #[test]
    fn points_order_by_x_then_y() {
        assert!(p(0, 5) < p(1, 0));
        assert!(p(1, 0) < p(1, 2));
    }

    #[test]
    fn orientation_of_triangle() {
        assert_eq!(orientation(&p(0, 0), &p(1, 0), &p(0, 1)), Orientation::Counterclockwise);
        assert_eq!(orientation(&p(0, 0), &p(0, 1), &p(1, 0)), Orientation::Clockwise);
        assert_eq!(orientation(&p(0, 0), &p(1, 1), &p(2, 2)), Orientation::Collinear);
    }

    #[test]
    fn clockwise_order() {
        // Looking back west, the first clockwise direction is north.
        let reference = v(-1, 0);
        let mut dirs = vec![v(1, 0), v(0, -1), v(-1, 0), v(0, 1)];
        dirs.sort_by(|a, b| clockwise_from(&reference, a, b));
        assert_eq!(dirs, vec![v(0, 1), v(1, 0), v(0, -1), v(-1, 0)]);
    }

    #[test]
    fn angular_order() {
        let mut dirs = vec![v(0, -1), v(-1, 0), v(1, 1), v(1, 0)];
        dirs.sort_by(angular_cmp);
        assert_eq!(dirs, vec![v(1, 0), v(1, 1), v(-1, 0), v(0, -1)]);
    }

    #[test]
    fn rotation_about_center() {
        let zero = Rational::from(0);
        let one = Rational::from(1);
        let rotated = p(2, 1).rotate(&zero, &one, Some(&p(1, 1)));
        assert_eq!(rotated, p(1, 2));
    }

    proptest! {
        #[test]
        fn translate_round_trip(
            a in Point::<Rational>::reasonable(),
            (dx, dy) in <(Rational, Rational)>::reasonable(),
        ) {
            let back = a.translate(&dx, &dy).translate(&-dx.clone(), &-dy.clone());
            prop_assert_eq!(back, a);
        }
    }
}
