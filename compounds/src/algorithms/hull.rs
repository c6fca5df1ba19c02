use crate::{
    geom::{orientation, Orientation, Point},
    num::Float,
};

/// Keeps the points that make strict left turns, in the order given.
fn chain<'a, F: Float + 'a>(points: impl Iterator<Item = &'a Point<F>>) -> Vec<Point<F>> {
    let mut ret: Vec<Point<F>> = Vec::new();
    for p in points {
        while let [.., a, b] = ret.as_slice() {
            if orientation(a, b, p) == Orientation::Counterclockwise {
                break;
            }
            ret.pop();
        }
        ret.push(p.clone());
    }
    ret
}

/// The vertices of the convex hull of `points`, counterclockwise and starting from the
/// smallest one. Collinear points on the hull are left out.
///
/// This is Andrew's monotone chain.
pub(crate) fn convex_hull<F: Float>(points: &[Point<F>]) -> Vec<Point<F>> {
    let mut points = points.to_vec();
    points.sort();
    points.dedup();
    if points.len() < 3 {
        return points;
    }
    let mut lower = chain(points.iter());
    let mut upper = chain(points.iter().rev());
    lower.pop();
    upper.pop();
    lower.append(&mut upper);
    lower
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::tests::Reasonable;
    use malachite::Rational;
    use proptest::prelude::*;

    fn p(x: i64, y: i64) -> Point<Rational> {
        Point::from((x, y))
    }

    #[test]
    fn square_with_clutter() {
        let points = [p(1, 1), p(2, 0), p(0, 0), p(2, 2), p(1, 0), p(0, 2), p(0, 2)];
        assert_eq!(convex_hull(&points), vec![p(0, 0), p(2, 0), p(2, 2), p(0, 2)]);
    }

    #[test]
    fn collinear() {
        let points = [p(2, 2), p(0, 0), p(1, 1)];
        assert_eq!(convex_hull(&points), vec![p(0, 0), p(2, 2)]);
    }

    proptest! {
        #[test]
        fn hull_is_convex(
            points in proptest::collection::vec(Point::<Rational>::reasonable(), 3..20),
        ) {
            let hull = convex_hull(&points);
            let n = hull.len();
            if n >= 3 {
                for i in 0..n {
                    for q in &points {
                        prop_assert_ne!(
                            orientation(&hull[i], &hull[(i + 1) % n], q),
                            Orientation::Clockwise
                        );
                    }
                }
            }
        }
    }
}
