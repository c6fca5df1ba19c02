//! Constructors that always return the simplest compound representing their input.
//!
//! Operators build their results through these, so a result never ends up as a
//! container holding fewer elements than its type needs.

use crate::{
    compound::Compound, geom::Point, mix::Mix, multipoint::Multipoint,
    multipolygon::Multipolygon, multisegment::Multisegment, num::Float, polygon::Polygon,
    segment::Segment,
};

pub fn pack_points<F: Float>(points: Vec<Point<F>>) -> Compound<F> {
    if points.is_empty() {
        Compound::Empty
    } else {
        Compound::Multipoint(Multipoint::new(points))
    }
}

pub fn pack_segments<F: Float>(mut segments: Vec<Segment<F>>) -> Compound<F> {
    match segments.len() {
        0 => Compound::Empty,
        1 => Compound::Segment(segments.remove(0)),
        _ => Compound::Multisegment(Multisegment::new(segments)),
    }
}

pub fn pack_polygons<F: Float>(mut polygons: Vec<Polygon<F>>) -> Compound<F> {
    match polygons.len() {
        0 => Compound::Empty,
        1 => Compound::Polygon(polygons.remove(0)),
        _ => Compound::Multipolygon(Multipolygon::new(polygons)),
    }
}

/// Combines a discrete, a linear and a shaped component.
///
/// Two or more non-empty components make a [`Mix`]; otherwise the only non-empty
/// component (or `Empty`) is returned as is.
pub fn pack_mix<F: Float>(
    discrete: Compound<F>,
    linear: Compound<F>,
    shaped: Compound<F>,
) -> Compound<F> {
    let non_empty = [&discrete, &linear, &shaped]
        .iter()
        .filter(|c| !c.is_empty())
        .count();
    if non_empty >= 2 {
        return Compound::Mix(Mix::new(discrete, linear, shaped));
    }
    if !discrete.is_empty() {
        discrete
    } else if !linear.is_empty() {
        linear
    } else {
        shaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::Contour;
    use assert_matches::assert_matches;
    use malachite::Rational;

    fn p(x: i64, y: i64) -> Point<Rational> {
        Point::from((x, y))
    }

    fn square(x: i64, y: i64) -> Polygon<Rational> {
        Polygon::new(
            Contour::new(vec![p(x, y), p(x + 1, y), p(x + 1, y + 1), p(x, y + 1)]),
            vec![],
        )
    }

    #[test]
    fn demotes_small_containers() {
        assert_eq!(pack_points::<Rational>(vec![]), Compound::Empty);
        assert_matches!(pack_points(vec![p(0, 0)]), Compound::Multipoint(_));
        assert_matches!(
            pack_segments(vec![Segment::new(p(0, 0), p(1, 0))]),
            Compound::Segment(_)
        );
        assert_matches!(
            pack_segments(vec![Segment::new(p(0, 0), p(1, 0)), Segment::new(p(0, 1), p(1, 1))]),
            Compound::Multisegment(_)
        );
        assert_matches!(pack_polygons(vec![square(0, 0)]), Compound::Polygon(_));
        assert_matches!(pack_polygons(vec![square(0, 0), square(3, 3)]), Compound::Multipolygon(_));
    }

    #[test]
    fn mix_needs_two_components() {
        let points = pack_points(vec![p(5, 5)]);
        let shape = Compound::Polygon(square(0, 0));
        assert_eq!(
            pack_mix(Compound::Empty, Compound::Empty, shape.clone()),
            shape
        );
        assert_eq!(
            pack_mix(Compound::Empty, Compound::Empty, Compound::<Rational>::Empty),
            Compound::Empty
        );
        assert_matches!(
            pack_mix(points, Compound::Empty, shape),
            Compound::Mix(_)
        );
    }
}
