//! Clipping curves by regions.

use std::collections::HashSet;

use crate::{
    compound::Compound,
    geom::Point,
    num::Float,
    packing::{pack_mix, pack_points, pack_segments},
    polygon::Polygon,
    relation::{Location, Relation},
    segment::Segment,
};

use super::{
    fragment::{endpoints, fragment, merge},
    location::locate_in_polygons,
};

/// Curve fragments, sorted by where they lie with respect to a region.
struct Clipped<F> {
    interior: Vec<Segment<F>>,
    boundary: Vec<Segment<F>>,
    exterior: Vec<Segment<F>>,
    /// Fragment endpoints that lie on the region's boundary.
    contacts: HashSet<Point<F>>,
}

impl<F: Float> Clipped<F> {
    fn new(polygons: &[Polygon<F>], segments: &[Segment<F>]) -> Self {
        let edges: Vec<_> = polygons.iter().flat_map(|p| p.edges()).collect();
        let (fragments, _) = fragment(segments, &edges);
        let mut ret = Clipped {
            interior: Vec::new(),
            boundary: Vec::new(),
            exterior: Vec::new(),
            contacts: HashSet::new(),
        };
        for p in endpoints(&fragments) {
            if locate_in_polygons(polygons, &p) == Location::Boundary {
                ret.contacts.insert(p);
            }
        }
        for f in fragments {
            match locate_in_polygons(polygons, &f.centroid()) {
                Location::Interior => ret.interior.push(f),
                Location::Boundary => ret.boundary.push(f),
                Location::Exterior => ret.exterior.push(f),
            }
        }
        tracing::trace!(
            interior = ret.interior.len(),
            boundary = ret.boundary.len(),
            exterior = ret.exterior.len(),
            "clipped curves"
        );
        ret
    }
}

/// How the curves `segments` sit with respect to the region made of `polygons`.
pub(crate) fn relate<F: Float>(polygons: &[Polygon<F>], segments: &[Segment<F>]) -> Relation {
    let clipped = Clipped::new(polygons, segments);
    let touching = !clipped.contacts.is_empty();
    let (interior, boundary, exterior) = (
        !clipped.interior.is_empty(),
        !clipped.boundary.is_empty(),
        !clipped.exterior.is_empty(),
    );
    if !interior && !boundary {
        if touching {
            Relation::Touch
        } else {
            Relation::Disjoint
        }
    } else if interior && exterior {
        Relation::Cross
    } else if interior {
        if boundary || touching {
            Relation::Enclosed
        } else {
            Relation::Within
        }
    } else if exterior {
        Relation::Touch
    } else {
        Relation::Component
    }
}

pub(crate) fn intersection<F: Float>(
    polygons: &[Polygon<F>],
    segments: &[Segment<F>],
) -> Compound<F> {
    let clipped = Clipped::new(polygons, segments);
    let inside: Vec<_> = clipped
        .interior
        .into_iter()
        .chain(clipped.boundary)
        .collect();
    let covered = endpoints(&inside);
    let mut stray: Vec<_> = clipped
        .contacts
        .into_iter()
        .filter(|p| !covered.contains(p))
        .collect();
    stray.sort();
    pack_mix(
        pack_points(stray),
        pack_segments(merge(inside)),
        Compound::Empty,
    )
}

/// The parts of the curves that lie outside the region.
pub(crate) fn difference<F: Float>(
    segments: &[Segment<F>],
    polygons: &[Polygon<F>],
) -> Compound<F> {
    let clipped = Clipped::new(polygons, segments);
    pack_segments(merge(clipped.exterior))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{contour::Contour, multisegment::Multisegment};
    use assert_matches::assert_matches;
    use malachite::Rational;

    fn p(x: i64, y: i64) -> Point<Rational> {
        Point::from((x, y))
    }

    fn s(x0: i64, y0: i64, x1: i64, y1: i64) -> Segment<Rational> {
        Segment::new(p(x0, y0), p(x1, y1))
    }

    fn holed_square() -> Polygon<Rational> {
        Polygon::new(
            Contour::new(vec![p(0, 0), p(6, 0), p(6, 6), p(0, 6)]),
            vec![Contour::new(vec![p(2, 2), p(2, 4), p(4, 4), p(4, 2)])],
        )
    }

    #[test]
    fn relations() {
        let shape = [holed_square()];
        let cases = [
            (vec![s(7, 0, 7, 6)], Relation::Disjoint),
            (vec![s(6, 6, 8, 8)], Relation::Touch),
            (vec![s(3, 0, 3, -2), s(6, 3, 8, 3)], Relation::Touch),
            (vec![s(0, 0, 6, 0), s(6, 0, 6, 6)], Relation::Component),
            (vec![s(0, 0, 6, 0), s(6, 0, 7, 0)], Relation::Touch),
            (vec![s(-1, 1, 7, 1)], Relation::Cross),
            (vec![s(1, 1, 1, 5)], Relation::Within),
            (vec![s(1, 1, 2, 2)], Relation::Enclosed),
            (vec![s(0, 0, 6, 0), s(0, 0, 1, 1)], Relation::Enclosed),
        ];
        for (segments, expected) in cases {
            assert_eq!(relate(&shape, &segments), expected, "{segments:?}");
        }
    }

    #[test]
    fn crossing_the_hole() {
        let shape = [holed_square()];
        let line = [s(-1, 3, 7, 3)];
        let inside = intersection(&shape, &line);
        assert_eq!(
            inside,
            Compound::Multisegment(Multisegment::new(vec![s(0, 3, 2, 3), s(4, 3, 6, 3)]))
        );
        let outside = difference(&line, &shape);
        assert_eq!(
            outside,
            Compound::Multisegment(Multisegment::new(vec![
                s(-1, 3, 0, 3),
                s(2, 3, 4, 3),
                s(6, 3, 7, 3)
            ]))
        );
    }

    #[test]
    fn touching_points_survive_intersection() {
        let shape = [holed_square()];
        let result = intersection(&shape, &[s(6, 3, 8, 3), s(1, 1, 1, 5)]);
        assert_matches!(result, Compound::Mix(_));
    }
}
