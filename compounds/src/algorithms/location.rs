//! Point location against closed edge sets.

use crate::{
    geom::{orientation, Orientation, Point},
    index::BoxTree,
    num::Float,
    polygon::Polygon,
    relation::Location,
    segment::Segment,
};

/// Whether the rightward horizontal ray from `p` crosses `edge`.
///
/// Each edge is treated as half-open in `y`, so a ray through a vertex is counted once.
fn crosses_ray<F: Float>(edge: &Segment<F>, p: &Point<F>) -> bool {
    let (lo, hi) = if edge.start.y <= edge.end.y {
        (&edge.start, &edge.end)
    } else {
        (&edge.end, &edge.start)
    };
    lo.y <= p.y && p.y < hi.y && orientation(lo, hi, p) == Orientation::Counterclockwise
}

/// Locates `p` in the region bounded by `edges`, by the even-odd rule.
///
/// The edges must form closed curves; their directions don't matter.
pub(crate) fn locate_in_edges<F: Float>(
    edges: impl IntoIterator<Item = Segment<F>>,
    p: &Point<F>,
) -> Location {
    let mut inside = false;
    for edge in edges {
        if edge.contains(p) {
            return Location::Boundary;
        }
        inside ^= crosses_ray(&edge, p);
    }
    if inside {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Like [`locate_in_edges`], but only looks at the edges the tree says can matter.
pub(crate) fn locate_in_tree<F: Float>(
    tree: &BoxTree<F>,
    edge: impl Fn(usize) -> Segment<F>,
    p: &Point<F>,
) -> Location {
    let mut inside = false;
    let mut boundary = false;
    // Only edges that reach the height of `p` and have something to the right of it
    // can contain `p` or cross its ray.
    tree.visit(
        |b| b.min_y <= p.y && p.y <= b.max_y && b.max_x >= p.x,
        |i| {
            let e = edge(i);
            if e.contains(p) {
                boundary = true;
            }
            inside ^= crosses_ray(&e, p);
        },
    );
    if boundary {
        Location::Boundary
    } else if inside {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Locates `p` on a set of curves: it is either on one of them or outside.
pub(crate) fn locate_on_segments<'a, F: Float>(
    segments: impl IntoIterator<Item = &'a Segment<F>>,
    p: &Point<F>,
) -> Location {
    if segments.into_iter().any(|s| s.contains(p)) {
        Location::Boundary
    } else {
        Location::Exterior
    }
}

/// Like [`locate_on_segments`], through a tree of the segments' boxes.
pub(crate) fn locate_on_tree<F: Float>(
    tree: &BoxTree<F>,
    segment: impl Fn(usize) -> Segment<F>,
    p: &Point<F>,
) -> Location {
    if tree.containing(p).into_iter().any(|i| segment(i).contains(p)) {
        Location::Boundary
    } else {
        Location::Exterior
    }
}

/// Locates `p` in the union of polygons whose interiors don't overlap.
pub(crate) fn locate_in_polygons<F: Float>(polygons: &[Polygon<F>], p: &Point<F>) -> Location {
    polygons
        .iter()
        .map(|polygon| polygon.locate(p))
        .find(|location| *location != Location::Exterior)
        .unwrap_or(Location::Exterior)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::BBox;
    use malachite::Rational;
    use proptest::prelude::*;

    fn p(x: i64, y: i64) -> Point<Rational> {
        Point::from((x, y))
    }

    fn closed(vertices: &[(i64, i64)]) -> Vec<Segment<Rational>> {
        (0..vertices.len())
            .map(|i| {
                Segment::new(
                    Point::from(vertices[i]),
                    Point::from(vertices[(i + 1) % vertices.len()]),
                )
            })
            .collect()
    }

    #[test]
    fn ray_through_vertices() {
        // A diamond, probed at the height of its left and right corners.
        let edges = closed(&[(2, 0), (4, 2), (2, 4), (0, 2)]);
        assert_eq!(locate_in_edges(edges.clone(), &p(2, 2)), Location::Interior);
        assert_eq!(locate_in_edges(edges.clone(), &p(-1, 2)), Location::Exterior);
        assert_eq!(locate_in_edges(edges.clone(), &p(5, 2)), Location::Exterior);
        assert_eq!(locate_in_edges(edges.clone(), &p(0, 2)), Location::Boundary);
        assert_eq!(locate_in_edges(edges, &p(1, 1)), Location::Boundary);
    }

    #[test]
    fn horizontal_edges() {
        let edges = closed(&[(0, 0), (4, 0), (4, 2), (2, 2), (2, 4), (0, 4)]);
        assert_eq!(locate_in_edges(edges.clone(), &p(1, 2)), Location::Interior);
        assert_eq!(locate_in_edges(edges.clone(), &p(3, 3)), Location::Exterior);
        assert_eq!(locate_in_edges(edges, &p(3, 2)), Location::Boundary);
    }

    proptest! {
        #[test]
        fn tree_agrees_with_scan(x in -2i64..8, y in -2i64..8) {
            let edges = closed(&[(0, 0), (6, 0), (6, 6), (3, 2), (0, 6)]);
            let tree = BoxTree::new(edges.iter().map(BBox::of_segment).collect());
            let probe = p(x, y);
            prop_assert_eq!(
                locate_in_tree(&tree, |i| edges[i].clone(), &probe),
                locate_in_edges(edges.clone(), &probe)
            );
            prop_assert_eq!(
                locate_on_tree(&tree, |i| edges[i].clone(), &probe),
                locate_on_segments(&edges, &probe)
            );
        }
    }
}
