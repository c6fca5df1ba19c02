//! Relations and set operations between regions.
//!
//! Both regions are described by their edges, directed so that the interior is on the
//! left. After fragmenting, every fragment of one region is either inside the other
//! region, outside it, or shared with it. A shared fragment runs along the other
//! region's boundary in the same direction (the interiors are on the same side) or in
//! the opposite direction. Each operation picks a set of fragments, which is then
//! traced into faces.

use std::collections::{HashMap, HashSet};

use crate::{
    compound::Compound,
    contour::{double_signed_area, Contour},
    geom::{clockwise_from, orientation, Orientation, Point},
    num::{constant, Float},
    packing::{pack_mix, pack_points, pack_polygons, pack_segments},
    polygon::Polygon,
    relation::{Location, Relation},
    segment::Segment,
};

use super::{
    fragment::{endpoints, fragment, merge},
    location::{locate_in_edges, locate_in_polygons},
};

struct Classified<F> {
    inside: Vec<Segment<F>>,
    outside: Vec<Segment<F>>,
    same: Vec<Segment<F>>,
    opposite: Vec<Segment<F>>,
}

impl<F: Float> Classified<F> {
    fn new(
        fragments: Vec<Segment<F>>,
        other_fragments: &[Segment<F>],
        other: &[Polygon<F>],
    ) -> Self {
        let directed: HashSet<(&Point<F>, &Point<F>)> = other_fragments
            .iter()
            .map(|s| (&s.start, &s.end))
            .collect();
        let mut ret = Classified {
            inside: Vec::new(),
            outside: Vec::new(),
            same: Vec::new(),
            opposite: Vec::new(),
        };
        for f in fragments {
            if directed.contains(&(&f.start, &f.end)) {
                ret.same.push(f);
            } else if directed.contains(&(&f.end, &f.start)) {
                ret.opposite.push(f);
            } else if locate_in_polygons(other, &f.centroid()) == Location::Interior {
                ret.inside.push(f);
            } else {
                ret.outside.push(f);
            }
        }
        ret
    }

    fn is_all_same(&self) -> bool {
        self.inside.is_empty() && self.outside.is_empty() && self.opposite.is_empty()
    }
}

struct Overlay<F> {
    left: Classified<F>,
    right: Classified<F>,
    contacts: HashSet<Point<F>>,
}

impl<F: Float> Overlay<F> {
    fn new(left: &[Polygon<F>], right: &[Polygon<F>]) -> Self {
        let left_edges: Vec<_> = left.iter().flat_map(|p| p.oriented_edges()).collect();
        let right_edges: Vec<_> = right.iter().flat_map(|p| p.oriented_edges()).collect();
        let (left_fragments, right_fragments) = fragment(&left_edges, &right_edges);
        tracing::debug!(
            left = left_fragments.len(),
            right = right_fragments.len(),
            "overlaying regions"
        );

        let right_ends = endpoints(&right_fragments);
        let contacts = endpoints(&left_fragments)
            .into_iter()
            .filter(|p| right_ends.contains(p))
            .collect();
        let left_classified = Classified::new(left_fragments.clone(), &right_fragments, right);
        let right_classified = Classified::new(right_fragments, &left_fragments, left);
        Overlay {
            left: left_classified,
            right: right_classified,
            contacts,
        }
    }
}

fn reversed<F: Float>(segments: &[Segment<F>]) -> impl Iterator<Item = Segment<F>> + '_ {
    segments.iter().map(Segment::reversed)
}

/// How the region `right` sits with respect to the region `left`.
pub(crate) fn relate<F: Float>(left: &[Polygon<F>], right: &[Polygon<F>]) -> Relation {
    let Overlay {
        left,
        right,
        contacts,
    } = Overlay::new(left, right);
    let touching = !contacts.is_empty();
    let sharing = !left.same.is_empty();

    if left.inside.is_empty() && right.inside.is_empty() {
        if !sharing {
            if touching {
                Relation::Touch
            } else {
                Relation::Disjoint
            }
        } else if left.is_all_same() && right.is_all_same() {
            Relation::Equal
        } else if right.is_all_same() {
            Relation::Component
        } else if left.is_all_same() {
            Relation::Composite
        } else {
            Relation::Overlap
        }
    } else if right.outside.is_empty() && right.opposite.is_empty() && left.inside.is_empty() {
        if touching || sharing {
            Relation::Enclosed
        } else {
            Relation::Within
        }
    } else if left.outside.is_empty() && left.opposite.is_empty() && right.inside.is_empty() {
        if touching || sharing {
            Relation::Encloses
        } else {
            Relation::Cover
        }
    } else {
        Relation::Overlap
    }
}

pub(crate) fn union<F: Float>(left: &[Polygon<F>], right: &[Polygon<F>]) -> Compound<F> {
    let Overlay { left, right, .. } = Overlay::new(left, right);
    let edges = left
        .outside
        .into_iter()
        .chain(right.outside)
        .chain(left.same)
        .collect();
    pack_polygons(trace(edges))
}

/// The common part of two regions, including the curves and points where they only
/// touch.
pub(crate) fn intersection<F: Float>(left: &[Polygon<F>], right: &[Polygon<F>]) -> Compound<F> {
    let Overlay {
        left,
        right,
        contacts,
    } = Overlay::new(left, right);
    let edges: Vec<_> = left
        .inside
        .into_iter()
        .chain(right.inside)
        .chain(left.same)
        .collect();
    let covered: HashSet<_> = endpoints(&edges)
        .into_iter()
        .chain(endpoints(&left.opposite))
        .collect();
    let mut points: Vec<_> = contacts
        .into_iter()
        .filter(|p| !covered.contains(p))
        .collect();
    points.sort();
    pack_mix(
        pack_points(points),
        pack_segments(merge(left.opposite)),
        pack_polygons(trace(edges)),
    )
}

pub(crate) fn difference<F: Float>(left: &[Polygon<F>], right: &[Polygon<F>]) -> Compound<F> {
    let Overlay { left, right, .. } = Overlay::new(left, right);
    let edges = left
        .outside
        .into_iter()
        .chain(reversed(&right.inside))
        .chain(left.opposite)
        .collect();
    pack_polygons(trace(edges))
}

pub(crate) fn symmetric_difference<F: Float>(
    left: &[Polygon<F>],
    right: &[Polygon<F>],
) -> Compound<F> {
    let Overlay { left, right, .. } = Overlay::new(left, right);
    let edges = left
        .outside
        .into_iter()
        .chain(right.outside)
        .chain(reversed(&left.inside))
        .chain(reversed(&right.inside))
        .collect();
    pack_polygons(trace(edges))
}

/// Walks directed edges into closed vertex cycles.
///
/// At every vertex the walk takes the sharpest left turn, which keeps faces that only
/// meet at a vertex apart.
fn cycles<F: Float>(edges: &[Segment<F>]) -> Vec<Vec<Point<F>>> {
    let mut outgoing: HashMap<&Point<F>, Vec<usize>> = HashMap::new();
    for (i, e) in edges.iter().enumerate() {
        outgoing.entry(&e.start).or_default().push(i);
    }
    let mut used = vec![false; edges.len()];
    let mut ret = Vec::new();

    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        used[first] = true;
        let mut cycle = vec![edges[first].start.clone()];
        let mut current = first;
        loop {
            let vertex = &edges[current].end;
            let back = &edges[current].start - vertex;
            let next = outgoing.get(vertex).and_then(|candidates| {
                candidates
                    .iter()
                    .copied()
                    .filter(|&i| i == first || !used[i])
                    .min_by(|&i, &j| {
                        clockwise_from(
                            &back,
                            &(&edges[i].end - vertex),
                            &(&edges[j].end - vertex),
                        )
                    })
            });
            match next {
                Some(next) if next == first => {
                    ret.push(cycle);
                    break;
                }
                Some(next) => {
                    used[next] = true;
                    cycle.push(vertex.clone());
                    current = next;
                }
                None => {
                    tracing::trace!(vertices = cycle.len(), "dropped an open chain");
                    break;
                }
            }
        }
    }
    ret
}

/// Splits a cycle that passes through some vertex more than once into simple cycles.
fn split_pinches<F: Float>(cycle: Vec<Point<F>>) -> Vec<Vec<Point<F>>> {
    let mut ret = Vec::new();
    let mut stack: Vec<Point<F>> = Vec::with_capacity(cycle.len());
    let mut positions: HashMap<Point<F>, usize> = HashMap::new();
    for vertex in cycle {
        if let Some(&at) = positions.get(&vertex) {
            let mut loop_vertices = vec![vertex];
            loop_vertices.extend(stack.drain(at + 1..));
            for v in &loop_vertices[1..] {
                positions.remove(v);
            }
            ret.push(loop_vertices);
        } else {
            positions.insert(vertex.clone(), stack.len());
            stack.push(vertex);
        }
    }
    ret.push(stack);
    ret
}

fn remove_collinear<F: Float>(vertices: Vec<Point<F>>) -> Vec<Point<F>> {
    let n = vertices.len();
    (0..n)
        .filter(|&i| {
            orientation(
                &vertices[(i + n - 1) % n],
                &vertices[i],
                &vertices[(i + 1) % n],
            ) != Orientation::Collinear
        })
        .map(|i| vertices[i].clone())
        .collect()
}

/// Turns directed boundary edges (interior on the left) into polygons.
pub(crate) fn trace<F: Float>(edges: Vec<Segment<F>>) -> Vec<Polygon<F>> {
    let zero = constant::<F>(0);
    let mut borders = Vec::new();
    let mut holes = Vec::new();
    for cycle in cycles(&edges) {
        for simple in split_pinches(cycle) {
            let simple = remove_collinear(simple);
            if simple.len() < 3 {
                continue;
            }
            let area = double_signed_area(&simple);
            if area > zero {
                borders.push((area, Contour::new(simple)));
            } else if area < zero {
                holes.push(Contour::new(simple));
            }
        }
    }
    tracing::trace!(
        borders = borders.len(),
        holes = holes.len(),
        "traced faces"
    );

    let mut assigned: Vec<Vec<Contour<F>>> = vec![Vec::new(); borders.len()];
    for hole in holes {
        let owner = borders
            .iter()
            .enumerate()
            .filter(|(_, (_, border))| hole_lies_in(&hole, border))
            .min_by(|(_, (a, _)), (_, (b, _))| a.cmp(b))
            .map(|(i, _)| i);
        match owner {
            Some(i) => assigned[i].push(hole),
            None => tracing::trace!(?hole, "dropped a hole without a border"),
        }
    }
    borders
        .into_iter()
        .zip(assigned)
        .map(|((_, border), holes)| Polygon::new(border, holes))
        .collect()
}

/// Whether `hole` is inside the region bounded by `border`, judged by the first of its
/// vertices (or edge midpoints) that isn't on the border.
fn hole_lies_in<F: Float>(hole: &Contour<F>, border: &Contour<F>) -> bool {
    let probes = hole
        .vertices()
        .iter()
        .cloned()
        .chain(hole.edges().map(|e| e.centroid()));
    for p in probes {
        match locate_in_edges(border.edges(), &p) {
            Location::Boundary => continue,
            location => return location == Location::Interior,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use malachite::Rational;

    fn p(x: i64, y: i64) -> Point<Rational> {
        Point::from((x, y))
    }

    fn rect(x0: i64, y0: i64, x1: i64, y1: i64) -> Polygon<Rational> {
        Polygon::new(
            Contour::new(vec![p(x0, y0), p(x1, y0), p(x1, y1), p(x0, y1)]),
            vec![],
        )
    }

    fn holed_square() -> Polygon<Rational> {
        Polygon::new(
            Contour::new(vec![p(0, 0), p(6, 0), p(6, 6), p(0, 6)]),
            vec![Contour::new(vec![p(2, 2), p(2, 4), p(4, 4), p(4, 2)])],
        )
    }

    #[test]
    fn relations() {
        let base = [rect(0, 0, 4, 4)];
        let cases = [
            (rect(5, 0, 6, 1), Relation::Disjoint),
            (rect(4, 4, 5, 5), Relation::Touch),
            (rect(4, 0, 5, 4), Relation::Touch),
            (rect(2, 2, 6, 6), Relation::Overlap),
            (rect(1, 1, 2, 2), Relation::Within),
            (rect(0, 0, 2, 2), Relation::Enclosed),
            (rect(-1, -1, 5, 5), Relation::Cover),
            (rect(0, 0, 4, 5), Relation::Encloses),
            (rect(0, 0, 4, 4), Relation::Equal),
        ];
        for (other, expected) in cases {
            let other = [other];
            assert_eq!(relate(&base, &other), expected, "{other:?}");
            assert_eq!(relate(&other, &base), expected.complement(), "{other:?}");
        }
    }

    #[test]
    fn components_of_multiregions() {
        let both = [rect(0, 0, 1, 1), rect(3, 3, 4, 4)];
        let one = [rect(0, 0, 1, 1)];
        assert_eq!(relate(&both, &one), Relation::Component);
        assert_eq!(relate(&one, &both), Relation::Composite);
    }

    #[test]
    fn hole_is_outside() {
        let holed = [holed_square()];
        assert_eq!(relate(&holed, &[rect(2, 2, 4, 4)]), Relation::Touch);
        assert_eq!(relate(&holed, &[rect(1, 1, 5, 5)]), Relation::Overlap);
        assert_eq!(relate(&holed, &[rect(0, 0, 1, 6)]), Relation::Enclosed);
    }

    #[test]
    fn union_of_neighbours_is_one_rectangle() {
        let result = union(&[rect(0, 0, 1, 1)], &[rect(1, 0, 2, 1)]);
        assert_eq!(result, Compound::Polygon(rect(0, 0, 2, 1)));
    }

    #[test]
    fn union_fills_the_hole() {
        let result = union(&[holed_square()], &[rect(2, 2, 4, 4)]);
        assert_eq!(result, Compound::Polygon(rect(0, 0, 6, 6)));
    }

    #[test]
    fn difference_cuts_a_hole() {
        let result = difference(&[rect(0, 0, 6, 6)], &[rect(2, 2, 4, 4)]);
        assert_eq!(result, Compound::Polygon(holed_square()));
    }

    #[test]
    fn intersection_of_touching_regions() {
        let edge = intersection(&[rect(0, 0, 1, 1)], &[rect(1, 0, 2, 1)]);
        assert_eq!(edge, Compound::Segment(Segment::new(p(1, 0), p(1, 1))));
        let corner = intersection(&[rect(0, 0, 1, 1)], &[rect(1, 1, 2, 2)]);
        assert_matches!(corner, Compound::Multipoint(ref mp) if mp.points() == [p(1, 1)]);
        let area = intersection(&[rect(0, 0, 2, 2)], &[rect(1, 1, 3, 3)]);
        assert_eq!(area, Compound::Polygon(rect(1, 1, 2, 2)));
    }

    #[test]
    fn pinched_faces_stay_apart() {
        let result = union(&[rect(0, 0, 1, 1)], &[rect(1, 1, 2, 2)]);
        assert_matches!(result, Compound::Multipolygon(ref mp) if mp.polygons().len() == 2);
    }

    #[test]
    fn symmetric_difference_of_overlapping_squares() {
        let result = symmetric_difference(&[rect(0, 0, 2, 2)], &[rect(1, 1, 3, 3)]);
        assert_matches!(result, Compound::Multipolygon(ref mp) if mp.polygons().len() == 2);
        assert_eq!(symmetric_difference(&[rect(0, 0, 2, 2)], &[rect(0, 0, 2, 2)]), Compound::Empty);
    }
}
