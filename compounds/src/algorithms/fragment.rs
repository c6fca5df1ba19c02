//! Splitting segment sets at their mutual intersections.
//!
//! After splitting, two fragments either coincide, meet at endpoints, or are disjoint.
//! Everything the engines decide is decided on fragments.

use std::collections::{HashMap, HashSet};

use crate::{
    geom::{orientation, Orientation, Point},
    index::{BBox, BoxTree},
    num::Float,
    relation::Relation,
    segment::{intersection_point, Segment},
};

/// The points strictly inside `segment` where `other` meets it.
fn split_points<F: Float>(segment: &Segment<F>, other: &Segment<F>) -> Vec<Point<F>> {
    let strictly_inside = |p: &Point<F>| *p != segment.start && *p != segment.end;
    match segment.relate(other) {
        Relation::Disjoint | Relation::Equal | Relation::Composite => Vec::new(),
        Relation::Touch | Relation::Cross => {
            let p = intersection_point(segment, other);
            if strictly_inside(&p) {
                vec![p]
            } else {
                Vec::new()
            }
        }
        _ => [&other.start, &other.end]
            .into_iter()
            .filter(|p| strictly_inside(p) && segment.contains(p))
            .cloned()
            .collect(),
    }
}

/// Cuts `segment` at `points`, keeping its direction.
fn cut<F: Float>(segment: &Segment<F>, mut points: Vec<Point<F>>) -> Vec<Segment<F>> {
    if points.is_empty() {
        return vec![segment.clone()];
    }
    // Collinear points are ordered along the line by their lexicographic order.
    points.sort();
    points.dedup();
    if segment.start > segment.end {
        points.reverse();
    }
    let mut ret = Vec::with_capacity(points.len() + 1);
    let mut start = segment.start.clone();
    for p in points {
        ret.push(Segment::new(start, p.clone()));
        start = p;
    }
    ret.push(Segment::new(start, segment.end.clone()));
    ret
}

/// Splits both segment sets at every point where any two of their segments meet.
///
/// Fragments keep the direction of the segment they were cut from.
pub(crate) fn fragment<F: Float>(
    left: &[Segment<F>],
    right: &[Segment<F>],
) -> (Vec<Segment<F>>, Vec<Segment<F>>) {
    let all: Vec<&Segment<F>> = left.iter().chain(right).collect();
    let boxes: Vec<_> = all.iter().map(|s| BBox::of_segment(s)).collect();
    let tree = BoxTree::new(boxes.clone());

    let mut pieces = all.iter().enumerate().map(|(i, segment)| {
        let mut points = Vec::new();
        tree.visit(
            |b| b.intersects(&boxes[i]),
            |j| {
                if j != i {
                    points.extend(split_points(segment, all[j]));
                }
            },
        );
        cut(segment, points)
    });
    let left_fragments = pieces.by_ref().take(left.len()).flatten().collect();
    let right_fragments = pieces.flatten().collect();
    tracing::trace!(left = left.len(), right = right.len(), "fragmented");
    (left_fragments, right_fragments)
}

/// Whether any two of `segments` cross or overlap, as opposed to being disjoint or
/// touching at a single point.
pub(crate) fn cross_or_overlap<F: Float>(segments: &[Segment<F>]) -> bool {
    let boxes: Vec<_> = segments.iter().map(BBox::of_segment).collect();
    let tree = BoxTree::new(boxes.clone());
    tree.intersecting_pairs(&boxes).into_iter().any(|(i, j)| {
        !segments[i]
            .relate(&segments[j])
            .is_one_of(&[Relation::Disjoint, Relation::Touch])
    })
}

/// The endpoints of a set of fragments.
pub(crate) fn endpoints<F: Float>(fragments: &[Segment<F>]) -> HashSet<Point<F>> {
    fragments
        .iter()
        .flat_map(|s| [s.start.clone(), s.end.clone()])
        .collect()
}

/// Joins fragments that continue each other in a straight line.
///
/// Two fragments are joined at a point only if nothing else ends there, so this
/// undoes the splitting done by [`fragment`] wherever it is no longer needed.
pub(crate) fn merge<F: Float>(fragments: Vec<Segment<F>>) -> Vec<Segment<F>> {
    let mut unique = HashSet::new();
    let mut segments: Vec<Option<Segment<F>>> = fragments
        .into_iter()
        .filter(|s| unique.insert(s.clone()))
        .map(Some)
        .collect();

    let mut incident: HashMap<Point<F>, Vec<usize>> = HashMap::new();
    for (i, s) in segments.iter().flatten().enumerate() {
        incident.entry(s.start.clone()).or_default().push(i);
        incident.entry(s.end.clone()).or_default().push(i);
    }

    let mut vertices: Vec<_> = incident.into_iter().collect();
    // Visit the joints in a fixed order, so that equal inputs merge identically.
    vertices.sort_by(|a, b| a.0.cmp(&b.0));
    let mut owner: Vec<usize> = (0..segments.len()).collect();
    let find = |owner: &mut Vec<usize>, mut i: usize| {
        while owner[i] != i {
            i = owner[i];
        }
        i
    };
    for (vertex, at) in vertices {
        let [i, j] = at.as_slice() else { continue };
        let (i, j) = (find(&mut owner, *i), find(&mut owner, *j));
        if i == j {
            continue;
        }
        let (Some(a), Some(b)) = (segments[i].clone(), segments[j].clone()) else {
            continue;
        };
        let far_a = if a.start == vertex { &a.end } else { &a.start };
        let far_b = if b.start == vertex { &b.end } else { &b.start };
        if orientation(far_a, &vertex, far_b) != Orientation::Collinear {
            continue;
        }
        // Keep the direction of the piece that reaches the joint first.
        let joined = if a.end == vertex {
            Segment::new(a.start.clone(), far_b.clone())
        } else if b.end == vertex {
            Segment::new(b.start.clone(), far_a.clone())
        } else {
            Segment::new(far_a.clone(), far_b.clone())
        };
        segments[i] = Some(joined);
        segments[j] = None;
        owner[j] = i;
    }
    segments.into_iter().flatten().collect()
}
