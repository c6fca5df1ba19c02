//! Relations and set operations between sets of curves.

use std::collections::{HashMap, HashSet};

use crate::{
    compound::Compound,
    geom::{angular_cmp, Point, Vector},
    num::Float,
    packing::{pack_mix, pack_points, pack_segments},
    relation::Relation,
    segment::Segment,
};

use super::fragment::{endpoints, fragment, merge};

struct Split<F> {
    left: Vec<Segment<F>>,
    right: Vec<Segment<F>>,
    left_set: HashSet<Segment<F>>,
    right_set: HashSet<Segment<F>>,
}

impl<F: Float> Split<F> {
    fn new(left: &[Segment<F>], right: &[Segment<F>]) -> Self {
        let (left, right) = fragment(left, right);
        let left_set = left.iter().cloned().collect();
        let right_set = right.iter().cloned().collect();
        Split {
            left,
            right,
            left_set,
            right_set,
        }
    }

    fn left_shared(&self) -> impl Iterator<Item = &Segment<F>> {
        self.left.iter().filter(|s| self.right_set.contains(s))
    }

    fn left_only(&self) -> impl Iterator<Item = &Segment<F>> {
        self.left.iter().filter(|s| !self.right_set.contains(s))
    }

    fn right_only(&self) -> impl Iterator<Item = &Segment<F>> {
        self.right.iter().filter(|s| !self.left_set.contains(s))
    }

    /// The points where the two sides meet without sharing a fragment there.
    fn contacts(&self) -> Vec<Point<F>> {
        let right_ends = endpoints(&self.right);
        let shared_ends = endpoints(&self.left_shared().cloned().collect::<Vec<_>>());
        let mut ret: Vec<_> = endpoints(&self.left)
            .into_iter()
            .filter(|p| right_ends.contains(p) && !shared_ends.contains(p))
            .collect();
        ret.sort();
        ret
    }
}

/// Directions of the fragments leaving `p`, grouped by point.
fn directions<F: Float>(fragments: &[Segment<F>]) -> HashMap<Point<F>, Vec<Vector<F>>> {
    let mut ret: HashMap<Point<F>, Vec<Vector<F>>> = HashMap::new();
    for s in fragments {
        ret.entry(s.start.clone())
            .or_default()
            .push(&s.end - &s.start);
        ret.entry(s.end.clone())
            .or_default()
            .push(&s.start - &s.end);
    }
    ret
}

/// Whether the `right` directions pass from one angular sector between `left`
/// directions into another.
fn interleave<F: Float>(left: &mut [Vector<F>], right: &[Vector<F>]) -> bool {
    if left.len() < 2 {
        return false;
    }
    left.sort_by(angular_cmp);
    let sector = |v: &Vector<F>| {
        let below = left.partition_point(|l| angular_cmp(l, v).is_lt());
        below % left.len()
    };
    let mut sectors = right.iter().map(sector);
    let Some(first) = sectors.next() else {
        return false;
    };
    sectors.any(|s| s != first)
}

/// How the curves `right` sit with respect to the curves `left`.
pub(crate) fn relate<F: Float>(left: &[Segment<F>], right: &[Segment<F>]) -> Relation {
    let split = Split::new(left, right);
    let left_covered = split.left.iter().all(|s| split.right_set.contains(s));
    let right_covered = split.right.iter().all(|s| split.left_set.contains(s));
    tracing::debug!(
        left = split.left.len(),
        right = split.right.len(),
        "relating curves"
    );
    if left_covered && right_covered {
        return Relation::Equal;
    } else if right_covered {
        return Relation::Component;
    } else if left_covered {
        return Relation::Composite;
    } else if split.left_shared().next().is_some() {
        return Relation::Overlap;
    }

    let contacts = split.contacts();
    if contacts.is_empty() {
        return Relation::Disjoint;
    }
    let mut left_directions = directions(&split.left);
    let right_directions = directions(&split.right);
    for p in &contacts {
        if let (Some(l), Some(r)) = (left_directions.get_mut(p), right_directions.get(p)) {
            if interleave(l, r) {
                return Relation::Cross;
            }
        }
    }
    Relation::Touch
}

pub(crate) fn intersection<F: Float>(left: &[Segment<F>], right: &[Segment<F>]) -> Compound<F> {
    let split = Split::new(left, right);
    let shared = merge(split.left_shared().cloned().collect());
    pack_mix(
        pack_points(split.contacts()),
        pack_segments(shared),
        Compound::Empty,
    )
}

pub(crate) fn union<F: Float>(left: &[Segment<F>], right: &[Segment<F>]) -> Compound<F> {
    let split = Split::new(left, right);
    let fragments = split
        .left
        .iter()
        .chain(split.right_only())
        .cloned()
        .collect();
    pack_segments(merge(fragments))
}

pub(crate) fn difference<F: Float>(left: &[Segment<F>], right: &[Segment<F>]) -> Compound<F> {
    let split = Split::new(left, right);
    pack_segments(merge(split.left_only().cloned().collect()))
}

pub(crate) fn symmetric_difference<F: Float>(
    left: &[Segment<F>],
    right: &[Segment<F>],
) -> Compound<F> {
    let split = Split::new(left, right);
    let fragments = split
        .left_only()
        .chain(split.right_only())
        .cloned()
        .collect();
    pack_segments(merge(fragments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multisegment::Multisegment;
    use assert_matches::assert_matches;
    use malachite::Rational;

    fn s(x0: i64, y0: i64, x1: i64, y1: i64) -> Segment<Rational> {
        Segment::new(Point::from((x0, y0)), Point::from((x1, y1)))
    }

    fn zigzag() -> Vec<Segment<Rational>> {
        vec![s(0, 0, 2, 2), s(2, 2, 4, 0)]
    }

    #[test]
    fn relations() {
        let base = zigzag();
        let cases = [
            (vec![s(0, 3, 4, 3)], Relation::Disjoint),
            (vec![s(0, 2, 4, 2)], Relation::Touch),
            (vec![s(2, 2, 2, 5)], Relation::Touch),
            (vec![s(0, 1, 4, 1)], Relation::Cross),
            // Passing through the apex from one side to the other.
            (vec![s(2, 0, 2, 4)], Relation::Cross),
            (vec![s(1, 1, 2, 2)], Relation::Component),
            (vec![s(-1, -1, 3, 3)], Relation::Overlap),
            (vec![s(-1, -1, 2, 2), s(2, 2, 5, -1)], Relation::Composite),
            (vec![s(4, 0, 2, 2), s(2, 2, 0, 0)], Relation::Equal),
        ];
        for (other, expected) in cases {
            assert_eq!(relate(&base, &other), expected, "{other:?}");
            assert_eq!(relate(&other, &base), expected.complement(), "{other:?}");
        }
    }

    #[test]
    fn intersection_keeps_isolated_points() {
        let result = intersection(&zigzag(), &[s(0, 1, 4, 1), s(1, 1, 1, 0)]);
        assert_matches!(result, Compound::Multipoint(ref mp) if mp.points().len() == 2);

        let with_overlap = intersection(&zigzag(), &[s(1, 1, 3, 3), s(3, 1, 5, 1)]);
        assert_matches!(with_overlap, Compound::Mix(_));
    }

    #[test]
    fn union_merges_collinear_pieces() {
        let result = union(&[s(0, 0, 2, 0)], &[s(1, 0, 4, 0)]);
        assert_eq!(result, Compound::Segment(s(0, 0, 4, 0)));
    }

    #[test]
    fn differences() {
        let result = difference(&zigzag(), &[s(1, 1, 3, 1)]);
        assert_eq!(result, Compound::Multisegment(Multisegment::new(zigzag())));
        let result = difference(&zigzag(), &[s(1, 1, 2, 2)]);
        assert_eq!(
            result,
            Compound::Multisegment(Multisegment::new(vec![s(0, 0, 1, 1), s(2, 2, 4, 0)]))
        );
        assert_eq!(symmetric_difference(&zigzag(), &zigzag()), Compound::Empty);
    }
}
