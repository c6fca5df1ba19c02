//! Set algebra and inclusion tests between compounds.
//!
//! The binary operators are available on both owned and borrowed compounds:
//! `&a & &b` is the intersection, `|` the union, `-` the difference and `^` the
//! symmetric difference. Every result is packed into the simplest representation, so
//! for example the intersection of two crossing segments is a `Multipoint`, not a
//! degenerate `Segment`.

use std::collections::HashSet;

use crate::{
    algorithms::{clip, linear, region},
    compound::{Compound, Dimension},
    geom::Point,
    multipoint::unique,
    num::Float,
    packing::{pack_mix, pack_points},
    relation::Relation,
    segment::{intersect, subtract, symmetric_subtract, unite},
    Error,
};

use Relation::*;

/// Puts a linear or shaped compound next to the points that it doesn't cover.
fn beside_points<F: Float>(points: &Compound<F>, x: &Compound<F>) -> Compound<F> {
    let rest = points.difference(x);
    match x.dimension() {
        Dimension::Linear => pack_mix(rest, x.clone(), Compound::Empty),
        _ => pack_mix(rest, Compound::Empty, x.clone()),
    }
}

/// Puts a shape next to the parts of a curve that stick out of it.
fn beside_shape<F: Float>(curve: &Compound<F>, shape: &Compound<F>) -> Compound<F> {
    pack_mix(Compound::Empty, curve.difference(shape), shape.clone())
}

fn filter_points<F: Float>(
    points: Vec<Point<F>>,
    keep: impl Fn(&Point<F>) -> bool,
) -> Compound<F> {
    pack_points(unique(points.into_iter().filter(|p| keep(p))))
}

impl<F: Float> Compound<F> {
    pub fn intersection(&self, other: &Compound<F>) -> Compound<F> {
        use Dimension::*;
        match (self, other) {
            (Compound::Mix(m), _) => return m.intersection(other),
            (_, Compound::Mix(m)) => return m.intersection(self),
            (Compound::Segment(a), Compound::Segment(b)) => return intersect(a, b),
            _ => {}
        }
        match (self.dimension(), other.dimension()) {
            (Empty, _) | (_, Empty) => Compound::Empty,
            (Discrete, _) => filter_points(self.points(), |p| other.contains(p)),
            (_, Discrete) => other.intersection(self),
            (Linear, Linear) => linear::intersection(&self.segments(), &other.segments()),
            (Shaped, Linear) => clip::intersection(&self.polygons(), &other.segments()),
            (Linear, Shaped) => other.intersection(self),
            (Shaped, Shaped) => region::intersection(&self.polygons(), &other.polygons()),
            (Mixed, _) | (_, Mixed) => unreachable!("mixes are handled above"),
        }
    }

    pub fn union(&self, other: &Compound<F>) -> Compound<F> {
        use Dimension::*;
        match (self, other) {
            (Compound::Empty, _) => return other.clone(),
            (_, Compound::Empty) => return self.clone(),
            (Compound::Mix(m), _) => return m.union(other),
            (_, Compound::Mix(m)) => return m.union(self),
            (Compound::Segment(a), Compound::Segment(b)) => return unite(a, b),
            _ => {}
        }
        match (self.dimension(), other.dimension()) {
            (Discrete, Discrete) => pack_points(unique(
                self.points().into_iter().chain(other.points()),
            )),
            (Discrete, _) => beside_points(self, other),
            (_, Discrete) => beside_points(other, self),
            (Linear, Linear) => linear::union(&self.segments(), &other.segments()),
            (Linear, Shaped) => beside_shape(self, other),
            (Shaped, Linear) => beside_shape(other, self),
            (Shaped, Shaped) => region::union(&self.polygons(), &other.polygons()),
            (Empty | Mixed, _) | (_, Empty | Mixed) => unreachable!("handled above"),
        }
    }

    pub fn difference(&self, other: &Compound<F>) -> Compound<F> {
        use Dimension::*;
        match (self, other) {
            (Compound::Empty, _) => return Compound::Empty,
            (_, Compound::Empty) => return self.clone(),
            (Compound::Mix(m), _) => return m.difference(other),
            (_, Compound::Mix(m)) => return m.subtracted_from(self),
            (Compound::Segment(a), Compound::Segment(b)) => return subtract(a, b),
            _ => {}
        }
        match (self.dimension(), other.dimension()) {
            (Discrete, _) => filter_points(self.points(), |p| !other.contains(p)),
            // Removing a set of lower dimension leaves the closure unchanged.
            (_, Discrete) | (Shaped, Linear) => self.clone(),
            (Linear, Linear) => linear::difference(&self.segments(), &other.segments()),
            (Linear, Shaped) => clip::difference(&self.segments(), &other.polygons()),
            (Shaped, Shaped) => region::difference(&self.polygons(), &other.polygons()),
            (Empty | Mixed, _) | (_, Empty | Mixed) => unreachable!("handled above"),
        }
    }

    pub fn symmetric_difference(&self, other: &Compound<F>) -> Compound<F> {
        use Dimension::*;
        match (self, other) {
            (Compound::Empty, _) => return other.clone(),
            (_, Compound::Empty) => return self.clone(),
            (Compound::Mix(m), _) => return m.symmetric_difference(other),
            (_, Compound::Mix(m)) => return m.symmetric_difference(self),
            (Compound::Segment(a), Compound::Segment(b)) => return symmetric_subtract(a, b),
            _ => {}
        }
        match (self.dimension(), other.dimension()) {
            (Discrete, Discrete) => {
                let (left, right) = (self.points(), other.points());
                let (left_set, right_set): (HashSet<_>, HashSet<_>) =
                    (left.iter().collect(), right.iter().collect());
                let only_left = left.iter().filter(|p| !right_set.contains(p));
                let only_right = right.iter().filter(|p| !left_set.contains(p));
                pack_points(unique(only_left.chain(only_right).cloned()))
            }
            (Discrete, _) => beside_points(self, other),
            (_, Discrete) => beside_points(other, self),
            (Linear, Linear) => {
                linear::symmetric_difference(&self.segments(), &other.segments())
            }
            (Linear, Shaped) => beside_shape(self, other),
            (Shaped, Linear) => beside_shape(other, self),
            (Shaped, Shaped) => {
                region::symmetric_difference(&self.polygons(), &other.polygons())
            }
            (Empty | Mixed, _) | (_, Empty | Mixed) => unreachable!("handled above"),
        }
    }

    fn point_set(&self) -> HashSet<Point<F>> {
        self.points().into_iter().collect()
    }

    fn is_segment(&self) -> bool {
        matches!(self, Compound::Segment(_))
    }

    /// Whether `self ⊇ other`, if `self` knows how to tell.
    fn try_superset(&self, other: &Compound<F>) -> Option<bool> {
        let relation = || self.relate(other);
        Some(match self {
            Compound::Empty => other.is_empty(),
            Compound::Point(_) | Compound::Multipoint(_) => {
                if !other.is_discrete() {
                    return None;
                }
                self.point_set().is_superset(&other.point_set())
            }
            Compound::Segment(_) => match other {
                Compound::Mix(_) => return None,
                _ if other.is_empty() || self == other => true,
                _ if other.is_discrete() => relation() == Component,
                _ if other.is_linear() => relation().is_one_of(&[Component, Equal]),
                _ => false,
            },
            Compound::Contour(_) => {
                if self == other {
                    true
                } else if other.is_linear() || other.is_discrete() {
                    relation().is_one_of(&[Component, Equal])
                } else {
                    return None;
                }
            }
            Compound::Multisegment(_) => match other {
                Compound::Empty => true,
                Compound::Contour(_) => return other.try_subset(self),
                Compound::Mix(_) => return None,
                _ if self == other => true,
                _ if other.is_discrete() => relation() == Component,
                _ if other.is_linear() => relation().is_one_of(&[Component, Equal]),
                _ => false,
            },
            Compound::Polygon(_) | Compound::Multipolygon(_) => {
                other.is_empty()
                    || self == other
                    || relation().is_one_of(&[Equal, Component, Enclosed, Within])
            }
            Compound::Mix(m) => {
                other.is_empty()
                    || self == other
                    || (mix_may_contain(m.shaped(), other)
                        && relation().is_one_of(&[Equal, Component, Enclosed, Within]))
            }
        })
    }

    /// Whether `self ⊋ other`, if `self` knows how to tell.
    fn try_strict_superset(&self, other: &Compound<F>) -> Option<bool> {
        let relation = || self.relate(other);
        Some(match self {
            Compound::Empty => false,
            Compound::Point(_) | Compound::Multipoint(_) => {
                if !other.is_discrete() {
                    return None;
                }
                let (mine, theirs) = (self.point_set(), other.point_set());
                mine.len() > theirs.len() && mine.is_superset(&theirs)
            }
            Compound::Segment(_) => match other {
                Compound::Mix(_) => return None,
                _ if other.is_empty() => true,
                _ if self == other => false,
                _ if other.is_discrete() || other.is_linear() => relation() == Component,
                _ => false,
            },
            Compound::Contour(_) => {
                if self == other {
                    false
                } else if other.is_linear() || other.is_discrete() {
                    relation() == Component
                } else {
                    return None;
                }
            }
            Compound::Multisegment(_) => match other {
                Compound::Empty => true,
                Compound::Contour(_) => return other.try_strict_subset(self),
                Compound::Mix(_) => return None,
                _ if self == other => false,
                _ if other.is_discrete() || other.is_linear() => relation() == Component,
                _ => false,
            },
            Compound::Polygon(_) | Compound::Multipolygon(_) => {
                other.is_empty()
                    || (self != other && relation().is_one_of(&[Component, Enclosed, Within]))
            }
            Compound::Mix(m) => {
                other.is_empty()
                    || (self != other
                        && mix_may_contain(m.shaped(), other)
                        && relation().is_one_of(&[Component, Enclosed, Within]))
            }
        })
    }

    /// Whether `self ⊆ other`, if `self` knows how to tell.
    fn try_subset(&self, other: &Compound<F>) -> Option<bool> {
        let relation = || self.relate(other);
        Some(match self {
            Compound::Empty => true,
            Compound::Point(_) | Compound::Multipoint(_) => {
                if !other.is_discrete() {
                    return None;
                }
                self.point_set().is_subset(&other.point_set())
            }
            Compound::Segment(_) | Compound::Multisegment(_) => {
                if self == other {
                    true
                } else if other.is_discrete() {
                    false
                } else if other.is_linear() {
                    relation().is_one_of(&[Equal, Composite])
                } else {
                    return None;
                }
            }
            Compound::Contour(_) => {
                if self == other {
                    true
                } else if other.is_discrete() {
                    false
                } else if other.is_linear() {
                    !other.is_segment() && relation().is_one_of(&[Equal, Composite])
                } else {
                    return None;
                }
            }
            Compound::Polygon(_) | Compound::Multipolygon(_) => {
                if self == other {
                    true
                } else if other.is_discrete() || other.is_linear() {
                    false
                } else if other.is_shaped() {
                    relation().is_one_of(&[Cover, Encloses, Composite, Equal])
                } else {
                    return None;
                }
            }
            Compound::Mix(m) => {
                self == other
                    || (mix_may_lie_in(m.shaped(), other)
                        && relation().is_one_of(&[Cover, Encloses, Composite, Equal]))
            }
        })
    }

    /// Whether `self ⊊ other`, if `self` knows how to tell.
    fn try_strict_subset(&self, other: &Compound<F>) -> Option<bool> {
        let relation = || self.relate(other);
        Some(match self {
            Compound::Empty => !other.is_empty(),
            Compound::Point(_) | Compound::Multipoint(_) => {
                if !other.is_discrete() {
                    return None;
                }
                let (mine, theirs) = (self.point_set(), other.point_set());
                mine.len() < theirs.len() && mine.is_subset(&theirs)
            }
            Compound::Segment(_) | Compound::Multisegment(_) => {
                if self == other || other.is_discrete() {
                    false
                } else if other.is_linear() {
                    relation() == Composite
                } else {
                    return None;
                }
            }
            Compound::Contour(_) => {
                if self == other || other.is_discrete() {
                    false
                } else if other.is_linear() {
                    !other.is_segment() && relation() == Composite
                } else {
                    return None;
                }
            }
            Compound::Polygon(_) | Compound::Multipolygon(_) => {
                if self == other || other.is_discrete() || other.is_linear() {
                    false
                } else if other.is_shaped() {
                    relation().is_one_of(&[Cover, Encloses, Composite])
                } else {
                    return None;
                }
            }
            Compound::Mix(m) => {
                self != other
                    && mix_may_lie_in(m.shaped(), other)
                    && relation().is_one_of(&[Cover, Encloses, Composite])
            }
        })
    }

    fn compare(
        &self,
        other: &Compound<F>,
        operation: &'static str,
        forward: impl Fn(&Compound<F>, &Compound<F>) -> Option<bool>,
        reflected: impl Fn(&Compound<F>, &Compound<F>) -> Option<bool>,
    ) -> Result<bool, Error> {
        forward(self, other)
            .or_else(|| reflected(other, self))
            .ok_or(Error::Unsupported {
                operation,
                left: self.kind_name(),
                right: other.kind_name(),
            })
    }

    /// Whether every point of `other` belongs to `self`.
    pub fn is_superset_of(&self, other: &Compound<F>) -> Result<bool, Error> {
        self.compare(
            other,
            "is_superset_of",
            Self::try_superset,
            Self::try_subset,
        )
    }

    pub fn is_strict_superset_of(&self, other: &Compound<F>) -> Result<bool, Error> {
        self.compare(
            other,
            "is_strict_superset_of",
            Self::try_strict_superset,
            Self::try_strict_subset,
        )
    }

    /// Whether every point of `self` belongs to `other`.
    pub fn is_subset_of(&self, other: &Compound<F>) -> Result<bool, Error> {
        self.compare(other, "is_subset_of", Self::try_subset, Self::try_superset)
    }

    pub fn is_strict_subset_of(&self, other: &Compound<F>) -> Result<bool, Error> {
        self.compare(
            other,
            "is_strict_subset_of",
            Self::try_strict_subset,
            Self::try_strict_superset,
        )
    }
}

/// A mix can only contain `other` if it has a shaped component or `other` has none.
fn mix_may_contain<F: Float>(shaped: &Compound<F>, other: &Compound<F>) -> bool {
    let other_has_no_shape = match other {
        Compound::Mix(m) => m.shaped().is_empty(),
        _ => !other.is_shaped(),
    };
    !shaped.is_empty() || other_has_no_shape
}

/// A mix can only lie in `other` if `other` is at least as rich in dimensions.
fn mix_may_lie_in<F: Float>(shaped: &Compound<F>, other: &Compound<F>) -> bool {
    let other_has_shape = match other {
        Compound::Mix(m) => !m.shaped().is_empty(),
        _ => !other.is_linear(),
    };
    !other.is_discrete() && (shaped.is_empty() || other_has_shape)
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $op:ident) => {
        impl<'a, F: Float> std::ops::$trait<&'a Compound<F>> for &'a Compound<F> {
            type Output = Compound<F>;

            fn $method(self, rhs: &'a Compound<F>) -> Compound<F> {
                self.$op(rhs)
            }
        }

        impl<F: Float> std::ops::$trait for Compound<F> {
            type Output = Compound<F>;

            fn $method(self, rhs: Compound<F>) -> Compound<F> {
                self.$op(&rhs)
            }
        }
    };
}

binary_op!(BitAnd, bitand, intersection);
binary_op!(BitOr, bitor, union);
binary_op!(Sub, sub, difference);
binary_op!(BitXor, bitxor, symmetric_difference);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        contour::Contour, multipoint::Multipoint, multisegment::Multisegment,
        polygon::Polygon, segment::Segment,
    };
    use assert_matches::assert_matches;
    use malachite::Rational;

    fn p(x: i64, y: i64) -> Point<Rational> {
        Point::from((x, y))
    }

    fn points(coords: &[(i64, i64)]) -> Compound<Rational> {
        Compound::Multipoint(Multipoint::new(
            coords.iter().map(|&c| Point::from(c)).collect(),
        ))
    }

    fn seg(x0: i64, y0: i64, x1: i64, y1: i64) -> Segment<Rational> {
        Segment::new(p(x0, y0), p(x1, y1))
    }

    fn segment(x0: i64, y0: i64, x1: i64, y1: i64) -> Compound<Rational> {
        Compound::Segment(seg(x0, y0, x1, y1))
    }

    fn square(x: i64, y: i64, side: i64) -> Compound<Rational> {
        Compound::Polygon(Polygon::new(
            Contour::new(vec![
                p(x, y),
                p(x + side, y),
                p(x + side, y + side),
                p(x, y + side),
            ]),
            vec![],
        ))
    }

    #[test]
    fn empty_is_neutral() {
        let shape = square(0, 0, 2);
        let empty = Compound::Empty;
        assert_eq!(&shape | &empty, shape);
        assert_eq!(&empty | &shape, shape);
        assert_eq!(&shape & &empty, empty);
        assert_eq!(&shape - &empty, shape);
        assert_eq!(&empty - &shape, empty);
        assert_eq!(&shape ^ &empty, shape);
    }

    #[test]
    fn crossing_segments_meet_in_a_point() {
        assert_eq!(
            segment(0, 0, 2, 2) & segment(0, 2, 2, 0),
            points(&[(1, 1)])
        );
    }

    #[test]
    fn points_against_shapes() {
        let shape = square(0, 0, 2);
        let cloud = points(&[(1, 1), (5, 5)]);
        assert_eq!(&cloud & &shape, points(&[(1, 1)]));
        assert_eq!(&cloud - &shape, points(&[(5, 5)]));
        assert_eq!(&shape - &cloud, shape);
        assert_eq!(
            &cloud | &shape,
            Compound::Mix(crate::mix::Mix::new(
                points(&[(5, 5)]),
                Compound::Empty,
                shape.clone()
            ))
        );
        assert_eq!(&cloud | &shape, &cloud ^ &shape);
    }

    #[test]
    fn curve_against_shape() {
        let shape = square(0, 0, 2);
        let curve = segment(1, 1, 4, 1);
        assert_eq!(&curve & &shape, segment(1, 1, 2, 1));
        assert_eq!(&curve - &shape, segment(2, 1, 4, 1));
        assert_eq!(&shape - &curve, shape);
        assert_eq!(
            &curve | &shape,
            Compound::Mix(crate::mix::Mix::new(
                Compound::Empty,
                segment(2, 1, 4, 1),
                shape.clone()
            ))
        );
    }

    #[test]
    fn discrete_symmetric_difference() {
        assert_eq!(
            points(&[(0, 0), (1, 1)]) ^ points(&[(1, 1), (2, 2)]),
            points(&[(0, 0), (2, 2)])
        );
        assert_eq!(
            points(&[(0, 0)]) ^ points(&[(0, 0)]),
            Compound::Empty
        );
    }

    #[test]
    fn shapes() {
        let left = square(0, 0, 2);
        let right = square(2, 0, 2);
        let united = &left | &right;
        assert_matches!(&united, Compound::Polygon(p) if p.area() == Rational::from(8));
        assert_eq!(&left & &right, segment(2, 0, 2, 2));
        assert_eq!(&united - &right, left);
    }

    #[test]
    fn inclusion() {
        let shape = square(0, 0, 4);
        let inner = square(1, 1, 2);
        assert!(shape.is_superset_of(&inner).unwrap());
        assert!(shape.is_strict_superset_of(&inner).unwrap());
        assert!(inner.is_subset_of(&shape).unwrap());
        assert!(shape.is_superset_of(&shape).unwrap());
        assert!(!shape.is_strict_superset_of(&shape).unwrap());
        assert!(shape.is_superset_of(&segment(0, 0, 4, 0)).unwrap());
        assert!(shape.is_superset_of(&points(&[(1, 1), (0, 0)])).unwrap());
        assert!(!shape.is_superset_of(&points(&[(1, 1), (5, 5)])).unwrap());

        // Reflected: a multipoint has no opinion about polygons.
        assert!(points(&[(1, 1)]).is_subset_of(&shape).unwrap());
        assert!(!points(&[(1, 1)]).is_superset_of(&shape).unwrap());

        let long = Compound::Multisegment(Multisegment::new(vec![
            seg(0, 0, 2, 0),
            seg(2, 0, 4, 0),
        ]));
        assert!(long.is_superset_of(&segment(1, 0, 3, 0)).unwrap());
        assert!(segment(1, 0, 3, 0).is_strict_subset_of(&long).unwrap());
        assert!(!segment(1, 0, 3, 0).is_subset_of(&points(&[(1, 0)])).unwrap());

        let empty = Compound::Empty;
        assert!(empty.is_subset_of(&shape).unwrap());
        assert!(empty.is_strict_subset_of(&shape).unwrap());
        assert!(shape.is_strict_superset_of(&empty).unwrap());
        assert!(!empty.is_strict_subset_of(&empty).unwrap());
    }

    #[test]
    fn segment_includes_curves_either_way_round() {
        let whole = segment(0, 0, 3, 0);
        let pieces = Compound::Multisegment(Multisegment::new(vec![
            seg(0, 0, 1, 0),
            seg(2, 0, 3, 0),
        ]));
        assert!(whole.is_superset_of(&pieces).unwrap());
        assert!(whole.is_strict_superset_of(&pieces).unwrap());
        assert!(pieces.is_subset_of(&whole).unwrap());
        assert!(pieces.is_strict_subset_of(&whole).unwrap());

        let long = segment(0, 0, 4, 0);
        let other = Compound::Multisegment(Multisegment::new(vec![
            seg(1, 0, 2, 0),
            seg(3, 0, 5, 0),
        ]));
        let common = &long & &other;
        assert!(common.is_subset_of(&long).unwrap());
        assert!(long.is_superset_of(&common).unwrap());

        let split = Compound::Multisegment(Multisegment::new(vec![
            seg(0, 0, 2, 0),
            seg(2, 0, 4, 0),
        ]));
        assert!(long.is_superset_of(&split).unwrap());
        assert!(split.is_superset_of(&long).unwrap());
        assert!(!long.is_strict_superset_of(&split).unwrap());

        let mix = &points(&[(3, 0)]) | &segment(0, 0, 1, 0);
        assert_matches!(mix, Compound::Mix(_));
        assert!(long.is_superset_of(&mix).unwrap());
        assert!(mix.is_subset_of(&long).unwrap());
        assert!(!segment(0, 0, 2, 0).is_superset_of(&mix).unwrap());
    }
}
