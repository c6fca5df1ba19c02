//! The closed sum of all geometries, and the pairwise dispatch between them.
//!
//! Every geometry falls into one of three dimensions: discrete (points), linear
//! (segments and contours) and shaped (polygons). Pairwise algorithms are written once per
//! unordered pair of dimensions; the other order takes the complement.

use std::hash::{Hash, Hasher};

use crate::{
    algorithms::{clip, linear, region},
    contour::Contour,
    geom::Point,
    mix::Mix,
    multipoint::{relate_points, Multipoint},
    multipolygon::Multipolygon,
    multisegment::Multisegment,
    num::Float,
    polygon::Polygon,
    relation::{Location, Relation},
    segment::Segment,
    Error,
};

/// Any geometry.
#[derive(Clone, Debug)]
pub enum Compound<F> {
    /// The empty set.
    Empty,
    Point(Point<F>),
    Multipoint(Multipoint<F>),
    Segment(Segment<F>),
    Multisegment(Multisegment<F>),
    Contour(Contour<F>),
    Polygon(Polygon<F>),
    Multipolygon(Multipolygon<F>),
    Mix(Mix<F>),
}

impl<F: Float> PartialEq for Compound<F> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Compound::Empty, Compound::Empty) => true,
            (Compound::Point(a), Compound::Point(b)) => a == b,
            (Compound::Multipoint(a), Compound::Multipoint(b)) => a == b,
            (Compound::Segment(a), Compound::Segment(b)) => a == b,
            (Compound::Multisegment(a), Compound::Multisegment(b)) => a == b,
            (Compound::Contour(a), Compound::Contour(b)) => a == b,
            (Compound::Polygon(a), Compound::Polygon(b)) => a == b,
            (Compound::Multipolygon(a), Compound::Multipolygon(b)) => a == b,
            (Compound::Mix(a), Compound::Mix(b)) => a == b,
            _ => false,
        }
    }
}

impl<F: Float> Eq for Compound<F> {}

impl<F: Float> Hash for Compound<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Compound::Empty => {}
            Compound::Point(p) => p.hash(state),
            Compound::Multipoint(m) => m.hash(state),
            Compound::Segment(s) => s.hash(state),
            Compound::Multisegment(m) => m.hash(state),
            Compound::Contour(c) => c.hash(state),
            Compound::Polygon(p) => p.hash(state),
            Compound::Multipolygon(m) => m.hash(state),
            Compound::Mix(m) => m.hash(state),
        }
    }
}

macro_rules! from_variant {
    ($($variant:ident),*) => {
        $(
            impl<F> From<$variant<F>> for Compound<F> {
                fn from(x: $variant<F>) -> Self {
                    Compound::$variant(x)
                }
            }
        )*
    };
}

from_variant!(Point, Multipoint, Segment, Multisegment, Contour, Polygon, Multipolygon, Mix);

/// The dimension of a compound, which decides the algorithms that apply to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Dimension {
    Empty,
    Discrete,
    Linear,
    Shaped,
    Mixed,
}

impl<F: Float> Compound<F> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Compound::Empty)
    }

    pub(crate) fn dimension(&self) -> Dimension {
        match self {
            Compound::Empty => Dimension::Empty,
            Compound::Point(_) | Compound::Multipoint(_) => Dimension::Discrete,
            Compound::Segment(_) | Compound::Multisegment(_) | Compound::Contour(_) => {
                Dimension::Linear
            }
            Compound::Polygon(_) | Compound::Multipolygon(_) => Dimension::Shaped,
            Compound::Mix(_) => Dimension::Mixed,
        }
    }

    /// Points, multipoints.
    pub fn is_discrete(&self) -> bool {
        self.dimension() == Dimension::Discrete
    }

    /// Segments, multisegments and contours.
    pub fn is_linear(&self) -> bool {
        self.dimension() == Dimension::Linear
    }

    /// Polygons and multipolygons.
    pub fn is_shaped(&self) -> bool {
        self.dimension() == Dimension::Shaped
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Compound::Empty => "Empty",
            Compound::Point(_) => "Point",
            Compound::Multipoint(_) => "Multipoint",
            Compound::Segment(_) => "Segment",
            Compound::Multisegment(_) => "Multisegment",
            Compound::Contour(_) => "Contour",
            Compound::Polygon(_) => "Polygon",
            Compound::Multipolygon(_) => "Multipolygon",
            Compound::Mix(_) => "Mix",
        }
    }

    /// The points of a discrete compound.
    pub(crate) fn points(&self) -> Vec<Point<F>> {
        match self {
            Compound::Point(p) => vec![p.clone()],
            Compound::Multipoint(m) => m.points().to_vec(),
            _ => Vec::new(),
        }
    }

    /// The segments of a linear compound; a contour contributes its edges.
    pub(crate) fn segments(&self) -> Vec<Segment<F>> {
        match self {
            Compound::Segment(s) => vec![s.clone()],
            Compound::Multisegment(m) => m.segments().to_vec(),
            Compound::Contour(c) => c.segments(),
            _ => Vec::new(),
        }
    }

    /// The polygons of a shaped compound.
    pub(crate) fn polygons(&self) -> Vec<Polygon<F>> {
        match self {
            Compound::Polygon(p) => vec![p.clone()],
            Compound::Multipolygon(m) => m.polygons().to_vec(),
            _ => Vec::new(),
        }
    }

    pub fn locate(&self, p: &Point<F>) -> Location {
        match self {
            Compound::Empty => Location::Exterior,
            Compound::Point(q) => {
                if p == q {
                    Location::Boundary
                } else {
                    Location::Exterior
                }
            }
            Compound::Multipoint(m) => m.locate(p),
            Compound::Segment(s) => s.locate(p),
            Compound::Multisegment(m) => m.locate(p),
            Compound::Contour(c) => c.locate(p),
            Compound::Polygon(polygon) => polygon.locate(p),
            Compound::Multipolygon(m) => m.locate(p),
            Compound::Mix(m) => m.locate(p),
        }
    }

    pub fn contains(&self, p: &Point<F>) -> bool {
        self.locate(p) != Location::Exterior
    }

    /// How `other` sits with respect to `self`.
    pub fn relate(&self, other: &Compound<F>) -> Relation {
        use Dimension::*;
        match (self.dimension(), other.dimension()) {
            (Empty, _) | (_, Empty) => Relation::Disjoint,
            (Mixed, _) => self.as_mix().map_or(Relation::Disjoint, |m| m.relate(other)),
            (_, Mixed) => other.relate(self).complement(),
            (Discrete, Discrete) => {
                Multipoint::new(self.points()).relate(&Multipoint::new(other.points()))
            }
            (Discrete, _) => relate_points(&self.points(), |p| other.locate(p)),
            (_, Discrete) => other.relate(self).complement(),
            (Linear, Linear) => match (self, other) {
                (Compound::Segment(a), Compound::Segment(b)) => a.relate(b),
                _ => linear::relate(&self.segments(), &other.segments()),
            },
            (Shaped, Linear) => clip::relate(&self.polygons(), &other.segments()),
            (Linear, Shaped) => other.relate(self).complement(),
            (Shaped, Shaped) => region::relate(&self.polygons(), &other.polygons()),
        }
    }

    pub fn disjoint(&self, other: &Compound<F>) -> bool {
        self.relate(other) == Relation::Disjoint
    }

    pub(crate) fn as_mix(&self) -> Option<&Mix<F>> {
        match self {
            Compound::Mix(m) => Some(m),
            _ => None,
        }
    }

    pub fn centroid(&self) -> Result<Point<F>, Error> {
        match self {
            Compound::Empty => Err(Error::Empty {
                operation: "centroid",
            }),
            Compound::Point(p) => Ok(p.clone()),
            Compound::Multipoint(m) => m.centroid(),
            Compound::Segment(s) => Ok(s.centroid()),
            Compound::Multisegment(m) => m.centroid(),
            Compound::Contour(c) => c.centroid(),
            Compound::Polygon(p) => p.centroid(),
            Compound::Multipolygon(m) => m.centroid(),
            Compound::Mix(m) => m.centroid(),
        }
    }

    /// The squared distance from `p` to the nearest point of the compound, or `None`
    /// for the empty set.
    pub(crate) fn squared_distance_to_point(&self, p: &Point<F>) -> Option<F> {
        match self {
            Compound::Empty => None,
            Compound::Point(q) => Some(q.squared_distance_to(p)),
            Compound::Multipoint(m) => m.squared_distance_to_point(p),
            Compound::Segment(s) => Some(s.squared_distance_to_point(p)),
            Compound::Multisegment(m) => m.squared_distance_to_point(p),
            Compound::Contour(c) => c.squared_distance_to_point(p),
            Compound::Polygon(polygon) => Some(polygon.squared_distance_to_point(p)),
            Compound::Multipolygon(m) => m.squared_distance_to_point(p),
            Compound::Mix(m) => m
                .components()
                .filter_map(|c| c.squared_distance_to_point(p))
                .min(),
        }
    }

    pub(crate) fn squared_distance_to_segment(&self, s: &Segment<F>) -> Option<F> {
        match self {
            Compound::Empty => None,
            Compound::Point(q) => Some(s.squared_distance_to_point(q)),
            Compound::Multipoint(m) => m.squared_distance_to_segment(s),
            Compound::Segment(t) => Some(t.squared_distance_to_segment(s)),
            Compound::Multisegment(m) => m.squared_distance_to_segment(s),
            Compound::Contour(c) => c.squared_distance_to_segment(s),
            Compound::Polygon(polygon) => Some(polygon.squared_distance_to_segment(s)),
            Compound::Multipolygon(m) => m.squared_distance_to_segment(s),
            Compound::Mix(m) => m
                .components()
                .filter_map(|c| c.squared_distance_to_segment(s))
                .min(),
        }
    }

    fn squared_distance(&self, other: &Compound<F>) -> Option<F> {
        use Dimension::*;
        match (self.dimension(), other.dimension()) {
            (Empty, _) | (_, Empty) => None,
            (Mixed, _) => self
                .as_mix()?
                .components()
                .filter_map(|c| c.squared_distance(other))
                .min(),
            (_, Mixed) => other.squared_distance(self),
            (Discrete, _) => self
                .points()
                .iter()
                .filter_map(|p| other.squared_distance_to_point(p))
                .min(),
            (_, Discrete) => other.squared_distance(self),
            (Linear, _) => self
                .segments()
                .iter()
                .filter_map(|s| other.squared_distance_to_segment(s))
                .min(),
            (_, Linear) => other.squared_distance(self),
            (Shaped, Shaped) => {
                let edges = |c: &Compound<F>| -> Vec<Segment<F>> {
                    c.polygons().iter().flat_map(|p| p.edges()).collect()
                };
                let forward = edges(self)
                    .iter()
                    .filter_map(|e| other.squared_distance_to_segment(e))
                    .min();
                let backward = edges(other)
                    .iter()
                    .filter_map(|e| self.squared_distance_to_segment(e))
                    .min();
                forward.into_iter().chain(backward).min()
            }
        }
    }

    /// The Euclidean distance between the two point sets: zero if they meet.
    pub fn distance_to(&self, other: &Compound<F>) -> Result<F, Error> {
        self.squared_distance(other)
            .map(|d| d.sqrt())
            .ok_or(Error::Empty {
                operation: "distance_to",
            })
    }

    pub fn translate(&self, step_x: &F, step_y: &F) -> Compound<F> {
        match self {
            Compound::Empty => Compound::Empty,
            Compound::Point(p) => Compound::Point(p.translate(step_x, step_y)),
            Compound::Multipoint(m) => Compound::Multipoint(m.translate(step_x, step_y)),
            Compound::Segment(s) => Compound::Segment(s.translate(step_x, step_y)),
            Compound::Multisegment(m) => Compound::Multisegment(m.translate(step_x, step_y)),
            Compound::Contour(c) => Compound::Contour(c.translate(step_x, step_y)),
            Compound::Polygon(p) => Compound::Polygon(p.translate(step_x, step_y)),
            Compound::Multipolygon(m) => Compound::Multipolygon(m.translate(step_x, step_y)),
            Compound::Mix(m) => Compound::Mix(m.translate(step_x, step_y)),
        }
    }

    /// Rotates by the angle with the given cosine and sine, around `center` or the
    /// origin.
    pub fn rotate(&self, cosine: &F, sine: &F, center: Option<&Point<F>>) -> Compound<F> {
        match self {
            Compound::Empty => Compound::Empty,
            Compound::Point(p) => Compound::Point(p.rotate(cosine, sine, center)),
            Compound::Multipoint(m) => Compound::Multipoint(m.rotate(cosine, sine, center)),
            Compound::Segment(s) => Compound::Segment(s.rotate(cosine, sine, center)),
            Compound::Multisegment(m) => {
                Compound::Multisegment(m.rotate(cosine, sine, center))
            }
            Compound::Contour(c) => Compound::Contour(c.rotate(cosine, sine, center)),
            Compound::Polygon(p) => Compound::Polygon(p.rotate(cosine, sine, center)),
            Compound::Multipolygon(m) => {
                Compound::Multipolygon(m.rotate(cosine, sine, center))
            }
            Compound::Mix(m) => Compound::Mix(m.rotate(cosine, sine, center)),
        }
    }

    /// Scales along the axes. Zero factors can collapse the compound into a lower
    /// dimension.
    pub fn scale(&self, factor_x: &F, factor_y: &F) -> Compound<F> {
        match self {
            Compound::Empty => Compound::Empty,
            Compound::Point(p) => Compound::Point(p.scale(factor_x, factor_y)),
            Compound::Multipoint(m) => Compound::Multipoint(m.scale(factor_x, factor_y)),
            Compound::Segment(s) => s.scale(factor_x, factor_y),
            Compound::Multisegment(m) => m.scale(factor_x, factor_y),
            Compound::Contour(c) => c.scale(factor_x, factor_y),
            Compound::Polygon(p) => p.scale(factor_x, factor_y),
            Compound::Multipolygon(m) => m.scale(factor_x, factor_y),
            Compound::Mix(m) => m.scale(factor_x, factor_y),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Compound::Empty => Ok(()),
            Compound::Point(p) => p.validate(),
            Compound::Multipoint(m) => m.validate(),
            Compound::Segment(s) => s.validate(),
            Compound::Multisegment(m) => m.validate(),
            Compound::Contour(c) => c.validate(),
            Compound::Polygon(p) => p.validate(),
            Compound::Multipolygon(m) => m.validate(),
            Compound::Mix(m) => m.validate(),
        }
    }

    /// Builds the spatial indices of the compound. Answers stay the same, only faster.
    pub fn index(&mut self) {
        match self {
            Compound::Empty | Compound::Point(_) | Compound::Segment(_) => {}
            Compound::Multipoint(m) => m.index(),
            Compound::Multisegment(m) => m.index(),
            Compound::Contour(c) => c.index(),
            Compound::Polygon(p) => p.index(),
            Compound::Multipolygon(m) => m.index(),
            Compound::Mix(m) => m.index(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use malachite::Rational;

    fn p(x: i64, y: i64) -> Point<Rational> {
        Point::from((x, y))
    }

    fn s(x0: i64, y0: i64, x1: i64, y1: i64) -> Compound<Rational> {
        Compound::Segment(Segment::new(p(x0, y0), p(x1, y1)))
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

    fn points(coords: &[(i64, i64)]) -> Compound<Rational> {
        Compound::Multipoint(Multipoint::new(
            coords.iter().map(|&c| Point::from(c)).collect(),
        ))
    }

    #[test]
    fn relations_across_dimensions() {
        let shape = square(0, 0, 4);
        let cases = [
            (points(&[(1, 1)]), Relation::Within),
            (points(&[(0, 1), (1, 1)]), Relation::Enclosed),
            (points(&[(0, 1)]), Relation::Component),
            (points(&[(0, 1), (5, 5)]), Relation::Touch),
            (points(&[(1, 1), (5, 5)]), Relation::Cross),
            (points(&[(5, 5)]), Relation::Disjoint),
            (s(1, 1, 2, 2), Relation::Within),
            (s(-1, 2, 5, 2), Relation::Cross),
            (square(1, 1, 2), Relation::Within),
            (Compound::Empty, Relation::Disjoint),
        ];
        for (other, expected) in cases {
            assert_eq!(shape.relate(&other), expected, "{other:?}");
            assert_eq!(other.relate(&shape), expected.complement(), "{other:?}");
        }
        assert_eq!(shape.relate(&shape), Relation::Equal);
    }

    #[test]
    fn point_and_multipoint_relate_alike() {
        let single = Compound::Point(p(1, 0));
        let segment = s(0, 0, 2, 0);
        assert_eq!(segment.relate(&single), Relation::Component);
        assert_eq!(segment.relate(&points(&[(1, 0)])), Relation::Component);
    }

    #[test]
    fn distances() {
        let a = square(0, 0, 2);
        let b = square(5, 0, 2);
        assert_eq!(a.distance_to(&b).unwrap(), Rational::from(3));
        assert_eq!(a.distance_to(&square(1, 1, 2)).unwrap(), Rational::from(0));
        // Inside a hole-free square counts as contact.
        assert_eq!(a.distance_to(&Compound::Point(p(1, 1))).unwrap(), Rational::from(0));
        assert_eq!(s(0, 4, 2, 4).distance_to(&a).unwrap(), Rational::from(2));
        assert!(matches!(
            a.distance_to(&Compound::Empty),
            Err(Error::Empty { .. })
        ));
    }

    #[test]
    fn centroid_of_empty_fails() {
        assert!(matches!(
            Compound::<Rational>::Empty.centroid(),
            Err(Error::Empty { operation: "centroid" })
        ));
    }

    #[test]
    fn equality_is_per_variant() {
        assert_ne!(Compound::Point(p(0, 0)), points(&[(0, 0)]));
        assert_eq!(s(0, 0, 1, 1), s(1, 1, 0, 0));
    }
}
