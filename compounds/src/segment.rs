use std::hash::{Hash, Hasher};

use crate::{
    compound::Compound,
    geom::{orientation, rotation_step, Orientation, Point},
    multipoint::Multipoint,
    multisegment::Multisegment,
    num::{constant, Float},
    packing::pack_segments,
    relation::{Location, Relation},
    Error,
};

/// A straight line segment.
///
/// Segments are undirected as far as equality and hashing are concerned: `a -- b` and
/// `b -- a` are the same segment. The direction is still kept, because contour edges
/// and polygon boundaries care about it.
#[derive(Clone)]
pub struct Segment<F> {
    pub start: Point<F>,
    pub end: Point<F>,
}

impl<F: std::fmt::Debug> std::fmt::Debug for Segment<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -- {:?}", self.start, self.end)
    }
}

impl<F: Float> PartialEq for Segment<F> {
    fn eq(&self, other: &Self) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

impl<F: Float> Eq for Segment<F> {}

impl<F: Float> Hash for Segment<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (min, max) = self.sorted_endpoints();
        min.hash(state);
        max.hash(state);
    }
}

impl<F: Float> Segment<F> {
    pub fn new(start: Point<F>, end: Point<F>) -> Self {
        Segment { start, end }
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    pub fn length(&self) -> F {
        self.start.distance_to(&self.end)
    }

    pub fn centroid(&self) -> Point<F> {
        self.start.midpoint(&self.end)
    }

    /// The endpoints, smallest first.
    pub fn sorted_endpoints(&self) -> (&Point<F>, &Point<F>) {
        if self.start <= self.end {
            (&self.start, &self.end)
        } else {
            (&self.end, &self.start)
        }
    }

    pub fn reversed(&self) -> Self {
        Segment::new(self.end.clone(), self.start.clone())
    }

    pub fn contains(&self, p: &Point<F>) -> bool {
        // Along a line, the lexicographic order is the order of the points on it.
        let (min, max) = self.sorted_endpoints();
        min <= p && p <= max && orientation(&self.start, &self.end, p) == Orientation::Collinear
    }

    pub fn locate(&self, p: &Point<F>) -> Location {
        if self.contains(p) {
            Location::Boundary
        } else {
            Location::Exterior
        }
    }

    /// How `other` sits with respect to `self`.
    ///
    /// Only the relations that make sense between two one-dimensional sets can come
    /// out of this: `Disjoint`, `Touch`, `Cross`, `Overlap`, `Equal`, `Component` and
    /// `Composite`.
    pub fn relate(&self, other: &Segment<F>) -> Relation {
        let other_start = orientation(&self.start, &self.end, &other.start);
        let other_end = orientation(&self.start, &self.end, &other.end);
        if other_start == Orientation::Collinear && other_end == Orientation::Collinear {
            return self.relate_collinear(other);
        }
        if other_start == other_end {
            return Relation::Disjoint;
        }

        let self_start = orientation(&other.start, &other.end, &self.start);
        let self_end = orientation(&other.start, &other.end, &self.end);
        if self_start == self_end {
            // Both collinear is impossible here, because the other pair wasn't.
            return Relation::Disjoint;
        }

        if other_start == Orientation::Collinear
            || other_end == Orientation::Collinear
            || self_start == Orientation::Collinear
            || self_end == Orientation::Collinear
        {
            Relation::Touch
        } else {
            Relation::Cross
        }
    }

    fn relate_collinear(&self, other: &Segment<F>) -> Relation {
        let (start, end) = self.sorted_endpoints();
        let (other_start, other_end) = other.sorted_endpoints();
        if start == other_start && end == other_end {
            Relation::Equal
        } else if end < other_start || other_end < start {
            Relation::Disjoint
        } else if end == other_start || other_end == start {
            Relation::Touch
        } else if start <= other_start && other_end <= end {
            Relation::Component
        } else if other_start <= start && end <= other_end {
            Relation::Composite
        } else {
            Relation::Overlap
        }
    }

    pub fn squared_distance_to_point(&self, p: &Point<F>) -> F {
        let zero = constant::<F>(0);
        let direction = &self.end - &self.start;
        let offset = p - &self.start;
        let dot = offset.dot(&direction);
        let squared_length = direction.squared_length();
        if dot <= zero || squared_length == zero {
            self.start.squared_distance_to(p)
        } else if dot >= squared_length {
            self.end.squared_distance_to(p)
        } else {
            let cross = offset.cross(&direction);
            cross.clone() * cross / squared_length
        }
    }

    pub fn squared_distance_to_segment(&self, other: &Segment<F>) -> F {
        if self.relate(other) != Relation::Disjoint {
            return constant(0);
        }
        [
            self.squared_distance_to_point(&other.start),
            self.squared_distance_to_point(&other.end),
            other.squared_distance_to_point(&self.start),
            other.squared_distance_to_point(&self.end),
        ]
        .into_iter()
        .min()
        .unwrap_or_else(|| constant(0))
    }

    pub fn translate(&self, step_x: &F, step_y: &F) -> Self {
        Segment::new(
            self.start.translate(step_x, step_y),
            self.end.translate(step_x, step_y),
        )
    }

    pub fn rotate(&self, cosine: &F, sine: &F, center: Option<&Point<F>>) -> Self {
        match center {
            None => Segment::new(
                self.start.rotate_around_origin(cosine, sine),
                self.end.rotate_around_origin(cosine, sine),
            ),
            Some(center) => {
                let (step_x, step_y) = rotation_step(center, cosine, sine);
                Segment::new(
                    self.start.rotate_translate(cosine, sine, &step_x, &step_y),
                    self.end.rotate_translate(cosine, sine, &step_x, &step_y),
                )
            }
        }
    }

    /// Whether scaling by these factors keeps the segment one-dimensional.
    pub(crate) fn survives_scale(&self, factor_x: &F, factor_y: &F) -> bool {
        let zero = constant::<F>(0);
        ((*factor_x != zero || !self.is_horizontal()) && *factor_y != zero)
            || (*factor_x != zero && !self.is_vertical())
    }

    pub(crate) fn scale_unchecked(&self, factor_x: &F, factor_y: &F) -> Self {
        Segment::new(
            self.start.scale(factor_x, factor_y),
            self.end.scale(factor_x, factor_y),
        )
    }

    /// Scales the segment, collapsing it to a point if it loses its extent.
    pub fn scale(&self, factor_x: &F, factor_y: &F) -> Compound<F> {
        if self.survives_scale(factor_x, factor_y) {
            Compound::Segment(self.scale_unchecked(factor_x, factor_y))
        } else {
            Compound::Multipoint(Multipoint::new(vec![
                self.start.scale(factor_x, factor_y)
            ]))
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.start.validate()?;
        self.end.validate()?;
        if self.start == self.end {
            return Err(Error::invalid("Segment", "Segment is degenerate."));
        }
        Ok(())
    }
}

/// The common point of two segments that touch or cross.
///
/// The result doesn't depend on the order of the arguments or on the direction of
/// either segment, so that both sides of a crossing split at exactly the same point
/// even when the coordinates are rounded.
pub(crate) fn intersection_point<F: Float>(a: &Segment<F>, b: &Segment<F>) -> Point<F> {
    for (candidate, other) in [(&a.start, b), (&a.end, b), (&b.start, a), (&b.end, a)] {
        if other.contains(candidate) {
            return candidate.clone();
        }
    }

    let key = |s: &Segment<F>| {
        let (min, max) = s.sorted_endpoints();
        (min.clone(), max.clone())
    };
    let (a, b) = (key(a), key(b));
    let ((a0, a1), (b0, b1)) = if a <= b { (a, b) } else { (b, a) };
    let a_dir = &a1 - &a0;
    let b_dir = &b1 - &b0;
    let t = (&b0 - &a0).cross(&b_dir) / a_dir.cross(&b_dir);
    Point::new(a0.x + t.clone() * &a_dir.x, a0.y + t * &a_dir.y)
}

/// All four endpoints of two segments, in increasing order.
fn sorted_endpoints<F: Float>(a: &Segment<F>, b: &Segment<F>) -> [Point<F>; 4] {
    let mut points = [
        a.start.clone(),
        a.end.clone(),
        b.start.clone(),
        b.end.clone(),
    ];
    points.sort();
    points
}

/// The pieces `[p0, p1]` and `[p2, p3]` of four sorted collinear points that have
/// non-zero length.
fn outer_pieces<F: Float>(points: [Point<F>; 4]) -> Compound<F> {
    let [p0, p1, p2, p3] = points;
    let mut pieces = Vec::new();
    if p0 != p1 {
        pieces.push(Segment::new(p0, p1));
    }
    if p2 != p3 {
        pieces.push(Segment::new(p2, p3));
    }
    pack_segments(pieces)
}

/// The four half-segments of two segments that cross at an interior point.
fn star<F: Float>(a: &Segment<F>, b: &Segment<F>) -> Compound<F> {
    let center = intersection_point(a, b);
    Compound::Multisegment(Multisegment::new(vec![
        Segment::new(a.start.clone(), center.clone()),
        Segment::new(a.end.clone(), center.clone()),
        Segment::new(center.clone(), b.start.clone()),
        Segment::new(center, b.end.clone()),
    ]))
}

pub(crate) fn intersect<F: Float>(a: &Segment<F>, b: &Segment<F>) -> Compound<F> {
    match a.relate(b) {
        Relation::Disjoint => Compound::Empty,
        Relation::Touch | Relation::Cross => {
            Compound::Multipoint(Multipoint::new(vec![intersection_point(a, b)]))
        }
        Relation::Component => Compound::Segment(b.clone()),
        Relation::Composite | Relation::Equal => Compound::Segment(a.clone()),
        _ => {
            let [_, p1, p2, _] = sorted_endpoints(a, b);
            Compound::Segment(Segment::new(p1, p2))
        }
    }
}

pub(crate) fn unite<F: Float>(a: &Segment<F>, b: &Segment<F>) -> Compound<F> {
    match a.relate(b) {
        Relation::Equal | Relation::Component => Compound::Segment(a.clone()),
        Relation::Composite => Compound::Segment(b.clone()),
        Relation::Cross => star(a, b),
        Relation::Overlap => {
            let [p0, _, _, p3] = sorted_endpoints(a, b);
            Compound::Segment(Segment::new(p0, p3))
        }
        _ => Compound::Multisegment(Multisegment::new(vec![a.clone(), b.clone()])),
    }
}

pub(crate) fn subtract<F: Float>(minuend: &Segment<F>, subtrahend: &Segment<F>) -> Compound<F> {
    match minuend.relate(subtrahend) {
        Relation::Equal | Relation::Composite => Compound::Empty,
        Relation::Component => outer_pieces(sorted_endpoints(minuend, subtrahend)),
        Relation::Overlap => {
            let [p0, p1, p2, p3] = sorted_endpoints(minuend, subtrahend);
            if p0 == minuend.start || p0 == minuend.end {
                Compound::Segment(Segment::new(p0, p1))
            } else {
                Compound::Segment(Segment::new(p2, p3))
            }
        }
        _ => Compound::Segment(minuend.clone()),
    }
}

pub(crate) fn symmetric_subtract<F: Float>(a: &Segment<F>, b: &Segment<F>) -> Compound<F> {
    match a.relate(b) {
        Relation::Equal => Compound::Empty,
        Relation::Cross => star(a, b),
        Relation::Component | Relation::Composite | Relation::Overlap => {
            outer_pieces(sorted_endpoints(a, b))
        }
        _ => Compound::Multisegment(Multisegment::new(vec![a.clone(), b.clone()])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use malachite::Rational;

    fn p(x: i64, y: i64) -> Point<Rational> {
        Point::from((x, y))
    }

    fn s(x0: i64, y0: i64, x1: i64, y1: i64) -> Segment<Rational> {
        Segment::new(p(x0, y0), p(x1, y1))
    }

    #[test]
    fn equality_ignores_direction() {
        assert_eq!(s(0, 0, 1, 1), s(1, 1, 0, 0));
        assert_ne!(s(0, 0, 1, 1), s(0, 0, 1, 2));
    }

    #[test]
    fn relations() {
        let base = s(0, 0, 4, 0);
        let cases = [
            (s(0, 1, 4, 1), Relation::Disjoint),
            (s(5, 0, 6, 0), Relation::Disjoint),
            (s(4, 0, 6, 0), Relation::Touch),
            (s(2, 0, 2, 3), Relation::Touch),
            (s(2, -1, 2, 1), Relation::Cross),
            (s(3, 0, 6, 0), Relation::Overlap),
            (s(1, 0, 3, 0), Relation::Component),
            (s(-1, 0, 5, 0), Relation::Composite),
            (s(4, 0, 0, 0), Relation::Equal),
        ];
        for (other, expected) in cases {
            assert_eq!(base.relate(&other), expected, "{other:?}");
            assert_eq!(other.relate(&base), expected.complement(), "{other:?}");
        }
    }

    #[test]
    fn crossing_union_is_a_star() {
        let union = unite(&s(0, 0, 2, 0), &s(1, -1, 1, 1));
        let expected = Multisegment::new(vec![
            s(0, 0, 1, 0),
            s(2, 0, 1, 0),
            s(1, 0, 1, -1),
            s(1, 0, 1, 1),
        ]);
        assert_eq!(union, Compound::Multisegment(expected));
    }

    #[test]
    fn intersection_point_is_symmetric() {
        let a = s(0, 0, 3, 1);
        let b = s(0, 1, 3, 0);
        let expected = Point::new(
            Rational::from(3) / Rational::from(2),
            Rational::from(1) / Rational::from(2),
        );
        assert_eq!(intersection_point(&a, &b), expected);
        assert_eq!(intersection_point(&b.reversed(), &a), expected);
    }

    #[test]
    fn collinear_algebra() {
        let a = s(0, 0, 4, 0);
        assert_eq!(intersect(&a, &s(2, 0, 6, 0)), Compound::Segment(s(2, 0, 4, 0)));
        assert_eq!(unite(&a, &s(2, 0, 6, 0)), Compound::Segment(s(0, 0, 6, 0)));
        assert_eq!(subtract(&a, &s(2, 0, 6, 0)), Compound::Segment(s(0, 0, 2, 0)));
        assert_eq!(subtract(&a, &s(-2, 0, 2, 0)), Compound::Segment(s(2, 0, 4, 0)));
        assert_eq!(
            subtract(&a, &s(1, 0, 3, 0)),
            Compound::Multisegment(Multisegment::new(vec![s(0, 0, 1, 0), s(3, 0, 4, 0)]))
        );
        assert_eq!(subtract(&a, &s(0, 0, 3, 0)), Compound::Segment(s(3, 0, 4, 0)));
        assert_eq!(
            symmetric_subtract(&a, &s(2, 0, 6, 0)),
            Compound::Multisegment(Multisegment::new(vec![s(0, 0, 2, 0), s(4, 0, 6, 0)]))
        );
        assert_eq!(symmetric_subtract(&a, &a.reversed()), Compound::Empty);
        assert_matches!(intersect(&a, &s(4, 0, 4, 4)), Compound::Multipoint(_));
    }

    #[test]
    fn distances() {
        let a = s(0, 0, 4, 0);
        assert_eq!(a.squared_distance_to_point(&p(2, 3)), Rational::from(9));
        assert_eq!(a.squared_distance_to_point(&p(7, 4)), Rational::from(25));
        assert_eq!(a.squared_distance_to_segment(&s(2, -1, 2, 1)), Rational::from(0));
        assert_eq!(a.squared_distance_to_segment(&s(5, 1, 6, 1)), Rational::from(2));
    }

    #[test]
    fn scaling_collapses() {
        let zero = Rational::from(0);
        let two = Rational::from(2);
        assert_eq!(s(0, 0, 1, 0).scale(&two, &zero), Compound::Segment(s(0, 0, 2, 0)));
        assert_eq!(
            s(1, 0, 1, 3).scale(&two, &zero),
            Compound::Multipoint(Multipoint::new(vec![p(2, 0)]))
        );
    }

    #[test]
    fn degenerate_segment_is_invalid() {
        assert_matches!(
            s(1, 1, 1, 1).validate(),
            Err(Error::Invalid { kind: "Segment", .. })
        );
        s(0, 0, 1, 1).validate().unwrap();
    }
}
