use std::hash::{Hash, Hasher};

use crate::{
    algorithms::location::{locate_in_edges, locate_in_tree, locate_on_segments, locate_on_tree},
    compound::Compound,
    geom::{orientation, rotation_step, Orientation, Point},
    index::{BBox, BoxTree, Index},
    multipoint::Multipoint,
    num::{constant, Float},
    relation::{Location, Relation},
    segment::Segment,
    Error,
};

/// Twice the signed area enclosed by a closed vertex cycle; positive when the cycle is
/// counterclockwise.
pub(crate) fn double_signed_area<F: Float>(vertices: &[Point<F>]) -> F {
    let n = vertices.len();
    (0..n).fold(constant(0), |acc: F, i| {
        let (a, b) = (&vertices[i], &vertices[(i + 1) % n]);
        acc + a.x.clone() * &b.y - a.y.clone() * &b.x
    })
}

/// A closed polyline.
///
/// The last vertex connects back to the first. Two contours are equal if they visit the
/// same vertices in the same cyclic order, in either direction.
#[derive(Clone)]
pub struct Contour<F> {
    vertices: Vec<Point<F>>,
    index: Index<F>,
}

impl<F: std::fmt::Debug> std::fmt::Debug for Contour<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Contour").field(&self.vertices).finish()
    }
}

impl<F: Float> PartialEq for Contour<F> {
    fn eq(&self, other: &Self) -> bool {
        let (left, right) = (&self.vertices, &other.vertices);
        let n = left.len();
        if n != right.len() {
            return false;
        }
        let Some(first) = left.first() else {
            return true;
        };
        let Some(offset) = right.iter().position(|v| v == first) else {
            return false;
        };
        (0..n).all(|i| left[i] == right[(offset + i) % n])
            || (0..n).all(|i| left[i] == right[(offset + n - i) % n])
    }
}

impl<F: Float> Eq for Contour<F> {}

impl<F: Float> Hash for Contour<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Start from the smallest vertex and walk towards its smaller neighbour.
        let n = self.vertices.len();
        let Some(start) = self.min_vertex() else {
            return;
        };
        let forward = self.vertices[(start + 1) % n] <= self.vertices[(start + n - 1) % n];
        for i in 0..n {
            let at = if forward {
                (start + i) % n
            } else {
                (start + n - i) % n
            };
            self.vertices[at].hash(state);
        }
    }
}

impl<F: Float> Contour<F> {
    pub fn new(vertices: Vec<Point<F>>) -> Self {
        Contour {
            vertices,
            index: Index::Unindexed,
        }
    }

    pub fn vertices(&self) -> &[Point<F>] {
        &self.vertices
    }

    fn min_vertex(&self) -> Option<usize> {
        self.vertices
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(i, _)| i)
    }

    pub(crate) fn edge(&self, i: usize) -> Segment<F> {
        let n = self.vertices.len();
        Segment::new(self.vertices[i].clone(), self.vertices[(i + 1) % n].clone())
    }

    pub(crate) fn edges(&self) -> impl Iterator<Item = Segment<F>> + '_ {
        (0..self.vertices.len()).map(|i| self.edge(i))
    }

    /// The edges, each going from a vertex to the next one.
    pub fn segments(&self) -> Vec<Segment<F>> {
        self.edges().collect()
    }

    /// The orientation of the turn at the smallest vertex.
    pub fn orientation(&self) -> Orientation {
        let n = self.vertices.len();
        match self.min_vertex() {
            Some(i) if n >= 3 => orientation(
                &self.vertices[(i + n - 1) % n],
                &self.vertices[i],
                &self.vertices[(i + 1) % n],
            ),
            _ => Orientation::Collinear,
        }
    }

    /// The same contour, walked the other way around.
    ///
    /// The first vertex stays first.
    pub fn reverse(&self) -> Self {
        let mut vertices = self.vertices.clone();
        if vertices.len() > 1 {
            vertices[1..].reverse();
        }
        Contour::new(vertices)
    }

    pub fn to_counterclockwise(&self) -> Self {
        if self.orientation() == Orientation::Clockwise {
            self.reverse()
        } else {
            self.clone()
        }
    }

    pub fn to_clockwise(&self) -> Self {
        if self.orientation() == Orientation::Counterclockwise {
            self.reverse()
        } else {
            self.clone()
        }
    }

    pub fn length(&self) -> F {
        self.edges()
            .fold(constant(0), |acc: F, edge| acc + edge.length())
    }

    /// The area of the region bounded by the contour.
    pub fn region_area(&self) -> F {
        double_signed_area(&self.vertices).abs() / constant::<F>(2)
    }

    /// The sums that make up the centroid of the bounded region: the first moments
    /// `(sum_x, sum_y)` and the signed doubled area, all scaled consistently.
    ///
    /// Sums from several contours add up to the centroid of the combined region.
    pub(crate) fn region_moments(&self) -> (F, F, F) {
        let n = self.vertices.len();
        let zero = constant::<F>(0);
        (0..n).fold((zero.clone(), zero.clone(), zero), |(x, y, area), i| {
            let (a, b) = (&self.vertices[i], &self.vertices[(i + 1) % n]);
            let cross = a.x.clone() * &b.y - a.y.clone() * &b.x;
            (
                x + (a.x.clone() + &b.x) * &cross,
                y + (a.y.clone() + &b.y) * &cross,
                area + cross,
            )
        })
    }

    /// The centroid of the region bounded by the contour.
    pub fn centroid(&self) -> Result<Point<F>, Error> {
        let (x, y, area) = self.region_moments();
        if area == constant(0) {
            return Multipoint::new(self.vertices.clone()).centroid();
        }
        let denominator = area * constant::<F>(3);
        Ok(Point::new(x / &denominator, y / denominator))
    }

    /// Whether the bounded region is convex.
    pub fn is_convex(&self) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let expected = self.orientation();
        (0..n).all(|i| {
            orientation(
                &self.vertices[(i + n - 1) % n],
                &self.vertices[i],
                &self.vertices[(i + 1) % n],
            ) == expected
        }) && expected != Orientation::Collinear
    }

    /// Locates `p` on the contour, as a curve.
    pub fn locate(&self, p: &Point<F>) -> Location {
        match self.index.tree() {
            Some(tree) => locate_on_tree(tree, |i| self.edge(i), p),
            None => locate_on_segments(&self.segments(), p),
        }
    }

    /// Locates `p` in the region bounded by the contour.
    pub fn locate_region(&self, p: &Point<F>) -> Location {
        match self.index.tree() {
            Some(tree) => locate_in_tree(tree, |i| self.edge(i), p),
            None => locate_in_edges(self.edges(), p),
        }
    }

    pub(crate) fn squared_distance_to_point(&self, p: &Point<F>) -> Option<F> {
        match self.index.tree() {
            Some(tree) => {
                let query = BBox::of_point(p);
                tree.nearest(
                    |b| b.squared_distance_to(&query),
                    |i| self.edge(i).squared_distance_to_point(p),
                )
                .map(|(_, d)| d)
            }
            None => self.edges().map(|e| e.squared_distance_to_point(p)).min(),
        }
    }

    pub(crate) fn squared_distance_to_segment(&self, s: &Segment<F>) -> Option<F> {
        match self.index.tree() {
            Some(tree) => {
                let query = BBox::of_segment(s);
                tree.nearest(
                    |b| b.squared_distance_to(&query),
                    |i| self.edge(i).squared_distance_to_segment(s),
                )
                .map(|(_, d)| d)
            }
            None => self.edges().map(|e| e.squared_distance_to_segment(s)).min(),
        }
    }

    pub fn index(&mut self) {
        if self.index.is_indexed() {
            return;
        }
        let tree = BoxTree::new(self.edges().map(|e| BBox::of_segment(&e)).collect());
        tracing::debug!(kind = "Contour", items = tree.len(), "built index");
        self.index = Index::Indexed(tree);
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_indexed()
    }

    pub fn translate(&self, step_x: &F, step_y: &F) -> Self {
        Contour::new(
            self.vertices
                .iter()
                .map(|p| p.translate(step_x, step_y))
                .collect(),
        )
    }

    pub fn rotate(&self, cosine: &F, sine: &F, center: Option<&Point<F>>) -> Self {
        let vertices = match center {
            None => self
                .vertices
                .iter()
                .map(|p| p.rotate_around_origin(cosine, sine))
                .collect(),
            Some(center) => {
                let (step_x, step_y) = rotation_step(center, cosine, sine);
                self.vertices
                    .iter()
                    .map(|p| p.rotate_translate(cosine, sine, &step_x, &step_y))
                    .collect()
            }
        };
        Contour::new(vertices)
    }

    /// Scales the contour. A zero factor flattens it onto a segment or a point.
    pub fn scale(&self, factor_x: &F, factor_y: &F) -> Compound<F> {
        let zero = constant::<F>(0);
        if *factor_x != zero && *factor_y != zero {
            return Compound::Contour(Contour::new(
                self.vertices
                    .iter()
                    .map(|p| p.scale(factor_x, factor_y))
                    .collect(),
            ));
        }
        flatten(self.vertices.iter(), factor_x, factor_y)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let n = self.vertices.len();
        if n < 3 {
            return Err(Error::invalid(
                "Contour",
                format!("Contour should have at least 3 vertices, but found {n}."),
            ));
        }
        for v in &self.vertices {
            v.validate()?;
        }
        let collinear = (0..n).any(|i| {
            orientation(
                &self.vertices[(i + n - 1) % n],
                &self.vertices[i],
                &self.vertices[(i + 1) % n],
            ) == Orientation::Collinear
        });
        if collinear {
            return Err(Error::invalid(
                "Contour",
                "Consecutive vertices triplets should not be on the same line.",
            ));
        }
        if self.self_intersects() {
            return Err(Error::invalid(
                "Contour",
                "Contour should not be self-intersecting.",
            ));
        }
        Ok(())
    }

    fn self_intersects(&self) -> bool {
        let edges = self.segments();
        let n = edges.len();
        let boxes: Vec<_> = edges.iter().map(BBox::of_segment).collect();
        let tree = BoxTree::new(boxes.clone());
        tree.intersecting_pairs(&boxes).into_iter().any(|(i, j)| {
            let relation = edges[i].relate(&edges[j]);
            if j == i + 1 || (i == 0 && j == n - 1) {
                relation != Relation::Touch
            } else {
                relation != Relation::Disjoint
            }
        })
    }
}

/// Scales points by factors at least one of which is zero.
///
/// The result lies on an axis: it is the segment spanned by the points along the
/// surviving axis, or a single point if nothing survives.
pub(crate) fn flatten<'a, F: Float>(
    points: impl Iterator<Item = &'a Point<F>>,
    factor_x: &F,
    factor_y: &F,
) -> Compound<F> {
    let zero = constant::<F>(0);
    let point = |x: F, y: F| Compound::Multipoint(Multipoint::new(vec![Point::new(x, y)]));
    let keep_x = *factor_x != zero;
    if !keep_x && *factor_y == zero {
        return point(factor_x.clone(), factor_y.clone());
    }
    let mut coords = points.map(|p| if keep_x { p.x.clone() } else { p.y.clone() });
    let Some(first) = coords.next() else {
        return Compound::Empty;
    };
    let (lo, hi) = coords.fold((first.clone(), first), |(lo, hi), c| {
        (lo.min(c.clone()), hi.max(c))
    });
    let place = |c: F| {
        if keep_x {
            Point::new(c * factor_x, factor_y.clone())
        } else {
            Point::new(factor_x.clone(), c * factor_y)
        }
    };
    if lo == hi {
        let p = place(lo);
        return point(p.x, p.y);
    }
    Compound::Segment(Segment::new(place(lo), place(hi)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use malachite::Rational;
    use std::collections::hash_map::DefaultHasher;

    fn p(x: i64, y: i64) -> Point<Rational> {
        Point::from((x, y))
    }

    fn contour(vertices: &[(i64, i64)]) -> Contour<Rational> {
        Contour::new(vertices.iter().map(|&v| Point::from(v)).collect())
    }

    fn hash(c: &Contour<Rational>) -> u64 {
        let mut hasher = DefaultHasher::new();
        c.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn triangle() {
        let triangle = contour(&[(0, 0), (1, 0), (0, 1)]);
        assert_eq!(triangle.orientation(), Orientation::Counterclockwise);
        let third = Rational::from(1) / Rational::from(3);
        assert_eq!(triangle.centroid().unwrap(), Point::new(third.clone(), third));
        let expected = Rational::from(2) + Rational::from(2).sqrt();
        assert_eq!(triangle.length(), expected);
        triangle.validate().unwrap();
    }

    #[test]
    fn equality_up_to_rotation_and_reflection() {
        let a = contour(&[(0, 0), (2, 0), (2, 2), (0, 2)]);
        let rotated = contour(&[(2, 2), (0, 2), (0, 0), (2, 0)]);
        let reflected = contour(&[(0, 2), (2, 2), (2, 0), (0, 0)]);
        let other = contour(&[(0, 0), (2, 2), (2, 0), (0, 2)]);
        assert_eq!(a, rotated);
        assert_eq!(a, reflected);
        assert_ne!(a, other);
        assert_eq!(hash(&a), hash(&rotated));
        assert_eq!(hash(&a), hash(&reflected));
        assert_eq!(a.reverse(), a);
        assert_eq!(a.to_clockwise().orientation(), Orientation::Clockwise);
    }

    #[test]
    fn convexity() {
        assert!(contour(&[(0, 0), (2, 0), (2, 2), (0, 2)]).is_convex());
        assert!(!contour(&[(0, 0), (4, 0), (4, 4), (2, 1), (0, 4)]).is_convex());
    }

    #[test]
    fn location() {
        let mut square = contour(&[(0, 0), (2, 0), (2, 2), (0, 2)]);
        let probes = [p(1, 1), p(1, 0), p(3, 3)];
        let answers = |c: &Contour<Rational>| -> Vec<_> {
            probes
                .iter()
                .map(|q| (c.locate(q), c.locate_region(q)))
                .collect()
        };
        let before = answers(&square);
        square.index();
        let after = answers(&square);
        assert_eq!(before, after);
        assert_eq!(
            before,
            vec![
                (Location::Exterior, Location::Interior),
                (Location::Boundary, Location::Boundary),
                (Location::Exterior, Location::Exterior),
            ]
        );
    }

    #[test]
    fn flattening() {
        let square = contour(&[(0, 0), (2, 0), (2, 2), (0, 2)]);
        let zero = Rational::from(0);
        let one = Rational::from(1);
        assert_eq!(
            square.scale(&zero, &one),
            Compound::Segment(Segment::new(p(0, 0), p(0, 2)))
        );
        assert_eq!(
            square.scale(&zero, &zero),
            Compound::Multipoint(Multipoint::new(vec![p(0, 0)]))
        );
    }

    #[test]
    fn validation() {
        assert_matches!(contour(&[(0, 0), (1, 0)]).validate(), Err(Error::Invalid { .. }));
        assert_matches!(
            contour(&[(0, 0), (1, 0), (2, 0), (1, 1)]).validate(),
            Err(Error::Invalid { .. })
        );
        // A bow tie.
        assert_matches!(
            contour(&[(0, 0), (2, 2), (2, 0), (0, 2)]).validate(),
            Err(Error::Invalid { reason, .. }) if reason.contains("self-intersecting")
        );
    }
}
