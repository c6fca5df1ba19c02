use std::{
    collections::HashSet,
    hash::{Hash, Hasher},
};

use crate::{
    geom::{rotation_step, Point},
    index::{BBox, BoxTree, Index},
    num::{constant, count, Float},
    relation::{Location, Relation},
    segment::Segment,
    Error,
};

/// A finite set of points.
///
/// The points keep the order they were given in, but equality and hashing only look at
/// the set. Duplicates are allowed to exist (they make the multipoint invalid).
#[derive(Clone)]
pub struct Multipoint<F> {
    points: Vec<Point<F>>,
    set: HashSet<Point<F>>,
    index: Index<F>,
}

impl<F: std::fmt::Debug> std::fmt::Debug for Multipoint<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Multipoint").field(&self.points).finish()
    }
}

impl<F: Float> PartialEq for Multipoint<F> {
    fn eq(&self, other: &Self) -> bool {
        self.set == other.set
    }
}

impl<F: Float> Eq for Multipoint<F> {}

impl<F: Float> Hash for Multipoint<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut points: Vec<_> = self.set.iter().collect();
        points.sort();
        points.hash(state);
    }
}

/// The points in their first-seen order, without repeats.
pub(crate) fn unique<F: Float>(points: impl IntoIterator<Item = Point<F>>) -> Vec<Point<F>> {
    let mut seen = HashSet::new();
    points
        .into_iter()
        .filter(|p| seen.insert(p.clone()))
        .collect()
}

impl<F: Float> Multipoint<F> {
    pub fn new(points: Vec<Point<F>>) -> Self {
        let set = points.iter().cloned().collect();
        Multipoint {
            points,
            set,
            index: Index::Unindexed,
        }
    }

    pub fn points(&self) -> &[Point<F>] {
        &self.points
    }

    pub fn contains(&self, p: &Point<F>) -> bool {
        self.set.contains(p)
    }

    pub fn locate(&self, p: &Point<F>) -> Location {
        if self.contains(p) {
            Location::Boundary
        } else {
            Location::Exterior
        }
    }

    /// The set-theoretic relation between two multipoints.
    pub fn relate(&self, other: &Multipoint<F>) -> Relation {
        relate_sets(&self.set, &other.set)
    }

    pub fn centroid(&self) -> Result<Point<F>, Error> {
        if self.points.is_empty() {
            return Err(Error::Empty {
                operation: "centroid",
            });
        }
        let zero = constant::<F>(0);
        let (sum_x, sum_y) = self
            .points
            .iter()
            .fold((zero.clone(), zero), |(x, y), p| (x + &p.x, y + &p.y));
        let n = count::<F>(self.points.len());
        Ok(Point::new(sum_x / &n, sum_y / n))
    }

    pub(crate) fn squared_distance_to_point(&self, p: &Point<F>) -> Option<F> {
        match self.index.tree() {
            Some(tree) => {
                let query = BBox::of_point(p);
                tree.nearest(
                    |b| b.squared_distance_to(&query),
                    |i| self.points[i].squared_distance_to(p),
                )
                .map(|(_, d)| d)
            }
            None => self.points.iter().map(|q| q.squared_distance_to(p)).min(),
        }
    }

    pub(crate) fn squared_distance_to_segment(&self, s: &Segment<F>) -> Option<F> {
        match self.index.tree() {
            Some(tree) => {
                let query = BBox::of_segment(s);
                tree.nearest(
                    |b| b.squared_distance_to(&query),
                    |i| s.squared_distance_to_point(&self.points[i]),
                )
                .map(|(_, d)| d)
            }
            None => self
                .points
                .iter()
                .map(|q| s.squared_distance_to_point(q))
                .min(),
        }
    }

    pub fn index(&mut self) {
        if self.index.is_indexed() {
            return;
        }
        let tree = BoxTree::new(self.points.iter().map(BBox::of_point).collect());
        tracing::debug!(kind = "Multipoint", items = tree.len(), "built index");
        self.index = Index::Indexed(tree);
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_indexed()
    }

    pub fn translate(&self, step_x: &F, step_y: &F) -> Self {
        Multipoint::new(
            self.points
                .iter()
                .map(|p| p.translate(step_x, step_y))
                .collect(),
        )
    }

    pub fn rotate(&self, cosine: &F, sine: &F, center: Option<&Point<F>>) -> Self {
        let points = match center {
            None => self
                .points
                .iter()
                .map(|p| p.rotate_around_origin(cosine, sine))
                .collect(),
            Some(center) => {
                let (step_x, step_y) = rotation_step(center, cosine, sine);
                self.points
                    .iter()
                    .map(|p| p.rotate_translate(cosine, sine, &step_x, &step_y))
                    .collect()
            }
        };
        Multipoint::new(points)
    }

    /// Scales every point. If a factor is zero, points that land on each other merge.
    pub fn scale(&self, factor_x: &F, factor_y: &F) -> Self {
        let zero = constant::<F>(0);
        if *factor_x != zero && *factor_y != zero {
            Multipoint::new(
                self.points
                    .iter()
                    .map(|p| p.scale(factor_x, factor_y))
                    .collect(),
            )
        } else if *factor_x != zero || *factor_y != zero {
            Multipoint::new(unique(self.points.iter().map(|p| p.scale(factor_x, factor_y))))
        } else {
            Multipoint::new(vec![Point::new(factor_x.clone(), factor_y.clone())])
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.points.is_empty() {
            return Err(Error::invalid("Multipoint", "Multipoint is empty."));
        }
        if self.points.len() > self.set.len() {
            return Err(Error::invalid("Multipoint", "Duplicate points found."));
        }
        for p in &self.points {
            p.validate()?;
        }
        Ok(())
    }
}

fn relate_sets<F: Float>(left: &HashSet<Point<F>>, right: &HashSet<Point<F>>) -> Relation {
    if left == right {
        return Relation::Equal;
    }
    let common = left.intersection(right).count();
    if common == 0 {
        Relation::Disjoint
    } else if common == right.len() {
        Relation::Component
    } else if common == left.len() {
        Relation::Composite
    } else {
        Relation::Overlap
    }
}

/// How a set of points sits with respect to a geometry that can locate points.
///
/// This is the relation of the points to the geometry: `Composite` means that every
/// point lies on the geometry's boundary, `Cover` that every point lies in its interior.
pub(crate) fn relate_points<F: Float>(
    points: &[Point<F>],
    locate: impl Fn(&Point<F>) -> Location,
) -> Relation {
    let mut disjoint = true;
    let mut is_subset = true;
    let mut not_interior = true;
    let mut not_boundary = true;
    for p in points {
        match locate(p) {
            Location::Interior => {
                disjoint = false;
                not_interior = false;
            }
            Location::Boundary => {
                disjoint = false;
                not_boundary = false;
            }
            Location::Exterior => is_subset = false,
        }
    }

    if disjoint {
        Relation::Disjoint
    } else if not_interior {
        if is_subset {
            Relation::Composite
        } else {
            Relation::Touch
        }
    } else if is_subset {
        if not_boundary {
            Relation::Cover
        } else {
            Relation::Encloses
        }
    } else {
        Relation::Cross
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

    fn mp(points: &[(i64, i64)]) -> Multipoint<Rational> {
        Multipoint::new(points.iter().map(|&xy| Point::from(xy)).collect())
    }

    #[test]
    fn set_equality() {
        assert_eq!(mp(&[(0, 0), (1, 1)]), mp(&[(1, 1), (0, 0)]));
        assert_ne!(mp(&[(0, 0), (1, 1)]), mp(&[(0, 0)]));
    }

    #[test]
    fn set_relations() {
        let a = mp(&[(0, 0), (1, 1), (2, 2)]);
        assert_eq!(a.relate(&mp(&[(2, 2), (0, 0), (1, 1)])), Relation::Equal);
        assert_eq!(a.relate(&mp(&[(0, 0)])), Relation::Component);
        assert_eq!(mp(&[(0, 0)]).relate(&a), Relation::Composite);
        assert_eq!(a.relate(&mp(&[(0, 0), (5, 5)])), Relation::Overlap);
        assert_eq!(a.relate(&mp(&[(5, 5)])), Relation::Disjoint);
    }

    #[test]
    fn point_relations() {
        // Locate in the closed unit square, with the boundary being the square's edges.
        let locate = |q: &Point<Rational>| {
            let (zero, one) = (Rational::from(0), Rational::from(1));
            let inside = zero <= q.x && q.x <= one && zero <= q.y && q.y <= one;
            let strictly = zero < q.x && q.x < one && zero < q.y && q.y < one;
            if strictly {
                Location::Interior
            } else if inside {
                Location::Boundary
            } else {
                Location::Exterior
            }
        };
        let half = Point::new(
            Rational::from(1) / Rational::from(2),
            Rational::from(1) / Rational::from(2),
        );
        assert_eq!(relate_points(&[p(5, 5)], locate), Relation::Disjoint);
        assert_eq!(relate_points(&[p(0, 0), p(1, 1)], locate), Relation::Composite);
        assert_eq!(relate_points(&[p(0, 0), p(5, 5)], locate), Relation::Touch);
        assert_eq!(relate_points(&[half.clone()], locate), Relation::Cover);
        assert_eq!(relate_points(&[half.clone(), p(0, 0)], locate), Relation::Encloses);
        assert_eq!(relate_points(&[half, p(5, 5)], locate), Relation::Cross);
    }

    #[test]
    fn centroid_is_the_mean() {
        assert_eq!(mp(&[(0, 0), (2, 0), (1, 3)]).centroid().unwrap(), p(1, 1));
        assert_matches!(mp(&[]).centroid(), Err(Error::Empty { .. }));
    }

    #[test]
    fn scaling_merges() {
        let zero = Rational::from(0);
        let one = Rational::from(1);
        let scaled = mp(&[(1, 0), (1, 5), (2, 5)]).scale(&one, &zero);
        assert_eq!(scaled.points(), &[p(1, 0), p(2, 0)]);
        assert_eq!(mp(&[(1, 2)]).scale(&zero, &zero), mp(&[(0, 0)]));
    }

    #[test]
    fn indexed_distance_matches() {
        let mut a = mp(&[(0, 0), (4, 4), (9, 1), (3, 7)]);
        let probe = p(5, 5);
        let before = a.squared_distance_to_point(&probe);
        a.index();
        assert!(a.is_indexed());
        assert_eq!(a.squared_distance_to_point(&probe), before);
        assert_eq!(before, Some(Rational::from(2)));
    }

    #[test]
    fn validation() {
        assert_matches!(mp(&[]).validate(), Err(Error::Invalid { .. }));
        assert_matches!(mp(&[(0, 0), (0, 0)]).validate(), Err(Error::Invalid { .. }));
        mp(&[(0, 0), (1, 0)]).validate().unwrap();
    }
}
