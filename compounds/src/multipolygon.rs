use std::{
    collections::HashSet,
    hash::{Hash, Hasher},
};

use crate::{
    algorithms::{fragment::cross_or_overlap, location::locate_in_polygons},
    compound::Compound,
    contour::flatten,
    geom::Point,
    index::{BBox, BoxTree, Index},
    num::{constant, Float},
    polygon::{region_moments, Polygon},
    relation::Location,
    segment::Segment,
    Error,
};

/// A collection of polygons that meet at most in isolated points.
#[derive(Clone)]
pub struct Multipolygon<F> {
    polygons: Vec<Polygon<F>>,
    index: Index<F>,
}

impl<F: std::fmt::Debug> std::fmt::Debug for Multipolygon<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Multipolygon").field(&self.polygons).finish()
    }
}

impl<F: Float> PartialEq for Multipolygon<F> {
    fn eq(&self, other: &Self) -> bool {
        self.polygons.len() == other.polygons.len() && self.set() == other.set()
    }
}

impl<F: Float> Eq for Multipolygon<F> {}

impl<F: Float> Hash for Multipolygon<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut hashes: Vec<u64> = self
            .polygons
            .iter()
            .map(|p| {
                let mut hasher = std::collections::hash_map::DefaultHasher::new();
                p.hash(&mut hasher);
                hasher.finish()
            })
            .collect();
        hashes.sort_unstable();
        hashes.hash(state);
    }
}

impl<F: Float> Multipolygon<F> {
    pub fn new(polygons: Vec<Polygon<F>>) -> Self {
        Multipolygon {
            polygons,
            index: Index::Unindexed,
        }
    }

    pub fn polygons(&self) -> &[Polygon<F>] {
        &self.polygons
    }

    fn set(&self) -> HashSet<&Polygon<F>> {
        self.polygons.iter().collect()
    }

    pub fn area(&self) -> F {
        self.polygons
            .iter()
            .fold(constant(0), |acc: F, p| acc + p.area())
    }

    pub fn perimeter(&self) -> F {
        self.polygons
            .iter()
            .fold(constant(0), |acc: F, p| acc + p.perimeter())
    }

    pub fn centroid(&self) -> Result<Point<F>, Error> {
        let (x, y, area) = region_moments(&self.polygons);
        if area == constant(0) {
            return Err(Error::Empty {
                operation: "centroid",
            });
        }
        let denominator = area * constant::<F>(3);
        Ok(Point::new(x / &denominator, y / denominator))
    }

    pub fn locate(&self, p: &Point<F>) -> Location {
        match self.index.tree() {
            Some(tree) => tree
                .containing(p)
                .into_iter()
                .map(|i| self.polygons[i].locate(p))
                .find(|location| *location != Location::Exterior)
                .unwrap_or(Location::Exterior),
            None => locate_in_polygons(&self.polygons, p),
        }
    }

    pub(crate) fn squared_distance_to_point(&self, p: &Point<F>) -> Option<F> {
        match self.index.tree() {
            Some(tree) => {
                let query = BBox::of_point(p);
                tree.nearest(
                    |b| b.squared_distance_to(&query),
                    |i| self.polygons[i].squared_distance_to_point(p),
                )
                .map(|(_, d)| d)
            }
            None => self
                .polygons
                .iter()
                .map(|polygon| polygon.squared_distance_to_point(p))
                .min(),
        }
    }

    pub(crate) fn squared_distance_to_segment(&self, s: &Segment<F>) -> Option<F> {
        match self.index.tree() {
            Some(tree) => {
                let query = BBox::of_segment(s);
                tree.nearest(
                    |b| b.squared_distance_to(&query),
                    |i| self.polygons[i].squared_distance_to_segment(s),
                )
                .map(|(_, d)| d)
            }
            None => self
                .polygons
                .iter()
                .map(|polygon| polygon.squared_distance_to_segment(s))
                .min(),
        }
    }

    /// Indexes every polygon, and the polygons by their borders' boxes.
    pub fn index(&mut self) {
        if self.index.is_indexed() {
            return;
        }
        for polygon in &mut self.polygons {
            polygon.index();
        }
        let boxes = self
            .polygons
            .iter()
            .filter_map(|p| BBox::of_points(p.border().vertices().iter()))
            .collect::<Vec<_>>();
        if boxes.len() != self.polygons.len() {
            // Some border has no vertices, so boxes and polygons wouldn't line up.
            return;
        }
        let tree = BoxTree::new(boxes);
        tracing::debug!(kind = "Multipolygon", items = tree.len(), "built index");
        self.index = Index::Indexed(tree);
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_indexed()
    }

    pub fn translate(&self, step_x: &F, step_y: &F) -> Self {
        Multipolygon::new(
            self.polygons
                .iter()
                .map(|p| p.translate(step_x, step_y))
                .collect(),
        )
    }

    pub fn rotate(&self, cosine: &F, sine: &F, center: Option<&Point<F>>) -> Self {
        Multipolygon::new(
            self.polygons
                .iter()
                .map(|p| p.rotate(cosine, sine, center))
                .collect(),
        )
    }

    pub fn scale(&self, factor_x: &F, factor_y: &F) -> Compound<F> {
        let zero = constant::<F>(0);
        if *factor_x != zero && *factor_y != zero {
            let polygons = self
                .polygons
                .iter()
                .filter_map(|p| match p.scale(factor_x, factor_y) {
                    Compound::Polygon(p) => Some(p),
                    _ => None,
                })
                .collect();
            return Compound::Multipolygon(Multipolygon::new(polygons));
        }
        flatten(
            self.polygons.iter().flat_map(|p| p.border().vertices()),
            factor_x,
            factor_y,
        )
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.polygons.is_empty() {
            return Err(Error::invalid("Multipolygon", "Multipolygon is empty."));
        }
        if self.set().len() < self.polygons.len() {
            return Err(Error::invalid("Multipolygon", "Duplicate polygons found."));
        }
        for polygon in &self.polygons {
            polygon.validate()?;
        }
        let edges: Vec<_> = self.polygons.iter().flat_map(|p| p.edges()).collect();
        if cross_or_overlap(&edges) {
            return Err(Error::invalid(
                "Multipolygon",
                "Polygons should only touch each other in discrete number of points.",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::Contour;
    use assert_matches::assert_matches;
    use malachite::Rational;

    fn p(x: i64, y: i64) -> Point<Rational> {
        Point::from((x, y))
    }

    fn square(x: i64, y: i64, side: i64) -> Polygon<Rational> {
        Polygon::new(
            Contour::new(vec![
                p(x, y),
                p(x + side, y),
                p(x + side, y + side),
                p(x, y + side),
            ]),
            vec![],
        )
    }

    #[test]
    fn metrics() {
        let m = Multipolygon::new(vec![square(0, 0, 2), square(4, 0, 2)]);
        assert_eq!(m.area(), Rational::from(8));
        assert_eq!(m.perimeter(), Rational::from(16));
        assert_eq!(m.centroid().unwrap(), p(3, 1));
    }

    #[test]
    fn location_with_and_without_index() {
        let mut m = Multipolygon::new(vec![square(0, 0, 2), square(2, 2, 2)]);
        let probes = [p(1, 1), p(2, 2), p(3, 1), p(3, 3), p(5, 5)];
        let before: Vec<_> = probes.iter().map(|q| m.locate(q)).collect();
        let distances: Vec<_> = probes
            .iter()
            .map(|q| m.squared_distance_to_point(q))
            .collect();
        m.index();
        assert!(m.is_indexed());
        assert_eq!(before, probes.iter().map(|q| m.locate(q)).collect::<Vec<_>>());
        assert_eq!(
            distances,
            probes
                .iter()
                .map(|q| m.squared_distance_to_point(q))
                .collect::<Vec<_>>()
        );
        assert_eq!(
            before,
            [
                Location::Interior,
                Location::Boundary,
                Location::Exterior,
                Location::Interior,
                Location::Exterior
            ]
        );
    }

    #[test]
    fn validation() {
        Multipolygon::new(vec![square(0, 0, 2), square(2, 2, 2)])
            .validate()
            .unwrap();
        assert_matches!(
            Multipolygon::<Rational>::new(vec![]).validate(),
            Err(Error::Invalid { .. })
        );
        assert_matches!(
            Multipolygon::new(vec![square(0, 0, 2), square(0, 0, 2)]).validate(),
            Err(Error::Invalid { reason, .. }) if reason.contains("Duplicate")
        );
        assert_matches!(
            Multipolygon::new(vec![square(0, 0, 2), square(2, 0, 2)]).validate(),
            Err(Error::Invalid { reason, .. }) if reason.contains("discrete")
        );
    }
}
