use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use crate::{
    algorithms::{
        hull::convex_hull,
        location::{locate_in_edges, locate_in_tree},
        region,
        triangulation::triangulate,
    },
    compound::Compound,
    contour::{flatten, Contour},
    geom::{Orientation, Point},
    index::{BBox, BoxTree, Index},
    num::{constant, Float},
    relation::{Location, Relation},
    segment::Segment,
    Error,
};

/// A region bounded by a border contour, with holes cut out of it.
#[derive(Clone)]
pub struct Polygon<F> {
    border: Contour<F>,
    holes: Vec<Contour<F>>,
    index: Index<F>,
}

impl<F: std::fmt::Debug> std::fmt::Debug for Polygon<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Polygon")
            .field("border", &self.border)
            .field("holes", &self.holes)
            .finish()
    }
}

impl<F: Float> PartialEq for Polygon<F> {
    fn eq(&self, other: &Self) -> bool {
        self.border == other.border
            && self.holes.len() == other.holes.len()
            && self.holes.iter().all(|h| other.holes.contains(h))
            && other.holes.iter().all(|h| self.holes.contains(h))
    }
}

impl<F: Float> Eq for Polygon<F> {}

impl<F: Float> Hash for Polygon<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.border.hash(state);
        let mut holes: Vec<u64> = self
            .holes
            .iter()
            .map(|h| {
                let mut hasher = DefaultHasher::new();
                h.hash(&mut hasher);
                hasher.finish()
            })
            .collect();
        holes.sort_unstable();
        holes.hash(state);
    }
}

impl<F: Float> Polygon<F> {
    pub fn new(border: Contour<F>, holes: Vec<Contour<F>>) -> Self {
        Polygon {
            border,
            holes,
            index: Index::Unindexed,
        }
    }

    pub fn border(&self) -> &Contour<F> {
        &self.border
    }

    pub fn holes(&self) -> &[Contour<F>] {
        &self.holes
    }

    /// All the edges, border first, as their contours list them.
    pub fn edges(&self) -> impl Iterator<Item = Segment<F>> + '_ {
        self.border
            .edges()
            .chain(self.holes.iter().flat_map(|h| h.edges()))
    }

    /// All the edges, directed so that the polygon's interior is on their left.
    pub(crate) fn oriented_edges(&self) -> Vec<Segment<F>> {
        self.border
            .to_counterclockwise()
            .edges()
            .chain(
                self.holes
                    .iter()
                    .flat_map(|h| h.to_clockwise().edges().collect::<Vec<_>>()),
            )
            .collect()
    }

    fn edge_count(&self) -> usize {
        self.border.vertices().len()
            + self
                .holes
                .iter()
                .map(|h| h.vertices().len())
                .sum::<usize>()
    }

    pub fn area(&self) -> F {
        self.holes
            .iter()
            .fold(self.border.region_area(), |acc, h| acc - h.region_area())
    }

    pub fn perimeter(&self) -> F {
        self.holes
            .iter()
            .fold(self.border.length(), |acc, h| acc + h.length())
    }

    pub fn centroid(&self) -> Result<Point<F>, Error> {
        let (x, y, area) = region_moments(std::slice::from_ref(self));
        if area == constant(0) {
            return self.border.centroid();
        }
        let denominator = area * constant::<F>(3);
        Ok(Point::new(x / &denominator, y / denominator))
    }

    pub fn is_convex(&self) -> bool {
        self.holes.is_empty() && self.border.is_convex()
    }

    pub fn convex_hull(&self) -> Polygon<F> {
        if self.is_convex() {
            return self.clone();
        }
        Polygon::new(
            Contour::new(convex_hull(self.border.vertices())),
            Vec::new(),
        )
    }

    /// Splits the polygon into triangles forming its constrained Delaunay
    /// triangulation.
    pub fn triangulate(&self) -> Vec<Polygon<F>> {
        triangulate(self)
    }

    pub fn locate(&self, p: &Point<F>) -> Location {
        match self.index.tree() {
            Some(tree) => {
                let border = self.border.vertices().len();
                locate_in_tree(tree, |i| self.edge(i, border), p)
            }
            None => locate_in_edges(self.edges(), p),
        }
    }

    /// The `i`-th edge in the order of [`Polygon::edges`].
    fn edge(&self, mut i: usize, border: usize) -> Segment<F> {
        if i < border {
            return self.border.edge(i);
        }
        i -= border;
        for hole in &self.holes {
            let n = hole.vertices().len();
            if i < n {
                return hole.edge(i);
            }
            i -= n;
        }
        unreachable!("edge index out of range")
    }

    pub(crate) fn squared_distance_to_point(&self, p: &Point<F>) -> F {
        if self.locate(p) != Location::Exterior {
            return constant(0);
        }
        let edge_distance = match self.index.tree() {
            Some(tree) => {
                let query = BBox::of_point(p);
                let border = self.border.vertices().len();
                tree.nearest(
                    |b| b.squared_distance_to(&query),
                    |i| self.edge(i, border).squared_distance_to_point(p),
                )
                .map(|(_, d)| d)
            }
            None => self.edges().map(|e| e.squared_distance_to_point(p)).min(),
        };
        edge_distance.unwrap_or_else(|| constant(0))
    }

    pub(crate) fn squared_distance_to_segment(&self, s: &Segment<F>) -> F {
        if self.locate(&s.start) != Location::Exterior {
            return constant(0);
        }
        let edge_distance = match self.index.tree() {
            Some(tree) => {
                let query = BBox::of_segment(s);
                let border = self.border.vertices().len();
                tree.nearest(
                    |b| b.squared_distance_to(&query),
                    |i| self.edge(i, border).squared_distance_to_segment(s),
                )
                .map(|(_, d)| d)
            }
            None => self.edges().map(|e| e.squared_distance_to_segment(s)).min(),
        };
        edge_distance.unwrap_or_else(|| constant(0))
    }

    pub fn index(&mut self) {
        if self.index.is_indexed() {
            return;
        }
        let tree = BoxTree::new(self.edges().map(|e| BBox::of_segment(&e)).collect());
        debug_assert_eq!(tree.len(), self.edge_count());
        tracing::debug!(kind = "Polygon", items = tree.len(), "built index");
        self.index = Index::Indexed(tree);
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_indexed()
    }

    pub fn translate(&self, step_x: &F, step_y: &F) -> Self {
        Polygon::new(
            self.border.translate(step_x, step_y),
            self.holes
                .iter()
                .map(|h| h.translate(step_x, step_y))
                .collect(),
        )
    }

    pub fn rotate(&self, cosine: &F, sine: &F, center: Option<&Point<F>>) -> Self {
        Polygon::new(
            self.border.rotate(cosine, sine, center),
            self.holes
                .iter()
                .map(|h| h.rotate(cosine, sine, center))
                .collect(),
        )
    }

    /// Scales the polygon. A zero factor flattens it onto a segment or a point.
    pub fn scale(&self, factor_x: &F, factor_y: &F) -> Compound<F> {
        let zero = constant::<F>(0);
        if *factor_x != zero && *factor_y != zero {
            return Compound::Polygon(Polygon::new(
                scale_contour(&self.border, factor_x, factor_y),
                self.holes
                    .iter()
                    .map(|h| scale_contour(h, factor_x, factor_y))
                    .collect(),
            ));
        }
        flatten(self.border.vertices().iter(), factor_x, factor_y)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.border.validate()?;
        if self.holes.is_empty() {
            return Ok(());
        }
        for hole in &self.holes {
            hole.validate()?;
        }
        let border = [Polygon::new(self.border.clone(), Vec::new())];
        let holes: Vec<_> = self
            .holes
            .iter()
            .map(|h| Polygon::new(h.clone(), Vec::new()))
            .collect();
        if !region::relate(&border, &holes).is_one_of(&[Relation::Within, Relation::Enclosed]) {
            return Err(Error::invalid(
                "Polygon",
                "Holes should lie inside the border.",
            ));
        }
        let torn = match region::difference(&border, &holes) {
            Compound::Polygon(p) => p != *self,
            _ => true,
        };
        if torn {
            return Err(Error::invalid(
                "Polygon",
                "Holes should not tear polygon apart.",
            ));
        }
        Ok(())
    }
}

fn scale_contour<F: Float>(contour: &Contour<F>, factor_x: &F, factor_y: &F) -> Contour<F> {
    Contour::new(
        contour
            .vertices()
            .iter()
            .map(|p| p.scale(factor_x, factor_y))
            .collect(),
    )
}

/// The first moments and the doubled area of a union of polygons with disjoint
/// interiors, as [`Contour::region_moments`] defines them.
pub(crate) fn region_moments<F: Float>(polygons: &[Polygon<F>]) -> (F, F, F) {
    let zero = constant::<F>(0);
    polygons
        .iter()
        .flat_map(|p| {
            std::iter::once((&p.border, Orientation::Counterclockwise))
                .chain(p.holes.iter().map(|h| (h, Orientation::Clockwise)))
        })
        .map(|(contour, wanted)| {
            let (x, y, area) = contour.region_moments();
            if contour.orientation() == wanted || contour.orientation() == Orientation::Collinear {
                (x, y, area)
            } else {
                (-x, -y, -area)
            }
        })
        .fold((zero.clone(), zero.clone(), zero), |(x, y, a), (dx, dy, da)| {
            (x + dx, y + dy, a + da)
        })
}
