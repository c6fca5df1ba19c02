use std::{
    collections::HashSet,
    hash::{Hash, Hasher},
};

use crate::{
    algorithms::{
        fragment::{cross_or_overlap, fragment, merge},
        location::{locate_on_segments, locate_on_tree},
    },
    compound::Compound,
    geom::Point,
    index::{BBox, BoxTree, Index},
    multipoint::{unique, Multipoint},
    num::{constant, Float},
    packing::{pack_mix, pack_points, pack_segments},
    relation::Location,
    segment::Segment,
    Error,
};

/// An unordered collection of segments.
#[derive(Clone)]
pub struct Multisegment<F> {
    segments: Vec<Segment<F>>,
    index: Index<F>,
}

impl<F: std::fmt::Debug> std::fmt::Debug for Multisegment<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Multisegment").field(&self.segments).finish()
    }
}

impl<F: Float> PartialEq for Multisegment<F> {
    fn eq(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len() && self.set() == other.set()
    }
}

impl<F: Float> Eq for Multisegment<F> {}

impl<F: Float> Hash for Multisegment<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut segments: Vec<_> = self
            .segments
            .iter()
            .map(|s| {
                let (a, b) = s.sorted_endpoints();
                (a.clone(), b.clone())
            })
            .collect();
        segments.sort();
        segments.hash(state);
    }
}

impl<F: Float> Multisegment<F> {
    pub fn new(segments: Vec<Segment<F>>) -> Self {
        Multisegment {
            segments,
            index: Index::Unindexed,
        }
    }

    pub fn segments(&self) -> &[Segment<F>] {
        &self.segments
    }

    fn set(&self) -> HashSet<&Segment<F>> {
        self.segments.iter().collect()
    }

    pub fn length(&self) -> F {
        self.segments
            .iter()
            .fold(constant(0), |acc: F, s| acc + s.length())
    }

    /// The centroid of the segments, each weighted by its length.
    pub fn centroid(&self) -> Result<Point<F>, Error> {
        let zero = constant::<F>(0);
        let (x, y, total) = self.segments.iter().fold(
            (zero.clone(), zero.clone(), zero.clone()),
            |(x, y, total), s| {
                let length = s.length();
                let middle = s.centroid();
                (x + middle.x * &length, y + middle.y * &length, total + length)
            },
        );
        if total == zero {
            let points: Vec<_> = self.segments.iter().map(|s| s.start.clone()).collect();
            return Multipoint::new(points).centroid();
        }
        Ok(Point::new(x / &total, y / total))
    }

    pub fn locate(&self, p: &Point<F>) -> Location {
        match self.index.tree() {
            Some(tree) => locate_on_tree(tree, |i| self.segments[i].clone(), p),
            None => locate_on_segments(&self.segments, p),
        }
    }

    pub(crate) fn squared_distance_to_point(&self, p: &Point<F>) -> Option<F> {
        match self.index.tree() {
            Some(tree) => {
                let query = BBox::of_point(p);
                tree.nearest(
                    |b| b.squared_distance_to(&query),
                    |i| self.segments[i].squared_distance_to_point(p),
                )
                .map(|(_, d)| d)
            }
            None => self
                .segments
                .iter()
                .map(|s| s.squared_distance_to_point(p))
                .min(),
        }
    }

    pub(crate) fn squared_distance_to_segment(&self, other: &Segment<F>) -> Option<F> {
        match self.index.tree() {
            Some(tree) => {
                let query = BBox::of_segment(other);
                tree.nearest(
                    |b| b.squared_distance_to(&query),
                    |i| self.segments[i].squared_distance_to_segment(other),
                )
                .map(|(_, d)| d)
            }
            None => self
                .segments
                .iter()
                .map(|s| s.squared_distance_to_segment(other))
                .min(),
        }
    }

    pub fn index(&mut self) {
        if self.index.is_indexed() {
            return;
        }
        let tree = BoxTree::new(self.segments.iter().map(BBox::of_segment).collect());
        tracing::debug!(kind = "Multisegment", items = tree.len(), "built index");
        self.index = Index::Indexed(tree);
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_indexed()
    }

    pub fn translate(&self, step_x: &F, step_y: &F) -> Self {
        Multisegment::new(
            self.segments
                .iter()
                .map(|s| s.translate(step_x, step_y))
                .collect(),
        )
    }

    pub fn rotate(&self, cosine: &F, sine: &F, center: Option<&Point<F>>) -> Self {
        Multisegment::new(
            self.segments
                .iter()
                .map(|s| s.rotate(cosine, sine, center))
                .collect(),
        )
    }

    /// Scales the segments.
    ///
    /// With a zero factor, the segments that lose their extent become points, and the
    /// ones that don't are flattened onto a common line and merged.
    pub fn scale(&self, factor_x: &F, factor_y: &F) -> Compound<F> {
        let zero = constant::<F>(0);
        if *factor_x != zero && *factor_y != zero {
            return Compound::Multisegment(Multisegment::new(
                self.segments
                    .iter()
                    .map(|s| s.scale_unchecked(factor_x, factor_y))
                    .collect(),
            ));
        }
        let (kept, lost): (Vec<_>, Vec<_>) = self
            .segments
            .iter()
            .partition(|s| s.survives_scale(factor_x, factor_y));
        let scaled: Vec<_> = kept
            .into_iter()
            .map(|s| s.scale_unchecked(factor_x, factor_y))
            .collect();
        let (pieces, _) = fragment(&scaled, &[]);
        let segments = merge(pieces);
        let points = unique(
            lost.into_iter()
                .map(|s| s.start.scale(factor_x, factor_y))
                .filter(|p| !segments.iter().any(|s| s.contains(p))),
        );
        pack_mix(pack_points(points), pack_segments(segments), Compound::Empty)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let n = self.segments.len();
        if n < 2 {
            return Err(Error::invalid(
                "Multisegment",
                format!("Multisegment should have at least 2 segments, but found {n}."),
            ));
        }
        for s in &self.segments {
            s.validate()?;
        }
        if self.set().len() < n {
            return Err(Error::invalid("Multisegment", "Duplicate segments found."));
        }
        if cross_or_overlap(&self.segments) {
            return Err(Error::invalid(
                "Multisegment",
                "Crossing or overlapping segments found.",
            ));
        }
        Ok(())
    }
}
