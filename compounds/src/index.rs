//! Bounding boxes and a static bounding-box tree.
//!
//! Every indexable geometry owns an [`Index`] that starts out as `Unindexed` and is
//! replaced by a [`BoxTree`] when the geometry's `index()` is called. The tree answers
//! the same questions as a linear scan, only faster, so none of the geometry methods
//! can tell the two states apart by their results.

use std::cmp::Ordering;

use crate::{
    geom::Point,
    num::{constant, Float},
    segment::Segment,
};

/// An axis-aligned bounding box.
#[derive(Clone, PartialEq, Eq)]
pub struct BBox<F> {
    pub min_x: F,
    pub max_x: F,
    pub min_y: F,
    pub max_y: F,
}

impl<F: std::fmt::Debug> std::fmt::Debug for BBox<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:?}, {:?}] x [{:?}, {:?}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

impl<F: Float> BBox<F> {
    pub fn of_point(p: &Point<F>) -> Self {
        BBox {
            min_x: p.x.clone(),
            max_x: p.x.clone(),
            min_y: p.y.clone(),
            max_y: p.y.clone(),
        }
    }

    pub fn of_segment(s: &Segment<F>) -> Self {
        let mut bbox = BBox::of_point(&s.start);
        bbox.extend(&s.end);
        bbox
    }

    /// The bounding box of a non-empty collection of points.
    pub fn of_points<'a>(mut points: impl Iterator<Item = &'a Point<F>>) -> Option<Self> {
        let mut bbox = BBox::of_point(points.next()?);
        for p in points {
            bbox.extend(p);
        }
        Some(bbox)
    }

    pub fn extend(&mut self, p: &Point<F>) {
        if p.x < self.min_x {
            self.min_x = p.x.clone();
        }
        if p.x > self.max_x {
            self.max_x = p.x.clone();
        }
        if p.y < self.min_y {
            self.min_y = p.y.clone();
        }
        if p.y > self.max_y {
            self.max_y = p.y.clone();
        }
    }

    pub fn merge(&self, other: &Self) -> Self {
        BBox {
            min_x: self.min_x.clone().min(other.min_x.clone()),
            max_x: self.max_x.clone().max(other.max_x.clone()),
            min_y: self.min_y.clone().min(other.min_y.clone()),
            max_y: self.max_y.clone().max(other.max_y.clone()),
        }
    }

    pub fn contains(&self, p: &Point<F>) -> bool {
        self.min_x <= p.x && p.x <= self.max_x && self.min_y <= p.y && p.y <= self.max_y
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// A lower bound on the squared distance from anything inside `self` to anything
    /// inside `other`.
    pub fn squared_distance_to(&self, other: &Self) -> F {
        let zero = constant::<F>(0);
        let gap = |lo_a: &F, hi_a: &F, lo_b: &F, hi_b: &F| {
            if hi_a < lo_b {
                lo_b.clone() - hi_a
            } else if hi_b < lo_a {
                lo_a.clone() - hi_b
            } else {
                zero.clone()
            }
        };
        let dx = gap(&self.min_x, &self.max_x, &other.min_x, &other.max_x);
        let dy = gap(&self.min_y, &self.max_y, &other.min_y, &other.max_y);
        dx.clone() * dx + dy.clone() * dy
    }

    fn center_cmp(&self, other: &Self, horizontal: bool) -> Ordering {
        if horizontal {
            (self.min_x.clone() + &self.max_x).cmp(&(other.min_x.clone() + &other.max_x))
        } else {
            (self.min_y.clone() + &self.max_y).cmp(&(other.min_y.clone() + &other.max_y))
        }
    }
}

#[derive(Clone, Debug)]
enum NodeKind {
    Leaf(usize),
    Branch(usize, usize),
}

#[derive(Clone, Debug)]
struct Node<F> {
    bbox: BBox<F>,
    kind: NodeKind,
}

/// A binary tree of bounding boxes over a fixed list of items.
///
/// Items are identified by their position in the list the tree was built from.
#[derive(Clone, Debug)]
pub struct BoxTree<F> {
    nodes: Vec<Node<F>>,
    root: Option<usize>,
}

impl<F: Float> BoxTree<F> {
    pub fn new(boxes: Vec<BBox<F>>) -> Self {
        let mut tree = BoxTree {
            nodes: Vec::with_capacity(2 * boxes.len()),
            root: None,
        };
        let mut items: Vec<(usize, BBox<F>)> = boxes.into_iter().enumerate().collect();
        if !items.is_empty() {
            tree.root = Some(tree.build(&mut items));
        }
        tree
    }

    pub fn len(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Leaf(_)))
            .count()
    }

    fn build(&mut self, items: &mut [(usize, BBox<F>)]) -> usize {
        if let [(item, bbox)] = items {
            self.nodes.push(Node {
                bbox: bbox.clone(),
                kind: NodeKind::Leaf(*item),
            });
            return self.nodes.len() - 1;
        }

        let bbox = items[1..]
            .iter()
            .fold(items[0].1.clone(), |acc, (_, b)| acc.merge(b));
        let horizontal = bbox.max_x.clone() - &bbox.min_x >= bbox.max_y.clone() - &bbox.min_y;
        items.sort_by(|(_, a), (_, b)| a.center_cmp(b, horizontal));
        let mid = items.len() / 2;
        let (left_items, right_items) = items.split_at_mut(mid);
        let left = self.build(left_items);
        let right = self.build(right_items);
        self.nodes.push(Node {
            bbox,
            kind: NodeKind::Branch(left, right),
        });
        self.nodes.len() - 1
    }

    /// Calls `visit` on every item whose box passes `keep`.
    ///
    /// `keep` must be monotone: if it rejects a box, it must also reject every box
    /// contained in it.
    pub fn visit(&self, keep: impl Fn(&BBox<F>) -> bool, mut visit: impl FnMut(usize)) {
        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if !keep(&node.bbox) {
                continue;
            }
            match node.kind {
                NodeKind::Leaf(item) => visit(item),
                NodeKind::Branch(left, right) => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
    }

    /// All the items whose boxes contain `p`.
    pub fn containing(&self, p: &Point<F>) -> Vec<usize> {
        let mut ret = Vec::new();
        self.visit(|b| b.contains(p), |i| ret.push(i));
        ret.sort_unstable();
        ret
    }

    /// All the items whose boxes intersect `query`.
    pub fn intersecting(&self, query: &BBox<F>) -> Vec<usize> {
        let mut ret = Vec::new();
        self.visit(|b| b.intersects(query), |i| ret.push(i));
        ret.sort_unstable();
        ret
    }

    /// All pairs `(i, j)`, `i < j`, of items among `boxes` whose boxes intersect.
    ///
    /// `boxes` must be the list the tree was built from.
    pub(crate) fn intersecting_pairs(&self, boxes: &[BBox<F>]) -> Vec<(usize, usize)> {
        boxes
            .iter()
            .enumerate()
            .flat_map(|(i, b)| {
                self.intersecting(b)
                    .into_iter()
                    .filter(move |&j| j > i)
                    .map(move |j| (i, j))
            })
            .collect()
    }

    /// Finds the item minimizing `distance`, by branch and bound.
    ///
    /// `bound` must never exceed `distance` for any item inside the box it is given.
    pub fn nearest(
        &self,
        bound: impl Fn(&BBox<F>) -> F,
        distance: impl Fn(usize) -> F,
    ) -> Option<(usize, F)> {
        let mut best: Option<(usize, F)> = None;
        let mut stack: Vec<(usize, F)> = self
            .root
            .map(|r| (r, bound(&self.nodes[r].bbox)))
            .into_iter()
            .collect();
        while let Some((idx, lower)) = stack.pop() {
            if best.as_ref().is_some_and(|(_, d)| *d <= lower) {
                continue;
            }
            match self.nodes[idx].kind {
                NodeKind::Leaf(item) => {
                    let d = distance(item);
                    if best.as_ref().map_or(true, |(_, best_d)| d < *best_d) {
                        best = Some((item, d));
                    }
                }
                NodeKind::Branch(left, right) => {
                    let left_bound = bound(&self.nodes[left].bbox);
                    let right_bound = bound(&self.nodes[right].bbox);
                    // Visit the more promising child first.
                    if left_bound <= right_bound {
                        stack.push((right, right_bound));
                        stack.push((left, left_bound));
                    } else {
                        stack.push((left, left_bound));
                        stack.push((right, right_bound));
                    }
                }
            }
        }
        best
    }
}

/// The memoized spatial index of a geometry.
#[derive(Clone, Debug, Default)]
pub enum Index<F> {
    #[default]
    Unindexed,
    Indexed(BoxTree<F>),
}

impl<F> Index<F> {
    pub fn tree(&self) -> Option<&BoxTree<F>> {
        match self {
            Index::Unindexed => None,
            Index::Indexed(tree) => Some(tree),
        }
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self, Index::Indexed(_))
    }
}
