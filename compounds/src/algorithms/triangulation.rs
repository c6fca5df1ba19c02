//! Constrained Delaunay triangulation of polygons.
//!
//! The polygon is first triangulated greedily: every diagonal running through the
//! polygon's interior is a candidate, and candidates are taken shortest first unless
//! they cross one taken before. Lawson flips then turn that triangulation into the
//! constrained Delaunay one. Polygon edges are never flipped.

use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
};

use crate::{
    contour::Contour,
    geom::{orientation, Orientation, Point},
    multipoint::unique,
    num::{constant, Float},
    polygon::Polygon,
    relation::{Location, Relation},
    segment::Segment,
};

type Edge = (usize, usize);

fn edge(a: usize, b: usize) -> Edge {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

struct Mesh<'a, F> {
    polygon: &'a Polygon<F>,
    vertices: Vec<Point<F>>,
    boundary: Vec<Segment<F>>,
    constraints: HashSet<Edge>,
}

impl<'a, F: Float> Mesh<'a, F> {
    fn new(polygon: &'a Polygon<F>) -> Self {
        let vertices = unique(
            polygon
                .border()
                .vertices()
                .iter()
                .chain(polygon.holes().iter().flat_map(|h| h.vertices()))
                .cloned(),
        );
        let position: HashMap<&Point<F>, usize> =
            vertices.iter().enumerate().map(|(i, p)| (p, i)).collect();
        let boundary: Vec<_> = polygon.edges().collect();
        // Every edge endpoint is one of the vertices.
        let constraints = boundary
            .iter()
            .map(|s| edge(position[&s.start], position[&s.end]))
            .collect();
        Mesh {
            polygon,
            vertices,
            boundary,
            constraints,
        }
    }

    fn segment(&self, (a, b): Edge) -> Segment<F> {
        Segment::new(self.vertices[a].clone(), self.vertices[b].clone())
    }

    fn is_inner_diagonal(&self, (a, b): Edge) -> bool {
        let s = self.segment((a, b));
        let through_vertex = self
            .vertices
            .iter()
            .enumerate()
            .any(|(k, v)| k != a && k != b && s.contains(v));
        if through_vertex {
            return false;
        }
        let meets_boundary = self
            .boundary
            .iter()
            .any(|e| !e.relate(&s).is_one_of(&[Relation::Disjoint, Relation::Touch]));
        !meets_boundary && self.polygon.locate(&s.centroid()) == Location::Interior
    }

    fn counterclockwise(&self, [a, b, c]: [usize; 3]) -> [usize; 3] {
        let v = &self.vertices;
        if orientation(&v[a], &v[b], &v[c]) == Orientation::Clockwise {
            [a, c, b]
        } else {
            [a, b, c]
        }
    }

    fn is_face(&self, [a, b, c]: [usize; 3]) -> bool {
        let v = &self.vertices;
        if orientation(&v[a], &v[b], &v[c]) == Orientation::Collinear {
            return false;
        }
        let three = constant::<F>(3);
        let centroid = Point::new(
            (v[a].x.clone() + &v[b].x + &v[c].x) / &three,
            (v[a].y.clone() + &v[b].y + &v[c].y) / &three,
        );
        if self.polygon.locate(&centroid) != Location::Interior {
            return false;
        }
        let [a, b, c] = self.counterclockwise([a, b, c]);
        let strictly_left = |from: usize, to: usize, p: &Point<F>| {
            orientation(&v[from], &v[to], p) == Orientation::Counterclockwise
        };
        !v.iter().enumerate().any(|(k, p)| {
            k != a
                && k != b
                && k != c
                && strictly_left(a, b, p)
                && strictly_left(b, c, p)
                && strictly_left(c, a, p)
        })
    }

    /// Triangulates greedily, taking diagonals shortest first.
    fn greedy(&self) -> Vec<[usize; 3]> {
        let n = self.vertices.len();
        let mut diagonals: Vec<Edge> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .filter(|e| !self.constraints.contains(e) && self.is_inner_diagonal(*e))
            .collect();
        diagonals
            .sort_by_cached_key(|&(a, b)| self.vertices[a].squared_distance_to(&self.vertices[b]));

        let mut edges: Vec<Edge> = self.constraints.iter().copied().collect();
        let mut taken: Vec<Segment<F>> = Vec::new();
        for diagonal in diagonals {
            let s = self.segment(diagonal);
            if taken.iter().all(|t| t.relate(&s) != Relation::Cross) {
                taken.push(s);
                edges.push(diagonal);
            }
        }
        edges.sort_unstable();

        let mut neighbours = vec![HashSet::new(); n];
        for &(a, b) in &edges {
            neighbours[a].insert(b);
            neighbours[b].insert(a);
        }
        let mut triangles = Vec::new();
        for &(a, b) in &edges {
            let mut apexes: Vec<_> = neighbours[a]
                .intersection(&neighbours[b])
                .copied()
                .filter(|&c| c > b)
                .collect();
            apexes.sort_unstable();
            for c in apexes {
                if self.is_face([a, b, c]) {
                    triangles.push(self.counterclockwise([a, b, c]));
                }
            }
        }
        tracing::trace!(
            vertices = n,
            triangles = triangles.len(),
            "greedy triangulation"
        );
        triangles
    }

    /// Finds an edge that isn't locally Delaunay and can be flipped.
    fn flippable(&self, triangles: &[[usize; 3]]) -> Option<(usize, usize, [usize; 4])> {
        let mut around: HashMap<Edge, Vec<usize>> = HashMap::new();
        for (t, triangle) in triangles.iter().enumerate() {
            for k in 0..3 {
                around
                    .entry(edge(triangle[k], triangle[(k + 1) % 3]))
                    .or_default()
                    .push(t);
            }
        }
        let mut inner: Vec<_> = around
            .into_iter()
            .filter(|(e, _)| !self.constraints.contains(e))
            .collect();
        inner.sort_unstable();
        let v = &self.vertices;
        inner.into_iter().find_map(|((a, b), sides)| {
            let &[t, u] = sides.as_slice() else {
                return None;
            };
            let apex = |t: usize| triangles[t].into_iter().find(|&k| k != a && k != b);
            let (c, d) = (apex(t)?, apex(u)?);
            let [p, q, r] = triangles[t];
            if F::in_circle(&v[p], &v[q], &v[r], &v[d]) != Ordering::Greater {
                return None;
            }
            let (side_a, side_b) = (
                orientation(&v[c], &v[d], &v[a]),
                orientation(&v[c], &v[d], &v[b]),
            );
            let convex = side_a != Orientation::Collinear
                && side_b != Orientation::Collinear
                && side_a != side_b;
            convex.then_some((t, u, [a, b, c, d]))
        })
    }
}

/// Splits a polygon into triangles forming its constrained Delaunay triangulation.
pub(crate) fn triangulate<F: Float>(polygon: &Polygon<F>) -> Vec<Polygon<F>> {
    let mesh = Mesh::new(polygon);
    let mut triangles = mesh.greedy();
    let mut flips = 0;
    while let Some((t, u, [a, b, c, d])) = mesh.flippable(&triangles) {
        triangles[t] = mesh.counterclockwise([a, c, d]);
        triangles[u] = mesh.counterclockwise([b, c, d]);
        flips += 1;
    }
    tracing::trace!(flips, "delaunay flips");
    triangles.sort_unstable();
    triangles
        .into_iter()
        .map(|t| {
            let vertices = t.iter().map(|&k| mesh.vertices[k].clone()).collect();
            Polygon::new(Contour::new(vertices), Vec::new())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use malachite::Rational;

    fn p(x: i64, y: i64) -> Point<Rational> {
        Point::from((x, y))
    }

    fn contour(vertices: &[(i64, i64)]) -> Contour<Rational> {
        Contour::new(vertices.iter().map(|&v| Point::from(v)).collect())
    }

    /// No triangle vertex lies strictly inside the circumcircle of a neighbouring
    /// triangle across an edge that isn't part of the polygon.
    fn assert_delaunay(polygon: &Polygon<Rational>, triangles: &[Polygon<Rational>]) {
        let constraints: HashSet<_> = polygon.edges().collect();
        for t in triangles {
            let tv = t.border().vertices();
            for u in triangles {
                let uv = u.border().vertices();
                let shared: Vec<_> = tv.iter().filter(|p| uv.contains(p)).collect();
                if t == u || shared.len() != 2 {
                    continue;
                }
                let common = Segment::new(shared[0].clone(), shared[1].clone());
                if constraints.contains(&common) {
                    continue;
                }
                for d in uv.iter().filter(|p| !tv.contains(p)) {
                    assert_ne!(
                        Rational::in_circle(&tv[0], &tv[1], &tv[2], d),
                        Ordering::Greater,
                        "{t:?} and {u:?}"
                    );
                }
            }
        }
    }

    fn total_area(triangles: &[Polygon<Rational>]) -> Rational {
        triangles
            .iter()
            .fold(Rational::from(0), |acc, t| acc + t.area())
    }

    #[test]
    fn square() {
        let square = Polygon::new(contour(&[(0, 0), (2, 0), (2, 2), (0, 2)]), vec![]);
        let triangles = triangulate(&square);
        assert_eq!(triangles.len(), 2);
        assert_eq!(total_area(&triangles), Rational::from(4));
    }

    #[test]
    fn flips_the_greedy_diagonal() {
        // The shorter diagonal (0,0)-(8,0) is taken first, but isn't Delaunay.
        let kite = Polygon::new(contour(&[(0, 0), (4, -1), (8, 0), (4, 10)]), vec![]);
        let triangles = triangulate(&kite);
        assert_eq!(triangles.len(), 2);
        assert!(triangles.iter().all(|t| {
            let v = t.border().vertices();
            v.contains(&p(4, -1)) && v.contains(&p(4, 10))
        }));
        assert_delaunay(&kite, &triangles);
    }

    #[test]
    fn holed_square() {
        let holed = Polygon::new(
            contour(&[(0, 0), (6, 0), (6, 6), (0, 6)]),
            vec![contour(&[(2, 2), (2, 4), (4, 4), (4, 2)])],
        );
        let triangles = triangulate(&holed);
        assert_eq!(triangles.len(), 8);
        assert_eq!(total_area(&triangles), Rational::from(32));
        assert!(triangles
            .iter()
            .all(|t| t.locate(&p(3, 3)) == Location::Exterior));
        assert_delaunay(&holed, &triangles);
    }

    #[test]
    fn concave() {
        let arrow = Polygon::new(
            contour(&[(0, 0), (4, 2), (8, 0), (4, 6)]),
            vec![],
        );
        let triangles = triangulate(&arrow);
        assert_eq!(triangles.len(), 2);
        assert_eq!(total_area(&triangles), arrow.area());
    }
}
