//! Heterogeneous geometries: up to one component of each dimension.
//!
//! Relations against a mix are assembled from the relations against its components.
//! The components never overlap (points lie off the linear and shaped parts, and the
//! linear part stays outside the shape's interior), and that is what makes the case
//! analysis below sound.

use std::hash::{Hash, Hasher};

use crate::{
    compound::{Compound, Dimension},
    geom::Point,
    num::{constant, Float},
    packing::{pack_mix, pack_points},
    relation::{Location, Relation},
    Error,
};

use Relation::*;

/// A discrete, a linear and a shaped component, at least two of them non-empty.
#[derive(Clone)]
pub struct Mix<F> {
    discrete: Box<Compound<F>>,
    linear: Box<Compound<F>>,
    shaped: Box<Compound<F>>,
}

impl<F: std::fmt::Debug> std::fmt::Debug for Mix<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mix")
            .field("discrete", &self.discrete)
            .field("linear", &self.linear)
            .field("shaped", &self.shaped)
            .finish()
    }
}

impl<F: Float> PartialEq for Mix<F> {
    fn eq(&self, other: &Self) -> bool {
        self.discrete == other.discrete
            && self.linear == other.linear
            && self.shaped == other.shaped
    }
}

impl<F: Float> Eq for Mix<F> {}

impl<F: Float> Hash for Mix<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.discrete.hash(state);
        self.linear.hash(state);
        self.shaped.hash(state);
    }
}

/// The point set penetrates the other one's interior from outside.
fn penetrates(r: Relation) -> bool {
    r.is_one_of(&[Cross, Enclosed, Within])
}

fn is_component(r: Relation) -> bool {
    r.is_one_of(&[Component, Equal])
}

impl<F: Float> Mix<F> {
    pub fn new(discrete: Compound<F>, linear: Compound<F>, shaped: Compound<F>) -> Self {
        Mix {
            discrete: Box::new(discrete),
            linear: Box::new(linear),
            shaped: Box::new(shaped),
        }
    }

    pub fn discrete(&self) -> &Compound<F> {
        &self.discrete
    }

    pub fn linear(&self) -> &Compound<F> {
        &self.linear
    }

    pub fn shaped(&self) -> &Compound<F> {
        &self.shaped
    }

    pub(crate) fn components(&self) -> impl Iterator<Item = &Compound<F>> {
        [&*self.discrete, &*self.linear, &*self.shaped].into_iter()
    }

    pub(crate) fn into_parts(self) -> (Compound<F>, Compound<F>, Compound<F>) {
        (*self.discrete, *self.linear, *self.shaped)
    }

    pub fn locate(&self, p: &Point<F>) -> Location {
        self.components()
            .map(|c| c.locate(p))
            .find(|location| *location != Location::Exterior)
            .unwrap_or(Location::Exterior)
    }

    pub fn centroid(&self) -> Result<Point<F>, Error> {
        if self.shaped.is_empty() {
            self.linear.centroid()
        } else {
            self.shaped.centroid()
        }
    }

    pub fn index(&mut self) {
        self.discrete.index();
        self.linear.index();
        self.shaped.index();
    }

    pub fn translate(&self, step_x: &F, step_y: &F) -> Self {
        Mix::new(
            self.discrete.translate(step_x, step_y),
            self.linear.translate(step_x, step_y),
            self.shaped.translate(step_x, step_y),
        )
    }

    pub fn rotate(&self, cosine: &F, sine: &F, center: Option<&Point<F>>) -> Self {
        Mix::new(
            self.discrete.rotate(cosine, sine, center),
            self.linear.rotate(cosine, sine, center),
            self.shaped.rotate(cosine, sine, center),
        )
    }

    pub fn scale(&self, factor_x: &F, factor_y: &F) -> Compound<F> {
        let zero = constant::<F>(0);
        let (discrete, linear, shaped) = (
            self.discrete.scale(factor_x, factor_y),
            self.linear.scale(factor_x, factor_y),
            self.shaped.scale(factor_x, factor_y),
        );
        if *factor_x != zero && *factor_y != zero {
            Compound::Mix(Mix::new(discrete, linear, shaped))
        } else if *factor_x != zero || *factor_y != zero {
            // Collapsed components may now overlap, so they have to be merged.
            discrete.union(&linear).union(&shaped)
        } else {
            pack_points(vec![Point::new(factor_x.clone(), factor_y.clone())])
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let non_empty = self.components().filter(|c| !c.is_empty()).count();
        if non_empty < 2 {
            return Err(Error::invalid(
                "Mix",
                "At least 2 components should not be empty.",
            ));
        }
        let slots = [
            ("Discrete", &self.discrete, Dimension::Discrete),
            ("Linear", &self.linear, Dimension::Linear),
            ("Shaped", &self.shaped, Dimension::Shaped),
        ];
        for (name, component, dimension) in slots {
            if !component.is_empty() && component.dimension() != dimension {
                return Err(Error::invalid(
                    "Mix",
                    format!(
                        "{name} component should not be a {}.",
                        component.kind_name()
                    ),
                ));
            }
            component.validate()?;
        }
        if !self.discrete.disjoint(&self.linear) || !self.discrete.disjoint(&self.shaped) {
            return Err(Error::invalid(
                "Mix",
                "Discrete component should be disjoint from other components.",
            ));
        }
        let relation = self.shaped.relate(&self.linear);
        if relation == Cross {
            return Err(Error::invalid(
                "Mix",
                "Linear component should not cross shaped component.",
            ));
        }
        if relation.is_one_of(&[Component, Enclosed, Within]) {
            return Err(Error::invalid(
                "Mix",
                "Linear component should not be subset of shaped component.",
            ));
        }
        if relation == Touch {
            let along_border = self.shaped.polygons().iter().any(|polygon| {
                std::iter::once(polygon.border())
                    .chain(polygon.holes())
                    .any(|contour| {
                        Compound::Contour(contour.clone())
                            .relate(&self.linear)
                            .is_one_of(&[Overlap, Composite])
                    })
            });
            if along_border {
                return Err(Error::invalid(
                    "Mix",
                    "Linear component should not overlap shaped component borders.",
                ));
            }
        }
        Ok(())
    }

    /// How `other` sits with respect to this mix.
    pub(crate) fn relate(&self, other: &Compound<F>) -> Relation {
        match other {
            Compound::Empty => Disjoint,
            Compound::Mix(m) => self.relate_mix(m),
            _ if other.is_discrete() => self.relate_discrete(other),
            _ if other.is_linear() => self.relate_linear(other),
            _ => self.relate_shaped(other),
        }
    }

    fn relate_discrete(&self, other: &Compound<F>) -> Relation {
        if self.shaped.is_empty() {
            let linear = self.linear.relate(other);
            return match linear {
                Disjoint => {
                    let discrete = self.discrete.relate(other);
                    if discrete == Disjoint {
                        Disjoint
                    } else if is_component(discrete) {
                        Component
                    } else {
                        Touch
                    }
                }
                Touch => {
                    let rest = other.difference(&self.linear);
                    if is_component(self.discrete.relate(&rest)) {
                        Component
                    } else {
                        Touch
                    }
                }
                _ => linear,
            };
        }
        let shaped = self.shaped.relate(other);
        match shaped {
            Component | Enclosed | Within => shaped,
            Touch | Cross => {
                let rest = other.difference(&self.shaped);
                if self.linear.is_empty() {
                    return if is_component(self.discrete.relate(&rest)) {
                        Component
                    } else {
                        shaped
                    };
                }
                let on_rest = if shaped == Touch { Component } else { Enclosed };
                match self.linear.relate(&rest) {
                    Disjoint => {
                        if is_component(self.discrete.relate(&rest)) {
                            on_rest
                        } else {
                            shaped
                        }
                    }
                    Touch => {
                        let rest = rest.difference(&self.linear);
                        if is_component(self.discrete.relate(&rest)) {
                            Component
                        } else {
                            shaped
                        }
                    }
                    _ => on_rest,
                }
            }
            _ => {
                let linear = self.linear.relate(other);
                let rest;
                let rest = match linear {
                    Disjoint => other,
                    Touch => {
                        rest = other.difference(&self.linear);
                        &rest
                    }
                    _ => return linear,
                };
                let discrete = self.discrete.relate(rest);
                if discrete == Disjoint {
                    if linear == Touch {
                        Touch
                    } else {
                        shaped
                    }
                } else if is_component(discrete) {
                    Component
                } else {
                    Touch
                }
            }
        }
    }

    fn relate_linear(&self, other: &Compound<F>) -> Relation {
        let with_points = |linear: Relation| {
            let discrete = self.discrete.relate(other);
            match linear {
                Composite if discrete == Composite => Composite,
                Composite => Overlap,
                _ if discrete == Composite => Touch,
                _ => discrete,
            }
        };
        if self.shaped.is_empty() {
            let linear = self.linear.relate(other);
            return match linear {
                Disjoint | Composite => with_points(linear),
                Equal => Component,
                _ => linear,
            };
        }
        let shaped = self.shaped.relate(other);
        match shaped {
            Disjoint => match self.linear.relate(other) {
                Disjoint => with_points(Disjoint),
                linear @ (Touch | Cross | Component) => linear,
                Equal => Component,
                _ => Touch,
            },
            Touch | Cross => {
                let rest = other.difference(&self.shaped);
                if is_component(self.linear.relate(&rest)) {
                    Component
                } else {
                    shaped
                }
            }
            _ => shaped,
        }
    }

    fn relate_shaped(&self, other: &Compound<F>) -> Relation {
        if self.shaped.is_empty() {
            let linear = self.linear.relate(other);
            return match linear {
                Disjoint | Touch => match self.discrete.relate(other) {
                    Disjoint => linear,
                    discrete @ (Touch | Cross) => discrete,
                    Composite => Touch,
                    _ => Cross,
                },
                Cover | Encloses => match self.discrete.relate(other) {
                    Disjoint | Touch => Cross,
                    discrete if discrete == linear || discrete == Cross => discrete,
                    _ => Encloses,
                },
                Composite => match self.discrete.relate(other) {
                    Disjoint => Touch,
                    discrete @ (Touch | Cross | Composite) => discrete,
                    _ => Cross,
                },
                _ => linear,
            };
        }
        let outside = |r: Relation| r.is_one_of(&[Disjoint, Touch, Cross]);
        let shaped = self.shaped.relate(other);
        match shaped {
            Disjoint => match self.linear.relate(other) {
                Disjoint => match self.discrete.relate(other) {
                    discrete if outside(discrete) => discrete,
                    Composite => Touch,
                    _ => Cross,
                },
                Touch | Composite => {
                    if self
                        .discrete
                        .relate(other)
                        .is_one_of(&[Disjoint, Touch, Composite])
                    {
                        Touch
                    } else {
                        Cross
                    }
                }
                _ => Cross,
            },
            Touch => {
                let touching = |r: Relation| r.is_one_of(&[Disjoint, Touch, Composite]);
                if touching(self.linear.relate(other)) && touching(self.discrete.relate(other)) {
                    shaped
                } else {
                    Cross
                }
            }
            Cover | Composite => {
                if self.linear.is_empty() {
                    let discrete = self.discrete.relate(other);
                    return if outside(discrete) {
                        Overlap
                    } else if discrete == shaped {
                        shaped
                    } else {
                        Encloses
                    };
                }
                let linear = self.linear.relate(other);
                if outside(linear) {
                    return Overlap;
                }
                if self.discrete.is_empty() {
                    return if linear == shaped { shaped } else { Encloses };
                }
                let discrete = self.discrete.relate(other);
                if outside(discrete) {
                    Overlap
                } else if discrete == shaped && linear == shaped {
                    shaped
                } else {
                    Encloses
                }
            }
            Encloses => {
                let linear_inside = self.linear.is_empty() || !outside(self.linear.relate(other));
                let discrete_inside =
                    self.discrete.is_empty() || !outside(self.discrete.relate(other));
                if linear_inside && discrete_inside {
                    Encloses
                } else {
                    Overlap
                }
            }
            Equal => Component,
            _ => shaped,
        }
    }

    fn relate_mix(&self, other: &Mix<F>) -> Relation {
        match (self.shaped.is_empty(), other.shaped.is_empty()) {
            (true, true) => self.relate_linear_mix(other),
            (true, false) => self.relate_to_shaped_mix(other),
            (false, true) => self.relate_shaped_to_mix(other),
            (false, false) => self.relate_shaped_mixes(other),
        }
    }

    /// Neither mix has a shaped component.
    fn relate_linear_mix(&self, other: &Mix<F>) -> Relation {
        let linear = self.linear.relate(&other.linear);
        match linear {
            Disjoint => {
                if self.relate_discrete(&other.discrete) == Disjoint
                    && other.relate_discrete(&self.discrete) == Disjoint
                {
                    Disjoint
                } else {
                    Touch
                }
            }
            Composite => {
                if other.relate_discrete(&self.discrete) == Component {
                    Composite
                } else {
                    Overlap
                }
            }
            Equal => match self.discrete.relate(&other.discrete) {
                Disjoint => Overlap,
                discrete => discrete,
            },
            Component => {
                if self.relate_discrete(&other.discrete) == Component {
                    Component
                } else {
                    Overlap
                }
            }
            _ => linear,
        }
    }

    /// Only `other` has a shaped component.
    fn relate_to_shaped_mix(&self, other: &Mix<F>) -> Relation {
        let linear = other.relate_linear(&self.linear);
        if linear == Cross {
            return Cross;
        }
        let discrete = other.relate_discrete(&self.discrete);
        let outside = discrete.is_one_of(&[Disjoint, Touch, Cross]);
        match linear {
            Disjoint if outside => discrete,
            Disjoint if discrete == Component => Touch,
            Disjoint => Cross,
            Touch if penetrates(discrete) => Cross,
            Touch => Touch,
            Component => match discrete {
                Disjoint => Touch,
                Touch | Cross => discrete,
                Component => Composite,
                _ => Encloses,
            },
            _ if outside => Cross,
            _ if discrete == Within => Cover,
            _ => Encloses,
        }
    }

    /// Only this mix has a shaped component.
    fn relate_shaped_to_mix(&self, other: &Mix<F>) -> Relation {
        let linear = self.relate_linear(&other.linear);
        if linear == Cross {
            return Cross;
        }
        let discrete = self.relate_discrete(&other.discrete);
        let outside = discrete.is_one_of(&[Disjoint, Touch, Cross]);
        match linear {
            Disjoint if outside => discrete,
            Disjoint if discrete == Component => Touch,
            Disjoint => Cross,
            Touch if penetrates(discrete) => Cross,
            Touch => Touch,
            Component => match discrete {
                Disjoint | Touch => Touch,
                Cross | Component => discrete,
                _ => Enclosed,
            },
            _ if outside => Cross,
            Enclosed => Enclosed,
            _ if discrete == Component => Enclosed,
            _ => linear,
        }
    }

    /// Both mixes have shaped components.
    fn relate_shaped_mixes(&self, other: &Mix<F>) -> Relation {
        let shaped = self.shaped.relate(&other.shaped);
        match shaped {
            Disjoint | Touch => {
                // Relations against an empty component are always `Disjoint`.
                let parts = [
                    self.relate_linear(&other.linear),
                    other.relate_linear(&self.linear),
                    self.relate_discrete(&other.discrete),
                    other.relate_discrete(&self.discrete),
                ];
                if parts.into_iter().any(penetrates) {
                    Cross
                } else if parts.into_iter().all(|r| r == Disjoint) {
                    shaped
                } else {
                    Touch
                }
            }
            Cover | Encloses | Composite => {
                let covered = |r: Relation| r.is_one_of(&[Cover, Encloses, Composite]);
                let with_points = || {
                    let discrete = other.relate_discrete(&self.discrete).complement();
                    if discrete == shaped {
                        shaped
                    } else if covered(discrete) {
                        Encloses
                    } else {
                        Overlap
                    }
                };
                if self.linear.is_empty() {
                    return with_points();
                }
                let linear = other.relate_linear(&self.linear).complement();
                if linear == shaped {
                    if self.discrete.is_empty() {
                        shaped
                    } else {
                        with_points()
                    }
                } else if covered(linear) {
                    let discrete_covered = self.discrete.is_empty()
                        || covered(other.relate_discrete(&self.discrete).complement());
                    if discrete_covered {
                        Encloses
                    } else {
                        Overlap
                    }
                } else {
                    Overlap
                }
            }
            Equal => self.relate_equal_shapes(other),
            Component | Enclosed | Within => {
                let inside = |r: Relation| r.is_one_of(&[Component, Enclosed, Within]);
                let with_points = || {
                    let discrete = self.relate_discrete(&other.discrete);
                    if discrete == shaped {
                        shaped
                    } else if inside(discrete) {
                        Enclosed
                    } else {
                        Overlap
                    }
                };
                if other.linear.is_empty() {
                    return with_points();
                }
                let linear = self.relate_linear(&other.linear);
                if linear == shaped {
                    if other.discrete.is_empty() {
                        shaped
                    } else {
                        with_points()
                    }
                } else if inside(linear) {
                    let discrete_inside = other.discrete.is_empty()
                        || inside(self.relate_discrete(&other.discrete));
                    if discrete_inside {
                        Enclosed
                    } else {
                        Overlap
                    }
                } else {
                    Overlap
                }
            }
            _ => shaped,
        }
    }

    fn relate_equal_shapes(&self, other: &Mix<F>) -> Relation {
        let (no_points, no_other_points) = (self.discrete.is_empty(), other.discrete.is_empty());
        match (self.linear.is_empty(), other.linear.is_empty()) {
            (true, true) => match self.discrete.relate(&other.discrete) {
                _ if no_points && no_other_points => Equal,
                Equal => Equal,
                discrete @ (Composite | Component) => discrete,
                _ => Overlap,
            },
            (true, false) => {
                if is_component(other.relate_discrete(&self.discrete)) {
                    Composite
                } else {
                    Overlap
                }
            }
            (false, true) => {
                if is_component(self.relate_discrete(&other.discrete)) {
                    Component
                } else {
                    Overlap
                }
            }
            (false, false) => match self.linear.relate(&other.linear) {
                Composite => {
                    if no_points || is_component(other.relate_discrete(&self.discrete)) {
                        Composite
                    } else {
                        Overlap
                    }
                }
                Equal => {
                    let discrete = self.discrete.relate(&other.discrete);
                    if (no_points && no_other_points) || discrete == Equal {
                        Equal
                    } else if no_points {
                        Composite
                    } else if no_other_points {
                        Component
                    } else if discrete.is_one_of(&[Component, Composite]) {
                        discrete
                    } else {
                        Overlap
                    }
                }
                Component => {
                    if no_other_points || is_component(self.relate_discrete(&other.discrete)) {
                        Component
                    } else {
                        Overlap
                    }
                }
                _ => Overlap,
            },
        }
    }

    pub(crate) fn intersection(&self, other: &Compound<F>) -> Compound<F> {
        let mut discrete = self.discrete.intersection(other);
        let linear = self.linear.intersection(other);
        let shaped = self.shaped.intersection(other);

        // Lower-dimensional leftovers move down into the matching component.
        let (linear, shaped) = match linear {
            points if points.is_discrete() => (Compound::Empty, shaped.union(&points)),
            Compound::Mix(m) => {
                let (points, linear, _) = m.into_parts();
                (linear, shaped.union(&points))
            }
            linear => (linear, shaped),
        };
        let (linear, shaped) = match shaped {
            points if points.is_discrete() => match linear.union(&points) {
                Compound::Mix(m) => {
                    let (points, linear, _) = m.into_parts();
                    discrete = discrete.union(&points);
                    (linear, Compound::Empty)
                }
                linear => (linear, Compound::Empty),
            },
            segments if segments.is_linear() => (linear.union(&segments), Compound::Empty),
            Compound::Mix(m) => {
                let (points, segments, shaped) = m.into_parts();
                (linear.union(&segments).union(&points), shaped)
            }
            shaped => (linear, shaped),
        };
        let linear = match linear {
            points if points.is_discrete() => {
                discrete = discrete.union(&points);
                Compound::Empty
            }
            Compound::Mix(m) => {
                let (points, linear, _) = m.into_parts();
                discrete = discrete.union(&points);
                linear
            }
            linear => linear,
        };
        pack_mix(discrete, linear, shaped)
    }

    pub(crate) fn union(&self, other: &Compound<F>) -> Compound<F> {
        match other.dimension() {
            Dimension::Empty => Compound::Mix(self.clone()),
            Dimension::Discrete => {
                let rest = other.difference(&self.shaped).difference(&self.linear);
                pack_mix(
                    self.discrete.union(&rest),
                    (*self.linear).clone(),
                    (*self.shaped).clone(),
                )
            }
            Dimension::Linear => {
                self.absorb_linear(self.shaped.union(other), |a, b| a.union(b))
            }
            Dimension::Shaped | Dimension::Mixed => self
                .shaped
                .union(other)
                .union(&self.linear)
                .union(&self.discrete),
        }
    }

    pub(crate) fn symmetric_difference(&self, other: &Compound<F>) -> Compound<F> {
        match other.dimension() {
            Dimension::Empty => Compound::Mix(self.clone()),
            Dimension::Discrete => {
                let rest = other.difference(&self.shaped).difference(&self.linear);
                pack_mix(
                    self.discrete.symmetric_difference(&rest),
                    (*self.linear).clone(),
                    (*self.shaped).clone(),
                )
            }
            Dimension::Linear => self.absorb_linear(
                self.shaped.symmetric_difference(other),
                |a, b| a.symmetric_difference(b),
            ),
            Dimension::Shaped | Dimension::Mixed => self
                .shaped
                .symmetric_difference(other)
                .symmetric_difference(&self.linear)
                .symmetric_difference(&self.discrete),
        }
    }

    /// Folds a linear operand into the mix, given the result of combining it with the
    /// shaped component.
    fn absorb_linear(
        &self,
        shaped: Compound<F>,
        combine: impl Fn(&Compound<F>, &Compound<F>) -> Compound<F>,
    ) -> Compound<F> {
        let (linear, shaped) = match shaped {
            segments if segments.is_linear() => (
                combine(&combine(&self.linear, &segments), &self.discrete),
                Compound::Empty,
            ),
            Compound::Mix(m) => {
                let (_, segments, shaped) = m.into_parts();
                (
                    combine(&combine(&self.linear, &segments), &self.discrete),
                    shaped,
                )
            }
            // The operand vanished into the shaped component.
            shaped => {
                return pack_mix(
                    (*self.discrete).clone(),
                    (*self.linear).clone(),
                    shaped,
                )
            }
        };
        match linear {
            Compound::Mix(m) => {
                let (discrete, linear, _) = m.into_parts();
                pack_mix(discrete, linear, shaped)
            }
            // Segments can cancel out and leave only the points.
            points if points.is_discrete() => pack_mix(points, Compound::Empty, shaped),
            linear => pack_mix(Compound::Empty, linear, shaped),
        }
    }

    pub(crate) fn difference(&self, other: &Compound<F>) -> Compound<F> {
        pack_mix(
            self.discrete.difference(other),
            self.linear.difference(other),
            self.shaped.difference(other),
        )
    }

    /// `other` minus this mix.
    pub(crate) fn subtracted_from(&self, other: &Compound<F>) -> Compound<F> {
        other
            .difference(&self.discrete)
            .intersection(&other.difference(&self.linear))
            .intersection(&other.difference(&self.shaped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        contour::Contour, multipoint::Multipoint, multisegment::Multisegment, polygon::Polygon,
        segment::Segment,
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

    fn segment(x0: i64, y0: i64, x1: i64, y1: i64) -> Compound<Rational> {
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

    fn sample() -> Mix<Rational> {
        Mix::new(points(&[(10, 10)]), segment(5, 0, 7, 0), square(0, 0, 4))
    }

    #[test]
    fn location_and_centroid() {
        let mix = sample();
        assert_eq!(mix.locate(&p(10, 10)), Location::Boundary);
        assert_eq!(mix.locate(&p(6, 0)), Location::Boundary);
        assert_eq!(mix.locate(&p(1, 1)), Location::Interior);
        assert_eq!(mix.locate(&p(4, 2)), Location::Boundary);
        assert_eq!(mix.locate(&p(20, 20)), Location::Exterior);
        assert_eq!(mix.centroid().unwrap(), p(2, 2));
    }

    #[test]
    fn relations_with_points() {
        let mix = sample();
        assert_eq!(mix.relate(&points(&[(1, 1)])), Within);
        assert_eq!(mix.relate(&points(&[(10, 10)])), Component);
        assert_eq!(mix.relate(&points(&[(6, 0), (10, 10)])), Component);
        assert_eq!(mix.relate(&points(&[(1, 1), (10, 10)])), Enclosed);
        assert_eq!(mix.relate(&points(&[(20, 20)])), Disjoint);
    }

    #[test]
    fn points_touching_the_curve_away_from_the_shape() {
        let mix = Compound::Mix(Mix::new(
            Compound::Empty,
            Compound::Multisegment(Multisegment::new(vec![
                Segment::new(p(1, 3), p(3, 3)),
                Segment::new(p(0, 4), p(1, 4)),
            ])),
            square(0, 0, 1),
        ));
        let touching = points(&[(3, 3), (7, 3)]);
        assert_eq!(mix.relate(&touching), Touch);
        assert_eq!(touching.relate(&mix), Touch);
        assert!(!touching.disjoint(&mix));
        assert_eq!(&touching & &mix, points(&[(3, 3)]));
    }

    #[test]
    fn relations_with_shapes() {
        let mix = Compound::Mix(sample());
        assert_eq!(mix.relate(&square(1, 1, 2)), Within);
        assert_eq!(mix.relate(&square(20, 20, 1)), Disjoint);
        assert_eq!(mix.relate(&square(0, 0, 4)), Component);
        assert_eq!(square(0, 0, 4).relate(&mix), Composite);
        assert_eq!(mix.relate(&mix), Equal);
    }

    #[test]
    fn difference_drops_the_shape() {
        let mix = sample();
        assert_eq!(
            mix.difference(&square(0, 0, 4)),
            Compound::Mix(Mix::new(
                points(&[(10, 10)]),
                segment(5, 0, 7, 0),
                Compound::Empty
            ))
        );
    }

    #[test]
    fn intersection_keeps_what_overlaps() {
        assert_eq!(sample().intersection(&square(0, 0, 4)), square(0, 0, 4));
        assert_eq!(
            sample().intersection(&points(&[(6, 0), (30, 30)])),
            points(&[(6, 0)])
        );
    }

    #[test]
    fn union_with_points_keeps_only_new_ones() {
        let united = sample().union(&points(&[(1, 1), (20, 20), (6, 0)]));
        let Compound::Mix(united) = united else {
            panic!("expected a mix, got {united:?}");
        };
        assert_eq!(united.discrete(), &points(&[(10, 10), (20, 20)]));
        assert_eq!(united.linear(), &segment(5, 0, 7, 0));
        assert_eq!(united.shaped(), &square(0, 0, 4));
    }

    #[test]
    fn validation() {
        sample().validate().unwrap();
        assert_matches!(
            Mix::new(Compound::Empty, Compound::Empty, square(0, 0, 4)).validate(),
            Err(Error::Invalid { reason, .. }) if reason.starts_with("At least 2")
        );
        assert_matches!(
            Mix::new(points(&[(1, 1)]), Compound::Empty, square(0, 0, 4)).validate(),
            Err(Error::Invalid { reason, .. }) if reason.contains("disjoint")
        );
        assert_matches!(
            Mix::new(Compound::Empty, segment(1, 1, 2, 2), square(0, 0, 4)).validate(),
            Err(Error::Invalid { reason, .. }) if reason.contains("subset")
        );
        assert_matches!(
            Mix::new(Compound::Empty, segment(-1, 1, 5, 1), square(0, 0, 4)).validate(),
            Err(Error::Invalid { reason, .. }) if reason.contains("cross")
        );
        assert_matches!(
            Mix::new(Compound::Empty, segment(0, 0, 4, 0), square(0, 0, 4)).validate(),
            Err(Error::Invalid { .. })
        );
        assert_matches!(
            Mix::new(square(10, 10, 1), Compound::Empty, square(0, 0, 4)).validate(),
            Err(Error::Invalid { reason, .. }) if reason.contains("Discrete component")
        );
    }
}
