//! Raw forms: geometries as plain tuples and vectors of coordinates.
//!
//! Every geometry converts to and from its raw form through [`RawForm`], and for
//! well-formed input the two directions are inverse to each other. A [`Raw`] value is
//! the raw form of any [`Compound`], tagged with its kind, and is what gets serialized.
//!
//! The components of a mix are stored as a multipoint, a multisegment and a
//! multipolygon, with `None` standing for an empty component.

use serde::{Deserialize, Serialize};

use crate::{
    compound::Compound,
    contour::Contour,
    geom::Point,
    mix::Mix,
    multipoint::Multipoint,
    multipolygon::Multipolygon,
    multisegment::Multisegment,
    num::Float,
    packing::{pack_points, pack_polygons, pack_segments},
    polygon::Polygon,
    segment::Segment,
};

pub type RawPoint<F> = (F, F);
pub type RawSegment<F> = (RawPoint<F>, RawPoint<F>);
pub type RawContour<F> = Vec<RawPoint<F>>;
pub type RawMultipoint<F> = Vec<RawPoint<F>>;
pub type RawMultisegment<F> = Vec<RawSegment<F>>;
pub type RawPolygon<F> = (RawContour<F>, Vec<RawContour<F>>);
pub type RawMultipolygon<F> = Vec<RawPolygon<F>>;
pub type RawMix<F> = (
    Option<RawMultipoint<F>>,
    Option<RawMultisegment<F>>,
    Option<RawMultipolygon<F>>,
);

/// Conversion between a geometry and its raw form.
pub trait RawForm: Sized {
    type Raw;

    fn from_raw(raw: Self::Raw) -> Self;

    fn raw(&self) -> Self::Raw;
}

impl<F: Float> RawForm for Point<F> {
    type Raw = RawPoint<F>;

    fn from_raw((x, y): RawPoint<F>) -> Self {
        Point::new(x, y)
    }

    fn raw(&self) -> RawPoint<F> {
        (self.x.clone(), self.y.clone())
    }
}

impl<F: Float> RawForm for Segment<F> {
    type Raw = RawSegment<F>;

    fn from_raw((start, end): RawSegment<F>) -> Self {
        Segment::new(Point::from_raw(start), Point::from_raw(end))
    }

    fn raw(&self) -> RawSegment<F> {
        (self.start.raw(), self.end.raw())
    }
}

fn points_from_raw<F: Float>(raw: Vec<RawPoint<F>>) -> Vec<Point<F>> {
    raw.into_iter().map(Point::from_raw).collect()
}

fn raw_points<F: Float>(points: &[Point<F>]) -> Vec<RawPoint<F>> {
    points.iter().map(Point::raw).collect()
}

impl<F: Float> RawForm for Multipoint<F> {
    type Raw = RawMultipoint<F>;

    fn from_raw(raw: RawMultipoint<F>) -> Self {
        Multipoint::new(points_from_raw(raw))
    }

    fn raw(&self) -> RawMultipoint<F> {
        raw_points(self.points())
    }
}

impl<F: Float> RawForm for Contour<F> {
    type Raw = RawContour<F>;

    fn from_raw(raw: RawContour<F>) -> Self {
        Contour::new(points_from_raw(raw))
    }

    fn raw(&self) -> RawContour<F> {
        raw_points(self.vertices())
    }
}

impl<F: Float> RawForm for Multisegment<F> {
    type Raw = RawMultisegment<F>;

    fn from_raw(raw: RawMultisegment<F>) -> Self {
        Multisegment::new(raw.into_iter().map(Segment::from_raw).collect())
    }

    fn raw(&self) -> RawMultisegment<F> {
        self.segments().iter().map(Segment::raw).collect()
    }
}

impl<F: Float> RawForm for Polygon<F> {
    type Raw = RawPolygon<F>;

    fn from_raw((border, holes): RawPolygon<F>) -> Self {
        Polygon::new(
            Contour::from_raw(border),
            holes.into_iter().map(Contour::from_raw).collect(),
        )
    }

    fn raw(&self) -> RawPolygon<F> {
        (
            self.border().raw(),
            self.holes().iter().map(Contour::raw).collect(),
        )
    }
}

impl<F: Float> RawForm for Multipolygon<F> {
    type Raw = RawMultipolygon<F>;

    fn from_raw(raw: RawMultipolygon<F>) -> Self {
        Multipolygon::new(raw.into_iter().map(Polygon::from_raw).collect())
    }

    fn raw(&self) -> RawMultipolygon<F> {
        self.polygons().iter().map(Polygon::raw).collect()
    }
}

impl<F: Float> RawForm for Mix<F> {
    type Raw = RawMix<F>;

    fn from_raw((discrete, linear, shaped): RawMix<F>) -> Self {
        Mix::new(
            discrete.map_or(Compound::Empty, |raw| pack_points(points_from_raw(raw))),
            linear.map_or(Compound::Empty, |raw| {
                pack_segments(raw.into_iter().map(Segment::from_raw).collect())
            }),
            shaped.map_or(Compound::Empty, |raw| {
                pack_polygons(raw.into_iter().map(Polygon::from_raw).collect())
            }),
        )
    }

    fn raw(&self) -> RawMix<F> {
        let (discrete, linear, shaped) = (self.discrete(), self.linear(), self.shaped());
        (
            (!discrete.is_empty()).then(|| raw_points(&discrete.points())),
            (!linear.is_empty()).then(|| linear.segments().iter().map(Segment::raw).collect()),
            (!shaped.is_empty()).then(|| shaped.polygons().iter().map(Polygon::raw).collect()),
        )
    }
}

/// The raw form of any compound, tagged with its kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "coordinates")]
pub enum Raw<F> {
    Empty,
    Point(RawPoint<F>),
    Multipoint(RawMultipoint<F>),
    Segment(RawSegment<F>),
    Multisegment(RawMultisegment<F>),
    Contour(RawContour<F>),
    Polygon(RawPolygon<F>),
    Multipolygon(RawMultipolygon<F>),
    Mix(RawMix<F>),
}

impl<F: Float> RawForm for Compound<F> {
    type Raw = Raw<F>;

    fn from_raw(raw: Raw<F>) -> Self {
        match raw {
            Raw::Empty => Compound::Empty,
            Raw::Point(raw) => Compound::Point(Point::from_raw(raw)),
            Raw::Multipoint(raw) => Compound::Multipoint(Multipoint::from_raw(raw)),
            Raw::Segment(raw) => Compound::Segment(Segment::from_raw(raw)),
            Raw::Multisegment(raw) => Compound::Multisegment(Multisegment::from_raw(raw)),
            Raw::Contour(raw) => Compound::Contour(Contour::from_raw(raw)),
            Raw::Polygon(raw) => Compound::Polygon(Polygon::from_raw(raw)),
            Raw::Multipolygon(raw) => Compound::Multipolygon(Multipolygon::from_raw(raw)),
            Raw::Mix(raw) => Compound::Mix(Mix::from_raw(raw)),
        }
    }

    fn raw(&self) -> Raw<F> {
        match self {
            Compound::Empty => Raw::Empty,
            Compound::Point(p) => Raw::Point(p.raw()),
            Compound::Multipoint(m) => Raw::Multipoint(m.raw()),
            Compound::Segment(s) => Raw::Segment(s.raw()),
            Compound::Multisegment(m) => Raw::Multisegment(m.raw()),
            Compound::Contour(c) => Raw::Contour(c.raw()),
            Compound::Polygon(p) => Raw::Polygon(p.raw()),
            Compound::Multipolygon(m) => Raw::Multipolygon(m.raw()),
            Compound::Mix(m) => Raw::Mix(m.raw()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use malachite::Rational;
    use ordered_float::NotNan;

    fn r(x: i64) -> Rational {
        Rational::from(x)
    }

    fn square(x: i64, y: i64, side: i64) -> RawContour<Rational> {
        vec![
            (r(x), r(y)),
            (r(x + side), r(y)),
            (r(x + side), r(y + side)),
            (r(x), r(y + side)),
        ]
    }

    #[test]
    fn raw_forms_survive_a_round_trip() {
        let polygon: RawPolygon<Rational> = (square(0, 0, 6), vec![square(2, 2, 2)]);
        assert_eq!(Polygon::from_raw(polygon.clone()).raw(), polygon);

        let segments: RawMultisegment<Rational> = vec![
            ((r(0), r(0)), (r(1), r(0))),
            ((r(0), r(1)), (r(1), r(1))),
        ];
        let multisegment = Multisegment::from_raw(segments.clone());
        assert_eq!(multisegment.raw(), segments);
        assert_eq!(Multisegment::from_raw(multisegment.raw()), multisegment);
    }

    #[test]
    fn mix_components() {
        let raw: RawMix<Rational> = (
            Some(vec![(r(10), r(10))]),
            Some(vec![((r(5), r(0)), (r(7), r(0)))]),
            None,
        );
        let mix = Mix::from_raw(raw.clone());
        assert!(mix.shaped().is_empty());
        assert!(matches!(mix.linear(), Compound::Segment(_)));
        assert_eq!(mix.raw(), raw);
    }

    #[test]
    fn serialized_with_its_kind() -> anyhow::Result<()> {
        let n = |x: f64| NotNan::new(x).unwrap();
        let compound = Compound::Segment(Segment::new(
            Point::new(n(0.0), n(0.0)),
            Point::new(n(1.5), n(2.0)),
        ));
        let json = serde_json::to_string(&compound.raw())?;
        assert_eq!(
            json,
            r#"{"kind":"Segment","coordinates":[[0.0,0.0],[1.5,2.0]]}"#
        );
        let back: Raw<NotNan<f64>> = serde_json::from_str(&json)?;
        assert_eq!(Compound::from_raw(back), compound);

        let empty: Raw<NotNan<f64>> = serde_json::from_str(r#"{"kind":"Empty"}"#)?;
        assert_eq!(Compound::from_raw(empty), Compound::Empty);
        Ok(())
    }
}
