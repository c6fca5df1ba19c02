#![doc = include_str!("../README.md")]

mod algorithms;
mod angle;
mod compound;
mod contour;
mod geom;
mod index;
mod mix;
mod multipoint;
mod multipolygon;
mod multisegment;
mod num;
mod ops;
mod packing;
mod polygon;
pub mod raw;
mod relation;
mod segment;

pub use angle::Angle;
pub use compound::Compound;
pub use contour::Contour;
pub use geom::{kind, orientation, Kind, Orientation, Point, Vector};
pub use mix::Mix;
pub use multipoint::Multipoint;
pub use multipolygon::Multipolygon;
pub use multisegment::Multisegment;
pub use num::Float;
pub use packing::{pack_mix, pack_points, pack_polygons, pack_segments};
pub use polygon::Polygon;
pub use raw::{Raw, RawForm};
pub use relation::{Location, Relation};
pub use segment::Segment;

/// Everything that can go wrong when working with geometries.
///
/// Operators never fail; only validation, undefined metrics on the empty set, and
/// comparisons between geometries that have nothing to say about each other do.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A geometry broke one of its invariants.
    #[error("invalid {kind}: {reason}")]
    Invalid {
        /// The kind of geometry that was validated.
        kind: &'static str,
        /// What exactly was wrong with it.
        reason: String,
    },
    /// Neither operand knows how to answer the question about the other.
    #[error("`{operation}` is not supported between {left} and {right}")]
    Unsupported {
        /// The name of the operation.
        operation: &'static str,
        /// The kind of the left operand.
        left: &'static str,
        /// The kind of the right operand.
        right: &'static str,
    },
    /// The empty set has no points to measure.
    #[error("`{operation}` is undefined for the empty set")]
    Empty {
        /// The name of the operation.
        operation: &'static str,
    },
}

impl Error {
    pub(crate) fn invalid(kind: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(kind, %reason, "validation failed");
        Error::Invalid { kind, reason }
    }
}
