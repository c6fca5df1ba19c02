//! The geometric machinery behind relations and set operations.

pub(crate) mod clip;
pub(crate) mod fragment;
pub(crate) mod hull;
pub(crate) mod linear;
pub(crate) mod location;
pub(crate) mod region;
pub(crate) mod triangulation;
