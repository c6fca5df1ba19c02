//! The vocabulary of topological queries.

/// How one geometry sits with respect to another.
///
/// `a.relate(b)` describes `b` in terms of `a`: `Component` means that `b` is a component
/// of `a`, `Within` means that `b` lies in the interior of `a`, and so on. Swapping the
/// arguments gives the [`complement`](Relation::complement).
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Relation {
    /// The intersection is empty.
    Disjoint,
    /// The boundaries meet, the interiors don't, and neither boundary passes to both sides
    /// of the other.
    Touch,
    /// The intersection has lower dimension than the geometries and somewhere one of them
    /// passes from one side of the other to the other side.
    Cross,
    /// The intersection is a proper subset of both geometries and has their dimension.
    Overlap,
    /// `b` lies on `a`, interior to interior and boundary to boundary.
    Component,
    /// `a` lies on `b`, interior to interior and boundary to boundary.
    Composite,
    /// `b` lies in `a` and touches its boundary somewhere.
    Enclosed,
    /// `a` lies in `b` and touches its boundary somewhere.
    Encloses,
    /// `b` lies in the interior of `a`.
    Within,
    /// `a` lies in the interior of `b`.
    Cover,
    /// `a` and `b` are the same point set.
    Equal,
}

impl Relation {
    pub fn complement(self) -> Self {
        match self {
            Relation::Component => Relation::Composite,
            Relation::Composite => Relation::Component,
            Relation::Enclosed => Relation::Encloses,
            Relation::Encloses => Relation::Enclosed,
            Relation::Within => Relation::Cover,
            Relation::Cover => Relation::Within,
            other => other,
        }
    }

    pub(crate) fn is_one_of(self, relations: &[Relation]) -> bool {
        relations.contains(&self)
    }
}

/// Where a point sits with respect to a geometry.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Location {
    /// Off the geometry.
    Exterior,
    /// On the boundary. Points and curves have no interior, so all of their points are here.
    Boundary,
    /// In the interior of a region.
    Interior,
}
