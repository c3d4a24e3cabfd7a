use thiserror::Error;
use trellis_catalog::{Cardinality, TypeId};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The selection references a field that exists neither on the shape nor
    /// on any of its polymorphic variants. Rejected before any projection
    /// output is produced.
    #[error("unknown field `{name}` in selection over `{object}`")]
    UnknownField { object: String, name: String },

    /// A nested sub-selection was applied to a property pointer; only links
    /// can be dereferenced further.
    #[error("nested selection on property `{name}` of `{object}`")]
    NestedSelectionOnProperty { object: String, name: String },

    /// A computed field claims a cardinality outside the assignable set of
    /// the field's declared cardinality, e.g. treating an `AtMostOne`
    /// property as a list.
    #[error("field `{name}` of `{object}` is declared {declared} and cannot be treated as {claimed}")]
    IllegalCardinalityClaim {
        object: String,
        name: String,
        declared: Cardinality,
        claimed: Cardinality,
    },

    /// A link targets an object type whose shape was never built (the
    /// shape index does not cover it).
    #[error("no built shape for link target `{0}`")]
    MissingShape(TypeId),

    #[error(transparent)]
    Catalog(#[from] trellis_catalog::Error),
}
