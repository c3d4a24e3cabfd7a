use crate::types::TypeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Catalog-level failures.
///
/// Every variant is a fatal defect of the introspected snapshot. There is
/// nothing to retry: a catalog either round-trips cleanly or the generation
/// pass aborts.
#[derive(Debug, Error)]
pub enum Error {
    /// A type row carries a kind outside the closed set understood by this
    /// version of the catalog model. Indicates a schema-version mismatch
    /// upstream.
    #[error("unsupported type kind `{kind}` for type `{name}`")]
    UnsupportedTypeKind { kind: String, name: String },

    /// A pointer or collection element references a type id that is absent
    /// from the catalog.
    #[error("unresolved target: type id `{0}` is not present in the catalog")]
    UnresolvedTarget(TypeId),

    /// A tuple's elements mix positional and explicit names.
    #[error("ambiguous tuple naming in `{name}`: element `{element}` disagrees with the tuple's detected naming")]
    AmbiguousTupleNaming { name: String, element: String },

    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed catalog JSON: {0}")]
    Malformed(String),
}
