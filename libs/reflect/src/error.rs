use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A defect of the catalog snapshot surfaced during resolution:
    /// an unresolved target id, an unsupported type kind, or a tuple with
    /// inconsistent element naming.
    #[error(transparent)]
    Catalog(#[from] trellis_catalog::Error),

    /// An object type declares a base that is not itself an object type.
    #[error("base `{base}` of object type `{object}` is not an object type")]
    NonObjectBase { object: String, base: String },
}
