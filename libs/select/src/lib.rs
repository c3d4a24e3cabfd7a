//! Shape-selection inference.
//!
//! Given an object type's built shape, a partial [`Selection`] over it, and
//! the polymorphic variants collected for the type, [`project`] computes the
//! exact value shape a caller will receive: per-field value types driven by
//! the cardinality lattice, nested projections through links, link-property
//! fields, and optional subtype-specific additions.
//!
//! This is the runtime analogue of computing a query's output type; it is a
//! pure recursive function over explicit data, with no I/O and no retries.

mod error;
mod project;
mod selection;
mod value;

pub use error::{Error, Result};
pub use project::project;
pub use selection::{Selection, SelectionField};
pub use value::{project_cardinality, value_type_of, ResultField, ResultShape, ValueType};
