//! Schema reflection: from a type catalog to declaration output.
//!
//! The reflection pass walks a [`trellis_catalog::TypeCatalog`] once and,
//! for every concrete object type, produces two things:
//!
//! - a pair of textual representations per referenced type (a structural
//!   form for a static checker and a constructive form for building runtime
//!   descriptors), deposited into per-module [`OutputUnit`]s, and
//! - the object type's built shape: its own pointers, its resolved base
//!   identifiers, and the polymorphic variants contributed by its subtypes.
//!   The built shapes feed the selection projection engine.
//!
//! The whole pass is synchronous, pure over the catalog snapshot, and fails
//! fast: a malformed catalog aborts generation, nothing is retried.

mod error;
mod generate;
mod output;
mod represent;
mod scope;
mod shape;

pub use error::{Error, Result};
pub use generate::{reflect_catalog, ShapeIndex};
pub use output::{OutputSet, OutputUnit};
pub use represent::{representation, TypeRepr};
pub use scope::ScopeContext;
pub use shape::{BuiltShape, ObjectShape, PointerDescriptor, Poly, ShapeBuilder};
