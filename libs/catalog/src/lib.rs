//! Introspected schema type catalog.
//!
//! This crate holds the read-only data model produced by schema
//! introspection: every type known to the schema (scalars, enums, objects,
//! arrays, tuples), the pointers that connect object types, and the
//! cardinality algebra that governs how many values a pointer may yield.
//!
//! A [`TypeCatalog`] is a single immutable snapshot. It is deserialized once
//! from introspection JSON and then only read; every downstream pass
//! (reflection, projection) is a pure transform over it.

mod cardinality;
mod catalog;
mod error;
mod types;

pub use cardinality::Cardinality;
pub use catalog::TypeCatalog;
pub use error::{Error, Result};
pub use types::{
    ArrayType, EnumType, ObjectType, Pointer, PointerKind, ScalarType, TupleElement, TupleNaming,
    TupleType, Type, TypeId, TypeName, TypeRef,
};
