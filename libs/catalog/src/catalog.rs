//! The type catalog: an insertion-ordered store of introspected types.

use crate::error::{Error, Result};
use crate::types::{Type, TypeId};
use serde_json::Value;
use std::collections::HashMap;

/// One immutable snapshot of every type the schema declares.
///
/// Iteration order is catalog-declared order; it affects only the
/// determinism of emitted output, never correctness.
#[derive(Debug, Default)]
pub struct TypeCatalog {
    order: Vec<TypeId>,
    index: HashMap<TypeId, Type>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        TypeCatalog::default()
    }

    /// Build a catalog from the introspection query's JSON output: an array
    /// of type rows, each tagged with a `kind`.
    ///
    /// Rows with a kind outside the closed set fail with
    /// [`Error::UnsupportedTypeKind`] rather than being skipped; an
    /// unrecognized kind means the snapshot was produced by an incompatible
    /// schema version.
    pub fn from_json(value: &Value) -> Result<Self> {
        let rows = value
            .as_array()
            .ok_or_else(|| Error::Malformed("expected a JSON array of type rows".to_string()))?;

        let mut catalog = TypeCatalog::new();
        for row in rows {
            let kind = row
                .get("kind")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::Malformed("type row is missing `kind`".to_string()))?;
            match kind {
                "scalar" | "enum" | "object" | "array" | "tuple" => {
                    catalog.insert(serde_json::from_value(row.clone())?);
                }
                other => {
                    let name = row
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or("<unnamed>");
                    return Err(Error::UnsupportedTypeKind {
                        kind: other.to_string(),
                        name: name.to_string(),
                    });
                }
            }
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, ty: Type) {
        let id = ty.id().clone();
        if self.index.insert(id.clone(), ty).is_none() {
            self.order.push(id);
        }
    }

    pub fn get(&self, id: &TypeId) -> Option<&Type> {
        self.index.get(id)
    }

    /// Like [`TypeCatalog::get`], but a missing id is the fatal
    /// [`Error::UnresolvedTarget`] precondition violation.
    pub fn expect(&self, id: &TypeId) -> Result<&Type> {
        self.get(id)
            .ok_or_else(|| Error::UnresolvedTarget(id.clone()))
    }

    /// All types, in catalog-declared order.
    pub fn values(&self) -> impl Iterator<Item = &Type> {
        self.order.iter().map(|id| &self.index[id])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All object types that inherit from `id`, directly or transitively,
    /// in catalog order. Used to collect the polymorphic variants of a base
    /// type.
    pub fn descendants_of(&self, id: &TypeId) -> Vec<&Type> {
        let mut found: Vec<&Type> = Vec::new();
        let mut changed = true;
        while changed {
            changed = false;
            for ty in self.values() {
                let Some(obj) = ty.as_object() else { continue };
                if found.iter().any(|t| t.id() == ty.id()) {
                    continue;
                }
                let inherits = obj.bases.iter().any(|base| {
                    base.id == *id || found.iter().any(|t| *t.id() == base.id)
                });
                if inherits {
                    found.push(ty);
                    changed = true;
                }
            }
        }
        // Restore catalog order; the fixpoint loop above discovers deeper
        // descendants in later sweeps.
        let mut ordered: Vec<&Type> = Vec::with_capacity(found.len());
        for ty in self.values() {
            if found.iter().any(|t| t.id() == ty.id()) {
                ordered.push(ty);
            }
        }
        ordered
    }
}
