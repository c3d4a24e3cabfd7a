//! Shape building: the full pointer shape of an object type.
//!
//! An object type's *full* shape is its own pointers unioned with every
//! inherited base shape. Base pointers come first (left-to-right in base
//! declaration order); a pointer redeclared on the type itself overrides the
//! inherited one. Polymorphic variants (the extra pointers each subtype
//! contributes) are collected alongside but never merged into the shape;
//! they are handed through untouched to selection projection.

use crate::error::{Error, Result};
use crate::output::OutputUnit;
use crate::represent::{representation, TypeRepr};
use crate::scope::ScopeContext;
use std::collections::HashMap;
use trellis_catalog::{Cardinality, ObjectType, Pointer, PointerKind, TypeCatalog, TypeId, TypeName};

/// One resolved pointer of an object type's shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerDescriptor {
    pub name: String,
    pub kind: PointerKind,
    pub cardinality: Cardinality,
    pub target_id: TypeId,
    pub repr: TypeRepr,
    /// Properties attached to the link itself. One level only: link
    /// properties cannot carry link properties. Empty for property pointers.
    pub link_properties: Vec<PointerDescriptor>,
}

/// A polymorphic variant of a base type: a subtype plus the partial shape of
/// pointers it adds or narrows relative to the base.
#[derive(Debug, Clone, PartialEq)]
pub struct Poly {
    pub type_id: TypeId,
    pub type_name: TypeName,
    pub shape: Vec<PointerDescriptor>,
}

/// The output of building one object type's shape.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltShape {
    /// The type's own pointers, declaration order.
    pub own: Vec<PointerDescriptor>,
    /// Scope-resolved identifiers of the declared bases, declaration order.
    pub bases: Vec<String>,
    /// Variants contributed by subtypes, catalog order.
    pub polys: Vec<Poly>,
}

/// An object type's complete shape metadata, as recorded in the
/// [`ShapeIndex`](crate::ShapeIndex) for later projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectShape {
    pub id: TypeId,
    pub name: TypeName,
    /// Full shape: inherited pointers first, own declarations winning on
    /// name collision.
    pub shape: Vec<PointerDescriptor>,
    pub polys: Vec<Poly>,
}

impl ObjectShape {
    pub fn pointer(&self, name: &str) -> Option<&PointerDescriptor> {
        self.shape.iter().find(|p| p.name == name)
    }
}

pub struct ShapeBuilder<'a> {
    catalog: &'a TypeCatalog,
}

impl<'a> ShapeBuilder<'a> {
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        ShapeBuilder { catalog }
    }

    /// Build the shape triple for `object`: own pointer descriptors, scoped
    /// base identifiers, and the polymorphic variants of its subtypes.
    pub fn build(
        &self,
        object: &ObjectType,
        scope: &ScopeContext<'_>,
        unit: &mut OutputUnit,
    ) -> Result<BuiltShape> {
        let mut own = Vec::with_capacity(object.pointers.len());
        for pointer in &object.pointers {
            own.push(self.pointer_descriptor(pointer, scope, unit)?);
        }

        let mut bases = Vec::with_capacity(object.bases.len());
        for base in &object.bases {
            let base_ty = self.catalog.expect(&base.id)?;
            let base_obj = base_ty.as_object().ok_or_else(|| Error::NonObjectBase {
                object: object.name.to_string(),
                base: base_ty.name().to_string(),
            })?;
            bases.push(scope.scope_name(&base_obj.name, unit));
        }

        let polys = self.collect_polys(object, scope, unit)?;

        Ok(BuiltShape { own, bases, polys })
    }

    /// The full (own + inherited) shape of `object`.
    ///
    /// Bases merge left-to-right with the first occurrence of a name keeping
    /// its slot; the type's own declaration overrides the inherited
    /// descriptor in place, so ordering stays base-first.
    pub fn full_shape(
        &self,
        object: &ObjectType,
        scope: &ScopeContext<'_>,
        unit: &mut OutputUnit,
    ) -> Result<Vec<PointerDescriptor>> {
        let mut merged: Vec<PointerDescriptor> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for base in &object.bases {
            let base_ty = self.catalog.expect(&base.id)?;
            let base_obj = base_ty.as_object().ok_or_else(|| Error::NonObjectBase {
                object: object.name.to_string(),
                base: base_ty.name().to_string(),
            })?;
            for descriptor in self.full_shape(base_obj, scope, unit)? {
                if !index.contains_key(&descriptor.name) {
                    index.insert(descriptor.name.clone(), merged.len());
                    merged.push(descriptor);
                }
            }
        }

        for pointer in &object.pointers {
            let descriptor = self.pointer_descriptor(pointer, scope, unit)?;
            match index.get(&descriptor.name) {
                Some(&slot) => merged[slot] = descriptor,
                None => {
                    index.insert(descriptor.name.clone(), merged.len());
                    merged.push(descriptor);
                }
            }
        }

        Ok(merged)
    }

    fn pointer_descriptor(
        &self,
        pointer: &Pointer,
        scope: &ScopeContext<'_>,
        unit: &mut OutputUnit,
    ) -> Result<PointerDescriptor> {
        let target = self.catalog.expect(&pointer.target_id)?;
        let repr = representation(self.catalog, target, scope, unit)?;

        let mut link_properties = Vec::new();
        for property in pointer.link_properties() {
            link_properties.push(self.pointer_descriptor(property, scope, unit)?);
        }

        Ok(PointerDescriptor {
            name: pointer.name.clone(),
            kind: pointer.kind,
            cardinality: pointer.real_cardinality,
            target_id: pointer.target_id.clone(),
            repr,
            link_properties,
        })
    }

    /// Collect the polymorphic variants of `object`: for every descendant
    /// (direct or transitive, catalog order) the descriptors of its own
    /// pointers. Descendants that add nothing are skipped.
    fn collect_polys(
        &self,
        object: &ObjectType,
        scope: &ScopeContext<'_>,
        unit: &mut OutputUnit,
    ) -> Result<Vec<Poly>> {
        let mut polys = Vec::new();
        for descendant in self.catalog.descendants_of(&object.id) {
            let Some(sub) = descendant.as_object() else { continue };
            if sub.is_compound() || sub.pointers.is_empty() {
                continue;
            }
            let mut shape = Vec::with_capacity(sub.pointers.len());
            for pointer in &sub.pointers {
                shape.push(self.pointer_descriptor(pointer, scope, unit)?);
            }
            polys.push(Poly {
                type_id: sub.id.clone(),
                type_name: sub.name.clone(),
                shape,
            });
        }
        Ok(polys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> TypeCatalog {
        TypeCatalog::from_json(&json!([
            {"kind": "scalar", "id": "s-str", "name": "std::str"},
            {"kind": "scalar", "id": "s-int", "name": "std::int64"},
            {"kind": "scalar", "id": "s-float", "name": "std::float64"},
            {"kind": "object", "id": "o-named", "name": "default::Named", "pointers": [
                {"name": "name", "kind": "property", "realCardinality": "One", "target_id": "s-str"}
            ]},
            {"kind": "object", "id": "o-aged", "name": "default::Aged", "pointers": [
                {"name": "age", "kind": "property", "realCardinality": "AtMostOne", "target_id": "s-int"}
            ]},
            {"kind": "object", "id": "o-person", "name": "default::Person",
             "bases": [{"id": "o-named"}, {"id": "o-aged"}],
             "pointers": [
                {"name": "name", "kind": "property", "realCardinality": "One", "target_id": "s-int"},
                {"name": "friends", "kind": "link", "realCardinality": "Many", "target_id": "o-person",
                 "pointers": [
                    {"name": "source", "kind": "property", "realCardinality": "One", "target_id": "s-str"},
                    {"name": "target", "kind": "property", "realCardinality": "One", "target_id": "s-str"},
                    {"name": "strength", "kind": "property", "realCardinality": "AtMostOne", "target_id": "s-float"}
                 ]}
             ]},
            {"kind": "object", "id": "o-hero", "name": "default::Hero",
             "bases": [{"id": "o-person"}],
             "pointers": [
                {"name": "secret_identity", "kind": "property", "realCardinality": "One", "target_id": "s-str"}
             ]},
        ]))
        .unwrap()
    }

    fn object<'a>(catalog: &'a TypeCatalog, id: &str) -> &'a ObjectType {
        catalog
            .expect(&TypeId::from(id))
            .unwrap()
            .as_object()
            .unwrap()
    }

    #[test]
    fn own_pointers_resolve_with_link_properties() {
        let catalog = catalog();
        let mut unit = OutputUnit::default();
        let scope = ScopeContext::new("default");
        let built = ShapeBuilder::new(&catalog)
            .build(object(&catalog, "o-person"), &scope, &mut unit)
            .unwrap();

        let friends = built.own.iter().find(|p| p.name == "friends").unwrap();
        assert_eq!(friends.kind, PointerKind::Link);
        assert_eq!(friends.repr.structural, "Person");
        // source/target pseudo-pointers are filtered, real properties kept
        let props: Vec<_> = friends
            .link_properties
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(props, vec!["strength"]);
    }

    #[test]
    fn base_identifiers_are_scope_resolved_in_declaration_order() {
        let catalog = catalog();
        let mut unit = OutputUnit::default();
        let scope = ScopeContext::new("default");
        let built = ShapeBuilder::new(&catalog)
            .build(object(&catalog, "o-person"), &scope, &mut unit)
            .unwrap();
        assert_eq!(built.bases, vec!["Named", "Aged"]);
    }

    #[test]
    fn full_shape_lists_inherited_pointers_first_and_own_wins() {
        let catalog = catalog();
        let mut unit = OutputUnit::default();
        let scope = ScopeContext::new("default");
        let shape = ShapeBuilder::new(&catalog)
            .full_shape(object(&catalog, "o-person"), &scope, &mut unit)
            .unwrap();

        let names: Vec<_> = shape.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["name", "age", "friends"]);

        // Person redeclares `name` as int64; the own declaration wins over
        // the inherited std::str property.
        let name = shape.iter().find(|p| p.name == "name").unwrap();
        assert_eq!(name.repr.structural, "std::int64");
    }

    #[test]
    fn polys_collect_subtype_contributions_only() {
        let catalog = catalog();
        let mut unit = OutputUnit::default();
        let scope = ScopeContext::new("default");
        let built = ShapeBuilder::new(&catalog)
            .build(object(&catalog, "o-person"), &scope, &mut unit)
            .unwrap();

        assert_eq!(built.polys.len(), 1);
        let hero = &built.polys[0];
        assert_eq!(hero.type_name.local(), "Hero");
        let names: Vec<_> = hero.shape.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["secret_identity"]);
    }

    #[test]
    fn self_referential_links_do_not_recurse() {
        // Person.friends targets Person itself; building its shape must
        // terminate because object targets resolve by name.
        let catalog = catalog();
        let mut unit = OutputUnit::default();
        let scope = ScopeContext::new("default");
        let shape = ShapeBuilder::new(&catalog)
            .full_shape(object(&catalog, "o-person"), &scope, &mut unit)
            .unwrap();
        assert!(shape.iter().any(|p| p.name == "friends"));
    }
}
