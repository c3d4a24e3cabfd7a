//! The generation walk: one pass over the catalog, producing per-module
//! declarations and the shape index used by selection projection.

use crate::error::Result;
use crate::output::{OutputSet, OutputUnit};
use crate::scope::ScopeContext;
use crate::shape::{ObjectShape, PointerDescriptor, ShapeBuilder};
use std::collections::HashMap;
use tracing::debug;
use trellis_catalog::{PointerKind, Type, TypeCatalog, TypeId};

/// Built shapes for every concrete object type, keyed by catalog id and
/// iterable in catalog order.
#[derive(Debug, Default)]
pub struct ShapeIndex {
    order: Vec<TypeId>,
    by_id: HashMap<TypeId, ObjectShape>,
}

impl ShapeIndex {
    pub fn get(&self, id: &TypeId) -> Option<&ObjectShape> {
        self.by_id.get(id)
    }

    pub fn values(&self) -> impl Iterator<Item = &ObjectShape> {
        self.order.iter().map(|id| &self.by_id[id])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert(&mut self, shape: ObjectShape) {
        self.order.push(shape.id.clone());
        self.by_id.insert(shape.id.clone(), shape);
    }
}

/// Walk `catalog` once and deposit, per concrete object type, its shape
/// declaration, its type alias, and its runtime constructor into the unit of
/// the module that declares it. Synthesized union/intersection object types
/// are skipped entirely, as are non-object types (collections are emitted
/// inline at point of use).
///
/// Returns the [`ShapeIndex`] of every shape built, for later projection.
pub fn reflect_catalog(catalog: &TypeCatalog, out: &mut OutputSet) -> Result<ShapeIndex> {
    // Collection constructors are re-exported from the std unit so generated
    // modules can reference them unqualified.
    let std_unit = out.unit("std");
    std_unit.writeln("export array;");
    std_unit.writeln("export tuple;");
    std_unit.writeln("export named_tuple;");
    std_unit.nl();

    let mut shapes = ShapeIndex::default();
    let builder = ShapeBuilder::new(catalog);

    for ty in catalog.values() {
        let Type::Object(object) = ty else { continue };
        if object.is_compound() {
            debug!(name = %object.name, "skipping synthesized union/intersection type");
            continue;
        }

        let module = object.name.module();
        let local = object.name.local();
        debug!(name = %object.name, "generating object type");

        let unit = out.unit(module);
        let scope = ScopeContext::new(module);

        let built = builder.build(object, &scope, unit)?;
        let full = builder.full_shape(object, &scope, unit)?;

        // Shape declaration: intersection of every base shape with the own
        // pointer block, base-first.
        let bases = built
            .bases
            .iter()
            .map(|base| format!("{base}Shape & "))
            .collect::<String>();
        unit.writeln(format!("shape {local}Shape = {bases}{{"));
        unit.indented(|u| {
            for pointer in &built.own {
                write_pointer_line(u, pointer);
            }
        });
        unit.writeln("};");

        unit.writeln(format!(
            "type {local} = object<\"{}\", {local}Shape>;",
            object.name
        ));
        unit.writeln(format!("const {local} = make_type(spec, \"{}\");", object.id));
        unit.nl();

        shapes.insert(ObjectShape {
            id: object.id.clone(),
            name: object.name.clone(),
            shape: full,
            polys: built.polys,
        });
    }

    Ok(shapes)
}

fn write_pointer_line(unit: &mut OutputUnit, pointer: &PointerDescriptor) {
    match pointer.kind {
        PointerKind::Property => {
            unit.writeln(format!(
                "{}: property<{}, Cardinality::{}>;",
                pointer.name, pointer.repr.structural, pointer.cardinality
            ));
        }
        PointerKind::Link if pointer.link_properties.is_empty() => {
            unit.writeln(format!(
                "{}: link<{}, Cardinality::{}, {{}}>;",
                pointer.name, pointer.repr.structural, pointer.cardinality
            ));
        }
        PointerKind::Link => {
            unit.writeln(format!(
                "{}: link<{}, Cardinality::{}, {{",
                pointer.name, pointer.repr.structural, pointer.cardinality
            ));
            unit.indented(|u| {
                for property in &pointer.link_properties {
                    u.writeln(format!(
                        "{}: property<{}, Cardinality::{}>;",
                        property.name, property.repr.structural, property.cardinality
                    ));
                }
            });
            unit.writeln("}>;");
        }
    }
}
