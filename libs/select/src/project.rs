//! The shape-selection projection engine.

use crate::error::{Error, Result};
use crate::selection::{Selection, SelectionField, LINK_PROPERTY_PREFIX};
use crate::value::{project_cardinality, value_type_of, ResultField, ResultShape, ValueType};
use trellis_catalog::{PointerKind, TypeCatalog, TypeName};
use trellis_reflect::{ObjectShape, PointerDescriptor, Poly, ShapeIndex};

/// Compute the projected result shape of `selection` over `object`.
///
/// Selection keys are validated against the shape and its polys before any
/// projection output is produced; an unknown key is the static
/// [`Error::UnknownField`] failure. Fields selected `false` are omitted,
/// fields selected `true` follow the declared cardinality, nested
/// selections recurse through link targets (with `@`-prefixed keys resolved
/// against the link's own properties), and poly-contributed fields come out
/// optional.
pub fn project(
    catalog: &TypeCatalog,
    shapes: &ShapeIndex,
    object: &ObjectShape,
    selection: &Selection,
) -> Result<ResultShape> {
    let projector = Projector { catalog, shapes };
    projector.project_object(&object.name, &object.shape, None, selection, &object.polys)
}

struct Projector<'a> {
    catalog: &'a TypeCatalog,
    shapes: &'a ShapeIndex,
}

impl Projector<'_> {
    fn project_object(
        &self,
        object: &TypeName,
        shape: &[PointerDescriptor],
        link_properties: Option<&[PointerDescriptor]>,
        selection: &Selection,
        polys: &[Poly],
    ) -> Result<ResultShape> {
        self.validate_keys(object, shape, link_properties, selection, polys)?;

        let mut result = ResultShape::default();

        // Base projection, selection order.
        for (key, field) in selection.iter() {
            let descriptor = match key.strip_prefix(LINK_PROPERTY_PREFIX) {
                Some(property) => link_properties
                    .and_then(|props| props.iter().find(|p| p.name == property)),
                None => shape.iter().find(|p| p.name == key),
            };
            // Keys defined only by a poly are handled in the poly pass.
            let Some(descriptor) = descriptor else { continue };

            match field {
                SelectionField::Include(false) => {}
                SelectionField::Include(true) => {
                    let element = value_type_of(self.catalog, &descriptor.target_id)?;
                    result.push(ResultField {
                        name: key.to_string(),
                        value: project_cardinality(descriptor.cardinality, element),
                        optional: false,
                    });
                }
                SelectionField::Computed {
                    element,
                    cardinality,
                } => {
                    if !descriptor.cardinality.assignable_from(*cardinality) {
                        return Err(Error::IllegalCardinalityClaim {
                            object: object.to_string(),
                            name: key.to_string(),
                            declared: descriptor.cardinality,
                            claimed: *cardinality,
                        });
                    }
                    result.push(ResultField {
                        name: key.to_string(),
                        value: project_cardinality(*cardinality, element.clone()),
                        optional: false,
                    });
                }
                SelectionField::Nested(nested) => {
                    if descriptor.kind != PointerKind::Link {
                        return Err(Error::NestedSelectionOnProperty {
                            object: object.to_string(),
                            name: key.to_string(),
                        });
                    }
                    let target = self
                        .shapes
                        .get(&descriptor.target_id)
                        .ok_or_else(|| Error::MissingShape(descriptor.target_id.clone()))?;
                    let projected = self.project_object(
                        &target.name,
                        &target.shape,
                        Some(&descriptor.link_properties),
                        nested,
                        &target.polys,
                    )?;
                    result.push(ResultField {
                        name: key.to_string(),
                        value: project_cardinality(
                            descriptor.cardinality,
                            ValueType::Object(projected),
                        ),
                        optional: false,
                    });
                }
            }
        }

        // Poly pass: each variant's partial projection, every field
        // optional. A name already produced by the base projection keeps the
        // base's stricter requirement; the first poly to define a name wins
        // among polys.
        for poly in polys {
            let restricted =
                selection.restricted(|key| poly.shape.iter().any(|p| p.name == key));
            if restricted.is_empty() {
                continue;
            }
            let partial =
                self.project_object(&poly.type_name, &poly.shape, None, &restricted, &[])?;
            for field in partial.iter() {
                if !result.contains(&field.name) {
                    result.push(ResultField {
                        name: field.name.clone(),
                        value: field.value.clone(),
                        optional: true,
                    });
                }
            }
        }

        Ok(result)
    }

    /// Reject selections that reference a key absent from the shape, from
    /// the link's properties (for `@`-keys), and from every poly. Runs
    /// before any projection output is produced.
    fn validate_keys(
        &self,
        object: &TypeName,
        shape: &[PointerDescriptor],
        link_properties: Option<&[PointerDescriptor]>,
        selection: &Selection,
        polys: &[Poly],
    ) -> Result<()> {
        for (key, _) in selection.iter() {
            let known = match key.strip_prefix(LINK_PROPERTY_PREFIX) {
                Some(property) => link_properties
                    .map(|props| props.iter().any(|p| p.name == property))
                    .unwrap_or(false),
                None => {
                    shape.iter().any(|p| p.name == key)
                        || polys
                            .iter()
                            .any(|poly| poly.shape.iter().any(|p| p.name == key))
                }
            };
            if !known {
                return Err(Error::UnknownField {
                    object: object.to_string(),
                    name: key.to_string(),
                });
            }
        }
        Ok(())
    }
}
