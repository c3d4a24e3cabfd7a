//! The type representation resolver.
//!
//! For every type node the resolver produces a matching pair of textual
//! forms: a structural one (what the type looks like, for a static checker
//! or schema document) and a constructive one (how to build its runtime
//! descriptor). The two are kept structurally parallel case by case.
//!
//! Object, scalar, and enum types always resolve to their scope-qualified
//! identifier and are never inlined, which is what makes recursive and
//! self-referential type graphs terminate: a link back to the containing
//! object type is just a name. Only collection types recurse, and collection
//! element graphs are acyclic by construction upstream.

use crate::error::Result;
use crate::output::OutputUnit;
use crate::scope::ScopeContext;
use trellis_catalog::{TupleNaming, Type, TypeCatalog};

/// The paired representations of one type node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRepr {
    /// Shape description for static consumption, e.g.
    /// `array<"array<std::str>", std::str>`.
    pub structural: String,
    /// Runtime-descriptor construction, e.g.
    /// `array("array<std::str>", std::str)`.
    pub constructive: String,
}

impl TypeRepr {
    fn by_name(ident: String) -> Self {
        TypeRepr {
            structural: ident.clone(),
            constructive: ident,
        }
    }
}

/// Resolve the representation pair for `ty` in `scope`.
///
/// Pure over `(ty, scope)` apart from cross-module reference registration on
/// `unit`; resolving the same type twice in the same scope yields
/// byte-identical output.
pub fn representation(
    catalog: &TypeCatalog,
    ty: &Type,
    scope: &ScopeContext<'_>,
    unit: &mut OutputUnit,
) -> Result<TypeRepr> {
    match ty {
        Type::Scalar(scalar) => Ok(TypeRepr::by_name(scope.scope_name(&scalar.name, unit))),
        Type::Enum(enum_ty) => Ok(TypeRepr::by_name(scope.scope_name(&enum_ty.name, unit))),
        Type::Object(object) => Ok(TypeRepr::by_name(scope.scope_name(&object.name, unit))),
        Type::Array(array) => {
            let element = catalog.expect(&array.array_element_id)?;
            let element = representation(catalog, element, scope, unit)?;
            Ok(TypeRepr {
                structural: format!("array<\"{}\", {}>", array.name, element.structural),
                constructive: format!("array(\"{}\", {})", array.name, element.constructive),
            })
        }
        Type::Tuple(tuple) => {
            let mut elements = Vec::with_capacity(tuple.tuple_elements.len());
            for element in &tuple.tuple_elements {
                let target = catalog.expect(&element.target_id)?;
                elements.push((
                    element.name.as_str(),
                    representation(catalog, target, scope, unit)?,
                ));
            }
            match tuple.naming()? {
                TupleNaming::Named => {
                    let structural = elements
                        .iter()
                        .map(|(name, repr)| format!("{name}: {}", repr.structural))
                        .collect::<Vec<_>>()
                        .join(", ");
                    let constructive = elements
                        .iter()
                        .map(|(name, repr)| format!("{name}: {}", repr.constructive))
                        .collect::<Vec<_>>()
                        .join(", ");
                    Ok(TypeRepr {
                        structural: format!("named_tuple<\"{}\", {{{structural}}}>", tuple.name),
                        constructive: format!("named_tuple(\"{}\", {{{constructive}}})", tuple.name),
                    })
                }
                TupleNaming::Positional => {
                    let structural = elements
                        .iter()
                        .map(|(_, repr)| repr.structural.clone())
                        .collect::<Vec<_>>()
                        .join(", ");
                    let constructive = elements
                        .iter()
                        .map(|(_, repr)| repr.constructive.clone())
                        .collect::<Vec<_>>()
                        .join(", ");
                    Ok(TypeRepr {
                        structural: format!("tuple<\"{}\", [{structural}]>", tuple.name),
                        constructive: format!("tuple(\"{}\", [{constructive}])", tuple.name),
                    })
                }
            }
        }
    }
}
