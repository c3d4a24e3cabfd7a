//! Data model for introspected schema types.
//!
//! Mirrors the shape of the introspection query output: one row per type,
//! with kind-specific payloads. All structures are immutable snapshots.

use crate::cardinality::Cardinality;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, globally unique identifier of a type within one catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub String);

impl TypeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeId {
    fn from(s: &str) -> Self {
        TypeId(s.to_string())
    }
}

/// A schema-qualified type name, `module::Name`.
///
/// The module segment may itself contain `::` separators; the local name is
/// always the final segment. Names without any separator are placed in the
/// `default` module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeName {
    module: String,
    local: String,
}

impl TypeName {
    pub fn new(module: &str, local: &str) -> Self {
        TypeName {
            module: module.to_string(),
            local: local.to_string(),
        }
    }

    pub fn parse(qualified: &str) -> Self {
        match qualified.rsplit_once("::") {
            Some((module, local)) => TypeName::new(module, local),
            None => TypeName::new("default", qualified),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn local(&self) -> &str {
        &self.local
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.local)
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        TypeName::parse(&s)
    }
}

impl From<TypeName> for String {
    fn from(name: TypeName) -> Self {
        name.to_string()
    }
}

/// Reference to another catalog type, by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub id: TypeId,
}

/// The kind of edge a pointer represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    /// Scalar- or collection-valued.
    Property,
    /// Object-valued; may carry its own properties.
    Link,
}

/// A named edge from an object type to a target type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub name: String,
    pub kind: PointerKind,
    #[serde(rename = "realCardinality")]
    pub real_cardinality: Cardinality,
    pub target_id: TypeId,
    /// Link-attached properties. Empty for property pointers. Holds the raw
    /// introspection rows including the reserved `source`/`target`
    /// pseudo-pointers; use [`Pointer::link_properties`] to consume them.
    #[serde(default)]
    pub pointers: Vec<Pointer>,
}

impl Pointer {
    /// Link-attached properties, with the reserved `source`/`target`
    /// pseudo-pointers filtered out.
    pub fn link_properties(&self) -> impl Iterator<Item = &Pointer> {
        self.pointers
            .iter()
            .filter(|p| p.name != "source" && p.name != "target")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarType {
    pub id: TypeId,
    pub name: TypeName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    pub id: TypeId,
    pub name: TypeName,
    #[serde(default)]
    pub enum_values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    pub id: TypeId,
    pub name: TypeName,
    #[serde(default)]
    pub pointers: Vec<Pointer>,
    #[serde(default)]
    pub bases: Vec<TypeRef>,
    /// Non-empty for object types synthesized as unions. Such types are
    /// skipped by shape generation entirely.
    #[serde(default)]
    pub union_of: Vec<TypeRef>,
    /// Non-empty for object types synthesized as intersections. Skipped like
    /// unions.
    #[serde(default)]
    pub intersection_of: Vec<TypeRef>,
}

impl ObjectType {
    /// True for synthesized union/intersection types that never get a shape.
    pub fn is_compound(&self) -> bool {
        !self.union_of.is_empty() || !self.intersection_of.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayType {
    pub id: TypeId,
    pub name: TypeName,
    pub array_element_id: TypeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleElement {
    pub name: String,
    pub target_id: TypeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleType {
    pub id: TypeId,
    pub name: TypeName,
    #[serde(default)]
    pub tuple_elements: Vec<TupleElement>,
}

/// Whether a tuple's elements are addressed by position or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TupleNaming {
    Positional,
    Named,
}

impl TupleType {
    /// Detect whether this tuple is positional or named.
    ///
    /// Naming is detected, not configured: the tuple is positional exactly
    /// when its first element is named `"0"`. Every remaining element must
    /// agree with the detected mode; a mix fails with
    /// [`Error::AmbiguousTupleNaming`].
    pub fn naming(&self) -> Result<TupleNaming> {
        let naming = match self.tuple_elements.first() {
            Some(first) if first.name == "0" => TupleNaming::Positional,
            Some(_) => TupleNaming::Named,
            None => return Ok(TupleNaming::Positional),
        };
        for (i, element) in self.tuple_elements.iter().enumerate() {
            let positional = element.name == i.to_string();
            let consistent = match naming {
                TupleNaming::Positional => positional,
                TupleNaming::Named => !positional,
            };
            if !consistent {
                return Err(Error::AmbiguousTupleNaming {
                    name: self.name.to_string(),
                    element: element.name.clone(),
                });
            }
        }
        Ok(naming)
    }
}

/// A single type row from the introspected catalog.
///
/// One case per kind; dispatch sites match exhaustively so that adding a new
/// kind is a compile-time-caught omission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Type {
    Scalar(ScalarType),
    Enum(EnumType),
    Object(ObjectType),
    Array(ArrayType),
    Tuple(TupleType),
}

impl Type {
    pub fn id(&self) -> &TypeId {
        match self {
            Type::Scalar(t) => &t.id,
            Type::Enum(t) => &t.id,
            Type::Object(t) => &t.id,
            Type::Array(t) => &t.id,
            Type::Tuple(t) => &t.id,
        }
    }

    pub fn name(&self) -> &TypeName {
        match self {
            Type::Scalar(t) => &t.name,
            Type::Enum(t) => &t.name,
            Type::Object(t) => &t.name,
            Type::Array(t) => &t.name,
            Type::Tuple(t) => &t.name,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Type::Object(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_qualified_names() {
        let name = TypeName::parse("std::str");
        assert_eq!(name.module(), "std");
        assert_eq!(name.local(), "str");
        assert_eq!(name.to_string(), "std::str");
    }

    #[test]
    fn nested_module_segments_stay_in_the_module() {
        let name = TypeName::parse("app::auth::User");
        assert_eq!(name.module(), "app::auth");
        assert_eq!(name.local(), "User");
    }

    #[test]
    fn bare_names_fall_into_the_default_module() {
        let name = TypeName::parse("Person");
        assert_eq!(name.module(), "default");
        assert_eq!(name.local(), "Person");
    }

    fn tuple_with(elements: &[(&str, &str)]) -> TupleType {
        TupleType {
            id: TypeId::from("t-1"),
            name: TypeName::parse("default::tuple"),
            tuple_elements: elements
                .iter()
                .map(|(name, target)| TupleElement {
                    name: name.to_string(),
                    target_id: TypeId::from(*target),
                })
                .collect(),
        }
    }

    #[test]
    fn first_element_named_zero_means_positional() {
        let tuple = tuple_with(&[("0", "int"), ("1", "str")]);
        assert_eq!(tuple.naming().unwrap(), TupleNaming::Positional);
    }

    #[test]
    fn any_other_first_name_means_named() {
        let tuple = tuple_with(&[("x", "int"), ("y", "str")]);
        assert_eq!(tuple.naming().unwrap(), TupleNaming::Named);

        // An empty string is not "0", so the tuple counts as named.
        let tuple = tuple_with(&[("", "int")]);
        assert_eq!(tuple.naming().unwrap(), TupleNaming::Named);
    }

    #[test]
    fn mixed_naming_is_rejected() {
        let tuple = tuple_with(&[("0", "int"), ("y", "str")]);
        assert!(matches!(
            tuple.naming(),
            Err(Error::AmbiguousTupleNaming { .. })
        ));

        let tuple = tuple_with(&[("x", "int"), ("1", "str")]);
        assert!(matches!(
            tuple.naming(),
            Err(Error::AmbiguousTupleNaming { .. })
        ));
    }

    #[test]
    fn link_properties_exclude_reserved_pseudo_pointers() {
        let link = Pointer {
            name: "friends".to_string(),
            kind: PointerKind::Link,
            real_cardinality: Cardinality::Many,
            target_id: TypeId::from("obj-1"),
            pointers: vec![
                Pointer {
                    name: "source".to_string(),
                    kind: PointerKind::Property,
                    real_cardinality: Cardinality::One,
                    target_id: TypeId::from("uuid"),
                    pointers: vec![],
                },
                Pointer {
                    name: "target".to_string(),
                    kind: PointerKind::Property,
                    real_cardinality: Cardinality::One,
                    target_id: TypeId::from("uuid"),
                    pointers: vec![],
                },
                Pointer {
                    name: "strength".to_string(),
                    kind: PointerKind::Property,
                    real_cardinality: Cardinality::AtMostOne,
                    target_id: TypeId::from("float"),
                    pointers: vec![],
                },
            ],
        };
        let names: Vec<_> = link.link_properties().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["strength"]);
    }
}
