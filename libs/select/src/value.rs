//! The projected value language and the cardinality projection rule.

use crate::error::Result;
use std::fmt;
use trellis_catalog::{Cardinality, TupleNaming, Type, TypeCatalog, TypeId, TypeName};

/// The value type of one projected field, or of a whole projected result.
///
/// `Nullable` encodes cardinality-driven absence (`AtMostOne`); it is
/// distinct from a [`ResultField`]'s `optional` flag, which encodes
/// poly-contributed fields that may be missing from the result altogether.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    /// The `Empty` cardinality short-circuit: the field yields no value.
    Null,
    Scalar(TypeName),
    Enum(TypeName),
    Array(Box<ValueType>),
    Tuple(Vec<ValueType>),
    NamedTuple(Vec<(String, ValueType)>),
    /// An object reference selected without dereferencing: the `{id}` stub.
    Ref(TypeName),
    /// A projected object shape from a nested selection.
    Object(ResultShape),
    /// Present-or-null, from `AtMostOne`.
    Nullable(Box<ValueType>),
    /// Possibly empty sequence, from `Many`.
    List(Box<ValueType>),
    /// Guaranteed non-empty sequence, from `AtLeastOne`.
    NonEmptyList(Box<ValueType>),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Null => f.write_str("null"),
            ValueType::Scalar(name) | ValueType::Enum(name) => write!(f, "{name}"),
            ValueType::Array(element) => write!(f, "array<{element}>"),
            ValueType::Tuple(elements) => {
                let items = elements
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "tuple<{items}>")
            }
            ValueType::NamedTuple(elements) => {
                let items = elements
                    .iter()
                    .map(|(name, value)| format!("{name}: {value}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "tuple<{items}>")
            }
            ValueType::Ref(name) => write!(f, "ref<{name}>"),
            ValueType::Object(shape) => write!(f, "{shape}"),
            ValueType::Nullable(inner) => write!(f, "{inner} | null"),
            ValueType::List(element) => write!(f, "list<{element}>"),
            ValueType::NonEmptyList(element) => write!(f, "nonempty_list<{element}>"),
        }
    }
}

/// Project a final value type from a declared cardinality and an element
/// type.
pub fn project_cardinality(cardinality: Cardinality, element: ValueType) -> ValueType {
    match cardinality {
        Cardinality::Empty => ValueType::Null,
        Cardinality::One => element,
        Cardinality::AtMostOne => ValueType::Nullable(Box::new(element)),
        Cardinality::AtLeastOne => ValueType::NonEmptyList(Box::new(element)),
        Cardinality::Many => ValueType::List(Box::new(element)),
    }
}

/// The structural value type of a catalog type, recursing through
/// collections. Object types resolve to `Ref` stubs; expanding an object is
/// only ever done by an explicit nested selection.
pub fn value_type_of(catalog: &TypeCatalog, id: &TypeId) -> Result<ValueType> {
    let ty = catalog.expect(id)?;
    match ty {
        Type::Scalar(scalar) => Ok(ValueType::Scalar(scalar.name.clone())),
        Type::Enum(enum_ty) => Ok(ValueType::Enum(enum_ty.name.clone())),
        Type::Object(object) => Ok(ValueType::Ref(object.name.clone())),
        Type::Array(array) => Ok(ValueType::Array(Box::new(value_type_of(
            catalog,
            &array.array_element_id,
        )?))),
        Type::Tuple(tuple) => match tuple.naming()? {
            TupleNaming::Positional => {
                let mut elements = Vec::with_capacity(tuple.tuple_elements.len());
                for element in &tuple.tuple_elements {
                    elements.push(value_type_of(catalog, &element.target_id)?);
                }
                Ok(ValueType::Tuple(elements))
            }
            TupleNaming::Named => {
                let mut elements = Vec::with_capacity(tuple.tuple_elements.len());
                for element in &tuple.tuple_elements {
                    elements.push((
                        element.name.clone(),
                        value_type_of(catalog, &element.target_id)?,
                    ));
                }
                Ok(ValueType::NamedTuple(elements))
            }
        },
    }
}

/// One field of a projected result shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultField {
    pub name: String,
    pub value: ValueType,
    /// True for poly-contributed fields: the field is absent from the result
    /// when the runtime value belongs to a different subtype, regardless of
    /// the field's own declared cardinality.
    pub optional: bool,
}

/// The projected value shape of an object selection, field order preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultShape {
    fields: Vec<ResultField>,
}

impl ResultShape {
    pub fn push(&mut self, field: ResultField) {
        self.fields.push(field);
    }

    pub fn get(&self, name: &str) -> Option<&ResultField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self
            .fields
            .iter()
            .map(|field| {
                let marker = if field.optional { "?" } else { "" };
                format!("{}{marker}: {}", field.name, field.value)
            })
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{fields}}}")
    }
}
