//! The selection model: which fields of a shape a caller requests.

use crate::value::ValueType;
use trellis_catalog::Cardinality;

/// The value attached to one selected field.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionField {
    /// `true` includes the field as declared; `false` omits it from the
    /// result entirely.
    Include(bool),
    /// A nested sub-selection over a link's target. Keys prefixed with `@`
    /// address the properties of the link itself rather than the target.
    Nested(Selection),
    /// A value-producing expression external to the shape. Its declared
    /// result type is slotted into the projection as-is; this layer does not
    /// validate the expression.
    Computed {
        element: ValueType,
        cardinality: Cardinality,
    },
}

impl From<bool> for SelectionField {
    fn from(include: bool) -> Self {
        SelectionField::Include(include)
    }
}

impl From<Selection> for SelectionField {
    fn from(nested: Selection) -> Self {
        SelectionField::Nested(nested)
    }
}

/// An ordered field → request map over one shape.
///
/// Field order is preserved into the projected result for determinism.
/// Selection keys are assumed well-formed apart from membership in the
/// shape, which [`project`](crate::project) checks before projecting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    fields: Vec<(String, SelectionField)>,
}

/// Marker prefix distinguishing link-property keys inside a nested
/// selection.
pub(crate) const LINK_PROPERTY_PREFIX: char = '@';

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Add a field request, builder-style.
    pub fn field(mut self, name: &str, value: impl Into<SelectionField>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&SelectionField> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SelectionField)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Restrict this selection to the fields `keep` accepts, preserving
    /// order.
    pub(crate) fn restricted(&self, keep: impl Fn(&str) -> bool) -> Selection {
        Selection {
            fields: self
                .fields
                .iter()
                .filter(|(name, _)| keep(name))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_insertion_order() {
        let selection = Selection::new()
            .field("b", true)
            .field("a", false)
            .field("c", Selection::new().field("id", true));
        let keys: Vec<_> = selection.iter().map(|(name, _)| name).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(selection.get("a"), Some(&SelectionField::Include(false)));
    }

    #[test]
    fn restriction_keeps_order_and_drops_the_rest() {
        let selection = Selection::new()
            .field("a", true)
            .field("b", true)
            .field("c", true);
        let restricted = selection.restricted(|name| name != "b");
        let keys: Vec<_> = restricted.iter().map(|(name, _)| name).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }
}
