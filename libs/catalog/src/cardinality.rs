//! The cardinality lattice and its assignability rule.
//!
//! Cardinalities form a diamond, not a total order:
//!
//! ```text
//!            Many
//!           /    \
//!     AtLeastOne  AtMostOne
//!           \    /     \
//!            One       Empty
//! ```
//!
//! Assignability governs what a caller may *claim* about a field when
//! selecting it, not what the schema declares: an `AtMostOne` field may be
//! treated as present-or-absent but never as a list, and an `AtLeastOne`
//! field may be narrowed to exactly one but never treated as possibly
//! absent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared multiplicity of the values a pointer may yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    Empty,
    AtMostOne,
    One,
    AtLeastOne,
    Many,
}

impl Cardinality {
    pub const ALL: [Cardinality; 5] = [
        Cardinality::Empty,
        Cardinality::AtMostOne,
        Cardinality::One,
        Cardinality::AtLeastOne,
        Cardinality::Many,
    ];

    /// The cardinalities a caller may legally claim when selecting a field
    /// declared with this cardinality.
    pub fn assignable(self) -> &'static [Cardinality] {
        use Cardinality::*;
        match self {
            Empty => &[Empty],
            AtMostOne | One => &[One, AtMostOne, Empty],
            AtLeastOne => &[One, AtLeastOne, Many],
            Many => &Cardinality::ALL,
        }
    }

    /// Whether `claimed` is a legal treatment of a field declared `self`.
    pub fn assignable_from(self, claimed: Cardinality) -> bool {
        self.assignable().contains(&claimed)
    }

    /// True when the field may yield more than one value.
    pub fn is_multi(self) -> bool {
        matches!(self, Cardinality::AtLeastOne | Cardinality::Many)
    }

    /// True when the field may yield no value at all.
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            Cardinality::Empty | Cardinality::AtMostOne | Cardinality::Many
        )
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cardinality::Empty => "Empty",
            Cardinality::AtMostOne => "AtMostOne",
            Cardinality::One => "One",
            Cardinality::AtLeastOne => "AtLeastOne",
            Cardinality::Many => "Many",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::Cardinality::*;
    use super::*;

    #[test]
    fn assignable_sets_match_the_lattice() {
        assert_eq!(Empty.assignable(), &[Empty]);
        assert_eq!(AtMostOne.assignable(), &[One, AtMostOne, Empty]);
        assert_eq!(One.assignable(), &[One, AtMostOne, Empty]);
        assert_eq!(AtLeastOne.assignable(), &[One, AtLeastOne, Many]);
        assert_eq!(Many.assignable(), &Cardinality::ALL);
    }

    #[test]
    fn at_most_one_may_not_be_treated_as_a_list() {
        assert!(!AtMostOne.assignable_from(Many));
        assert!(!AtMostOne.assignable_from(AtLeastOne));
        assert!(AtMostOne.assignable_from(Empty));
    }

    #[test]
    fn at_least_one_may_be_narrowed_but_never_absent() {
        assert!(AtLeastOne.assignable_from(One));
        assert!(!AtLeastOne.assignable_from(Empty));
        assert!(!AtLeastOne.assignable_from(AtMostOne));
    }

    #[test]
    fn serde_round_trips_the_introspection_spelling() {
        let card: Cardinality = serde_json::from_str("\"AtMostOne\"").unwrap();
        assert_eq!(card, AtMostOne);
        assert_eq!(serde_json::to_string(&card).unwrap(), "\"AtMostOne\"");
    }
}
