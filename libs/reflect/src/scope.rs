//! Module scoping for qualified names.

use crate::output::OutputUnit;
use trellis_catalog::TypeName;

/// The module context of the code currently being generated.
///
/// Threaded explicitly through every resolution call rather than held in
/// ambient state, so that resolution stays referentially transparent and
/// testable in isolation.
#[derive(Debug, Clone, Copy)]
pub struct ScopeContext<'a> {
    pub module: &'a str,
}

impl<'a> ScopeContext<'a> {
    pub fn new(module: &'a str) -> Self {
        ScopeContext { module }
    }

    /// Resolve `name` to an identifier valid inside this scope.
    ///
    /// Same-module names resolve to the bare local identifier; names from
    /// other modules stay module-qualified, and the cross-module reference
    /// is registered on the emission unit (idempotently).
    pub fn scope_name(&self, name: &TypeName, unit: &mut OutputUnit) -> String {
        if name.module() == self.module {
            name.local().to_string()
        } else {
            unit.add_reference(name.module());
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_module_names_resolve_bare() {
        let mut unit = OutputUnit::default();
        let scope = ScopeContext::new("default");
        let ident = scope.scope_name(&TypeName::parse("default::Person"), &mut unit);
        assert_eq!(ident, "Person");
        assert_eq!(unit.references().count(), 0);
    }

    #[test]
    fn cross_module_names_stay_qualified_and_register_once() {
        let mut unit = OutputUnit::default();
        let scope = ScopeContext::new("default");
        let first = scope.scope_name(&TypeName::parse("std::str"), &mut unit);
        let second = scope.scope_name(&TypeName::parse("std::int64"), &mut unit);
        assert_eq!(first, "std::str");
        assert_eq!(second, "std::int64");
        assert_eq!(unit.references().collect::<Vec<_>>(), vec!["std"]);
    }
}
