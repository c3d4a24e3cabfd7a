//! In-memory declaration sink.
//!
//! Generated declarations are deposited into one [`OutputUnit`] per schema
//! module. Writing the rendered units to disk (or anywhere else) is the
//! caller's concern; the reflection pass itself performs no I/O.

use std::collections::{BTreeMap, BTreeSet};

const INDENT: &str = "  ";

/// One emission unit: the declarations generated for a single schema module,
/// plus the set of other modules it references.
#[derive(Debug, Default)]
pub struct OutputUnit {
    references: BTreeSet<String>,
    lines: Vec<String>,
    indent: usize,
}

impl OutputUnit {
    /// Append one line at the current indentation level.
    pub fn writeln(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", INDENT.repeat(self.indent), line));
        }
    }

    /// Append a blank line.
    pub fn nl(&mut self) {
        self.lines.push(String::new());
    }

    /// Run `f` with the indentation level raised by one step.
    pub fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    /// Record that this unit references `module`. Idempotent: registering
    /// the same module any number of times records it once.
    pub fn add_reference(&mut self, module: &str) {
        self.references.insert(module.to_string());
    }

    /// The modules this unit references, sorted.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.references.iter().map(String::as_str)
    }

    /// Render the unit: cross-module references first, then the declaration
    /// lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for module in &self.references {
            out.push_str(&format!("using {module};\n"));
        }
        if !self.references.is_empty() && !self.lines.is_empty() {
            out.push('\n');
        }
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// The full output of a generation pass: one unit per schema module, keyed
/// and iterated in module-name order for deterministic emission.
#[derive(Debug, Default)]
pub struct OutputSet {
    units: BTreeMap<String, OutputUnit>,
}

impl OutputSet {
    pub fn new() -> Self {
        OutputSet::default()
    }

    /// Resolve the unit for `module`, creating it on first use.
    pub fn unit(&mut self, module: &str) -> &mut OutputUnit {
        self.units.entry(module.to_string()).or_default()
    }

    pub fn get(&self, module: &str) -> Option<&OutputUnit> {
        self.units.get(module)
    }

    pub fn units(&self) -> impl Iterator<Item = (&str, &OutputUnit)> {
        self.units.iter().map(|(name, unit)| (name.as_str(), unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_lines_with_nested_indentation() {
        let mut unit = OutputUnit::default();
        unit.writeln("shape Person = {");
        unit.indented(|u| {
            u.writeln("name: property<std::str, One>;");
            u.indented(|u| u.writeln("deep;"));
        });
        unit.writeln("};");
        assert_eq!(
            unit.render(),
            "shape Person = {\n  name: property<std::str, One>;\n    deep;\n};\n"
        );
    }

    #[test]
    fn reference_registration_is_idempotent() {
        let mut unit = OutputUnit::default();
        unit.add_reference("std");
        unit.add_reference("std");
        unit.add_reference("cal");
        assert_eq!(unit.references().collect::<Vec<_>>(), vec!["cal", "std"]);
        assert!(unit.render().starts_with("using cal;\nusing std;\n"));
    }

    #[test]
    fn units_are_iterated_in_module_order() {
        let mut out = OutputSet::new();
        out.unit("std");
        out.unit("default");
        let modules: Vec<_> = out.units().map(|(name, _)| name).collect();
        assert_eq!(modules, vec!["default", "std"]);
    }
}
