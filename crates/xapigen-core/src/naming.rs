//! Identifier normalization for generated bindings.
//!
//! Description identifiers are snake_case with the occasional upper-case
//! acronym (`VM`, `PIF_metrics`, `VCPUs_max`). Generated Rust needs:
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `vm_power_state` | [`Normalizer::normalize`] | `VmPowerState` |
//! | `PIF_metrics` | [`Normalizer::normalize`] | `PIFMetrics` |
//! | `name_label` | [`Normalizer::variable_name`] | `name_label` |
//! | `VCPUs_max` | [`Normalizer::variable_name`] | `vcpus_max` |
//! | `type` | [`Normalizer::variable_name`] | `type_` |
//! | `task_status_type` | [`unit_name`] | `taskstatustype` |
//!
//! Type names that collide with names the generated units import (`Value`,
//! `Client`, `Result`, ...) are rewritten to a `Xen`-prefixed form. The
//! replacement table can be extended from configuration.

use std::collections::BTreeMap;

/// Rust keywords (strict and reserved) that cannot be used as bare identifiers.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Type names already taken inside a generated unit.
const DEFAULT_RESERVED_TYPES: &[(&str, &str)] = &[
    ("Self", "XenSelf"),
    ("Result", "XenResult"),
    ("Error", "XenError"),
    ("Value", "XenValue"),
    ("Client", "XenClient"),
    ("XenApiObject", "XenApiObjectType"),
    ("HashMap", "XenHashMap"),
    ("Option", "XenOption"),
    ("String", "XenString"),
    ("Vec", "XenVec"),
    ("Box", "XenBox"),
];

/// Converts description identifiers into binding-safe Rust identifiers.
///
/// Pure: the output depends only on the input and the reserved-word table,
/// never on call order.
#[derive(Debug, Clone)]
pub struct Normalizer {
    reserved: BTreeMap<String, String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            reserved: DEFAULT_RESERVED_TYPES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

impl Normalizer {
    /// Create a normalizer with the default reserved-word table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or override) reserved-word replacements
    pub fn with_reserved<I, K, V>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.reserved
            .extend(extra.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Normalize a raw identifier into a type-style (PascalCase) name.
    ///
    /// Splits on underscores, upper-cases the first letter of every segment,
    /// strips anything that is not ASCII alphanumeric and then applies the
    /// reserved-word table.
    ///
    /// # Examples
    ///
    /// ```
    /// use xapigen_core::Normalizer;
    ///
    /// let n = Normalizer::new();
    /// assert_eq!(n.normalize("vm_power_state"), "VmPowerState");
    /// assert_eq!(n.normalize("VM"), "VM");
    /// assert_eq!(n.normalize("value"), "XenValue");
    /// ```
    pub fn normalize(&self, raw: &str) -> String {
        let joined: String = raw
            .split('_')
            .map(capitalize)
            .collect::<String>()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();

        let name = guard_leading_digit(joined, "Unnamed");
        match self.reserved.get(&name) {
            Some(replacement) => replacement.clone(),
            None => name,
        }
    }

    /// Normalize a raw identifier into a variable, parameter or method name.
    ///
    /// Produces snake_case: every run of non-alphanumeric characters becomes a
    /// single underscore and the result is lower-cased. Keywords get a
    /// trailing underscore.
    ///
    /// # Examples
    ///
    /// ```
    /// use xapigen_core::Normalizer;
    ///
    /// let n = Normalizer::new();
    /// assert_eq!(n.variable_name("name_label"), "name_label");
    /// assert_eq!(n.variable_name("VCPUs_max"), "vcpus_max");
    /// assert_eq!(n.variable_name("type"), "type_");
    /// ```
    pub fn variable_name(&self, raw: &str) -> String {
        let joined = raw
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|segment| !segment.is_empty())
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join("_");

        let name = guard_leading_digit(joined, "unnamed");
        if RUST_KEYWORDS.contains(&name.as_str()) {
            format!("{name}_")
        } else {
            name
        }
    }
}

/// Output unit name for an object type: lower-cased with underscores removed.
///
/// # Examples
///
/// ```
/// use xapigen_core::naming::unit_name;
///
/// assert_eq!(unit_name("VM_guest_metrics"), "vmguestmetrics");
/// assert_eq!(unit_name("task"), "task");
/// ```
pub fn unit_name(raw: &str) -> String {
    raw.replace('_', "").to_lowercase()
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

fn guard_leading_digit(name: String, fallback: &str) -> String {
    match name.chars().next() {
        None => fallback.to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{name}"),
        Some(_) => name,
    }
}
