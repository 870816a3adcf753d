//! Enum emission: a typed constant set plus its wire matcher.

use super::ir::{EnumIr, VariantIr};
use xapigen_core::{Enum, Normalizer};

/// Build the enum IR for one enumeration.
///
/// Variants keep declaration order and are numbered from 1. A value whose
/// normalized identifier is already taken gets its discriminant appended.
pub fn emit_enum(e: &Enum, normalizer: &Normalizer) -> EnumIr {
    let mut variants: Vec<VariantIr> = Vec::with_capacity(e.values.len());
    for (i, value) in e.values.iter().enumerate() {
        let discriminant = i + 1;
        let mut ident = normalizer.normalize(&value.name);
        if variants.iter().any(|v| v.ident == ident) {
            ident = format!("{ident}{discriminant}");
        }
        variants.push(VariantIr {
            ident,
            wire: value.name.clone(),
            discriminant,
        });
    }

    EnumIr {
        name: normalizer.normalize(&e.name),
        raw_name: e.name.clone(),
        variants,
    }
}

impl EnumIr {
    /// Match arms of the wire matcher: lower-cased wire name and variant.
    ///
    /// Values that only differ by case collapse onto the first declared one,
    /// so every arm is reachable.
    pub fn wire_cases(&self) -> Vec<(String, &VariantIr)> {
        let mut cases: Vec<(String, &VariantIr)> = Vec::with_capacity(self.variants.len());
        for variant in &self.variants {
            let key = variant.wire.to_lowercase();
            if !cases.iter().any(|(existing, _)| *existing == key) {
                cases.push((key, variant));
            }
        }
        cases
    }
}
