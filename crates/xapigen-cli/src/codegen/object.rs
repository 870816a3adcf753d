//! Object emission: one object type to one generated unit.

use super::enums::emit_enum;
use super::ir::{SkipReason, SkippedMessage, UnitIr};
use super::message::{MessageOutcome, emit_message};
use super::render::render_unit;
use anyhow::Result;
use std::collections::BTreeSet;
use xapigen_core::naming::unit_name;
use xapigen_core::{Normalizer, ObjectType};

/// Method names the unit defines itself.
const UNIT_METHODS: &[&str] = &["new"];

/// One rendered unit.
#[derive(Debug, Clone)]
pub struct UnitOutput {
    /// File stem of the unit, lower-cased object name without underscores.
    pub unit_name: String,
    pub type_name: String,
    pub source: String,
    pub methods: usize,
    pub skipped: Vec<SkippedMessage>,
}

/// Build the IR for one object type.
///
/// Returns `None` for object types with fewer than two messages; those get no
/// unit.
pub fn build_unit(
    ot: &ObjectType,
    normalizer: &Normalizer,
    extension: Option<&str>,
) -> Option<(UnitIr, Vec<SkippedMessage>)> {
    if !ot.is_generated() {
        tracing::debug!(
            object_type = %ot.name,
            messages = ot.messages.len(),
            "skipping object type with fewer than two messages"
        );
        return None;
    }

    let mut taken: BTreeSet<String> = UNIT_METHODS.iter().map(|m| m.to_string()).collect();
    let mut methods = Vec::new();
    let mut skipped = Vec::new();

    for message in &ot.messages {
        match emit_message(ot, message, normalizer) {
            MessageOutcome::Emitted(method) => {
                if taken.insert(method.name.clone()) {
                    tracing::debug!(method = %method.identity, "emitted method");
                    methods.push(method);
                } else {
                    let skip = SkippedMessage {
                        identity: method.identity,
                        reason: SkipReason::NameCollision { name: method.name },
                    };
                    tracing::warn!(method = %skip.identity, "skipped: {}", skip.reason);
                    skipped.push(skip);
                }
            }
            MessageOutcome::Skipped(skip) => {
                if skip.reason.is_unsupported() {
                    tracing::warn!(method = %skip.identity, "skipped: {}", skip.reason);
                } else {
                    tracing::debug!(method = %skip.identity, "skipped: {}", skip.reason);
                }
                skipped.push(skip);
            }
        }
    }

    let unit = UnitIr {
        object_name: ot.name.clone(),
        type_name: normalizer.normalize(&ot.name),
        docs: ot.description.clone(),
        enums: ot.enums.iter().map(|e| emit_enum(e, normalizer)).collect(),
        methods,
        extension: extension.map(str::to_string),
    };

    Some((unit, skipped))
}

/// Emit and render the unit for one object type.
pub fn emit_object(
    ot: &ObjectType,
    normalizer: &Normalizer,
    extension: Option<&str>,
) -> Result<Option<UnitOutput>> {
    let Some((unit, skipped)) = build_unit(ot, normalizer, extension) else {
        return Ok(None);
    };

    let source = render_unit(&unit)?;
    tracing::info!(
        object_type = %ot.name,
        methods = unit.methods.len(),
        enums = unit.enums.len(),
        skipped = skipped.len(),
        "generated unit"
    );

    Ok(Some(UnitOutput {
        unit_name: unit_name(&ot.name),
        type_name: unit.type_name,
        source,
        methods: unit.methods.len(),
        skipped,
    }))
}
