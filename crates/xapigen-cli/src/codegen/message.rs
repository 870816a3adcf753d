//! Message emission: one remote-procedure message to one method.

use super::ir::{MethodIr, SkipReason, SkippedMessage};
use super::params::bind_params;
use super::result::bind_result;
use xapigen_core::{Message, Normalizer, ObjectType};

/// Messages whose bindings live in a hand-written extension.
const HAND_WRITTEN: &[(&str, &str)] = &[("task", "get_result")];

/// What became of one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    Emitted(MethodIr),
    Skipped(SkippedMessage),
}

/// Whether a hand-written extension provides this message.
pub fn is_hand_written(owner: &ObjectType, message: &Message) -> bool {
    HAND_WRITTEN
        .iter()
        .any(|(ty, msg)| owner.name == *ty && message.name == *msg)
}

/// Emit the method for `message`, or say why there is none.
pub fn emit_message(owner: &ObjectType, message: &Message, normalizer: &Normalizer) -> MessageOutcome {
    let identity = owner.identity(message);

    let binding = if is_hand_written(owner, message) {
        Err(SkipReason::HandWritten)
    } else {
        bind_result(owner, message, normalizer).and_then(|result| {
            bind_params(owner, message, normalizer).map(|params| (params, result))
        })
    };

    match binding {
        Ok((params, result)) => MessageOutcome::Emitted(MethodIr {
            name: normalizer.variable_name(&message.name),
            identity,
            docs: message.description.clone(),
            params,
            result,
        }),
        Err(reason) => MessageOutcome::Skipped(SkippedMessage { identity, reason }),
    }
}
