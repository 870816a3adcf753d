//! Result binding: return type and decoding of the raw wire value.
//!
//! Every decoding runs after the call's error check, so a fault is surfaced
//! before any conversion is attempted. Decoding failures are typed errors
//! (`Error::Decode` for a wrong wire kind, `Error::ProtocolDrift` for an enum
//! value the bindings do not know).

use super::ir::{RAW_VALUE, ResultBinding, SkipReason};
use xapigen_core::{Message, Normalizer, ObjectType, ResultShape};

/// Result variable used when the message name carries no `get_` prefix.
const DEFAULT_VAR: &str = "response";

/// Names the decoding statements bind locally.
const DECODE_LOCALS: &[&str] = &[RAW_VALUE, "entry", "key"];

/// Bind the result of `message`.
pub fn bind_result(
    owner: &ObjectType,
    message: &Message,
    normalizer: &Normalizer,
) -> Result<ResultBinding, SkipReason> {
    let shape = ResultShape::of(message.result_type(), &owner.name);
    let identity = owner.identity(message);
    let var = result_var(message, normalizer);
    let client = "self.client.clone()";

    let (return_type, decode) = match &shape {
        ResultShape::Void => {
            return Ok(ResultBinding {
                var: String::new(),
                return_type: "()".to_string(),
                decode: Vec::new(),
            });
        }
        ResultShape::String => ("String".to_string(), convert(&var, "into_string")),
        ResultShape::Float => ("f64".to_string(), convert(&var, "into_f64")),
        ResultShape::Int => ("i64".to_string(), convert(&var, "into_i64")),
        ResultShape::Record => ("HashMap<String, String>".to_string(), convert(&var, "into_record")),
        ResultShape::StringMap => (
            "HashMap<String, String>".to_string(),
            convert(&var, "into_string_map"),
        ),
        ResultShape::StringSet => ("Vec<String>".to_string(), convert(&var, "into_string_vec")),
        ResultShape::Ref(target) => {
            let ty = normalizer.normalize(target);
            let decode = format!("let {var} = {ty}::new({RAW_VALUE}.into_string()?, {client});");
            (ty, vec![decode])
        }
        ResultShape::Enum(e) => {
            let ty = normalizer.normalize(e);
            let decode =
                format!("let {var} = {ty}::from_wire({identity:?}, &{RAW_VALUE}.into_string()?)?;");
            (ty, vec![decode])
        }
        ResultShape::RefSet(target) => {
            let ty = normalizer.normalize(target);
            let push = format!("{var}.push({ty}::new(entry.into_string()?, {client}));");
            (format!("Vec<{ty}>"), collect_vec(&var, &push))
        }
        ResultShape::EnumSet(e) => {
            let ty = normalizer.normalize(e);
            let push = format!("{var}.push({ty}::from_wire({identity:?}, &entry.into_string()?)?);");
            (format!("Vec<{ty}>"), collect_vec(&var, &push))
        }
        ResultShape::RefToStringSetMap(target) => {
            let ty = normalizer.normalize(target);
            let insert =
                format!("{var}.insert({ty}::new(key, {client}), entry.into_string_vec()?);");
            (format!("HashMap<{ty}, Vec<String>>"), collect_map(&var, &insert))
        }
        ResultShape::StringToRefMap(target) => {
            let ty = normalizer.normalize(target);
            let insert = format!("{var}.insert(key, {ty}::new(entry.into_string()?, {client}));");
            (format!("HashMap<String, {ty}>"), collect_map(&var, &insert))
        }
        ResultShape::RefToRecordMap(target) => {
            let ty = normalizer.normalize(target);
            let insert = format!("{var}.insert({ty}::new(key, {client}), entry.into_record()?);");
            (
                format!("HashMap<{ty}, HashMap<String, String>>"),
                collect_map(&var, &insert),
            )
        }
        ResultShape::StringToEnumMap(e) => {
            let ty = normalizer.normalize(e);
            let insert =
                format!("{var}.insert(key, {ty}::from_wire({identity:?}, &entry.into_string()?)?);");
            (format!("HashMap<String, {ty}>"), collect_map(&var, &insert))
        }
        ResultShape::Unsupported => {
            return Err(SkipReason::UnsupportedResult {
                ty: message.result_type().to_string(),
            });
        }
    };

    Ok(ResultBinding {
        var,
        return_type,
        decode,
    })
}

/// Name of the variable holding the decoded result.
///
/// Accessors (`get_name_label`) bind to the accessed field (`name_label`);
/// everything else binds to `response`.
pub fn result_var(message: &Message, normalizer: &Normalizer) -> String {
    if !message.name.contains("get_") {
        return DEFAULT_VAR.to_string();
    }

    let var = normalizer.variable_name(&message.name.replace("get_", ""));
    if DECODE_LOCALS.contains(&var.as_str()) {
        format!("{var}_result")
    } else {
        var
    }
}

fn convert(var: &str, method: &str) -> Vec<String> {
    vec![format!("let {var} = {RAW_VALUE}.{method}()?;")]
}

fn collect_vec(var: &str, push: &str) -> Vec<String> {
    vec![
        format!("let mut {var} = Vec::new();"),
        format!("for entry in {RAW_VALUE}.into_array()? {{\n    {push}\n}}"),
    ]
}

fn collect_map(var: &str, insert: &str) -> Vec<String> {
    vec![
        format!("let mut {var} = HashMap::new();"),
        format!("for (key, entry) in {RAW_VALUE}.into_struct()? {{\n    {insert}\n}}"),
    ]
}
