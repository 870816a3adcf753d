//! Parameter binding: typed signature entries and call-argument encoding.

use super::ir::{ParamBinding, SignatureParam, SkipReason};
use xapigen_core::{Message, Normalizer, ObjectType, ParamShape, Scalar};

/// Call argument carrying the receiver's own reference.
pub const RECEIVER_ARG: &str = "Value::String(self.reference.clone())";

/// Bind every parameter of `message`.
///
/// Implicit parameters (session, receiver) are left out of the signature; the
/// receiver's reference is always the first positional argument. Fails with
/// the first parameter whose type-expression has no binding shape.
pub fn bind_params(
    owner: &ObjectType,
    message: &Message,
    normalizer: &Normalizer,
) -> Result<ParamBinding, SkipReason> {
    let mut binding = ParamBinding {
        args: vec![RECEIVER_ARG.to_string()],
        ..ParamBinding::default()
    };

    for param in message.params.iter().filter(|p| !p.is_implicit(owner)) {
        let name = normalizer.variable_name(&param.name);
        let shape = ParamShape::of(&param.ty);

        let (ty, arg) = match &shape {
            ParamShape::Bool => ("bool".to_string(), format!("Value::Bool({name})")),
            ParamShape::String => ("&str".to_string(), format!("Value::String({name}.to_string())")),
            ParamShape::StringSet => (
                "&[String]".to_string(),
                format!("Value::Array({name}.iter().cloned().map(Value::String).collect())"),
            ),
            ParamShape::Int => ("u64".to_string(), format!("Value::String({name}.to_string())")),
            ParamShape::StringMap => {
                let encoded = format!("{name}_struct");
                binding.encode.push(format!(
                    "let {encoded} = Value::Struct(\n    {name}.iter()\n        .map(|(k, v)| (k.clone(), Value::String(v.clone())))\n        .collect(),\n);"
                ));
                ("&HashMap<String, String>".to_string(), encoded)
            }
            ParamShape::RefSet(target) => (
                format!("&[{}]", normalizer.normalize(target)),
                format!(
                    "Value::Array({name}.iter().map(|r| Value::String(r.reference.clone())).collect())"
                ),
            ),
            ParamShape::Ref(target) => (
                format!("&{}", normalizer.normalize(target)),
                format!("Value::String({name}.reference.clone())"),
            ),
            ParamShape::Enum(e) => (
                normalizer.normalize(e),
                format!("Value::String({name}.as_wire().to_string())"),
            ),
            ParamShape::EnumSet(e) => (
                format!("&[{}]", normalizer.normalize(e)),
                format!(
                    "Value::Array({name}.iter().map(|e| Value::String(e.as_wire().to_string())).collect())"
                ),
            ),
            ParamShape::ScalarSet(Scalar::Bool) => (
                "&[bool]".to_string(),
                format!("Value::Array({name}.iter().copied().map(Value::Bool).collect())"),
            ),
            ParamShape::ScalarSet(Scalar::Int) => (
                "&[u64]".to_string(),
                format!("Value::Array({name}.iter().map(|i| Value::String(i.to_string())).collect())"),
            ),
            ParamShape::ScalarSet(Scalar::Float) => (
                "&[f64]".to_string(),
                format!("Value::Array({name}.iter().copied().map(Value::Double).collect())"),
            ),
            ParamShape::ScalarSet(_) | ParamShape::Unsupported => {
                return Err(SkipReason::UnsupportedParam {
                    name: param.name.clone(),
                    ty: param.ty.clone(),
                });
            }
        };

        binding.signature.push(SignatureParam {
            name,
            ty,
            doc: param.doc.clone(),
        });
        binding.args.push(arg);
    }

    Ok(binding)
}

#[cfg(test)]
#[path = "params/params_tests.rs"]
mod params_tests;
