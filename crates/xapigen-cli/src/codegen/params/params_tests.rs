#![allow(non_snake_case)]

use super::*;
use test_case::test_case;
use xapigen_core::Param;

fn vm() -> ObjectType {
    ObjectType {
        name: "VM".into(),
        description: String::new(),
        messages: vec![],
        enums: vec![],
    }
}

fn message(params: &[(&str, &str)]) -> Message {
    Message {
        name: "do_something".into(),
        description: String::new(),
        result: vec!["void".into()],
        params: params
            .iter()
            .map(|(ty, name)| Param {
                ty: ty.to_string(),
                name: name.to_string(),
                doc: String::new(),
            })
            .collect(),
    }
}

fn bind(params: &[(&str, &str)]) -> ParamBinding {
    bind_params(&vm(), &message(params), &Normalizer::new()).unwrap()
}

#[test]
fn bind_params___receiver_only___has_empty_signature() {
    let binding = bind(&[("session ref", "session_id"), ("VM ref", "self")]);

    assert!(binding.signature.is_empty());
    assert_eq!(binding.args, [RECEIVER_ARG]);
    assert!(binding.encode.is_empty());
}

#[test_case("session ref", "session_id" ; "session id")]
#[test_case("host ref", "self" ; "self name")]
#[test_case("VM record", "VM" ; "owner name")]
#[test_case("VM ref", "vm" ; "owner ref type")]
fn bind_params___implicit_param___never_in_signature_or_args(ty: &str, name: &str) {
    let binding = bind(&[(ty, name), ("string", "label")]);

    assert_eq!(binding.signature.len(), 1);
    assert_eq!(binding.signature[0].name, "label");
    assert_eq!(binding.args.len(), 2);
    assert_eq!(binding.args[0], RECEIVER_ARG);
}

#[test_case("bool", "bool", "Value::Bool(x)")]
#[test_case("string", "&str", "Value::String(x.to_string())")]
#[test_case("int", "u64", "Value::String(x.to_string())")]
#[test_case("string set", "&[String]", "Value::Array(x.iter().cloned().map(Value::String).collect())")]
#[test_case("host ref", "&Host", "Value::String(x.reference.clone())")]
#[test_case("enum on_boot", "OnBoot", "Value::String(x.as_wire().to_string())")]
fn bind_params___scalar_and_ref_shapes___typed_and_encoded(ty: &str, rust_ty: &str, arg: &str) {
    let binding = bind(&[(ty, "x")]);

    assert_eq!(binding.signature[0].ty, rust_ty);
    assert_eq!(binding.args[1], arg);
}

#[test]
fn bind_params___ref_set___declared_as_slice_of_object_type() {
    let binding = bind(&[("VM ref set", "vms")]);

    assert_eq!(binding.signature[0].name, "vms");
    assert_eq!(binding.signature[0].ty, "&[VM]");
    assert!(binding.args[1].contains("r.reference.clone()"));
}

#[test]
fn bind_params___string_map___pre_encodes_before_call() {
    let binding = bind(&[("(string -> string) map", "other_config")]);

    assert_eq!(binding.signature[0].ty, "&HashMap<String, String>");
    assert_eq!(binding.encode.len(), 1);
    assert!(binding.encode[0].starts_with("let other_config_struct = Value::Struct("));
    assert_eq!(binding.args[1], "other_config_struct");
}

#[test]
fn bind_params___ref_keyed_map___degrades_to_string_map() {
    let binding = bind(&[("(VM ref -> string) map", "options")]);

    assert_eq!(binding.signature[0].ty, "&HashMap<String, String>");
    assert_eq!(binding.args[1], "options_struct");
}

#[test]
fn bind_params___enum_set___declared_as_slice_of_enum() {
    let binding = bind(&[("enum vm_operations set", "ops")]);

    assert_eq!(binding.signature[0].ty, "&[VmOperations]");
    assert!(binding.args[1].contains("e.as_wire()"));
}

#[test_case("int set", "&[u64]", "Value::Array(x.iter().map(|i| Value::String(i.to_string())).collect())")]
#[test_case("float set", "&[f64]", "Value::Array(x.iter().copied().map(Value::Double).collect())")]
#[test_case("bool set", "&[bool]", "Value::Array(x.iter().copied().map(Value::Bool).collect())")]
fn bind_params___scalar_set___declared_as_slice_of_concrete_type(ty: &str, rust_ty: &str, arg: &str) {
    let binding = bind(&[(ty, "x")]);

    assert_eq!(binding.signature[0].ty, rust_ty);
    assert_eq!(binding.args[1], arg);
    assert!(binding.encode.is_empty());
}

#[test_case("datetime set")]
#[test_case("VM record set")]
#[test_case("(VM ref -> host ref set) map")]
fn bind_params___set_without_element_binding___skips_message(ty: &str) {
    let result = bind_params(&vm(), &message(&[(ty, "x")]), &Normalizer::new());

    assert_eq!(
        result,
        Err(SkipReason::UnsupportedParam {
            name: "x".into(),
            ty: ty.into(),
        })
    );
}

#[test]
fn bind_params___keeps_schema_order() {
    let binding = bind(&[
        ("string", "b_first"),
        ("VM ref", "self"),
        ("int", "a_second"),
        ("bool", "c_third"),
    ]);

    let names: Vec<_> = binding.signature.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["b_first", "a_second", "c_third"]);
    assert_eq!(binding.args.len(), 4);
}

#[test]
fn bind_params___keyword_name___is_escaped() {
    let binding = bind(&[("string", "type")]);

    assert_eq!(binding.signature[0].name, "type_");
    assert_eq!(binding.args[1], "Value::String(type_.to_string())");
}

#[test]
fn bind_params___unsupported_param___reports_name_and_type() {
    let result = bind_params(
        &vm(),
        &message(&[("string", "ok"), ("float", "ratio")]),
        &Normalizer::new(),
    );

    assert_eq!(
        result,
        Err(SkipReason::UnsupportedParam {
            name: "ratio".into(),
            ty: "float".into(),
        })
    );
}
