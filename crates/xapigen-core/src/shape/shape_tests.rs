#![allow(non_snake_case)]

use super::*;
use proptest::prelude::*;
use test_case::test_case;

fn boxed(expr: TypeExpr) -> Box<TypeExpr> {
    Box::new(expr)
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn TypeExpr___parse_scalars___recognizes_keywords() {
    assert_eq!(TypeExpr::parse("bool"), TypeExpr::Scalar(Scalar::Bool));
    assert_eq!(TypeExpr::parse("string"), TypeExpr::Scalar(Scalar::String));
    assert_eq!(TypeExpr::parse("int"), TypeExpr::Scalar(Scalar::Int));
    assert_eq!(TypeExpr::parse("float"), TypeExpr::Scalar(Scalar::Float));
    assert_eq!(TypeExpr::parse("datetime"), TypeExpr::Scalar(Scalar::DateTime));
    assert_eq!(TypeExpr::parse("void"), TypeExpr::Void);
}

#[test]
fn TypeExpr___parse_ref_set___nests_set_around_ref() {
    assert_eq!(
        TypeExpr::parse("VM ref set"),
        TypeExpr::Set(boxed(TypeExpr::Ref("VM".into())))
    );
}

#[test]
fn TypeExpr___parse_map___reads_key_and_value() {
    assert_eq!(
        TypeExpr::parse("(host ref -> string set) map"),
        TypeExpr::Map(
            boxed(TypeExpr::Ref("host".into())),
            boxed(TypeExpr::Set(boxed(TypeExpr::Scalar(Scalar::String))))
        )
    );
}

#[test]
fn TypeExpr___parse_enum_and_record___keeps_names() {
    assert_eq!(
        TypeExpr::parse("enum vm_power_state"),
        TypeExpr::Enum("vm_power_state".into())
    );
    assert_eq!(
        TypeExpr::parse("VM_metrics record"),
        TypeExpr::Record("VM_metrics".into())
    );
}

#[test]
fn TypeExpr___parse_tolerates_spacing_around_arrow() {
    assert_eq!(
        TypeExpr::parse("(string->string) map"),
        TypeExpr::parse("(string -> string) map")
    );
}

#[test_case("" ; "empty")]
#[test_case("VM" ; "bare name")]
#[test_case("VM ref extra" ; "trailing tokens")]
#[test_case("(string -> string)" ; "map keyword missing")]
#[test_case("(string string) map" ; "arrow missing")]
#[test_case("enum" ; "enum without name")]
#[test_case("set" ; "bare set")]
fn TypeExpr___parse_malformed___is_unsupported(input: &str) {
    assert_eq!(TypeExpr::parse(input), TypeExpr::Unsupported(input.to_string()));
    assert!(!TypeExpr::parse(input).is_supported());
}

#[test_case("VM ref set")]
#[test_case("(string -> enum task_status_type) map")]
#[test_case("(VM ref -> VM_guest_metrics record) map")]
#[test_case("enum vm_operations set")]
fn TypeExpr___display___reproduces_canonical_text(input: &str) {
    assert_eq!(TypeExpr::parse(input).to_string(), input);
}

// ============================================================================
// Parameter shapes
// ============================================================================

#[test_case("bool", ParamShape::Bool)]
#[test_case("string", ParamShape::String)]
#[test_case("string set", ParamShape::StringSet)]
#[test_case("int", ParamShape::Int)]
#[test_case("(string -> string) map", ParamShape::StringMap)]
#[test_case("VM ref set", ParamShape::RefSet("VM".into()))]
#[test_case("(VM ref -> string) map", ParamShape::StringMap)]
#[test_case("(host ref -> VM ref) map", ParamShape::StringMap)]
#[test_case("SR ref", ParamShape::Ref("SR".into()))]
#[test_case("enum on_boot", ParamShape::Enum("on_boot".into()))]
#[test_case("enum vm_operations set", ParamShape::EnumSet("vm_operations".into()))]
#[test_case("int set", ParamShape::ScalarSet(Scalar::Int))]
#[test_case("float set", ParamShape::ScalarSet(Scalar::Float))]
#[test_case("bool set", ParamShape::ScalarSet(Scalar::Bool))]
fn ParamShape___of___classifies_grammar(expr: &str, expected: ParamShape) {
    assert_eq!(ParamShape::of(expr), expected);
}

#[test_case("float")]
#[test_case("datetime")]
#[test_case("void")]
#[test_case("VM record")]
#[test_case("(string -> int) map")]
#[test_case("(string -> VM ref) map")]
#[test_case("VM ref set set")]
#[test_case("datetime set")]
#[test_case("VM record set")]
#[test_case("(host ref -> string set) map")]
#[test_case("(VM ref -> host ref set) map")]
#[test_case("(VM ref -> (string -> string) map) map")]
#[test_case("garbage in")]
fn ParamShape___of_outside_bindable_set___is_unsupported(expr: &str) {
    assert_eq!(ParamShape::of(expr), ParamShape::Unsupported);
}

#[test]
fn ParamShape___ref_set___is_not_a_scalar_set() {
    assert_eq!(ParamShape::of("VM ref set"), ParamShape::RefSet("VM".into()));
    assert_eq!(ParamShape::of("string set"), ParamShape::StringSet);
}

// ============================================================================
// Result shapes
// ============================================================================

#[test_case("string", ResultShape::String)]
#[test_case("float", ResultShape::Float)]
#[test_case("int", ResultShape::Int)]
#[test_case("VM record", ResultShape::Record)]
#[test_case("(host ref -> string set) map", ResultShape::RefToStringSetMap("host".into()))]
#[test_case("(string -> string) map", ResultShape::StringMap)]
#[test_case("(VM ref -> string) map", ResultShape::StringMap)]
#[test_case("(string -> SR ref) map", ResultShape::StringToRefMap("SR".into()))]
#[test_case("void", ResultShape::Void)]
#[test_case("VM ref set", ResultShape::RefSet("VM".into()))]
#[test_case("(VM ref -> VM record) map", ResultShape::RefToRecordMap("VM".into()))]
#[test_case("host ref", ResultShape::Ref("host".into()))]
#[test_case("string set", ResultShape::StringSet)]
#[test_case("(string -> enum task_status_type) map", ResultShape::StringToEnumMap("task_status_type".into()))]
#[test_case("enum vm_power_state", ResultShape::Enum("vm_power_state".into()))]
#[test_case("enum vm_operations set", ResultShape::EnumSet("vm_operations".into()))]
fn ResultShape___of___classifies_grammar(expr: &str, expected: ResultShape) {
    assert_eq!(ResultShape::of(expr, "VM"), expected);
}

#[test_case("bool")]
#[test_case("datetime")]
#[test_case("host record")]
#[test_case("int set")]
#[test_case("(string -> string set) map")]
#[test_case("(VM ref -> host ref set) map")]
#[test_case("(VM ref -> enum vm_power_state) map")]
#[test_case("(VM ref -> (string -> string) map) map")]
#[test_case("not a type")]
fn ResultShape___of_outside_bindable_set___is_unsupported(expr: &str) {
    assert_eq!(ResultShape::of(expr, "VM"), ResultShape::Unsupported);
}

#[test]
fn ResultShape___record___requires_owner_type() {
    assert_eq!(ResultShape::of("VM record", "VM"), ResultShape::Record);
    assert_eq!(ResultShape::of("VM record", "host"), ResultShape::Unsupported);
}

#[test]
fn ResultShape___ref_keyed_string_set_map___wins_over_plain_map() {
    assert_eq!(
        ResultShape::of("(VM ref -> string set) map", "VM"),
        ResultShape::RefToStringSetMap("VM".into())
    );
}

// ============================================================================
// Purity
// ============================================================================

const KEYWORDS: [&str; 7] = ["bool", "string", "int", "float", "datetime", "void", "enum"];

fn arb_name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,12}".prop_filter("grammar keyword", |n| !KEYWORDS.contains(&n.as_str()))
}

fn arb_type_expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("bool".to_string()),
        Just("string".to_string()),
        Just("int".to_string()),
        Just("float".to_string()),
        Just("void".to_string()),
        arb_name().prop_map(|n| format!("{n} ref")),
        arb_name().prop_map(|n| format!("enum {n}")),
        arb_name().prop_map(|n| format!("{n} record")),
        ".{0,20}",
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| format!("{e} set")),
            (inner.clone(), inner).prop_map(|(k, v)| format!("({k} -> {v}) map")),
        ]
    })
}

proptest! {
    /// Property: classification is a pure function of (expression, owner)
    #[test]
    fn proptest_classify_is_pure(expr in arb_type_expr(), owner in "[a-zA-Z_]{1,10}") {
        let first_param = ParamShape::of(&expr);
        let first_result = ResultShape::of(&expr, &owner);

        // Unrelated classifications in between must not matter
        let _ = ResultShape::of("VM ref set", "VM");
        let _ = ParamShape::of("(string -> string) map");

        prop_assert_eq!(ParamShape::of(&expr), first_param);
        prop_assert_eq!(ResultShape::of(&expr, &owner), first_result);
    }

    /// Property: reference sets always classify as reference sequences
    #[test]
    fn proptest_ref_set_is_reference_sequence(name in arb_name()) {
        let expr = format!("{name} ref set");

        prop_assert_eq!(ParamShape::of(&expr), ParamShape::RefSet(name.clone()));
        prop_assert_eq!(ResultShape::of(&expr, "VM"), ResultShape::RefSet(name));
    }
}
