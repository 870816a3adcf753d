#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn Config___default___matches_conventional_layout() {
    let config = Config::default();

    assert_eq!(config.generator.description, PathBuf::from("xenapi.json"));
    assert_eq!(config.generator.output, PathBuf::from("generated"));
    assert_eq!(config.passthrough_path(), PathBuf::from("extras/client.rs"));
    assert!(!config.generator.strict);
    assert_eq!(config.generator.log_level, "info");
}

#[test]
fn Config___empty_toml___uses_defaults() {
    let config = Config::from_toml("").unwrap();

    assert_eq!(config.generator.output, PathBuf::from("generated"));
    assert!(config.naming.reserved.is_empty());
}

#[test]
fn Config___full_toml___parses_all_sections() {
    let toml = r#"
        [generator]
        description = "api/xenapi.json"
        output = "src/bindings"
        extras = "hand"
        passthrough = "transport.rs"
        strict = true
        log_level = "debug"

        [naming.reserved]
        Type = "XenType"
    "#;

    let config = Config::from_toml(toml).unwrap();

    assert_eq!(config.generator.description, PathBuf::from("api/xenapi.json"));
    assert_eq!(config.passthrough_path(), PathBuf::from("hand/transport.rs"));
    assert!(config.generator.strict);
    assert_eq!(config.normalizer().normalize("type"), "XenType");
}

#[test_case(r#"[generator]
output = """# ; "empty output")]
#[test_case(r#"[generator]
passthrough = """# ; "empty passthrough")]
#[test_case(r#"[naming.reserved]
Type = "not valid""# ; "replacement with space")]
fn Config___invalid_values___rejected(toml: &str) {
    let result = Config::from_toml(toml);

    assert!(matches!(result, Err(GenError::Config(_))));
}

#[test]
fn Config___malformed_toml___returns_config_error() {
    let result = Config::from_toml("[generator");

    assert!(matches!(result, Err(GenError::Config(_))));
}

#[test]
fn Config___from_file_missing___returns_config_error() {
    let result = Config::from_file("/nonexistent/xapigen.toml");

    assert!(matches!(result, Err(GenError::Config(_))));
}

#[test]
fn Config___repository_example___loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../xapigen.toml");

    let config = Config::from_file(path).unwrap();

    assert_eq!(config.generator.description, PathBuf::from("demos/xenapi.json"));
    assert_eq!(config.passthrough_path(), PathBuf::from("extras/client.rs"));
}
