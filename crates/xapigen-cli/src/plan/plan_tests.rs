#![allow(non_snake_case)]

use super::*;
use tempfile::TempDir;

fn leftovers(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(".xapigen-"))
        .collect()
}

#[test]
fn apply___fresh_location___writes_all_entries() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("client.rs");
    fs::write(&source, "// client").unwrap();
    let root = temp.path().join("out");

    let mut plan = BuildPlan::new(&root);
    plan.add_file("vm.rs", "// vm".to_string());
    plan.add_file("mod.rs", "pub mod vm;".to_string());
    plan.add_link("client.rs", &source);
    plan.apply().unwrap();

    assert_eq!(fs::read_to_string(root.join("vm.rs")).unwrap(), "// vm");
    assert_eq!(fs::read_to_string(root.join("mod.rs")).unwrap(), "pub mod vm;");
    assert_eq!(fs::read_to_string(root.join("client.rs")).unwrap(), "// client");
    assert!(leftovers(temp.path()).is_empty());
}

#[test]
fn apply___existing_location___replaced_exactly() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("out");
    fs::create_dir_all(root.join("nested")).unwrap();
    fs::write(root.join("stale.rs"), "// stale").unwrap();
    fs::write(root.join("nested/deep.rs"), "// deep").unwrap();

    let mut plan = BuildPlan::new(&root);
    plan.add_file("vm.rs", "// vm".to_string());
    plan.apply().unwrap();

    let names: Vec<_> = fs::read_dir(&root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["vm.rs"]);
    assert!(leftovers(temp.path()).is_empty());
}

#[test]
fn apply___existing_file_at_location___replaced_by_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("out");
    fs::write(&root, "not a directory").unwrap();

    let mut plan = BuildPlan::new(&root);
    plan.add_file("vm.rs", "// vm".to_string());
    plan.apply().unwrap();

    assert!(root.is_dir());
    assert!(root.join("vm.rs").is_file());
}

#[test]
fn apply___missing_link_source___fails_and_keeps_previous_output() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("out");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("old.rs"), "// old").unwrap();

    let mut plan = BuildPlan::new(&root);
    plan.add_file("vm.rs", "// vm".to_string());
    plan.add_link("client.rs", temp.path().join("does-not-exist.rs"));
    let err = plan.apply().unwrap_err();

    assert!(matches!(err, GenError::Io { .. }));
    assert_eq!(fs::read_to_string(root.join("old.rs")).unwrap(), "// old");
    assert!(!root.join("vm.rs").exists());
    assert!(leftovers(temp.path()).is_empty());
}

#[test]
fn apply___nested_relative_paths___creates_directories() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("out");

    let mut plan = BuildPlan::new(&root);
    plan.add_file("sub/inner.rs", "// inner".to_string());
    plan.apply().unwrap();

    assert!(root.join("sub/inner.rs").is_file());
}

#[test]
fn add_file___same_path_twice___returns_replaced_entry() {
    let mut plan = BuildPlan::new("out");

    assert!(plan.add_file("vm.rs", "first".to_string()).is_none());
    let previous = plan.add_file("vm.rs", "second".to_string());

    assert_eq!(previous, Some(PlanEntry::Content("first".to_string())));
    assert_eq!(plan.len(), 1);
    assert_eq!(plan.get("vm.rs"), Some(&PlanEntry::Content("second".to_string())));
}

#[test]
fn display___lists_entries_in_path_order() {
    let mut plan = BuildPlan::new("out");
    plan.add_file("vm.rs", "12345".to_string());
    plan.add_link("client.rs", "extras/client.rs");

    let listing = plan.to_string();

    assert_eq!(
        listing,
        "out (2 files)\n  client.rs -> extras/client.rs\n  vm.rs (5 bytes)\n"
    );
}
