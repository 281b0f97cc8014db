//! Validation of the shipped WGSL shaders.
//!
//! Parses and validates both shader files with naga, so a malformed shader
//! fails in CI instead of at pipeline creation.

use naga::valid::{Capabilities, ValidationFlags, Validator};

fn validate(source: &str, name: &str) {
    let module = naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|e| panic!("{} failed to parse:\n{}", name, e));

    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .unwrap_or_else(|e| panic!("{} failed validation:\n{:?}", name, e));
}

#[test]
fn test_burst_shader_is_valid_wgsl() {
    validate(include_str!("../src/shaders/burst.wgsl"), "burst.wgsl");
}

#[test]
fn test_sky_shader_is_valid_wgsl() {
    validate(include_str!("../src/shaders/sky.wgsl"), "sky.wgsl");
}

#[test]
fn test_burst_shader_has_expected_entry_points() {
    let module = naga::front::wgsl::parse_str(include_str!("../src/shaders/burst.wgsl")).unwrap();
    let names: Vec<_> = module
        .entry_points
        .iter()
        .map(|ep| ep.name.as_str())
        .collect();
    assert!(names.contains(&"vs_main"));
    assert!(names.contains(&"fs_main"));
}

#[test]
fn test_sky_shader_has_expected_entry_points() {
    let module = naga::front::wgsl::parse_str(include_str!("../src/shaders/sky.wgsl")).unwrap();
    let names: Vec<_> = module
        .entry_points
        .iter()
        .map(|ep| ep.name.as_str())
        .collect();
    assert!(names.contains(&"vs_main"));
    assert!(names.contains(&"fs_main"));
}
