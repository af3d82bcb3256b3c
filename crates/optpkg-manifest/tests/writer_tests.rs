//! Integration tests for writing manifest text.

use optpkg_manifest::writer::{EOL, MAX_SECTION_LENGTH};
use optpkg_manifest::{Attribute, Error, Manifest, Section};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn manifest_with(name: &str, value: &str) -> Manifest {
    let mut manifest = Manifest::new();
    manifest.main_section_mut().insert(name, value);
    manifest
}

#[test]
fn test_full_manifest_output() {
    let mut manifest = Manifest::with_created_by("optpkg");
    manifest
        .main_section_mut()
        .insert("Extension-Name", "org.example.widgets");
    let mut section = Section::named("org/example/widgets/");
    section.insert("Specification-Title", "Widgets");
    manifest.add_section(section).unwrap();

    let expected = "Manifest-Version: 1.0\r\n\
Created-By: optpkg\r\n\
Extension-Name: org.example.widgets\r\n\
\r\n\
Name: org/example/widgets/\r\n\
Specification-Title: Widgets\r\n\
\r\n";
    assert_eq!(manifest.to_text().unwrap(), expected);
}

#[test]
fn test_signature_version_written_after_manifest_version() {
    let mut manifest = Manifest::new();
    manifest.main_section_mut().insert("Foo", "bar");
    manifest.main_section_mut().insert("Signature-Version", "1.0");

    let text = manifest.to_text().unwrap();
    let lines: Vec<&str> = text.split(EOL).collect();
    assert_eq!(
        &lines[..3],
        ["Manifest-Version: 1.0", "Signature-Version: 1.0", "Foo: bar"]
    );
    assert_eq!(text.matches("Signature-Version").count(), 1);
    assert!(manifest.main_section().contains("Signature-Version"));
}

#[test]
fn test_long_line_wrapped_to_two_lines() {
    let value = "v".repeat(85 - "Long: ".len());
    let text = manifest_with("Long", &value).to_text().unwrap();

    let lines: Vec<&str> = text.split(EOL).collect();
    assert_eq!(lines[1].len(), MAX_SECTION_LENGTH);
    assert_eq!(lines[2], format!(" {}", "v".repeat(15)));
    assert_eq!(lines[3], "");
}

#[test]
fn test_name_of_sixty_eight_bytes_shares_line_with_value() {
    let name = "N".repeat(68);
    let text = manifest_with(&name, "v").to_text().unwrap();
    let lines: Vec<&str> = text.split(EOL).collect();
    assert_eq!(lines[1], format!("{name}: "));
    assert_eq!(lines[2], " v");
}

#[test]
fn test_name_of_sixty_nine_bytes_written_alone() {
    let name = "N".repeat(69);
    let text = manifest_with(&name, "value").to_text().unwrap();
    let lines: Vec<&str> = text.split(EOL).collect();
    assert_eq!(lines[1], format!("{name}: "));
    assert_eq!(lines[2], " value");

    let reparsed: Manifest = text.parse().unwrap();
    assert_eq!(reparsed.main_section().value(&name).as_deref(), Some("value"));
}

#[test]
fn test_name_of_seventy_bytes_still_writable() {
    let name = "N".repeat(70);
    assert!(manifest_with(&name, "v").to_text().is_ok());
}

#[test]
fn test_name_over_seventy_bytes_rejected() {
    let name = "N".repeat(71);
    let err = manifest_with(&name, "v").to_text().unwrap_err();
    assert!(matches!(err, Error::LineOverflow { .. }));
    assert!(!err.is_format_error());
}

#[test]
fn test_multibyte_character_not_split() {
    let value = format!("{}é{}", "a".repeat(64), "b".repeat(10));
    let text = manifest_with("Foo", &value).to_text().unwrap();

    let lines: Vec<&str> = text.split(EOL).collect();
    assert_eq!(lines[1].len(), 69);
    assert!(lines[2].starts_with(" é"));

    let reparsed: Manifest = text.parse().unwrap();
    assert_eq!(reparsed.main_section().value("Foo"), Some(value));
}

#[test]
fn test_multi_valued_attribute_written_per_value() {
    let mut manifest = Manifest::new();
    let mut class_path = Attribute::new("Class-Path", "a.jar");
    class_path.add_value("b.jar");
    manifest.main_section_mut().set_attribute(class_path);

    let text = manifest.to_text().unwrap();
    assert_eq!(text.matches("Class-Path: ").count(), 2);

    let mut flat = Vec::new();
    manifest.write_to(&mut flat, true).unwrap();
    let flat = String::from_utf8(flat).unwrap();
    assert!(flat.contains("Class-Path: a.jar b.jar\r\n"));
}

#[test]
fn test_stored_pseudo_attributes_not_written() {
    let mut manifest = Manifest::new();
    manifest.main_section_mut().insert("Manifest-Version", "9.9");
    manifest.main_section_mut().insert("Name", "sneaky/");
    let mut section = Section::named("pkg/");
    section.insert("Name", "other/");
    section.insert("Foo", "bar");
    manifest.add_section(section).unwrap();

    let text = manifest.to_text().unwrap();
    assert_eq!(
        text,
        "Manifest-Version: 1.0\r\n\
\r\n\
Name: pkg/\r\n\
Foo: bar\r\n\
\r\n"
    );

    let reparsed: Manifest = text.parse().unwrap();
    assert_eq!(reparsed.section_names().collect::<Vec<_>>(), ["pkg/"]);
    assert_eq!(reparsed.section("pkg/").unwrap().value("Foo").as_deref(), Some("bar"));
}

#[test]
fn test_write_to_path_and_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("MANIFEST.MF");
    let mut manifest = Manifest::with_created_by("optpkg");
    manifest.add_section(Section::named("pkg/")).unwrap();

    manifest.write_to_path(&path, false).unwrap();
    assert_eq!(Manifest::from_path(&path).unwrap(), manifest);
}

fn attribute_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map("x-[a-z0-9]{1,20}", "\\PC{0,120}", 0..8)
        .prop_map(|map| map.into_iter().collect())
}

proptest! {
    #[test]
    fn written_lines_fit_and_read_back(attributes in attribute_strategy()) {
        let mut manifest = Manifest::new();
        for (name, value) in &attributes {
            manifest.main_section_mut().insert(name.clone(), value.clone());
        }

        let text = manifest.to_text().unwrap();
        for line in text.split(EOL) {
            prop_assert!(line.len() <= MAX_SECTION_LENGTH);
        }

        let reparsed: Manifest = text.parse().unwrap();
        prop_assert_eq!(reparsed, manifest);
    }
}
