//! Integration tests: full validation passes over the fixture documents and
//! variations of them, loaded through every kind of document source.

use std::path::PathBuf;
use std::sync::Arc;

use proptest::prelude::*;
use protoval_core::{ContainersCatalog, DocumentSource, Protocol};
use protoval_engine::{validate_protocol, ProtocolValidator};
use serde_json::{json, Value};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(name: &str) -> Value {
    DocumentSource::Path(fixture(name))
        .load()
        .unwrap_or_else(|e| panic!("fixture {name}: {e}"))
}

fn catalog() -> ContainersCatalog {
    ContainersCatalog::from_value(load("containers.json"))
}

fn minimal_protocol() -> Value {
    let full = load("protocol.json");
    json!({ "head": full["head"], "deck": full["deck"] })
}

// ── Fixtures ─────────────────────────────────────────────────────────

#[test]
fn test_fixture_protocol_is_clean() {
    let validator = ProtocolValidator::try_from_sources(
        DocumentSource::Path(fixture("protocol.json")),
        DocumentSource::Path(fixture("containers.json")),
    )
    .unwrap();
    let report = validator.validate();
    assert!(report.is_clean(), "{:#?}", report);
    assert_eq!(report.salient.container_count, 4);
    assert_eq!(report.salient.tool_count, 1);
    assert_eq!(report.salient.instruction_count, 2);
    assert_eq!(report.info["name"], "plate setup");
}

#[test]
fn test_minimal_protocol_warns_for_three_optional_sections() {
    let report = validate_protocol(&Protocol::from_value(minimal_protocol()), &catalog());
    assert!(report.errors.is_empty(), "{:?}", report.error_messages());
    assert_eq!(report.warnings.len(), 3);
    for section in ["ingredients", "instructions", "info"] {
        assert!(report
            .warning_messages()
            .iter()
            .any(|m| m.contains(&format!("\"{section}\""))));
    }
    assert_eq!(report.salient.instruction_count, 0);
}

#[test]
fn test_yaml_protocol_matches_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("protocol.yaml");
    let yaml = serde_yaml::to_string(&load("protocol.json")).unwrap();
    std::fs::write(&path, yaml).unwrap();

    let from_yaml = ProtocolValidator::from_sources(
        DocumentSource::Path(path),
        DocumentSource::Path(fixture("containers.json")),
    )
    .validate();
    let from_json = validate_protocol(&Protocol::from_value(load("protocol.json")), &catalog());
    assert_eq!(from_yaml, from_json);
}

// ── Fatal main sections ──────────────────────────────────────────────

#[test]
fn test_missing_deck_skips_everything_else() {
    let mut protocol = load("protocol.json");
    protocol.as_object_mut().unwrap().remove("deck");
    protocol["head"]["p200"]["axis"] = json!("z");

    let report = validate_protocol(&Protocol::from_value(protocol), &catalog());
    assert_eq!(
        report.error_messages(),
        vec!["protocol must define a \"deck\" section"]
    );
    assert!(report.warnings.is_empty());
    assert_eq!(report.salient.container_count, 0);
}

// ── Instruction tree ─────────────────────────────────────────────────

#[test]
fn test_faults_carry_full_coordinates() {
    let mut protocol = load("protocol.json");
    protocol["instructions"][0]["groups"][1]["distribute"]["to"][1]["location"] = json!("H12");
    protocol["instructions"][0]["groups"][0]["transfer"][1]["volume"] = json!(-1);

    let report = validate_protocol(&Protocol::from_value(protocol), &catalog());
    let errors = report.error_messages();
    assert_eq!(errors.len(), 2, "{errors:?}");
    assert!(errors[0].starts_with("instruction #1, group #1, transfer command #2:"));
    assert!(errors[0].contains("\"volume\" must not be negative"));
    assert!(errors[1].starts_with("instruction #1, group #2, distribute command, 'to' direction #2:"));
    assert!(errors[1].contains("\"H12\""));
}

#[test]
fn test_two_tag_group_yields_single_structural_error() {
    let mut protocol = load("protocol.json");
    protocol["instructions"][1]["groups"][0]["transfer"] = json!([{ "from": 1 }]);

    let report = validate_protocol(&Protocol::from_value(protocol), &catalog());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.structural_errors().count(), 1);
    assert!(report.errors[0].message.starts_with("instruction #2, group #1:"));
}

#[test]
fn test_semantic_and_structural_are_separated() {
    let mut protocol = load("protocol.json");
    protocol["instructions"][0]["tool"] = json!("p1000");
    protocol["instructions"][1]["groups"] = json!("mix");

    let report = validate_protocol(&Protocol::from_value(protocol), &catalog());
    assert_eq!(report.semantic_errors().count(), 1);
    assert_eq!(report.structural_errors().count(), 1);
}

// ── Sources ──────────────────────────────────────────────────────────

#[test]
fn test_unreadable_containers_reported_not_raised() {
    let validator = ProtocolValidator::from_sources(
        DocumentSource::Path(fixture("protocol.json")),
        DocumentSource::Path(fixture("no-such-catalog.json")),
    );
    let report = validator.validate();
    assert!(!report.is_valid());
    assert!(report.errors[0]
        .message
        .starts_with("containers document could not be loaded:"));
    assert!(report
        .error_messages()
        .iter()
        .any(|m| m.contains("was not found in the containers catalog")));
}

#[test]
fn test_text_sources() {
    let protocol = serde_json::to_string(&minimal_protocol()).unwrap();
    let containers = std::fs::read_to_string(fixture("containers.json")).unwrap();
    let report = ProtocolValidator::from_sources(
        DocumentSource::Text(protocol),
        DocumentSource::Text(containers),
    )
    .validate();
    assert!(report.is_valid());
    assert_eq!(report.warnings.len(), 3);
}

#[test]
fn test_shared_catalog_across_validators() {
    let shared = Arc::new(catalog());
    let good = ProtocolValidator::with_catalog(
        DocumentSource::Inline(load("protocol.json")),
        Arc::clone(&shared),
    )
    .unwrap();
    let mut broken = load("protocol.json");
    broken["deck"]["plate"]["labware"] = json!("384-deep");
    let bad =
        ProtocolValidator::with_catalog(DocumentSource::Inline(broken), Arc::clone(&shared)).unwrap();

    let handles: Vec<_> = [good, bad]
        .into_iter()
        .map(|validator| std::thread::spawn(move || validator.validate()))
        .collect();
    let reports: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(reports[0].is_clean());
    assert!(!reports[1].is_valid());
    assert_eq!(Arc::strong_count(&shared), 1);
}

// ── Wire format ──────────────────────────────────────────────────────

#[test]
fn test_report_wire_shape() {
    let report = validate_protocol(&Protocol::from_value(minimal_protocol()), &catalog());
    let wire: Value = serde_json::from_str(&report.to_json(false).unwrap()).unwrap();
    assert_eq!(wire["info"], json!({}));
    assert_eq!(
        wire["salient"],
        json!({ "containerCount": 4, "toolCount": 1, "instructionCount": 0 })
    );
    assert_eq!(wire["errors"], json!([]));
    assert!(wire["warnings"].as_array().unwrap().iter().all(Value::is_string));
}

// ── Properties ───────────────────────────────────────────────────────

fn with_first_volume(volume: f64) -> Protocol {
    let mut protocol = load("protocol.json");
    protocol["instructions"][0]["groups"][0]["transfer"][0]["volume"] = json!(volume);
    Protocol::from_value(protocol)
}

proptest! {
    #[test]
    fn prop_transfer_volume_policy(volume in -10_000.0f64..10_000.0) {
        let report = validate_protocol(&with_first_volume(volume), &catalog());
        let expected_errors = usize::from(volume < 0.0);
        let expected_warnings = usize::from(volume > 5000.0);
        prop_assert_eq!(report.errors.len(), expected_errors);
        prop_assert_eq!(report.warnings.len(), expected_warnings);
    }

    #[test]
    fn prop_validation_is_idempotent(volume in -10_000.0f64..10_000.0, location in "[A-J][0-9]{1,2}") {
        let mut document = load("protocol.json");
        document["instructions"][0]["groups"][3]["mix"][0]["location"] = json!(location);
        document["instructions"][0]["groups"][0]["transfer"][1]["volume"] = json!(volume);
        let validator = ProtocolValidator::new(Protocol::from_value(document), Arc::new(catalog()));
        prop_assert_eq!(validator.validate(), validator.validate());
    }
}
