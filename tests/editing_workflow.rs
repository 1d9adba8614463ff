//! Editing session driven the way an authoring front end would.

use pretty_assertions::assert_eq;
use wb_config::config::load_config;
use wb_config::session::{check_file, CheckOutcome, EditSession, OpenError};
use wb_config::validation::ErrorKind;

mod common;

#[test]
fn test_author_document_from_scratch() {
    let mut session = EditSession::new();
    session.set_registration("HBJZB");
    session.root_mut().operational_use = true;

    let second = session.add_variation();
    assert_eq!(second, 2);
    session.variation_mut(1).unwrap().name = "Winter".to_string();
    session.set_default_variation(1);

    let validated = session
        .validate(&Default::default())
        .expect("baseline variations are valid");
    assert_eq!(validated.root().variations().len(), 2);

    let removed = session.remove_variation(0).unwrap();
    assert_eq!(removed.id, 1);
    let remaining = session.variation(0).unwrap();
    assert_eq!(remaining.id, 1);
    assert_eq!(remaining.name, "Winter");
    assert_eq!(remaining.is_default, Some(true));
}

#[test]
fn test_import_edit_export_cycle() {
    let original = common::populated_root();
    let text = wb_config::serialize(&original);

    let mut session = EditSession::new();
    let findings = session.import(&text).unwrap();
    assert!(findings.is_empty());
    assert_eq!(session.root(), &original);

    session.duplicate_variation(1);
    session.move_variation(2, 0);
    let ids: Vec<u32> = session.root().variations().iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let artifact = session.export(&Default::default());
    assert_eq!(artifact.file_name, "HBJZA.json");

    let mut reopened = EditSession::new();
    reopened.import(&artifact.contents).unwrap();
    assert_eq!(reopened.root(), session.root());
}

#[test]
fn test_bad_import_keeps_previous_draft() {
    let mut session = EditSession::from_root(common::populated_root());
    let before = session.root().clone();

    assert!(session.import("[1, 2").is_err());
    assert_eq!(session.root(), &before);

    let findings = session.import("[1, 2]").unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, ErrorKind::TypeMismatch);
    assert!(findings[0].path.is_root());
}

#[test]
fn test_configured_policy_applies_to_file_checks() {
    let mut root = common::populated_root();
    root.variations.as_mut().unwrap()[1].is_default = Some(true);
    let document = common::write_temp(&wb_config::serialize(&root));

    let lenient = load_config(common::write_temp("").path()).unwrap();
    match check_file(document.path(), &lenient.validation).outcome {
        CheckOutcome::Valid { advisories } => assert_eq!(advisories.len(), 1),
        other => panic!("expected valid, got {:?}", other),
    }

    let strict = load_config(
        common::write_temp("[validation]\nsingle_default = true\n").path(),
    )
    .unwrap();
    match check_file(document.path(), &strict.validation).outcome {
        CheckOutcome::Invalid { errors } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.iter().next().unwrap().path.to_string(), "variations");
        }
        other => panic!("expected invalid, got {:?}", other),
    }
}

#[test]
fn test_document_needing_repair_is_not_rewritten() {
    let mut value = serde_json::to_value(common::populated_root()).unwrap();
    value["variations"][0]["general"]["tripFuel"]["max"] = serde_json::json!("15000");
    let text = value.to_string();
    let document = common::write_temp(&text);

    match EditSession::open(document.path(), false) {
        Err(OpenError::NeedsRepair(findings)) => {
            assert_eq!(findings.len(), 1);
            let finding = findings.iter().next().unwrap();
            assert_eq!(finding.kind, ErrorKind::TypeMismatch);
            assert_eq!(finding.path.to_string(), "variations[0].general.tripFuel.max");
        }
        other => panic!("expected a refusal, got {:?}", other.map(|s| s.root().clone())),
    }
    assert_eq!(std::fs::read_to_string(document.path()).unwrap(), text);

    let forced = EditSession::open(document.path(), true).unwrap();
    assert_eq!(forced.root().variations()[0].general.trip_fuel.max, 0.0);
}
