//! Serialization, deserialization and legacy-shape migration.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use scenarist::prelude::*;
use serde_json::json;

#[test]
fn to_document_serializes_references_as_ids() {
    let registry = seeded_registry();
    let doc = full_scenario(&registry).to_document();

    assert_eq!(doc.get("tasks"), Some(&json!(["train", "predict"])));
    assert_eq!(doc.get("additional_data_nodes"), Some(&json!(["dn_c"])));
    assert_eq!(doc.get("frequency"), Some(&json!("MONTHLY")));
    assert_eq!(doc.get("comparators"), Some(&json!({"dn_b": ["compare_rmse"]})));
    assert_eq!(doc.get("owner"), Some(&json!("forecasting")));
}

#[test]
fn property_bag_wins_over_reserved_keys() {
    // Properties are merged last into the document, so a property that
    // shadows a reserved key overwrites it.
    let scenario = ScenarioConfig::builder("shadowing")
        .frequency(Frequency::Daily)
        .property("frequency", json!("whenever"))
        .build()
        .unwrap();

    let doc = scenario.to_document();
    assert_eq!(doc.get("frequency"), Some(&json!("whenever")));
}

#[test]
fn round_trip_preserves_all_fields() {
    let registry = seeded_registry();
    let original = full_scenario(&registry);

    let reloaded =
        ScenarioConfig::from_document(original.to_document(), "full_scenario", &registry).unwrap();

    assert_eq!(reloaded, original);
}

#[test]
fn from_document_resolves_ids_against_the_registry() {
    let registry = seeded_registry();
    let doc = Document::from_json(
        r#"{
            "tasks": ["predict"],
            "additional_data_nodes": ["dn_c"],
            "frequency": "WEEKLY",
            "comparators": {"dn_b": ["f1", "f2"]},
            "retention_days": 30
        }"#,
    )
    .unwrap();

    let scenario = ScenarioConfig::from_document(doc, "from_doc", &registry).unwrap();

    assert_eq!(scenario.id(), "from_doc");
    assert_eq!(scenario.tasks().len(), 1);
    assert!(std::sync::Arc::ptr_eq(
        &scenario.tasks()[0],
        &task(&registry, "predict")
    ));
    assert_eq!(scenario.additional_data_nodes()[0].id(), "dn_c");
    assert_eq!(scenario.frequency(), Some(Frequency::Weekly));
    assert_eq!(scenario.comparators().get("dn_b").len(), 2);
    assert_eq!(
        scenario.properties().get_raw("retention_days"),
        Some(&json!(30))
    );
}

#[test]
fn embedded_id_key_is_ignored() {
    let registry = seeded_registry();
    let doc = Document::from_json(r#"{"id": "someone_else", "tasks": ["train"]}"#).unwrap();
    let scenario = ScenarioConfig::from_document(doc, "the_caller_id", &registry).unwrap();
    assert_eq!(scenario.id(), "the_caller_id");
    assert!(!scenario.properties().contains_key("id"));
}

#[test]
fn legacy_pipeline_shape_is_flattened() {
    let registry = seeded_registry();
    let doc = Document::from_json(r#"{"pipelines": ["legacy_pipeline"]}"#).unwrap();

    let scenario = ScenarioConfig::from_document(doc, "migrated", &registry).unwrap();

    let ids: Vec<&str> = scenario.tasks().iter().map(|t| t.id().as_str()).collect();
    assert_eq!(ids, vec!["train", "predict"]);
    assert!(scenario.additional_data_nodes().is_empty());

    // The grouping is gone for good: re-serialization carries no pipelines key.
    let doc = scenario.to_document();
    assert_eq!(doc.get("pipelines"), None);
    assert_eq!(doc.get("tasks"), Some(&json!(["train", "predict"])));
}

#[test]
fn new_shape_takes_priority_over_pipelines() {
    // When both shapes are present the pipelines key is not consulted; it
    // survives as a plain property of the new-shape document.
    let registry = seeded_registry();
    let doc = Document::from_json(r#"{"tasks": ["train"], "pipelines": ["legacy_pipeline"]}"#)
        .unwrap();

    let scenario = ScenarioConfig::from_document(doc, "mixed", &registry).unwrap();
    assert_eq!(scenario.tasks().len(), 1);
    assert_eq!(scenario.tasks()[0].id(), "train");
}

#[test]
fn unresolved_references_are_dropped_leniently() {
    let registry = seeded_registry();
    let doc = Document::from_json(
        r#"{"tasks": ["train", "renamed_task"], "additional_data_nodes": ["ghost", "dn_c"]}"#,
    )
    .unwrap();

    let scenario = ScenarioConfig::from_document(doc, "lossy", &registry).unwrap();

    assert_eq!(scenario.tasks().len(), 1);
    assert_eq!(scenario.tasks()[0].id(), "train");
    assert_eq!(scenario.additional_data_nodes().len(), 1);
    assert_eq!(scenario.additional_data_nodes()[0].id(), "dn_c");
}

#[test]
fn unresolved_pipeline_is_dropped_leniently() {
    let registry = seeded_registry();
    let doc = Document::from_json(r#"{"pipelines": ["gone"]}"#).unwrap();
    let scenario = ScenarioConfig::from_document(doc, "empty_migration", &registry).unwrap();
    assert!(scenario.tasks().is_empty());
}

#[test]
fn strict_mode_surfaces_unresolved_references() {
    let registry = seeded_registry();

    let doc = Document::from_json(r#"{"tasks": ["renamed_task"]}"#).unwrap();
    let err =
        ScenarioConfig::from_document_with(doc, "strict", &registry, ResolutionMode::Strict)
            .unwrap_err();
    assert_eq!(
        err,
        ResolveError::UnresolvedTask {
            scenario_id: "strict".to_string(),
            task_id: "renamed_task".to_string(),
        }
    );

    let doc = Document::from_json(r#"{"pipelines": ["gone"]}"#).unwrap();
    let err =
        ScenarioConfig::from_document_with(doc, "strict", &registry, ResolutionMode::Strict)
            .unwrap_err();
    assert!(matches!(err, ResolveError::UnresolvedPipeline { .. }));
}

#[test]
fn malformed_reserved_keys_are_rejected() {
    let registry = seeded_registry();

    let doc = Document::from_json(r#"{"tasks": "train"}"#).unwrap();
    let err = ScenarioConfig::from_document(doc, "bad_tasks", &registry).unwrap_err();
    assert!(matches!(err, ResolveError::MalformedField { .. }));

    let doc = Document::from_json(r#"{"frequency": 7}"#).unwrap();
    let err = ScenarioConfig::from_document(doc, "bad_freq", &registry).unwrap_err();
    assert!(matches!(err, ResolveError::MalformedField { .. }));

    let doc = Document::from_json(r#"{"frequency": "FORTNIGHTLY"}"#).unwrap();
    let err = ScenarioConfig::from_document(doc, "bad_token", &registry).unwrap_err();
    assert!(matches!(err, ResolveError::MalformedField { .. }));
}

#[test]
fn scalar_comparator_values_normalize_to_lists() {
    let registry = seeded_registry();
    let doc = Document::from_json(r#"{"comparators": {"dn_a": "single_fn"}}"#).unwrap();

    let scenario = ScenarioConfig::from_document(doc, "scalar_cmp", &registry).unwrap();

    let handles: Vec<&str> = scenario
        .comparators()
        .get("dn_a")
        .iter()
        .map(|h| h.name())
        .collect();
    assert_eq!(handles, vec!["single_fn"]);
}

#[test]
fn null_list_keys_load_as_empty() {
    let registry = seeded_registry();

    let doc = Document::from_json(r#"{"tasks": null, "additional_data_nodes": ["dn_c"]}"#).unwrap();
    let scenario = ScenarioConfig::from_document(doc, "null_tasks", &registry).unwrap();
    assert!(scenario.tasks().is_empty());
    assert_eq!(scenario.additional_data_nodes().len(), 1);

    let doc = Document::from_json(r#"{"additional_data_nodes": null}"#).unwrap();
    let scenario = ScenarioConfig::from_document(doc, "null_data_nodes", &registry).unwrap();
    assert!(scenario.additional_data_nodes().is_empty());

    let doc = Document::from_json(r#"{"pipelines": null}"#).unwrap();
    let scenario = ScenarioConfig::from_document(doc, "null_pipelines", &registry).unwrap();
    assert!(scenario.tasks().is_empty());
    // The consumed key does not leak into the property bag.
    assert!(!scenario.properties().contains_key("pipelines"));
}

#[test]
fn absent_lists_normalize_to_empty() {
    let registry = seeded_registry();
    let doc = Document::from_json(r#"{"description": "nothing referenced"}"#).unwrap();

    let scenario = ScenarioConfig::from_document(doc, "sparse_doc", &registry).unwrap();

    assert!(scenario.tasks().is_empty());
    assert!(scenario.additional_data_nodes().is_empty());
    assert_eq!(scenario.frequency(), None);
    assert!(scenario.comparators().is_empty());
    assert_eq!(
        scenario.properties().get_raw("description"),
        Some(&json!("nothing referenced"))
    );
}
