//! Default-merge behavior of `ScenarioConfig::update`.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use scenarist::prelude::*;
use serde_json::json;

fn default_section(registry: &ConfigRegistry) -> ScenarioConfig {
    ScenarioConfig::default_builder()
        .task(task(registry, "train"))
        .frequency(Frequency::Weekly)
        .comparator("dn_a", ComparatorHandle::new("default_cmp"))
        .property("owner", json!("defaults"))
        .property("retention_days", json!(7))
        .build()
        .unwrap()
}

#[test]
fn incoming_keys_win() {
    let registry = seeded_registry();
    let mut scenario = full_scenario(&registry);

    let doc = Document::from_json(r#"{"tasks": ["predict"], "frequency": "DAILY"}"#).unwrap();
    scenario.update(doc, &registry, None).unwrap();

    assert_eq!(scenario.tasks().len(), 1);
    assert_eq!(scenario.tasks()[0].id(), "predict");
    assert_eq!(scenario.frequency(), Some(Frequency::Daily));
    // Untouched fields keep their current values.
    assert_eq!(scenario.additional_data_nodes()[0].id(), "dn_c");
    assert_eq!(scenario.comparators().get("dn_b").len(), 1);
}

#[test]
fn absent_keys_keep_current_values() {
    let registry = seeded_registry();
    let mut scenario = full_scenario(&registry);
    let before = scenario.clone();

    scenario.update(Document::new(), &registry, None).unwrap();

    assert_eq!(scenario, before);
}

#[test]
fn explicit_null_falls_back_to_the_default_section() {
    let registry = seeded_registry();
    let default = default_section(&registry);

    let mut scenario = full_scenario(&registry);
    let doc = Document::from_json(r#"{"tasks": null, "comparators": null}"#).unwrap();
    scenario.update(doc, &registry, Some(&default)).unwrap();

    assert_eq!(scenario.tasks().len(), 1);
    assert_eq!(scenario.tasks()[0].id(), "train");
    assert_eq!(scenario.comparators().get("dn_a").len(), 1);
}

#[test]
fn explicit_null_without_default_empties_the_field() {
    let registry = seeded_registry();
    let mut scenario = full_scenario(&registry);

    let doc = Document::from_json(r#"{"tasks": null}"#).unwrap();
    scenario.update(doc, &registry, None).unwrap();

    assert!(scenario.tasks().is_empty());
}

#[test]
fn unset_frequency_falls_back_to_the_default_section() {
    // Incoming document lacks a frequency key and the current value is None:
    // the default section's Weekly survives the merge.
    let registry = seeded_registry();
    let default = default_section(&registry);

    let mut scenario = ScenarioConfig::builder("no_frequency").build().unwrap();
    assert_eq!(scenario.frequency(), None);

    scenario
        .update(Document::new(), &registry, Some(&default))
        .unwrap();

    assert_eq!(scenario.frequency(), Some(Frequency::Weekly));
}

#[test]
fn present_frequency_is_not_overridden_by_default() {
    let registry = seeded_registry();
    let default = default_section(&registry);

    let mut scenario = full_scenario(&registry);
    scenario
        .update(Document::new(), &registry, Some(&default))
        .unwrap();

    assert_eq!(scenario.frequency(), Some(Frequency::Monthly));
}

#[test]
fn properties_merge_in_two_levels() {
    // Incoming keys overlay the current bag; the result overlays the default
    // bag. Current/incoming values win, defaults only fill gaps.
    let registry = seeded_registry();
    let default = default_section(&registry);

    let mut scenario = full_scenario(&registry); // owner = "forecasting"
    let doc = Document::from_json(r#"{"description": "updated"}"#).unwrap();
    scenario.update(doc, &registry, Some(&default)).unwrap();

    assert_eq!(scenario.properties().get_raw("owner"), Some(&json!("forecasting")));
    assert_eq!(
        scenario.properties().get_raw("description"),
        Some(&json!("updated"))
    );
    // Filled in from the default section.
    assert_eq!(scenario.properties().get_raw("retention_days"), Some(&json!(7)));
}

#[test]
fn incoming_properties_win_over_current() {
    let registry = seeded_registry();
    let mut scenario = full_scenario(&registry);

    let doc = Document::from_json(r#"{"owner": "handover"}"#).unwrap();
    scenario.update(doc, &registry, None).unwrap();

    assert_eq!(scenario.properties().get_raw("owner"), Some(&json!("handover")));
}

#[test]
fn update_drops_unresolvable_references() {
    let registry = seeded_registry();
    let mut scenario = full_scenario(&registry);

    let doc = Document::from_json(r#"{"tasks": ["predict", "renamed_task"]}"#).unwrap();
    scenario.update(doc, &registry, None).unwrap();

    assert_eq!(scenario.tasks().len(), 1);
    assert_eq!(scenario.tasks()[0].id(), "predict");
}

#[test]
fn incoming_comparators_replace_the_current_map() {
    let registry = seeded_registry();
    let mut scenario = full_scenario(&registry); // has dn_b -> [compare_rmse]

    let doc = Document::from_json(r#"{"comparators": {"dn_c": ["other"]}}"#).unwrap();
    scenario.update(doc, &registry, None).unwrap();

    assert!(scenario.comparators().get("dn_b").is_empty());
    assert_eq!(scenario.comparators().get("dn_c").len(), 1);
}
