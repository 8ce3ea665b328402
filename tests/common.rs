//! Common test utilities for building registries and scenario fixtures.
use scenarist::prelude::*;
use std::sync::Arc;

/// Builds a registry seeded with the sections most tests reference:
///
/// - data nodes `dn_a`, `dn_b`, `dn_c`
/// - task `train` (no inputs, outputs `dn_a`)
/// - task `predict` (inputs `dn_a`, outputs `dn_b`)
/// - legacy pipeline `legacy_pipeline` grouping `[train, predict]`
#[allow(dead_code)]
pub fn seeded_registry() -> ConfigRegistry {
    let registry = ConfigRegistry::new();

    let dn_a = registry.register_data_node(DataNodeConfig::new("dn_a").unwrap());
    let dn_b = registry.register_data_node(DataNodeConfig::new("dn_b").unwrap());
    registry.register_data_node(DataNodeConfig::new("dn_c").unwrap());

    let train = registry.register_task(TaskConfig::new("train", vec![], vec![dn_a.clone()]).unwrap());
    let predict =
        registry.register_task(TaskConfig::new("predict", vec![dn_a], vec![dn_b]).unwrap());

    registry
        .register_pipeline(PipelineConfig::new("legacy_pipeline", vec![train, predict]).unwrap());

    registry
}

/// Looks up a task handle that `seeded_registry` registered.
#[allow(dead_code)]
pub fn task(registry: &ConfigRegistry, id: &str) -> Arc<TaskConfig> {
    registry.task(id).unwrap()
}

/// Looks up a data node handle that `seeded_registry` registered.
#[allow(dead_code)]
pub fn data_node(registry: &ConfigRegistry, id: &str) -> Arc<DataNodeConfig> {
    registry.data_node(id).unwrap()
}

/// Builds the scenario most document tests round-trip: both tasks, `dn_c` as
/// an additional data node, a monthly frequency, one comparator and one
/// property.
#[allow(dead_code)]
pub fn full_scenario(registry: &ConfigRegistry) -> ScenarioConfig {
    ScenarioConfig::builder("full_scenario")
        .task(task(registry, "train"))
        .task(task(registry, "predict"))
        .additional_data_node(data_node(registry, "dn_c"))
        .frequency(Frequency::Monthly)
        .comparator("dn_b", ComparatorHandle::new("compare_rmse"))
        .property("owner", serde_json::json!("forecasting"))
        .build()
        .unwrap()
}
