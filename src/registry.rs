use crate::config::data_node::{DATA_NODE_SECTION, DataNodeConfig};
use crate::config::id::DEFAULT_KEY;
use crate::config::pipeline::{PIPELINE_SECTION, PipelineConfig};
use crate::config::scenario::{SCENARIO_SECTION, ScenarioConfig};
use crate::config::task::{TASK_SECTION, TaskConfig};
use ahash::AHashMap;
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tracing::debug;

/// The process-wide store of configuration sections, keyed by section name
/// then id.
///
/// The registry is always passed as an explicit handle; there is no hidden
/// global instance. A single lock guards the whole store, so concurrent
/// configuration-building call sites serialize their writes and readers see a
/// consistent snapshot. Task, data node and pipeline entries are handed out
/// as shared `Arc`s (the registry is a lookup table, not a second owner);
/// scenario entries are handed out as clones, with the stored entry remaining
/// the source of truth.
#[derive(Debug, Default)]
pub struct ConfigRegistry {
    sections: RwLock<Sections>,
}

#[derive(Debug, Default)]
struct Sections {
    scenarios: AHashMap<String, ScenarioConfig>,
    tasks: AHashMap<String, Arc<TaskConfig>>,
    data_nodes: AHashMap<String, Arc<DataNodeConfig>>,
    pipelines: AHashMap<String, Arc<PipelineConfig>>,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a data node config, returning the shared handle other
    /// sections reference it through. Re-registering an id replaces the entry.
    pub fn register_data_node(&self, config: DataNodeConfig) -> Arc<DataNodeConfig> {
        let config = Arc::new(config);
        debug!(id = %config.id(), "registering data node config");
        self.sections
            .write()
            .data_nodes
            .insert(config.id().to_string(), Arc::clone(&config));
        config
    }

    /// Registers a task config, returning the shared handle.
    pub fn register_task(&self, config: TaskConfig) -> Arc<TaskConfig> {
        let config = Arc::new(config);
        debug!(id = %config.id(), "registering task config");
        self.sections
            .write()
            .tasks
            .insert(config.id().to_string(), Arc::clone(&config));
        config
    }

    /// Registers a legacy pipeline config, returning the shared handle. Only
    /// consulted when migrating legacy documents.
    pub fn register_pipeline(&self, config: PipelineConfig) -> Arc<PipelineConfig> {
        let config = Arc::new(config);
        debug!(id = %config.id(), "registering pipeline config");
        self.sections
            .write()
            .pipelines
            .insert(config.id().to_string(), Arc::clone(&config));
        config
    }

    /// Registers a scenario config and returns the registered instance.
    ///
    /// When the id is already taken the incoming config is merged into the
    /// existing entry (structured fields replaced, properties overlaid)
    /// instead of replacing it, so callers must use the returned value rather
    /// than the one they built.
    pub fn register_scenario(&self, config: ScenarioConfig) -> ScenarioConfig {
        let mut sections = self.sections.write();
        let id = config.id().to_string();
        match sections.scenarios.entry(id) {
            Entry::Occupied(mut entry) => {
                debug!(id = %entry.key(), "merging scenario config into existing entry");
                entry.get_mut().absorb(config);
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                debug!(id = %entry.key(), "registering scenario config");
                entry.insert(config).clone()
            }
        }
    }

    pub fn task(&self, id: &str) -> Option<Arc<TaskConfig>> {
        self.sections.read().tasks.get(id).cloned()
    }

    pub fn data_node(&self, id: &str) -> Option<Arc<DataNodeConfig>> {
        self.sections.read().data_nodes.get(id).cloned()
    }

    pub fn pipeline(&self, id: &str) -> Option<Arc<PipelineConfig>> {
        self.sections.read().pipelines.get(id).cloned()
    }

    pub fn scenario(&self, id: &str) -> Option<ScenarioConfig> {
        self.sections.read().scenarios.get(id).cloned()
    }

    /// The default scenario section, if one was configured.
    pub fn default_scenario(&self) -> Option<ScenarioConfig> {
        self.scenario(DEFAULT_KEY)
    }

    /// Ids of every registered scenario config, in no particular order.
    pub fn scenario_ids(&self) -> Vec<String> {
        self.sections.read().scenarios.keys().cloned().collect()
    }

    pub fn contains_scenario(&self, id: &str) -> bool {
        self.sections.read().scenarios.contains_key(id)
    }

    /// Generic name-then-id membership check across all sections. Unknown
    /// section names read as absent.
    pub fn contains(&self, section_name: &str, id: &str) -> bool {
        let sections = self.sections.read();
        match section_name {
            SCENARIO_SECTION => sections.scenarios.contains_key(id),
            TASK_SECTION => sections.tasks.contains_key(id),
            DATA_NODE_SECTION => sections.data_nodes.contains_key(id),
            PIPELINE_SECTION => sections.pipelines.contains_key(id),
            _ => false,
        }
    }
}
