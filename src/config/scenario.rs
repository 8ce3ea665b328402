use super::comparator::{ComparatorHandle, Comparators};
use super::data_node::DataNodeConfig;
use super::frequency::Frequency;
use super::id::ConfigId;
use super::properties::PropertyBag;
use super::task::TaskConfig;
use crate::document::Document;
use crate::error::{ConfigError, ResolveError};
use crate::registry::ConfigRegistry;
use crate::template::TemplateResolver;
use ahash::AHashSet;
use itertools::Itertools;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Section name under which scenario configurations are registered.
pub const SCENARIO_SECTION: &str = "SCENARIO";

const ID_KEY: &str = "id";
const PIPELINES_KEY: &str = "pipelines";
const TASKS_KEY: &str = "tasks";
const ADDITIONAL_DATA_NODES_KEY: &str = "additional_data_nodes";
const FREQUENCY_KEY: &str = "frequency";
const COMPARATORS_KEY: &str = "comparators";

/// How unresolvable references are handled while loading a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionMode {
    /// Drop the dangling id from the resulting list and log a warning.
    /// This is the compatible default: documents written against a newer or
    /// older registry still load.
    #[default]
    Lenient,
    /// Fail on the first reference that cannot be resolved.
    Strict,
}

/// Configuration fields needed to instantiate a scenario.
///
/// A scenario config ties together the task configs the scenario runs, any
/// additional data node configs it exposes, an optional cycle frequency,
/// per-data-node comparator lists, and an open-ended property bag. Instances
/// are built through [`ScenarioConfig::builder`] and usually registered into a
/// [`ConfigRegistry`] with [`ScenarioConfigBuilder::configure`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    id: ConfigId,
    tasks: Vec<Arc<TaskConfig>>,
    additional_data_nodes: Vec<Arc<DataNodeConfig>>,
    frequency: Option<Frequency>,
    comparators: Comparators,
    properties: PropertyBag,
}

impl ScenarioConfig {
    /// Starts building a scenario config with the given id.
    pub fn builder(id: impl Into<String>) -> ScenarioConfigBuilder {
        ScenarioConfigBuilder::new(id)
    }

    /// Starts building the default scenario config, registered under the
    /// reserved default id. Explicit configs fall back to its field values
    /// during [`ScenarioConfig::update`].
    pub fn default_builder() -> ScenarioConfigBuilder {
        ScenarioConfigBuilder::new(ConfigId::default_id().as_str())
    }

    /// The empty default instance: no tasks, no data nodes, no frequency.
    pub fn default_config() -> Self {
        Self {
            id: ConfigId::default_id(),
            tasks: Vec::new(),
            additional_data_nodes: Vec::new(),
            frequency: None,
            comparators: Comparators::new(),
            properties: PropertyBag::new(),
        }
    }

    pub fn id(&self) -> &ConfigId {
        &self.id
    }

    pub fn tasks(&self) -> &[Arc<TaskConfig>] {
        &self.tasks
    }

    /// Alias of [`ScenarioConfig::tasks`].
    pub fn task_configs(&self) -> &[Arc<TaskConfig>] {
        &self.tasks
    }

    pub fn additional_data_nodes(&self) -> &[Arc<DataNodeConfig>] {
        &self.additional_data_nodes
    }

    /// Alias of [`ScenarioConfig::additional_data_nodes`].
    pub fn additional_data_node_configs(&self) -> &[Arc<DataNodeConfig>] {
        &self.additional_data_nodes
    }

    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }

    pub fn comparators(&self) -> &Comparators {
        &self.comparators
    }

    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    /// The resolved property value at `key`. Template placeholders are
    /// resolved on every call, not at construction time.
    pub fn property(&self, key: &str, resolver: &dyn TemplateResolver) -> Option<Value> {
        self.properties.get(key, resolver)
    }

    /// Every data node config this scenario touches: the additional data
    /// nodes plus the inputs and outputs of every task, deduplicated by
    /// config id. Recomputed on each call so it never goes stale.
    pub fn data_node_configs(&self) -> AHashSet<Arc<DataNodeConfig>> {
        let mut data_nodes: AHashSet<Arc<DataNodeConfig>> =
            self.additional_data_nodes.iter().cloned().collect();
        for task in &self.tasks {
            data_nodes.extend(task.inputs().iter().cloned());
            data_nodes.extend(task.outputs().iter().cloned());
        }
        data_nodes
    }

    /// Alias of [`ScenarioConfig::data_node_configs`].
    pub fn data_nodes(&self) -> AHashSet<Arc<DataNodeConfig>> {
        self.data_node_configs()
    }

    /// Appends `comparator` to the ordered list for `data_node_config_id`,
    /// creating the list when absent. Duplicates are kept.
    pub fn add_comparator(
        &mut self,
        data_node_config_id: &str,
        comparator: ComparatorHandle,
    ) -> Result<(), ConfigError> {
        self.comparators.add(data_node_config_id, comparator)
    }

    /// Removes every comparator for `data_node_config_id`. Deleting an absent
    /// entry is a no-op.
    pub fn delete_comparator(&mut self, data_node_config_id: &str) {
        self.comparators.delete(data_node_config_id);
    }

    /// Resets the instance to its construction defaults in place, keeping the
    /// id. Used when configuration is reloaded. Idempotent.
    pub fn clean(&mut self) {
        self.tasks.clear();
        self.additional_data_nodes.clear();
        self.frequency = None;
        self.comparators.clear();
        self.properties.clear();
    }

    /// Serializes to the flat document shape.
    ///
    /// Task and data node entries are written as their ids, not as nested
    /// documents; the result is registry-relative, not self-contained. The
    /// property bag is merged last, so a property sharing a reserved key wins.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();

        let comparators: serde_json::Map<String, Value> = self
            .comparators
            .iter()
            .map(|(id, handles)| {
                let names = handles
                    .iter()
                    .map(|h| Value::String(h.name().to_string()))
                    .collect();
                (id.to_string(), Value::Array(names))
            })
            .collect();
        doc.insert(COMPARATORS_KEY, Value::Object(comparators));

        doc.insert(
            TASKS_KEY,
            Value::Array(
                self.tasks
                    .iter()
                    .map(|t| Value::String(t.id().to_string()))
                    .collect(),
            ),
        );
        doc.insert(
            ADDITIONAL_DATA_NODES_KEY,
            Value::Array(
                self.additional_data_nodes
                    .iter()
                    .map(|dn| Value::String(dn.id().to_string()))
                    .collect(),
            ),
        );
        doc.insert(
            FREQUENCY_KEY,
            self.frequency
                .map(|f| Value::String(f.as_token().to_string()))
                .unwrap_or(Value::Null),
        );

        for (key, value) in self.properties.iter() {
            doc.insert(key.clone(), value.clone());
        }
        doc
    }

    /// Resolves a raw document into a scenario config, migrating legacy
    /// shapes, with the lenient resolution mode.
    pub fn from_document(
        doc: Document,
        id: &str,
        registry: &ConfigRegistry,
    ) -> Result<Self, ResolveError> {
        Self::from_document_with(doc, id, registry, ResolutionMode::Lenient)
    }

    /// Resolves a raw document into a scenario config.
    ///
    /// Shape detection, in priority order:
    /// 1. A `tasks` or `additional_data_nodes` key marks the current shape;
    ///    each listed id is resolved against the registry.
    /// 2. Otherwise a `pipelines` key marks the legacy shape: every
    ///    resolvable pipeline contributes all of its tasks, in order, and the
    ///    pipeline grouping itself is discarded.
    /// 3. Otherwise both lists are empty.
    ///
    /// An explicit `null` under any of the three list keys reads the same as
    /// an absent key. All keys left after the reserved ones are popped become
    /// properties.
    pub fn from_document_with(
        mut doc: Document,
        id: &str,
        registry: &ConfigRegistry,
        mode: ResolutionMode,
    ) -> Result<Self, ResolveError> {
        // A document-embedded id is ignored in favor of the caller's.
        doc.pop(ID_KEY);

        let mut tasks: Vec<Arc<TaskConfig>> = Vec::new();
        let mut additional_data_nodes: Vec<Arc<DataNodeConfig>> = Vec::new();

        // For the three list keys an explicit null reads the same as an
        // absent key.
        if doc.contains_key(TASKS_KEY) || doc.contains_key(ADDITIONAL_DATA_NODES_KEY) {
            if let Some(value) = doc.pop(TASKS_KEY).filter(|value| !value.is_null()) {
                for task_id in id_list(TASKS_KEY, value)? {
                    match registry.task(&task_id) {
                        Some(task) => tasks.push(task),
                        None if mode == ResolutionMode::Strict => {
                            return Err(ResolveError::UnresolvedTask {
                                scenario_id: id.to_string(),
                                task_id,
                            });
                        }
                        None => {
                            warn!(scenario = id, task = %task_id, "dropping reference to unregistered task config");
                        }
                    }
                }
            }
            if let Some(value) = doc
                .pop(ADDITIONAL_DATA_NODES_KEY)
                .filter(|value| !value.is_null())
            {
                for data_node_id in id_list(ADDITIONAL_DATA_NODES_KEY, value)? {
                    match registry.data_node(&data_node_id) {
                        Some(data_node) => additional_data_nodes.push(data_node),
                        None if mode == ResolutionMode::Strict => {
                            return Err(ResolveError::UnresolvedDataNode {
                                scenario_id: id.to_string(),
                                data_node_id,
                            });
                        }
                        None => {
                            warn!(scenario = id, data_node = %data_node_id, "dropping reference to unregistered data node config");
                        }
                    }
                }
            }
        } else if let Some(value) = doc.pop(PIPELINES_KEY).filter(|value| !value.is_null()) {
            // Legacy shape: flatten every pipeline's tasks and drop the
            // grouping. No additional data nodes are recovered on this path.
            info!(scenario = id, "migrating legacy pipeline references");
            for pipeline_id in id_list(PIPELINES_KEY, value)? {
                match registry.pipeline(&pipeline_id) {
                    Some(pipeline) => tasks.extend(pipeline.tasks().iter().cloned()),
                    None if mode == ResolutionMode::Strict => {
                        return Err(ResolveError::UnresolvedPipeline {
                            scenario_id: id.to_string(),
                            pipeline_id,
                        });
                    }
                    None => {
                        warn!(scenario = id, pipeline = %pipeline_id, "dropping reference to unregistered pipeline config");
                    }
                }
            }
        }

        let frequency = pop_frequency(&mut doc)?;
        let comparators = pop_comparators(&mut doc)?;

        let mut builder = ScenarioConfig::builder(id)
            .tasks(tasks)
            .additional_data_nodes(additional_data_nodes);
        if let Some(frequency) = frequency {
            builder = builder.frequency(frequency);
        }
        for (key, handles) in comparators {
            builder = builder.comparators(key, handles);
        }
        for (key, value) in doc {
            builder = builder.property(key, value);
        }
        Ok(builder.build()?)
    }

    /// Merges an incoming partial document into this config.
    ///
    /// Each reserved field takes the incoming value when its key is present,
    /// keeps the current value when absent, and falls back to the default
    /// section's value when the result is still null. Remaining keys overlay
    /// the property bag; with a default section the final bag is the
    /// default's bag overlaid by this one (current values win).
    ///
    /// Unresolvable task and data node references are dropped with a warning.
    pub fn update(
        &mut self,
        mut doc: Document,
        registry: &ConfigRegistry,
        default_section: Option<&ScenarioConfig>,
    ) -> Result<(), ResolveError> {
        match doc.pop(TASKS_KEY) {
            None => {}
            Some(Value::Null) => {
                self.tasks = default_section.map(|d| d.tasks.clone()).unwrap_or_default();
            }
            Some(value) => {
                self.tasks = id_list(TASKS_KEY, value)?
                    .into_iter()
                    .filter_map(|task_id| {
                        let task = registry.task(&task_id);
                        if task.is_none() {
                            warn!(scenario = %self.id, task = %task_id, "dropping reference to unregistered task config");
                        }
                        task
                    })
                    .collect();
            }
        }

        match doc.pop(ADDITIONAL_DATA_NODES_KEY) {
            None => {}
            Some(Value::Null) => {
                self.additional_data_nodes = default_section
                    .map(|d| d.additional_data_nodes.clone())
                    .unwrap_or_default();
            }
            Some(value) => {
                self.additional_data_nodes = id_list(ADDITIONAL_DATA_NODES_KEY, value)?
                    .into_iter()
                    .filter_map(|data_node_id| {
                        let data_node = registry.data_node(&data_node_id);
                        if data_node.is_none() {
                            warn!(scenario = %self.id, data_node = %data_node_id, "dropping reference to unregistered data node config");
                        }
                        data_node
                    })
                    .collect();
            }
        }

        if let Some(value) = doc.pop(FREQUENCY_KEY) {
            self.frequency = frequency_from_value(value)?;
        }
        if self.frequency.is_none()
            && let Some(default) = default_section
        {
            self.frequency = default.frequency;
        }

        match doc.pop(COMPARATORS_KEY) {
            None => {}
            Some(Value::Null) => {
                self.comparators = default_section
                    .map(|d| d.comparators.clone())
                    .unwrap_or_default();
            }
            Some(value) => {
                self.comparators = parse_comparator_map(value)?;
            }
        }

        self.properties.extend(doc.into_entries());
        if let Some(default) = default_section {
            self.properties = self.properties.overlaid_on(&default.properties);
        }
        Ok(())
    }

    /// Replaces this config's structured fields with `incoming`'s and overlays
    /// its properties. Applied by the registry when a duplicate id is
    /// registered.
    pub(crate) fn absorb(&mut self, incoming: ScenarioConfig) {
        self.tasks = incoming.tasks;
        self.additional_data_nodes = incoming.additional_data_nodes;
        self.frequency = incoming.frequency;
        self.comparators = incoming.comparators;
        self.properties
            .extend(incoming.properties.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

impl fmt::Display for ScenarioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScenarioConfig '{}' [{}]",
            self.id,
            self.tasks.iter().map(|t| t.id().as_str()).join(", ")
        )
    }
}

/// Builds a [`ScenarioConfig`], normalizing scalar-or-list inputs: every adder
/// comes in a singular and a plural form and all of them append.
#[derive(Debug, Clone, Default)]
pub struct ScenarioConfigBuilder {
    id: String,
    tasks: Vec<Arc<TaskConfig>>,
    additional_data_nodes: Vec<Arc<DataNodeConfig>>,
    frequency: Option<Frequency>,
    comparators: Vec<(String, Vec<ComparatorHandle>)>,
    properties: PropertyBag,
}

impl ScenarioConfigBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn task(mut self, task: Arc<TaskConfig>) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn tasks(mut self, tasks: impl IntoIterator<Item = Arc<TaskConfig>>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    pub fn additional_data_node(mut self, data_node: Arc<DataNodeConfig>) -> Self {
        self.additional_data_nodes.push(data_node);
        self
    }

    pub fn additional_data_nodes(
        mut self,
        data_nodes: impl IntoIterator<Item = Arc<DataNodeConfig>>,
    ) -> Self {
        self.additional_data_nodes.extend(data_nodes);
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn comparator(mut self, data_node_config_id: impl Into<String>, comparator: ComparatorHandle) -> Self {
        self.comparators
            .push((data_node_config_id.into(), vec![comparator]));
        self
    }

    pub fn comparators(
        mut self,
        data_node_config_id: impl Into<String>,
        comparators: impl IntoIterator<Item = ComparatorHandle>,
    ) -> Self {
        self.comparators
            .push((data_node_config_id.into(), comparators.into_iter().collect()));
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key, value);
        self
    }

    pub fn properties(mut self, properties: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.properties.extend(properties);
        self
    }

    /// Validates the id and every comparator key and builds the config.
    pub fn build(self) -> Result<ScenarioConfig, ConfigError> {
        let mut comparators = Comparators::new();
        for (key, handles) in self.comparators {
            for handle in handles {
                comparators.add(&key, handle)?;
            }
        }
        Ok(ScenarioConfig {
            id: ConfigId::new(self.id)?,
            tasks: self.tasks,
            additional_data_nodes: self.additional_data_nodes,
            frequency: self.frequency,
            comparators,
            properties: self.properties,
        })
    }

    /// Builds the config and registers it into `registry`, returning the
    /// *registered* instance. When the id is already taken the registry
    /// merges this config into the existing entry, so the returned value is
    /// the source of truth, not the locally built one.
    pub fn configure(self, registry: &ConfigRegistry) -> Result<ScenarioConfig, ConfigError> {
        let section = self.build()?;
        Ok(registry.register_scenario(section))
    }
}

/// Reads a reserved key's value as a list of id strings.
fn id_list(key: &str, value: Value) -> Result<Vec<String>, ResolveError> {
    let malformed = || ResolveError::MalformedField {
        key: key.to_string(),
        expected: "a list of id strings".to_string(),
    };
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(malformed()),
            })
            .collect(),
        _ => Err(malformed()),
    }
}

fn pop_frequency(doc: &mut Document) -> Result<Option<Frequency>, ResolveError> {
    match doc.pop(FREQUENCY_KEY) {
        None => Ok(None),
        Some(value) => frequency_from_value(value),
    }
}

fn frequency_from_value(value: Value) -> Result<Option<Frequency>, ResolveError> {
    match value {
        Value::Null => Ok(None),
        Value::String(token) => {
            token
                .parse()
                .map(Some)
                .map_err(|_| ResolveError::MalformedField {
                    key: FREQUENCY_KEY.to_string(),
                    expected: "a frequency token (DAILY, WEEKLY, MONTHLY, QUARTERLY, YEARLY)"
                        .to_string(),
                })
        }
        _ => Err(ResolveError::MalformedField {
            key: FREQUENCY_KEY.to_string(),
            expected: "a frequency token or null".to_string(),
        }),
    }
}

/// Pops the comparator mapping; absent defaults to empty. Values may be a
/// single handle name or a list of names, both normalize to a list.
fn pop_comparators(doc: &mut Document) -> Result<Vec<(String, Vec<ComparatorHandle>)>, ResolveError> {
    match doc.pop(COMPARATORS_KEY) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => parse_comparator_entries(value),
    }
}

fn parse_comparator_map(value: Value) -> Result<Comparators, ResolveError> {
    let mut comparators = Comparators::new();
    for (key, handles) in parse_comparator_entries(value)? {
        for handle in handles {
            comparators.add(&key, handle)?;
        }
    }
    Ok(comparators)
}

fn parse_comparator_entries(
    value: Value,
) -> Result<Vec<(String, Vec<ComparatorHandle>)>, ResolveError> {
    let malformed = || ResolveError::MalformedField {
        key: COMPARATORS_KEY.to_string(),
        expected: "a mapping from data node config id to a comparator name or list of names"
            .to_string(),
    };
    let Value::Object(entries) = value else {
        return Err(malformed());
    };
    entries
        .into_iter()
        .map(|(key, handles)| {
            let handles = match handles {
                Value::String(name) => vec![ComparatorHandle::new(name)],
                Value::Array(names) => names
                    .into_iter()
                    .map(|name| match name {
                        Value::String(s) => Ok(ComparatorHandle::new(s)),
                        _ => Err(malformed()),
                    })
                    .collect::<Result<_, _>>()?,
                _ => return Err(malformed()),
            };
            Ok((key, handles))
        })
        .collect()
}
