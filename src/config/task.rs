use super::data_node::DataNodeConfig;
use super::id::ConfigId;
use crate::error::ConfigError;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Section name under which task configurations are registered.
pub const TASK_SECTION: &str = "TASK";

/// Configuration of a task, referenced by scenario configurations.
///
/// Only the surface consumed by this crate is modeled: the identifier and the
/// ordered input/output data node references read during derived-set
/// computation. The task's own behavior (function, skippability, ...) lives
/// with the task entity.
#[derive(Debug, Clone)]
pub struct TaskConfig {
    id: ConfigId,
    inputs: Vec<Arc<DataNodeConfig>>,
    outputs: Vec<Arc<DataNodeConfig>>,
}

impl TaskConfig {
    pub fn new(
        id: impl Into<String>,
        inputs: Vec<Arc<DataNodeConfig>>,
        outputs: Vec<Arc<DataNodeConfig>>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            id: ConfigId::new(id)?,
            inputs,
            outputs,
        })
    }

    pub fn id(&self) -> &ConfigId {
        &self.id
    }

    pub fn inputs(&self) -> &[Arc<DataNodeConfig>] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Arc<DataNodeConfig>] {
        &self.outputs
    }
}

// Identity is the config id: ids are unique within the task section.
impl PartialEq for TaskConfig {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TaskConfig {}

impl Hash for TaskConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
