use super::id::ConfigId;
use super::task::TaskConfig;
use crate::error::ConfigError;
use std::sync::Arc;

/// Section name under which pipeline configurations are registered.
pub const PIPELINE_SECTION: &str = "PIPELINE";

/// Deprecated grouping of tasks, kept only so legacy documents can be
/// migrated: loading a scenario that still references pipelines flattens
/// their tasks into the scenario's own task list and discards the grouping.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    id: ConfigId,
    tasks: Vec<Arc<TaskConfig>>,
}

impl PipelineConfig {
    pub fn new(id: impl Into<String>, tasks: Vec<Arc<TaskConfig>>) -> Result<Self, ConfigError> {
        Ok(Self {
            id: ConfigId::new(id)?,
            tasks,
        })
    }

    pub fn id(&self) -> &ConfigId {
        &self.id
    }

    pub fn tasks(&self) -> &[Arc<TaskConfig>] {
        &self.tasks
    }
}
