use super::id::ConfigId;
use crate::error::ConfigError;
use std::hash::{Hash, Hasher};

/// Section name under which data node configurations are registered.
pub const DATA_NODE_SECTION: &str = "DATA_NODE";

/// Configuration of a data node, referenced by task and scenario
/// configurations. Storage details belong to the data node entity itself.
#[derive(Debug, Clone)]
pub struct DataNodeConfig {
    id: ConfigId,
}

impl DataNodeConfig {
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            id: ConfigId::new(id)?,
        })
    }

    pub fn id(&self) -> &ConfigId {
        &self.id
    }
}

// Identity is the config id: ids are unique within the data node section.
impl PartialEq for DataNodeConfig {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DataNodeConfig {}

impl Hash for DataNodeConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
