use super::id::ConfigId;
use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque reference to a scenario-comparison routine.
///
/// Handles are stored and serialized by name; binding a name to an actual
/// comparison function is the concern of the scenario-comparison feature, not
/// of the configuration model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparatorHandle(String);

impl ComparatorHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComparatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComparatorHandle {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Ordered comparator lists keyed by data node config id.
///
/// Reading an absent key yields an empty list, not an error; keys are
/// validated identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Comparators(IndexMap<ConfigId, Vec<ComparatorHandle>>);

impl Comparators {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// The comparator list for `data_node_config_id`; empty when no
    /// comparator was ever added for that id.
    pub fn get(&self, data_node_config_id: &str) -> &[ComparatorHandle] {
        self.0
            .get(data_node_config_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Appends `comparator` to the list at `data_node_config_id`, creating
    /// the list if needed. Duplicates are kept.
    pub fn add(
        &mut self,
        data_node_config_id: &str,
        comparator: ComparatorHandle,
    ) -> Result<(), ConfigError> {
        self.0
            .entry(ConfigId::new(data_node_config_id)?)
            .or_default()
            .push(comparator);
        Ok(())
    }

    /// Removes the whole entry for `data_node_config_id`. Removing an absent
    /// entry is a no-op.
    pub fn delete(&mut self, data_node_config_id: &str) {
        self.0.shift_remove(data_node_config_id);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConfigId, &[ComparatorHandle])> {
        self.0.iter().map(|(id, handles)| (id, handles.as_slice()))
    }
}

impl FromIterator<(ConfigId, Vec<ComparatorHandle>)> for Comparators {
    fn from_iter<I: IntoIterator<Item = (ConfigId, Vec<ComparatorHandle>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
