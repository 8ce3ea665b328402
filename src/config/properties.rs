use crate::template::TemplateResolver;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered bag of user-supplied extra configuration values.
///
/// Values are stored raw; [`PropertyBag::get`] runs them through a
/// [`TemplateResolver`] on every read, so placeholder resolution is
/// late-bound rather than fixed at construction time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag(IndexMap<String, Value>);

impl PropertyBag {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// The resolved value at `key`, or `None` when the key is absent.
    pub fn get(&self, key: &str, resolver: &dyn TemplateResolver) -> Option<Value> {
        self.0.get(key).map(|raw| resolver.resolve(raw))
    }

    /// The stored value at `key` with no template resolution applied.
    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Overlays `incoming` onto this bag: incoming values win on shared keys.
    pub fn extend(&mut self, incoming: impl IntoIterator<Item = (String, Value)>) {
        for (key, value) in incoming {
            self.0.insert(key, value);
        }
    }

    /// Returns `defaults` overlaid by this bag: this bag's values win on
    /// shared keys, defaults fill in the rest.
    pub fn overlaid_on(&self, defaults: &PropertyBag) -> PropertyBag {
        let mut merged = defaults.clone();
        merged.extend(self.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
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

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
