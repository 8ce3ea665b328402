//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the scenarist
//! crate. Import this module to get access to the core functionality without
//! having to import each type individually.

// Root entity and builder
pub use crate::config::scenario::{
    ResolutionMode, SCENARIO_SECTION, ScenarioConfig, ScenarioConfigBuilder,
};

// Referenced collaborator configs
pub use crate::config::data_node::DataNodeConfig;
pub use crate::config::pipeline::PipelineConfig;
pub use crate::config::task::TaskConfig;

// Field types
pub use crate::config::comparator::{ComparatorHandle, Comparators};
pub use crate::config::frequency::Frequency;
pub use crate::config::id::{ConfigId, DEFAULT_KEY, validate_id};
pub use crate::config::properties::PropertyBag;

// Document shape and registry
pub use crate::document::Document;
pub use crate::registry::ConfigRegistry;

// Template resolution
pub use crate::template::{EnvResolver, NoopResolver, TemplateResolver};

// Error types
pub use crate::error::{ConfigError, ResolveError};
