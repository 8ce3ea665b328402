use thiserror::Error;

/// Errors that can occur while building or mutating a configuration section.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "'{id}' is not a valid identifier: it must start with a letter or underscore, \
         contain only alphanumeric characters and underscores, and not be a reserved word"
    )]
    InvalidIdentifier { id: String },
}

/// Errors that can occur while resolving a raw document into a scenario configuration.
///
/// Unresolved-reference variants are only produced in [`ResolutionMode::Strict`];
/// the default lenient mode drops the dangling id and logs a warning instead.
///
/// [`ResolutionMode::Strict`]: crate::config::ResolutionMode::Strict
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Task config '{task_id}' referenced by scenario '{scenario_id}' is not registered")]
    UnresolvedTask { scenario_id: String, task_id: String },

    #[error(
        "Data node config '{data_node_id}' referenced by scenario '{scenario_id}' is not registered"
    )]
    UnresolvedDataNode {
        scenario_id: String,
        data_node_id: String,
    },

    #[error(
        "Pipeline config '{pipeline_id}' referenced by scenario '{scenario_id}' is not registered"
    )]
    UnresolvedPipeline {
        scenario_id: String,
        pipeline_id: String,
    },

    #[error("Document key '{key}' holds an unexpected value: expected {expected}")]
    MalformedField { key: String, expected: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
