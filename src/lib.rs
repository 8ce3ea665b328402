//! # Scenarist - Scenario Configuration Model
//!
//! **Scenarist** is the configuration entity model for scenario-based workflow
//! orchestration: an in-memory representation of a named workflow unit (a
//! "scenario"), its serialization to and from a flat key-value document, the
//! merge rules between an explicit instance and a process-wide default, and
//! the migration of legacy document shapes into the current one.
//!
//! ## Core Workflow
//!
//! 1.  **Register the sibling sections**: task, data node and (legacy)
//!     pipeline configs live in a [`ConfigRegistry`] and are referenced by id.
//! 2.  **Build a scenario config**: use [`ScenarioConfig::builder`] to collect
//!     task and data node references, a cycle frequency, comparators and
//!     arbitrary properties, then `configure` it into the registry.
//! 3.  **Serialize / reload**: [`ScenarioConfig::to_document`] produces the
//!     registry-relative document shape; [`ScenarioConfig::from_document`]
//!     resolves a document back into live references, migrating legacy
//!     pipeline-based documents on the way.
//! 4.  **Merge defaults**: [`ScenarioConfig::update`] overlays an incoming
//!     partial document and falls back to the registered default section for
//!     fields that remain unset.
//!
//! ## Quick Start
//!
//! ```rust
//! use scenarist::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = ConfigRegistry::new();
//!
//!     // Sibling sections the scenario will reference by id.
//!     let history = registry.register_data_node(DataNodeConfig::new("sales_history")?);
//!     let predictions = registry.register_data_node(DataNodeConfig::new("sales_predictions")?);
//!     let training = registry.register_task(TaskConfig::new(
//!         "train_model",
//!         vec![history.clone()],
//!         vec![predictions.clone()],
//!     )?);
//!
//!     // Build and register the scenario configuration.
//!     let scenario = ScenarioConfig::builder("monthly_forecast")
//!         .task(training)
//!         .frequency(Frequency::Monthly)
//!         .comparator("sales_predictions", ComparatorHandle::new("mean_absolute_error"))
//!         .property("owner", serde_json::json!("forecasting-team"))
//!         .configure(&registry)?;
//!
//!     // The derived data node set unions task inputs/outputs with the
//!     // additional data nodes, deduplicated by id.
//!     assert_eq!(scenario.data_node_configs().len(), 2);
//!
//!     // Serialize to the flat document shape and resolve it back.
//!     let doc = scenario.to_document();
//!     let reloaded = ScenarioConfig::from_document(doc, "monthly_forecast", &registry)?;
//!     assert_eq!(reloaded.tasks().len(), 1);
//!     assert_eq!(reloaded.frequency(), Some(Frequency::Monthly));
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod prelude;
pub mod registry;
pub mod template;
