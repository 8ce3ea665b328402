pub mod comparator;
pub mod data_node;
pub mod frequency;
pub mod id;
pub mod pipeline;
pub mod properties;
pub mod scenario;
pub mod task;

pub use comparator::*;
pub use data_node::*;
pub use frequency::*;
pub use id::*;
pub use pipeline::*;
pub use properties::*;
pub use scenario::*;
pub use task::*;
