//! Model types and instances.

pub mod instance;
pub mod model_type;
pub mod store;

pub use instance::{Instance, InstanceRef};
pub use model_type::{ModelType, ModelTypeBuilder};
pub use store::Store;
