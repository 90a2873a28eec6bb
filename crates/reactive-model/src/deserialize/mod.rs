//! The deserializer factory and compiled-table registry.

pub mod factory;
pub mod parsers;
pub mod table;

use std::sync::Arc;

use crate::error::ModelError;
use crate::model::Store;
use crate::value::FieldValue;

pub use factory::{classify, has_many, has_one};
pub use table::{DeserializerEntry, DeserializerTable};

/// A compiled field deserializer: pure, synchronous
/// `(value, context) -> coerced value`.
///
/// The context (`Store`) is threaded through unmodified and never inspected
/// by the engine itself.
pub type DeserializeFn =
    Arc<dyn Fn(&FieldValue, &Store) -> Result<FieldValue, ModelError> + Send + Sync>;
