//! The value union flowing through the engine.

pub mod field_value;

pub use field_value::{FieldMap, FieldValue};
