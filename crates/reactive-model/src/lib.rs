//! Schema-driven deserialization of JSON-shaped payloads into typed,
//! reactively-observable model instances.
//!
//! Each model type declares a schema mapping field names to type
//! declarators. The schema compiles once into an ordered deserializer
//! table (cached for the process lifetime); every construction and patch
//! walks that table, coercing primitives, recursively instantiating nested
//! model types and collections, and re-wrapping already-typed values by
//! identity. Payload-shape mismatches degrade in place (null, NaN) rather
//! than raising; only schema-authoring mistakes are errors.
//!
//! ```
//! use reactive_model::{FieldValue, ModelType, Store, S};
//! use serde_json::json;
//!
//! let child = ModelType::builder("Child").field("id", S.num()).build();
//! let parent = ModelType::builder("Parent")
//!     .field("name", S.str())
//!     .field("children", S.list(S.model(&child)))
//!     .build();
//!
//! let payload = FieldValue::from(json!({
//!     "name": "root",
//!     "children": [{ "id": "100" }, { "id": "101" }],
//! }));
//! let store = Store::none();
//! # let store = if cfg!(feature = "strict-store") { Store::new(()) } else { store };
//! let instance = parent.create(&payload, &store).unwrap();
//!
//! assert_eq!(instance.get("name").unwrap().as_str(), Some("root"));
//! let children = instance.get("children").unwrap();
//! assert_eq!(children.as_array().unwrap().len(), 2);
//! ```

pub mod deserialize;
pub mod error;
pub mod model;
pub mod reactive;
pub mod schema;
pub mod value;

pub use deserialize::{
    classify, has_many, has_one, DeserializeFn, DeserializerEntry, DeserializerTable,
};
pub use error::ModelError;
pub use model::{Instance, InstanceRef, ModelType, ModelTypeBuilder, Store};
pub use reactive::{Inert, Reactive};
pub use schema::{ModelTypeResolver, Primitive, Schema, SchemaBuilder, TypeDeclarator, S};
pub use value::{FieldMap, FieldValue};
