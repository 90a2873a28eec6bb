//! `ModelType` — a named, schema-bearing model type handle.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::deserialize::{table, DeserializeFn, DeserializerTable};
use crate::error::ModelError;
use crate::reactive;
use crate::schema::{Schema, TypeDeclarator};
use crate::value::{FieldMap, FieldValue};

use super::instance::{Instance, InstanceRef};
use super::store::Store;

static NEXT_TYPE_ID: AtomicU64 = AtomicU64::new(1);

struct TypeDef {
    id: u64,
    name: String,
    schema: Schema,
    deserialize: Option<DeserializeFn>,
}

/// Cheap-clone handle to a model type definition.
///
/// The id is the stable type identifier keying the compiled-table registry;
/// two handles are equal iff they point at the same definition, so two
/// independently built types with identical schemas stay distinct.
#[derive(Clone)]
pub struct ModelType {
    def: Arc<TypeDef>,
}

impl ModelType {
    pub fn builder(name: impl Into<String>) -> ModelTypeBuilder {
        ModelTypeBuilder {
            name: name.into(),
            schema: Schema::new(),
            deserialize: None,
        }
    }

    /// Stable per-type identifier.
    pub fn id(&self) -> u64 {
        self.def.id
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn schema(&self) -> &Schema {
        &self.def.schema
    }

    /// The type's custom deserialize hook, if it declares one.
    pub(crate) fn deserialize_hook(&self) -> Option<&DeserializeFn> {
        self.def.deserialize.as_ref()
    }

    /// The compiled deserializer table, compiled on first use and cached
    /// for the process lifetime.
    pub fn deserializers(&self) -> Result<DeserializerTable, ModelError> {
        table::table_for(self)
    }

    /// Constructs an instance from a raw payload.
    ///
    /// Every declared field is installed as an observable slot seeded to
    /// null before any payload value is applied, so an observer attached
    /// during construction sees the complete, stable key set from the
    /// start. The payload is then applied through [`Instance::patch`].
    pub fn create(&self, fields: &FieldValue, store: &Store) -> Result<InstanceRef, ModelError> {
        #[cfg(feature = "strict-store")]
        if store.is_none() {
            return Err(ModelError::MissingStore(self.name().to_string()));
        }

        let deserializers = self.deserializers()?;
        let instance = Rc::new(Instance::bare(self.clone(), store.clone()));
        let seed: FieldMap = deserializers
            .iter()
            .map(|entry| (entry.key.clone(), FieldValue::Null))
            .collect();
        reactive::extend_observable(&instance, seed);
        instance.patch(fields)?;
        Ok(instance)
    }

    /// Wraps an array of raw payloads into one instance per element, order
    /// preserved. Returns `None` if the input is not a list.
    pub fn from_array(
        &self,
        values: &FieldValue,
        store: &Store,
    ) -> Result<Option<Vec<InstanceRef>>, ModelError> {
        let FieldValue::Array(items) = values else {
            return Ok(None);
        };
        let mut instances = Vec::with_capacity(items.len());
        for item in items {
            instances.push(self.create(item, store)?);
        }
        Ok(Some(instances))
    }
}

impl PartialEq for ModelType {
    fn eq(&self, other: &Self) -> bool {
        self.def.id == other.def.id
    }
}

impl Eq for ModelType {}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelType({}#{})", self.def.name, self.def.id)
    }
}

/// Builder for model type definitions.
pub struct ModelTypeBuilder {
    name: String,
    schema: Schema,
    deserialize: Option<DeserializeFn>,
}

impl ModelTypeBuilder {
    /// Copies the parent's schema entries into this type, in order, before
    /// any fields declared afterwards. The parent definition and its cached
    /// table are never touched.
    pub fn extends(mut self, parent: &ModelType) -> Self {
        self.schema.spread(parent.schema());
        self
    }

    /// Declares a field. Re-declaring an inherited key replaces its
    /// declarator in place.
    pub fn field(mut self, key: impl Into<String>, declarator: TypeDeclarator) -> Self {
        self.schema.declare(key, declarator);
        self
    }

    /// Opts this type into custom deserialization: fields declared with
    /// this type are produced by `deserialize` instead of recursive
    /// construction.
    pub fn deserialize_with<F>(mut self, deserialize: F) -> Self
    where
        F: Fn(&FieldValue, &Store) -> Result<FieldValue, ModelError> + Send + Sync + 'static,
    {
        self.deserialize = Some(Arc::new(deserialize) as DeserializeFn);
        self
    }

    pub fn build(self) -> ModelType {
        ModelType {
            def: Arc::new(TypeDef {
                id: NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed),
                name: self.name,
                schema: self.schema,
                deserialize: self.deserialize,
            }),
        }
    }
}
