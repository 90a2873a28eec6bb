//! Declarator builder.
//!
//! Provides the shorthand used when declaring schemas:
//! `S.num()`, `S.model(&child)`, `S.list(S.model(&child))`, ...

use std::sync::Arc;

use crate::deserialize::DeserializeFn;
use crate::error::ModelError;
use crate::model::{ModelType, Store};
use crate::value::FieldValue;

use super::declarator::{Primitive, TypeDeclarator};

/// Builder for schema field declarators.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaBuilder;

impl SchemaBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn str(&self) -> TypeDeclarator {
        TypeDeclarator::Primitive(Primitive::String)
    }

    pub fn bool(&self) -> TypeDeclarator {
        TypeDeclarator::Primitive(Primitive::Boolean)
    }

    pub fn num(&self) -> TypeDeclarator {
        TypeDeclarator::Primitive(Primitive::Number)
    }

    pub fn date(&self) -> TypeDeclarator {
        TypeDeclarator::Primitive(Primitive::Date)
    }

    /// Raw object passthrough (the structure is kept unchanged).
    pub fn obj(&self) -> TypeDeclarator {
        TypeDeclarator::Primitive(Primitive::Object)
    }

    /// Raw array passthrough. For typed collections, see [`Self::list`].
    pub fn arr(&self) -> TypeDeclarator {
        TypeDeclarator::Primitive(Primitive::Array)
    }

    /// A nested model type.
    pub fn model(&self, ty: &ModelType) -> TypeDeclarator {
        TypeDeclarator::Model(ty.clone())
    }

    /// A collection of `element` — the schema-syntax sequence `[X]`.
    pub fn list(&self, element: TypeDeclarator) -> TypeDeclarator {
        TypeDeclarator::Collection(vec![element])
    }

    /// A pre-built deserializer, used as-is by the compiler.
    pub fn custom<F>(&self, deserialize: F) -> TypeDeclarator
    where
        F: Fn(&FieldValue, &Store) -> Result<FieldValue, ModelError> + Send + Sync + 'static,
    {
        TypeDeclarator::Custom(Arc::new(deserialize) as DeserializeFn)
    }

    /// A deferred model-type reference, for recursive schemas.
    pub fn lazy<F>(&self, resolve: F) -> TypeDeclarator
    where
        F: Fn() -> ModelType + Send + Sync + 'static,
    {
        TypeDeclarator::Lazy(Arc::new(resolve))
    }
}

/// Global default declarator builder.
pub static S: SchemaBuilder = SchemaBuilder;
