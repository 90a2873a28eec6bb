//! Engine error taxonomy.
//!
//! Only schema-authoring mistakes raise errors; payload-shape mismatches
//! degrade in place (null, NaN) and never surface here.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A schema entry could not be classified into a deserialization
    /// strategy. Raised synchronously the first time the entry is compiled.
    #[error("invalid schema type `{declarator}` for `{model}.{field}`")]
    InvalidSchemaType {
        model: String,
        field: String,
        declarator: String,
    },
    /// A model was constructed without a store, in builds that mandate one
    /// (`strict-store` feature).
    #[error("model `{0}` constructed without a store")]
    MissingStore(String),
}

impl ModelError {
    /// Attaches the owning model and field name to a classification error.
    ///
    /// `has_one`/`has_many` build errors without location context; the
    /// schema compiler fills it in here.
    pub(crate) fn at(self, model: &str, field: &str) -> Self {
        match self {
            Self::InvalidSchemaType { declarator, .. } => Self::InvalidSchemaType {
                model: model.to_string(),
                field: field.to_string(),
                declarator,
            },
            other => other,
        }
    }
}
