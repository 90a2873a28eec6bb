//! `TypeDeclarator` — the closed union of schema field declarations.
//!
//! Each schema entry declares how its raw value is interpreted. The
//! historical engine probed declarators at runtime (built-in constructor
//! identity, duck-typed hooks, marker flags on functions); here the same
//! closed set is expressed as explicit variants, resolved once by exhaustive
//! matching at schema-compile time.

use std::fmt;
use std::sync::Arc;

use crate::deserialize::DeserializeFn;
use crate::model::ModelType;

/// Resolver for a model type that is not yet constructible at schema
/// declaration time (self-referential or mutually recursive schemas).
pub type ModelTypeResolver = Arc<dyn Fn() -> ModelType + Send + Sync>;

/// Primitive coercion kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Boolean,
    Number,
    Date,
    Object,
    Array,
}

impl Primitive {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Date => "date",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

/// A single schema field declaration.
#[derive(Clone)]
pub enum TypeDeclarator {
    /// One of the six primitive coercions.
    Primitive(Primitive),
    /// A nested model type. A handle whose definition carries a custom
    /// deserialize hook is classified through that hook; otherwise the
    /// field recursively constructs an instance of the type.
    Model(ModelType),
    /// The schema-syntax sequence `[X]`. Must hold exactly one element;
    /// empty and multi-element sequences fail classification.
    Collection(Vec<TypeDeclarator>),
    /// A pre-built deserializer, used as-is. Explicit opt-out of
    /// classification; schema composition threads these entries through
    /// untouched.
    Custom(DeserializeFn),
    /// A deferred model-type lookup, resolved at compile time. Lets a
    /// schema reference a type that cannot exist yet while the schema is
    /// being declared.
    Lazy(ModelTypeResolver),
}

impl TypeDeclarator {
    /// Returns the "kind" string identifier for this declarator.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Primitive(kind) => kind.as_str(),
            Self::Model(_) => "model",
            Self::Collection(_) => "collection",
            Self::Custom(_) => "custom",
            Self::Lazy(_) => "lazy",
        }
    }

    /// Human-readable description, used to name the offending declarator in
    /// `InvalidSchemaType` errors.
    pub fn describe(&self) -> String {
        match self {
            Self::Primitive(kind) => kind.as_str().to_string(),
            Self::Model(ty) => ty.name().to_string(),
            Self::Collection(seq) => {
                let inner: Vec<String> = seq.iter().map(Self::describe).collect();
                format!("[{}]", inner.join(", "))
            }
            Self::Custom(_) => "custom deserializer".to_string(),
            Self::Lazy(_) => "lazy model".to_string(),
        }
    }
}

impl fmt::Debug for TypeDeclarator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDeclarator({})", self.describe())
    }
}

impl fmt::Display for TypeDeclarator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
