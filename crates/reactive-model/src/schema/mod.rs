//! Schema declaration: field declarators and per-type schema mappings.

pub mod builder;
pub mod declarator;
pub mod schema;

pub use builder::{SchemaBuilder, S};
pub use declarator::{ModelTypeResolver, Primitive, TypeDeclarator};
pub use schema::Schema;
