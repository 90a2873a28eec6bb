//! The compiled deserializer table and its process-wide registry.
//!
//! Compiling a schema is a pure function of that schema, so the registry
//! needs no locking discipline beyond compute-if-absent: concurrent
//! compilation of the same type can at worst duplicate equivalent work.
//! Tables live for the process lifetime; mutating a schema after its first
//! compilation does not recompile (documented limitation).

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use crate::error::ModelError;
use crate::model::ModelType;

use super::{factory, DeserializeFn};

/// One `(field name, deserializer)` pair of a compiled table.
pub struct DeserializerEntry {
    pub key: String,
    pub deserialize: DeserializeFn,
}

impl std::fmt::Debug for DeserializerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DeserializerEntry({})", self.key)
    }
}

/// Ordered deserializer table, schema-declaration order preserved.
pub type DeserializerTable = Arc<Vec<DeserializerEntry>>;

static TABLES: LazyLock<Mutex<HashMap<u64, DeserializerTable>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn tables() -> MutexGuard<'static, HashMap<u64, DeserializerTable>> {
    TABLES.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the compiled table for a model type, compiling and caching it on
/// first use.
pub(crate) fn table_for(ty: &ModelType) -> Result<DeserializerTable, ModelError> {
    if let Some(table) = tables().get(&ty.id()) {
        return Ok(table.clone());
    }
    // Compiled outside the lock; a racing equal compilation is idempotent
    // and the first insert wins.
    let table = compile(ty)?;
    Ok(tables().entry(ty.id()).or_insert(table).clone())
}

fn compile(ty: &ModelType) -> Result<DeserializerTable, ModelError> {
    let schema = ty.schema();
    let mut entries = Vec::with_capacity(schema.len());
    for (key, declarator) in schema.iter() {
        let deserialize = factory::classify(declarator).map_err(|e| e.at(ty.name(), key))?;
        entries.push(DeserializerEntry {
            key: key.to_string(),
            deserialize,
        });
    }
    Ok(Arc::new(entries))
}
