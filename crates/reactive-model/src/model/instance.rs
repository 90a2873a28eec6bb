//! Model instances: a fixed bag of deserialized fields plus the opaque
//! store reference.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::ModelError;
use crate::value::{FieldMap, FieldValue};

use super::model_type::ModelType;
use super::store::Store;

/// Shared handle to a model instance.
pub type InstanceRef = Rc<Instance>;

/// A constructed model instance.
///
/// The field set is exactly the compiled table's key set, fixed at
/// construction; [`Instance::patch`] and [`Instance::set`] never add or
/// remove slots.
pub struct Instance {
    ty: ModelType,
    store: Store,
    fields: RefCell<FieldMap>,
}

impl Instance {
    /// Allocates an instance with no slots yet. Slots are installed by the
    /// reactive backend during [`ModelType::create`].
    pub(crate) fn bare(ty: ModelType, store: Store) -> Self {
        Self {
            ty,
            store,
            fields: RefCell::new(FieldMap::new()),
        }
    }

    pub fn ty(&self) -> &ModelType {
        &self.ty
    }

    /// The opaque context this instance was created with.
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn is_of(&self, ty: &ModelType) -> bool {
        self.ty == *ty
    }

    /// Declared field names, in schema order.
    pub fn keys(&self) -> Vec<String> {
        self.fields.borrow().keys().cloned().collect()
    }

    /// Reads a declared slot. `None` for undeclared keys (a null-valued
    /// slot reads as `Some(FieldValue::Null)`).
    pub fn get(&self, key: &str) -> Option<FieldValue> {
        self.fields.borrow().get(key).cloned()
    }

    /// Writes a declared slot directly, bypassing deserialization. Returns
    /// false (and does nothing) for undeclared keys.
    pub fn set(&self, key: &str, value: FieldValue) -> bool {
        let mut fields = self.fields.borrow_mut();
        match fields.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// A copy of the current field mapping, in schema order.
    pub fn snapshot(&self) -> FieldMap {
        self.fields.borrow().clone()
    }

    /// Installs observable slots. Called by the reactive backend exactly
    /// once per instance, with the null-seeded key set, before any payload
    /// value is applied.
    pub fn install_slots(&self, seed: FieldMap) {
        self.fields.borrow_mut().extend(seed);
    }

    /// Deserializes the given fields through the model's compiled table and
    /// applies them to the instance.
    ///
    /// Only keys present in the payload (by own-key membership; an explicit
    /// null counts as present) are staged: a present null stages a null, a
    /// present value stages its deserialized result, and absent keys leave
    /// the current value untouched. All staged entries are applied as one
    /// bulk merge after the whole table has been walked, so a failing
    /// nested deserialization leaves the instance unchanged.
    pub fn patch(&self, fields: &FieldValue) -> Result<(), ModelError> {
        let FieldValue::Object(payload) = fields else {
            // Null or any non-mapping payload carries no keys.
            return Ok(());
        };

        let deserializers = self.ty.deserializers()?;
        let mut staged: Vec<(&str, FieldValue)> = Vec::new();
        for entry in deserializers.iter() {
            let Some(raw) = payload.get(&entry.key) else {
                continue;
            };
            let value = if raw.is_null() {
                FieldValue::Null
            } else {
                (entry.deserialize)(raw, &self.store)?
            };
            staged.push((&entry.key, value));
        }

        let mut slots = self.fields.borrow_mut();
        for (key, value) in staged {
            slots.insert(key.to_string(), value);
        }
        Ok(())
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("ty", &self.ty.name())
            .field("fields", &self.fields.borrow())
            .finish()
    }
}
