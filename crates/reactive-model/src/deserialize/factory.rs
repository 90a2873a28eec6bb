//! Declarator classification and the `has_one`/`has_many` builders.

use std::sync::Arc;

use crate::error::ModelError;
use crate::model::ModelType;
use crate::schema::TypeDeclarator;
use crate::value::FieldValue;

use super::{parsers, DeserializeFn};

/// Resolves one schema entry into its deserializer.
///
/// Precedence (declarators lower in the list never shadow ones above):
/// 1. a pre-built deserializer is used as-is;
/// 2. a single-element sequence becomes a collection of its element;
/// 3. anything else is a single-valued field, see [`has_one`].
pub fn classify(declarator: &TypeDeclarator) -> Result<DeserializeFn, ModelError> {
    match declarator {
        TypeDeclarator::Custom(deserialize) => Ok(deserialize.clone()),
        TypeDeclarator::Collection(seq) => match seq.as_slice() {
            [element] => has_many(element),
            _ => Err(invalid(declarator)),
        },
        other => has_one(other),
    }
}

/// Builds the single-value deserializer for a declarator.
///
/// Nested sequences are not classifiable here; `[[X]]` (or an empty `[]`
/// reaching this point through [`has_many`]) is a schema-authoring error.
pub fn has_one(declarator: &TypeDeclarator) -> Result<DeserializeFn, ModelError> {
    match declarator {
        TypeDeclarator::Primitive(kind) => Ok(parsers::primitive(*kind)),
        TypeDeclarator::Model(ty) => Ok(model_deserializer(ty.clone())),
        TypeDeclarator::Lazy(resolve) => Ok(model_deserializer(resolve())),
        TypeDeclarator::Custom(deserialize) => Ok(deserialize.clone()),
        TypeDeclarator::Collection(_) => Err(invalid(declarator)),
    }
}

/// Builds the collection deserializer for an element declarator.
///
/// Non-list input coerces to null with no per-element attempt. List input
/// maps every element through the element deserializer, preserving order;
/// the input is never mutated.
pub fn has_many(element: &TypeDeclarator) -> Result<DeserializeFn, ModelError> {
    let deserialize = has_one(element)?;
    Ok(Arc::new(move |values, store| match values {
        FieldValue::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(if item.is_null() {
                    FieldValue::Null
                } else {
                    deserialize(item, store)?
                });
            }
            Ok(FieldValue::Array(out))
        }
        _ => Ok(FieldValue::Null),
    }))
}

/// Deserializer for a nested model type.
///
/// A type with a custom deserialize hook delegates to the hook; otherwise
/// the value is re-wrapped by identity when it is already an instance of
/// the exact type, and constructed recursively when it is not.
fn model_deserializer(ty: ModelType) -> DeserializeFn {
    if let Some(hook) = ty.deserialize_hook() {
        let hook = hook.clone();
        return Arc::new(move |value, store| {
            if value.is_null() {
                Ok(FieldValue::Null)
            } else {
                hook(value, store)
            }
        });
    }
    Arc::new(move |value, store| {
        if value.is_null() {
            return Ok(FieldValue::Null);
        }
        if let FieldValue::Model(instance) = value {
            if instance.is_of(&ty) {
                return Ok(value.clone());
            }
        }
        ty.create(value, store).map(FieldValue::Model)
    })
}

fn invalid(declarator: &TypeDeclarator) -> ModelError {
    ModelError::InvalidSchemaType {
        model: String::new(),
        field: String::new(),
        declarator: declarator.describe(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Store;
    use crate::schema::S;
    use serde_json::json;

    fn store() -> Store {
        if cfg!(feature = "strict-store") {
            Store::new(())
        } else {
            Store::none()
        }
    }

    #[test]
    fn classify_custom_is_used_as_is() {
        let declarator = S.custom(|_, _| Ok(FieldValue::String("fixed".into())));
        let deserialize = classify(&declarator).unwrap();
        assert_eq!(
            deserialize(&FieldValue::Number(1.0), &store()).unwrap(),
            FieldValue::String("fixed".into())
        );
    }

    #[test]
    fn classify_empty_collection_fails() {
        let err = classify(&TypeDeclarator::Collection(vec![])).err().unwrap();
        assert!(matches!(err, ModelError::InvalidSchemaType { .. }));
    }

    #[test]
    fn classify_multi_element_collection_fails() {
        let declarator = TypeDeclarator::Collection(vec![S.num(), S.str()]);
        let err = classify(&declarator).err().unwrap();
        match err {
            ModelError::InvalidSchemaType { declarator, .. } => {
                assert_eq!(declarator, "[number, string]");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn has_one_rejects_nested_collection() {
        let err = has_one(&S.list(S.num())).err().unwrap();
        assert!(matches!(err, ModelError::InvalidSchemaType { .. }));
    }

    #[test]
    fn has_many_on_non_list_returns_null() {
        let deserialize = has_many(&S.num()).unwrap();
        let raw = FieldValue::from(json!({"not": "a list"}));
        assert_eq!(deserialize(&raw, &store()).unwrap(), FieldValue::Null);
        assert_eq!(
            deserialize(&FieldValue::Number(7.0), &store()).unwrap(),
            FieldValue::Null
        );
    }

    #[test]
    fn has_many_maps_elements_in_order() {
        let deserialize = has_many(&S.num()).unwrap();
        let raw = FieldValue::from(json!(["1", "2", "3"]));
        assert_eq!(
            deserialize(&raw, &store()).unwrap(),
            FieldValue::Array(vec![
                FieldValue::Number(1.0),
                FieldValue::Number(2.0),
                FieldValue::Number(3.0),
            ])
        );
    }

    #[test]
    fn has_many_short_circuits_null_elements() {
        let deserialize = has_many(&S.bool()).unwrap();
        let raw = FieldValue::from(json!([1, null, 0]));
        assert_eq!(
            deserialize(&raw, &store()).unwrap(),
            FieldValue::Array(vec![
                FieldValue::Bool(true),
                FieldValue::Null,
                FieldValue::Bool(false),
            ])
        );
    }

    #[test]
    fn has_one_model_rewraps_by_identity() {
        let ty = ModelType::builder("M").field("id", S.num()).build();
        let deserialize = has_one(&S.model(&ty)).unwrap();

        let instance = ty
            .create(&FieldValue::from(json!({"id": 1})), &store())
            .unwrap();
        let wrapped = FieldValue::Model(instance.clone());
        let out = deserialize(&wrapped, &store()).unwrap();
        assert!(std::rc::Rc::ptr_eq(out.as_model().unwrap(), &instance));
    }

    #[test]
    fn has_one_model_constructs_from_raw() {
        let ty = ModelType::builder("M").field("id", S.num()).build();
        let deserialize = has_one(&S.model(&ty)).unwrap();
        let out = deserialize(&FieldValue::from(json!({"id": "100"})), &store()).unwrap();
        let instance = out.as_model().unwrap();
        assert!(instance.is_of(&ty));
        assert_eq!(instance.get("id").unwrap().as_f64(), Some(100.0));
    }

    #[test]
    fn model_hook_receives_value_and_store() {
        let ty = ModelType::builder("Hooked")
            .deserialize_with(|value, _store| {
                Ok(FieldValue::Number(parsers::to_number(value) * 2.0))
            })
            .build();
        let deserialize = has_one(&S.model(&ty)).unwrap();
        assert_eq!(
            deserialize(&"21".into(), &store()).unwrap(),
            FieldValue::Number(42.0)
        );
    }

    #[test]
    fn model_hook_short_circuits_null() {
        let ty = ModelType::builder("Hooked")
            .deserialize_with(|_, _| Ok(FieldValue::Bool(true)))
            .build();
        let deserialize = has_one(&S.model(&ty)).unwrap();
        assert_eq!(
            deserialize(&FieldValue::Null, &store()).unwrap(),
            FieldValue::Null
        );
    }

    #[test]
    fn lazy_resolves_to_model() {
        let ty = ModelType::builder("Late").field("id", S.num()).build();
        let handle = ty.clone();
        let deserialize = has_one(&S.lazy(move || handle.clone())).unwrap();
        let out = deserialize(&FieldValue::from(json!({"id": 5})), &store()).unwrap();
        assert!(out.as_model().unwrap().is_of(&ty));
    }
}
