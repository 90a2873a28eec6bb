use std::sync::{Arc, LazyLock};

use reactive_model::{FieldValue, ModelError, ModelType, Store, TypeDeclarator, S};
use serde_json::json;

fn payload(value: serde_json::Value) -> FieldValue {
    FieldValue::from(value)
}

fn store() -> Store {
    if cfg!(feature = "strict-store") {
        Store::new(())
    } else {
        Store::none()
    }
}

#[test]
fn subtype_extension_types_inherited_and_new_fields() {
    let parent = ModelType::builder("Parent").field("key1", S.num()).build();
    let child = ModelType::builder("Child")
        .extends(&parent)
        .field("key2", S.str())
        .build();

    let parent_instance = parent
        .create(&payload(json!({"key1": 20})), &store())
        .unwrap();
    let child_instance = child
        .create(&payload(json!({"key1": "10", "key2": "string"})), &store())
        .unwrap();

    assert_eq!(parent_instance.get("key1").unwrap().as_f64(), Some(20.0));
    assert_eq!(child_instance.get("key1").unwrap().as_f64(), Some(10.0));
    assert_eq!(child_instance.get("key2").unwrap().as_str(), Some("string"));
    assert!(parent_instance.get("key2").is_none());
}

#[test]
fn compiling_subtype_does_not_invalidate_parent_table() {
    let parent = ModelType::builder("Parent").field("key1", S.num()).build();
    let parent_table = parent.deserializers().unwrap();

    let child = ModelType::builder("Child")
        .extends(&parent)
        .field("key2", S.str())
        .build();
    let child_table = child.deserializers().unwrap();

    assert!(Arc::ptr_eq(&parent_table, &parent.deserializers().unwrap()));
    assert!(!Arc::ptr_eq(&parent_table, &child_table));
    assert_eq!(child_table.len(), 2);
    assert_eq!(parent_table.len(), 1);
}

#[test]
fn subtype_can_override_inherited_declarator_in_place() {
    let parent = ModelType::builder("Parent")
        .field("a", S.num())
        .field("b", S.num())
        .build();
    let child = ModelType::builder("Child")
        .extends(&parent)
        .field("a", S.str())
        .build();

    let keys: Vec<&str> = child.schema().keys().collect();
    assert_eq!(keys, vec!["a", "b"]);

    let instance = child
        .create(&payload(json!({"a": "kept-as-string"})), &store())
        .unwrap();
    assert_eq!(
        instance.get("a").unwrap().as_str(),
        Some("kept-as-string")
    );
}

#[test]
fn table_iteration_follows_declaration_order() {
    let ty = ModelType::builder("Ordered")
        .field("z", S.num())
        .field("a", S.str())
        .field("m", S.bool())
        .build();
    let table = ty.deserializers().unwrap();
    let keys: Vec<&str> = table.iter().map(|entry| entry.key.as_str()).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn repeated_compilation_returns_the_cached_table() {
    let ty = ModelType::builder("Cached").field("id", S.num()).build();
    let first = ty.deserializers().unwrap();
    let second = ty.deserializers().unwrap();
    let third = ty.clone().deserializers().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first, &third));
}

static COMMENT: LazyLock<ModelType> = LazyLock::new(|| {
    ModelType::builder("Comment")
        .field("id", S.num())
        .field("replies", S.list(S.lazy(|| COMMENT.clone())))
        .build()
});

#[test]
fn recursive_schema_via_lazy_reference() {
    let instance = COMMENT
        .create(
            &payload(json!({
                "id": 1,
                "replies": [
                    {"id": 2, "replies": [{"id": 3}]},
                    {"id": 4},
                ],
            })),
            &store(),
        )
        .unwrap();

    let replies = instance.get("replies").unwrap();
    let replies = replies.as_array().unwrap();
    assert_eq!(replies.len(), 2);
    let first = replies[0].as_model().unwrap().clone();
    assert!(first.is_of(&COMMENT));
    let nested = first.get("replies").unwrap();
    let nested = nested.as_array().unwrap();
    assert_eq!(
        nested[0].as_model().unwrap().get("id").unwrap().as_f64(),
        Some(3.0)
    );
    let second = replies[1].as_model().unwrap().clone();
    assert!(second.get("replies").unwrap().is_null());
}

#[test]
fn invalid_declarator_fails_on_first_construction() {
    let ty = ModelType::builder("Broken")
        .field("ok", S.num())
        .field("bad", TypeDeclarator::Collection(vec![]))
        .build();

    let err = ty
        .create(&payload(json!({"ok": 1})), &store())
        .unwrap_err();
    assert_eq!(
        err,
        ModelError::InvalidSchemaType {
            model: "Broken".into(),
            field: "bad".into(),
            declarator: "[]".into(),
        }
    );
}

#[test]
fn nested_sequence_declarator_is_rejected() {
    let ty = ModelType::builder("DoublyNested")
        .field("grid", S.list(S.list(S.num())))
        .build();
    let err = ty.create(&payload(json!({})), &store()).unwrap_err();
    assert!(matches!(err, ModelError::InvalidSchemaType { .. }));
}

#[test]
fn custom_model_hook_takes_precedence_over_recursive_create() {
    let hooked = ModelType::builder("Hooked")
        .field("ignored", S.num())
        .deserialize_with(|value, _| {
            Ok(FieldValue::String(format!(
                "hooked:{}",
                value.as_str().unwrap_or("?")
            )))
        })
        .build();
    let outer = ModelType::builder("Outer")
        .field("h", S.model(&hooked))
        .build();

    let instance = outer
        .create(&payload(json!({"h": "raw"})), &store())
        .unwrap();
    assert_eq!(instance.get("h").unwrap().as_str(), Some("hooked:raw"));
}
