//! Dynamic field access on entities
//!
//! The engine reads fields by string name. Entities expose themselves as a
//! lookup from field name to `serde_json::Value`; typed field names only
//! exist on the caller side.

use std::borrow::Cow;

use serde_json::Value;

/// An item a data source can hold
pub trait Entity: Clone + Send + Sync {
    /// Unique identifier within its collection
    fn id(&self) -> &str;

    /// Read a field by name. `None` means the field is absent, which the
    /// engine treats the same as `null`.
    fn field(&self, name: &str) -> Option<Cow<'_, Value>>;
}

/// JSON objects are entities keyed by their `"id"` string.
/// A missing or non-string id reads as the empty string.
impl Entity for Value {
    fn id(&self) -> &str {
        self.get("id").and_then(Value::as_str).unwrap_or("")
    }

    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.get(name).map(Cow::Borrowed)
    }
}

/// Read a field, mapping absence to `null`
pub(crate) fn read_field<'a, T: Entity>(item: &'a T, name: &str) -> Cow<'a, Value> {
    item.field(name).unwrap_or(Cow::Owned(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_entity() {
        let doc = json!({"id": "u1", "name": "Alice"});
        assert_eq!(doc.id(), "u1");
        assert_eq!(doc.field("name").as_deref(), Some(&json!("Alice")));
        assert!(doc.field("age").is_none());
        assert_eq!(*read_field(&doc, "age"), Value::Null);
    }

    #[test]
    fn test_numeric_id_reads_empty() {
        let doc = json!({"id": 7});
        assert_eq!(doc.id(), "");
    }
}
