//! Declared attribute types and their backend-dependent defaults.

use serde_json::{Number, Value};

use crate::storage_kind::StorageKind;

/// Semantic type of a declared attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    Float,
    /// Ordered list of entity ids. Not a relational column.
    IdList,
}

impl FieldType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Text => "string",
            Self::Integer => "integer",
            Self::Float => "number",
            Self::IdList => "array of strings",
        }
    }

    /// Whether the relational schema stores this field as a column.
    #[must_use]
    pub const fn is_column(&self) -> bool {
        !matches!(*self, Self::IdList)
    }
}

/// A declared attribute of an entity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

/// Conversion between a record field and its JSON dict value.
pub trait Attribute: Sized {
    const TYPE: FieldType;

    /// Value of a field the caller never set.
    fn unset(storage: StorageKind) -> Self;

    /// Whether the field exists at all under `storage`.
    fn exists_under(_storage: StorageKind) -> bool {
        true
    }

    /// Convert from a dict value; `None` on a type mismatch.
    fn from_json(value: &Value) -> Option<Self>;

    /// Convert to a dict value; `None` when unset (omitted from the dict).
    fn to_json(&self) -> Option<Value>;
}

impl Attribute for Option<String> {
    const TYPE: FieldType = FieldType::Text;

    fn unset(storage: StorageKind) -> Self {
        (!storage.is_db()).then(String::new)
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Some(s.clone())),
            Value::Null => Some(None),
            _ => None,
        }
    }

    fn to_json(&self) -> Option<Value> {
        self.as_ref().map(|s| Value::String(s.clone()))
    }
}

impl Attribute for Option<i64> {
    const TYPE: FieldType = FieldType::Integer;

    fn unset(storage: StorageKind) -> Self {
        (!storage.is_db()).then_some(0)
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Some),
            Value::Null => Some(None),
            _ => None,
        }
    }

    fn to_json(&self) -> Option<Value> {
        self.map(|n| Value::Number(n.into()))
    }
}

impl Attribute for Option<f64> {
    const TYPE: FieldType = FieldType::Float;

    fn unset(storage: StorageKind) -> Self {
        (!storage.is_db()).then_some(0.0)
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Some),
            Value::Null => Some(None),
            _ => None,
        }
    }

    fn to_json(&self) -> Option<Value> {
        self.and_then(Number::from_f64).map(Value::Number)
    }
}

impl Attribute for Option<Vec<String>> {
    const TYPE: FieldType = FieldType::IdList;

    fn unset(storage: StorageKind) -> Self {
        (!storage.is_db()).then(Vec::new)
    }

    fn exists_under(storage: StorageKind) -> bool {
        !storage.is_db()
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(ToOwned::to_owned))
                .collect::<Option<Vec<_>>>()
                .map(Some),
            Value::Null => Some(None),
            _ => None,
        }
    }

    fn to_json(&self) -> Option<Value> {
        self.as_ref()
            .map(|ids| Value::Array(ids.iter().cloned().map(Value::String).collect()))
    }
}
