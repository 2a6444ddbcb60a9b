//! Generic mapping between entities and table rows.
//!
//! Every table holds `id`, `created_at`, `updated_at` followed by the
//! kind's column fields, so one SQL shape and one converter serve all six
//! kinds.

use hbnb_core::{Entity, EntityKind, StorageKind, fields_of};
use rusqlite::Row;
use rusqlite::types::{Type, Value as SqlValue};
use serde_json::{Map, Number, Value};

const BASE_COLUMNS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Column names of `kind`'s table, identity columns first.
pub(crate) fn columns(kind: EntityKind) -> Vec<&'static str> {
    BASE_COLUMNS
        .into_iter()
        .chain(fields_of(kind).iter().filter(|f| f.ty.is_column()).map(|f| f.name))
        .collect()
}

pub(crate) fn select_sql(kind: EntityKind) -> String {
    format!("SELECT {} FROM {}", columns(kind).join(", "), kind.table())
}

/// Insert, or update every column of an existing row.
///
/// An upsert rather than `INSERT OR REPLACE`: replacing deletes the old row
/// first, which would cascade to its children.
pub(crate) fn upsert_sql(kind: EntityKind) -> String {
    let cols = columns(kind);
    let placeholders: Vec<String> = (1..=cols.len()).map(|i| format!("?{i}")).collect();
    let updates: Vec<String> =
        cols.iter().skip(1).map(|col| format!("{col} = excluded.{col}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT(id) DO UPDATE SET {}",
        kind.table(),
        cols.join(", "),
        placeholders.join(", "),
        updates.join(", ")
    )
}

/// Bind values for [`upsert_sql`], in column order.
pub(crate) fn row_values(entity: &Entity) -> Vec<SqlValue> {
    let dict = entity.to_dict();
    columns(entity.kind())
        .into_iter()
        .map(|col| dict.get(col).map_or(SqlValue::Null, json_to_sql))
        .collect()
}

/// Rebuild an entity from a row produced by [`select_sql`].
pub(crate) fn entity_from_row(kind: EntityKind, row: &Row<'_>) -> rusqlite::Result<Entity> {
    let mut map = Map::new();
    for (idx, col) in columns(kind).into_iter().enumerate() {
        let value: SqlValue = row.get(idx)?;
        if let Some(json) = sql_to_json(value) {
            map.insert(col.to_owned(), json);
        }
    }
    Entity::from_map(kind, &map, StorageKind::Db)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))
}

fn json_to_sql(value: &Value) -> SqlValue {
    match value {
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map_or(SqlValue::Null, SqlValue::Real),
        },
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => SqlValue::Null,
    }
}

fn sql_to_json(value: SqlValue) -> Option<Value> {
    match value {
        SqlValue::Null => None,
        SqlValue::Integer(i) => Some(Value::Number(i.into())),
        SqlValue::Real(f) => Number::from_f64(f).map(Value::Number),
        SqlValue::Text(s) => Some(Value::String(s)),
        SqlValue::Blob(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_columns_exclude_amenity_ids() {
        let cols = columns(EntityKind::Place);
        assert_eq!(&cols[..3], &BASE_COLUMNS);
        assert!(cols.contains(&"price_by_night"));
        assert!(!cols.contains(&"amenity_ids"));
    }

    #[test]
    fn test_upsert_never_replaces() {
        let sql = upsert_sql(EntityKind::State);
        assert_eq!(
            sql,
            "INSERT INTO states (id, created_at, updated_at, name) VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT(id) DO UPDATE SET created_at = excluded.created_at, \
             updated_at = excluded.updated_at, name = excluded.name"
        );
    }

    #[test]
    fn test_unset_attributes_bind_as_null() {
        let entity = Entity::new(EntityKind::State, StorageKind::Db);
        let values = row_values(&entity);
        assert_eq!(values.len(), 4);
        assert!(matches!(values[0], SqlValue::Text(_)));
        assert_eq!(values[3], SqlValue::Null);
    }
}
