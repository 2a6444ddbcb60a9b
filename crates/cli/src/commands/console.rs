//! One-shot console commands over the configured storage engine.
//!
//! Usage errors are reported on stdout in the console's `** ... **` form and
//! are not process failures; storage errors are.

use anyhow::Result;
use hbnb_core::{Entity, EntityKind, FieldType, fields_of};
use hbnb_storage::{Storage, StorageBackend, StorageConfig};
use serde_json::{Map, Number, Value};

const CLASS_MISSING: &str = "** class name missing **";
const CLASS_UNKNOWN: &str = "** class doesn't exist **";
const ID_MISSING: &str = "** instance id missing **";
const NOT_FOUND: &str = "** no instance found **";
const ATTRIBUTE_MISSING: &str = "** attribute name missing **";
const VALUE_MISSING: &str = "** value missing **";

/// Keys the engine assigns; ignored in console input.
const IDENTITY_KEYS: [&str; 3] = ["id", "created_at", "updated_at"];

pub(crate) struct Console {
    storage: StorageBackend,
}

/// Open the engine from the environment, run `command`, then close the engine.
pub(crate) fn run(command: impl FnOnce(&mut Console) -> Result<()>) -> Result<()> {
    let config = StorageConfig::from_env();
    let mut storage = StorageBackend::open(&config)?;
    storage.reload()?;
    let mut console = Console { storage };
    let result = command(&mut console);
    console.storage.close()?;
    result
}

/// Resolve a class argument, printing the console error when it is missing or unknown.
fn resolve_class(class: Option<&str>) -> Option<EntityKind> {
    let Some(class) = class else {
        println!("{CLASS_MISSING}");
        return None;
    };
    match class.parse() {
        Ok(kind) => Some(kind),
        Err(_) => {
            println!("{CLASS_UNKNOWN}");
            None
        },
    }
}

/// Value of a `key=value` creation parameter.
///
/// `"double quoted"` is a string with `_` read as a space and `\"` as a
/// quote; otherwise a float if it has a dot, else an integer. Anything else
/// is skipped.
fn parse_param(raw: &str) -> Option<Value> {
    if let Some(inner) = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        return Some(Value::String(inner.replace('_', " ").replace("\\\"", "\"")));
    }
    if raw.contains('.') {
        return raw.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number);
    }
    raw.parse::<i64>().ok().map(|n| Value::Number(n.into()))
}

/// Value for `update`, cast to the declared type of `key`.
fn coerce(kind: EntityKind, key: &str, raw: &str) -> Option<Value> {
    let raw = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')).unwrap_or(raw);
    match fields_of(kind).iter().find(|f| f.name == key).map(|f| f.ty) {
        Some(FieldType::Integer) => raw.parse::<i64>().ok().map(|n| Value::Number(n.into())),
        Some(FieldType::Float) => {
            raw.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number)
        },
        Some(FieldType::IdList) => None,
        Some(FieldType::Text) | None => Some(Value::String(raw.to_owned())),
    }
}

impl Console {
    fn find(&self, kind: EntityKind, id: Option<&str>) -> Result<Option<Entity>> {
        let Some(id) = id else {
            println!("{ID_MISSING}");
            return Ok(None);
        };
        let entity = self.storage.get(kind, id)?;
        if entity.is_none() {
            println!("{NOT_FOUND}");
        }
        Ok(entity)
    }

    pub(crate) fn create(&mut self, class: Option<&str>, params: &[String]) -> Result<()> {
        let Some(kind) = resolve_class(class) else { return Ok(()) };
        let mut map = Map::new();
        for param in params {
            let Some((key, raw)) = param.split_once('=') else { continue };
            if IDENTITY_KEYS.contains(&key) {
                continue;
            }
            match parse_param(raw) {
                Some(value) => {
                    map.insert(key.to_owned(), value);
                },
                None => tracing::debug!(param = %param, "skipping unparseable parameter"),
            }
        }
        let mut entity = match Entity::from_map(kind, &map, self.storage.kind()) {
            Ok(entity) => entity,
            Err(e) => {
                println!("** {e} **");
                return Ok(());
            },
        };
        self.storage.persist(&mut entity)?;
        println!("{}", entity.id());
        Ok(())
    }

    pub(crate) fn show(&mut self, class: Option<&str>, id: Option<&str>) -> Result<()> {
        let Some(kind) = resolve_class(class) else { return Ok(()) };
        if let Some(entity) = self.find(kind, id)? {
            println!("{entity}");
        }
        Ok(())
    }

    pub(crate) fn destroy(&mut self, class: Option<&str>, id: Option<&str>) -> Result<()> {
        let Some(kind) = resolve_class(class) else { return Ok(()) };
        if let Some(entity) = self.find(kind, id)? {
            self.storage.delete(Some(&entity))?;
            self.storage.save()?;
        }
        Ok(())
    }

    pub(crate) fn all(&mut self, class: Option<&str>) -> Result<()> {
        let kind = match class {
            None => None,
            Some(_) => match resolve_class(class) {
                Some(kind) => Some(kind),
                None => return Ok(()),
            },
        };
        let lines: Vec<String> =
            self.storage.all(kind)?.values().map(ToString::to_string).collect();
        println!("{}", serde_json::to_string(&lines)?);
        Ok(())
    }

    pub(crate) fn count(&mut self, class: Option<&str>) -> Result<()> {
        let kind = match class {
            None => None,
            Some(_) => match resolve_class(class) {
                Some(kind) => Some(kind),
                None => return Ok(()),
            },
        };
        println!("{}", self.storage.count(kind)?);
        Ok(())
    }

    pub(crate) fn update(
        &mut self,
        class: Option<&str>,
        id: Option<&str>,
        key: Option<&str>,
        value: Option<&str>,
    ) -> Result<()> {
        let Some(kind) = resolve_class(class) else { return Ok(()) };
        let Some(mut entity) = self.find(kind, id)? else { return Ok(()) };
        let Some(key) = key else {
            println!("{ATTRIBUTE_MISSING}");
            return Ok(());
        };
        let Some(raw) = value else {
            println!("{VALUE_MISSING}");
            return Ok(());
        };
        let Some(value) = coerce(kind, key, raw) else {
            println!("** invalid value for {key} **");
            return Ok(());
        };

        let mut changes = Map::new();
        changes.insert(key.to_owned(), value);
        entity.set_attributes(&changes, self.storage.kind())?;
        self.storage.persist(&mut entity)?;
        Ok(())
    }
}
