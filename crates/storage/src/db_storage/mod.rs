//! SQLite backend.
//!
//! Each entity kind maps to one table; place/amenity links live in the
//! `place_amenity` join table. Changes are collected in a session and
//! flushed by `save` in a single transaction, so a failed save leaves both
//! the database and the pending set untouched.

mod rows;
mod schema;
mod session;

use std::path::Path;

use hbnb_core::{DB_BUSY_TIMEOUT_MS, DB_POOL_MAX_CONNECTIONS, Entity, EntityKind, StorageKind};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OptionalExtension as _, params, params_from_iter};

use crate::config::HbnbEnv;
use crate::error::{Result, StorageError};
use crate::traits::{Index, Storage};
use session::{LinkOp, Session};

type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Log row read errors and filter them out.
fn log_row_error<T>(result: rusqlite::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        },
    }
}

fn init_connection(conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
    conn.execute_batch(&format!(
        "PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = {DB_BUSY_TIMEOUT_MS};"
    ))?;
    Ok(())
}

/// Relational storage over a pooled SQLite database.
#[derive(Debug)]
pub struct DbStorage {
    pool: Pool<SqliteConnectionManager>,
    /// Set by `reload`; every data operation before that is a usage error.
    schema_ready: bool,
    session: Session,
}

impl DbStorage {
    /// Open (creating if needed) the database at `db_path`.
    ///
    /// Under [`HbnbEnv::Test`] every table is dropped here; tables are
    /// (re)created by [`Storage::reload`].
    ///
    /// # Errors
    /// Returns an error if the pool cannot be built or the reset fails.
    pub fn new(db_path: &Path, env: HbnbEnv) -> Result<Self> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool = Pool::builder().max_size(DB_POOL_MAX_CONNECTIONS).build(manager)?;

        if env.allows_reset() {
            let conn = pool.get()?;
            schema::drop_all(&conn)?;
        }

        tracing::info!(
            pool_size = DB_POOL_MAX_CONNECTIONS,
            env = %env,
            "Database storage initialized at {}",
            db_path.display()
        );
        Ok(Self { pool, schema_ready: false, session: Session::default() })
    }

    fn get_conn(&self) -> Result<PooledConn> {
        self.require_schema()?;
        Ok(self.pool.get()?)
    }

    fn require_schema(&self) -> Result<()> {
        if self.schema_ready {
            Ok(())
        } else {
            Err(StorageError::InvalidUsage("database storage used before reload".to_owned()))
        }
    }

    fn read_table(conn: &Connection, kind: EntityKind, rows: &mut Index) -> Result<()> {
        let mut stmt = conn.prepare(&rows::select_sql(kind))?;
        let entities = stmt.query_map([], |row| rows::entity_from_row(kind, row))?;
        for entity in entities.filter_map(log_row_error) {
            rows.insert(entity.key(), entity);
        }
        Ok(())
    }

    /// Amenity ids linked to `place_id`, committed rows then session changes.
    fn linked_ids(&self, place_id: &str) -> Result<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT amenity_id FROM place_amenity WHERE place_id = ?1 ORDER BY rowid",
        )?;
        let mut ids: Vec<String> = stmt
            .query_map(params![place_id], |row| row.get(0))?
            .filter_map(log_row_error)
            .collect();
        self.session.apply_links(place_id, &mut ids);
        Ok(ids)
    }

    /// Upserts parents first, then link changes, then deletions children
    /// first. Rows that reference a deleted row are removed by the cascade.
    fn flush(conn: &mut Connection, session: &Session, staged: &[Entity]) -> Result<()> {
        let tx = conn.transaction()?;

        for kind in EntityKind::ALL {
            let sql = rows::upsert_sql(kind);
            for entity in staged.iter().filter(|e| e.kind() == kind) {
                tx.execute(&sql, params_from_iter(rows::row_values(entity)))?;
            }
        }

        for op in &session.links {
            match op {
                LinkOp::Link { place_id, amenity_id } => tx.execute(
                    "INSERT OR IGNORE INTO place_amenity (place_id, amenity_id) VALUES (?1, ?2)",
                    params![place_id, amenity_id],
                )?,
                LinkOp::Unlink { place_id, amenity_id } => tx.execute(
                    "DELETE FROM place_amenity WHERE place_id = ?1 AND amenity_id = ?2",
                    params![place_id, amenity_id],
                )?,
            };
        }

        for kind in EntityKind::ALL.into_iter().rev() {
            let sql = format!("DELETE FROM {} WHERE id = ?1", kind.table());
            for (_, id) in session.deleted.values().filter(|(k, _)| *k == kind) {
                tx.execute(&sql, params![id])?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}

impl Storage for DbStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Db
    }

    fn all(&self, kind: Option<EntityKind>) -> Result<Index> {
        let conn = self.get_conn()?;
        let mut rows = Index::new();
        match kind {
            Some(kind) => Self::read_table(&conn, kind, &mut rows)?,
            None => {
                for kind in EntityKind::ALL {
                    Self::read_table(&conn, kind, &mut rows)?;
                }
            },
        }
        self.session.overlay(kind, &mut rows);
        Ok(rows)
    }

    fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>> {
        let conn = self.get_conn()?;
        let key = kind.key(id);
        if self.session.deleted.contains_key(&key) {
            return Ok(None);
        }
        if let Some(entity) = self.session.pending.get(&key) {
            return Ok(Some(entity.clone()));
        }
        let sql = format!("{} WHERE id = ?1", rows::select_sql(kind));
        match conn.query_row(&sql, params![id], |row| rows::entity_from_row(kind, row)).optional() {
            Ok(entity) => Ok(entity),
            Err(e @ rusqlite::Error::FromSqlConversionFailure(..)) => Ok(log_row_error(Err(e))),
            Err(e) => Err(e.into()),
        }
    }

    fn new(&mut self, entity: Entity) -> Result<()> {
        self.require_schema()?;
        self.session.register(entity);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let mut conn = self.get_conn()?;
        let staged: Vec<Entity> = self
            .session
            .pending
            .values()
            .map(|entity| {
                let mut entity = entity.clone();
                entity.base_mut().touch();
                entity
            })
            .collect();

        Self::flush(&mut conn, &self.session, &staged)?;
        tracing::debug!(
            upserted = staged.len(),
            deleted = self.session.deleted.len(),
            links = self.session.links.len(),
            "Session committed"
        );
        self.session = Session::default();
        Ok(())
    }

    fn delete(&mut self, entity: Option<&Entity>) -> Result<()> {
        self.require_schema()?;
        if let Some(entity) = entity {
            self.session.remove(entity);
        }
        Ok(())
    }

    fn count(&self, kind: Option<EntityKind>) -> Result<usize> {
        if !self.session.is_empty() {
            return Ok(self.all(kind)?.len());
        }
        let conn = self.get_conn()?;
        let kinds = kind.map_or_else(|| EntityKind::ALL.to_vec(), |k| vec![k]);
        let mut total = 0_usize;
        for kind in kinds {
            let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
            let n: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
            total = total.saturating_add(usize::try_from(n).unwrap_or_default());
        }
        Ok(total)
    }

    fn reload(&mut self) -> Result<()> {
        let conn = self.pool.get()?;
        schema::run_migrations(&conn)?;
        self.schema_ready = true;
        self.session = Session::default();
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if !self.session.is_empty() {
            tracing::debug!("Discarding unsaved session changes");
        }
        self.session = Session::default();
        Ok(())
    }

    fn place_amenities(&self, place_id: &str) -> Result<Vec<Entity>> {
        let mut amenities = Vec::new();
        for id in self.linked_ids(place_id)? {
            if let Some(amenity) = self.get(EntityKind::Amenity, &id)? {
                amenities.push(amenity);
            }
        }
        Ok(amenities)
    }

    fn link_amenity(&mut self, place_id: &str, amenity_id: &str) -> Result<bool> {
        let Some(place) = self.get(EntityKind::Place, place_id)? else { return Ok(false) };
        if self.get(EntityKind::Amenity, amenity_id)?.is_none() {
            return Ok(false);
        }
        if self.linked_ids(place_id)?.iter().any(|id| id == amenity_id) {
            return Ok(false);
        }
        self.session.links.push(LinkOp::Link {
            place_id: place_id.to_owned(),
            amenity_id: amenity_id.to_owned(),
        });
        self.session.register(place);
        Ok(true)
    }

    fn unlink_amenity(&mut self, place_id: &str, amenity_id: &str) -> Result<bool> {
        if !self.linked_ids(place_id)?.iter().any(|id| id == amenity_id) {
            return Ok(false);
        }
        self.session.links.push(LinkOp::Unlink {
            place_id: place_id.to_owned(),
            amenity_id: amenity_id.to_owned(),
        });
        if let Some(place) = self.get(EntityKind::Place, place_id)? {
            self.session.register(place);
        }
        Ok(true)
    }
}
