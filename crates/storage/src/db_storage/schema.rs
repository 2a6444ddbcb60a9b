//! Relational schema, versioned through `PRAGMA user_version`.

use rusqlite::Connection;

use crate::error::Result;

pub(crate) const SCHEMA_VERSION: i32 = 1;

const DROP_ALL: &str = "
    DROP TABLE IF EXISTS place_amenity;
    DROP TABLE IF EXISTS reviews;
    DROP TABLE IF EXISTS places;
    DROP TABLE IF EXISTS amenities;
    DROP TABLE IF EXISTS cities;
    DROP TABLE IF EXISTS users;
    DROP TABLE IF EXISTS states;
    PRAGMA user_version = 0;
";

const V1: &str = "
    CREATE TABLE IF NOT EXISTS states (
        id TEXT PRIMARY KEY NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        email TEXT NOT NULL,
        password TEXT NOT NULL,
        first_name TEXT,
        last_name TEXT
    );

    CREATE TABLE IF NOT EXISTS cities (
        id TEXT PRIMARY KEY NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        name TEXT NOT NULL,
        state_id TEXT NOT NULL REFERENCES states(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_cities_state ON cities(state_id);

    CREATE TABLE IF NOT EXISTS amenities (
        id TEXT PRIMARY KEY NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS places (
        id TEXT PRIMARY KEY NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        city_id TEXT NOT NULL REFERENCES cities(id) ON DELETE CASCADE,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        description TEXT,
        number_rooms INTEGER DEFAULT 0,
        number_bathrooms INTEGER DEFAULT 0,
        max_guest INTEGER DEFAULT 0,
        price_by_night INTEGER DEFAULT 0,
        latitude REAL,
        longitude REAL
    );
    CREATE INDEX IF NOT EXISTS idx_places_city ON places(city_id);
    CREATE INDEX IF NOT EXISTS idx_places_user ON places(user_id);

    CREATE TABLE IF NOT EXISTS reviews (
        id TEXT PRIMARY KEY NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        place_id TEXT NOT NULL REFERENCES places(id) ON DELETE CASCADE,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        text TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_reviews_place ON reviews(place_id);

    CREATE TABLE IF NOT EXISTS place_amenity (
        place_id TEXT NOT NULL REFERENCES places(id) ON DELETE CASCADE,
        amenity_id TEXT NOT NULL REFERENCES amenities(id) ON DELETE CASCADE,
        PRIMARY KEY (place_id, amenity_id)
    );
";

/// Drop every table. Only called for the `test` environment.
pub(crate) fn drop_all(conn: &Connection) -> Result<()> {
    tracing::info!("Dropping all tables (test environment)");
    conn.execute_batch(DROP_ALL)?;
    Ok(())
}

/// Create missing tables and bump the schema version.
pub(crate) fn run_migrations(conn: &Connection) -> Result<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    tracing::info!("Database schema version: {} (target: {})", current_version, SCHEMA_VERSION);

    if current_version < 1 {
        tracing::info!("Running migration v1: catalog tables");
        conn.execute_batch(V1)?;
    }

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tracing::info!("Database schema up to date (version {})", SCHEMA_VERSION);
    Ok(())
}
