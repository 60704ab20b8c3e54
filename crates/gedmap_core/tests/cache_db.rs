use gedmap_core::db::migrations::latest_version;
use gedmap_core::db::{open_cache_db, open_cache_db_in_memory, DbError};
use gedmap_core::{GeoCoordinate, Geocoder, SqliteGeocodeCache, StaticGeocoder};
use rusqlite::Connection;
use std::collections::BTreeSet;

#[test]
fn open_cache_db_in_memory_applies_all_migrations() {
    let conn = open_cache_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "geocode_cache");
}

#[test]
fn opening_same_cache_twice_is_idempotent_and_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geocode.db");
    let places: BTreeSet<String> = ["Springfield".to_string()].into_iter().collect();

    let conn_first = open_cache_db(&path).unwrap();
    let backend =
        StaticGeocoder::new().with_place("Springfield", GeoCoordinate::new(-89.65, 39.78));
    SqliteGeocodeCache::new(&conn_first, backend)
        .geocode(&places)
        .unwrap();
    drop(conn_first);

    let conn_second = open_cache_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());

    // An empty backend proves the answer comes from disk.
    let cache = SqliteGeocodeCache::new(&conn_second, StaticGeocoder::new());
    assert_eq!(cache.cached_len().unwrap(), 1);
    let table = cache.geocode(&places).unwrap();
    assert_eq!(
        table.get("Springfield"),
        Some(&GeoCoordinate::new(-89.65, 39.78))
    );
}

#[test]
fn opening_cache_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_cache_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
