//! SQLite-backed caching decorator for any geocoder.
//!
//! # Invariants
//! - Cached places are never forwarded to the inner backend.
//! - Cache misses are forwarded in one batch call.
//! - Only resolved places are stored; misses are retried on the next run.

use super::{GeocodeResult, GeocodeTable, Geocoder};
use crate::model::event::GeoCoordinate;
use log::debug;
use rusqlite::{params, Connection};
use std::collections::BTreeSet;

/// Geocoder that answers from `geocode_cache` before asking `inner`.
pub struct SqliteGeocodeCache<'conn, G: Geocoder> {
    conn: &'conn Connection,
    inner: G,
}

impl<'conn, G: Geocoder> SqliteGeocodeCache<'conn, G> {
    /// `conn` must come from `open_cache_db` or `open_cache_db_in_memory`.
    pub fn new(conn: &'conn Connection, inner: G) -> Self {
        Self { conn, inner }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Number of cached places.
    pub fn cached_len(&self) -> GeocodeResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM geocode_cache;", [], |row| row.get(0))?;
        Ok(count.max(0) as usize)
    }

    fn lookup(&self, place: &str) -> GeocodeResult<Option<GeoCoordinate>> {
        let mut stmt = self
            .conn
            .prepare("SELECT longitude, latitude FROM geocode_cache WHERE place = ?1;")?;
        let mut rows = stmt.query(params![place])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(GeoCoordinate::new(row.get(0)?, row.get(1)?)));
        }
        Ok(None)
    }

    fn store(&self, place: &str, coordinate: GeoCoordinate) -> GeocodeResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO geocode_cache (place, longitude, latitude)
             VALUES (?1, ?2, ?3);",
            params![place, coordinate.longitude, coordinate.latitude],
        )?;
        Ok(())
    }
}

impl<G: Geocoder> Geocoder for SqliteGeocodeCache<'_, G> {
    fn geocode(&self, places: &BTreeSet<String>) -> GeocodeResult<GeocodeTable> {
        let mut resolved = GeocodeTable::new();
        let mut misses = BTreeSet::new();
        for place in places {
            match self.lookup(place)? {
                Some(coordinate) => {
                    resolved.insert(place.clone(), coordinate);
                }
                None => {
                    misses.insert(place.clone());
                }
            }
        }

        let hits = resolved.len();
        if !misses.is_empty() {
            let fresh = self.inner.geocode(&misses)?;
            for (place, coordinate) in fresh {
                if !misses.contains(place.as_str()) {
                    continue;
                }
                self.store(&place, coordinate)?;
                resolved.insert(place, coordinate);
            }
        }

        debug!(
            "event=geocode_cache module=geocode status=ok requested={} hits={} misses={} resolved={}",
            places.len(),
            hits,
            misses.len(),
            resolved.len()
        );
        Ok(resolved)
    }
}
