//! CLI entry point.
//!
//! # Responsibility
//! - Load a parsed GEDCOM snapshot, run the conversion and print JSON.
//! - Map flags onto `ConvertOptions`; no pipeline logic lives here.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use gedmap_core::db::open_cache_db;
use gedmap_core::{
    default_log_level, init_logging, AncestorConverter, ConvertOptions, Geocoder, OutputMode,
    PlacePolicy, SqliteGeocodeCache, StaticGeocoder,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gedmap", version, about = "Convert a parsed GEDCOM graph to JSON or GeoJSON")]
struct Args {
    /// Parsed GEDCOM snapshot (JSON).
    source: PathBuf,
    /// Emit a GeoJSON FeatureCollection instead of plain records.
    #[arg(long)]
    geojson: bool,
    /// Keep only primary names and significant events.
    #[arg(long)]
    summary: bool,
    /// Reference place policy.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
    /// Place table `{"place": [lon, lat]}` used as the geocoding backend.
    #[arg(long)]
    places: Option<PathBuf>,
    /// SQLite geocode cache file.
    #[arg(long)]
    cache: Option<PathBuf>,
    /// JSON options file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,
    /// Absolute log directory; logs go to stderr when omitted.
    #[arg(long)]
    log_dir: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    FirstPlace,
    FirstGeocoded,
    TypePriority,
}

impl From<PolicyArg> for PlacePolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::FirstPlace => PlacePolicy::FirstPlace,
            PolicyArg::FirstGeocoded => PlacePolicy::FirstGeocoded,
            PolicyArg::TypePriority => PlacePolicy::default_type_priority(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    let mut options = match &args.config {
        Some(path) => ConvertOptions::from_json_file(path)?,
        None if args.geojson => ConvertOptions::map_defaults(),
        None => ConvertOptions::default(),
    };
    if args.summary {
        options.summary = true;
    }
    if let Some(policy) = args.policy {
        options.place_policy = policy.into();
    }

    let converter = AncestorConverter::from_file(&args.source, options)
        .with_context(|| format!("cannot convert `{}`", args.source.display()))?;

    let backend = match &args.places {
        Some(path) => Some(StaticGeocoder::from_json_file(path)?),
        None => None,
    };
    let cache_conn = match &args.cache {
        Some(path) => Some(open_cache_db(path)?),
        None => None,
    };
    let cached = cache_conn
        .as_ref()
        .map(|conn| SqliteGeocodeCache::new(conn, backend.clone().unwrap_or_default()));
    let geocoder: Option<&dyn Geocoder> = match (&cached, &backend) {
        (Some(cached), _) => Some(cached as &dyn Geocoder),
        (None, Some(backend)) => Some(backend as &dyn Geocoder),
        (None, None) => None,
    };

    let mode = if args.geojson {
        OutputMode::Features
    } else {
        OutputMode::Records
    };
    println!("{}", converter.to_json(mode, geocoder)?);
    Ok(())
}
