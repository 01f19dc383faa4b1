//! Site-metadata ingestion and the memoizing loader in front of it.

use crate::sites::error::MetadataLoadError;
use crate::sites::table::{SiteTable, COL_ID_SITE, COL_LATITUDE, COL_LONGITUDE, COL_YEAR};
use log::{info, warn};
use polars::prelude::*;
use std::collections::{hash_map::Entry, HashMap};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Metadata file consulted when no explicit path is configured.
pub const DEFAULT_METADATA_PATH: &str = "metadata_site_ikro.csv";

/// Loads and normalizes site metadata from an in-memory buffer.
pub fn load_site_metadata(bytes: &[u8]) -> Result<SiteTable, MetadataLoadError> {
    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(MetadataLoadError::CsvParse)?;
    normalize(raw)
}

/// Loads and normalizes site metadata from disk.
pub fn load_site_metadata_path(path: &Path) -> Result<SiteTable, MetadataLoadError> {
    info!("Loading site metadata from {:?}", path);
    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| MetadataLoadError::FileRead(path.to_path_buf(), e))?
        .finish()
        .map_err(MetadataLoadError::CsvParse)?;
    normalize(raw)
}

/// Coerces the numeric columns and drops rows that cannot be placed on a map.
///
/// `latitude`, `longitude`, `id_site` and `th_pengadaan` become `Float64`
/// with unparseable cells turning null; rows with a null coordinate are
/// removed. Text columns pass through untouched.
fn normalize(raw: DataFrame) -> Result<SiteTable, MetadataLoadError> {
    for column in [COL_LATITUDE, COL_LONGITUDE, COL_ID_SITE, COL_YEAR] {
        if raw.column(column).is_err() {
            return Err(MetadataLoadError::MissingColumn(column.to_string()));
        }
    }
    let raw_rows = raw.height();

    let numeric_casts: Vec<Expr> = [COL_LATITUDE, COL_LONGITUDE, COL_ID_SITE, COL_YEAR]
        .iter()
        .map(|name| col(*name).cast(DataType::Float64))
        .collect();

    let frame = raw
        .lazy()
        .with_columns(numeric_casts)
        .filter(
            col(COL_LATITUDE)
                .is_not_null()
                .and(col(COL_LONGITUDE).is_not_null()),
        )
        .collect()?;

    let dropped = raw_rows - frame.height();
    if dropped > 0 {
        warn!(
            "Dropped {} of {} metadata rows without usable coordinates",
            dropped, raw_rows
        );
    }
    info!("Site metadata ready: {} sites", frame.height());

    Ok(SiteTable::new(frame))
}

/// Memoizing wrapper around [`load_site_metadata_path`].
///
/// The registry file changes rarely, so each path is read and normalized at
/// most once until it is invalidated.
#[derive(Debug, Default)]
pub struct SiteLoader {
    cache: Mutex<HashMap<PathBuf, SiteTable>>,
}

impl SiteLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table for `path`, reading the file only on a cache miss.
    pub fn load(&self, path: &Path) -> Result<SiteTable, MetadataLoadError> {
        // Fast path: already cached.
        {
            let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(table) = cache.get(path) {
                info!("Cache hit for site metadata at {:?}", path);
                return Ok(table.clone());
            }
            // Not cached, release the lock before reading the file.
        }

        warn!("Cache miss for site metadata at {:?}. Reading and normalizing.", path);
        let loaded = load_site_metadata_path(path)?;

        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        match cache.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => {
                // Another caller inserted while we were reading; use theirs.
                Ok(entry.get().clone())
            }
            Entry::Vacant(entry) => {
                entry.insert(loaded.clone());
                Ok(loaded)
            }
        }
    }

    /// Drops the cached table for `path`; the next [`load`](Self::load)
    /// rereads the file.
    pub fn invalidate(&self, path: &Path) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.remove(path);
    }

    pub fn clear(&self) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = "\
id_site,nama_site,provinsi,kabupaten,latitude,longitude,th_pengadaan,merk
50001,Stasiun Ambon,Maluku,Kota Ambon,-3.695,128.181,2019,Davis
50002,Stasiun Ternate,Maluku Utara,Kota Ternate,missing,127.384,2021,Campbell
50003,Pos Sorong,Papua Barat Daya,Kota Sorong,-0.876,131.255,,Davis
";

    #[test]
    fn normalizes_types_and_drops_unmappable_rows() {
        let table = load_site_metadata(SAMPLE.as_bytes()).unwrap();

        // Row 50002 has no usable latitude.
        assert_eq!(table.len(), 2);
        let frame = &table.frame;
        assert_eq!(
            frame.column(COL_LATITUDE).unwrap().dtype(),
            &DataType::Float64
        );
        assert_eq!(frame.column(COL_YEAR).unwrap().dtype(), &DataType::Float64);
        assert_eq!(frame.column("merk").unwrap().dtype(), &DataType::String);
        // A null year survives as long as the coordinates are present.
        assert_eq!(frame.column(COL_YEAR).unwrap().null_count(), 1);
    }

    #[test]
    fn missing_required_column_is_reported_by_name() {
        let data = "id_site,nama_site,latitude,th_pengadaan\n1,X,-3.0,2020\n";
        let err = load_site_metadata(data.as_bytes()).unwrap_err();
        match err {
            MetadataLoadError::MissingColumn(column) => assert_eq!(column, "longitude"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn loader_caches_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.csv");
        fs::write(&path, SAMPLE).unwrap();

        let loader = SiteLoader::new();
        assert_eq!(loader.load(&path).unwrap().len(), 2);

        // The cached copy outlives the file.
        fs::remove_file(&path).unwrap();
        assert_eq!(loader.load(&path).unwrap().len(), 2);

        // Invalidation forces a reread, which now fails.
        loader.invalidate(&path);
        assert!(loader.load(&path).is_err());
    }

    #[test]
    fn clear_empties_the_whole_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.csv");
        fs::write(&path, SAMPLE).unwrap();

        let loader = SiteLoader::new();
        loader.load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        loader.clear();
        assert!(loader.load(&path).is_err());
    }
}
