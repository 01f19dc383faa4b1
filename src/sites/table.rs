//! Queries over the normalized site-metadata table.

use crate::sites::error::MetadataLoadError;
use crate::sites::loader::{load_site_metadata, load_site_metadata_path};
use crate::types::site::{LatLon, Site};
use polars::prelude::*;
use std::path::Path;

pub(crate) const COL_ID_SITE: &str = "id_site";
pub(crate) const COL_NAME: &str = "nama_site";
pub(crate) const COL_PROVINCE: &str = "provinsi";
pub(crate) const COL_DISTRICT: &str = "kabupaten";
pub(crate) const COL_SUBDISTRICT: &str = "kecamatan";
pub(crate) const COL_VILLAGE: &str = "desa";
pub(crate) const COL_LATITUDE: &str = "latitude";
pub(crate) const COL_LONGITUDE: &str = "longitude";
pub(crate) const COL_YEAR: &str = "th_pengadaan";
pub(crate) const COL_BRAND: &str = "merk";
pub(crate) const COL_TYPE: &str = "tipe";
pub(crate) const COL_SITE_KIND: &str = "id_jenis";
pub(crate) const COL_ELEVATION: &str = "elevasi";
pub(crate) const COL_REGIONAL_OFFICE: &str = "kanwil";
pub(crate) const COL_POSTAL: &str = "pos";
pub(crate) const COL_PROCUREMENT: &str = "pengadaan";
pub(crate) const COL_ADDRESS: &str = "alamat";

/// The site registry after normalization.
///
/// Every row has non-null coordinates; `id_site` and `th_pengadaan` are
/// numeric but may be null.
#[derive(Debug, Clone)]
pub struct SiteTable {
    pub frame: DataFrame,
}

impl SiteTable {
    pub(crate) fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Loads and normalizes site metadata from raw CSV bytes.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, MetadataLoadError> {
        load_site_metadata(bytes)
    }

    /// Loads and normalizes site metadata from a CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self, MetadataLoadError> {
        load_site_metadata_path(path)
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Case-insensitive substring search over site name, province and
    /// district. A blank term matches everything.
    pub fn search(&self, term: &str) -> Result<SiteTable, MetadataLoadError> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(self.clone());
        }
        // Null cells never match, they do not poison the whole predicate.
        let matches = |column: &str| {
            col(column)
                .str()
                .to_lowercase()
                .str()
                .contains_literal(lit(needle.clone()))
                .fill_null(lit(false))
        };
        let frame = self
            .frame
            .clone()
            .lazy()
            .filter(
                matches(COL_NAME)
                    .or(matches(COL_PROVINCE))
                    .or(matches(COL_DISTRICT)),
            )
            .collect()?;
        Ok(Self::new(frame))
    }

    /// The tabular directory view: one row per site with the columns shown in
    /// the listing, ordered by site id.
    pub fn directory(&self) -> Result<DataFrame, MetadataLoadError> {
        let frame = self
            .frame
            .clone()
            .lazy()
            .select([
                col(COL_ID_SITE),
                col(COL_NAME),
                col(COL_PROVINCE),
                col(COL_DISTRICT),
                col(COL_LATITUDE),
                col(COL_LONGITUDE),
                col(COL_YEAR),
                col(COL_BRAND),
            ])
            .sort([COL_ID_SITE], SortMultipleOptions::default())
            .collect()?;
        Ok(frame)
    }

    /// Looks a site up by its numeric id.
    pub fn site_by_id(&self, id: i64) -> Result<Option<Site>, MetadataLoadError> {
        let frame = self
            .frame
            .clone()
            .lazy()
            .filter(col(COL_ID_SITE).eq(lit(id as f64)))
            .collect()?;
        if frame.height() == 0 {
            return Ok(None);
        }
        extract_site(&frame, 0).map(Some)
    }

    /// All sites as typed records, in table order.
    pub fn sites(&self) -> Result<Vec<Site>, MetadataLoadError> {
        (0..self.frame.height())
            .map(|idx| extract_site(&self.frame, idx))
            .collect()
    }
}

fn opt_str(frame: &DataFrame, name: &str, idx: usize) -> Result<Option<String>, MetadataLoadError> {
    match frame.column(name) {
        Ok(column) => Ok(column.str()?.get(idx).map(String::from)),
        Err(_) => Ok(None),
    }
}

fn opt_f64(frame: &DataFrame, name: &str, idx: usize) -> Result<Option<f64>, MetadataLoadError> {
    match frame.column(name) {
        Ok(column) => Ok(column.f64()?.get(idx)),
        Err(_) => Ok(None),
    }
}

pub(crate) fn extract_site(frame: &DataFrame, idx: usize) -> Result<Site, MetadataLoadError> {
    let latitude = opt_f64(frame, COL_LATITUDE, idx)?.ok_or_else(|| {
        MetadataLoadError::Unexpected("null latitude in normalized metadata".to_string())
    })?;
    let longitude = opt_f64(frame, COL_LONGITUDE, idx)?.ok_or_else(|| {
        MetadataLoadError::Unexpected("null longitude in normalized metadata".to_string())
    })?;
    Ok(Site {
        id: opt_f64(frame, COL_ID_SITE, idx)?.map(|id| id as i64),
        name: opt_str(frame, COL_NAME, idx)?,
        province: opt_str(frame, COL_PROVINCE, idx)?,
        district: opt_str(frame, COL_DISTRICT, idx)?,
        subdistrict: opt_str(frame, COL_SUBDISTRICT, idx)?,
        village: opt_str(frame, COL_VILLAGE, idx)?,
        address: opt_str(frame, COL_ADDRESS, idx)?,
        location: LatLon(latitude, longitude),
        installation_year: opt_f64(frame, COL_YEAR, idx)?.map(|year| year as i32),
        equipment_brand: opt_str(frame, COL_BRAND, idx)?,
        equipment_type: opt_str(frame, COL_TYPE, idx)?,
        site_kind: opt_str(frame, COL_SITE_KIND, idx)?,
        elevation: opt_str(frame, COL_ELEVATION, idx)?,
        regional_office: opt_str(frame, COL_REGIONAL_OFFICE, idx)?,
        postal_code: opt_str(frame, COL_POSTAL, idx)?,
        procurement: opt_str(frame, COL_PROCUREMENT, idx)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> SiteTable {
        let data = "\
id_site,nama_site,provinsi,kabupaten,kecamatan,desa,latitude,longitude,th_pengadaan,merk,tipe,alamat
50001,Stasiun Ambon,Maluku,Kota Ambon,Sirimau,Batu Merah,-3.695,128.181,2019,Davis,Vantage Pro2,Jl. Pattimura 5
50002,Stasiun Ternate,Maluku Utara,Kota Ternate,,,0.790,127.384,2021,Campbell,,
50003,Pos Sorong,Papua Barat Daya,Kota Sorong,,,-0.876,131.255,2019,Davis,,
";
        SiteTable::from_csv_bytes(data.as_bytes()).unwrap()
    }

    #[test]
    fn search_is_case_insensitive_and_spans_name_province_district() {
        let table = sample_table();

        let by_name = table.search("stasiun").unwrap();
        assert_eq!(by_name.len(), 2);

        let by_province = table.search("PAPUA").unwrap();
        assert_eq!(by_province.len(), 1);

        let by_district = table.search("kota sorong").unwrap();
        assert_eq!(by_district.len(), 1);

        // A row matching in several columns is still one row.
        assert_eq!(table.search("ternate").unwrap().len(), 1);

        let nothing = table.search("jawa").unwrap();
        assert!(nothing.is_empty());
    }

    #[test]
    fn search_with_blank_term_keeps_every_row() {
        let table = sample_table();
        assert_eq!(table.search("").unwrap().len(), 3);
        assert_eq!(table.search("   ").unwrap().len(), 3);
    }

    #[test]
    fn search_ignores_null_text_cells() {
        let data = "\
id_site,nama_site,provinsi,kabupaten,latitude,longitude,th_pengadaan
1,,Maluku,,-3.0,128.0,2020
2,Pos Ambon,Maluku,Kota Ambon,-3.7,128.2,2020
";
        let table = SiteTable::from_csv_bytes(data.as_bytes()).unwrap();
        let found = table.search("ambon").unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn directory_is_sorted_by_id_with_fixed_columns() {
        let data = "\
id_site,nama_site,provinsi,kabupaten,kecamatan,desa,latitude,longitude,th_pengadaan,merk,tipe,alamat
50003,Pos Sorong,Papua Barat Daya,Kota Sorong,,,-0.876,131.255,2019,Davis,,
50001,Stasiun Ambon,Maluku,Kota Ambon,Sirimau,Batu Merah,-3.695,128.181,2019,Davis,Vantage Pro2,Jl. Pattimura 5
";
        let table = SiteTable::from_csv_bytes(data.as_bytes()).unwrap();
        let directory = table.directory().unwrap();

        assert_eq!(directory.width(), 8);
        let names: Vec<&str> = directory
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "id_site",
                "nama_site",
                "provinsi",
                "kabupaten",
                "latitude",
                "longitude",
                "th_pengadaan",
                "merk"
            ]
        );
        let ids: Vec<Option<f64>> = directory
            .column("id_site")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(ids, vec![Some(50001.0), Some(50003.0)]);
    }

    #[test]
    fn site_by_id_extracts_a_typed_record() {
        let table = sample_table();

        let site = table.site_by_id(50001).unwrap().unwrap();
        assert_eq!(site.id, Some(50001));
        assert_eq!(site.name.as_deref(), Some("Stasiun Ambon"));
        assert_eq!(site.province.as_deref(), Some("Maluku"));
        assert_eq!(site.location, LatLon(-3.695, 128.181));
        assert_eq!(site.installation_year, Some(2019));
        assert_eq!(site.equipment_type.as_deref(), Some("Vantage Pro2"));
        // Columns absent from the file come back as None.
        assert_eq!(site.regional_office, None);

        assert!(table.site_by_id(99999).unwrap().is_none());
    }

    #[test]
    fn sites_keeps_table_order_and_blank_fields() {
        let table = sample_table();
        let sites = table.sites().unwrap();
        assert_eq!(sites.len(), 3);
        assert_eq!(sites[1].name.as_deref(), Some("Stasiun Ternate"));
        assert_eq!(sites[1].subdistrict, None);
        assert_eq!(sites[1].equipment_type, None);
    }
}
