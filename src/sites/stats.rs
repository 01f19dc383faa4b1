//! Aggregate views over the site registry: distributions and the network
//! summary shown next to the map.

use crate::sites::error::MetadataLoadError;
use crate::sites::table::{
    SiteTable, COL_BRAND, COL_DISTRICT, COL_LATITUDE, COL_LONGITUDE, COL_PROVINCE,
    COL_SUBDISTRICT, COL_YEAR,
};
use polars::prelude::*;
use serde::Serialize;

/// How many sites each province hosts, smallest first. Ties break
/// alphabetically so the ordering is stable.
pub fn province_distribution(table: &SiteTable) -> Result<Vec<(String, u32)>, MetadataLoadError> {
    let mut counts = counts_by(&table.frame, COL_PROVINCE)?;
    counts.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    Ok(counts)
}

/// How many sites run each equipment brand, largest first.
pub fn equipment_distribution(table: &SiteTable) -> Result<Vec<(String, u32)>, MetadataLoadError> {
    let mut counts = counts_by(&table.frame, COL_BRAND)?;
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(counts)
}

/// Sites installed per procurement year, chronological. Rows without a year
/// are left out.
pub fn installation_timeline(table: &SiteTable) -> Result<Vec<(i32, u32)>, MetadataLoadError> {
    let counts = table
        .frame
        .clone()
        .lazy()
        .filter(col(COL_YEAR).is_not_null())
        .group_by([col(COL_YEAR)])
        .agg([len().alias("count")])
        .collect()?;

    let years = counts.column(COL_YEAR)?.f64()?;
    let totals = counts.column("count")?.u32()?;
    let mut timeline: Vec<(i32, u32)> = years
        .into_iter()
        .zip(totals)
        .filter_map(|(year, total)| Some((year? as i32, total?)))
        .collect();
    timeline.sort_by_key(|(year, _)| *year);
    Ok(timeline)
}

fn counts_by(frame: &DataFrame, column: &str) -> Result<Vec<(String, u32)>, MetadataLoadError> {
    let counts = frame
        .clone()
        .lazy()
        .filter(col(column).is_not_null())
        .group_by([col(column)])
        .agg([len().alias("count")])
        .collect()?;

    let labels = counts.column(column)?.str()?;
    let totals = counts.column("count")?.u32()?;
    Ok(labels
        .into_iter()
        .zip(totals)
        .filter_map(|(label, total)| Some((label?.to_string(), total?)))
        .collect())
}

/// Headline figures for the whole network.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSummary {
    pub total_sites: usize,
    pub provinces: usize,
    pub districts: usize,
    pub subdistricts: usize,
    /// Earliest procurement year across the network.
    pub earliest_installation: Option<i32>,
    pub northernmost: Option<f64>,
    pub southernmost: Option<f64>,
    pub easternmost: Option<f64>,
    pub westernmost: Option<f64>,
    /// Up to five brands, most common first.
    pub top_equipment: Vec<(String, u32)>,
}

pub fn network_summary(table: &SiteTable) -> Result<NetworkSummary, MetadataLoadError> {
    let scalars = table
        .frame
        .clone()
        .lazy()
        .select([
            col(COL_PROVINCE).drop_nulls().n_unique().alias("provinces"),
            col(COL_DISTRICT).drop_nulls().n_unique().alias("districts"),
            col(COL_SUBDISTRICT)
                .drop_nulls()
                .n_unique()
                .alias("subdistricts"),
            col(COL_YEAR).min().alias("earliest"),
            col(COL_LATITUDE).max().alias("north"),
            col(COL_LATITUDE).min().alias("south"),
            col(COL_LONGITUDE).max().alias("east"),
            col(COL_LONGITUDE).min().alias("west"),
        ])
        .collect()?;

    let mut top_equipment = equipment_distribution(table)?;
    top_equipment.truncate(5);

    Ok(NetworkSummary {
        total_sites: table.len(),
        provinces: scalar_u32(&scalars, "provinces")?.unwrap_or(0) as usize,
        districts: scalar_u32(&scalars, "districts")?.unwrap_or(0) as usize,
        subdistricts: scalar_u32(&scalars, "subdistricts")?.unwrap_or(0) as usize,
        earliest_installation: scalar_f64(&scalars, "earliest")?.map(|year| year as i32),
        northernmost: scalar_f64(&scalars, "north")?,
        southernmost: scalar_f64(&scalars, "south")?,
        easternmost: scalar_f64(&scalars, "east")?,
        westernmost: scalar_f64(&scalars, "west")?,
        top_equipment,
    })
}

fn scalar_u32(frame: &DataFrame, name: &str) -> Result<Option<u32>, MetadataLoadError> {
    Ok(frame.column(name)?.u32()?.get(0))
}

fn scalar_f64(frame: &DataFrame, name: &str) -> Result<Option<f64>, MetadataLoadError> {
    Ok(frame.column(name)?.f64()?.get(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> SiteTable {
        let data = "\
id_site,nama_site,provinsi,kabupaten,kecamatan,latitude,longitude,th_pengadaan,merk
50001,Stasiun Ambon,Maluku,Kota Ambon,Sirimau,-3.695,128.181,2019,Davis
50002,Stasiun Ternate,Maluku,Kota Ambon,Nusaniwe,0.790,127.384,2021,Campbell
50003,Pos Sorong,Papua Barat Daya,Kota Sorong,Sorong Barat,-0.876,131.255,2018,Davis
50004,Pos Kairatu,Maluku,Seram Bagian Barat,Kairatu,-3.300,128.400,,Davis
";
        SiteTable::from_csv_bytes(data.as_bytes()).unwrap()
    }

    #[test]
    fn province_counts_come_back_smallest_first() {
        let counts = province_distribution(&sample_table()).unwrap();
        assert_eq!(
            counts,
            vec![
                ("Papua Barat Daya".to_string(), 1),
                ("Maluku".to_string(), 3)
            ]
        );
    }

    #[test]
    fn equipment_counts_come_back_largest_first() {
        let counts = equipment_distribution(&sample_table()).unwrap();
        assert_eq!(
            counts,
            vec![("Davis".to_string(), 3), ("Campbell".to_string(), 1)]
        );
    }

    #[test]
    fn timeline_is_chronological_and_skips_missing_years() {
        let timeline = installation_timeline(&sample_table()).unwrap();
        assert_eq!(timeline, vec![(2018, 1), (2019, 1), (2021, 1)]);
    }

    #[test]
    fn network_summary_headline_figures() {
        let summary = network_summary(&sample_table()).unwrap();

        assert_eq!(summary.total_sites, 4);
        assert_eq!(summary.provinces, 2);
        assert_eq!(summary.districts, 3);
        assert_eq!(summary.subdistricts, 4);
        assert_eq!(summary.earliest_installation, Some(2018));
        assert_eq!(summary.northernmost, Some(0.790));
        assert_eq!(summary.southernmost, Some(-3.695));
        assert_eq!(summary.easternmost, Some(131.255));
        assert_eq!(summary.westernmost, Some(127.384));
        assert_eq!(summary.top_equipment.len(), 2);
        assert_eq!(summary.top_equipment[0].0, "Davis");
    }

    #[test]
    fn empty_table_yields_zeroes_and_nones() {
        let data = "id_site,nama_site,provinsi,kabupaten,kecamatan,latitude,longitude,th_pengadaan,merk\n";
        let table = SiteTable::from_csv_bytes(data.as_bytes()).unwrap();
        let summary = network_summary(&table).unwrap();

        assert_eq!(summary.total_sites, 0);
        assert_eq!(summary.provinces, 0);
        assert_eq!(summary.earliest_installation, None);
        assert_eq!(summary.northernmost, None);
        assert!(summary.top_equipment.is_empty());
    }
}
