//! The dashboard session: one value owning the loaded sensor table, the
//! memoized site registry and the current site selection, with every view
//! the front ends render hanging off it.

use crate::charts::error::ChartError;
use crate::charts::{network, profile, time_series};
use crate::error::IkroError;
use crate::export::{self, CsvExport};
use crate::map::markers::NetworkMap;
use crate::sensor_data::error::{NoDataError, SensorDataError};
use crate::sensor_data::latest::LatestReading;
use crate::sensor_data::loader::LoadReport;
use crate::sensor_data::table::SensorTable;
use crate::sites::loader::{SiteLoader, DEFAULT_METADATA_PATH};
use crate::sites::stats::{self, NetworkSummary};
use crate::sites::table::SiteTable;
use crate::types::height::Height;
use crate::types::parameter::Parameter;
use crate::types::site::Site;
use plotly::Plot;
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};

/// Site highlighted on the map before the user picks another one.
pub const DEFAULT_SELECTED_SITE: i64 = 50001;

/// State shared by both dashboards.
///
/// Sensor data arrives through [`load_sensor_csv`](Self::load_sensor_csv)
/// (an upload); site metadata is read lazily from `metadata_path` and cached
/// across calls.
///
/// # Examples
///
/// ```rust
/// use ikro::DashboardSession;
///
/// let session = DashboardSession::new();
/// // Nothing uploaded yet, so every sensor view reports the absence.
/// assert!(session.latest().is_err());
/// ```
pub struct DashboardSession {
    sensor: Option<(SensorTable, LoadReport)>,
    site_loader: SiteLoader,
    metadata_path: PathBuf,
    selected_site: i64,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::with_metadata_path(DEFAULT_METADATA_PATH)
    }

    /// A session reading site metadata from a non-default location.
    pub fn with_metadata_path(path: impl Into<PathBuf>) -> Self {
        Self {
            sensor: None,
            site_loader: SiteLoader::new(),
            metadata_path: path.into(),
            selected_site: DEFAULT_SELECTED_SITE,
        }
    }

    /// Replaces the session's sensor table with a freshly uploaded CSV.
    ///
    /// The previous table is discarded before parsing starts, so a failed
    /// upload leaves the session empty rather than showing stale data.
    pub fn load_sensor_csv(&mut self, bytes: &[u8]) -> Result<LoadReport, IkroError> {
        self.sensor = None;
        let (table, report) = SensorTable::from_csv_bytes(bytes)?;
        self.sensor = Some((table, report.clone()));
        Ok(report)
    }

    /// Like [`load_sensor_csv`](Self::load_sensor_csv), reading from disk.
    pub fn load_sensor_file(&mut self, path: &Path) -> Result<LoadReport, IkroError> {
        self.sensor = None;
        let (table, report) = SensorTable::from_csv_path(path)?;
        self.sensor = Some((table, report.clone()));
        Ok(report)
    }

    /// The loaded sensor table, or the no-data error when nothing is loaded.
    pub fn sensor(&self) -> Result<&SensorTable, IkroError> {
        self.sensor
            .as_ref()
            .map(|(table, _)| table)
            .ok_or_else(|| SensorDataError::from(NoDataError).into())
    }

    /// The report from the last successful load.
    pub fn load_report(&self) -> Option<&LoadReport> {
        self.sensor.as_ref().map(|(_, report)| report)
    }

    pub fn latest(&self) -> Result<LatestReading, IkroError> {
        Ok(self.sensor()?.latest()?)
    }

    /// The last `rows` readings in the preview column set.
    pub fn recent_readings(&self, rows: usize) -> Result<DataFrame, IkroError> {
        Ok(self.sensor()?.recent(rows)?)
    }

    /// The site registry, read from `metadata_path` on first use.
    pub fn sites(&self) -> Result<SiteTable, IkroError> {
        Ok(self.site_loader.load(&self.metadata_path)?)
    }

    /// Drops the cached registry and rereads the file.
    pub fn reload_sites(&self) -> Result<SiteTable, IkroError> {
        self.site_loader.invalidate(&self.metadata_path);
        self.sites()
    }

    pub fn metadata_path(&self) -> &Path {
        &self.metadata_path
    }

    pub fn select_site(&mut self, id: i64) {
        self.selected_site = id;
    }

    pub fn selected_site(&self) -> i64 {
        self.selected_site
    }

    /// Full registry record of the selected site, if it exists.
    pub fn selected_site_details(&self) -> Result<Option<Site>, IkroError> {
        Ok(self.sites()?.site_by_id(self.selected_site)?)
    }

    pub fn search_sites(&self, term: &str) -> Result<SiteTable, IkroError> {
        Ok(self.sites()?.search(term)?)
    }

    /// The directory listing of the registry, ordered by site id.
    pub fn site_directory(&self) -> Result<DataFrame, IkroError> {
        Ok(self.sites()?.directory()?)
    }

    pub fn network_summary(&self) -> Result<NetworkSummary, IkroError> {
        Ok(stats::network_summary(&self.sites()?)?)
    }

    /// The map with the selected site highlighted.
    pub fn network_map(&self) -> Result<NetworkMap, IkroError> {
        let sites = self.sites()?;
        Ok(NetworkMap::from_sites()
            .sites(&sites)
            .selected_site(self.selected_site)
            .call()?)
    }

    pub fn temperature_chart(&self) -> Result<Plot, IkroError> {
        self.sensor_chart(time_series::temperature_comparison)
    }

    pub fn humidity_chart(&self) -> Result<Plot, IkroError> {
        self.sensor_chart(time_series::humidity_comparison)
    }

    pub fn wind_speed_chart(&self) -> Result<Plot, IkroError> {
        self.sensor_chart(time_series::wind_speed_comparison)
    }

    pub fn wind_direction_chart(&self, height: Height) -> Result<Plot, IkroError> {
        Ok(time_series::wind_direction(self.sensor()?, height)?)
    }

    pub fn vertical_profile_chart(&self, parameter: Parameter) -> Result<Plot, IkroError> {
        Ok(profile::vertical_profile(self.sensor()?, parameter)?)
    }

    pub fn province_chart(&self) -> Result<Plot, IkroError> {
        Ok(network::province_distribution_chart(&self.sites()?)?)
    }

    pub fn installation_chart(&self) -> Result<Plot, IkroError> {
        Ok(network::installation_timeline_chart(&self.sites()?)?)
    }

    pub fn equipment_chart(&self) -> Result<Plot, IkroError> {
        Ok(network::equipment_distribution_chart(&self.sites()?)?)
    }

    /// The full sensor table as a download.
    pub fn export_sensor_csv(&self) -> Result<CsvExport, IkroError> {
        export::sensor_table_csv(self.sensor()?)
    }

    /// The nine-row summary of the latest reading as a download.
    pub fn export_summary_csv(&self) -> Result<CsvExport, IkroError> {
        export::summary_csv(&self.latest()?)
    }

    /// The registry as a download, filtered when a search term is given.
    pub fn export_sites_csv(&self, search_term: Option<&str>) -> Result<CsvExport, IkroError> {
        let sites = match search_term {
            Some(term) => self.search_sites(term)?,
            None => self.sites()?,
        };
        export::site_table_csv(&sites)
    }

    fn sensor_chart(
        &self,
        build: fn(&SensorTable) -> Result<Plot, ChartError>,
    ) -> Result<Plot, IkroError> {
        Ok(build(self.sensor()?)?)
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new()
    }
}
