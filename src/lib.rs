mod charts;
mod error;
mod export;
mod map;
mod sensor_data;
mod session;
mod sites;
mod types;

pub use error::IkroError;
pub use session::*;

pub use sensor_data::error::{DataLoadError, MissingColumnError, NoDataError, SensorDataError};
pub use sensor_data::latest::*;
pub use sensor_data::loader::{load_sensor_data, load_sensor_data_path, LoadReport};
pub use sensor_data::table::SensorTable;

pub use sites::error::MetadataLoadError;
pub use sites::loader::{
    load_site_metadata, load_site_metadata_path, SiteLoader, DEFAULT_METADATA_PATH,
};
pub use sites::stats::*;
pub use sites::table::SiteTable;

pub use charts::error::ChartError;
pub use charts::network::*;
pub use charts::profile::*;
pub use charts::style::*;
pub use charts::time_series::*;

pub use export::*;
pub use map::markers::*;

pub use types::cardinal::*;
pub use types::height::Height;
pub use types::parameter::*;
pub use types::site::*;
