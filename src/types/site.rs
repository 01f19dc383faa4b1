//! Typed views of the site-metadata table.

use serde::{Deserialize, Serialize};

/// A geographical coordinate; latitude first, longitude second.
///
/// # Examples
///
/// ```
/// use ikro::LatLon;
///
/// let makassar = LatLon(-5.14, 119.43);
/// assert_eq!(makassar.0, -5.14); // Latitude
/// assert_eq!(makassar.1, 119.43); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

/// One monitoring site, extracted from a row of the metadata table.
///
/// Coordinates are always present (rows without them are dropped during
/// normalization); everything else is optional, since the upstream registry
/// leaves plenty of fields blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub subdistrict: Option<String>,
    pub village: Option<String>,
    pub address: Option<String>,
    pub location: LatLon,
    pub installation_year: Option<i32>,
    pub equipment_brand: Option<String>,
    pub equipment_type: Option<String>,
    pub site_kind: Option<String>,
    pub elevation: Option<String>,
    pub regional_office: Option<String>,
    pub postal_code: Option<String>,
    pub procurement: Option<String>,
}
