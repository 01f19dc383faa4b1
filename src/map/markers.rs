//! A typed description of the network map: tile layers plus one marker per
//! site. Rendering is left to the front end; this module only decides what
//! goes on the map.

use crate::sites::error::MetadataLoadError;
use crate::sites::table::SiteTable;
use crate::types::site::{LatLon, Site};
use bon::bon;
use serde::Serialize;

/// Map center that frames the whole archipelago.
pub const INDONESIA_CENTER: LatLon = LatLon(-2.5, 129.0);
pub const DEFAULT_ZOOM: f64 = 4.2;

const NOT_AVAILABLE: &str = "N/A";

/// One selectable base layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub name: &'static str,
    pub attribution: Option<&'static str>,
}

pub fn default_tile_layers() -> Vec<TileLayer> {
    vec![
        TileLayer {
            name: "OpenStreetMap",
            attribution: None,
        },
        TileLayer {
            name: "CartoDB positron",
            attribution: Some("© OpenStreetMap contributors © CARTO"),
        },
    ]
}

/// Visual style of a marker. The selected site gets a bigger red star so it
/// stands out among the blue info markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub icon: &'static str,
    pub size: u8,
}

impl MarkerStyle {
    pub fn selected() -> Self {
        Self {
            color: "red",
            icon: "star",
            size: 15,
        }
    }

    pub fn standard() -> Self {
        Self {
            color: "blue",
            icon: "info-sign",
            size: 10,
        }
    }
}

/// Popup fields for one site. Blank registry fields show as `N/A`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitePopup {
    pub title: String,
    pub site_id: String,
    pub province: String,
    pub district: String,
    /// `lat, lon` with three decimals.
    pub coordinates: String,
    pub installation_year: String,
    pub equipment: String,
    pub address: String,
}

impl SitePopup {
    fn for_site(site: &Site) -> Self {
        let text =
            |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
        Self {
            title: text(&site.name),
            site_id: site
                .id
                .map(|id| id.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            province: text(&site.province),
            district: text(&site.district),
            coordinates: format!("{:.3}, {:.3}", site.location.0, site.location.1),
            installation_year: site
                .installation_year
                .map(|year| year.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            equipment: text(&site.equipment_brand),
            address: text(&site.address),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteMarker {
    pub location: LatLon,
    pub tooltip: String,
    pub popup: SitePopup,
    pub highlighted: bool,
    pub style: MarkerStyle,
}

impl SiteMarker {
    fn for_site(site: &Site, highlighted: bool) -> Self {
        let name = site
            .name
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let id_text = site
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        Self {
            location: site.location,
            tooltip: format!("{name} (ID: {id_text})"),
            popup: SitePopup::for_site(site),
            highlighted,
            style: if highlighted {
                MarkerStyle::selected()
            } else {
                MarkerStyle::standard()
            },
        }
    }
}

/// The whole map, ready to serialize for whichever front end draws it.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkMap {
    pub center: LatLon,
    pub zoom: f64,
    pub tile_layers: Vec<TileLayer>,
    pub markers: Vec<SiteMarker>,
}

#[bon]
impl NetworkMap {
    /// Builds the map from the site registry.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.sites(&SiteTable)`: **Required.** The registry to draw.
    /// * `.selected_site(i64)`: Optional. Site id to highlight with the
    ///   selected marker style. Without it no marker is highlighted.
    /// * `.center(LatLon)`: Optional. Defaults to [`INDONESIA_CENTER`].
    /// * `.zoom(f64)`: Optional. Defaults to [`DEFAULT_ZOOM`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ikro::{NetworkMap, SiteTable};
    /// # fn run(registry: &SiteTable) -> Result<(), ikro::MetadataLoadError> {
    /// let map = NetworkMap::from_sites()
    ///     .sites(registry)
    ///     .selected_site(50001)
    ///     .call()?;
    /// println!("{} markers", map.markers.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn from_sites(
        sites: &SiteTable,
        selected_site: Option<i64>,
        center: Option<LatLon>,
        zoom: Option<f64>,
    ) -> Result<NetworkMap, MetadataLoadError> {
        let center = center.unwrap_or(INDONESIA_CENTER);
        let zoom = zoom.unwrap_or(DEFAULT_ZOOM);

        let mut markers = Vec::with_capacity(sites.len());
        for site in sites.sites()? {
            let highlighted =
                matches!((site.id, selected_site), (Some(id), Some(sel)) if id == sel);
            markers.push(SiteMarker::for_site(&site, highlighted));
        }

        Ok(NetworkMap {
            center,
            zoom,
            tile_layers: default_tile_layers(),
            markers,
        })
    }

    /// The marker carrying the selected style, if any site matched.
    pub fn highlighted_marker(&self) -> Option<&SiteMarker> {
        self.markers.iter().find(|marker| marker.highlighted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> SiteTable {
        let data = "\
id_site,nama_site,provinsi,kabupaten,latitude,longitude,th_pengadaan,merk,alamat
50001,Stasiun Ambon,Maluku,Kota Ambon,-3.695,128.181,2019,Davis,Jl. Pattimura 5
50002,Stasiun Ternate,Maluku Utara,Kota Ternate,0.790,127.384,,,
50003,Pos Sorong,Papua Barat Daya,Kota Sorong,-0.876,131.255,2019,Davis,
";
        SiteTable::from_csv_bytes(data.as_bytes()).unwrap()
    }

    #[test]
    fn selected_site_gets_the_star_marker() {
        let map = NetworkMap::from_sites()
            .sites(&sample_table())
            .selected_site(50002)
            .call()
            .unwrap();

        assert_eq!(map.markers.len(), 3);
        assert_eq!(map.markers.iter().filter(|m| m.highlighted).count(), 1);

        let starred = map.highlighted_marker().unwrap();
        assert_eq!(starred.location, LatLon(0.790, 127.384));
        assert_eq!(starred.style, MarkerStyle::selected());
        assert_eq!(starred.style.color, "red");
        assert_eq!(starred.style.icon, "star");
        assert_eq!(starred.style.size, 15);

        assert_eq!(map.markers[0].style, MarkerStyle::standard());
    }

    #[test]
    fn unknown_or_absent_selection_highlights_nothing() {
        let table = sample_table();

        let map = NetworkMap::from_sites()
            .sites(&table)
            .selected_site(99999)
            .call()
            .unwrap();
        assert!(map.highlighted_marker().is_none());

        let map = NetworkMap::from_sites().sites(&table).call().unwrap();
        assert!(map.highlighted_marker().is_none());
    }

    #[test]
    fn popup_and_tooltip_fall_back_to_not_available() {
        let map = NetworkMap::from_sites()
            .sites(&sample_table())
            .call()
            .unwrap();

        let complete = &map.markers[0];
        assert_eq!(complete.tooltip, "Stasiun Ambon (ID: 50001)");
        assert_eq!(complete.popup.coordinates, "-3.695, 128.181");
        assert_eq!(complete.popup.installation_year, "2019");
        assert_eq!(complete.popup.address, "Jl. Pattimura 5");

        let sparse = &map.markers[1];
        assert_eq!(sparse.popup.installation_year, "N/A");
        assert_eq!(sparse.popup.equipment, "N/A");
        assert_eq!(sparse.popup.address, "N/A");
    }

    #[test]
    fn center_and_zoom_default_to_the_archipelago_frame() {
        let table = sample_table();

        let map = NetworkMap::from_sites().sites(&table).call().unwrap();
        assert_eq!(map.center, INDONESIA_CENTER);
        assert_eq!(map.zoom, DEFAULT_ZOOM);
        assert_eq!(map.tile_layers.len(), 2);
        assert_eq!(map.tile_layers[0].name, "OpenStreetMap");

        let map = NetworkMap::from_sites()
            .sites(&table)
            .center(LatLon(-6.2, 106.8))
            .zoom(9.0)
            .call()
            .unwrap();
        assert_eq!(map.center, LatLon(-6.2, 106.8));
        assert_eq!(map.zoom, 9.0);
    }
}
