//! Distribution charts for the site registry.

use crate::charts::error::ChartError;
use crate::sites::stats::{equipment_distribution, installation_timeline, province_distribution};
use crate::sites::table::SiteTable;
use plotly::common::{Orientation, Title};
use plotly::layout::{Axis, Layout};
use plotly::{Bar, Pie, Plot};

/// Horizontal bar chart of sites per province, largest bar on top.
pub fn province_distribution_chart(table: &SiteTable) -> Result<Plot, ChartError> {
    let counts = province_distribution(table)?;
    let provinces: Vec<String> = counts.iter().map(|(province, _)| province.clone()).collect();
    let totals: Vec<u32> = counts.iter().map(|(_, total)| *total).collect();

    let mut plot = Plot::new();
    plot.add_trace(Bar::new(totals, provinces).orientation(Orientation::Horizontal));
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(
                "Microclimate Sites Distribution by Province",
            ))
            .x_axis(Axis::new().title(Title::with_text("Number of Sites")))
            .y_axis(Axis::new().title(Title::with_text("Province")))
            .height(600)
            .show_legend(false),
    );
    Ok(plot)
}

/// Sites installed per procurement year.
pub fn installation_timeline_chart(table: &SiteTable) -> Result<Plot, ChartError> {
    let timeline = installation_timeline(table)?;
    let years: Vec<i32> = timeline.iter().map(|(year, _)| *year).collect();
    let totals: Vec<u32> = timeline.iter().map(|(_, total)| *total).collect();

    let mut plot = Plot::new();
    plot.add_trace(Bar::new(years, totals));
    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Microclimate Sites Installation Timeline"))
            .x_axis(Axis::new().title(Title::with_text("Year")))
            .y_axis(Axis::new().title(Title::with_text("Number of Sites Installed")))
            .height(400)
            .show_legend(false),
    );
    Ok(plot)
}

/// Pie chart of equipment brands across the network.
pub fn equipment_distribution_chart(table: &SiteTable) -> Result<Plot, ChartError> {
    let counts = equipment_distribution(table)?;
    let brands: Vec<String> = counts.iter().map(|(brand, _)| brand.clone()).collect();
    let totals: Vec<u32> = counts.iter().map(|(_, total)| *total).collect();

    let mut plot = Plot::new();
    plot.add_trace(Pie::new(totals).labels(brands));
    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Equipment Brand Distribution"))
            .height(400),
    );
    Ok(plot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

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

    fn to_value(plot: &Plot) -> Value {
        serde_json::from_str(&plot.to_json()).unwrap()
    }

    #[test]
    fn province_chart_is_horizontal_with_ascending_counts() {
        let plot = province_distribution_chart(&sample_table()).unwrap();
        let value = to_value(&plot);

        let trace = &value["data"][0];
        assert_eq!(trace["type"], "bar");
        assert_eq!(trace["orientation"], "h");
        assert_eq!(trace["x"], serde_json::json!([1, 3]));
        assert_eq!(trace["y"], serde_json::json!(["Papua Barat Daya", "Maluku"]));

        let layout = &value["layout"];
        assert_eq!(
            layout["title"]["text"],
            "Microclimate Sites Distribution by Province"
        );
        assert_eq!(layout["height"], 600);
        assert_eq!(layout["showlegend"], false);
    }

    #[test]
    fn timeline_chart_runs_chronologically() {
        let plot = installation_timeline_chart(&sample_table()).unwrap();
        let value = to_value(&plot);

        let trace = &value["data"][0];
        assert_eq!(trace["x"], serde_json::json!([2018, 2019, 2021]));
        assert_eq!(trace["y"], serde_json::json!([1, 1, 1]));
        assert_eq!(value["layout"]["yaxis"]["title"]["text"], "Number of Sites Installed");
        assert_eq!(value["layout"]["height"], 400);
    }

    #[test]
    fn equipment_chart_is_a_pie_with_brand_labels() {
        let plot = equipment_distribution_chart(&sample_table()).unwrap();
        let value = to_value(&plot);

        let trace = &value["data"][0];
        assert_eq!(trace["type"], "pie");
        assert_eq!(trace["values"], serde_json::json!([3, 1]));
        assert_eq!(trace["labels"], serde_json::json!(["Davis", "Campbell"]));
        assert_eq!(value["layout"]["title"]["text"], "Equipment Brand Distribution");
    }
}
