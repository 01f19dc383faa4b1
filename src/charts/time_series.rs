//! Time-series comparison charts, one trace group per measurement height.

use crate::charts::error::ChartError;
use crate::charts::style::{height_band_color, height_color};
use crate::sensor_data::table::SensorTable;
use crate::types::height::Height;
use crate::types::parameter::{Parameter, Statistic};
use plotly::common::color::NamedColor;
use plotly::common::{DashType, Fill, Line, Marker, Mode, Title};
use plotly::layout::{Axis, HoverMode, Layout, Shape, ShapeLine, ShapeType};
use plotly::{Plot, Scatter};

/// Temperature at every height, each with a shaded band between the window
/// extremes.
pub fn temperature_comparison(table: &SensorTable) -> Result<Plot, ChartError> {
    banded_comparison(
        table,
        Parameter::Temperature,
        "Temperature Comparison by Height (°C)",
        "Temperature (°C)",
        Some("°C"),
    )
}

/// Relative humidity at every height, banded like the temperature chart.
pub fn humidity_comparison(table: &SensorTable) -> Result<Plot, ChartError> {
    banded_comparison(
        table,
        Parameter::Humidity,
        "Humidity Comparison by Height (%)",
        "Relative Humidity (%)",
        None,
    )
}

/// Wind speed at every height: a solid average line plus a dotted gust line.
pub fn wind_speed_comparison(table: &SensorTable) -> Result<Plot, ChartError> {
    let times = table.timestamps()?;
    let mut plot = Plot::new();

    for height in Height::ALL {
        let meters = height.meters();
        let avg = table.measurement_series(Parameter::WindSpeed, height, Statistic::Avg)?;
        let max = table.measurement_series(Parameter::WindSpeed, height, Statistic::Max)?;

        plot.add_trace(
            Scatter::new(times.clone(), avg)
                .mode(Mode::Lines)
                .name(&format!("{meters}m (Avg)"))
                .line(Line::new().color(height_color(height)).width(2.0)),
        );
        plot.add_trace(
            Scatter::new(times.clone(), max)
                .mode(Mode::Lines)
                .name(&format!("{meters}m (Max)"))
                .line(
                    Line::new()
                        .color(height_color(height))
                        .width(1.0)
                        .dash(DashType::Dot),
                ),
        );
    }

    plot.set_layout(comparison_layout(
        "Wind Speed Comparison by Height (m/s)",
        "Wind Speed (m/s)",
    ));
    Ok(plot)
}

/// Wind direction at one height as a marker scatter, with dashed reference
/// lines at the cardinal angles.
pub fn wind_direction(table: &SensorTable, height: Height) -> Result<Plot, ChartError> {
    let times = table.timestamps()?;
    let meters = height.meters();
    let directions = table.measurement_series(Parameter::WindDirection, height, Statistic::Avg)?;

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(times, directions)
            .mode(Mode::Markers)
            .name(&format!("{meters}m Wind Direction"))
            .marker(Marker::new().color(height_color(height)).size(4)),
    );

    let shapes = [0.0, 90.0, 180.0, 270.0, 360.0]
        .into_iter()
        .map(reference_line)
        .collect();

    plot.set_layout(
        Layout::new()
            .title(Title::with_text(format!(
                "Wind Direction at {meters}m Height (°)"
            )))
            .x_axis(Axis::new().title(Title::with_text("Time")))
            .y_axis(
                Axis::new()
                    .title(Title::with_text("Wind Direction (°)"))
                    .range(vec![0.0, 360.0]),
            )
            .height(300)
            .show_legend(false)
            .shapes(shapes),
    );
    Ok(plot)
}

/// Average line plus a translucent band between the window extremes, for
/// every height. `hover_unit` switches the extra hover text on the band
/// traces on.
fn banded_comparison(
    table: &SensorTable,
    parameter: Parameter,
    title: &str,
    y_title: &str,
    hover_unit: Option<&str>,
) -> Result<Plot, ChartError> {
    let times = table.timestamps()?;
    let mut plot = Plot::new();

    for height in Height::ALL {
        let meters = height.meters();
        let avg = table.measurement_series(parameter, height, Statistic::Avg)?;
        let max = table.measurement_series(parameter, height, Statistic::Max)?;
        let min = table.measurement_series(parameter, height, Statistic::Min)?;

        plot.add_trace(
            Scatter::new(times.clone(), avg)
                .mode(Mode::Lines)
                .name(&format!("{meters}m (Avg)"))
                .line(Line::new().color(height_color(height)).width(2.0)),
        );

        // The max trace draws nothing itself; the min trace fills up to it,
        // shading the band between the extremes.
        let mut max_trace = Scatter::new(times.clone(), max)
            .mode(Mode::Lines)
            .line(Line::new().color(height_color(height)).width(0.0))
            .show_legend(false);
        if let Some(unit) = hover_unit {
            max_trace = max_trace
                .hover_template(&format!("{meters}m Max: %{{y:.1f}}{unit}<extra></extra>"));
        }
        plot.add_trace(max_trace);

        let mut min_trace = Scatter::new(times.clone(), min)
            .mode(Mode::Lines)
            .fill(Fill::ToNextY)
            .fill_color(height_band_color(height))
            .line(Line::new().color(height_color(height)).width(0.0))
            .name(&format!("{meters}m (Range)"));
        if let Some(unit) = hover_unit {
            min_trace = min_trace
                .hover_template(&format!("{meters}m Min: %{{y:.1f}}{unit}<extra></extra>"));
        }
        plot.add_trace(min_trace);
    }

    plot.set_layout(comparison_layout(title, y_title));
    Ok(plot)
}

fn comparison_layout(title: &str, y_title: &str) -> Layout {
    Layout::new()
        .title(Title::with_text(title))
        .x_axis(Axis::new().title(Title::with_text("Time")))
        .y_axis(Axis::new().title(Title::with_text(y_title)))
        .height(400)
        .hover_mode(HoverMode::XUnified)
}

/// A horizontal dashed gray line across the full plot width.
fn reference_line(y: f64) -> Shape {
    Shape::new()
        .shape_type(ShapeType::Line)
        .x_ref("paper")
        .y_ref("y")
        .x0(0.0)
        .x1(1.0)
        .y0(y)
        .y1(y)
        .opacity(0.5)
        .line(ShapeLine::new().color(NamedColor::Gray).dash(DashType::Dash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor_data::loader::load_sensor_data;
    use crate::types::parameter::expected_columns;
    use serde_json::Value;

    fn sample_table() -> SensorTable {
        let columns = expected_columns();
        let header = columns.join(",");
        let mut rows = Vec::new();
        for (i, minute) in [0, 10, 20].iter().enumerate() {
            let cells: Vec<String> = columns
                .iter()
                .map(|c| match c.as_str() {
                    "id_logger" => "IKRO-02".to_string(),
                    "date_time" => format!("2024-06-01 10:{minute:02}:00"),
                    _ => format!("{}.0", i + 1),
                })
                .collect();
            rows.push(cells.join(","));
        }
        let data = format!("{header}\n{}\n", rows.join("\n"));
        load_sensor_data(data.as_bytes()).unwrap().0
    }

    fn to_value(plot: &Plot) -> Value {
        serde_json::from_str(&plot.to_json()).unwrap()
    }

    #[test]
    fn temperature_chart_has_three_banded_trace_groups() {
        let plot = temperature_comparison(&sample_table()).unwrap();
        let value = to_value(&plot);
        let data = value["data"].as_array().unwrap();

        assert_eq!(data.len(), 9);
        assert_eq!(data[0]["name"], "4m (Avg)");
        assert_eq!(data[0]["mode"], "lines");
        assert_eq!(data[0]["line"]["width"], serde_json::json!(2.0));
        assert_eq!(data[1]["showlegend"], false);
        assert_eq!(
            data[1]["hovertemplate"],
            "4m Max: %{y:.1f}°C<extra></extra>"
        );
        assert_eq!(data[2]["fill"], "tonexty");
        assert_eq!(data[2]["name"], "4m (Range)");
        assert_eq!(data[3]["name"], "7m (Avg)");
        assert_eq!(data[8]["name"], "10m (Range)");

        assert_eq!(
            value["layout"]["title"]["text"],
            "Temperature Comparison by Height (°C)"
        );
        assert_eq!(value["layout"]["hovermode"], "x unified");
        assert_eq!(value["layout"]["height"], 400);
    }

    #[test]
    fn humidity_band_traces_have_no_hover_template() {
        let plot = humidity_comparison(&sample_table()).unwrap();
        let value = to_value(&plot);
        let data = value["data"].as_array().unwrap();

        assert_eq!(data.len(), 9);
        assert!(data[1].get("hovertemplate").is_none());
        assert_eq!(
            value["layout"]["yaxis"]["title"]["text"],
            "Relative Humidity (%)"
        );
    }

    #[test]
    fn wind_speed_chart_pairs_solid_avg_with_dotted_max() {
        let plot = wind_speed_comparison(&sample_table()).unwrap();
        let value = to_value(&plot);
        let data = value["data"].as_array().unwrap();

        assert_eq!(data.len(), 6);
        assert_eq!(data[0]["name"], "4m (Avg)");
        assert_eq!(data[1]["name"], "4m (Max)");
        assert_eq!(data[1]["line"]["dash"], "dot");
        assert_eq!(data[1]["line"]["width"], serde_json::json!(1.0));
        assert_eq!(data[4]["name"], "10m (Avg)");
    }

    #[test]
    fn wind_direction_chart_is_marker_only_with_reference_lines() {
        let plot = wind_direction(&sample_table(), Height::M7).unwrap();
        let value = to_value(&plot);
        let data = value["data"].as_array().unwrap();

        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["mode"], "markers");
        assert_eq!(data[0]["name"], "7m Wind Direction");
        assert_eq!(data[0]["marker"]["size"], 4);

        let layout = &value["layout"];
        assert_eq!(
            layout["title"]["text"],
            "Wind Direction at 7m Height (°)"
        );
        assert_eq!(layout["shapes"].as_array().unwrap().len(), 5);
        assert_eq!(layout["yaxis"]["range"], serde_json::json!([0.0, 360.0]));
        assert_eq!(layout["showlegend"], false);
        assert_eq!(layout["height"], 300);
    }

    #[test]
    fn missing_measurement_column_is_surfaced() {
        let columns: Vec<String> = expected_columns()
            .into_iter()
            .filter(|c| c != "ws10_max")
            .collect();
        let data = format!("{}\n", columns.join(","));
        // The loader itself refuses the file, one column short.
        assert!(load_sensor_data(data.as_bytes()).is_err());
    }

    #[test]
    fn x_values_serialize_as_iso_datetimes() {
        let plot = temperature_comparison(&sample_table()).unwrap();
        let value = to_value(&plot);
        assert_eq!(value["data"][0]["x"][0], "2024-06-01T10:00:00");
    }
}
