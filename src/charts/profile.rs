//! Vertical profile of the latest reading: how a parameter varies with
//! measurement height right now.

use crate::charts::error::ChartError;
use crate::sensor_data::table::SensorTable;
use crate::types::height::Height;
use crate::types::parameter::{Parameter, Statistic};
use plotly::common::color::NamedColor;
use plotly::common::{DashType, Line, Marker, Mode, Title};
use plotly::layout::{Axis, Layout};
use plotly::{Plot, Scatter};

/// Min, average and max of the latest reading plotted against height.
pub fn vertical_profile(table: &SensorTable, parameter: Parameter) -> Result<Plot, ChartError> {
    let latest = table.latest()?;
    let heights: Vec<u8> = Height::ALL.iter().map(|h| h.meters()).collect();
    let series = |statistic: Statistic| -> Vec<Option<f64>> {
        Height::ALL
            .iter()
            .map(|h| latest.stats(parameter, *h).get(statistic))
            .collect()
    };

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(series(Statistic::Min), heights.clone())
            .mode(Mode::LinesMarkers)
            .name("Minimum")
            .line(Line::new().color(NamedColor::Blue).dash(DashType::Dash))
            .marker(Marker::new().size(8)),
    );
    plot.add_trace(
        Scatter::new(series(Statistic::Avg), heights.clone())
            .mode(Mode::LinesMarkers)
            .name("Average")
            .line(Line::new().color(NamedColor::Red).width(3.0))
            .marker(Marker::new().size(10)),
    );
    plot.add_trace(
        Scatter::new(series(Statistic::Max), heights)
            .mode(Mode::LinesMarkers)
            .name("Maximum")
            .line(Line::new().color(NamedColor::Green).dash(DashType::Dash))
            .marker(Marker::new().size(8)),
    );

    let label = parameter.label();
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(format!("Vertical Profile - {label}")))
            .x_axis(Axis::new().title(Title::with_text(format!(
                "{label} ({})",
                parameter.unit()
            ))))
            .y_axis(
                Axis::new()
                    .title(Title::with_text("Height (m)"))
                    .tick_values(vec![4.0, 7.0, 10.0]),
            )
            .height(400),
    );
    Ok(plot)
}
