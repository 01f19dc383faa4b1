use ikro::{DashboardSession, IkroError};
use std::env;

fn main() -> Result<(), IkroError> {
    configure_polars_display();
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "sensor_export.csv".to_string());

    let mut session = DashboardSession::new();
    let report = session.load_sensor_file(path.as_ref())?;
    println!(
        "Loaded {} rows from {path} ({} dropped)",
        report.rows, report.dropped_rows
    );
    if let Some((first, last)) = report.time_range {
        println!("Covering {first} to {last}");
    }

    let latest = session.latest()?;
    println!("\nLatest reading at {}:", latest.timestamp);
    for readings in &latest.heights {
        println!(
            "  {:>3}: {} °C (avg {}), {} % RH, wind {} m/s",
            readings.height.to_string(),
            fmt(readings.temperature.now),
            fmt(readings.temperature.avg),
            fmt(readings.humidity.now),
            fmt(readings.wind_speed.avg),
        );
        if let Some(cardinal) = readings.cardinal()? {
            println!("       wind from {cardinal}");
        }
    }

    println!("\nRecent readings:\n{}", session.recent_readings(5)?);

    session
        .temperature_chart()?
        .write_html("temperature_comparison.html");
    println!("Wrote temperature_comparison.html");

    let export = session.export_summary_csv()?;
    println!("\nSummary export ({}):\n{}", export.filename, export.contents);

    Ok(())
}

fn fmt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.1}"))
        .unwrap_or_else(|| "-".to_string())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
}
