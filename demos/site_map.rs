use ikro::{DashboardSession, IkroError, DEFAULT_METADATA_PATH};
use std::env;

fn main() -> Result<(), IkroError> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_METADATA_PATH.to_string());
    let selected: Option<i64> = env::args().nth(2).and_then(|arg| arg.parse().ok());

    let mut session = DashboardSession::with_metadata_path(path);
    if let Some(id) = selected {
        session.select_site(id);
    }

    let summary = session.network_summary()?;
    println!(
        "{} sites across {} provinces / {} districts",
        summary.total_sites, summary.provinces, summary.districts
    );
    if let Some(year) = summary.earliest_installation {
        println!("Active since {year}");
    }
    println!("Top equipment:");
    for (brand, count) in &summary.top_equipment {
        println!("  {brand}: {count}");
    }

    let map = session.network_map()?;
    println!(
        "\nMap centered at {:.1}, {:.1} (zoom {:.1}) with {} markers",
        map.center.0,
        map.center.1,
        map.zoom,
        map.markers.len()
    );
    match map.highlighted_marker() {
        Some(marker) => println!("Highlighted: {}", marker.tooltip),
        None => println!("Site {} is not in the registry", session.selected_site()),
    }

    session
        .province_chart()?
        .write_html("province_distribution.html");
    println!("Wrote province_distribution.html");

    println!("\nSite directory:\n{}", session.site_directory()?);

    Ok(())
}
