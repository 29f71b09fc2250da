//! Migrants by Country of Residence
//!
//! A choropleth map of European countries coordinated with a bar chart.
//! The dropdown picks an origin country (the expressed attribute); both
//! views then recolor into the same quantile classes and the bars re-sort.
//! Hovering a region or a bar highlights every element of that country in
//! both views and shows a floating label that follows the cursor.
//!
//! Data flow:
//! 1. `build.rs` copies `migrants.csv`, `europe_regions.geojson` and
//!    `world_countries.geojson` into `OUT_DIR`.
//! 2. `include_str!` embeds the files into the WASM binary.
//! 3. On mount, the records and regions are parsed, the regions and the
//!    world background are projected by D3, and a `MapSession` joins and
//!    classifies them. A failure names the step that broke.
//! 4. Every selection publishes a `ViewUpdate` that the map, the chart and
//!    the legend render from.

use dioxus::prelude::*;
use emig_chart_ui::components::{
    AttributeSelector, BarChart, ChartHeader, ErrorDisplay, InfoLabel, Legend, LoadingSpinner,
    RegionMap,
};
use emig_chart_ui::js_bridge::{self, ProjectedMap};
use emig_chart_ui::state::{AppState, LoadFailure, LoadStage};
use emig_core::{MapConfig, MapSession};

/// Migrant stock per residence country, in thousands.
const MIGRANTS_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/migrants.csv"));
/// Residence country outlines.
const REGIONS_GEOJSON: &str = include_str!(concat!(env!("OUT_DIR"), "/europe_regions.geojson"));
/// Countries drawn behind the regions for context. May be empty.
const WORLD_GEOJSON: &str = include_str!(concat!(env!("OUT_DIR"), "/world_countries.geojson"));

fn main() {
    if let Err(e) = dioxus_logger::init(dioxus_logger::tracing::Level::INFO) {
        web_sys::console::error_1(&format!("failed to init logger: {}", e).into());
    }
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("choropleth-root"))
        .launch(App);
}

/// Tag an error chain with the step it came from.
fn at(stage: LoadStage) -> impl Fn(anyhow::Error) -> LoadFailure {
    move |e| LoadFailure::new(stage, format!("{:#}", e))
}

/// Parse the fixtures, project the map and build the session.
fn load_session(config: &MapConfig) -> Result<(MapSession, ProjectedMap), LoadFailure> {
    let records =
        emig_data::load_records(MIGRANTS_CSV, &config.records).map_err(at(LoadStage::Records))?;
    let features = emig_data::load_regions(REGIONS_GEOJSON, &config.features)
        .map_err(at(LoadStage::Regions))?;
    let background = emig_data::load_background(WORLD_GEOJSON).map_err(at(LoadStage::Background))?;
    log::info!(
        "[EMIG] loaded {} records and {} regions",
        records.len(),
        features.len()
    );

    // Paths come back in feature order, which the join preserves
    let collection = emig_data::to_feature_collection(&features);
    let projection = js_bridge::project_regions(&collection, background.as_ref(), config)
        .ok_or_else(|| LoadFailure::new(LoadStage::Projection, "D3 projection unavailable"))?;

    let session = MapSession::new(features, &records, config.clone());
    let report = session.join_report();
    if !report.unmatched_regions.is_empty() {
        log::info!(
            "[EMIG] {} regions without data: {:?}",
            report.unmatched_regions.len(),
            report.unmatched_regions
        );
    }
    Ok((session, projection))
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Build the session on mount
    use_effect(move || {
        js_bridge::init_projection();
        let config = state.config.peek().clone();
        match load_session(&config) {
            Ok((session, projection)) => state.attach(session, projection),
            Err(failure) => {
                log::error!("[EMIG] {}", failure);
                state.failure.set(Some(failure));
                state.loading.set(false);
            }
        }
    });

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader {
                fallback_title: "Migrants by country of residence".to_string(),
                unit_description: "Thousands of people living outside their country of birth".to_string(),
            }

            if let Some(failure) = (state.failure)() {
                ErrorDisplay { failure }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                AttributeSelector {}

                div {
                    style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-start;",
                    RegionMap {}
                    BarChart {}
                }

                Legend {}
                InfoLabel {}
            }
        }
    }
}
