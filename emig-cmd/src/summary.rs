//! Headless summary of one expressed attribute.

use anyhow::Context;
use emig_core::label::format_count;
use emig_core::{AttributeName, MapConfig, MapSession};
use log::info;
use std::fmt::Write;
use std::fs;

fn read_file(path: &str) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
}

pub fn load_config(path: Option<&str>) -> anyhow::Result<MapConfig> {
    match path {
        Some(path) => MapConfig::from_json(&read_file(path)?)
            .with_context(|| format!("Invalid map configuration in {}", path)),
        None => Ok(MapConfig::default()),
    }
}

/// Load both files and express `attribute` (or the default one).
pub fn load_session(
    records_path: &str,
    regions_path: &str,
    attribute: Option<&str>,
    config: MapConfig,
) -> anyhow::Result<MapSession> {
    let records = emig_data::load_records(&read_file(records_path)?, &config.records)?;
    let features = emig_data::load_regions(&read_file(regions_path)?, &config.features)?;
    info!(
        "Loaded {} records and {} regions",
        records.len(),
        features.len()
    );

    let mut session = MapSession::new(features, &records, config);
    if let Some(name) = attribute {
        session.select_by_name(name)?;
    }
    Ok(session)
}

/// Print the join report, the class breaks and the bar order for `attribute`.
pub fn run_summary(
    records_path: &str,
    regions_path: &str,
    attribute: Option<&str>,
    config_path: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let session = load_session(records_path, regions_path, attribute, config)?;
    let output = if json {
        render_json(&session)?
    } else {
        render_table(&session)?
    };
    print!("{}", output);
    Ok(())
}

/// The latest view update, pretty-printed.
pub fn render_json(session: &MapSession) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(&*session.latest_update())?;
    out.push('\n');
    Ok(out)
}

/// Title, join counts, legend classes and ranked bars as plain text.
pub fn render_table(session: &MapSession) -> anyhow::Result<String> {
    let update = session.latest_update();
    let report = session.join_report();
    let mut out = String::new();

    writeln!(out, "{}", update.title)?;
    writeln!(
        out,
        "Joined {} regions; {} without data, {} unused records, {} duplicate keys",
        report.matched,
        report.unmatched_regions.len(),
        report.unused_records.len(),
        report.duplicate_keys.len()
    )?;

    writeln!(out)?;
    writeln!(out, "Classes:")?;
    for bucket in &update.legend {
        writeln!(
            out,
            "  {} {:>12} - {:<12} {}",
            bucket.index,
            format_count(bucket.lower),
            format_count(bucket.upper),
            bucket.color
        )?;
    }
    writeln!(out, "  - {:>27} {}", "no data", update.no_data_color)?;

    writeln!(out)?;
    writeln!(out, "Bars:")?;
    for bar in &update.bars {
        let value = bar
            .value
            .map(format_count)
            .unwrap_or_else(|| "no data".to_string());
        writeln!(
            out,
            "  {:>3}. {:<24} {:>12} {}",
            bar.rank + 1,
            bar.group_name,
            value,
            bar.color
        )?;
    }
    Ok(out)
}

pub fn list_attributes() {
    for attr in AttributeName::ALL {
        println!("{}", attr);
    }
}
