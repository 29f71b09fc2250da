//! CSV loading for migrant stock records.
//!
//! Expected format (with headers): a key column, a name column and one
//! column per attribute, named exactly like the attribute.
//!
//! ```text
//! CountryCode,Country,Russian Federation,Ukraine,Kazakhstan,Poland,Romania
//! PL,Poland,9.0,209.3,1.3,,3.6
//! ```

use anyhow::{bail, Context};
use emig_core::config::RecordSchema;
use emig_core::{AttributeName, Record};

/// Parse `csv_data` into records, in file order.
///
/// Cells that are empty or not numbers become no data. Rows without a key
/// are skipped. A missing attribute column only logs a warning; every row
/// then has no data for it.
pub fn load_records(csv_data: &str, schema: &RecordSchema) -> anyhow::Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = rdr.headers().context("Failed to read CSV headers")?.clone();
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);

    let Some(key_col) = position(&schema.key_column) else {
        bail!("CSV has no key column {:?}", schema.key_column);
    };
    let name_col = position(&schema.name_column);
    if name_col.is_none() {
        log::warn!(
            "[EMIG] records: no name column {:?}, using keys as group names",
            schema.name_column
        );
    }

    let attr_cols: Vec<(AttributeName, Option<usize>)> = AttributeName::ALL
        .iter()
        .map(|&attr| (attr, position(attr.as_str())))
        .collect();
    for (attr, col) in &attr_cols {
        if col.is_none() {
            log::warn!("[EMIG] records: no column for attribute {:?}", attr.as_str());
        }
    }

    let mut records = Vec::new();
    let mut skipped = 0u32;
    for result in rdr.records() {
        let row = result.context("Failed to read CSV row")?;
        let key = row.get(key_col).unwrap_or("").trim();
        if key.is_empty() {
            skipped += 1;
            continue;
        }
        let name = name_col
            .and_then(|c| row.get(c))
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(key);

        let record = Record::from_cells(key, name, |attr| {
            attr_cols
                .iter()
                .find(|(a, _)| *a == attr)
                .and_then(|(_, col)| *col)
                .and_then(|c| row.get(c))
        });
        records.push(record);
    }

    log::info!(
        "[EMIG] records: Loaded {} records, skipped {} without a key",
        records.len(),
        skipped
    );
    Ok(records)
}
