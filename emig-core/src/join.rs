//! Left join of tabular records onto map regions.
//!
//! Keys are compared exactly (case-sensitive). Regions without a record keep
//! their geometry and stay unattributed; they are drawn with the no-data color.
//! When several records share a key the first one wins.

use crate::record::Record;
use crate::region::RegionFeature;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Summary of a join, mostly useful for diagnosing key mismatches.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinReport {
    /// Number of regions that received attributes.
    pub matched: usize,
    /// Keys of regions with no record, in region order.
    pub unmatched_regions: Vec<String>,
    /// Keys of records no region asked for, in record order.
    pub unused_records: Vec<String>,
    /// Keys that appeared on more than one record (later rows were ignored).
    pub duplicate_keys: Vec<String>,
}

/// Join `records` onto `features`, returning the features in their original order.
pub fn join(features: Vec<RegionFeature>, records: &[Record]) -> Vec<RegionFeature> {
    join_with_report(features, records).0
}

pub fn join_with_report(
    mut features: Vec<RegionFeature>,
    records: &[Record],
) -> (Vec<RegionFeature>, JoinReport) {
    let mut report = JoinReport::default();

    let mut index: HashMap<&str, &Record> = HashMap::with_capacity(records.len());
    for record in records {
        match index.entry(record.region_key.as_str()) {
            Entry::Occupied(_) => {
                warn!(
                    "[EMIG] join: duplicate record key {:?}, keeping the first row",
                    record.region_key
                );
                report.duplicate_keys.push(record.region_key.clone());
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
    }

    let mut used: HashSet<&str> = HashSet::new();
    for feature in features.iter_mut() {
        match index.get(feature.region_key.as_str()) {
            Some(&record) => {
                feature.attributes = Some(record.values);
                used.insert(record.region_key.as_str());
                report.matched += 1;
            }
            None => {
                debug!("[EMIG] join: no record for region {:?}", feature.region_key);
                report.unmatched_regions.push(feature.region_key.clone());
            }
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for record in records {
        let key = record.region_key.as_str();
        if !used.contains(key) && seen.insert(key) {
            report.unused_records.push(record.region_key.clone());
        }
    }

    info!(
        "[EMIG] join: {} of {} regions matched, {} records unused",
        report.matched,
        features.len(),
        report.unused_records.len()
    );
    (features, report)
}
