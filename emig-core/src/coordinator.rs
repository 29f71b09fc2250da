//! Re-encodes the map and the bar chart whenever the expressed attribute changes.
//!
//! Both views are two encodings of the same joined dataset. Each change
//! produces a [`ViewUpdate`] describing the final state the views must reach;
//! animating towards it is up to the view. Updates carry a generation number so
//! a view finishing an old transition can tell it has been superseded.

use crate::attribute::AttributeName;
use crate::classify::{Bucket, BucketScale, Class};
use crate::config::{ChartFrame, MapConfig, TransitionConfig};
use crate::record::Record;
use crate::region::RegionFeature;
use log::{debug, info};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Receives every published [`ViewUpdate`].
pub trait ViewSink {
    fn apply(&mut self, update: &ViewUpdate);
}

impl<F> ViewSink for F
where
    F: FnMut(&ViewUpdate),
{
    fn apply(&mut self, update: &ViewUpdate) {
        self(update)
    }
}

/// Fixed linear scale from values to bar-top pixel offsets, clamped to its range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl BarScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Bars grow upwards: the domain start maps to the bottom of the frame.
    pub fn for_frame(domain: [f64; 2], frame: &ChartFrame) -> Self {
        Self::new(domain, [frame.inner_height(), 0.0])
    }

    pub fn scale(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if d0 == d1 {
            return r0;
        }
        let t = ((value - d0) / (d1 - d0)).clamp(0.0, 1.0);
        r0 + (r1 - r0) * t
    }
}

/// Map encoding of one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionEncoding {
    /// Unique per map element; equals `region_key` unless the key repeats.
    pub element_key: String,
    pub region_key: String,
    pub group_name: String,
    pub display_name: String,
    pub value: Option<f64>,
    pub class: Class,
    pub color: String,
}

/// Bar chart encoding of one record, already in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEncoding {
    pub region_key: String,
    pub group_name: String,
    pub value: Option<f64>,
    pub class: Class,
    pub color: String,
    pub rank: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub delay_ms: u32,
}

/// Final state of both views for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewUpdate {
    pub generation: u64,
    pub attribute: AttributeName,
    pub title: String,
    pub regions: Vec<RegionEncoding>,
    pub bars: Vec<BarEncoding>,
    pub legend: Vec<Bucket>,
    pub no_data_color: String,
    pub transition: TransitionConfig,
}

impl ViewUpdate {
    pub fn ticket(&self) -> TransitionTicket {
        TransitionTicket {
            generation: self.generation,
        }
    }

    /// Value shown for `group_name`, taken from its first map region, then its bar.
    pub fn value_for_group(&self, group_name: &str) -> Option<f64> {
        self.regions
            .iter()
            .find(|r| r.group_name == group_name)
            .map(|r| r.value)
            .or_else(|| {
                self.bars
                    .iter()
                    .find(|b| b.group_name == group_name)
                    .map(|b| b.value)
            })
            .flatten()
    }

    pub fn display_name_for_group(&self, group_name: &str) -> Option<&str> {
        self.regions
            .iter()
            .find(|r| r.group_name == group_name)
            .map(|r| r.display_name.as_str())
    }
}

/// Handle a view keeps while animating towards one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTicket {
    generation: u64,
}

pub struct ViewSyncCoordinator {
    regions: Vec<RegionFeature>,
    element_keys: Vec<String>,
    rows: Vec<Record>,
    config: MapConfig,
    bar_scale: BarScale,
    scale: BucketScale,
    latest: ViewUpdate,
    settled: Option<u64>,
    sinks: Vec<Box<dyn ViewSink>>,
}

impl ViewSyncCoordinator {
    /// `regions` must already be joined. Bars are built from `records`, one
    /// per distinct key (first row wins, as in the join).
    pub fn new(
        regions: Vec<RegionFeature>,
        records: &[Record],
        config: MapConfig,
        expressed: AttributeName,
    ) -> Self {
        let mut seen = HashSet::new();
        let rows: Vec<Record> = records
            .iter()
            .filter(|r| seen.insert(r.region_key.clone()))
            .cloned()
            .collect();
        let bar_scale = BarScale::for_frame(config.bar_domain, &config.chart);
        let scale = build_scale(&regions, &config, expressed);
        let element_keys = element_keys(&regions);
        let mut coordinator = Self {
            regions,
            element_keys,
            rows,
            config,
            bar_scale,
            scale,
            latest: ViewUpdate {
                generation: 0,
                attribute: expressed,
                title: String::new(),
                regions: Vec::new(),
                bars: Vec::new(),
                legend: Vec::new(),
                no_data_color: String::new(),
                transition: TransitionConfig::default(),
            },
            settled: None,
            sinks: Vec::new(),
        };
        coordinator.latest = coordinator.encode(expressed, 1);
        coordinator
    }

    /// Register a view. It immediately receives the current state.
    pub fn subscribe<S>(&mut self, mut sink: S)
    where
        S: ViewSink + 'static,
    {
        sink.apply(&self.latest);
        self.sinks.push(Box::new(sink));
    }

    /// Recompute every encoding for `expressed` and publish it to all views.
    pub fn on_attribute_changed(&mut self, expressed: AttributeName) -> &ViewUpdate {
        self.scale = build_scale(&self.regions, &self.config, expressed);
        let generation = self.latest.generation + 1;
        self.latest = self.encode(expressed, generation);
        info!(
            "[EMIG] coordinator: {} -> generation {}, domain {:?}",
            expressed,
            generation,
            self.scale.domain()
        );
        for sink in self.sinks.iter_mut() {
            sink.apply(&self.latest);
        }
        &self.latest
    }

    pub fn latest(&self) -> &ViewUpdate {
        &self.latest
    }

    pub fn scale(&self) -> &BucketScale {
        &self.scale
    }

    pub fn regions(&self) -> &[RegionFeature] {
        &self.regions
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Report that a view finished animating towards `ticket`.
    ///
    /// Returns `false` when a newer update was published in the meantime; the
    /// caller should drop whatever it was about to finalize.
    pub fn settle(&mut self, ticket: TransitionTicket) -> bool {
        if ticket.generation != self.latest.generation {
            debug!(
                "[EMIG] coordinator: generation {} superseded by {}",
                ticket.generation, self.latest.generation
            );
            return false;
        }
        self.settled = Some(ticket.generation);
        true
    }

    pub fn is_settled(&self) -> bool {
        self.settled == Some(self.latest.generation)
    }

    fn encode(&self, expressed: AttributeName, generation: u64) -> ViewUpdate {
        let regions = self
            .regions
            .iter()
            .zip(&self.element_keys)
            .map(|(region, element_key)| {
                let value = region.value(expressed);
                let class = self.scale.classify(value);
                RegionEncoding {
                    element_key: element_key.clone(),
                    region_key: region.region_key.clone(),
                    group_name: region.group_name.clone(),
                    display_name: region.display_name.clone(),
                    value,
                    class,
                    color: self.scale.color(class).to_string(),
                }
            })
            .collect();

        ViewUpdate {
            generation,
            attribute: expressed,
            title: format!(
                "Migrants from {} by country of residence (thousands)",
                expressed
            ),
            regions,
            bars: self.encode_bars(expressed),
            legend: self.scale.buckets(),
            no_data_color: self.scale.no_data_color().to_string(),
            transition: self.config.transition,
        }
    }

    fn encode_bars(&self, expressed: AttributeName) -> Vec<BarEncoding> {
        let frame = &self.config.chart;
        let n = self.rows.len();
        if n == 0 {
            return Vec::new();
        }
        let slot = frame.inner_width() / n as f64;

        let mut order: Vec<usize> = (0..n).collect();
        // Stable: equal values keep record order.
        order.sort_by(|&a, &b| {
            descending_with_missing_last(self.rows[a].value(expressed), self.rows[b].value(expressed))
        });

        order
            .into_iter()
            .enumerate()
            .map(|(rank, i)| {
                let row = &self.rows[i];
                let value = row.value(expressed);
                let class = self.scale.classify(value);
                let top = match value {
                    Some(v) => self.bar_scale.scale(v),
                    None => frame.inner_height(),
                };
                BarEncoding {
                    region_key: row.region_key.clone(),
                    group_name: row.group_name.clone(),
                    value,
                    class,
                    color: self.scale.color(class).to_string(),
                    rank,
                    x: frame.left_padding + rank as f64 * slot,
                    y: top + frame.top_bottom_padding,
                    width: (slot - 1.0).max(0.0),
                    height: frame.inner_height() - top,
                    delay_ms: rank as u32 * self.config.transition.stagger_ms,
                }
            })
            .collect()
    }
}

fn build_scale(regions: &[RegionFeature], config: &MapConfig, expressed: AttributeName) -> BucketScale {
    BucketScale::build(
        regions.iter().filter_map(|r| r.value(expressed)),
        &config.class_colors,
        &config.no_data_color,
    )
}

/// Repeated keys get a `#n` suffix from their second occurrence on.
fn element_keys(regions: &[RegionFeature]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    regions
        .iter()
        .map(|region| {
            let n = seen.entry(region.region_key.as_str()).or_insert(0);
            *n += 1;
            if *n == 1 {
                region.region_key.clone()
            } else {
                format!("{}#{}", region.region_key, n)
            }
        })
        .collect()
}

fn descending_with_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join::join;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn coordinator(records: &[Record]) -> ViewSyncCoordinator {
        let regions = records
            .iter()
            .map(|r| RegionFeature::new(r.region_key.clone(), r.group_name.clone(), r.group_name.clone()))
            .collect();
        ViewSyncCoordinator::new(
            join(regions, records),
            records,
            MapConfig::default(),
            AttributeName::RussianFederation,
        )
    }

    #[test]
    fn bar_scale_clamps_to_range() {
        let scale = BarScale::new([0.0, 100.0], [450.0, 0.0]);
        assert_eq!(scale.scale(0.0), 450.0);
        assert_eq!(scale.scale(50.0), 225.0);
        assert_eq!(scale.scale(250.0), 0.0, "above the domain clamps to the top");
        assert_eq!(scale.scale(-10.0), 450.0, "below the domain clamps to the bottom");
    }

    #[test]
    fn bar_scale_with_empty_domain_does_not_divide_by_zero() {
        let scale = BarScale::new([5.0, 5.0], [450.0, 0.0]);
        assert_eq!(scale.scale(5.0), 450.0);
    }

    #[test]
    fn repeated_region_keys_get_distinct_element_keys() {
        let records = vec![Record::new("FR", "France").with_value(AttributeName::Poland, 95.0)];
        let regions = vec![
            RegionFeature::new("FR", "France", "France"),
            RegionFeature::new("FR", "France", "Corsica"),
            RegionFeature::new("", "Iceland", "Iceland"),
        ];
        let c = ViewSyncCoordinator::new(
            join(regions, &records),
            &records,
            MapConfig::default(),
            AttributeName::Poland,
        );
        let keys: Vec<&str> = c.latest().regions.iter().map(|r| r.element_key.as_str()).collect();
        assert_eq!(keys, vec!["FR", "FR#2", ""]);
        assert!(c.latest().regions[..2].iter().all(|r| r.value == Some(95.0)));
    }

    #[test]
    fn bars_sort_descending_and_stable() {
        let records = vec![
            Record::new("A", "A").with_value(AttributeName::Ukraine, 10.0),
            Record::new("B", "B").with_value(AttributeName::Ukraine, 30.0),
            Record::new("C", "C").with_value(AttributeName::Ukraine, 10.0),
            Record::new("D", "D"),
            Record::new("E", "E").with_value(AttributeName::Ukraine, 10.0),
        ];
        let mut c = coordinator(&records);
        for _ in 0..3 {
            let update = c.on_attribute_changed(AttributeName::Ukraine);
            let order: Vec<&str> = update.bars.iter().map(|b| b.region_key.as_str()).collect();
            assert_eq!(order, vec!["B", "A", "C", "E", "D"]);
        }

        let frame = MapConfig::default().chart;
        let missing = &c.latest().bars[4];
        assert_eq!(missing.region_key, "D");
        assert_eq!(missing.value, None);
        assert_eq!(missing.class, Class::NoData);
        assert_eq!(missing.height, 0.0, "no-data bars are drawn flat");
        assert_eq!(missing.y, frame.inner_height() + frame.top_bottom_padding);
        assert_eq!(missing.color, MapConfig::default().no_data_color);
    }

    #[test]
    fn bar_geometry_follows_rank_and_value() {
        let records = vec![
            Record::new("A", "A").with_value(AttributeName::RussianFederation, 3500.0),
            Record::new("B", "B").with_value(AttributeName::RussianFederation, 9000.0),
        ];
        let c = coordinator(&records);
        let bars = &c.latest().bars;
        let frame = ChartFrame::default();
        assert_eq!(bars[0].region_key, "B");
        assert_eq!(bars[0].x, frame.left_padding);
        assert_eq!(bars[1].x, frame.left_padding + frame.inner_width() / 2.0);
        assert_eq!(bars[0].height, frame.inner_height(), "clamped to the frame");
        assert_eq!(bars[1].height, frame.inner_height());
        assert_eq!(bars[1].delay_ms, 20);
    }

    #[test]
    fn subscribers_receive_current_and_later_updates() {
        let records = vec![Record::new("A", "A").with_value(AttributeName::Poland, 1.0)];
        let mut c = coordinator(&records);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        c.subscribe(move |u: &ViewUpdate| sink.borrow_mut().push((u.generation, u.attribute)));
        c.on_attribute_changed(AttributeName::Poland);
        assert_eq!(
            *seen.borrow(),
            vec![(1, AttributeName::RussianFederation), (2, AttributeName::Poland)]
        );
    }

    #[test]
    fn newest_selection_wins_over_unfinished_transition() {
        let records = vec![Record::new("A", "A").with_value(AttributeName::Poland, 1.0)];
        let mut c = coordinator(&records);
        let first = c.on_attribute_changed(AttributeName::Poland).ticket();
        let second = c.on_attribute_changed(AttributeName::Romania).ticket();
        assert!(!c.settle(first), "stale transition must be discarded");
        assert!(!c.is_settled());
        assert!(c.settle(second));
        assert!(c.is_settled());
        assert_eq!(c.latest().attribute, AttributeName::Romania);
    }

    #[test]
    fn map_and_bars_share_colors() {
        let records = vec![
            Record::new("PL", "Poland").with_value(AttributeName::RussianFederation, 1200.0),
            Record::new("RO", "Romania").with_value(AttributeName::RussianFederation, 800.0),
        ];
        let c = coordinator(&records);
        let update = c.latest();
        for bar in &update.bars {
            let region = update
                .regions
                .iter()
                .find(|r| r.group_name == bar.group_name)
                .unwrap();
            assert_eq!(region.color, bar.color);
            assert_eq!(region.class, bar.class);
        }
    }
}
