//! One map session: the join, the selection, both views and the hover state.
//!
//! `MapSession::new` is the single setup routine for every page that shows
//! the choropleth. It joins the inputs, subscribes the coordinator to the
//! selection and registers the creation strokes of every map region and bar.

use crate::attribute::AttributeName;
use crate::classify::BucketScale;
use crate::config::MapConfig;
use crate::coordinator::{TransitionTicket, ViewSink, ViewSyncCoordinator, ViewUpdate};
use crate::error::SelectionError;
use crate::highlight::{ElementId, HighlightController, StrokeStyle, StyleChange};
use crate::join::{join_with_report, JoinReport};
use crate::label::{Label, LabelMeasure, Point, Size};
use crate::record::Record;
use crate::region::RegionFeature;
use crate::selection::SelectionState;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

pub struct MapSession {
    selection: SelectionState,
    coordinator: Rc<RefCell<ViewSyncCoordinator>>,
    highlight: HighlightController,
    report: JoinReport,
}

impl MapSession {
    pub fn new(features: Vec<RegionFeature>, records: &[Record], config: MapConfig) -> Self {
        let (joined, report) = join_with_report(features, records);
        let expressed = AttributeName::default();

        let mut highlight = HighlightController::new(config.highlight_stroke.clone(), config.label);
        let coordinator = ViewSyncCoordinator::new(joined, records, config.clone(), expressed);
        register_elements(&mut highlight, coordinator.latest(), &config);

        let coordinator = Rc::new(RefCell::new(coordinator));
        let mut selection = SelectionState::new(expressed);
        let dependent = Rc::clone(&coordinator);
        selection.subscribe(move |attr| {
            dependent.borrow_mut().on_attribute_changed(attr);
        });

        Self {
            selection,
            coordinator,
            highlight,
            report,
        }
    }

    pub fn expressed(&self) -> AttributeName {
        self.selection.get()
    }

    /// Express `attr` and return the resulting state of both views.
    pub fn select(&mut self, attr: AttributeName) -> Ref<'_, ViewUpdate> {
        self.selection.set(attr);
        self.latest_update()
    }

    pub fn select_by_name(&mut self, name: &str) -> Result<Ref<'_, ViewUpdate>, SelectionError> {
        self.selection.set_by_name(name)?;
        Ok(self.latest_update())
    }

    pub fn latest_update(&self) -> Ref<'_, ViewUpdate> {
        Ref::map(self.coordinator.borrow(), |c| c.latest())
    }

    pub fn scale(&self) -> Ref<'_, BucketScale> {
        Ref::map(self.coordinator.borrow(), |c| c.scale())
    }

    pub fn regions(&self) -> Ref<'_, [RegionFeature]> {
        Ref::map(self.coordinator.borrow(), |c| c.regions())
    }

    /// Register a view; it receives the current state right away.
    ///
    /// Sinks run while the coordinator is borrowed and must not call back
    /// into the session.
    pub fn subscribe_view<S>(&self, sink: S)
    where
        S: ViewSink + 'static,
    {
        self.coordinator.borrow_mut().subscribe(sink);
    }

    pub fn settle(&self, ticket: TransitionTicket) -> bool {
        self.coordinator.borrow_mut().settle(ticket)
    }

    /// For rendering layers that create extra elements or use other strokes.
    pub fn register_element(&mut self, element: ElementId, group_name: &str, style: StrokeStyle) {
        self.highlight.register_element(element, group_name, style);
    }

    pub fn highlight(&mut self, group_name: &str) -> Vec<StyleChange> {
        let coordinator = self.coordinator.borrow();
        self.highlight.on_highlight(group_name, coordinator.latest())
    }

    pub fn dehighlight(&mut self, group_name: &str) -> Vec<StyleChange> {
        self.highlight.on_dehighlight(group_name)
    }

    pub fn move_label(
        &mut self,
        cursor: Point,
        viewport: Size,
        measure: &dyn LabelMeasure,
    ) -> Option<Point> {
        self.highlight.on_move(cursor, viewport, measure)
    }

    pub fn label(&self) -> Option<&Label> {
        self.highlight.label()
    }

    pub fn highlighter(&self) -> &HighlightController {
        &self.highlight
    }

    pub fn join_report(&self) -> &JoinReport {
        &self.report
    }
}

fn register_elements(highlight: &mut HighlightController, update: &ViewUpdate, config: &MapConfig) {
    for region in &update.regions {
        highlight.register_element(
            ElementId::map(region.element_key.clone()),
            &region.group_name,
            config.region_stroke.clone(),
        );
    }
    for bar in &update.bars {
        highlight.register_element(
            ElementId::bar(bar.region_key.clone()),
            &bar.group_name,
            config.bar_stroke.clone(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> MapSession {
        let records = vec![
            Record::new("PL", "Poland")
                .with_value(AttributeName::RussianFederation, 1200.0)
                .with_value(AttributeName::Ukraine, 200.0),
            Record::new("RO", "Romania").with_value(AttributeName::RussianFederation, 800.0),
        ];
        let features = vec![
            RegionFeature::new("PL", "Poland", "Poland"),
            RegionFeature::new("RO", "Romania", "Romania"),
            RegionFeature::new("IS", "Iceland", "Iceland"),
        ];
        MapSession::new(features, &records, MapConfig::default())
    }

    #[test]
    fn select_updates_every_view() {
        let mut s = session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        s.subscribe_view(move |u: &ViewUpdate| sink.borrow_mut().push(u.attribute));
        let generation = s.select(AttributeName::Ukraine).generation;
        assert_eq!(generation, 2);
        assert_eq!(s.expressed(), AttributeName::Ukraine);
        assert_eq!(
            *seen.borrow(),
            vec![AttributeName::RussianFederation, AttributeName::Ukraine]
        );
    }

    #[test]
    fn invalid_name_leaves_views_alone() {
        let mut s = session();
        assert!(s.select_by_name("Mars").is_err());
        assert_eq!(s.latest_update().generation, 1);
    }

    #[test]
    fn registers_one_element_per_region_and_bar() {
        let s = session();
        assert_eq!(s.highlighter().store().len(), 5);
        assert_eq!(s.join_report().unmatched_regions, vec!["IS".to_string()]);
    }

    #[test]
    fn hover_round_trip_restores_strokes() {
        let mut s = session();
        let config = MapConfig::default();
        s.highlight("Poland");
        s.select(AttributeName::Ukraine);
        let restored = s.dehighlight("Poland");
        assert_eq!(restored.len(), 2);
        assert_eq!(restored[0].style, config.region_stroke);
        assert_eq!(restored[1].style, config.bar_stroke);
        assert!(s.label().is_none());
    }
}
