//! Linked hover highlighting across the map and the bar chart.
//!
//! Every rendered element registers the stroke it was created with. Hovering
//! a group paints all of its elements with the highlight stroke; leaving it
//! restores each element from that creation snapshot, never from whatever
//! the views currently show.

use crate::config::LabelOffsets;
use crate::coordinator::ViewUpdate;
use crate::label::{place_label, Label, LabelMeasure, Point, Size};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub stroke: String,
    pub stroke_width: f64,
}

impl StrokeStyle {
    pub fn new(stroke: impl Into<String>, stroke_width: f64) -> Self {
        Self {
            stroke: stroke.into(),
            stroke_width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Map,
    Bar,
}

/// A rendered element: which view it lives in and the region key it encodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ElementId {
    pub view: ViewKind,
    pub key: String,
}

impl ElementId {
    pub fn map(key: impl Into<String>) -> Self {
        Self {
            view: ViewKind::Map,
            key: key.into(),
        }
    }

    pub fn bar(key: impl Into<String>) -> Self {
        Self {
            view: ViewKind::Bar,
            key: key.into(),
        }
    }
}

/// Stroke an element had when it was created. Read-only once captured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleSnapshot {
    style: StrokeStyle,
}

impl StyleSnapshot {
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

#[derive(Debug, Clone)]
struct Registered {
    group_name: String,
    snapshot: StyleSnapshot,
}

/// Side map from element to its creation snapshot and group.
#[derive(Debug, Clone, Default)]
pub struct StyleStore {
    entries: HashMap<ElementId, Registered>,
    order: Vec<ElementId>,
}

impl StyleStore {
    /// Capture `style` for `element`.
    ///
    /// Returns `false`, keeping the first snapshot, if the element was
    /// already registered.
    pub fn capture(&mut self, element: ElementId, group_name: &str, style: StrokeStyle) -> bool {
        if self.entries.contains_key(&element) {
            return false;
        }
        self.order.push(element.clone());
        self.entries.insert(
            element,
            Registered {
                group_name: group_name.to_string(),
                snapshot: StyleSnapshot { style },
            },
        );
        true
    }

    pub fn snapshot(&self, element: &ElementId) -> Option<&StyleSnapshot> {
        self.entries.get(element).map(|r| &r.snapshot)
    }

    /// Elements of `group_name`, in registration order.
    pub fn group<'a>(&'a self, group_name: &'a str) -> impl Iterator<Item = &'a ElementId> + 'a {
        self.order
            .iter()
            .filter(move |id| self.entries[*id].group_name == group_name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A stroke the rendering layer must apply to one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleChange {
    pub element: ElementId,
    pub style: StrokeStyle,
}

#[derive(Debug, Clone)]
pub struct HighlightController {
    store: StyleStore,
    current: HashMap<ElementId, StrokeStyle>,
    highlight_style: StrokeStyle,
    offsets: LabelOffsets,
    label: Option<Label>,
}

impl HighlightController {
    pub fn new(highlight_style: StrokeStyle, offsets: LabelOffsets) -> Self {
        Self {
            store: StyleStore::default(),
            current: HashMap::new(),
            highlight_style,
            offsets,
            label: None,
        }
    }

    /// Called by the rendering layer when it creates an element.
    pub fn register_element(&mut self, element: ElementId, group_name: &str, style: StrokeStyle) {
        if self.store.capture(element.clone(), group_name, style.clone()) {
            self.current.insert(element, style);
        }
    }

    pub fn store(&self) -> &StyleStore {
        &self.store
    }

    /// Stroke currently applied to `element`.
    pub fn current_style(&self, element: &ElementId) -> Option<&StrokeStyle> {
        self.current.get(element)
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Highlight every element of `group_name` and show its label.
    ///
    /// Any label already on screen is replaced.
    pub fn on_highlight(&mut self, group_name: &str, update: &ViewUpdate) -> Vec<StyleChange> {
        debug!("[EMIG] highlight: {}", group_name);
        let changes = self.restyle_group(group_name, |_, highlight| highlight.clone());

        let region_name = update
            .display_name_for_group(group_name)
            .unwrap_or(group_name);
        self.label = Some(Label::new(
            group_name,
            update.value_for_group(group_name),
            update.attribute.as_str(),
            region_name,
        ));
        changes
    }

    /// Restore every element of `group_name` to its creation stroke and drop the label.
    pub fn on_dehighlight(&mut self, group_name: &str) -> Vec<StyleChange> {
        debug!("[EMIG] dehighlight: {}", group_name);
        self.label = None;
        self.restyle_group(group_name, |snapshot, _| snapshot.style().clone())
    }

    /// Move the visible label next to `cursor`, measuring it first.
    ///
    /// Returns the new top-left corner, or `None` when there is no label or
    /// it cannot be measured yet.
    pub fn on_move(
        &mut self,
        cursor: Point,
        viewport: Size,
        measure: &dyn LabelMeasure,
    ) -> Option<Point> {
        let offsets = self.offsets;
        let label = self.label.as_mut()?;
        let size = measure.measure(label)?;
        let position = place_label(cursor, size, viewport, &offsets);
        label.position = Some(position);
        Some(position)
    }

    fn restyle_group<F>(&mut self, group_name: &str, pick: F) -> Vec<StyleChange>
    where
        F: Fn(&StyleSnapshot, &StrokeStyle) -> StrokeStyle,
    {
        let mut changes = Vec::new();
        for element in self.store.group(group_name) {
            let Some(snapshot) = self.store.snapshot(element) else {
                continue;
            };
            let style = pick(snapshot, &self.highlight_style);
            self.current.insert(element.clone(), style.clone());
            changes.push(StyleChange {
                element: element.clone(),
                style,
            });
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeName;
    use crate::config::MapConfig;
    use crate::coordinator::ViewSyncCoordinator;
    use crate::join::join;
    use crate::record::Record;
    use crate::region::RegionFeature;

    fn fixture() -> (ViewSyncCoordinator, HighlightController) {
        let records = vec![
            Record::new("PL", "Poland").with_value(AttributeName::RussianFederation, 1200.0),
            Record::new("RO", "Romania").with_value(AttributeName::RussianFederation, 800.0),
        ];
        let regions = vec![
            RegionFeature::new("PL", "Poland", "Republic of Poland"),
            RegionFeature::new("RO", "Romania", "Romania"),
        ];
        let config = MapConfig::default();
        let coordinator = ViewSyncCoordinator::new(
            join(regions, &records),
            &records,
            config.clone(),
            AttributeName::RussianFederation,
        );
        let mut controller = HighlightController::new(config.highlight_stroke.clone(), config.label);
        controller.register_element(ElementId::map("PL"), "Poland", StrokeStyle::new("#FFF", 0.5));
        controller.register_element(ElementId::map("RO"), "Romania", StrokeStyle::new("#FFF", 0.5));
        controller.register_element(ElementId::bar("PL"), "Poland", StrokeStyle::new("none", 0.0));
        controller.register_element(ElementId::bar("RO"), "Romania", StrokeStyle::new("none", 0.0));
        (coordinator, controller)
    }

    #[test]
    fn highlight_touches_both_views_of_the_group() {
        let (coordinator, mut controller) = fixture();
        let changes = controller.on_highlight("Poland", coordinator.latest());
        let ids: Vec<&ElementId> = changes.iter().map(|c| &c.element).collect();
        assert_eq!(ids, vec![&ElementId::map("PL"), &ElementId::bar("PL")]);
        assert!(changes.iter().all(|c| c.style == StrokeStyle::new("blue", 2.0)));
        assert_eq!(
            controller.current_style(&ElementId::map("RO")),
            Some(&StrokeStyle::new("#FFF", 0.5)),
            "other groups are untouched"
        );
    }

    #[test]
    fn dehighlight_restores_creation_snapshot() {
        let (mut coordinator, mut controller) = fixture();
        for attr in [AttributeName::Ukraine, AttributeName::Poland, AttributeName::RussianFederation] {
            controller.on_highlight("Poland", coordinator.latest());
            coordinator.on_attribute_changed(attr);
            controller.on_dehighlight("Poland");
        }
        assert_eq!(
            controller.current_style(&ElementId::map("PL")),
            Some(&StrokeStyle::new("#FFF", 0.5))
        );
        assert_eq!(
            controller.current_style(&ElementId::bar("PL")),
            Some(&StrokeStyle::new("none", 0.0))
        );
    }

    #[test]
    fn snapshot_is_written_once() {
        let (_, mut controller) = fixture();
        controller.register_element(ElementId::map("PL"), "Poland", StrokeStyle::new("red", 9.0));
        assert_eq!(
            controller.store().snapshot(&ElementId::map("PL")).unwrap().style(),
            &StrokeStyle::new("#FFF", 0.5)
        );
        assert_eq!(controller.store().len(), 4);
    }

    #[test]
    fn label_shows_formatted_value_and_attribute() {
        let (coordinator, mut controller) = fixture();
        controller.on_highlight("Poland", coordinator.latest());
        let label = controller.label().unwrap();
        assert_eq!(label.value_text, "1,200,000");
        assert_eq!(label.attribute, "Russian Federation");
        assert_eq!(label.region_name, "Republic of Poland");
    }

    #[test]
    fn only_one_label_exists() {
        let (coordinator, mut controller) = fixture();
        controller.on_highlight("Poland", coordinator.latest());
        controller.on_highlight("Romania", coordinator.latest());
        assert_eq!(controller.label().unwrap().group_name, "Romania");
        controller.on_dehighlight("Romania");
        assert!(controller.label().is_none());
    }

    #[test]
    fn move_uses_measured_size() {
        let (coordinator, mut controller) = fixture();
        let viewport = Size::new(800.0, 600.0);
        assert_eq!(controller.on_move(Point::new(10.0, 300.0), viewport, &Size::new(100.0, 40.0)), None);

        controller.on_highlight("Poland", coordinator.latest());
        let narrow = controller
            .on_move(Point::new(650.0, 300.0), viewport, &Size::new(100.0, 40.0))
            .unwrap();
        let wide = controller
            .on_move(Point::new(650.0, 300.0), viewport, &Size::new(200.0, 40.0))
            .unwrap();
        assert_eq!(narrow.x, 660.0);
        assert_eq!(wide.x, 440.0, "a wider label flips left of the cursor");
        assert_eq!(controller.label().unwrap().position, Some(wide));
    }
}
