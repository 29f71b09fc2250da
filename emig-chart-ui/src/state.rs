//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//! The `MapSession` itself is plain Rust; the signals mirror what the views
//! need to re-render after each selection or hover event.

use crate::js_bridge::{self, DomLabelMeasure, ProjectedMap};
use dioxus::prelude::*;
use emig_core::highlight::{StrokeStyle, StyleChange};
use emig_core::label::{Label, Point};
use emig_core::coordinator::TransitionTicket;
use emig_core::{AttributeName, ElementId, MapConfig, MapSession, ViewUpdate};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Steps of the startup load, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Records,
    Regions,
    Background,
    Projection,
}

impl LoadStage {
    pub const ALL: [LoadStage; 4] = [
        LoadStage::Records,
        LoadStage::Regions,
        LoadStage::Background,
        LoadStage::Projection,
    ];

    pub fn describe(self) -> &'static str {
        match self {
            LoadStage::Records => "migrant records",
            LoadStage::Regions => "region outlines",
            LoadStage::Background => "world background",
            LoadStage::Projection => "map projection",
        }
    }

    /// Where a user should look when this stage fails.
    pub fn hint(self) -> &'static str {
        match self {
            LoadStage::Records => "Check fixtures/migrants.csv and its CountryCode column.",
            LoadStage::Regions => "Check fixtures/europe_regions.geojson.",
            LoadStage::Background => "Check fixtures/world_countries.geojson.",
            LoadStage::Projection => "D3 must be loaded before the app starts.",
        }
    }
}

/// A failed load step and its error chain.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFailure {
    pub stage: LoadStage,
    pub message: String,
}

impl LoadFailure {
    pub fn new(stage: LoadStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Loading {} failed: {}", self.stage.describe(), self.message)
    }
}

/// Cheaply cloneable handle to the session, for single-threaded WASM.
#[derive(Clone)]
pub struct SharedSession(Rc<RefCell<MapSession>>);

impl SharedSession {
    pub fn new(session: MapSession) -> Self {
        Self(Rc::new(RefCell::new(session)))
    }

    /// Read access for components that only display session facts.
    pub fn with<R>(&self, f: impl FnOnce(&MapSession) -> R) -> R {
        f(&self.0.borrow())
    }
}

/// Shared application state for the choropleth page.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Map session (None until the data is loaded)
    pub session: Signal<Option<SharedSession>>,
    /// Colors, frames and strokes
    pub config: Signal<MapConfig>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// The load step that failed, if any
    pub failure: Signal<Option<LoadFailure>>,
    /// Currently expressed attribute
    pub expressed: Signal<AttributeName>,
    /// Latest encoding of both views
    pub update: Signal<Option<ViewUpdate>>,
    /// Projected SVG paths, index-aligned with `update.regions`
    pub projection: Signal<Option<ProjectedMap>>,
    /// Strokes changed by hovering; elements not listed use their creation stroke
    pub strokes: Signal<HashMap<ElementId, StrokeStyle>>,
    /// Info label of the hovered group
    pub label: Signal<Option<Label>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            session: Signal::new(None),
            config: Signal::new(MapConfig::default()),
            loading: Signal::new(true),
            failure: Signal::new(None),
            expressed: Signal::new(AttributeName::default()),
            update: Signal::new(None),
            projection: Signal::new(None),
            strokes: Signal::new(HashMap::new()),
            label: Signal::new(None),
        }
    }

    /// Install a freshly built session and mirror its updates into `update`.
    pub fn attach(&mut self, session: MapSession, projection: ProjectedMap) {
        let mut update = self.update;
        session.subscribe_view(move |u: &ViewUpdate| update.set(Some(u.clone())));
        self.expressed.set(session.expressed());
        self.projection.set(Some(projection));
        self.session.set(Some(SharedSession::new(session)));
        self.loading.set(false);
    }

    pub fn select(&mut self, attr: AttributeName) {
        let Some(session) = (self.session)() else {
            return;
        };
        session.0.borrow_mut().select(attr);
        self.expressed.set(attr);
    }

    pub fn highlight(&mut self, group_name: &str) {
        let Some(session) = (self.session)() else {
            return;
        };
        let changes = session.0.borrow_mut().highlight(group_name);
        self.apply_strokes(changes);
        self.label.set(session.0.borrow().label().cloned());
    }

    pub fn dehighlight(&mut self, group_name: &str) {
        let Some(session) = (self.session)() else {
            return;
        };
        let changes = session.0.borrow_mut().dehighlight(group_name);
        self.apply_strokes(changes);
        self.label.set(None);
    }

    /// Reposition the label near the cursor (client coordinates).
    pub fn move_label(&mut self, x: f64, y: f64) {
        let Some(session) = (self.session)() else {
            return;
        };
        let viewport = js_bridge::viewport_size();
        let moved = session
            .0
            .borrow_mut()
            .move_label(Point::new(x, y), viewport, &DomLabelMeasure);
        if moved.is_some() {
            self.label.set(session.0.borrow().label().cloned());
        }
    }

    /// A view finished its transition; stale tickets are ignored.
    pub fn settle(&self, ticket: TransitionTicket) {
        if let Some(session) = (self.session)() {
            session.0.borrow().settle(ticket);
        }
    }

    /// Stroke to draw `element` with, falling back to its creation stroke.
    pub fn stroke_for(&self, element: &ElementId, created_with: &StrokeStyle) -> StrokeStyle {
        self.strokes
            .read()
            .get(element)
            .cloned()
            .unwrap_or_else(|| created_with.clone())
    }

    fn apply_strokes(&mut self, changes: Vec<StyleChange>) {
        let mut strokes = self.strokes.write();
        for change in changes {
            strokes.insert(change.element, change.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_names_the_stage() {
        let failure = LoadFailure::new(LoadStage::Records, "CSV has no key column \"CountryCode\"");
        assert_eq!(
            failure.to_string(),
            "Loading migrant records failed: CSV has no key column \"CountryCode\""
        );
    }

    #[test]
    fn every_stage_has_a_hint() {
        for stage in LoadStage::ALL {
            assert!(!stage.describe().is_empty());
            assert!(!stage.hint().is_empty(), "{:?} has no hint", stage);
        }
    }
}
