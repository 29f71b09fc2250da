//! Choropleth map of the residence regions.
//!
//! Paths come pre-projected from D3; fills and strokes follow `AppState`.

use crate::state::AppState;
use dioxus::prelude::*;
use emig_core::highlight::StrokeStyle;
use emig_core::ElementId;

#[derive(Props, Clone, PartialEq)]
struct RegionPathProps {
    element_key: String,
    group_name: String,
    d: String,
    fill: String,
    stroke: StrokeStyle,
    duration_ms: u32,
}

#[component]
fn RegionPath(props: RegionPathProps) -> Element {
    let mut state = use_context::<AppState>();
    let stroke = state.stroke_for(&ElementId::map(props.element_key.clone()), &props.stroke);
    let style = format!(
        "fill: {}; stroke: {}; stroke-width: {}; transition: fill {}ms;",
        props.fill, stroke.stroke, stroke.stroke_width, props.duration_ms
    );
    let enter = props.group_name.clone();
    let leave = props.group_name.clone();

    rsx! {
        path {
            class: "regions {props.group_name}",
            d: "{props.d}",
            style: "{style}",
            onmouseenter: move |_| state.highlight(&enter),
            onmouseleave: move |_| state.dehighlight(&leave),
            onmousemove: move |evt: Event<MouseData>| {
                let p = evt.client_coordinates();
                state.move_label(p.x, p.y);
            },
        }
    }
}

#[component]
pub fn RegionMap() -> Element {
    let state = use_context::<AppState>();
    let config = (state.config)();
    let (Some(update), Some(projection)) = ((state.update)(), (state.projection)()) else {
        return rsx! {};
    };

    if projection.regions.len() != update.regions.len() {
        log::warn!(
            "[EMIG] region map: {} paths for {} regions",
            projection.regions.len(),
            update.regions.len()
        );
    }

    let width = config.map.width;
    let height = config.map.height;
    let ticket = update.ticket();

    rsx! {
        svg {
            class: "map",
            width: "{width}",
            height: "{height}",
            ontransitionend: move |_| state.settle(ticket),
            path {
                class: "gratBackground",
                d: "{projection.outline}",
                style: "fill: #D5E3FF;",
            }
            for (i, line) in projection.graticule.iter().enumerate() {
                path {
                    key: "grat-{i}",
                    class: "gratLines",
                    d: "{line}",
                    style: "fill: none; stroke: #999; stroke-width: 0.5px;",
                }
            }
            if !projection.background.is_empty() {
                path {
                    class: "countries",
                    d: "{projection.background}",
                    style: "fill: #FFF; stroke: #CCC; stroke-width: 0.5px;",
                }
            }
            for (region, d) in update.regions.iter().zip(projection.regions.iter()) {
                RegionPath {
                    key: "{region.element_key}",
                    element_key: region.element_key.clone(),
                    group_name: region.group_name.clone(),
                    d: d.clone(),
                    fill: region.color.clone(),
                    stroke: config.region_stroke.clone(),
                    duration_ms: update.transition.duration_ms,
                }
            }
        }
    }
}
