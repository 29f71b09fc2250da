//! Coordinated bar chart, one bar per residence group.

use crate::state::AppState;
use dioxus::prelude::*;
use emig_core::coordinator::BarEncoding;
use emig_core::highlight::StrokeStyle;
use emig_core::ElementId;

#[derive(Props, Clone, PartialEq)]
struct BarRectProps {
    bar: BarEncoding,
    stroke: StrokeStyle,
    duration_ms: u32,
}

#[component]
fn BarRect(props: BarRectProps) -> Element {
    let mut state = use_context::<AppState>();
    let bar = &props.bar;
    let stroke = state.stroke_for(&ElementId::bar(bar.region_key.clone()), &props.stroke);
    let style = format!(
        "fill: {}; stroke: {}; stroke-width: {}; transition: all {}ms ease {}ms;",
        bar.color, stroke.stroke, stroke.stroke_width, props.duration_ms, bar.delay_ms
    );
    let enter = bar.group_name.clone();
    let leave = bar.group_name.clone();

    rsx! {
        rect {
            class: "bar {bar.group_name}",
            x: "{bar.x}",
            y: "{bar.y}",
            width: "{bar.width}",
            height: "{bar.height}",
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
pub fn BarChart() -> Element {
    let state = use_context::<AppState>();
    let config = (state.config)();
    let Some(update) = (state.update)() else {
        return rsx! {};
    };

    let frame = config.chart;
    let ticket = update.ticket();
    let inner_width = frame.inner_width();
    let inner_height = frame.inner_height();
    let title_x = frame.left_padding + 15.0;
    let title_y = frame.top_bottom_padding + 15.0;

    rsx! {
        svg {
            class: "chart",
            width: "{frame.width}",
            height: "{frame.height}",
            ontransitionend: move |_| state.settle(ticket),
            rect {
                class: "chartBackground",
                x: "{frame.left_padding}",
                y: "{frame.top_bottom_padding}",
                width: "{inner_width}",
                height: "{inner_height}",
                style: "fill: #F8F8F8;",
            }
            for bar in update.bars.iter() {
                BarRect {
                    key: "{bar.region_key}",
                    bar: bar.clone(),
                    stroke: config.bar_stroke.clone(),
                    duration_ms: update.transition.duration_ms,
                }
            }
            text {
                class: "chartTitle",
                x: "{title_x}",
                y: "{title_y}",
                style: "font-size: 14px;",
                "{update.title}"
            }
        }
    }
}
