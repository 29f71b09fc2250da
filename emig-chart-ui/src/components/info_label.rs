//! Floating label describing the hovered region.

use crate::state::AppState;
use dioxus::prelude::*;

/// Info label, positioned by `AppState::move_label`.
///
/// It is rendered hidden until its first placement so it can be measured.
#[component]
pub fn InfoLabel() -> Element {
    let state = use_context::<AppState>();
    let Some(label) = (state.label)() else {
        return rsx! {};
    };

    let placement = match label.position {
        Some(p) => format!("left: {}px; top: {}px; visibility: visible;", p.x, p.y),
        None => "left: 0; top: 0; visibility: hidden;".to_string(),
    };
    let style = format!(
        "position: fixed; {} pointer-events: none; padding: 4px 8px; background: rgba(255,255,255,0.9); border: 1px solid #999; border-radius: 4px; font-size: 12px;",
        placement
    );

    rsx! {
        div {
            id: "{label.id}",
            class: "infolabel",
            style: "{style}",
            h1 {
                style: "margin: 0; font-size: 18px;",
                "{label.value_text}"
            }
            b { "{label.attribute}" }
            div {
                class: "labelname",
                "{label.region_name}"
            }
        }
    }
}
