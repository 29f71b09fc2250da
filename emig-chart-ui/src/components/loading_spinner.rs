//! Placeholder shown while the map data loads.

use crate::state::LoadStage;
use dioxus::prelude::*;

/// Lists every load step so a stalled page says what it was waiting for.
#[component]
pub fn LoadingSpinner() -> Element {
    let steps = LoadStage::ALL
        .iter()
        .map(|stage| stage.describe())
        .collect::<Vec<_>>()
        .join(", ");
    rsx! {
        div {
            class: "loading",
            style: "padding: 40px; text-align: center; color: #666;",
            "Loading {steps}..."
        }
    }
}
