//! Panel shown when the startup load fails.

use crate::state::LoadFailure;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub failure: LoadFailure,
}

/// Names the failed load step, its error chain and where to look.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let what = props.failure.stage.describe();
    let hint = props.failure.stage.hint();
    rsx! {
        div {
            class: "load-error",
            style: "padding: 12px 16px; margin: 8px 0; background: #FCE4EC; color: #880E4F; border-radius: 4px; border: 1px solid #F48FB1;",
            strong { "Could not load the {what}" }
            p {
                style: "margin: 4px 0; font-family: monospace; font-size: 12px;",
                "{props.failure.message}"
            }
            p {
                style: "margin: 0; font-size: 12px; color: #666;",
                "{hint}"
            }
        }
    }
}
