//! Dropdown for choosing the expressed attribute.

use crate::state::AppState;
use dioxus::prelude::*;
use emig_core::AttributeName;

/// Attribute dropdown selector.
/// Lists every origin country and re-expresses the map on change.
#[component]
pub fn AttributeSelector() -> Element {
    let mut state = use_context::<AppState>();
    let selected = (state.expressed)();

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        match value.parse::<AttributeName>() {
            Ok(attr) => state.select(attr),
            Err(e) => log::error!("[EMIG] attribute selector: {}", e),
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "attribute-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Migrants from: "
            }
            select {
                id: "attribute-select",
                class: "dropdown",
                onchange: on_change,
                for attr in AttributeName::ALL {
                    option {
                        value: "{attr}",
                        selected: attr == selected,
                        "{attr}"
                    }
                }
            }
        }
    }
}
