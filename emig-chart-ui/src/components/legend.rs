//! Legend listing the quantile buckets of the current attribute.

use crate::state::AppState;
use dioxus::prelude::*;
use emig_core::label::format_count;

#[component]
pub fn Legend() -> Element {
    let state = use_context::<AppState>();
    let Some(update) = (state.update)() else {
        return rsx! {};
    };

    let buckets: Vec<(usize, String, String)> = update
        .legend
        .iter()
        .map(|b| {
            let range = format!("{} - {}", format_count(b.lower), format_count(b.upper));
            (b.index, b.color.clone(), range)
        })
        .collect();

    rsx! {
        div {
            style: "margin-top: 12px; padding: 8px 12px; background: #FAFAFA; border-radius: 4px; border: 1px solid #E0E0E0; font-size: 12px; display: flex; gap: 16px; flex-wrap: wrap;",
            for (index, color, range) in buckets {
                div {
                    key: "{index}",
                    style: "display: flex; align-items: center; gap: 4px;",
                    span {
                        style: "display: inline-block; width: 16px; height: 12px; background: {color};",
                    }
                    "{range}"
                }
            }
            div {
                style: "display: flex; align-items: center; gap: 4px;",
                span {
                    style: "display: inline-block; width: 16px; height: 12px; background: {update.no_data_color};",
                }
                "No data"
            }
        }
    }
}
