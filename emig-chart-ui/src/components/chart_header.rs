//! Title of the expressed attribute and the data coverage.

use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    /// Shown until the first view update arrives
    pub fallback_title: String,
    /// Unit explanation (e.g., "Thousands of people")
    #[props(default = String::new())]
    pub unit_description: String,
}

#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    let state = use_context::<AppState>();
    let title = (state.update)()
        .map(|u| u.title)
        .unwrap_or_else(|| props.fallback_title.clone());
    let coverage = (state.session)().map(|shared| {
        shared.with(|session| {
            let report = session.join_report();
            format!(
                "{} of {} regions have data",
                report.matched,
                report.matched + report.unmatched_regions.len()
            )
        })
    });

    rsx! {
        div {
            style: "margin-bottom: 8px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{title}"
            }
            p {
                style: "margin: 0; font-size: 12px; color: #666;",
                if !props.unit_description.is_empty() {
                    "{props.unit_description}. "
                }
                if let Some(coverage) = coverage {
                    "{coverage}"
                }
            }
        }
    }
}
