//! Reusable Dioxus RSX components for the choropleth page.

mod attribute_selector;
mod bar_chart;
mod chart_header;
mod error_display;
mod info_label;
mod legend;
mod loading_spinner;
mod region_map;

pub use attribute_selector::AttributeSelector;
pub use bar_chart::BarChart;
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use info_label::InfoLabel;
pub use legend::Legend;
pub use loading_spinner::LoadingSpinner;
pub use region_map::RegionMap;
