//! Shared Dioxus components and D3.js bridge for the migration choropleth.
//!
//! This crate provides:
//! - `js_bridge`: D3 projection and DOM measurement via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals around a `MapSession`
//! - `components`: the map, the bar chart, the attribute picker and the info label

pub mod components;
pub mod js_bridge;
pub mod state;
