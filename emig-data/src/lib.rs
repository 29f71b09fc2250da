//! Loaders turning the embedded data files into core types.
//!
//! - `records`: the migrant stock CSV (one row per country of residence)
//! - `regions`: the Europe regions GeoJSON feature collection and the
//!   world countries drawn behind it
//!
//! Both loaders work on string slices so the browser app can feed them
//! `include_str!` data and the CLI can feed them file contents.

mod records;
mod regions;

pub use records::load_records;
pub use regions::{load_background, load_regions, to_feature_collection};
