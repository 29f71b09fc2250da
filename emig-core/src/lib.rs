//! Attribute-driven data pipeline for the European migration choropleth.
//!
//! This crate has no rendering dependencies. It provides:
//! - `join`: left join of tabular records onto region features by key
//! - `classify`: quantile bucket scale used for the map and bar colors
//! - `selection`: the currently expressed attribute and its subscribers
//! - `coordinator`: re-encodes both views whenever the selection changes
//! - `highlight`: linked hover highlighting and the info label
//! - `session`: one routine wiring all of the above together
//!
//! # Usage
//!
//! ```rust
//! use emig_core::{AttributeName, MapConfig, MapSession, Record, RegionFeature};
//!
//! let features = vec![RegionFeature::new("PL", "Poland", "Poland")];
//! let records = vec![Record::new("PL", "Poland").with_value(AttributeName::RussianFederation, 1200.0)];
//!
//! let session = MapSession::new(features, &records, MapConfig::default());
//! let update = session.latest_update();
//! assert_eq!(update.bars[0].group_name, "Poland");
//! ```

pub mod attribute;
pub mod classify;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod highlight;
pub mod join;
pub mod label;
pub mod record;
pub mod region;
pub mod selection;
pub mod session;

pub use attribute::{AttributeName, AttributeValues};
pub use classify::{BucketScale, Class};
pub use config::MapConfig;
pub use coordinator::{ViewSink, ViewSyncCoordinator, ViewUpdate};
pub use error::SelectionError;
pub use highlight::{ElementId, HighlightController, StyleSnapshot, ViewKind};
pub use record::Record;
pub use region::RegionFeature;
pub use selection::SelectionState;
pub use session::MapSession;
