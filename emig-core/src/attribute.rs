//! The fixed set of origin countries a region can be colored by.

use crate::error::SelectionError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Origin country whose emigrant counts are being expressed.
///
/// The declaration order is the order shown in the attribute picker and the
/// first variant is the initial selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttributeName {
    #[default]
    #[serde(rename = "Russian Federation")]
    RussianFederation,
    Ukraine,
    Kazakhstan,
    Poland,
    Romania,
}

impl AttributeName {
    pub const ALL: [AttributeName; 5] = [
        AttributeName::RussianFederation,
        AttributeName::Ukraine,
        AttributeName::Kazakhstan,
        AttributeName::Poland,
        AttributeName::Romania,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Column / display name, matched case-sensitively against CSV headers.
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeName::RussianFederation => "Russian Federation",
            AttributeName::Ukraine => "Ukraine",
            AttributeName::Kazakhstan => "Kazakhstan",
            AttributeName::Poland => "Poland",
            AttributeName::Romania => "Romania",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeName {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeName::ALL
            .iter()
            .copied()
            .find(|attr| attr.as_str() == s)
            .ok_or_else(|| SelectionError::InvalidAttribute(s.to_string()))
    }
}

/// One optional numeric value per [`AttributeName`].
///
/// `None` means "no data": the column was absent, empty or not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttributeValues([Option<f64>; AttributeName::COUNT]);

impl AttributeValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attr: AttributeName) -> Option<f64> {
        self.0[attr.index()]
    }

    /// Stores `value`, turning NaN and infinities into no data.
    pub fn set(&mut self, attr: AttributeName, value: Option<f64>) {
        self.0[attr.index()] = value.filter(|v| v.is_finite());
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeName, Option<f64>)> + '_ {
        AttributeName::ALL
            .iter()
            .map(move |&attr| (attr, self.get(attr)))
    }
}

impl Serialize for AttributeValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(AttributeName::COUNT))?;
        for (attr, value) in self.iter() {
            map.serialize_entry(attr.as_str(), &value)?;
        }
        map.end()
    }
}

/// Parse a raw cell into an attribute value.
///
/// Anything that is not a finite number (`""`, `"n/a"`, `"NaN"`) is no data,
/// never zero.
pub fn parse_value(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
