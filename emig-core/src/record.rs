//! Tabular rows of emigrant counts, one per destination country.

use crate::attribute::{parse_value, AttributeName, AttributeValues};
use serde::Serialize;

/// A CSV row keyed by region.
///
/// `group_name` is the name used to link the row's bar with its map region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub region_key: String,
    pub group_name: String,
    pub values: AttributeValues,
}

impl Record {
    pub fn new(region_key: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            region_key: region_key.into(),
            group_name: group_name.into(),
            values: AttributeValues::new(),
        }
    }

    pub fn with_value(mut self, attr: AttributeName, value: f64) -> Self {
        self.values.set(attr, Some(value));
        self
    }

    /// Build a record from raw cells, `cell` returning the text of an
    /// attribute column if the row has one.
    pub fn from_cells<'a, F>(region_key: &str, group_name: &str, cell: F) -> Self
    where
        F: Fn(AttributeName) -> Option<&'a str>,
    {
        let mut values = AttributeValues::new();
        for attr in AttributeName::ALL {
            values.set(attr, cell(attr).and_then(parse_value));
        }
        Self {
            region_key: region_key.to_string(),
            group_name: group_name.to_string(),
            values,
        }
    }

    pub fn value(&self, attr: AttributeName) -> Option<f64> {
        self.values.get(attr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cells_parses_each_attribute() {
        let record = Record::from_cells("PL", "Poland", |attr| match attr {
            AttributeName::Ukraine => Some("209.3"),
            AttributeName::Romania => Some("---"),
            _ => None,
        });
        assert_eq!(record.value(AttributeName::Ukraine), Some(209.3));
        assert_eq!(record.value(AttributeName::Romania), None, "non-numeric is no data");
        assert_eq!(record.value(AttributeName::Poland), None, "missing column is no data");
    }
}
