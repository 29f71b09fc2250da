//! The info label shown while a region or bar is hovered.

use crate::config::LabelOffsets;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Measures a label as it is actually laid out by the rendering surface.
pub trait LabelMeasure {
    /// `None` when the label is not on screen (yet).
    fn measure(&self, label: &Label) -> Option<Size>;
}

impl LabelMeasure for Size {
    fn measure(&self, _label: &Label) -> Option<Size> {
        Some(*self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    /// DOM id of the label element, derived from the group name.
    pub id: String,
    pub group_name: String,
    /// Formatted head count, e.g. `"1,200,000"`.
    pub value_text: String,
    pub attribute: String,
    pub region_name: String,
    pub position: Option<Point>,
}

impl Label {
    pub fn new(group_name: &str, value: Option<f64>, attribute: &str, region_name: &str) -> Self {
        Self {
            id: format!("{}_label", label_slug(group_name)),
            group_name: group_name.to_string(),
            value_text: value.map(format_count).unwrap_or_else(|| "No data".to_string()),
            attribute: attribute.to_string(),
            region_name: region_name.to_string(),
            position: None,
        }
    }
}

/// Format a value given in thousands as a whole head count with thousands separators.
pub fn format_count(thousands: f64) -> String {
    let people = (thousands * 1000.0).round() as i64;
    let digits = people.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if people < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Top-left corner for a label of `size` near `cursor`.
///
/// The label sits up and to the right of the cursor, and flips to the left
/// when it would cross the right edge of the viewport and below the cursor
/// when it would cross the top edge.
pub fn place_label(cursor: Point, size: Size, viewport: Size, offsets: &LabelOffsets) -> Point {
    let x = if cursor.x + offsets.gap + size.width > viewport.width - offsets.edge_margin {
        cursor.x - size.width - offsets.gap
    } else {
        cursor.x + offsets.gap
    };
    let raise = offsets.above.max(size.height + offsets.gap);
    let y = if cursor.y < raise {
        cursor.y + offsets.below
    } else {
        cursor.y - raise
    };
    Point::new(x, y)
}

fn label_slug(group_name: &str) -> String {
    group_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_thousands_as_people() {
        assert_eq!(format_count(1200.0), "1,200,000");
        assert_eq!(format_count(0.5), "500");
        assert_eq!(format_count(12.3456), "12,346");
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(-4.2), "-4,200");
    }

    #[test]
    fn missing_value_reads_no_data() {
        let label = Label::new("Czech Republic", None, "Ukraine", "Czechia");
        assert_eq!(label.value_text, "No data");
        assert_eq!(label.id, "Czech_Republic_label");
    }

    #[test]
    fn label_sits_up_right_of_cursor() {
        let offsets = LabelOffsets::default();
        let p = place_label(Point::new(100.0, 300.0), Size::new(120.0, 50.0), Size::new(1000.0, 800.0), &offsets);
        assert_eq!(p, Point::new(110.0, 225.0));
    }

    #[test]
    fn label_flips_left_near_right_edge() {
        let offsets = LabelOffsets::default();
        let p = place_label(Point::new(950.0, 300.0), Size::new(120.0, 50.0), Size::new(1000.0, 800.0), &offsets);
        assert_eq!(p.x, 950.0 - 120.0 - 10.0);
        assert!(p.x + 120.0 <= 1000.0);
    }

    #[test]
    fn wide_gap_still_keeps_label_inside_right_edge() {
        let offsets = LabelOffsets {
            gap: 40.0,
            edge_margin: 20.0,
            ..LabelOffsets::default()
        };
        let viewport = Size::new(1000.0, 800.0);
        let p = place_label(Point::new(870.0, 300.0), Size::new(100.0, 50.0), viewport, &offsets);
        assert_eq!(p.x, 870.0 - 100.0 - 40.0);
        assert!(p.x + 100.0 <= viewport.width - offsets.edge_margin);
    }

    #[test]
    fn label_flips_below_near_top_edge() {
        let offsets = LabelOffsets::default();
        let p = place_label(Point::new(100.0, 40.0), Size::new(120.0, 50.0), Size::new(1000.0, 800.0), &offsets);
        assert_eq!(p.y, 65.0);
    }

    #[test]
    fn tall_label_is_raised_by_its_measured_height() {
        let offsets = LabelOffsets::default();
        let p = place_label(Point::new(100.0, 300.0), Size::new(120.0, 140.0), Size::new(1000.0, 800.0), &offsets);
        assert_eq!(p.y, 300.0 - 150.0);
    }
}
