//! Quantile classification of the expressed attribute.
//!
//! The sorted domain is cut at the empirical quantiles `i/k` (linear
//! interpolation between neighbouring ranks, the same estimator D3's
//! `scaleQuantile` uses). A value falls in the bucket equal to the number of
//! thresholds less than or equal to it.

use serde::Serialize;

/// Outcome of classifying one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Class {
    /// Zero-based bucket index, `0..class_count`.
    Bucket(usize),
    /// Missing or non-finite value; drawn with the no-data color.
    NoData,
}

impl Class {
    pub fn bucket(self) -> Option<usize> {
        match self {
            Class::Bucket(i) => Some(i),
            Class::NoData => None,
        }
    }
}

/// One bucket of a scale, for legends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub index: usize,
    /// Inclusive lower bound.
    pub lower: f64,
    /// Exclusive upper bound, except for the last bucket which includes the domain maximum.
    pub upper: f64,
    pub color: String,
}

/// A `k`-class quantile scale with its colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketScale {
    thresholds: Vec<f64>,
    colors: Vec<String>,
    no_data_color: String,
    domain: Option<(f64, f64)>,
}

impl BucketScale {
    /// Build a scale over `values` with one class per color.
    ///
    /// Non-finite values are dropped before the domain is computed. An empty
    /// color list is treated as a single class painted with `no_data_color`.
    pub fn build<I>(values: I, colors: &[String], no_data_color: &str) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let colors = if colors.is_empty() {
            vec![no_data_color.to_string()]
        } else {
            colors.to_vec()
        };
        let k = colors.len();

        let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);

        let domain = match (sorted.first(), sorted.last()) {
            (Some(&min), Some(&max)) => Some((min, max)),
            _ => None,
        };
        let thresholds = if sorted.is_empty() {
            Vec::new()
        } else {
            (1..k)
                .map(|i| quantile_sorted(&sorted, i as f64 / k as f64))
                .collect()
        };

        Self {
            thresholds,
            colors,
            no_data_color: no_data_color.to_string(),
            domain,
        }
    }

    pub fn class_count(&self) -> usize {
        self.colors.len()
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// `(min, max)` of the finite input values, `None` when there were none.
    pub fn domain(&self) -> Option<(f64, f64)> {
        self.domain
    }

    pub fn no_data_color(&self) -> &str {
        &self.no_data_color
    }

    /// True when the domain is empty or collapses to a single value.
    pub fn is_degenerate(&self) -> bool {
        match self.domain {
            Some((min, max)) => min == max,
            None => true,
        }
    }

    pub fn classify(&self, value: Option<f64>) -> Class {
        let Some(v) = value.filter(|v| v.is_finite()) else {
            return Class::NoData;
        };
        if self.is_degenerate() {
            return Class::Bucket(0);
        }
        let index = self.thresholds.partition_point(|&t| t <= v);
        Class::Bucket(index.min(self.class_count() - 1))
    }

    pub fn color(&self, class: Class) -> &str {
        match class {
            Class::Bucket(i) => self
                .colors
                .get(i)
                .map(String::as_str)
                .unwrap_or(&self.no_data_color),
            Class::NoData => &self.no_data_color,
        }
    }

    pub fn color_for(&self, value: Option<f64>) -> &str {
        self.color(self.classify(value))
    }

    /// The `k` ascending buckets covering the domain. Empty for an empty domain.
    ///
    /// A single-valued domain yields one bucket, the only class `classify` uses.
    pub fn buckets(&self) -> Vec<Bucket> {
        let Some((min, max)) = self.domain else {
            return Vec::new();
        };
        if min == max {
            return vec![Bucket {
                index: 0,
                lower: min,
                upper: max,
                color: self.colors[0].clone(),
            }];
        }
        let mut bounds = Vec::with_capacity(self.class_count() + 1);
        bounds.push(min);
        bounds.extend(self.thresholds.iter().copied());
        bounds.push(max);
        bounds
            .windows(2)
            .enumerate()
            .map(|(index, pair)| Bucket {
                index,
                lower: pair[0],
                upper: pair[1],
                color: self.colors[index].clone(),
            })
            .collect()
    }
}

/// R-7 quantile of an ascending, non-empty slice.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<String> {
        ["#D4B9DA", "#C994C7", "#DF65B0", "#DD1C77", "#980043"]
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn quantile_interpolates_between_ranks() {
        let sorted: Vec<f64> = (1..=10).map(f64::from).collect();
        assert!((quantile_sorted(&sorted, 0.25) - 3.25).abs() < 1e-9);
        assert!((quantile_sorted(&sorted, 0.5) - 5.5).abs() < 1e-9);
        assert!((quantile_sorted(&sorted, 0.75) - 7.75).abs() < 1e-9);
    }

    #[test]
    fn two_values_fall_in_distinct_buckets() {
        let scale = BucketScale::build([1200.0, 800.0], &palette(), "#CCC");
        assert_eq!(scale.domain(), Some((800.0, 1200.0)));
        assert_eq!(scale.thresholds(), &[880.0, 960.0, 1040.0, 1120.0]);
        assert_eq!(scale.classify(Some(800.0)), Class::Bucket(0));
        assert_eq!(scale.classify(Some(1200.0)), Class::Bucket(4));
    }

    #[test]
    fn missing_values_are_no_data() {
        let scale = BucketScale::build([1.0, 2.0, f64::NAN], &palette(), "#CCC");
        assert_eq!(scale.domain(), Some((1.0, 2.0)), "NaN is excluded from the domain");
        assert_eq!(scale.classify(None), Class::NoData);
        assert_eq!(scale.classify(Some(f64::NAN)), Class::NoData);
        assert_eq!(scale.color_for(None), "#CCC");
    }

    #[test]
    fn identical_values_all_map_to_first_bucket() {
        let scale = BucketScale::build([7.0, 7.0, 7.0], &palette(), "#CCC");
        assert!(scale.is_degenerate());
        assert_eq!(scale.classify(Some(7.0)), Class::Bucket(0));

        let buckets = scale.buckets();
        assert_eq!(buckets.len(), 1, "legend lists only the class in use");
        assert_eq!((buckets[0].lower, buckets[0].upper), (7.0, 7.0));
        assert_eq!(buckets[0].color, scale.color_for(Some(7.0)));
    }

    #[test]
    fn empty_domain_does_not_panic() {
        let scale = BucketScale::build(Vec::<f64>::new(), &palette(), "#CCC");
        assert_eq!(scale.domain(), None);
        assert!(scale.buckets().is_empty());
        assert_eq!(scale.classify(Some(3.0)), Class::Bucket(0));
        assert_eq!(scale.classify(None), Class::NoData);
    }

    #[test]
    fn buckets_are_ascending_and_cover_the_domain() {
        let values: Vec<f64> = vec![12.0, 3.0, 45.0, 7.0, 19.0, 88.0, 1.0, 33.0];
        let scale = BucketScale::build(values.clone(), &palette(), "#CCC");
        let buckets = scale.buckets();
        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[0].lower, 1.0);
        assert_eq!(buckets[4].upper, 88.0);
        for pair in buckets.windows(2) {
            assert!(pair[0].upper <= pair[1].lower + 1e-12, "buckets overlap");
            assert_eq!(pair[0].upper, pair[1].lower, "buckets leave a gap");
        }
        for v in values {
            let class = scale.classify(Some(v)).bucket().unwrap();
            let b = &buckets[class];
            let last = class == buckets.len() - 1;
            assert!(v >= b.lower && (v < b.upper || (last && v <= b.upper)), "{v} outside bucket {class}");
        }
    }

    #[test]
    fn build_is_deterministic() {
        let values = [5.0, 1.0, 9.0, 3.0, 3.0, 12.0];
        let a = BucketScale::build(values, &palette(), "#CCC");
        let b = BucketScale::build(values, &palette(), "#CCC");
        assert_eq!(a, b);
    }

    #[test]
    fn empty_palette_collapses_to_one_class() {
        let scale = BucketScale::build([1.0, 2.0], &[], "#CCC");
        assert_eq!(scale.class_count(), 1);
        assert_eq!(scale.classify(Some(2.0)), Class::Bucket(0));
    }
}
