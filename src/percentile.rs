use serde::{Deserialize, Serialize};

pub fn eligible_values(values: impl IntoIterator<Item = Option<f64>>) -> Vec<f64> {
    values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct SortedCohort {
    values: Vec<f64>,
}

impl SortedCohort {
    pub fn new(mut values: Vec<f64>) -> Self {
        values.retain(|v| v.is_finite());
        values.sort_by(|a, b| a.total_cmp(b));
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `100 * (values strictly below target) / n`, rounded.
    ///
    /// `None` for an empty cohort or a non-finite target. Equal values share
    /// a percentile.
    pub fn percentile(&self, target: f64) -> Option<u8> {
        if self.values.is_empty() || !target.is_finite() {
            return None;
        }
        let below = self.values.partition_point(|v| *v < target);
        let pct = (below as f64 / self.values.len() as f64) * 100.0;
        Some(pct.round().clamp(0.0, 100.0) as u8)
    }
}

pub fn percentile_of(target: f64, values: &[f64]) -> Option<u8> {
    SortedCohort::new(values.to_vec()).percentile(target)
}

pub fn ordinal_suffix(n: u32) -> &'static str {
    let j = n % 10;
    let k = n % 100;
    if j == 1 && k != 11 {
        "st"
    } else if j == 2 && k != 12 {
        "nd"
    } else if j == 3 && k != 13 {
        "rd"
    } else {
        "th"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Bar color for a percentile: dark red at 0, gray at 50, green at 100.
pub fn percentile_gradient(percentile: u8) -> Rgb {
    let pct = f64::from(percentile.min(100));
    let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    if pct <= 50.0 {
        let p = pct / 50.0;
        Rgb {
            r: channel(139.0 + (128.0 - 139.0) * p),
            g: channel(128.0 * p),
            b: channel(128.0 * p),
        }
    } else {
        let p = (pct - 50.0) / 50.0;
        Rgb {
            r: channel(128.0 - 128.0 * p),
            g: channel(128.0 + 127.0 * p),
            b: channel(128.0 - 128.0 * p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(100), "th");
    }

    #[test]
    fn gradient_endpoints() {
        assert_eq!(percentile_gradient(0), Rgb { r: 139, g: 0, b: 0 });
        assert_eq!(percentile_gradient(50), Rgb { r: 128, g: 128, b: 128 });
        assert_eq!(percentile_gradient(100), Rgb { r: 0, g: 255, b: 0 });
    }
}
