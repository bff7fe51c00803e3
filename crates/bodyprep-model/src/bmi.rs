//! Body-mass index and its category bands.
//!
//! Only meaningful on transformed data: weight in kilograms, height in
//! meters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered BMI bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BmiCategory {
    /// Below 18.5.
    Underweight,
    /// 18.5 up to 25.
    Normal,
    /// 25 up to 30.
    Overweight,
    /// 30 and above.
    Obese,
}

impl BmiCategory {
    /// All bands in ascending order.
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    /// Band containing a BMI value.
    pub fn from_bmi(value: f64) -> Self {
        if value < 18.5 {
            BmiCategory::Underweight
        } else if value < 25.0 {
            BmiCategory::Normal
        } else if value < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Half-open interval covered by the band.
    pub fn range_label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "< 18.5",
            BmiCategory::Normal => "18.5 - 25",
            BmiCategory::Overweight => "25 - 30",
            BmiCategory::Obese => ">= 30",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weight over height squared, rounded to two decimals (ties to even).
///
/// Returns `None` when either measurement is not finite or height is not
/// positive.
pub fn bmi(weight_kg: f64, height_m: f64) -> Option<f64> {
    if !weight_kg.is_finite() || !height_m.is_finite() || height_m <= 0.0 {
        return None;
    }
    let ratio = weight_kg / (height_m * height_m);
    ratio
        .is_finite()
        .then(|| (ratio * 100.0).round_ties_even() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_rounded_ratio() {
        // 70 in / 180 lb after conversion
        let value = bmi(81.64656, 1.778).unwrap();
        assert_eq!(value, 25.83);
    }

    #[test]
    fn rejects_degenerate_inputs() {
        assert_eq!(bmi(70.0, 0.0), None);
        assert_eq!(bmi(70.0, -1.7), None);
        assert_eq!(bmi(f64::NAN, 1.7), None);
        assert_eq!(bmi(70.0, f64::INFINITY), None);
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.99), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn bands_are_ordered() {
        let mut sorted = BmiCategory::ALL;
        sorted.sort();
        assert_eq!(sorted, BmiCategory::ALL);
    }
}
