//! Pixel to physical length calibration.

use serde::{Deserialize, Serialize};

const CM_PER_INCH: f64 = 2.54;

/// Linear scale between pixels and centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub px_per_cm: f64,
}

impl Calibration {
    /// Calibration implied by a pixel density.
    pub fn from_dpi(dpi: f64) -> Self {
        Self {
            px_per_cm: dpi / CM_PER_INCH,
        }
    }

    /// Calibration from a measured reference: `reference_px` pixels span
    /// `real_cm` centimeters. `None` when either value is not positive.
    pub fn from_reference(reference_px: f64, real_cm: f64) -> Option<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(reference_px) || !valid(real_cm) {
            return None;
        }
        Some(Self {
            px_per_cm: reference_px / real_cm,
        })
    }

    pub fn px_to_cm(&self, px: f64) -> f64 {
        px / self.px_per_cm
    }

    pub fn cm_to_px(&self, cm: f64) -> f64 {
        cm * self.px_per_cm
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::from_dpi(crate::snap::REFERENCE_DPI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_from_reference_dpi() {
        let cal = Calibration::default();
        assert!((cal.px_per_cm - 160.0 / 2.54).abs() < 1e-9);
    }

    #[test]
    fn test_from_reference() {
        let cal = Calibration::from_reference(500.0, 10.0).unwrap();
        assert!((cal.px_per_cm - 50.0).abs() < 1e-9);
        assert!((cal.px_to_cm(125.0) - 2.5).abs() < 1e-9);
        assert!((cal.cm_to_px(3.0) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(Calibration::from_reference(500.0, 0.0).is_none());
        assert!(Calibration::from_reference(500.0, -1.0).is_none());
        assert!(Calibration::from_reference(0.0, 5.0).is_none());
        assert!(Calibration::from_reference(f64::NAN, 5.0).is_none());
    }
}
