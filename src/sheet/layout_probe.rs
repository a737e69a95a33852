//! Dock measurement handling.
//!
//! The dock's real extent is only known after it has been laid out, so the
//! minimum extent starts at a default and is corrected here.

use super::height_model::HeightModel;
use super::tuning::{COLLAPSED_SNAP_WINDOW, LAYOUT_JITTER};

/// What a dock measurement asks of the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DockMeasurement {
    /// Zero, negative, non-finite or within jitter of the current minimum.
    Ignored,
    /// The minimum extent should change.
    MinChanged {
        /// Minimum before the measurement.
        old_min: f64,
        /// Measured dock extent.
        new_min: f64,
        /// The sheet sat collapsed at the old minimum and should follow the
        /// new one exactly.
        follow_collapsed: bool,
    },
}

/// Classify a dock measurement against the model.
///
/// `follow_collapsed` is only set while the screen is known; before that the
/// current extent is pinned to the minimum anyway.
pub fn measure(measured: f64, model: &HeightModel) -> DockMeasurement {
    if !measured.is_finite() || measured <= 0.0 {
        return DockMeasurement::Ignored;
    }
    let old_min = model.min();
    if (measured - old_min).abs() <= LAYOUT_JITTER {
        return DockMeasurement::Ignored;
    }
    let follow_collapsed =
        model.is_screen_known() && (model.current() - old_min).abs() < COLLAPSED_SNAP_WINDOW;
    DockMeasurement::MinChanged {
        old_min,
        new_min: measured,
        follow_collapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(current: f64) -> HeightModel {
        let mut model = HeightModel::new(80.0);
        model.set_screen(800.0);
        model.commit(current);
        model
    }

    #[test]
    fn jitter_is_ignored() {
        assert_eq!(measure(80.6, &model(80.0)), DockMeasurement::Ignored);
        assert_eq!(measure(79.0, &model(80.0)), DockMeasurement::Ignored);
    }

    #[test]
    fn invalid_measurements_are_ignored() {
        assert_eq!(measure(0.0, &model(80.0)), DockMeasurement::Ignored);
        assert_eq!(measure(-5.0, &model(80.0)), DockMeasurement::Ignored);
        assert_eq!(measure(f64::NAN, &model(80.0)), DockMeasurement::Ignored);
    }

    #[test]
    fn collapsed_sheet_follows_new_min() {
        assert_eq!(
            measure(112.0, &model(80.0)),
            DockMeasurement::MinChanged {
                old_min: 80.0,
                new_min: 112.0,
                follow_collapsed: true,
            }
        );
    }

    #[test]
    fn near_collapsed_sheet_follows_new_min() {
        let result = measure(96.0, &model(125.0));
        assert!(matches!(
            result,
            DockMeasurement::MinChanged {
                follow_collapsed: true,
                ..
            }
        ));
    }

    #[test]
    fn expanded_sheet_keeps_its_extent() {
        let result = measure(96.0, &model(536.0));
        assert!(matches!(
            result,
            DockMeasurement::MinChanged {
                follow_collapsed: false,
                ..
            }
        ));
    }

    #[test]
    fn unknown_screen_records_min_only() {
        let model = HeightModel::new(80.0);
        assert_eq!(
            measure(96.0, &model),
            DockMeasurement::MinChanged {
                old_min: 80.0,
                new_min: 96.0,
                follow_collapsed: false,
            }
        );
    }
}
