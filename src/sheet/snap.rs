//! Nearest-snap resolution.

use crate::model::{SnapPoint, SnapTargets};

/// Pick the snap point nearest to `extent`.
///
/// Exact ties resolve MAX over MID over MIN.
pub fn resolve_snap(extent: f64, targets: &SnapTargets) -> SnapPoint {
    let to_max = (extent - targets.max()).abs();
    let to_mid = (extent - targets.mid()).abs();
    let to_min = (extent - targets.min()).abs();

    if to_max <= to_mid && to_max <= to_min {
        SnapPoint::Max
    } else if to_mid <= to_min {
        SnapPoint::Mid
    } else {
        SnapPoint::Min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> SnapTargets {
        SnapTargets::derive(800.0, 80.0, 0.33).unwrap()
    }

    #[test]
    fn near_top_snaps_to_max() {
        assert_eq!(resolve_snap(750.0, &targets()), SnapPoint::Max);
    }

    #[test]
    fn middle_snaps_to_mid() {
        assert_eq!(resolve_snap(500.0, &targets()), SnapPoint::Mid);
    }

    #[test]
    fn near_bottom_snaps_to_min() {
        assert_eq!(resolve_snap(100.0, &targets()), SnapPoint::Min);
    }

    #[test]
    fn tie_between_max_and_mid_prefers_max() {
        let t = SnapTargets::derive(1000.0, 100.0, 0.5).unwrap();
        // mid = 500, max = 1000
        assert_eq!(resolve_snap(750.0, &t), SnapPoint::Max);
    }

    #[test]
    fn tie_between_mid_and_min_prefers_mid() {
        let t = SnapTargets::derive(1000.0, 100.0, 0.5).unwrap();
        // min = 100, mid = 500
        assert_eq!(resolve_snap(300.0, &t), SnapPoint::Mid);
    }

    #[test]
    fn collapsed_mid_resolves_to_max_first() {
        // All three coincide: the first candidate wins.
        let t = SnapTargets::derive(100.0, 100.0, 0.33).unwrap();
        assert_eq!(resolve_snap(100.0, &t), SnapPoint::Max);
    }
}
