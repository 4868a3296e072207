//! Angular velocity from a delta-rotation quaternion

use std::fmt;

use crate::format::format_optional_components;
use crate::frequency::MIN_INTERVAL_SECS;

/// `sin(angle / 2)` at or below this leaves the rotation axis undefined
pub const MIN_SIN_HALF_ANGLE: f64 = 1e-6;

/// Axis-angle view of a delta rotation and the implied angular rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularSummary {
    /// Rotation axis, undefined for (near) identity rotations
    pub axis: Option<[f64; 3]>,
    /// Rotation angle in radians, in [0, 2π]
    pub angle: f64,
    /// Angular velocity (rad/s), undefined without an axis or a usable `dt`
    pub omega: Option<[f64; 3]>,
    /// Elapsed time the rotation covers, seconds
    pub dt: f64,
}

impl AngularSummary {
    pub fn has_axis(&self) -> bool {
        self.axis.is_some()
    }

    pub fn has_rate(&self) -> bool {
        self.omega.is_some()
    }
}

/// Summarise quaternion `q` (x, y, z, w) covering `dt` seconds
///
/// `q` need not be unit length; `w` is clamped to [-1, 1] before the angle is taken.
pub fn summarize(q: [f64; 4], dt: f64) -> AngularSummary {
    let w = q[3].clamp(-1.0, 1.0);
    let angle = 2.0 * w.acos();
    let sin_half = (1.0 - w * w).max(0.0).sqrt();

    let axis = (sin_half > MIN_SIN_HALF_ANGLE).then(|| {
        let inv = 1.0 / sin_half;
        [q[0] * inv, q[1] * inv, q[2] * inv]
    });

    let omega = axis.filter(|_| dt > MIN_INTERVAL_SECS).map(|axis| {
        let rate = angle / dt;
        [axis[0] * rate, axis[1] * rate, axis[2] * rate]
    });

    AngularSummary {
        axis,
        angle,
        omega,
        dt,
    }
}

impl fmt::Display for AngularSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "axis=({}) angle={:.4} rad omega=({}) rad/s (dt={:.4})",
            format_optional_components(self.axis.as_ref().map(|a| a.as_slice()), 3),
            self.angle,
            format_optional_components(self.omega.as_ref().map(|o| o.as_slice()), 3),
            self.dt
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Unit, UnitQuaternion, Vector3};
    use std::f64::consts::PI;

    fn quaternion(axis: Vector3<f64>, angle: f64) -> [f64; 4] {
        let q = UnitQuaternion::from_axis_angle(&Unit::new_normalize(axis), angle).into_inner();
        [q.i, q.j, q.k, q.w]
    }

    #[test]
    fn test_identity() {
        let summary = summarize([0.0, 0.0, 0.0, 1.0], 0.01);
        assert_eq!(summary.angle, 0.0);
        assert!(summary.axis.is_none());
        assert!(summary.omega.is_none());
    }

    #[test]
    fn test_axis_angle_round_trip() {
        let axes = [
            Vector3::x(),
            Vector3::new(0.3, -0.5, 0.8),
            Vector3::new(-1.0, 2.0, 0.5),
        ];
        for axis in axes {
            let expected_axis = axis.normalize();
            for angle in [0.01, 0.5, 1.0, PI / 2.0, 3.0, PI - 1e-3] {
                let summary = summarize(quaternion(axis, angle), 0.01);

                assert!((summary.angle - angle).abs() < 1e-6, "angle {angle}");
                let got = summary.axis.unwrap();
                for i in 0..3 {
                    assert!((got[i] - expected_axis[i]).abs() < 1e-6, "axis {i} at {angle}");
                }
            }
        }
    }

    #[test]
    fn test_omega_is_axis_times_rate() {
        let dt = 0.02;
        let summary = summarize(quaternion(Vector3::z(), 0.1), dt);
        let omega = summary.omega.unwrap();
        assert!(omega[0].abs() < 1e-9);
        assert!(omega[1].abs() < 1e-9);
        assert!((omega[2] - 0.1 / dt).abs() < 1e-6);
    }

    #[test]
    fn test_zero_dt_leaves_rate_undefined() {
        let summary = summarize(quaternion(Vector3::y(), 0.5), 0.0);
        assert!(summary.has_axis());
        assert!(!summary.has_rate());
    }

    #[test]
    fn test_w_is_clamped() {
        let summary = summarize([0.0, 0.0, 0.0, 1.5], 0.01);
        assert_eq!(summary.angle, 0.0);

        let summary = summarize([0.0, 0.0, 0.0, -3.0], 0.01);
        assert!((summary.angle - 2.0 * PI).abs() < 1e-12);
        assert!(summary.axis.is_none());
    }

    #[test]
    fn test_display_uses_sentinel() {
        let text = summarize([0.0, 0.0, 0.0, 1.0], 0.01).to_string();
        assert!(text.contains("--"));
        assert!(!text.contains("NaN"));
        assert!(text.contains("angle=0.0000 rad"));
        assert!(text.contains("(dt=0.0100)"));
    }
}
