//! Coordinate-convention conversion.
//!
//! fSpy solves camera poses in a Z-up, right-handed frame with distances in
//! meters. Host scenes frequently use a different up axis and differently
//! scaled units, and the remap has to be applied to the position vector and
//! the rotation together or the camera ends up placed correctly but aimed
//! wrong. [`convert_pose`] is the single pure function that does both.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::CameraPose;

/// A world up axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UpAxis {
    X,
    #[default]
    Y,
    Z,
    NegX,
    NegY,
    NegZ,
}

impl UpAxis {
    /// Returns the unit vector pointing along this axis.
    #[must_use]
    pub fn direction(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
            Self::NegX => -Vec3::X,
            Self::NegY => -Vec3::Y,
            Self::NegZ => -Vec3::Z,
        }
    }

    /// Returns the Euler rotation (XYZ order, degrees) that re-orients an
    /// imported camera group for this up axis, with user offsets added on
    /// each channel.
    #[must_use]
    pub fn group_rotation_degrees(self, offsets: Vec3) -> Vec3 {
        let quarter = 90.0;
        match self {
            Self::X => Vec3::new(quarter + offsets.x, offsets.y, offsets.z),
            Self::Y => Vec3::new(offsets.x, quarter + offsets.y, offsets.z),
            Self::Z => Vec3::new(offsets.x, offsets.y, quarter + offsets.z),
            Self::NegX => Vec3::new(-quarter + offsets.x, offsets.y, offsets.z),
            Self::NegY => Vec3::new(offsets.x, -quarter + offsets.y, offsets.z),
            Self::NegZ => Vec3::new(offsets.x, offsets.y, -quarter + offsets.z),
        }
    }
}

/// Description of a coordinate frame: which axis is up and how large a scene
/// unit is, expressed in scene units per meter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conventions {
    /// The frame's up axis.
    pub up_axis: UpAxis,
    /// Scene units per meter.
    pub unit_scale: f32,
}

impl Conventions {
    /// The frame fSpy stores its calibration solution in: Z-up,
    /// right-handed, meters.
    pub const FSPY: Self = Self {
        up_axis: UpAxis::Z,
        unit_scale: 1.0,
    };

    /// Creates a new frame description.
    #[must_use]
    pub fn new(up_axis: UpAxis, unit_scale: f32) -> Self {
        Self {
            up_axis,
            unit_scale,
        }
    }

    /// A Y-up host frame with meter units (Maya-style defaults).
    #[must_use]
    pub fn y_up() -> Self {
        Self::new(UpAxis::Y, 1.0)
    }

    /// A Z-up host frame with meter units.
    #[must_use]
    pub fn z_up() -> Self {
        Self::new(UpAxis::Z, 1.0)
    }
}

impl Default for Conventions {
    fn default() -> Self {
        Self::y_up()
    }
}

/// Returns the proper rotation that maps `from`'s frame onto `to`'s frame.
///
/// The result always has determinant +1: relabeling axes never changes
/// handedness. Identical axes yield the identity.
#[must_use]
pub fn basis_change(from: UpAxis, to: UpAxis) -> Mat3 {
    let f = from.direction();
    let t = to.direction();
    let dot = f.dot(t);
    if dot > 0.5 {
        return Mat3::IDENTITY;
    }
    if dot < -0.5 {
        // Opposite axes: a half turn. The flip axis depends only on the
        // unordered pair, so the two directions stay exact inverses.
        let axis = if f.x.abs() > 0.5 {
            Vec3::Y
        } else if f.y.abs() > 0.5 {
            Vec3::Z
        } else {
            Vec3::X
        };
        return Mat3::from_axis_angle(axis, PI);
    }
    // Perpendicular axes: a quarter turn about their common normal.
    Mat3::from_axis_angle(f.cross(t), FRAC_PI_2)
}

/// Converts a camera pose between two coordinate conventions.
///
/// The basis change is applied to the position and the rotation together,
/// and the position is rescaled by the ratio of unit scales. Converting
/// between identical conventions is the identity.
#[must_use]
pub fn convert_pose(pose: &CameraPose, from: &Conventions, to: &Conventions) -> CameraPose {
    let c = basis_change(from.up_axis, to.up_axis);
    let scale = to.unit_scale / from.unit_scale;
    CameraPose {
        position: c * pose.position * scale,
        rotation: c * pose.rotation,
    }
}

/// Extracts XYZ-order Euler angles, in degrees, from a rotation matrix.
///
/// Matches the decomposition host transforms expect (`R = Rz * Ry * Rx`),
/// with the usual gimbal-lock branch when the Y rotation approaches 90
/// degrees.
#[must_use]
pub fn rotation_to_euler_degrees(m: Mat3) -> Vec3 {
    // m.x_axis.x is row 0 col 0, m.x_axis.y is row 1 col 0.
    let sy = (m.x_axis.x * m.x_axis.x + m.x_axis.y * m.x_axis.y).sqrt();
    let (x, y, z) = if sy < 1e-6 {
        (
            (-m.z_axis.y).atan2(m.y_axis.y),
            (-m.x_axis.z).atan2(sy),
            0.0,
        )
    } else {
        (
            m.y_axis.z.atan2(m.z_axis.z),
            (-m.x_axis.z).atan2(sy),
            m.x_axis.y.atan2(m.x_axis.x),
        )
    };
    Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn euler_to_rotation(degrees: Vec3) -> Mat3 {
        let r = degrees * std::f32::consts::PI / 180.0;
        Mat3::from_rotation_z(r.z) * Mat3::from_rotation_y(r.y) * Mat3::from_rotation_x(r.x)
    }

    fn mat_close(a: Mat3, b: Mat3, tol: f32) -> bool {
        (a.x_axis - b.x_axis).length() < tol
            && (a.y_axis - b.y_axis).length() < tol
            && (a.z_axis - b.z_axis).length() < tol
    }

    #[test]
    fn identical_conventions_are_identity() {
        let pose = CameraPose {
            position: Vec3::new(1.5, -2.0, 4.25),
            rotation: euler_to_rotation(Vec3::new(10.0, 20.0, 30.0)),
        };
        let converted = convert_pose(&pose, &Conventions::FSPY, &Conventions::FSPY);
        assert!((converted.position - pose.position).length() < 1e-6);
        assert!(mat_close(converted.rotation, pose.rotation, 1e-6));
    }

    #[test]
    fn z_up_to_y_up_remaps_position() {
        let pose = CameraPose {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Mat3::IDENTITY,
        };
        let converted = convert_pose(&pose, &Conventions::FSPY, &Conventions::y_up());
        // (x, y, z) -> (x, z, -y)
        assert!((converted.position - Vec3::new(1.0, 3.0, -2.0)).length() < 1e-6);
    }

    #[test]
    fn z_up_to_y_up_remaps_rotation_with_position() {
        // A camera at +Y (fSpy frame) rolled 90 degrees about world Z.
        let pose = CameraPose {
            position: Vec3::new(0.0, 5.0, 0.0),
            rotation: Mat3::from_rotation_z(std::f32::consts::FRAC_PI_2),
        };
        let converted = convert_pose(&pose, &Conventions::FSPY, &Conventions::y_up());
        assert!((converted.position - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-6);
        // The local X axis (1, 0, 0) became (0, 1, 0) in the source frame,
        // which lands on (0, 0, -1) in the Y-up frame.
        let local_x = converted.rotation * Vec3::X;
        assert!((local_x - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn unit_scale_applies_to_position_only() {
        let pose = CameraPose {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Mat3::IDENTITY,
        };
        let cm = Conventions::new(UpAxis::Z, 100.0);
        let converted = convert_pose(&pose, &Conventions::FSPY, &cm);
        assert!((converted.position - Vec3::new(100.0, 0.0, 0.0)).length() < 1e-4);
        assert!(mat_close(converted.rotation, Mat3::IDENTITY, 1e-6));
    }

    #[test]
    fn basis_changes_are_proper_rotations() {
        let axes = [
            UpAxis::X,
            UpAxis::Y,
            UpAxis::Z,
            UpAxis::NegX,
            UpAxis::NegY,
            UpAxis::NegZ,
        ];
        for from in axes {
            for to in axes {
                let c = basis_change(from, to);
                assert!(
                    (c.determinant() - 1.0).abs() < 1e-5,
                    "det for {from:?} -> {to:?} was {}",
                    c.determinant()
                );
                assert!((c * from.direction() - to.direction()).length() < 1e-5);
            }
        }
    }

    #[test]
    fn euler_round_trips_through_rotation() {
        let degrees = Vec3::new(25.0, -40.0, 110.0);
        let extracted = rotation_to_euler_degrees(euler_to_rotation(degrees));
        assert!((extracted - degrees).length() < 1e-2);
    }

    #[test]
    fn euler_gimbal_lock_branch() {
        let m = euler_to_rotation(Vec3::new(30.0, 90.0, 0.0));
        let extracted = rotation_to_euler_degrees(m);
        // Z is forced to zero in the singular branch; the rebuilt rotation
        // must still match.
        assert!(mat_close(euler_to_rotation(extracted), m, 1e-4));
    }

    #[test]
    fn group_rotation_table() {
        let offsets = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(
            UpAxis::X.group_rotation_degrees(offsets),
            Vec3::new(91.0, 2.0, 3.0)
        );
        assert_eq!(
            UpAxis::NegZ.group_rotation_degrees(offsets),
            Vec3::new(1.0, 2.0, -87.0)
        );
        assert_eq!(
            UpAxis::Y.group_rotation_degrees(Vec3::ZERO),
            Vec3::new(0.0, 90.0, 0.0)
        );
    }

    proptest! {
        #[test]
        fn convert_round_trip_is_lossless(
            px in -100.0f32..100.0,
            py in -100.0f32..100.0,
            pz in -100.0f32..100.0,
            rx in -180.0f32..180.0,
            ry in -85.0f32..85.0,
            rz in -180.0f32..180.0,
            scale in 0.01f32..100.0,
            from_idx in 0usize..6,
            to_idx in 0usize..6,
        ) {
            let axes = [
                UpAxis::X,
                UpAxis::Y,
                UpAxis::Z,
                UpAxis::NegX,
                UpAxis::NegY,
                UpAxis::NegZ,
            ];
            let from = Conventions::new(axes[from_idx], 1.0);
            let to = Conventions::new(axes[to_idx], scale);
            let pose = CameraPose {
                position: Vec3::new(px, py, pz),
                rotation: euler_to_rotation(Vec3::new(rx, ry, rz)),
            };
            let there = convert_pose(&pose, &from, &to);
            prop_assert!(there.is_valid_rotation(1e-4));
            let back = convert_pose(&there, &to, &from);
            prop_assert!((back.position - pose.position).length() < 1e-2);
            prop_assert!(mat_close(back.rotation, pose.rotation, 1e-4));
        }
    }
}
