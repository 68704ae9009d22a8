//! Serde model of the fSpy JSON state blob.
//!
//! The schema is owned by fSpy and evolves; unknown fields are tolerated
//! everywhere, and fields this interpreter requires are checked during
//! [`CalibrationProject::decode`](crate::CalibrationProject::decode) so a
//! missing one fails with its exact name.

use glam::Vec2;
use serde::Deserialize;

/// Top-level project state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateData {
    /// The solved camera, absent when the project was never calibrated.
    pub camera_parameters: Option<CameraParametersData>,
    /// Calibration settings shared by both vanishing-point modes.
    #[serde(default)]
    pub calibration_settings_base: CalibrationSettingsData,
}

/// The solved camera parameters as stored by fSpy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraParametersData {
    /// World-from-camera transform, row-major 4x4.
    pub camera_transform: Option<TransformData>,
    /// Reference image width in pixels.
    pub image_width: Option<f64>,
    /// Reference image height in pixels.
    pub image_height: Option<f64>,
    /// Solved horizontal field of view in radians.
    pub horizontal_field_of_view: Option<f64>,
    /// Solved principal point, normalized film-back offset.
    pub principal_point: Option<PrincipalPointData>,
}

/// A 4x4 transform stored as rows.
#[derive(Debug, Clone, Deserialize)]
pub struct TransformData {
    /// Row-major matrix rows.
    pub rows: [[f64; 4]; 4],
}

/// Principal point, which fSpy has stored both as an object and as a pair
/// across versions.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PrincipalPointData {
    Object { x: f64, y: f64 },
    Pair([f64; 2]),
}

impl PrincipalPointData {
    /// Returns the principal point as a vector.
    #[must_use]
    pub fn to_vec2(&self) -> Vec2 {
        match *self {
            Self::Object { x, y } => Vec2::new(x as f32, y as f32),
            Self::Pair([x, y]) => Vec2::new(x as f32, y as f32),
        }
    }
}

/// Calibration settings relevant to the importer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationSettingsData {
    /// The unit the user assigned to the reference distance, as written by
    /// fSpy (for example `"Meters"`). Kept as text so unknown units from
    /// newer versions still parse.
    pub reference_distance_unit: Option<String>,
}

/// The distance units fSpy offers for the reference measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceDistanceUnit {
    NoUnit,
    Millimeters,
    Centimeters,
    #[default]
    Meters,
    Kilometers,
    Inches,
    Feet,
    Miles,
}

impl ReferenceDistanceUnit {
    /// Parses the unit name fSpy writes; `None` for names this version
    /// does not know.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "None" => Some(Self::NoUnit),
            "Millimeters" => Some(Self::Millimeters),
            "Centimeters" => Some(Self::Centimeters),
            "Meters" => Some(Self::Meters),
            "Kilometers" => Some(Self::Kilometers),
            "Inches" => Some(Self::Inches),
            "Feet" => Some(Self::Feet),
            "Miles" => Some(Self::Miles),
            _ => None,
        }
    }

    /// The display name, matching what fSpy writes.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::NoUnit => "None",
            Self::Millimeters => "Millimeters",
            Self::Centimeters => "Centimeters",
            Self::Meters => "Meters",
            Self::Kilometers => "Kilometers",
            Self::Inches => "Inches",
            Self::Feet => "Feet",
            Self::Miles => "Miles",
        }
    }
}

impl std::fmt::Display for ReferenceDistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
