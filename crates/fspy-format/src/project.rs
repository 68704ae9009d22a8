//! The decoded calibration project.

use std::fs;
use std::path::{Path, PathBuf};

use glam::{Mat3, Vec3};

use fspy_core::{
    convert_pose, CameraIntrinsics, CameraPose, Conventions, FspyError, Result,
};

use crate::container::ProjectFile;
use crate::state::ReferenceDistanceUnit;

/// Rotation orthonormality tolerance for solved transforms.
const ROTATION_TOLERANCE: f32 = 1e-3;

/// Everything the importer needs from one fSpy project, fully decoded and
/// validated.
///
/// Constructed once per import, consumed immediately, and discarded; there
/// is no store or mutation path. The pose is kept in fSpy's own frame and
/// converted on demand via [`CalibrationProject::pose_in`].
#[derive(Debug, Clone)]
pub struct CalibrationProject {
    /// The file this project was decoded from.
    pub source_path: PathBuf,
    /// Reference image width in pixels.
    pub image_width: u32,
    /// Reference image height in pixels.
    pub image_height: u32,
    /// Solved camera pose, in fSpy's Z-up frame.
    pub pose: CameraPose,
    /// Solved lens parameters.
    pub intrinsics: CameraIntrinsics,
    /// Unit the reference distance was measured in.
    pub distance_unit: ReferenceDistanceUnit,
    image_data: Vec<u8>,
}

impl CalibrationProject {
    /// Reads and decodes a project file in one step.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = ProjectFile::read(path)?;
        let project = Self::decode(file, path)?;
        log::info!("loaded fSpy project {}", path.display());
        Ok(project)
    }

    /// Decodes an already-read container into a validated project.
    ///
    /// Fails without producing any partial value when required fields are
    /// missing or invalid.
    pub fn decode(file: ProjectFile, source_path: impl Into<PathBuf>) -> Result<Self> {
        let params = file
            .state
            .camera_parameters
            .ok_or(FspyError::MissingField("cameraParameters"))?;

        let transform = params
            .camera_transform
            .ok_or(FspyError::MissingField("cameraParameters.cameraTransform"))?;
        let rows = transform.rows;

        let position = Vec3::new(rows[0][3] as f32, rows[1][3] as f32, rows[2][3] as f32);
        let rotation = Mat3::from_cols(
            Vec3::new(rows[0][0] as f32, rows[1][0] as f32, rows[2][0] as f32),
            Vec3::new(rows[0][1] as f32, rows[1][1] as f32, rows[2][1] as f32),
            Vec3::new(rows[0][2] as f32, rows[1][2] as f32, rows[2][2] as f32),
        );
        let pose = CameraPose::new(position, rotation);
        if !pose.is_valid_rotation(ROTATION_TOLERANCE) {
            return Err(FspyError::format(
                "cameraTransform rotation is not orthonormal",
            ));
        }

        let image_width = dimension(params.image_width, "cameraParameters.imageWidth")?;
        let image_height = dimension(params.image_height, "cameraParameters.imageHeight")?;

        let fov = params
            .horizontal_field_of_view
            .ok_or(FspyError::MissingField(
                "cameraParameters.horizontalFieldOfView",
            ))?;
        let principal_point = params.principal_point.as_ref().map(|pp| pp.to_vec2());
        let intrinsics = CameraIntrinsics::from_horizontal_fov(
            fov as f32,
            image_width,
            image_height,
            principal_point,
        )?;

        let distance_unit = file
            .state
            .calibration_settings_base
            .reference_distance_unit
            .as_deref()
            .map_or(ReferenceDistanceUnit::default(), |name| {
                ReferenceDistanceUnit::from_name(name).unwrap_or_else(|| {
                    log::warn!("unknown reference distance unit '{name}', assuming meters");
                    ReferenceDistanceUnit::default()
                })
            });

        Ok(Self {
            source_path: source_path.into(),
            image_width,
            image_height,
            pose,
            intrinsics,
            distance_unit,
            image_data: file.image_data,
        })
    }

    /// The solved pose converted into the host frame.
    #[must_use]
    pub fn pose_in(&self, host: &Conventions) -> CameraPose {
        convert_pose(&self.pose, &Conventions::FSPY, host)
    }

    /// Image aspect ratio (width / height).
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.intrinsics.aspect_ratio()
    }

    /// Whether the project carries an embedded reference image.
    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image_data.is_empty()
    }

    /// The embedded reference image bytes.
    #[must_use]
    pub fn image_data(&self) -> &[u8] {
        &self.image_data
    }

    /// Writes the embedded reference image to `path`.
    ///
    /// Fails with [`FspyError::MissingImage`] when the project has no
    /// embedded image.
    pub fn save_image(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if self.image_data.is_empty() {
            return Err(FspyError::MissingImage(path.to_path_buf()));
        }
        fs::write(path, &self.image_data)?;
        log::info!("reference image saved to {}", path.display());
        Ok(())
    }
}

fn dimension(value: Option<f64>, field: &'static str) -> Result<u32> {
    let value = value.ok_or(FspyError::MissingField(field))?;
    if !value.is_finite() || value < 1.0 || value > f64::from(u32::MAX) {
        return Err(FspyError::format(format!(
            "{field} must be a positive pixel count, got {value}"
        )));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use fspy_core::UpAxis;

    use super::*;
    use crate::test_bytes::container_bytes;

    fn golden_state() -> String {
        r#"{
            "cameraParameters": {
                "cameraTransform": {
                    "rows": [
                        [1, 0, 0, 1.0],
                        [0, 0, -1, 2.0],
                        [0, 1, 0, 3.0],
                        [0, 0, 0, 1]
                    ]
                },
                "imageWidth": 1920,
                "imageHeight": 1080,
                "horizontalFieldOfView": 0.9272952,
                "principalPoint": { "x": 0.05, "y": 0.0 }
            },
            "calibrationSettingsBase": { "referenceDistanceUnit": "Centimeters" }
        }"#
        .to_string()
    }

    fn golden_project() -> CalibrationProject {
        let bytes = container_bytes(&golden_state(), &[1, 2, 3, 4]);
        let file = ProjectFile::from_bytes(&bytes).unwrap();
        CalibrationProject::decode(file, "scene.fspy").unwrap()
    }

    #[test]
    fn decodes_known_values() {
        let project = golden_project();
        assert_eq!(project.image_width, 1920);
        assert_eq!(project.image_height, 1080);
        assert!((project.pose.position - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
        assert!(project.pose.is_valid_rotation(1e-5));
        // fov 0.9272952 rad = 2*atan(0.5) so f = 36mm.
        assert!((project.intrinsics.focal_length_mm - 36.0).abs() < 1e-3);
        assert_eq!(project.distance_unit, ReferenceDistanceUnit::Centimeters);
        assert!(project.has_image());
    }

    #[test]
    fn pose_in_host_frame_matches_expected_values() {
        let project = golden_project();
        let host = project.pose_in(&Conventions::new(UpAxis::Y, 1.0));
        // Z-up -> Y-up: (x, y, z) -> (x, z, -y).
        assert!((host.position - Vec3::new(1.0, 3.0, -2.0)).length() < 1e-6);
        assert!(host.is_valid_rotation(1e-5));
        // The camera's local X axis is world X in the source; it is
        // untouched by the axis remap.
        assert!((host.rotation * Vec3::X - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn pose_in_identical_frame_is_untouched() {
        let project = golden_project();
        let same = project.pose_in(&Conventions::FSPY);
        assert!((same.position - project.pose.position).length() < 1e-6);
    }

    #[test]
    fn missing_camera_parameters_fails_with_field_name() {
        let bytes = container_bytes(r#"{ "calibrationSettingsBase": {} }"#, &[]);
        let file = ProjectFile::from_bytes(&bytes).unwrap();
        let err = CalibrationProject::decode(file, "x.fspy").unwrap_err();
        assert!(matches!(err, FspyError::MissingField("cameraParameters")));
    }

    #[test]
    fn missing_transform_fails_with_field_name() {
        let bytes = container_bytes(
            r#"{ "cameraParameters": { "imageWidth": 10, "imageHeight": 10 } }"#,
            &[],
        );
        let file = ProjectFile::from_bytes(&bytes).unwrap();
        let err = CalibrationProject::decode(file, "x.fspy").unwrap_err();
        assert!(matches!(
            err,
            FspyError::MissingField("cameraParameters.cameraTransform")
        ));
    }

    #[test]
    fn non_orthonormal_rotation_is_rejected() {
        let state = r#"{
            "cameraParameters": {
                "cameraTransform": {
                    "rows": [
                        [2, 0, 0, 0],
                        [0, 2, 0, 0],
                        [0, 0, 2, 0],
                        [0, 0, 0, 1]
                    ]
                },
                "imageWidth": 10,
                "imageHeight": 10,
                "horizontalFieldOfView": 1.0
            }
        }"#;
        let file = ProjectFile::from_bytes(&container_bytes(state, &[])).unwrap();
        let err = CalibrationProject::decode(file, "x.fspy").unwrap_err();
        assert!(matches!(err, FspyError::Format { .. }));
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        let state = golden_state().replace("\"imageWidth\": 1920", "\"imageWidth\": 0");
        let file = ProjectFile::from_bytes(&container_bytes(&state, &[])).unwrap();
        assert!(CalibrationProject::decode(file, "x.fspy").is_err());
    }

    #[test]
    fn save_image_without_payload_is_missing_image() {
        let bytes = container_bytes(&golden_state(), &[]);
        let file = ProjectFile::from_bytes(&bytes).unwrap();
        let project = CalibrationProject::decode(file, "x.fspy").unwrap();
        assert!(!project.has_image());
        let err = project.save_image("/tmp/nope.png").unwrap_err();
        assert!(matches!(err, FspyError::MissingImage(_)));
    }
}
