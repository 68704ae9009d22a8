//! Human-readable import summary.

use fspy_core::{rotation_to_euler_degrees, CameraPose, Vec2, Vec3};
use fspy_format::CalibrationProject;

/// The camera summary shown to the user after loading a project: what the
/// original dialog displays in its information box.
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// Source file name (no directory).
    pub file_name: String,
    /// Reference image size in pixels.
    pub image_size: (u32, u32),
    /// Image aspect ratio.
    pub aspect_ratio: f32,
    /// Horizontal field of view in degrees.
    pub horizontal_fov_degrees: f32,
    /// Camera position, host frame.
    pub position: Vec3,
    /// Camera rotation as XYZ Euler degrees, host frame.
    pub rotation_degrees: Vec3,
    /// Focal length in millimeters.
    pub focal_length_mm: f32,
    /// Principal point, when solved.
    pub principal_point: Option<Vec2>,
    /// Reference distance unit name.
    pub distance_unit: String,
}

impl ImportReport {
    /// Builds a report for a project and the host-frame pose it will be
    /// imported at.
    #[must_use]
    pub fn from_project(project: &CalibrationProject, host_pose: &CameraPose) -> Self {
        let file_name = project
            .source_path
            .file_name()
            .map_or_else(|| project.source_path.display().to_string(), |n| {
                n.to_string_lossy().into_owned()
            });
        Self {
            file_name,
            image_size: (project.image_width, project.image_height),
            aspect_ratio: project.aspect_ratio(),
            horizontal_fov_degrees: project.intrinsics.horizontal_fov().to_degrees(),
            position: host_pose.position,
            rotation_degrees: rotation_to_euler_degrees(host_pose.rotation),
            focal_length_mm: project.intrinsics.focal_length_mm,
            principal_point: project.intrinsics.principal_point,
            distance_unit: project.distance_unit.to_string(),
        }
    }
}

impl std::fmt::Display for ImportReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "File: {}", self.file_name)?;
        writeln!(f, "Image Size: {}x{}", self.image_size.0, self.image_size.1)?;
        writeln!(f, "Aspect Ratio: {:.3}", self.aspect_ratio)?;
        writeln!(f, "Horizontal FOV: {:.2}\u{b0}", self.horizontal_fov_degrees)?;
        writeln!(f, "Camera Position:")?;
        writeln!(f, "  X: {:.3}", self.position.x)?;
        writeln!(f, "  Y: {:.3}", self.position.y)?;
        writeln!(f, "  Z: {:.3}", self.position.z)?;
        writeln!(f, "Camera Rotation (degrees):")?;
        writeln!(f, "  X: {:.3}", self.rotation_degrees.x)?;
        writeln!(f, "  Y: {:.3}", self.rotation_degrees.y)?;
        writeln!(f, "  Z: {:.3}", self.rotation_degrees.z)?;
        writeln!(f, "Focal Length: {:.2}mm", self.focal_length_mm)?;
        if let Some(pp) = self.principal_point {
            writeln!(f, "Principal Point:")?;
            writeln!(f, "  X: {:.3}", pp.x)?;
            writeln!(f, "  Y: {:.3}", pp.y)?;
        }
        write!(f, "Unit: {}", self.distance_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_the_dialog_fields() {
        let report = ImportReport {
            file_name: "scene.fspy".to_string(),
            image_size: (1920, 1080),
            aspect_ratio: 1920.0 / 1080.0,
            horizontal_fov_degrees: 53.13,
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation_degrees: Vec3::new(90.0, 0.0, -45.0),
            focal_length_mm: 36.0,
            principal_point: Some(Vec2::new(0.05, 0.0)),
            distance_unit: "Meters".to_string(),
        };
        let text = report.to_string();
        assert!(text.contains("File: scene.fspy"));
        assert!(text.contains("Image Size: 1920x1080"));
        assert!(text.contains("Aspect Ratio: 1.778"));
        assert!(text.contains("Focal Length: 36.00mm"));
        assert!(text.contains("Principal Point:"));
        assert!(text.contains("Unit: Meters"));
    }
}
