//! The import pipeline.

use std::path::PathBuf;

use fspy_core::{
    rotation_to_euler_degrees, CameraNodes, CameraPose, Conventions, FilmFit, FspyError,
    ImportOptions, NodeId, Result, SceneBackend,
};
use fspy_format::CalibrationProject;

/// Drives one "Import Camera" action against a [`SceneBackend`].
///
/// Owns nothing between runs; every import decodes, converts, and builds in
/// one unbroken sequence on the caller's thread, since host scene APIs are
/// not safe to call anywhere else.
pub struct Importer<'a> {
    scene: &'a mut dyn SceneBackend,
    host: Conventions,
}

/// Nodes created by a successful import, plus the pose actually applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportResult {
    /// The group the camera is parented under.
    pub group: NodeId,
    /// The camera's transform and shape nodes.
    pub camera: CameraNodes,
    /// The image plane, when a reference image was requested and available.
    pub image_plane: Option<NodeId>,
    /// Where the reference image was written, if it was.
    pub image_path: Option<PathBuf>,
    /// The camera pose in the host frame.
    pub pose: CameraPose,
}

impl<'a> Importer<'a> {
    /// Creates an importer targeting `scene`, converting poses into the
    /// `host` coordinate conventions.
    pub fn new(scene: &'a mut dyn SceneBackend, host: Conventions) -> Self {
        Self { scene, host }
    }

    /// Imports a decoded project: camera, lens attributes, and (optionally)
    /// the reference image plane.
    ///
    /// Any host rejection aborts the remaining steps and surfaces as
    /// [`FspyError::Scene`]. A missing or unsavable reference image only
    /// suppresses the image plane; the camera import still succeeds.
    pub fn import(
        &mut self,
        project: &CalibrationProject,
        options: &ImportOptions,
    ) -> Result<ImportResult> {
        let pose = project.pose_in(&self.host);
        log::debug!(
            "importing {} at {:?} (host frame)",
            project.source_path.display(),
            pose.position
        );

        let group = self.scene.create_group(&options.group_name)?;
        let camera = self.scene.create_camera(&options.camera_name, group)?;

        self.scene.set_translation(camera.transform, pose.position)?;
        let euler = rotation_to_euler_degrees(pose.rotation);
        self.scene.set_rotation_degrees(camera.transform, euler)?;
        log::info!("camera placed at {:?}, rotation {euler:?} deg", pose.position);

        let intrinsics = &project.intrinsics;
        self.scene
            .set_film_aperture_inches(camera.shape, intrinsics.film_aperture_inches())?;
        if intrinsics.principal_point.is_some() {
            self.scene
                .set_film_offset_inches(camera.shape, intrinsics.film_offset_inches())?;
        }
        self.scene.set_film_fit(camera.shape, FilmFit::Horizontal)?;
        self.scene
            .set_focal_length(camera.shape, intrinsics.focal_length_mm)?;
        log::info!("focal length set to {:.2}mm", intrinsics.focal_length_mm);

        if options.lock_camera {
            self.scene.lock_translation(camera.transform)?;
        }

        let (image_plane, image_path) = self.create_image_plane(project, options, camera)?;

        if let Some(up_axis) = options.up_axis {
            let degrees = up_axis.group_rotation_degrees(options.rotation_offset_degrees);
            self.scene.set_rotation_degrees(group, degrees)?;
        } else if options.rotation_offset_degrees != glam::Vec3::ZERO {
            self.scene
                .set_rotation_degrees(group, options.rotation_offset_degrees)?;
        }

        Ok(ImportResult {
            group,
            camera,
            image_plane,
            image_path,
            pose,
        })
    }

    /// Writes the reference image and attaches an image plane.
    ///
    /// Declining to supply an image path, a project without an embedded
    /// image, and a failed image write all land in the same place: no
    /// image plane, no error. Host rejection of the plane itself still
    /// aborts.
    fn create_image_plane(
        &mut self,
        project: &CalibrationProject,
        options: &ImportOptions,
        camera: CameraNodes,
    ) -> Result<(Option<NodeId>, Option<PathBuf>)> {
        let Some(path) = &options.image_path else {
            log::debug!("no image path supplied, skipping image plane");
            return Ok((None, None));
        };
        match project.save_image(path) {
            Ok(()) => {
                let plane = self.scene.create_image_plane(camera, path)?;
                log::info!("image plane created with {}", path.display());
                Ok((Some(plane), Some(path.clone())))
            }
            Err(FspyError::MissingImage(_) | FspyError::Io(_)) => {
                log::warn!(
                    "reference image unavailable at {}, continuing without image plane",
                    path.display()
                );
                Ok((None, None))
            }
            Err(other) => Err(other),
        }
    }
}
