//! fspy-import-rs: import fSpy camera calibrations into a host 3D scene.
//!
//! [fSpy](https://fspy.io) solves a still camera's pose and lens from a
//! single photograph and saves the solution in an `.fspy` project file.
//! This crate reads that file and drives a host scene through the
//! [`SceneBackend`] trait: it creates a grouped camera, applies the solved
//! transform (converted into the host's coordinate conventions), configures
//! the lens and film back, and optionally attaches the reference image as
//! an image plane.
//!
//! # Quick Start
//!
//! ```no_run
//! use fspy_import::*;
//!
//! fn main() -> Result<()> {
//!     init();
//!
//!     // A real integration passes its host's backend here.
//!     let mut scene = RecordingScene::new();
//!     let mut importer = Importer::new(&mut scene, Conventions::y_up());
//!
//!     let project = CalibrationProject::load("shot.fspy")?;
//!     let options = ImportOptions::new().with_image_path("shot.png");
//!     let result = importer.import(&project, &options)?;
//!
//!     println!("{}", ImportReport::from_project(&project, &result.pose));
//!     Ok(())
//! }
//! ```

mod importer;
mod recording;
mod report;

pub use importer::{ImportResult, Importer};
pub use recording::{RecordingScene, SceneCall};
pub use report::ImportReport;

// Re-export core types
pub use fspy_core::{
    convert_pose, rotation_to_euler_degrees, CameraIntrinsics, CameraNodes, CameraPose,
    Conventions, FilmFit, FspyError, ImportOptions, NodeId, Result, SceneBackend, UpAxis, Vec2,
    Vec3,
};

// Re-export format types
pub use fspy_format::{CalibrationProject, ProjectFile, ReferenceDistanceUnit};

/// Initializes logging from the environment.
///
/// Call once at startup; safe to call again.
pub fn init() {
    let _ = env_logger::try_init();
    log::debug!("fspy-import initialized");
}

/// Initializes logging at an explicit verbosity, for hosts that expose
/// "verbose" and "trace" toggles instead of environment variables.
pub fn init_with_verbosity(debug: bool, trace: bool) {
    let level = if trace {
        log::LevelFilter::Trace
    } else if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}

/// Loads a project file and imports it in one step.
///
/// Returns the decoded project together with the created nodes so callers
/// can still show a summary afterwards.
pub fn import_file(
    scene: &mut dyn SceneBackend,
    host: Conventions,
    path: impl AsRef<std::path::Path>,
    options: &ImportOptions,
) -> Result<(CalibrationProject, ImportResult)> {
    let project = CalibrationProject::load(path)?;
    let result = Importer::new(scene, host).import(&project, options)?;
    Ok((project, result))
}
