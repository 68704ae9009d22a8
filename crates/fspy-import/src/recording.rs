//! An in-memory scene backend.
//!
//! Records every call the importer makes instead of touching a host, which
//! makes the whole pipeline runnable headless: in tests, in dry runs, or
//! when diffing what an import would do.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use fspy_core::{CameraNodes, FilmFit, FspyError, NodeId, Result, SceneBackend, Vec2, Vec3};

/// One recorded scene call, in invocation order.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCall {
    CreateGroup { name: String, node: NodeId },
    CreateCamera { name: String, parent: NodeId, nodes: CameraNodes },
    SetTranslation { node: NodeId, translation: Vec3 },
    SetRotationDegrees { node: NodeId, degrees: Vec3 },
    SetFocalLength { shape: NodeId, focal_length_mm: f32 },
    SetFilmApertureInches { shape: NodeId, aperture: Vec2 },
    SetFilmOffsetInches { shape: NodeId, offset: Vec2 },
    SetFilmFit { shape: NodeId, fit: FilmFit },
    LockTranslation { node: NodeId },
    CreateImagePlane { camera: CameraNodes, path: PathBuf, node: NodeId },
}

impl SceneCall {
    /// Short name of the backend method this call records.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Self::CreateGroup { .. } => "create_group",
            Self::CreateCamera { .. } => "create_camera",
            Self::SetTranslation { .. } => "set_translation",
            Self::SetRotationDegrees { .. } => "set_rotation_degrees",
            Self::SetFocalLength { .. } => "set_focal_length",
            Self::SetFilmApertureInches { .. } => "set_film_aperture_inches",
            Self::SetFilmOffsetInches { .. } => "set_film_offset_inches",
            Self::SetFilmFit { .. } => "set_film_fit",
            Self::LockTranslation { .. } => "lock_translation",
            Self::CreateImagePlane { .. } => "create_image_plane",
        }
    }
}

/// A [`SceneBackend`] that records calls and hands out sequential node ids.
#[derive(Debug, Default)]
pub struct RecordingScene {
    next_id: u64,
    /// Every call made, in order.
    pub calls: Vec<SceneCall>,
    translations: HashMap<NodeId, Vec3>,
    rotations: HashMap<NodeId, Vec3>,
    locked: HashSet<NodeId>,
    fail_on: Option<&'static str>,
}

impl RecordingScene {
    /// Creates an empty recording scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the backend reject the next call to the named method, the way
    /// a host rejects an invalid node operation.
    pub fn fail_on(&mut self, method: &'static str) {
        self.fail_on = Some(method);
    }

    /// The recorded translation of a node, if one was set.
    #[must_use]
    pub fn translation_of(&self, node: NodeId) -> Option<Vec3> {
        self.translations.get(&node).copied()
    }

    /// The recorded rotation of a node, if one was set.
    #[must_use]
    pub fn rotation_of(&self, node: NodeId) -> Option<Vec3> {
        self.rotations.get(&node).copied()
    }

    /// Whether a node's translation was locked.
    #[must_use]
    pub fn is_locked(&self, node: NodeId) -> bool {
        self.locked.contains(&node)
    }

    /// The method names of all recorded calls, in order.
    #[must_use]
    pub fn call_sequence(&self) -> Vec<&'static str> {
        self.calls.iter().map(SceneCall::method).collect()
    }

    fn alloc(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId(self.next_id)
    }

    fn check(&mut self, method: &'static str) -> Result<()> {
        if self.fail_on == Some(method) {
            self.fail_on = None;
            return Err(FspyError::Scene(format!("injected failure in {method}")));
        }
        Ok(())
    }
}

impl SceneBackend for RecordingScene {
    fn create_group(&mut self, name: &str) -> Result<NodeId> {
        self.check("create_group")?;
        let node = self.alloc();
        self.calls.push(SceneCall::CreateGroup {
            name: name.to_string(),
            node,
        });
        Ok(node)
    }

    fn create_camera(&mut self, name: &str, parent: NodeId) -> Result<CameraNodes> {
        self.check("create_camera")?;
        let nodes = CameraNodes {
            transform: self.alloc(),
            shape: self.alloc(),
        };
        self.calls.push(SceneCall::CreateCamera {
            name: name.to_string(),
            parent,
            nodes,
        });
        Ok(nodes)
    }

    fn set_translation(&mut self, node: NodeId, translation: Vec3) -> Result<()> {
        self.check("set_translation")?;
        self.translations.insert(node, translation);
        self.calls.push(SceneCall::SetTranslation { node, translation });
        Ok(())
    }

    fn set_rotation_degrees(&mut self, node: NodeId, degrees: Vec3) -> Result<()> {
        self.check("set_rotation_degrees")?;
        self.rotations.insert(node, degrees);
        self.calls.push(SceneCall::SetRotationDegrees { node, degrees });
        Ok(())
    }

    fn set_focal_length(&mut self, shape: NodeId, focal_length_mm: f32) -> Result<()> {
        self.check("set_focal_length")?;
        self.calls.push(SceneCall::SetFocalLength {
            shape,
            focal_length_mm,
        });
        Ok(())
    }

    fn set_film_aperture_inches(&mut self, shape: NodeId, aperture: Vec2) -> Result<()> {
        self.check("set_film_aperture_inches")?;
        self.calls
            .push(SceneCall::SetFilmApertureInches { shape, aperture });
        Ok(())
    }

    fn set_film_offset_inches(&mut self, shape: NodeId, offset: Vec2) -> Result<()> {
        self.check("set_film_offset_inches")?;
        self.calls.push(SceneCall::SetFilmOffsetInches { shape, offset });
        Ok(())
    }

    fn set_film_fit(&mut self, shape: NodeId, fit: FilmFit) -> Result<()> {
        self.check("set_film_fit")?;
        self.calls.push(SceneCall::SetFilmFit { shape, fit });
        Ok(())
    }

    fn lock_translation(&mut self, node: NodeId) -> Result<()> {
        self.check("lock_translation")?;
        self.locked.insert(node);
        self.calls.push(SceneCall::LockTranslation { node });
        Ok(())
    }

    fn create_image_plane(&mut self, camera: CameraNodes, path: &Path) -> Result<NodeId> {
        self.check("create_image_plane")?;
        let node = self.alloc();
        self.calls.push(SceneCall::CreateImagePlane {
            camera,
            path: path.to_path_buf(),
            node,
        });
        Ok(node)
    }
}
