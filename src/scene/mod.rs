//! Provides the scene description: textured cuboids and their transform chains.
//!
//! Scenes are JSON5 documents (comments and unquoted keys allowed). Each
//! cuboid names its textures and lists transforms applied in order before
//! baking.
//!
//! # Examples
//! ```
//! use std::path::Path;
//!
//! use rawcube::scene::Scene;
//!
//! let scene = Scene::from_str(
//!     r#"{
//!         // Textures are data URLs or paths relative to the scene file
//!         textures: {
//!             dot: "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAAEElEQVR4AQEFAPr/AP////8J+wP9o9FJCgAAAABJRU5ErkJggg==",
//!         },
//!         cuboids: [{ size: [16, 16, 16], texture: "dot", transforms: [{ rotate_y: 45 }] }],
//!     }"#,
//!     Path::new("."),
//! )
//! .unwrap();
//! assert_eq!(scene.bake().unwrap().len(), 6);
//! ```

pub mod texture;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use glam::Vec3;
use serde::Deserialize;

use crate::math::distance_of;
use crate::model::{FaceTextures, Facing, Quad, RawCuboid, RawModel};
pub use texture::TextureData;

/// Errors that can occur while loading or baking a scene.
///
/// # Examples
/// ```
/// use rawcube::scene::SceneError;
///
/// let err = SceneError::UnknownTexture("lava".to_string());
/// assert_eq!(err.to_string(), "Unknown texture: lava");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scene: {0}")]
    Parse(String),
    #[error("Texture '{name}' failed to load: {reason}")]
    Texture { name: String, reason: String },
    #[error("Unknown texture: {0}")]
    UnknownTexture(String),
    #[error("Cuboid {cuboid}: {reason}")]
    InvalidTransform { cuboid: usize, reason: String },
    #[error("No geometry found")]
    NoGeometry,
}

/// One step of a cuboid's transform chain. Angles are in degrees.
///
/// # Examples
/// ```
/// use rawcube::model::Facing;
/// use rawcube::scene::TransformStep;
///
/// let step: TransformStep = serde_json::from_str(r#"{"facing": "north"}"#).unwrap();
/// assert_eq!(step, TransformStep::Facing(Facing::North));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformStep {
    Translate([f32; 3]),
    RotateX(f32),
    RotateY(f32),
    RotateZ(f32),
    RotateAround { angle: f32, axis: [f32; 3] },
    RotateTo { from: [f32; 3], to: [f32; 3] },
    Facing(Facing),
    Scale(f32),
}

impl TransformStep {
    /// Applies this step to a model.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use rawcube::model::RawCuboid;
    /// use rawcube::scene::TransformStep;
    ///
    /// let mut cube = RawCuboid::with_texture(2.0, 2.0, 2.0, Arc::new(()));
    /// TransformStep::Translate([0.0, -1.0, 0.0]).apply_to(&mut cube);
    /// assert_eq!(cube.vertex(0).y, 1.0);
    /// ```
    pub fn apply_to<T, M: RawModel<T>>(&self, model: &mut M) {
        match *self {
            TransformStep::Translate([x, y, z]) => {
                model.translate(x, y, z);
            }
            TransformStep::RotateX(angle) => {
                model.rotate_around_x(angle);
            }
            TransformStep::RotateY(angle) => {
                model.rotate_around_y(angle);
            }
            TransformStep::RotateZ(angle) => {
                model.rotate_around_z(angle);
            }
            TransformStep::RotateAround { angle, axis } => {
                model.rotate_around_vector(angle, axis[0], axis[1], axis[2]);
            }
            TransformStep::RotateTo { from, to } => {
                model.rotate_to_vec(Vec3::from_array(from), Vec3::from_array(to));
            }
            TransformStep::Facing(facing) => {
                model.rotate_to_facing(facing);
            }
            TransformStep::Scale(factor) => {
                model.scale(factor);
            }
        }
    }

    /// Rejects steps whose geometry is undefined.
    fn validate(&self) -> Result<(), String> {
        match *self {
            TransformStep::RotateAround { axis, .. } => {
                let length_squared = Vec3::from_array(axis).length_squared();
                if !(length_squared > 0.0 && length_squared.is_finite()) {
                    return Err("rotate_around axis has zero or non-finite length".to_string());
                }
            }
            TransformStep::RotateTo { from, to } => {
                let distance = distance_of(Vec3::from_array(from), Vec3::from_array(to));
                if !(distance > 0.0 && distance.is_finite()) {
                    return Err(
                        "rotate_to start and end points coincide or are too far apart".to_string(),
                    );
                }
            }
            _ => {}
        }
        Ok(())
    }
}

// ---- Scene JSON structure ----

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    #[serde(default)]
    textures: BTreeMap<String, String>,
    #[serde(default)]
    cuboids: Vec<CuboidDef>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CuboidDef {
    size: [f32; 3],
    #[serde(default)]
    texture: Option<String>,
    #[serde(default)]
    faces: FaceNames,
    #[serde(default)]
    transforms: Vec<TransformStep>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct FaceNames {
    down: Option<String>,
    up: Option<String>,
    north: Option<String>,
    south: Option<String>,
    west: Option<String>,
    east: Option<String>,
}

impl FaceNames {
    fn get(&self, facing: Facing) -> Option<&str> {
        let name = match facing {
            Facing::Down => &self.down,
            Facing::Up => &self.up,
            Facing::North => &self.north,
            Facing::South => &self.south,
            Facing::West => &self.west,
            Facing::East => &self.east,
        };
        name.as_deref()
    }
}

/// A cuboid with its untransformed geometry and pending transform chain.
#[derive(Debug, Clone)]
pub struct SceneCuboid {
    /// The cuboid as constructed from its size.
    pub base: RawCuboid<TextureData>,
    /// Transforms applied in order by [`SceneCuboid::build`].
    pub transforms: Vec<TransformStep>,
}

impl SceneCuboid {
    /// Returns a transformed copy of the base cuboid.
    pub fn build(&self) -> RawCuboid<TextureData> {
        let mut cuboid = self.base.clone();
        for step in &self.transforms {
            step.apply_to(&mut cuboid);
        }
        cuboid
    }
}

/// A loaded scene with resolved textures.
#[derive(Debug, Clone)]
pub struct Scene {
    cuboids: Vec<SceneCuboid>,
}

impl Scene {
    /// Parses a scene from JSON5 text, resolving texture paths against `base_dir`.
    ///
    /// # Errors
    /// Returns an error if parsing fails, a texture cannot be loaded, a cuboid
    /// names an undeclared texture, or a transform is undefined.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str, base_dir: &Path) -> Result<Self, SceneError> {
        let file: SceneFile = json5::from_str(text)
            .map_err(|e| SceneError::Parse(format!("Failed to parse scene: {}", e)))?;

        let mut textures = BTreeMap::new();
        for (name, source) in &file.textures {
            let data = texture::load_texture(name, source, base_dir)?;
            textures.insert(name.as_str(), Arc::new(data));
        }

        let lookup = |name: &str| {
            textures
                .get(name)
                .cloned()
                .ok_or_else(|| SceneError::UnknownTexture(name.to_string()))
        };

        let mut cuboids = Vec::with_capacity(file.cuboids.len());
        for (index, def) in file.cuboids.iter().enumerate() {
            for step in &def.transforms {
                step.validate()
                    .map_err(|reason| SceneError::InvalidTransform {
                        cuboid: index,
                        reason,
                    })?;
            }

            let shared = def.texture.as_deref().map(&lookup).transpose()?;
            let mut slots = FaceTextures::empty();
            for facing in Facing::ALL {
                let texture = match def.faces.get(facing) {
                    Some(name) => Some(lookup(name)?),
                    None => shared.clone(),
                };
                if let Some(texture) = texture {
                    slots = slots.with(facing, texture);
                }
            }

            if slots.count() == 0 {
                tracing::warn!(cuboid = index, "cuboid has no textured faces");
            }

            let [width, height, depth] = def.size;
            cuboids.push(SceneCuboid {
                base: RawCuboid::new(width, height, depth, slots),
                transforms: def.transforms.clone(),
            });
        }

        tracing::debug!(
            cuboids = cuboids.len(),
            textures = textures.len(),
            "loaded scene"
        );
        Ok(Self { cuboids })
    }

    /// Parses a scene from raw bytes.
    ///
    /// # Errors
    /// Returns [`SceneError::Parse`] for non-UTF-8 input, otherwise as [`Scene::from_str`].
    pub fn from_bytes(data: &[u8], base_dir: &Path) -> Result<Self, SceneError> {
        let text = std::str::from_utf8(data)
            .map_err(|_| SceneError::Parse("Invalid UTF-8 in scene file".to_string()))?;
        Self::from_str(text, base_dir)
    }

    /// Loads a scene file; texture paths resolve against its directory.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the scene is invalid.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    ///
    /// use rawcube::scene::Scene;
    ///
    /// assert!(Scene::from_path(Path::new("does_not_exist.json5")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self, SceneError> {
        let data = std::fs::read(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_bytes(&data, base_dir)
    }

    /// Returns the scene's cuboids in declaration order.
    pub fn cuboids(&self) -> &[SceneCuboid] {
        &self.cuboids
    }

    /// Transforms and bakes every cuboid, in order.
    ///
    /// # Errors
    /// Returns [`SceneError::NoGeometry`] if nothing was baked.
    pub fn bake(&self) -> Result<Vec<Quad<TextureData>>, SceneError> {
        let mut quads = Vec::new();
        for cuboid in &self.cuboids {
            cuboid.build().bake(&mut quads);
        }
        if quads.is_empty() {
            return Err(SceneError::NoGeometry);
        }
        Ok(quads)
    }
}
