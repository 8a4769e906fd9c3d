//! Provides the raw cuboid model and the types it bakes into.
//!
//! A [`RawCuboid`] owns eight corner vertices and a shared table of
//! per-face textures. Transforms mutate the vertices in place and return
//! the model for chaining; [`RawModel::bake`] turns the result into
//! [`Quad`]s for a renderer.
//!
//! # Examples
//! ```
//! use std::sync::Arc;
//!
//! use rawcube::model::{Facing, RawCuboid, RawModel};
//!
//! let mut cube = RawCuboid::with_texture(4.0, 8.0, 4.0, Arc::new("planks"));
//! cube.rotate_to_facing(Facing::East).translate(8.0, 8.0, 8.0);
//!
//! let mut quads = Vec::new();
//! cube.bake(&mut quads);
//! assert_eq!(quads.len(), 6);
//! ```

pub mod cuboid;
pub mod facing;
pub mod quad;

use std::ops::Index;
use std::sync::Arc;

pub use cuboid::RawCuboid;
pub use facing::Facing;
pub use quad::{Quad, QuadVertex, UV_TILE};

/// A 2D vector as stored in baked output.
pub type Vec2 = [f32; 2];
/// A 3D vector as stored in baked output.
pub type Vec3 = [f32; 3];

/// Errors raised by the fallible model constructors.
///
/// # Examples
/// ```
/// use rawcube::model::ModelError;
///
/// let err = ModelError::VertexCount(5);
/// assert_eq!(err.to_string(), "A cuboid needs exactly 8 vertices, got 5");
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("A cuboid needs exactly 8 vertices, got {0}")]
    VertexCount(usize),
}

/// Per-face texture table, one optional slot per [`Facing`].
///
/// An empty slot means the face is not emitted by bake.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use rawcube::model::{FaceTextures, Facing};
///
/// let textures = FaceTextures::empty().with(Facing::Up, Arc::new("grass_top"));
/// assert_eq!(textures.count(), 1);
/// assert!(textures[Facing::Down].is_none());
/// ```
#[derive(Debug)]
pub struct FaceTextures<T> {
    slots: [Option<Arc<T>>; 6],
}

impl<T> Clone for FaceTextures<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<T> Default for FaceTextures<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> FaceTextures<T> {
    /// A table with every face empty.
    pub fn empty() -> Self {
        Self {
            slots: [None, None, None, None, None, None],
        }
    }

    /// A table using the same texture on all six faces.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use rawcube::model::FaceTextures;
    ///
    /// assert_eq!(FaceTextures::uniform(Arc::new(1u8)).count(), 6);
    /// ```
    pub fn uniform(texture: Arc<T>) -> Self {
        Self {
            slots: std::array::from_fn(|_| Some(Arc::clone(&texture))),
        }
    }

    /// A table from slots in [`Facing::ALL`] order.
    pub fn from_array(slots: [Option<Arc<T>>; 6]) -> Self {
        Self { slots }
    }

    /// Sets the texture for one face.
    pub fn with(mut self, facing: Facing, texture: Arc<T>) -> Self {
        self.slots[facing.index()] = Some(texture);
        self
    }

    /// Returns the texture for one face, if any.
    pub fn get(&self, facing: Facing) -> Option<&Arc<T>> {
        self.slots[facing.index()].as_ref()
    }

    /// Iterates over `(facing, slot)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Facing, Option<&Arc<T>>)> {
        Facing::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Counts the faces that have a texture.
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

impl<T> Index<Facing> for FaceTextures<T> {
    type Output = Option<Arc<T>>;

    fn index(&self, facing: Facing) -> &Self::Output {
        &self.slots[facing.index()]
    }
}

/// A transformable model that bakes into quads.
///
/// All angles are in degrees. Transforms mutate in place and return
/// `&mut Self` so calls can be chained.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use rawcube::model::{RawCuboid, RawModel};
///
/// fn lay_flat<M: RawModel<&'static str>>(model: &mut M) {
///     model.rotate_around_x(90.0).translate(0.0, 0.5, 0.0);
/// }
///
/// let mut cube = RawCuboid::with_texture(1.0, 1.0, 1.0, Arc::new("log"));
/// lay_flat(&mut cube);
/// ```
pub trait RawModel<T> {
    /// Offsets every vertex.
    fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self;

    /// Rotates about the X axis (right-handed).
    fn rotate_around_x(&mut self, angle: f32) -> &mut Self;

    /// Rotates about the Y axis (right-handed).
    fn rotate_around_y(&mut self, angle: f32) -> &mut Self;

    /// Rotates about the Z axis (right-handed).
    fn rotate_around_z(&mut self, angle: f32) -> &mut Self;

    /// Rotates about an arbitrary axis through the origin.
    ///
    /// The axis must have non-zero length.
    fn rotate_around_vector(&mut self, angle: f32, x: f32, y: f32, z: f32) -> &mut Self;

    /// Orients the model's local +Y axis along `start -> end`.
    ///
    /// `start` and `end` must differ. A direction with no horizontal
    /// component (its tilt axis has zero length in `f32`) is handled as
    /// vertical: straight up applies only the yaw turn, straight down also
    /// applies `rotate_around_x(180)`.
    fn rotate_to_vec(&mut self, start: glam::Vec3, end: glam::Vec3) -> &mut Self;

    /// Reorients a model built pointing up so it points along `facing`.
    fn rotate_to_facing(&mut self, facing: Facing) -> &mut Self;

    /// Multiplies every vertex component by `factor`.
    fn scale(&mut self, factor: f32) -> &mut Self;

    /// Appends one quad per textured face to `out`.
    fn bake<E: Extend<Quad<T>>>(&self, out: &mut E);
}
