//! Provides the raw cuboid: eight mutable corners and six optional face textures.
//!
//! Vertex layout right after construction from extents (`h` = height,
//! `x`/`z` = half width/depth):
//! ```text
//!      2-------1        Y+
//!     /|      /|        |
//!    3-------0 |        |
//!    | 6-----|-5        +--- X+
//!    |/      |/        /
//!    7-------4        Z+
//! ```
//! - 0..=3: top face at `y = h`: (x,h,z), (x,h,-z), (-x,h,-z), (-x,h,z)
//! - 4..=7: bottom face at `y = 0`, vertex `i + 4` below vertex `i`
//!
//! # Examples
//! ```
//! use std::sync::Arc;
//!
//! use rawcube::model::RawCuboid;
//!
//! let cube = RawCuboid::with_texture(2.0, 3.0, 4.0, Arc::new(()));
//! assert_eq!(cube.vertex(0).to_array(), [1.0, 3.0, 2.0]);
//! assert_eq!(cube.vertex(6).to_array(), [-1.0, 0.0, -2.0]);
//! ```

use std::f64::consts::PI;
use std::sync::Arc;

use glam::{Mat3, Vec3};

use super::{FaceTextures, Facing, ModelError, Quad, RawModel, Vec2, UV_TILE};
use crate::math::{cos_angle, distance_of, sin_angle};

const U_MIN: f32 = 0.0;
const U_MAX: f32 = UV_TILE;
const V_MIN: f32 = 0.0;
const V_MAX: f32 = UV_TILE;

/// Vertex indices and UV corners for one baked face, in emit order.
struct FaceLayout {
    facing: Facing,
    indices: [usize; 4],
    uvs: [Vec2; 4],
}

/// Per-face winding and UV assignment.
///
/// The order decides which side the consuming renderer treats as front.
const FACE_LAYOUTS: [FaceLayout; 6] = [
    FaceLayout {
        facing: Facing::Down,
        indices: [7, 6, 5, 4],
        uvs: [[U_MIN, V_MIN], [U_MIN, V_MAX], [U_MAX, V_MAX], [U_MAX, V_MIN]],
    },
    FaceLayout {
        facing: Facing::Up,
        indices: [0, 1, 2, 3],
        uvs: [[U_MAX, V_MAX], [U_MAX, V_MIN], [U_MIN, V_MIN], [U_MIN, V_MAX]],
    },
    FaceLayout {
        facing: Facing::North,
        indices: [2, 1, 5, 6],
        uvs: [[U_MAX, V_MIN], [U_MIN, V_MIN], [U_MIN, V_MAX], [U_MAX, V_MAX]],
    },
    FaceLayout {
        facing: Facing::South,
        indices: [3, 7, 4, 0],
        uvs: [[U_MIN, V_MIN], [U_MIN, V_MAX], [U_MAX, V_MAX], [U_MAX, V_MIN]],
    },
    FaceLayout {
        facing: Facing::West,
        indices: [3, 2, 6, 7],
        uvs: [[U_MAX, V_MIN], [U_MIN, V_MIN], [U_MIN, V_MAX], [U_MAX, V_MAX]],
    },
    FaceLayout {
        facing: Facing::East,
        indices: [1, 0, 4, 5],
        uvs: [[U_MAX, V_MIN], [U_MIN, V_MIN], [U_MIN, V_MAX], [U_MAX, V_MAX]],
    },
];

/// A cuboid as eight corner vertices plus a shared per-face texture table.
///
/// Cloning copies the vertices and shares the texture table, so a clone can
/// be transformed independently of the original.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use rawcube::model::{RawCuboid, RawModel};
///
/// let base = RawCuboid::with_texture(2.0, 10.0, 2.0, Arc::new("pole"));
/// let mut tilted = base.clone();
/// tilted.rotate_around_z(45.0);
/// assert_eq!(base.vertex(0).to_array(), [1.0, 10.0, 1.0]);
/// assert_ne!(tilted.vertex(0), base.vertex(0));
/// ```
#[derive(Debug)]
pub struct RawCuboid<T> {
    vertices: [Vec3; 8],
    textures: Arc<FaceTextures<T>>,
}

impl<T> Clone for RawCuboid<T> {
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices,
            textures: Arc::clone(&self.textures),
        }
    }
}

impl<T> RawCuboid<T> {
    /// Builds a cuboid standing on `y = 0`, centered on the Y axis.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use rawcube::model::{FaceTextures, Facing, RawCuboid};
    ///
    /// let textures = FaceTextures::empty().with(Facing::Up, Arc::new("top"));
    /// let slab = RawCuboid::new(16.0, 8.0, 16.0, textures);
    /// assert_eq!(slab.vertex(1).y, 8.0);
    /// ```
    pub fn new(width: f32, height: f32, depth: f32, textures: FaceTextures<T>) -> Self {
        let x = width / 2.0;
        let z = depth / 2.0;

        let vertices = [
            // Top
            Vec3::new(x, height, z),
            Vec3::new(x, height, -z),
            Vec3::new(-x, height, -z),
            Vec3::new(-x, height, z),
            // Bottom
            Vec3::new(x, 0.0, z),
            Vec3::new(x, 0.0, -z),
            Vec3::new(-x, 0.0, -z),
            Vec3::new(-x, 0.0, z),
        ];

        Self {
            vertices,
            textures: Arc::new(textures),
        }
    }

    /// Builds a cuboid using one texture on every face.
    pub fn with_texture(width: f32, height: f32, depth: f32, texture: Arc<T>) -> Self {
        Self::new(width, height, depth, FaceTextures::uniform(texture))
    }

    /// Wraps pre-built geometry as given.
    pub fn from_vertices(vertices: [Vec3; 8], textures: Arc<FaceTextures<T>>) -> Self {
        Self { vertices, textures }
    }

    /// Wraps pre-built geometry from a slice.
    ///
    /// # Errors
    /// Returns [`ModelError::VertexCount`] unless the slice holds exactly 8 vertices.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use glam::Vec3;
    /// use rawcube::model::{FaceTextures, ModelError, RawCuboid};
    ///
    /// let textures = Arc::new(FaceTextures::<()>::empty());
    /// let err = RawCuboid::from_vertex_slice(&[Vec3::ZERO; 3], textures).unwrap_err();
    /// assert_eq!(err, ModelError::VertexCount(3));
    /// ```
    pub fn from_vertex_slice(
        vertices: &[Vec3],
        textures: Arc<FaceTextures<T>>,
    ) -> Result<Self, ModelError> {
        let vertices: [Vec3; 8] = vertices
            .try_into()
            .map_err(|_| ModelError::VertexCount(vertices.len()))?;
        Ok(Self::from_vertices(vertices, textures))
    }

    /// Wraps pre-built double-precision geometry, narrowing it to `f32`.
    pub fn from_f64_vertices(vertices: &[[f64; 3]; 8], textures: Arc<FaceTextures<T>>) -> Self {
        let vertices = vertices.map(|[x, y, z]| Vec3::new(x as f32, y as f32, z as f32));
        Self::from_vertices(vertices, textures)
    }

    /// Returns all eight vertices.
    pub fn vertices(&self) -> &[Vec3; 8] {
        &self.vertices
    }

    /// Returns one vertex by layout index.
    ///
    /// # Panics
    /// Panics if `index >= 8`.
    pub fn vertex(&self, index: usize) -> Vec3 {
        self.vertices[index]
    }

    /// Returns the shared texture table.
    pub fn textures(&self) -> &Arc<FaceTextures<T>> {
        &self.textures
    }

    /// Applies a linear map to every vertex.
    fn transform(&mut self, matrix: Mat3) -> &mut Self {
        for v in &mut self.vertices {
            *v = matrix * *v;
        }
        self
    }
}

impl<T> RawModel<T> for RawCuboid<T> {
    fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        let offset = Vec3::new(x, y, z);
        for v in &mut self.vertices {
            *v += offset;
        }
        self
    }

    /// ```text
    /// | 1   0    0   |
    /// | 0  cos -sin  |
    /// | 0  sin  cos  |
    /// ```
    fn rotate_around_x(&mut self, angle: f32) -> &mut Self {
        let (cos, sin) = (cos_angle(angle), sin_angle(angle));
        self.transform(Mat3::from_cols(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, cos, sin),
            Vec3::new(0.0, -sin, cos),
        ))
    }

    /// ```text
    /// |  cos  0  sin |
    /// |   0   1   0  |
    /// | -sin  0  cos |
    /// ```
    fn rotate_around_y(&mut self, angle: f32) -> &mut Self {
        let (cos, sin) = (cos_angle(angle), sin_angle(angle));
        self.transform(Mat3::from_cols(
            Vec3::new(cos, 0.0, -sin),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(sin, 0.0, cos),
        ))
    }

    /// ```text
    /// | cos -sin  0 |
    /// | sin  cos  0 |
    /// |  0    0   1 |
    /// ```
    fn rotate_around_z(&mut self, angle: f32) -> &mut Self {
        let (cos, sin) = (cos_angle(angle), sin_angle(angle));
        self.transform(Mat3::from_cols(
            Vec3::new(cos, sin, 0.0),
            Vec3::new(-sin, cos, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ))
    }

    /// Rodrigues rotation about the normalized axis `(x, y, z)`.
    fn rotate_around_vector(&mut self, angle: f32, x: f32, y: f32, z: f32) -> &mut Self {
        let length = Vec3::new(x, y, z).length();
        debug_assert!(length > 0.0, "rotation axis must have non-zero length");
        let (x, y, z) = (x / length, y / length, z / length);

        let (cos, sin) = (cos_angle(angle), sin_angle(angle));
        let t = 1.0 - cos;

        self.transform(Mat3::from_cols(
            Vec3::new(cos + x * x * t, x * y * t + z * sin, x * z * t - y * sin),
            Vec3::new(x * y * t - z * sin, cos + y * y * t, y * z * t + x * sin),
            Vec3::new(x * z * t + y * sin, y * z * t - x * sin, cos + z * z * t),
        ))
    }

    fn rotate_to_vec(&mut self, start: Vec3, end: Vec3) -> &mut Self {
        let distance = distance_of(start, end);
        debug_assert!(distance > 0.0, "rotate_to_vec needs distinct points");

        let yaw = f64::from(start.z - end.z).atan2(f64::from(end.x - start.x)) * 180.0 / PI;
        let pitch = f64::from((end.y - start.y) / distance).acos() * 180.0 / PI;

        let axis = Vec3::new((end.z - start.z) / distance, 0.0, (start.x - end.x) / distance);

        self.rotate_around_y(yaw as f32);
        if axis.length_squared() == 0.0 {
            // Vertical target: no tilt axis exists, flip about X when pointing down.
            if end.y < start.y {
                self.rotate_around_x(180.0);
            }
            return self;
        }
        self.rotate_around_vector(pitch as f32, axis.x, axis.y, axis.z)
    }

    fn rotate_to_facing(&mut self, facing: Facing) -> &mut Self {
        match facing {
            Facing::Down => self.rotate_around_x(180.0),
            Facing::Up => self,
            Facing::North => self.rotate_around_y(180.0).rotate_around_x(270.0),
            Facing::South => self.rotate_around_x(90.0),
            Facing::West => self.rotate_around_y(270.0).rotate_around_z(90.0),
            Facing::East => self.rotate_around_y(90.0).rotate_around_z(270.0),
        }
    }

    fn scale(&mut self, factor: f32) -> &mut Self {
        for v in &mut self.vertices {
            *v *= factor;
        }
        self
    }

    fn bake<E: Extend<Quad<T>>>(&self, out: &mut E) {
        let mut emitted = 0usize;
        out.extend(FACE_LAYOUTS.iter().filter_map(|layout| {
            let texture = self.textures.get(layout.facing)?;
            emitted += 1;
            Some(Quad::from_corners(
                layout.indices.map(|i| self.vertices[i]),
                layout.uvs,
                Arc::clone(texture),
            ))
        }));
        tracing::trace!(quads = emitted, "baked cuboid");
    }
}
