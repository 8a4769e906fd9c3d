//! Provides the baked quad primitive.
//!
//! A quad carries four textured corners in the winding order the cuboid
//! baked them in, plus the texture handle they sample.
//!
//! # Examples
//! ```
//! use std::sync::Arc;
//!
//! use rawcube::model::{Facing, RawCuboid, RawModel};
//!
//! let cube = RawCuboid::with_texture(16.0, 16.0, 16.0, Arc::new("stone"));
//! let mut quads = Vec::new();
//! cube.bake(&mut quads);
//! assert_eq!(quads[1].facing(), Facing::Up);
//! ```

use std::sync::Arc;

use glam::Vec3 as GlamVec3;
use serde::Serialize;

use super::{Facing, Vec2, Vec3};

/// Full-tile texture extent in baked UV units.
///
/// Sprites of any resolution span `0..UV_TILE`.
///
/// # Examples
/// ```
/// use rawcube::model::UV_TILE;
///
/// assert_eq!(UV_TILE, 16.0);
/// ```
pub const UV_TILE: f32 = 16.0;

/// One corner of a baked quad.
///
/// # Examples
/// ```
/// use rawcube::model::QuadVertex;
///
/// let v = QuadVertex { position: [1.0, 2.0, 3.0], uv: [0.0, 16.0] };
/// assert_eq!(v.uv[1], 16.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QuadVertex {
    /// Model-space position.
    pub position: Vec3,
    /// Texture coordinate in `0..UV_TILE`.
    pub uv: Vec2,
}

/// A four-vertex textured face.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use rawcube::model::{Quad, QuadVertex};
///
/// let corner = |x: f32, z: f32| QuadVertex { position: [x, 0.0, z], uv: [0.0, 0.0] };
/// let quad = Quad {
///     vertices: [corner(0.0, 1.0), corner(0.0, 0.0), corner(1.0, 0.0), corner(1.0, 1.0)],
///     texture: Arc::new(()),
/// };
/// assert_eq!(quad.normal().y, -1.0);
/// ```
#[derive(Debug)]
pub struct Quad<T> {
    /// Corners in front-face winding order.
    pub vertices: [QuadVertex; 4],
    /// The texture this face samples.
    pub texture: Arc<T>,
}

impl<T> Clone for Quad<T> {
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices,
            texture: Arc::clone(&self.texture),
        }
    }
}

impl<T> Quad<T> {
    /// Builds a quad from four positions and their UVs.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use glam::Vec3;
    /// use rawcube::model::Quad;
    ///
    /// let quad = Quad::from_corners(
    ///     [Vec3::ZERO, Vec3::X, Vec3::ONE, Vec3::Y],
    ///     [[0.0, 0.0], [16.0, 0.0], [16.0, 16.0], [0.0, 16.0]],
    ///     Arc::new(7u32),
    /// );
    /// assert_eq!(quad.vertices[2].position, [1.0, 1.0, 1.0]);
    /// ```
    pub fn from_corners(positions: [GlamVec3; 4], uvs: [Vec2; 4], texture: Arc<T>) -> Self {
        let vertices = std::array::from_fn(|i| QuadVertex {
            position: positions[i].to_array(),
            uv: uvs[i],
        });
        Self { vertices, texture }
    }

    /// Returns the corner positions as glam vectors.
    pub fn positions(&self) -> [GlamVec3; 4] {
        self.vertices.map(|v| GlamVec3::from_array(v.position))
    }

    /// Returns the unnormalized face normal, `(v2 - v1) x (v0 - v1)`.
    ///
    /// Points out of the visible side for the winding produced by bake.
    pub fn normal(&self) -> GlamVec3 {
        let [v0, v1, v2, _] = self.positions();
        (v2 - v1).cross(v0 - v1)
    }

    /// Returns the axis-aligned facing closest to this quad's normal.
    pub fn facing(&self) -> Facing {
        Facing::nearest(self.normal())
    }

    /// Splits the quad into triangles (0,1,2) and (0,2,3), as vertex index triples.
    ///
    /// # Examples
    /// ```
    /// use rawcube::model::Quad;
    ///
    /// assert_eq!(Quad::<()>::TRIANGLE_INDICES, [[0, 1, 2], [0, 2, 3]]);
    /// ```
    pub const TRIANGLE_INDICES: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];
}
