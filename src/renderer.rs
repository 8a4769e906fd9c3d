//! Provides a software rasterizer for previewing baked quads.
//!
//! Each quad is split into two triangles and drawn with a simple perspective
//! camera, flat shading, and a z-buffer. Back faces are culled by screen
//! winding, so the preview shows exactly the sides bake marked as front.
//!
//! No GPU is required; it runs entirely on the CPU.
//!
//! # Examples
//! ```
//! use rawcube::renderer::{render_quads, RenderOptions};
//!
//! let pixels = render_quads(&[], 64, 64, &RenderOptions::default());
//! assert!(pixels.is_none());
//! ```

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::model::{Quad, UV_TILE};
use crate::scene::TextureData;

/// Preview rendering settings.
///
/// # Examples
/// ```
/// use rawcube::renderer::RenderOptions;
///
/// assert!(RenderOptions::default().cull_back_faces);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Skip triangles that wind clockwise on screen.
    pub cull_back_faces: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cull_back_faces: true,
        }
    }
}

/// A triangle ready for rasterization, with normalized UVs.
struct Triangle<'a> {
    verts: [Vec3; 3],
    uvs: [[f32; 2]; 3],
    texture: &'a TextureData,
}

fn quads_to_triangles(quads: &[Quad<TextureData>]) -> Vec<Triangle<'_>> {
    let mut triangles = Vec::with_capacity(quads.len() * 2);
    for quad in quads {
        for indices in Quad::<TextureData>::TRIANGLE_INDICES {
            let corners = indices.map(|i| quad.vertices[i]);
            triangles.push(Triangle {
                verts: corners.map(|c| Vec3::from_array(c.position)),
                uvs: corners.map(|c| [c.uv[0] / UV_TILE, c.uv[1] / UV_TILE]),
                texture: &quad.texture,
            });
        }
    }
    triangles
}

/// Renders baked quads into an RGBA pixel buffer.
///
/// Returns `None` if there is nothing to draw or the geometry has no extent.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use rawcube::model::{RawCuboid, RawModel};
/// use rawcube::renderer::{render_quads, RenderOptions};
/// use rawcube::scene::TextureData;
///
/// let white = Arc::new(TextureData {
///     name: "white".to_string(),
///     width: 1,
///     height: 1,
///     data: vec![255, 255, 255, 255],
/// });
/// let mut quads = Vec::new();
/// RawCuboid::with_texture(16.0, 16.0, 16.0, white).bake(&mut quads);
///
/// let pixels = render_quads(&quads, 32, 32, &RenderOptions::default()).unwrap();
/// assert_eq!(pixels.len(), 32 * 32 * 4);
/// ```
pub fn render_quads(
    quads: &[Quad<TextureData>],
    width: u32,
    height: u32,
    options: &RenderOptions,
) -> Option<Vec<u8>> {
    let triangles = quads_to_triangles(quads);

    if triangles.is_empty() || width == 0 || height == 0 {
        return None;
    }

    let (bb_min, bb_max) = compute_bounds(&triangles);
    let center = bb_min.lerp(bb_max, 0.5);
    let radius = (bb_max - bb_min).length() * 0.5;
    if radius < 1e-6 {
        return None;
    }

    let view_proj = camera(center, radius, width as f32 / height as f32);
    let viewport = Vec2::new(width as f32, height as f32);

    let w = width as usize;
    let h = height as usize;
    let mut color_buf = vec![[0.0_f32; 4]; w * h];
    let mut depth_buf = vec![f32::INFINITY; w * h];
    let mut culled = 0usize;

    for tri in &triangles {
        let Some(screen) = project(view_proj, tri.verts, viewport) else {
            continue;
        };
        // Screen y points down: front faces have negative signed area
        if options.cull_back_faces && signed_area(screen) >= 0.0 {
            culled += 1;
            continue;
        }

        let shade = flat_shade(tri.verts);
        let (min, max) = screen_bounds(screen, w, h);

        for y in min.1..max.1 {
            for x in min.0..max.0 {
                let (b0, b1, b2) = barycentric(screen, x as f32 + 0.5, y as f32 + 0.5);
                if b0 < 0.0 || b1 < 0.0 || b2 < 0.0 {
                    continue;
                }

                let z = b0 * screen[0].z + b1 * screen[1].z + b2 * screen[2].z;
                let idx = y * w + x;
                if z >= depth_buf[idx] {
                    continue;
                }

                let [u0, u1, u2] = tri.uvs;
                let texel = tri.texture.sample(
                    b0 * u0[0] + b1 * u1[0] + b2 * u2[0],
                    b0 * u0[1] + b1 * u1[1] + b2 * u2[1],
                );
                if texel[3] < 0.5 {
                    continue;
                }

                depth_buf[idx] = z;
                color_buf[idx] = [
                    (texel[0] * shade).min(1.0),
                    (texel[1] * shade).min(1.0),
                    (texel[2] * shade).min(1.0),
                    1.0,
                ];
            }
        }
    }

    tracing::debug!(
        triangles = triangles.len(),
        culled,
        width,
        height,
        "rendered preview"
    );

    Some(
        color_buf
            .iter()
            .flat_map(|color| color.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8))
            .collect(),
    )
}

/// Builds the view-projection for a camera above the south-east corner.
fn camera(center: Vec3, radius: f32, aspect: f32) -> Mat4 {
    let azimuth = 35.0_f32.to_radians();
    let elevation = 25.0_f32.to_radians();
    let dist = radius * 2.8;

    let eye = center
        + dist
            * Vec3::new(
                elevation.cos() * azimuth.sin(),
                elevation.sin(),
                elevation.cos() * azimuth.cos(),
            );

    let view = Mat4::look_at_rh(eye, center, Vec3::Y);
    let fov = 45.0_f32.to_radians();
    let proj = Mat4::perspective_rh_gl(fov, aspect, radius * 0.01, radius * 100.0);
    proj * view
}

/// Maps world-space corners to pixel coordinates plus NDC depth.
///
/// Returns `None` when any corner is behind the camera.
fn project(view_proj: Mat4, verts: [Vec3; 3], viewport: Vec2) -> Option<[Vec3; 3]> {
    let mut screen = [Vec3::ZERO; 3];
    for (out, vert) in screen.iter_mut().zip(verts) {
        let clip: Vec4 = view_proj * vert.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        *out = Vec3::new(
            (ndc.x * 0.5 + 0.5) * viewport.x,
            (0.5 - ndc.y * 0.5) * viewport.y,
            ndc.z,
        );
    }
    Some(screen)
}

/// Two-light flat shading; light direction sign is ignored.
fn flat_shade(verts: [Vec3; 3]) -> f32 {
    let key = Vec3::new(0.5, 0.8, 0.3).normalize();
    let fill = Vec3::new(-0.3, 0.2, -0.5).normalize();

    let normal = (verts[1] - verts[0])
        .cross(verts[2] - verts[0])
        .normalize_or_zero();
    let key_light = normal.dot(key).abs();
    let fill_light = normal.dot(fill).abs();

    (0.15 + key_light * 0.60 + fill_light * 0.15 + key_light.powf(32.0) * 0.10).min(1.0)
}

/// Pixel range covered by a screen triangle, clamped to the framebuffer.
fn screen_bounds(screen: [Vec3; 3], w: usize, h: usize) -> ((usize, usize), (usize, usize)) {
    let min = screen[0].min(screen[1]).min(screen[2]).max(Vec3::ZERO);
    let max = screen[0].max(screen[1]).max(screen[2]).ceil();
    (
        (min.x as usize, min.y as usize),
        ((max.x as usize).min(w), (max.y as usize).min(h)),
    )
}

/// Computes the axis-aligned bounding box of all triangle vertices.
fn compute_bounds(triangles: &[Triangle<'_>]) -> (Vec3, Vec3) {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for tri in triangles {
        for v in &tri.verts {
            min = min.min(*v);
            max = max.max(*v);
        }
    }
    (min, max)
}

// ===========================================================================
// Rasterization helpers
// ===========================================================================

fn signed_area(tri: [Vec3; 3]) -> f32 {
    (tri[1].x - tri[0].x) * (tri[2].y - tri[0].y) - (tri[2].x - tri[0].x) * (tri[1].y - tri[0].y)
}

fn barycentric(tri: [Vec3; 3], px: f32, py: f32) -> (f32, f32, f32) {
    let v0x = tri[1].x - tri[0].x;
    let v0y = tri[1].y - tri[0].y;
    let v1x = tri[2].x - tri[0].x;
    let v1y = tri[2].y - tri[0].y;
    let v2x = px - tri[0].x;
    let v2y = py - tri[0].y;

    let d00 = v0x * v0x + v0y * v0y;
    let d01 = v0x * v1x + v0y * v1y;
    let d11 = v1x * v1x + v1y * v1y;
    let d20 = v2x * v0x + v2y * v0y;
    let d21 = v2x * v1x + v2y * v1y;

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < 1e-10 {
        return (-1.0, -1.0, -1.0);
    }

    let inv = 1.0 / denom;
    let v = (d11 * d20 - d01 * d21) * inv;
    let w = (d00 * d21 - d01 * d20) * inv;
    let u = 1.0 - v - w;

    (u, v, w)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{FaceTextures, Facing, RawCuboid, RawModel};

    fn solid(rgba: [u8; 4]) -> Arc<TextureData> {
        Arc::new(TextureData {
            name: "solid".to_string(),
            width: 1,
            height: 1,
            data: rgba.to_vec(),
        })
    }

    fn center_pixel(pixels: &[u8], size: usize) -> &[u8] {
        let idx = ((size / 2) * size + size / 2) * 4;
        &pixels[idx..idx + 4]
    }

    #[test]
    fn test_render_empty() {
        assert!(render_quads(&[], 16, 16, &RenderOptions::default()).is_none());
    }

    #[test]
    fn test_render_collapsed_cuboid() {
        let mut cube = RawCuboid::with_texture(4.0, 4.0, 4.0, solid([255; 4]));
        cube.scale(0.0);
        let mut quads = Vec::new();
        cube.bake(&mut quads);
        assert!(render_quads(&quads, 16, 16, &RenderOptions::default()).is_none());
    }

    #[test]
    fn test_render_cube_covers_center() {
        let mut quads = Vec::new();
        RawCuboid::with_texture(16.0, 16.0, 16.0, solid([255, 0, 0, 255])).bake(&mut quads);

        let pixels = render_quads(&quads, 64, 64, &RenderOptions::default()).unwrap();
        assert_eq!(pixels.len(), 64 * 64 * 4);
        let center = center_pixel(&pixels, 64);
        assert_eq!(center[3], 255);
        assert!(center[0] > 0);
        assert_eq!(center[1], 0);
        // Corners stay background
        assert_eq!(&pixels[0..4], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_back_face_is_culled() {
        // A lone north face seen from the south-east camera shows its back
        let textures = FaceTextures::empty().with(Facing::North, solid([255; 4]));
        let mut quads = Vec::new();
        RawCuboid::new(16.0, 16.0, 16.0, textures).bake(&mut quads);

        let culled = render_quads(&quads, 32, 32, &RenderOptions::default()).unwrap();
        assert!(culled.chunks_exact(4).all(|px| px[3] == 0));

        let options = RenderOptions {
            cull_back_faces: false,
        };
        let drawn = render_quads(&quads, 32, 32, &options).unwrap();
        assert!(drawn.chunks_exact(4).any(|px| px[3] == 255));
    }

    #[test]
    fn test_transparent_texels_are_skipped() {
        let mut quads = Vec::new();
        RawCuboid::with_texture(16.0, 16.0, 16.0, solid([255, 255, 255, 0])).bake(&mut quads);
        let pixels = render_quads(&quads, 32, 32, &RenderOptions::default()).unwrap();
        assert!(pixels.iter().all(|b| *b == 0));
    }
}
