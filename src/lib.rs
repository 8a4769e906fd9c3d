//! Provides raw cuboid geometry that bakes into textured quads.
//!
//! A [`model::RawCuboid`] is built from its dimensions, moved around with a
//! chain of in-place affine transforms, and finally baked into up to six
//! [`model::Quad`]s, one per textured face, in the winding order a block
//! renderer expects. Around that core sit a JSON5 scene loader and a CPU
//! preview renderer used by the `rawcube-cli` tool.
//!
//! # Build
//! ```text
//! cargo build --release
//! ```
//!
//! # Examples
//! ```
//! use std::sync::Arc;
//!
//! use rawcube::model::{Facing, RawCuboid, RawModel};
//!
//! let mut post = RawCuboid::with_texture(2.0, 12.0, 2.0, Arc::new("oak_log"));
//! post.rotate_to_facing(Facing::North).translate(8.0, 8.0, 8.0);
//!
//! let mut quads = Vec::new();
//! post.bake(&mut quads);
//! assert_eq!(quads.len(), 6);
//! assert!(quads.iter().all(|q| q.vertices.len() == 4));
//! ```

pub mod math;
pub mod model;
pub mod renderer;
pub mod scene;
