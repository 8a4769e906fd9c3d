//! Integration tests for cuboid transforms and baking.
//!
//! Covers the transform laws (inverse, consistency, composition, clone
//! independence) and the exact bake output of an untransformed block.

use std::sync::Arc;

use glam::Vec3;
use rawcube::model::{FaceTextures, Facing, Quad, RawCuboid, RawModel};

const EPS: f32 = 1e-4;

fn block() -> RawCuboid<&'static str> {
    RawCuboid::with_texture(16.0, 16.0, 16.0, Arc::new("stone"))
}

fn odd_box() -> RawCuboid<&'static str> {
    let mut cuboid = RawCuboid::with_texture(3.0, 7.0, 5.0, Arc::new("brick"));
    cuboid.translate(1.5, -2.0, 4.25);
    cuboid
}

fn assert_same_shape(a: &RawCuboid<&str>, b: &RawCuboid<&str>) {
    for (va, vb) in a.vertices().iter().zip(b.vertices().iter()) {
        assert!(va.abs_diff_eq(*vb, EPS), "{va} != {vb}");
    }
}

fn bake(cuboid: &RawCuboid<&'static str>) -> Vec<Quad<&'static str>> {
    let mut quads = Vec::new();
    cuboid.bake(&mut quads);
    quads
}

// ===========================================================================
// Transform laws
// ===========================================================================

#[test]
fn test_rotate_y_inverse_restores() {
    for angle in [0.0, 15.0, 90.0, 137.5, -60.0, 359.0, 720.0] {
        let original = odd_box();
        let mut cuboid = original.clone();
        cuboid.rotate_around_y(angle).rotate_around_y(-angle);
        assert_same_shape(&cuboid, &original);
    }
}

#[test]
fn test_rotate_around_y_axis_matches_rotate_y() {
    for angle in [0.0, 30.0, 90.0, 181.0, -45.0] {
        let mut by_vector = odd_box();
        let mut by_axis = odd_box();
        by_vector.rotate_around_vector(angle, 0.0, 1.0, 0.0);
        by_axis.rotate_around_y(angle);
        assert_same_shape(&by_vector, &by_axis);
    }
}

#[test]
fn test_rotate_around_x_and_z_axes_match() {
    let mut a = odd_box();
    let mut b = odd_box();
    a.rotate_around_vector(70.0, 1.0, 0.0, 0.0);
    b.rotate_around_x(70.0);
    assert_same_shape(&a, &b);

    let mut a = odd_box();
    let mut b = odd_box();
    a.rotate_around_vector(-20.0, 0.0, 0.0, 1.0);
    b.rotate_around_z(-20.0);
    assert_same_shape(&a, &b);
}

#[test]
fn test_scale_identity_and_composition() {
    let original = odd_box();

    let mut unit = original.clone();
    unit.scale(1.0);
    assert_eq!(unit.vertices(), original.vertices());

    let mut twice = original.clone();
    twice.scale(0.5).scale(4.0);
    let mut once = original.clone();
    once.scale(2.0);
    assert_same_shape(&twice, &once);
}

#[test]
fn test_translate_inverse_is_exact() {
    let original = odd_box();
    let mut cuboid = original.clone();
    cuboid.translate(3.0, -0.5, 12.0).translate(-3.0, 0.5, -12.0);
    assert_eq!(cuboid.vertices(), original.vertices());
}

#[test]
fn test_clone_is_independent() {
    let original = block();
    let before = *original.vertices();

    let mut copy = original.clone();
    copy.rotate_around_x(33.0)
        .translate(1.0, 2.0, 3.0)
        .scale(3.0)
        .rotate_to_facing(Facing::West);

    assert_eq!(*original.vertices(), before);
    assert!(Arc::ptr_eq(original.textures(), copy.textures()));
}

#[test]
fn test_rotate_to_facing_down_is_rotate_x_180() {
    let mut facing = block();
    let mut explicit = block();
    facing.rotate_to_facing(Facing::Down);
    explicit.rotate_around_x(180.0);
    assert_eq!(facing.vertices(), explicit.vertices());
}

#[test]
fn test_rotate_to_facing_up_is_identity() {
    let mut cuboid = block();
    cuboid.rotate_to_facing(Facing::Up);
    assert_eq!(cuboid.vertices(), block().vertices());
}

fn assert_facing_matches(facing: Facing, chain: impl Fn(&mut RawCuboid<&'static str>)) {
    let mut turned = odd_box();
    let mut explicit = odd_box();
    turned.rotate_to_facing(facing);
    chain(&mut explicit);
    assert_eq!(turned.vertices(), explicit.vertices(), "{facing:?}");
}

#[test]
fn test_rotate_to_facing_north_sequence() {
    assert_facing_matches(Facing::North, |c| {
        c.rotate_around_y(180.0).rotate_around_x(270.0);
    });
}

#[test]
fn test_rotate_to_facing_south_sequence() {
    assert_facing_matches(Facing::South, |c| {
        c.rotate_around_x(90.0);
    });
}

#[test]
fn test_rotate_to_facing_west_sequence() {
    assert_facing_matches(Facing::West, |c| {
        c.rotate_around_y(270.0).rotate_around_z(90.0);
    });
}

#[test]
fn test_rotate_to_facing_east_sequence() {
    assert_facing_matches(Facing::East, |c| {
        c.rotate_around_y(90.0).rotate_around_z(270.0);
    });
}

#[test]
fn test_rotate_to_facing_north_needs_the_yaw() {
    let mut turned = odd_box();
    let mut tilted_only = odd_box();
    turned.rotate_to_facing(Facing::North);
    tilted_only.rotate_around_x(270.0);
    assert_ne!(turned.vertices(), tilted_only.vertices());
}

#[test]
fn test_rotate_to_facing_turns_top_face() {
    for facing in Facing::ALL {
        let textures = FaceTextures::empty().with(Facing::Up, Arc::new("top"));
        let mut cuboid = RawCuboid::new(4.0, 10.0, 6.0, textures);
        cuboid.rotate_to_facing(facing);

        let mut quads = Vec::new();
        cuboid.bake(&mut quads);
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].facing(), facing, "top face after {facing:?}");
    }
}

#[test]
fn test_rotate_to_vec_matches_facing() {
    let cases = [
        (Vec3::X, Facing::East),
        (Vec3::NEG_X, Facing::West),
        (Vec3::Z, Facing::South),
        (Vec3::NEG_Z, Facing::North),
        (Vec3::NEG_Y, Facing::Down),
    ];
    for (dir, facing) in cases {
        let textures = FaceTextures::empty().with(Facing::Up, Arc::new("tip"));
        let mut cuboid = RawCuboid::new(2.0, 8.0, 2.0, textures);
        let start = Vec3::new(5.0, 5.0, 5.0);
        cuboid.rotate_to_vec(start, start + dir * 3.0);

        let quads = {
            let mut quads = Vec::new();
            cuboid.bake(&mut quads);
            quads
        };
        assert_eq!(quads[0].facing(), facing, "direction {dir}");
        // The top center lands on the axis through the origin along `dir`
        let top_center = (cuboid.vertex(0) + cuboid.vertex(2)) * 0.5;
        assert!(top_center.abs_diff_eq(dir * 8.0, EPS), "{top_center}");
    }
}

#[test]
fn test_rotate_to_vec_nearly_vertical_stays_finite() {
    let start = Vec3::ZERO;

    let mut up = block();
    up.rotate_to_vec(start, Vec3::new(1e-25, 1.0, 0.0));
    assert_same_shape(&up, &block());

    let mut down = block();
    down.rotate_to_vec(start, Vec3::new(1e-25, -1.0, 0.0));
    let mut flipped = block();
    flipped.rotate_around_x(180.0);
    assert_same_shape(&down, &flipped);

    assert!(up.vertices().iter().chain(down.vertices()).all(|v| v.is_finite()));
}

// ===========================================================================
// Bake
// ===========================================================================

#[test]
fn test_bake_all_faces() {
    let quads = bake(&block());
    assert_eq!(quads.len(), 6);
    assert!(quads.iter().all(|q| *q.texture == "stone"));
}

#[test]
fn test_bake_no_faces() {
    let cuboid: RawCuboid<&str> = RawCuboid::new(16.0, 16.0, 16.0, FaceTextures::empty());
    assert!(bake(&cuboid).is_empty());
}

#[test]
fn test_bake_appends() {
    let cuboid = block();
    let mut quads = Vec::new();
    cuboid.bake(&mut quads);
    cuboid.bake(&mut quads);
    assert_eq!(quads.len(), 12);
    assert_eq!(quads[0].vertices, quads[6].vertices);
}

#[test]
fn test_bake_down_face_of_block() {
    let quads = bake(&block());
    let down = &quads[0];

    let positions: Vec<[f32; 3]> = down.vertices.iter().map(|v| v.position).collect();
    assert_eq!(
        positions,
        vec![
            [-8.0, 0.0, 8.0],
            [-8.0, 0.0, -8.0],
            [8.0, 0.0, -8.0],
            [8.0, 0.0, 8.0],
        ]
    );

    let uvs: Vec<[f32; 2]> = down.vertices.iter().map(|v| v.uv).collect();
    assert_eq!(
        uvs,
        vec![[0.0, 0.0], [0.0, 16.0], [16.0, 16.0], [16.0, 0.0]]
    );
}

#[test]
fn test_bake_vertex_orders() {
    let cuboid = block();
    let quads = bake(&cuboid);
    let expected: [[usize; 4]; 6] = [
        [7, 6, 5, 4],
        [0, 1, 2, 3],
        [2, 1, 5, 6],
        [3, 7, 4, 0],
        [3, 2, 6, 7],
        [1, 0, 4, 5],
    ];
    for (quad, indices) in quads.iter().zip(expected) {
        for (corner, index) in quad.vertices.iter().zip(indices) {
            assert_eq!(corner.position, cuboid.vertex(index).to_array());
        }
    }
}

#[test]
fn test_bake_uv_orders() {
    let quads = bake(&block());
    let (lo, hi) = (0.0, 16.0);
    let expected = [
        [[lo, lo], [lo, hi], [hi, hi], [hi, lo]],
        [[hi, hi], [hi, lo], [lo, lo], [lo, hi]],
        [[hi, lo], [lo, lo], [lo, hi], [hi, hi]],
        [[lo, lo], [lo, hi], [hi, hi], [hi, lo]],
        [[hi, lo], [lo, lo], [lo, hi], [hi, hi]],
        [[hi, lo], [lo, lo], [lo, hi], [hi, hi]],
    ];
    for (quad, uvs) in quads.iter().zip(expected) {
        assert_eq!(quad.vertices.map(|v| v.uv), uvs);
    }
}

#[test]
fn test_bake_per_face_textures() {
    let textures = FaceTextures::from_array(
        ["d", "u", "n", "s", "w", "e"].map(|name| Some(Arc::new(name))),
    );
    let cuboid = RawCuboid::new(1.0, 1.0, 1.0, textures);
    let names: Vec<&str> = bake(&cuboid).iter().map(|q| *q.texture).collect();
    assert_eq!(names, vec!["d", "u", "n", "s", "w", "e"]);
}

#[test]
fn test_from_vertices_round_trip() {
    let source = block();
    let rebuilt = RawCuboid::from_vertex_slice(source.vertices(), Arc::clone(source.textures()))
        .expect("eight vertices");
    assert_eq!(rebuilt.vertices(), source.vertices());

    let doubles = source.vertices().map(|v| v.as_dvec3().to_array());
    let narrowed = RawCuboid::from_f64_vertices(&doubles, Arc::clone(source.textures()));
    assert_eq!(narrowed.vertices(), source.vertices());
}
