//! Provides the six axis-aligned cuboid facings.
//!
//! # Examples
//! ```
//! use rawcube::model::Facing;
//!
//! assert_eq!(Facing::ALL.len(), 6);
//! assert_eq!(Facing::Down.index(), 0);
//! ```

use glam::Vec3;
use serde::Deserialize;

/// An axis-aligned direction, in face-texture slot order.
///
/// # Examples
/// ```
/// use rawcube::model::Facing;
///
/// assert_eq!(Facing::North.normal(), glam::Vec3::new(0.0, 0.0, -1.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Down,  // -Y
    Up,    // +Y
    North, // -Z
    South, // +Z
    West,  // -X
    East,  // +X
}

impl Facing {
    /// All facings, ordered by slot index.
    ///
    /// # Examples
    /// ```
    /// use rawcube::model::Facing;
    ///
    /// for (i, facing) in Facing::ALL.iter().enumerate() {
    ///     assert_eq!(facing.index(), i);
    /// }
    /// ```
    pub const ALL: [Facing; 6] = [
        Facing::Down,
        Facing::Up,
        Facing::North,
        Facing::South,
        Facing::West,
        Facing::East,
    ];

    /// Returns the face-texture slot for this facing.
    ///
    /// # Examples
    /// ```
    /// use rawcube::model::Facing;
    ///
    /// assert_eq!(Facing::East.index(), 5);
    /// ```
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the unit normal for this facing.
    ///
    /// # Examples
    /// ```
    /// use rawcube::model::Facing;
    ///
    /// assert_eq!(Facing::Up.normal(), glam::Vec3::Y);
    /// ```
    pub fn normal(self) -> Vec3 {
        match self {
            Facing::Down => Vec3::NEG_Y,
            Facing::Up => Vec3::Y,
            Facing::North => Vec3::NEG_Z,
            Facing::South => Vec3::Z,
            Facing::West => Vec3::NEG_X,
            Facing::East => Vec3::X,
        }
    }

    /// Returns the facing whose normal is closest to `v`.
    ///
    /// Ties resolve to the earliest facing in slot order; the zero vector maps to `Down`.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use rawcube::model::Facing;
    ///
    /// assert_eq!(Facing::nearest(Vec3::new(0.1, -0.2, 3.0)), Facing::South);
    /// ```
    pub fn nearest(v: Vec3) -> Facing {
        let mut best = Facing::Down;
        let mut best_dot = f32::NEG_INFINITY;
        for facing in Facing::ALL {
            let dot = facing.normal().dot(v);
            if dot > best_dot {
                best = facing;
                best_dot = dot;
            }
        }
        best
    }
}
