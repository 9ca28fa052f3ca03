//! Axis-aligned geometry primitives for 3D packing.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used for all geometric comparisons, in millimeters.
pub const EPSILON: f64 = 1e-9;

/// Axis-aligned orientation of a box inside a container.
///
/// The three letters name which item dimension lands on the container's
/// x, y and z axes. `Lwh` is the identity orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// Length on x, width on y, height on z (identity).
    #[default]
    Lwh,
    /// Length on x, height on y, width on z.
    Lhw,
    /// Width on x, length on y, height on z.
    Wlh,
    /// Width on x, height on y, length on z.
    Whl,
    /// Height on x, length on y, width on z.
    Hlw,
    /// Height on x, width on y, length on z.
    Hwl,
}

impl Rotation {
    /// All six axis-aligned orientations.
    pub const ALL: [Rotation; 6] = [
        Rotation::Lwh,
        Rotation::Lhw,
        Rotation::Wlh,
        Rotation::Whl,
        Rotation::Hlw,
        Rotation::Hwl,
    ];

    /// Returns the axis permutation for this orientation.
    ///
    /// The tuple `(a, b, c)` means the rotated x extent is the item's
    /// dimension `a`, the y extent is `b` and the z extent is `c`.
    pub fn permutation(self) -> (usize, usize, usize) {
        match self {
            Rotation::Lwh => (0, 1, 2),
            Rotation::Lhw => (0, 2, 1),
            Rotation::Wlh => (1, 0, 2),
            Rotation::Whl => (1, 2, 0),
            Rotation::Hlw => (2, 0, 1),
            Rotation::Hwl => (2, 1, 0),
        }
    }

    /// Applies this orientation to a dimension vector.
    pub fn apply(self, dims: Vector3<f64>) -> Vector3<f64> {
        let (a, b, c) = self.permutation();
        Vector3::new(dims[a], dims[b], dims[c])
    }

    /// Returns the distinct oriented sizes of a box, paired with the
    /// orientation that produces each.
    ///
    /// Orientations yielding the same extents within [`EPSILON`] are
    /// dropped, so a cube yields a single entry and a square-based box
    /// yields three.
    pub fn orientations(dims: Vector3<f64>) -> Vec<(Vector3<f64>, Rotation)> {
        let mut unique: Vec<(Vector3<f64>, Rotation)> = Vec::with_capacity(6);
        for rotation in Rotation::ALL {
            let size = rotation.apply(dims);
            if unique.iter().any(|(s, _)| (*s - size).norm() < EPSILON) {
                continue;
            }
            unique.push((size, rotation));
        }
        unique
    }
}

/// An axis-aligned bounding box in container-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vector3<f64>,
    /// Maximum corner.
    pub max: Vector3<f64>,
}

impl Aabb {
    /// Creates a new AABB from its corners.
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self { min, max }
    }

    /// Creates a new AABB from a minimum corner and a size.
    pub fn from_position_size(position: Vector3<f64>, size: Vector3<f64>) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    /// Returns the size of the box.
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Returns the center of the box.
    pub fn center(&self) -> Vector3<f64> {
        (self.min + self.max) * 0.5
    }

    /// Returns the volume of the box.
    pub fn volume(&self) -> f64 {
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Checks whether two boxes overlap with positive volume.
    ///
    /// Touching faces, edges and corners do not count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let no_overlap_x =
            self.min.x >= other.max.x - EPSILON || other.min.x >= self.max.x - EPSILON;
        let no_overlap_y =
            self.min.y >= other.max.y - EPSILON || other.min.y >= self.max.y - EPSILON;
        let no_overlap_z =
            self.min.z >= other.max.z - EPSILON || other.min.z >= self.max.z - EPSILON;

        !(no_overlap_x || no_overlap_y || no_overlap_z)
    }

    /// Checks whether the box lies inside an origin-cornered volume of
    /// the given inner dimensions.
    pub fn within_bounds(&self, inner: Vector3<f64>) -> bool {
        self.min.x >= -EPSILON
            && self.min.y >= -EPSILON
            && self.min.z >= -EPSILON
            && self.max.x <= inner.x + EPSILON
            && self.max.y <= inner.y + EPSILON
            && self.max.z <= inner.z + EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_permutations_are_distinct() {
        let dims = Vector3::new(1.0, 2.0, 3.0);
        let oriented = Rotation::orientations(dims);
        assert_eq!(oriented.len(), 6);
    }

    #[test]
    fn test_cube_has_single_orientation() {
        let oriented = Rotation::orientations(Vector3::new(5.0, 5.0, 5.0));
        assert_eq!(oriented.len(), 1);
        assert_eq!(oriented[0].1, Rotation::Lwh);
    }

    #[test]
    fn test_square_base_has_three_orientations() {
        let oriented = Rotation::orientations(Vector3::new(4.0, 4.0, 9.0));
        assert_eq!(oriented.len(), 3);
    }

    #[test]
    fn test_apply_permutes_extents() {
        let dims = Vector3::new(10.0, 20.0, 30.0);
        let rotated = Rotation::Hwl.apply(dims);
        assert_relative_eq!(rotated.x, 30.0);
        assert_relative_eq!(rotated.y, 20.0);
        assert_relative_eq!(rotated.z, 10.0);
    }

    #[test]
    fn test_identity_is_default() {
        assert_eq!(Rotation::default(), Rotation::Lwh);
        assert_eq!(Rotation::Lwh.permutation(), (0, 1, 2));
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_position_size(Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0));
        let b = Aabb::from_position_size(Vector3::new(1.0, 1.0, 1.0), Vector3::new(2.0, 2.0, 2.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_faces_do_not_overlap() {
        let a = Aabb::from_position_size(Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0));
        let b = Aabb::from_position_size(Vector3::new(2.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_within_bounds() {
        let inner = Vector3::new(10.0, 10.0, 10.0);
        let inside =
            Aabb::from_position_size(Vector3::new(0.0, 0.0, 0.0), Vector3::new(10.0, 10.0, 10.0));
        let poking =
            Aabb::from_position_size(Vector3::new(5.0, 0.0, 0.0), Vector3::new(6.0, 2.0, 2.0));
        assert!(inside.within_bounds(inner));
        assert!(!poking.within_bounds(inner));
    }

    #[test]
    fn test_aabb_volume_and_center() {
        let b = Aabb::from_position_size(Vector3::new(1.0, 1.0, 1.0), Vector3::new(2.0, 3.0, 4.0));
        assert_relative_eq!(b.volume(), 24.0);
        assert_relative_eq!(b.center().x, 2.0);
        assert_relative_eq!(b.center().y, 2.5);
        assert_relative_eq!(b.center().z, 3.0);
    }
}
