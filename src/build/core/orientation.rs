//! Discrete orientation tracking
//!
//! A block's orientation is a permutation of its six faces: for every
//! structure-relative direction it records which physical face currently
//! points that way. Attaching a child composes the parent's permutation with
//! one row of a fixed attachment table, so orientation stays exact no matter
//! how deep the structure grows.
//!
//! Each table row is indexed by the physical face of the parent the child was
//! attached to, and maps a physical face of the parent to the physical face
//! of the child lying along the same axis. Every row sends the attach face to
//! the child's FRONT and its opposite to the child's BACK, so the child's
//! BACK connector always faces its parent.
//!
//! The rows are the device's connector rotations applied to an unrotated
//! frame, in z, x, y order:
//!
//! | attach | rotation (x, y, z) |
//! |--------|--------------------|
//! | TOP    | (-90, 0, 0)        |
//! | BOTTOM | (90, 180, 0)       |
//! | LEFT   | (0, -90, -90)      |
//! | RIGHT  | (0, 90, 90)        |
//! | FRONT  | none               |
//! | BACK   | half turn about y  |
//!
//! A row relabels physical faces, so it composes in the child's own frame and
//! the same rotation holds whichever block carries the connector. Regular
//! blocks therefore share the base block's rows.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::face::FaceDirection;
use super::face::FaceDirection::{Back, Bottom, Front, Left, Right, Top};
use crate::constants::block::FACE_COUNT;

/// One row of an attachment table
pub type AttachRow = [FaceDirection; FACE_COUNT];

const CONNECTOR_ROTATIONS: [AttachRow; FACE_COUNT] = [
    // attached to BACK
    [Front, Back, Bottom, Right, Top, Left],
    // attached to FRONT
    [Back, Front, Bottom, Left, Top, Right],
    // attached to BOTTOM
    [Top, Bottom, Front, Right, Back, Left],
    // attached to LEFT
    [Top, Bottom, Left, Front, Right, Back],
    // attached to TOP
    [Top, Bottom, Back, Left, Front, Right],
    // attached to RIGHT
    [Top, Bottom, Right, Back, Left, Front],
];

/// Attachment table used when the parent is the base block
pub static FIRST_GENERATION: [AttachRow; FACE_COUNT] = CONNECTOR_ROTATIONS;

/// Attachment table used when the parent is any regular block
pub static SUBSEQUENT_GENERATION: [AttachRow; FACE_COUNT] = CONNECTOR_ROTATIONS;

/// Which attachment table applies to a parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    First,
    Subsequent,
}

impl Generation {
    pub fn table(self) -> &'static [AttachRow; FACE_COUNT] {
        match self {
            Generation::First => &FIRST_GENERATION,
            Generation::Subsequent => &SUBSEQUENT_GENERATION,
        }
    }

    /// Row for the parent's physical attach face, `None` for `Undefined`
    pub fn row(self, attach_face: FaceDirection) -> Option<&'static AttachRow> {
        attach_face.index().map(|i| &self.table()[i])
    }
}

/// Per-block map from structure-relative direction to physical face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceMap(pub [FaceDirection; FACE_COUNT]);

impl FaceMap {
    /// Orientation of a block whose physical faces match the structure axes
    pub const IDENTITY: FaceMap = FaceMap(FaceDirection::ALL);

    /// Physical face currently pointing along `direction`
    pub fn physical_at(&self, direction: FaceDirection) -> FaceDirection {
        direction
            .index()
            .map(|i| self.0[i])
            .unwrap_or(FaceDirection::Undefined)
    }

    /// Structure-relative direction the physical face points along.
    ///
    /// Total: returns `Undefined` when the face is not one of the six images.
    pub fn relative_direction_of(&self, physical: FaceDirection) -> FaceDirection {
        if !physical.is_defined() {
            return FaceDirection::Undefined;
        }
        self.0
            .iter()
            .position(|face| *face == physical)
            .map(FaceDirection::from_index)
            .unwrap_or(FaceDirection::Undefined)
    }

    /// Map every slot through an attachment row
    pub fn permuted(&self, row: &AttachRow) -> FaceMap {
        let mut out = [FaceDirection::Undefined; FACE_COUNT];
        for (slot, physical) in out.iter_mut().zip(self.0.iter()) {
            *slot = physical
                .index()
                .map(|i| row[i])
                .unwrap_or(FaceDirection::Undefined);
        }
        FaceMap(out)
    }

    /// True when all six faces appear exactly once
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; FACE_COUNT];
        for face in self.0 {
            match face.index() {
                Some(i) if !seen[i] => seen[i] = true,
                _ => return false,
            }
        }
        true
    }
}

impl Default for FaceMap {
    fn default() -> Self {
        FaceMap::IDENTITY
    }
}

impl fmt::Display for FaceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (direction, physical)) in FaceDirection::ALL.iter().zip(self.0.iter()).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", direction, physical)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(face: FaceDirection) -> [i32; 3] {
        let v = face.offset();
        [v.x, v.y, v.z]
    }

    fn determinant(m: [[i32; 3]; 3]) -> i32 {
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    fn check_row(generation: Generation, attach: FaceDirection) {
        let row = generation.row(attach).expect("defined face has a row");
        assert!(FaceMap(*row).is_permutation(), "{:?} row {} is not a permutation", generation, attach);

        // attach face lines up with the child's FRONT, the opposite with its BACK
        assert_eq!(row[attach.index().unwrap()], Front);
        assert_eq!(row[attach.opposite().index().unwrap()], Back);

        // opposite faces stay opposite
        for face in FaceDirection::ALL {
            assert_eq!(row[face.opposite().index().unwrap()], row[face.index().unwrap()].opposite());
        }

        // the row must be a rotation, never a mirror image
        let columns = [axis(row[3]), axis(row[4]), axis(row[1])];
        let m = [
            [columns[0][0], columns[1][0], columns[2][0]],
            [columns[0][1], columns[1][1], columns[2][1]],
            [columns[0][2], columns[1][2], columns[2][2]],
        ];
        assert_eq!(determinant(m), 1, "{:?} row {} is a reflection", generation, attach);
    }

    #[test]
    fn test_tables_are_proper_rotations() {
        for generation in [Generation::First, Generation::Subsequent] {
            for attach in FaceDirection::ALL {
                check_row(generation, attach);
            }
        }
    }

    #[test]
    fn test_front_attachment_preserves_orientation() {
        let row = Generation::Subsequent.row(Front).unwrap();
        assert_eq!(FaceMap::IDENTITY.permuted(row), FaceMap::IDENTITY);
    }

    #[test]
    fn test_regular_blocks_share_base_rows() {
        for attach in FaceDirection::ALL {
            assert_eq!(
                Generation::First.row(attach),
                Generation::Subsequent.row(attach),
                "row {}",
                attach
            );
        }
    }

    #[test]
    fn test_vertical_attach_keeps_sides() {
        let map = FaceMap::IDENTITY.permuted(Generation::First.row(Top).unwrap());
        assert_eq!(map.physical_at(Left), Left);
        assert_eq!(map.physical_at(Right), Right);
        assert_eq!(map.relative_direction_of(Top), Back);

        let map = FaceMap::IDENTITY.permuted(Generation::First.row(Bottom).unwrap());
        assert_eq!(map.physical_at(Left), Right);
        assert_eq!(map.relative_direction_of(Top), Back);
    }

    #[test]
    fn test_side_attach_rolls_top_backwards() {
        for attach in [Left, Right] {
            let map = FaceMap::IDENTITY.permuted(Generation::First.row(attach).unwrap());
            assert_eq!(map.relative_direction_of(Top), Back, "attached to {}", attach);
            assert_eq!(map.relative_direction_of(Bottom), Front, "attached to {}", attach);
        }
        let left = FaceMap::IDENTITY.permuted(Generation::First.row(Left).unwrap());
        assert_eq!(left.relative_direction_of(Left), Bottom);
        assert_eq!(left.relative_direction_of(Right), Top);
        let right = FaceMap::IDENTITY.permuted(Generation::First.row(Right).unwrap());
        assert_eq!(right.relative_direction_of(Right), Bottom);
        assert_eq!(right.relative_direction_of(Left), Top);
    }

    #[test]
    fn test_relative_direction_is_inverse_lookup() {
        let map = FaceMap::IDENTITY.permuted(Generation::First.row(Top).unwrap());
        for direction in FaceDirection::ALL {
            assert_eq!(map.relative_direction_of(map.physical_at(direction)), direction);
        }
        assert_eq!(map.relative_direction_of(FaceDirection::Undefined), FaceDirection::Undefined);
        // the child's FRONT points up after attaching to the top of the base
        assert_eq!(map.relative_direction_of(Front), Top);
        assert_eq!(map.relative_direction_of(Back), Bottom);
    }

    #[test]
    fn test_broken_map_resolves_to_undefined() {
        let broken = FaceMap([Back, Back, Bottom, Left, Top, Right]);
        assert!(!broken.is_permutation());
        assert_eq!(broken.relative_direction_of(Front), FaceDirection::Undefined);
    }
}
