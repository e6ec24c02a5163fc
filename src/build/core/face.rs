use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::block::FACE_COUNT;

/// One of the six faces of a block, or a structure-relative direction.
///
/// The discriminants are the face ids used on the wire. The same enum names
/// both a block's physical face and an axis of the structure frame; which one
/// is meant depends on where the value is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FaceDirection {
    Undefined = 0,
    Back = 1,   // -Z
    Front = 2,  // +Z
    Bottom = 3, // -Y
    Left = 4,   // +X
    Top = 5,    // +Y
    Right = 6,  // -X
}

impl FaceDirection {
    /// The six defined faces in wire-id order
    pub const ALL: [FaceDirection; FACE_COUNT] = [
        FaceDirection::Back,
        FaceDirection::Front,
        FaceDirection::Bottom,
        FaceDirection::Left,
        FaceDirection::Top,
        FaceDirection::Right,
    ];

    /// Wire id of this face (0 for `Undefined`)
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Face for a wire id; unknown ids map to `Undefined`
    pub fn from_id(id: u8) -> FaceDirection {
        match id {
            1 => FaceDirection::Back,
            2 => FaceDirection::Front,
            3 => FaceDirection::Bottom,
            4 => FaceDirection::Left,
            5 => FaceDirection::Top,
            6 => FaceDirection::Right,
            _ => FaceDirection::Undefined,
        }
    }

    pub fn is_defined(self) -> bool {
        self != FaceDirection::Undefined
    }

    /// Slot `[0..6)` used by per-face arrays, `None` for `Undefined`
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            FaceDirection::Undefined => None,
            face => Some(face.id() as usize - 1),
        }
    }

    /// Converts a slot `[0..6)` back into a face; out-of-range is `Undefined`
    #[inline]
    pub fn from_index(i: usize) -> FaceDirection {
        FaceDirection::ALL
            .get(i)
            .copied()
            .unwrap_or(FaceDirection::Undefined)
    }

    pub fn opposite(self) -> FaceDirection {
        match self {
            FaceDirection::Top => FaceDirection::Bottom,
            FaceDirection::Bottom => FaceDirection::Top,
            FaceDirection::Right => FaceDirection::Left,
            FaceDirection::Left => FaceDirection::Right,
            FaceDirection::Front => FaceDirection::Back,
            FaceDirection::Back => FaceDirection::Front,
            FaceDirection::Undefined => FaceDirection::Undefined,
        }
    }

    /// Unit grid step taken when moving out through this direction.
    ///
    /// LEFT is +X and RIGHT is -X; coordinates recorded by other tools using
    /// the opposite handedness will not compare equal.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            FaceDirection::Left => Vector3::new(1, 0, 0),
            FaceDirection::Right => Vector3::new(-1, 0, 0),
            FaceDirection::Top => Vector3::new(0, 1, 0),
            FaceDirection::Bottom => Vector3::new(0, -1, 0),
            FaceDirection::Front => Vector3::new(0, 0, 1),
            FaceDirection::Back => Vector3::new(0, 0, -1),
            FaceDirection::Undefined => Vector3::new(0, 0, 0),
        }
    }
}

impl Default for FaceDirection {
    fn default() -> Self {
        FaceDirection::Undefined
    }
}

impl fmt::Display for FaceDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaceDirection::Undefined => "UNDEFINED",
            FaceDirection::Back => "BACK",
            FaceDirection::Front => "FRONT",
            FaceDirection::Bottom => "BOTTOM",
            FaceDirection::Left => "LEFT",
            FaceDirection::Top => "TOP",
            FaceDirection::Right => "RIGHT",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_ids_round_trip() {
        for face in FaceDirection::ALL {
            assert_eq!(FaceDirection::from_id(face.id()), face);
        }
        assert_eq!(FaceDirection::from_id(0), FaceDirection::Undefined);
        assert_eq!(FaceDirection::from_id(7), FaceDirection::Undefined);
        assert_eq!(FaceDirection::from_id(0xFF), FaceDirection::Undefined);
    }

    #[test]
    fn test_opposite_is_involution() {
        for face in FaceDirection::ALL {
            assert_ne!(face.opposite(), face);
            assert_eq!(face.opposite().opposite(), face);
            assert_eq!(face.offset() + face.opposite().offset(), Vector3::new(0, 0, 0));
        }
        assert_eq!(FaceDirection::Undefined.opposite(), FaceDirection::Undefined);
    }

    #[test]
    fn test_offsets_follow_axis_convention() {
        assert_eq!(FaceDirection::Top.offset(), Vector3::new(0, 1, 0));
        assert_eq!(FaceDirection::Bottom.offset(), Vector3::new(0, -1, 0));
        assert_eq!(FaceDirection::Front.offset(), Vector3::new(0, 0, 1));
        assert_eq!(FaceDirection::Back.offset(), Vector3::new(0, 0, -1));
        assert_eq!(FaceDirection::Left.offset(), Vector3::new(1, 0, 0));
        assert_eq!(FaceDirection::Right.offset(), Vector3::new(-1, 0, 0));
    }

    #[test]
    fn test_index_slots() {
        for (i, face) in FaceDirection::ALL.iter().enumerate() {
            assert_eq!(face.index(), Some(i));
            assert_eq!(FaceDirection::from_index(i), *face);
        }
        assert_eq!(FaceDirection::Undefined.index(), None);
        assert_eq!(FaceDirection::from_index(6), FaceDirection::Undefined);
    }
}
