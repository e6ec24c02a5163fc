//! Packet Operations - Pure DOP Functions
//!
//! All functions are pure: take data, return results, no side effects.
//! The caller owns the "prior packet" memory used for echo suppression.

use super::packet_data::{Decoded, DecodeError, Operation, OperationKind, RawPacket};
use crate::build::{BlockId, FaceDirection};
use crate::constants::wire::{
    CHILD_ID_RANGE, DETACH_CHILD_ID, FACE_OFFSET, PACKET_LEN, PARENT_ID_RANGE,
};

/// Decode one packet.
///
/// Returns `Decoded::Duplicate` when `bytes` equals `prior` byte for byte;
/// the caller must then keep `prior` as it was. A child id of zero marks a
/// removal, anything else an addition.
pub fn decode(bytes: &RawPacket, prior: Option<&RawPacket>) -> Result<Decoded, DecodeError> {
    if prior == Some(bytes) {
        return Ok(Decoded::Duplicate);
    }

    let parent_id = read_u24(&bytes[PARENT_ID_RANGE]);
    let child_raw = read_u24(&bytes[CHILD_ID_RANGE]);
    let face_id = bytes[FACE_OFFSET];

    let requested_face = FaceDirection::from_id(face_id);
    if !requested_face.is_defined() {
        return Err(DecodeError::InvalidFace {
            parent_id: BlockId::new(parent_id),
            child_id: BlockId::new(child_raw),
            face: face_id,
        });
    }

    let operation = if child_raw == DETACH_CHILD_ID {
        Operation::remove(BlockId::new(parent_id), requested_face)
    } else {
        Operation::add(BlockId::new(parent_id), requested_face, BlockId::new(child_raw))
    };

    Ok(Decoded::Operation(operation))
}

/// Decode a packet of unchecked length
pub fn decode_slice(bytes: &[u8], prior: Option<&RawPacket>) -> Result<Decoded, DecodeError> {
    let packet = to_raw_packet(bytes)?;
    decode(&packet, prior)
}

/// Copy a slice into a fixed-size packet, rejecting any other length
pub fn to_raw_packet(bytes: &[u8]) -> Result<RawPacket, DecodeError> {
    <RawPacket>::try_from(bytes).map_err(|_| DecodeError::InvalidLength {
        expected: PACKET_LEN,
        actual: bytes.len(),
    })
}

/// Encode an operation the way the device would report it.
///
/// Removals are encoded with a zero child id whatever `child_id` holds.
pub fn encode(operation: &Operation) -> RawPacket {
    let mut packet = [0u8; PACKET_LEN];
    write_u24(&mut packet[PARENT_ID_RANGE], operation.parent_id.raw());
    packet[FACE_OFFSET] = operation.requested_face.id();
    let child = match operation.kind {
        OperationKind::Add => operation.child_id.map(BlockId::raw).unwrap_or(DETACH_CHILD_ID),
        OperationKind::Remove => DETACH_CHILD_ID,
    };
    write_u24(&mut packet[CHILD_ID_RANGE], child);
    packet
}

fn read_u24(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b))
}

fn write_u24(out: &mut [u8], value: u32) {
    out[0] = (value >> 16) as u8;
    out[1] = (value >> 8) as u8;
    out[2] = value as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_add() {
        let packet = [0x00, 0x00, 0x00, 5, 0x10, 0x20, 0x30];
        let decoded = decode(&packet, None).expect("valid packet");
        assert_eq!(
            decoded,
            Decoded::Operation(Operation::add(BlockId::new(0), FaceDirection::Top, BlockId::new(0x102030)))
        );
    }

    #[test]
    fn test_decode_remove_has_no_child() {
        let packet = [0x01, 0x02, 0x03, 2, 0, 0, 0];
        match decode(&packet, None).expect("valid packet") {
            Decoded::Operation(op) => {
                assert_eq!(op.kind, OperationKind::Remove);
                assert_eq!(op.parent_id, BlockId::new(0x010203));
                assert_eq!(op.requested_face, FaceDirection::Front);
                assert_eq!(op.child_id, None);
            }
            Decoded::Duplicate => panic!("first packet cannot be a duplicate"),
        }
    }

    #[test]
    fn test_invalid_face_rejected() {
        for face in [0u8, 7, 0xFF] {
            let packet = [0, 0, 1, face, 0, 0, 9];
            let err = decode(&packet, None).expect_err("face must be rejected");
            assert_eq!(
                err,
                DecodeError::InvalidFace {
                    parent_id: BlockId::new(1),
                    child_id: BlockId::new(9),
                    face,
                }
            );
        }
    }

    #[test]
    fn test_echo_is_duplicate() {
        let packet = [0, 0, 0, 5, 0, 0, 5];
        assert!(matches!(decode(&packet, None), Ok(Decoded::Operation(_))));
        assert_eq!(decode(&packet, Some(&packet)), Ok(Decoded::Duplicate));

        let other = [0, 0, 0, 5, 0, 0, 6];
        assert!(matches!(decode(&other, Some(&packet)), Ok(Decoded::Operation(_))));
    }

    #[test]
    fn test_duplicate_check_precedes_face_validation() {
        let packet = [0, 0, 0, 9, 0, 0, 5];
        assert_eq!(decode(&packet, Some(&packet)), Ok(Decoded::Duplicate));
    }

    #[test]
    fn test_decode_slice_length() {
        let err = decode_slice(&[0, 0, 0, 5, 0, 0], None).expect_err("short packet");
        assert_eq!(err, DecodeError::InvalidLength { expected: 7, actual: 6 });
        assert!(decode_slice(&[0, 0, 0, 5, 0, 0, 1, 0], None).is_err());
        assert!(decode_slice(&[0, 0, 0, 5, 0, 0, 1], None).is_ok());
    }

    #[test]
    fn test_encode_matches_wire_layout() {
        let add = Operation::add(BlockId::new(0xABCDEF), FaceDirection::Right, BlockId::new(0x123456));
        assert_eq!(encode(&add), [0xAB, 0xCD, 0xEF, 6, 0x12, 0x34, 0x56]);

        let remove = Operation::remove(BlockId::new(7), FaceDirection::Bottom);
        assert_eq!(encode(&remove), [0, 0, 7, 3, 0, 0, 0]);
        assert_eq!(decode(&encode(&remove), None), Ok(Decoded::Operation(remove)));
    }
}
