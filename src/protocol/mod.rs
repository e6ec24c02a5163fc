//! Device Protocol Module
//!
//! Turns the fixed 7-byte block events reported by the device into
//! structured operations.
//!
//! ```text
//!  byte  0   1   2   3      4   5   6
//!       [ parent id ][face][ child id  ]
//! ```
//!
//! Ids are 24-bit big-endian. A child id of zero reports a detach from the
//! given face, any other value an attach of that block. The device echoes
//! every packet once as an acknowledgement; echoes are suppressed here.

// Data modules
pub mod packet_data;

// Operations modules
pub mod packet_operations;

pub mod decoder;

pub use decoder::PacketDecoder;
pub use packet_data::{
    Decoded, DecodeError, DecoderStats, Operation, OperationKind, RawPacket,
};
pub use packet_operations::{decode, decode_slice, encode};
