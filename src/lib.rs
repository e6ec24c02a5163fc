// cubelink - Data-Oriented decoder and structure engine for modular cube toys
//
// Raw 7-byte device events flow one way:
//   bytes -> protocol::PacketDecoder -> Operation -> build::Structure -> OutcomeRecord
//
// For new code, prefer:
// - session::SessionRegistry when bytes arrive per connected device
// - build::Structure for a single structure fed by hand
// - *_operations modules for pure transformations over *_data types

// Constants module
pub mod constants;

// Core modules
pub mod config;
pub mod error;

// Wire protocol
pub mod protocol;

// Block tree
pub mod build;

// Outcome reporting and device sessions
pub mod notify;
pub mod session;

pub use build::{
    classify, Applied, ApplyError, ApplyResult, BlockData, BlockId, BlockPos, ColorClass, Detached,
    FaceDirection, FaceMap, InvariantViolation, SnapshotError, Structure, StructureSnapshot,
};
pub use config::{ConfigError, DecoderConfig, EngineConfig, SessionConfig, StructureConfig};
pub use error::{BridgeError, BridgeResult, FailureKind, OptionExt};
pub use notify::{channel_sink, LogSink, OutcomeRecord, OutcomeSink};
pub use protocol::{decode, encode, DecodeError, Decoded, Operation, OperationKind, PacketDecoder, RawPacket};
pub use session::{DeviceInfo, DeviceSession, PacketDisposition, SessionRegistry};
