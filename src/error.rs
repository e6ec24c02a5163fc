//! Error handling for cubelink
//!
//! Each layer owns a `thiserror` enum (`DecodeError`, `AttachError`,
//! `ApplyError`, `SnapshotError`, `ConfigError`). `BridgeError` is the
//! crate-level umbrella used at the session boundary, and `FailureKind` is the
//! flat taxonomy reported on the outcome channel.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::build::{ApplyError, AttachError, SnapshotError};
use crate::config::ConfigError;
use crate::protocol::DecodeError;

/// Failure taxonomy reported alongside every rejected packet or operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Face byte does not name one of the six faces
    InvalidFace,
    /// Inbound record is not exactly one packet long
    InvalidLength,
    /// Parent cannot map the requested face to a structure direction
    UndefinedFace,
    /// Remove could not find a child in the resolved slot
    ChildNotFound,
    /// Operation names a parent that is not part of the structure
    ParentNotFound,
    /// Add carried no usable child identity
    InvalidChild,
    /// Add would have to remove the base block or its own parent chain
    Conflict,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::InvalidFace => "invalid face",
            FailureKind::InvalidLength => "invalid length",
            FailureKind::UndefinedFace => "undefined face",
            FailureKind::ChildNotFound => "child not found",
            FailureKind::ParentNotFound => "parent not found",
            FailureKind::InvalidChild => "invalid child",
            FailureKind::Conflict => "conflict",
        };
        f.write_str(name)
    }
}

impl DecodeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DecodeError::InvalidFace { .. } => FailureKind::InvalidFace,
            DecodeError::InvalidLength { .. } => FailureKind::InvalidLength,
        }
    }
}

impl ApplyError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApplyError::ParentNotFound { .. } => FailureKind::ParentNotFound,
            ApplyError::Attach(AttachError::UndefinedFace { .. }) => FailureKind::UndefinedFace,
            ApplyError::Attach(AttachError::SlotOccupied { .. }) => FailureKind::Conflict,
            ApplyError::ChildNotFound { .. } => FailureKind::ChildNotFound,
            ApplyError::InvalidChild { .. } => FailureKind::InvalidChild,
            ApplyError::Conflict { .. } => FailureKind::Conflict,
        }
    }
}

/// Main error type for cubelink
#[derive(Debug)]
pub enum BridgeError {
    // Protocol Errors
    Decode(DecodeError),

    // Structure Errors
    Apply(ApplyError),
    Snapshot(SnapshotError),

    // Configuration Errors
    Config(ConfigError),

    // Session Errors
    SessionNotFound {
        uuid: String,
    },
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Decode(err) => write!(f, "Decode error: {}", err),
            BridgeError::Apply(err) => write!(f, "Apply error: {}", err),
            BridgeError::Snapshot(err) => write!(f, "Snapshot error: {}", err),
            BridgeError::Config(err) => write!(f, "Config error: {}", err),
            BridgeError::SessionNotFound { uuid } => write!(f, "Session not found: {}", uuid),
        }
    }
}

impl StdError for BridgeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            BridgeError::Decode(err) => Some(err),
            BridgeError::Apply(err) => Some(err),
            BridgeError::Snapshot(err) => Some(err),
            BridgeError::Config(err) => Some(err),
            BridgeError::SessionNotFound { .. } => None,
        }
    }
}

/// Type alias for Results in cubelink
pub type BridgeResult<T> = Result<T, BridgeError>;

impl BridgeError {
    /// Outcome-channel classification, if this error maps onto one
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            BridgeError::Decode(err) => Some(err.kind()),
            BridgeError::Apply(err) => Some(err.kind()),
            _ => None,
        }
    }
}

// Conversion traits for layer errors

impl From<DecodeError> for BridgeError {
    fn from(error: DecodeError) -> Self {
        BridgeError::Decode(error)
    }
}

impl From<ApplyError> for BridgeError {
    fn from(error: ApplyError) -> Self {
        BridgeError::Apply(error)
    }
}

impl From<SnapshotError> for BridgeError {
    fn from(error: SnapshotError) -> Self {
        BridgeError::Snapshot(error)
    }
}

impl From<ConfigError> for BridgeError {
    fn from(error: ConfigError) -> Self {
        BridgeError::Config(error)
    }
}

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_bridge<F>(self, f: F) -> BridgeResult<T>
    where
        F: FnOnce() -> BridgeError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_bridge<F>(self, f: F) -> BridgeResult<T>
    where
        F: FnOnce() -> BridgeError,
    {
        self.ok_or_else(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::BlockId;

    #[test]
    fn test_error_display() {
        let err = BridgeError::SessionNotFound {
            uuid: "AA:BB".to_string(),
        };
        assert_eq!(err.to_string(), "Session not found: AA:BB");
    }

    #[test]
    fn test_failure_kind_passthrough() {
        let err = BridgeError::from(ApplyError::ParentNotFound {
            parent: BlockId::new(42),
        });
        assert_eq!(err.failure_kind(), Some(FailureKind::ParentNotFound));
        assert!(err.source().is_some());

        let err = BridgeError::SessionNotFound {
            uuid: "AA:BB".to_string(),
        };
        assert_eq!(err.failure_kind(), None);
        assert!(err.source().is_none());
    }

    #[test]
    fn test_option_ext() {
        let opt: Option<i32> = None;
        let result = opt.ok_or_bridge(|| BridgeError::SessionNotFound {
            uuid: "gone".to_string(),
        });
        assert!(matches!(result, Err(BridgeError::SessionNotFound { .. })));
    }

    #[test]
    fn test_layer_errors_classify() {
        use crate::build::FaceDirection;

        let decode = [
            (
                DecodeError::InvalidFace { parent_id: BlockId::BASE, child_id: BlockId::new(5), face: 9 },
                FailureKind::InvalidFace,
            ),
            (DecodeError::InvalidLength { expected: 7, actual: 3 }, FailureKind::InvalidLength),
        ];
        for (err, kind) in decode {
            assert_eq!(err.kind(), kind, "{}", err);
        }

        let apply = [
            (ApplyError::ParentNotFound { parent: BlockId::new(3) }, FailureKind::ParentNotFound),
            (
                ApplyError::Attach(AttachError::UndefinedFace { parent: BlockId::BASE, face: FaceDirection::Undefined }),
                FailureKind::UndefinedFace,
            ),
            (
                ApplyError::Attach(AttachError::SlotOccupied {
                    parent: BlockId::BASE,
                    direction: FaceDirection::Top,
                    occupant: BlockId::new(5),
                }),
                FailureKind::Conflict,
            ),
            (
                ApplyError::ChildNotFound { parent: BlockId::BASE, direction: FaceDirection::Top },
                FailureKind::ChildNotFound,
            ),
            (ApplyError::InvalidChild { child: None }, FailureKind::InvalidChild),
            (ApplyError::Conflict { child: BlockId::new(5), victim: BlockId::BASE }, FailureKind::Conflict),
        ];
        for (err, kind) in apply {
            assert_eq!(err.kind(), kind, "{}", err);
        }
    }
}
