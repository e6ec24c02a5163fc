//! Session Data - Pure DOP
//!
//! NO METHODS. Just data.

use serde::{Deserialize, Serialize};

use crate::error::FailureKind;

/// Identity of a connected device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Transport address of the device
    pub uuid: String,
    /// Stable display name for the lifetime of the process
    pub friendly_name: String,
}

/// What happened to one inbound packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketDisposition {
    /// Decoded and applied to the structure
    Applied,
    /// Refused by the decoder or the structure; reported on the outcome channel
    Rejected(FailureKind),
    /// Echo of the previous packet; nothing reported
    Suppressed,
}

/// Per-session counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub packets_received: u64,
    pub packets_applied: u64,
    pub packets_rejected: u64,
    pub packets_suppressed: u64,
}
