//! Device sessions
//!
//! Glue between a transport that delivers raw records per device and the
//! decoder and structure that consume them. The transport itself lives
//! outside this crate.

// Data modules
pub mod session_data;

pub mod device_session;
pub mod registry;

pub use device_session::DeviceSession;
pub use registry::{SessionRegistry, SharedSession};
pub use session_data::{DeviceInfo, PacketDisposition, SessionStats};
