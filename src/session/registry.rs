//! Registry of connected devices
//!
//! One [`DeviceSession`] per device uuid, each behind its own mutex, so
//! packets for one device are applied serially while different devices
//! proceed in parallel. Friendly names are assigned on first sight and kept
//! across reconnects.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::device_session::DeviceSession;
use super::session_data::{DeviceInfo, PacketDisposition};
use crate::config::EngineConfig;
use crate::error::{BridgeError, BridgeResult, OptionExt};
use crate::notify::OutcomeSink;

pub type SharedSession = Arc<Mutex<DeviceSession>>;

/// All open device sessions
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<String, SharedSession>,
    friendly_names: Mutex<FxHashMap<String, String>>,
    config: EngineConfig,
}

impl SessionRegistry {
    pub fn new(config: EngineConfig) -> BridgeResult<Self> {
        config.validate()?;
        Ok(Self {
            sessions: DashMap::new(),
            friendly_names: Mutex::new(FxHashMap::default()),
            config,
        })
    }

    /// Open a session for a device, or return the one already open
    pub fn open(&self, uuid: &str) -> DeviceInfo {
        let session = self
            .sessions
            .entry(uuid.to_string())
            .or_insert_with(|| {
                let info = DeviceInfo {
                    uuid: uuid.to_string(),
                    friendly_name: self.friendly_name(uuid),
                };
                Arc::new(Mutex::new(DeviceSession::new(info, &self.config)))
            })
            .value()
            .clone();

        let info = session.lock().info().clone();
        info
    }

    /// Close a device session. Its friendly name stays reserved.
    pub fn close(&self, uuid: &str) -> BridgeResult<DeviceInfo> {
        let (_, session) = self.sessions.remove(uuid).ok_or_bridge(|| BridgeError::SessionNotFound {
            uuid: uuid.to_string(),
        })?;
        let info = session.lock().info().clone();
        log::info!("[Session] Closed {} ({})", info.friendly_name, info.uuid);
        Ok(info)
    }

    pub fn get(&self, uuid: &str) -> Option<SharedSession> {
        self.sessions.get(uuid).map(|entry| Arc::clone(entry.value()))
    }

    /// Route one inbound packet to its device session
    pub fn handle_packet(
        &self,
        uuid: &str,
        bytes: &[u8],
        sink: &mut dyn OutcomeSink,
    ) -> BridgeResult<PacketDisposition> {
        let session = self.session(uuid)?;
        let disposition = session.lock().handle_packet(bytes, sink);
        Ok(disposition)
    }

    /// Start a device over from a bare base block
    pub fn reset_structure(&self, uuid: &str) -> BridgeResult<()> {
        self.session(uuid)?.lock().reset_structure();
        Ok(())
    }

    pub fn devices(&self) -> Vec<DeviceInfo> {
        let sessions: Vec<SharedSession> = self.sessions.iter().map(|e| Arc::clone(e.value())).collect();
        let mut infos: Vec<DeviceInfo> = sessions.iter().map(|s| s.lock().info().clone()).collect();
        infos.sort_by(|a, b| a.uuid.cmp(&b.uuid));
        infos
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn session(&self, uuid: &str) -> BridgeResult<SharedSession> {
        self.get(uuid).ok_or_bridge(|| BridgeError::SessionNotFound {
            uuid: uuid.to_string(),
        })
    }

    fn friendly_name(&self, uuid: &str) -> String {
        let mut names = self.friendly_names.lock();
        let next = names.len();
        names
            .entry(uuid.to_string())
            .or_insert_with(|| format!("{} - {}", self.config.session.name_prefix, next))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::BlockId;
    use crate::notify::OutcomeRecord;
    use std::thread;

    fn registry() -> SessionRegistry {
        SessionRegistry::new(EngineConfig::default()).expect("default config is valid")
    }

    #[test]
    fn test_names_are_stable_across_reconnects() {
        let registry = registry();
        let a = registry.open("AA");
        let b = registry.open("BB");
        assert_eq!(a.friendly_name, "CUBE - 0");
        assert_eq!(b.friendly_name, "CUBE - 1");
        assert_eq!(registry.open("AA"), a);

        registry.close("AA").expect("close AA");
        assert!(registry.get("AA").is_none());
        assert_eq!(registry.open("AA").friendly_name, "CUBE - 0");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unknown_device() {
        let registry = registry();
        let mut outcomes: Vec<OutcomeRecord> = Vec::new();
        let err = registry
            .handle_packet("nope", &[0, 0, 0, 5, 0, 0, 5], &mut outcomes)
            .expect_err("no session");
        assert!(matches!(err, BridgeError::SessionNotFound { .. }));
        assert!(registry.close("nope").is_err());
        assert!(registry.reset_structure("nope").is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.session.name_prefix.clear();
        assert!(matches!(SessionRegistry::new(config), Err(BridgeError::Config(_))));
    }

    #[test]
    fn test_devices_run_in_parallel() {
        let registry = Arc::new(registry());
        let uuids = ["D0", "D1", "D2", "D3"];
        for uuid in uuids {
            registry.open(uuid);
        }

        let handles: Vec<_> = uuids
            .iter()
            .map(|uuid| {
                let registry = Arc::clone(&registry);
                let uuid = uuid.to_string();
                thread::spawn(move || {
                    let mut outcomes: Vec<OutcomeRecord> = Vec::new();
                    for child in 1..=5u8 {
                        let parent = child - 1;
                        registry
                            .handle_packet(&uuid, &[0, 0, parent, 2, 0, 0, child], &mut outcomes)
                            .expect("session exists");
                    }
                    outcomes.len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().expect("worker thread"), 5);
        }
        for uuid in uuids {
            let session = registry.get(uuid).expect("open session");
            let session = session.lock();
            assert_eq!(session.structure().len(), 6);
            assert_eq!(session.structure().depth_of(BlockId::new(5)), Some(5));
        }
        assert_eq!(registry.devices().len(), 4);
    }
}
