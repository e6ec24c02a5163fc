//! One device link: a decoder feeding one structure

use super::session_data::{DeviceInfo, PacketDisposition, SessionStats};
use crate::build::Structure;
use crate::config::EngineConfig;
use crate::notify::{OutcomeRecord, OutcomeSink};
use crate::protocol::{Decoded, PacketDecoder};

/// Decoder and structure owned by a single connected device
#[derive(Debug)]
pub struct DeviceSession {
    info: DeviceInfo,
    decoder: PacketDecoder,
    structure: Structure,
    config: EngineConfig,
    stats: SessionStats,
}

impl DeviceSession {
    pub fn new(info: DeviceInfo, config: &EngineConfig) -> Self {
        log::info!("[Session] Opened {} ({})", info.friendly_name, info.uuid);
        Self {
            info,
            decoder: PacketDecoder::new(config.decoder.clone()),
            structure: Structure::with_config(config.structure.clone()),
            config: config.clone(),
            stats: SessionStats::default(),
        }
    }

    /// Decode one inbound record and apply it. Never fails; every outcome is
    /// published to `sink` except suppressed echoes.
    pub fn handle_packet(&mut self, bytes: &[u8], sink: &mut dyn OutcomeSink) -> PacketDisposition {
        self.stats.packets_received += 1;

        let disposition = match self.decoder.feed(bytes) {
            Ok(Decoded::Duplicate) => PacketDisposition::Suppressed,
            Ok(Decoded::Operation(operation)) => match self.structure.apply_and_report(operation, sink) {
                Ok(_) => PacketDisposition::Applied,
                Err(err) => PacketDisposition::Rejected(err.kind()),
            },
            Err(err) => {
                sink.publish(OutcomeRecord::rejected(&err));
                PacketDisposition::Rejected(err.kind())
            }
        };

        match disposition {
            PacketDisposition::Applied => self.stats.packets_applied += 1,
            PacketDisposition::Rejected(_) => self.stats.packets_rejected += 1,
            PacketDisposition::Suppressed => self.stats.packets_suppressed += 1,
        }
        disposition
    }

    /// Drop the current structure and start from the base block again
    pub fn reset_structure(&mut self) {
        log::info!("[Session] Resetting structure of {}", self.info.friendly_name);
        self.structure = Structure::with_config(self.config.structure.clone());
        self.decoder.reset();
    }

    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn decoder(&self) -> &PacketDecoder {
        &self.decoder
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}
