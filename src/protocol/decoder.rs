//! Stateful packet decoder
//!
//! Wraps the pure decode functions with the depth-1 echo cache a single
//! device link needs. The cache only advances when a packet decodes to an
//! operation; echoes and rejected packets leave it untouched.

use super::packet_data::{Decoded, DecodeError, DecoderStats, RawPacket};
use super::packet_operations;
use crate::config::DecoderConfig;

/// Decoder for one device link
#[derive(Debug, Clone, Default)]
pub struct PacketDecoder {
    prior: Option<RawPacket>,
    config: DecoderConfig,
    stats: DecoderStats,
}

impl PacketDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            prior: None,
            config,
            stats: DecoderStats::default(),
        }
    }

    /// Decode the next packet received on the link
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Decoded, DecodeError> {
        let prior = if self.config.echo_suppression {
            self.prior.as_ref()
        } else {
            None
        };

        let result = packet_operations::to_raw_packet(bytes)
            .and_then(|packet| packet_operations::decode(&packet, prior).map(|d| (packet, d)));

        match result {
            Ok((packet, Decoded::Operation(operation))) => {
                self.prior = Some(packet);
                self.stats.decoded += 1;
                log::debug!("[Decoder] {:?} decoded from {:02X?}", operation.kind, packet);
                Ok(Decoded::Operation(operation))
            }
            Ok((packet, Decoded::Duplicate)) => {
                self.stats.duplicates += 1;
                log::trace!("[Decoder] Suppressed echo {:02X?}", packet);
                Ok(Decoded::Duplicate)
            }
            Err(err) => {
                self.stats.rejected += 1;
                log::warn!("[Decoder] Rejected packet {:02X?}: {}", bytes, err);
                Err(err)
            }
        }
    }

    /// Last packet that decoded to an operation
    pub fn prior(&self) -> Option<&RawPacket> {
        self.prior.as_ref()
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Forget the echo reference, e.g. after the link was re-established
    pub fn reset(&mut self) {
        self.prior = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{BlockId, FaceDirection};
    use crate::protocol::{Operation, OperationKind};

    const ATTACH: RawPacket = [0, 0, 0, 5, 0, 0, 5];
    const DETACH: RawPacket = [0, 0, 0, 5, 0, 0, 0];

    #[test]
    fn test_echo_then_new_packet() {
        let mut decoder = PacketDecoder::default();

        assert_eq!(
            decoder.feed(&ATTACH),
            Ok(Decoded::Operation(Operation::add(BlockId::new(0), FaceDirection::Top, BlockId::new(5))))
        );
        assert_eq!(decoder.feed(&ATTACH), Ok(Decoded::Duplicate));
        assert_eq!(decoder.prior(), Some(&ATTACH));

        match decoder.feed(&DETACH) {
            Ok(Decoded::Operation(op)) => assert_eq!(op.kind, OperationKind::Remove),
            other => panic!("expected removal, got {:?}", other),
        }
        assert_eq!(decoder.feed(&DETACH), Ok(Decoded::Duplicate));

        let stats = decoder.stats();
        assert_eq!(stats.decoded, 2);
        assert_eq!(stats.duplicates, 2);
        assert_eq!(stats.rejected, 0);
    }

    #[test]
    fn test_echo_does_not_advance_reference() {
        let mut decoder = PacketDecoder::default();
        decoder.feed(&ATTACH).expect("first packet decodes");
        decoder.feed(&ATTACH).expect("echo is suppressed");
        // a third identical packet is still compared against the same reference
        assert_eq!(decoder.feed(&ATTACH), Ok(Decoded::Duplicate));
        assert_eq!(decoder.stats().decoded, 1);
    }

    #[test]
    fn test_errors_leave_cache_untouched() {
        let mut decoder = PacketDecoder::default();
        decoder.feed(&ATTACH).expect("first packet decodes");

        assert!(decoder.feed(&[0, 0, 0, 9, 0, 0, 5]).is_err());
        assert!(decoder.feed(&[0, 0, 0]).is_err());
        assert_eq!(decoder.prior(), Some(&ATTACH));
        assert_eq!(decoder.feed(&ATTACH), Ok(Decoded::Duplicate));
        assert_eq!(decoder.stats().rejected, 2);
    }

    #[test]
    fn test_suppression_can_be_disabled() {
        let mut decoder = PacketDecoder::new(DecoderConfig {
            echo_suppression: false,
        });
        assert!(matches!(decoder.feed(&ATTACH), Ok(Decoded::Operation(_))));
        assert!(matches!(decoder.feed(&ATTACH), Ok(Decoded::Operation(_))));
    }

    #[test]
    fn test_reset_forgets_reference() {
        let mut decoder = PacketDecoder::default();
        decoder.feed(&ATTACH).expect("first packet decodes");
        decoder.reset();
        assert!(matches!(decoder.feed(&ATTACH), Ok(Decoded::Operation(_))));
    }
}
