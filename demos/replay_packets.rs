//! Replay a recorded device session
//!
//! Feeds a short capture of raw block events, echoes included, through a
//! session registry and prints the resulting structure.
//!
//! Run with `RUST_LOG=debug cargo run --example replay_packets` to see the
//! orientation derivations.

use std::thread;

use cubelink::{channel_sink, EngineConfig, SessionRegistry};

const CAPTURE: [[u8; 7]; 10] = [
    [0x00, 0x00, 0x00, 0x05, 0x20, 0x00, 0x01], // attach on top of the base
    [0x00, 0x00, 0x00, 0x05, 0x20, 0x00, 0x01], // echo
    [0x20, 0x00, 0x01, 0x02, 0x30, 0x00, 0x02], // attach to the front of that block
    [0x20, 0x00, 0x01, 0x02, 0x30, 0x00, 0x02], // echo
    [0x00, 0x00, 0x00, 0x04, 0x40, 0x00, 0x03], // base left
    [0x40, 0x00, 0x03, 0x05, 0x50, 0x00, 0x04], // on top of the left block
    [0x40, 0x00, 0x03, 0x05, 0x50, 0x00, 0x04], // echo
    [0x00, 0x00, 0x00, 0x09, 0x60, 0x00, 0x05], // corrupted face byte
    [0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00], // left block pulled off
    [0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00], // echo
];

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = EngineConfig::from_toml_str(
        r#"
        [structure]
        verify_invariants = true
        "#,
    )?;
    let registry = SessionRegistry::new(config)?;
    let device = registry.open("C4:BE:84:12:34:56");
    println!("Replaying {} packets from {}", CAPTURE.len(), device.friendly_name);

    let (mut sender, receiver) = channel_sink(registry.config().session.outcome_channel_capacity);
    let printer = thread::spawn(move || {
        for record in receiver {
            let status = match record.failure {
                None => "ok".to_string(),
                Some(kind) => kind.to_string(),
            };
            println!(
                "  {:?} parent={:?} child={:?} -> {} [{}] removed={:?}",
                record.operation_type,
                record.parent_id,
                record.child_id,
                record.resolved_direction,
                status,
                record.removed
            );
        }
    });

    for packet in &CAPTURE {
        let disposition = registry.handle_packet(&device.uuid, packet, &mut sender)?;
        log::debug!("{:02X?} -> {:?}", packet, disposition);
    }
    drop(sender);
    printer
        .join()
        .map_err(|_| anyhow::anyhow!("printer thread panicked"))?;

    let session = registry
        .get(&device.uuid)
        .ok_or_else(|| anyhow::anyhow!("session closed during replay"))?;
    let session = session.lock();
    let structure = session.structure();

    let mut blocks: Vec<_> = structure.blocks().collect();
    blocks.sort_by_key(|block| block.id);
    println!("Structure of {} ({} blocks):", device.friendly_name, structure.len());
    for block in blocks {
        println!(
            "  {:<14} {:<10} {:?} depth {}",
            block.id.to_string(),
            block.coordinate.to_string(),
            block.id.color(),
            structure.depth_of(block.id).unwrap_or_default()
        );
    }
    println!("{:?}", session.stats());
    println!("{}", structure.snapshot().to_json()?);

    Ok(())
}
