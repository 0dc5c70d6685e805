// kestrel_node/src/node.rs

//! The fusion event loop.
//!
//! One logical thread owns the whole mutable state group (fused pose,
//! anchor, outlier guard, wrapped in [`FusionCore`]) and alternates between
//! inbound events and the publish tick, each handled to completion before
//! the next is examined. No handler ever observes a half-updated estimate.
//!
//! The publish cadence is a `crossbeam_channel::tick` ticker: when the loop
//! falls behind, missed ticks are dropped rather than queued, so the
//! publisher is best-effort at the configured rate.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, never, select, tick, Receiver, Sender, TrySendError};
use kestrel_core::prelude::*;
use tracing::{debug, info, warn};

/// Handle to the spawned fusion thread.
pub struct FusionNode {
    handle: JoinHandle<()>,
}

/// The channel endpoints a transport adapter plugs into.
pub struct NodeChannels {
    /// Inbound events: odometry, overrides, corrections.
    pub input_tx: Sender<FusionInput>,
    /// Outbound fused poses, one per publish tick once tracking.
    pub pose_rx: Receiver<PoseStamped>,
}

impl FusionNode {
    /// Spawns the fusion loop on a named thread.
    ///
    /// The loop runs until every clone of `input_tx` has been dropped or
    /// the pose receiver goes away.
    pub fn spawn(config: FusionConfig) -> (Self, NodeChannels) {
        let (input_tx, input_rx) = bounded(64);
        let (pose_tx, pose_rx) = bounded(8);

        let handle = thread::Builder::new()
            .name("fusion".into())
            .spawn(move || run_fusion_loop(config, input_rx, pose_tx))
            .expect("failed to spawn fusion thread");

        (Self { handle }, NodeChannels { input_tx, pose_rx })
    }

    /// Wait for the loop to finish.
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }
}

fn run_fusion_loop(
    config: FusionConfig,
    input_rx: Receiver<FusionInput>,
    pose_tx: Sender<PoseStamped>,
) {
    // A non-positive rate disables publishing entirely.
    let ticker = if config.publish_rate_hz > 0.0 {
        tick(Duration::from_secs_f64(1.0 / config.publish_rate_hz))
    } else {
        never()
    };

    let mut core = FusionCore::new(config);
    info!(tracking = core.is_tracking(), "fusion loop running");

    loop {
        select! {
            recv(input_rx) -> event => match event {
                Ok(event) => dispatch(&mut core, &event),
                // All input senders are gone; nothing further can arrive.
                Err(_) => break,
            },
            recv(ticker) -> _ => {
                // Gated readout returns None before the first fix: skip
                // the tick, this is "not ready yet" rather than an error.
                if let Some(pose) = core.current_estimate() {
                    match pose_tx.try_send(pose) {
                        Ok(()) => {}
                        // Consumer is behind; this tick's pose is stale by
                        // the next one anyway, so drop it.
                        Err(TrySendError::Full(_)) => {}
                        Err(TrySendError::Disconnected(_)) => break,
                    }
                }
            }
        }
    }

    info!("fusion loop stopped");
}

fn dispatch(core: &mut FusionCore, event: &FusionInput) {
    match core.handle(event) {
        Outcome::Accepted => {}
        Outcome::RejectedOutlier {
            pose_diff,
            allowance,
        } => debug!(
            pose_diff,
            allowance, "dropped correction: jump exceeds accumulated motion"
        ),
        Outcome::DroppedFrameMismatch { frame } => {
            warn!(%frame, "dropped override tagged with foreign frame");
        }
    }
}
