// kestrel_core/src/lib.rs

//! Planar pose fusion and anchoring.
//!
//! Maintains a robot's best estimate of its own 2D pose in a global frame
//! by fusing continuous relative motion (odometry) with intermittent
//! absolute fixes (an external localization sensor, or a manually injected
//! pose). Pure library: no I/O, no clock, no transport. The runtime crate
//! (`kestrel_node`) owns the event loop and the publisher cadence.

pub mod anchor;
pub mod config;
pub mod fusion;
pub mod guard;
pub mod messages;
pub mod pose;
pub mod prelude;
