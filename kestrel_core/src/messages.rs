// kestrel_core/src/messages.rs

use crate::pose::PlanarPose;
use nalgebra::{Point3, Quaternion};

/// Identifier of the fixed global frame. Overrides must be tagged with it
/// and every published pose is stamped with it.
pub const GLOBAL_FRAME: &str = "map";

/// A full pose tagged with the frame it is expressed in.
///
/// Used both as the override input (frame tag validated against
/// [`GLOBAL_FRAME`]) and as the published output. Quaternion order is
/// (w, x, y, z).
#[derive(Debug, Clone, PartialEq)]
pub struct PoseStamped {
    pub frame: String,
    pub position: Point3<f64>,
    pub orientation: Quaternion<f64>,
}

impl PoseStamped {
    pub fn new(
        frame: impl Into<String>,
        position: Point3<f64>,
        orientation: Quaternion<f64>,
    ) -> Self {
        Self {
            frame: frame.into(),
            position,
            orientation,
        }
    }
}

/// The three kinds of input event the fusion core consumes.
///
/// Delivery ordering is only guaranteed within one variant's source; the
/// core makes no assumption about interleaving across sources.
#[derive(Debug, Clone, PartialEq)]
pub enum FusionInput {
    /// Continuous relative motion from the odometer. Frame-local, drifts,
    /// never jumps.
    Odometry(PlanarPose),
    /// A manually injected absolute pose. Trusted unconditionally once its
    /// frame tag checks out.
    Override(PoseStamped),
    /// An absolute fix from the external localization sensor. `theta` uses
    /// the sensor's left-handed convention and is negated on ingest.
    /// Subject to outlier rejection.
    Correction { x: f64, y: f64, theta: f64 },
}
