// kestrel_core/src/anchor.rs

use crate::pose::PlanarPose;
use nalgebra::Rotation2;

/// The frame correspondence established by the last accepted absolute fix.
///
/// `local_ref` is the odometer's pose and `global_ref` the accepted global
/// pose, both captured at the same instant. Together they define the rigid
/// 2D transform that carries every later odometer reading into the global
/// frame. The pair is always overwritten as a unit (see [`Anchor::rearm`]),
/// never field by field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Anchor {
    local_ref: PlanarPose,
    global_ref: PlanarPose,
}

impl Anchor {
    /// Replaces both reference snapshots atomically.
    pub fn rearm(&mut self, local_ref: PlanarPose, global_ref: PlanarPose) {
        self.local_ref = local_ref;
        self.global_ref = global_ref;
    }

    pub fn local_ref(&self) -> PlanarPose {
        self.local_ref
    }

    pub fn global_ref(&self) -> PlanarPose {
        self.global_ref
    }

    /// Heading offset between the two frames.
    pub fn heading_delta(&self) -> f64 {
        self.global_ref.alpha - self.local_ref.alpha
    }

    /// Re-projects an odometer pose into the global frame.
    ///
    /// Three steps: translate into the frame where the anchor was taken,
    /// rotate by the heading delta between the two reference snapshots,
    /// translate out to the global reference. The heading maps additively.
    ///
    /// Note the first step subtracts position only; the odometer offset is
    /// not first expressed in `local_ref`'s own heading. That matches the
    /// behavior this estimator has always had, and the identity property
    /// (reporting `local_ref` again yields exactly `global_ref`) holds
    /// either way.
    pub fn reproject(&self, relative: &PlanarPose) -> PlanarPose {
        let delta = self.heading_delta();
        let offset = relative.xy() - self.local_ref.xy();
        let rotated = Rotation2::new(delta) * offset;
        let global = rotated + self.global_ref.xy();

        PlanarPose::new(global.x, global.y, relative.alpha + delta)
    }
}
