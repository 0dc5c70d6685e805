// kestrel_core/src/fusion.rs

use nalgebra::{Point3, Quaternion, Vector2};

use crate::anchor::Anchor;
use crate::config::FusionConfig;
use crate::guard::OutlierGuard;
use crate::messages::{FusionInput, PoseStamped, GLOBAL_FRAME};
use crate::pose::{PlanarPose, Pose};

/// What became of one input event.
///
/// The core never does I/O; it reports drops through this enum and the
/// runtime decides what to log. Dropping an event is routine, not an error,
/// which is why this is not a `Result`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The event mutated the estimate.
    Accepted,
    /// A correction landed further from the estimate than the accumulated
    /// motion allows. Nothing changed.
    RejectedOutlier { pose_diff: f64, allowance: f64 },
    /// An override arrived tagged with a foreign frame. Nothing changed.
    DroppedFrameMismatch { frame: String },
}

/// The pose fusion and anchoring core.
///
/// Owns the whole mutable state group: the fused estimate, the last
/// odometer pose, the [`Anchor`] tying the two frames together, and the
/// [`OutlierGuard`]. The three `handle_*` methods are the only mutation
/// entry points, and each one either fully commits or changes nothing, so
/// a caller that runs them to completion (the event loop is
/// single-threaded) can never observe a half-updated combination.
///
/// Two operating states: *awaiting-fix* (initial; readout suppressed when
/// gating is on, but odometry is still tracked against the zero anchor so
/// the first accepted fix snapshots a live local reference) and *tracking*
/// (entered permanently on the first accepted fix, or at construction when
/// a seed pose is configured).
#[derive(Debug, Clone)]
pub struct FusionCore {
    config: FusionConfig,
    fused: Pose,
    odometer: PlanarPose,
    anchor: Anchor,
    guard: OutlierGuard,
    tracking: bool,
}

impl FusionCore {
    pub fn new(config: FusionConfig) -> Self {
        let mut core = Self {
            config,
            fused: Pose::origin(),
            odometer: PlanarPose::default(),
            anchor: Anchor::default(),
            guard: OutlierGuard::default(),
            tracking: false,
        };

        if let Some(seed) = core.config.initial_pose {
            core.fused.x = seed.x;
            core.fused.y = seed.y;
            core.fused.z = seed.z;
            core.fused.set_heading(seed.theta);
            core.commit_fix();
        }

        core
    }

    /// Dispatches one input event to its handler.
    pub fn handle(&mut self, input: &FusionInput) -> Outcome {
        match input {
            FusionInput::Odometry(relative) => self.handle_odometry(*relative),
            FusionInput::Override(pose) => self.handle_override(pose),
            FusionInput::Correction { x, y, theta } => self.handle_correction(*x, *y, *theta),
        }
    }

    /// Folds one odometer reading into the fused estimate.
    ///
    /// The reading is re-projected through the current anchor into the
    /// global frame, and the planar distance the estimate moved is accrued
    /// into the outlier guard. Total function; touches no absolute-fix
    /// state.
    pub fn handle_odometry(&mut self, relative: PlanarPose) -> Outcome {
        let previous_xy = self.fused.xy();

        self.odometer = relative;
        let global = self.anchor.reproject(&relative);

        self.fused.x = global.x;
        self.fused.y = global.y;
        self.fused.z = 0.0;
        self.fused.set_heading(global.alpha);

        self.guard.record(self.fused.planar_distance_to(previous_xy));
        Outcome::Accepted
    }

    /// Applies a manually injected absolute pose.
    ///
    /// Trusted unconditionally: no outlier check. The only validation is
    /// the frame tag; a pose expressed in some other frame is meaningless
    /// here and is dropped.
    pub fn handle_override(&mut self, pose: &PoseStamped) -> Outcome {
        if pose.frame != GLOBAL_FRAME {
            return Outcome::DroppedFrameMismatch {
                frame: pose.frame.clone(),
            };
        }

        self.fused.x = pose.position.x;
        self.fused.y = pose.position.y;
        self.fused.z = pose.position.z;
        let q = pose.orientation;
        self.fused.set_orientation(q.w, q.i, q.j, q.k);

        self.commit_fix();
        Outcome::Accepted
    }

    /// Applies an absolute fix from the localization sensor, unless the
    /// outlier guard says the jump is implausible.
    ///
    /// `theta` arrives in the sensor's left-handed convention and is
    /// negated before use.
    pub fn handle_correction(&mut self, x: f64, y: f64, theta: f64) -> Outcome {
        let pose_diff = self.fused.planar_distance_to(Vector2::new(x, y));
        if !self.guard.permits(pose_diff, self.config.outlier_multiplier) {
            return Outcome::RejectedOutlier {
                pose_diff,
                allowance: self
                    .guard
                    .accumulated()
                    .map_or(f64::INFINITY, |a| a * self.config.outlier_multiplier),
            };
        }

        self.fused.x = x;
        self.fused.y = y;
        self.fused.z = 0.0;
        self.fused.set_heading(-theta);

        self.commit_fix();
        Outcome::Accepted
    }

    /// The readout consumed by the publisher loop.
    ///
    /// `None` while gating is enabled and no fix has ever been accepted;
    /// that is "not ready yet", not an error. Performs no mutation.
    pub fn current_estimate(&self) -> Option<PoseStamped> {
        if self.config.use_absolute_fix_gating && !self.tracking {
            return None;
        }

        let (qw, qx, qy, qz) = self.fused.orientation();
        Some(PoseStamped::new(
            GLOBAL_FRAME,
            Point3::new(self.fused.x, self.fused.y, self.fused.z),
            Quaternion::new(qw, qx, qy, qz),
        ))
    }

    /// Whether at least one absolute fix has ever been accepted.
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn fused_pose(&self) -> &Pose {
        &self.fused
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    pub fn guard(&self) -> &OutlierGuard {
        &self.guard
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Shared tail of every accepted absolute fix: snapshot the anchor pair
    /// as a unit, disarm the guard, enter tracking for good.
    fn commit_fix(&mut self) {
        self.anchor.rearm(self.odometer, self.fused.planar());
        self.guard.reset();
        self.tracking = true;
    }
}
