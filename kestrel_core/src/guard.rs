// kestrel_core/src/guard.rs

/// Motion-bounded acceptance test for absolute corrections.
///
/// Tracks the Euclidean distance the fused estimate has covered since the
/// last accepted absolute fix. A correction is only believable if it lands
/// within a multiple of that distance from the current estimate; a robot
/// that barely moved cannot honestly have teleported across the map, so a
/// far-off candidate is a sensor glitch and gets dropped.
///
/// `None` is the "unset" sentinel, distinct from zero: it means no motion
/// has been recorded since the guard was last reset, and in that window
/// every candidate is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OutlierGuard {
    accumulated: Option<f64>,
}

impl OutlierGuard {
    /// Accrues distance covered by one fused-estimate step, initializing
    /// the accumulator to zero first if it was unset.
    pub fn record(&mut self, distance: f64) {
        *self.accumulated.get_or_insert(0.0) += distance;
    }

    /// Back to the unset sentinel. Called whenever an absolute fix is
    /// accepted and the anchor is rearmed.
    pub fn reset(&mut self) {
        self.accumulated = None;
    }

    /// Whether a candidate fix `pose_diff` away from the current estimate
    /// is within the trust bound. Unset means yes.
    pub fn permits(&self, pose_diff: f64, multiplier: f64) -> bool {
        match self.accumulated {
            None => true,
            Some(accumulated) => accumulated * multiplier >= pose_diff,
        }
    }

    pub fn accumulated(&self) -> Option<f64> {
        self.accumulated
    }
}
