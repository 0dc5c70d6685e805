// kestrel_core/src/config.rs

use crate::pose::PlanarPose;
use serde::Deserialize;

/// Runtime configuration for the fusion core and the publisher loop.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// When true (the default), no pose is published until at least one
    /// absolute fix has ever been accepted.
    pub use_absolute_fix_gating: bool,
    /// Trust bound for corrections: a candidate further than
    /// `accumulated_motion * outlier_multiplier` from the current estimate
    /// is dropped as an outlier.
    pub outlier_multiplier: f64,
    /// Cadence of the publisher loop.
    pub publish_rate_hz: f64,
    /// Optional startup pose. When present the core enters Tracking
    /// immediately, without waiting for a live fix.
    pub initial_pose: Option<SeedPose>,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            use_absolute_fix_gating: true,
            outlier_multiplier: 2.0,
            publish_rate_hz: 100.0,
            initial_pose: None,
        }
    }
}

/// An absolute pose supplied at startup, trusted like a manual override.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SeedPose {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    pub theta: f64,
}

impl SeedPose {
    pub fn planar(&self) -> PlanarPose {
        PlanarPose::new(self.x, self.y, self.theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy_constants() {
        let config = FusionConfig::default();
        assert!(config.use_absolute_fix_gating);
        assert_eq!(config.outlier_multiplier, 2.0);
        assert_eq!(config.publish_rate_hz, 100.0);
        assert!(config.initial_pose.is_none());
    }
}
