// kestrel_core/tests/scenario.rs

//! End-to-end walk through a short localization session: drive blind,
//! receive a manual fix, keep driving, shrug off a bogus sensor fix.

use approx::assert_abs_diff_eq;
use kestrel_core::prelude::*;
use nalgebra::{Point3, Quaternion};

#[test]
fn drive_fix_drive_reject() {
    let mut core = FusionCore::new(FusionConfig::default());

    // Drive one meter before anyone tells us where we are. Gating holds
    // the readout back, but the odometer pose is tracked.
    core.handle(&FusionInput::Odometry(PlanarPose::new(1.0, 0.0, 0.0)));
    assert_eq!(core.current_estimate(), None);

    // A manual override places us at (10, 5) facing +x.
    let outcome = core.handle(&FusionInput::Override(PoseStamped::new(
        GLOBAL_FRAME,
        Point3::new(10.0, 5.0, 0.0),
        Quaternion::new(1.0, 0.0, 0.0, 0.0),
    )));
    assert_eq!(outcome, Outcome::Accepted);
    assert!(core.is_tracking());

    // The anchor pairs the odometer pose at fix time with the fix itself.
    assert_abs_diff_eq!(core.anchor().local_ref().x, 1.0);
    assert_abs_diff_eq!(core.anchor().local_ref().y, 0.0);
    assert_abs_diff_eq!(core.anchor().global_ref().x, 10.0);
    assert_abs_diff_eq!(core.anchor().global_ref().y, 5.0);

    // One more meter of odometry carries the estimate to (11, 5).
    core.handle(&FusionInput::Odometry(PlanarPose::new(2.0, 0.0, 0.0)));
    let estimate = core.current_estimate().expect("tracking, must read out");
    assert_abs_diff_eq!(estimate.position.x, 11.0, epsilon = 1e-9);
    assert_abs_diff_eq!(estimate.position.y, 5.0, epsilon = 1e-9);
    assert_eq!(estimate.frame, GLOBAL_FRAME);

    // A sensor fix at (50, 50) is ~60 m away while we only accumulated
    // 1 m of motion since the override. The guard drops it.
    let outcome = core.handle(&FusionInput::Correction {
        x: 50.0,
        y: 50.0,
        theta: 0.0,
    });
    assert!(matches!(outcome, Outcome::RejectedOutlier { .. }));

    let estimate = core.current_estimate().unwrap();
    assert_abs_diff_eq!(estimate.position.x, 11.0, epsilon = 1e-9);
    assert_abs_diff_eq!(estimate.position.y, 5.0, epsilon = 1e-9);

    // A plausible fix half a meter away is accepted and re-anchors.
    let outcome = core.handle(&FusionInput::Correction {
        x: 11.5,
        y: 5.0,
        theta: 0.0,
    });
    assert_eq!(outcome, Outcome::Accepted);
    let estimate = core.current_estimate().unwrap();
    assert_abs_diff_eq!(estimate.position.x, 11.5, epsilon = 1e-9);
    assert_eq!(core.guard().accumulated(), None);
}
