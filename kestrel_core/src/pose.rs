// kestrel_core/src/pose.rs

use nalgebra::Vector2;

/// A bare planar pose: position in the XY plane plus a heading angle.
///
/// This is the currency of the fusion core. Odometry reports one, the
/// anchor stores two of them, and corrections arrive as one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlanarPose {
    pub x: f64,
    pub y: f64,
    /// Heading in radians, counter-clockwise positive.
    pub alpha: f64,
}

impl PlanarPose {
    pub fn new(x: f64, y: f64, alpha: f64) -> Self {
        Self { x, y, alpha }
    }

    pub fn xy(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

/// The full pose estimate: planar position (z retained but pinned to 0),
/// heading angle, and a redundant pure-yaw quaternion.
///
/// The angle and the quaternion describe the same rotation and must never
/// diverge, so the heading fields are private and only mutable through
/// [`Pose::set_heading`] and [`Pose::set_orientation`], which recompute the
/// other representation (and the cached cos/sin) on every write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,

    alpha: f64,
    qw: f64,
    qx: f64,
    qy: f64,
    qz: f64,
    cos_alpha: f64,
    sin_alpha: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self::origin()
    }
}

impl Pose {
    /// The zero pose: origin position, zero heading, identity quaternion.
    pub fn origin() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            alpha: 0.0,
            qw: 1.0,
            qx: 0.0,
            qy: 0.0,
            qz: 0.0,
            cos_alpha: 1.0,
            sin_alpha: 0.0,
        }
    }

    /// Sets the heading angle and rebuilds the quaternion from it.
    ///
    /// The quaternion is built as `r = sqrt(2 - 2*cos(alpha))`, `qw =
    /// sin(alpha)/r`, `qz = r/2` (identity when `r == 0`). For alpha in
    /// (0, 2π) this equals the half-angle form (cos(α/2), 0, 0, sin(α/2)),
    /// but the nonnegative square root means qz never goes negative, so
    /// negative headings come back reflected through [`quaternion_to_yaw`].
    /// That asymmetry is long-standing observed behavior and is kept as-is;
    /// see `negative_alpha_recovers_reflected` in the tests below.
    pub fn set_heading(&mut self, alpha: f64) {
        self.alpha = alpha;
        self.cos_alpha = alpha.cos();
        self.sin_alpha = alpha.sin();

        let r = (2.0 - 2.0 * alpha.cos()).sqrt();
        if r == 0.0 {
            self.qw = 1.0;
            self.qz = 0.0;
        } else {
            self.qw = alpha.sin() / r;
            self.qz = r / 2.0;
        }
        self.qx = 0.0;
        self.qy = 0.0;
    }

    /// Stores a supplied quaternion verbatim and derives the heading from it.
    ///
    /// Only the yaw component is recovered; roll and pitch terms are assumed
    /// zero for this planar system.
    pub fn set_orientation(&mut self, qw: f64, qx: f64, qy: f64, qz: f64) {
        self.qw = qw;
        self.qx = qx;
        self.qy = qy;
        self.qz = qz;

        self.cos_alpha = qw * qw + qx * qx - qy * qy - qz * qz;
        self.sin_alpha = 2.0 * qw * qz + 2.0 * qx * qy;
        self.alpha = f64::atan2(self.sin_alpha, self.cos_alpha);
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The quaternion as (w, x, y, z).
    pub fn orientation(&self) -> (f64, f64, f64, f64) {
        (self.qw, self.qx, self.qy, self.qz)
    }

    pub fn xy(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Planar Euclidean distance to another position.
    pub fn planar_distance_to(&self, xy: Vector2<f64>) -> f64 {
        (self.xy() - xy).norm()
    }

    /// The planar projection of this pose.
    pub fn planar(&self) -> PlanarPose {
        PlanarPose::new(self.x, self.y, self.alpha)
    }
}
