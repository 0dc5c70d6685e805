// kestrel_core/src/prelude.rs

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::anchor::Anchor;
pub use crate::guard::OutlierGuard;
pub use crate::pose::{PlanarPose, Pose};

// --- The fusion engine and its event vocabulary ---
pub use crate::config::{FusionConfig, SeedPose};
pub use crate::fusion::{FusionCore, Outcome};
pub use crate::messages::{FusionInput, PoseStamped, GLOBAL_FRAME};
