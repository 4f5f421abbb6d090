//! Per-frame failures. None of these stop the frame loop.

use starfield_universe::BodyId;
use thiserror::Error;

/// A frame that could not be completed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// The camera position, target, or projection is NaN/infinite or degenerate.
    #[error("camera state is not finite (position {position:?}, target {target:?})")]
    NonFiniteCamera {
        /// Eye position at the time of the failure.
        position: [f32; 3],
        /// Look-at target at the time of the failure.
        target: [f32; 3],
    },
    /// A body has no mesh in the scene.
    #[error("body {0:?} has no scene binding")]
    UnboundBody(BodyId),
}
