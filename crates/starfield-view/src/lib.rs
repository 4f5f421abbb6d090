//! Viewing the universe: camera, frustum culling, the renderer and UI
//! boundaries, and the selection state machine.

pub mod camera;
pub mod culling;
pub mod describe;
pub mod error;
pub mod focus;
pub mod frustum;
pub mod overlay;
pub mod scene;
pub mod selection;

pub use camera::{OrbitCamera, Ray};
pub use culling::{CullStats, VisibilityCuller};
pub use describe::{BodyDescription, BodyDetail, SizeClass, StarClass};
pub use error::FrameError;
pub use focus::{FocusAnimation, FocusStep, ease_in_out, focus_distance};
pub use frustum::Frustum;
pub use overlay::{Overlay, OverlayCall, RecordingOverlay, crosshair_size};
pub use scene::{InMemoryScene, MeshHandle, MeshShape, RayHit, SceneBackend, SceneBindings};
pub use selection::{SelectionController, SelectionState, ViewContext};
