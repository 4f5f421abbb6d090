//! Input boundary: discrete pointer, wheel, and key events, the key
//! bindings that turn keys into viewer actions, and translation from winit.

pub mod bindings;
pub mod events;
pub mod winit_map;

pub use bindings::{KeyBindings, ViewAction};
pub use events::{InputEvent, Key, PointerButton};
pub use winit_map::{key_from_winit, pointer_button_from_winit, wheel_delta_from_winit};
