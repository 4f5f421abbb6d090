//! Translation from winit device events to [`InputEvent`](crate::InputEvent)
//! vocabulary.

use winit::event::{MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

use crate::events::{Key, PointerButton};

/// Pixels of trackpad scroll treated as one wheel line.
const PIXELS_PER_LINE: f64 = 40.0;

/// Map a physical key code. Keys the viewer never binds return `None`.
pub fn key_from_winit(code: KeyCode) -> Option<Key> {
    let letter = match code {
        KeyCode::Space => return Some(Key::Space),
        KeyCode::Enter | KeyCode::NumpadEnter => return Some(Key::Enter),
        KeyCode::Escape => return Some(Key::Escape),
        KeyCode::KeyA => 'A',
        KeyCode::KeyB => 'B',
        KeyCode::KeyC => 'C',
        KeyCode::KeyD => 'D',
        KeyCode::KeyE => 'E',
        KeyCode::KeyF => 'F',
        KeyCode::KeyG => 'G',
        KeyCode::KeyH => 'H',
        KeyCode::KeyI => 'I',
        KeyCode::KeyJ => 'J',
        KeyCode::KeyK => 'K',
        KeyCode::KeyL => 'L',
        KeyCode::KeyM => 'M',
        KeyCode::KeyN => 'N',
        KeyCode::KeyO => 'O',
        KeyCode::KeyP => 'P',
        KeyCode::KeyQ => 'Q',
        KeyCode::KeyR => 'R',
        KeyCode::KeyS => 'S',
        KeyCode::KeyT => 'T',
        KeyCode::KeyU => 'U',
        KeyCode::KeyV => 'V',
        KeyCode::KeyW => 'W',
        KeyCode::KeyX => 'X',
        KeyCode::KeyY => 'Y',
        KeyCode::KeyZ => 'Z',
        KeyCode::Digit0 => '0',
        KeyCode::Digit1 => '1',
        KeyCode::Digit2 => '2',
        KeyCode::Digit3 => '3',
        KeyCode::Digit4 => '4',
        KeyCode::Digit5 => '5',
        KeyCode::Digit6 => '6',
        KeyCode::Digit7 => '7',
        KeyCode::Digit8 => '8',
        KeyCode::Digit9 => '9',
        _ => return None,
    };
    Some(Key::Char(letter))
}

/// Map a winit mouse button.
pub fn pointer_button_from_winit(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Right => PointerButton::Right,
        MouseButton::Middle => PointerButton::Middle,
        _ => PointerButton::Other,
    }
}

/// Wheel delta in lines, positive meaning "zoom out".
///
/// winit reports scrolling away from the user as positive `y`, which the
/// viewer treats as zooming in, hence the sign flip.
pub fn wheel_delta_from_winit(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y,
        MouseScrollDelta::PixelDelta(pos) => -(pos.y / PIXELS_PER_LINE) as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_named_keys() {
        assert_eq!(key_from_winit(KeyCode::KeyO), Some(Key::Char('O')));
        assert_eq!(key_from_winit(KeyCode::Digit7), Some(Key::Char('7')));
        assert_eq!(key_from_winit(KeyCode::Space), Some(Key::Space));
        assert_eq!(key_from_winit(KeyCode::NumpadEnter), Some(Key::Enter));
        assert_eq!(key_from_winit(KeyCode::F12), None);
    }

    #[test]
    fn test_buttons() {
        assert_eq!(pointer_button_from_winit(MouseButton::Left), PointerButton::Left);
        assert_eq!(pointer_button_from_winit(MouseButton::Right), PointerButton::Right);
        assert_eq!(pointer_button_from_winit(MouseButton::Back), PointerButton::Other);
    }

    #[test]
    fn test_wheel_lines_flip_sign() {
        assert_eq!(wheel_delta_from_winit(MouseScrollDelta::LineDelta(0.0, 2.0)), -2.0);
        assert_eq!(wheel_delta_from_winit(MouseScrollDelta::LineDelta(0.0, -1.0)), 1.0);
    }

    #[test]
    fn test_wheel_pixels_normalized() {
        let delta = MouseScrollDelta::PixelDelta(winit::dpi::PhysicalPosition::new(0.0, -80.0));
        assert_eq!(wheel_delta_from_winit(delta), 2.0);
    }
}
