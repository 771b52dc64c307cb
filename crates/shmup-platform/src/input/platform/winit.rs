use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{buttons, keys, InputEvent, InputState};

/// Translates a winit `WindowEvent` into an `InputEvent`.
///
/// `surface` is the window's inner size, used to normalize touch positions.
/// Button events carry the last tracked mouse position. Returns `None` for
/// events the input subsystem does not represent, and for unmapped keys.
pub fn translate_window_event(
    surface: PhysicalSize<u32>,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            let key_code = map_key(event.physical_key)?;
            Some(match event.state {
                ElementState::Pressed => InputEvent::KeyDown { key_code },
                ElementState::Released => InputEvent::KeyUp { key_code },
            })
        }

        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::MouseMove {
            x: position.x as i32,
            y: position.y as i32,
        }),

        WindowEvent::MouseInput { state: st, button, .. } => {
            let button = map_mouse_button(*button);
            let (x, y) = state.mouse_position();
            Some(match st {
                ElementState::Pressed => InputEvent::MouseButtonDown { button, x, y },
                ElementState::Released => InputEvent::MouseButtonUp { button, x, y },
            })
        }

        WindowEvent::Touch(touch) => Some(translate_touch(surface, touch)),

        _ => None,
    }
}

fn translate_touch(surface: PhysicalSize<u32>, touch: &Touch) -> InputEvent {
    let id = touch.id;
    let (x, y) = normalize(surface, touch.location);
    match touch.phase {
        TouchPhase::Started => InputEvent::TouchStart { id, x, y },
        TouchPhase::Moved => InputEvent::TouchMove { id, x, y },
        TouchPhase::Ended | TouchPhase::Cancelled => InputEvent::TouchEnd { id, x, y },
    }
}

fn normalize(surface: PhysicalSize<u32>, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let w = f64::from(surface.width.max(1));
    let h = f64::from(surface.height.max(1));
    ((pos.x / w) as f32, (pos.y / h) as f32)
}

fn map_mouse_button(b: MouseButton) -> u8 {
    match b {
        MouseButton::Left => buttons::LEFT,
        MouseButton::Middle => buttons::MIDDLE,
        MouseButton::Right => buttons::RIGHT,
        MouseButton::Back => buttons::BACK,
        MouseButton::Forward => buttons::FORWARD,
        MouseButton::Other(v) => u8::try_from(v).unwrap_or(u8::MAX),
    }
}

fn map_key(pk: PhysicalKey) -> Option<i32> {
    let PhysicalKey::Code(code) = pk else {
        return None;
    };

    let ascii = |c: u8| Some(c as i32);
    match code {
        KeyCode::Backspace => Some(keys::BACKSPACE),
        KeyCode::Tab => Some(keys::TAB),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(keys::RETURN),
        KeyCode::Escape => Some(keys::ESCAPE),
        KeyCode::Space => Some(keys::SPACE),
        KeyCode::Delete => Some(keys::DELETE),

        KeyCode::ArrowRight => Some(keys::RIGHT),
        KeyCode::ArrowLeft => Some(keys::LEFT),
        KeyCode::ArrowDown => Some(keys::DOWN),
        KeyCode::ArrowUp => Some(keys::UP),

        KeyCode::ControlLeft => Some(keys::LCTRL),
        KeyCode::ShiftLeft => Some(keys::LSHIFT),
        KeyCode::AltLeft => Some(keys::LALT),
        KeyCode::ControlRight => Some(keys::RCTRL),
        KeyCode::ShiftRight => Some(keys::RSHIFT),
        KeyCode::AltRight => Some(keys::RALT),

        KeyCode::KeyA => ascii(b'a'),
        KeyCode::KeyB => ascii(b'b'),
        KeyCode::KeyC => ascii(b'c'),
        KeyCode::KeyD => ascii(b'd'),
        KeyCode::KeyE => ascii(b'e'),
        KeyCode::KeyF => ascii(b'f'),
        KeyCode::KeyG => ascii(b'g'),
        KeyCode::KeyH => ascii(b'h'),
        KeyCode::KeyI => ascii(b'i'),
        KeyCode::KeyJ => ascii(b'j'),
        KeyCode::KeyK => ascii(b'k'),
        KeyCode::KeyL => ascii(b'l'),
        KeyCode::KeyM => ascii(b'm'),
        KeyCode::KeyN => ascii(b'n'),
        KeyCode::KeyO => ascii(b'o'),
        KeyCode::KeyP => ascii(b'p'),
        KeyCode::KeyQ => ascii(b'q'),
        KeyCode::KeyR => ascii(b'r'),
        KeyCode::KeyS => ascii(b's'),
        KeyCode::KeyT => ascii(b't'),
        KeyCode::KeyU => ascii(b'u'),
        KeyCode::KeyV => ascii(b'v'),
        KeyCode::KeyW => ascii(b'w'),
        KeyCode::KeyX => ascii(b'x'),
        KeyCode::KeyY => ascii(b'y'),
        KeyCode::KeyZ => ascii(b'z'),

        KeyCode::Digit0 => ascii(b'0'),
        KeyCode::Digit1 => ascii(b'1'),
        KeyCode::Digit2 => ascii(b'2'),
        KeyCode::Digit3 => ascii(b'3'),
        KeyCode::Digit4 => ascii(b'4'),
        KeyCode::Digit5 => ascii(b'5'),
        KeyCode::Digit6 => ascii(b'6'),
        KeyCode::Digit7 => ascii(b'7'),
        KeyCode::Digit8 => ascii(b'8'),
        KeyCode::Digit9 => ascii(b'9'),

        KeyCode::F1 => Some(keys::F1),
        KeyCode::F2 => Some(keys::F1 + 1),
        KeyCode::F3 => Some(keys::F1 + 2),
        KeyCode::F4 => Some(keys::F1 + 3),
        KeyCode::F5 => Some(keys::F1 + 4),
        KeyCode::F6 => Some(keys::F1 + 5),
        KeyCode::F7 => Some(keys::F1 + 6),
        KeyCode::F8 => Some(keys::F1 + 7),
        KeyCode::F9 => Some(keys::F1 + 8),
        KeyCode::F10 => Some(keys::F1 + 9),
        KeyCode::F11 => Some(keys::F1 + 10),
        KeyCode::F12 => Some(keys::F1 + 11),

        _ => None,
    }
}
