/// Platform-agnostic input event.
///
/// Key codes follow SDL keysym numbering: printable keys are their ASCII
/// code, everything else carries the scancode mask (`1 << 30`).
/// Mouse coordinates are window pixels; touch coordinates are normalized
/// to `[0, 1]` over the window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown { key_code: i32 },
    KeyUp { key_code: i32 },

    MouseMove { x: i32, y: i32 },
    MouseButtonDown { button: u8, x: i32, y: i32 },
    MouseButtonUp { button: u8, x: i32, y: i32 },

    TouchStart { id: u64, x: f32, y: f32 },
    TouchMove { id: u64, x: f32, y: f32 },
    TouchEnd { id: u64, x: f32, y: f32 },
}

/// SDL keysym values for the keys the runtime maps.
pub mod keys {
    const SCANCODE_MASK: i32 = 1 << 30;

    const fn scancode(code: i32) -> i32 {
        code | SCANCODE_MASK
    }

    pub const BACKSPACE: i32 = 8;
    pub const TAB: i32 = 9;
    pub const RETURN: i32 = 13;
    pub const ESCAPE: i32 = 27;
    pub const SPACE: i32 = b' ' as i32;
    pub const DELETE: i32 = 127;

    pub const F1: i32 = scancode(58);

    pub const RIGHT: i32 = scancode(79);
    pub const LEFT: i32 = scancode(80);
    pub const DOWN: i32 = scancode(81);
    pub const UP: i32 = scancode(82);

    pub const LCTRL: i32 = scancode(224);
    pub const LSHIFT: i32 = scancode(225);
    pub const LALT: i32 = scancode(226);
    pub const RCTRL: i32 = scancode(228);
    pub const RSHIFT: i32 = scancode(229);
    pub const RALT: i32 = scancode(230);
}

/// SDL mouse button indices.
pub mod buttons {
    pub const LEFT: u8 = 1;
    pub const MIDDLE: u8 = 2;
    pub const RIGHT: u8 = 3;
    pub const BACK: u8 = 4;
    pub const FORWARD: u8 = 5;
}
