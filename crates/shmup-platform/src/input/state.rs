use std::fmt;

use super::types::InputEvent;

/// Key codes below this are tracked as held/released.
pub const MAX_KEYS: usize = 512;
pub const MAX_MOUSE_BUTTONS: usize = 8;
pub const MAX_TOUCH_POINTS: usize = 10;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

pub type InputCallback = Box<dyn FnMut(&InputEvent)>;

/// Held keys and buttons, the mouse position and active touches.
///
/// Events outside the tracked ranges still reach the callback; they just
/// leave no state behind.
pub struct InputState {
    keys: [bool; MAX_KEYS],
    mouse: (i32, i32),
    buttons: [bool; MAX_MOUSE_BUTTONS],
    touches: [Option<TouchPoint>; MAX_TOUCH_POINTS],
    callback: Option<InputCallback>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            keys: [false; MAX_KEYS],
            mouse: (0, 0),
            buttons: [false; MAX_MOUSE_BUTTONS],
            touches: [None; MAX_TOUCH_POINTS],
            callback: None,
        }
    }
}

impl fmt::Debug for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputState")
            .field("keys_down", &self.keys.iter().filter(|k| **k).count())
            .field("mouse", &self.mouse)
            .field("buttons", &self.buttons)
            .field("touch_count", &self.touch_count())
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all tracked state and drops the callback.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_callback(&mut self, callback: impl FnMut(&InputEvent) + 'static) {
        self.callback = Some(Box::new(callback));
    }

    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    /// Applies `event` to the tracked state, then hands it to the callback.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key_code } => self.set_key(key_code, true),
            InputEvent::KeyUp { key_code } => self.set_key(key_code, false),

            InputEvent::MouseMove { x, y } => self.mouse = (x, y),
            InputEvent::MouseButtonDown { button, .. } => self.set_button(button, true),
            InputEvent::MouseButtonUp { button, .. } => self.set_button(button, false),

            InputEvent::TouchStart { id, x, y } => {
                match self.touches.iter_mut().find(|t| t.is_none()) {
                    Some(slot) => *slot = Some(TouchPoint { id, x, y }),
                    None => log::debug!("touch {id} ignored, {MAX_TOUCH_POINTS} already active"),
                }
            }
            InputEvent::TouchMove { id, x, y } => {
                if let Some(point) = self.find_touch(id) {
                    point.x = x;
                    point.y = y;
                }
            }
            InputEvent::TouchEnd { id, .. } => {
                if let Some(slot) = self
                    .touches
                    .iter_mut()
                    .find(|t| t.is_some_and(|p| p.id == id))
                {
                    *slot = None;
                }
            }
        }

        if let Some(callback) = self.callback.as_mut() {
            callback(event);
        }
    }

    pub fn is_key_down(&self, key_code: i32) -> bool {
        usize::try_from(key_code)
            .ok()
            .and_then(|i| self.keys.get(i))
            .copied()
            .unwrap_or(false)
    }

    pub fn mouse_position(&self) -> (i32, i32) {
        self.mouse
    }

    pub fn is_mouse_button_down(&self, button: u8) -> bool {
        self.buttons.get(button as usize).copied().unwrap_or(false)
    }

    pub fn touch_count(&self) -> usize {
        self.touches.iter().flatten().count()
    }

    /// Touch in slot `index`, if that slot is active.
    pub fn touch(&self, index: usize) -> Option<TouchPoint> {
        self.touches.get(index).copied().flatten()
    }

    fn set_key(&mut self, key_code: i32, down: bool) {
        if let Some(key) = usize::try_from(key_code).ok().and_then(|i| self.keys.get_mut(i)) {
            *key = down;
        }
    }

    fn set_button(&mut self, button: u8, down: bool) {
        if let Some(b) = self.buttons.get_mut(button as usize) {
            *b = down;
        }
    }

    fn find_touch(&mut self, id: u64) -> Option<&mut TouchPoint> {
        self.touches.iter_mut().flatten().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::input::keys;

    fn start(id: u64, x: f32) -> InputEvent {
        InputEvent::TouchStart { id, x, y: 0.5 }
    }

    // ── keys & mouse ──────────────────────────────────────────────────────

    #[test]
    fn key_down_then_up_toggles_state() {
        let mut s = InputState::new();
        s.handle_event(&InputEvent::KeyDown { key_code: b'a' as i32 });
        assert!(s.is_key_down(b'a' as i32));

        s.handle_event(&InputEvent::KeyUp { key_code: b'a' as i32 });
        assert!(!s.is_key_down(b'a' as i32));
    }

    #[test]
    fn codes_outside_table_are_not_tracked() {
        let mut s = InputState::new();
        s.handle_event(&InputEvent::KeyDown { key_code: keys::UP });
        s.handle_event(&InputEvent::KeyDown { key_code: -1 });

        assert!(!s.is_key_down(keys::UP));
        assert!(!s.is_key_down(-1));
        assert!(!s.is_key_down(MAX_KEYS as i32));
    }

    #[test]
    fn mouse_position_and_buttons() {
        let mut s = InputState::new();
        s.handle_event(&InputEvent::MouseMove { x: 40, y: 30 });
        s.handle_event(&InputEvent::MouseButtonDown { button: 1, x: 40, y: 30 });
        s.handle_event(&InputEvent::MouseButtonDown { button: 9, x: 40, y: 30 });

        assert_eq!(s.mouse_position(), (40, 30));
        assert!(s.is_mouse_button_down(1));
        assert!(!s.is_mouse_button_down(9));

        s.handle_event(&InputEvent::MouseButtonUp { button: 1, x: 0, y: 0 });
        assert!(!s.is_mouse_button_down(1));
    }

    // ── touch ─────────────────────────────────────────────────────────────

    #[test]
    fn touch_lifecycle_uses_first_free_slot() {
        let mut s = InputState::new();
        s.handle_event(&start(7, 0.1));
        s.handle_event(&start(8, 0.2));
        s.handle_event(&InputEvent::TouchEnd { id: 7, x: 0.0, y: 0.0 });
        assert_eq!(s.touch_count(), 1);
        assert_eq!(s.touch(0), None);

        s.handle_event(&start(9, 0.3));
        assert_eq!(s.touch(0).map(|t| t.id), Some(9));
        assert_eq!(s.touch(1).map(|t| t.id), Some(8));
        assert_eq!(s.touch_count(), 2);
    }

    #[test]
    fn touch_move_updates_matching_point_only() {
        let mut s = InputState::new();
        s.handle_event(&start(1, 0.1));
        s.handle_event(&start(2, 0.2));
        s.handle_event(&InputEvent::TouchMove { id: 2, x: 0.9, y: 0.8 });
        s.handle_event(&InputEvent::TouchMove { id: 99, x: 0.0, y: 0.0 });

        assert_eq!(s.touch(0), Some(TouchPoint { id: 1, x: 0.1, y: 0.5 }));
        assert_eq!(s.touch(1), Some(TouchPoint { id: 2, x: 0.9, y: 0.8 }));
    }

    #[test]
    fn touches_beyond_capacity_are_dropped() {
        let mut s = InputState::new();
        for id in 0..(MAX_TOUCH_POINTS as u64 + 3) {
            s.handle_event(&start(id, 0.0));
        }
        assert_eq!(s.touch_count(), MAX_TOUCH_POINTS);
        assert_eq!(s.touch(MAX_TOUCH_POINTS), None);
    }

    // ── callback ──────────────────────────────────────────────────────────

    #[test]
    fn callback_sees_every_event_including_untracked() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut s = InputState::new();
        let sink = Rc::clone(&seen);
        s.set_callback(move |e| sink.borrow_mut().push(*e));

        let events = [
            InputEvent::KeyDown { key_code: keys::LEFT },
            InputEvent::MouseMove { x: 1, y: 2 },
            InputEvent::TouchEnd { id: 3, x: 0.0, y: 0.0 },
        ];
        for e in &events {
            s.handle_event(e);
        }

        assert_eq!(*seen.borrow(), events);
    }

    #[test]
    fn reset_clears_state_and_callback() {
        let hits = Rc::new(RefCell::new(0));
        let mut s = InputState::new();
        let counter = Rc::clone(&hits);
        s.set_callback(move |_| *counter.borrow_mut() += 1);
        s.handle_event(&InputEvent::KeyDown { key_code: 32 });

        s.reset();
        s.handle_event(&InputEvent::MouseMove { x: 5, y: 5 });

        assert!(!s.is_key_down(32));
        assert_eq!(*hits.borrow(), 1);
    }
}
