//! Keyboard and pointer state for the interactive window.
//!
//! The `Input` struct sits between raw winit events and the controls,
//! tracking both instantaneous events (key just pressed) and continuous
//! state (pointer held down).
//!
//! Touch is folded into the pointer: a touch start counts as a left press,
//! touch motion moves the pointer, and lifting the finger releases it.
//!
//! ```ignore
//! input.handle_event(&event);
//! // ...once per frame:
//! if input.pointer_pressed() {
//!     engine.burst_at(input.pointer_position());
//! }
//! for key in input.keys_pressed() { /* dispatch */ }
//! input.begin_frame();
//! ```

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Keys the simulation responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Mode selection
    Key1, Key2, Key3, Key4, Key5, Key6,

    // Letters with bindings
    A, C, G, P, R, S, T,

    Up, Down, Space, Escape,

    // Anything else, by winit code
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::Digit1 | WinitKeyCode::Numpad1 => KeyCode::Key1,
            WinitKeyCode::Digit2 | WinitKeyCode::Numpad2 => KeyCode::Key2,
            WinitKeyCode::Digit3 | WinitKeyCode::Numpad3 => KeyCode::Key3,
            WinitKeyCode::Digit4 | WinitKeyCode::Numpad4 => KeyCode::Key4,
            WinitKeyCode::Digit5 | WinitKeyCode::Numpad5 => KeyCode::Key5,
            WinitKeyCode::Digit6 | WinitKeyCode::Numpad6 => KeyCode::Key6,

            WinitKeyCode::KeyA => KeyCode::A,
            WinitKeyCode::KeyC => KeyCode::C,
            WinitKeyCode::KeyG => KeyCode::G,
            WinitKeyCode::KeyP => KeyCode::P,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::KeyS => KeyCode::S,
            WinitKeyCode::KeyT => KeyCode::T,

            WinitKeyCode::ArrowUp => KeyCode::Up,
            WinitKeyCode::ArrowDown => KeyCode::Down,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Escape => KeyCode::Escape,

            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Input state tracking for keyboard and pointer.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    /// Presses in arrival order, without auto-repeat.
    keys_pressed: Vec<KeyCode>,

    pointer_held: bool,
    pointer_pressed: bool,
    pointer_position: Vec2,
    /// Finger currently acting as the pointer.
    touch_id: Option<u64>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Key Queries ==========

    /// Keys that went down this frame.
    pub fn keys_pressed(&self) -> &[KeyCode] {
        &self.keys_pressed
    }

    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    // ========== Pointer Queries ==========

    /// Pointer position in window pixels.
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer_position
    }

    /// Whether the left button or a touch is down.
    pub fn pointer_held(&self) -> bool {
        self.pointer_held
    }

    /// Whether the pointer went down this frame.
    pub fn pointer_pressed(&self) -> bool {
        self.pointer_pressed
    }

    // ========== Event Intake ==========

    /// Clear per-frame state. Call after the frame has read it.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.pointer_pressed = false;
    }

    /// Process a winit window event. Returns the new pointer position when
    /// the event moved the pointer.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<Vec2> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.key_event(KeyCode::from(code), event.state);
                }
                None
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.button_event(*state);
                None
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_position = Vec2::new(position.x as f32, position.y as f32);
                Some(self.pointer_position)
            }

            WindowEvent::Touch(touch) => {
                if self.touch_id.is_some_and(|id| id != touch.id) {
                    return None;
                }
                self.pointer_position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    TouchPhase::Started => {
                        self.touch_id = Some(touch.id);
                        self.button_event(ElementState::Pressed);
                        None
                    }
                    TouchPhase::Moved => Some(self.pointer_position),
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        self.touch_id = None;
                        self.button_event(ElementState::Released);
                        None
                    }
                }
            }

            WindowEvent::Focused(false) => {
                self.keys_held.clear();
                self.pointer_held = false;
                None
            }

            _ => None,
        }
    }

    /// Process an event the UI layer already consumed. Presses stay with the
    /// UI, but releases and motion still land so the pointer never sticks
    /// down after a drag ends over a panel.
    pub fn handle_consumed_event(&mut self, event: &WindowEvent) -> Option<Vec2> {
        match event {
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            }
            | WindowEvent::CursorMoved { .. }
            | WindowEvent::Focused(false) => self.handle_event(event),
            WindowEvent::Touch(touch) if touch.phase != TouchPhase::Started => {
                self.handle_event(event)
            }
            _ => None,
        }
    }

    fn key_event(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // Only fire pressed if not already held (no repeat)
                if self.keys_held.insert(key) {
                    self.keys_pressed.push(key);
                }
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    fn button_event(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.pointer_held {
                    self.pointer_pressed = true;
                }
                self.pointer_held = true;
            }
            ElementState::Released => {
                self.pointer_held = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_without_repeat() {
        let mut input = Input::new();
        input.key_event(KeyCode::Space, ElementState::Pressed);
        input.key_event(KeyCode::Space, ElementState::Pressed);
        assert_eq!(input.keys_pressed(), &[KeyCode::Space]);
        assert!(input.key_held(KeyCode::Space));

        // After begin_frame, pressed is cleared but held remains
        input.begin_frame();
        assert!(input.key_held(KeyCode::Space));
        assert!(!input.key_pressed(KeyCode::Space));

        input.key_event(KeyCode::Space, ElementState::Released);
        input.key_event(KeyCode::Space, ElementState::Pressed);
        assert!(input.key_pressed(KeyCode::Space));
    }

    #[test]
    fn test_pointer_press_and_hold() {
        let mut input = Input::new();
        input.button_event(ElementState::Pressed);
        assert!(input.pointer_pressed());
        assert!(input.pointer_held());

        input.begin_frame();
        assert!(!input.pointer_pressed());
        assert!(input.pointer_held());

        input.button_event(ElementState::Released);
        assert!(!input.pointer_held());
    }

    fn left_button(state: ElementState) -> WindowEvent {
        WindowEvent::MouseInput {
            // SAFETY: only compared, never handed back to winit
            device_id: unsafe { winit::event::DeviceId::dummy() },
            state,
            button: MouseButton::Left,
        }
    }

    #[test]
    fn test_release_over_ui_still_lifts_pointer() {
        let mut input = Input::new();
        input.handle_event(&left_button(ElementState::Pressed));
        input.begin_frame();

        input.handle_consumed_event(&left_button(ElementState::Released));
        assert!(!input.pointer_held());

        // A press the UI keeps is not a canvas press
        input.handle_consumed_event(&left_button(ElementState::Pressed));
        assert!(!input.pointer_held());
        assert!(!input.pointer_pressed());

        input.handle_event(&left_button(ElementState::Pressed));
        assert!(input.pointer_pressed());
        assert!(input.pointer_held());
    }

    #[test]
    fn test_keys_keep_arrival_order() {
        let mut input = Input::new();
        input.key_event(KeyCode::Key3, ElementState::Pressed);
        input.key_event(KeyCode::R, ElementState::Pressed);
        assert_eq!(input.keys_pressed(), &[KeyCode::Key3, KeyCode::R]);
    }

    #[test]
    fn test_winit_key_mapping() {
        assert_eq!(KeyCode::from(WinitKeyCode::Digit4), KeyCode::Key4);
        assert_eq!(KeyCode::from(WinitKeyCode::Numpad6), KeyCode::Key6);
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowUp), KeyCode::Up);
        assert!(matches!(KeyCode::from(WinitKeyCode::KeyZ), KeyCode::Other(_)));
    }
}
