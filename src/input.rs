//! Pointer and key input for the fireworks app.
//!
//! A thin abstraction over raw winit window events tracking both
//! instantaneous events (button just clicked this frame) and continuous state
//! (button held, cached cursor position). The cached cursor position, in
//! normalized device coordinates, becomes the origin of the next spawned
//! burst.

use glam::Vec2;
use std::collections::HashSet;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn from_winit(btn: WinitMouseButton) -> Option<Self> {
        match btn {
            WinitMouseButton::Left => Some(MouseButton::Left),
            WinitMouseButton::Right => Some(MouseButton::Right),
            WinitMouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Per-frame input state.
#[derive(Debug, Default)]
pub struct Input {
    /// Cached cursor position in NDC (-1 to 1, +y up), if the cursor has
    /// entered the window.
    cursor_ndc: Option<Vec2>,
    /// Cursor movement since last frame, in physical pixels.
    cursor_delta: Vec2,
    /// Scroll lines since last frame.
    scroll: f32,
    held: HashSet<MouseButton>,
    clicked: HashSet<MouseButton>,
    keys_pressed: HashSet<KeyCode>,
    last_cursor_px: Option<Vec2>,
}

impl Input {
    /// Fresh input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a winit window event. `size` is the current surface size, used to
    /// normalize cursor coordinates.
    pub fn handle_window_event(&mut self, event: &WindowEvent, size: PhysicalSize<u32>) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32), size);
            }
            WindowEvent::CursorLeft { .. } => {
                self.last_cursor_px = None;
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = MouseButton::from_winit(*button) {
                    self.mouse_input(*state, button);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        self.keys_pressed.insert(code);
                    }
                }
            }
            _ => {}
        }
    }

    fn cursor_moved(&mut self, px: Vec2, size: PhysicalSize<u32>) {
        if let Some(last) = self.last_cursor_px {
            self.cursor_delta += px - last;
        }
        self.last_cursor_px = Some(px);
        if size.width > 0 && size.height > 0 {
            self.cursor_ndc = Some(Vec2::new(
                px.x / size.width as f32 * 2.0 - 1.0,
                -(px.y / size.height as f32 * 2.0 - 1.0),
            ));
        }
    }

    fn mouse_input(&mut self, state: ElementState, button: MouseButton) {
        match state {
            ElementState::Pressed => {
                self.held.insert(button);
                self.clicked.insert(button);
            }
            ElementState::Released => {
                self.held.remove(&button);
            }
        }
    }

    /// Clear per-frame state. Call once at the end of each frame.
    pub fn end_frame(&mut self) {
        self.clicked.clear();
        self.keys_pressed.clear();
        self.cursor_delta = Vec2::ZERO;
        self.scroll = 0.0;
    }

    /// Cached cursor position in NDC, if known.
    #[inline]
    pub fn cursor_ndc(&self) -> Option<Vec2> {
        self.cursor_ndc
    }

    /// Cursor movement since last frame, in physical pixels.
    #[inline]
    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    /// Scroll lines since last frame.
    #[inline]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Was `button` pressed this frame?
    pub fn clicked(&self, button: MouseButton) -> bool {
        self.clicked.contains(&button)
    }

    /// Is `button` currently held?
    pub fn held(&self, button: MouseButton) -> bool {
        self.held.contains(&button)
    }

    /// Was `key` pressed this frame?
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }
}
