use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Wheel steps per pixel of a pixel-precise (touchpad) scroll.
const STEPS_PER_PIXEL: f32 = 0.05;

/// What a window event asks of the monitor view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewCommand {
    /// Pointer drag in physical pixels.
    Orbit { dx: f32, dy: f32 },
    /// Wheel steps; positive moves closer.
    Zoom(f32),
    /// Back to the auto-fitted view.
    Reset,
}

/// Left-drag orbits, the wheel zooms, `R` resets.
///
/// Tracks only what the orbit needs: whether the left button is held and the
/// last pointer position.
#[derive(Debug, Default)]
pub struct OrbitInput {
    dragging: bool,
    pointer_pos: Option<(f32, f32)>,
}

impl OrbitInput {
    pub fn translate(&mut self, event: &WindowEvent) -> Option<ViewCommand> {
        match event {
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.button(*state == ElementState::Pressed);
                None
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.moved(position.x as f32, position.y as f32)
            }

            WindowEvent::CursorLeft { .. } => {
                self.pointer_pos = None;
                None
            }

            WindowEvent::Focused(false) => {
                // Avoid a stuck drag when focus changes mid-press.
                self.dragging = false;
                None
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 * STEPS_PER_PIXEL,
                };
                (steps != 0.0).then_some(ViewCommand::Zoom(steps))
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && !event.repeat
                    && event.physical_key == PhysicalKey::Code(KeyCode::KeyR) =>
            {
                Some(ViewCommand::Reset)
            }

            _ => None,
        }
    }

    fn button(&mut self, pressed: bool) {
        self.dragging = pressed;
    }

    fn moved(&mut self, x: f32, y: f32) -> Option<ViewCommand> {
        let previous = self.pointer_pos.replace((x, y));
        if !self.dragging {
            return None;
        }
        let (px, py) = previous?;
        let (dx, dy) = (x - px, y - py);
        (dx != 0.0 || dy != 0.0).then_some(ViewCommand::Orbit { dx, dy })
    }
}
