//! Synthetic LED telemetry: a rainbow that rotates across the layout.

use std::f32::consts::TAU;

use ledview_engine::time::FrameTime;

use crate::config::Layout;

/// Hue revolutions per second.
const SPEED: f32 = 0.2;

/// Outer ring radius in object space (unit height).
const RING_RADIUS: f32 = 0.45;

/// Positions (xyz) and colors (rgba) for one synthetic LED strip.
///
/// Positions are computed once; colors are rewritten in place every frame.
pub struct RainbowPattern {
    layout: Layout,
    width: u32,
    height: u32,
    vertices: Vec<f32>,
    colors: Vec<f32>,
    /// Hue offset per LED in turns.
    offsets: Vec<f32>,
}

impl RainbowPattern {
    pub fn new(layout: Layout, width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let count = width as usize * height as usize;

        let mut vertices = Vec::with_capacity(count * 3);
        let mut offsets = Vec::with_capacity(count);

        for row in 0..height {
            for col in 0..width {
                let (x, y, offset) = match layout {
                    Layout::Panel => {
                        let x = (col as f32 + 0.5) / width as f32 - 0.5;
                        let y = 0.5 - (row as f32 + 0.5) / height as f32;
                        (x, y, col as f32 / width as f32)
                    }
                    Layout::Ring => {
                        let turn = col as f32 / width as f32;
                        let radius = RING_RADIUS * (row + 1) as f32 / height as f32;
                        let (sin, cos) = (turn * TAU).sin_cos();
                        (radius * cos, radius * sin, turn)
                    }
                };
                vertices.extend_from_slice(&[x, y, 0.0]);
                offsets.push(offset);
            }
        }

        let mut pattern = Self {
            layout,
            width,
            height,
            vertices,
            colors: vec![0.0; count * 4],
            offsets,
        };
        pattern.paint(0.0);
        pattern
    }

    /// Grid extent the camera should frame.
    ///
    /// Rings are round, so they are framed as a square.
    pub fn frame_dimensions(&self) -> (u32, u32) {
        match self.layout {
            Layout::Panel => (self.width, self.height),
            Layout::Ring => (1, 1),
        }
    }

    pub fn update(&mut self, time: FrameTime) {
        self.paint(time.elapsed * SPEED);
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    fn paint(&mut self, phase: f32) {
        for (rgba, offset) in self.colors.chunks_exact_mut(4).zip(&self.offsets) {
            let [r, g, b] = hue_to_rgb((phase + offset).rem_euclid(1.0));
            rgba.copy_from_slice(&[r, g, b, 1.0]);
        }
    }
}

/// Fully saturated, full-value HSV to RGB; `hue` in turns.
fn hue_to_rgb(hue: f32) -> [f32; 3] {
    let h = hue.rem_euclid(1.0) * 6.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    match h as u32 {
        0 => [1.0, x, 0.0],
        1 => [x, 1.0, 0.0],
        2 => [0.0, 1.0, x],
        3 => [0.0, x, 1.0],
        4 => [x, 0.0, 1.0],
        _ => [1.0, 0.0, x],
    }
}
