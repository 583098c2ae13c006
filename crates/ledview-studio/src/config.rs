use std::str::FromStr;

use anyhow::{bail, Context, Result};
use winit::dpi::LogicalSize;

use ledview_engine::device::GpuInit;
use ledview_engine::SceneConfig;

/// Environment variable holding the matrix size, e.g. `32x8`.
pub const MATRIX_VAR: &str = "LEDVIEW_MATRIX";

/// Environment variable selecting the LED layout (`panel` or `ring`).
pub const LAYOUT_VAR: &str = "LEDVIEW_LAYOUT";

/// Physical arrangement of the synthetic LEDs.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Layout {
    /// Row-major rectangular panel.
    #[default]
    Panel,
    /// Concentric rings; the matrix height is the ring count.
    Ring,
}

impl FromStr for Layout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "panel" => Ok(Self::Panel),
            "ring" => Ok(Self::Ring),
            other => bail!("unknown layout `{other}` (expected `panel` or `ring`)"),
        }
    }
}

/// Studio window and telemetry configuration.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub matrix_width: u32,
    pub matrix_height: u32,
    pub layout: Layout,
    pub gpu: GpuInit,
    pub scene: SceneConfig,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "ledview".to_string(),
            initial_size: LogicalSize::new(960.0, 540.0),
            matrix_width: 32,
            matrix_height: 8,
            layout: Layout::Panel,
            gpu: GpuInit::default(),
            scene: SceneConfig::default(),
        }
    }
}

impl StudioConfig {
    /// Defaults overridden by `LEDVIEW_MATRIX` and `LEDVIEW_LAYOUT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(MATRIX_VAR) {
            let (w, h) = parse_matrix(&raw).with_context(|| format!("invalid {MATRIX_VAR}"))?;
            config.matrix_width = w;
            config.matrix_height = h;
        }

        if let Some(raw) = lookup(LAYOUT_VAR) {
            config.layout = raw.parse().with_context(|| format!("invalid {LAYOUT_VAR}"))?;
        }

        Ok(config)
    }

    pub fn led_count(&self) -> usize {
        self.matrix_width as usize * self.matrix_height as usize
    }
}

/// Parses `WIDTHxHEIGHT`; both sides must be positive.
fn parse_matrix(raw: &str) -> Result<(u32, u32)> {
    let (w, h) = raw
        .trim()
        .split_once(['x', 'X'])
        .with_context(|| format!("expected WIDTHxHEIGHT, got `{raw}`"))?;

    let w: u32 = w.trim().parse().with_context(|| format!("bad width `{w}`"))?;
    let h: u32 = h.trim().parse().with_context(|| format!("bad height `{h}`"))?;
    if w == 0 || h == 0 {
        bail!("matrix size must be non-zero, got {w}x{h}");
    }
    Ok((w, h))
}
