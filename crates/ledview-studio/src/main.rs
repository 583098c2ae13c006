//! Desktop LED matrix monitor.
//!
//! Opens a window and streams synthetic telemetry into the engine's scene.
//! `LEDVIEW_MATRIX` (e.g. `32x8`) and `LEDVIEW_LAYOUT` (`panel` | `ring`)
//! pick the simulated hardware. Left-drag orbits, the wheel zooms and `R`
//! returns to the fitted view.

mod config;
mod input;
mod pattern;
mod runtime;

use anyhow::Result;
use ledview_engine::logging::{init_logging, LoggingConfig};

use config::StudioConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = StudioConfig::from_env()?;
    runtime::run(config)
}
