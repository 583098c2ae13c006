use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use ledview_engine::device::{Gpu, WindowSurface};
use ledview_engine::render::RenderContext;
use ledview_engine::time::FrameClock;
use ledview_engine::{Scene, SceneError, SceneStatus};

use crate::config::StudioConfig;
use crate::input::{OrbitInput, ViewCommand};
use crate::pattern::RainbowPattern;

/// Frames between periodic stats lines at debug level.
const STATS_INTERVAL: u64 = 600;

/// Opens the monitor window and runs the event loop until it closes.
pub fn run(config: StudioConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut state = StudioState::new(config);

    event_loop
        .run_app(&mut state)
        .context("winit event loop terminated with error")?;

    Ok(())
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,
    pattern: RainbowPattern,

    window: Window,

    #[borrows(window)]
    #[not_covariant]
    scene: Scene<Gpu<'this>>,
}

struct StudioState {
    config: StudioConfig,
    input: OrbitInput,
    entry: Option<WindowEntry>,
}

impl StudioState {
    fn new(config: StudioConfig) -> Self {
        Self {
            config,
            input: OrbitInput::default(),
            entry: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowId> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_transparent(true);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        let id = window.id();

        let pattern = RainbowPattern::new(
            self.config.layout,
            self.config.matrix_width,
            self.config.matrix_height,
        );
        let dims = pattern.frame_dimensions();
        let config = &self.config;

        let entry = WindowEntryTryBuilder {
            clock: FrameClock::default(),
            pattern,
            window,
            scene_builder: |window| build_scene(window, config, dims),
        }
        .try_build()
        .context("failed to initialize LED scene")?;

        self.entry = Some(entry);
        Ok(id)
    }

    fn destroy_window_entry(&mut self) {
        if let Some(mut entry) = self.entry.take() {
            entry.with_scene_mut(|scene| scene.dispose());
        }
    }
}

fn apply_view<C: RenderContext>(scene: &mut Scene<C>, command: ViewCommand) {
    match command {
        ViewCommand::Orbit { dx, dy } => scene.orbit_by(dx, dy),
        ViewCommand::Zoom(steps) => scene.zoom_by(steps),
        ViewCommand::Reset => scene.reset_view(),
    }
}

fn build_scene<'w>(
    window: &'w Window,
    config: &StudioConfig,
    (width, height): (u32, u32),
) -> Result<Scene<Gpu<'w>>, SceneError> {
    let mut scene = Scene::new(config.scene.clone());
    scene.create_scene(&WindowSurface::new(window, config.gpu.clone()))?;
    scene.set_matrix_dimensions(width, height);
    Ok(scene)
}

impl ApplicationHandler for StudioState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(_) => {
                log::info!(
                    "monitoring {}x{} {:?} matrix",
                    self.config.matrix_width,
                    self.config.matrix_height,
                    self.config.layout
                );
            }
            Err(e) => {
                log::error!("failed to create monitor window: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Telemetry is continuous, so redraw continuously while drawing works.
        if let Some(entry) = &self.entry {
            if entry.with_scene(|scene| scene.status()) == SceneStatus::Ready {
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(command) = self.input.translate(&event) {
            if let Some(entry) = &mut self.entry {
                entry.with_scene_mut(|scene| apply_view(scene, command));
                entry.with_window(|w| w.request_redraw());
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                self.destroy_window_entry();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(entry) = &mut self.entry {
                    entry.with_scene_mut(|scene| scene.resize(size.width, size.height));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = &mut self.entry {
                    let size = entry.with_window(|w| w.inner_size());
                    entry.with_scene_mut(|scene| scene.resize(size.width, size.height));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(entry) = &mut self.entry else { return };

                entry.with_mut(|fields| {
                    let ft = fields.clock.tick();
                    fields.pattern.update(ft);
                    fields
                        .scene
                        .update_scene(fields.pattern.vertices(), fields.pattern.colors());

                    if ft.frame_index % STATS_INTERVAL == 0 {
                        log::debug!("{:?}", fields.scene.stats());
                    }
                });
            }

            _ => {}
        }
    }
}
