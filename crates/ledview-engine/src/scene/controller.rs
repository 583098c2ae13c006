use glam::Mat4;

use crate::buffer::{BufferStore, ContractViolation, PointBatch};
use crate::camera::{CameraFit, FrameCamera, MatrixDimensions, Orbit};
use crate::coords::Viewport;
use crate::device::FrameOutcome;
use crate::render::{DrawSurface, FrameUniform, PointPass, RenderContext};
use crate::shader::{build_program, ShaderProgram};

use super::{SceneConfig, SceneError};

/// Observable lifecycle state of a [`Scene`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SceneStatus {
    /// `create_scene` has not succeeded yet.
    Uninitialized,
    /// GPU resources exist; frames are drawn.
    Ready,
    /// No GPU context (unsupported or lost); every call is a no-op.
    Degraded,
    /// `dispose` was called; every call is a no-op until `create_scene`.
    Disposed,
}

/// Counters for diagnostics and tests.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SceneStats {
    pub frames_presented: u64,
    pub frames_skipped: u64,
    pub matrix_recomputes: u64,
    /// Points in the last presented frame.
    pub last_point_count: u32,
}

/// Everything created from one context acquisition.
///
/// Field order is drop order: device objects go before the context.
struct GpuResources<C: RenderContext> {
    pipeline: C::Pipeline,
    buffers: BufferStore<C>,
    program: ShaderProgram,
    ctx: C,
}

enum SceneState<C: RenderContext> {
    Uninitialized,
    Ready(GpuResources<C>),
    Degraded,
    Disposed,
}

#[derive(Debug, Default)]
struct Warned {
    unsupported: bool,
    lost: bool,
    violation: bool,
}

/// Owns the GPU resources for one LED monitor view and drives its frames.
///
/// Single-threaded: every method runs on the UI/event-loop thread and none of
/// them block beyond context acquisition in [`create_scene`](Self::create_scene).
pub struct Scene<C: RenderContext> {
    config: SceneConfig,
    state: SceneState<C>,
    camera: FrameCamera,
    /// Latest resize not yet applied; consumed by the next drawn frame.
    pending_resize: Option<(u32, u32)>,
    stats: SceneStats,
    last_violation: Option<ContractViolation>,
    warned: Warned,
}

impl<C: RenderContext> Scene<C> {
    pub fn new(config: SceneConfig) -> Self {
        let camera = FrameCamera::new(config.camera);
        Self {
            config,
            state: SceneState::Uninitialized,
            camera,
            pending_resize: None,
            stats: SceneStats::default(),
            last_violation: None,
            warned: Warned::default(),
        }
    }

    /// Acquires a context from `surface` and builds the program and buffers.
    ///
    /// Any previous resources are released first. A surface without GPU
    /// support leaves the scene [`Degraded`](SceneStatus::Degraded) and still
    /// returns `Ok`; only shader build failures are errors.
    pub fn create_scene<S>(&mut self, surface: &S) -> Result<(), SceneError>
    where
        S: DrawSurface<Context = C>,
    {
        self.state = SceneState::Uninitialized;
        self.pending_resize = None;

        let (width, height) = surface.pixel_size();
        self.camera.set_canvas(Viewport::from_pixels(width, height));

        let mut ctx = match surface.acquire_context() {
            Ok(ctx) => ctx,
            Err(err) => {
                if !std::mem::replace(&mut self.warned.unsupported, true) {
                    log::warn!("{err}; LED monitor will not draw");
                } else {
                    log::debug!("{err}");
                }
                self.state = SceneState::Degraded;
                return Ok(());
            }
        };

        let program = build_program(&self.config.shaders.vertex, &self.config.shaders.fragment)
            .inspect_err(|e| log::error!("{e}"))?;
        let pipeline = ctx
            .create_point_pipeline(&program)
            .inspect_err(|e| log::error!("{e}"))?;
        let buffers = BufferStore::new(&mut ctx, self.config.rgb_alpha);

        let (width, height) = ctx.drawable_size();
        self.camera.set_canvas(Viewport::from_pixels(width, height));

        log::info!("LED scene ready ({width}x{height})");
        self.warned.lost = false;
        self.state = SceneState::Ready(GpuResources {
            pipeline,
            buffers,
            program,
            ctx,
        });
        Ok(())
    }

    /// Sets the logical grid extent used to frame the matrix.
    ///
    /// Accepted while `Ready` and also while `Degraded`, so a later
    /// `create_scene` frames the current matrix. Ignored before
    /// `create_scene` and after `dispose`.
    pub fn set_matrix_dimensions(&mut self, width: u32, height: u32) {
        if !self.is_live() {
            log::trace!("set_matrix_dimensions ignored in {:?}", self.status());
            return;
        }
        self.camera.set_dimensions(MatrixDimensions::new(width, height));
    }

    /// Rotates the view around the matrix center by a pointer drag of
    /// `dx`, `dy` pixels. Takes effect on the next drawn frame.
    pub fn orbit_by(&mut self, dx: f32, dy: f32) {
        let orbit = self.camera.orbit().dragged(dx, dy);
        self.set_orbit(orbit);
    }

    /// Dollies toward (positive `steps`) or away from the matrix center.
    pub fn zoom_by(&mut self, steps: f32) {
        let orbit = self.camera.orbit().zoomed(steps);
        self.set_orbit(orbit);
    }

    /// Returns to the auto-fitted view.
    pub fn reset_view(&mut self) {
        self.set_orbit(Orbit::default());
    }

    /// Replaces the user orbit. Same lifecycle rules as
    /// [`set_matrix_dimensions`](Self::set_matrix_dimensions).
    pub fn set_orbit(&mut self, orbit: Orbit) {
        if !self.is_live() {
            return;
        }
        self.camera.set_orbit(orbit);
    }

    pub fn orbit(&self) -> Orbit {
        self.camera.orbit()
    }

    /// Uploads one frame of LED data and draws it.
    ///
    /// `vertices` holds xyz triples; `colors` holds RGB or RGBA tuples in
    /// `[0, 1]`, index-aligned with the vertices. Mismatched lengths are
    /// clamped to the shorter sequence and reported once.
    pub fn update_scene(&mut self, vertices: &[f32], colors: &[f32]) {
        if !matches!(self.state, SceneState::Ready(_)) {
            return;
        }

        let (batch, violation) =
            PointBatch::new(vertices, colors, self.config.fallback_color_format);
        if let Some(violation) = violation {
            self.report_violation(violation);
        }

        if let SceneState::Ready(res) = &mut self.state {
            res.buffers.upload(&mut res.ctx, &batch);
        }
        self.present();
    }

    /// Draws the last uploaded frame again, e.g. after a resize with no new
    /// telemetry.
    pub fn redraw(&mut self) {
        self.present();
    }

    /// Records a new drawable size; it is applied by the next drawn frame so
    /// that bursts of resize events cost a single camera recompute.
    ///
    /// Accepted while `Ready` or `Degraded`; in `Degraded` nothing is drawn
    /// and the next `create_scene` reads the surface size afresh.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring zero-sized resize {width}x{height}");
            return;
        }
        if !self.is_live() {
            return;
        }
        self.pending_resize = Some((width, height));
    }

    /// Releases the program and buffers. Every later call is a no-op until
    /// the next `create_scene`.
    pub fn dispose(&mut self) {
        if matches!(self.state, SceneState::Disposed) {
            return;
        }
        self.state = SceneState::Disposed;
        self.pending_resize = None;
        log::debug!("LED scene disposed");
    }

    pub fn status(&self) -> SceneStatus {
        match self.state {
            SceneState::Uninitialized => SceneStatus::Uninitialized,
            SceneState::Ready(_) => SceneStatus::Ready,
            SceneState::Degraded => SceneStatus::Degraded,
            SceneState::Disposed => SceneStatus::Disposed,
        }
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats {
            matrix_recomputes: self.camera.recomputes(),
            ..self.stats
        }
    }

    /// Camera fit used by the last drawn frame, if still valid.
    pub fn camera_fit(&self) -> Option<&CameraFit> {
        self.camera.cached()
    }

    /// Transform applied to incoming positions, including the position-space
    /// mapping. `None` until a frame has been drawn or after invalidation.
    pub fn frame_matrix(&self) -> Option<Mat4> {
        let dims = self.camera.dimensions();
        self.camera
            .cached()
            .map(|fit| fit.frame_matrix * self.config.position_space.to_object(dims))
    }

    pub fn matrix_dimensions(&self) -> MatrixDimensions {
        self.camera.dimensions()
    }

    /// Linked program, while ready.
    pub fn program(&self) -> Option<&ShaderProgram> {
        match &self.state {
            SceneState::Ready(res) => Some(&res.program),
            _ => None,
        }
    }

    /// Most recent caller contract violation, if any.
    pub fn last_violation(&self) -> Option<&ContractViolation> {
        self.last_violation.as_ref()
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn is_live(&self) -> bool {
        matches!(self.state, SceneState::Ready(_) | SceneState::Degraded)
    }

    fn report_violation(&mut self, violation: ContractViolation) {
        if !std::mem::replace(&mut self.warned.violation, true) {
            log::warn!("LED frame contract violation: {violation}");
        } else {
            log::trace!("LED frame contract violation: {violation}");
        }
        self.last_violation = Some(violation);
    }

    fn present(&mut self) {
        let SceneState::Ready(res) = &mut self.state else { return };

        if let Some((width, height)) = self.pending_resize.take() {
            res.ctx.resize(width, height);
            self.camera.set_canvas(Viewport::from_pixels(width, height));
        }

        let dims = self.camera.dimensions();
        let mvp = self.camera.fit().frame_matrix * self.config.position_space.to_object(dims);
        let uniform = FrameUniform::new(mvp, self.camera.canvas(), self.config.point_size);
        let point_count = res.buffers.point_count();

        let outcome = res.ctx.draw_points(PointPass {
            pipeline: &res.pipeline,
            positions: res.buffers.positions(),
            colors: res.buffers.colors(),
            uniform: Some(uniform),
            point_count,
            clear: self.config.clear_color,
        });

        match outcome {
            FrameOutcome::Presented => {
                self.stats.frames_presented += 1;
                self.stats.last_point_count = point_count;
            }
            FrameOutcome::Skipped => self.stats.frames_skipped += 1,
            FrameOutcome::Lost => {
                if !std::mem::replace(&mut self.warned.lost, true) {
                    log::warn!("GPU context lost; LED monitor stops drawing");
                }
                self.state = SceneState::Degraded;
            }
        }
    }
}

impl<C: RenderContext> Default for Scene<C> {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}
