use glam::{Mat4, Vec3};

use crate::coords::Viewport;

use super::Orbit;

/// Camera tuning.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,

    /// Multiplier applied to the fitted distance, leaving a margin around the
    /// matrix. Values below 1 clip the edges.
    pub padding: f32,

    /// Near plane as a fraction of the camera distance.
    pub near_ratio: f32,

    /// Far plane as a multiple of the camera distance.
    pub far_ratio: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 30.0,
            padding: 2.5,
            near_ratio: 0.01,
            far_ratio: 10.0,
        }
    }
}

/// Logical LED grid extent, used only for its aspect ratio.
///
/// Both sides are clamped to at least 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MatrixDimensions {
    width: u32,
    height: u32,
}

impl MatrixDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }

    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for MatrixDimensions {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Result of fitting the camera to a matrix on a canvas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraFit {
    /// Distance at which the unit-height object fills the vertical FOV.
    pub distance_for_height: f32,
    /// Distance at which the object's width fills the horizontal FOV.
    pub distance_for_width: f32,
    /// `max(distance_for_height, distance_for_width) * padding`.
    pub distance: f32,
    /// Camera position; `(0, 0, distance)` unless orbited.
    pub eye: Vec3,
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
    /// `projection * view * model`.
    pub frame_matrix: Mat4,
}

impl CameraFit {
    /// Projection × view, i.e. the transform for points already in object
    /// space (width = matrix aspect, height = 1).
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Frames a `matrix_aspect × 1` rectangle centered on the origin so it is
/// fully visible on a canvas of the given size.
///
/// The vertical FOV is fixed; the horizontal FOV follows the canvas aspect.
/// The camera backs off until both the height and the width fit, then by
/// `padding` more.
pub fn solve(config: &CameraConfig, canvas: Viewport, dims: MatrixDimensions) -> CameraFit {
    solve_with_orbit(config, canvas, dims, Orbit::default())
}

/// [`solve`], then rotates and dollies the eye around the origin by `orbit`.
///
/// The fitted distances are unaffected; only `eye`, `view` and the clip
/// planes follow the orbit.
pub fn solve_with_orbit(
    config: &CameraConfig,
    canvas: Viewport,
    dims: MatrixDimensions,
    orbit: Orbit,
) -> CameraFit {
    let canvas_aspect = canvas.aspect();
    let matrix_aspect = dims.aspect();

    let (object_width, object_height) = (matrix_aspect, 1.0f32);

    let fov_y = config.fov_y_degrees.clamp(1.0, 179.0).to_radians();
    let half_tan_y = (fov_y * 0.5).tan();

    let distance_for_height = object_height / (2.0 * half_tan_y);

    let fov_x = 2.0 * (half_tan_y * canvas_aspect).atan();
    let distance_for_width = object_width / (2.0 * (fov_x * 0.5).tan());

    let distance = distance_for_height.max(distance_for_width) * config.padding.max(f32::EPSILON);

    let eye = orbit.eye(distance);
    let eye_distance = eye.length();

    let near = (eye_distance * config.near_ratio).max(f32::EPSILON);
    let far = (eye_distance * config.far_ratio).max(near * 2.0);

    let projection = Mat4::perspective_rh(fov_y, canvas_aspect, near, far);
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, orbit.up());
    let model = Mat4::from_scale(Vec3::new(matrix_aspect, 1.0, 1.0));

    CameraFit {
        distance_for_height,
        distance_for_width,
        distance,
        eye,
        projection,
        view,
        model,
        frame_matrix: projection * view * model,
    }
}

/// Caches a [`CameraFit`] and recomputes it only after an input changed.
#[derive(Debug, Clone)]
pub struct FrameCamera {
    config: CameraConfig,
    canvas: Viewport,
    dims: MatrixDimensions,
    orbit: Orbit,
    cached: Option<CameraFit>,
    recomputes: u64,
}

impl FrameCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            canvas: Viewport::new(1.0, 1.0),
            dims: MatrixDimensions::default(),
            orbit: Orbit::default(),
            cached: None,
            recomputes: 0,
        }
    }

    pub fn canvas(&self) -> Viewport {
        self.canvas
    }

    pub fn dimensions(&self) -> MatrixDimensions {
        self.dims
    }

    pub fn orbit(&self) -> Orbit {
        self.orbit
    }

    /// Number of times the fit has been solved.
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }

    pub fn is_dirty(&self) -> bool {
        self.cached.is_none()
    }

    pub fn set_canvas(&mut self, canvas: Viewport) {
        if canvas != self.canvas {
            self.canvas = canvas;
            self.invalidate();
        }
    }

    pub fn set_dimensions(&mut self, dims: MatrixDimensions) {
        if dims != self.dims {
            self.dims = dims;
            self.invalidate();
        }
    }

    pub fn set_orbit(&mut self, orbit: Orbit) {
        if orbit != self.orbit {
            self.orbit = orbit;
            self.invalidate();
        }
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Returns the current fit, solving it first if invalidated.
    pub fn fit(&mut self) -> &CameraFit {
        let (config, canvas, dims, orbit) = (&self.config, self.canvas, self.dims, self.orbit);
        let recomputes = &mut self.recomputes;
        self.cached.get_or_insert_with(|| {
            *recomputes += 1;
            log::trace!(
                "camera fit for {}x{} matrix on {}x{} canvas",
                dims.width(),
                dims.height(),
                canvas.width,
                canvas.height
            );
            solve_with_orbit(config, canvas, dims, orbit)
        })
    }

    /// Last solved fit, without recomputing.
    pub fn cached(&self) -> Option<&CameraFit> {
        self.cached.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const EPS: f32 = 1e-4;

    fn fit(mw: u32, mh: u32, cw: f32, ch: f32) -> CameraFit {
        solve(
            &CameraConfig::default(),
            Viewport::new(cw, ch),
            MatrixDimensions::new(mw, mh),
        )
    }

    fn ndc(m: Mat4, x: f32, y: f32) -> (f32, f32) {
        let clip = m * Vec4::new(x, y, 0.0, 1.0);
        (clip.x / clip.w, clip.y / clip.w)
    }

    // ── distance ──────────────────────────────────────────────────────────

    #[test]
    fn distance_is_finite_and_positive() {
        let sizes = [1u32, 2, 7, 16, 100, 4096];
        let canvases = [(1.0, 1.0), (1920.0, 1080.0), (300.0, 2000.0), (5000.0, 3.0)];
        for &w in &sizes {
            for &h in &sizes {
                for &(cw, ch) in &canvases {
                    let d = fit(w, h, cw, ch).distance;
                    assert!(d.is_finite() && d > 0.0, "{w}x{h} on {cw}x{ch}: {d}");
                }
            }
        }
    }

    #[test]
    fn distance_never_decreases_as_matrix_widens() {
        let mut previous = 0.0;
        for w in 1..=64 {
            let d = fit(w, 8, 800.0, 600.0).distance;
            assert!(d >= previous - EPS, "width {w}: {d} < {previous}");
            previous = d;
        }
    }

    #[test]
    fn distance_never_increases_as_matrix_grows_taller() {
        let mut previous = f32::INFINITY;
        for h in 1..=64 {
            let d = fit(8, h, 800.0, 600.0).distance;
            assert!(d <= previous + EPS, "height {h}: {d} > {previous}");
            previous = d;
        }
        // Once height-bound, the unit-height object no longer moves the camera.
        let square = fit(8, 8, 800.0, 600.0).distance;
        let tall = fit(8, 64, 800.0, 600.0).distance;
        assert!((square - tall).abs() < EPS);
        assert!(fit(8, 1, 800.0, 600.0).distance > square);
    }

    #[test]
    fn wide_matrix_is_width_bound() {
        let f = fit(64, 4, 800.0, 600.0);
        assert!(f.distance_for_width > f.distance_for_height);
        assert!((f.distance - f.distance_for_width * 2.5).abs() < EPS * f.distance);
    }

    #[test]
    fn tall_matrix_is_height_bound() {
        let f = fit(4, 64, 800.0, 600.0);
        assert!(f.distance_for_height > f.distance_for_width);
        assert!((f.distance - f.distance_for_height * 2.5).abs() < EPS);
    }

    #[test]
    fn zero_dimensions_are_clamped() {
        let dims = MatrixDimensions::new(0, 0);
        assert_eq!((dims.width(), dims.height()), (1, 1));
        let f = solve(&CameraConfig::default(), Viewport::new(0.0, 0.0), dims);
        assert!(f.distance.is_finite());
        assert!(f.frame_matrix.is_finite());
    }

    // ── square case ───────────────────────────────────────────────────────

    #[test]
    fn square_matrix_on_square_canvas_is_balanced() {
        let f = fit(16, 16, 500.0, 500.0);
        assert!((f.distance_for_height - f.distance_for_width).abs() < EPS);
        assert!(f.model.abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn model_scales_width_by_matrix_aspect() {
        let f = fit(32, 8, 500.0, 500.0);
        let scaled = f.model.transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert!(scaled.abs_diff_eq(Vec3::new(4.0, 1.0, 1.0), EPS));
    }

    // ── framing ───────────────────────────────────────────────────────────

    const FRAMING_CASES: [(u32, u32, f32, f32); 6] = [
        (16, 16, 800.0, 600.0),
        (32, 8, 800.0, 600.0),
        (256, 1, 800.0, 600.0),
        (1, 256, 800.0, 600.0),
        (32, 8, 300.0, 1200.0),
        (8, 32, 2400.0, 200.0),
    ];

    // Incoming positions are normalized to [-0.5, 0.5] on both axes; the
    // model matrix is what stretches x to the matrix aspect.
    #[test]
    fn normalized_corners_through_frame_matrix_stay_inside_ndc() {
        for (mw, mh, cw, ch) in FRAMING_CASES {
            let f = fit(mw, mh, cw, ch);
            for (x, y) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
                let (nx, ny) = ndc(f.frame_matrix, x, y);
                assert!(nx.abs() <= 1.0 && ny.abs() <= 1.0, "{mw}x{mh} on {cw}x{ch}: ({nx}, {ny})");
            }
        }
    }

    #[test]
    fn stretched_corners_through_view_projection_stay_inside_ndc() {
        for (mw, mh, cw, ch) in FRAMING_CASES {
            let f = fit(mw, mh, cw, ch);
            let half_w = MatrixDimensions::new(mw, mh).aspect() / 2.0;
            for (x, y) in [(-half_w, -0.5), (half_w, -0.5), (half_w, 0.5), (-half_w, 0.5)] {
                let (nx, ny) = ndc(f.view_projection(), x, y);
                assert!(nx.abs() <= 1.0 && ny.abs() <= 1.0, "{mw}x{mh} on {cw}x{ch}: ({nx}, {ny})");
            }
        }
    }

    #[test]
    fn normalized_corner_and_stretched_corner_coincide() {
        let f = fit(32, 8, 800.0, 600.0);
        let (ax, ay) = ndc(f.frame_matrix, -0.5, -0.5);
        let (bx, by) = ndc(f.view_projection(), -2.0, -0.5);
        assert!((ax - bx).abs() < EPS && (ay - by).abs() < EPS);
    }

    #[test]
    fn padding_leaves_a_margin() {
        let f = fit(16, 16, 600.0, 600.0);
        let (_, ny) = ndc(f.view_projection(), 0.0, 0.5);
        // Without padding the top edge would sit exactly at 1.0.
        assert!((ny - 1.0 / 2.5).abs() < 1e-3);
    }

    #[test]
    fn origin_projects_to_center() {
        let f = fit(10, 3, 640.0, 480.0);
        let (nx, ny) = ndc(f.frame_matrix, 0.0, 0.0);
        assert!(nx.abs() < EPS && ny.abs() < EPS);
    }

    // ── orbit ─────────────────────────────────────────────────────────────

    #[test]
    fn default_orbit_matches_the_plain_fit() {
        let cfg = CameraConfig::default();
        let (canvas, dims) = (Viewport::new(800.0, 600.0), MatrixDimensions::new(32, 8));
        let plain = solve(&cfg, canvas, dims);
        assert_eq!(solve_with_orbit(&cfg, canvas, dims, Orbit::default()), plain);
        assert!(plain.eye.abs_diff_eq(Vec3::new(0.0, 0.0, plain.distance), EPS));
    }

    #[test]
    fn orbit_moves_the_eye_but_keeps_the_fit() {
        let cfg = CameraConfig::default();
        let (canvas, dims) = (Viewport::new(800.0, 600.0), MatrixDimensions::new(16, 16));
        let plain = solve(&cfg, canvas, dims);
        let orbited = solve_with_orbit(&cfg, canvas, dims, Orbit::default().dragged(200.0, 100.0));

        assert_eq!(orbited.distance, plain.distance);
        assert!((orbited.eye.length() - plain.distance).abs() < EPS * plain.distance);
        assert!(!orbited.eye.abs_diff_eq(plain.eye, EPS));
        // The matrix center stays on screen center.
        let (nx, ny) = ndc(orbited.frame_matrix, 0.0, 0.0);
        assert!(nx.abs() < EPS && ny.abs() < EPS);
    }

    #[test]
    fn zooming_in_enlarges_the_matrix() {
        let cfg = CameraConfig::default();
        let (canvas, dims) = (Viewport::new(600.0, 600.0), MatrixDimensions::new(16, 16));
        let plain = solve(&cfg, canvas, dims);
        let closer = solve_with_orbit(&cfg, canvas, dims, Orbit::default().zoomed(3.0));

        let (_, plain_top) = ndc(plain.frame_matrix, 0.0, 0.5);
        let (_, closer_top) = ndc(closer.frame_matrix, 0.0, 0.5);
        assert!(closer_top > plain_top);
    }

    // ── FrameCamera cache ─────────────────────────────────────────────────

    #[test]
    fn fit_is_cached_until_inputs_change() {
        let mut cam = FrameCamera::new(CameraConfig::default());
        cam.fit();
        cam.fit();
        assert_eq!(cam.recomputes(), 1);

        cam.set_canvas(Viewport::new(800.0, 600.0));
        cam.fit();
        cam.fit();
        assert_eq!(cam.recomputes(), 2);

        cam.set_dimensions(MatrixDimensions::new(16, 8));
        assert!(cam.is_dirty());
        cam.fit();
        assert_eq!(cam.recomputes(), 3);
    }

    #[test]
    fn orbit_change_invalidates_once() {
        let mut cam = FrameCamera::new(CameraConfig::default());
        cam.fit();
        let orbit = Orbit::default().dragged(10.0, 0.0);
        cam.set_orbit(orbit);
        cam.set_orbit(orbit);
        assert!(cam.is_dirty());
        cam.fit();
        assert_eq!(cam.recomputes(), 2);
        assert_eq!(cam.orbit(), orbit);

        cam.set_orbit(Orbit::default());
        assert!(cam.is_dirty());
    }

    #[test]
    fn unchanged_inputs_do_not_invalidate() {
        let mut cam = FrameCamera::new(CameraConfig::default());
        cam.set_canvas(Viewport::new(800.0, 600.0));
        cam.fit();
        cam.set_canvas(Viewport::new(800.0, 600.0));
        cam.set_dimensions(MatrixDimensions::default());
        assert!(!cam.is_dirty());
        assert_eq!(cam.recomputes(), 1);
    }
}
