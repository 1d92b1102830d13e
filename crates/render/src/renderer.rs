use glam::{Mat4, Vec3};
use gungale_common::CameraPose;
use gungale_kernel::{PlayerFrame, Simulation};

/// Camera/view configuration for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Width over height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl RenderView {
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 2000.0;

    /// View for a player frame on an output with the given aspect ratio.
    ///
    /// A non-positive or non-finite aspect falls back to 1.
    pub fn from_frame(frame: &PlayerFrame, aspect: f32) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        let CameraPose { eye, target, up } = frame.pose;
        Self {
            eye,
            target,
            up,
            fov_degrees: frame.fov_degrees,
            aspect,
            near: Self::NEAR,
            far: Self::FAR,
        }
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.eye,
            target: self.target,
            up: self.up,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.pose().view_matrix()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for RenderView {
    fn default() -> Self {
        let pose = CameraPose::default();
        Self {
            eye: pose.eye,
            target: pose.target,
            up: pose.up,
            fov_degrees: 60.0,
            aspect: 16.0 / 9.0,
            near: Self::NEAR,
            far: Self::FAR,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads simulation state and a view, then produces output.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given simulation state and view.
    fn render(&self, sim: &Simulation, view: &RenderView) -> Self::Output;
}

/// Produces a human-readable summary of the simulation and view.
///
/// Used for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, sim: &Simulation, view: &RenderView) -> String {
        let body = sim.player().body();
        let look = sim.player().camera().look();
        let (p, v) = (body.position, body.velocity);

        let mut out = String::new();
        out.push_str(&format!(
            "=== Player (tick={}, t={:.2}s) ===\n",
            sim.tick(),
            sim.elapsed()
        ));
        out.push_str(&format!(
            "Body: pos=({:.2}, {:.2}, {:.2}) vel=({:.2}, {:.2}, {:.2}) speed={:.2} grounded={}\n",
            p.x,
            p.y,
            p.z,
            v.x,
            v.y,
            v.z,
            body.horizontal_speed(),
            body.is_grounded
        ));
        out.push_str(&format!(
            "Look: yaw={:.3} pitch={:.3} walk={:.2}\n",
            look.yaw, look.pitch, look.walk_blend
        ));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.1}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));
        tracing::trace!(tick = sim.tick(), bytes = out.len(), "debug frame rendered");
        out
    }
}
