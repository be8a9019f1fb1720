//! RetroDrive, the pseudo-3D highway cruise.
//!
//! The simulation is one camera gliding along a circular [`track::Track`]:
//! arrow up accelerates, arrow down brakes, left/right slide the camera
//! across the road. There is nothing to crash into; the game is the cruise
//! and the speed readout.
//!
//! Physics and projection are plain data-in data-out ([`DriveState::step`],
//! [`project`]); only the rasterizer at the bottom touches the canvas.

pub mod project;
pub mod track;

use web_sys::CanvasRenderingContext2d;

use crate::input::InputSnapshot;
use project::{ScreenPoly, project_window};
use track::{SEGMENT_LENGTH, Track};

/// Speed gained per tick while accelerating.
pub const ACCEL: f64 = 4.0;
/// Speed shed per tick while braking, on top of friction.
pub const BRAKE: f64 = 8.0;
/// Multiplicative drag applied every tick, throttle or not.
pub const FRICTION: f64 = 0.98;
/// Hard speed ceiling, world units per tick.
pub const MAX_SPEED: f64 = 200.0;
/// Lateral slide per tick while steering, in road half-widths.
pub const STEER_RATE: f64 = 0.025;

/// Camera pose and velocity along the track.
#[derive(Debug, Clone, Copy)]
pub struct CameraState {
    /// Distance along the lap, always within `0..track.length()`.
    pub track_position: f64,
    /// Sideways offset in road half-widths. 0 is the road center and the
    /// edges sit at roughly +/-1, but driving onto the grass is allowed.
    pub lateral_offset: f64,
    /// Forward speed in world units per tick, within `0..=MAX_SPEED`.
    pub speed: f64,
}

impl CameraState {
    pub fn new() -> Self {
        CameraState {
            track_position: 0.0,
            lateral_offset: 0.0,
            speed: 0.0,
        }
    }

    /// Moves the camera forward and wraps at the lap seam.
    pub fn advance(&mut self, dist: f64, track_length: f64) {
        self.track_position = (self.track_position + dist).rem_euclid(track_length);
    }
}

impl Default for CameraState {
    fn default() -> Self {
        CameraState::new()
    }
}

/// Full racer state.
#[derive(Debug)]
pub struct DriveState {
    pub camera: CameraState,
    track: Track,
    /// Total distance driven, the score proxy.
    distance: f64,
}

impl DriveState {
    pub fn new() -> Self {
        DriveState {
            camera: CameraState::new(),
            track: Track::default_circuit(),
            distance: 0.0,
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Advances the simulation by one tick.
    ///
    /// Order matters: throttle and brake feed into speed, friction drags the
    /// result every tick, then steering applies only while moving, and the
    /// camera finally advances by the new speed.
    pub fn step(&mut self, input: &InputSnapshot) {
        let accel = if input.up { ACCEL } else { 0.0 };
        let brake = if input.down { BRAKE } else { 0.0 };
        self.camera.speed =
            ((self.camera.speed + accel - brake) * FRICTION).clamp(0.0, MAX_SPEED);
        if self.camera.speed > 0.0 {
            if input.left {
                self.camera.lateral_offset -= STEER_RATE;
            }
            if input.right {
                self.camera.lateral_offset += STEER_RATE;
            }
        }
        self.camera.advance(self.camera.speed, self.track.length());
        self.distance += self.camera.speed;
    }

    /// Segments driven so far.
    pub fn score(&self) -> i64 {
        (self.distance / SEGMENT_LENGTH) as i64
    }

    pub fn frame(
        &mut self,
        _now: f64,
        input: &InputSnapshot,
        ctx: &CanvasRenderingContext2d,
        width: f64,
        height: f64,
    ) {
        self.step(input);
        self.render(ctx, width, height);
    }

    // --- Rendering ---------------------------------------------------------

    fn render(&self, ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
        // Synthwave sky, then the sun, then the ground plane. The road quads
        // paint over the ground from the bottom up to the draw horizon.
        let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        sky.add_color_stop(0.0, "#0f172a").ok();
        sky.add_color_stop(0.5, "#4c1d95").ok();
        sky.add_color_stop(1.0, "#c026d3").ok();
        ctx.set_fill_style_canvas_gradient(&sky);
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_fill_style_str("#facc15");
        ctx.begin_path();
        ctx.arc(w / 2.0, h / 2.0, 80.0, 0.0, std::f64::consts::PI * 2.0)
            .ok();
        ctx.fill();

        ctx.set_fill_style_str("#000");
        ctx.fill_rect(0.0, h / 2.0, w, h / 2.0);

        for poly in project_window(&self.track, &self.camera, w, h) {
            fill_poly(ctx, &poly);
        }

        self.draw_hud(ctx);
    }

    fn draw_hud(&self, ctx: &CanvasRenderingContext2d) {
        ctx.set_font("bold 20px 'Fira Code', monospace");
        ctx.set_text_align("left");
        ctx.set_line_width(4.0);
        ctx.set_stroke_style_str("#000");
        let speed = format!("SPEED {:>4}", self.camera.speed.round() as i64);
        ctx.stroke_text(&speed, 16.0, 32.0).ok();
        ctx.set_fill_style_str("#22d3ee");
        ctx.fill_text(&speed, 16.0, 32.0).ok();
        let dist = format!("DIST {:>6}", self.score());
        ctx.stroke_text(&dist, 16.0, 58.0).ok();
        ctx.set_fill_style_str("#f8fafc");
        ctx.fill_text(&dist, 16.0, 58.0).ok();
    }
}

impl Default for DriveState {
    fn default() -> Self {
        DriveState::new()
    }
}

fn fill_poly(ctx: &CanvasRenderingContext2d, poly: &ScreenPoly) {
    ctx.set_fill_style_str(poly.color);
    ctx.begin_path();
    ctx.move_to(poly.pts[0].0, poly.pts[0].1);
    for p in &poly.pts[1..] {
        ctx.line_to(p.0, p.1);
    }
    ctx.close_path();
    ctx.fill();
}

// --- Tests -----------------------------------------------------------------
