//! Perspective projection for the racer.
//!
//! The road is flat in world space; depth is faked with a single perspective
//! divide per segment edge. Curves never move any geometry in 3D. Instead a
//! displacement accumulator shifts each successive segment sideways on
//! screen, growing quadratically with depth, which reads as a bend at speed.
//!
//! Everything in this module is pure math over [`Track`] and [`CameraState`]
//! so the geometry can be checked natively without a canvas.

use super::CameraState;
use super::track::{Palette, SEGMENT_LENGTH, Track};

/// Projection constant, `1 / tan(fov / 2)` for a ~100 degree field of view.
pub const FOCAL: f64 = 0.84;
/// Camera height above the road plane, world units.
pub const CAMERA_HEIGHT: f64 = 1000.0;
/// Half-width of the road in world units.
pub const ROAD_WIDTH: f64 = 2000.0;
/// Segments considered per frame, starting at the camera.
pub const DRAW_DISTANCE: usize = 160;

/// Rumble strip width as a fraction of the road half-width.
const RUMBLE_FRACTION: f64 = 1.0 / 6.0;
/// Lane marker width as a fraction of the road half-width.
const LANE_FRACTION: f64 = 0.04;

/// One projected segment edge: road center, scan line and half-width, all in
/// screen space.
#[derive(Debug, Clone, Copy)]
pub struct ScreenEdge {
    pub x: f64,
    pub y: f64,
    pub w: f64,
}

/// Screen-space geometry of one drawn segment.
#[derive(Debug, Clone, Copy)]
pub struct SegmentView {
    pub near: ScreenEdge,
    pub far: ScreenEdge,
    pub palette: &'static Palette,
}

/// Filled quad handed to the rasterizer.
#[derive(Debug, Clone)]
pub struct ScreenPoly {
    pub pts: [(f64, f64); 4],
    pub color: &'static str,
}

/// Projects the visible window of segments ahead of the camera.
///
/// Segments behind the near plane are skipped, as is any segment whose far
/// edge would not land strictly closer to the horizon than everything drawn
/// before it. The second test keeps a draw window longer than the whole
/// track from painting a second lap over the first.
pub fn project_edges(
    track: &Track,
    cam: &CameraState,
    width: f64,
    height: f64,
) -> Vec<SegmentView> {
    let segs = track.segments();
    if segs.is_empty() {
        return Vec::new();
    }
    let track_len = track.length();
    let position = cam.track_position;
    let base = track.segment_at(position);
    let base_percent = (position % SEGMENT_LENGTH) / SEGMENT_LENGTH;
    let player_x = cam.lateral_offset * ROAD_WIDTH;

    let mut views = Vec::with_capacity(DRAW_DISTANCE);
    // Curve displacement accumulator. Seeding dx with the fraction of the
    // base segment already behind the camera keeps the bend steady while
    // the camera crosses segment boundaries.
    let mut x = 0.0;
    let mut dx = -(base.curve * base_percent);
    let mut max_y = height;

    for n in 0..DRAW_DISTANCE {
        let seg = &segs[(base.index + n) % segs.len()];
        // Re-base world z once the window crosses the lap seam so depth
        // keeps increasing smoothly instead of jumping back to zero.
        let looped = seg.index < base.index;
        let cam_pos = if looped { position - track_len } else { position };
        let near_z = seg.world_start_z - cam_pos;
        let far_z = seg.world_end_z - cam_pos;

        let near_x = x - player_x;
        let far_x = x + dx - player_x;
        x += dx;
        dx += seg.curve;

        if near_z <= FOCAL {
            continue;
        }
        let near = project_point(near_z, near_x, width, height);
        let far = project_point(far_z, far_x, width, height);
        if far.y >= max_y {
            continue;
        }
        max_y = far.y;
        views.push(SegmentView {
            near,
            far,
            palette: seg.palette(),
        });
    }
    views
}

/// Projects the window and expands each segment into its filled quads:
/// grass band, rumble strips, road surface and (on light stripes) the lane
/// marker. Quads are emitted near to far; the occlusion test in
/// [`project_edges`] guarantees later quads never cover earlier ones.
pub fn project_window(
    track: &Track,
    cam: &CameraState,
    width: f64,
    height: f64,
) -> Vec<ScreenPoly> {
    let views = project_edges(track, cam, width, height);
    let mut polys = Vec::with_capacity(views.len() * 5);
    for v in &views {
        let (n, f) = (v.near, v.far);
        let p = v.palette;
        let rumble_n = n.w * RUMBLE_FRACTION;
        let rumble_f = f.w * RUMBLE_FRACTION;

        polys.push(quad(0.0, width, n.y, 0.0, width, f.y, p.grass));
        polys.push(quad(
            n.x - n.w - rumble_n,
            n.x - n.w,
            n.y,
            f.x - f.w - rumble_f,
            f.x - f.w,
            f.y,
            p.rumble,
        ));
        polys.push(quad(
            n.x + n.w,
            n.x + n.w + rumble_n,
            n.y,
            f.x + f.w,
            f.x + f.w + rumble_f,
            f.y,
            p.rumble,
        ));
        polys.push(quad(n.x - n.w, n.x + n.w, n.y, f.x - f.w, f.x + f.w, f.y, p.road));
        if let Some(lane) = p.lane {
            let lane_n = n.w * LANE_FRACTION;
            let lane_f = f.w * LANE_FRACTION;
            polys.push(quad(
                n.x - lane_n,
                n.x + lane_n,
                n.y,
                f.x - lane_f,
                f.x + lane_f,
                f.y,
                lane,
            ));
        }
    }
    polys
}

fn project_point(camera_z: f64, rel_x: f64, width: f64, height: f64) -> ScreenEdge {
    let scale = FOCAL / camera_z;
    ScreenEdge {
        x: width / 2.0 + scale * rel_x * (width / 2.0),
        y: height / 2.0 + scale * CAMERA_HEIGHT * (height / 2.0),
        w: scale * ROAD_WIDTH * (width / 2.0),
    }
}

fn quad(
    near_left: f64,
    near_right: f64,
    near_y: f64,
    far_left: f64,
    far_right: f64,
    far_y: f64,
    color: &'static str,
) -> ScreenPoly {
    ScreenPoly {
        pts: [
            (near_left, near_y),
            (near_right, near_y),
            (far_right, far_y),
            (far_left, far_y),
        ],
        color,
    }
}

// --- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::super::track::{PALETTE_DARK, TrackDirective};
    use super::*;

    const W: f64 = 800.0;
    const H: f64 = 600.0;

    fn cam(position: f64, lateral: f64) -> CameraState {
        CameraState {
            track_position: position,
            lateral_offset: lateral,
            speed: 0.0,
        }
    }

    fn straight(len: usize) -> Track {
        Track::build(&[TrackDirective { curve: 0.0, length: len }])
    }

    #[test]
    fn far_edges_march_strictly_toward_horizon() {
        let track = straight(500);
        let views = project_edges(&track, &cam(0.0, 0.0), W, H);
        assert!(!views.is_empty());
        for pair in views.windows(2) {
            assert!(
                pair[1].far.y < pair[0].far.y,
                "expected strictly decreasing y, got {} then {}",
                pair[0].far.y,
                pair[1].far.y
            );
        }
        // The whole road sits below the horizon line.
        assert!(views.iter().all(|v| v.far.y > H / 2.0));
    }

    #[test]
    fn segments_too_close_to_project_are_skipped() {
        let track = straight(500);
        let views = project_edges(&track, &cam(0.0, 0.0), W, H);
        // Segment 0 sits behind the near plane. The road only climbs above
        // the canvas bottom past FOCAL * CAMERA_HEIGHT world units, so the
        // next three segments fall below the screen and are skipped too.
        assert_eq!(views.len(), DRAW_DISTANCE - 4);
        assert!(views[0].far.y < H);
        assert!(views[0].near.y >= H, "first quad straddles the bottom edge");
    }

    #[test]
    fn window_wraps_across_the_lap_seam_without_a_gap() {
        let track = straight(500);
        let pos = track.length() - SEGMENT_LENGTH / 2.0;
        let views = project_edges(&track, &cam(pos, 0.0), W, H);
        assert_eq!(views.len(), DRAW_DISTANCE - 4);
        for pair in views.windows(2) {
            assert!(pair[1].far.y < pair[0].far.y, "seam broke depth ordering");
        }
        // Widths shrink with depth just like y, seam or no seam.
        for pair in views.windows(2) {
            assert!(pair[1].far.w < pair[0].far.w);
        }
    }

    #[test]
    fn occlusion_caps_a_window_longer_than_the_track() {
        let track = straight(10);
        let views = project_edges(&track, &cam(0.0, 0.0), W, H);
        assert!(
            views.len() <= track.segment_count(),
            "a second lap must never be drawn over the first"
        );
        for pair in views.windows(2) {
            assert!(pair[1].far.y < pair[0].far.y);
        }
    }

    #[test]
    fn right_curve_displaces_far_segments_rightward() {
        let track = Track::build(&[
            TrackDirective { curve: 0.0, length: 10 },
            TrackDirective { curve: 3.0, length: 200 },
        ]);
        let views = project_edges(&track, &cam(0.0, 0.0), W, H);
        let first = views.first().unwrap();
        let last = views.last().unwrap();
        assert!(
            last.far.x > first.far.x + 1.0,
            "curve accumulator should bend the road right, {} vs {}",
            last.far.x,
            first.far.x
        );
    }

    #[test]
    fn steering_right_shifts_the_road_left() {
        let track = straight(500);
        let centered = project_edges(&track, &cam(0.0, 0.0), W, H);
        let steered = project_edges(&track, &cam(0.0, 0.5), W, H);
        assert!(steered[0].near.x < centered[0].near.x);
    }

    #[test]
    fn window_quads_cover_grass_rumbles_and_road() {
        let track = straight(500);
        let polys = project_window(&track, &cam(0.0, 0.0), W, H);
        let views = project_edges(&track, &cam(0.0, 0.0), W, H);
        let lanes = views.iter().filter(|v| v.palette.lane.is_some()).count();
        assert_eq!(polys.len(), views.len() * 4 + lanes);
        // First poly of each segment is the full-width grass band, and the
        // first drawn segment (index 4) lands on the dark stripe.
        assert_eq!(views[0].palette, &PALETTE_DARK);
        let grass = &polys[0];
        assert_eq!(grass.color, views[0].palette.grass);
        assert_eq!(grass.pts[0].0, 0.0);
        assert_eq!(grass.pts[1].0, W);
    }
}
