use std::f32::consts::{FRAC_PI_2, PI};

use log::trace;

use crate::{
    engine::{
        angle::{point_to_angle, recenter, wrap},
        projection::AxisMapper,
        solid_segs::ClipRange,
        tables::{AffineParam, ScanlineTables, Window},
        types::{MAX_SCALE, Screen},
    },
    world::{
        camera::Camera,
        geometry::{Seg, SegmentId},
    },
};

/// Outcome of projecting one seg onto the sweep axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegClip {
    /// Facing away from the camera.
    BackFacing,
    /// Entirely outside the field of view.
    OutsideFov,
    /// Both ends land on the same row.
    TooNarrow,
    /// Two-sided line: visible but never occludes.
    Portal { y1: i32, y2: i32 },
    /// One-sided wall covering rows `y1..y2`; `rw_angle1` is the map angle
    /// from the camera to `v1` before any clipping.
    Solid { y1: i32, y2: i32, rw_angle1: f32 },
}

/// Cull and project `seg`. Rows are `y1` inclusive, `y2` exclusive.
pub fn add_line(seg: &Seg, cam: &Camera, mapper: &AxisMapper) -> SegClip {
    let clip = mapper.clip_angle();

    let mut angle1 = point_to_angle(cam.pos, seg.v1);
    let mut angle2 = point_to_angle(cam.pos, seg.v2);

    // Back-face: seg subtends π or more
    let span = wrap(angle1 - angle2);
    if span >= PI {
        return SegClip::BackFacing;
    }

    let rw_angle1 = angle1;
    angle1 = wrap(angle1 - cam.heading);
    angle2 = wrap(angle2 - cam.heading);

    let mut tspan = wrap(angle1 + clip);
    if tspan > 2.0 * clip {
        tspan -= 2.0 * clip;
        // totally off the row-0 side
        if tspan >= span {
            return SegClip::OutsideFov;
        }
        angle1 = clip;
    }
    let mut tspan = wrap(clip - angle2);
    if tspan > 2.0 * clip {
        tspan -= 2.0 * clip;
        // totally off the row-N side
        if tspan >= span {
            return SegClip::OutsideFov;
        }
        angle2 = -clip;
    }

    let y1 = mapper.angle_to_axis(recenter(angle1));
    let y2 = mapper.angle_to_axis(recenter(angle2));
    if y1 == y2 {
        return SegClip::TooNarrow;
    }

    if seg.is_portal() {
        SegClip::Portal { y1, y2 }
    } else {
        SegClip::Solid { y1, y2, rw_angle1 }
    }
}

/*──────────────────────────── Draw segs ────────────────────────────*/

/// One stored wall fragment: rows `y1..=y2` and their linear scale ramp.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawSeg {
    pub cur_line: SegmentId,
    pub y1: i32,
    pub y2: i32,
    pub scale1: f32,
    pub scale2: f32,
    pub scale_step: f32,
    pub distance: f32,
}

impl DrawSeg {
    /// `(row, scale)` for every row of the fragment, accumulated by
    /// repeated `scale_step` additions.
    pub fn row_scales(&self) -> impl Iterator<Item = (i32, f32)> + '_ {
        (self.y1..=self.y2).scan(self.scale1, |s, y| {
            let cur = *s;
            *s += self.scale_step;
            Some((y, cur))
        })
    }
}

/// Scale at view angle `vis_angle` for a wall with normal `normal` at
/// perpendicular distance `distance`.
///
/// ```text
/// scale = half_height · sin(π/2 + (vis − normal))
///         ─────────────────────────────────────
///         distance · sin(π/2 + (vis − heading))
/// ```
pub fn scale_from_global_angle(
    vis_angle: f32,
    normal: f32,
    distance: f32,
    heading: f32,
    screen: &Screen,
) -> f32 {
    let anglea = FRAC_PI_2 + (vis_angle - heading);
    let angleb = FRAC_PI_2 + (vis_angle - normal);
    let den = distance * anglea.sin();
    if den == 0.0 {
        return MAX_SCALE;
    }
    let scale = screen.half_height() * angleb.sin() / den;
    scale.min(MAX_SCALE)
}

/// Compute the scale ramp for rows `range` of a solid seg and write its
/// rows into `tables`.
#[allow(clippy::too_many_arguments)]
pub fn store_wall_range(
    seg_id: SegmentId,
    seg: &Seg,
    rw_angle1: f32,
    range: ClipRange,
    cam: &Camera,
    mapper: &AxisMapper,
    screen: &Screen,
    tables: &mut ScanlineTables,
) -> DrawSeg {
    let normal = wrap(seg.angle + FRAC_PI_2);
    let offset = recenter(normal - rw_angle1).abs().min(FRAC_PI_2);
    let hyp = cam.pos.distance(seg.v1);
    let distance = hyp * (FRAC_PI_2 - offset).sin();

    let scale_at = |y: i32| {
        let vis = cam.heading + mapper.axis_to_angle(y);
        scale_from_global_angle(vis, normal, distance, cam.heading, screen)
    };

    let (start, stop) = (range.first, range.last);
    let scale1 = scale_at(start);
    let (scale2, scale_step) = if stop > start {
        let s2 = scale_at(stop);
        (s2, (s2 - scale1) / (stop - start) as f32)
    } else {
        (scale1, 0.0)
    };

    let ds = DrawSeg {
        cur_line: seg_id,
        y1: start,
        y2: stop,
        scale1,
        scale2,
        scale_step,
        distance,
    };
    trace!(
        "wall seg {seg_id} rows {start}..={stop} scale {scale1:.4}→{scale2:.4} dist {distance:.2}"
    );

    render_seg_loop(&ds, screen, tables);
    ds
}

/// Fill the affine and window tables for every row of `ds`.
fn render_seg_loop(ds: &DrawSeg, screen: &Screen, tables: &mut ScanlineTables) {
    for (y, scale) in ds.row_scales() {
        tables.set_row(
            y,
            AffineParam::for_scale(scale, ds.y1, screen),
            Window::centred(scale, screen),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::geometry::{Level, LevelBuilder};
    use glam::{Vec2, vec2};

    /// Single one-sided line from `a` to `b`.
    fn one_wall(a: Vec2, b: Vec2) -> Level {
        let mut bld = LevelBuilder::new();
        let s = bld.sector(0);
        let v1 = bld.vertex(a.x, a.y);
        let v2 = bld.vertex(b.x, b.y);
        bld.linedef(v1, v2, s, None);
        bld.build().unwrap()
    }

    fn clip_of(a: Vec2, b: Vec2) -> SegClip {
        let level = one_wall(a, b);
        let cam = Camera::new(Vec2::ZERO, 0.0);
        let mapper = AxisMapper::new(&Screen::default());
        add_line(&level.segs[0], &cam, &mapper)
    }

    fn rows(c: SegClip) -> Option<(i32, i32)> {
        match c {
            SegClip::Solid { y1, y2, .. } | SegClip::Portal { y1, y2 } => Some((y1, y2)),
            _ => None,
        }
    }

    #[test]
    fn culls_behind_and_back_facing() {
        assert_eq!(clip_of(vec2(50.0, 10.0), vec2(50.0, -10.0)), SegClip::OutsideFov);
        assert_eq!(clip_of(vec2(-50.0, 10.0), vec2(-50.0, -10.0)), SegClip::BackFacing);
    }

    #[test]
    fn culls_past_either_fov_edge() {
        assert_eq!(clip_of(vec2(-10.0, -50.0), vec2(-30.0, -50.0)), SegClip::OutsideFov);
        assert_eq!(clip_of(vec2(-30.0, 50.0), vec2(-10.0, 50.0)), SegClip::OutsideFov);
    }

    #[test]
    fn front_wall_projects_symmetrically() {
        assert_eq!(rows(clip_of(vec2(-50.0, -10.0), vec2(-50.0, 10.0))), Some((64, 96)));
        assert_eq!(rows(clip_of(vec2(-100.0, -1.0), vec2(-100.0, 1.0))), Some((79, 81)));
    }

    #[test]
    fn straddling_walls_clamp_to_the_edge() {
        assert_eq!(rows(clip_of(vec2(-10.0, -50.0), vec2(-50.0, -10.0))), Some((0, 64)));
        assert_eq!(rows(clip_of(vec2(-50.0, 10.0), vec2(-10.0, 50.0))), Some((96, 160)));
    }

    #[test]
    fn portal_reports_rows_without_occluding() {
        let mut bld = LevelBuilder::new();
        let s0 = bld.sector(0);
        let s1 = bld.sector(1);
        let v1 = bld.vertex(-50.0, -10.0);
        let v2 = bld.vertex(-50.0, 10.0);
        bld.linedef(v1, v2, s0, Some(s1));
        let level = bld.build().unwrap();
        let cam = Camera::new(Vec2::ZERO, 0.0);
        let mapper = AxisMapper::new(&Screen::default());

        assert_eq!(
            add_line(&level.segs[0], &cam, &mapper),
            SegClip::Portal { y1: 64, y2: 96 }
        );
        // reversed side faces away
        assert_eq!(add_line(&level.segs[1], &cam, &mapper), SegClip::BackFacing);
    }

    #[test]
    fn sub_row_wall_is_too_narrow() {
        assert_eq!(clip_of(vec2(-100.0, -0.1), vec2(-100.0, 0.1)), SegClip::TooNarrow);
    }

    #[test]
    fn rw_angle1_is_pre_clip_angle() {
        let c = clip_of(vec2(-10.0, -50.0), vec2(-50.0, -10.0));
        let SegClip::Solid { rw_angle1, .. } = c else {
            panic!("expected solid, got {c:?}");
        };
        let want = point_to_angle(Vec2::ZERO, vec2(-10.0, -50.0));
        assert!((rw_angle1 - want).abs() < 1e-6);
    }

    #[test]
    fn facing_wall_scale_matches_distance() {
        // wall at distance 100 straight ahead: centre row scale = 80 / 100
        let screen = Screen::default();
        let s = scale_from_global_angle(0.0, 0.0, 100.0, 0.0, &screen);
        assert!((s - 0.8).abs() < 1e-5);
        assert_eq!(scale_from_global_angle(0.0, 0.0, 0.0, 0.0, &screen), MAX_SCALE);
        assert_eq!(scale_from_global_angle(0.0, 0.0, 1e-9, 0.0, &screen), MAX_SCALE);
    }

    #[test]
    fn store_wall_range_fills_rows() {
        let screen = Screen::default();
        let mapper = AxisMapper::new(&screen);
        let level = one_wall(vec2(-50.0, -10.0), vec2(-50.0, 10.0));
        let cam = Camera::new(Vec2::ZERO, 0.0);
        let seg = &level.segs[0];
        let SegClip::Solid { y1, y2, rw_angle1 } = add_line(seg, &cam, &mapper) else {
            panic!("wall should be solid");
        };

        let mut tables = ScanlineTables::new(screen.extent());
        let ds = store_wall_range(
            0,
            seg,
            rw_angle1,
            ClipRange::new(y1, y2 - 1),
            &cam,
            &mapper,
            &screen,
            &mut tables,
        );
        assert!((ds.distance - 50.0).abs() < 1e-3);
        // perpendicular wall at distance 50: every row has scale 80/50
        assert!((ds.scale1 - 1.6).abs() < 1e-3);
        assert!((ds.scale2 - 1.6).abs() < 1e-3);

        let (last_row, last_scale) = ds.row_scales().last().unwrap();
        assert_eq!(last_row, ds.y2);
        assert!((last_scale - ds.scale2).abs() < 1e-4);
        for (y, s) in ds.row_scales() {
            let p = tables.param(y).unwrap();
            assert!((p.pa - 1.0 / s).abs() < 1e-4);
            assert_eq!(*tables.window(y).unwrap(), Window::centred(s, &screen));
        }
        assert!(tables.window(y1 - 1).unwrap().is_empty());
        assert!(tables.window(y2).unwrap().is_empty());
    }

    #[test]
    fn single_row_fragment_has_flat_ramp() {
        let screen = Screen::default();
        let mapper = AxisMapper::new(&screen);
        let level = one_wall(vec2(-10.0, -50.0), vec2(-50.0, -10.0));
        let cam = Camera::new(Vec2::ZERO, 0.0);
        let seg = &level.segs[0];
        let SegClip::Solid { rw_angle1, .. } = add_line(seg, &cam, &mapper) else {
            panic!("wall should be solid");
        };
        let mut tables = ScanlineTables::new(screen.extent());
        let ds = store_wall_range(
            0,
            seg,
            rw_angle1,
            ClipRange::new(30, 30),
            &cam,
            &mapper,
            &screen,
            &mut tables,
        );
        assert_eq!(ds.scale_step, 0.0);
        assert_eq!(ds.scale1, ds.scale2);
        assert_eq!(ds.row_scales().count(), 1);
    }
}
