use std::ops::ControlFlow;

use bitflags::bitflags;
use log::{debug, trace};

use crate::{
    engine::{
        projection::AxisMapper,
        solid_segs::SolidSegs,
        tables::ScanlineTables,
        types::Screen,
        walls::{DrawSeg, SegClip, add_line, store_wall_range},
    },
    world::{bsp::BspTree, camera::Camera, geometry::Level},
};

bitflags! {
    /// What changed on the camera since the last rebuild.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CameraChange: u8 {
        const MOVED   = 0x01;
        const ROTATED = 0x02;
    }
}

impl CameraChange {
    pub fn between(old: &Camera, new: &Camera) -> Self {
        let mut change = CameraChange::empty();
        if old.pos != new.pos {
            change |= CameraChange::MOVED;
        }
        if old.heading != new.heading {
            change |= CameraChange::ROTATED;
        }
        change
    }
}

/// Counters for one rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub sectors_visited: u32,
    pub segs_visited: u32,
    pub back_facing: u32,
    pub outside_fov: u32,
    pub too_narrow: u32,
    pub portals: u32,
    pub fragments: u32,
    pub fully_occluded: bool,
}

/// Everything one rebuild writes. Reset at the start of each rebuild.
#[derive(Clone, Debug)]
pub struct FrameState {
    pub solid_segs: SolidSegs,
    pub drawsegs: Vec<DrawSeg>,
    pub tables: ScanlineTables,
    pub stats: FrameStats,
}

impl FrameState {
    pub fn new(screen: &Screen) -> Self {
        Self {
            solid_segs: SolidSegs::new(screen.extent()),
            drawsegs: Vec::with_capacity(64),
            tables: ScanlineTables::new(screen.extent()),
            stats: FrameStats::default(),
        }
    }

    pub fn clear(&mut self) {
        self.solid_segs.reset();
        self.drawsegs.clear();
        self.tables.clear();
        self.stats = FrameStats::default();
    }
}

/// Walk the tree front to back from `cam` and rebuild `state` from
/// scratch. Stops as soon as every row is occluded.
pub fn rebuild_frame(
    level: &Level,
    bsp: &BspTree,
    cam: &Camera,
    mapper: &AxisMapper,
    screen: &Screen,
    state: &mut FrameState,
) {
    state.clear();

    let _ = bsp.front_to_back(cam.pos, &mut |sector| {
        if state.solid_segs.is_full() {
            return ControlFlow::Break(());
        }
        state.stats.sectors_visited += 1;
        for (seg_id, seg) in level.segs_of(sector) {
            if state.solid_segs.is_full() {
                return ControlFlow::Break(());
            }
            state.stats.segs_visited += 1;

            match add_line(seg, cam, mapper) {
                SegClip::BackFacing => state.stats.back_facing += 1,
                SegClip::OutsideFov => state.stats.outside_fov += 1,
                SegClip::TooNarrow => state.stats.too_narrow += 1,
                SegClip::Portal { y1, y2 } => {
                    trace!("portal seg {seg_id} rows {y1}..{y2}");
                    state.stats.portals += 1;
                }
                SegClip::Solid { y1, y2, rw_angle1 } => {
                    for range in state.solid_segs.clip_solid_wall_segment(y1, y2 - 1) {
                        let ds = store_wall_range(
                            seg_id,
                            seg,
                            rw_angle1,
                            range,
                            cam,
                            mapper,
                            screen,
                            &mut state.tables,
                        );
                        state.drawsegs.push(ds);
                        state.stats.fragments += 1;
                    }
                }
            }
        }
        ControlFlow::Continue(())
    });

    state.stats.fully_occluded = state.solid_segs.is_full();
    debug!("rebuilt frame: {:?}", state.stats);
}

/*──────────────────────────── Engine ───────────────────────────────*/

pub struct Engine {
    pub level: Level,
    pub bsp: BspTree,
    pub camera: Camera,
    screen: Screen,
    mapper: AxisMapper,
    state: FrameState,
    last_camera: Option<Camera>,
}

impl Engine {
    pub fn new(level: Level, bsp: BspTree, camera: Camera, screen: Screen) -> Self {
        let mapper = AxisMapper::new(&screen);
        let state = FrameState::new(&screen);
        Self {
            level,
            bsp,
            camera,
            screen,
            mapper,
            state,
            last_camera: None,
        }
    }

    /// Camera change since the last rebuild. Everything is pending before
    /// the first frame.
    pub fn pending_change(&self) -> CameraChange {
        match &self.last_camera {
            Some(last) => CameraChange::between(last, &self.camera),
            None => CameraChange::all(),
        }
    }

    /// Rebuild the tables if the camera changed; otherwise keep last
    /// frame's output. Returns what triggered the rebuild (empty when
    /// nothing was rebuilt).
    pub fn render_frame(&mut self) -> CameraChange {
        let change = self.pending_change();
        if change.is_empty() {
            debug!("camera unchanged, reusing tables");
            return change;
        }

        rebuild_frame(
            &self.level,
            &self.bsp,
            &self.camera,
            &self.mapper,
            &self.screen,
            &mut self.state,
        );
        self.last_camera = Some(self.camera);
        change
    }

    /// Force a rebuild on the next `render_frame`.
    pub fn invalidate(&mut self) {
        self.last_camera = None;
    }

    #[inline]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[inline]
    pub fn mapper(&self) -> &AxisMapper {
        &self.mapper
    }

    #[inline]
    pub fn state(&self) -> &FrameState {
        &self.state
    }

    #[inline]
    pub fn tables(&self) -> &ScanlineTables {
        &self.state.tables
    }

    #[inline]
    pub fn drawsegs(&self) -> &[DrawSeg] {
        &self.state.drawsegs
    }

    #[inline]
    pub fn stats(&self) -> &FrameStats {
        &self.state.stats
    }
}
