pub mod angle;
#[allow(clippy::module_inception)]
pub mod engine;
pub mod projection;
pub mod solid_segs;
pub mod tables;
pub mod types;
pub mod walls;

pub use engine::{CameraChange, Engine, FrameState, FrameStats, rebuild_frame};
pub use projection::AxisMapper;
pub use solid_segs::{ClipRange, SolidSegs};
pub use tables::{AffineParam, ScanlineTables, Window};
pub use types::{ConfigError, MAX_SCALE, Screen};
pub use walls::{DrawSeg, SegClip};
