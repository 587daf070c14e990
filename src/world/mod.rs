pub mod bsp;
pub mod camera;
pub mod demo;
pub mod geometry;

pub use geometry::{
    Color, Level, LevelBuilder, LevelError, Linedef, LinedefId, Sector, SectorId, Seg, SegmentId,
    Sidedef, SidedefId, Vertex, VertexId,
};

pub use bsp::{BspTree, Splitter};

pub use camera::Camera;
