//! Doom-style BSP visibility driving per-scanline affine backgrounds.
//!
//! The world is a 2-D map of convex sectors split by a hand-authored BSP
//! tree. Each frame walks the tree front to back, clips wall segments
//! against the sweep axis with a solid-seg list and turns every visible
//! fragment into per-row affine parameters plus window bounds.

pub mod engine;
pub mod world;

pub use engine::{Engine, FrameState, FrameStats, Screen};
pub use world::{BspTree, Camera, Level};
