use glam::Vec2;

use crate::engine::angle::wrap;

/// View-point on the map plane.
///
/// * `heading` is a map angle: the camera looks along the direction whose
///   `point_to_angle` equals it, so heading 0 faces −X.
/// * Row 0 of the sweep axis sits at `heading + clip_angle`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub heading: f32, // radians, [0, 2π)
}

impl Camera {
    pub fn new(pos: Vec2, heading: f32) -> Self {
        Self {
            pos,
            heading: wrap(heading),
        }
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn forward(self) -> Vec2 {
        let (s, c) = self.heading.sin_cos();
        Vec2::new(-c, -s)
    }

    /// Unit vector towards the sweep-axis end (`-clip_angle` side).
    #[inline(always)]
    pub fn right(self) -> Vec2 {
        let f = self.forward();
        Vec2::new(f.y, -f.x)
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Move by `forward` units along the view and `side` units to the right.
    pub fn step(&mut self, forward: f32, side: f32) {
        self.pos += self.forward() * forward + self.right() * side;
    }

    /// Rotate; positive turns towards row 0.
    pub fn turn(&mut self, delta: f32) {
        self.heading = wrap(self.heading + delta);
    }

    pub fn teleport(&mut self, pos: Vec2, heading: f32) {
        self.pos = pos;
        self.heading = wrap(heading);
    }
}
