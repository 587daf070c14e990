//! Per-row output of a rebuild: affine parameters and window bounds.
//!
//! Row `y` of the sweep axis gets a 2×2 matrix plus offset that maps a
//! screen column/row into background texture space, and a window that
//! masks the columns the wall covers. Rows no wall touched keep the
//! cleared defaults (identity matrix, empty window).

use glam::Vec2;

use crate::engine::types::{MAX_SCALE, Screen};

/// Background affine parameters for one row.
///
/// ```text
/// | u |   | pa pb | | col |   | dx |
/// | v | = | pc pd | | row | + | dy |
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineParam {
    pub pa: f32,
    pub pb: f32,
    pub pc: f32,
    pub pd: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Default for AffineParam {
    fn default() -> Self {
        Self {
            pa: 1.0,
            pb: 0.0,
            pc: 0.0,
            pd: 1.0,
            dx: 0.0,
            dy: 0.0,
        }
    }
}

impl AffineParam {
    /// Uniform zoom by `scale` about the screen centre, with the wall's
    /// first row pinned so texture rows advance from there.
    pub fn for_scale(scale: f32, first_row: i32, screen: &Screen) -> Self {
        let lambda = if scale == 0.0 { MAX_SCALE } else { 1.0 / scale };
        Self {
            pa: lambda,
            pb: 0.0,
            pc: 0.0,
            pd: lambda,
            dx: -lambda * screen.half_width(),
            dy: -lambda * screen.half_height() + scale * first_row as f32,
        }
    }

    #[inline]
    pub fn apply(&self, col: f32, row: f32) -> Vec2 {
        Vec2::new(
            self.pa * col + self.pb * row + self.dx,
            self.pc * col + self.pd * row + self.dy,
        )
    }
}

/// Visible rectangle for one row: columns `[left, right)`, rows
/// `[top, bottom)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Window {
    pub left: f32,
    pub right: f32,
    pub top: i32,
    pub bottom: i32,
}

impl Window {
    /// Centred span `scale × width` wide, clamped to the screen.
    pub fn centred(scale: f32, screen: &Screen) -> Self {
        let w = screen.width as f32;
        let (left, right) = if scale > 0.0 {
            (
                ((w - scale * w) * 0.5).clamp(0.0, w),
                ((w + scale * w) * 0.5).clamp(0.0, w),
            )
        } else {
            (screen.half_width(), screen.half_width())
        };
        Self {
            left,
            right,
            top: 0,
            bottom: screen.height as i32,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    #[inline]
    pub fn contains(&self, col: i32, row: i32) -> bool {
        let c = col as f32;
        c >= self.left && c < self.right && row >= self.top && row < self.bottom
    }
}

/// Both per-row tables for the whole sweep axis (`N + 1` rows).
#[derive(Clone, Debug)]
pub struct ScanlineTables {
    params: Vec<AffineParam>,
    windows: Vec<Window>,
}

impl ScanlineTables {
    pub fn new(extent: i32) -> Self {
        let rows = extent.max(0) as usize + 1;
        Self {
            params: vec![AffineParam::default(); rows],
            windows: vec![Window::default(); rows],
        }
    }

    pub fn clear(&mut self) {
        self.params.fill(AffineParam::default());
        self.windows.fill(Window::default());
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn param(&self, row: i32) -> Option<&AffineParam> {
        usize::try_from(row).ok().and_then(|r| self.params.get(r))
    }

    #[inline]
    pub fn window(&self, row: i32) -> Option<&Window> {
        usize::try_from(row).ok().and_then(|r| self.windows.get(r))
    }

    /// Rows outside the table are ignored.
    pub fn set_row(&mut self, row: i32, param: AffineParam, window: Window) {
        if let Ok(r) = usize::try_from(row) {
            if r < self.params.len() {
                self.params[r] = param;
                self.windows[r] = window;
            }
        }
    }

    /// Apply row `row`'s transform to screen `(col, row)`.
    #[inline]
    pub fn transform(&self, col: i32, row: i32) -> Option<Vec2> {
        self.param(row).map(|p| p.apply(col as f32, row as f32))
    }

    #[inline]
    pub fn in_window(&self, col: i32, row: i32) -> bool {
        self.window(row).is_some_and(|w| w.contains(col, row))
    }

    /// Texture coordinate for screen `(col, row)`, if the row's window
    /// covers it.
    pub fn sample(&self, col: i32, row: i32) -> Option<Vec2> {
        if !self.in_window(col, row) {
            return None;
        }
        self.transform(col, row)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, &AffineParam, &Window)> + '_ {
        self.params
            .iter()
            .zip(&self.windows)
            .enumerate()
            .map(|(y, (p, w))| (y as i32, p, w))
    }
}
