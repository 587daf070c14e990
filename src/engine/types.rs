use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use thiserror::Error;

/// Cap on per-row scale; also stands in when a distance term vanishes.
pub const MAX_SCALE: f32 = 100_000.0;

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("screen dimension {0} must be at least one pixel")]
    EmptyScreen(&'static str),

    #[error("half field of view {0} rad must lie in (0, π/2)")]
    HalfFov(f32),
}

/*──────────────────────────── Screen ───────────────────────────────*/

/// Constants that depend on the *frame-buffer*, not on the map.
///
/// The sweep axis runs along `height`: row 0 is the left edge of the
/// field of view, row `height` the right edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    pub width: usize,
    pub height: usize,
    pub half_fov: f32, // radians
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            width: 240,
            height: 160,
            half_fov: FRAC_PI_4,
        }
    }
}

impl Screen {
    pub fn new(width: usize, height: usize, half_fov: f32) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::EmptyScreen("width"));
        }
        if height == 0 {
            return Err(ConfigError::EmptyScreen("height"));
        }
        if !(half_fov > 0.0 && half_fov < FRAC_PI_2) {
            return Err(ConfigError::HalfFov(half_fov));
        }
        Ok(Self {
            width,
            height,
            half_fov,
        })
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width as f32 * 0.5
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height as f32 * 0.5
    }

    /// Distance from the eye to the projection plane, in rows.
    ///
    /// ```text
    /// D = half_height / tan(half_fov)
    /// ```
    #[inline]
    pub fn projection_distance(&self) -> f32 {
        self.half_height() / self.half_fov.tan()
    }

    /// Number of sweep-axis cells (`N`). Valid rows are `0..=N`.
    #[inline]
    pub fn extent(&self) -> i32 {
        self.height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_screen_matches_handheld() {
        let s = Screen::default();
        assert_eq!((s.width, s.height), (240, 160));
        assert!((s.projection_distance() - 80.0).abs() < 1e-3);
        assert_eq!(s.extent(), 160);
    }

    #[test]
    fn rejects_degenerate_config() {
        assert_eq!(
            Screen::new(0, 160, FRAC_PI_4),
            Err(ConfigError::EmptyScreen("width"))
        );
        assert_eq!(
            Screen::new(240, 0, FRAC_PI_4),
            Err(ConfigError::EmptyScreen("height"))
        );
        assert!(matches!(
            Screen::new(240, 160, FRAC_PI_2),
            Err(ConfigError::HalfFov(_))
        ));
        assert!(matches!(
            Screen::new(240, 160, 0.0),
            Err(ConfigError::HalfFov(_))
        ));
    }
}
