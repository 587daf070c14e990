use crate::engine::types::Screen;

/// Fixed lookup between sweep-axis rows and view-relative angles.
///
/// `angles[h] = atan((half_height - h) / D)` for `h` in `0..=N`, so the
/// table is strictly decreasing: row 0 is `+clip_angle`, row `N` is
/// `-clip_angle`.
#[derive(Clone, Debug)]
pub struct AxisMapper {
    angles: Vec<f32>,
}

impl AxisMapper {
    pub fn new(screen: &Screen) -> Self {
        let half = screen.half_height();
        let d = screen.projection_distance();
        let angles = (0..=screen.height)
            .map(|h| ((half - h as f32) / d).atan())
            .collect();
        Self { angles }
    }

    /// `N`: highest valid row index.
    #[inline]
    pub fn extent(&self) -> i32 {
        (self.angles.len() - 1) as i32
    }

    /// Half-width of the field of view as seen by the table.
    #[inline]
    pub fn clip_angle(&self) -> f32 {
        self.angles[0]
    }

    /// Row → view-relative angle. Out-of-range rows clamp to the edges.
    #[inline]
    pub fn axis_to_angle(&self, axis: i32) -> f32 {
        self.angles[axis.clamp(0, self.extent()) as usize]
    }

    /// View-relative angle (in `[-π, π)`) → nearest row.
    ///
    /// The angle is clamped to the table range first. Ties pick the lower
    /// row.
    pub fn angle_to_axis(&self, angle: f32) -> i32 {
        let n = self.angles.len() - 1;
        let a = angle.clamp(self.angles[n], self.angles[0]);

        // first row whose angle is <= a (table is decreasing)
        let i = self.angles.partition_point(|&t| t > a).min(n);
        let mut best = if i > 0 && (self.angles[i - 1] - a).abs() <= (self.angles[i] - a).abs() {
            i - 1
        } else {
            i
        };
        while best > 0 && (self.angles[best - 1] - a).abs() == (self.angles[best] - a).abs() {
            best -= 1;
        }
        best as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    /// Exhaustive first-minimum scan: the slow reference.
    fn nearest_by_scan(m: &AxisMapper, angle: f32) -> i32 {
        let a = angle.clamp(m.angles[m.angles.len() - 1], m.angles[0]);
        let mut best = 0;
        for (h, &t) in m.angles.iter().enumerate() {
            if (t - a).abs() < (m.angles[best] - a).abs() {
                best = h;
            }
        }
        best as i32
    }

    #[test]
    fn table_is_strictly_decreasing() {
        let m = AxisMapper::new(&Screen::default());
        assert_eq!(m.extent(), 160);
        assert!(m.angles.windows(2).all(|w| w[0] > w[1]));
        assert!((m.clip_angle() - FRAC_PI_4).abs() < 1e-5);
        assert!(m.axis_to_angle(80).abs() < 1e-7);
    }

    #[test]
    fn round_trip_every_row() {
        let m = AxisMapper::new(&Screen::default());
        for h in 0..=m.extent() {
            assert_eq!(m.angle_to_axis(m.axis_to_angle(h)), h);
        }
    }

    #[test]
    fn binary_search_matches_scan() {
        let m = AxisMapper::new(&Screen::default());
        let mut a = -1.2f32;
        while a < 1.2 {
            assert_eq!(m.angle_to_axis(a), nearest_by_scan(&m, a), "angle {a}");
            a += 0.00137;
        }
    }

    #[test]
    fn clamps_outside_fov() {
        let m = AxisMapper::new(&Screen::default());
        assert_eq!(m.angle_to_axis(1.5), 0);
        assert_eq!(m.angle_to_axis(-1.5), 160);
        assert_eq!(m.axis_to_angle(-7), m.axis_to_angle(0));
        assert_eq!(m.axis_to_angle(999), m.axis_to_angle(160));
    }

    #[test]
    fn tie_picks_lower_row() {
        let m = AxisMapper::new(&Screen::default());
        let mid = (m.angles[10] + m.angles[11]) * 0.5;
        let got = m.angle_to_axis(mid);
        assert!(got == 10 || got == 11);
        assert_eq!(got, nearest_by_scan(&m, mid));
    }
}
