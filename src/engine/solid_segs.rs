//! Occlusion along the sweep axis.
//!
//! A sorted list of disjoint, non-adjacent closed intervals. Two sentinels
//! (`[-N, -1]` and `[N, 2N]`) bracket the visible rows so the scans never
//! fall off either end. Once the sentinels have merged into one interval
//! every row is covered.

use smallvec::SmallVec;

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct ClipRange {
    pub first: i32,
    pub last: i32,
}

impl ClipRange {
    #[inline]
    pub fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }
}

/// Newly visible pieces of one clipped wall, in emission order.
pub type Fragments = SmallVec<[ClipRange; 4]>;

#[derive(Clone, Debug)]
pub struct SolidSegs {
    ranges: Vec<ClipRange>,
    extent: i32,
}

impl SolidSegs {
    pub fn new(extent: i32) -> Self {
        let mut segs = Self {
            ranges: Vec::with_capacity(32),
            extent,
        };
        segs.reset();
        segs
    }

    /// Back to the per-frame initial state: only the sentinels.
    pub fn reset(&mut self) {
        let n = self.extent;
        self.ranges.clear();
        self.ranges.push(ClipRange::new(-n, -1));
        self.ranges.push(ClipRange::new(n, 2 * n));
    }

    #[inline]
    pub fn ranges(&self) -> &[ClipRange] {
        &self.ranges
    }

    /// Every row in `0..N` is covered.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ranges.len() == 1
    }

    /// Insert `[first, last]` as occluded and return the parts that were
    /// not covered before. Requires `0 <= first <= last < N`.
    pub fn clip_solid_wall_segment(&mut self, first: i32, last: i32) -> Fragments {
        debug_assert!(0 <= first && first <= last && last < self.extent);
        let mut out = Fragments::new();

        // first interval that touches or follows `first`
        let mut start = 0;
        while self.ranges[start].last < first - 1 {
            start += 1;
        }

        if first < self.ranges[start].first {
            if last < self.ranges[start].first - 1 {
                // wholly inside a gap
                out.push(ClipRange::new(first, last));
                self.ranges.insert(start, ClipRange::new(first, last));
                return out;
            }
            out.push(ClipRange::new(first, self.ranges[start].first - 1));
            self.ranges[start].first = first;
        }

        if last <= self.ranges[start].last {
            return out;
        }

        let mut next = start;
        while last >= self.ranges[next + 1].first - 1 {
            out.push(ClipRange::new(
                self.ranges[next].last + 1,
                self.ranges[next + 1].first - 1,
            ));
            next += 1;
            if last <= self.ranges[next].last {
                self.ranges[start].last = self.ranges[next].last;
                self.crunch(start, next);
                return out;
            }
        }

        out.push(ClipRange::new(self.ranges[next].last + 1, last));
        self.ranges[start].last = last;
        self.crunch(start, next);
        out
    }

    /// Drop the intervals swallowed by `start`.
    #[inline]
    fn crunch(&mut self, start: usize, next: usize) {
        if next > start {
            self.ranges.drain(start + 1..=next);
        }
    }
}
